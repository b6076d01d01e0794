use actix_identity::Identity;
use actix_web::web::{self, Data, Json, Path};
use actix_web::{delete, get, put};

use crate::auth;
use crate::gamers::GamerUpdate;
use crate::server::{Response, State};

#[get("/gamers")]
async fn find_all(state: Data<State>, id: Identity) -> Response {
    auth::get_gamer_id(&id, &state).await?;

    let gamers = state.db.find_gamers().await?;

    http_ok_json!(gamers);
}

#[get("/gamers/{id}")]
async fn find(gamer_id: Path<i64>, state: Data<State>, id: Identity) -> Response {
    auth::get_gamer_id(&id, &state).await?;

    let gamer = state.db.find_gamer(gamer_id.into_inner()).await?;

    http_ok_json!(gamer);
}

#[put("/gamers/{id}")]
async fn update(
    gamer_id: Path<i64>,
    gamer: Json<GamerUpdate>,
    state: Data<State>,
    id: Identity,
) -> Response {
    let caller_id = auth::get_gamer_id(&id, &state).await?;
    let gamer_id = gamer_id.into_inner();

    if gamer_id != caller_id {
        forbidden!("you can only change your own profile");
    }

    state.db.update_gamer(gamer_id, &gamer).await?;

    http_no_content!();
}

#[delete("/gamers/{id}")]
async fn delete(gamer_id: Path<i64>, state: Data<State>, id: Identity) -> Response {
    let caller_id = auth::get_gamer_id(&id, &state).await?;
    let gamer_id = gamer_id.into_inner();

    if gamer_id != caller_id {
        forbidden!("you can only delete your own account");
    }

    state.db.delete_gamer(gamer_id).await?;
    info!("gamer {} deleted their account", gamer_id);

    id.forget();

    http_no_content!();
}

pub fn register(cfg: &mut web::ServiceConfig) {
    cfg.service(find_all);
    cfg.service(find);
    cfg.service(update);
    cfg.service(delete);
}
