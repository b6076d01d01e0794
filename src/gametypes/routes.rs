use actix_identity::Identity;
use actix_web::web::{self, Data, Json, Path};
use actix_web::{delete, get, post, put};

use crate::auth;
use crate::gametypes::GameTypeMessage;
use crate::server::{Response, State};
use crate::validator::Validator;

#[get("/gametypes")]
async fn find_all(state: Data<State>, id: Identity) -> Response {
    auth::get_gamer_id(&id, &state).await?;

    let game_types = state.db.find_game_types().await?;

    http_ok_json!(game_types);
}

#[get("/gametypes/{id}")]
async fn find(game_type_id: Path<i64>, state: Data<State>, id: Identity) -> Response {
    auth::get_gamer_id(&id, &state).await?;

    let game_type = state.db.find_game_type(game_type_id.into_inner()).await?;

    http_ok_json!(game_type);
}

#[post("/gametypes")]
async fn create(
    game_type: Json<Validator<GameTypeMessage>>,
    state: Data<State>,
    id: Identity,
) -> Response {
    auth::get_gamer_id(&id, &state).await?;
    let game_type = game_type.into_inner().validate()?;

    let game_type = state.db.create_game_type(&game_type).await?;

    http_created_json!(game_type);
}

#[put("/gametypes/{id}")]
async fn update(
    game_type_id: Path<i64>,
    game_type: Json<Validator<GameTypeMessage>>,
    state: Data<State>,
    id: Identity,
) -> Response {
    auth::get_gamer_id(&id, &state).await?;
    let game_type = game_type.into_inner().validate()?;

    state
        .db
        .update_game_type(game_type_id.into_inner(), &game_type)
        .await?;

    http_no_content!();
}

#[delete("/gametypes/{id}")]
async fn delete(game_type_id: Path<i64>, state: Data<State>, id: Identity) -> Response {
    auth::get_gamer_id(&id, &state).await?;

    state.db.delete_game_type(game_type_id.into_inner()).await?;

    http_no_content!();
}

pub fn register(cfg: &mut web::ServiceConfig) {
    cfg.service(find_all);
    cfg.service(find);
    cfg.service(create);
    cfg.service(update);
    cfg.service(delete);
}
