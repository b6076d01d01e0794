use actix_identity::Identity;
use actix_web::web::{self, Data, Json, Path, Query};
use actix_web::{delete, get, post, put};

use crate::auth;
use crate::errors::invalid_reference;
use crate::games::{GameFilter, GameMessage};
use crate::server::{Response, State};
use crate::validator::Validator;

#[get("/games")]
async fn find_all(filter: Query<GameFilter>, state: Data<State>, id: Identity) -> Response {
    auth::get_gamer_id(&id, &state).await?;

    let games = state.db.find_games(&filter).await?;

    http_ok_json!(games);
}

#[get("/games/{id}")]
async fn find(game_id: Path<i64>, state: Data<State>, id: Identity) -> Response {
    auth::get_gamer_id(&id, &state).await?;

    let game = state.db.find_game(game_id.into_inner()).await?;

    http_ok_json!(game);
}

#[post("/games")]
async fn create(game: Json<Validator<GameMessage>>, state: Data<State>, id: Identity) -> Response {
    let gamer_id = auth::get_gamer_id(&id, &state).await?;
    let game = game.into_inner().validate()?;

    state
        .db
        .find_game_type(game.game_type)
        .await
        .map_err(invalid_reference("game_type", game.game_type))?;

    let game = state.db.create_game(gamer_id, &game).await?;
    debug!("gamer {} added game {}", gamer_id, game.game.id);

    http_created_json!(game);
}

/// overwrites every field except the gamer who added the game
#[put("/games/{id}")]
async fn update(
    game_id: Path<i64>,
    game: Json<Validator<GameMessage>>,
    state: Data<State>,
    id: Identity,
) -> Response {
    auth::get_gamer_id(&id, &state).await?;
    let game_id = game_id.into_inner();
    let game = game.into_inner().validate()?;

    state.db.find_game(game_id).await?;
    state.db.find_game_type(game.game_type).await?;

    state.db.update_game(game_id, &game).await?;

    http_no_content!();
}

#[delete("/games/{id}")]
async fn delete(game_id: Path<i64>, state: Data<State>, id: Identity) -> Response {
    auth::get_gamer_id(&id, &state).await?;

    state.db.delete_game(game_id.into_inner()).await?;

    http_no_content!();
}

pub fn register(cfg: &mut web::ServiceConfig) {
    cfg.service(find_all);
    cfg.service(find);
    cfg.service(create);
    cfg.service(update);
    cfg.service(delete);
}
