use actix_identity::Identity;
use actix_web::web::{self, Data, Json};
use actix_web::post;

use crate::auth;
use crate::errors::ServiceError;
use crate::gamers::{Credentials, GamerMessage};
use crate::server::{Response, State};
use crate::validator::Validator;

#[post("/register")]
async fn register(gamer: Json<Validator<GamerMessage>>, state: Data<State>, id: Identity) -> Response {
    let mut gamer = gamer.into_inner().validate()?;

    let gamer = web::block(move || {
        gamer.hash_password()?;
        Ok::<_, ServiceError>(gamer)
    })
    .await??;

    let gamer = state.db.create_gamer(&gamer).await?;
    info!("registered gamer {}", gamer.username);

    auth::remember(&id, &gamer);

    http_created_json!(gamer);
}

#[post("/login")]
async fn login(credentials: Json<Credentials>, state: Data<State>, id: Identity) -> Response {
    let credentials = credentials.into_inner();

    let gamer = state
        .db
        .find_gamer_by_username(&credentials.username)
        .await
        .map_err(|error| match error {
            ServiceError::NotFound(_) => ServiceError::Unauthorized,
            _ => error,
        })?;

    let gamer = web::block(move || {
        gamer.verify_password(credentials.password.as_bytes())?;
        Ok::<_, ServiceError>(gamer)
    })
    .await??;

    auth::remember(&id, &gamer);

    http_ok_json!(gamer);
}

#[post("/logout")]
async fn logout(id: Identity) -> Response {
    auth::parse_identity(&id)?;

    id.forget();

    http_message!(Ok, "Successfully signed out");
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(register);
    cfg.service(login);
    cfg.service(logout);
}
