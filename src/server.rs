use std::sync::Arc;

use actix_web::{get, middleware, web, App, HttpRequest, HttpResponse, HttpServer};

use crate::auth;
use crate::config::Config;
use crate::errors::ServiceError;
use crate::events;
use crate::gamers;
use crate::games;
use crate::gametypes;
use crate::store::Store;

pub type Response = Result<HttpResponse, ServiceError>;

/// Shared by every worker, the store is the only thing requests have in common
pub struct State {
    pub db: Arc<dyn Store>,
}

impl State {
    pub fn new(db: impl Store + 'static) -> Self {
        State { db: Arc::new(db) }
    }
}

#[get("/health")]
async fn health(_: HttpRequest) -> &'static str {
    "ok"
}

/// malformed, incomplete or unknown body fields are answered with 400 and a message
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(262_144)
        .error_handler(|err, _| ServiceError::BadRequest(err.to_string()).into())
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _| ServiceError::BadRequest(err.to_string()).into())
}

pub fn register(cfg: &mut web::ServiceConfig) {
    cfg.service(health).service(
        web::scope("/api")
            .configure(auth::routes::init_routes)
            .configure(gamers::routes::register)
            .configure(gametypes::routes::register)
            .configure(games::routes::register)
            .configure(events::routes::register),
    );
}

pub async fn launch(state: State) -> std::io::Result<()> {
    let state = web::Data::new(state);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(json_config())
            .app_data(query_config())
            .wrap(auth::identity_service(
                Config::session_private_key(),
                Config::secure_cookies(),
            ))
            .wrap(middleware::DefaultHeaders::new().add(("X-Version", env!("CARGO_PKG_VERSION"))))
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(register)
    })
    .bind((Config::api_host(), Config::api_port()))?
    .run()
    .await
}
