//! levelup keeps track of the games gamers own and the events they organize to play them.
#![warn(missing_debug_implementations, rust_2018_idioms)]

#[macro_use]
extern crate lazy_static;

#[macro_use]
extern crate log;

#[macro_use]
extern crate serde_derive;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::prelude::*;

use anyhow::Error;
use dotenv::dotenv;

#[macro_use]
mod macros;


mod auth;
mod config;
mod db;
mod errors;
mod events;
mod gamers;
mod games;
mod gametypes;
mod serialization;
mod server;
mod store;
mod validator;

use config::Config;
use server::State;
use store::PgStore;

#[actix_web::main]
async fn main() -> anyhow::Result<(), Error> {
    init().await?;

    Ok(())
}

async fn init() -> anyhow::Result<(), Error> {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .try_init()?;

    Config::init();

    debug!("connecting to the database");
    let pool =
        db::build_connection_pool(Config::database_url(), Config::database_max_connections())
            .await?;

    info!("running database migrations");
    db::migrate(&pool).await?;

    debug!("launching the actix webserver");
    server::launch(State::new(PgStore::new(pool))).await?;

    Ok(())
}
