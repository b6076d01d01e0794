use sqlx::postgres::PgPoolOptions;

pub type Pool = sqlx::PgPool;

pub async fn build_connection_pool(
    database_url: &str,
    max_connections: u32,
) -> Result<Pool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

pub async fn migrate(pool: &Pool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
