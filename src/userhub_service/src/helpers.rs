use secrecy::ExposeSecret;
use sqlx::{PgPool, postgres::PgPoolOptions};
use userhub_adapters::Settings;

/// Configure and return a PostgreSQL connection pool
///
/// Creates the pool from the loaded settings and runs all pending
/// migrations.
///
/// # Panics
/// Panics if unable to create the pool or run migrations; only meant for
/// service startup.
pub async fn configure_postgres(settings: &Settings) -> PgPool {
    let pg_pool = get_postgres_pool(
        settings.postgres.url.expose_secret(),
        settings.postgres.max_connections,
    )
    .await
    .expect("Failed to create Postgres connection pool");

    sqlx::migrate!("./migrations")
        .run(&pg_pool)
        .await
        .expect("Failed to run migrations");

    pg_pool
}

/// Create a PostgreSQL connection pool
///
/// # Arguments
/// * `url` - Database connection URL
/// * `max_connections` - Pool size cap
pub async fn get_postgres_pool(url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(url)
        .await
}
