use crate::core::config::DatabaseConfig;
use sqlx::{migrate::MigrateError, postgres::PgPoolOptions, PgPool};
use std::time::Duration;

const MENU_SEED: &str = include_str!("../../seeds/menu.sql");

/// Connection pool for the direct-Postgres data backend
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .connect(&config.url)
        .await
}

/// Create the `categories` and `items` tables if they are missing
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Insert the starter menu when the catalog has no categories yet
///
/// Returns `false` without touching the tables if any category exists.
pub async fn seed_menu(pool: &PgPool) -> Result<bool, sqlx::Error> {
    let populated: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM categories)")
        .fetch_one(pool)
        .await?;

    if populated {
        return Ok(false);
    }

    sqlx::query(MENU_SEED).execute(pool).await?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_seed_covers_three_sections() {
        assert!(MENU_SEED.contains("('Hot Drinks'), ('Cold Drinks'), ('Cakes')"));
        assert_eq!(MENU_SEED.matches("'/images/").count(), 12);
        assert!(MENU_SEED.contains("'/images/cakes/cheesecake.jpg', 'Cakes'"));
        // Single statement so it runs as one prepared query
        assert_eq!(MENU_SEED.trim_end().matches(';').count(), 1);
    }
}
