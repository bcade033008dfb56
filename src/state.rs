use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::config::AppConfig;
use crate::recipes::repo::RecipeRepo;
use crate::users::repo::UserRepo;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        Self::connect(config).await
    }

    pub async fn connect(config: Arc<AppConfig>) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(&config.database_url)
            .context("parse DATABASE_URL")?
            .create_if_missing(true)
            .foreign_keys(true);

        let db = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await
            .context("connect to database")?;
        migrate(&db).await?;

        Ok(Self { db, config })
    }

    pub fn from_parts(db: SqlitePool, config: Arc<AppConfig>) -> Self {
        Self { db, config }
    }

    /// In-memory database with the schema applied. Every connection to
    /// `sqlite::memory:` is a separate database, so the pool is pinned to
    /// one connection that is never recycled.
    pub async fn ephemeral() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig {
            database_url: "sqlite::memory:".into(),
            max_connections: 1,
        });
        let options = SqliteConnectOptions::from_str(&config.database_url)
            .context("parse in-memory url")?
            .foreign_keys(true);

        let db = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .context("open in-memory database")?;
        migrate(&db).await?;

        Ok(Self { db, config })
    }

    pub fn users(&self) -> UserRepo {
        UserRepo::new(self.db.clone())
    }

    pub fn recipes(&self) -> RecipeRepo {
        RecipeRepo::new(self.db.clone())
    }
}

pub async fn migrate(db: &SqlitePool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations")
        .run(db)
        .await
        .context("run migrations")?;
    tracing::debug!("migrations applied");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ephemeral_state_has_schema() {
        let state = AppState::ephemeral().await.expect("ephemeral state");
        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('users', 'recipes') ORDER BY name",
        )
        .fetch_all(&state.db)
        .await
        .expect("list tables");
        let names: Vec<_> = tables.into_iter().map(|(n,)| n).collect();
        assert_eq!(names, vec!["recipes".to_string(), "users".to_string()]);
    }

    #[tokio::test]
    async fn ephemeral_state_enforces_foreign_keys() {
        let state = AppState::ephemeral().await.expect("ephemeral state");
        let (enabled,): (i64,) = sqlx::query_as("PRAGMA foreign_keys")
            .fetch_one(&state.db)
            .await
            .expect("pragma");
        assert_eq!(enabled, 1);
    }
}
