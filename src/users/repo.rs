use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::{debug, info, instrument};

use super::repo_types::{NewUser, User};
use super::services::UserDirectory;
use crate::error::{ModelError, ModelResult};
use crate::recipes::repo::RecipeRepo;
use crate::recipes::repo_types::Recipe;

#[derive(Clone)]
pub struct UserRepo {
    db: SqlitePool,
}

impl UserRepo {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Insert a draft. A missing username or password surfaces as a
    /// not-null constraint error, a duplicate username as a unique one.
    #[instrument(skip(self, user), fields(username = ?user.username))]
    pub async fn insert(&self, user: &NewUser) -> ModelResult<User> {
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash, image_url, bio)
            VALUES (?, ?, ?, ?)
            RETURNING id, username, password_hash, image_url, bio
            "#,
        )
        .bind(user.username.as_deref())
        .bind(user.password_hash.as_ref())
        .bind(user.image_url.as_deref())
        .bind(user.bio.as_deref())
        .fetch_one(&self.db)
        .await?;
        info!(user_id = created.id, "user inserted");
        Ok(created)
    }

    #[instrument(skip(self, user), fields(user_id = user.id))]
    pub async fn update(&self, user: &User) -> ModelResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE users
               SET username = ?, password_hash = ?, image_url = ?, bio = ?
             WHERE id = ?
            "#,
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.image_url.as_deref())
        .bind(user.bio.as_deref())
        .bind(user.id)
        .execute(&self.db)
        .await?;
        if result.rows_affected() == 0 {
            return Err(ModelError::NotFound {
                entity: "user",
                id: user.id,
            });
        }
        debug!("user updated");
        Ok(())
    }

    /// Delete a user. Their recipes stay, with `user_id` set to NULL.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> ModelResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.db)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ModelError::NotFound { entity: "user", id });
        }
        info!(user_id = id, "user deleted");
        Ok(())
    }

    pub async fn find_by_id(&self, id: i64) -> ModelResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, image_url, bio FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_username(&self, username: &str) -> ModelResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, image_url, bio FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    pub async fn list(&self) -> ModelResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, image_url, bio FROM users ORDER BY id",
        )
        .fetch_all(&self.db)
        .await?;
        Ok(users)
    }

    pub async fn count(&self) -> ModelResult<i64> {
        let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.db)
            .await?;
        Ok(n)
    }

    /// The `recipes` side of the user/recipe relationship.
    pub async fn recipes_of(&self, user_id: i64) -> ModelResult<Vec<Recipe>> {
        RecipeRepo::new(self.db.clone()).list_by_user(user_id).await
    }
}

#[async_trait]
impl UserDirectory for UserRepo {
    async fn find_id_by_username(&self, username: &str) -> ModelResult<Option<i64>> {
        let id = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.db)
            .await?;
        Ok(id)
    }
}
