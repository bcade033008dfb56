use sqlx::SqlitePool;
use tracing::{debug, info, instrument};

use super::repo_types::{NewRecipe, Recipe};
use crate::error::{ModelError, ModelResult};
use crate::users::repo::UserRepo;
use crate::users::repo_types::User;

#[derive(Clone)]
pub struct RecipeRepo {
    db: SqlitePool,
}

impl RecipeRepo {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Instructions shorter than the schema minimum fail here with a check
    /// constraint error, not when they are assigned.
    #[instrument(skip(self, recipe), fields(title = ?recipe.title, user_id = ?recipe.user_id))]
    pub async fn insert(&self, recipe: &NewRecipe) -> ModelResult<Recipe> {
        let created = sqlx::query_as::<_, Recipe>(
            r#"
            INSERT INTO recipes (title, instructions, minutes_to_complete, user_id)
            VALUES (?, ?, ?, ?)
            RETURNING id, title, instructions, minutes_to_complete, user_id
            "#,
        )
        .bind(recipe.title.as_deref())
        .bind(recipe.instructions.as_deref())
        .bind(recipe.minutes_to_complete)
        .bind(recipe.user_id)
        .fetch_one(&self.db)
        .await?;
        info!(recipe_id = created.id, "recipe inserted");
        Ok(created)
    }

    #[instrument(skip(self, recipe), fields(recipe_id = recipe.id))]
    pub async fn update(&self, recipe: &Recipe) -> ModelResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE recipes
               SET title = ?, instructions = ?, minutes_to_complete = ?, user_id = ?
             WHERE id = ?
            "#,
        )
        .bind(&recipe.title)
        .bind(recipe.instructions.as_deref())
        .bind(recipe.minutes_to_complete)
        .bind(recipe.user_id)
        .bind(recipe.id)
        .execute(&self.db)
        .await?;
        if result.rows_affected() == 0 {
            return Err(ModelError::NotFound {
                entity: "recipe",
                id: recipe.id,
            });
        }
        debug!("recipe updated");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> ModelResult<()> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = ?")
            .bind(id)
            .execute(&self.db)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ModelError::NotFound {
                entity: "recipe",
                id,
            });
        }
        info!(recipe_id = id, "recipe deleted");
        Ok(())
    }

    pub async fn find_by_id(&self, id: i64) -> ModelResult<Option<Recipe>> {
        let recipe = sqlx::query_as::<_, Recipe>(
            r#"
            SELECT id, title, instructions, minutes_to_complete, user_id
              FROM recipes
             WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(recipe)
    }

    pub async fn list(&self) -> ModelResult<Vec<Recipe>> {
        let rows = sqlx::query_as::<_, Recipe>(
            "SELECT id, title, instructions, minutes_to_complete, user_id FROM recipes ORDER BY id",
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    pub async fn list_by_user(&self, user_id: i64) -> ModelResult<Vec<Recipe>> {
        let rows = sqlx::query_as::<_, Recipe>(
            r#"
            SELECT id, title, instructions, minutes_to_complete, user_id
              FROM recipes
             WHERE user_id = ?
             ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    pub async fn count(&self) -> ModelResult<i64> {
        let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM recipes")
            .fetch_one(&self.db)
            .await?;
        Ok(n)
    }

    /// The `user` back-reference; `None` for unowned recipes.
    pub async fn owner_of(&self, recipe: &Recipe) -> ModelResult<Option<User>> {
        let Some(user_id) = recipe.user_id else {
            return Ok(None);
        };
        UserRepo::new(self.db.clone()).find_by_id(user_id).await
    }
}
