use tracing::{instrument, warn};

use super::dto::{CreateRecipe, RecipeDetails};
use super::repo::RecipeRepo;
use super::repo_types::{NewRecipe, Recipe};
use crate::error::{ModelError, ModelResult};
use crate::users::dto::PublicUser;

#[instrument(skip(repo, req), fields(title = %req.title, user_id = ?req.user_id))]
pub async fn create_recipe(repo: &RecipeRepo, req: CreateRecipe) -> ModelResult<Recipe> {
    let mut draft = NewRecipe {
        instructions: req.instructions,
        minutes_to_complete: req.minutes_to_complete,
        user_id: req.user_id,
        ..NewRecipe::default()
    };
    draft.set_title(req.title)?;

    repo.insert(&draft).await.map_err(|e| {
        warn!(error = %e, "recipe rejected by storage");
        e
    })
}

#[instrument(skip(repo))]
pub async fn recipe_details(repo: &RecipeRepo, recipe_id: i64) -> ModelResult<RecipeDetails> {
    let recipe = repo
        .find_by_id(recipe_id)
        .await?
        .ok_or(ModelError::NotFound {
            entity: "recipe",
            id: recipe_id,
        })?;
    let user = repo.owner_of(&recipe).await?.as_ref().map(PublicUser::from);
    Ok(RecipeDetails { recipe, user })
}
