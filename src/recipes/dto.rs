use serde::{Deserialize, Serialize};

use super::repo_types::Recipe;
use crate::users::dto::PublicUser;

/// Fields accepted when creating a recipe.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateRecipe {
    pub title: String,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub minutes_to_complete: Option<i64>,
    #[serde(default)]
    pub user_id: Option<i64>,
}

/// A recipe together with its owner, if any.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeDetails {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub user: Option<PublicUser>,
}
