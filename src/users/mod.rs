pub mod dto;
pub mod password;
pub mod repo;
pub mod repo_types;
pub mod services;

use tracing::instrument;

use crate::error::{ModelError, ModelResult};
use dto::{PublicUser, UserProfile};
use repo::UserRepo;

/// Loads a user with their recipes, ready for serialization.
#[instrument(skip(repo))]
pub async fn profile(repo: &UserRepo, user_id: i64) -> ModelResult<UserProfile> {
    let user = repo.find_by_id(user_id).await?.ok_or(ModelError::NotFound {
        entity: "user",
        id: user_id,
    })?;
    let recipes = repo.recipes_of(user.id).await?;
    Ok(UserProfile {
        user: PublicUser::from(&user),
        recipes,
    })
}
