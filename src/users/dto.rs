use serde::Serialize;

use super::repo_types::User;
use crate::recipes::repo_types::Recipe;

/// Public part of the user returned to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicUser {
    pub id: i64,
    pub username: String,
    pub image_url: Option<String>,
    pub bio: Option<String>,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            image_url: user.image_url.clone(),
            bio: user.bio.clone(),
        }
    }
}

/// A user together with the recipes they own.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: PublicUser,
    pub recipes: Vec<Recipe>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use crate::users::services::{RegisterUser, UserService};

    #[tokio::test]
    async fn profile_serializes_flat_user_with_recipes() {
        let state = AppState::ephemeral().await.unwrap();
        let user = UserService::new(state.users())
            .register(RegisterUser {
                username: "alice".into(),
                password: "hunter22".into(),
                bio: Some("home cook".into()),
                ..RegisterUser::default()
            })
            .await
            .unwrap();

        let profile = UserProfile {
            user: PublicUser::from(&user),
            recipes: Vec::new(),
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["id"], user.id);
        assert_eq!(json["username"], "alice");
        assert_eq!(json["bio"], "home cook");
        assert!(json["recipes"].as_array().unwrap().is_empty());
        assert!(json.get("password_hash").is_none());
    }
}
