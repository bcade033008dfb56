use async_trait::async_trait;
use tracing::{info, instrument, warn};

use super::repo::UserRepo;
use super::repo_types::{NewUser, User};
use crate::error::{ModelResult, ValidationError};

/// Username lookup used by the uniqueness check.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_id_by_username(&self, username: &str) -> ModelResult<Option<i64>>;
}

/// Input for [`UserService::register`].
#[derive(Debug, Clone, Default)]
pub struct RegisterUser {
    pub username: String,
    pub password: String,
    pub image_url: Option<String>,
    pub bio: Option<String>,
}

pub struct UserService<D> {
    directory: D,
}

impl<D: UserDirectory> UserService<D> {
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    /// Checks that `username` is non-empty and not held by a user other than
    /// `current`. The unique index stays the authoritative guard: two callers
    /// can both pass this check before either commits.
    #[instrument(skip(self))]
    pub async fn check_username(&self, username: &str, current: Option<i64>) -> ModelResult<()> {
        if username.is_empty() {
            warn!("empty username");
            return Err(ValidationError::UsernameMissing.into());
        }
        match self.directory.find_id_by_username(username).await? {
            Some(owner) if Some(owner) != current => {
                warn!(owner, "username already taken");
                Err(ValidationError::UsernameTaken.into())
            }
            _ => Ok(()),
        }
    }

    pub async fn set_username(
        &self,
        user: &mut NewUser,
        username: impl Into<String>,
    ) -> ModelResult<()> {
        let username = username.into();
        self.check_username(&username, None).await?;
        user.username = Some(username);
        Ok(())
    }

    /// Assigns a new username to a persisted user, pending `UserRepo::update`.
    pub async fn rename(&self, user: &mut User, username: impl Into<String>) -> ModelResult<()> {
        let username = username.into();
        self.check_username(&username, Some(user.id)).await?;
        user.username = username;
        Ok(())
    }
}

impl UserService<UserRepo> {
    #[instrument(skip(self, req), fields(username = %req.username))]
    pub async fn register(&self, req: RegisterUser) -> ModelResult<User> {
        let mut draft = NewUser {
            image_url: req.image_url,
            bio: req.bio,
            ..NewUser::default()
        };
        self.set_username(&mut draft, req.username).await?;
        draft.set_password(&req.password)?;

        let user = self.directory.insert(&draft).await?;
        info!(user_id = user.id, "user registered");
        Ok(user)
    }

    /// Returns the user when `password` matches, `None` otherwise.
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, username: &str, password: &str) -> ModelResult<Option<User>> {
        let Some(user) = self.directory.find_by_username(username).await? else {
            warn!("login unknown username");
            return Ok(None);
        };
        if !user.verify_password(password) {
            warn!(user_id = user.id, "login invalid password");
            return Ok(None);
        }
        Ok(Some(user))
    }
}
