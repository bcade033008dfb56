use serde::Serialize;
use sqlx::FromRow;

use super::password::PasswordDigest;
use crate::error::ModelResult;

/// User record in the database.
///
/// The password can only be checked, never read back:
///
/// ```
/// fn check(user: &recipebox::User) -> bool {
///     user.verify_password("hunter22")
/// }
/// ```
///
/// ```compile_fail
/// fn leak(user: &recipebox::User) -> String {
///     format!("{:?}", user.password_hash)
/// }
/// ```
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub(crate) username: String,
    #[serde(skip_serializing)]
    pub(crate) password_hash: PasswordDigest, // argon2, never exposed
    pub image_url: Option<String>,
    pub bio: Option<String>,
}

impl User {
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Replaces the stored digest; takes effect on the next `UserRepo::update`.
    pub fn set_password(&mut self, plain: &str) -> ModelResult<()> {
        self.password_hash = PasswordDigest::generate(plain)?;
        Ok(())
    }

    pub fn verify_password(&self, candidate: &str) -> bool {
        self.password_hash.matches(candidate)
    }
}

/// A user that has not been inserted yet. The username is assigned through
/// `UserService`, which owns the uniqueness check.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub(crate) username: Option<String>,
    pub(crate) password_hash: Option<PasswordDigest>,
    pub image_url: Option<String>,
    pub bio: Option<String>,
}

impl NewUser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn set_password(&mut self, plain: &str) -> ModelResult<()> {
        self.password_hash = Some(PasswordDigest::generate(plain)?);
        Ok(())
    }

    /// False while no password has been set.
    pub fn verify_password(&self, candidate: &str) -> bool {
        self.password_hash
            .as_ref()
            .is_some_and(|digest| digest.matches(candidate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: 1,
            username: "alice".into(),
            password_hash: PasswordDigest::generate("hunter22").unwrap(),
            image_url: Some("https://img.example/alice.png".into()),
            bio: None,
        }
    }

    #[test]
    fn serialization_skips_password_hash() {
        let json = serde_json::to_value(user()).unwrap();
        assert_eq!(json["username"], "alice");
        assert_eq!(json["image_url"], "https://img.example/alice.png");
        assert!(json.get("password_hash").is_none());
        assert!(!json.to_string().contains("argon2"));
    }

    #[test]
    fn set_password_replaces_digest() {
        let mut u = user();
        assert!(u.verify_password("hunter22"));
        u.set_password("new-secret").unwrap();
        assert!(u.verify_password("new-secret"));
        assert!(!u.verify_password("hunter22"));
    }

    #[test]
    fn draft_without_password_never_verifies() {
        let draft = NewUser::new();
        assert!(!draft.verify_password(""));
        assert!(!draft.verify_password("anything"));
    }

    #[test]
    fn draft_verifies_after_set() {
        let mut draft = NewUser::new();
        draft.set_password("hunter22").unwrap();
        assert!(draft.verify_password("hunter22"));
        assert!(!draft.verify_password("wrong"));
    }
}
