//! Data layer for a recipe-sharing application: users, the recipes they own,
//! field validation and password hashing over SQLite.

pub mod config;
pub mod error;
pub mod recipes;
pub mod state;
pub mod users;

pub use error::{ConstraintKind, ModelError, ModelResult, StorageConstraintError, ValidationError};
pub use recipes::repo_types::{NewRecipe, Recipe};
pub use state::AppState;
pub use users::repo_types::{NewUser, User};
pub use users::services::{RegisterUser, UserDirectory, UserService};
