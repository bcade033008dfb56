//! Error types shared by the entity model, repositories and services.

use std::fmt;

use thiserror::Error;

/// Rejection of a field assignment, raised before anything is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Username must be present.")]
    UsernameMissing,
    #[error("Username must be unique.")]
    UsernameTaken,
    #[error("Title must be present.")]
    TitleMissing,
}

/// Which schema rule the storage engine enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Unique,
    Check,
    NotNull,
    ForeignKey,
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unique => "unique",
            Self::Check => "check",
            Self::NotNull => "not null",
            Self::ForeignKey => "foreign key",
        };
        f.write_str(name)
    }
}

/// A write rejected by the storage engine at commit time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} constraint violated: {message}")]
pub struct StorageConstraintError {
    pub kind: ConstraintKind,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    StorageConstraint(#[from] StorageConstraintError),
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },
    #[error("password hashing failed: {0}")]
    Hashing(String),
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

pub type ModelResult<T> = Result<T, ModelError>;

impl ModelError {
    /// True when the caller supplied bad input and should see a 4xx-style response.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::StorageConstraint(_) | Self::NotFound { .. }
        )
    }

    pub fn as_validation(&self) -> Option<ValidationError> {
        match self {
            Self::Validation(err) => Some(*err),
            _ => None,
        }
    }

    pub fn as_constraint(&self) -> Option<&StorageConstraintError> {
        match self {
            Self::StorageConstraint(err) => Some(err),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for ModelError {
    fn from(err: sqlx::Error) -> Self {
        use sqlx::error::ErrorKind;

        let constraint = err.as_database_error().and_then(|db_err| {
            let kind = match db_err.kind() {
                ErrorKind::UniqueViolation => ConstraintKind::Unique,
                ErrorKind::CheckViolation => ConstraintKind::Check,
                ErrorKind::NotNullViolation => ConstraintKind::NotNull,
                ErrorKind::ForeignKeyViolation => ConstraintKind::ForeignKey,
                _ => return None,
            };
            Some(StorageConstraintError {
                kind,
                message: db_err.message().to_string(),
            })
        });
        match constraint {
            Some(constraint) => Self::StorageConstraint(constraint),
            None => Self::Database(err),
        }
    }
}
