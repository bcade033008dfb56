use serde::Serialize;
use sqlx::FromRow;

use crate::error::ValidationError;

/// Shortest `instructions` value the schema accepts.
pub const MIN_INSTRUCTIONS_LEN: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Recipe {
    pub id: i64,
    pub(crate) title: String,
    pub instructions: Option<String>, // length checked by storage on write
    pub minutes_to_complete: Option<i64>,
    pub user_id: Option<i64>,
}

impl Recipe {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), ValidationError> {
        self.title = validate_title(title.into())?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewRecipe {
    pub(crate) title: Option<String>,
    pub instructions: Option<String>,
    pub minutes_to_complete: Option<i64>,
    pub user_id: Option<i64>,
}

impl NewRecipe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), ValidationError> {
        self.title = Some(validate_title(title.into())?);
        Ok(())
    }
}

fn validate_title(title: String) -> Result<String, ValidationError> {
    if title.is_empty() {
        return Err(ValidationError::TitleMissing);
    }
    Ok(title)
}
