//! Spending and income categories.

use std::fmt;

use pennywise_shared::types::{CategoryId, UserId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::transaction::TransactionType;

/// Longest accepted category name, in characters.
pub const MAX_CATEGORY_NAME_LENGTH: usize = 255;

/// Display color used when none is given.
pub const DEFAULT_CATEGORY_COLOR: &str = "#6b7280";

/// Rejected color string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("color must be '#' followed by six hex digits, got {0:?}")]
pub struct ColorError(pub String);

/// A `#RRGGBB` hex color.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(String);

impl Color {
    /// Parses a `#RRGGBB` color. Case is preserved.
    ///
    /// # Errors
    ///
    /// Returns `ColorError` unless the input is `#` plus exactly six hex digits.
    pub fn parse(value: &str) -> Result<Self, ColorError> {
        let valid = value.len() == 7
            && value.starts_with('#')
            && value[1..].bytes().all(|b| b.is_ascii_hexdigit());

        if valid {
            Ok(Self(value.to_string()))
        } else {
            Err(ColorError(value.to_string()))
        }
    }

    /// Returns the color string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Self(DEFAULT_CATEGORY_COLOR.to_string())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.0
    }
}

/// A category. Categories without an owner are global and visible to everyone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category ID.
    pub id: CategoryId,
    /// Owner, `None` for global categories.
    pub user_id: Option<UserId>,
    /// Display name.
    pub name: String,
    /// Default direction for budgets in this category.
    pub category_type: TransactionType,
    /// Display color.
    pub color: Color,
}

impl Category {
    /// Whether `user_id` may read and budget against this category.
    #[must_use]
    pub fn is_visible_to(&self, user_id: UserId) -> bool {
        self.user_id.is_none_or(|owner| owner == user_id)
    }
}

/// Input for creating a user-owned category.
#[derive(Debug, Clone)]
pub struct NewCategory {
    /// Owner.
    pub user_id: UserId,
    /// Display name, already validated.
    pub name: String,
    /// Direction.
    pub category_type: TransactionType,
    /// Display color.
    pub color: Color,
}
