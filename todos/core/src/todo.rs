use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Color given to a todo when none is supplied.
pub const DEFAULT_COLOR: &str = "#51a2ff";

/// Identifier assigned to a todo by the storage layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(transparent)]
pub struct TodoId(u32);

impl TodoId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{0}' is not a valid todo id")]
pub struct InvalidTodoId(pub String);

impl FromStr for TodoId {
    type Err = InvalidTodoId;

    /// Accepts only the canonical decimal form: ASCII digits without a sign
    /// or leading zeros.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let canonical = !s.is_empty()
            && s.bytes().all(|b| b.is_ascii_digit())
            && (s == "0" || !s.starts_with('0'));
        if !canonical {
            return Err(InvalidTodoId(s.to_string()));
        }
        s.parse::<u32>()
            .map(TodoId)
            .map_err(|_| InvalidTodoId(s.to_string()))
    }
}

/// A single persisted todo item, as exchanged over the HTTP API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Unique identifier generated on creation
    pub id: TodoId,
    /// The task description
    pub text: String,
    /// Completion flag
    pub is_marked: bool,
    /// Hex color code used to tag the todo
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Returns the first two characters of the text in uppercase, used as the card badge.
    pub fn initials(&self) -> String {
        self.text.chars().take(2).collect::<String>().to_uppercase()
    }
}

/// Body accepted by the create and update operations.
///
/// Absent optional fields are omitted when serialized so that an update leaves
/// the stored value untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TodoInput {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_marked: Option<bool>,
}

impl TodoInput {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_marked(mut self, is_marked: bool) -> Self {
        self.is_marked = Some(is_marked);
        self
    }
}
