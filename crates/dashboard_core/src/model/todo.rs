//! Todo record and completion filters.

use super::ItemId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One entry of the todo list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Missing in the older `{ text, completed }` shape; generated on load.
    #[serde(default = "Uuid::new_v4")]
    pub id: ItemId,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

impl Todo {
    /// Creates an active todo with a generated stable ID.
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), text)
    }

    /// Creates an active todo with a caller-provided ID.
    pub fn with_id(id: ItemId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
        }
    }
}

/// Derived view selector for the todo list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl TodoFilter {
    /// Returns whether an item with the given completion flag is visible.
    pub fn accepts(self, completed: bool) -> bool {
        match self {
            Self::All => true,
            Self::Active => !completed,
            Self::Completed => completed,
        }
    }

    /// Stable string id used by callers and the CLI.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    /// Parses a filter name (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Some(Self::All),
            "active" => Some(Self::Active),
            "completed" | "done" => Some(Self::Completed),
            _ => None,
        }
    }
}

/// Completion counters shown under the todo list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TodoStats {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

#[cfg(test)]
mod tests {
    use super::{Todo, TodoFilter};

    #[test]
    fn legacy_shape_without_id_decodes_with_fresh_id() {
        let todos: Vec<Todo> = serde_json::from_str(
            r#"[{"text":"water plants","completed":true},{"text":"call mom","completed":false}]"#,
        )
        .unwrap();

        assert_eq!(todos.len(), 2);
        assert!(todos[0].completed);
        assert!(!todos[0].id.is_nil());
        assert_ne!(todos[0].id, todos[1].id);
    }

    #[test]
    fn filter_parse_accepts_known_names() {
        assert_eq!(TodoFilter::parse(" Active "), Some(TodoFilter::Active));
        assert_eq!(TodoFilter::parse("done"), Some(TodoFilter::Completed));
        assert_eq!(TodoFilter::parse("someday"), None);
    }
}
