//! Unified error type for dashboard operations.

use crate::calc::CalcError;
use crate::game::InvalidMove;
use crate::list::ListError;
use crate::model::event::InvalidEvent;
use crate::model::ItemId;
use crate::search::index::SearchError;
use crate::settings::SettingsError;
use crate::store::StoreError;

pub type DashboardResult<T> = Result<T, DashboardError>;

/// Every failure the presentation layer may need to surface.
///
/// All variants are recoverable. For `PersistenceWriteFailed` the in-memory
/// mutation has already been applied and remains authoritative.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("item text cannot be empty")]
    EmptyText,
    #[error("duplicate note not allowed ({existing})")]
    DuplicateItem { existing: ItemId },
    #[error("invalid move: {0}")]
    InvalidMove(#[from] InvalidMove),
    #[error("invalid event: {0}")]
    InvalidEvent(#[from] InvalidEvent),
    #[error("search query cannot be empty")]
    EmptyQuery,
    #[error("invalid setting: {0}")]
    InvalidSetting(#[from] SettingsError),
    #[error("calculation failed: {0}")]
    Calc(#[from] CalcError),
    #[error("failed to persist `{key}`: {source}")]
    PersistenceWriteFailed {
        key: &'static str,
        #[source]
        source: StoreError,
    },
}

impl DashboardError {
    /// Stable machine-readable code for logs and UI mapping.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyText => "empty_text",
            Self::DuplicateItem { .. } => "duplicate_item",
            Self::InvalidMove(_) => "invalid_move",
            Self::InvalidEvent(_) => "invalid_event",
            Self::EmptyQuery => "empty_query",
            Self::InvalidSetting(_) => "invalid_setting",
            Self::Calc(_) => "calc_error",
            Self::PersistenceWriteFailed { .. } => "persistence_write_failed",
        }
    }

    /// Whether the in-memory state already reflects the requested change.
    pub fn state_applied(&self) -> bool {
        matches!(self, Self::PersistenceWriteFailed { .. })
    }
}

impl From<ListError> for DashboardError {
    fn from(value: ListError) -> Self {
        match value {
            ListError::EmptyText => Self::EmptyText,
            ListError::DuplicateItem { existing } => Self::DuplicateItem { existing },
        }
    }
}

impl From<SearchError> for DashboardError {
    fn from(value: SearchError) -> Self {
        match value {
            SearchError::EmptyQuery => Self::EmptyQuery,
        }
    }
}
