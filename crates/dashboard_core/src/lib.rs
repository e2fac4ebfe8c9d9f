//! Application state core for the personal dashboard.
//! This crate is the single source of truth for panel invariants.

pub mod calc;
pub mod calendar;
pub mod game;
pub mod list;
pub mod logging;
pub mod model;
pub mod search;
pub mod service;
pub mod settings;
pub mod store;

pub use calc::{evaluate, CalcError, CalcKey, CalculatorDisplay};
pub use calendar::{EventStore, MonthView, YearMonth};
pub use game::{GameEngine, GameStatus, InvalidMove, Player};
pub use list::{DuplicatePolicy, ListError, ListReducer};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::event::{Event, EventDraft, InvalidEvent};
pub use model::note::Note;
pub use model::todo::{Todo, TodoFilter, TodoStats};
pub use model::ItemId;
pub use search::index::{search, SearchHit, SearchKind, SearchQuery, SearchTarget};
pub use service::{Dashboard, DashboardError, DashboardResult};
pub use settings::{SettingKey, Settings};
pub use store::{open_store, open_store_in_memory, KeyValueStore, MemoryStore, SqliteStore, StoreError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
