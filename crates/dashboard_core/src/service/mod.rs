//! Dashboard use-case layer.
//!
//! # Responsibility
//! - Orchestrate panel stores and persistence into one facade.
//! - Keep presentation layers decoupled from storage details.

pub mod dashboard;
pub mod error;

pub use dashboard::Dashboard;
pub use error::{DashboardError, DashboardResult};
