//! Cross-panel search entry points.
//!
//! # Responsibility
//! - Match a free-text query against todos, notes and events.
//! - Keep result shaping (kind, excerpt, target anchor) inside core.
//!
//! # Invariants
//! - Matching is case-insensitive substring search.
//! - Result order is todos, notes, events, each in stored order.

pub mod index;
