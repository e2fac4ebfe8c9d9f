//! Ordered list state shared by the todo and note panels.
//!
//! # Responsibility
//! - Hold one exclusively owned, insertion-ordered collection per panel.
//! - Apply add/toggle/delete transitions and derive filtered views.
//!
//! # Invariants
//! - Stored order is insertion order; display reversal is a view concern.
//! - Unknown ids make toggle/delete a no-op, never an error.
//! - A rejected add leaves the list untouched.

mod reducer;

pub use reducer::{Completable, DuplicatePolicy, ListError, ListItem, ListReducer};
