//! Tic-tac-toe state machine.
//!
//! # Invariants
//! - A game starts `InProgress` with an empty board and `X` to play.
//! - Win lines are checked before the draw condition on every move.
//! - Once terminal, the board is frozen until `reset`.

mod engine;

pub use engine::{Cell, GameEngine, GameStatus, InvalidMove, Player, BOARD_CELLS, WIN_LINES};
