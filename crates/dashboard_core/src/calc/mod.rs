//! Calculator panel: arithmetic evaluation and display state.
//!
//! # Responsibility
//! - Evaluate display text with a restricted grammar (numbers, `+ - * /`,
//!   parentheses, unary minus). No dynamic code evaluation.
//! - Model the display buttons (`C`, `←`, `=`, append).
//!
//! # Invariants
//! - The display never becomes empty; it falls back to `0`.
//! - Evaluation never yields a non-finite number.

mod display;
mod eval;

pub use display::{CalcKey, CalculatorDisplay, ERROR_TEXT};
pub use eval::{evaluate, format_number, CalcError, MAX_DEPTH};
