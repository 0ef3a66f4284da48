//! Shared primitive types used by the expression scanner and diagnostics.

pub mod span;

pub use span::{Position, Span};
