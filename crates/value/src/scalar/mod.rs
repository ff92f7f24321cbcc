//! Scalar value helpers
//!
//! Numbers are stored inline in [`Value`](crate::Value); this module holds the
//! scalar kinds that need their own behaviour.

pub mod boolean;
pub mod text;

pub use text::TextValue;
