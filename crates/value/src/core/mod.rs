//! Core modules
//!
//! The building blocks every value variant shares.
//!
//! ## Core Components
//!
//! ### [`value`] - The Value enum
//!
//! The closed [`Value`] sum type with equality, hashing, ordering and writer
//! dispatch across all variants.
//!
//! ### [`group`] - Classification
//!
//! [`ValueGroup`] and [`ValueCategory`] place every value in the fixed
//! ordering table.
//!
//! ### [`numbers`] - Numeric kernel
//!
//! Exact comparison between `i64` and `f64`, and the hashes that make
//! numbers of different widths interchangeable.
//!
//! ### [`compare`] and [`hash`]
//!
//! The total order, the three-valued comparison, and the 32/64-bit hashes.
//!
//! ## Usage
//!
//! Most users interact with re-exported items from the crate root.

pub mod compare;
pub mod convert;
pub mod display;
pub mod group;
pub mod hash;
pub mod limits;
pub mod numbers;
pub mod object;
pub mod ops;
pub mod value;

pub use compare::{Comparison, ValueComparator};
pub use group::{NumberType, ValueCategory, ValueGroup};
pub use hash::{HashableValue, ValueHasher};
pub use limits::ValueLimits;
pub use numbers::Numeric;
pub use object::ObjectValue;
pub use value::Value;
