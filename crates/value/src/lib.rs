#![allow(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(clippy::all)]

//! # strata-value
//!
//! Typed property values for a graph store: a closed set of scalar, text,
//! temporal, spatial and array variants with
//!
//! - cross-type equality (`3_i32 == 3_i64 == 3.0_f64`, `'a' == "a"`)
//! - a total order by category for index range scans, plus a three-valued
//!   comparison that reports incomparable pairs as [`Comparison::Undefined`]
//! - a 32-bit hash for in-memory maps and a 64-bit streaming hash for
//!   persisted fingerprints, both consistent with equality
//! - a writer protocol ([`writer::ValueWriter`]) every variant linearizes
//!   itself into, with JSON, binary and recording sinks
//!
//! ## Quick start
//!
//! ```rust
//! use strata_value::prelude::*;
//!
//! let a = values::int_value(3);
//! let b = values::double_value(3.0);
//! assert_eq!(a, b);
//! assert_eq!(a.hash_code(), b.hash_code());
//!
//! let sum = a.plus(&values::long_value(4))?;
//! assert_eq!(sum, Value::Long(7));
//!
//! let date = values::date(2020, 1, 31)?;
//! let later = date.plus(&values::duration(1, 0, 0, 0)?)?;
//! assert_eq!(later.to_string(), "2020-02-29");
//! # Ok::<(), strata_value::ValueError>(())
//! ```
//!
//! ## Modules
//!
//! - [`core`] - the [`Value`] enum, ordering, hashing, arithmetic, conversions
//! - [`scalar`] - booleans and text
//! - [`array`] - homogeneous arrays over shared buffers
//! - [`temporal`] - dates, times, date-times, durations and the zone table
//! - [`geo`] - points and shapes in a coordinate reference system
//! - [`writer`] - the writer protocol and its sinks
//! - [`values`] - flat factory functions

pub mod array;
pub mod core;
pub mod error;
pub mod geo;
pub mod scalar;
pub mod temporal;
pub mod values;
pub mod writer;

pub use crate::core::{
    Comparison, HashableValue, NumberType, Numeric, ObjectValue, Value, ValueCategory, ValueComparator,
    ValueGroup, ValueHasher, ValueLimits,
};
pub use array::ArrayValue;
pub use error::{ValueError, ValueResult, ValueResultExt};
pub use geo::{CircleValue, CollectionValue, Crs, GeoValue, LineValue, PointValue, PolygonValue, RectValue};
pub use scalar::TextValue;
pub use temporal::{
    DateTimeValue, DateValue, DurationValue, LocalDateTimeValue, LocalTimeValue, TemporalFields, TemporalUnit,
    TimeValue, ZoneId, TIME_ZONES,
};
pub use writer::json::ValueJsonExt;
pub use writer::{ArrayType, ValueWriter};

static_assertions::assert_impl_all!(Value: Send, Sync, Clone);
static_assertions::assert_impl_all!(ValueError: Send, Sync, std::error::Error);

/// Prelude for common imports
pub mod prelude {
    pub use crate::values;
    pub use crate::writer::ValueWriter;
    pub use crate::{
        ArrayValue, Comparison, Crs, GeoValue, PointValue, TextValue, Value, ValueComparator, ValueError,
        ValueGroup, ValueJsonExt, ValueLimits, ValueResult, ValueResultExt, ZoneId,
    };
}
