//! Value groups and categories.
//!
//! Every [`Value`](crate::Value) belongs to exactly one [`ValueGroup`], and every
//! group belongs to exactly one [`ValueCategory`]. Categories decide whether two
//! values are orderable against each other at all; groups refine the order
//! inside a category.
//!
//! ```rust
//! use strata_value::{ValueCategory, ValueGroup};
//!
//! assert_eq!(ValueGroup::ZonedTime.category(), ValueCategory::Temporal);
//! assert_eq!(ValueGroup::LocalDate.category(), ValueCategory::Temporal);
//! assert!(ValueGroup::Number.order() > ValueGroup::Text.order());
//! ```

use core::fmt::{Display, Formatter};

/// Fine-grained type tag of a value
///
/// The declaration order is the fixed ordering table used by the comparator.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ValueGroup {
    GeometryArray,
    ZonedDateTimeArray,
    LocalDateTimeArray,
    DateArray,
    ZonedTimeArray,
    LocalTimeArray,
    DurationArray,
    TextArray,
    BooleanArray,
    NumberArray,
    Geometry,
    ZonedDateTime,
    LocalDateTime,
    LocalDate,
    ZonedTime,
    LocalTime,
    Duration,
    Text,
    Boolean,
    Number,
    NoValue,
}

impl ValueGroup {
    /// All groups in ordering-table order
    pub const ALL: [Self; 21] = [
        Self::GeometryArray,
        Self::ZonedDateTimeArray,
        Self::LocalDateTimeArray,
        Self::DateArray,
        Self::ZonedTimeArray,
        Self::LocalTimeArray,
        Self::DurationArray,
        Self::TextArray,
        Self::BooleanArray,
        Self::NumberArray,
        Self::Geometry,
        Self::ZonedDateTime,
        Self::LocalDateTime,
        Self::LocalDate,
        Self::ZonedTime,
        Self::LocalTime,
        Self::Duration,
        Self::Text,
        Self::Boolean,
        Self::Number,
        Self::NoValue,
    ];

    /// Position in the ordering table
    #[inline]
    pub const fn order(&self) -> u8 {
        *self as u8
    }

    /// The category this group belongs to
    pub const fn category(&self) -> ValueCategory {
        match self {
            Self::GeometryArray => ValueCategory::GeometryArray,
            Self::ZonedDateTimeArray
            | Self::LocalDateTimeArray
            | Self::DateArray
            | Self::ZonedTimeArray
            | Self::LocalTimeArray => ValueCategory::TemporalArray,
            Self::DurationArray => ValueCategory::DurationArray,
            Self::TextArray => ValueCategory::TextArray,
            Self::BooleanArray => ValueCategory::BooleanArray,
            Self::NumberArray => ValueCategory::NumberArray,
            Self::Geometry => ValueCategory::Geometry,
            Self::ZonedDateTime
            | Self::LocalDateTime
            | Self::LocalDate
            | Self::ZonedTime
            | Self::LocalTime => ValueCategory::Temporal,
            Self::Duration => ValueCategory::Duration,
            Self::Text => ValueCategory::Text,
            Self::Boolean => ValueCategory::Boolean,
            Self::Number => ValueCategory::Number,
            Self::NoValue => ValueCategory::NoCategory,
        }
    }

    /// Check if this group holds arrays
    pub const fn is_array(&self) -> bool {
        (*self as u8) <= (Self::NumberArray as u8)
    }

    /// Get a descriptive name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::GeometryArray => "GEOMETRY_ARRAY",
            Self::ZonedDateTimeArray => "ZONED_DATE_TIME_ARRAY",
            Self::LocalDateTimeArray => "LOCAL_DATE_TIME_ARRAY",
            Self::DateArray => "DATE_ARRAY",
            Self::ZonedTimeArray => "ZONED_TIME_ARRAY",
            Self::LocalTimeArray => "LOCAL_TIME_ARRAY",
            Self::DurationArray => "DURATION_ARRAY",
            Self::TextArray => "TEXT_ARRAY",
            Self::BooleanArray => "BOOLEAN_ARRAY",
            Self::NumberArray => "NUMBER_ARRAY",
            Self::Geometry => "GEOMETRY",
            Self::ZonedDateTime => "ZONED_DATE_TIME",
            Self::LocalDateTime => "LOCAL_DATE_TIME",
            Self::LocalDate => "DATE",
            Self::ZonedTime => "ZONED_TIME",
            Self::LocalTime => "LOCAL_TIME",
            Self::Duration => "DURATION",
            Self::Text => "TEXT",
            Self::Boolean => "BOOLEAN",
            Self::Number => "NUMBER",
            Self::NoValue => "NO_VALUE",
        }
    }
}

impl Display for ValueGroup {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Coarse orderability class
///
/// Values of different categories are never comparable under the ternary
/// comparison; the total order places them by this table.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ValueCategory {
    GeometryArray,
    TemporalArray,
    DurationArray,
    TextArray,
    BooleanArray,
    NumberArray,
    Geometry,
    Temporal,
    Duration,
    Text,
    Boolean,
    Number,
    NoCategory,
}

impl ValueCategory {
    /// Position in the ordering table
    #[inline]
    pub const fn order(&self) -> u8 {
        *self as u8
    }

    /// Get a descriptive name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::GeometryArray => "GEOMETRY_ARRAY",
            Self::TemporalArray => "TEMPORAL_ARRAY",
            Self::DurationArray => "DURATION_ARRAY",
            Self::TextArray => "TEXT_ARRAY",
            Self::BooleanArray => "BOOLEAN_ARRAY",
            Self::NumberArray => "NUMBER_ARRAY",
            Self::Geometry => "GEOMETRY",
            Self::Temporal => "TEMPORAL",
            Self::Duration => "DURATION",
            Self::Text => "TEXT",
            Self::Boolean => "BOOLEAN",
            Self::Number => "NUMBER",
            Self::NoCategory => "NO_CATEGORY",
        }
    }
}

impl Display for ValueCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Numeric representation of a value, used to pick a cross-type comparison
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NumberType {
    NoNumber,
    Integral,
    FloatingPoint,
}
