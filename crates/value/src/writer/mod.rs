//! Writer protocol
//!
//! Every value emits itself to a [`ValueWriter`] as a flat sequence of calls:
//! one call per scalar, and `begin_*` / `end_*` framing around arrays,
//! polygons and collections. A sink that mirrors the sequence can rebuild the
//! value exactly.
//!
//! ## Sinks
//!
//! - [`DiscardingWriter`] ignores everything but checks framing
//! - [`RecordingWriter`] keeps the call log; [`rebuild`] turns it back into a value
//! - [`JsonWriter`] renders a `serde_json::Value`
//! - [`BinaryWriter`] / [`BinaryReader`] a compact tagged byte encoding

pub mod binary;
pub mod discard;
pub mod json;
pub mod recording;

pub use binary::{BinaryReader, BinaryWriter};
pub use discard::DiscardingWriter;
pub use json::JsonWriter;
pub use recording::{rebuild, RecordingWriter, WriteEvent};

use core::fmt::{Display, Formatter};

use crate::error::{ValueError, ValueResult};
use crate::geo::{Crs, PointValue};

/// Element type declared by `begin_array`
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(u8)]
pub enum ArrayType {
    Boolean = 1,
    Byte = 2,
    Short = 3,
    Int = 4,
    Long = 5,
    Float = 6,
    Double = 7,
    Char = 8,
    String = 9,
    Date = 10,
    LocalTime = 11,
    Time = 12,
    LocalDateTime = 13,
    DateTime = 14,
    Duration = 15,
    Point = 16,
}

impl ArrayType {
    /// Stable one-byte tag
    #[inline]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Inverse of [`ArrayType::tag`]
    pub fn from_tag(tag: u8) -> ValueResult<Self> {
        Ok(match tag {
            1 => Self::Boolean,
            2 => Self::Byte,
            3 => Self::Short,
            4 => Self::Int,
            5 => Self::Long,
            6 => Self::Float,
            7 => Self::Double,
            8 => Self::Char,
            9 => Self::String,
            10 => Self::Date,
            11 => Self::LocalTime,
            12 => Self::Time,
            13 => Self::LocalDateTime,
            14 => Self::DateTime,
            15 => Self::Duration,
            16 => Self::Point,
            _ => return Err(ValueError::illegal_state(format!("Unknown array type tag {tag}"))),
        })
    }

    /// Get a descriptive name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Char => "char",
            Self::String => "string",
            Self::Date => "date",
            Self::LocalTime => "local_time",
            Self::Time => "time",
            Self::LocalDateTime => "local_date_time",
            Self::DateTime => "date_time",
            Self::Duration => "duration",
            Self::Point => "point",
        }
    }
}

impl Display for ArrayType {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Sink receiving the linearized form of a value
///
/// Temporal values arrive as the raw numbers storage needs: epoch days,
/// nanoseconds of day, epoch seconds plus nanoseconds, offsets in seconds and
/// compact zone ids from [`TIME_ZONES`](crate::temporal::TIME_ZONES).
pub trait ValueWriter {
    type Error;

    fn write_null(&mut self) -> Result<(), Self::Error>;

    fn write_boolean(&mut self, value: bool) -> Result<(), Self::Error>;

    fn write_byte(&mut self, value: i8) -> Result<(), Self::Error>;

    fn write_short(&mut self, value: i16) -> Result<(), Self::Error>;

    fn write_int(&mut self, value: i32) -> Result<(), Self::Error>;

    fn write_long(&mut self, value: i64) -> Result<(), Self::Error>;

    fn write_float(&mut self, value: f32) -> Result<(), Self::Error>;

    fn write_double(&mut self, value: f64) -> Result<(), Self::Error>;

    fn write_char(&mut self, value: char) -> Result<(), Self::Error>;

    fn write_string(&mut self, value: &str) -> Result<(), Self::Error>;

    /// Write text given as UTF-8 bytes
    ///
    /// Sinks that produce text must reject invalid sequences rather than
    /// repair them.
    fn write_utf8(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    fn begin_array(&mut self, len: usize, array_type: ArrayType) -> Result<(), Self::Error>;

    fn end_array(&mut self) -> Result<(), Self::Error>;

    fn write_date(&mut self, epoch_day: i64) -> Result<(), Self::Error>;

    fn write_local_time(&mut self, nano_of_day: i64) -> Result<(), Self::Error>;

    fn write_time(&mut self, nano_of_day: i64, offset_seconds: i32) -> Result<(), Self::Error>;

    fn write_local_date_time(&mut self, epoch_second: i64, nano: u32) -> Result<(), Self::Error>;

    fn write_date_time(&mut self, epoch_second: i64, nano: u32, offset_seconds: i32) -> Result<(), Self::Error>;

    fn write_date_time_zone(&mut self, epoch_second: i64, nano: u32, zone_id: u16) -> Result<(), Self::Error>;

    fn write_duration(&mut self, months: i64, days: i64, seconds: i64, nanos: i32) -> Result<(), Self::Error>;

    fn write_point(&mut self, crs: Crs, coordinate: &[f64]) -> Result<(), Self::Error>;

    fn write_line(&mut self, start: &PointValue, end: &PointValue) -> Result<(), Self::Error>;

    fn write_rect(&mut self, lower_left: &PointValue, upper_right: &PointValue) -> Result<(), Self::Error>;

    fn write_circle(&mut self, center: &PointValue, radius: f64) -> Result<(), Self::Error>;

    /// Start a polygon; `vertices` calls to `write_point` follow
    fn begin_polygon(&mut self, vertices: usize) -> Result<(), Self::Error>;

    fn end_polygon(&mut self) -> Result<(), Self::Error>;

    /// Start a collection of `len` shapes in one coordinate system
    fn begin_collection(&mut self, len: usize, crs: Crs) -> Result<(), Self::Error>;

    fn end_collection(&mut self) -> Result<(), Self::Error>;
}

impl<W: ValueWriter + ?Sized> ValueWriter for &mut W {
    type Error = W::Error;

    fn write_null(&mut self) -> Result<(), Self::Error> {
        (**self).write_null()
    }

    fn write_boolean(&mut self, value: bool) -> Result<(), Self::Error> {
        (**self).write_boolean(value)
    }

    fn write_byte(&mut self, value: i8) -> Result<(), Self::Error> {
        (**self).write_byte(value)
    }

    fn write_short(&mut self, value: i16) -> Result<(), Self::Error> {
        (**self).write_short(value)
    }

    fn write_int(&mut self, value: i32) -> Result<(), Self::Error> {
        (**self).write_int(value)
    }

    fn write_long(&mut self, value: i64) -> Result<(), Self::Error> {
        (**self).write_long(value)
    }

    fn write_float(&mut self, value: f32) -> Result<(), Self::Error> {
        (**self).write_float(value)
    }

    fn write_double(&mut self, value: f64) -> Result<(), Self::Error> {
        (**self).write_double(value)
    }

    fn write_char(&mut self, value: char) -> Result<(), Self::Error> {
        (**self).write_char(value)
    }

    fn write_string(&mut self, value: &str) -> Result<(), Self::Error> {
        (**self).write_string(value)
    }

    fn write_utf8(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        (**self).write_utf8(bytes)
    }

    fn begin_array(&mut self, len: usize, array_type: ArrayType) -> Result<(), Self::Error> {
        (**self).begin_array(len, array_type)
    }

    fn end_array(&mut self) -> Result<(), Self::Error> {
        (**self).end_array()
    }

    fn write_date(&mut self, epoch_day: i64) -> Result<(), Self::Error> {
        (**self).write_date(epoch_day)
    }

    fn write_local_time(&mut self, nano_of_day: i64) -> Result<(), Self::Error> {
        (**self).write_local_time(nano_of_day)
    }

    fn write_time(&mut self, nano_of_day: i64, offset_seconds: i32) -> Result<(), Self::Error> {
        (**self).write_time(nano_of_day, offset_seconds)
    }

    fn write_local_date_time(&mut self, epoch_second: i64, nano: u32) -> Result<(), Self::Error> {
        (**self).write_local_date_time(epoch_second, nano)
    }

    fn write_date_time(&mut self, epoch_second: i64, nano: u32, offset_seconds: i32) -> Result<(), Self::Error> {
        (**self).write_date_time(epoch_second, nano, offset_seconds)
    }

    fn write_date_time_zone(&mut self, epoch_second: i64, nano: u32, zone_id: u16) -> Result<(), Self::Error> {
        (**self).write_date_time_zone(epoch_second, nano, zone_id)
    }

    fn write_duration(&mut self, months: i64, days: i64, seconds: i64, nanos: i32) -> Result<(), Self::Error> {
        (**self).write_duration(months, days, seconds, nanos)
    }

    fn write_point(&mut self, crs: Crs, coordinate: &[f64]) -> Result<(), Self::Error> {
        (**self).write_point(crs, coordinate)
    }

    fn write_line(&mut self, start: &PointValue, end: &PointValue) -> Result<(), Self::Error> {
        (**self).write_line(start, end)
    }

    fn write_rect(&mut self, lower_left: &PointValue, upper_right: &PointValue) -> Result<(), Self::Error> {
        (**self).write_rect(lower_left, upper_right)
    }

    fn write_circle(&mut self, center: &PointValue, radius: f64) -> Result<(), Self::Error> {
        (**self).write_circle(center, radius)
    }

    fn begin_polygon(&mut self, vertices: usize) -> Result<(), Self::Error> {
        (**self).begin_polygon(vertices)
    }

    fn end_polygon(&mut self) -> Result<(), Self::Error> {
        (**self).end_polygon()
    }

    fn begin_collection(&mut self, len: usize, crs: Crs) -> Result<(), Self::Error> {
        (**self).begin_collection(len, crs)
    }

    fn end_collection(&mut self) -> Result<(), Self::Error> {
        (**self).end_collection()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_type_tags_round_trip() {
        for tag in 1..=16 {
            assert_eq!(ArrayType::from_tag(tag).unwrap().tag(), tag);
        }
        assert!(ArrayType::from_tag(0).unwrap_err().is_illegal_state());
        assert!(ArrayType::from_tag(17).is_err());
    }
}
