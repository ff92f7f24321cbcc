//! Flat constructor functions
//!
//! ```rust
//! use strata_value::values;
//!
//! let a = values::int_value(3);
//! let b = values::double_value(3.0);
//! assert_eq!(a, b);
//!
//! let arr = values::long_array(&[1, 2, 3]);
//! assert_eq!(arr.to_string(), "[1, 2, 3]");
//! ```
//!
//! Slice-taking array factories copy the caller's buffer; the `_owned`
//! variants adopt the vector without cloning its elements.

use std::sync::Arc;

use crate::array::ArrayValue;
use crate::core::{Value, ValueLimits};
use crate::error::ValueResult;
use crate::geo::{CircleValue, CollectionValue, Crs, GeoValue, LineValue, PointValue, PolygonValue, RectValue};
use crate::scalar::TextValue;
use crate::temporal::{
    DateTimeValue, DateValue, DurationValue, LocalDateTimeValue, LocalTimeValue, TimeValue, ZoneId,
};

// ==================== Scalars ====================

#[inline]
pub fn no_value() -> Value {
    Value::NoValue
}

#[inline]
pub fn boolean_value(value: bool) -> Value {
    Value::Boolean(value)
}

#[inline]
pub fn byte_value(value: i8) -> Value {
    Value::Byte(value)
}

#[inline]
pub fn short_value(value: i16) -> Value {
    Value::Short(value)
}

#[inline]
pub fn int_value(value: i32) -> Value {
    Value::Int(value)
}

#[inline]
pub fn long_value(value: i64) -> Value {
    Value::Long(value)
}

#[inline]
pub fn float_value(value: f32) -> Value {
    Value::Float(value)
}

#[inline]
pub fn double_value(value: f64) -> Value {
    Value::Double(value)
}

#[inline]
pub fn char_value(value: char) -> Value {
    Value::Char(value)
}

pub fn string_value(value: &str) -> Value {
    Value::Text(TextValue::from(value))
}

pub fn string_value_with_limits(value: &str, limits: &ValueLimits) -> ValueResult<Value> {
    TextValue::with_limits(value, limits).map(Value::Text)
}

/// Text from UTF-8 bytes; invalid sequences are rejected
pub fn utf8_value(bytes: &[u8]) -> ValueResult<Value> {
    TextValue::from_utf8(bytes).map(Value::Text)
}

// ==================== Arrays ====================

macro_rules! array_factories {
    ($($element:ty => $borrowed:ident, $owned:ident;)*) => {
        $(
            pub fn $borrowed(values: &[$element]) -> Value {
                Value::Array(ArrayValue::from(values))
            }

            pub fn $owned(values: Vec<$element>) -> Value {
                Value::Array(ArrayValue::from(values))
            }
        )*
    };
}

array_factories! {
    bool => boolean_array, boolean_array_owned;
    i8 => byte_array, byte_array_owned;
    i16 => short_array, short_array_owned;
    i32 => int_array, int_array_owned;
    i64 => long_array, long_array_owned;
    f32 => float_array, float_array_owned;
    f64 => double_array, double_array_owned;
    char => char_array, char_array_owned;
    TextValue => text_array, text_array_owned;
    DateValue => date_array, date_array_owned;
    LocalTimeValue => local_time_array, local_time_array_owned;
    TimeValue => time_array, time_array_owned;
    LocalDateTimeValue => local_date_time_array, local_date_time_array_owned;
    DateTimeValue => date_time_array, date_time_array_owned;
    DurationValue => duration_array, duration_array_owned;
    PointValue => point_array, point_array_owned;
}

pub fn string_array(values: &[&str]) -> Value {
    let texts: Arc<[TextValue]> = values.iter().map(|s| TextValue::from(*s)).collect();
    Value::Array(ArrayValue::Text(texts))
}

pub fn string_array_owned(values: Vec<String>) -> Value {
    let texts: Arc<[TextValue]> = values.into_iter().map(TextValue::new).collect();
    Value::Array(ArrayValue::Text(texts))
}

/// Wrap an array after checking it against `limits`
pub fn array_with_limits(array: ArrayValue, limits: &ValueLimits) -> ValueResult<Value> {
    array.check_limits(limits)?;
    Ok(Value::Array(array))
}

// ==================== Temporal ====================

pub fn date(year: i32, month: u32, day: u32) -> ValueResult<Value> {
    DateValue::of(year, month, day).map(Value::Date)
}

pub fn local_time(hour: u32, minute: u32, second: u32, nanosecond: u32) -> ValueResult<Value> {
    LocalTimeValue::of(hour, minute, second, nanosecond).map(Value::LocalTime)
}

pub fn time(hour: u32, minute: u32, second: u32, nanosecond: u32, offset_seconds: i32) -> ValueResult<Value> {
    TimeValue::of(hour, minute, second, nanosecond, offset_seconds).map(Value::Time)
}

pub fn local_date_time(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    nanosecond: u32,
) -> ValueResult<Value> {
    LocalDateTimeValue::of(year, month, day, hour, minute, second, nanosecond).map(Value::LocalDateTime)
}

/// Zoned date-time from local fields
///
/// Local times in a gap are shifted forward, ambiguous ones take the earlier
/// offset.
#[allow(clippy::too_many_arguments)]
pub fn date_time(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    nanosecond: u32,
    zone: ZoneId,
) -> ValueResult<Value> {
    let local = LocalDateTimeValue::of(year, month, day, hour, minute, second, nanosecond)?;
    DateTimeValue::from_local(local.naive(), zone).map(Value::DateTime)
}

pub fn duration(months: i64, days: i64, seconds: i64, nanos: i64) -> ValueResult<Value> {
    DurationValue::new(months, days, seconds, nanos).map(Value::Duration)
}

// ==================== Geo ====================

pub fn point_value(crs: Crs, coordinate: &[f64]) -> ValueResult<Value> {
    PointValue::new(crs, coordinate).map(|p| Value::Geo(GeoValue::Point(p)))
}

pub fn line_value(start: PointValue, end: PointValue) -> ValueResult<Value> {
    LineValue::new(start, end).map(|l| Value::Geo(GeoValue::Line(l)))
}

pub fn rect_value(lower_left: PointValue, upper_right: PointValue) -> ValueResult<Value> {
    RectValue::new(lower_left, upper_right).map(|r| Value::Geo(GeoValue::Rect(r)))
}

pub fn polygon_value(vertices: Vec<PointValue>) -> ValueResult<Value> {
    PolygonValue::new(vertices).map(|p| Value::Geo(GeoValue::Polygon(p)))
}

pub fn polygon_value_with_limits(vertices: Vec<PointValue>, limits: &ValueLimits) -> ValueResult<Value> {
    PolygonValue::with_limits(vertices, limits).map(|p| Value::Geo(GeoValue::Polygon(p)))
}

pub fn circle_value(center: PointValue, radius: f64) -> ValueResult<Value> {
    CircleValue::new(center, radius).map(|c| Value::Geo(GeoValue::Circle(c)))
}

pub fn collection_value(crs: Crs, shapes: Vec<GeoValue>) -> ValueResult<Value> {
    CollectionValue::new(crs, shapes).map(|c| Value::Geo(GeoValue::Collection(c)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_slice_factories_copy() {
        let mut buffer = vec![1_i64, 2, 3];
        let value = long_array(&buffer);
        buffer[0] = 99;
        assert_eq!(value, long_array_owned(vec![1, 2, 3]));
    }

    #[test]
    fn test_owned_factory_adopts_buffer() {
        let value = string_array_owned(vec!["a".to_owned(), "b".to_owned()]);
        assert_eq!(value, string_array(&["a", "b"]));
        assert_eq!(value, text_array(&[TextValue::from("a"), TextValue::from("b")]));
    }

    #[test]
    fn test_utf8_rejects_invalid() {
        assert_eq!(utf8_value("ok".as_bytes()).unwrap(), string_value("ok"));
        assert!(utf8_value(&[0xc3, 0x28]).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_limits() {
        let limits = ValueLimits {
            max_array_length: 2,
            max_string_bytes: 3,
            max_shape_points: 3,
        };
        assert!(string_value_with_limits("abcd", &limits).is_err());
        assert!(array_with_limits(ArrayValue::from(vec![1_i32, 2, 3]), &limits).is_err());
        assert!(array_with_limits(ArrayValue::from(vec![1_i32, 2]), &limits).is_ok());

        let p = |x: f64| PointValue::cartesian(x, 0.0).unwrap();
        assert!(polygon_value_with_limits(vec![p(0.0), p(1.0), p(2.0), p(3.0)], &limits).is_err());
    }

    #[test]
    fn test_temporal_components_validated() {
        assert!(date(2021, 2, 29).unwrap_err().is_invalid_argument());
        assert!(local_time(24, 0, 0, 0).is_err());
        assert!(time(1, 0, 0, 0, 19 * 3600).is_err());
    }

    #[test]
    fn test_geo_factories() {
        let a = PointValue::wgs84(10.0, 50.0).unwrap();
        let b = PointValue::wgs84(11.0, 51.0).unwrap();
        assert!(line_value(a.clone(), b.clone()).is_ok());
        assert!(rect_value(a.clone(), b).is_ok());
        assert!(circle_value(a, -1.0).is_err());
        assert!(point_value(Crs::Wgs84, &[1.0]).is_err());
        assert!(collection_value(Crs::Cartesian, vec![]).is_ok());
    }
}
