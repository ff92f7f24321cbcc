//! Escape hatch to native data
//!
//! [`Value::as_object`] exposes the value's content without copying: array
//! buffers and text are borrowed. [`Value::as_object_copy`] returns a fully
//! owned, independent copy.

use std::borrow::Cow;

use crate::array::ArrayValue;
use crate::core::value::Value;
use crate::geo::{GeoValue, PointValue};
use crate::scalar::TextValue;
use crate::temporal::{DateTimeValue, DateValue, DurationValue, LocalDateTimeValue, LocalTimeValue, TimeValue};

/// Native form of a value
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectValue<'a> {
    Null,
    Boolean(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Char(char),
    String(Cow<'a, str>),
    Date(DateValue),
    LocalTime(LocalTimeValue),
    Time(TimeValue),
    LocalDateTime(LocalDateTimeValue),
    DateTime(DateTimeValue),
    Duration(DurationValue),
    Geo(Cow<'a, GeoValue>),
    Booleans(Cow<'a, [bool]>),
    Bytes(Cow<'a, [i8]>),
    Shorts(Cow<'a, [i16]>),
    Ints(Cow<'a, [i32]>),
    Longs(Cow<'a, [i64]>),
    Floats(Cow<'a, [f32]>),
    Doubles(Cow<'a, [f64]>),
    Chars(Cow<'a, [char]>),
    Strings(Cow<'a, [TextValue]>),
    Dates(Cow<'a, [DateValue]>),
    LocalTimes(Cow<'a, [LocalTimeValue]>),
    Times(Cow<'a, [TimeValue]>),
    LocalDateTimes(Cow<'a, [LocalDateTimeValue]>),
    DateTimes(Cow<'a, [DateTimeValue]>),
    Durations(Cow<'a, [DurationValue]>),
    Points(Cow<'a, [PointValue]>),
}

impl ObjectValue<'_> {
    /// Check if any buffer is still borrowed from the value
    pub fn is_borrowed(&self) -> bool {
        match self {
            Self::String(v) => matches!(v, Cow::Borrowed(_)),
            Self::Geo(v) => matches!(v, Cow::Borrowed(_)),
            Self::Booleans(v) => matches!(v, Cow::Borrowed(_)),
            Self::Bytes(v) => matches!(v, Cow::Borrowed(_)),
            Self::Shorts(v) => matches!(v, Cow::Borrowed(_)),
            Self::Ints(v) => matches!(v, Cow::Borrowed(_)),
            Self::Longs(v) => matches!(v, Cow::Borrowed(_)),
            Self::Floats(v) => matches!(v, Cow::Borrowed(_)),
            Self::Doubles(v) => matches!(v, Cow::Borrowed(_)),
            Self::Chars(v) => matches!(v, Cow::Borrowed(_)),
            Self::Strings(v) => matches!(v, Cow::Borrowed(_)),
            Self::Dates(v) => matches!(v, Cow::Borrowed(_)),
            Self::LocalTimes(v) => matches!(v, Cow::Borrowed(_)),
            Self::Times(v) => matches!(v, Cow::Borrowed(_)),
            Self::LocalDateTimes(v) => matches!(v, Cow::Borrowed(_)),
            Self::DateTimes(v) => matches!(v, Cow::Borrowed(_)),
            Self::Durations(v) => matches!(v, Cow::Borrowed(_)),
            Self::Points(v) => matches!(v, Cow::Borrowed(_)),
            _ => false,
        }
    }

    /// Detach from the value, copying borrowed buffers
    pub fn into_owned(self) -> ObjectValue<'static> {
        fn own<T: ToOwned + ?Sized>(cow: Cow<'_, T>) -> Cow<'static, T> {
            Cow::Owned(cow.into_owned())
        }
        match self {
            Self::Null => ObjectValue::Null,
            Self::Boolean(v) => ObjectValue::Boolean(v),
            Self::Byte(v) => ObjectValue::Byte(v),
            Self::Short(v) => ObjectValue::Short(v),
            Self::Int(v) => ObjectValue::Int(v),
            Self::Long(v) => ObjectValue::Long(v),
            Self::Float(v) => ObjectValue::Float(v),
            Self::Double(v) => ObjectValue::Double(v),
            Self::Char(v) => ObjectValue::Char(v),
            Self::String(v) => ObjectValue::String(own(v)),
            Self::Date(v) => ObjectValue::Date(v),
            Self::LocalTime(v) => ObjectValue::LocalTime(v),
            Self::Time(v) => ObjectValue::Time(v),
            Self::LocalDateTime(v) => ObjectValue::LocalDateTime(v),
            Self::DateTime(v) => ObjectValue::DateTime(v),
            Self::Duration(v) => ObjectValue::Duration(v),
            Self::Geo(v) => ObjectValue::Geo(own(v)),
            Self::Booleans(v) => ObjectValue::Booleans(own(v)),
            Self::Bytes(v) => ObjectValue::Bytes(own(v)),
            Self::Shorts(v) => ObjectValue::Shorts(own(v)),
            Self::Ints(v) => ObjectValue::Ints(own(v)),
            Self::Longs(v) => ObjectValue::Longs(own(v)),
            Self::Floats(v) => ObjectValue::Floats(own(v)),
            Self::Doubles(v) => ObjectValue::Doubles(own(v)),
            Self::Chars(v) => ObjectValue::Chars(own(v)),
            Self::Strings(v) => ObjectValue::Strings(own(v)),
            Self::Dates(v) => ObjectValue::Dates(own(v)),
            Self::LocalTimes(v) => ObjectValue::LocalTimes(own(v)),
            Self::Times(v) => ObjectValue::Times(own(v)),
            Self::LocalDateTimes(v) => ObjectValue::LocalDateTimes(own(v)),
            Self::DateTimes(v) => ObjectValue::DateTimes(own(v)),
            Self::Durations(v) => ObjectValue::Durations(own(v)),
            Self::Points(v) => ObjectValue::Points(own(v)),
        }
    }
}

fn array_object(array: &ArrayValue) -> ObjectValue<'_> {
    match array {
        ArrayValue::Boolean(v) => ObjectValue::Booleans(Cow::Borrowed(&v[..])),
        ArrayValue::Byte(v) => ObjectValue::Bytes(Cow::Borrowed(&v[..])),
        ArrayValue::Short(v) => ObjectValue::Shorts(Cow::Borrowed(&v[..])),
        ArrayValue::Int(v) => ObjectValue::Ints(Cow::Borrowed(&v[..])),
        ArrayValue::Long(v) => ObjectValue::Longs(Cow::Borrowed(&v[..])),
        ArrayValue::Float(v) => ObjectValue::Floats(Cow::Borrowed(&v[..])),
        ArrayValue::Double(v) => ObjectValue::Doubles(Cow::Borrowed(&v[..])),
        ArrayValue::Char(v) => ObjectValue::Chars(Cow::Borrowed(&v[..])),
        ArrayValue::Text(v) => ObjectValue::Strings(Cow::Borrowed(&v[..])),
        ArrayValue::Date(v) => ObjectValue::Dates(Cow::Borrowed(&v[..])),
        ArrayValue::LocalTime(v) => ObjectValue::LocalTimes(Cow::Borrowed(&v[..])),
        ArrayValue::Time(v) => ObjectValue::Times(Cow::Borrowed(&v[..])),
        ArrayValue::LocalDateTime(v) => ObjectValue::LocalDateTimes(Cow::Borrowed(&v[..])),
        ArrayValue::DateTime(v) => ObjectValue::DateTimes(Cow::Borrowed(&v[..])),
        ArrayValue::Duration(v) => ObjectValue::Durations(Cow::Borrowed(&v[..])),
        ArrayValue::Point(v) => ObjectValue::Points(Cow::Borrowed(&v[..])),
    }
}

impl Value {
    /// Native view; buffers are borrowed and must not be assumed unique
    pub fn as_object(&self) -> ObjectValue<'_> {
        match self {
            Self::NoValue => ObjectValue::Null,
            Self::Boolean(v) => ObjectValue::Boolean(*v),
            Self::Byte(v) => ObjectValue::Byte(*v),
            Self::Short(v) => ObjectValue::Short(*v),
            Self::Int(v) => ObjectValue::Int(*v),
            Self::Long(v) => ObjectValue::Long(*v),
            Self::Float(v) => ObjectValue::Float(*v),
            Self::Double(v) => ObjectValue::Double(*v),
            Self::Char(v) => ObjectValue::Char(*v),
            Self::Text(v) => ObjectValue::String(Cow::Borrowed(v.as_str())),
            Self::Date(v) => ObjectValue::Date(*v),
            Self::LocalTime(v) => ObjectValue::LocalTime(*v),
            Self::Time(v) => ObjectValue::Time(*v),
            Self::LocalDateTime(v) => ObjectValue::LocalDateTime(*v),
            Self::DateTime(v) => ObjectValue::DateTime(*v),
            Self::Duration(v) => ObjectValue::Duration(*v),
            Self::Geo(v) => ObjectValue::Geo(Cow::Borrowed(v)),
            Self::Array(v) => array_object(v),
        }
    }

    /// Owned native copy, independent of this value
    pub fn as_object_copy(&self) -> ObjectValue<'static> {
        self.as_object().into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_borrowed_view_shares_buffer() {
        let array = values::long_array(&[1, 2, 3]);
        let view = array.as_object();
        assert!(view.is_borrowed());
        match (&array, view) {
            (Value::Array(ArrayValue::Long(buffer)), ObjectValue::Longs(Cow::Borrowed(slice))) => {
                assert!(core::ptr::eq(buffer.as_ptr(), slice.as_ptr()));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_copy_is_owned() {
        let text = values::string_value("abc");
        let copy = text.as_object_copy();
        assert!(!copy.is_borrowed());
        assert_eq!(copy, ObjectValue::String(Cow::Owned("abc".to_owned())));
        assert_eq!(values::int_value(4).as_object_copy(), ObjectValue::Int(4));
        assert_eq!(values::no_value().as_object(), ObjectValue::Null);
    }
}
