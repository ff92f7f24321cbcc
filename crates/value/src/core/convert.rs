//! Conversions into and out of [`Value`]
//!
//! Signed integers keep their width, unsigned integers widen to the next
//! signed width (`u8` to `Short`, `u16` to `Int`, `u32` to `Long`). `u64` and
//! `usize` convert through `TryFrom` and fail above `i64::MAX`. `None`
//! becomes `NoValue`.
//!
//! ```rust
//! use strata_value::Value;
//!
//! assert_eq!(Value::from(200_u8), Value::Short(200));
//! assert!(Value::try_from(u64::MAX).is_err());
//! assert!(Value::from(None::<i32>).is_no_value());
//! assert_eq!(i64::try_from(&Value::Int(7))?, 7);
//! # Ok::<(), strata_value::ValueError>(())
//! ```

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::array::ArrayValue;
use crate::core::value::Value;
use crate::error::{ValueError, ValueResult};
use crate::geo::{GeoValue, PointValue};
use crate::scalar::TextValue;
use crate::temporal::{DateTimeValue, DateValue, DurationValue, LocalDateTimeValue, LocalTimeValue, TimeValue};

macro_rules! value_from {
    ($($source:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$source> for Value {
                #[inline]
                fn from(v: $source) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    };
}

value_from! {
    bool => Boolean,
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    u8 => Short,
    u16 => Int,
    u32 => Long,
    f32 => Float,
    f64 => Double,
    char => Char,
    TextValue => Text,
    String => Text,
    DateValue => Date,
    LocalTimeValue => LocalTime,
    TimeValue => Time,
    LocalDateTimeValue => LocalDateTime,
    DateTimeValue => DateTime,
    DurationValue => Duration,
    GeoValue => Geo,
    PointValue => Geo,
    ArrayValue => Array,
    NaiveDate => Date,
    NaiveTime => LocalTime,
    NaiveDateTime => LocalDateTime,
}

impl From<&str> for Value {
    #[inline]
    fn from(v: &str) -> Self {
        Self::Text(TextValue::from(v))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::NoValue, Into::into)
    }
}

impl<T> From<Vec<T>> for Value
where
    ArrayValue: From<Vec<T>>,
{
    fn from(v: Vec<T>) -> Self {
        Self::Array(ArrayValue::from(v))
    }
}

impl TryFrom<u64> for Value {
    type Error = ValueError;

    fn try_from(v: u64) -> ValueResult<Self> {
        i64::try_from(v)
            .map(Self::Long)
            .map_err(|_| ValueError::invalid_argument(format!("{v} does not fit in a long")))
    }
}

impl TryFrom<usize> for Value {
    type Error = ValueError;

    fn try_from(v: usize) -> ValueResult<Self> {
        i64::try_from(v)
            .map(Self::Long)
            .map_err(|_| ValueError::invalid_argument(format!("{v} does not fit in a long")))
    }
}

// ==================== Out of Value ====================

fn mismatch(value: &Value, target: &str) -> ValueError {
    ValueError::invalid_argument(format!("Cannot convert {} to {target}", value.type_name()))
}

impl TryFrom<&Value> for i64 {
    type Error = ValueError;

    fn try_from(value: &Value) -> ValueResult<Self> {
        value.as_long().ok_or_else(|| mismatch(value, "i64"))
    }
}

impl TryFrom<&Value> for f64 {
    type Error = ValueError;

    fn try_from(value: &Value) -> ValueResult<Self> {
        value.as_double().ok_or_else(|| mismatch(value, "f64"))
    }
}

impl TryFrom<&Value> for bool {
    type Error = ValueError;

    fn try_from(value: &Value) -> ValueResult<Self> {
        value.as_boolean().ok_or_else(|| mismatch(value, "bool"))
    }
}

impl TryFrom<&Value> for String {
    type Error = ValueError;

    fn try_from(value: &Value) -> ValueResult<Self> {
        match value {
            Value::Text(t) => Ok(t.as_str().to_owned()),
            Value::Char(c) => Ok(c.to_string()),
            _ => Err(mismatch(value, "String")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_widening() {
        assert!(matches!(Value::from(7_u16), Value::Int(7)));
        assert!(matches!(Value::from(u32::MAX), Value::Long(4_294_967_295)));
        assert!(matches!(Value::try_from(42_usize), Ok(Value::Long(42))));
        assert!(Value::try_from(u64::MAX).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_text_and_options() {
        assert_eq!(Value::from("").as_text(), Some(""));
        assert_eq!(Value::from(String::from("x")), Value::Char('x'));
        assert!(Value::from(None::<String>).is_no_value());
        assert_eq!(Value::from(Some(1.5_f64)), Value::Double(1.5));
    }

    #[test]
    fn test_vec_becomes_array() {
        let value = Value::from(vec![1_i16, 2]);
        assert_eq!(value, Value::from(vec![1.0_f64, 2.0]));
        assert_eq!(value.type_name(), "Array");
    }

    #[test]
    fn test_out_of_value() {
        assert_eq!(i64::try_from(&Value::Byte(-3)).unwrap(), -3);
        assert!(i64::try_from(&Value::Double(1.5)).is_err());
        assert_eq!(f64::try_from(&Value::Int(2)).unwrap(), 2.0);
        assert_eq!(String::try_from(&Value::Char('q')).unwrap(), "q");
        assert!(bool::try_from(&Value::NoValue).is_err());
    }
}
