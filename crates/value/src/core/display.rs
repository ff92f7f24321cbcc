//! Pretty printing
//!
//! Text and chars print quoted, floats always show a fraction or an
//! exponent, temporal values print in ISO-8601 form and shapes as EWKT.

use core::fmt;

use crate::core::value::Value;

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoValue => f.write_str("NO_VALUE"),
            Self::Boolean(v) => write!(f, "{v}"),
            Self::Byte(v) => write!(f, "{v}"),
            Self::Short(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Long(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v:?}"),
            Self::Double(v) => write!(f, "{v:?}"),
            Self::Char(c) => write!(f, "'{c}'"),
            Self::Text(t) => write!(f, "'{}'", t.as_str()),
            Self::Date(v) => write!(f, "{v}"),
            Self::LocalTime(v) => write!(f, "{v}"),
            Self::Time(v) => write!(f, "{v}"),
            Self::LocalDateTime(v) => write!(f, "{v}"),
            Self::DateTime(v) => write!(f, "{v}"),
            Self::Duration(v) => write!(f, "{v}"),
            Self::Geo(v) => write!(f, "{v}"),
            Self::Array(v) => write!(f, "{v}"),
        }
    }
}
