//! The value enum
//!
//! [`Value`] is the closed sum of every variant the crate knows. All
//! behaviour that depends on more than one variant (equality across numeric
//! widths, the order between categories, the hash shared by a `char` and a
//! one-character text) is dispatched here by matching on both operands.

use core::cmp::Ordering;

use crate::array::ArrayValue;
use crate::core::group::{NumberType, ValueCategory, ValueGroup};
use crate::core::hash::ValueHasher;
use crate::core::numbers::{hash_double, hash_long, Numeric};
use crate::error::{ValueError, ValueResult};
use crate::geo::GeoValue;
use crate::scalar::boolean::{compare_booleans, hash_boolean};
use crate::scalar::text::{compare_char_to_text, hash_char};
use crate::scalar::TextValue;
use crate::temporal::{DateTimeValue, DateValue, DurationValue, LocalDateTimeValue, LocalTimeValue, TimeValue};
use crate::writer::ValueWriter;

/// Hash code of [`Value::NoValue`]
pub const NO_VALUE_HASH: i32 = -1;

/// Any value
///
/// Values are immutable. Cloning is cheap: text, shapes and arrays share
/// their buffers.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Absence of a value
    #[default]
    NoValue,
    Boolean(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    /// A single code point; belongs to the text group
    Char(char),
    Text(TextValue),
    Date(DateValue),
    LocalTime(LocalTimeValue),
    Time(TimeValue),
    LocalDateTime(LocalDateTimeValue),
    DateTime(DateTimeValue),
    Duration(DurationValue),
    Geo(GeoValue),
    Array(ArrayValue),
}

impl Value {
    // ==================== Classification ====================

    pub fn value_group(&self) -> ValueGroup {
        match self {
            Self::NoValue => ValueGroup::NoValue,
            Self::Boolean(_) => ValueGroup::Boolean,
            Self::Byte(_) | Self::Short(_) | Self::Int(_) | Self::Long(_) | Self::Float(_) | Self::Double(_) => {
                ValueGroup::Number
            }
            Self::Char(_) | Self::Text(_) => ValueGroup::Text,
            Self::Date(_) => ValueGroup::LocalDate,
            Self::LocalTime(_) => ValueGroup::LocalTime,
            Self::Time(_) => ValueGroup::ZonedTime,
            Self::LocalDateTime(_) => ValueGroup::LocalDateTime,
            Self::DateTime(_) => ValueGroup::ZonedDateTime,
            Self::Duration(_) => ValueGroup::Duration,
            Self::Geo(_) => ValueGroup::Geometry,
            Self::Array(a) => a.value_group(),
        }
    }

    #[inline]
    pub fn category(&self) -> ValueCategory {
        self.value_group().category()
    }

    pub const fn number_type(&self) -> NumberType {
        match self {
            Self::Byte(_) | Self::Short(_) | Self::Int(_) | Self::Long(_) => NumberType::Integral,
            Self::Float(_) | Self::Double(_) => NumberType::FloatingPoint,
            _ => NumberType::NoNumber,
        }
    }

    /// Short name of the variant, used in error messages
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::NoValue => "NoValue",
            Self::Boolean(_) => "Boolean",
            Self::Byte(_) => "Byte",
            Self::Short(_) => "Short",
            Self::Int(_) => "Int",
            Self::Long(_) => "Long",
            Self::Float(_) => "Float",
            Self::Double(_) => "Double",
            Self::Char(_) => "Char",
            Self::Text(_) => "String",
            Self::Date(_) => "Date",
            Self::LocalTime(_) => "LocalTime",
            Self::Time(_) => "Time",
            Self::LocalDateTime(_) => "LocalDateTime",
            Self::DateTime(_) => "DateTime",
            Self::Duration(_) => "Duration",
            Self::Geo(_) => "Geometry",
            Self::Array(_) => "Array",
        }
    }

    #[inline]
    #[must_use]
    pub fn is_no_value(&self) -> bool {
        matches!(self, Self::NoValue)
    }

    #[inline]
    #[must_use]
    pub fn is_number(&self) -> bool {
        self.number_type() != NumberType::NoNumber
    }

    /// Check if this is a floating point NaN
    #[must_use]
    pub fn is_nan(&self) -> bool {
        self.as_numeric().is_some_and(Numeric::is_nan)
    }

    // ==================== Accessors ====================

    /// Numeric view for any number variant
    pub fn as_numeric(&self) -> Option<Numeric> {
        Some(match *self {
            Self::Byte(v) => Numeric::Integral(i64::from(v)),
            Self::Short(v) => Numeric::Integral(i64::from(v)),
            Self::Int(v) => Numeric::Integral(i64::from(v)),
            Self::Long(v) => Numeric::Integral(v),
            Self::Float(v) => Numeric::FloatingPoint(f64::from(v)),
            Self::Double(v) => Numeric::FloatingPoint(v),
            _ => return None,
        })
    }

    /// Integral numbers as `i64`; floating point values are not converted
    pub fn as_long(&self) -> Option<i64> {
        match self.as_numeric()? {
            Numeric::Integral(l) => Some(l),
            Numeric::FloatingPoint(_) => None,
        }
    }

    /// Any number as `f64`
    pub fn as_double(&self) -> Option<f64> {
        self.as_numeric().map(|n| match n {
            Numeric::Integral(l) => l as f64,
            Numeric::FloatingPoint(d) => d,
        })
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            Self::Char(c) => Some(*c),
            _ => None,
        }
    }

    /// Text content; a `Char` is not text storage and yields `None`
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(t) => Some(t.as_str()),
            _ => None,
        }
    }

    pub fn as_duration(&self) -> Option<&DurationValue> {
        match self {
            Self::Duration(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_geo(&self) -> Option<&GeoValue> {
        match self {
            Self::Geo(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayValue> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Read a named component of a temporal, duration or geo value
    pub fn get(&self, field: &str) -> ValueResult<Self> {
        match self {
            Self::Date(v) => v.get(field),
            Self::LocalTime(v) => v.get(field),
            Self::Time(v) => v.get(field),
            Self::LocalDateTime(v) => v.get(field),
            Self::DateTime(v) => v.get(field),
            Self::Duration(v) => v.get(field),
            Self::Geo(v) => v.get(field),
            _ => Err(ValueError::unsupported(format!("get {field}"), self.type_name())),
        }
    }

    // ==================== Hashing ====================

    /// 32-bit hash consistent with [`Value::equals`]
    pub fn hash_code(&self) -> i32 {
        match self {
            Self::NoValue => NO_VALUE_HASH,
            Self::Boolean(b) => hash_boolean(*b),
            Self::Byte(v) => hash_long(i64::from(*v)),
            Self::Short(v) => hash_long(i64::from(*v)),
            Self::Int(v) => hash_long(i64::from(*v)),
            Self::Long(v) => hash_long(*v),
            Self::Float(v) => hash_double(f64::from(*v)),
            Self::Double(v) => hash_double(*v),
            Self::Char(c) => hash_char(*c),
            Self::Text(t) => t.hash_code(),
            Self::Date(v) => v.hash_code(),
            Self::LocalTime(v) => v.hash_code(),
            Self::Time(v) => v.hash_code(),
            Self::LocalDateTime(v) => v.hash_code(),
            Self::DateTime(v) => v.hash_code(),
            Self::Duration(v) => v.hash_code(),
            Self::Geo(v) => v.hash_code(),
            Self::Array(v) => v.hash_code(),
        }
    }

    /// Feed this value into a streaming hash, group tag first
    pub fn update_hash(&self, hasher: &mut ValueHasher) {
        hasher.update_group(self.value_group());
        match self {
            Self::NoValue => {}
            Self::Boolean(b) => hasher.update_boolean(*b),
            Self::Char(c) => hasher.update_char(*c),
            Self::Text(t) => hasher.update_text(t.as_str()),
            Self::Date(v) => v.update_hash(hasher),
            Self::LocalTime(v) => v.update_hash(hasher),
            Self::Time(v) => v.update_hash(hasher),
            Self::LocalDateTime(v) => v.update_hash(hasher),
            Self::DateTime(v) => v.update_hash(hasher),
            Self::Duration(v) => v.update_hash(hasher),
            Self::Geo(v) => v.update_hash(hasher),
            Self::Array(v) => v.update_hash(hasher),
            Self::Byte(_) | Self::Short(_) | Self::Int(_) | Self::Long(_) | Self::Float(_) | Self::Double(_) => {
                if let Some(n) = self.as_numeric() {
                    hasher.update_number(n);
                }
            }
        }
    }

    /// 64-bit hash, stable across processes
    pub fn hash64(&self) -> u64 {
        let mut hasher = ValueHasher::new();
        self.update_hash(&mut hasher);
        hasher.finish()
    }

    // ==================== Equality ====================

    /// Logical equality
    ///
    /// Numbers compare by numeric value across widths, a `Char` equals the
    /// text holding exactly that code point, arrays compare element-wise
    /// across element widths. NaN is unequal to everything.
    pub fn equals(&self, other: &Self) -> bool {
        if let (Some(a), Some(b)) = (self.as_numeric(), other.as_numeric()) {
            return a.equals(b);
        }
        match (self, other) {
            (Self::NoValue, Self::NoValue) => true,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Char(a), Self::Char(b)) => a == b,
            (Self::Char(c), Self::Text(t)) | (Self::Text(t), Self::Char(c)) => t.is_char(*c),
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Date(a), Self::Date(b)) => a == b,
            (Self::LocalTime(a), Self::LocalTime(b)) => a == b,
            (Self::Time(a), Self::Time(b)) => a == b,
            (Self::LocalDateTime(a), Self::LocalDateTime(b)) => a == b,
            (Self::DateTime(a), Self::DateTime(b)) => a == b,
            (Self::Duration(a), Self::Duration(b)) => a == b,
            (Self::Geo(a), Self::Geo(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a.equals(b),
            _ => false,
        }
    }

    /// Three-valued equality
    ///
    /// `None` when either side is `NoValue` or NaN, or when two arrays are
    /// equal except at positions holding such elements.
    pub fn ternary_equals(&self, other: &Self) -> Option<bool> {
        if self.is_no_value() || other.is_no_value() || self.is_nan() || other.is_nan() {
            return None;
        }
        match (self, other) {
            (Self::Array(a), Self::Array(b)) if a.value_group() == b.value_group() => {
                if a.len() != b.len() {
                    return Some(false);
                }
                let mut undefined = false;
                for (x, y) in a.iter().zip(b.iter()) {
                    match x.ternary_equals(&y) {
                        Some(false) => return Some(false),
                        None => undefined = true,
                        Some(true) => {}
                    }
                }
                if undefined { None } else { Some(true) }
            }
            _ => Some(self.equals(other)),
        }
    }

    // ==================== Ordering ====================

    /// Order two values of the same category
    ///
    /// Temporal values of different kinds order by group. Use
    /// [`ValueComparator`](crate::ValueComparator) for values of any category.
    ///
    /// # Panics
    ///
    /// Panics when the values belong to different categories.
    pub fn unsafe_compare_to(&self, other: &Self) -> Ordering {
        if let (Some(a), Some(b)) = (self.as_numeric(), other.as_numeric()) {
            return a.compare(b);
        }
        match (self, other) {
            (Self::NoValue, Self::NoValue) => Ordering::Equal,
            (Self::Boolean(a), Self::Boolean(b)) => compare_booleans(*a, *b),
            (Self::Char(a), Self::Char(b)) => a.cmp(b),
            (Self::Char(c), Self::Text(t)) => compare_char_to_text(*c, t),
            (Self::Text(t), Self::Char(c)) => compare_char_to_text(*c, t).reverse(),
            (Self::Text(a), Self::Text(b)) => a.compare_to(b),
            (Self::Date(a), Self::Date(b)) => a.compare_to(b),
            (Self::LocalTime(a), Self::LocalTime(b)) => a.compare_to(b),
            (Self::Time(a), Self::Time(b)) => a.compare_to(b),
            (Self::LocalDateTime(a), Self::LocalDateTime(b)) => a.compare_to(b),
            (Self::DateTime(a), Self::DateTime(b)) => a.compare_to(b),
            (Self::Duration(a), Self::Duration(b)) => a.compare_to(b),
            (Self::Geo(a), Self::Geo(b)) => a.compare_to(b),
            (Self::Array(a), Self::Array(b)) => a.compare_to(b),
            _ if self.category() == ValueCategory::Temporal && other.category() == ValueCategory::Temporal => {
                self.value_group().cmp(&other.value_group())
            }
            _ => panic!(
                "unsafe_compare_to called on {} and {}",
                self.type_name(),
                other.type_name()
            ),
        }
    }

    // ==================== Writer ====================

    /// Emit this value to a writer
    pub fn write_to<W: ValueWriter + ?Sized>(&self, writer: &mut W) -> Result<(), W::Error> {
        match self {
            Self::NoValue => writer.write_null(),
            Self::Boolean(v) => writer.write_boolean(*v),
            Self::Byte(v) => writer.write_byte(*v),
            Self::Short(v) => writer.write_short(*v),
            Self::Int(v) => writer.write_int(*v),
            Self::Long(v) => writer.write_long(*v),
            Self::Float(v) => writer.write_float(*v),
            Self::Double(v) => writer.write_double(*v),
            Self::Char(v) => writer.write_char(*v),
            Self::Text(v) => writer.write_string(v.as_str()),
            Self::Date(v) => v.write_to(writer),
            Self::LocalTime(v) => v.write_to(writer),
            Self::Time(v) => v.write_to(writer),
            Self::LocalDateTime(v) => v.write_to(writer),
            Self::DateTime(v) => v.write_to(writer),
            Self::Duration(v) => v.write_to(writer),
            Self::Geo(v) => v.write_to(writer),
            Self::Array(v) => v.write_to(writer),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl core::hash::Hash for Value {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        state.write_i32(self.hash_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(Value::Byte(3), Value::Double(3.0))]
    #[case(Value::Int(-7), Value::Long(-7))]
    #[case(Value::Float(0.5), Value::Double(0.5))]
    #[case(Value::Double(-0.0), Value::Long(0))]
    #[case(Value::Char('x'), values::string_value("x"))]
    fn test_cross_type_equality(#[case] a: Value, #[case] b: Value) {
        assert!(a.equals(&b));
        assert!(b.equals(&a));
        assert_eq!(a.hash_code(), b.hash_code());
        assert_eq!(a.hash64(), b.hash64());
    }

    #[test]
    fn test_unequal_across_categories() {
        assert!(!Value::Long(1).equals(&Value::Boolean(true)));
        assert!(!values::string_value("1").equals(&Value::Int(1)));
        assert_eq!(Value::Long(1).ternary_equals(&values::string_value("1")), Some(false));
    }

    #[test]
    fn test_nan_and_no_value_are_undefined() {
        let nan = Value::Double(f64::NAN);
        assert!(!nan.equals(&nan));
        assert_eq!(nan.ternary_equals(&nan), None);
        assert_eq!(Value::NoValue.ternary_equals(&Value::NoValue), None);
        assert_eq!(Value::NoValue.hash_code(), NO_VALUE_HASH);
    }

    #[test]
    fn test_array_ternary_equals() {
        let with_nan = values::double_array(&[1.0, f64::NAN]);
        assert_eq!(with_nan.ternary_equals(&values::int_array(&[1, 2])), None);
        assert_eq!(with_nan.ternary_equals(&values::int_array(&[2, 2])), Some(false));
        assert_eq!(
            values::int_array(&[1, 2]).ternary_equals(&values::long_array(&[1, 2])),
            Some(true)
        );
        assert_eq!(values::int_array(&[1]).ternary_equals(&values::boolean_array(&[true])), Some(false));
    }

    #[test]
    fn test_temporal_kinds_order_by_group() {
        let date = values::date(2020, 1, 1).unwrap();
        let local = values::local_time(12, 0, 0, 0).unwrap();
        assert_eq!(date.unsafe_compare_to(&local), Ordering::Less);
        assert_eq!(local.unsafe_compare_to(&date), Ordering::Greater);
    }

    #[test]
    #[should_panic(expected = "unsafe_compare_to")]
    fn test_unsafe_compare_across_categories_panics() {
        let _ = Value::Int(1).unsafe_compare_to(&Value::Boolean(true));
    }

    #[test]
    fn test_as_long_rejects_floats() {
        assert_eq!(Value::Short(12).as_long(), Some(12));
        assert_eq!(Value::Double(1.0).as_long(), None);
        assert_eq!(Value::Int(2).as_double(), Some(2.0));
        assert_eq!(Value::Char('a').as_text(), None);
    }

    #[test]
    fn test_get_dispatch() {
        let date = values::date(2015, 7, 21).unwrap();
        assert_eq!(date.get("year").unwrap(), Value::Long(2015));
        assert!(Value::Int(1).get("year").unwrap_err().is_unsupported());
    }
}
