//! Array values
//!
//! One variant per element type, each over a shared `Arc<[T]>` buffer so
//! cloning an array never copies its elements.
//!
//! Arrays of different numeric widths compare and hash as sequences of
//! numbers: `[1, 2, 3]` as bytes equals `[1.0, 2.0, 3.0]` as doubles. Char
//! arrays and text arrays of one-code-point strings are equal as well.
//!
//! ```rust
//! use strata_value::array::ArrayValue;
//!
//! let ints = ArrayValue::from(vec![1_i32, 2, 3]);
//! let longs = ArrayValue::from(vec![1_i64, 2, 3]);
//! assert!(ints.equals(&longs));
//! assert_eq!(ints.hash_code(), longs.hash_code());
//! ```

use core::cmp::Ordering;
use core::fmt;
use std::sync::Arc;

use crate::core::compare::Comparison;
use crate::core::group::ValueGroup;
use crate::core::hash::ValueHasher;
use crate::core::limits::ValueLimits;
use crate::core::numbers::{
    hash_array, hash_booleans, hash_bytes, hash_doubles, hash_floats, hash_ints, hash_longs, hash_shorts, Numeric,
};
use crate::core::value::Value;
use crate::error::{ValueError, ValueResult};
use crate::geo::{GeoValue, PointValue};
use crate::scalar::text::{compare_char_to_text, hash_char};
use crate::scalar::TextValue;
use crate::temporal::{DateTimeValue, DateValue, DurationValue, LocalDateTimeValue, LocalTimeValue, TimeValue};
use crate::writer::{ArrayType, ValueWriter};

/// Homogeneous array of scalar, temporal or point elements
#[derive(Debug, Clone)]
pub enum ArrayValue {
    Boolean(Arc<[bool]>),
    Byte(Arc<[i8]>),
    Short(Arc<[i16]>),
    Int(Arc<[i32]>),
    Long(Arc<[i64]>),
    Float(Arc<[f32]>),
    Double(Arc<[f64]>),
    Char(Arc<[char]>),
    Text(Arc<[TextValue]>),
    Date(Arc<[DateValue]>),
    LocalTime(Arc<[LocalTimeValue]>),
    Time(Arc<[TimeValue]>),
    LocalDateTime(Arc<[LocalDateTimeValue]>),
    DateTime(Arc<[DateTimeValue]>),
    Duration(Arc<[DurationValue]>),
    Point(Arc<[PointValue]>),
}

/// Borrowed view over any numeric array
#[derive(Debug, Clone, Copy)]
pub enum NumericSlice<'a> {
    Byte(&'a [i8]),
    Short(&'a [i16]),
    Int(&'a [i32]),
    Long(&'a [i64]),
    Float(&'a [f32]),
    Double(&'a [f64]),
}

impl<'a> NumericSlice<'a> {
    pub fn len(&self) -> usize {
        match self {
            Self::Byte(v) => v.len(),
            Self::Short(v) => v.len(),
            Self::Int(v) => v.len(),
            Self::Long(v) => v.len(),
            Self::Float(v) => v.len(),
            Self::Double(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<Numeric> {
        Some(match self {
            Self::Byte(v) => Numeric::Integral(i64::from(*v.get(index)?)),
            Self::Short(v) => Numeric::Integral(i64::from(*v.get(index)?)),
            Self::Int(v) => Numeric::Integral(i64::from(*v.get(index)?)),
            Self::Long(v) => Numeric::Integral(*v.get(index)?),
            Self::Float(v) => Numeric::FloatingPoint(f64::from(*v.get(index)?)),
            Self::Double(v) => Numeric::FloatingPoint(*v.get(index)?),
        })
    }

    pub fn iter(self) -> impl Iterator<Item = Numeric> + 'a {
        (0..self.len()).filter_map(move |i| self.get(i))
    }

    pub fn equals(self, other: Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a.equals(b))
    }

    /// Element-wise total order, then length
    pub fn compare(self, other: Self) -> Ordering {
        self.iter()
            .zip(other.iter())
            .map(|(a, b)| a.compare(b))
            .find(|o| o.is_ne())
            .unwrap_or_else(|| self.len().cmp(&other.len()))
    }
}

/// One element of a text-like array
#[derive(Clone, Copy)]
enum TextElement<'a> {
    Char(char),
    Text(&'a TextValue),
}

impl TextElement<'_> {
    fn equals(self, other: Self) -> bool {
        match (self, other) {
            (Self::Char(a), Self::Char(b)) => a == b,
            (Self::Char(c), Self::Text(t)) | (Self::Text(t), Self::Char(c)) => t.is_char(c),
            (Self::Text(a), Self::Text(b)) => a == b,
        }
    }

    fn compare(self, other: Self) -> Ordering {
        match (self, other) {
            (Self::Char(a), Self::Char(b)) => a.cmp(&b),
            (Self::Char(c), Self::Text(t)) => compare_char_to_text(c, t),
            (Self::Text(t), Self::Char(c)) => compare_char_to_text(c, t).reverse(),
            (Self::Text(a), Self::Text(b)) => a.compare_to(b),
        }
    }
}

impl ArrayValue {
    pub fn len(&self) -> usize {
        match self {
            Self::Boolean(v) => v.len(),
            Self::Byte(v) => v.len(),
            Self::Short(v) => v.len(),
            Self::Int(v) => v.len(),
            Self::Long(v) => v.len(),
            Self::Float(v) => v.len(),
            Self::Double(v) => v.len(),
            Self::Char(v) => v.len(),
            Self::Text(v) => v.len(),
            Self::Date(v) => v.len(),
            Self::LocalTime(v) => v.len(),
            Self::Time(v) => v.len(),
            Self::LocalDateTime(v) => v.len(),
            Self::DateTime(v) => v.len(),
            Self::Duration(v) => v.len(),
            Self::Point(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element type tag used by the writer protocol
    pub const fn array_type(&self) -> ArrayType {
        match self {
            Self::Boolean(_) => ArrayType::Boolean,
            Self::Byte(_) => ArrayType::Byte,
            Self::Short(_) => ArrayType::Short,
            Self::Int(_) => ArrayType::Int,
            Self::Long(_) => ArrayType::Long,
            Self::Float(_) => ArrayType::Float,
            Self::Double(_) => ArrayType::Double,
            Self::Char(_) => ArrayType::Char,
            Self::Text(_) => ArrayType::String,
            Self::Date(_) => ArrayType::Date,
            Self::LocalTime(_) => ArrayType::LocalTime,
            Self::Time(_) => ArrayType::Time,
            Self::LocalDateTime(_) => ArrayType::LocalDateTime,
            Self::DateTime(_) => ArrayType::DateTime,
            Self::Duration(_) => ArrayType::Duration,
            Self::Point(_) => ArrayType::Point,
        }
    }

    pub const fn value_group(&self) -> ValueGroup {
        match self {
            Self::Point(_) => ValueGroup::GeometryArray,
            Self::DateTime(_) => ValueGroup::ZonedDateTimeArray,
            Self::LocalDateTime(_) => ValueGroup::LocalDateTimeArray,
            Self::Date(_) => ValueGroup::DateArray,
            Self::Time(_) => ValueGroup::ZonedTimeArray,
            Self::LocalTime(_) => ValueGroup::LocalTimeArray,
            Self::Duration(_) => ValueGroup::DurationArray,
            Self::Char(_) | Self::Text(_) => ValueGroup::TextArray,
            Self::Boolean(_) => ValueGroup::BooleanArray,
            Self::Byte(_) | Self::Short(_) | Self::Int(_) | Self::Long(_) | Self::Float(_) | Self::Double(_) => {
                ValueGroup::NumberArray
            }
        }
    }

    /// Numeric view, for numeric arrays
    pub fn as_numeric(&self) -> Option<NumericSlice<'_>> {
        Some(match self {
            Self::Byte(v) => NumericSlice::Byte(v),
            Self::Short(v) => NumericSlice::Short(v),
            Self::Int(v) => NumericSlice::Int(v),
            Self::Long(v) => NumericSlice::Long(v),
            Self::Float(v) => NumericSlice::Float(v),
            Self::Double(v) => NumericSlice::Double(v),
            _ => return None,
        })
    }

    fn text_element(&self, index: usize) -> Option<TextElement<'_>> {
        match self {
            Self::Char(v) => v.get(index).copied().map(TextElement::Char),
            Self::Text(v) => v.get(index).map(TextElement::Text),
            _ => None,
        }
    }

    fn text_elements(&self) -> impl Iterator<Item = TextElement<'_>> {
        (0..self.len()).filter_map(move |i| self.text_element(i))
    }

    /// Check the array against construction limits
    pub fn check_limits(&self, limits: &ValueLimits) -> ValueResult<()> {
        limits.check_array_length(self.len())?;
        if let Self::Text(texts) = self {
            for text in texts.iter() {
                limits.check_string_bytes(text.utf8_len())?;
            }
        }
        Ok(())
    }

    /// Element at `index` as a value
    pub fn value(&self, index: usize) -> ValueResult<Value> {
        let element = match self {
            Self::Boolean(v) => v.get(index).map(|e| Value::Boolean(*e)),
            Self::Byte(v) => v.get(index).map(|e| Value::Byte(*e)),
            Self::Short(v) => v.get(index).map(|e| Value::Short(*e)),
            Self::Int(v) => v.get(index).map(|e| Value::Int(*e)),
            Self::Long(v) => v.get(index).map(|e| Value::Long(*e)),
            Self::Float(v) => v.get(index).map(|e| Value::Float(*e)),
            Self::Double(v) => v.get(index).map(|e| Value::Double(*e)),
            Self::Char(v) => v.get(index).map(|e| Value::Char(*e)),
            Self::Text(v) => v.get(index).map(|e| Value::Text(e.clone())),
            Self::Date(v) => v.get(index).map(|e| Value::Date(*e)),
            Self::LocalTime(v) => v.get(index).map(|e| Value::LocalTime(*e)),
            Self::Time(v) => v.get(index).map(|e| Value::Time(*e)),
            Self::LocalDateTime(v) => v.get(index).map(|e| Value::LocalDateTime(*e)),
            Self::DateTime(v) => v.get(index).map(|e| Value::DateTime(*e)),
            Self::Duration(v) => v.get(index).map(|e| Value::Duration(*e)),
            Self::Point(v) => v.get(index).map(|e| Value::Geo(GeoValue::Point(e.clone()))),
        };
        element.ok_or_else(|| {
            ValueError::invalid_argument(format!("Index {index} out of bounds for length {}", self.len()))
        })
    }

    /// Elements as values
    pub fn iter(&self) -> impl Iterator<Item = Value> + '_ {
        (0..self.len()).filter_map(move |i| self.value(i).ok())
    }

    // ==================== Equality and order ====================

    /// Element-wise equality across numeric widths and between char and text
    pub fn equals(&self, other: &Self) -> bool {
        if let (Some(a), Some(b)) = (self.as_numeric(), other.as_numeric()) {
            return a.equals(b);
        }
        match (self, other) {
            (Self::Char(_) | Self::Text(_), Self::Char(_) | Self::Text(_)) => {
                self.len() == other.len()
                    && self.text_elements().zip(other.text_elements()).all(|(a, b)| a.equals(b))
            }
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Date(a), Self::Date(b)) => a == b,
            (Self::LocalTime(a), Self::LocalTime(b)) => a == b,
            (Self::Time(a), Self::Time(b)) => a == b,
            (Self::LocalDateTime(a), Self::LocalDateTime(b)) => a == b,
            (Self::DateTime(a), Self::DateTime(b)) => a == b,
            (Self::Duration(a), Self::Duration(b)) => a == b,
            (Self::Point(a), Self::Point(b)) => a == b,
            _ => false,
        }
    }

    /// Total order within one array category
    ///
    /// Temporal arrays of different kinds order by group.
    ///
    /// # Panics
    ///
    /// Panics when the arrays belong to different categories.
    pub fn compare_to(&self, other: &Self) -> Ordering {
        if let (Some(a), Some(b)) = (self.as_numeric(), other.as_numeric()) {
            return a.compare(b);
        }
        match (self, other) {
            (Self::Char(_) | Self::Text(_), Self::Char(_) | Self::Text(_)) => self
                .text_elements()
                .zip(other.text_elements())
                .map(|(a, b)| a.compare(b))
                .find(|o| o.is_ne())
                .unwrap_or_else(|| self.len().cmp(&other.len())),
            (Self::Boolean(a), Self::Boolean(b)) => a.cmp(b),
            (Self::Date(a), Self::Date(b)) => lexicographic(a, b, DateValue::compare_to),
            (Self::LocalTime(a), Self::LocalTime(b)) => lexicographic(a, b, LocalTimeValue::compare_to),
            (Self::Time(a), Self::Time(b)) => lexicographic(a, b, TimeValue::compare_to),
            (Self::LocalDateTime(a), Self::LocalDateTime(b)) => {
                lexicographic(a, b, LocalDateTimeValue::compare_to)
            }
            (Self::DateTime(a), Self::DateTime(b)) => lexicographic(a, b, DateTimeValue::compare_to),
            (Self::Duration(a), Self::Duration(b)) => lexicographic(a, b, DurationValue::compare_to),
            (Self::Point(a), Self::Point(b)) => lexicographic(a, b, PointValue::compare_to),
            _ if self.value_group().category() == other.value_group().category() => {
                self.value_group().cmp(&other.value_group())
            }
            _ => panic!(
                "cannot compare {} with {}",
                self.value_group(),
                other.value_group()
            ),
        }
    }

    /// Element-wise ternary comparison; the first undefined element pair
    /// makes the whole comparison undefined
    pub fn ternary_compare(&self, other: &Self) -> Comparison {
        if let (Some(a), Some(b)) = (self.as_numeric(), other.as_numeric()) {
            return ternary_elements(a.iter(), b.iter(), a.len(), b.len(), |x, y| {
                if x.is_nan() || y.is_nan() {
                    Comparison::Undefined
                } else {
                    Comparison::from(x.compare(*y))
                }
            });
        }
        let len = (self.len(), other.len());
        match (self, other) {
            (Self::Duration(a), Self::Duration(b)) => ternary_elements(a.iter(), b.iter(), len.0, len.1, |x, y| {
                if x == y {
                    Comparison::Equal
                } else {
                    Comparison::Undefined
                }
            }),
            (Self::Point(a), Self::Point(b)) => ternary_elements(a.iter(), b.iter(), len.0, len.1, |x, y| {
                x.ternary_compare(y).map_or(Comparison::Undefined, Comparison::from)
            }),
            _ if self.value_group() != other.value_group() => Comparison::Undefined,
            _ => Comparison::from(self.compare_to(other)),
        }
    }

    // ==================== Hashing ====================

    pub fn hash_code(&self) -> i32 {
        match self {
            Self::Boolean(v) => hash_booleans(v),
            Self::Byte(v) => hash_bytes(v),
            Self::Short(v) => hash_shorts(v),
            Self::Int(v) => hash_ints(v),
            Self::Long(v) => hash_longs(v),
            Self::Float(v) => hash_floats(v),
            Self::Double(v) => hash_doubles(v),
            Self::Char(v) => hash_array(v.iter().map(|c| hash_char(*c))),
            Self::Text(v) => hash_array(v.iter().map(TextValue::hash_code)),
            Self::Date(v) => hash_array(v.iter().map(DateValue::hash_code)),
            Self::LocalTime(v) => hash_array(v.iter().map(LocalTimeValue::hash_code)),
            Self::Time(v) => hash_array(v.iter().map(TimeValue::hash_code)),
            Self::LocalDateTime(v) => hash_array(v.iter().map(LocalDateTimeValue::hash_code)),
            Self::DateTime(v) => hash_array(v.iter().map(DateTimeValue::hash_code)),
            Self::Duration(v) => hash_array(v.iter().map(DurationValue::hash_code)),
            Self::Point(v) => hash_array(v.iter().map(PointValue::hash_code)),
        }
    }

    pub fn update_hash(&self, hasher: &mut ValueHasher) {
        hasher.update_len(self.len());
        if let Some(numbers) = self.as_numeric() {
            for n in numbers.iter() {
                hasher.update_number(n);
            }
            return;
        }
        match self {
            Self::Boolean(v) => v.iter().for_each(|b| hasher.update_boolean(*b)),
            Self::Char(v) => v.iter().for_each(|c| hasher.update_char(*c)),
            Self::Text(v) => v.iter().for_each(|t| hasher.update_text(t.as_str())),
            Self::Date(v) => v.iter().for_each(|e| e.update_hash(hasher)),
            Self::LocalTime(v) => v.iter().for_each(|e| e.update_hash(hasher)),
            Self::Time(v) => v.iter().for_each(|e| e.update_hash(hasher)),
            Self::LocalDateTime(v) => v.iter().for_each(|e| e.update_hash(hasher)),
            Self::DateTime(v) => v.iter().for_each(|e| e.update_hash(hasher)),
            Self::Duration(v) => v.iter().for_each(|e| e.update_hash(hasher)),
            Self::Point(v) => v.iter().for_each(|e| e.update_hash(hasher)),
            _ => {}
        }
    }

    // ==================== Writer ====================

    pub fn write_to<W: ValueWriter + ?Sized>(&self, writer: &mut W) -> Result<(), W::Error> {
        writer.begin_array(self.len(), self.array_type())?;
        match self {
            Self::Boolean(v) => v.iter().try_for_each(|e| writer.write_boolean(*e))?,
            Self::Byte(v) => v.iter().try_for_each(|e| writer.write_byte(*e))?,
            Self::Short(v) => v.iter().try_for_each(|e| writer.write_short(*e))?,
            Self::Int(v) => v.iter().try_for_each(|e| writer.write_int(*e))?,
            Self::Long(v) => v.iter().try_for_each(|e| writer.write_long(*e))?,
            Self::Float(v) => v.iter().try_for_each(|e| writer.write_float(*e))?,
            Self::Double(v) => v.iter().try_for_each(|e| writer.write_double(*e))?,
            Self::Char(v) => v.iter().try_for_each(|e| writer.write_char(*e))?,
            Self::Text(v) => v.iter().try_for_each(|e| writer.write_string(e.as_str()))?,
            Self::Date(v) => v.iter().try_for_each(|e| e.write_to(writer))?,
            Self::LocalTime(v) => v.iter().try_for_each(|e| e.write_to(writer))?,
            Self::Time(v) => v.iter().try_for_each(|e| e.write_to(writer))?,
            Self::LocalDateTime(v) => v.iter().try_for_each(|e| e.write_to(writer))?,
            Self::DateTime(v) => v.iter().try_for_each(|e| e.write_to(writer))?,
            Self::Duration(v) => v.iter().try_for_each(|e| e.write_to(writer))?,
            Self::Point(v) => v.iter().try_for_each(|e| e.write_to(writer))?,
        }
        writer.end_array()
    }
}

fn lexicographic<T>(a: &[T], b: &[T], cmp: impl Fn(&T, &T) -> Ordering) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(x, y)| cmp(x, y))
        .find(|o| o.is_ne())
        .unwrap_or_else(|| a.len().cmp(&b.len()))
}

fn ternary_elements<T>(
    a: impl Iterator<Item = T>,
    b: impl Iterator<Item = T>,
    len_a: usize,
    len_b: usize,
    cmp: impl Fn(&T, &T) -> Comparison,
) -> Comparison {
    for (x, y) in a.zip(b) {
        match cmp(&x, &y) {
            Comparison::Equal => {}
            other => return other,
        }
    }
    Comparison::from(len_a.cmp(&len_b))
}

impl PartialEq for ArrayValue {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl fmt::Display for ArrayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, element) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{element}")?;
        }
        f.write_str("]")
    }
}

macro_rules! array_from {
    ($($element:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<Vec<$element>> for ArrayValue {
                fn from(values: Vec<$element>) -> Self {
                    Self::$variant(values.into())
                }
            }

            impl From<&[$element]> for ArrayValue {
                fn from(values: &[$element]) -> Self {
                    Self::$variant(values.into())
                }
            }

            impl From<Arc<[$element]>> for ArrayValue {
                fn from(values: Arc<[$element]>) -> Self {
                    Self::$variant(values)
                }
            }
        )*
    };
}

array_from! {
    bool => Boolean,
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    char => Char,
    TextValue => Text,
    DateValue => Date,
    LocalTimeValue => LocalTime,
    TimeValue => Time,
    LocalDateTimeValue => LocalDateTime,
    DateTimeValue => DateTime,
    DurationValue => Duration,
    PointValue => Point,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn texts(items: &[&str]) -> ArrayValue {
        ArrayValue::from(items.iter().map(|s| TextValue::from(*s)).collect::<Vec<_>>())
    }

    #[test]
    fn test_numeric_arrays_equal_across_widths() {
        let bytes = ArrayValue::from(vec![1_i8, 2, 3]);
        let doubles = ArrayValue::from(vec![1.0_f64, 2.0, 3.0]);
        let floats = ArrayValue::from(vec![1.0_f32, 2.0, 3.5]);
        assert!(bytes.equals(&doubles));
        assert_eq!(bytes.hash_code(), doubles.hash_code());
        assert!(!bytes.equals(&floats));
        assert!(!bytes.equals(&ArrayValue::from(vec![1_i64, 2])));
    }

    #[test]
    fn test_char_and_text_arrays() {
        let chars = ArrayValue::from(vec!['a', 'b']);
        assert!(chars.equals(&texts(&["a", "b"])));
        assert_eq!(chars.hash_code(), texts(&["a", "b"]).hash_code());
        assert!(!chars.equals(&texts(&["a", "bc"])));
        assert_eq!(chars.compare_to(&texts(&["a", "bc"])), Ordering::Less);
    }

    #[test]
    fn test_order_lexicographic_then_length() {
        let short = ArrayValue::from(vec![1_i32, 2]);
        let long = ArrayValue::from(vec![1_i64, 2, 0]);
        let big = ArrayValue::from(vec![1.5_f64]);
        assert_eq!(short.compare_to(&long), Ordering::Less);
        assert_eq!(long.compare_to(&big), Ordering::Less);
    }

    #[test]
    fn test_ternary_undefined_propagates() {
        let nan = ArrayValue::from(vec![1.0_f64, f64::NAN]);
        let other = ArrayValue::from(vec![1_i32, 2]);
        assert_eq!(nan.ternary_compare(&other), Comparison::Undefined);

        let decided_first = ArrayValue::from(vec![0.0_f64, f64::NAN]);
        assert_eq!(decided_first.ternary_compare(&other), Comparison::Less);

        let dates = ArrayValue::from(vec![DateValue::of(2020, 1, 1).unwrap()]);
        let times = ArrayValue::from(vec![LocalTimeValue::parse("12:00").unwrap()]);
        assert_eq!(dates.ternary_compare(&times), Comparison::Undefined);
        assert_ne!(dates.compare_to(&times), Ordering::Equal);
    }

    #[test]
    fn test_ternary_across_representations() {
        let bytes = ArrayValue::from(vec![1_i8, 2]);
        assert_eq!(bytes.ternary_compare(&ArrayValue::from(vec![1.0_f64, 2.0])), Comparison::Equal);
        assert_eq!(bytes.ternary_compare(&ArrayValue::from(vec![1_i64, 3])), Comparison::Less);
        assert_eq!(bytes.ternary_compare(&ArrayValue::from(vec![1.0_f32])), Comparison::Greater);

        let chars = ArrayValue::from(vec!['a', 'b']);
        assert_eq!(chars.ternary_compare(&texts(&["a", "b"])), Comparison::Equal);
        assert_eq!(chars.ternary_compare(&texts(&["a", "bc"])), Comparison::Less);
        assert_eq!(chars.ternary_compare(&bytes), Comparison::Undefined);
    }

    #[test]
    fn test_value_out_of_range() {
        let array = texts(&["x"]);
        assert_eq!(array.value(0).unwrap().to_string(), "'x'");
        assert!(array.value(1).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_display() {
        assert_eq!(ArrayValue::from(vec![1.5_f64, 2.0]).to_string(), "[1.5, 2.0]");
        assert_eq!(ArrayValue::from(vec![true]).to_string(), "[true]");
        assert_eq!(ArrayValue::from(Vec::<i32>::new()).to_string(), "[]");
    }

    #[test]
    fn test_limits() {
        let limits = ValueLimits {
            max_array_length: 2,
            ..ValueLimits::default()
        };
        assert!(ArrayValue::from(vec![1_i8, 2, 3]).check_limits(&limits).is_err());
        assert!(ArrayValue::from(vec![1_i8, 2]).check_limits(&limits).is_ok());
    }
}
