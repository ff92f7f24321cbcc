//! Value ordering
//!
//! [`ValueComparator::compare`] is a total order over all values: first by
//! [`ValueCategory`](crate::ValueCategory), then inside the category. It is
//! what index range scans sort by.
//!
//! [`ValueComparator::ternary_compare`] is the query-language comparison. It
//! answers [`Comparison::Undefined`] where the total order would have to make
//! something up: NaN, `NoValue`, values of different categories, temporal
//! values of different kinds, unequal durations, points in different
//! coordinate systems.
//!
//! ```rust
//! use std::cmp::Ordering;
//! use strata_value::{values, Comparison, ValueComparator};
//!
//! let one = values::int_value(1);
//! let text = values::string_value("a");
//! assert_eq!(ValueComparator::compare(&text, &one), Ordering::Less);
//! assert_eq!(ValueComparator::ternary_compare(&text, &one), Comparison::Undefined);
//! ```

use core::cmp::Ordering;

use crate::core::value::Value;

/// Result of a three-valued comparison
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Comparison {
    Less,
    Equal,
    Greater,
    /// The operands have no defined order
    Undefined,
}

impl Comparison {
    #[inline]
    pub const fn is_defined(self) -> bool {
        !matches!(self, Self::Undefined)
    }

    pub const fn to_ordering(self) -> Option<Ordering> {
        match self {
            Self::Less => Some(Ordering::Less),
            Self::Equal => Some(Ordering::Equal),
            Self::Greater => Some(Ordering::Greater),
            Self::Undefined => None,
        }
    }
}

impl From<Ordering> for Comparison {
    fn from(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Less => Self::Less,
            Ordering::Equal => Self::Equal,
            Ordering::Greater => Self::Greater,
        }
    }
}

impl From<Option<Ordering>> for Comparison {
    fn from(ordering: Option<Ordering>) -> Self {
        ordering.map_or(Self::Undefined, Self::from)
    }
}

/// Orders values of any kind
#[derive(Copy, Clone, Debug, Default)]
pub struct ValueComparator;

impl ValueComparator {
    /// Total order: category table first, then within the category
    pub fn compare(a: &Value, b: &Value) -> Ordering {
        a.category()
            .cmp(&b.category())
            .then_with(|| a.unsafe_compare_to(b))
    }

    /// Three-valued comparison
    pub fn ternary_compare(a: &Value, b: &Value) -> Comparison {
        if a.is_no_value() || b.is_no_value() || a.is_nan() || b.is_nan() {
            return Comparison::Undefined;
        }
        if a.category() != b.category() {
            return Comparison::Undefined;
        }
        match (a, b) {
            (Value::Duration(x), Value::Duration(y)) => {
                if x == y {
                    Comparison::Equal
                } else {
                    Comparison::Undefined
                }
            }
            (Value::Geo(x), Value::Geo(y)) => x.ternary_compare(y),
            (Value::Array(x), Value::Array(y)) => x.ternary_compare(y),
            _ if a.value_group() != b.value_group() => Comparison::Undefined,
            _ => Comparison::from(a.unsafe_compare_to(b)),
        }
    }
}

impl Value {
    /// Shorthand for [`ValueComparator::ternary_compare`]
    pub fn ternary_compare(&self, other: &Self) -> Comparison {
        ValueComparator::ternary_compare(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_category_table_orders_first() {
        let ordered = [
            values::point_value(crate::geo::Crs::Cartesian, &[0.0, 0.0]).unwrap(),
            values::date(2020, 1, 1).unwrap(),
            values::duration(0, 1, 0, 0).unwrap(),
            values::string_value("z"),
            values::boolean_value(false),
            values::int_value(-5),
            values::no_value(),
        ];
        for pair in ordered.windows(2) {
            assert_eq!(ValueComparator::compare(&pair[0], &pair[1]), Ordering::Less, "{} < {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_nan_sorts_last_but_is_undefined() {
        let nan = values::double_value(f64::NAN);
        let big = values::long_value(i64::MAX);
        assert_eq!(ValueComparator::compare(&nan, &big), Ordering::Greater);
        assert_eq!(ValueComparator::compare(&nan, &nan), Ordering::Equal);
        assert_eq!(ValueComparator::ternary_compare(&nan, &big), Comparison::Undefined);
    }

    #[test]
    fn test_ternary_within_category() {
        assert_eq!(
            values::int_value(1).ternary_compare(&values::double_value(1.5)),
            Comparison::Less
        );
        assert_eq!(
            values::char_value('b').ternary_compare(&values::string_value("a")),
            Comparison::Greater
        );
        let date = values::date(2020, 1, 1).unwrap();
        let local = values::local_date_time(2020, 1, 1, 0, 0, 0, 0).unwrap();
        assert_eq!(date.ternary_compare(&local), Comparison::Undefined);
        assert_eq!(ValueComparator::compare(&date, &local), Ordering::Greater);
    }

    #[test]
    fn test_durations_only_equal_or_undefined() {
        let day = values::duration(0, 1, 0, 0).unwrap();
        let hours = values::duration(0, 0, 86_400, 0).unwrap();
        assert_eq!(day.ternary_compare(&day.clone()), Comparison::Equal);
        assert_eq!(day.ternary_compare(&hours), Comparison::Undefined);
        assert_ne!(ValueComparator::compare(&day, &hours), Ordering::Equal);
    }

    #[test]
    fn test_comparison_conversions() {
        assert_eq!(Comparison::from(Some(Ordering::Less)), Comparison::Less);
        assert_eq!(Comparison::from(None), Comparison::Undefined);
        assert_eq!(Comparison::Greater.to_ordering(), Some(Ordering::Greater));
        assert!(!Comparison::Undefined.is_defined());
    }
}
