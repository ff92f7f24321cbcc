//! Arithmetic on values
//!
//! Two integral operands give a `Long`; any floating point operand gives a
//! `Double`. Integral arithmetic is checked. Text concatenates with text,
//! durations add to temporal values and to each other, and a duration
//! multiplies by an integral factor.

use crate::core::numbers::Numeric;
use crate::core::value::Value;
use crate::error::{ValueError, ValueResult};
use crate::temporal::DurationValue;

#[derive(Copy, Clone, Debug)]
enum Op {
    Plus,
    Minus,
    Times,
    Divide,
}

impl Op {
    const fn name(self) -> &'static str {
        match self {
            Self::Plus => "plus",
            Self::Minus => "minus",
            Self::Times => "times",
            Self::Divide => "divide",
        }
    }

    const fn symbol(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Times => "*",
            Self::Divide => "/",
        }
    }

    fn apply_long(self, a: i64, b: i64) -> ValueResult<i64> {
        let result = match self {
            Self::Plus => a.checked_add(b),
            Self::Minus => a.checked_sub(b),
            Self::Times => a.checked_mul(b),
            Self::Divide => {
                if b == 0 {
                    return Err(ValueError::invalid_argument("/ by zero"));
                }
                a.checked_div(b)
            }
        };
        result.ok_or_else(|| ValueError::overflow(self.name(), format!("{a} {} {b}", self.symbol())))
    }

    fn apply_double(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Plus => a + b,
            Self::Minus => a - b,
            Self::Times => a * b,
            Self::Divide => a / b,
        }
    }

    fn unsupported(self, a: &Value, b: &Value) -> ValueError {
        ValueError::unsupported(
            self.name(),
            format!("{} {} {}", a.type_name(), self.symbol(), b.type_name()),
        )
    }
}

fn to_double(n: Numeric) -> f64 {
    match n {
        Numeric::Integral(l) => l as f64,
        Numeric::FloatingPoint(d) => d,
    }
}

fn numeric(op: Op, a: Numeric, b: Numeric) -> ValueResult<Value> {
    match (a, b) {
        (Numeric::Integral(x), Numeric::Integral(y)) => op.apply_long(x, y).map(Value::Long),
        _ => Ok(Value::Double(op.apply_double(to_double(a), to_double(b)))),
    }
}

fn plus_duration(value: &Value, duration: &DurationValue) -> Option<ValueResult<Value>> {
    Some(match value {
        Value::Date(v) => v.plus(duration).map(Value::Date),
        Value::LocalTime(v) => Ok(Value::LocalTime(v.plus(duration))),
        Value::Time(v) => Ok(Value::Time(v.plus(duration))),
        Value::LocalDateTime(v) => v.plus(duration).map(Value::LocalDateTime),
        Value::DateTime(v) => v.plus(duration).map(Value::DateTime),
        _ => return None,
    })
}

fn minus_duration(value: &Value, duration: &DurationValue) -> Option<ValueResult<Value>> {
    Some(match value {
        Value::Date(v) => v.minus(duration).map(Value::Date),
        Value::LocalTime(v) => v.minus(duration).map(Value::LocalTime),
        Value::Time(v) => v.minus(duration).map(Value::Time),
        Value::LocalDateTime(v) => v.minus(duration).map(Value::LocalDateTime),
        Value::DateTime(v) => v.minus(duration).map(Value::DateTime),
        _ => return None,
    })
}

impl Value {
    // ==================== Arithmetic Operations ====================

    /// Add two values
    pub fn plus(&self, other: &Self) -> ValueResult<Self> {
        let op = Op::Plus;
        if let (Some(a), Some(b)) = (self.as_numeric(), other.as_numeric()) {
            return numeric(op, a, b);
        }
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => Ok(Self::Text(a.plus(b))),
            (Self::Duration(a), Self::Duration(b)) => a.plus(b).map(Self::Duration),
            (value, Self::Duration(d)) | (Self::Duration(d), value) => {
                plus_duration(value, d).unwrap_or_else(|| Err(op.unsupported(self, other)))
            }
            _ => Err(op.unsupported(self, other)),
        }
    }

    /// Subtract `other` from this value
    pub fn minus(&self, other: &Self) -> ValueResult<Self> {
        let op = Op::Minus;
        if let (Some(a), Some(b)) = (self.as_numeric(), other.as_numeric()) {
            return numeric(op, a, b);
        }
        match (self, other) {
            (Self::Duration(a), Self::Duration(b)) => a.minus(b).map(Self::Duration),
            (value, Self::Duration(d)) => {
                minus_duration(value, d).unwrap_or_else(|| Err(op.unsupported(self, other)))
            }
            _ => Err(op.unsupported(self, other)),
        }
    }

    /// Multiply two values
    pub fn times(&self, other: &Self) -> ValueResult<Self> {
        let op = Op::Times;
        if let (Some(a), Some(b)) = (self.as_numeric(), other.as_numeric()) {
            return numeric(op, a, b);
        }
        match (self, other) {
            (Self::Duration(d), factor) | (factor, Self::Duration(d)) => match factor.as_long() {
                Some(l) => d.mul(l).map(Self::Duration),
                None => Err(op.unsupported(self, other)),
            },
            _ => Err(op.unsupported(self, other)),
        }
    }

    /// Divide this value by `other`
    ///
    /// Integral division truncates toward zero; dividing by integral zero is
    /// an invalid argument.
    pub fn divide(&self, other: &Self) -> ValueResult<Self> {
        let op = Op::Divide;
        match (self.as_numeric(), other.as_numeric()) {
            (Some(a), Some(b)) => numeric(op, a, b),
            _ => Err(op.unsupported(self, other)),
        }
    }

    // ==================== Primitive overloads ====================

    pub fn plus_long(&self, other: i64) -> ValueResult<Self> {
        self.plus(&Self::Long(other))
    }

    pub fn plus_double(&self, other: f64) -> ValueResult<Self> {
        self.plus(&Self::Double(other))
    }

    pub fn minus_long(&self, other: i64) -> ValueResult<Self> {
        self.minus(&Self::Long(other))
    }

    pub fn minus_double(&self, other: f64) -> ValueResult<Self> {
        self.minus(&Self::Double(other))
    }

    pub fn times_long(&self, other: i64) -> ValueResult<Self> {
        self.times(&Self::Long(other))
    }

    pub fn times_double(&self, other: f64) -> ValueResult<Self> {
        self.times(&Self::Double(other))
    }

    pub fn divide_long(&self, other: i64) -> ValueResult<Self> {
        self.divide(&Self::Long(other))
    }

    pub fn divide_double(&self, other: f64) -> ValueResult<Self> {
        self.divide(&Self::Double(other))
    }

    /// Arithmetic negation of a number or duration
    pub fn negate(&self) -> ValueResult<Self> {
        match self {
            Self::Float(v) => Ok(Self::Float(-v)),
            Self::Double(v) => Ok(Self::Double(-v)),
            Self::Duration(d) => d.negate().map(Self::Duration),
            _ => match self.as_long() {
                Some(l) => l
                    .checked_neg()
                    .map(Self::Long)
                    .ok_or_else(|| ValueError::overflow("negate", l.to_string())),
                None => Err(ValueError::unsupported("negate", self.type_name())),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(Value::Int(2), Value::Byte(3), Value::Long(5))]
    #[case(Value::Int(2), Value::Float(0.5), Value::Double(2.5))]
    #[case(Value::Double(1.5), Value::Long(1), Value::Double(2.5))]
    fn test_plus_widens(#[case] a: Value, #[case] b: Value, #[case] expected: Value) {
        let result = a.plus(&b).unwrap();
        assert_eq!(result.type_name(), expected.type_name());
        assert_eq!(result, expected);
    }

    #[test]
    fn test_integral_overflow_and_division() {
        assert!(Value::Long(i64::MAX).plus_long(1).is_err());
        assert!(Value::Long(i64::MIN).divide_long(-1).is_err());
        assert_eq!(Value::Int(7).divide_long(2).unwrap(), Value::Long(3));
        assert_eq!(Value::Int(-7).divide_long(2).unwrap(), Value::Long(-3));

        let err = Value::Int(1).divide_long(0).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("/ by zero"));

        let inf = Value::Int(1).divide_double(0.0).unwrap();
        assert_eq!(inf.as_double(), Some(f64::INFINITY));
    }

    #[test]
    fn test_text_and_unsupported() {
        let hello = values::string_value("hello ").plus(&values::string_value("world")).unwrap();
        assert_eq!(hello.as_text(), Some("hello world"));
        assert!(values::string_value("a").plus_long(1).unwrap_err().is_unsupported());
        assert!(Value::Boolean(true).times(&Value::Int(2)).unwrap_err().is_unsupported());
    }

    #[test]
    fn test_temporal_and_duration() {
        let date = values::date(2020, 1, 31).unwrap();
        let month = values::duration(1, 0, 0, 0).unwrap();
        assert_eq!(date.plus(&month).unwrap(), values::date(2020, 2, 29).unwrap());
        assert_eq!(month.plus(&date).unwrap(), values::date(2020, 2, 29).unwrap());
        assert_eq!(
            values::date(2020, 3, 31).unwrap().minus(&month).unwrap(),
            values::date(2020, 2, 29).unwrap()
        );
        assert!(month.minus(&date).unwrap_err().is_unsupported());

        let tripled = month.times_long(3).unwrap();
        assert_eq!(tripled, values::duration(3, 0, 0, 0).unwrap());
        assert!(month.times_double(1.5).is_err());
    }

    #[test]
    fn test_negate() {
        assert_eq!(Value::Int(3).negate().unwrap(), Value::Long(-3));
        assert!(Value::Long(i64::MIN).negate().is_err());
        assert!(Value::Boolean(true).negate().unwrap_err().is_unsupported());
    }
}
