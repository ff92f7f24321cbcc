//! Duration value
//!
//! A duration keeps months, days and seconds apart because their lengths are
//! not fixed: a month is 28 to 31 days, a day is 23 to 25 hours across a DST
//! transition. Adding a duration applies months, then days, then the exact
//! seconds.
//!
//! Durations are normalised so that `0 <= nanos < 1_000_000_000`; the sign of
//! a sub-second amount lives in `seconds`.

use std::cmp::Ordering;
use std::fmt;

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::core::hash::ValueHasher;
use crate::core::numbers::{hash_array, hash_long, Numeric};
use crate::core::value::Value;
use crate::error::{ValueError, ValueResult};
use crate::temporal::parse::{parse_duration, DurationComponents};
use crate::temporal::{nano_of_day, time_from_nano_of_day, NANOS_PER_DAY, NANOS_PER_SECOND, SECONDS_PER_DAY};
use crate::writer::ValueWriter;

/// Average length of a Gregorian month: 365.2425 days / 12
pub const AVG_SECONDS_PER_MONTH: i64 = 2_629_746;

/// Amount of time in months, days, seconds and nanoseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DurationValue {
    months: i64,
    days: i64,
    seconds: i64,
    nanos: i32,
}

impl DurationValue {
    /// The zero duration
    pub const ZERO: Self = Self {
        months: 0,
        days: 0,
        seconds: 0,
        nanos: 0,
    };

    /// Create a duration, carrying whole seconds out of `nanos`
    pub fn new(months: i64, days: i64, seconds: i64, nanos: i64) -> ValueResult<Self> {
        let carry = nanos.div_euclid(NANOS_PER_SECOND);
        let seconds = seconds
            .checked_add(carry)
            .ok_or_else(|| ValueError::overflow("duration", format!("{seconds}s + {nanos}ns")))?;
        Ok(Self {
            months,
            days,
            seconds,
            nanos: nanos.rem_euclid(NANOS_PER_SECOND) as i32,
        })
    }

    /// Duration of whole months
    pub fn of_months(months: i64) -> Self {
        Self { months, ..Self::ZERO }
    }

    /// Duration of whole days
    pub fn of_days(days: i64) -> Self {
        Self { days, ..Self::ZERO }
    }

    /// Duration of seconds and nanoseconds
    pub fn of_seconds(seconds: i64, nanos: i64) -> ValueResult<Self> {
        Self::new(0, 0, seconds, nanos)
    }

    pub fn months(&self) -> i64 {
        self.months
    }

    pub fn days(&self) -> i64 {
        self.days
    }

    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    pub fn nanos(&self) -> i32 {
        self.nanos
    }

    /// Check if every component is zero
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    // ==================== Construction ====================

    /// Parse ISO-8601 `PnYnMnWnDTnHnMnS` or `PYYYY-MM-DDThh:mm:ss`
    ///
    /// Any component may be fractional; fractions cascade into the finer
    /// components, with a month counted as its average length.
    pub fn parse(text: &str) -> ValueResult<Self> {
        let components = parse_duration(text)?;
        Self::from_components(&components).map_err(|_| ValueError::parse_error("Duration", text))
    }

    /// Build from named amounts such as `("days", 14)` or `("hours", 1.5)`
    ///
    /// Accepted names: `years`, `quarters`, `months`, `weeks`, `days`,
    /// `hours`, `minutes`, `seconds`, `milliseconds`, `microseconds`,
    /// `nanoseconds`.
    pub fn build(fields: &[(&str, Value)]) -> ValueResult<Self> {
        let mut c = DurationComponents::default();
        let mut sub_second = Decimal::ZERO;
        for (name, value) in fields {
            let amount = decimal_amount(name, value)?;
            let slot = match name.to_ascii_lowercase().as_str() {
                "years" => &mut c.years,
                "quarters" => {
                    c.months = add(c.months, mul(amount, 3)?)?;
                    continue;
                }
                "months" => &mut c.months,
                "weeks" => &mut c.weeks,
                "days" => &mut c.days,
                "hours" => &mut c.hours,
                "minutes" => &mut c.minutes,
                "seconds" => &mut c.seconds,
                "milliseconds" => {
                    sub_second = add(sub_second, amount / Decimal::from(1_000))?;
                    continue;
                }
                "microseconds" => {
                    sub_second = add(sub_second, amount / Decimal::from(1_000_000))?;
                    continue;
                }
                "nanoseconds" => {
                    sub_second = add(sub_second, amount / Decimal::from(NANOS_PER_SECOND))?;
                    continue;
                }
                _ => {
                    return Err(ValueError::invalid_argument(format!(
                        "No such field for a duration: {name}"
                    )));
                }
            };
            *slot = add(*slot, amount)?;
        }
        c.seconds = add(c.seconds, sub_second)?;
        Self::from_components(&c)
    }

    /// Collapse signed, possibly fractional components
    pub fn from_components(c: &DurationComponents) -> ValueResult<Self> {
        let months_total = add(mul(c.years, 12)?, c.months)?;
        let whole_months = months_total.trunc();
        let days_total = add(mul(c.weeks, 7)?, c.days)?;
        let whole_days = days_total.trunc();

        let mut seconds_total = add(mul(c.hours, 3600)?, mul(c.minutes, 60)?)?;
        seconds_total = add(seconds_total, c.seconds)?;
        seconds_total = add(seconds_total, mul(months_total - whole_months, AVG_SECONDS_PER_MONTH)?)?;
        seconds_total = add(seconds_total, mul(days_total - whole_days, SECONDS_PER_DAY)?)?;
        let whole_seconds = seconds_total.trunc();
        let nanos = mul(seconds_total - whole_seconds, NANOS_PER_SECOND)?.trunc();

        Self::new(
            to_i64(whole_months)?,
            to_i64(whole_days)?,
            to_i64(whole_seconds)?,
            to_i64(nanos)?,
        )
    }

    /// Duration from `from` to `to`
    ///
    /// Both values must be of the same temporal kind. Whole months are
    /// counted first, then whole days, then the remaining time. A zoned end
    /// is viewed in the start's zone.
    pub fn between(from: &Value, to: &Value) -> ValueResult<Self> {
        match (from, to) {
            (Value::Date(a), Value::Date(b)) => {
                date_time_between(a.naive().and_time(NaiveTime::MIN), b.naive().and_time(NaiveTime::MIN))
            }
            (Value::LocalTime(a), Value::LocalTime(b)) => {
                Self::of_seconds(0, nano_of_day(b.naive()) - nano_of_day(a.naive()))
            }
            (Value::Time(a), Value::Time(b)) => Self::of_seconds(0, b.utc_nano_of_day() - a.utc_nano_of_day()),
            (Value::LocalDateTime(a), Value::LocalDateTime(b)) => date_time_between(a.naive(), b.naive()),
            (Value::DateTime(a), Value::DateTime(b)) => {
                date_time_between(a.local(), a.zone().local_at(&b.utc())?)
            }
            _ => Err(ValueError::invalid_argument(format!(
                "Cannot compute a duration between {} and {}",
                from.type_name(),
                to.type_name()
            ))),
        }
    }

    // ==================== Arithmetic ====================

    /// Component-wise sum
    pub fn plus(&self, other: &Self) -> ValueResult<Self> {
        let overflow = || ValueError::overflow("duration plus", format!("{self} + {other}"));
        Self::new(
            self.months.checked_add(other.months).ok_or_else(overflow)?,
            self.days.checked_add(other.days).ok_or_else(overflow)?,
            self.seconds.checked_add(other.seconds).ok_or_else(overflow)?,
            i64::from(self.nanos) + i64::from(other.nanos),
        )
    }

    /// Component-wise difference
    pub fn minus(&self, other: &Self) -> ValueResult<Self> {
        self.plus(&other.negate()?)
    }

    /// Negate every component
    pub fn negate(&self) -> ValueResult<Self> {
        let overflow = || ValueError::overflow("duration negate", self.to_string());
        Self::new(
            self.months.checked_neg().ok_or_else(overflow)?,
            self.days.checked_neg().ok_or_else(overflow)?,
            self.seconds.checked_neg().ok_or_else(overflow)?,
            -i64::from(self.nanos),
        )
    }

    /// Multiply every component by an integer factor
    pub fn mul(&self, factor: i64) -> ValueResult<Self> {
        let overflow = || ValueError::overflow("duration multiply", format!("{self} * {factor}"));
        let nanos = i64::from(self.nanos).checked_mul(factor).ok_or_else(overflow)?;
        Self::new(
            self.months.checked_mul(factor).ok_or_else(overflow)?,
            self.days.checked_mul(factor).ok_or_else(overflow)?,
            self.seconds.checked_mul(factor).ok_or_else(overflow)?,
            nanos,
        )
    }

    /// Add to a date, ignoring any part shorter than a day
    pub fn add_to_date(&self, date: NaiveDate) -> ValueResult<NaiveDate> {
        let days = self
            .days
            .checked_add(self.seconds / SECONDS_PER_DAY)
            .ok_or_else(|| out_of_range(date))?;
        let shifted = add_months(date.and_time(NaiveTime::MIN), self.months)?;
        TimeDelta::try_days(days)
            .and_then(|delta| shifted.checked_add_signed(delta))
            .map(|dt| dt.date())
            .ok_or_else(|| out_of_range(date))
    }

    /// Add to a time of day, wrapping at midnight and ignoring months and days
    pub fn add_to_time(&self, time: NaiveTime) -> NaiveTime {
        let shift = i128::from(self.seconds) * i128::from(NANOS_PER_SECOND) + i128::from(self.nanos);
        let nanos = (i128::from(nano_of_day(time)) + shift).rem_euclid(i128::from(NANOS_PER_DAY));
        time_from_nano_of_day(nanos as i64).unwrap_or(time)
    }

    /// Add months and days to a local date-time
    pub fn add_calendar_to(&self, local: NaiveDateTime) -> ValueResult<NaiveDateTime> {
        let shifted = add_months(local, self.months)?;
        TimeDelta::try_days(self.days)
            .and_then(|delta| shifted.checked_add_signed(delta))
            .ok_or_else(|| out_of_range(local))
    }

    /// Add the exact seconds and nanoseconds to a date-time
    pub fn add_exact_to(&self, instant: NaiveDateTime) -> ValueResult<NaiveDateTime> {
        TimeDelta::try_seconds(self.seconds)
            .and_then(|delta| delta.checked_add(&TimeDelta::nanoseconds(i64::from(self.nanos))))
            .and_then(|delta| instant.checked_add_signed(delta))
            .ok_or_else(|| out_of_range(instant))
    }

    /// Add the whole duration to a local date-time
    pub fn add_to_date_time(&self, local: NaiveDateTime) -> ValueResult<NaiveDateTime> {
        self.add_exact_to(self.add_calendar_to(local)?)
    }

    // ==================== Fields ====================

    /// Read a named component
    pub fn get(&self, field: &str) -> ValueResult<Value> {
        let seconds = i128::from(self.seconds);
        let nanos = i128::from(self.nanos);
        let value: i128 = match field.to_ascii_lowercase().as_str() {
            "years" => i128::from(self.months / 12),
            "quarters" => i128::from(self.months / 3),
            "months" => i128::from(self.months),
            "weeks" => i128::from(self.days / 7),
            "days" => i128::from(self.days),
            "hours" => seconds / 3600,
            "minutes" => seconds / 60,
            "seconds" => seconds,
            "milliseconds" => seconds * 1_000 + nanos / 1_000_000,
            "microseconds" => seconds * 1_000_000 + nanos / 1_000,
            "nanoseconds" => seconds * i128::from(NANOS_PER_SECOND) + nanos,
            "quartersofyear" => i128::from(self.months / 3 % 4),
            "monthsofquarter" => i128::from(self.months % 3),
            "monthsofyear" => i128::from(self.months % 12),
            "daysofweek" => i128::from(self.days % 7),
            "minutesofhour" => seconds / 60 % 60,
            "secondsofminute" => seconds % 60,
            "millisecondsofsecond" => nanos / 1_000_000,
            "microsecondsofsecond" => nanos / 1_000,
            "nanosecondsofsecond" => nanos,
            _ => {
                return Err(ValueError::invalid_argument(format!(
                    "No such field for a duration: {field}"
                )));
            }
        };
        i64::try_from(value)
            .map(Value::Long)
            .map_err(|_| ValueError::overflow(format!("duration.{field}"), value.to_string()))
    }

    // ==================== Comparison and hashing ====================

    /// Length in nanoseconds with a month counted as its average length
    pub fn average_length_nanos(&self) -> i128 {
        let seconds = i128::from(self.months) * i128::from(AVG_SECONDS_PER_MONTH)
            + i128::from(self.days) * i128::from(SECONDS_PER_DAY)
            + i128::from(self.seconds);
        seconds * i128::from(NANOS_PER_SECOND) + i128::from(self.nanos)
    }

    /// Total order: average length, then months, days, seconds and nanos
    pub fn compare_to(&self, other: &Self) -> Ordering {
        self.average_length_nanos()
            .cmp(&other.average_length_nanos())
            .then(self.months.cmp(&other.months))
            .then(self.days.cmp(&other.days))
            .then(self.seconds.cmp(&other.seconds))
            .then(self.nanos.cmp(&other.nanos))
    }

    pub fn hash_code(&self) -> i32 {
        hash_array([
            hash_long(self.months),
            hash_long(self.days),
            hash_long(self.seconds),
            self.nanos,
        ])
    }

    pub fn update_hash(&self, hasher: &mut ValueHasher) {
        hasher.update_long(self.months);
        hasher.update_long(self.days);
        hasher.update_long(self.seconds);
        hasher.update_int(self.nanos);
    }

    pub fn write_to<W: ValueWriter + ?Sized>(&self, writer: &mut W) -> Result<(), W::Error> {
        writer.write_duration(self.months, self.days, self.seconds, self.nanos)
    }
}

impl fmt::Display for DurationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_nanos = i128::from(self.seconds) * i128::from(NANOS_PER_SECOND) + i128::from(self.nanos);
        if self.months == 0 && self.days == 0 && total_nanos == 0 {
            return f.write_str("PT0S");
        }

        f.write_str("P")?;
        let (years, months) = (self.months / 12, self.months % 12);
        if years != 0 {
            write!(f, "{years}Y")?;
        }
        if months != 0 {
            write!(f, "{months}M")?;
        }
        if self.days != 0 {
            write!(f, "{}D", self.days)?;
        }
        if total_nanos != 0 {
            f.write_str("T")?;
            let sign = if total_nanos < 0 { "-" } else { "" };
            let abs = total_nanos.unsigned_abs();
            let per_second = NANOS_PER_SECOND as u128;
            let hours = abs / (3600 * per_second);
            let minutes = abs / (60 * per_second) % 60;
            let seconds = abs / per_second % 60;
            let fraction = abs % per_second;
            if hours != 0 {
                write!(f, "{sign}{hours}H")?;
            }
            if minutes != 0 {
                write!(f, "{sign}{minutes}M")?;
            }
            if seconds != 0 || fraction != 0 {
                write!(f, "{sign}{seconds}")?;
                if fraction != 0 {
                    let digits = format!("{fraction:09}");
                    write!(f, ".{}", digits.trim_end_matches('0'))?;
                }
                f.write_str("S")?;
            }
        }
        Ok(())
    }
}

// ==================== Helpers ====================

fn decimal_amount(name: &str, value: &Value) -> ValueResult<Decimal> {
    let invalid = || ValueError::invalid_argument(format!("Duration field {name} must be a number, got {value}"));
    match value.as_numeric().ok_or_else(invalid)? {
        Numeric::Integral(l) => Ok(Decimal::from(l)),
        Numeric::FloatingPoint(d) => Decimal::try_from(d).map_err(|_| invalid()),
    }
}

fn add(a: Decimal, b: Decimal) -> ValueResult<Decimal> {
    a.checked_add(b)
        .ok_or_else(|| ValueError::overflow("duration", format!("{a} + {b}")))
}

fn mul(a: Decimal, factor: i64) -> ValueResult<Decimal> {
    a.checked_mul(Decimal::from(factor))
        .ok_or_else(|| ValueError::overflow("duration", format!("{a} * {factor}")))
}

fn to_i64(d: Decimal) -> ValueResult<i64> {
    d.to_i64()
        .ok_or_else(|| ValueError::overflow("duration", d.to_string()))
}

fn out_of_range(base: impl fmt::Display) -> ValueError {
    ValueError::overflow("temporal plus duration", base.to_string())
}

/// Shift by whole months, clamping the day to the end of the target month
pub(crate) fn add_months(local: NaiveDateTime, months: i64) -> ValueResult<NaiveDateTime> {
    let magnitude = u32::try_from(months.unsigned_abs()).map_err(|_| out_of_range(local))?;
    let shifted = if months >= 0 {
        local.checked_add_months(Months::new(magnitude))
    } else {
        local.checked_sub_months(Months::new(magnitude))
    };
    shifted.ok_or_else(|| out_of_range(local))
}

fn date_time_between(start: NaiveDateTime, end: NaiveDateTime) -> ValueResult<DurationValue> {
    let month_index = |dt: &NaiveDateTime| i64::from(dt.year()) * 12 + i64::from(dt.month0());
    let mut months = month_index(&end) - month_index(&start);
    let mut anchor = add_months(start, months)?;
    if months > 0 && anchor > end {
        months -= 1;
        anchor = add_months(start, months)?;
    } else if months < 0 && anchor < end {
        months += 1;
        anchor = add_months(start, months)?;
    }

    let rest = end - anchor;
    let days = rest.num_days();
    let rest = rest - TimeDelta::days(days);
    DurationValue::new(
        months,
        days,
        rest.num_seconds(),
        i64::from(rest.subsec_nanos()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::temporal::{DateValue, LocalDateTimeValue, LocalTimeValue};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn duration(months: i64, days: i64, seconds: i64, nanos: i64) -> DurationValue {
        DurationValue::new(months, days, seconds, nanos).unwrap()
    }

    #[test]
    fn test_normalises_nanos() {
        let d = duration(0, 0, 0, -500_000_000);
        assert_eq!((d.seconds(), d.nanos()), (-1, 500_000_000));
        let d = duration(0, 0, 1, 2_500_000_000);
        assert_eq!((d.seconds(), d.nanos()), (3, 500_000_000));
    }

    #[rstest]
    #[case("P1Y2M3W4DT5H6M7.5S", duration(14, 25, 18_367, 500_000_000), "P1Y2M25DT5H6M7.5S")]
    #[case("PT0S", DurationValue::ZERO, "PT0S")]
    #[case("-PT0.5S", duration(0, 0, 0, -500_000_000), "PT-0.5S")]
    #[case("P-14M", duration(-14, 0, 0, 0), "P-1Y-2M")]
    #[case("PT90M", duration(0, 0, 5_400, 0), "PT1H30M")]
    #[case("P0.5D", duration(0, 0, 43_200, 0), "PT12H")]
    #[case("P0001-02-03T04:05:06", duration(14, 3, 14_706, 0), "P1Y2M3DT4H5M6S")]
    fn test_parse_and_print(#[case] text: &str, #[case] expected: DurationValue, #[case] printed: &str) {
        let parsed = DurationValue::parse(text).unwrap();
        assert_eq!(parsed, expected);
        assert_eq!(parsed.to_string(), printed);
        assert_eq!(DurationValue::parse(printed).unwrap(), parsed);
    }

    #[test]
    fn test_fractional_month_uses_average_length() {
        let d = DurationValue::parse("P0.5M").unwrap();
        assert_eq!(d.seconds(), AVG_SECONDS_PER_MONTH / 2);
        assert_eq!(d.months(), 0);
    }

    #[test]
    fn test_build_from_fields() {
        let d = DurationValue::build(&[
            ("days", Value::Long(14)),
            ("hours", Value::Double(1.5)),
            ("milliseconds", Value::Int(250)),
        ])
        .unwrap();
        assert_eq!(d, duration(0, 14, 5_400, 250_000_000));
        assert!(DurationValue::build(&[("fortnights", Value::Long(1))])
            .unwrap_err()
            .is_invalid_argument());
        assert!(DurationValue::build(&[("days", Value::Boolean(true))]).is_err());
    }

    #[test]
    fn test_get_fields() {
        let d = duration(14, 10, 3_725, 123_456_789);
        assert_eq!(d.get("years").unwrap(), Value::Long(1));
        assert_eq!(d.get("monthsOfYear").unwrap(), Value::Long(2));
        assert_eq!(d.get("quartersOfYear").unwrap(), Value::Long(0));
        assert_eq!(d.get("weeks").unwrap(), Value::Long(1));
        assert_eq!(d.get("daysOfWeek").unwrap(), Value::Long(3));
        assert_eq!(d.get("hours").unwrap(), Value::Long(1));
        assert_eq!(d.get("minutesOfHour").unwrap(), Value::Long(2));
        assert_eq!(d.get("secondsOfMinute").unwrap(), Value::Long(5));
        assert_eq!(d.get("milliseconds").unwrap(), Value::Long(3_725_123));
        assert_eq!(d.get("nanosecondsOfSecond").unwrap(), Value::Long(123_456_789));
        assert!(d.get("decades").unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_ordering_by_average_length() {
        let month = DurationValue::of_months(1);
        let thirty_days = DurationValue::of_days(30);
        let thirty_one_days = DurationValue::of_days(31);
        assert_eq!(thirty_days.compare_to(&month), Ordering::Less);
        assert_eq!(thirty_one_days.compare_to(&month), Ordering::Greater);

        let day = DurationValue::of_days(1);
        let hours = DurationValue::of_seconds(86_400, 0).unwrap();
        assert_eq!(hours.compare_to(&day), Ordering::Less);
        assert_ne!(day, hours);
    }

    #[test]
    fn test_arithmetic() {
        let a = duration(1, 2, 3, 900_000_000);
        let b = duration(0, 1, 0, 200_000_000);
        assert_eq!(a.plus(&b).unwrap(), duration(1, 3, 4, 100_000_000));
        assert_eq!(a.minus(&a).unwrap(), DurationValue::ZERO);
        assert_eq!(b.mul(3).unwrap(), duration(0, 3, 0, 600_000_000));
        assert!(DurationValue::of_months(i64::MAX).mul(2).is_err());
    }

    #[test]
    fn test_add_months_clamps() {
        let jan31 = NaiveDate::from_ymd_opt(2021, 1, 31).unwrap();
        let d = DurationValue::of_months(1);
        assert_eq!(d.add_to_date(jan31).unwrap(), NaiveDate::from_ymd_opt(2021, 2, 28).unwrap());
    }

    #[test]
    fn test_add_to_time_wraps() {
        let t = NaiveTime::from_hms_opt(23, 0, 0).unwrap();
        let d = DurationValue::of_seconds(7_200, 0).unwrap();
        assert_eq!(d.add_to_time(t), NaiveTime::from_hms_opt(1, 0, 0).unwrap());
        let back = DurationValue::of_seconds(-7_200, 0).unwrap();
        assert_eq!(back.add_to_time(NaiveTime::from_hms_opt(1, 0, 0).unwrap()), t);
    }

    #[test]
    fn test_between() {
        let from = Value::Date(DateValue::of(2021, 1, 31).unwrap());
        let to = Value::Date(DateValue::of(2021, 3, 1).unwrap());
        assert_eq!(DurationValue::between(&from, &to).unwrap(), duration(1, 1, 0, 0));
        assert_eq!(DurationValue::between(&to, &from).unwrap(), duration(-1, -1, 0, 0));

        let from = Value::LocalDateTime(LocalDateTimeValue::parse("2021-01-01T10:00").unwrap());
        let to = Value::LocalDateTime(LocalDateTimeValue::parse("2021-01-02T09:30:00.5").unwrap());
        assert_eq!(DurationValue::between(&from, &to).unwrap(), duration(0, 0, 84_600, 500_000_000));

        let from = Value::LocalTime(LocalTimeValue::parse("10:00").unwrap());
        let to = Value::LocalTime(LocalTimeValue::parse("09:00").unwrap());
        assert_eq!(DurationValue::between(&from, &to).unwrap(), duration(0, 0, -3_600, 0));

        let err = DurationValue::between(&from, &Value::Long(1)).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[rstest]
    #[case(duration(0, 0, 9_223_372_036_854_775, 999_999_999))]
    #[case(duration(0, 0, -9_223_372_036_854_775, -1))]
    #[case(duration(0, 0, i64::MAX, 0))]
    #[case(duration(0, 0, i64::MIN, 0))]
    #[case(duration(0, i64::MAX, 0, 0))]
    #[case(duration(i64::MIN, 0, 0, 0))]
    fn test_extreme_durations_overflow(#[case] huge: DurationValue) {
        let local = LocalDateTimeValue::parse("2020-01-01T00:00").unwrap().naive();
        assert!(huge.add_to_date_time(local).unwrap_err().is_overflow());
        assert!(huge.add_to_date(local.date()).unwrap_err().is_overflow());
    }
}
