//! Calendar date value

use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

use chrono::NaiveDate;

use crate::core::hash::ValueHasher;
use crate::core::numbers::hash_long;
use crate::core::value::Value;
use crate::error::{ValueError, ValueResult};
use crate::temporal::parse::parse_date;
use crate::temporal::{
    cannot_select, date_from_epoch_day, epoch_day, DurationValue, FieldSource, TemporalFields, TemporalUnit,
};
use crate::writer::ValueWriter;

/// A date without time of day or zone
///
/// ```rust
/// use strata_value::temporal::DateValue;
///
/// let date = DateValue::parse("2015-W30-2")?;
/// assert_eq!(date, DateValue::of(2015, 7, 21)?);
/// assert_eq!(date.epoch_day(), 16_637);
/// # Ok::<(), strata_value::ValueError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateValue(NaiveDate);

impl DateValue {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Create a date from calendar components
    pub fn of(year: i32, month: u32, day: u32) -> ValueResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| ValueError::invalid_argument(format!("Invalid date: year={year}, month={month}, day={day}")))
    }

    /// Create a date from days since 1970-01-01
    pub fn from_epoch_day(day: i64) -> ValueResult<Self> {
        date_from_epoch_day(day).map(Self)
    }

    /// Parse any of the supported date notations
    pub fn parse(text: &str) -> ValueResult<Self> {
        parse_date(text).map(Self)
    }

    /// The date part of a date, local date-time or zoned date-time
    ///
    /// Zoned date-times contribute their local date.
    pub fn select(value: &Value) -> ValueResult<Self> {
        match value {
            Value::Date(date) => Ok(*date),
            Value::LocalDateTime(ldt) => Ok(Self(ldt.naive().date())),
            Value::DateTime(dt) => Ok(Self(dt.local().date())),
            other => Err(cannot_select("Date", other)),
        }
    }

    /// Build a date from a field map
    pub fn build(fields: &TemporalFields) -> ValueResult<Self> {
        fields.build_date()
    }

    /// Truncate to `unit`, then apply the finer `fields`
    pub fn truncate(&self, unit: TemporalUnit, fields: &TemporalFields) -> ValueResult<Self> {
        unit.check_overrides(fields, false)?;
        let truncated = Self(unit.truncate_date(self.0)?);
        if fields.assigned().is_empty() {
            return Ok(truncated);
        }
        fields.clone().with_date(Value::Date(truncated)).build_date()
    }

    #[inline]
    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    /// Days since 1970-01-01
    #[inline]
    pub fn epoch_day(&self) -> i64 {
        epoch_day(self.0)
    }

    /// Read a calendar field such as `year`, `week` or `dayOfQuarter`
    pub fn get(&self, field: &str) -> ValueResult<Value> {
        FieldSource {
            type_name: "Date",
            date: Some(self.0),
            time: None,
            offset: None,
            zone: None,
            instant: None,
        }
        .get(field)
    }

    /// Add a duration; only whole days count
    pub fn plus(&self, duration: &DurationValue) -> ValueResult<Self> {
        duration.add_to_date(self.0).map(Self)
    }

    pub fn minus(&self, duration: &DurationValue) -> ValueResult<Self> {
        self.plus(&duration.negate()?)
    }

    pub fn compare_to(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }

    pub fn hash_code(&self) -> i32 {
        hash_long(self.epoch_day())
    }

    pub fn update_hash(&self, hasher: &mut ValueHasher) {
        hasher.update_long(self.epoch_day());
    }

    pub fn write_to<W: ValueWriter + ?Sized>(&self, writer: &mut W) -> Result<(), W::Error> {
        writer.write_date(self.epoch_day())
    }
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for DateValue {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for DateValue {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::temporal::{DateTimeValue, LocalDateTimeValue, LocalTimeValue};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("2015-07-21")]
    #[case("20150721")]
    #[case("2015-W30-2")]
    #[case("2015W302")]
    #[case("2015-202")]
    fn test_parse_notations(#[case] text: &str) {
        assert_eq!(DateValue::parse(text).unwrap(), DateValue::of(2015, 7, 21).unwrap());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = DateValue::parse("2015-13-01").unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("2015-13-01"));
    }

    #[test]
    fn test_epoch_day_round_trip() {
        let date = DateValue::of(1969, 12, 31).unwrap();
        assert_eq!(date.epoch_day(), -1);
        assert_eq!(DateValue::from_epoch_day(-1).unwrap(), date);
        assert_eq!(DateValue::from_epoch_day(0).unwrap().to_string(), "1970-01-01");
    }

    #[test]
    fn test_select() {
        let ldt = Value::LocalDateTime(LocalDateTimeValue::parse("2015-07-21T23:30").unwrap());
        assert_eq!(DateValue::select(&ldt).unwrap().to_string(), "2015-07-21");

        let dt = Value::DateTime(DateTimeValue::parse("2015-07-21T23:30-05:00").unwrap());
        assert_eq!(DateValue::select(&dt).unwrap().to_string(), "2015-07-21");

        let time = Value::LocalTime(LocalTimeValue::parse("12:00").unwrap());
        assert!(DateValue::select(&time).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_plus_duration_ignores_time() {
        let date = DateValue::of(2015, 1, 31).unwrap();
        let month = DurationValue::of_months(1);
        assert_eq!(date.plus(&month).unwrap().to_string(), "2015-02-28");

        let almost_two_days = DurationValue::parse("P1DT47H").unwrap();
        assert_eq!(date.plus(&almost_two_days).unwrap().to_string(), "2015-02-02");
        assert_eq!(date.minus(&DurationValue::of_days(31)).unwrap().to_string(), "2014-12-31");
    }

    #[test]
    fn test_truncate_with_overrides() {
        let date = DateValue::of(2017, 11, 11).unwrap();
        let fields = TemporalFields::new().with_day(5);
        assert_eq!(date.truncate(TemporalUnit::Month, &fields).unwrap().to_string(), "2017-11-05");

        let fields = TemporalFields::new().with_day_of_week(2);
        assert_eq!(date.truncate(TemporalUnit::Week, &fields).unwrap().to_string(), "2017-11-07");

        let fields = TemporalFields::new().with_month(2);
        assert!(date.truncate(TemporalUnit::Month, &fields).is_err());
        assert!(date.truncate(TemporalUnit::Hour, &TemporalFields::new()).is_err());
    }

    #[test]
    fn test_fields() {
        let date = DateValue::of(2015, 7, 21).unwrap();
        assert_eq!(date.get("week").unwrap(), Value::Long(30));
        assert_eq!(date.get("ordinalDay").unwrap(), Value::Long(202));
        assert!(date.get("timezone").unwrap_err().is_unsupported());
    }
}
