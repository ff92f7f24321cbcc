//! Time of day values, local and with a fixed offset

use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

use chrono::{FixedOffset, NaiveTime, Offset, Timelike, Utc};

use crate::core::hash::ValueHasher;
use crate::core::numbers::{hash_array, hash_long};
use crate::core::value::Value;
use crate::error::{ValueError, ValueResult};
use crate::temporal::parse::{parse_local_time, parse_time};
use crate::temporal::zone::{fixed_offset, format_offset};
use crate::temporal::{
    cannot_select, nano_of_day, time_from_nano_of_day, DurationValue, FieldSource, TemporalFields, TemporalUnit,
    ZoneId, NANOS_PER_SECOND,
};
use crate::writer::ValueWriter;

/// `HH:MM:SS` followed by the fraction without trailing zeros
pub(crate) fn write_time_of_day(f: &mut fmt::Formatter<'_>, time: NaiveTime) -> fmt::Result {
    write!(f, "{:02}:{:02}:{:02}", time.hour(), time.minute(), time.second())?;
    let nanos = time.nanosecond();
    if nanos != 0 {
        let digits = format!("{nanos:09}");
        write!(f, ".{}", digits.trim_end_matches('0'))?;
    }
    Ok(())
}

fn of_components(hour: u32, minute: u32, second: u32, nanosecond: u32) -> ValueResult<NaiveTime> {
    NaiveTime::from_hms_nano_opt(hour, minute, second, nanosecond)
        .filter(|_| i64::from(nanosecond) < NANOS_PER_SECOND)
        .ok_or_else(|| {
            ValueError::invalid_argument(format!(
                "Invalid time: hour={hour}, minute={minute}, second={second}, nanosecond={nanosecond}"
            ))
        })
}

// ==================== LocalTimeValue ====================

/// A time of day without offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocalTimeValue(NaiveTime);

impl LocalTimeValue {
    pub const MIDNIGHT: Self = Self(NaiveTime::MIN);

    pub fn new(time: NaiveTime) -> Self {
        Self(time)
    }

    pub fn of(hour: u32, minute: u32, second: u32, nanosecond: u32) -> ValueResult<Self> {
        of_components(hour, minute, second, nanosecond).map(Self)
    }

    pub fn from_nano_of_day(nanos: i64) -> ValueResult<Self> {
        time_from_nano_of_day(nanos).map(Self)
    }

    pub fn parse(text: &str) -> ValueResult<Self> {
        parse_local_time(text).map(Self)
    }

    /// The local time of day of any value carrying one
    pub fn select(value: &Value) -> ValueResult<Self> {
        match value {
            Value::LocalTime(time) => Ok(*time),
            Value::Time(time) => Ok(Self(time.naive())),
            Value::LocalDateTime(ldt) => Ok(Self(ldt.naive().time())),
            Value::DateTime(dt) => Ok(Self(dt.local().time())),
            other => Err(cannot_select("LocalTime", other)),
        }
    }

    pub fn build(fields: &TemporalFields) -> ValueResult<Self> {
        fields.build_local_time()
    }

    pub fn truncate(&self, unit: TemporalUnit, fields: &TemporalFields) -> ValueResult<Self> {
        unit.check_overrides(fields, false)?;
        let truncated = Self(unit.truncate_time(self.0)?);
        if fields.assigned().is_empty() {
            return Ok(truncated);
        }
        fields.clone().with_time(Value::LocalTime(truncated)).build_local_time()
    }

    #[inline]
    pub fn naive(&self) -> NaiveTime {
        self.0
    }

    #[inline]
    pub fn nano_of_day(&self) -> i64 {
        nano_of_day(self.0)
    }

    pub fn get(&self, field: &str) -> ValueResult<Value> {
        FieldSource {
            type_name: "LocalTime",
            date: None,
            time: Some(self.0),
            offset: None,
            zone: None,
            instant: None,
        }
        .get(field)
    }

    /// Add the time part of a duration, wrapping at midnight
    pub fn plus(&self, duration: &DurationValue) -> Self {
        Self(duration.add_to_time(self.0))
    }

    pub fn minus(&self, duration: &DurationValue) -> ValueResult<Self> {
        Ok(self.plus(&duration.negate()?))
    }

    pub fn compare_to(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }

    pub fn hash_code(&self) -> i32 {
        hash_long(self.nano_of_day())
    }

    pub fn update_hash(&self, hasher: &mut ValueHasher) {
        hasher.update_long(self.nano_of_day());
    }

    pub fn write_to<W: ValueWriter + ?Sized>(&self, writer: &mut W) -> Result<(), W::Error> {
        writer.write_local_time(self.nano_of_day())
    }
}

impl fmt::Display for LocalTimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_time_of_day(f, self.0)
    }
}

impl FromStr for LocalTimeValue {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveTime> for LocalTimeValue {
    fn from(value: NaiveTime) -> Self {
        Self(value)
    }
}

// ==================== TimeValue ====================

/// A time of day at a fixed offset from UTC
///
/// Two times are equal only when both the local time and the offset match;
/// ordering goes by the UTC instant first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeValue {
    time: NaiveTime,
    offset: FixedOffset,
}

impl TimeValue {
    pub fn new(time: NaiveTime, offset: FixedOffset) -> Self {
        Self { time, offset }
    }

    pub fn of(hour: u32, minute: u32, second: u32, nanosecond: u32, offset_seconds: i32) -> ValueResult<Self> {
        Ok(Self::new(
            of_components(hour, minute, second, nanosecond)?,
            fixed_offset(offset_seconds)?,
        ))
    }

    /// Rebuild from the raw writer representation
    pub fn from_raw(nano_of_day: i64, offset_seconds: i32) -> ValueResult<Self> {
        Ok(Self::new(time_from_nano_of_day(nano_of_day)?, fixed_offset(offset_seconds)?))
    }

    /// Parse a time; a missing offset means UTC
    pub fn parse(text: &str) -> ValueResult<Self> {
        Self::parse_with_default_offset(text, Utc.fix())
    }

    pub fn parse_with_default_offset(text: &str, default_offset: FixedOffset) -> ValueResult<Self> {
        let (time, offset) = parse_time(text)?;
        Ok(Self::new(time, offset.unwrap_or(default_offset)))
    }

    /// The offset time of any value carrying a time of day
    ///
    /// Local values take `default_offset`; zoned date-times keep their own.
    pub fn select(value: &Value, default_offset: FixedOffset) -> ValueResult<Self> {
        match value {
            Value::Time(time) => Ok(*time),
            Value::LocalTime(time) => Ok(Self::new(time.naive(), default_offset)),
            Value::LocalDateTime(ldt) => Ok(Self::new(ldt.naive().time(), default_offset)),
            Value::DateTime(dt) => Ok(Self::new(dt.local().time(), dt.offset())),
            other => Err(cannot_select("Time", other)),
        }
    }

    pub fn build(fields: &TemporalFields, default_offset: FixedOffset) -> ValueResult<Self> {
        fields.build_time(default_offset)
    }

    /// Truncate to `unit`; a `timezone` override replaces the offset and
    /// keeps the local time
    pub fn truncate(&self, unit: TemporalUnit, fields: &TemporalFields) -> ValueResult<Self> {
        unit.check_overrides(fields, true)?;
        let offset = match fields.timezone {
            None => self.offset,
            Some(ZoneId::Offset(offset)) => offset,
            Some(zone @ ZoneId::Region(_)) => {
                return Err(ValueError::invalid_argument(format!(
                    "A Time needs a fixed offset, got timezone {zone}"
                )));
            }
        };
        let truncated = Self::new(unit.truncate_time(self.time)?, offset);
        let mut rest = fields.clone();
        rest.timezone = None;
        if rest.assigned().is_empty() {
            return Ok(truncated);
        }
        rest.with_time(Value::Time(truncated)).build_time(offset)
    }

    /// Local time of day
    #[inline]
    pub fn naive(&self) -> NaiveTime {
        self.time
    }

    #[inline]
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Local nanoseconds since midnight
    #[inline]
    pub fn nano_of_day(&self) -> i64 {
        nano_of_day(self.time)
    }

    /// Nanoseconds since midnight UTC; may fall outside one day
    #[inline]
    pub fn utc_nano_of_day(&self) -> i64 {
        self.nano_of_day() - i64::from(self.offset.local_minus_utc()) * NANOS_PER_SECOND
    }

    /// Same instant at another offset
    pub fn with_offset_same_instant(&self, offset: FixedOffset) -> Self {
        let shift = i64::from(offset.local_minus_utc() - self.offset.local_minus_utc()) * NANOS_PER_SECOND;
        let nanos = (self.nano_of_day() + shift).rem_euclid(crate::temporal::NANOS_PER_DAY);
        Self::new(time_from_nano_of_day(nanos).unwrap_or(self.time), offset)
    }

    pub fn get(&self, field: &str) -> ValueResult<Value> {
        FieldSource {
            type_name: "Time",
            date: None,
            time: Some(self.time),
            offset: Some(self.offset),
            zone: None,
            instant: None,
        }
        .get(field)
    }

    pub fn plus(&self, duration: &DurationValue) -> Self {
        Self::new(duration.add_to_time(self.time), self.offset)
    }

    pub fn minus(&self, duration: &DurationValue) -> ValueResult<Self> {
        Ok(self.plus(&duration.negate()?))
    }

    /// UTC instant, then offset
    pub fn compare_to(&self, other: &Self) -> Ordering {
        self.utc_nano_of_day()
            .cmp(&other.utc_nano_of_day())
            .then(self.offset.local_minus_utc().cmp(&other.offset.local_minus_utc()))
    }

    pub fn hash_code(&self) -> i32 {
        hash_array([hash_long(self.utc_nano_of_day()), self.offset.local_minus_utc()])
    }

    pub fn update_hash(&self, hasher: &mut ValueHasher) {
        hasher.update_long(self.utc_nano_of_day());
        hasher.update_int(self.offset.local_minus_utc());
    }

    pub fn write_to<W: ValueWriter + ?Sized>(&self, writer: &mut W) -> Result<(), W::Error> {
        writer.write_time(self.nano_of_day(), self.offset.local_minus_utc())
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_time_of_day(f, self.time)?;
        f.write_str(&format_offset(self.offset))
    }
}

impl FromStr for TimeValue {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::temporal::DateTimeValue;
    use pretty_assertions::assert_eq;

    fn offset(seconds: i32) -> FixedOffset {
        FixedOffset::east_opt(seconds).unwrap()
    }

    #[test]
    fn test_local_time_display_trims_fraction() {
        assert_eq!(LocalTimeValue::parse("12:31:14.5").unwrap().to_string(), "12:31:14.5");
        assert_eq!(LocalTimeValue::parse("1231").unwrap().to_string(), "12:31:00");
        assert_eq!(LocalTimeValue::of(0, 0, 0, 1).unwrap().to_string(), "00:00:00.000000001");
    }

    #[test]
    fn test_local_time_wraps_on_plus() {
        let time = LocalTimeValue::parse("23:00").unwrap();
        let two_hours = DurationValue::parse("PT2H").unwrap();
        assert_eq!(time.plus(&two_hours).to_string(), "01:00:00");
        assert_eq!(time.minus(&DurationValue::parse("PT24H").unwrap()).unwrap(), time);
        assert_eq!(time.plus(&DurationValue::of_days(3)), time);
    }

    #[test]
    fn test_time_parse_defaults_to_utc() {
        let time = TimeValue::parse("12:00").unwrap();
        assert_eq!(time.offset(), offset(0));
        assert_eq!(time.to_string(), "12:00:00Z");
        assert!(TimeValue::parse("12:00[Europe/Paris]").unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_time_orders_by_instant_then_offset() {
        let a = TimeValue::parse("12:00+01:00").unwrap();
        let b = TimeValue::parse("11:00Z").unwrap();
        assert_eq!(a.utc_nano_of_day(), b.utc_nano_of_day());
        assert_ne!(a, b);
        assert_eq!(a.compare_to(&b), Ordering::Greater);

        let later = TimeValue::parse("11:30Z").unwrap();
        assert_eq!(a.compare_to(&later), Ordering::Less);
    }

    #[test]
    fn test_time_select() {
        let dt = Value::DateTime(DateTimeValue::parse("2015-07-21T10:15+02:00").unwrap());
        assert_eq!(TimeValue::select(&dt, offset(0)).unwrap().to_string(), "10:15:00+02:00");

        let local = Value::LocalTime(LocalTimeValue::parse("10:15").unwrap());
        assert_eq!(TimeValue::select(&local, offset(3600)).unwrap().to_string(), "10:15:00+01:00");
        assert_eq!(LocalTimeValue::select(&dt).unwrap().to_string(), "10:15:00");
    }

    #[test]
    fn test_time_truncate_with_zone_override() {
        let time = TimeValue::parse("12:31:14.645+01:00").unwrap();
        let fields = TemporalFields::new().with_timezone(ZoneId::parse("-05:00").unwrap()).with_minute(5);
        assert_eq!(time.truncate(TemporalUnit::Hour, &fields).unwrap().to_string(), "12:05:00-05:00");

        let region = TemporalFields::new().with_timezone(ZoneId::region("Europe/Paris").unwrap());
        assert!(time.truncate(TemporalUnit::Hour, &region).is_err());
    }

    #[test]
    fn test_with_offset_same_instant() {
        let time = TimeValue::parse("00:30+01:00").unwrap();
        let utc = time.with_offset_same_instant(offset(0));
        assert_eq!(utc.to_string(), "23:30:00Z");
        assert_eq!(utc.utc_nano_of_day(), time.utc_nano_of_day() + crate::temporal::NANOS_PER_DAY);
    }

    #[test]
    fn test_fields() {
        let time = TimeValue::parse("12:31:14.645876+01:30").unwrap();
        assert_eq!(time.get("microsecond").unwrap(), Value::Long(645_876));
        assert_eq!(time.get("offsetMinutes").unwrap(), Value::Long(90));
        assert!(time.get("year").unwrap_err().is_unsupported());
    }
}
