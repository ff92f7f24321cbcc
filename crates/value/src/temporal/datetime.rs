//! Date-time values, local and zoned
//!
//! A [`DateTimeValue`] stores the UTC instant and the zone it is viewed in.
//! Two zoned values of the same instant in different zones order next to
//! each other but are not equal.

use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};

use crate::core::hash::ValueHasher;
use crate::core::numbers::{hash_array, hash_long};
use crate::core::value::Value;
use crate::error::{ValueError, ValueResult};
use crate::scalar::text::hash_code_points;
use crate::temporal::parse::{parse_date_time, parse_local_date_time};
use crate::temporal::time::write_time_of_day;
use crate::temporal::zone::{format_offset, MAX_OFFSET_SECONDS};
use crate::temporal::{
    cannot_select, date_time_from_epoch, epoch_second, DurationValue, FieldSource, TemporalFields, TemporalUnit,
    ZoneId,
};
use crate::writer::ValueWriter;

fn invalid_components(date: impl fmt::Display) -> ValueError {
    ValueError::invalid_argument(format!("Invalid date-time components: {date}"))
}

/// Zoned instants stay at least the largest offset away from the range limits
fn check_instant(utc: NaiveDateTime) -> ValueResult<NaiveDateTime> {
    let margin = TimeDelta::seconds(i64::from(MAX_OFFSET_SECONDS));
    match (utc.checked_sub_signed(margin), utc.checked_add_signed(margin)) {
        (Some(_), Some(_)) => Ok(utc),
        _ => Err(ValueError::invalid_argument(format!(
            "Instant {utc} is outside the zoned date-time range"
        ))),
    }
}

// ==================== LocalDateTimeValue ====================

/// A date and time of day without zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocalDateTimeValue(NaiveDateTime);

impl LocalDateTimeValue {
    pub fn new(local: NaiveDateTime) -> Self {
        Self(local)
    }

    pub fn of(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32, nanosecond: u32) -> ValueResult<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| invalid_components(format!("{year}-{month}-{day}")))?;
        let time = NaiveTime::from_hms_nano_opt(hour, minute, second, nanosecond)
            .filter(|_| nanosecond < 1_000_000_000)
            .ok_or_else(|| invalid_components(format!("{hour}:{minute}:{second}.{nanosecond}")))?;
        Ok(Self(date.and_time(time)))
    }

    /// Create from seconds since the epoch and a nanosecond adjustment
    pub fn from_epoch(epoch_second: i64, nano: u32) -> ValueResult<Self> {
        date_time_from_epoch(epoch_second, nano).map(Self)
    }

    pub fn parse(text: &str) -> ValueResult<Self> {
        parse_local_date_time(text).map(Self)
    }

    /// The local date-time of a local or zoned date-time, or a date at midnight
    pub fn select(value: &Value) -> ValueResult<Self> {
        match value {
            Value::LocalDateTime(ldt) => Ok(*ldt),
            Value::DateTime(dt) => Ok(Self(dt.local())),
            Value::Date(date) => Ok(Self(date.naive().and_time(NaiveTime::MIN))),
            other => Err(cannot_select("LocalDateTime", other)),
        }
    }

    pub fn build(fields: &TemporalFields) -> ValueResult<Self> {
        fields.build_local_date_time()
    }

    pub fn truncate(&self, unit: TemporalUnit, fields: &TemporalFields) -> ValueResult<Self> {
        unit.check_overrides(fields, false)?;
        let truncated = Self(unit.truncate_date_time(self.0)?);
        if fields.assigned().is_empty() {
            return Ok(truncated);
        }
        fields
            .clone()
            .with_datetime(Value::LocalDateTime(truncated))
            .build_local_date_time()
    }

    #[inline]
    pub fn naive(&self) -> NaiveDateTime {
        self.0
    }

    /// Seconds since 1970-01-01T00:00, reading the local value as UTC
    #[inline]
    pub fn epoch_second(&self) -> i64 {
        epoch_second(&self.0)
    }

    #[inline]
    pub fn nano(&self) -> u32 {
        self.0.nanosecond()
    }

    pub fn get(&self, field: &str) -> ValueResult<Value> {
        FieldSource {
            type_name: "LocalDateTime",
            date: Some(self.0.date()),
            time: Some(self.0.time()),
            offset: None,
            zone: None,
            instant: None,
        }
        .get(field)
    }

    pub fn plus(&self, duration: &DurationValue) -> ValueResult<Self> {
        duration.add_to_date_time(self.0).map(Self)
    }

    pub fn minus(&self, duration: &DurationValue) -> ValueResult<Self> {
        self.plus(&duration.negate()?)
    }

    pub fn compare_to(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }

    pub fn hash_code(&self) -> i32 {
        hash_array([hash_long(self.epoch_second()), self.nano() as i32])
    }

    pub fn update_hash(&self, hasher: &mut ValueHasher) {
        hasher.update_long(self.epoch_second());
        hasher.update_int(self.nano() as i32);
    }

    pub fn write_to<W: ValueWriter + ?Sized>(&self, writer: &mut W) -> Result<(), W::Error> {
        writer.write_local_date_time(self.epoch_second(), self.nano())
    }
}

impl fmt::Display for LocalDateTimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}T", self.0.date())?;
        write_time_of_day(f, self.0.time())
    }
}

impl FromStr for LocalDateTimeValue {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDateTime> for LocalDateTimeValue {
    fn from(value: NaiveDateTime) -> Self {
        Self(value)
    }
}

// ==================== DateTimeValue ====================

/// An instant viewed in a time zone
///
/// ```rust
/// use strata_value::temporal::{DateTimeValue, ZoneId};
///
/// let dt = DateTimeValue::parse("2015-07-21T21:40:32.142+01:00[Europe/London]")?;
/// assert_eq!(dt.epoch_second(), 1_437_511_232);
///
/// let paris = dt.with_zone_same_instant(ZoneId::region("Europe/Paris")?);
/// assert_eq!(paris.to_string(), "2015-07-21T22:40:32.142+02:00[Europe/Paris]");
/// # Ok::<(), strata_value::ValueError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateTimeValue {
    utc: NaiveDateTime,
    zone: ZoneId,
}

impl DateTimeValue {
    /// Resolve a local date-time in `zone`
    ///
    /// Local times inside a transition gap move forward; ambiguous local
    /// times take the earlier offset.
    pub fn from_local(local: NaiveDateTime, zone: ZoneId) -> ValueResult<Self> {
        Self::from_instant(zone.resolve_local(&local)?, zone)
    }

    /// View a UTC instant in `zone`
    ///
    /// Instants within 18 hours of the representable limits are rejected so
    /// that the wall clock exists under every offset.
    pub fn from_instant(utc: NaiveDateTime, zone: ZoneId) -> ValueResult<Self> {
        Ok(Self {
            utc: check_instant(utc)?,
            zone,
        })
    }

    pub fn from_epoch(epoch_second: i64, nano: u32, zone: ZoneId) -> ValueResult<Self> {
        Self::from_instant(date_time_from_epoch(epoch_second, nano)?, zone)
    }

    /// Parse a date-time; a missing zone means UTC
    pub fn parse(text: &str) -> ValueResult<Self> {
        Self::parse_with_default_zone(text, ZoneId::utc())
    }

    /// Parse a date-time, falling back to `default_zone`
    ///
    /// With both an offset and a region the offset must be valid for the
    /// region at that local time.
    pub fn parse_with_default_zone(text: &str, default_zone: ZoneId) -> ValueResult<Self> {
        let parsed = parse_date_time(text)?;
        match (parsed.offset, parsed.region.as_deref()) {
            (Some(offset), Some(region)) => {
                let zone = ZoneId::region(region)?;
                let utc = zone.resolve_local_with_offset(&parsed.local, offset)?;
                Self::from_instant(utc, zone)
            }
            (None, Some(region)) => Self::from_local(parsed.local, ZoneId::region(region)?),
            (Some(offset), None) => Self::from_local(parsed.local, ZoneId::Offset(offset)),
            (None, None) => Self::from_local(parsed.local, default_zone),
        }
    }

    /// The zoned date-time of a zoned value, or a local one in `default_zone`
    ///
    /// Dates select midnight.
    pub fn select(value: &Value, default_zone: ZoneId) -> ValueResult<Self> {
        match value {
            Value::DateTime(dt) => Ok(*dt),
            Value::LocalDateTime(ldt) => Self::from_local(ldt.naive(), default_zone),
            Value::Date(date) => Self::from_local(date.naive().and_time(NaiveTime::MIN), default_zone),
            other => Err(cannot_select("DateTime", other)),
        }
    }

    pub fn build(fields: &TemporalFields, default_zone: ZoneId) -> ValueResult<Self> {
        fields.build_date_time(default_zone)
    }

    /// Truncate the local date-time to `unit`
    ///
    /// A `timezone` override moves the truncated local date-time into that
    /// zone before the remaining fields apply.
    pub fn truncate(&self, unit: TemporalUnit, fields: &TemporalFields) -> ValueResult<Self> {
        unit.check_overrides(fields, true)?;
        let zone = fields.timezone.unwrap_or(self.zone);
        let truncated = Self::from_local(unit.truncate_date_time(self.local())?, zone)?;
        let mut rest = fields.clone();
        rest.timezone = None;
        if rest.assigned().is_empty() {
            return Ok(truncated);
        }
        rest.with_datetime(Value::DateTime(truncated)).build_date_time(zone)
    }

    /// The instant as a UTC date-time
    #[inline]
    pub fn utc(&self) -> NaiveDateTime {
        self.utc
    }

    #[inline]
    pub fn zone(&self) -> ZoneId {
        self.zone
    }

    /// Offset in effect at this instant
    pub fn offset(&self) -> FixedOffset {
        self.zone.offset_at(&self.utc)
    }

    /// Wall-clock date-time in the zone
    pub fn local(&self) -> NaiveDateTime {
        // in range by construction
        self.zone.local_at(&self.utc).unwrap_or(self.utc)
    }

    #[inline]
    pub fn epoch_second(&self) -> i64 {
        epoch_second(&self.utc)
    }

    #[inline]
    pub fn nano(&self) -> u32 {
        self.utc.nanosecond()
    }

    /// Same instant, other zone
    pub fn with_zone_same_instant(&self, zone: ZoneId) -> Self {
        Self { utc: self.utc, zone }
    }

    /// Same wall-clock date-time, other zone
    pub fn with_zone_same_local(&self, zone: ZoneId) -> ValueResult<Self> {
        Self::from_local(self.local(), zone)
    }

    pub fn get(&self, field: &str) -> ValueResult<Value> {
        let local = self.local();
        FieldSource {
            type_name: "DateTime",
            date: Some(local.date()),
            time: Some(local.time()),
            offset: Some(self.offset()),
            zone: Some(&self.zone),
            instant: Some(&self.utc),
        }
        .get(field)
    }

    /// Add months and days on the wall clock, then the exact time
    pub fn plus(&self, duration: &DurationValue) -> ValueResult<Self> {
        let local = duration.add_calendar_to(self.local())?;
        let utc = duration.add_exact_to(self.zone.resolve_local(&local)?)?;
        Self::from_instant(utc, self.zone)
    }

    pub fn minus(&self, duration: &DurationValue) -> ValueResult<Self> {
        self.plus(&duration.negate()?)
    }

    /// Instant, then offset, then zone name
    pub fn compare_to(&self, other: &Self) -> Ordering {
        self.utc
            .cmp(&other.utc)
            .then_with(|| {
                self.offset()
                    .local_minus_utc()
                    .cmp(&other.offset().local_minus_utc())
            })
            .then_with(|| self.zone.name().cmp(&other.zone.name()))
    }

    pub fn hash_code(&self) -> i32 {
        let zone = match self.zone {
            ZoneId::Offset(offset) => offset.local_minus_utc(),
            ZoneId::Region(region) => hash_code_points(region.name().chars()),
        };
        hash_array([hash_long(self.epoch_second()), self.nano() as i32, zone])
    }

    pub fn update_hash(&self, hasher: &mut ValueHasher) {
        hasher.update_long(self.epoch_second());
        hasher.update_int(self.nano() as i32);
        match self.zone {
            ZoneId::Offset(offset) => hasher.update_int(offset.local_minus_utc()),
            ZoneId::Region(region) => hasher.update_text(region.name()),
        }
    }

    pub fn write_to<W: ValueWriter + ?Sized>(&self, writer: &mut W) -> Result<(), W::Error> {
        match self.zone {
            ZoneId::Offset(offset) => {
                writer.write_date_time(self.epoch_second(), self.nano(), offset.local_minus_utc())
            }
            ZoneId::Region(region) => writer.write_date_time_zone(self.epoch_second(), self.nano(), region.id()),
        }
    }
}

impl fmt::Display for DateTimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let local = self.local();
        write!(f, "{}T", local.date())?;
        write_time_of_day(f, local.time())?;
        f.write_str(&format_offset(self.offset()))?;
        if let ZoneId::Region(region) = self.zone {
            write!(f, "[{}]", region.name())?;
        }
        Ok(())
    }
}

impl FromStr for DateTimeValue {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::temporal::DateValue;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn zone(name: &str) -> ZoneId {
        ZoneId::parse(name).unwrap()
    }

    #[test]
    fn test_local_date_time_epoch() {
        let ldt = LocalDateTimeValue::parse("1970-01-02T00:00:01.5").unwrap();
        assert_eq!(ldt.epoch_second(), 86_401);
        assert_eq!(ldt.nano(), 500_000_000);
        assert_eq!(LocalDateTimeValue::from_epoch(86_401, 500_000_000).unwrap(), ldt);
        assert_eq!(ldt.to_string(), "1970-01-02T00:00:01.5");
    }

    #[test]
    fn test_local_date_time_select() {
        let date = Value::Date(DateValue::of(2015, 7, 21).unwrap());
        assert_eq!(LocalDateTimeValue::select(&date).unwrap().to_string(), "2015-07-21T00:00:00");
        let dt = Value::DateTime(DateTimeValue::parse("2015-07-21T10:00+05:00").unwrap());
        assert_eq!(LocalDateTimeValue::select(&dt).unwrap().to_string(), "2015-07-21T10:00:00");
    }

    #[test]
    fn test_parse_zone_forms() {
        let offset_only = DateTimeValue::parse("2015-07-21T21:40+01:00").unwrap();
        assert_eq!(offset_only.zone(), zone("+01:00"));
        assert_eq!(offset_only.to_string(), "2015-07-21T21:40:00+01:00");

        let region_only = DateTimeValue::parse("2015-07-21T21:40[Europe/London]").unwrap();
        assert_eq!(region_only.utc(), offset_only.utc());
        assert_eq!(region_only.to_string(), "2015-07-21T21:40:00+01:00[Europe/London]");

        let both = DateTimeValue::parse("2015-07-21T21:40+01:00[Europe/London]").unwrap();
        assert_eq!(both, region_only);

        let mismatch = DateTimeValue::parse("2015-07-21T21:40+03:00[Europe/London]");
        assert!(mismatch.unwrap_err().is_invalid_argument());

        let default = DateTimeValue::parse_with_default_zone("2015-07-21T21:40", zone("Asia/Tokyo")).unwrap();
        assert_eq!(default.offset().local_minus_utc(), 9 * 3600);
    }

    #[test]
    fn test_alias_resolves_to_canonical_zone() {
        let dt = DateTimeValue::parse("2015-07-21T21:40[GB]").unwrap();
        assert_eq!(dt.zone(), zone("Europe/London"));
    }

    #[test]
    fn test_same_instant_different_zone() {
        let london = DateTimeValue::parse("2015-07-21T21:40[Europe/London]").unwrap();
        let paris = london.with_zone_same_instant(zone("Europe/Paris"));
        assert_ne!(london, paris);
        assert_eq!(london.utc(), paris.utc());
        assert_eq!(london.compare_to(&paris), Ordering::Less);

        let moved = london.with_zone_same_local(zone("Europe/Paris")).unwrap();
        assert_eq!(moved.local(), london.local());
        assert_eq!(moved.compare_to(&london), Ordering::Less);
    }

    #[test]
    fn test_plus_across_dst() {
        let before = DateTimeValue::parse("2017-03-25T12:00[Europe/Stockholm]").unwrap();
        let day = DurationValue::of_days(1);
        assert_eq!(before.plus(&day).unwrap().to_string(), "2017-03-26T12:00:00+02:00[Europe/Stockholm]");

        let hours = DurationValue::parse("PT24H").unwrap();
        assert_eq!(before.plus(&hours).unwrap().to_string(), "2017-03-26T13:00:00+02:00[Europe/Stockholm]");
    }

    #[test]
    fn test_gap_moves_forward() {
        let dt = DateTimeValue::parse("2017-03-26T02:30[Europe/Stockholm]").unwrap();
        assert_eq!(dt.to_string(), "2017-03-26T03:30:00+02:00[Europe/Stockholm]");
    }

    #[test]
    fn test_truncate_with_zone() {
        let dt = DateTimeValue::parse("2017-11-11T12:31:14+01:00[Europe/Stockholm]").unwrap();
        let fields = TemporalFields::new().with_timezone(zone("America/New_York")).with_hour(3);
        let truncated = dt.truncate(TemporalUnit::Day, &fields).unwrap();
        assert_eq!(truncated.to_string(), "2017-11-11T03:00:00-05:00[America/New_York]");

        let year = dt.truncate(TemporalUnit::Year, &TemporalFields::new()).unwrap();
        assert_eq!(year.to_string(), "2017-01-01T00:00:00+01:00[Europe/Stockholm]");
    }

    #[rstest]
    #[case(DurationValue::new(0, 0, 9_223_372_036_854_775, 999_999_999).unwrap())]
    #[case(DurationValue::new(0, 0, -9_223_372_036_854_775, -999_999_999).unwrap())]
    #[case(DurationValue::of_seconds(9_000_000_000_000, 0).unwrap())]
    #[case(DurationValue::of_days(100_000_000))]
    #[case(DurationValue::of_months(4_000_000))]
    fn test_extreme_duration_is_error(#[case] huge: DurationValue) {
        let local = LocalDateTimeValue::parse("2020-01-01T00:00").unwrap();
        assert!(local.plus(&huge).unwrap_err().is_overflow());
        assert!(local.minus(&huge).is_err());

        let zoned = DateTimeValue::parse("2020-01-01T00:00[Europe/Oslo]").unwrap();
        assert!(zoned.plus(&huge).is_err());
        assert!(zoned.minus(&huge).is_err());
    }

    #[test]
    fn test_instants_near_range_limits() {
        let plus_18 = zone("+18:00");
        assert!(DateTimeValue::from_instant(NaiveDateTime::MAX, plus_18).unwrap_err().is_invalid_argument());
        assert!(DateTimeValue::from_instant(NaiveDateTime::MIN, ZoneId::utc()).is_err());
        assert!(DateTimeValue::from_local(NaiveDateTime::MAX, zone("-01:00")).is_err());
        assert!(DateTimeValue::from_local(NaiveDateTime::MIN, zone("Europe/Oslo")).is_err());

        let edge = NaiveDateTime::MAX - TimeDelta::hours(18);
        let dt = DateTimeValue::from_instant(edge, plus_18).unwrap();
        assert_eq!(dt.local(), NaiveDateTime::MAX);
        assert!(dt.to_string().ends_with("+18:00"));
        assert!(dt.plus(&DurationValue::of_seconds(1, 0).unwrap()).is_err());
        assert_eq!(dt.with_zone_same_instant(zone("-18:00")).utc(), edge);
    }

    #[test]
    fn test_fields() {
        let dt = DateTimeValue::parse("1970-01-01T01:00:00.250+01:00[Europe/Paris]").unwrap();
        assert_eq!(dt.get("epochMillis").unwrap(), Value::Long(250));
        assert_eq!(dt.get("hour").unwrap(), Value::Long(1));
        assert_eq!(dt.get("timezone").unwrap().to_string(), "'Europe/Paris'");
        assert_eq!(dt.get("offsetSeconds").unwrap(), Value::Long(3600));
    }
}
