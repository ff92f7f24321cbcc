//! Temporal values
//!
//! Dates, times of day (local and offset), date-times (local and zoned) and
//! durations, built on `chrono` and `chrono-tz`.
//!
//! ## Construction
//!
//! Every temporal type can be built
//!
//! - directly from calendar components (`DateValue::of(2015, 7, 21)`)
//! - from text (`DateValue::parse("2015-W30-2")`)
//! - by selecting the overlapping part of another temporal value
//!   (`DateValue::select(&date_time)`)
//! - from a partial field map ([`TemporalFields`])
//!
//! and truncated to a [`TemporalUnit`], optionally reapplying finer fields.

pub mod date;
pub mod datetime;
pub mod duration;
pub mod fields;
pub mod parse;
pub mod time;
pub mod unit;
pub mod zone;

pub use date::DateValue;
pub use datetime::{DateTimeValue, LocalDateTimeValue};
pub use duration::DurationValue;
pub use fields::{Capabilities, TemporalFields};
pub use time::{LocalTimeValue, TimeValue};
pub use unit::TemporalUnit;
pub use zone::{RegionZone, TimeZoneTable, ZoneId, TIME_ZONES};

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::core::value::Value;
use crate::error::{ValueError, ValueResult};
use crate::scalar::TextValue;
use crate::temporal::zone::format_offset;

pub const NANOS_PER_SECOND: i64 = 1_000_000_000;
pub const SECONDS_PER_DAY: i64 = 86_400;
pub const NANOS_PER_DAY: i64 = NANOS_PER_SECOND * SECONDS_PER_DAY;

/// Days from 0001-01-01 to 1970-01-01
const UNIX_EPOCH_DAYS_FROM_CE: i64 = 719_163;

// ==================== Raw conversions ====================

/// Nanoseconds since midnight
#[inline]
pub fn nano_of_day(time: NaiveTime) -> i64 {
    i64::from(time.num_seconds_from_midnight()) * NANOS_PER_SECOND + i64::from(time.nanosecond())
}

/// Time of day from nanoseconds since midnight
pub fn time_from_nano_of_day(nanos: i64) -> ValueResult<NaiveTime> {
    if !(0..NANOS_PER_DAY).contains(&nanos) {
        return Err(ValueError::invalid_argument(format!(
            "Nanosecond of day {nanos} is out of range"
        )));
    }
    let seconds = (nanos / NANOS_PER_SECOND) as u32;
    let nano = (nanos % NANOS_PER_SECOND) as u32;
    NaiveTime::from_num_seconds_from_midnight_opt(seconds, nano)
        .ok_or_else(|| ValueError::invalid_argument(format!("Nanosecond of day {nanos} is out of range")))
}

/// Days since 1970-01-01
#[inline]
pub fn epoch_day(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce()) - UNIX_EPOCH_DAYS_FROM_CE
}

/// Date from days since 1970-01-01
pub fn date_from_epoch_day(day: i64) -> ValueResult<NaiveDate> {
    day.checked_add(UNIX_EPOCH_DAYS_FROM_CE)
        .and_then(|days| i32::try_from(days).ok())
        .and_then(NaiveDate::from_num_days_from_ce_opt)
        .ok_or_else(|| ValueError::invalid_argument(format!("Epoch day {day} is out of range")))
}

/// Seconds since 1970-01-01T00:00 of a date-time read as UTC
#[inline]
pub fn epoch_second(date_time: &NaiveDateTime) -> i64 {
    date_time.and_utc().timestamp()
}

/// Date-time from seconds since the epoch and a nanosecond adjustment
pub fn date_time_from_epoch(second: i64, nano: u32) -> ValueResult<NaiveDateTime> {
    if i64::from(nano) >= NANOS_PER_SECOND {
        return Err(ValueError::invalid_argument(format!("Nanosecond {nano} is out of range")));
    }
    DateTime::from_timestamp(second, nano)
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| ValueError::invalid_argument(format!("Epoch second {second} is out of range")))
}

// ==================== Field access ====================

const DATE_FIELDS: [&str; 10] = [
    "year",
    "quarter",
    "month",
    "week",
    "weekyear",
    "dayofquarter",
    "day",
    "ordinalday",
    "dayofweek",
    "weekday",
];

const TIME_FIELDS: [&str; 6] = ["hour", "minute", "second", "millisecond", "microsecond", "nanosecond"];

const ZONE_FIELDS: [&str; 4] = ["timezone", "offset", "offsetminutes", "offsetseconds"];

const EPOCH_FIELDS: [&str; 2] = ["epochseconds", "epochmillis"];

/// The components a temporal value exposes through `get(field)`
#[derive(Debug, Clone, Copy)]
pub(crate) struct FieldSource<'a> {
    pub type_name: &'static str,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub offset: Option<FixedOffset>,
    pub zone: Option<&'a ZoneId>,
    pub instant: Option<&'a NaiveDateTime>,
}

impl FieldSource<'_> {
    /// Read a field; unknown names are invalid, absent components unsupported
    pub fn get(&self, field: &str) -> ValueResult<Value> {
        let name = field.to_ascii_lowercase();
        let found = self
            .date
            .and_then(|date| date_field(date, &name))
            .or_else(|| self.time.and_then(|time| time_field(time, &name)))
            .or_else(|| self.zone_field(&name))
            .or_else(|| self.instant.and_then(|utc| epoch_field(utc, &name)));
        if let Some(value) = found {
            return Ok(value);
        }

        let known = [&DATE_FIELDS[..], &TIME_FIELDS, &ZONE_FIELDS, &EPOCH_FIELDS]
            .iter()
            .any(|group| group.contains(&name.as_str()));
        if known {
            Err(ValueError::unsupported(format!("get {field}"), self.type_name))
        } else {
            Err(ValueError::invalid_argument(format!("No such field: {field}")))
        }
    }

    fn zone_field(&self, name: &str) -> Option<Value> {
        let offset = self.offset?;
        let seconds = offset.local_minus_utc();
        Some(match name {
            "timezone" => match self.zone {
                Some(zone) => Value::Text(TextValue::new(zone.name())),
                None => Value::Text(TextValue::new(format_offset(offset))),
            },
            "offset" => Value::Text(TextValue::new(format_offset(offset))),
            "offsetminutes" => Value::Long(i64::from(seconds / 60)),
            "offsetseconds" => Value::Long(i64::from(seconds)),
            _ => return None,
        })
    }
}

fn date_field(date: NaiveDate, name: &str) -> Option<Value> {
    let quarter = date.month0() / 3;
    let value = match name {
        "year" => i64::from(date.year()),
        "quarter" => i64::from(quarter + 1),
        "month" => i64::from(date.month()),
        "week" => i64::from(date.iso_week().week()),
        "weekyear" => i64::from(date.iso_week().year()),
        "dayofquarter" => {
            let start = NaiveDate::from_ymd_opt(date.year(), quarter * 3 + 1, 1)?;
            i64::from(date.ordinal() - start.ordinal() + 1)
        }
        "day" => i64::from(date.day()),
        "ordinalday" => i64::from(date.ordinal()),
        "dayofweek" | "weekday" => i64::from(date.weekday().number_from_monday()),
        _ => return None,
    };
    Some(Value::Long(value))
}

fn time_field(time: NaiveTime, name: &str) -> Option<Value> {
    let nano = i64::from(time.nanosecond());
    let value = match name {
        "hour" => i64::from(time.hour()),
        "minute" => i64::from(time.minute()),
        "second" => i64::from(time.second()),
        "millisecond" => nano / 1_000_000,
        "microsecond" => nano / 1_000,
        "nanosecond" => nano,
        _ => return None,
    };
    Some(Value::Long(value))
}

fn epoch_field(utc: &NaiveDateTime, name: &str) -> Option<Value> {
    match name {
        "epochseconds" => Some(Value::Long(epoch_second(utc))),
        "epochmillis" => Some(Value::Long(utc.and_utc().timestamp_millis())),
        _ => None,
    }
}

pub(crate) fn cannot_select(target: &str, from: &Value) -> ValueError {
    ValueError::invalid_argument(format!("Cannot select a {target} from {}", from.type_name()))
}
