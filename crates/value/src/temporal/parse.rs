//! Text grammars for temporal values
//!
//! Every grammar is an anchored regex compiled once. Failures carry the
//! offending text.

use std::str::FromStr;

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use rust_decimal::Decimal;

use crate::error::{ValueError, ValueResult};
use crate::temporal::zone::parse_offset;

const DATE: &str = r"(?P<year>[-+]\d{4,9}|\d{4})(?:-(?P<month>\d{2})(?:-(?P<day>\d{2}))?|-W(?P<week>\d{2})(?:-(?P<dow>[1-7]))?|-(?P<ordinal>\d{3})|(?P<cmonth>\d{2})(?P<cday>\d{2})|W(?P<cweek>\d{2})(?P<cdow>[1-7])?|(?P<cordinal>\d{3}))?";

const TIME: &str = r"(?P<hour>\d{2})(?::(?P<minute>\d{2})(?::(?P<second>\d{2})(?:[.,](?P<fraction>\d{1,9}))?)?|(?P<cminute>\d{2})(?:(?P<csecond>\d{2})(?:[.,](?P<cfraction>\d{1,9}))?)?)?";

const OFFSET: &str = r"(?P<offset>[Zz]|[-+]\d{2}(?::?\d{2})?)";

const REGION: &str = r"\[(?P<region>[^\]]+)\]";

const NUMBER: &str = r"[-+]?\d+(?:[.,]\d+)?";

static DATE_RE: Lazy<Regex> = Lazy::new(|| compile(&format!("^{DATE}$")));

static LOCAL_TIME_RE: Lazy<Regex> = Lazy::new(|| compile(&format!("^{TIME}$")));

static TIME_RE: Lazy<Regex> =
    Lazy::new(|| compile(&format!("^{TIME}{OFFSET}?(?:{REGION})?$")));

static LOCAL_DATE_TIME_RE: Lazy<Regex> = Lazy::new(|| compile(&format!("^{DATE}[Tt]{TIME}$")));

static DATE_TIME_RE: Lazy<Regex> =
    Lazy::new(|| compile(&format!("^{DATE}[Tt]{TIME}{OFFSET}?(?:{REGION})?$")));

static DURATION_RE: Lazy<Regex> = Lazy::new(|| {
    compile(&format!(
        "(?i)^(?P<sign>[-+]?)P(?:(?P<years>{NUMBER})Y)?(?:(?P<months>{NUMBER})M)?(?:(?P<weeks>{NUMBER})W)?(?:(?P<days>{NUMBER})D)?(?P<t>T(?:(?P<hours>{NUMBER})H)?(?:(?P<minutes>{NUMBER})M)?(?:(?P<seconds>{NUMBER})S)?)?$"
    ))
});

static DURATION_DATE_TIME_RE: Lazy<Regex> = Lazy::new(|| {
    compile(
        r"(?i)^(?P<sign>[-+]?)P(?P<year>\d{4})-(?P<month>\d{2})-(?P<day>\d{2})T(?P<hour>\d{2}):(?P<minute>\d{2}):(?P<second>\d{2})(?:[.,](?P<fraction>\d{1,9}))?$",
    )
});

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid temporal grammar {pattern}: {e}"))
}

fn number<T: FromStr>(caps: &Captures<'_>, name: &str) -> Option<T> {
    caps.name(name).and_then(|m| m.as_str().parse().ok())
}

fn first<T: FromStr>(caps: &Captures<'_>, names: [&str; 2]) -> Option<T> {
    number(caps, names[0]).or_else(|| number(caps, names[1]))
}

/// Weekday from its ISO number, Monday = 1
pub fn iso_weekday(number: u8) -> Option<Weekday> {
    Some(match number {
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        6 => Weekday::Sat,
        7 => Weekday::Sun,
        _ => return None,
    })
}

/// Nanoseconds from a 1 to 9 digit fraction
fn fraction_nanos(digits: &str) -> u32 {
    format!("{digits:0<9}").parse().unwrap_or(0)
}

// ==================== Dates and times ====================

/// Parse a date: `YYYY-MM-DD`, `YYYYMMDD`, `YYYY-MM`, `YYYY-Www-D`,
/// `YYYY-Www`, `YYYY-DDD` or `YYYY`
pub fn parse_date(text: &str) -> ValueResult<NaiveDate> {
    let caps = DATE_RE
        .captures(text)
        .ok_or_else(|| ValueError::parse_error("Date", text))?;
    date_from(&caps).ok_or_else(|| ValueError::parse_error("Date", text))
}

/// Parse a local time: `HH:MM:SS.fffffffff`, `HHMMSS`, `HH:MM`, `HHMM` or `HH`
pub fn parse_local_time(text: &str) -> ValueResult<NaiveTime> {
    let caps = LOCAL_TIME_RE
        .captures(text)
        .ok_or_else(|| ValueError::parse_error("LocalTime", text))?;
    time_from(&caps).ok_or_else(|| ValueError::parse_error("LocalTime", text))
}

/// Parse a time with an optional offset suffix
///
/// A region suffix is rejected: a time of day has no date to resolve a
/// region's offset against.
pub fn parse_time(text: &str) -> ValueResult<(NaiveTime, Option<FixedOffset>)> {
    let caps = TIME_RE
        .captures(text)
        .ok_or_else(|| ValueError::parse_error("Time", text))?;
    if caps.name("region").is_some() {
        return Err(ValueError::invalid_argument(format!(
            "Time cannot carry a named time zone: \"{text}\""
        )));
    }
    let time = time_from(&caps).ok_or_else(|| ValueError::parse_error("Time", text))?;
    Ok((time, offset_from(&caps)?))
}

/// Parse `<date>T<time>` without any zone
pub fn parse_local_date_time(text: &str) -> ValueResult<NaiveDateTime> {
    let caps = LOCAL_DATE_TIME_RE
        .captures(text)
        .ok_or_else(|| ValueError::parse_error("LocalDateTime", text))?;
    match (date_from(&caps), time_from(&caps)) {
        (Some(date), Some(time)) => Ok(date.and_time(time)),
        _ => Err(ValueError::parse_error("LocalDateTime", text)),
    }
}

/// Components of a parsed zoned date-time
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDateTime {
    pub local: NaiveDateTime,
    pub offset: Option<FixedOffset>,
    pub region: Option<String>,
}

/// Parse `<date>T<time>` with optional offset and `[Region/Name]` suffixes
pub fn parse_date_time(text: &str) -> ValueResult<ParsedDateTime> {
    let caps = DATE_TIME_RE
        .captures(text)
        .ok_or_else(|| ValueError::parse_error("DateTime", text))?;
    let (Some(date), Some(time)) = (date_from(&caps), time_from(&caps)) else {
        return Err(ValueError::parse_error("DateTime", text));
    };
    Ok(ParsedDateTime {
        local: date.and_time(time),
        offset: offset_from(&caps)?,
        region: caps.name("region").map(|m| m.as_str().to_string()),
    })
}

fn date_from(caps: &Captures<'_>) -> Option<NaiveDate> {
    let year: i32 = number(caps, "year")?;
    if let Some(week) = first::<u32>(caps, ["week", "cweek"]) {
        let dow = first::<u8>(caps, ["dow", "cdow"]).unwrap_or(1);
        let weekday = iso_weekday(dow)?;
        return NaiveDate::from_isoywd_opt(year, week, weekday);
    }
    if let Some(ordinal) = first::<u32>(caps, ["ordinal", "cordinal"]) {
        return NaiveDate::from_yo_opt(year, ordinal);
    }
    let month = first::<u32>(caps, ["month", "cmonth"]).unwrap_or(1);
    let day = first::<u32>(caps, ["day", "cday"]).unwrap_or(1);
    NaiveDate::from_ymd_opt(year, month, day)
}

fn time_from(caps: &Captures<'_>) -> Option<NaiveTime> {
    let hour: u32 = number(caps, "hour")?;
    let minute = first::<u32>(caps, ["minute", "cminute"]).unwrap_or(0);
    let second = first::<u32>(caps, ["second", "csecond"]).unwrap_or(0);
    let nanos = caps
        .name("fraction")
        .or_else(|| caps.name("cfraction"))
        .map_or(0, |m| fraction_nanos(m.as_str()));
    NaiveTime::from_hms_nano_opt(hour, minute, second, nanos)
}

fn offset_from(caps: &Captures<'_>) -> ValueResult<Option<FixedOffset>> {
    caps.name("offset").map(|m| parse_offset(m.as_str())).transpose()
}

// ==================== Durations ====================

/// Signed, possibly fractional components of a duration text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DurationComponents {
    pub years: Decimal,
    pub months: Decimal,
    pub weeks: Decimal,
    pub days: Decimal,
    pub hours: Decimal,
    pub minutes: Decimal,
    pub seconds: Decimal,
}

/// Parse `PnYnMnWnDTnHnMnS` or the alternative `PYYYY-MM-DDThh:mm:ss` form
pub fn parse_duration(text: &str) -> ValueResult<DurationComponents> {
    if let Some(caps) = DURATION_RE.captures(text) {
        return components_from_units(&caps).ok_or_else(|| ValueError::parse_error("Duration", text));
    }
    if let Some(caps) = DURATION_DATE_TIME_RE.captures(text) {
        return components_from_date_time(&caps).ok_or_else(|| ValueError::parse_error("Duration", text));
    }
    Err(ValueError::parse_error("Duration", text))
}

fn decimal(caps: &Captures<'_>, name: &str) -> Option<Option<Decimal>> {
    match caps.name(name) {
        None => Some(None),
        Some(m) => Decimal::from_str(&m.as_str().replace(',', ".")).ok().map(Some),
    }
}

fn components_from_units(caps: &Captures<'_>) -> Option<DurationComponents> {
    let date = [
        decimal(caps, "years")?,
        decimal(caps, "months")?,
        decimal(caps, "weeks")?,
        decimal(caps, "days")?,
    ];
    let time = [
        decimal(caps, "hours")?,
        decimal(caps, "minutes")?,
        decimal(caps, "seconds")?,
    ];
    let has_time = time.iter().any(Option::is_some);
    if caps.name("t").is_some() && !has_time {
        return None;
    }
    if !has_time && date.iter().all(Option::is_none) {
        return None;
    }

    let components = DurationComponents {
        years: date[0].unwrap_or_default(),
        months: date[1].unwrap_or_default(),
        weeks: date[2].unwrap_or_default(),
        days: date[3].unwrap_or_default(),
        hours: time[0].unwrap_or_default(),
        minutes: time[1].unwrap_or_default(),
        seconds: time[2].unwrap_or_default(),
    };
    Some(apply_sign(caps, components))
}

fn components_from_date_time(caps: &Captures<'_>) -> Option<DurationComponents> {
    let nanos = caps.name("fraction").map_or(0, |m| fraction_nanos(m.as_str()));
    let seconds = Decimal::from(number::<u32>(caps, "second")?) + Decimal::new(i64::from(nanos), 9);
    let components = DurationComponents {
        years: Decimal::from(number::<u32>(caps, "year")?),
        months: Decimal::from(number::<u32>(caps, "month")?),
        weeks: Decimal::ZERO,
        days: Decimal::from(number::<u32>(caps, "day")?),
        hours: Decimal::from(number::<u32>(caps, "hour")?),
        minutes: Decimal::from(number::<u32>(caps, "minute")?),
        seconds,
    };
    Some(apply_sign(caps, components))
}

fn apply_sign(caps: &Captures<'_>, mut components: DurationComponents) -> DurationComponents {
    if caps.name("sign").is_some_and(|m| m.as_str() == "-") {
        for part in [
            &mut components.years,
            &mut components.months,
            &mut components.weeks,
            &mut components.days,
            &mut components.hours,
            &mut components.minutes,
            &mut components.seconds,
        ] {
            *part = -*part;
        }
    }
    components
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case("2015-07-21", ymd(2015, 7, 21))]
    #[case("20150721", ymd(2015, 7, 21))]
    #[case("2015-07", ymd(2015, 7, 1))]
    #[case("2015-W30-2", ymd(2015, 7, 21))]
    #[case("2015W302", ymd(2015, 7, 21))]
    #[case("2015-W30", ymd(2015, 7, 20))]
    #[case("2015-202", ymd(2015, 7, 21))]
    #[case("2015202", ymd(2015, 7, 21))]
    #[case("2015", ymd(2015, 1, 1))]
    #[case("+2015-07-21", ymd(2015, 7, 21))]
    #[case("-0044-03-15", ymd(-44, 3, 15))]
    fn test_parse_date(#[case] text: &str, #[case] expected: NaiveDate) {
        assert_eq!(parse_date(text).unwrap(), expected);
    }

    #[rstest]
    #[case("2015-13-01")]
    #[case("2015-02-30")]
    #[case("15-07-21")]
    #[case("2015-07-21T10:00")]
    #[case("")]
    fn test_parse_date_rejects(#[case] text: &str) {
        let err = parse_date(text).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains(text));
    }

    #[rstest]
    #[case("21:40:32.142", 21, 40, 32, 142_000_000)]
    #[case("214032", 21, 40, 32, 0)]
    #[case("21:40", 21, 40, 0, 0)]
    #[case("2140", 21, 40, 0, 0)]
    #[case("21", 21, 0, 0, 0)]
    #[case("21:40:32,000000001", 21, 40, 32, 1)]
    fn test_parse_local_time(
        #[case] text: &str,
        #[case] h: u32,
        #[case] m: u32,
        #[case] s: u32,
        #[case] n: u32,
    ) {
        assert_eq!(
            parse_local_time(text).unwrap(),
            NaiveTime::from_hms_nano_opt(h, m, s, n).unwrap()
        );
    }

    #[test]
    fn test_local_time_rejects_zone() {
        assert!(parse_local_time("21:40Z").is_err());
        assert!(parse_local_time("24:00").is_err());
    }

    #[test]
    fn test_parse_time_offsets() {
        let (time, offset) = parse_time("21:40:32+01:00").unwrap();
        assert_eq!(time, NaiveTime::from_hms_opt(21, 40, 32).unwrap());
        assert_eq!(offset.map(|o| o.local_minus_utc()), Some(3600));
        assert_eq!(parse_time("2140-0130").unwrap().1.map(|o| o.local_minus_utc()), Some(-5400));
        assert_eq!(parse_time("12:00").unwrap().1, None);
        assert!(parse_time("12:00[Europe/Paris]").unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_parse_date_time() {
        let parsed = parse_date_time("2015-07-21T21:40:32.142+01:00[Europe/London]").unwrap();
        assert_eq!(parsed.local.to_string(), "2015-07-21 21:40:32.142");
        assert_eq!(parsed.offset.map(|o| o.local_minus_utc()), Some(3600));
        assert_eq!(parsed.region.as_deref(), Some("Europe/London"));

        let parsed = parse_date_time("2015-W30-2T2140").unwrap();
        assert_eq!(parsed.offset, None);
        assert_eq!(parsed.region, None);
        assert!(parse_local_date_time("2015-07-21T21:40Z").is_err());
    }

    #[test]
    fn test_parse_duration_units() {
        let c = parse_duration("P1Y2M3W4DT5H6M7.5S").unwrap();
        assert_eq!(c.years, Decimal::from(1));
        assert_eq!(c.weeks, Decimal::from(3));
        assert_eq!(c.seconds, Decimal::new(75, 1));

        let c = parse_duration("-PT1,5H").unwrap();
        assert_eq!(c.hours, Decimal::new(-15, 1));
        assert_eq!(parse_duration("P-1D").unwrap().days, Decimal::from(-1));
    }

    #[test]
    fn test_parse_duration_alternative_form() {
        let c = parse_duration("P0001-02-03T04:05:06.7").unwrap();
        assert_eq!(c.years, Decimal::from(1));
        assert_eq!(c.months, Decimal::from(2));
        assert_eq!(c.days, Decimal::from(3));
        assert_eq!(c.seconds, Decimal::new(67, 1));
    }

    #[rstest]
    #[case("P")]
    #[case("PT")]
    #[case("P1DT")]
    #[case("1D")]
    #[case("P1H")]
    fn test_parse_duration_rejects(#[case] text: &str) {
        assert!(parse_duration(text).unwrap_err().is_invalid_argument());
    }
}
