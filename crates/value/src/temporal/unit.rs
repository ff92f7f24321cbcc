//! Truncation units

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike, Weekday};

use crate::error::{ValueError, ValueResult};
use crate::temporal::fields::{Field, TemporalFields};

/// Unit a temporal value can be truncated to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemporalUnit {
    Millennium,
    Century,
    Decade,
    Year,
    WeekYear,
    Quarter,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
    Microsecond,
}

impl TemporalUnit {
    pub const ALL: [Self; 14] = [
        Self::Millennium,
        Self::Century,
        Self::Decade,
        Self::Year,
        Self::WeekYear,
        Self::Quarter,
        Self::Month,
        Self::Week,
        Self::Day,
        Self::Hour,
        Self::Minute,
        Self::Second,
        Self::Millisecond,
        Self::Microsecond,
    ];

    /// Parse a unit name, ignoring case
    pub fn parse(name: &str) -> ValueResult<Self> {
        Self::ALL
            .into_iter()
            .find(|unit| unit.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| ValueError::invalid_argument(format!("Unsupported unit: {name}")))
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Millennium => "millennium",
            Self::Century => "century",
            Self::Decade => "decade",
            Self::Year => "year",
            Self::WeekYear => "weekYear",
            Self::Quarter => "quarter",
            Self::Month => "month",
            Self::Week => "week",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
            Self::Millisecond => "millisecond",
            Self::Microsecond => "microsecond",
        }
    }

    /// Granularity on the same scale as [`Field::rank`]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Millennium => 0,
            Self::Century => 1,
            Self::Decade => 2,
            Self::Year | Self::WeekYear => 3,
            Self::Quarter => 4,
            Self::Month => 5,
            Self::Week => 6,
            Self::Day => 7,
            Self::Hour => 8,
            Self::Minute => 9,
            Self::Second => 10,
            Self::Millisecond => 11,
            Self::Microsecond => 12,
        }
    }

    /// Whether the unit only touches the date part
    pub const fn is_date_based(self) -> bool {
        self.rank() <= Self::Day.rank()
    }

    /// Truncate a date; units finer than a day are rejected
    pub fn truncate_date(self, date: NaiveDate) -> ValueResult<NaiveDate> {
        let year = date.year();
        let first_of = |year: i32, month: u32| {
            NaiveDate::from_ymd_opt(year, month, 1)
                .ok_or_else(|| ValueError::invalid_argument(format!("Cannot truncate {date} to {self}")))
        };
        match self {
            Self::Millennium => first_of(year.div_euclid(1000) * 1000, 1),
            Self::Century => first_of(year.div_euclid(100) * 100, 1),
            Self::Decade => first_of(year.div_euclid(10) * 10, 1),
            Self::Year => first_of(year, 1),
            Self::WeekYear => NaiveDate::from_isoywd_opt(date.iso_week().year(), 1, Weekday::Mon)
                .ok_or_else(|| ValueError::invalid_argument(format!("Cannot truncate {date} to {self}"))),
            Self::Quarter => first_of(year, date.month0() / 3 * 3 + 1),
            Self::Month => first_of(year, date.month()),
            Self::Week => date
                .checked_sub_signed(TimeDelta::days(i64::from(date.weekday().num_days_from_monday())))
                .ok_or_else(|| ValueError::invalid_argument(format!("Cannot truncate {date} to {self}"))),
            Self::Day => Ok(date),
            _ => Err(ValueError::invalid_argument(format!(
                "Cannot truncate a Date to {self}"
            ))),
        }
    }

    /// Truncate a time of day; `day` yields midnight, coarser units are rejected
    pub fn truncate_time(self, time: NaiveTime) -> ValueResult<NaiveTime> {
        let nanos = time.nanosecond();
        let truncated = match self {
            Self::Day => Some(NaiveTime::MIN),
            Self::Hour => NaiveTime::from_hms_opt(time.hour(), 0, 0),
            Self::Minute => NaiveTime::from_hms_opt(time.hour(), time.minute(), 0),
            Self::Second => NaiveTime::from_hms_opt(time.hour(), time.minute(), time.second()),
            Self::Millisecond => {
                NaiveTime::from_hms_nano_opt(time.hour(), time.minute(), time.second(), nanos / 1_000_000 * 1_000_000)
            }
            Self::Microsecond => {
                NaiveTime::from_hms_nano_opt(time.hour(), time.minute(), time.second(), nanos / 1_000 * 1_000)
            }
            _ => {
                return Err(ValueError::invalid_argument(format!(
                    "Cannot truncate a time of day to {self}"
                )));
            }
        };
        truncated.ok_or_else(|| ValueError::invalid_argument(format!("Cannot truncate {time} to {self}")))
    }

    /// Truncate a local date-time; date-based units reset the time to midnight
    pub fn truncate_date_time(self, local: NaiveDateTime) -> ValueResult<NaiveDateTime> {
        if self.is_date_based() {
            Ok(self.truncate_date(local.date())?.and_time(NaiveTime::MIN))
        } else {
            Ok(local.date().and_time(self.truncate_time(local.time())?))
        }
    }

    /// Check that every override field is strictly finer than this unit
    ///
    /// `timezone` is accepted only when `allow_timezone` is set; base and
    /// epoch fields are never accepted.
    pub fn check_overrides(self, fields: &TemporalFields, allow_timezone: bool) -> ValueResult<()> {
        for field in fields.assigned() {
            match (field, field.rank()) {
                (Field::Timezone, _) if allow_timezone => {}
                (_, Some(rank)) if rank > self.rank() => {}
                _ => {
                    return Err(ValueError::invalid_argument(format!(
                        "Cannot override {} when truncating to {self}",
                        field.name()
                    )));
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for TemporalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TemporalUnit {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(TemporalUnit::Millennium, date(2000, 1, 1))]
    #[case(TemporalUnit::Century, date(2000, 1, 1))]
    #[case(TemporalUnit::Decade, date(2010, 1, 1))]
    #[case(TemporalUnit::Year, date(2017, 1, 1))]
    #[case(TemporalUnit::WeekYear, date(2017, 1, 2))]
    #[case(TemporalUnit::Quarter, date(2017, 10, 1))]
    #[case(TemporalUnit::Month, date(2017, 11, 1))]
    #[case(TemporalUnit::Week, date(2017, 11, 6))]
    #[case(TemporalUnit::Day, date(2017, 11, 11))]
    fn test_truncate_date(#[case] unit: TemporalUnit, #[case] expected: NaiveDate) {
        assert_eq!(unit.truncate_date(date(2017, 11, 11)).unwrap(), expected);
    }

    #[test]
    fn test_negative_years_floor() {
        assert_eq!(TemporalUnit::Century.truncate_date(date(-150, 6, 1)).unwrap(), date(-200, 1, 1));
    }

    #[test]
    fn test_truncate_time() {
        let time = NaiveTime::from_hms_nano_opt(12, 31, 14, 645_876_123).unwrap();
        assert_eq!(
            TemporalUnit::Millisecond.truncate_time(time).unwrap(),
            NaiveTime::from_hms_nano_opt(12, 31, 14, 645_000_000).unwrap()
        );
        assert_eq!(TemporalUnit::Hour.truncate_time(time).unwrap(), NaiveTime::from_hms_opt(12, 0, 0).unwrap());
        assert_eq!(TemporalUnit::Day.truncate_time(time).unwrap(), NaiveTime::MIN);
        assert!(TemporalUnit::Month.truncate_time(time).is_err());
        assert!(TemporalUnit::Hour.truncate_date(date(2017, 1, 1)).is_err());
    }

    #[test]
    fn test_parse_ignores_case() {
        assert_eq!(TemporalUnit::parse("WEEKYEAR").unwrap(), TemporalUnit::WeekYear);
        assert_eq!("millennium".parse::<TemporalUnit>().unwrap(), TemporalUnit::Millennium);
        assert!(TemporalUnit::parse("fortnight").unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_overrides_must_be_finer() {
        let fields = TemporalFields::new().with_day(2);
        assert!(TemporalUnit::Month.check_overrides(&fields, false).is_ok());
        assert!(TemporalUnit::Day.check_overrides(&fields, false).is_err());

        let fields = TemporalFields::new().with_timezone(crate::temporal::ZoneId::utc());
        assert!(TemporalUnit::Day.check_overrides(&fields, false).is_err());
        assert!(TemporalUnit::Day.check_overrides(&fields, true).is_ok());

        let fields = TemporalFields::new().with_epoch_seconds(1);
        assert!(TemporalUnit::Millennium.check_overrides(&fields, true).is_err());
    }
}
