//! Building temporal values from partial field maps
//!
//! [`TemporalFields`] holds one optional slot per recognised field. Slots are
//! filled with the typed setters or by name through [`TemporalFields::assign`];
//! nothing is validated until one of the `build_*` methods runs.
//!
//! Building resolves in a fixed order:
//!
//! 1. every assigned field must belong to a capability of the target type
//! 2. conflicting combinations are rejected
//! 3. a base is selected: `datetime`, else `date` and/or `time`, else none
//! 4. the calendar form is chosen: `month/day`, `week/dayOfWeek`,
//!    `quarter/dayOfQuarter` or `ordinalDay`
//! 5. individually assigned fields override the base, the rest default
//!
//! ```rust
//! use strata_value::temporal::TemporalFields;
//!
//! let date = TemporalFields::new().with_year(1984).with_week(10).with_day_of_week(3).build_date()?;
//! assert_eq!(date.to_string(), "1984-03-07");
//! # Ok::<(), strata_value::ValueError>(())
//! ```

use chrono::{Datelike, FixedOffset, NaiveDate, NaiveTime, Timelike};

use crate::core::group::ValueCategory;
use crate::core::value::Value;
use crate::error::{ValueError, ValueResult};
use crate::temporal::parse::iso_weekday;
use crate::temporal::{
    date_time_from_epoch, DateTimeValue, DateValue, LocalDateTimeValue, LocalTimeValue, TimeValue, ZoneId,
    NANOS_PER_SECOND,
};

/// Which groups of fields a target type accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub supports_date: bool,
    pub supports_time: bool,
    pub supports_time_zone: bool,
    pub supports_epoch: bool,
}

impl Capabilities {
    pub const DATE: Self = Self::new(true, false, false, false);
    pub const LOCAL_TIME: Self = Self::new(false, true, false, false);
    pub const TIME: Self = Self::new(false, true, true, false);
    pub const LOCAL_DATE_TIME: Self = Self::new(true, true, false, false);
    pub const DATE_TIME: Self = Self::new(true, true, true, true);

    const fn new(supports_date: bool, supports_time: bool, supports_time_zone: bool, supports_epoch: bool) -> Self {
        Self {
            supports_date,
            supports_time,
            supports_time_zone,
            supports_epoch,
        }
    }
}

/// Recognised field names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Year,
    Quarter,
    Month,
    Week,
    DayOfWeek,
    DayOfQuarter,
    Day,
    OrdinalDay,
    Hour,
    Minute,
    Second,
    Millisecond,
    Microsecond,
    Nanosecond,
    Timezone,
    Date,
    Time,
    DateTime,
    EpochSeconds,
    EpochMillis,
}

impl Field {
    const ALL: [Self; 20] = [
        Self::Year,
        Self::Quarter,
        Self::Month,
        Self::Week,
        Self::DayOfWeek,
        Self::DayOfQuarter,
        Self::Day,
        Self::OrdinalDay,
        Self::Hour,
        Self::Minute,
        Self::Second,
        Self::Millisecond,
        Self::Microsecond,
        Self::Nanosecond,
        Self::Timezone,
        Self::Date,
        Self::Time,
        Self::DateTime,
        Self::EpochSeconds,
        Self::EpochMillis,
    ];

    /// Look up a field by name, ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name().eq_ignore_ascii_case(name))
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Quarter => "quarter",
            Self::Month => "month",
            Self::Week => "week",
            Self::DayOfWeek => "dayOfWeek",
            Self::DayOfQuarter => "dayOfQuarter",
            Self::Day => "day",
            Self::OrdinalDay => "ordinalDay",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
            Self::Millisecond => "millisecond",
            Self::Microsecond => "microsecond",
            Self::Nanosecond => "nanosecond",
            Self::Timezone => "timezone",
            Self::Date => "date",
            Self::Time => "time",
            Self::DateTime => "datetime",
            Self::EpochSeconds => "epochSeconds",
            Self::EpochMillis => "epochMillis",
        }
    }

    /// Granularity, coarse to fine; `None` for fields that are not a calendar
    /// or clock component
    pub const fn rank(self) -> Option<u8> {
        Some(match self {
            Self::Year => 3,
            Self::Quarter => 4,
            Self::Month => 5,
            Self::Week => 6,
            Self::DayOfWeek | Self::DayOfQuarter | Self::Day | Self::OrdinalDay => 7,
            Self::Hour => 8,
            Self::Minute => 9,
            Self::Second => 10,
            Self::Millisecond => 11,
            Self::Microsecond => 12,
            Self::Nanosecond => 13,
            _ => return None,
        })
    }

    const fn is_date_component(self) -> bool {
        matches!(
            self,
            Self::Year
                | Self::Quarter
                | Self::Month
                | Self::Week
                | Self::DayOfWeek
                | Self::DayOfQuarter
                | Self::Day
                | Self::OrdinalDay
        )
    }

    const fn is_time_component(self) -> bool {
        matches!(
            self,
            Self::Hour | Self::Minute | Self::Second | Self::Millisecond | Self::Microsecond | Self::Nanosecond
        )
    }

    fn supported_by(self, caps: Capabilities) -> bool {
        match self {
            Self::Date => caps.supports_date,
            Self::Time => caps.supports_time,
            Self::DateTime => caps.supports_date && caps.supports_time,
            Self::Timezone => caps.supports_time_zone,
            Self::EpochSeconds | Self::EpochMillis => caps.supports_epoch,
            f if f.is_date_component() => caps.supports_date,
            _ => caps.supports_time,
        }
    }
}

/// How the date part is specified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarForm {
    MonthDay,
    WeekDay,
    QuarterDay,
    Ordinal,
}

/// Which value the assigned fields override
#[derive(Debug, Clone, PartialEq)]
pub enum Base {
    None,
    DateTime(Value),
    Parts { date: Option<Value>, time: Option<Value> },
}

/// Partial temporal field map
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemporalFields {
    pub year: Option<i64>,
    pub quarter: Option<i64>,
    pub month: Option<i64>,
    pub week: Option<i64>,
    pub day_of_week: Option<i64>,
    pub day_of_quarter: Option<i64>,
    pub day: Option<i64>,
    pub ordinal_day: Option<i64>,
    pub hour: Option<i64>,
    pub minute: Option<i64>,
    pub second: Option<i64>,
    pub millisecond: Option<i64>,
    pub microsecond: Option<i64>,
    pub nanosecond: Option<i64>,
    pub timezone: Option<ZoneId>,
    pub date: Option<Value>,
    pub time: Option<Value>,
    pub datetime: Option<Value>,
    pub epoch_seconds: Option<i64>,
    pub epoch_millis: Option<i64>,
}

macro_rules! with_fields {
    ($($method:ident => $field:ident),* $(,)?) => {
        $(
            #[must_use]
            pub fn $method(mut self, value: i64) -> Self {
                self.$field = Some(value);
                self
            }
        )*
    };
}

impl TemporalFields {
    /// Create an empty field map
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a field map from `(name, value)` pairs
    pub fn from_pairs(pairs: &[(&str, Value)]) -> ValueResult<Self> {
        let mut fields = Self::new();
        for (name, value) in pairs {
            fields.assign(name, value)?;
        }
        Ok(fields)
    }

    with_fields! {
        with_year => year,
        with_quarter => quarter,
        with_month => month,
        with_week => week,
        with_day_of_week => day_of_week,
        with_day_of_quarter => day_of_quarter,
        with_day => day,
        with_ordinal_day => ordinal_day,
        with_hour => hour,
        with_minute => minute,
        with_second => second,
        with_millisecond => millisecond,
        with_microsecond => microsecond,
        with_nanosecond => nanosecond,
        with_epoch_seconds => epoch_seconds,
        with_epoch_millis => epoch_millis,
    }

    #[must_use]
    pub fn with_timezone(mut self, zone: ZoneId) -> Self {
        self.timezone = Some(zone);
        self
    }

    #[must_use]
    pub fn with_date(mut self, value: Value) -> Self {
        self.date = Some(value);
        self
    }

    #[must_use]
    pub fn with_time(mut self, value: Value) -> Self {
        self.time = Some(value);
        self
    }

    #[must_use]
    pub fn with_datetime(mut self, value: Value) -> Self {
        self.datetime = Some(value);
        self
    }

    /// Assign a field by name
    ///
    /// Calendar and clock fields take integral numbers, `timezone` takes
    /// text, `date` / `time` / `datetime` take temporal values.
    pub fn assign(&mut self, name: &str, value: &Value) -> ValueResult<()> {
        let field = Field::from_name(name)
            .ok_or_else(|| ValueError::invalid_argument(format!("No such field: {name}")))?;
        match field {
            Field::Timezone => {
                let text = value.as_text().ok_or_else(|| wrong_type(field, value))?;
                self.timezone = Some(ZoneId::parse(text)?);
            }
            Field::Date | Field::Time | Field::DateTime => {
                if value.category() != ValueCategory::Temporal {
                    return Err(wrong_type(field, value));
                }
                let slot = match field {
                    Field::Date => &mut self.date,
                    Field::Time => &mut self.time,
                    _ => &mut self.datetime,
                };
                *slot = Some(value.clone());
            }
            _ => {
                let number = value.as_long().ok_or_else(|| wrong_type(field, value))?;
                *self.number_slot(field) = Some(number);
            }
        }
        Ok(())
    }

    fn number_slot(&mut self, field: Field) -> &mut Option<i64> {
        match field {
            Field::Year => &mut self.year,
            Field::Quarter => &mut self.quarter,
            Field::Month => &mut self.month,
            Field::Week => &mut self.week,
            Field::DayOfWeek => &mut self.day_of_week,
            Field::DayOfQuarter => &mut self.day_of_quarter,
            Field::Day => &mut self.day,
            Field::OrdinalDay => &mut self.ordinal_day,
            Field::Hour => &mut self.hour,
            Field::Minute => &mut self.minute,
            Field::Second => &mut self.second,
            Field::Millisecond => &mut self.millisecond,
            Field::Microsecond => &mut self.microsecond,
            Field::Nanosecond => &mut self.nanosecond,
            Field::EpochSeconds => &mut self.epoch_seconds,
            _ => &mut self.epoch_millis,
        }
    }

    /// Fields that hold a value
    pub fn assigned(&self) -> Vec<Field> {
        Field::ALL.into_iter().filter(|f| self.is_assigned(*f)).collect()
    }

    fn is_assigned(&self, field: Field) -> bool {
        match field {
            Field::Year => self.year.is_some(),
            Field::Quarter => self.quarter.is_some(),
            Field::Month => self.month.is_some(),
            Field::Week => self.week.is_some(),
            Field::DayOfWeek => self.day_of_week.is_some(),
            Field::DayOfQuarter => self.day_of_quarter.is_some(),
            Field::Day => self.day.is_some(),
            Field::OrdinalDay => self.ordinal_day.is_some(),
            Field::Hour => self.hour.is_some(),
            Field::Minute => self.minute.is_some(),
            Field::Second => self.second.is_some(),
            Field::Millisecond => self.millisecond.is_some(),
            Field::Microsecond => self.microsecond.is_some(),
            Field::Nanosecond => self.nanosecond.is_some(),
            Field::Timezone => self.timezone.is_some(),
            Field::Date => self.date.is_some(),
            Field::Time => self.time.is_some(),
            Field::DateTime => self.datetime.is_some(),
            Field::EpochSeconds => self.epoch_seconds.is_some(),
            Field::EpochMillis => self.epoch_millis.is_some(),
        }
    }

    // ==================== Validation ====================

    /// Reject fields the target cannot hold and contradictory combinations
    pub fn validate(&self, caps: Capabilities, target: &str) -> ValueResult<()> {
        let assigned = self.assigned();
        if let Some(field) = assigned.iter().find(|f| !f.supported_by(caps)) {
            return Err(ValueError::invalid_argument(format!(
                "Cannot assign {} to a {target}",
                field.name()
            )));
        }

        if self.epoch_seconds.is_some() || self.epoch_millis.is_some() {
            let extra = assigned.iter().find(|f| {
                !matches!(
                    f,
                    Field::EpochSeconds | Field::EpochMillis | Field::Nanosecond | Field::Timezone
                )
            });
            if let Some(field) = extra {
                return Err(conflict("an epoch", field.name()));
            }
            if self.epoch_seconds.is_some() && self.epoch_millis.is_some() {
                return Err(conflict("epochSeconds", "epochMillis"));
            }
        }

        if self.datetime.is_some() {
            if self.date.is_some() {
                return Err(conflict("datetime", "date"));
            }
            if self.time.is_some() {
                return Err(conflict("datetime", "time"));
            }
        }

        self.calendar_form().map(|_| ())
    }

    /// The calendar form in use, if any date component is assigned
    pub fn calendar_form(&self) -> ValueResult<Option<CalendarForm>> {
        let forms = [
            (CalendarForm::MonthDay, self.month.is_some() || self.day.is_some()),
            (CalendarForm::WeekDay, self.week.is_some() || self.day_of_week.is_some()),
            (CalendarForm::QuarterDay, self.quarter.is_some() || self.day_of_quarter.is_some()),
            (CalendarForm::Ordinal, self.ordinal_day.is_some()),
        ];
        let mut used = forms.iter().filter(|(_, used)| *used).map(|(form, _)| *form);
        match (used.next(), used.next()) {
            (Some(a), Some(b)) => Err(ValueError::invalid_argument(format!(
                "Cannot mix {a:?} and {b:?} calendar fields"
            ))),
            (form, _) => Ok(form),
        }
    }

    /// The value the assigned fields override
    pub fn base(&self) -> Base {
        match (&self.datetime, &self.date, &self.time) {
            (Some(dt), _, _) => Base::DateTime(dt.clone()),
            (None, None, None) => Base::None,
            (None, date, time) => Base::Parts {
                date: date.clone(),
                time: time.clone(),
            },
        }
    }

    fn has_time_component(&self) -> bool {
        Field::ALL
            .into_iter()
            .any(|f| f.is_time_component() && self.is_assigned(f))
    }

    // ==================== Resolution ====================

    fn resolve_date(&self, base: Option<NaiveDate>) -> ValueResult<NaiveDate> {
        let form = self.calendar_form()?;
        let date = match base {
            None => {
                let year = self
                    .year
                    .ok_or_else(|| ValueError::invalid_argument("year must be specified"))?;
                let year = to_i32(Field::Year, year)?;
                match form {
                    None | Some(CalendarForm::MonthDay) => {
                        requires(self.day, Field::Day, self.month, Field::Month)?;
                        ymd(year, self.month.unwrap_or(1), self.day.unwrap_or(1))?
                    }
                    Some(CalendarForm::WeekDay) => {
                        requires(self.day_of_week, Field::DayOfWeek, self.week, Field::Week)?;
                        week_date(year, self.week.unwrap_or(1), self.day_of_week.unwrap_or(1))?
                    }
                    Some(CalendarForm::QuarterDay) => {
                        requires(self.day_of_quarter, Field::DayOfQuarter, self.quarter, Field::Quarter)?;
                        quarter_date(year, self.quarter.unwrap_or(1), self.day_of_quarter.unwrap_or(1))?
                    }
                    Some(CalendarForm::Ordinal) => ordinal_date(year, self.ordinal_day.unwrap_or(1))?,
                }
            }
            Some(base) => {
                let year = |y: i32| self.year.map_or(Ok(y), |v| to_i32(Field::Year, v));
                match form {
                    None | Some(CalendarForm::MonthDay) => ymd(
                        year(base.year())?,
                        self.month.unwrap_or(i64::from(base.month())),
                        self.day.unwrap_or(i64::from(base.day())),
                    )?,
                    Some(CalendarForm::WeekDay) => week_date(
                        year(base.iso_week().year())?,
                        self.week.unwrap_or(i64::from(base.iso_week().week())),
                        self.day_of_week
                            .unwrap_or(i64::from(base.weekday().number_from_monday())),
                    )?,
                    Some(CalendarForm::QuarterDay) => {
                        let quarter = i64::from(base.month0() / 3 + 1);
                        let start = quarter_date(base.year(), quarter, 1)?;
                        let day_of_quarter = i64::from(base.ordinal() - start.ordinal() + 1);
                        quarter_date(
                            year(base.year())?,
                            self.quarter.unwrap_or(quarter),
                            self.day_of_quarter.unwrap_or(day_of_quarter),
                        )?
                    }
                    Some(CalendarForm::Ordinal) => ordinal_date(
                        year(base.year())?,
                        self.ordinal_day.unwrap_or(i64::from(base.ordinal())),
                    )?,
                }
            }
        };
        Ok(date)
    }

    fn resolve_time(&self, base: Option<NaiveTime>, required: bool) -> ValueResult<NaiveTime> {
        let sub_second = self.millisecond.is_some() || self.microsecond.is_some() || self.nanosecond.is_some();
        let (hour, minute, second, nanos) = match base {
            None => {
                if self.hour.is_none() {
                    if let Some(field) = self.assigned().into_iter().find(|f| f.is_time_component()) {
                        return Err(ValueError::invalid_argument(format!(
                            "{} cannot be specified without hour",
                            field.name()
                        )));
                    }
                    if required {
                        return Err(ValueError::invalid_argument("hour must be specified"));
                    }
                }
                requires(self.second, Field::Second, self.minute, Field::Minute)?;
                if sub_second && self.second.is_none() {
                    return Err(ValueError::invalid_argument(
                        "sub-second fields cannot be specified without second",
                    ));
                }
                (
                    self.hour.unwrap_or(0),
                    self.minute.unwrap_or(0),
                    self.second.unwrap_or(0),
                    self.sub_second_nanos()?.unwrap_or(0),
                )
            }
            Some(base) => (
                self.hour.unwrap_or(i64::from(base.hour())),
                self.minute.unwrap_or(i64::from(base.minute())),
                self.second.unwrap_or(i64::from(base.second())),
                self.sub_second_nanos()?.unwrap_or(i64::from(base.nanosecond())),
            ),
        };

        let component = |field: Field, v: i64| u32::try_from(v).map_err(|_| out_of_range(field, v));
        NaiveTime::from_hms_nano_opt(
            component(Field::Hour, hour)?,
            component(Field::Minute, minute)?,
            component(Field::Second, second)?,
            component(Field::Nanosecond, nanos)?,
        )
        .filter(|t| t.nanosecond() < NANOS_PER_SECOND as u32)
        .ok_or_else(|| {
            ValueError::invalid_argument(format!(
                "Invalid time: hour={hour}, minute={minute}, second={second}, nanosecond={nanos}"
            ))
        })
    }

    /// Combined sub-second part, if any sub-second field is assigned
    fn sub_second_nanos(&self) -> ValueResult<Option<i64>> {
        let (ms, us, ns) = (self.millisecond, self.microsecond, self.nanosecond);
        if ms.is_none() && us.is_none() && ns.is_none() {
            return Ok(None);
        }
        let check = |field: Field, value: Option<i64>, max: i64| match value {
            Some(v) if !(0..max).contains(&v) => Err(out_of_range(field, v)),
            _ => Ok(value.unwrap_or(0)),
        };
        let ms = check(Field::Millisecond, ms, 1_000)?;
        let us = check(Field::Microsecond, us, if self.millisecond.is_some() { 1_000 } else { 1_000_000 })?;
        let ns_max = if self.microsecond.is_some() {
            1_000
        } else if self.millisecond.is_some() {
            1_000_000
        } else {
            NANOS_PER_SECOND
        };
        let ns = check(Field::Nanosecond, ns, ns_max)?;
        Ok(Some(ms * 1_000_000 + us * 1_000 + ns))
    }

    // ==================== Build ====================

    /// Build a date
    pub fn build_date(&self) -> ValueResult<DateValue> {
        self.validate(Capabilities::DATE, "Date")?;
        let base = self.date.as_ref().map(DateValue::select).transpose()?;
        self.resolve_date(base.map(|d| d.naive())).map(DateValue::new)
    }

    /// Build a local time
    pub fn build_local_time(&self) -> ValueResult<LocalTimeValue> {
        self.validate(Capabilities::LOCAL_TIME, "LocalTime")?;
        let base = self.time.as_ref().map(LocalTimeValue::select).transpose()?;
        self.resolve_time(base.map(|t| t.naive()), true).map(LocalTimeValue::new)
    }

    /// Build a time with offset; `default_offset` applies when neither the
    /// base nor `timezone` carries one
    pub fn build_time(&self, default_offset: FixedOffset) -> ValueResult<TimeValue> {
        self.validate(Capabilities::TIME, "Time")?;
        let base_offset = self.time.as_ref().and_then(offset_of);
        let requested = self
            .timezone
            .map(|zone| match zone {
                ZoneId::Offset(offset) => Ok(offset),
                ZoneId::Region(_) => Err(ValueError::invalid_argument(format!(
                    "A Time needs a fixed offset, got timezone {zone}"
                ))),
            })
            .transpose()?;
        let offset = match (base_offset, requested) {
            (Some(base), Some(requested)) if base != requested => {
                return Err(contradicting_zone(&ZoneId::Offset(base), &ZoneId::Offset(requested)));
            }
            (base, requested) => requested.or(base).unwrap_or(default_offset),
        };

        let base = self.time.as_ref().map(LocalTimeValue::select).transpose()?;
        let time = self.resolve_time(base.map(|t| t.naive()), true)?;
        Ok(TimeValue::new(time, offset))
    }

    /// Build a local date-time
    pub fn build_local_date_time(&self) -> ValueResult<LocalDateTimeValue> {
        self.validate(Capabilities::LOCAL_DATE_TIME, "LocalDateTime")?;
        let (date_base, time_base) = match self.base() {
            Base::DateTime(dt) => {
                let local = LocalDateTimeValue::select(&dt)?.naive();
                (Some(local.date()), Some(local.time()))
            }
            Base::Parts { date, time } => (
                date.as_ref().map(DateValue::select).transpose()?.map(|d| d.naive()),
                time.as_ref().map(LocalTimeValue::select).transpose()?.map(|t| t.naive()),
            ),
            Base::None => (None, None),
        };
        let date = self.resolve_date(date_base)?;
        let time = self.resolve_time(time_base, false)?;
        Ok(LocalDateTimeValue::new(date.and_time(time)))
    }

    /// Build a zoned date-time; `default_zone` applies when neither a base
    /// nor `timezone` carries a zone
    pub fn build_date_time(&self, default_zone: ZoneId) -> ValueResult<DateTimeValue> {
        self.validate(Capabilities::DATE_TIME, "DateTime")?;
        let zone = self.timezone.unwrap_or(default_zone);

        if let Some(millis) = self.epoch_millis {
            let nanos = millis.rem_euclid(1_000) * 1_000_000 + self.nanosecond.unwrap_or(0);
            return self.from_epoch(millis.div_euclid(1_000), nanos, zone);
        }
        if let Some(seconds) = self.epoch_seconds {
            return self.from_epoch(seconds, self.nanosecond.unwrap_or(0), zone);
        }

        let (date_base, time_base, base_zone) = match self.base() {
            Base::DateTime(dt) => {
                let zoned = DateTimeValue::select(&dt, zone)?;
                let local = zoned.local();
                let base_zone = matches!(dt, Value::DateTime(_)).then(|| zoned.zone());
                (Some(local.date()), Some(local.time()), base_zone)
            }
            Base::Parts { date, time } => (
                date.as_ref().map(DateValue::select).transpose()?.map(|d| d.naive()),
                time.as_ref().map(LocalTimeValue::select).transpose()?.map(|t| t.naive()),
                time.as_ref().and_then(offset_of).map(ZoneId::Offset),
            ),
            Base::None => (None, None, None),
        };

        let zone = match (base_zone, self.timezone) {
            (Some(base), Some(requested)) if base != requested => {
                return Err(contradicting_zone(&base, &requested));
            }
            (Some(base), _) => base,
            (None, _) => zone,
        };

        let date = self.resolve_date(date_base)?;
        let time = if date_base.is_some() && time_base.is_none() && !self.has_time_component() {
            NaiveTime::MIN
        } else {
            self.resolve_time(time_base, false)?
        };
        DateTimeValue::from_local(date.and_time(time), zone)
    }

    fn from_epoch(&self, seconds: i64, nanos: i64, zone: ZoneId) -> ValueResult<DateTimeValue> {
        if !(0..NANOS_PER_SECOND).contains(&nanos) {
            return Err(out_of_range(Field::Nanosecond, nanos));
        }
        let utc = date_time_from_epoch(seconds, nanos as u32)?;
        DateTimeValue::from_instant(utc, zone)
    }
}

// ==================== Helpers ====================

fn offset_of(value: &Value) -> Option<FixedOffset> {
    match value {
        Value::Time(t) => Some(t.offset()),
        Value::DateTime(dt) => Some(dt.offset()),
        _ => None,
    }
}

fn wrong_type(field: Field, value: &Value) -> ValueError {
    ValueError::invalid_argument(format!(
        "Field {} cannot be assigned a {}",
        field.name(),
        value.type_name()
    ))
}

fn conflict(a: &str, b: &str) -> ValueError {
    ValueError::invalid_argument(format!("Cannot specify both {a} and {b}"))
}

fn contradicting_zone(base: &ZoneId, requested: &ZoneId) -> ValueError {
    ValueError::invalid_argument(format!(
        "timezone {requested} contradicts the base value's zone {base}"
    ))
}

fn requires(child: Option<i64>, child_field: Field, parent: Option<i64>, parent_field: Field) -> ValueResult<()> {
    if child.is_some() && parent.is_none() {
        Err(ValueError::invalid_argument(format!(
            "{} cannot be specified without {}",
            child_field.name(),
            parent_field.name()
        )))
    } else {
        Ok(())
    }
}

fn out_of_range(field: Field, value: i64) -> ValueError {
    ValueError::invalid_argument(format!("Invalid value for {}: {value}", field.name()))
}

fn to_i32(field: Field, value: i64) -> ValueResult<i32> {
    i32::try_from(value).map_err(|_| out_of_range(field, value))
}

fn to_u32(field: Field, value: i64) -> ValueResult<u32> {
    u32::try_from(value).map_err(|_| out_of_range(field, value))
}

fn ymd(year: i32, month: i64, day: i64) -> ValueResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, to_u32(Field::Month, month)?, to_u32(Field::Day, day)?)
        .ok_or_else(|| ValueError::invalid_argument(format!("Invalid date: year={year}, month={month}, day={day}")))
}

fn week_date(year: i32, week: i64, day_of_week: i64) -> ValueResult<NaiveDate> {
    let weekday = u8::try_from(day_of_week)
        .ok()
        .and_then(iso_weekday)
        .ok_or_else(|| out_of_range(Field::DayOfWeek, day_of_week))?;
    NaiveDate::from_isoywd_opt(year, to_u32(Field::Week, week)?, weekday)
        .ok_or_else(|| ValueError::invalid_argument(format!("Invalid week date: year={year}, week={week}")))
}

fn quarter_date(year: i32, quarter: i64, day_of_quarter: i64) -> ValueResult<NaiveDate> {
    if !(1..=4).contains(&quarter) {
        return Err(out_of_range(Field::Quarter, quarter));
    }
    let start = ymd(year, (quarter - 1) * 3 + 1, 1)?;
    let next = if quarter == 4 {
        ymd(year + 1, 1, 1)?
    } else {
        ymd(year, quarter * 3 + 1, 1)?
    };
    let length = (next - start).num_days();
    if !(1..=length).contains(&day_of_quarter) {
        return Err(out_of_range(Field::DayOfQuarter, day_of_quarter));
    }
    Ok(start + chrono::TimeDelta::days(day_of_quarter - 1))
}

fn ordinal_date(year: i32, ordinal: i64) -> ValueResult<NaiveDate> {
    NaiveDate::from_yo_opt(year, to_u32(Field::OrdinalDay, ordinal)?)
        .ok_or_else(|| out_of_range(Field::OrdinalDay, ordinal))
}
