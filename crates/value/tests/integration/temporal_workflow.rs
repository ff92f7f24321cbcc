//! Integration test: Temporal workflow
//!
//! Parse, truncate, shift and persist temporal values end to end

use pretty_assertions::assert_eq;
use strata_value::prelude::*;
use strata_value::temporal::{DateTimeValue, DateValue, TemporalFields, TemporalUnit, TIME_ZONES};
use strata_value::writer::{BinaryReader, BinaryWriter};
use strata_value::DurationValue;

use crate::common::init_tracing;

#[test]
fn test_zone_alias_persists_as_canonical_id() {
    init_tracing();
    let old = ZoneId::region("Asia/Calcutta").unwrap();
    let new = ZoneId::region("Asia/Kolkata").unwrap();
    assert_eq!(old, new);
    assert_eq!(old.region_id(), Some(TIME_ZONES.id_of("Asia/Kolkata").unwrap()));

    let value = Value::DateTime(DateTimeValue::parse("2020-06-01T12:00[Asia/Calcutta]").unwrap());
    let bytes = BinaryWriter::encode(&value).unwrap();
    let decoded = BinaryReader::default().read(&bytes).unwrap();
    assert_eq!(decoded, value);
    assert_eq!(decoded.to_string(), "2020-06-01T12:00:00+05:30[Asia/Kolkata]");
}

#[test]
fn test_zone_table_round_trips_every_id() {
    for name in TIME_ZONES.names() {
        let id = TIME_ZONES.id_of(name).unwrap();
        assert_eq!(ZoneId::region_by_id(id).unwrap().region_id(), Some(id));
    }
}

#[test]
fn test_truncate_then_reapply_fields() {
    let date = DateValue::parse("2017-11-11").unwrap();
    let fields = TemporalFields::new().with_day(5);
    let truncated = date.truncate(TemporalUnit::Month, &fields).unwrap();
    assert_eq!(truncated.to_string(), "2017-11-05");

    let quarter = date.truncate(TemporalUnit::Quarter, &TemporalFields::new()).unwrap();
    assert_eq!(quarter.to_string(), "2017-10-01");
}

#[test]
fn test_duration_between_and_back() -> ValueResult<()> {
    let start = values::date(2020, 1, 31)?;
    let end = values::date(2020, 3, 15)?;
    let between = DurationValue::between(&start, &end)?;
    assert_eq!(between.months(), 1);
    assert_eq!(start.plus(&Value::Duration(between))?, end);
    Ok(())
}

#[test]
fn test_dst_aware_addition() -> ValueResult<()> {
    let zone = ZoneId::region("Europe/Stockholm")?;
    let before = values::date_time(2017, 3, 25, 12, 0, 0, 0, zone)?;
    let next_day = before.plus(&values::duration(0, 1, 0, 0)?)?;
    assert_eq!(next_day.to_string(), "2017-03-26T12:00:00+02:00[Europe/Stockholm]");

    let hours = before.plus(&values::duration(0, 0, 24 * 3600, 0)?)?;
    assert_eq!(hours.to_string(), "2017-03-26T13:00:00+02:00[Europe/Stockholm]");
    Ok(())
}

#[test]
fn test_components_through_value_get() -> ValueResult<()> {
    let dt = values::local_date_time(2015, 7, 21, 21, 40, 32, 142_000_000)?;
    assert_eq!(dt.get("year")?, Value::Long(2015));
    assert_eq!(dt.get("millisecond")?, Value::Long(142));

    let date = values::date(2015, 7, 21)?;
    assert!(date.get("timezone").unwrap_err().is_unsupported());
    Ok(())
}

#[test]
fn test_temporal_json() {
    let value = values::time(10, 15, 0, 0, 3600).unwrap();
    assert_eq!(value.to_json().unwrap(), serde_json::json!("10:15:00+01:00"));
}
