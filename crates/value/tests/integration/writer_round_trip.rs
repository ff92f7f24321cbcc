//! Integration test: Writer sinks
//!
//! One nested value pushed through every sink

use pretty_assertions::assert_eq;
use serde_json::json;
use strata_value::prelude::*;
use strata_value::writer::{rebuild, BinaryReader, BinaryWriter, DiscardingWriter, JsonWriter, RecordingWriter};
use strata_value::{CollectionValue, LineValue, PolygonValue};

use crate::common::init_tracing;

fn sample_collection() -> Value {
    let p = |x: f64, y: f64| PointValue::wgs84(x, y).unwrap();
    let polygon = PolygonValue::new(vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 0.0)]).unwrap();
    let line = LineValue::new(p(2.0, 2.0), p(3.0, 3.0)).unwrap();
    Value::Geo(GeoValue::Collection(
        CollectionValue::new(
            Crs::Wgs84,
            vec![GeoValue::Point(p(9.5, 47.0)), GeoValue::Polygon(polygon), GeoValue::Line(line)],
        )
        .unwrap(),
    ))
}

#[test]
fn test_every_sink_agrees() {
    init_tracing();
    let value = sample_collection();

    let mut discard = DiscardingWriter::new();
    value.write_to(&mut discard).unwrap();
    assert!(discard.is_balanced());

    let mut recorder = RecordingWriter::new();
    value.write_to(&mut recorder).unwrap();
    assert_eq!(recorder.events().len(), discard.calls());
    assert_eq!(rebuild(recorder.events()).unwrap(), value);

    let bytes = BinaryWriter::encode(&value).unwrap();
    assert_eq!(BinaryReader::new(ValueLimits::strict()).read(&bytes).unwrap(), value);

    let mut json = JsonWriter::new();
    for event in recorder.events() {
        event.replay(&mut json).unwrap();
    }
    assert_eq!(json.finish().unwrap(), value.to_json().unwrap());
}

#[test]
fn test_collection_json_shape() {
    let json = sample_collection().to_json().unwrap();
    assert_eq!(json["type"], json!("GeometryCollection"));
    assert_eq!(json["srid"], json!(4326));
    let geometries = json["geometries"].as_array().unwrap();
    assert_eq!(geometries.len(), 3);
    assert_eq!(geometries[0]["coordinates"], json!([9.5, 47.0]));
    // already closed rings are not closed twice
    assert_eq!(geometries[1]["coordinates"][0].as_array().unwrap().len(), 4);
    assert_eq!(geometries[2]["type"], json!("LineString"));
}

#[test]
fn test_binary_reader_limits() {
    let big = values::long_array_owned((0..20_000).collect());
    let bytes = BinaryWriter::encode(&big).unwrap();
    let err = BinaryReader::new(ValueLimits::strict()).read(&bytes).unwrap_err();
    assert!(err.is_invalid_argument());
    assert_eq!(BinaryReader::new(ValueLimits::default()).read(&bytes).unwrap(), big);
}

#[test]
fn test_rebuild_rejects_broken_logs() {
    let mut recorder = RecordingWriter::new();
    sample_collection().write_to(&mut recorder).unwrap();
    let events = recorder.into_events();

    assert!(rebuild(&events[1..]).unwrap_err().is_illegal_state());
    assert!(rebuild(&events[..events.len() - 1]).unwrap_err().is_illegal_state());

    let mut doubled = events.clone();
    doubled.extend(events);
    assert!(rebuild(&doubled).unwrap_err().is_illegal_state());
}
