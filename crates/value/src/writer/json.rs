//! JSON rendering
//!
//! Numbers and text map to their JSON counterparts. Temporal values become
//! ISO-8601 strings, shapes become GeoJSON-like objects carrying the
//! coordinate reference system. Non-finite floats have no JSON form and are
//! rendered as the strings `"NaN"`, `"Infinity"` and `"-Infinity"`.

use serde_json::{json, Map, Number, Value as Json};
use tracing::warn;

use crate::core::Value;
use crate::error::{ValueError, ValueResult};
use crate::geo::{Crs, PointValue};
use crate::scalar::text::checked_utf8;
use crate::temporal::{
    DateTimeValue, DateValue, DurationValue, LocalDateTimeValue, LocalTimeValue, TimeValue, ZoneId,
};
use crate::writer::{ArrayType, ValueWriter};

/// Extension trait for JSON conversion
pub trait ValueJsonExt {
    fn to_json(&self) -> ValueResult<Json>;
}

impl ValueJsonExt for Value {
    fn to_json(&self) -> ValueResult<Json> {
        to_json(self)
    }
}

/// Render a value as JSON
///
/// ```rust
/// use strata_value::values;
/// use strata_value::writer::json::to_json;
///
/// let json = to_json(&values::int_array(&[1, 2]))?;
/// assert_eq!(json, serde_json::json!([1, 2]));
/// # Ok::<(), strata_value::ValueError>(())
/// ```
pub fn to_json(value: &Value) -> ValueResult<Json> {
    let mut writer = JsonWriter::new();
    value.write_to(&mut writer)?;
    writer.finish()
}

enum Frame {
    Array(Vec<Json>),
    Polygon(Vec<Json>),
    Collection(Crs, Vec<Json>),
}

/// Writer producing a [`serde_json::Value`]
#[derive(Default)]
pub struct JsonWriter {
    stack: Vec<Frame>,
    result: Option<Json>,
}

impl JsonWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(self) -> ValueResult<Json> {
        if !self.stack.is_empty() {
            return Err(ValueError::illegal_state("Unclosed frame in JSON output"));
        }
        self.result
            .ok_or_else(|| ValueError::illegal_state("Nothing was written to the JSON writer"))
    }

    fn emit(&mut self, json: Json) -> ValueResult<()> {
        match self.stack.last_mut() {
            Some(Frame::Array(items) | Frame::Polygon(items) | Frame::Collection(_, items)) => items.push(json),
            None if self.result.is_some() => {
                return Err(ValueError::illegal_state("JSON writer received more than one value"));
            }
            None => self.result = Some(json),
        }
        Ok(())
    }

    fn emit_string(&mut self, text: impl Into<String>) -> ValueResult<()> {
        self.emit(Json::String(text.into()))
    }
}

/// JSON number, or a marker string for NaN and the infinities
fn number(value: f64) -> Json {
    Number::from_f64(value).map_or_else(
        || {
            let marker = if value.is_nan() {
                "NaN"
            } else if value > 0.0 {
                "Infinity"
            } else {
                "-Infinity"
            };
            warn!(value = marker, "non-finite number rendered as a JSON string");
            Json::String(marker.to_owned())
        },
        Json::Number,
    )
}

fn coordinates(point: &PointValue) -> Json {
    Json::Array(point.coordinate().iter().map(|c| number(*c)).collect())
}

fn shape(kind: &str, crs: Crs) -> Map<String, Json> {
    let mut map = Map::new();
    map.insert("type".to_owned(), Json::from(kind));
    map.insert("crs".to_owned(), Json::from(crs.name()));
    map.insert("srid".to_owned(), Json::from(crs.code()));
    map
}

impl ValueWriter for JsonWriter {
    type Error = ValueError;

    fn write_null(&mut self) -> ValueResult<()> {
        self.emit(Json::Null)
    }

    fn write_boolean(&mut self, value: bool) -> ValueResult<()> {
        self.emit(Json::Bool(value))
    }

    fn write_byte(&mut self, value: i8) -> ValueResult<()> {
        self.emit(Json::from(value))
    }

    fn write_short(&mut self, value: i16) -> ValueResult<()> {
        self.emit(Json::from(value))
    }

    fn write_int(&mut self, value: i32) -> ValueResult<()> {
        self.emit(Json::from(value))
    }

    fn write_long(&mut self, value: i64) -> ValueResult<()> {
        self.emit(Json::from(value))
    }

    fn write_float(&mut self, value: f32) -> ValueResult<()> {
        // the shortest decimal form of the f32, not its exact f64 widening
        let widened = value.to_string().parse::<f64>().unwrap_or_else(|_| f64::from(value));
        self.emit(number(widened))
    }

    fn write_double(&mut self, value: f64) -> ValueResult<()> {
        self.emit(number(value))
    }

    fn write_char(&mut self, value: char) -> ValueResult<()> {
        self.emit_string(value.to_string())
    }

    fn write_string(&mut self, value: &str) -> ValueResult<()> {
        self.emit_string(value)
    }

    fn write_utf8(&mut self, bytes: &[u8]) -> ValueResult<()> {
        self.emit_string(checked_utf8(bytes)?)
    }

    fn begin_array(&mut self, len: usize, _array_type: ArrayType) -> ValueResult<()> {
        self.stack.push(Frame::Array(Vec::with_capacity(len)));
        Ok(())
    }

    fn end_array(&mut self) -> ValueResult<()> {
        match self.stack.pop() {
            Some(Frame::Array(items)) => self.emit(Json::Array(items)),
            _ => Err(ValueError::illegal_state("end_array without matching begin_array")),
        }
    }

    fn write_date(&mut self, epoch_day: i64) -> ValueResult<()> {
        self.emit_string(DateValue::from_epoch_day(epoch_day)?.to_string())
    }

    fn write_local_time(&mut self, nano_of_day: i64) -> ValueResult<()> {
        self.emit_string(LocalTimeValue::from_nano_of_day(nano_of_day)?.to_string())
    }

    fn write_time(&mut self, nano_of_day: i64, offset_seconds: i32) -> ValueResult<()> {
        self.emit_string(TimeValue::from_raw(nano_of_day, offset_seconds)?.to_string())
    }

    fn write_local_date_time(&mut self, epoch_second: i64, nano: u32) -> ValueResult<()> {
        self.emit_string(LocalDateTimeValue::from_epoch(epoch_second, nano)?.to_string())
    }

    fn write_date_time(&mut self, epoch_second: i64, nano: u32, offset_seconds: i32) -> ValueResult<()> {
        let zone = ZoneId::offset_seconds(offset_seconds)?;
        self.emit_string(DateTimeValue::from_epoch(epoch_second, nano, zone)?.to_string())
    }

    fn write_date_time_zone(&mut self, epoch_second: i64, nano: u32, zone_id: u16) -> ValueResult<()> {
        let zone = ZoneId::region_by_id(zone_id)?;
        self.emit_string(DateTimeValue::from_epoch(epoch_second, nano, zone)?.to_string())
    }

    fn write_duration(&mut self, months: i64, days: i64, seconds: i64, nanos: i32) -> ValueResult<()> {
        self.emit_string(DurationValue::new(months, days, seconds, i64::from(nanos))?.to_string())
    }

    fn write_point(&mut self, crs: Crs, coordinate: &[f64]) -> ValueResult<()> {
        let mut map = shape("Point", crs);
        map.insert(
            "coordinates".to_owned(),
            Json::Array(coordinate.iter().map(|c| number(*c)).collect()),
        );
        self.emit(Json::Object(map))
    }

    fn write_line(&mut self, start: &PointValue, end: &PointValue) -> ValueResult<()> {
        let mut map = shape("LineString", start.crs());
        map.insert("coordinates".to_owned(), json!([coordinates(start), coordinates(end)]));
        self.emit(Json::Object(map))
    }

    fn write_rect(&mut self, lower_left: &PointValue, upper_right: &PointValue) -> ValueResult<()> {
        let mut map = shape("BBox", lower_left.crs());
        map.insert(
            "bbox".to_owned(),
            Json::Array(
                lower_left
                    .coordinate()
                    .iter()
                    .chain(upper_right.coordinate())
                    .map(|c| number(*c))
                    .collect(),
            ),
        );
        self.emit(Json::Object(map))
    }

    fn write_circle(&mut self, center: &PointValue, radius: f64) -> ValueResult<()> {
        let mut map = shape("Circle", center.crs());
        map.insert("coordinates".to_owned(), coordinates(center));
        map.insert("radius".to_owned(), number(radius));
        self.emit(Json::Object(map))
    }

    fn begin_polygon(&mut self, vertices: usize) -> ValueResult<()> {
        self.stack.push(Frame::Polygon(Vec::with_capacity(vertices)));
        Ok(())
    }

    fn end_polygon(&mut self) -> ValueResult<()> {
        let Some(Frame::Polygon(points)) = self.stack.pop() else {
            return Err(ValueError::illegal_state("end_polygon without matching begin_polygon"));
        };
        let crs = points
            .first()
            .and_then(|p| p.get("crs"))
            .cloned()
            .unwrap_or(Json::Null);
        let srid = points
            .first()
            .and_then(|p| p.get("srid"))
            .cloned()
            .unwrap_or(Json::Null);
        let mut ring: Vec<Json> = points
            .into_iter()
            .filter_map(|mut p| p.get_mut("coordinates").map(Json::take))
            .collect();
        // GeoJSON rings repeat the first position at the end
        if let (Some(first), Some(last)) = (ring.first(), ring.last()) {
            if first != last {
                ring.push(first.clone());
            }
        }
        self.emit(json!({
            "type": "Polygon",
            "crs": crs,
            "srid": srid,
            "coordinates": [ring],
        }))
    }

    fn begin_collection(&mut self, len: usize, crs: Crs) -> ValueResult<()> {
        self.stack.push(Frame::Collection(crs, Vec::with_capacity(len)));
        Ok(())
    }

    fn end_collection(&mut self) -> ValueResult<()> {
        let Some(Frame::Collection(crs, geometries)) = self.stack.pop() else {
            return Err(ValueError::illegal_state(
                "end_collection without matching begin_collection",
            ));
        };
        let mut map = shape("GeometryCollection", crs);
        map.insert("geometries".to_owned(), Json::Array(geometries));
        self.emit(Json::Object(map))
    }
}
