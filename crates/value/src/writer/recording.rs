//! Recording writer and value reconstruction
//!
//! [`RecordingWriter`] keeps every call as a [`WriteEvent`]. [`ValueBuilder`]
//! is the inverse of `Value::write_to`: it accepts the same call sequence and
//! assembles the value again. [`rebuild`] replays a recorded log into one.

use core::convert::Infallible;

use tracing::trace;

use crate::array::ArrayValue;
use crate::core::{Value, ValueLimits};
use crate::error::{ValueError, ValueResult};
use crate::geo::{CircleValue, CollectionValue, Crs, GeoValue, LineValue, PointValue, PolygonValue, RectValue};
use crate::scalar::TextValue;
use crate::temporal::{
    DateTimeValue, DateValue, DurationValue, LocalDateTimeValue, LocalTimeValue, TimeValue, ZoneId,
};
use crate::writer::{ArrayType, ValueWriter};

/// One writer call, with owned arguments
#[derive(Debug, Clone, PartialEq)]
pub enum WriteEvent {
    Null,
    Boolean(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Char(char),
    String(String),
    /// Raw text bytes, checked when replayed
    Utf8(Vec<u8>),
    BeginArray { len: usize, array_type: ArrayType },
    EndArray,
    Date { epoch_day: i64 },
    LocalTime { nano_of_day: i64 },
    Time { nano_of_day: i64, offset_seconds: i32 },
    LocalDateTime { epoch_second: i64, nano: u32 },
    DateTime { epoch_second: i64, nano: u32, offset_seconds: i32 },
    DateTimeZone { epoch_second: i64, nano: u32, zone_id: u16 },
    Duration { months: i64, days: i64, seconds: i64, nanos: i32 },
    Point { crs: Crs, coordinate: Vec<f64> },
    Line { start: PointValue, end: PointValue },
    Rect { lower_left: PointValue, upper_right: PointValue },
    Circle { center: PointValue, radius: f64 },
    BeginPolygon { vertices: usize },
    EndPolygon,
    BeginCollection { len: usize, crs: Crs },
    EndCollection,
}

impl WriteEvent {
    /// Issue this call against another writer
    pub fn replay<W: ValueWriter + ?Sized>(&self, writer: &mut W) -> Result<(), W::Error> {
        match self {
            Self::Null => writer.write_null(),
            Self::Boolean(v) => writer.write_boolean(*v),
            Self::Byte(v) => writer.write_byte(*v),
            Self::Short(v) => writer.write_short(*v),
            Self::Int(v) => writer.write_int(*v),
            Self::Long(v) => writer.write_long(*v),
            Self::Float(v) => writer.write_float(*v),
            Self::Double(v) => writer.write_double(*v),
            Self::Char(v) => writer.write_char(*v),
            Self::String(v) => writer.write_string(v),
            Self::Utf8(v) => writer.write_utf8(v),
            Self::BeginArray { len, array_type } => writer.begin_array(*len, *array_type),
            Self::EndArray => writer.end_array(),
            Self::Date { epoch_day } => writer.write_date(*epoch_day),
            Self::LocalTime { nano_of_day } => writer.write_local_time(*nano_of_day),
            Self::Time {
                nano_of_day,
                offset_seconds,
            } => writer.write_time(*nano_of_day, *offset_seconds),
            Self::LocalDateTime { epoch_second, nano } => writer.write_local_date_time(*epoch_second, *nano),
            Self::DateTime {
                epoch_second,
                nano,
                offset_seconds,
            } => writer.write_date_time(*epoch_second, *nano, *offset_seconds),
            Self::DateTimeZone {
                epoch_second,
                nano,
                zone_id,
            } => writer.write_date_time_zone(*epoch_second, *nano, *zone_id),
            Self::Duration {
                months,
                days,
                seconds,
                nanos,
            } => writer.write_duration(*months, *days, *seconds, *nanos),
            Self::Point { crs, coordinate } => writer.write_point(*crs, coordinate),
            Self::Line { start, end } => writer.write_line(start, end),
            Self::Rect {
                lower_left,
                upper_right,
            } => writer.write_rect(lower_left, upper_right),
            Self::Circle { center, radius } => writer.write_circle(center, *radius),
            Self::BeginPolygon { vertices } => writer.begin_polygon(*vertices),
            Self::EndPolygon => writer.end_polygon(),
            Self::BeginCollection { len, crs } => writer.begin_collection(*len, *crs),
            Self::EndCollection => writer.end_collection(),
        }
    }
}

/// Writer that records every call
#[derive(Debug, Clone, Default)]
pub struct RecordingWriter {
    events: Vec<WriteEvent>,
}

impl RecordingWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[WriteEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<WriteEvent> {
        self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Rebuild the recorded value
    pub fn rebuild(&self) -> ValueResult<Value> {
        rebuild(&self.events)
    }

    fn record(&mut self, event: WriteEvent) -> Result<(), Infallible> {
        self.events.push(event);
        Ok(())
    }
}

impl ValueWriter for RecordingWriter {
    type Error = Infallible;

    fn write_null(&mut self) -> Result<(), Self::Error> {
        self.record(WriteEvent::Null)
    }

    fn write_boolean(&mut self, value: bool) -> Result<(), Self::Error> {
        self.record(WriteEvent::Boolean(value))
    }

    fn write_byte(&mut self, value: i8) -> Result<(), Self::Error> {
        self.record(WriteEvent::Byte(value))
    }

    fn write_short(&mut self, value: i16) -> Result<(), Self::Error> {
        self.record(WriteEvent::Short(value))
    }

    fn write_int(&mut self, value: i32) -> Result<(), Self::Error> {
        self.record(WriteEvent::Int(value))
    }

    fn write_long(&mut self, value: i64) -> Result<(), Self::Error> {
        self.record(WriteEvent::Long(value))
    }

    fn write_float(&mut self, value: f32) -> Result<(), Self::Error> {
        self.record(WriteEvent::Float(value))
    }

    fn write_double(&mut self, value: f64) -> Result<(), Self::Error> {
        self.record(WriteEvent::Double(value))
    }

    fn write_char(&mut self, value: char) -> Result<(), Self::Error> {
        self.record(WriteEvent::Char(value))
    }

    fn write_string(&mut self, value: &str) -> Result<(), Self::Error> {
        self.record(WriteEvent::String(value.to_owned()))
    }

    fn write_utf8(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.record(WriteEvent::Utf8(bytes.to_vec()))
    }

    fn begin_array(&mut self, len: usize, array_type: ArrayType) -> Result<(), Self::Error> {
        self.record(WriteEvent::BeginArray { len, array_type })
    }

    fn end_array(&mut self) -> Result<(), Self::Error> {
        self.record(WriteEvent::EndArray)
    }

    fn write_date(&mut self, epoch_day: i64) -> Result<(), Self::Error> {
        self.record(WriteEvent::Date { epoch_day })
    }

    fn write_local_time(&mut self, nano_of_day: i64) -> Result<(), Self::Error> {
        self.record(WriteEvent::LocalTime { nano_of_day })
    }

    fn write_time(&mut self, nano_of_day: i64, offset_seconds: i32) -> Result<(), Self::Error> {
        self.record(WriteEvent::Time {
            nano_of_day,
            offset_seconds,
        })
    }

    fn write_local_date_time(&mut self, epoch_second: i64, nano: u32) -> Result<(), Self::Error> {
        self.record(WriteEvent::LocalDateTime { epoch_second, nano })
    }

    fn write_date_time(&mut self, epoch_second: i64, nano: u32, offset_seconds: i32) -> Result<(), Self::Error> {
        self.record(WriteEvent::DateTime {
            epoch_second,
            nano,
            offset_seconds,
        })
    }

    fn write_date_time_zone(&mut self, epoch_second: i64, nano: u32, zone_id: u16) -> Result<(), Self::Error> {
        self.record(WriteEvent::DateTimeZone {
            epoch_second,
            nano,
            zone_id,
        })
    }

    fn write_duration(&mut self, months: i64, days: i64, seconds: i64, nanos: i32) -> Result<(), Self::Error> {
        self.record(WriteEvent::Duration {
            months,
            days,
            seconds,
            nanos,
        })
    }

    fn write_point(&mut self, crs: Crs, coordinate: &[f64]) -> Result<(), Self::Error> {
        self.record(WriteEvent::Point {
            crs,
            coordinate: coordinate.to_vec(),
        })
    }

    fn write_line(&mut self, start: &PointValue, end: &PointValue) -> Result<(), Self::Error> {
        self.record(WriteEvent::Line {
            start: start.clone(),
            end: end.clone(),
        })
    }

    fn write_rect(&mut self, lower_left: &PointValue, upper_right: &PointValue) -> Result<(), Self::Error> {
        self.record(WriteEvent::Rect {
            lower_left: lower_left.clone(),
            upper_right: upper_right.clone(),
        })
    }

    fn write_circle(&mut self, center: &PointValue, radius: f64) -> Result<(), Self::Error> {
        self.record(WriteEvent::Circle {
            center: center.clone(),
            radius,
        })
    }

    fn begin_polygon(&mut self, vertices: usize) -> Result<(), Self::Error> {
        self.record(WriteEvent::BeginPolygon { vertices })
    }

    fn end_polygon(&mut self) -> Result<(), Self::Error> {
        self.record(WriteEvent::EndPolygon)
    }

    fn begin_collection(&mut self, len: usize, crs: Crs) -> Result<(), Self::Error> {
        self.record(WriteEvent::BeginCollection { len, crs })
    }

    fn end_collection(&mut self) -> Result<(), Self::Error> {
        self.record(WriteEvent::EndCollection)
    }
}

/// Rebuild a value from a recorded call log
///
/// The log must describe exactly one value with balanced framing.
///
/// ```rust
/// use strata_value::values;
/// use strata_value::writer::{rebuild, RecordingWriter};
///
/// let value = values::string_array(&["a", "b"]);
/// let mut recorder = RecordingWriter::new();
/// value.write_to(&mut recorder).unwrap();
/// assert_eq!(rebuild(recorder.events())?, value);
/// # Ok::<(), strata_value::ValueError>(())
/// ```
pub fn rebuild(events: &[WriteEvent]) -> ValueResult<Value> {
    let mut builder = ValueBuilder::new();
    for event in events {
        event.replay(&mut builder)?;
    }
    builder.finish()
}

#[derive(Debug)]
enum Frame {
    Array {
        array_type: ArrayType,
        expected: usize,
        items: Vec<Value>,
    },
    Polygon {
        expected: usize,
        vertices: Vec<PointValue>,
    },
    Collection {
        crs: Crs,
        expected: usize,
        shapes: Vec<GeoValue>,
    },
}

impl Frame {
    fn name(&self) -> &'static str {
        match self {
            Self::Array { .. } => "array",
            Self::Polygon { .. } => "polygon",
            Self::Collection { .. } => "collection",
        }
    }
}

/// Writer that assembles the value it is given
///
/// Declared lengths are checked against [`ValueLimits`] before anything is
/// allocated, and against the number of elements actually received when the
/// frame closes.
#[derive(Debug)]
pub struct ValueBuilder {
    limits: ValueLimits,
    stack: Vec<Frame>,
    result: Option<Value>,
}

impl Default for ValueBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueBuilder {
    pub fn new() -> Self {
        Self::with_limits(ValueLimits::unlimited())
    }

    pub fn with_limits(limits: ValueLimits) -> Self {
        Self {
            limits,
            stack: Vec::new(),
            result: None,
        }
    }

    /// A complete top-level value has been received
    pub fn is_complete(&self) -> bool {
        self.stack.is_empty() && self.result.is_some()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn finish(self) -> ValueResult<Value> {
        if let Some(frame) = self.stack.last() {
            return Err(ValueError::illegal_state(format!(
                "Truncated write sequence: unclosed {}",
                frame.name()
            )));
        }
        self.result
            .ok_or_else(|| ValueError::illegal_state("Write sequence did not contain a value"))
    }

    fn push(&mut self, value: Value) -> ValueResult<()> {
        match self.stack.last_mut() {
            Some(Frame::Array { items, .. }) => items.push(value),
            Some(Frame::Polygon { vertices, .. }) => match value {
                Value::Geo(GeoValue::Point(point)) => vertices.push(point),
                other => {
                    return Err(ValueError::illegal_state(format!(
                        "Polygon vertex must be a point, got {}",
                        other.type_name()
                    )))
                }
            },
            Some(Frame::Collection { shapes, .. }) => match value {
                Value::Geo(shape) => shapes.push(shape),
                other => {
                    return Err(ValueError::illegal_state(format!(
                        "Collection member must be a shape, got {}",
                        other.type_name()
                    )))
                }
            },
            None if self.result.is_some() => {
                return Err(ValueError::illegal_state("Write sequence contains more than one value"));
            }
            None => self.result = Some(value),
        }
        Ok(())
    }

    fn pop(&mut self, closing: &'static str) -> ValueResult<Frame> {
        let frame = self
            .stack
            .pop()
            .ok_or_else(|| ValueError::illegal_state(format!("end_{closing} without matching begin")))?;
        if frame.name() != closing {
            return Err(ValueError::illegal_state(format!(
                "end_{closing} closes an open {}",
                frame.name()
            )));
        }
        Ok(frame)
    }

    fn geo(&mut self, shape: GeoValue) -> ValueResult<()> {
        self.push(Value::Geo(shape))
    }
}

fn check_count(kind: &str, expected: usize, actual: usize) -> ValueResult<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(ValueError::illegal_state(format!(
            "{kind} declared {expected} elements but received {actual}"
        )))
    }
}

macro_rules! typed_elements {
    ($items:expr, $array_type:expr, $variant:ident) => {
        $items
            .into_iter()
            .map(|item| match item {
                Value::$variant(v) => Ok(v),
                other => Err(element_mismatch($array_type, &other)),
            })
            .collect::<ValueResult<Vec<_>>>()?
            .into()
    };
}

fn element_mismatch(array_type: ArrayType, value: &Value) -> ValueError {
    ValueError::illegal_state(format!(
        "Element of type {} in a {array_type} array",
        value.type_name()
    ))
}

/// Assemble an array of the declared element type
fn typed_array(array_type: ArrayType, items: Vec<Value>) -> ValueResult<ArrayValue> {
    Ok(match array_type {
        ArrayType::Boolean => typed_elements!(items, array_type, Boolean),
        ArrayType::Byte => typed_elements!(items, array_type, Byte),
        ArrayType::Short => typed_elements!(items, array_type, Short),
        ArrayType::Int => typed_elements!(items, array_type, Int),
        ArrayType::Long => typed_elements!(items, array_type, Long),
        ArrayType::Float => typed_elements!(items, array_type, Float),
        ArrayType::Double => typed_elements!(items, array_type, Double),
        ArrayType::Char => typed_elements!(items, array_type, Char),
        ArrayType::String => typed_elements!(items, array_type, Text),
        ArrayType::Date => typed_elements!(items, array_type, Date),
        ArrayType::LocalTime => typed_elements!(items, array_type, LocalTime),
        ArrayType::Time => typed_elements!(items, array_type, Time),
        ArrayType::LocalDateTime => typed_elements!(items, array_type, LocalDateTime),
        ArrayType::DateTime => typed_elements!(items, array_type, DateTime),
        ArrayType::Duration => typed_elements!(items, array_type, Duration),
        ArrayType::Point => items
            .into_iter()
            .map(|item| match item {
                Value::Geo(GeoValue::Point(p)) => Ok(p),
                other => Err(element_mismatch(array_type, &other)),
            })
            .collect::<ValueResult<Vec<_>>>()?
            .into(),
    })
}

impl ValueWriter for ValueBuilder {
    type Error = ValueError;

    fn write_null(&mut self) -> ValueResult<()> {
        self.push(Value::NoValue)
    }

    fn write_boolean(&mut self, value: bool) -> ValueResult<()> {
        self.push(Value::Boolean(value))
    }

    fn write_byte(&mut self, value: i8) -> ValueResult<()> {
        self.push(Value::Byte(value))
    }

    fn write_short(&mut self, value: i16) -> ValueResult<()> {
        self.push(Value::Short(value))
    }

    fn write_int(&mut self, value: i32) -> ValueResult<()> {
        self.push(Value::Int(value))
    }

    fn write_long(&mut self, value: i64) -> ValueResult<()> {
        self.push(Value::Long(value))
    }

    fn write_float(&mut self, value: f32) -> ValueResult<()> {
        self.push(Value::Float(value))
    }

    fn write_double(&mut self, value: f64) -> ValueResult<()> {
        self.push(Value::Double(value))
    }

    fn write_char(&mut self, value: char) -> ValueResult<()> {
        self.push(Value::Char(value))
    }

    fn write_string(&mut self, value: &str) -> ValueResult<()> {
        let text = TextValue::with_limits(value, &self.limits)?;
        self.push(Value::Text(text))
    }

    fn write_utf8(&mut self, bytes: &[u8]) -> ValueResult<()> {
        self.limits.check_string_bytes(bytes.len())?;
        let text = TextValue::from_utf8(bytes)?;
        self.push(Value::Text(text))
    }

    fn begin_array(&mut self, len: usize, array_type: ArrayType) -> ValueResult<()> {
        self.limits.check_array_length(len)?;
        trace!(len, %array_type, "begin array");
        self.stack.push(Frame::Array {
            array_type,
            expected: len,
            items: Vec::with_capacity(len),
        });
        Ok(())
    }

    fn end_array(&mut self) -> ValueResult<()> {
        let Frame::Array {
            array_type,
            expected,
            items,
        } = self.pop("array")?
        else {
            return Err(ValueError::illegal_state("end_array closes a non-array frame"));
        };
        check_count("Array", expected, items.len())?;
        let array = typed_array(array_type, items)?;
        self.push(Value::Array(array))
    }

    fn write_date(&mut self, epoch_day: i64) -> ValueResult<()> {
        self.push(Value::Date(DateValue::from_epoch_day(epoch_day)?))
    }

    fn write_local_time(&mut self, nano_of_day: i64) -> ValueResult<()> {
        self.push(Value::LocalTime(LocalTimeValue::from_nano_of_day(nano_of_day)?))
    }

    fn write_time(&mut self, nano_of_day: i64, offset_seconds: i32) -> ValueResult<()> {
        self.push(Value::Time(TimeValue::from_raw(nano_of_day, offset_seconds)?))
    }

    fn write_local_date_time(&mut self, epoch_second: i64, nano: u32) -> ValueResult<()> {
        self.push(Value::LocalDateTime(LocalDateTimeValue::from_epoch(epoch_second, nano)?))
    }

    fn write_date_time(&mut self, epoch_second: i64, nano: u32, offset_seconds: i32) -> ValueResult<()> {
        let zone = ZoneId::offset_seconds(offset_seconds)?;
        self.push(Value::DateTime(DateTimeValue::from_epoch(epoch_second, nano, zone)?))
    }

    fn write_date_time_zone(&mut self, epoch_second: i64, nano: u32, zone_id: u16) -> ValueResult<()> {
        let zone = ZoneId::region_by_id(zone_id)?;
        self.push(Value::DateTime(DateTimeValue::from_epoch(epoch_second, nano, zone)?))
    }

    fn write_duration(&mut self, months: i64, days: i64, seconds: i64, nanos: i32) -> ValueResult<()> {
        let duration = DurationValue::new(months, days, seconds, i64::from(nanos))?;
        self.push(Value::Duration(duration))
    }

    fn write_point(&mut self, crs: Crs, coordinate: &[f64]) -> ValueResult<()> {
        self.geo(GeoValue::Point(PointValue::new(crs, coordinate)?))
    }

    fn write_line(&mut self, start: &PointValue, end: &PointValue) -> ValueResult<()> {
        self.geo(GeoValue::Line(LineValue::new(start.clone(), end.clone())?))
    }

    fn write_rect(&mut self, lower_left: &PointValue, upper_right: &PointValue) -> ValueResult<()> {
        self.geo(GeoValue::Rect(RectValue::new(lower_left.clone(), upper_right.clone())?))
    }

    fn write_circle(&mut self, center: &PointValue, radius: f64) -> ValueResult<()> {
        self.geo(GeoValue::Circle(CircleValue::new(center.clone(), radius)?))
    }

    fn begin_polygon(&mut self, vertices: usize) -> ValueResult<()> {
        self.limits.check_shape_points(vertices)?;
        self.stack.push(Frame::Polygon {
            expected: vertices,
            vertices: Vec::with_capacity(vertices),
        });
        Ok(())
    }

    fn end_polygon(&mut self) -> ValueResult<()> {
        let Frame::Polygon { expected, vertices } = self.pop("polygon")? else {
            return Err(ValueError::illegal_state("end_polygon closes a non-polygon frame"));
        };
        check_count("Polygon", expected, vertices.len())?;
        let polygon = PolygonValue::with_limits(vertices, &self.limits)?;
        self.geo(GeoValue::Polygon(polygon))
    }

    fn begin_collection(&mut self, len: usize, crs: Crs) -> ValueResult<()> {
        self.limits.check_shape_points(len)?;
        self.stack.push(Frame::Collection {
            crs,
            expected: len,
            shapes: Vec::with_capacity(len),
        });
        Ok(())
    }

    fn end_collection(&mut self) -> ValueResult<()> {
        let Frame::Collection { crs, expected, shapes } = self.pop("collection")? else {
            return Err(ValueError::illegal_state("end_collection closes a non-collection frame"));
        };
        check_count("Collection", expected, shapes.len())?;
        let collection = CollectionValue::with_limits(crs, shapes, &self.limits)?;
        self.geo(GeoValue::Collection(collection))
    }
}
