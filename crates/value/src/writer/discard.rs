//! Writer that drops everything

use core::convert::Infallible;

use smallvec::SmallVec;

use crate::geo::{Crs, PointValue};
use crate::writer::{ArrayType, ValueWriter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Array,
    Polygon,
    Collection,
}

/// Sink that ignores every call but keeps track of `begin_*`/`end_*` framing
///
/// ```rust
/// use strata_value::values;
/// use strata_value::writer::DiscardingWriter;
///
/// let mut writer = DiscardingWriter::new();
/// values::int_array(&[1, 2, 3]).write_to(&mut writer).unwrap();
/// assert!(writer.is_balanced());
/// ```
#[derive(Debug, Clone, Default)]
pub struct DiscardingWriter {
    frames: SmallVec<[Frame; 8]>,
    mismatched: bool,
    calls: usize,
}

impl DiscardingWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current nesting depth
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Number of writer calls received
    pub fn calls(&self) -> usize {
        self.calls
    }

    /// Check that every `begin_*` was closed by the matching `end_*`
    pub fn is_balanced(&self) -> bool {
        self.frames.is_empty() && !self.mismatched
    }

    fn call(&mut self) -> Result<(), Infallible> {
        self.calls += 1;
        Ok(())
    }

    fn begin(&mut self, frame: Frame) -> Result<(), Infallible> {
        self.frames.push(frame);
        self.call()
    }

    fn end(&mut self, frame: Frame) -> Result<(), Infallible> {
        if self.frames.pop() != Some(frame) {
            self.mismatched = true;
        }
        self.call()
    }
}

impl ValueWriter for DiscardingWriter {
    type Error = Infallible;

    fn write_null(&mut self) -> Result<(), Self::Error> {
        self.call()
    }

    fn write_boolean(&mut self, _value: bool) -> Result<(), Self::Error> {
        self.call()
    }

    fn write_byte(&mut self, _value: i8) -> Result<(), Self::Error> {
        self.call()
    }

    fn write_short(&mut self, _value: i16) -> Result<(), Self::Error> {
        self.call()
    }

    fn write_int(&mut self, _value: i32) -> Result<(), Self::Error> {
        self.call()
    }

    fn write_long(&mut self, _value: i64) -> Result<(), Self::Error> {
        self.call()
    }

    fn write_float(&mut self, _value: f32) -> Result<(), Self::Error> {
        self.call()
    }

    fn write_double(&mut self, _value: f64) -> Result<(), Self::Error> {
        self.call()
    }

    fn write_char(&mut self, _value: char) -> Result<(), Self::Error> {
        self.call()
    }

    fn write_string(&mut self, _value: &str) -> Result<(), Self::Error> {
        self.call()
    }

    fn write_utf8(&mut self, _bytes: &[u8]) -> Result<(), Self::Error> {
        self.call()
    }

    fn begin_array(&mut self, _len: usize, _array_type: ArrayType) -> Result<(), Self::Error> {
        self.begin(Frame::Array)
    }

    fn end_array(&mut self) -> Result<(), Self::Error> {
        self.end(Frame::Array)
    }

    fn write_date(&mut self, _epoch_day: i64) -> Result<(), Self::Error> {
        self.call()
    }

    fn write_local_time(&mut self, _nano_of_day: i64) -> Result<(), Self::Error> {
        self.call()
    }

    fn write_time(&mut self, _nano_of_day: i64, _offset_seconds: i32) -> Result<(), Self::Error> {
        self.call()
    }

    fn write_local_date_time(&mut self, _epoch_second: i64, _nano: u32) -> Result<(), Self::Error> {
        self.call()
    }

    fn write_date_time(&mut self, _epoch_second: i64, _nano: u32, _offset_seconds: i32) -> Result<(), Self::Error> {
        self.call()
    }

    fn write_date_time_zone(&mut self, _epoch_second: i64, _nano: u32, _zone_id: u16) -> Result<(), Self::Error> {
        self.call()
    }

    fn write_duration(&mut self, _months: i64, _days: i64, _seconds: i64, _nanos: i32) -> Result<(), Self::Error> {
        self.call()
    }

    fn write_point(&mut self, _crs: Crs, _coordinate: &[f64]) -> Result<(), Self::Error> {
        self.call()
    }

    fn write_line(&mut self, _start: &PointValue, _end: &PointValue) -> Result<(), Self::Error> {
        self.call()
    }

    fn write_rect(&mut self, _lower_left: &PointValue, _upper_right: &PointValue) -> Result<(), Self::Error> {
        self.call()
    }

    fn write_circle(&mut self, _center: &PointValue, _radius: f64) -> Result<(), Self::Error> {
        self.call()
    }

    fn begin_polygon(&mut self, _vertices: usize) -> Result<(), Self::Error> {
        self.begin(Frame::Polygon)
    }

    fn end_polygon(&mut self) -> Result<(), Self::Error> {
        self.end(Frame::Polygon)
    }

    fn begin_collection(&mut self, _len: usize, _crs: Crs) -> Result<(), Self::Error> {
        self.begin(Frame::Collection)
    }

    fn end_collection(&mut self) -> Result<(), Self::Error> {
        self.end(Frame::Collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{CollectionValue, GeoValue, PolygonValue};
    use crate::{values, Value};

    #[test]
    fn test_nested_framing_balanced() {
        let p = |x: f64, y: f64| PointValue::cartesian(x, y).unwrap();
        let polygon = PolygonValue::new(vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0)]).unwrap();
        let collection =
            CollectionValue::new(Crs::Cartesian, vec![GeoValue::Polygon(polygon), GeoValue::Point(p(2.0, 2.0))])
                .unwrap();

        let mut writer = DiscardingWriter::new();
        Value::Geo(GeoValue::Collection(collection)).write_to(&mut writer).unwrap();
        assert!(writer.is_balanced());
        assert_eq!(writer.depth(), 0);
        assert_eq!(writer.calls(), 8);
    }

    #[test]
    fn test_unbalanced_detected() {
        let mut writer = DiscardingWriter::new();
        writer.begin_array(1, ArrayType::Int).unwrap();
        writer.write_int(1).unwrap();
        assert_eq!(writer.depth(), 1);
        assert!(!writer.is_balanced());

        writer.end_polygon().unwrap();
        assert_eq!(writer.depth(), 0);
        assert!(!writer.is_balanced());
    }

    #[test]
    fn test_every_scalar_counts_once() {
        let mut writer = DiscardingWriter::new();
        values::string_value("x").write_to(&mut writer).unwrap();
        values::no_value().write_to(&mut writer).unwrap();
        assert_eq!(writer.calls(), 2);
    }
}
