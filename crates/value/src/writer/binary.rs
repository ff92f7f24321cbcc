//! Compact binary encoding
//!
//! A leading format version byte, then one record per writer call: a tag byte
//! followed by big-endian fields. Variable-length parts carry a `u32` length
//! prefix. Points store their CRS code; the dimension follows from it.
//!
//! [`BinaryReader`] decodes through the same [`ValueBuilder`] that rebuilds
//! recorded call logs, so both paths enforce identical framing rules.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use tracing::{debug, warn};

use crate::core::{Value, ValueLimits};
use crate::error::{ValueError, ValueResult};
use crate::geo::{Crs, PointValue};
use crate::scalar::text::checked_utf8;
use crate::writer::recording::ValueBuilder;
use crate::writer::{ArrayType, ValueWriter};

pub const FORMAT_VERSION: u8 = 1;

mod tag {
    pub const NULL: u8 = 0;
    pub const BOOLEAN: u8 = 1;
    pub const BYTE: u8 = 2;
    pub const SHORT: u8 = 3;
    pub const INT: u8 = 4;
    pub const LONG: u8 = 5;
    pub const FLOAT: u8 = 6;
    pub const DOUBLE: u8 = 7;
    pub const CHAR: u8 = 8;
    pub const STRING: u8 = 9;
    pub const BEGIN_ARRAY: u8 = 10;
    pub const END_ARRAY: u8 = 11;
    pub const DATE: u8 = 12;
    pub const LOCAL_TIME: u8 = 13;
    pub const TIME: u8 = 14;
    pub const LOCAL_DATE_TIME: u8 = 15;
    pub const DATE_TIME: u8 = 16;
    pub const DATE_TIME_ZONE: u8 = 17;
    pub const DURATION: u8 = 18;
    pub const POINT: u8 = 19;
    pub const LINE: u8 = 20;
    pub const RECT: u8 = 21;
    pub const CIRCLE: u8 = 22;
    pub const BEGIN_POLYGON: u8 = 23;
    pub const END_POLYGON: u8 = 24;
    pub const BEGIN_COLLECTION: u8 = 25;
    pub const END_COLLECTION: u8 = 26;
}

/// Writer producing the binary encoding
///
/// ```rust
/// use strata_value::values;
/// use strata_value::writer::{BinaryReader, BinaryWriter};
/// use strata_value::ValueLimits;
///
/// let value = values::string_array(&["a", "b"]);
/// let bytes = BinaryWriter::encode(&value)?;
/// let decoded = BinaryReader::new(ValueLimits::strict()).read(&bytes)?;
/// assert_eq!(decoded, value);
/// # Ok::<(), strata_value::ValueError>(())
/// ```
#[derive(Debug, Clone)]
pub struct BinaryWriter {
    buf: BytesMut,
}

impl Default for BinaryWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl BinaryWriter {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut buf = BytesMut::with_capacity(capacity.max(1));
        buf.put_u8(FORMAT_VERSION);
        Self { buf }
    }

    /// Encode a single value
    pub fn encode(value: &Value) -> ValueResult<Bytes> {
        let mut writer = Self::new();
        value.write_to(&mut writer)?;
        Ok(writer.finish())
    }

    /// Bytes written so far, including the version byte
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.len() <= 1
    }

    pub fn finish(self) -> Bytes {
        self.buf.freeze()
    }

    fn put_len(&mut self, len: usize) -> ValueResult<()> {
        let len = u32::try_from(len)
            .map_err(|_| ValueError::invalid_argument(format!("Length {len} does not fit the binary format")))?;
        self.buf.put_u32(len);
        Ok(())
    }

    fn put_point(&mut self, crs: Crs, coordinate: &[f64]) {
        self.buf.put_i32(crs.code());
        for c in coordinate {
            self.buf.put_f64(*c);
        }
    }

    fn tagged(&mut self, record: u8) -> &mut BytesMut {
        self.buf.put_u8(record);
        &mut self.buf
    }
}

impl ValueWriter for BinaryWriter {
    type Error = ValueError;

    fn write_null(&mut self) -> ValueResult<()> {
        self.tagged(tag::NULL);
        Ok(())
    }

    fn write_boolean(&mut self, value: bool) -> ValueResult<()> {
        self.tagged(tag::BOOLEAN).put_u8(u8::from(value));
        Ok(())
    }

    fn write_byte(&mut self, value: i8) -> ValueResult<()> {
        self.tagged(tag::BYTE).put_i8(value);
        Ok(())
    }

    fn write_short(&mut self, value: i16) -> ValueResult<()> {
        self.tagged(tag::SHORT).put_i16(value);
        Ok(())
    }

    fn write_int(&mut self, value: i32) -> ValueResult<()> {
        self.tagged(tag::INT).put_i32(value);
        Ok(())
    }

    fn write_long(&mut self, value: i64) -> ValueResult<()> {
        self.tagged(tag::LONG).put_i64(value);
        Ok(())
    }

    fn write_float(&mut self, value: f32) -> ValueResult<()> {
        self.tagged(tag::FLOAT).put_f32(value);
        Ok(())
    }

    fn write_double(&mut self, value: f64) -> ValueResult<()> {
        self.tagged(tag::DOUBLE).put_f64(value);
        Ok(())
    }

    fn write_char(&mut self, value: char) -> ValueResult<()> {
        self.tagged(tag::CHAR).put_u32(u32::from(value));
        Ok(())
    }

    fn write_string(&mut self, value: &str) -> ValueResult<()> {
        self.tagged(tag::STRING);
        self.put_len(value.len())?;
        self.buf.put_slice(value.as_bytes());
        Ok(())
    }

    fn write_utf8(&mut self, bytes: &[u8]) -> ValueResult<()> {
        self.write_string(checked_utf8(bytes)?)
    }

    fn begin_array(&mut self, len: usize, array_type: ArrayType) -> ValueResult<()> {
        self.tagged(tag::BEGIN_ARRAY).put_u8(array_type.tag());
        self.put_len(len)
    }

    fn end_array(&mut self) -> ValueResult<()> {
        self.tagged(tag::END_ARRAY);
        Ok(())
    }

    fn write_date(&mut self, epoch_day: i64) -> ValueResult<()> {
        self.tagged(tag::DATE).put_i64(epoch_day);
        Ok(())
    }

    fn write_local_time(&mut self, nano_of_day: i64) -> ValueResult<()> {
        self.tagged(tag::LOCAL_TIME).put_i64(nano_of_day);
        Ok(())
    }

    fn write_time(&mut self, nano_of_day: i64, offset_seconds: i32) -> ValueResult<()> {
        let buf = self.tagged(tag::TIME);
        buf.put_i64(nano_of_day);
        buf.put_i32(offset_seconds);
        Ok(())
    }

    fn write_local_date_time(&mut self, epoch_second: i64, nano: u32) -> ValueResult<()> {
        let buf = self.tagged(tag::LOCAL_DATE_TIME);
        buf.put_i64(epoch_second);
        buf.put_u32(nano);
        Ok(())
    }

    fn write_date_time(&mut self, epoch_second: i64, nano: u32, offset_seconds: i32) -> ValueResult<()> {
        let buf = self.tagged(tag::DATE_TIME);
        buf.put_i64(epoch_second);
        buf.put_u32(nano);
        buf.put_i32(offset_seconds);
        Ok(())
    }

    fn write_date_time_zone(&mut self, epoch_second: i64, nano: u32, zone_id: u16) -> ValueResult<()> {
        let buf = self.tagged(tag::DATE_TIME_ZONE);
        buf.put_i64(epoch_second);
        buf.put_u32(nano);
        buf.put_u16(zone_id);
        Ok(())
    }

    fn write_duration(&mut self, months: i64, days: i64, seconds: i64, nanos: i32) -> ValueResult<()> {
        let buf = self.tagged(tag::DURATION);
        buf.put_i64(months);
        buf.put_i64(days);
        buf.put_i64(seconds);
        buf.put_i32(nanos);
        Ok(())
    }

    fn write_point(&mut self, crs: Crs, coordinate: &[f64]) -> ValueResult<()> {
        self.tagged(tag::POINT);
        self.put_point(crs, coordinate);
        Ok(())
    }

    fn write_line(&mut self, start: &PointValue, end: &PointValue) -> ValueResult<()> {
        self.tagged(tag::LINE);
        self.put_point(start.crs(), start.coordinate());
        self.put_point(end.crs(), end.coordinate());
        Ok(())
    }

    fn write_rect(&mut self, lower_left: &PointValue, upper_right: &PointValue) -> ValueResult<()> {
        self.tagged(tag::RECT);
        self.put_point(lower_left.crs(), lower_left.coordinate());
        self.put_point(upper_right.crs(), upper_right.coordinate());
        Ok(())
    }

    fn write_circle(&mut self, center: &PointValue, radius: f64) -> ValueResult<()> {
        self.tagged(tag::CIRCLE);
        self.put_point(center.crs(), center.coordinate());
        self.buf.put_f64(radius);
        Ok(())
    }

    fn begin_polygon(&mut self, vertices: usize) -> ValueResult<()> {
        self.tagged(tag::BEGIN_POLYGON);
        self.put_len(vertices)
    }

    fn end_polygon(&mut self) -> ValueResult<()> {
        self.tagged(tag::END_POLYGON);
        Ok(())
    }

    fn begin_collection(&mut self, len: usize, crs: Crs) -> ValueResult<()> {
        self.tagged(tag::BEGIN_COLLECTION).put_i32(crs.code());
        self.put_len(len)
    }

    fn end_collection(&mut self) -> ValueResult<()> {
        self.tagged(tag::END_COLLECTION);
        Ok(())
    }
}

// ==================== Reader ====================

/// Bounds-checked view over the remaining input
struct Input<'a> {
    buf: &'a [u8],
}

impl<'a> Input<'a> {
    fn need(&self, n: usize, what: &str) -> ValueResult<()> {
        if self.buf.remaining() < n {
            return Err(ValueError::illegal_state(format!(
                "Truncated input reading {what}: need {n} bytes, {} left",
                self.buf.remaining()
            )));
        }
        Ok(())
    }

    fn u8(&mut self, what: &str) -> ValueResult<u8> {
        self.need(1, what)?;
        Ok(self.buf.get_u8())
    }

    fn i8(&mut self, what: &str) -> ValueResult<i8> {
        self.need(1, what)?;
        Ok(self.buf.get_i8())
    }

    fn i16(&mut self, what: &str) -> ValueResult<i16> {
        self.need(2, what)?;
        Ok(self.buf.get_i16())
    }

    fn u16(&mut self, what: &str) -> ValueResult<u16> {
        self.need(2, what)?;
        Ok(self.buf.get_u16())
    }

    fn i32(&mut self, what: &str) -> ValueResult<i32> {
        self.need(4, what)?;
        Ok(self.buf.get_i32())
    }

    fn u32(&mut self, what: &str) -> ValueResult<u32> {
        self.need(4, what)?;
        Ok(self.buf.get_u32())
    }

    fn i64(&mut self, what: &str) -> ValueResult<i64> {
        self.need(8, what)?;
        Ok(self.buf.get_i64())
    }

    fn f32(&mut self, what: &str) -> ValueResult<f32> {
        self.need(4, what)?;
        Ok(self.buf.get_f32())
    }

    fn f64(&mut self, what: &str) -> ValueResult<f64> {
        self.need(8, what)?;
        Ok(self.buf.get_f64())
    }

    fn slice(&mut self, len: usize, what: &str) -> ValueResult<&'a [u8]> {
        self.need(len, what)?;
        let (head, tail) = self.buf.split_at(len);
        self.buf = tail;
        Ok(head)
    }

    fn crs(&mut self) -> ValueResult<Crs> {
        let code = self.i32("crs")?;
        Crs::from_code(code).map_err(|_| ValueError::illegal_state(format!("Unknown CRS code {code}")))
    }

    fn point(&mut self) -> ValueResult<PointValue> {
        let crs = self.crs()?;
        let mut coordinate = [0.0; 3];
        for c in coordinate.iter_mut().take(crs.dimension()) {
            *c = self.f64("coordinate")?;
        }
        PointValue::new(crs, &coordinate[..crs.dimension()])
    }
}

/// Decoder for [`BinaryWriter`] output
///
/// Lengths read from the input are checked against the configured
/// [`ValueLimits`] before any buffer is allocated.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryReader {
    limits: ValueLimits,
}

impl BinaryReader {
    pub fn new(limits: ValueLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &ValueLimits {
        &self.limits
    }

    /// Decode one value; trailing bytes are ignored with a warning
    pub fn read(&self, bytes: &[u8]) -> ValueResult<Value> {
        let mut input = Input { buf: bytes };
        let version = input.u8("format version")?;
        if version != FORMAT_VERSION {
            return Err(ValueError::illegal_state(format!(
                "Unsupported binary format version {version}, expected {FORMAT_VERSION}"
            )));
        }

        let mut builder = ValueBuilder::with_limits(self.limits);
        while !builder.is_complete() {
            self.step(&mut input, &mut builder)?;
        }
        if input.buf.has_remaining() {
            warn!(trailing = input.buf.remaining(), "ignoring trailing bytes after encoded value");
        }
        debug!(bytes = bytes.len(), "decoded binary value");
        builder.finish()
    }

    fn step(&self, input: &mut Input<'_>, builder: &mut ValueBuilder) -> ValueResult<()> {
        match input.u8("tag")? {
            tag::NULL => builder.write_null(),
            tag::BOOLEAN => match input.u8("boolean")? {
                0 => builder.write_boolean(false),
                1 => builder.write_boolean(true),
                other => Err(ValueError::illegal_state(format!("Invalid boolean byte {other}"))),
            },
            tag::BYTE => builder.write_byte(input.i8("byte")?),
            tag::SHORT => builder.write_short(input.i16("short")?),
            tag::INT => builder.write_int(input.i32("int")?),
            tag::LONG => builder.write_long(input.i64("long")?),
            tag::FLOAT => builder.write_float(input.f32("float")?),
            tag::DOUBLE => builder.write_double(input.f64("double")?),
            tag::CHAR => {
                let code = input.u32("char")?;
                let c = char::from_u32(code)
                    .ok_or_else(|| ValueError::illegal_state(format!("Invalid code point {code:#x}")))?;
                builder.write_char(c)
            }
            tag::STRING => {
                let len = input.u32("string length")? as usize;
                self.limits.check_string_bytes(len)?;
                let bytes = input.slice(len, "string")?;
                builder.write_utf8(bytes)
            }
            tag::BEGIN_ARRAY => {
                let array_type = ArrayType::from_tag(input.u8("array type")?)?;
                let len = input.u32("array length")? as usize;
                self.limits.check_array_length(len)?;
                // every element takes at least one byte
                input.need(len, "array elements")?;
                builder.begin_array(len, array_type)
            }
            tag::END_ARRAY => builder.end_array(),
            tag::DATE => builder.write_date(input.i64("date")?),
            tag::LOCAL_TIME => builder.write_local_time(input.i64("local time")?),
            tag::TIME => {
                let nano_of_day = input.i64("time")?;
                builder.write_time(nano_of_day, input.i32("offset")?)
            }
            tag::LOCAL_DATE_TIME => {
                let epoch_second = input.i64("epoch second")?;
                builder.write_local_date_time(epoch_second, input.u32("nano")?)
            }
            tag::DATE_TIME => {
                let epoch_second = input.i64("epoch second")?;
                let nano = input.u32("nano")?;
                builder.write_date_time(epoch_second, nano, input.i32("offset")?)
            }
            tag::DATE_TIME_ZONE => {
                let epoch_second = input.i64("epoch second")?;
                let nano = input.u32("nano")?;
                builder.write_date_time_zone(epoch_second, nano, input.u16("zone id")?)
            }
            tag::DURATION => {
                let months = input.i64("months")?;
                let days = input.i64("days")?;
                let seconds = input.i64("seconds")?;
                builder.write_duration(months, days, seconds, input.i32("nanos")?)
            }
            tag::POINT => {
                let point = input.point()?;
                builder.write_point(point.crs(), point.coordinate())
            }
            tag::LINE => {
                let start = input.point()?;
                builder.write_line(&start, &input.point()?)
            }
            tag::RECT => {
                let lower_left = input.point()?;
                builder.write_rect(&lower_left, &input.point()?)
            }
            tag::CIRCLE => {
                let center = input.point()?;
                builder.write_circle(&center, input.f64("radius")?)
            }
            tag::BEGIN_POLYGON => {
                let len = input.u32("vertex count")? as usize;
                self.limits.check_shape_points(len)?;
                input.need(len, "vertices")?;
                builder.begin_polygon(len)
            }
            tag::END_POLYGON => builder.end_polygon(),
            tag::BEGIN_COLLECTION => {
                let crs = input.crs()?;
                let len = input.u32("collection length")? as usize;
                self.limits.check_shape_points(len)?;
                input.need(len, "shapes")?;
                builder.begin_collection(len, crs)
            }
            tag::END_COLLECTION => builder.end_collection(),
            other => Err(ValueError::illegal_state(format!("Unknown tag {other}"))),
        }
    }
}
