//! Point value

use core::cmp::Ordering;
use core::fmt;

use smallvec::SmallVec;

use crate::core::hash::ValueHasher;
use crate::core::numbers::{compare_doubles, hash_array, hash_double};
use crate::core::value::Value;
use crate::error::{ValueError, ValueResult};
use crate::geo::Crs;
use crate::scalar::TextValue;
use crate::writer::ValueWriter;

/// Point in a coordinate reference system
///
/// Coordinates are never NaN and always match the dimension of the CRS.
/// Points order by CRS code, then coordinate by coordinate.
///
/// ```rust
/// use strata_value::geo::{Crs, PointValue};
///
/// let point = PointValue::wgs84(12.99, 56.7)?;
/// assert_eq!(point.to_string(), "SRID=4326;POINT(12.99 56.7)");
/// assert_eq!(point.crs(), Crs::Wgs84);
/// # Ok::<(), strata_value::ValueError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PointValue {
    crs: Crs,
    coordinate: SmallVec<[f64; 3]>,
}

impl PointValue {
    /// Create a point, checking dimension and rejecting NaN
    pub fn new(crs: Crs, coordinate: &[f64]) -> ValueResult<Self> {
        if coordinate.len() != crs.dimension() {
            return Err(ValueError::invalid_argument(format!(
                "{crs} points need {} coordinates, got {}",
                crs.dimension(),
                coordinate.len()
            )));
        }
        if coordinate.iter().any(|c| c.is_nan()) {
            return Err(ValueError::invalid_argument("Point coordinates cannot be NaN"));
        }
        Ok(Self {
            crs,
            coordinate: SmallVec::from_slice(coordinate),
        })
    }

    pub fn cartesian(x: f64, y: f64) -> ValueResult<Self> {
        Self::new(Crs::Cartesian, &[x, y])
    }

    pub fn cartesian_3d(x: f64, y: f64, z: f64) -> ValueResult<Self> {
        Self::new(Crs::Cartesian3D, &[x, y, z])
    }

    pub fn wgs84(longitude: f64, latitude: f64) -> ValueResult<Self> {
        Self::new(Crs::Wgs84, &[longitude, latitude])
    }

    pub fn wgs84_3d(longitude: f64, latitude: f64, height: f64) -> ValueResult<Self> {
        Self::new(Crs::Wgs84_3D, &[longitude, latitude, height])
    }

    #[inline]
    pub fn crs(&self) -> Crs {
        self.crs
    }

    #[inline]
    pub fn coordinate(&self) -> &[f64] {
        &self.coordinate
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.coordinate[0]
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.coordinate[1]
    }

    pub fn z(&self) -> Option<f64> {
        self.coordinate.get(2).copied()
    }

    /// Read `x`, `y`, `z`, `longitude`, `latitude`, `height`, `crs` or `srid`
    ///
    /// Geographic names on a cartesian point, and `z`/`height` on a 2D point,
    /// are unsupported.
    pub fn get(&self, field: &str) -> ValueResult<Value> {
        let unsupported = || ValueError::unsupported(format!("get {field}"), format!("{} point", self.crs));
        let geographic = self.crs.is_geographic();
        match field.to_ascii_lowercase().as_str() {
            "x" => Ok(Value::Double(self.x())),
            "y" => Ok(Value::Double(self.y())),
            "z" => self.z().map(Value::Double).ok_or_else(unsupported),
            "longitude" if geographic => Ok(Value::Double(self.x())),
            "latitude" if geographic => Ok(Value::Double(self.y())),
            "height" if geographic => self.z().map(Value::Double).ok_or_else(unsupported),
            "longitude" | "latitude" | "height" => Err(unsupported()),
            "crs" => Ok(Value::Text(TextValue::new(self.crs.name()))),
            "srid" => Ok(Value::Long(i64::from(self.crs.code()))),
            _ => Err(ValueError::invalid_argument(format!("No such field: {field}"))),
        }
    }

    /// CRS code, then coordinates in order
    pub fn compare_to(&self, other: &Self) -> Ordering {
        self.crs
            .code()
            .cmp(&other.crs.code())
            .then_with(|| {
                self.coordinate
                    .iter()
                    .zip(other.coordinate.iter())
                    .map(|(a, b)| compare_doubles(*a, *b))
                    .find(|o| o.is_ne())
                    .unwrap_or(Ordering::Equal)
            })
            .then(self.coordinate.len().cmp(&other.coordinate.len()))
    }

    /// Ordering within one CRS; points of different systems are incomparable
    pub fn ternary_compare(&self, other: &Self) -> Option<Ordering> {
        (self.crs == other.crs).then(|| self.compare_to(other))
    }

    pub fn hash_code(&self) -> i32 {
        let mut hashes: SmallVec<[i32; 4]> = SmallVec::new();
        hashes.push(self.crs.code());
        hashes.extend(self.coordinate.iter().map(|c| hash_double(*c)));
        hash_array(hashes)
    }

    pub fn update_hash(&self, hasher: &mut ValueHasher) {
        hasher.update_int(self.crs.code());
        for c in &self.coordinate {
            hasher.update_double(*c);
        }
    }

    pub fn write_to<W: ValueWriter + ?Sized>(&self, writer: &mut W) -> Result<(), W::Error> {
        writer.write_point(self.crs, &self.coordinate)
    }

    /// Coordinates separated by spaces, as inside a WKT shape
    pub(crate) fn write_coordinates(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.coordinate.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{c}")?;
        }
        Ok(())
    }

    pub(crate) fn write_wkt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("POINT(")?;
        self.write_coordinates(f)?;
        f.write_str(")")
    }
}

impl PartialEq for PointValue {
    fn eq(&self, other: &Self) -> bool {
        self.compare_to(other) == Ordering::Equal
    }
}

impl Eq for PointValue {}

impl PartialOrd for PointValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PointValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_to(other)
    }
}

impl core::hash::Hash for PointValue {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        state.write_i32(self.hash_code());
    }
}

impl fmt::Display for PointValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SRID={};", self.crs.code())?;
        self.write_wkt(f)
    }
}
