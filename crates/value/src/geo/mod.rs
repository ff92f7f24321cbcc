//! Spatial values
//!
//! Points are fully ordered. Other shapes order by shape kind, then by their
//! constituent points, then by radius and length; that order exists for
//! sorting and indexing only, so the ternary comparison of two different
//! non-point shapes is undefined.

pub mod crs;
pub mod point;
pub mod shape;

pub use crs::Crs;
pub use point::PointValue;
pub use shape::{CircleValue, CollectionValue, LineValue, PolygonValue, RectValue};

use core::cmp::Ordering;
use core::fmt;

use crate::core::compare::Comparison;
use crate::core::hash::ValueHasher;
use crate::core::numbers::{compare_doubles, hash_array, hash_double};
use crate::core::value::Value;
use crate::error::{ValueError, ValueResult};
use crate::scalar::TextValue;
use crate::writer::ValueWriter;

/// Any spatial value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeoValue {
    Point(PointValue),
    Line(LineValue),
    Rect(RectValue),
    Polygon(PolygonValue),
    Circle(CircleValue),
    Collection(CollectionValue),
}

impl GeoValue {
    pub fn crs(&self) -> Crs {
        match self {
            Self::Point(p) => p.crs(),
            Self::Line(l) => l.crs(),
            Self::Rect(r) => r.crs(),
            Self::Polygon(p) => p.crs(),
            Self::Circle(c) => c.crs(),
            Self::Collection(c) => c.crs(),
        }
    }

    /// Position of the shape kind in the sort order
    pub const fn rank(&self) -> u8 {
        match self {
            Self::Point(_) => 0,
            Self::Line(_) => 1,
            Self::Rect(_) => 2,
            Self::Polygon(_) => 3,
            Self::Circle(_) => 4,
            Self::Collection(_) => 5,
        }
    }

    /// WKT keyword of the shape
    pub const fn shape_name(&self) -> &'static str {
        match self {
            Self::Point(_) => "POINT",
            Self::Line(_) => "LINESTRING",
            Self::Rect(_) => "BBOX",
            Self::Polygon(_) => "POLYGON",
            Self::Circle(_) => "CIRCLE",
            Self::Collection(_) => "GEOMETRYCOLLECTION",
        }
    }

    pub fn as_point(&self) -> Option<&PointValue> {
        match self {
            Self::Point(p) => Some(p),
            _ => None,
        }
    }

    /// Constituent points; empty for collections
    pub fn points(&self) -> &[PointValue] {
        match self {
            Self::Point(p) => core::slice::from_ref(p),
            Self::Line(l) => l.points(),
            Self::Rect(r) => r.points(),
            Self::Polygon(p) => p.vertices(),
            Self::Circle(c) => core::slice::from_ref(c.center()),
            Self::Collection(_) => &[],
        }
    }

    /// Read a field; points expose their coordinates, every shape its `crs`
    /// and `srid`
    pub fn get(&self, field: &str) -> ValueResult<Value> {
        match (self, field.to_ascii_lowercase().as_str()) {
            (Self::Point(p), _) => p.get(field),
            (_, "crs") => Ok(Value::Text(TextValue::new(self.crs().name()))),
            (_, "srid") => Ok(Value::Long(i64::from(self.crs().code()))),
            (Self::Circle(c), "radius") => Ok(Value::Double(c.radius())),
            (Self::Circle(c), "center") => Ok(Value::Geo(Self::Point(c.center().clone()))),
            _ => Err(ValueError::unsupported(format!("get {field}"), self.shape_name())),
        }
    }

    /// Total order: shape kind, points, radius, length
    pub fn compare_to(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank()).then_with(|| match (self, other) {
            (Self::Collection(a), Self::Collection(b)) => a
                .crs()
                .code()
                .cmp(&b.crs().code())
                .then_with(|| lexicographic(a.shapes(), b.shapes(), Self::compare_to)),
            (Self::Circle(a), Self::Circle(b)) => a
                .center()
                .compare_to(b.center())
                .then_with(|| compare_doubles(a.radius(), b.radius())),
            _ => lexicographic(self.points(), other.points(), PointValue::compare_to),
        })
    }

    /// Points of one CRS compare; any other pair is only known to be equal
    pub fn ternary_compare(&self, other: &Self) -> Comparison {
        match (self, other) {
            (Self::Point(a), Self::Point(b)) => a.ternary_compare(b).map_or(Comparison::Undefined, Comparison::from),
            _ if self.compare_to(other) == Ordering::Equal => Comparison::Equal,
            _ => Comparison::Undefined,
        }
    }

    pub fn hash_code(&self) -> i32 {
        match self {
            Self::Point(p) => p.hash_code(),
            Self::Collection(c) => {
                let hashes: Vec<i32> = core::iter::once(i32::from(self.rank()))
                    .chain(c.shapes().iter().map(Self::hash_code))
                    .collect();
                hash_array(hashes)
            }
            _ => {
                let mut hashes: Vec<i32> = Vec::with_capacity(self.points().len() + 2);
                hashes.push(i32::from(self.rank()));
                hashes.extend(self.points().iter().map(PointValue::hash_code));
                if let Self::Circle(c) = self {
                    hashes.push(hash_double(c.radius()));
                }
                hash_array(hashes)
            }
        }
    }

    pub fn update_hash(&self, hasher: &mut ValueHasher) {
        hasher.update_int(i32::from(self.rank()));
        match self {
            Self::Collection(c) => {
                hasher.update_int(c.crs().code());
                hasher.update_len(c.len());
                for shape in c.shapes() {
                    shape.update_hash(hasher);
                }
            }
            _ => {
                hasher.update_len(self.points().len());
                for point in self.points() {
                    point.update_hash(hasher);
                }
                if let Self::Circle(c) = self {
                    hasher.update_double(c.radius());
                }
            }
        }
    }

    pub fn write_to<W: ValueWriter + ?Sized>(&self, writer: &mut W) -> Result<(), W::Error> {
        match self {
            Self::Point(p) => p.write_to(writer),
            Self::Line(l) => writer.write_line(l.start(), l.end()),
            Self::Rect(r) => writer.write_rect(r.lower_left(), r.upper_right()),
            Self::Polygon(p) => {
                writer.begin_polygon(p.vertices().len())?;
                for vertex in p.vertices() {
                    vertex.write_to(writer)?;
                }
                writer.end_polygon()
            }
            Self::Circle(c) => writer.write_circle(c.center(), c.radius()),
            Self::Collection(c) => {
                writer.begin_collection(c.len(), c.crs())?;
                for shape in c.shapes() {
                    shape.write_to(writer)?;
                }
                writer.end_collection()
            }
        }
    }

    fn write_wkt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Point(p) => p.write_wkt(f),
            Self::Line(_) | Self::Rect(_) => {
                write!(f, "{}(", self.shape_name())?;
                write_point_list(f, self.points())?;
                f.write_str(")")
            }
            Self::Polygon(p) => {
                f.write_str("POLYGON((")?;
                write_point_list(f, p.vertices())?;
                let (first, last) = (&p.vertices()[0], &p.vertices()[p.vertices().len() - 1]);
                if first != last {
                    f.write_str(", ")?;
                    first.write_coordinates(f)?;
                }
                f.write_str("))")
            }
            Self::Circle(c) => {
                f.write_str("CIRCLE(")?;
                c.center().write_coordinates(f)?;
                write!(f, ", {})", c.radius())
            }
            Self::Collection(c) => {
                f.write_str("GEOMETRYCOLLECTION(")?;
                for (i, shape) in c.shapes().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    shape.write_wkt(f)?;
                }
                f.write_str(")")
            }
        }
    }
}

fn lexicographic<T>(a: &[T], b: &[T], cmp: impl Fn(&T, &T) -> Ordering) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(x, y)| cmp(x, y))
        .find(|o| o.is_ne())
        .unwrap_or_else(|| a.len().cmp(&b.len()))
}

fn write_point_list(f: &mut fmt::Formatter<'_>, points: &[PointValue]) -> fmt::Result {
    for (i, point) in points.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        point.write_coordinates(f)?;
    }
    Ok(())
}

impl core::hash::Hash for GeoValue {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        state.write_i32(self.hash_code());
    }
}

/// Extended WKT with an `SRID=<code>;` prefix
impl fmt::Display for GeoValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SRID={};", self.crs().code())?;
        self.write_wkt(f)
    }
}

impl From<PointValue> for GeoValue {
    fn from(point: PointValue) -> Self {
        Self::Point(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn p(x: f64, y: f64) -> PointValue {
        PointValue::cartesian(x, y).unwrap()
    }

    fn line(a: (f64, f64), b: (f64, f64)) -> GeoValue {
        GeoValue::Line(LineValue::new(p(a.0, a.1), p(b.0, b.1)).unwrap())
    }

    #[test]
    fn test_ewkt_rendering() {
        assert_eq!(line((0.0, 0.0), (1.0, 1.5)).to_string(), "SRID=7203;LINESTRING(0 0, 1 1.5)");

        let rect = GeoValue::Rect(RectValue::new(p(0.0, 0.0), p(2.0, 3.0)).unwrap());
        assert_eq!(rect.to_string(), "SRID=7203;BBOX(0 0, 2 3)");

        let triangle = GeoValue::Polygon(PolygonValue::new(vec![p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0)]).unwrap());
        assert_eq!(triangle.to_string(), "SRID=7203;POLYGON((0 0, 1 0, 0 1, 0 0))");

        let circle = GeoValue::Circle(CircleValue::new(p(1.0, 1.0), 2.5).unwrap());
        assert_eq!(circle.to_string(), "SRID=7203;CIRCLE(1 1, 2.5)");

        let collection =
            GeoValue::Collection(CollectionValue::new(Crs::Cartesian, vec![GeoValue::Point(p(1.0, 2.0)), circle]).unwrap());
        assert_eq!(
            collection.to_string(),
            "SRID=7203;GEOMETRYCOLLECTION(POINT(1 2), CIRCLE(1 1, 2.5))"
        );
    }

    #[test]
    fn test_shape_order() {
        let point = GeoValue::Point(p(9.0, 9.0));
        let short = line((0.0, 0.0), (1.0, 1.0));
        let longer = line((0.0, 0.0), (2.0, 1.0));
        let circle = GeoValue::Circle(CircleValue::new(p(0.0, 0.0), 1.0).unwrap());
        let bigger = GeoValue::Circle(CircleValue::new(p(0.0, 0.0), 2.0).unwrap());

        assert_eq!(point.compare_to(&short), Ordering::Less);
        assert_eq!(short.compare_to(&longer), Ordering::Less);
        assert_eq!(longer.compare_to(&circle), Ordering::Less);
        assert_eq!(circle.compare_to(&bigger), Ordering::Less);
        assert_eq!(bigger.compare_to(&bigger.clone()), Ordering::Equal);
    }

    #[test]
    fn test_ternary_compare_of_shapes() {
        let a = line((0.0, 0.0), (1.0, 1.0));
        let b = line((0.0, 0.0), (2.0, 1.0));
        assert_eq!(a.ternary_compare(&b), Comparison::Undefined);
        assert_eq!(a.ternary_compare(&a.clone()), Comparison::Equal);

        let cartesian = GeoValue::Point(p(0.0, 0.0));
        let geographic = GeoValue::Point(PointValue::wgs84(0.0, 0.0).unwrap());
        assert_eq!(cartesian.ternary_compare(&geographic), Comparison::Undefined);
        assert_eq!(cartesian.ternary_compare(&GeoValue::Point(p(1.0, 0.0))), Comparison::Less);
    }

    #[test]
    fn test_equal_shapes_hash_equal() {
        let a = line((0.0, -0.0), (1.0, 1.0));
        let b = line((0.0, 0.0), (1.0, 1.0));
        assert_eq!(a, b);
        assert_eq!(a.hash_code(), b.hash_code());
        assert_ne!(a.hash_code(), GeoValue::Rect(RectValue::new(p(0.0, 0.0), p(1.0, 1.0)).unwrap()).hash_code());
    }

    #[test]
    fn test_fields() {
        let circle = GeoValue::Circle(CircleValue::new(p(1.0, 1.0), 2.5).unwrap());
        assert_eq!(circle.get("radius").unwrap(), Value::Double(2.5));
        assert_eq!(circle.get("srid").unwrap(), Value::Long(7203));
        assert!(circle.get("x").unwrap_err().is_unsupported());
    }
}
