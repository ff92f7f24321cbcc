//! Shapes built from points
//!
//! Every shape lives in a single coordinate reference system; constructors
//! reject mixed systems.

use std::sync::Arc;

use crate::core::limits::ValueLimits;
use crate::error::{ValueError, ValueResult};
use crate::geo::{Crs, GeoValue, PointValue};

fn same_crs<'a>(points: impl IntoIterator<Item = &'a PointValue>) -> ValueResult<Option<Crs>> {
    let mut crs = None;
    for point in points {
        match crs {
            None => crs = Some(point.crs()),
            Some(expected) if expected != point.crs() => {
                return Err(ValueError::invalid_argument(format!(
                    "Cannot mix {expected} and {} in one shape",
                    point.crs()
                )));
            }
            Some(_) => {}
        }
    }
    Ok(crs)
}

/// Straight segment between two points
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineValue {
    points: [PointValue; 2],
}

impl LineValue {
    pub fn new(start: PointValue, end: PointValue) -> ValueResult<Self> {
        same_crs([&start, &end])?;
        Ok(Self { points: [start, end] })
    }

    pub fn start(&self) -> &PointValue {
        &self.points[0]
    }

    pub fn end(&self) -> &PointValue {
        &self.points[1]
    }

    pub fn crs(&self) -> Crs {
        self.points[0].crs()
    }

    pub fn points(&self) -> &[PointValue] {
        &self.points
    }
}

/// Axis-aligned box
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RectValue {
    points: [PointValue; 2],
}

impl RectValue {
    /// Create a box; every coordinate of `lower_left` must be at most the
    /// matching coordinate of `upper_right`
    pub fn new(lower_left: PointValue, upper_right: PointValue) -> ValueResult<Self> {
        same_crs([&lower_left, &upper_right])?;
        let inverted = lower_left
            .coordinate()
            .iter()
            .zip(upper_right.coordinate())
            .any(|(lo, hi)| lo > hi);
        if inverted {
            return Err(ValueError::invalid_argument(format!(
                "Lower corner {lower_left} is above upper corner {upper_right}"
            )));
        }
        Ok(Self {
            points: [lower_left, upper_right],
        })
    }

    pub fn lower_left(&self) -> &PointValue {
        &self.points[0]
    }

    pub fn upper_right(&self) -> &PointValue {
        &self.points[1]
    }

    pub fn crs(&self) -> Crs {
        self.points[0].crs()
    }

    pub fn points(&self) -> &[PointValue] {
        &self.points
    }
}

/// Polygon given by its vertices; the ring is implicitly closed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolygonValue {
    vertices: Arc<[PointValue]>,
}

impl PolygonValue {
    pub const MIN_VERTICES: usize = 3;

    pub fn new(vertices: Vec<PointValue>) -> ValueResult<Self> {
        Self::with_limits(vertices, &ValueLimits::unlimited())
    }

    pub fn with_limits(vertices: Vec<PointValue>, limits: &ValueLimits) -> ValueResult<Self> {
        if vertices.len() < Self::MIN_VERTICES {
            return Err(ValueError::invalid_argument(format!(
                "A polygon needs at least {} vertices, got {}",
                Self::MIN_VERTICES,
                vertices.len()
            )));
        }
        limits.check_shape_points(vertices.len())?;
        same_crs(&vertices)?;
        Ok(Self {
            vertices: vertices.into(),
        })
    }

    pub fn vertices(&self) -> &[PointValue] {
        &self.vertices
    }

    pub fn crs(&self) -> Crs {
        self.vertices[0].crs()
    }
}

/// Circle around a center point
#[derive(Debug, Clone, PartialEq)]
pub struct CircleValue {
    center: PointValue,
    radius: f64,
}

impl CircleValue {
    pub fn new(center: PointValue, radius: f64) -> ValueResult<Self> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(ValueError::invalid_argument(format!(
                "Circle radius must be finite and not negative, got {radius}"
            )));
        }
        Ok(Self { center, radius })
    }

    pub fn center(&self) -> &PointValue {
        &self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn crs(&self) -> Crs {
        self.center.crs()
    }
}

impl Eq for CircleValue {}

/// Shapes sharing one coordinate reference system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionValue {
    crs: Crs,
    shapes: Arc<[GeoValue]>,
}

impl CollectionValue {
    pub fn new(crs: Crs, shapes: Vec<GeoValue>) -> ValueResult<Self> {
        Self::with_limits(crs, shapes, &ValueLimits::unlimited())
    }

    pub fn with_limits(crs: Crs, shapes: Vec<GeoValue>, limits: &ValueLimits) -> ValueResult<Self> {
        limits.check_shape_points(shapes.len())?;
        if let Some(shape) = shapes.iter().find(|s| s.crs() != crs) {
            return Err(ValueError::invalid_argument(format!(
                "Collection in {crs} cannot hold a shape in {}",
                shape.crs()
            )));
        }
        Ok(Self {
            crs,
            shapes: shapes.into(),
        })
    }

    pub fn crs(&self) -> Crs {
        self.crs
    }

    pub fn shapes(&self) -> &[GeoValue] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> PointValue {
        PointValue::cartesian(x, y).unwrap()
    }

    #[test]
    fn test_mixed_crs_rejected() {
        let geo = PointValue::wgs84(0.0, 0.0).unwrap();
        assert!(LineValue::new(p(0.0, 0.0), geo.clone()).unwrap_err().is_invalid_argument());
        assert!(PolygonValue::new(vec![p(0.0, 0.0), p(1.0, 0.0), geo.clone()]).is_err());

        let collection = CollectionValue::new(Crs::Cartesian, vec![GeoValue::Point(geo)]);
        assert!(collection.is_err());
    }

    #[test]
    fn test_rect_corners_ordered() {
        assert!(RectValue::new(p(0.0, 0.0), p(1.0, 1.0)).is_ok());
        assert!(RectValue::new(p(2.0, 0.0), p(1.0, 1.0)).is_err());
    }

    #[test]
    fn test_polygon_vertex_limits() {
        assert!(PolygonValue::new(vec![p(0.0, 0.0), p(1.0, 0.0)]).is_err());
        let limits = ValueLimits {
            max_shape_points: 3,
            ..ValueLimits::default()
        };
        let square = vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)];
        assert!(PolygonValue::with_limits(square.clone(), &limits).is_err());
        assert_eq!(PolygonValue::new(square).unwrap().vertices().len(), 4);
    }

    #[test]
    fn test_circle_radius() {
        assert!(CircleValue::new(p(0.0, 0.0), -1.0).is_err());
        assert!(CircleValue::new(p(0.0, 0.0), f64::INFINITY).is_err());
        assert_eq!(CircleValue::new(p(0.0, 0.0), 0.0).unwrap().radius(), 0.0);
    }
}
