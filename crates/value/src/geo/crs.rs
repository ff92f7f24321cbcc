//! Coordinate reference systems

use core::fmt::{Display, Formatter};

use crate::error::{ValueError, ValueResult};

/// Coordinate reference system of a geo value
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Crs {
    Cartesian,
    Cartesian3D,
    Wgs84,
    Wgs84_3D,
}

impl Crs {
    /// All supported systems
    pub const ALL: [Self; 4] = [Self::Cartesian, Self::Cartesian3D, Self::Wgs84, Self::Wgs84_3D];

    /// EPSG / SR-ORG code
    pub const fn code(&self) -> i32 {
        match self {
            Self::Cartesian => 7203,
            Self::Cartesian3D => 9157,
            Self::Wgs84 => 4326,
            Self::Wgs84_3D => 4979,
        }
    }

    /// Lower-case name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Cartesian => "cartesian",
            Self::Cartesian3D => "cartesian-3d",
            Self::Wgs84 => "wgs-84",
            Self::Wgs84_3D => "wgs-84-3d",
        }
    }

    /// Number of coordinates per point
    pub const fn dimension(&self) -> usize {
        match self {
            Self::Cartesian | Self::Wgs84 => 2,
            Self::Cartesian3D | Self::Wgs84_3D => 3,
        }
    }

    /// Check if coordinates are longitude/latitude(/height)
    pub const fn is_geographic(&self) -> bool {
        matches!(self, Self::Wgs84 | Self::Wgs84_3D)
    }

    /// Look up by code
    pub fn from_code(code: i32) -> ValueResult<Self> {
        Self::ALL
            .into_iter()
            .find(|crs| crs.code() == code)
            .ok_or_else(|| ValueError::invalid_argument(format!("Unknown coordinate reference system code: {code}")))
    }

    /// Look up by name, ignoring case
    pub fn from_name(name: &str) -> ValueResult<Self> {
        Self::ALL
            .into_iter()
            .find(|crs| crs.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| ValueError::invalid_argument(format!("Unknown coordinate reference system: '{name}'")))
    }
}

impl Display for Crs {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
