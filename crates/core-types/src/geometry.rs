use serde::{Deserialize, Serialize};

/// Spatial reference identifier for WGS 84 longitude/latitude degrees.
/// Every point written by this system is tagged with it.
pub const SRID_WGS84: i32 = 4326;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeometryType {
    Point,
}

/// A GeoJSON `Point` geometry: `{"type":"Point","coordinates":[lon,lat]}`.
///
/// Coordinates are stored in GeoJSON axis order, longitude first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoJsonPoint {
    #[serde(rename = "type")]
    pub kind: GeometryType,
    pub coordinates: [f64; 2],
}

impl GeoJsonPoint {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self {
            kind: GeometryType::Point,
            coordinates: [lon, lat],
        }
    }

    pub fn lon(&self) -> f64 {
        self.coordinates[0]
    }

    pub fn lat(&self) -> f64 {
        self.coordinates[1]
    }
}
