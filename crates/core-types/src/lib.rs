//! Shared data model for the geotrack API: request bodies, stored records and
//! the GeoJSON geometry used to expose roster positions.

pub mod geometry;
pub mod records;

// Re-export the core types to provide a clean public API.
pub use geometry::{GeoJsonPoint, GeometryType, SRID_WGS84};
pub use records::{
    ChildList, ChildRecord, Coordinates, InsertedId, NewChild, PositionRecord,
};
