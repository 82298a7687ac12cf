//! Globe geometry: projection of geographic coordinates onto a sphere,
//! marker placement, and sighting locations.

mod projection;
mod sighting;

pub use projection::{GeoCoordinate, GlobeConfig, MarkerPlacement, Point3D, marker_position, project_to_sphere};
pub use sighting::{
    Animal, EARTH_RADIUS_KM, NearestSighting, SightingLocation, haversine_km, nearest_sightings, parse_locations,
    place_markers, sample_locations,
};
