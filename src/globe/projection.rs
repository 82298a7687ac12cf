//! Latitude/longitude to sphere projection for globe markers.
//!
//! The polar axis is `y`, so latitude maps to height on screen:
//!
//! ```text
//! x = r * cos(lat) * cos(lon)
//! y = r * sin(lat)
//! z = r * cos(lat) * sin(lon)
//! ```
//!
//! Coordinates are not range-checked. A latitude past the poles or a
//! longitude outside [-180, 180] still projects to a point on the sphere,
//! which is how the globe view has always behaved.

use serde::{Deserialize, Serialize};

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A position in 3D scene space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Distance from the origin.
    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// This point scaled away from (or towards) the origin.
    pub fn scaled(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor, self.z * factor)
    }
}

/// Project `coord` onto a sphere of `radius` centred at the origin.
pub fn project_to_sphere(coord: GeoCoordinate, radius: f64) -> Point3D {
    let lat = coord.latitude.to_radians();
    let lon = coord.longitude.to_radians();
    Point3D::new(
        radius * lat.cos() * lon.cos(),
        radius * lat.sin(),
        radius * lat.cos() * lon.sin(),
    )
}

/// Configuration for marker placement on a unit globe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlobeConfig {
    /// Radius the marker dot sits at (default: 1.03, just above the surface).
    pub marker_radius: f64,
    /// Factor lifting the billboard icon above its dot (default: 1.01).
    pub icon_lift: f64,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            marker_radius: 1.03,
            icon_lift: 1.01,
        }
    }
}

/// Scene positions for one location marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerPlacement {
    pub location_id: String,
    /// Glowing dot.
    pub dot: Point3D,
    /// Camera-facing icon plane.
    pub icon: Point3D,
}

/// Dot and icon positions for a marker at `coord`.
pub fn marker_position(coord: GeoCoordinate, config: &GlobeConfig) -> (Point3D, Point3D) {
    let dot = project_to_sphere(coord, config.marker_radius);
    (dot, dot.scaled(config.icon_lift))
}
