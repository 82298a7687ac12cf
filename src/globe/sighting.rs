//! Wildlife sighting locations shown on the globe.
//!
//! Locations arrive from the app's bundled `animals.json`:
//!
//! ```json
//! [{"id": "af-savannah", "latitude": -1.5, "longitude": 36.8,
//!   "animals": [{"name": "Lion", "symbolSystemName": "lizard"}]}]
//! ```
//!
//! Besides decoding, this module places one marker per location and answers
//! "which sightings are closest to me" by great-circle distance.

use log::debug;
use serde::{Deserialize, Serialize};

use super::projection::{GeoCoordinate, GlobeConfig, MarkerPlacement, marker_position};
use crate::error::GeometryResult;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animal {
    pub name: String,
    /// Icon name used for the marker billboard.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol_system_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SightingLocation {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub animals: Vec<Animal>,
}

impl SightingLocation {
    pub fn coordinate(&self) -> GeoCoordinate {
        GeoCoordinate::new(self.latitude, self.longitude)
    }
}

/// A sighting with its distance from a query origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearestSighting {
    pub location_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub distance_km: f64,
}

/// Decode a JSON array of sighting locations.
pub fn parse_locations(json: &str) -> GeometryResult<Vec<SightingLocation>> {
    let locations: Vec<SightingLocation> = serde_json::from_str(json)?;
    debug!("decoded {} sighting locations", locations.len());
    Ok(locations)
}

/// The built-in locations used when no data file is available.
pub fn sample_locations() -> Vec<SightingLocation> {
    fn animal(name: &str, symbol: &str) -> Animal {
        Animal {
            name: name.to_string(),
            symbol_system_name: Some(symbol.to_string()),
        }
    }

    vec![
        SightingLocation {
            id: "na-arctic".to_string(),
            latitude: 71.0,
            longitude: -42.0,
            animals: vec![animal("Polar Bear", "pawprint"), animal("Arctic Fox", "hare")],
        },
        SightingLocation {
            id: "af-savannah".to_string(),
            latitude: -1.5,
            longitude: 36.8,
            animals: vec![animal("Elephant", "tortoise"), animal("Lion", "lizard")],
        },
        SightingLocation {
            id: "au-reef".to_string(),
            latitude: -16.9,
            longitude: 145.8,
            animals: vec![animal("Sea Turtle", "tortoise"), animal("Dolphin", "fish")],
        },
    ]
}

/// One marker per location, in input order.
pub fn place_markers(locations: &[SightingLocation], config: &GlobeConfig) -> Vec<MarkerPlacement> {
    locations
        .iter()
        .map(|location| {
            let (dot, icon) = marker_position(location.coordinate(), config);
            MarkerPlacement {
                location_id: location.id.clone(),
                dot,
                icon,
            }
        })
        .collect()
}

/// Great-circle distance between two coordinates, in kilometres.
pub fn haversine_km(a: GeoCoordinate, b: GeoCoordinate) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let dphi = (b.latitude - a.latitude).to_radians();
    let dlambda = (b.longitude - a.longitude).to_radians();

    // Rounding can push h just past 1 for antipodal pairs.
    let h = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// The `k` locations closest to `origin`, nearest first.
///
/// Equal distances keep input order. `k = 0` gives an empty result.
pub fn nearest_sightings(
    locations: &[SightingLocation],
    origin: GeoCoordinate,
    k: usize,
) -> Vec<NearestSighting> {
    let mut ranked: Vec<NearestSighting> = locations
        .iter()
        .map(|location| NearestSighting {
            location_id: location.id.clone(),
            latitude: location.latitude,
            longitude: location.longitude,
            distance_km: haversine_km(origin, location.coordinate()),
        })
        .collect();

    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    ranked.truncate(k);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeometryError;

    #[test]
    fn test_haversine_known_distance() {
        let london = GeoCoordinate::new(51.5074, -0.1278);
        let paris = GeoCoordinate::new(48.8566, 2.3522);
        let d = haversine_km(london, paris);
        assert!((d - 343.556).abs() < 0.01, "got {d}");
        assert!((haversine_km(paris, london) - d).abs() < 1e-9);
    }

    #[test]
    fn test_haversine_extremes() {
        let p = GeoCoordinate::new(-16.9, 145.8);
        assert_eq!(haversine_km(p, p), 0.0);

        let half_turn = haversine_km(GeoCoordinate::new(0.0, 0.0), GeoCoordinate::new(0.0, 180.0));
        assert!((half_turn - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn test_haversine_antipodal_is_finite() {
        // sin^2 terms sum to just over 1 for this pair.
        let origin = GeoCoordinate::new(-25.2, -54.0);
        let antipode = GeoCoordinate::new(25.2, 126.0);
        let d = haversine_km(origin, antipode);
        assert!(d.is_finite(), "got {d}");
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-3);
    }

    #[test]
    fn test_nearest_sightings_antipodal_origin() {
        let location = |id: &str, latitude, longitude| SightingLocation {
            id: id.to_string(),
            latitude,
            longitude,
            animals: Vec::new(),
        };
        let locations = vec![location("antipode", 25.2, 126.0), location("near", -25.0, -54.0)];
        let origin = GeoCoordinate::new(-25.2, -54.0);

        let nearest = nearest_sightings(&locations, origin, 1);
        assert_eq!(nearest.len(), 1);
        assert_eq!(nearest[0].location_id, "near");
        assert!((nearest[0].distance_km - 22.239).abs() < 0.01);
    }

    #[test]
    fn test_nearest_sightings_order() {
        let locations = sample_locations();
        let nairobi = GeoCoordinate::new(-1.29, 36.82);

        let nearest = nearest_sightings(&locations, nairobi, 5);
        let ids: Vec<_> = nearest.iter().map(|n| n.location_id.as_str()).collect();
        assert_eq!(ids, vec!["af-savannah", "na-arctic", "au-reef"]);
        assert!((nearest[0].distance_km - 23.4565).abs() < 0.01);
        assert!(nearest.windows(2).all(|w| w[0].distance_km <= w[1].distance_km));
    }

    #[test]
    fn test_nearest_sightings_truncates() {
        let locations = sample_locations();
        let origin = GeoCoordinate::new(-20.0, 140.0);

        let top = nearest_sightings(&locations, origin, 1);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].location_id, "au-reef");

        assert!(nearest_sightings(&locations, origin, 0).is_empty());
        assert!(nearest_sightings(&[], origin, 3).is_empty());
    }

    #[test]
    fn test_nearest_sightings_ties_keep_input_order() {
        let mut locations = sample_locations();
        let mut twin = locations[1].clone();
        twin.id = "af-twin".to_string();
        locations.push(twin);

        let origin = GeoCoordinate::new(-1.5, 36.8);
        let nearest = nearest_sightings(&locations, origin, 2);
        assert_eq!(nearest[0].location_id, "af-savannah");
        assert_eq!(nearest[1].location_id, "af-twin");
    }

    #[test]
    fn test_parse_locations() {
        let json = r#"[
            {"id": "eu-alps", "latitude": 46.5, "longitude": 10.0,
             "animals": [{"name": "Ibex", "symbolSystemName": "hare"}, {"name": "Marmot"}]}
        ]"#;
        let locations = parse_locations(json).unwrap();
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].id, "eu-alps");
        assert_eq!(locations[0].animals[0].symbol_system_name.as_deref(), Some("hare"));
        assert_eq!(locations[0].animals[1].symbol_system_name, None);
    }

    #[test]
    fn test_parse_locations_rejects_bad_json() {
        let err = parse_locations(r#"[{"id": "x"}]"#).unwrap_err();
        assert!(matches!(err, GeometryError::Decode(_)));
    }

    #[test]
    fn test_sample_round_trips_through_json() {
        let json = serde_json::to_string(&sample_locations()).unwrap();
        assert!(json.contains("\"symbolSystemName\":\"pawprint\""));
        assert_eq!(parse_locations(&json).unwrap(), sample_locations());
    }

    #[test]
    fn test_place_markers() {
        let locations = sample_locations();
        let markers = place_markers(&locations, &GlobeConfig::default());

        assert_eq!(markers.len(), 3);
        assert_eq!(markers[0].location_id, "na-arctic");
        for marker in &markers {
            assert!((marker.dot.length() - 1.03).abs() < 1e-9);
            assert!((marker.icon.length() - 1.03 * 1.01).abs() < 1e-9);
        }
        // 71N sits high on the y axis.
        assert!(markers[0].dot.y > 0.9);
    }
}
