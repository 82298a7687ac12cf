//! Aura Geometry - WASM Module
//!
//! This module provides the geometry behind the Aura wildlife-deterrence
//! dashboard: the simulated sensor mesh and the sightings globe. It is
//! compiled to WebAssembly and exposes a JavaScript-friendly API via
//! wasm-bindgen. Rendering, animation and selection state stay in the UI.
//!
//! # Architecture
//!
//! - `layout`: Deterministic mesh point layout and threshold adjacency
//! - `graph`: Node/edge types and the petgraph-backed `MeshGraph`
//! - `spatial`: Nearest-point lookup and R-tree hit testing
//! - `globe`: Sphere projection, marker placement, sighting distances

use js_sys::Float64Array;
use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

pub mod error;
pub mod globe;
pub mod graph;
pub mod layout;
pub mod spatial;

pub use error::{GeometryError, GeometryResult};

use globe::{GeoCoordinate, GlobeConfig, SightingLocation};
use graph::{MeshGraph, NodeId, Point2D};
use layout::{GraphLayout, LayoutSize, MeshLayoutConfig};

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// The simulated sensor mesh exposed to JavaScript.
///
/// Holds one generated layout for a given node count and drawable size.
/// Recreate it when the drawable is resized.
#[wasm_bindgen]
pub struct MeshNetworkWasm {
    mesh: MeshGraph,
}

#[wasm_bindgen]
impl MeshNetworkWasm {
    /// Generate a mesh with the default layout configuration.
    #[wasm_bindgen(constructor)]
    pub fn new(node_count: u32, width: f64, height: f64) -> Self {
        Self {
            mesh: MeshGraph::generate(
                node_count as usize,
                LayoutSize::new(width, height),
                &MeshLayoutConfig::default(),
            ),
        }
    }

    /// Generate a mesh with a partial or full `MeshLayoutConfig` object.
    ///
    /// `undefined` or `null` selects the defaults.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(
        node_count: u32,
        width: f64,
        height: f64,
        config: JsValue,
    ) -> Result<MeshNetworkWasm, JsError> {
        let config: MeshLayoutConfig = config_from_js(config)?;
        Ok(Self {
            mesh: MeshGraph::generate(node_count as usize, LayoutSize::new(width, height), &config),
        })
    }

    /// Generate a mesh linking nodes closer than `threshold`.
    #[wasm_bindgen(js_name = withThreshold)]
    pub fn with_threshold(node_count: u32, width: f64, height: f64, threshold: f64) -> Self {
        let layout = GraphLayout::generate_with_threshold(
            node_count as usize,
            LayoutSize::new(width, height),
            &MeshLayoutConfig::default(),
            threshold,
        );
        Self {
            mesh: MeshGraph::from_layout(layout),
        }
    }

    // =========================================================================
    // Topology
    // =========================================================================

    /// Get the number of nodes in the mesh.
    #[wasm_bindgen(js_name = nodeCount)]
    pub fn node_count(&self) -> u32 {
        self.mesh.node_count()
    }

    /// Get the number of edges in the mesh.
    #[wasm_bindgen(js_name = edgeCount)]
    pub fn edge_count(&self) -> u32 {
        self.mesh.edge_count()
    }

    /// Get the number of connected sensor groups.
    #[wasm_bindgen(js_name = componentCount)]
    pub fn component_count(&self) -> u32 {
        self.mesh.component_count() as u32
    }

    /// The connection threshold the edges were built with.
    pub fn threshold(&self) -> f64 {
        self.mesh.layout().threshold()
    }

    /// Get neighbors of a node.
    ///
    /// Throws if the node does not exist.
    #[wasm_bindgen(js_name = getNeighbors)]
    pub fn get_neighbors(&self, node_id: u32) -> Result<Vec<u32>, JsError> {
        let neighbors = self.mesh.neighbors(NodeId(node_id))?;
        Ok(neighbors.into_iter().map(NodeId::raw).collect())
    }

    // =========================================================================
    // Buffer Access
    // =========================================================================

    /// Node positions as a Float64Array `[x0, y0, x1, y1, ...]`.
    #[wasm_bindgen(js_name = getPositions)]
    pub fn get_positions(&self) -> Float64Array {
        Float64Array::from(&self.mesh.positions_flat()[..])
    }

    /// Edges as a Uint32Array `[i0, j0, i1, j1, ...]`, `i < j` per pair.
    #[wasm_bindgen(js_name = getEdges)]
    pub fn get_edges(&self) -> Vec<u32> {
        self.mesh.edges_flat()
    }

    /// Returns `[min_x, min_y, max_x, max_y]`, or `undefined` for an empty mesh.
    #[wasm_bindgen(js_name = getBounds)]
    pub fn get_bounds(&self) -> Option<Vec<f64>> {
        self.mesh
            .bounds()
            .map(|(min_x, min_y, max_x, max_y)| vec![min_x, min_y, max_x, max_y])
    }

    // =========================================================================
    // Spatial Queries
    // =========================================================================

    /// Find the node nearest to a point.
    ///
    /// Throws on an empty mesh.
    #[wasm_bindgen(js_name = findNearestNode)]
    pub fn find_nearest_node(&self, x: f64, y: f64) -> Result<u32, JsError> {
        Ok(self.mesh.nearest_node(Point2D::new(x, y))?.raw())
    }

    /// Find the nearest node within `radius` of a tap.
    ///
    /// Returns `undefined` if no node is close enough.
    #[wasm_bindgen(js_name = hitTest)]
    pub fn hit_test(&self, x: f64, y: f64, radius: f64) -> Option<u32> {
        self.mesh.hit_test(Point2D::new(x, y), radius).map(NodeId::raw)
    }

    /// Find all nodes within `radius` of a point.
    #[wasm_bindgen(js_name = findNodesInRadius)]
    pub fn find_nodes_in_radius(&self, x: f64, y: f64, radius: f64) -> Vec<u32> {
        self.mesh
            .nodes_within(Point2D::new(x, y), radius)
            .into_iter()
            .map(NodeId::raw)
            .collect()
    }
}

// =============================================================================
// Globe
// =============================================================================

/// Project a latitude/longitude pair onto a sphere. Returns `[x, y, z]`.
#[wasm_bindgen(js_name = projectToSphere)]
pub fn project_to_sphere(latitude: f64, longitude: f64, radius: f64) -> Vec<f64> {
    let p = globe::project_to_sphere(GeoCoordinate::new(latitude, longitude), radius);
    vec![p.x, p.y, p.z]
}

/// Marker placements for an array of sighting locations.
///
/// `config` is a partial `GlobeConfig` object, or `undefined` for defaults.
#[wasm_bindgen(js_name = placeMarkers)]
pub fn place_markers(locations: JsValue, config: JsValue) -> Result<JsValue, JsError> {
    let locations: Vec<SightingLocation> = from_js(locations)?;
    let config: GlobeConfig = config_from_js(config)?;
    to_js(&globe::place_markers(&locations, &config))
}

/// The `k` sightings nearest to a position, nearest first.
#[wasm_bindgen(js_name = nearestSightings)]
pub fn nearest_sightings(
    locations: JsValue,
    latitude: f64,
    longitude: f64,
    k: u32,
) -> Result<JsValue, JsError> {
    let locations: Vec<SightingLocation> = from_js(locations)?;
    let origin = GeoCoordinate::new(latitude, longitude);
    to_js(&globe::nearest_sightings(&locations, origin, k as usize))
}

/// Decode the bundled sightings JSON into an array of location objects.
#[wasm_bindgen(js_name = parseLocations)]
pub fn parse_locations(json: &str) -> Result<JsValue, JsError> {
    to_js(&globe::parse_locations(json)?)
}

/// The fallback sighting locations.
#[wasm_bindgen(js_name = sampleLocations)]
pub fn sample_locations() -> Result<JsValue, JsError> {
    to_js(&globe::sample_locations())
}

fn from_js<T: DeserializeOwned>(value: JsValue) -> GeometryResult<T> {
    serde_wasm_bindgen::from_value(value).map_err(|e| GeometryError::Decode(e.to_string()))
}

fn config_from_js<T: DeserializeOwned + Default>(value: JsValue) -> GeometryResult<T> {
    if value.is_undefined() || value.is_null() {
        Ok(T::default())
    } else {
        from_js(value)
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsError::new(&e.to_string()))
}
