/// Thin facade over the h3o hex grid used by the binner and the geometry
/// builder. The grid's contract is load-bearing: the cell for a point is a
/// deterministic function of (lat, lng, resolution), and a cell boundary
/// has a variable vertex count (6 for hexagons, 5 at pentagons).
use crate::constants::{MARKER_EDGE_KM_TO_DEG, MARKER_EDGE_SCALE, MARKER_REFERENCE_RESOLUTION};
use crate::error::HexTileError;
use h3o::{CellIndex, LatLng, Resolution};

pub struct H3Utils;

impl H3Utils {
    /// Cell containing a point at the given resolution.
    pub fn cell_for(lat: f64, lng: f64, resolution: Resolution) -> Result<CellIndex, HexTileError> {
        let coord =
            LatLng::new(lat, lng).map_err(|_| HexTileError::InvalidCoordinate { lat, lng })?;
        Ok(coord.to_cell(resolution))
    }

    /// Cell center in degrees.
    pub fn cell_center(cell: CellIndex) -> LatLng {
        LatLng::from(cell)
    }

    /// Cell boundary vertices in degrees. Not assumed to be six entries.
    pub fn cell_boundary(cell: CellIndex) -> Vec<LatLng> {
        cell.boundary().iter().copied().collect()
    }

    /// Average hexagon edge length at a resolution, in km.
    pub fn edge_length_km(resolution: Resolution) -> f64 {
        resolution.edge_length_km()
    }

    /// Marker layout edge length in degrees at a resolution.
    pub fn marker_edge_length_deg(resolution: Resolution) -> f64 {
        Self::edge_length_km(resolution) / MARKER_EDGE_KM_TO_DEG * MARKER_EDGE_SCALE
    }

    /// Mesh scale for icons at a resolution, relative to the reference
    /// resolution (1.0 at the reference, smaller at finer resolutions).
    pub fn icon_scale(resolution: Resolution) -> f64 {
        Self::edge_length_km(resolution) / Self::edge_length_km(MARKER_REFERENCE_RESOLUTION)
    }

    /// Parse a cell id from its canonical hex-string form (the key format
    /// of pre-binned datasets).
    pub fn parse_cell(id: &str) -> Result<CellIndex, HexTileError> {
        id.parse::<CellIndex>()
            .map_err(|e| HexTileError::MalformedDataset(format!("bad cell id {:?}: {}", id, e)))
    }
}
