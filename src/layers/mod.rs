/// Composite render-layer adapters: orchestrate the hierarchy, the LOD
/// selector and the geometry builder into per-frame draw data for the
/// external rendering library.
///
/// Each layer owns its hierarchy. Construction puts a layer in the built
/// state; only `set_data` rebuilds by wholesale replacement. Zoom and
/// time-counter changes are plain prop updates that re-run `render` on the
/// already-built hierarchy.
pub mod border;
pub mod icon;
pub mod solid;

pub use border::{HexTileBorderLayer, HexTileBorderLayerProps};
pub use icon::{IconFrame, IconHexTileLayer, IconHexTileLayerProps};
pub use solid::{SolidHexTileLayer, SolidHexTileLayerProps};

use crate::property::CellSummary;

/// Caller-supplied accessor evaluated on a cell summary (elevation, marker
/// value, and similar per-cell reads).
pub type SummaryFn = Box<dyn Fn(&CellSummary) -> f64>;

/// One filled polygon for the renderer: one or more vertex rings (a ring
/// pair reads as a polygon with a hole) plus the cell's summary.
pub struct PolygonRecord<'a> {
    pub polygon: Vec<Vec<[f64; 3]>>,
    pub properties: &'a CellSummary,
}

/// One marker instance for the renderer's mesh layer.
pub struct MarkerRecord<'a> {
    pub position: [f64; 3],
    pub properties: &'a CellSummary,
}

pub(crate) fn vertex(x: f64, y: f64, z: f64) -> [f64; 3] {
    [x, y, z]
}
