use h3o::Resolution;

// Rasterization step sizes in degrees. Fine sampling resolves city-block
// scale features; coarse sampling is for large regional polygons.
pub const FINE_STEP_DEG: f64 = 0.0005;
pub const COARSE_STEP_DEG: f64 = 0.01;

// Default inset/outset pair for border rings, as a fraction of the
// center-to-vertex distance.
pub const DEFAULT_THICKNESS: [f64; 2] = [0.7, 0.9];

// Marker layout: the hexagon edge length in km is mapped into degree space
// by this divisor, then widened so formations fill the tile interior.
pub const MARKER_EDGE_KM_TO_DEG: f64 = 250.0;
pub const MARKER_EDGE_SCALE: f64 = 1.75;

// Resolution whose edge length defines icon scale 1.0. Markers at finer
// resolutions shrink proportionally to their tile.
pub const MARKER_REFERENCE_RESOLUTION: Resolution = Resolution::Five;

// Monthly time steps in the reference datasets: 100 years of months plus a
// trailing summary slot.
pub const TIME_SERIES_LEN: usize = 1201;
