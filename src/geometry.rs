/// Cell geometry builder: scaled border rings and marker constellations.
///
/// Everything here is pure per-cell math; boundary vertex counts come from
/// the grid (6 for hexagons, 5 at pentagons) and are never assumed.
use crate::binning::ResolutionRange;
use crate::h3_utils::H3Utils;
use crate::math_utils::{lerp, quantize};
use glam::DVec2;
use h3o::CellIndex;

/// Outer/inner scaled copies of a cell's boundary, equal in length to the
/// raw boundary. thickness 1.0 reproduces the boundary exactly; 0.0
/// collapses every vertex onto the center.
#[derive(Debug, Clone)]
pub struct BorderRings {
    pub outer: Vec<DVec2>,
    pub inner: Vec<DVec2>,
}

/// Cell boundary as (lng, lat) vectors.
pub fn cell_outline(cell: CellIndex) -> Vec<DVec2> {
    H3Utils::cell_boundary(cell)
        .iter()
        .map(|v| DVec2::new(v.lng(), v.lat()))
        .collect()
}

/// Lerp every ring vertex toward the center, independently per axis.
pub fn scale_ring(center: DVec2, ring: &[DVec2], thickness: f64) -> Vec<DVec2> {
    ring.iter()
        .map(|v| {
            DVec2::new(
                lerp(center.x, v.x, thickness),
                lerp(center.y, v.y, thickness),
            )
        })
        .collect()
}

/// Border/ring mode: two concentric scaled boundaries for a cell, outer
/// from `thickness[1]`, inner from `thickness[0]`.
pub fn build_border(cell: CellIndex, thickness: [f64; 2]) -> BorderRings {
    let center_ll = H3Utils::cell_center(cell);
    let center = DVec2::new(center_ll.lng(), center_ll.lat());
    let outline = cell_outline(cell);
    BorderRings {
        outer: scale_ring(center, &outline, thickness[1]),
        inner: scale_ring(center, &outline, thickness[0]),
    }
}

/// Optional hollow-ring form: one four-point quad per boundary edge,
/// spanning the outer and inner rings.
pub fn border_edge_quads(rings: &BorderRings) -> Vec<[DVec2; 4]> {
    let count = rings.outer.len();
    let mut quads = Vec::with_capacity(count);
    for i in 0..count {
        let next = (i + 1) % count;
        quads.push([
            rings.inner[next],
            rings.inner[i],
            rings.outer[i],
            rings.outer[next],
        ]);
    }
    quads
}

/// Named marker layouts within one cell, in unit offsets relative to the
/// cell center. Quantized from a value in [0,1], ascending by marker count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formation {
    Dot,
    Line,
    Triangle,
    Square,
    House,
    Rectangle,
    Hexagon,
}

const DOT: [DVec2; 1] = [DVec2::new(0.0, 0.0)];
const LINE: [DVec2; 2] = [DVec2::new(0.0, 0.33), DVec2::new(0.0, -0.33)];
const TRIANGLE: [DVec2; 3] = [
    DVec2::new(-0.33, -0.33),
    DVec2::new(0.33, -0.33),
    DVec2::new(0.0, 0.29),
];
const SQUARE: [DVec2; 4] = [
    DVec2::new(-0.33, -0.33),
    DVec2::new(0.33, -0.33),
    DVec2::new(-0.33, 0.33),
    DVec2::new(0.33, 0.33),
];
const HOUSE: [DVec2; 5] = [
    DVec2::new(-0.33, -0.67),
    DVec2::new(0.33, -0.67),
    DVec2::new(-0.33, 0.0),
    DVec2::new(0.33, 0.0),
    DVec2::new(0.0, 0.58),
];
const RECTANGLE: [DVec2; 6] = [
    DVec2::new(-0.33, -0.67),
    DVec2::new(0.33, -0.67),
    DVec2::new(-0.33, 0.0),
    DVec2::new(0.33, 0.0),
    DVec2::new(-0.33, 0.67),
    DVec2::new(0.33, 0.67),
];
const HEXAGON: [DVec2; 7] = [
    DVec2::new(0.0, 0.0),
    DVec2::new(-0.67, 0.0),
    DVec2::new(0.67, 0.0),
    DVec2::new(-0.33, 0.58),
    DVec2::new(0.33, 0.58),
    DVec2::new(-0.33, -0.58),
    DVec2::new(0.33, -0.58),
];

impl Formation {
    pub const ALL: [Formation; 7] = [
        Formation::Dot,
        Formation::Line,
        Formation::Triangle,
        Formation::Square,
        Formation::House,
        Formation::Rectangle,
        Formation::Hexagon,
    ];

    /// Quantize a value in [0,1] into the catalog: seven equal buckets,
    /// inclusive at both ends.
    pub fn from_fraction(value: f64) -> Formation {
        Formation::ALL[quantize(value, Formation::ALL.len())]
    }

    pub fn offsets(&self) -> &'static [DVec2] {
        match self {
            Formation::Dot => &DOT,
            Formation::Line => &LINE,
            Formation::Triangle => &TRIANGLE,
            Formation::Square => &SQUARE,
            Formation::House => &HOUSE,
            Formation::Rectangle => &RECTANGLE,
            Formation::Hexagon => &HEXAGON,
        }
    }
}

/// Marker-placement mode: final (lng, lat) positions for each marker of a
/// formation, scaled by the per-resolution edge length and shifted by a
/// global offset (also in edge-length units).
pub fn build_markers(
    cell: CellIndex,
    formation: Formation,
    edge_length_deg: f64,
    offset: DVec2,
) -> Vec<DVec2> {
    let center_ll = H3Utils::cell_center(cell);
    let center = DVec2::new(center_ll.lng(), center_ll.lat());
    formation
        .offsets()
        .iter()
        .map(|unit| center + (*unit + offset) * edge_length_deg)
        .collect()
}

/// Edge length in degree space for the resolution a fraction selects
/// within a range, so markers shrink and grow with their tiles.
pub fn marker_edge_length(range: ResolutionRange, fraction: f64) -> f64 {
    let index = quantize(fraction, range.len());
    let resolution = range.at(index).expect("quantize stays within the range");
    H3Utils::marker_edge_length_deg(resolution)
}
