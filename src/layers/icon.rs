/// Icon tile layer: marker constellations per cell. A per-cell value in
/// [0,1] picks a formation; marker spacing follows the tile edge length at
/// the selected resolution so constellations scale with zoom.
use crate::geometry::{Formation, build_markers, marker_edge_length};
use crate::h3_utils::H3Utils;
use crate::hierarchy::HexTileHierarchy;
use crate::layers::{MarkerRecord, SummaryFn, vertex};
use glam::DVec2;

pub struct IconHexTileLayerProps {
    /// Continuous resolution fraction in [0,1], zoom-derived.
    pub resolution: f64,
    /// Per-cell value in [0,1] selecting the formation. Without it every
    /// cell gets a single centered marker.
    pub value: Option<SummaryFn>,
    /// Constellation offset from the cell center, in edge-length units.
    pub offset: DVec2,
    pub raised: bool,
    pub elevation: Option<SummaryFn>,
}

impl Default for IconHexTileLayerProps {
    fn default() -> Self {
        Self {
            resolution: 0.0,
            value: None,
            offset: DVec2::ZERO,
            raised: false,
            elevation: None,
        }
    }
}

/// One frame of icon draw data: marker instances plus the mesh scale for
/// the selected resolution (1.0 at the reference resolution).
pub struct IconFrame<'a> {
    pub markers: Vec<MarkerRecord<'a>>,
    pub icon_scale: f64,
}

pub struct IconHexTileLayer {
    props: IconHexTileLayerProps,
    hextiles: Option<HexTileHierarchy>,
}

impl IconHexTileLayer {
    pub fn new(data: HexTileHierarchy, props: IconHexTileLayerProps) -> Self {
        Self {
            props,
            hextiles: Some(data),
        }
    }

    pub fn uninitialized(props: IconHexTileLayerProps) -> Self {
        Self {
            props,
            hextiles: None,
        }
    }

    /// Replace the hierarchy wholesale. The only rebuild path.
    pub fn set_data(&mut self, data: HexTileHierarchy) {
        self.hextiles = Some(data);
    }

    pub fn set_resolution(&mut self, resolution: f64) {
        self.props.resolution = resolution;
    }

    pub fn props_mut(&mut self) -> &mut IconHexTileLayerProps {
        &mut self.props
    }

    pub fn render(&self) -> IconFrame<'_> {
        let Some(hextiles) = &self.hextiles else {
            return IconFrame {
                markers: Vec::new(),
                icon_scale: 1.0,
            };
        };

        let fraction = self.props.resolution;
        let level = hextiles.level_for(fraction);
        let edge_len = marker_edge_length(hextiles.range(), fraction);
        let icon_scale = H3Utils::icon_scale(hextiles.resolution_for(fraction));

        let mut markers = Vec::new();
        for (&cell, properties) in level {
            let formation = match &self.props.value {
                Some(get) => Formation::from_fraction(get(properties)),
                None => Formation::Dot,
            };
            let z = if self.props.raised {
                self.props
                    .elevation
                    .as_ref()
                    .map(|get| get(properties))
                    .unwrap_or(0.0)
            } else {
                0.0
            };
            for position in build_markers(cell, formation, edge_len, self.props.offset) {
                markers.push(MarkerRecord {
                    position: vertex(position.x, position.y, z),
                    properties,
                });
            }
        }

        IconFrame {
            markers,
            icon_scale,
        }
    }
}
