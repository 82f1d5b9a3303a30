/// Solid tile layer: one filled polygon per populated cell at the selected
/// LOD, optionally raised by a per-cell elevation read.
use crate::constants::DEFAULT_THICKNESS;
use crate::geometry::{cell_outline, scale_ring};
use crate::h3_utils::H3Utils;
use crate::hierarchy::HexTileHierarchy;
use crate::layers::{PolygonRecord, SummaryFn, vertex};
use glam::DVec2;

pub struct SolidHexTileLayerProps {
    /// Scale of the filled tile relative to the raw cell boundary.
    pub thickness: f64,
    /// Continuous resolution fraction in [0,1], zoom-derived.
    pub resolution: f64,
    pub raised: bool,
    pub elevation: Option<SummaryFn>,
}

impl Default for SolidHexTileLayerProps {
    fn default() -> Self {
        Self {
            thickness: DEFAULT_THICKNESS[1],
            resolution: 0.0,
            raised: false,
            elevation: None,
        }
    }
}

pub struct SolidHexTileLayer {
    props: SolidHexTileLayerProps,
    hextiles: Option<HexTileHierarchy>,
}

impl SolidHexTileLayer {
    pub fn new(data: HexTileHierarchy, props: SolidHexTileLayerProps) -> Self {
        Self {
            props,
            hextiles: Some(data),
        }
    }

    pub fn uninitialized(props: SolidHexTileLayerProps) -> Self {
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

    pub fn props_mut(&mut self) -> &mut SolidHexTileLayerProps {
        &mut self.props
    }

    /// Per-frame draw data at the current LOD.
    pub fn render(&self) -> Vec<PolygonRecord<'_>> {
        let Some(hextiles) = &self.hextiles else {
            return Vec::new();
        };
        let level = hextiles.level_for(self.props.resolution);

        let mut polygons = Vec::with_capacity(level.len());
        for (&cell, properties) in level {
            let center_ll = H3Utils::cell_center(cell);
            let center = DVec2::new(center_ll.lng(), center_ll.lat());
            let ring = scale_ring(center, &cell_outline(cell), self.props.thickness);

            let z = if self.props.raised {
                self.props
                    .elevation
                    .as_ref()
                    .map(|get| get(properties))
                    .unwrap_or(0.0)
            } else {
                0.0
            };
            polygons.push(PolygonRecord {
                polygon: vec![ring.iter().map(|v| vertex(v.x, v.y, z)).collect()],
                properties,
            });
        }
        polygons
    }
}
