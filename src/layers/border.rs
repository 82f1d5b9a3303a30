/// Border tile layer: concentric ring pairs per cell. The default output
/// is the filled-pair form (outer ring plus inner ring, rendered as a
/// polygon with a hole); `render_quads` is the hollow-ring alternative
/// with one quad per hexagon edge.
use crate::constants::DEFAULT_THICKNESS;
use crate::geometry::{border_edge_quads, build_border};
use crate::hierarchy::HexTileHierarchy;
use crate::layers::{PolygonRecord, SummaryFn, vertex};
use crate::property::CellSummary;

pub struct HexTileBorderLayerProps {
    /// (inner, outer) scale pair relative to the raw cell boundary.
    pub thickness: [f64; 2],
    /// Continuous resolution fraction in [0,1], zoom-derived.
    pub resolution: f64,
    pub raised: bool,
    pub elevation: Option<SummaryFn>,
}

impl Default for HexTileBorderLayerProps {
    fn default() -> Self {
        Self {
            thickness: DEFAULT_THICKNESS,
            resolution: 0.0,
            raised: false,
            elevation: None,
        }
    }
}

pub struct HexTileBorderLayer {
    props: HexTileBorderLayerProps,
    hextiles: Option<HexTileHierarchy>,
}

impl HexTileBorderLayer {
    pub fn new(data: HexTileHierarchy, props: HexTileBorderLayerProps) -> Self {
        Self {
            props,
            hextiles: Some(data),
        }
    }

    pub fn uninitialized(props: HexTileBorderLayerProps) -> Self {
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

    pub fn props_mut(&mut self) -> &mut HexTileBorderLayerProps {
        &mut self.props
    }

    fn elevation_of(&self, properties: &CellSummary) -> f64 {
        if !self.props.raised {
            return 0.0;
        }
        self.props
            .elevation
            .as_ref()
            .map(|get| get(properties))
            .unwrap_or(0.0)
    }

    /// Filled-pair form: each record's polygon is [outer ring, inner ring].
    pub fn render(&self) -> Vec<PolygonRecord<'_>> {
        let Some(hextiles) = &self.hextiles else {
            return Vec::new();
        };
        let level = hextiles.level_for(self.props.resolution);

        let mut polygons = Vec::with_capacity(level.len());
        for (&cell, properties) in level {
            let rings = build_border(cell, self.props.thickness);
            let z = self.elevation_of(properties);
            polygons.push(PolygonRecord {
                polygon: vec![
                    rings.outer.iter().map(|v| vertex(v.x, v.y, z)).collect(),
                    rings.inner.iter().map(|v| vertex(v.x, v.y, z)).collect(),
                ],
                properties,
            });
        }
        polygons
    }

    /// Hollow-ring form: one four-vertex polygon per hexagon edge.
    pub fn render_quads(&self) -> Vec<PolygonRecord<'_>> {
        let Some(hextiles) = &self.hextiles else {
            return Vec::new();
        };
        let level = hextiles.level_for(self.props.resolution);

        let mut polygons = Vec::new();
        for (&cell, properties) in level {
            let rings = build_border(cell, self.props.thickness);
            let z = self.elevation_of(properties);
            for quad in border_edge_quads(&rings) {
                polygons.push(PolygonRecord {
                    polygon: vec![quad.iter().map(|v| vertex(v.x, v.y, z)).collect()],
                    properties,
                });
            }
        }
        polygons
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::noise_reducer;
    use crate::binning::ResolutionRange;
    use crate::geojson::parse_feature_collection;
    use crate::rasterize::RasterizeConfig;
    use serde_json::json;

    fn hierarchy() -> HexTileHierarchy {
        let collection = json!({
            "features": [{
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[
                        [-123.14, 49.25], [-123.14, 49.26],
                        [-123.12, 49.26], [-123.12, 49.25],
                        [-123.14, 49.25],
                    ]],
                },
                "properties": {},
            }],
        });
        let features = parse_feature_collection(&collection).unwrap();
        HexTileHierarchy::from_features(
            &features,
            &RasterizeConfig::with_step(0.002),
            ResolutionRange::from_u8(7, 7).unwrap(),
            noise_reducer(314, "elevation"),
        )
        .unwrap()
    }

    #[test]
    fn test_render_emits_ring_pairs() {
        let data = hierarchy();
        let cells = data.level(0).unwrap().len();
        let layer = HexTileBorderLayer::new(data, HexTileBorderLayerProps::default());
        let records = layer.render();
        assert_eq!(records.len(), cells);
        for record in &records {
            assert_eq!(record.polygon.len(), 2);
            assert_eq!(record.polygon[0].len(), record.polygon[1].len());
        }
    }

    #[test]
    fn test_render_quads_one_per_edge() {
        let data = hierarchy();
        let layer = HexTileBorderLayer::new(data, HexTileBorderLayerProps::default());
        let pairs = layer.render();
        let quads = layer.render_quads();
        let edge_count: usize = pairs.iter().map(|r| r.polygon[0].len()).sum();
        assert_eq!(quads.len(), edge_count);
        for quad in &quads {
            assert_eq!(quad.polygon.len(), 1);
            assert_eq!(quad.polygon[0].len(), 4);
        }
    }

    #[test]
    fn test_raised_uses_summary_elevation() {
        let layer = HexTileBorderLayer::new(
            hierarchy(),
            HexTileBorderLayerProps {
                raised: true,
                elevation: Some(Box::new(|summary| {
                    summary
                        .get("elevation")
                        .and_then(|v| v.as_scalar())
                        .unwrap_or(0.0)
                })),
                ..Default::default()
            },
        );
        for record in layer.render() {
            let z = record.polygon[0][0][2];
            let expected = record
                .properties
                .get("elevation")
                .and_then(|v| v.as_scalar())
                .unwrap();
            assert_eq!(z, expected);
            for ring in &record.polygon {
                for v in ring {
                    assert_eq!(v[2], expected);
                }
            }
        }
    }
}
