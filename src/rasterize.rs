/// Polygon rasterizer: converts a region feature into a dense set of
/// interior sample points on a regular lon/lat grid.
///
/// Cost is O(bbox area / step²), so the step size is the accuracy/cost
/// trade-off and always comes from the caller's config.
use crate::constants::FINE_STEP_DEG;
use crate::geojson::RegionFeature;
use crate::property::SharedBag;
use geo::{BoundingRect, Coord, LineString, MultiPolygon};
use log::debug;

/// One interior grid point, sharing its source feature's bag.
#[derive(Debug, Clone)]
pub struct SamplePoint {
    pub lng: f64,
    pub lat: f64,
    pub properties: SharedBag,
}

#[derive(Debug, Clone, Copy)]
pub struct RasterizeConfig {
    /// Grid step in degrees, applied to both axes.
    pub step_deg: f64,
}

impl Default for RasterizeConfig {
    fn default() -> Self {
        Self {
            step_deg: FINE_STEP_DEG,
        }
    }
}

impl RasterizeConfig {
    pub fn with_step(step_deg: f64) -> Self {
        Self { step_deg }
    }
}

/// Walk the feature's bounding box and keep the grid points its geometry
/// contains. A degenerate or empty geometry yields zero points, not an
/// error.
pub fn rasterize(feature: &RegionFeature, config: &RasterizeConfig) -> Vec<SamplePoint> {
    let mut points = Vec::new();
    let Some(bounds) = feature.geometry.bounding_rect() else {
        return points;
    };
    let step = config.step_deg;
    if step <= 0.0 {
        return points;
    }

    let mut lat = bounds.min().y;
    while lat <= bounds.max().y {
        let mut lng = bounds.min().x;
        while lng <= bounds.max().x {
            if contains_half_open(&feature.geometry, Coord { x: lng, y: lat }) {
                points.push(SamplePoint {
                    lng,
                    lat,
                    properties: feature.properties.clone(),
                });
            }
            lng += step;
        }
        lat += step;
    }

    debug!(
        "rasterized feature at step {}°: {} interior points",
        step,
        points.len()
    );
    points
}

/// Rasterize a whole collection into one flat point list.
pub fn rasterize_features(features: &[RegionFeature], config: &RasterizeConfig) -> Vec<SamplePoint> {
    let mut points = Vec::new();
    for feature in features {
        points.extend(rasterize(feature, config));
    }
    points
}

/// Even-odd containment over every ring of the multipolygon, with a
/// half-open edge convention: points on a cell's lesser-coordinate edges
/// count as inside, points on the greater edges do not. Interior rings
/// (holes) toggle back out.
fn contains_half_open(geometry: &MultiPolygon<f64>, point: Coord<f64>) -> bool {
    let mut inside = false;
    for polygon in &geometry.0 {
        ray_cast_ring(polygon.exterior(), point, &mut inside);
        for hole in polygon.interiors() {
            ray_cast_ring(hole, point, &mut inside);
        }
    }
    inside
}

fn ray_cast_ring(ring: &LineString<f64>, point: Coord<f64>, inside: &mut bool) {
    let coords = &ring.0;
    if coords.len() < 2 {
        return;
    }
    for edge in coords.windows(2) {
        let (a, b) = (edge[0], edge[1]);
        if (a.y > point.y) != (b.y > point.y) {
            let x_at = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < x_at {
                *inside = !*inside;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::PropertyBag;
    use geo::{LineString, Polygon};
    use std::sync::Arc;

    fn square_feature() -> RegionFeature {
        let exterior = LineString::from(vec![
            (0.0, 0.0),
            (0.0, 1.0),
            (1.0, 1.0),
            (1.0, 0.0),
            (0.0, 0.0),
        ]);
        RegionFeature {
            geometry: MultiPolygon(vec![Polygon::new(exterior, vec![])]),
            properties: Arc::new(PropertyBag::new()),
        }
    }

    #[test]
    fn test_unit_square_half_open_convention() {
        // step 0.5 grid over the bbox; the half-open convention keeps
        // exactly the four points on the lesser side of each axis
        let points = rasterize(&square_feature(), &RasterizeConfig::with_step(0.5));
        let mut got: Vec<(f64, f64)> = points.iter().map(|p| (p.lng, p.lat)).collect();
        got.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(
            got,
            vec![(0.0, 0.0), (0.0, 0.5), (0.5, 0.0), (0.5, 0.5)]
        );
    }

    #[test]
    fn test_empty_geometry_yields_zero_points() {
        let feature = RegionFeature {
            geometry: MultiPolygon(vec![]),
            properties: Arc::new(PropertyBag::new()),
        };
        assert!(rasterize(&feature, &RasterizeConfig::default()).is_empty());
    }

    #[test]
    fn test_step_larger_than_feature() {
        // only the bbox origin lands on the grid
        let points = rasterize(&square_feature(), &RasterizeConfig::with_step(5.0));
        assert_eq!(points.len(), 1);
        assert_eq!((points[0].lng, points[0].lat), (0.0, 0.0));
    }

    #[test]
    fn test_hole_is_excluded() {
        let exterior = LineString::from(vec![
            (0.0, 0.0),
            (0.0, 4.0),
            (4.0, 4.0),
            (4.0, 0.0),
            (0.0, 0.0),
        ]);
        let hole = LineString::from(vec![
            (1.0, 1.0),
            (1.0, 3.0),
            (3.0, 3.0),
            (3.0, 1.0),
            (1.0, 1.0),
        ]);
        let feature = RegionFeature {
            geometry: MultiPolygon(vec![Polygon::new(exterior, vec![hole])]),
            properties: Arc::new(PropertyBag::new()),
        };
        let points = rasterize(&feature, &RasterizeConfig::with_step(1.0));
        assert!(!points.iter().any(|p| (p.lng, p.lat) == (2.0, 2.0)));
        assert!(points.iter().any(|p| (p.lng, p.lat) == (0.0, 0.0)));
    }

    #[test]
    fn test_points_share_the_feature_bag() {
        let feature = square_feature();
        let points = rasterize(&feature, &RasterizeConfig::with_step(0.5));
        for point in &points {
            assert!(Arc::ptr_eq(&point.properties, &feature.properties));
        }
    }
}
