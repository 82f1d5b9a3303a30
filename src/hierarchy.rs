/// The hex tile hierarchy: one sparse `CellIndex → CellSummary` map per
/// resolution level, ascending by resolution.
///
/// This is the durable artifact of the pipeline. It is built once per
/// dataset (or parsed once from a pre-binned dataset), then only read at
/// render time; zoom and time-counter changes never touch it, and a data
/// change replaces it wholesale.
use crate::aggregate::aggregate;
use crate::binning::{ResolutionRange, bin_points};
use crate::error::HexTileError;
use crate::geojson::RegionFeature;
use crate::h3_utils::H3Utils;
use crate::math_utils::quantize;
use crate::property::{CellSummary, SharedBag, bag_from_json};
use crate::rasterize::{RasterizeConfig, rasterize_features};
use h3o::{CellIndex, Resolution};
use log::debug;
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct HexTileHierarchy {
    levels: Vec<HashMap<CellIndex, CellSummary>>,
    range: ResolutionRange,
}

impl HexTileHierarchy {
    /// Run the full rasterize → bin → aggregate pipeline over parsed
    /// GeoJSON features.
    pub fn from_features<F>(
        features: &[RegionFeature],
        config: &RasterizeConfig,
        range: ResolutionRange,
        reducer: F,
    ) -> Result<Self, HexTileError>
    where
        F: Fn(&[SharedBag], CellIndex) -> Result<CellSummary, HexTileError>,
    {
        let points = rasterize_features(features, config);
        debug!(
            "binning {} sample points across {} resolutions",
            points.len(),
            range.len()
        );
        let groups = bin_points(&points, range);
        let levels = aggregate(&groups, reducer);
        Self::from_levels(levels, range)
    }

    /// Wrap already-aggregated levels. The level count must match the
    /// resolution range exactly.
    pub fn from_levels(
        levels: Vec<HashMap<CellIndex, CellSummary>>,
        range: ResolutionRange,
    ) -> Result<Self, HexTileError> {
        if levels.len() != range.len() {
            return Err(HexTileError::MalformedDataset(format!(
                "{} levels for a {}-resolution range",
                levels.len(),
                range.len()
            )));
        }
        Ok(Self { levels, range })
    }

    /// Parse a pre-binned dataset: a JSON array ordered by resolution, each
    /// entry an object mapping H3 cell id strings to property objects.
    /// Bypasses rasterization entirely.
    pub fn from_prebinned_json(json: &Value, range: ResolutionRange) -> Result<Self, HexTileError> {
        let entries = json.as_array().ok_or_else(|| {
            HexTileError::MalformedDataset("pre-binned dataset must be a JSON array".to_string())
        })?;

        let mut levels = Vec::with_capacity(entries.len());
        for entry in entries {
            let cells = entry.as_object().ok_or_else(|| {
                HexTileError::MalformedDataset(
                    "pre-binned level must be an object keyed by cell id".to_string(),
                )
            })?;
            let mut level = HashMap::with_capacity(cells.len());
            for (id, properties) in cells {
                let cell = H3Utils::parse_cell(id)?;
                level.insert(cell, bag_from_json(properties));
            }
            levels.push(level);
        }
        Self::from_levels(levels, range)
    }

    /// Number of resolution levels.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn range(&self) -> ResolutionRange {
        self.range
    }

    pub fn levels(&self) -> &[HashMap<CellIndex, CellSummary>] {
        &self.levels
    }

    pub fn level(&self, index: usize) -> Option<&HashMap<CellIndex, CellSummary>> {
        self.levels.get(index)
    }

    /// LOD selection: quantize a continuous resolution fraction in [0,1]
    /// into a level index, clamped inclusively at both ends (1.0 selects
    /// the last level, never one past it).
    pub fn select_level(&self, fraction: f64) -> usize {
        quantize(fraction, self.levels.len())
    }

    /// The level map the fraction selects.
    pub fn level_for(&self, fraction: f64) -> &HashMap<CellIndex, CellSummary> {
        &self.levels[self.select_level(fraction)]
    }

    /// The H3 resolution the fraction selects, quantized over the same
    /// inclusive range.
    pub fn resolution_for(&self, fraction: f64) -> Resolution {
        let index = quantize(fraction, self.range.len());
        self.range
            .at(index)
            .expect("quantize stays within the range")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::mean_reducer;
    use crate::property::FieldValue;
    use serde_json::json;

    fn summary(value: f64) -> CellSummary {
        let mut bag = CellSummary::new();
        bag.insert("v".to_string(), FieldValue::Scalar(value));
        bag
    }

    fn three_level_hierarchy() -> HexTileHierarchy {
        let range = ResolutionRange::from_u8(5, 7).unwrap();
        let levels: Vec<HashMap<CellIndex, CellSummary>> = range
            .iter()
            .map(|res| {
                let cell = H3Utils::cell_for(49.25, -123.1, res).unwrap();
                HashMap::from([(cell, summary(res as u8 as f64))])
            })
            .collect();
        HexTileHierarchy::from_levels(levels, range).unwrap()
    }

    #[test]
    fn test_select_level_clamps_inclusively() {
        let hierarchy = three_level_hierarchy();
        assert_eq!(hierarchy.select_level(0.0), 0);
        assert_eq!(hierarchy.select_level(1.0), hierarchy.len() - 1);
        assert_eq!(hierarchy.select_level(-0.5), 0);
        assert_eq!(hierarchy.select_level(2.0), hierarchy.len() - 1);
    }

    #[test]
    fn test_select_level_single_level() {
        let range = ResolutionRange::from_u8(5, 5).unwrap();
        let cell = H3Utils::cell_for(49.25, -123.1, Resolution::Five).unwrap();
        let hierarchy =
            HexTileHierarchy::from_levels(vec![HashMap::from([(cell, summary(1.0))])], range)
                .unwrap();
        assert_eq!(hierarchy.select_level(0.0), 0);
        assert_eq!(hierarchy.select_level(1.0), 0);
    }

    #[test]
    fn test_select_level_is_monotonic() {
        let hierarchy = three_level_hierarchy();
        let mut last = 0;
        for i in 0..=50 {
            let index = hierarchy.select_level(i as f64 / 50.0);
            assert!(index >= last);
            last = index;
        }
    }

    #[test]
    fn test_resolution_for_covers_the_range() {
        let hierarchy = three_level_hierarchy();
        assert_eq!(hierarchy.resolution_for(0.0), Resolution::Five);
        assert_eq!(hierarchy.resolution_for(1.0), Resolution::Seven);
    }

    #[test]
    fn test_level_count_mismatch_is_fatal() {
        let range = ResolutionRange::from_u8(5, 7).unwrap();
        let err = HexTileHierarchy::from_levels(vec![HashMap::new()], range).unwrap_err();
        assert!(matches!(err, HexTileError::MalformedDataset(_)));
    }

    #[test]
    fn test_from_prebinned_json() {
        let cell = H3Utils::cell_for(49.25, -123.1, Resolution::Five).unwrap();
        let mut cells = serde_json::Map::new();
        cells.insert(cell.to_string(), json!({ "gw": 0.4, "demand": [1.0, 2.0] }));
        let json = Value::Array(vec![Value::Object(cells)]);
        let range = ResolutionRange::from_u8(5, 5).unwrap();
        let hierarchy = HexTileHierarchy::from_prebinned_json(&json, range).unwrap();
        let bag = hierarchy.level(0).unwrap().get(&cell).unwrap();
        assert_eq!(bag.get("gw"), Some(&FieldValue::Scalar(0.4)));
        assert_eq!(
            bag.get("demand"),
            Some(&FieldValue::Series(vec![1.0, 2.0]))
        );
    }

    #[test]
    fn test_from_prebinned_rejects_non_array() {
        let range = ResolutionRange::from_u8(5, 5).unwrap();
        let err =
            HexTileHierarchy::from_prebinned_json(&json!({"a": 1}), range).unwrap_err();
        assert!(matches!(err, HexTileError::MalformedDataset(_)));
    }

    #[test]
    fn test_from_features_smoke() {
        use crate::geojson::parse_feature_collection;
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
                "properties": { "growth": 0.5 },
            }],
        });
        let features = parse_feature_collection(&collection).unwrap();
        let range = ResolutionRange::from_u8(7, 8).unwrap();
        let hierarchy = HexTileHierarchy::from_features(
            &features,
            &RasterizeConfig::with_step(0.001),
            range,
            mean_reducer(None),
        )
        .unwrap();
        assert_eq!(hierarchy.len(), 2);
        assert!(!hierarchy.level(0).unwrap().is_empty());
        for level in hierarchy.levels() {
            for bag in level.values() {
                assert_eq!(bag.get("growth"), Some(&FieldValue::Scalar(0.5)));
            }
        }
    }
}
