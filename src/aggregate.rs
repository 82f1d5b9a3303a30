/// Cell aggregator: reduces each cell's grouped point bags into one summary
/// bag per cell, independently per resolution level.
///
/// Reducers are plain functions of (bags, cell); no ambient state. The
/// synthetic-elevation reducer keeps its noise source keyed by an explicit
/// seed so identical inputs always produce identical hierarchies.
use crate::binning::CellGroups;
use crate::error::HexTileError;
use crate::property::{CellSummary, FieldValue, SharedBag};
use h3o::{CellIndex, LatLng};
use log::warn;
use noise::{NoiseFn, Perlin};
use std::collections::BTreeSet;
use std::collections::HashMap;

/// Spatial frequency applied to cell centers before noise lookup.
const NOISE_FREQUENCY: f64 = 10.0;

/// Reduce every cell group at every level. Per-cell reducer failures are
/// logged and skipped; they never abort the rest of the dataset.
pub fn aggregate<F>(groups: &CellGroups, reducer: F) -> Vec<HashMap<CellIndex, CellSummary>>
where
    F: Fn(&[SharedBag], CellIndex) -> Result<CellSummary, HexTileError>,
{
    let mut levels = Vec::with_capacity(groups.len());
    for level in groups {
        let mut summaries = HashMap::with_capacity(level.len());
        for (&cell, bags) in level {
            match reducer(bags, cell) {
                Ok(summary) => {
                    summaries.insert(cell, summary);
                }
                Err(err) => {
                    warn!("skipping cell {}: {}", cell, err);
                }
            }
        }
        levels.push(summaries);
    }
    levels
}

/// Field-averaging reducer.
///
/// Field names are the union across all elements of the group (an explicit
/// schema narrows that to the listed fields); a field's mean is taken over
/// the elements that carry it, and fields carried by no element are dropped
/// from the summary rather than emitted as nulls. Series fields average
/// element-wise; a field that is a series on any element is treated as a
/// series field.
pub fn mean_reducer(
    schema: Option<Vec<String>>,
) -> impl Fn(&[SharedBag], CellIndex) -> Result<CellSummary, HexTileError> {
    move |bags, cell| {
        if bags.is_empty() {
            return Err(HexTileError::EmptyCell { cell });
        }

        let fields: Vec<String> = match &schema {
            Some(named) => named.clone(),
            None => {
                // BTreeSet keeps field enumeration order-independent
                let mut names = BTreeSet::new();
                for bag in bags {
                    names.extend(bag.keys().cloned());
                }
                names.into_iter().collect()
            }
        };

        let mut summary = CellSummary::new();
        for field in fields {
            if let Some(value) = mean_field(bags, &field) {
                summary.insert(field, value);
            }
        }
        Ok(summary)
    }
}

fn mean_field(bags: &[SharedBag], field: &str) -> Option<FieldValue> {
    let values: Vec<&FieldValue> = bags.iter().filter_map(|bag| bag.get(field)).collect();
    if values.is_empty() {
        return None;
    }

    let is_series = values.iter().any(|v| matches!(v, FieldValue::Series(_)));
    if is_series {
        let series: Vec<&[f64]> = values.iter().filter_map(|v| v.as_series()).collect();
        let longest = series.iter().map(|s| s.len()).max()?;
        let mut averaged = Vec::with_capacity(longest);
        for step in 0..longest {
            let at_step: Vec<f64> = series
                .iter()
                .filter_map(|s| s.get(step).copied())
                .collect();
            averaged.push(at_step.iter().sum::<f64>() / at_step.len() as f64);
        }
        Some(FieldValue::Series(averaged))
    } else {
        let scalars: Vec<f64> = values.iter().filter_map(|v| v.as_scalar()).collect();
        Some(FieldValue::Scalar(
            scalars.iter().sum::<f64>() / scalars.len() as f64,
        ))
    }
}

/// Deterministic pseudo-random scalar keyed by a seed and a cell center.
pub fn noise_value(noise: &Perlin, lat: f64, lng: f64) -> f64 {
    noise.get([lat * NOISE_FREQUENCY, lng * NOISE_FREQUENCY])
}

/// Reducer producing a synthetic per-cell field (elevation in the demos)
/// from seeded noise over the cell center. Empty groups still fail: a cell
/// with no points has no business being in the hierarchy.
pub fn noise_reducer(
    seed: u32,
    field: &str,
) -> impl Fn(&[SharedBag], CellIndex) -> Result<CellSummary, HexTileError> {
    let noise = Perlin::new(seed);
    let field = field.to_string();
    move |bags, cell| {
        if bags.is_empty() {
            return Err(HexTileError::EmptyCell { cell });
        }
        let center = LatLng::from(cell);
        let mut summary = CellSummary::new();
        summary.insert(
            field.clone(),
            FieldValue::Scalar(noise_value(&noise, center.lat(), center.lng())),
        );
        Ok(summary)
    }
}
