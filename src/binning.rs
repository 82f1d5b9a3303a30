/// Multi-resolution binner: buckets sample points into hex cells at every
/// resolution of an inclusive range, independently per resolution.
use crate::error::HexTileError;
use crate::h3_utils::H3Utils;
use crate::property::SharedBag;
use crate::rasterize::SamplePoint;
use h3o::{CellIndex, Resolution};
use log::warn;
use std::collections::HashMap;

/// Inclusive, ordered range of H3 resolutions (low = large hexagons).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionRange {
    min: Resolution,
    max: Resolution,
}

impl ResolutionRange {
    pub fn new(min: Resolution, max: Resolution) -> Result<Self, HexTileError> {
        if min > max {
            return Err(HexTileError::InvalidResolutionRange {
                min: min as u8,
                max: max as u8,
            });
        }
        Ok(Self { min, max })
    }

    /// Build a range from raw resolution numbers (0..=15).
    pub fn from_u8(min: u8, max: u8) -> Result<Self, HexTileError> {
        let err = HexTileError::InvalidResolutionRange { min, max };
        let min = Resolution::try_from(min).map_err(|_| err.clone())?;
        let max = Resolution::try_from(max).map_err(|_| err)?;
        Self::new(min, max)
    }

    pub fn min(&self) -> Resolution {
        self.min
    }

    pub fn max(&self) -> Resolution {
        self.max
    }

    /// Number of resolution levels in the range.
    pub fn len(&self) -> usize {
        (self.max as u8 - self.min as u8) as usize + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Resolutions in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = Resolution> + use<> {
        let (min, max) = (self.min as u8, self.max as u8);
        (min..=max).map(|r| Resolution::try_from(r).expect("resolution in 0..=15"))
    }

    /// Resolution at a position within the range.
    pub fn at(&self, index: usize) -> Option<Resolution> {
        if index >= self.len() {
            return None;
        }
        Resolution::try_from(self.min as u8 + index as u8).ok()
    }
}

/// Per-resolution grouping of point bags by cell, ascending by resolution.
pub type CellGroups = Vec<HashMap<CellIndex, Vec<SharedBag>>>;

/// Bin points at every resolution in the range. A point in range of N
/// resolutions lands in exactly N groupings, one per resolution; groupings
/// are never merged across resolutions. Points the grid rejects are logged
/// and skipped without aborting the rest.
pub fn bin_points(points: &[SamplePoint], range: ResolutionRange) -> CellGroups {
    let mut groups = Vec::with_capacity(range.len());
    for resolution in range.iter() {
        let mut binned: HashMap<CellIndex, Vec<SharedBag>> = HashMap::new();
        for point in points {
            match H3Utils::cell_for(point.lat, point.lng, resolution) {
                Ok(cell) => {
                    binned
                        .entry(cell)
                        .or_default()
                        .push(point.properties.clone());
                }
                Err(err) => {
                    warn!("skipping point ({}, {}): {}", point.lat, point.lng, err);
                }
            }
        }
        groups.push(binned);
    }
    groups
}
