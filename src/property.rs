/// Property bags: the per-feature attribute maps carried through the
/// pipeline and the aggregated per-cell summaries.
///
/// A field is either a scalar or an ordered series (monthly time steps in
/// the reference datasets). Bags are shared read-only between the sample
/// points they came from, never copied per point.
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Scalar(f64),
    Series(Vec<f64>),
}

impl FieldValue {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            FieldValue::Scalar(v) => Some(*v),
            FieldValue::Series(_) => None,
        }
    }

    pub fn as_series(&self) -> Option<&[f64]> {
        match self {
            FieldValue::Scalar(_) => None,
            FieldValue::Series(values) => Some(values),
        }
    }

    /// Read one step of a series, clamping the externally driven counter
    /// into bounds. A scalar answers for every step.
    pub fn series_at(&self, step: usize) -> Option<f64> {
        match self {
            FieldValue::Scalar(v) => Some(*v),
            FieldValue::Series(values) => {
                if values.is_empty() {
                    None
                } else {
                    Some(values[step.min(values.len() - 1)])
                }
            }
        }
    }
}

/// Attribute map for one feature or one aggregated cell.
pub type PropertyBag = HashMap<String, FieldValue>;

/// Bags are shared by reference between every sample point of a feature.
pub type SharedBag = Arc<PropertyBag>;

/// Aggregated statistics for one cell at one resolution.
pub type CellSummary = PropertyBag;

/// Convert a GeoJSON `properties` object into a bag, keeping numeric
/// scalars and numeric arrays and ignoring everything else (names, labels).
pub fn bag_from_json(properties: &Value) -> PropertyBag {
    let mut bag = PropertyBag::new();
    let Some(map) = properties.as_object() else {
        return bag;
    };
    for (key, value) in map {
        match value {
            Value::Number(n) => {
                if let Some(v) = n.as_f64() {
                    bag.insert(key.clone(), FieldValue::Scalar(v));
                }
            }
            Value::Array(items) => {
                let series: Vec<f64> = items.iter().filter_map(|item| item.as_f64()).collect();
                if series.len() == items.len() && !series.is_empty() {
                    bag.insert(key.clone(), FieldValue::Series(series));
                }
            }
            _ => {}
        }
    }
    bag
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bag_from_json_keeps_numeric_fields() {
        let props = json!({
            "growth": 0.5,
            "demand": [1.0, 2.0, 3.0],
            "name": "Shaughnessy",
            "mixed": [1.0, "x"],
        });
        let bag = bag_from_json(&props);
        assert_eq!(bag.get("growth"), Some(&FieldValue::Scalar(0.5)));
        assert_eq!(
            bag.get("demand"),
            Some(&FieldValue::Series(vec![1.0, 2.0, 3.0]))
        );
        assert!(!bag.contains_key("name"));
        assert!(!bag.contains_key("mixed"));
    }

    #[test]
    fn test_series_at_clamps() {
        let series = FieldValue::Series(vec![10.0, 20.0, 30.0]);
        assert_eq!(series.series_at(0), Some(10.0));
        assert_eq!(series.series_at(2), Some(30.0));
        assert_eq!(series.series_at(1200), Some(30.0));

        let scalar = FieldValue::Scalar(7.0);
        assert_eq!(scalar.series_at(999), Some(7.0));

        let empty = FieldValue::Series(vec![]);
        assert_eq!(empty.series_at(0), None);
    }

    #[test]
    fn test_field_value_untagged_serde() {
        let scalar: FieldValue = serde_json::from_str("1.5").unwrap();
        assert_eq!(scalar, FieldValue::Scalar(1.5));
        let series: FieldValue = serde_json::from_str("[1.0, 2.0]").unwrap();
        assert_eq!(series, FieldValue::Series(vec![1.0, 2.0]));
    }
}
