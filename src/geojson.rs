/// GeoJSON loading and parsing for the hextile pipeline.
///
/// Datasets are static files loaded once per process, so parsed JSON is
/// cached behind the same path/string caches the rest of the crate shares.
use crate::error::HexTileError;
use crate::property::{SharedBag, bag_from_json};
use geo::{Coord, LineString, MultiPolygon, Polygon};
use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Cache for loaded JSON files to avoid repeated disk reads
static JSON_CACHE: Lazy<Mutex<HashMap<PathBuf, Value>>> = Lazy::new(|| Mutex::new(HashMap::new()));

/// Cache for embedded JSON strings
static EMBEDDED_CACHE: Lazy<Mutex<HashMap<String, Value>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// One input region: a (multi)polygon boundary plus its shared attribute bag.
#[derive(Debug, Clone)]
pub struct RegionFeature {
    pub geometry: MultiPolygon<f64>,
    pub properties: SharedBag,
}

/// Load JSON from a file path, using the cache if available.
pub fn load_json<P: AsRef<Path>>(file_path: P) -> Result<Value, HexTileError> {
    let path_buf = file_path.as_ref().to_path_buf();

    {
        let cache = JSON_CACHE.lock().unwrap();
        if let Some(json) = cache.get(&path_buf) {
            return Ok(json.clone());
        }
    }

    let json_str = fs::read_to_string(&path_buf).map_err(|e| {
        HexTileError::MalformedDataset(format!("failed to read {}: {}", path_buf.display(), e))
    })?;
    let json: Value = serde_json::from_str(&json_str)
        .map_err(|e| HexTileError::MalformedDataset(format!("failed to parse JSON: {}", e)))?;

    {
        let mut cache = JSON_CACHE.lock().unwrap();
        cache.insert(path_buf, json.clone());
    }

    Ok(json)
}

/// Load JSON from an embedded string, using the cache if available.
pub fn load_json_str(key: &str, json_str: &str) -> Result<Value, HexTileError> {
    {
        let cache = EMBEDDED_CACHE.lock().unwrap();
        if let Some(json) = cache.get(key) {
            return Ok(json.clone());
        }
    }

    let json: Value = serde_json::from_str(json_str)
        .map_err(|e| HexTileError::MalformedDataset(format!("failed to parse JSON: {}", e)))?;

    {
        let mut cache = EMBEDDED_CACHE.lock().unwrap();
        cache.insert(key.to_string(), json.clone());
    }

    Ok(json)
}

/// Parse a GeoJSON FeatureCollection into region features.
///
/// Features with missing or degenerate geometry come back with an empty
/// multipolygon; they rasterize to zero points rather than failing the
/// whole dataset.
pub fn parse_feature_collection(json: &Value) -> Result<Vec<RegionFeature>, HexTileError> {
    let features = json
        .get("features")
        .and_then(|f| f.as_array())
        .ok_or_else(|| {
            HexTileError::MalformedDataset("expected a FeatureCollection with features".to_string())
        })?;

    let mut regions = Vec::with_capacity(features.len());
    for feature in features {
        let properties = feature
            .get("properties")
            .map(bag_from_json)
            .unwrap_or_default();
        let geometry = feature
            .get("geometry")
            .map(parse_geometry)
            .unwrap_or_else(|| MultiPolygon(vec![]));
        regions.push(RegionFeature {
            geometry,
            properties: Arc::new(properties),
        });
    }
    Ok(regions)
}

fn parse_geometry(geometry: &Value) -> MultiPolygon<f64> {
    let coords = geometry.get("coordinates");
    match (geometry.get("type").and_then(|t| t.as_str()), coords) {
        (Some("Polygon"), Some(rings)) => match parse_polygon(rings) {
            Some(polygon) => MultiPolygon(vec![polygon]),
            None => MultiPolygon(vec![]),
        },
        (Some("MultiPolygon"), Some(polys)) => {
            let polygons = polys
                .as_array()
                .map(|list| list.iter().filter_map(parse_polygon).collect())
                .unwrap_or_default();
            MultiPolygon(polygons)
        }
        _ => MultiPolygon(vec![]),
    }
}

fn parse_polygon(rings: &Value) -> Option<Polygon<f64>> {
    let rings = rings.as_array()?;
    let mut parsed = rings.iter().filter_map(parse_ring);
    let exterior = parsed.next()?;
    let interiors: Vec<LineString<f64>> = parsed.collect();
    Some(Polygon::new(exterior, interiors))
}

fn parse_ring(ring: &Value) -> Option<LineString<f64>> {
    let positions = ring.as_array()?;
    let mut coords = Vec::with_capacity(positions.len());
    for position in positions {
        let pair = position.as_array()?;
        // [lon, lat] ordering per the GeoJSON spec
        let x = pair.first()?.as_f64()?;
        let y = pair.get(1)?.as_f64()?;
        coords.push(Coord { x, y });
    }
    if coords.len() < 4 {
        return None;
    }
    Some(LineString::from(coords))
}
