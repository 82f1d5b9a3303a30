// Marker formations demo: synthetic noise-derived values pick a formation
// per cell, with marker spacing following the tile size.
//
// Run with: cargo run --example icon_formations

use colored::Colorize;
use hextile_rust::aggregate::noise_reducer;
use hextile_rust::binning::ResolutionRange;
use hextile_rust::constants::COARSE_STEP_DEG;
use hextile_rust::geojson::{load_json_str, parse_feature_collection};
use hextile_rust::geometry::Formation;
use hextile_rust::hierarchy::HexTileHierarchy;
use hextile_rust::layers::{IconHexTileLayer, IconHexTileLayerProps};
use hextile_rust::math_utils::clamp01;
use hextile_rust::rasterize::RasterizeConfig;

const REGION: &str = r#"{
    "type": "FeatureCollection",
    "features": [{
        "type": "Feature",
        "geometry": {
            "type": "Polygon",
            "coordinates": [[
                [-123.20, 49.20], [-123.20, 49.30],
                [-123.00, 49.30], [-123.00, 49.20],
                [-123.20, 49.20]
            ]]
        },
        "properties": {}
    }]
}"#;

fn main() {
    env_logger::init();

    let json = load_json_str("region", REGION).expect("embedded GeoJSON parses");
    let features = parse_feature_collection(&json).expect("feature collection");
    let range = ResolutionRange::from_u8(5, 7).expect("valid range");

    let hierarchy = HexTileHierarchy::from_features(
        &features,
        &RasterizeConfig::with_step(COARSE_STEP_DEG),
        range,
        noise_reducer(314, "intensity"),
    )
    .expect("hierarchy builds");

    let mut layer = IconHexTileLayer::new(
        hierarchy,
        IconHexTileLayerProps {
            value: Some(Box::new(|summary| {
                let raw = summary
                    .get("intensity")
                    .and_then(|v| v.as_scalar())
                    .unwrap_or(0.0);
                // noise is in [-1, 1]; formations want [0, 1]
                clamp01(raw / 2.0 + 0.5)
            })),
            ..Default::default()
        },
    );

    println!("{}", "formation catalog".bold());
    for formation in Formation::ALL {
        println!("  {:?}: {} markers", formation, formation.offsets().len());
    }

    for zoom in [0.0, 0.5, 1.0] {
        layer.set_resolution(zoom);
        let frame = layer.render();
        println!(
            "zoom {} -> {} markers, icon scale {}",
            format!("{:.1}", zoom).as_str().cyan(),
            frame.markers.len(),
            format!("{:.3}", frame.icon_scale).as_str().yellow()
        );
    }
}
