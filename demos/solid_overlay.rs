// Builds a hex tile hierarchy over a synthetic district and prints what a
// renderer would receive at a few zoom levels.
//
// Run with: cargo run --example solid_overlay

use colored::Colorize;
use hextile_rust::aggregate::mean_reducer;
use hextile_rust::binning::ResolutionRange;
use hextile_rust::constants::COARSE_STEP_DEG;
use hextile_rust::geojson::{load_json_str, parse_feature_collection};
use hextile_rust::hierarchy::HexTileHierarchy;
use hextile_rust::layers::{
    HexTileBorderLayer, HexTileBorderLayerProps, SolidHexTileLayer, SolidHexTileLayerProps,
};
use hextile_rust::math_utils::remap_clamped;
use hextile_rust::rasterize::RasterizeConfig;

const DISTRICT: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "geometry": {
                "type": "Polygon",
                "coordinates": [[
                    [-123.16, 49.24], [-123.16, 49.28],
                    [-123.10, 49.28], [-123.10, 49.24],
                    [-123.16, 49.24]
                ]]
            },
            "properties": { "groundwater": 0.42 }
        },
        {
            "type": "Feature",
            "geometry": {
                "type": "Polygon",
                "coordinates": [[
                    [-123.10, 49.24], [-123.10, 49.28],
                    [-123.05, 49.28], [-123.05, 49.24],
                    [-123.10, 49.24]
                ]]
            },
            "properties": { "groundwater": 0.77 }
        }
    ]
}"#;

fn main() {
    env_logger::init();

    let json = load_json_str("district", DISTRICT).expect("embedded GeoJSON parses");
    let features = parse_feature_collection(&json).expect("feature collection");
    let range = ResolutionRange::from_u8(6, 9).expect("valid range");

    let hierarchy = HexTileHierarchy::from_features(
        &features,
        &RasterizeConfig::with_step(COARSE_STEP_DEG),
        range,
        mean_reducer(None),
    )
    .expect("hierarchy builds");

    println!("{}", "hex tile hierarchy".bold());
    for (i, level) in hierarchy.levels().iter().enumerate() {
        println!(
            "  level {} (res {:?}): {} cells",
            i,
            range.at(i).unwrap(),
            level.len()
        );
    }

    let mut solid = SolidHexTileLayer::new(hierarchy.clone(), SolidHexTileLayerProps::default());
    let border = HexTileBorderLayer::new(
        hierarchy,
        HexTileBorderLayerProps {
            thickness: [0.8, 1.0],
            ..Default::default()
        },
    );

    // map zoom 9..13 drives the continuous resolution fraction
    for zoom in [9.0, 11.0, 13.0] {
        solid.set_resolution(remap_clamped(zoom, 9.0, 13.0, 0.0, 1.0));
        let records = solid.render();
        println!(
            "zoom {} -> {} {}",
            format!("{:.0}", zoom).as_str().cyan(),
            records.len(),
            "solid polygons".green()
        );
    }

    let rings = border.render();
    let quads = border.render_quads();
    println!(
        "border layer: {} ring pairs, {} edge quads",
        rings.len(),
        quads.len()
    );
}
