pub mod aggregate;
pub mod binning;
pub mod constants;
pub mod error;
pub mod geojson;
pub mod geometry;
pub mod h3_utils;
pub mod hierarchy;
pub mod layers;
pub mod math_utils;
pub mod property;
pub mod rasterize;
