pub mod feature;
pub mod geojson;
pub mod loader;

// Re-export the essential types
pub use feature::{format_value, Feature, FeatureSnapshot};
pub use geojson::{parse_features, GeoJson, GeoJsonFeature, GeoJsonGeometry};
pub use loader::{FeatureFetcher, FeatureLoad, FeatureRequest, FileFetcher, HttpFetcher, UrlFetcher};
