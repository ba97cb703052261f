//! Configuration for the map view
//!
//! Every section has defaults matching the reference deployment, so an empty
//! JSON object (or `MapViewConfig::default()`) yields the Nemocón viewer.
//! Deployments override only the fields they need.

use crate::{
    core::{
        constants::{
            DEFAULT_CENTER_LAT, DEFAULT_CENTER_LNG, DEFAULT_DATA_CRS, DEFAULT_FEATURE_URL,
            DEFAULT_HIT_TOLERANCE_PX, DEFAULT_LABEL_ATTRIBUTE, DEFAULT_OVERLAY_NAME, DEFAULT_ZOOM,
            LEGEND_ANCHOR, POPUP_AUTO_PAN_MS, ZOOM_TO_EXTENT,
        },
        geo::{Crs, Extent, LatLng, Point},
        view::View,
    },
    tiles::catalog::BaseLayerKey,
    ui::controls::MapControl,
    MapError, Result,
};
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapViewConfig {
    pub view: ViewConfig,
    pub features: FeatureSourceConfig,
    /// Legend name of the vector overlay; `None` leaves it unnamed
    pub overlay_name: Option<String>,
    pub default_base_layer: BaseLayerKey,
    pub popup: PopupConfig,
    pub legend: LegendConfig,
    /// Upper bound on the drawn reach of points and strokes a click may hit, in pixels
    pub hit_tolerance_px: f64,
    pub controls: Vec<MapControl>,
}

impl Default for MapViewConfig {
    fn default() -> Self {
        Self {
            view: ViewConfig::default(),
            features: FeatureSourceConfig::default(),
            overlay_name: Some(DEFAULT_OVERLAY_NAME.to_string()),
            default_base_layer: BaseLayerKey::Esri,
            popup: PopupConfig::default(),
            legend: LegendConfig::default(),
            hit_tolerance_px: DEFAULT_HIT_TOLERANCE_PX,
            controls: vec![
                MapControl::ScaleLine,
                MapControl::ZoomSlider,
                MapControl::Attribution,
                MapControl::ZoomToExtent {
                    extent: Extent::from_array(ZOOM_TO_EXTENT),
                },
            ],
        }
    }
}

impl MapViewConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.view.center.is_valid() {
            return Err(MapError::Config(format!(
                "view center out of range: {:?}",
                self.view.center
            )));
        }
        if !(0.0..=28.0).contains(&self.view.zoom) {
            return Err(MapError::Config(format!(
                "zoom {} outside 0..=28",
                self.view.zoom
            )));
        }
        if self.features.url.trim().is_empty() {
            return Err(MapError::Config("feature url is empty".to_string()));
        }
        if self.hit_tolerance_px < 0.0 {
            return Err(MapError::Config(
                "hit tolerance must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Builds the view the map is mounted with
    pub fn build_view(&self) -> View {
        View::from_lat_lng(self.view.center, self.view.zoom, self.view.size)
    }

    /// The extent fitted by the zoom-to-extent control, if one is configured
    pub fn zoom_extent(&self) -> Option<Extent> {
        self.controls.iter().find_map(|control| match control {
            MapControl::ZoomToExtent { extent } => Some(*extent),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewConfig {
    pub center: LatLng,
    pub zoom: f64,
    /// Initial drawing surface size in pixels
    pub size: Point,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            center: LatLng::new(DEFAULT_CENTER_LAT, DEFAULT_CENTER_LNG),
            zoom: DEFAULT_ZOOM,
            size: Point::new(1024.0, 768.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeatureSourceConfig {
    /// Path or http(s) URL of the GeoJSON feature collection
    pub url: String,
    /// Reference system the file's coordinates are in
    pub data_crs: Crs,
    /// Attribute shown as each feature's label
    pub label_attribute: String,
}

impl Default for FeatureSourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_FEATURE_URL.to_string(),
            data_crs: DEFAULT_DATA_CRS.parse().unwrap_or(Crs::Epsg4686),
            label_attribute: DEFAULT_LABEL_ATTRIBUTE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PopupConfig {
    pub auto_pan_ms: u64,
}

impl PopupConfig {
    pub fn auto_pan_duration(&self) -> Duration {
        Duration::from_millis(self.auto_pan_ms)
    }
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            auto_pan_ms: POPUP_AUTO_PAN_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LegendConfig {
    /// Screen offset the panel is pinned to while shown
    pub anchor: Point,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            anchor: Point::new(LEGEND_ANCHOR.0, LEGEND_ANCHOR.1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_default() {
        let config = MapViewConfig::from_json_str("{}").unwrap();
        assert_eq!(config, MapViewConfig::default());
        assert_eq!(config.features.data_crs, Crs::Epsg4686);
        assert_eq!(config.default_base_layer, BaseLayerKey::Esri);
        assert_eq!(config.overlay_name.as_deref(), Some("Datos de Nemocón"));
    }

    #[test]
    fn test_partial_override() {
        let json = r#"{
            "default_base_layer": "OSM",
            "features": { "url": "parcels.geojson", "data_crs": "EPSG:4326" },
            "popup": { "auto_pan_ms": 100 }
        }"#;
        let config = MapViewConfig::from_json_str(json).unwrap();
        assert_eq!(config.default_base_layer, BaseLayerKey::Osm);
        assert_eq!(config.features.url, "parcels.geojson");
        assert_eq!(config.features.data_crs, Crs::Epsg4326);
        assert_eq!(config.features.label_attribute, "id");
        assert_eq!(config.popup.auto_pan_duration(), Duration::from_millis(100));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(matches!(
            MapViewConfig::from_json_str(r#"{ "zoom": 3 }"#),
            Err(MapError::Serialization(_))
        ));
    }

    #[test]
    fn test_unsupported_crs_rejected() {
        let json = r#"{ "features": { "data_crs": "EPSG:9377" } }"#;
        assert!(MapViewConfig::from_json_str(json).is_err());
    }

    #[test]
    fn test_validation() {
        let mut config = MapViewConfig::default();
        config.view.zoom = 40.0;
        assert!(matches!(config.validate(), Err(MapError::Config(_))));

        let mut config = MapViewConfig::default();
        config.features.url = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zoom_extent_from_controls() {
        let config = MapViewConfig::default();
        assert_eq!(config.zoom_extent(), Some(Extent::from_array(ZOOM_TO_EXTENT)));

        let config = MapViewConfig {
            controls: vec![MapControl::ScaleLine],
            ..MapViewConfig::default()
        };
        assert_eq!(config.zoom_extent(), None);
    }
}
