//! Static catalog of selectable base layers
//!
//! The catalog is the single place that knows which tile servers back each
//! entry of the base-layer selector.

use crate::MapError;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Identifier of a base layer offered in the selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BaseLayerKey {
    Google,
    Esri,
    #[serde(rename = "OSM")]
    Osm,
    MapquestSat,
    MapQuestRoad,
}

impl BaseLayerKey {
    /// All keys in selector order
    pub const ALL: [BaseLayerKey; 5] = [
        BaseLayerKey::Google,
        BaseLayerKey::Esri,
        BaseLayerKey::Osm,
        BaseLayerKey::MapquestSat,
        BaseLayerKey::MapQuestRoad,
    ];

    /// The identifier the selector submits for this key
    pub fn as_str(&self) -> &'static str {
        match self {
            BaseLayerKey::Google => "Google",
            BaseLayerKey::Esri => "Esri",
            BaseLayerKey::Osm => "OSM",
            BaseLayerKey::MapquestSat => "MapquestSat",
            BaseLayerKey::MapQuestRoad => "MapQuestRoad",
        }
    }

    /// Catalog entry for this key
    pub fn descriptor(&self) -> &'static BaseLayerDescriptor {
        // Every key has exactly one entry; see `catalog_covers_every_key`.
        CATALOG
            .iter()
            .find(|d| d.key == *self)
            .unwrap_or(&CATALOG[0])
    }
}

impl fmt::Display for BaseLayerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BaseLayerKey {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| MapError::Layer(format!("unknown base layer '{}'", s)))
    }
}

/// Immutable description of one base layer
#[derive(Debug, Clone, PartialEq)]
pub struct BaseLayerDescriptor {
    pub key: BaseLayerKey,
    /// Human-readable name shown in the selector and legend
    pub title: &'static str,
    pub tile_source_template: &'static str,
    pub attribution: Option<&'static str>,
}

static CATALOG: Lazy<Vec<BaseLayerDescriptor>> = Lazy::new(|| {
    vec![
        BaseLayerDescriptor {
            key: BaseLayerKey::Google,
            title: "Google Satélite",
            tile_source_template: "https://mt1.google.com/vt/lyrs=s&x={x}&y={y}&z={z}",
            attribution: Some("© Google"),
        },
        BaseLayerDescriptor {
            key: BaseLayerKey::Esri,
            title: "Esri World Imagery",
            tile_source_template:
                "https://services.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}",
            attribution: Some("Agencia Catastral de Cundinamarca"),
        },
        BaseLayerDescriptor {
            key: BaseLayerKey::Osm,
            title: "OpenStreetMap",
            tile_source_template: "https://tile.openstreetmap.org/{z}/{x}/{y}.png",
            attribution: Some("© OpenStreetMap contributors"),
        },
        BaseLayerDescriptor {
            key: BaseLayerKey::MapquestSat,
            title: "MapQuest Satélite",
            tile_source_template: "https://otile1.mqcdn.com/tiles/1.0.0/sat/{z}/{x}/{y}.jpg",
            attribution: Some("Tiles courtesy of MapQuest"),
        },
        BaseLayerDescriptor {
            key: BaseLayerKey::MapQuestRoad,
            title: "MapQuest Calles",
            tile_source_template: "https://otile1.mqcdn.com/tiles/1.0.0/osm/{z}/{x}/{y}.jpg",
            attribution: Some("Tiles courtesy of MapQuest"),
        },
    ]
});

/// Every catalog entry, in selector order
pub fn catalog() -> &'static [BaseLayerDescriptor] {
    &CATALOG
}
