//! # cadastre-map
//!
//! The state core of an interactive cadastral map view.
//!
//! A [`MapView`] owns a single switchable base layer (held in a layer group),
//! one vector overlay of features loaded from a GeoJSON file, a click-driven
//! feature popup and a toggleable legend of layer visibility. Drawing is
//! delegated to a [`RenderEngine`]; the core only configures and queries it.

pub mod core;
pub mod data;
pub mod input;
pub mod layers;
pub mod prelude;
pub mod rendering;
pub mod runtime;
pub mod spatial;
pub mod tiles;
pub mod traits;
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::MapViewConfig,
    geo::{Crs, Extent, LatLng, Point},
    map::MapView,
    view::View,
};

pub use layers::{
    base::{LayerId, LayerTrait},
    group::LayerGroup,
    registry::{LayerRegistry, VisibleLayer},
    tile::TileLayer,
    vector::{FeatureStyle, VectorOverlay},
};

pub use data::{
    feature::{Feature, FeatureSnapshot},
    loader::{FeatureFetcher, FileFetcher, HttpFetcher, UrlFetcher},
};

pub use input::{
    events::{ClickEvent, EventResponse, UiAction},
    handler::InteractionController,
};

pub use rendering::{engine::RenderEngine, headless::HeadlessEngine};

pub use tiles::catalog::{BaseLayerDescriptor, BaseLayerKey};

pub use ui::{
    legend::{LegendEntry, LegendPanel, LegendTarget},
    popup::{PopupEntry, PopupState, PopupTarget},
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Unsupported coordinate reference system: {0}")]
    UnsupportedCrs(String),

    #[error("Layer error: {0}")]
    Layer(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Feature load error: {0}")]
    Load(String),
}

/// Error type alias for convenience
pub type Error = MapError;
