//! Prelude module for common cadastre-map types and traits
//!
//! Re-exports what a page shell needs to drive a map view with
//! `use cadastre_map::prelude::*;`

pub use crate::core::{
    config::MapViewConfig,
    geo::{Crs, Extent, LatLng, Point},
    map::MapView,
    view::View,
};

pub use crate::layers::{
    base::{LayerId, LayerTrait},
    registry::VisibleLayer,
};

pub use crate::data::{
    feature::{Feature, FeatureSnapshot},
    loader::{FeatureFetcher, FileFetcher, HttpFetcher, UrlFetcher},
};

pub use crate::input::events::{ClickEvent, EventResponse, UiAction};

pub use crate::rendering::{engine::RenderEngine, headless::HeadlessEngine};

pub use crate::tiles::catalog::BaseLayerKey;

pub use crate::ui::{
    legend::{LegendEntry, LegendTarget},
    popup::{PopupEntry, PopupTarget},
};

#[cfg(feature = "egui")]
pub use crate::ui::panel::{show_controls, show_popup};

pub use crate::{Error as MapError, Result};

pub use std::{sync::Arc, time::Duration};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
