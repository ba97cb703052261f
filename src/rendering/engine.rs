//! Boundary to the engine that draws the map
//!
//! The core never draws. It tells the engine what is mounted and where
//! overlays sit, and asks it which feature lies under a pixel.

use crate::{
    core::{
        geo::{Extent, Point},
        view::View,
    },
    data::feature::{Feature, FeatureSnapshot},
    layers::{base::LayerId, tile::TileLayer, vector::FeatureStyle, vector::VectorOverlay},
    ui::controls::MapControl,
    Result,
};
use std::time::Duration;

/// A top-level entry of the map's layer stack, in mount order
#[derive(Debug, Clone, Copy)]
pub enum MountedLayer<'a> {
    /// The base group and its content
    Group { id: LayerId, layers: &'a [TileLayer] },
    Vector(&'a VectorOverlay),
}

/// Screen elements positioned by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayKind {
    Popup,
    Legend,
}

/// Where an overlay element is placed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverlayPosition {
    /// Anchored to a map coordinate; moves with pan and zoom
    Map(Point),
    /// Pinned to a pixel offset of the drawing surface
    Screen(Point),
}

/// Pan the view so a freshly placed overlay ends up inside the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoPan {
    pub duration: Duration,
}

/// Per-feature style callback handed over with loaded features
pub type StyleFn<'a> = &'a dyn Fn(&Feature) -> FeatureStyle;

pub trait RenderEngine {
    /// Whether a drawing surface exists; without one nothing can be mounted
    fn is_available(&self) -> bool;

    /// Binds the map to the surface with `view` and the initial layer stack
    fn mount(&mut self, view: &View, layers: &[MountedLayer<'_>]) -> Result<()>;

    /// Swaps the content of a group in one step
    fn replace_group(&mut self, group: LayerId, layers: &[TileLayer]);

    fn set_layer_visible(&mut self, layer: LayerId, visible: bool);

    /// Hands the parsed features of a vector layer to its data source
    fn load_features(&mut self, layer: LayerId, features: Vec<Feature>, style: StyleFn<'_>);

    /// Map coordinate under `pixel`, `None` before anything is mounted
    fn coordinate_at_pixel(&self, pixel: &Point) -> Option<Point>;

    /// Topmost feature under `pixel`, scanning visible layers in hit-test order
    fn feature_at_pixel(&self, pixel: &Point) -> Option<FeatureSnapshot>;

    /// Slack, in pixels, allowed around points and lines when hit testing
    fn set_hit_tolerance(&mut self, _pixels: f64) {}

    /// Places an overlay element, or hides it with `None`
    fn set_overlay_position(
        &mut self,
        overlay: OverlayKind,
        position: Option<OverlayPosition>,
        auto_pan: Option<AutoPan>,
    );

    fn add_control(&mut self, control: &MapControl);

    fn set_attributions(&mut self, attributions: &[String]);

    fn fit_extent(&mut self, extent: &Extent);

    fn request_repaint(&mut self);
}
