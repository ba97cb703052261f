//! The map view
//!
//! [`MapView`] ties the layer registry, the popup controller and the legend
//! to one render engine. Every user-facing operation is safe to call before
//! [`MapView::initialize`] has succeeded; until then they do nothing.

use crate::{
    core::{config::MapViewConfig, geo::Point},
    data::{
        feature::Feature,
        loader::{FeatureFetcher, FeatureLoad, UrlFetcher},
    },
    input::{
        events::{ClickEvent, EventResponse, UiAction},
        handler::InteractionController,
    },
    layers::{
        base::{LayerId, LayerTrait},
        registry::{LayerRegistry, VisibleLayer},
    },
    rendering::engine::RenderEngine,
    ui::{
        legend::{LegendEntry, LegendPanel, LegendTarget},
        popup::{PopupState, PopupTarget},
    },
    Result,
};
use std::{sync::Arc, time::Duration};

pub struct MapView<E: RenderEngine> {
    config: MapViewConfig,
    engine: E,
    registry: Option<LayerRegistry>,
    controller: InteractionController,
    legend: LegendPanel,
    fetcher: Arc<dyn FeatureFetcher>,
    /// Feature load started by `initialize`, until its outcome is drained
    pending: Option<FeatureLoad>,
}

impl<E: RenderEngine> MapView<E> {
    /// Creates an uninitialized view; feature files resolve against the
    /// working directory unless another fetcher is given
    pub fn new(config: MapViewConfig, engine: E) -> Self {
        Self {
            controller: InteractionController::new(config.popup.auto_pan_duration(), None),
            legend: LegendPanel::new(config.legend.anchor, None),
            fetcher: Arc::new(UrlFetcher::new(".")),
            config,
            engine,
            registry: None,
            pending: None,
        }
    }

    pub fn with_fetcher(mut self, fetcher: Arc<dyn FeatureFetcher>) -> Self {
        self.fetcher = fetcher;
        self
    }

    pub fn with_popup_target(mut self, target: Box<dyn PopupTarget>) -> Self {
        self.controller =
            InteractionController::new(self.config.popup.auto_pan_duration(), Some(target));
        self
    }

    pub fn with_legend_target(mut self, target: Box<dyn LegendTarget>) -> Self {
        self.legend = LegendPanel::new(self.config.legend.anchor, Some(target));
        self
    }

    /// Mounts the layers, adds the controls, starts the feature load and
    /// builds the legend.
    ///
    /// Returns whether the view is initialized. Without a drawing surface
    /// this does nothing and returns `false`; calling it again once
    /// initialized is a no-op.
    pub fn initialize(&mut self) -> bool {
        if self.registry.is_some() {
            return true;
        }
        let Some(registry) = LayerRegistry::initialize(&self.config, &mut self.engine) else {
            return false;
        };

        self.engine.set_hit_tolerance(self.config.hit_tolerance_px);
        for control in &self.config.controls {
            self.engine.add_control(control);
        }

        log::debug!("loading features from {}", registry.overlay().source().url);
        self.pending = Some(FeatureLoad::spawn(
            registry.overlay().source().clone(),
            Arc::clone(&self.fetcher),
        ));

        self.legend.rebuild(&registry);
        self.registry = Some(registry);
        true
    }

    pub fn is_initialized(&self) -> bool {
        self.registry.is_some()
    }

    /// Hands the features to the engine if the load has settled.
    ///
    /// Returns the number of features delivered by this call. A failed load
    /// is logged and leaves the overlay empty for the session.
    pub fn poll_features(&mut self) -> Option<usize> {
        let outcome = self.pending.as_ref()?.try_take()?;
        self.settle(outcome)
    }

    /// Blocks up to `timeout` for the feature load to settle
    pub fn wait_for_features(&mut self, timeout: Duration) -> Option<usize> {
        let outcome = self.pending.as_ref()?.wait(timeout)?;
        self.settle(outcome)
    }

    fn settle(&mut self, outcome: Result<Vec<Feature>>) -> Option<usize> {
        self.pending = None;
        let registry = self.registry.as_mut()?;

        match outcome {
            Ok(features) => {
                let count = features.len();
                let overlay = registry.overlay();
                self.engine
                    .load_features(overlay.id(), features, &|f: &Feature| overlay.style_for(f));
                registry.overlay_mut().mark_loaded(count);
                self.engine.request_repaint();
                log::info!("loaded {} features into '{}'", count, registry.overlay().display_name());
                Some(count)
            }
            Err(e) => {
                log::warn!("feature load failed, overlay stays empty: {}", e);
                registry.overlay_mut().mark_loaded(0);
                Some(0)
            }
        }
    }

    /// Mounts the base layer for `key`, or the default layer for an unknown key
    pub fn switch_base_layer(&mut self, key: &str) {
        let Some(registry) = self.registry.as_mut() else {
            return;
        };
        let old = registry.base_layer().id();
        registry.switch_base_layer(key, &mut self.engine);
        self.legend.replace_base_row(old, registry);
    }

    pub fn list_visible_layers(&self) -> Vec<VisibleLayer> {
        self.registry
            .as_ref()
            .map(LayerRegistry::list_visible_layers)
            .unwrap_or_default()
    }

    /// Applies a legend checkbox change. Returns whether the layer exists.
    pub fn set_layer_visible(&mut self, layer: LayerId, visible: bool) -> bool {
        let Some(registry) = self.registry.as_mut() else {
            return false;
        };
        let found = registry.set_layer_visible(layer, visible, &mut self.engine);
        if found {
            self.legend.refresh(registry);
        }
        found
    }

    /// Resolves a click on the drawing surface into the popup state
    pub fn handle_click(&mut self, click: &ClickEvent) {
        if self.registry.is_none() {
            return;
        }
        self.poll_features();
        self.controller.handle_click(click, &mut self.engine);
    }

    /// Like [`MapView::handle_click`], with the map coordinate looked up by the engine
    pub fn click_at(&mut self, pixel: Point) {
        if let Some(coordinate) = self.engine.coordinate_at_pixel(&pixel) {
            self.handle_click(&ClickEvent::new(pixel, coordinate));
        }
    }

    pub fn close_popup(&mut self) {
        if self.registry.is_some() {
            self.controller.close(&mut self.engine);
        }
    }

    pub fn toggle_legend(&mut self) {
        if self.registry.is_some() {
            self.legend.toggle(&mut self.engine);
        }
    }

    pub fn close_legend(&mut self) {
        if self.registry.is_some() {
            self.legend.close(&mut self.engine);
        }
    }

    /// Redraws the legend list from the currently visible layers
    pub fn rebuild_legend(&mut self) {
        if let Some(registry) = self.registry.as_ref() {
            self.legend.rebuild(registry);
        }
    }

    /// Legend rows with their checked state as the layers have it now
    pub fn legend_entries(&self) -> Vec<LegendEntry> {
        self.registry
            .as_ref()
            .map(|registry| self.legend.entries(registry))
            .unwrap_or_default()
    }

    /// Fits the view to the zoom-to-extent control's extent
    pub fn zoom_to_extent(&mut self) {
        if self.registry.is_none() {
            return;
        }
        if let Some(extent) = self.config.zoom_extent() {
            self.engine.fit_extent(&extent);
            self.engine.request_repaint();
        }
    }

    /// Dispatches an action raised by the page controls
    pub fn handle_action(&mut self, action: UiAction) -> EventResponse {
        match action {
            UiAction::SelectBaseLayer(key) => self.switch_base_layer(&key),
            UiAction::ToggleLegend => self.toggle_legend(),
            UiAction::CloseLegend => self.close_legend(),
            UiAction::SetLayerVisible { layer, visible } => {
                self.set_layer_visible(layer, visible);
            }
            UiAction::ClosePopup => {
                self.close_popup();
                return EventResponse::PreventDefault;
            }
            UiAction::ZoomToExtent => self.zoom_to_extent(),
        }
        EventResponse::Continue
    }

    pub fn popup(&self) -> &PopupState {
        self.controller.state()
    }

    pub fn legend(&self) -> &LegendPanel {
        &self.legend
    }

    pub fn registry(&self) -> Option<&LayerRegistry> {
        self.registry.as_ref()
    }

    pub fn config(&self) -> &MapViewConfig {
        &self.config
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }
}
