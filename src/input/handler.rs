//! Click handling for the feature popup
//!
//! A thin adapter around [`PopupState::on_click`]: it does the engine calls
//! (hide, hit test, place) in the order the popup requires and pushes the new
//! content to the popup container.

use crate::{
    input::events::ClickEvent,
    rendering::engine::{AutoPan, OverlayKind, OverlayPosition, RenderEngine},
    ui::popup::{PopupState, PopupTarget},
};
use std::time::Duration;

pub struct InteractionController {
    state: PopupState,
    auto_pan: Duration,
    target: Option<Box<dyn PopupTarget>>,
}

impl InteractionController {
    pub fn new(auto_pan: Duration, target: Option<Box<dyn PopupTarget>>) -> Self {
        Self {
            state: PopupState::hidden(),
            auto_pan,
            target,
        }
    }

    pub fn state(&self) -> &PopupState {
        &self.state
    }

    /// Resolves a click into the next popup state.
    ///
    /// The popup is hidden before the hit test runs, so a click on empty
    /// space clears a stale popup even if the hit test finds nothing.
    pub fn handle_click(&mut self, click: &ClickEvent, engine: &mut dyn RenderEngine) {
        engine.set_overlay_position(OverlayKind::Popup, None, None);

        let hit = engine.feature_at_pixel(&click.pixel);
        let state = std::mem::take(&mut self.state);
        self.state = state.on_click(click, hit.as_ref());

        if let Some(anchor) = self.state.anchor.filter(|_| self.state.visible) {
            if let Some(target) = self.target.as_mut() {
                target.set_content(&self.state.content);
            }
            engine.set_overlay_position(
                OverlayKind::Popup,
                Some(OverlayPosition::Map(anchor)),
                Some(AutoPan {
                    duration: self.auto_pan,
                }),
            );
            log::debug!("popup shown with {} attributes", self.state.content.len());
        } else {
            log::debug!("click hit nothing, popup hidden");
        }
    }

    /// Hides the popup whatever its state
    pub fn close(&mut self, engine: &mut dyn RenderEngine) {
        self.state = PopupState::hidden();
        engine.set_overlay_position(OverlayKind::Popup, None, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{
            geo::{Crs, LatLng, Point},
            view::View,
        },
        data::{feature::Feature, loader::FeatureRequest},
        layers::{base::LayerId, vector::feature_style, vector::VectorOverlay},
        rendering::{engine::MountedLayer, headless::HeadlessEngine},
        ui::popup::PopupEntry,
    };
    use std::{cell::RefCell, rc::Rc};

    #[derive(Default, Clone)]
    struct Recorder(Rc<RefCell<Vec<Vec<PopupEntry>>>>);

    impl PopupTarget for Recorder {
        fn set_content(&mut self, entries: &[PopupEntry]) {
            self.0.borrow_mut().push(entries.to_vec());
        }
    }

    fn engine_with_point() -> (HeadlessEngine, Point) {
        let view = View::from_lat_lng(LatLng::new(5.06332, -73.87622), 15.0, Point::new(800.0, 600.0));
        let center = view.center;
        let overlay = VectorOverlay::new(
            LayerId(2),
            None,
            FeatureRequest {
                url: "x.geojson".to_string(),
                data_crs: Crs::Epsg4686,
                display_crs: Crs::Epsg3857,
            },
            "id",
        );
        let mut engine = HeadlessEngine::new();
        engine.mount(&view, &[MountedLayer::Vector(&overlay)]).unwrap();
        engine.load_features(
            LayerId(2),
            vec![Feature::new(Some(geo_types::Point::new(center.x, center.y).into()))
                .with_property("id", "42")
                .with_property("area", "100")],
            &|_: &Feature| feature_style(None),
        );
        (engine, center)
    }

    #[test]
    fn test_click_on_feature_shows_popup() {
        let (mut engine, center) = engine_with_point();
        let recorder = Recorder::default();
        let mut controller =
            InteractionController::new(Duration::from_millis(250), Some(Box::new(recorder.clone())));

        controller.handle_click(&ClickEvent::new(Point::new(400.0, 300.0), center), &mut engine);

        assert!(controller.state().visible);
        assert_eq!(controller.state().anchor, Some(center));
        assert_eq!(
            recorder.0.borrow().last().cloned(),
            Some(vec![PopupEntry::new("id", "42"), PopupEntry::new("area", "100")])
        );
        assert_eq!(
            engine.overlay(OverlayKind::Popup),
            Some(&(
                OverlayPosition::Map(center),
                Some(AutoPan {
                    duration: Duration::from_millis(250)
                })
            ))
        );
    }

    #[test]
    fn test_click_on_empty_space_hides_popup() {
        let (mut engine, center) = engine_with_point();
        let mut controller = InteractionController::new(Duration::from_millis(250), None);

        controller.handle_click(&ClickEvent::new(Point::new(400.0, 300.0), center), &mut engine);
        assert!(controller.state().visible);

        controller.handle_click(&ClickEvent::new(Point::new(5.0, 5.0), Point::new(0.0, 0.0)), &mut engine);
        assert_eq!(controller.state(), &PopupState::hidden());
        assert!(engine.overlay(OverlayKind::Popup).is_none());
    }

    #[test]
    fn test_close_is_idempotent() {
        let (mut engine, _) = engine_with_point();
        let mut controller = InteractionController::new(Duration::from_millis(250), None);
        controller.close(&mut engine);
        controller.close(&mut engine);
        assert!(!controller.state().visible);
    }
}
