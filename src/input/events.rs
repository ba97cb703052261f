use crate::{core::geo::Point, layers::base::LayerId};
use serde::{Deserialize, Serialize};

/// A single click on the drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClickEvent {
    /// Position in pixels from the surface's top-left corner
    pub pixel: Point,
    /// The same position in display coordinates
    pub coordinate: Point,
}

impl ClickEvent {
    pub fn new(pixel: Point, coordinate: Point) -> Self {
        Self { pixel, coordinate }
    }
}

/// Actions raised by the page controls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UiAction {
    /// Base-layer selector changed to the given key
    SelectBaseLayer(String),
    ToggleLegend,
    CloseLegend,
    /// A legend checkbox changed
    SetLayerVisible { layer: LayerId, visible: bool },
    /// The popup's close link was activated
    ClosePopup,
    ZoomToExtent,
}

/// Whether the input that raised an action may keep its default behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResponse {
    Continue,
    /// Suppress the default, e.g. navigation of a placeholder link
    PreventDefault,
}

impl EventResponse {
    pub fn is_prevented(&self) -> bool {
        matches!(self, EventResponse::PreventDefault)
    }
}
