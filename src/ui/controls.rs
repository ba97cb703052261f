use crate::core::geo::Extent;
use serde::{Deserialize, Serialize};

/// Engine-drawn controls added to the map at initialization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MapControl {
    ScaleLine,
    ZoomSlider,
    Attribution,
    /// Button that fits the view to a fixed extent, in display units
    ZoomToExtent { extent: Extent },
}

impl MapControl {
    pub fn name(&self) -> &'static str {
        match self {
            MapControl::ScaleLine => "scale-line",
            MapControl::ZoomSlider => "zoom-slider",
            MapControl::Attribution => "attribution",
            MapControl::ZoomToExtent { .. } => "zoom-to-extent",
        }
    }
}
