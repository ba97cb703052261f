pub mod engine;
pub mod headless;

pub use engine::{AutoPan, MountedLayer, OverlayKind, OverlayPosition, RenderEngine, StyleFn};
pub use headless::HeadlessEngine;
