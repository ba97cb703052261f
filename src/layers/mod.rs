pub mod base;
pub mod group;
pub mod macros;
pub mod registry;
pub mod tile;
pub mod vector;

pub use base::{LayerId, LayerProperties, LayerTrait, LayerType};
pub use group::LayerGroup;
pub use registry::{LayerRegistry, VisibleLayer};
pub use tile::TileLayer;
pub use vector::{feature_style, FeatureStyle, VectorOverlay};
