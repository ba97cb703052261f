//! Shared trait abstractions
//!
//! Every renderable layer the map mounts (the tiles inside the base group and
//! the vector overlay) is driven through [`LayerOperations`], so the registry
//! and legend can treat them uniformly.

use crate::{
    core::constants::PLACEHOLDER_LAYER_NAME,
    layers::base::{LayerId, LayerType},
};

/// Trait for layer-like objects
pub trait LayerOperations {
    /// Get layer ID
    fn id(&self) -> LayerId;

    /// Get the layer name, if one was given
    fn name(&self) -> Option<&str>;

    /// Name shown to users, falling back to a fixed placeholder
    fn display_name(&self) -> &str {
        self.name()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(PLACEHOLDER_LAYER_NAME)
    }

    /// Get layer type
    fn layer_type(&self) -> LayerType;

    /// Check if layer is visible
    fn is_visible(&self) -> bool;

    /// Set layer visibility
    fn set_visible(&mut self, visible: bool);
}
