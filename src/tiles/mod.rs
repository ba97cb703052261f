pub mod catalog;
pub mod source;

// Re-exports for convenience
pub use catalog::{catalog, BaseLayerDescriptor, BaseLayerKey};
pub use source::{TileSource, XyzSource};
