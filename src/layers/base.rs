use serde::{Deserialize, Serialize};
use std::fmt;

// LayerTrait is unified with LayerOperations in shared traits
pub use crate::traits::LayerOperations as LayerTrait;

/// Identity of a mounted layer, stable for the layer's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LayerId(pub u64);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerType {
    Tile,
    Vector,
    Group,
}

impl fmt::Display for LayerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerType::Tile => write!(f, "tile"),
            LayerType::Vector => write!(f, "vector"),
            LayerType::Group => write!(f, "group"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayerProperties {
    pub id: LayerId,
    pub name: Option<String>,
    pub layer_type: LayerType,
    pub visible: bool,
}

impl LayerProperties {
    pub fn new(id: LayerId, name: Option<String>, layer_type: LayerType) -> Self {
        Self {
            id,
            name,
            layer_type,
            visible: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_properties() {
        let props = LayerProperties::new(LayerId(3), Some("Parcels".to_string()), LayerType::Vector);

        assert_eq!(props.id, LayerId(3));
        assert_eq!(props.name.as_deref(), Some("Parcels"));
        assert_eq!(props.layer_type, LayerType::Vector);
        assert!(props.visible);
    }

    #[test]
    fn test_layer_type_display() {
        assert_eq!(LayerType::Tile.to_string(), "tile");
        assert_eq!(LayerType::Vector.to_string(), "vector");
        assert_eq!(LayerType::Group.to_string(), "group");
        assert_eq!(LayerId(12).to_string(), "layer-12");
    }
}
