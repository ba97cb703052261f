use crate::layers::{
    base::{LayerId, LayerProperties, LayerTrait, LayerType},
    tile::TileLayer,
};

/// The ordered stack mounted as the map's base.
///
/// The group holds exactly one tile layer once populated. The only way to
/// change its content is [`LayerGroup::set_base_layer`], which clears and
/// refills in one step.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerGroup {
    properties: LayerProperties,
    layers: Vec<TileLayer>,
}

impl LayerGroup {
    pub fn new(id: LayerId, base: TileLayer) -> Self {
        Self {
            properties: LayerProperties::new(id, None, LayerType::Group),
            layers: vec![base],
        }
    }

    /// Replaces the whole content with `layer`, returning what was mounted before
    pub fn set_base_layer(&mut self, layer: TileLayer) -> Vec<TileLayer> {
        std::mem::replace(&mut self.layers, vec![layer])
    }

    /// The mounted base layer
    pub fn base_layer(&self) -> Option<&TileLayer> {
        self.layers.first()
    }

    pub fn layers(&self) -> &[TileLayer] {
        &self.layers
    }

    pub fn layer_mut(&mut self, id: LayerId) -> Option<&mut TileLayer> {
        self.layers.iter_mut().find(|l| l.id() == id)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl LayerTrait for LayerGroup {
    crate::impl_layer_trait!(properties);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::catalog::BaseLayerKey;

    fn tile(id: u64, key: BaseLayerKey) -> TileLayer {
        TileLayer::from_descriptor(LayerId(id), key.descriptor())
    }

    #[test]
    fn test_set_base_layer_replaces_content() {
        let mut group = LayerGroup::new(LayerId(0), tile(1, BaseLayerKey::Esri));
        assert_eq!(group.len(), 1);

        let previous = group.set_base_layer(tile(2, BaseLayerKey::Osm));
        assert_eq!(previous.len(), 1);
        assert_eq!(previous[0].key(), BaseLayerKey::Esri);
        assert_eq!(group.len(), 1);
        assert_eq!(group.base_layer().map(|l| l.key()), Some(BaseLayerKey::Osm));
    }

    #[test]
    fn test_layer_mut_by_id() {
        let mut group = LayerGroup::new(LayerId(0), tile(5, BaseLayerKey::Google));
        assert!(group.layer_mut(LayerId(5)).is_some());
        assert!(group.layer_mut(LayerId(6)).is_none());
        assert_eq!(group.layer_type(), LayerType::Group);
        assert_eq!(group.name(), None);
    }
}
