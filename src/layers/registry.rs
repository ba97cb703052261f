//! Owner of the mounted layers
//!
//! The registry holds the base group and the vector overlay, hands out layer
//! ids, and keeps the engine in step with every change it makes.

use crate::{
    core::{
        config::MapViewConfig,
        constants::DISPLAY_CRS,
        geo::Crs,
    },
    data::loader::FeatureRequest,
    layers::{
        base::{LayerId, LayerTrait},
        group::LayerGroup,
        tile::TileLayer,
        vector::VectorOverlay,
    },
    rendering::engine::{MountedLayer, RenderEngine},
    tiles::catalog::BaseLayerKey,
};

/// A layer currently shown, with the name the legend displays for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleLayer {
    pub id: LayerId,
    pub name: String,
}

#[derive(Debug)]
pub struct LayerRegistry {
    group: LayerGroup,
    overlay: VectorOverlay,
    /// The base layer built at initialization; unknown keys fall back to it
    default_layer: TileLayer,
    next_id: u64,
}

impl LayerRegistry {
    /// Builds the default base layer and the overlay and mounts them.
    ///
    /// Returns `None` when the engine has no drawing surface or refuses the
    /// mount; the caller then stays uninitialized.
    pub fn initialize(config: &MapViewConfig, engine: &mut dyn RenderEngine) -> Option<Self> {
        if !engine.is_available() {
            log::info!("no drawing surface available, map left uninitialized");
            return None;
        }

        let display_crs = DISPLAY_CRS.parse().unwrap_or(Crs::Epsg3857);
        let default_layer =
            TileLayer::from_descriptor(LayerId(1), config.default_base_layer.descriptor());
        let overlay = VectorOverlay::new(
            LayerId(2),
            config.overlay_name.clone(),
            FeatureRequest {
                url: config.features.url.clone(),
                data_crs: config.features.data_crs,
                display_crs,
            },
            config.features.label_attribute.clone(),
        );
        let registry = Self {
            group: LayerGroup::new(LayerId(0), default_layer.clone()),
            overlay,
            default_layer,
            next_id: 3,
        };

        let view = config.build_view();
        let stack = [
            MountedLayer::Group {
                id: registry.group.id(),
                layers: registry.group.layers(),
            },
            MountedLayer::Vector(&registry.overlay),
        ];
        if let Err(e) = engine.mount(&view, &stack) {
            log::warn!("failed to mount map: {}", e);
            return None;
        }
        engine.set_attributions(&registry.attributions());

        log::info!(
            "map mounted with base layer {} and overlay '{}'",
            config.default_base_layer,
            registry.overlay.display_name()
        );
        Some(registry)
    }

    fn allocate_id(&mut self) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Replaces the base layer with a fresh layer for `key`.
    ///
    /// Keys match case-insensitively. An unknown key mounts the default layer
    /// again instead. The engine sees the group's content swapped in one call.
    pub fn switch_base_layer(&mut self, key: &str, engine: &mut dyn RenderEngine) -> &TileLayer {
        let layer = match key.parse::<BaseLayerKey>() {
            Ok(key) => {
                let id = self.allocate_id();
                TileLayer::from_descriptor(id, key.descriptor())
            }
            Err(e) => {
                log::debug!("{}, falling back to {}", e, self.default_layer.key());
                self.default_layer.clone()
            }
        };
        log::info!("base layer switched to {}", layer.key());

        self.group.set_base_layer(layer);
        engine.replace_group(self.group.id(), self.group.layers());
        engine.set_attributions(&self.attributions());
        engine.request_repaint();

        self.base_layer()
    }

    /// Layers whose visibility flag is set, in mount order
    pub fn list_visible_layers(&self) -> Vec<VisibleLayer> {
        let base: &[TileLayer] = if self.group.is_visible() {
            self.group.layers()
        } else {
            &[]
        };

        base.iter()
            .map(|layer| layer as &dyn LayerTrait)
            .chain(std::iter::once(&self.overlay as &dyn LayerTrait))
            .filter(|layer| layer.is_visible())
            .map(|layer| VisibleLayer {
                id: layer.id(),
                name: layer.display_name().to_string(),
            })
            .collect()
    }

    /// Sets one layer's visibility flag; siblings are left alone.
    ///
    /// Returns whether a mounted layer has that id.
    pub fn set_layer_visible(
        &mut self,
        layer: LayerId,
        visible: bool,
        engine: &mut dyn RenderEngine,
    ) -> bool {
        let Some(target) = self.layer_mut(layer) else {
            log::debug!("no mounted layer {}", layer);
            return false;
        };
        target.set_visible(visible);
        engine.set_layer_visible(layer, visible);
        engine.request_repaint();
        true
    }

    /// Whether the layer is actually drawn: its own flag, and for a base
    /// layer also the flag of its group
    pub fn is_layer_shown(&self, id: LayerId) -> bool {
        if self.group.layers().iter().any(|l| l.id() == id) {
            return self.group.is_visible() && self.layer(id).is_some_and(|l| l.is_visible());
        }
        self.layer(id).is_some_and(|l| l.is_visible())
    }

    pub fn layer(&self, id: LayerId) -> Option<&dyn LayerTrait> {
        if self.group.id() == id {
            return Some(&self.group);
        }
        if self.overlay.id() == id {
            return Some(&self.overlay);
        }
        self.group
            .layers()
            .iter()
            .find(|l| l.id() == id)
            .map(|l| l as &dyn LayerTrait)
    }

    fn layer_mut(&mut self, id: LayerId) -> Option<&mut dyn LayerTrait> {
        if self.group.id() == id {
            return Some(&mut self.group);
        }
        if self.overlay.id() == id {
            return Some(&mut self.overlay);
        }
        self.group
            .layer_mut(id)
            .map(|l| l as &mut dyn LayerTrait)
    }

    /// Attribution texts of the visible base layers
    pub fn attributions(&self) -> Vec<String> {
        self.group
            .layers()
            .iter()
            .filter(|l| l.is_visible())
            .filter_map(|l| l.attribution().map(str::to_string))
            .collect()
    }

    pub fn group(&self) -> &LayerGroup {
        &self.group
    }

    /// The mounted base layer
    pub fn base_layer(&self) -> &TileLayer {
        self.group.base_layer().unwrap_or(&self.default_layer)
    }

    pub fn default_layer(&self) -> &TileLayer {
        &self.default_layer
    }

    pub fn overlay(&self) -> &VectorOverlay {
        &self.overlay
    }

    pub fn overlay_mut(&mut self) -> &mut VectorOverlay {
        &mut self.overlay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::headless::HeadlessEngine;

    fn setup() -> (LayerRegistry, HeadlessEngine) {
        let mut engine = HeadlessEngine::new();
        let registry = LayerRegistry::initialize(&MapViewConfig::default(), &mut engine).unwrap();
        (registry, engine)
    }

    #[test]
    fn test_initialize_mounts_group_then_overlay() {
        let (registry, engine) = setup();
        assert_eq!(engine.mounted_layers(), vec![LayerId(0), LayerId(2)]);
        assert_eq!(registry.base_layer().key(), BaseLayerKey::Esri);
        assert_eq!(registry.overlay().display_name(), "Datos de Nemocón");
        assert_eq!(registry.overlay().source().data_crs, Crs::Epsg4686);
        assert_eq!(registry.overlay().source().display_crs, Crs::Epsg3857);
        assert_eq!(
            engine.attributions(),
            &["Agencia Catastral de Cundinamarca".to_string()]
        );
    }

    #[test]
    fn test_initialize_without_surface() {
        let mut engine = HeadlessEngine::unavailable();
        assert!(LayerRegistry::initialize(&MapViewConfig::default(), &mut engine).is_none());
        assert!(engine.mounted_layers().is_empty());
    }

    #[test]
    fn test_switch_each_catalog_key() {
        let (mut registry, mut engine) = setup();
        for key in BaseLayerKey::ALL.iter() {
            registry.switch_base_layer(key.as_str(), &mut engine);

            assert_eq!(registry.group().len(), 1);
            let mounted = engine.group_layers(registry.group().id()).unwrap();
            assert_eq!(mounted.len(), 1);
            assert_eq!(mounted[0].url_template(), key.descriptor().tile_source_template);
            assert_eq!(registry.base_layer().key(), *key);
        }
        assert_eq!(engine.repaint_count(), BaseLayerKey::ALL.len());
    }

    #[test]
    fn test_switch_is_case_insensitive() {
        let (mut registry, mut engine) = setup();
        registry.switch_base_layer("osm", &mut engine);
        assert_eq!(registry.base_layer().key(), BaseLayerKey::Osm);
    }

    #[test]
    fn test_unknown_key_falls_back_to_default() {
        let (mut registry, mut engine) = setup();
        registry.switch_base_layer("Google", &mut engine);
        registry.switch_base_layer("Bing", &mut engine);

        assert_eq!(registry.group().layers(), &[registry.default_layer().clone()]);
        assert_eq!(
            engine.group_layers(LayerId(0)).unwrap(),
            &[registry.default_layer().clone()]
        );

        // Repeated fallback changes nothing
        registry.switch_base_layer("", &mut engine);
        assert_eq!(registry.base_layer().id(), LayerId(1));
        assert_eq!(registry.group().len(), 1);
    }

    #[test]
    fn test_switch_gives_fresh_ids() {
        let (mut registry, mut engine) = setup();
        let first = registry.switch_base_layer("OSM", &mut engine).id();
        let second = registry.switch_base_layer("OSM", &mut engine).id();
        assert_ne!(first, second);
        assert_ne!(first, LayerId(1));
    }

    #[test]
    fn test_list_visible_layers_in_mount_order() {
        let (registry, _) = setup();
        assert_eq!(
            registry.list_visible_layers(),
            vec![
                VisibleLayer {
                    id: LayerId(1),
                    name: "Esri World Imagery".to_string()
                },
                VisibleLayer {
                    id: LayerId(2),
                    name: "Datos de Nemocón".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_unnamed_overlay_uses_placeholder() {
        let config = MapViewConfig {
            overlay_name: None,
            ..MapViewConfig::default()
        };
        let mut engine = HeadlessEngine::new();
        let registry = LayerRegistry::initialize(&config, &mut engine).unwrap();
        assert_eq!(registry.list_visible_layers()[1].name, "Capa sin nombre");
    }

    #[test]
    fn test_set_layer_visible_has_no_cascade() {
        let (mut registry, mut engine) = setup();

        assert!(registry.set_layer_visible(LayerId(2), false, &mut engine));
        let visible = registry.list_visible_layers();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, LayerId(1));
        assert_eq!(engine.is_layer_visible(LayerId(2)), Some(false));
        assert_eq!(engine.is_layer_visible(LayerId(1)), Some(true));

        assert!(registry.set_layer_visible(LayerId(2), true, &mut engine));
        assert_eq!(registry.list_visible_layers().len(), 2);

        assert!(!registry.set_layer_visible(LayerId(99), false, &mut engine));
    }

    #[test]
    fn test_hidden_group_hides_its_layers() {
        let (mut registry, mut engine) = setup();
        registry.set_layer_visible(LayerId(0), false, &mut engine);
        let visible = registry.list_visible_layers();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, LayerId(2));
        assert!(registry.layer(LayerId(1)).is_some_and(|l| l.is_visible()));
        assert!(!registry.is_layer_shown(LayerId(1)));
        assert!(registry.is_layer_shown(LayerId(2)));

        registry.set_layer_visible(LayerId(0), true, &mut engine);
        assert!(registry.is_layer_shown(LayerId(1)));
        assert!(!registry.is_layer_shown(LayerId(99)));
    }
}
