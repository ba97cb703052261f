//! Layer visibility legend
//!
//! The panel remembers which layers have a row and what they are called.
//! The checked state of a row is read from the registry whenever the list is
//! drawn, so a layer's own visibility flag stays the only source of truth.

use crate::{
    core::geo::Point,
    layers::{
        base::{LayerId, LayerTrait},
        registry::{LayerRegistry, VisibleLayer},
    },
    rendering::engine::{OverlayKind, OverlayPosition, RenderEngine},
};

/// A checkbox row of the legend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    /// Layer the checkbox toggles
    pub layer: LayerId,
    pub layer_name: String,
    pub visible: bool,
}

impl LegendEntry {
    fn derive(row: &VisibleLayer, registry: &LayerRegistry) -> Self {
        Self {
            layer: row.id,
            layer_name: row.name.clone(),
            visible: registry.is_layer_shown(row.id),
        }
    }
}

/// Container the legend list is drawn into
pub trait LegendTarget {
    /// Discards everything previously appended
    fn clear(&mut self);
    fn append(&mut self, entry: &LegendEntry);
}

pub struct LegendPanel {
    visible: bool,
    anchor: Point,
    target: Option<Box<dyn LegendTarget>>,
    rows: Vec<VisibleLayer>,
}

impl LegendPanel {
    pub fn new(anchor: Point, target: Option<Box<dyn LegendTarget>>) -> Self {
        Self {
            visible: false,
            anchor,
            target,
            rows: Vec::new(),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Layers that currently have a row, in display order
    pub fn rows(&self) -> &[VisibleLayer] {
        &self.rows
    }

    /// The rows with their checked state as the registry has it now
    pub fn entries(&self, registry: &LayerRegistry) -> Vec<LegendEntry> {
        self.rows
            .iter()
            .map(|row| LegendEntry::derive(row, registry))
            .collect()
    }

    /// Shows a hidden panel at its fixed anchor, or hides a shown one
    pub fn toggle(&mut self, engine: &mut dyn RenderEngine) {
        self.visible = !self.visible;
        let position = self.visible.then_some(OverlayPosition::Screen(self.anchor));
        engine.set_overlay_position(OverlayKind::Legend, position, None);
        log::debug!("legend {}", if self.visible { "shown" } else { "hidden" });
    }

    pub fn close(&mut self, engine: &mut dyn RenderEngine) {
        self.visible = false;
        engine.set_overlay_position(OverlayKind::Legend, None, None);
    }

    /// Replaces the list with one row per visible layer
    pub fn rebuild(&mut self, registry: &LayerRegistry) {
        self.rows = registry.list_visible_layers();
        self.refresh(registry);
    }

    /// Swaps the row of a replaced base layer for the mounted one.
    ///
    /// Every other row is kept, unchecked ones included. Without a row for
    /// `old` the new base layer is listed first.
    pub fn replace_base_row(&mut self, old: LayerId, registry: &LayerRegistry) {
        let base = registry.base_layer();
        let row = VisibleLayer {
            id: base.id(),
            name: base.display_name().to_string(),
        };
        match self.rows.iter_mut().find(|r| r.id == old) {
            Some(slot) => *slot = row,
            None => self.rows.insert(0, row),
        }
        self.refresh(registry);
    }

    /// Redraws the current rows into the target with their checked state
    /// read from the registry
    pub fn refresh(&mut self, registry: &LayerRegistry) {
        let entries = self.entries(registry);
        let Some(target) = self.target.as_mut() else {
            return;
        };
        target.clear();
        for entry in &entries {
            target.append(entry);
        }
    }
}
