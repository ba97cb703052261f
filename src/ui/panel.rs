//! egui rendition of the page controls
//!
//! The panel only reads the map; every change the user makes comes back as a
//! [`UiAction`] for [`MapView::handle_action`].

use crate::{
    core::map::MapView,
    input::events::UiAction,
    rendering::engine::RenderEngine,
    tiles::catalog::catalog,
};

/// Base-layer selector, legend toggle and, while the legend is shown, its checklist
pub fn show_controls<E: RenderEngine>(ui: &mut egui::Ui, map: &MapView<E>) -> Vec<UiAction> {
    let mut actions = Vec::new();
    let Some(registry) = map.registry() else {
        ui.label("Mapa no disponible");
        return actions;
    };

    let current = registry.base_layer().key();
    let mut selected = current;
    egui::ComboBox::from_label("Capa base")
        .selected_text(current.descriptor().title)
        .show_ui(ui, |ui| {
            for descriptor in catalog() {
                ui.selectable_value(&mut selected, descriptor.key, descriptor.title);
            }
        });
    if selected != current {
        actions.push(UiAction::SelectBaseLayer(selected.as_str().to_string()));
    }

    ui.horizontal(|ui| {
        if ui.button("Leyenda").clicked() {
            actions.push(UiAction::ToggleLegend);
        }
        if ui.button("Zoom a extensión").clicked() {
            actions.push(UiAction::ZoomToExtent);
        }
    });

    if map.legend().is_visible() {
        ui.separator();
        for entry in map.legend_entries() {
            let mut checked = entry.visible;
            if ui.checkbox(&mut checked, entry.layer_name.as_str()).changed() {
                actions.push(UiAction::SetLayerVisible {
                    layer: entry.layer,
                    visible: checked,
                });
            }
        }
        if ui.small_button("Cerrar").clicked() {
            actions.push(UiAction::CloseLegend);
        }
    }

    actions
}

/// Window listing the clicked feature's attributes, shown while the popup is visible
pub fn show_popup<E: RenderEngine>(ctx: &egui::Context, map: &MapView<E>) -> Vec<UiAction> {
    let mut actions = Vec::new();
    let popup = map.popup();
    if !popup.visible {
        return actions;
    }

    egui::Window::new("Información")
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            egui::Grid::new("popup-attributes").striped(true).show(ui, |ui| {
                for entry in &popup.content {
                    ui.strong(entry.key.as_str());
                    ui.label(entry.value.as_str());
                    ui.end_row();
                }
            });
            if ui.link("Cerrar").clicked() {
                actions.push(UiAction::ClosePopup);
            }
        });

    actions
}
