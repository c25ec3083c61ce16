use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::editor::HistoryCheckpoint;
use crate::warehouse::{Layer, LayoutData, PlacedObject};

use super::tracked;

/// Right-hand side panel: layer visibility toggles and layout properties.
/// Name and floor-size edits checkpoint at interaction start; the checkpoint
/// reads the layout resource, so the two share a `ParamSet`.
pub fn layers_panel_ui(
    mut contexts: EguiContexts,
    mut params: ParamSet<(HistoryCheckpoint, ResMut<LayoutData>)>,
    objects: Query<&PlacedObject>,
) -> Result {
    let mut edit_begun = false;

    egui::SidePanel::right("layers_panel")
        .default_width(200.0)
        .show(contexts.ctx_mut()?, |ui| {
            let mut layout_data = params.p1();

            ui.add_space(4.0);
            ui.label(egui::RichText::new("Layers").heading().size(18.0));
            ui.add_space(4.0);
            ui.separator();
            ui.add_space(4.0);

            for layer in Layer::all().iter().rev() {
                let count = objects.iter().filter(|object| object.layer == *layer).count();
                if let Some(layer_data) = layout_data
                    .layers
                    .iter_mut()
                    .find(|l| l.layer_type == *layer)
                {
                    egui::Frame::new()
                        .inner_margin(egui::Margin::symmetric(4, 4))
                        .show(ui, |ui| {
                            ui.horizontal(|ui| {
                                ui.checkbox(&mut layer_data.visible, "");
                                ui.label(egui::RichText::new(layer.display_name()).size(14.0));

                                ui.with_layout(
                                    egui::Layout::right_to_left(egui::Align::Center),
                                    |ui| {
                                        ui.label(
                                            egui::RichText::new(count.to_string())
                                                .size(11.0)
                                                .weak(),
                                        );
                                    },
                                );
                            });
                        });
                }
            }

            ui.add_space(8.0);
            ui.separator();
            ui.add_space(4.0);

            ui.label(egui::RichText::new("Layout").heading().size(18.0));
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                ui.label("Name:");
                let response = ui.text_edit_singleline(&mut layout_data.name);
                edit_begun |= response.gained_focus();
            });
            ui.horizontal(|ui| {
                ui.label("Floor:");
                tracked(
                    ui,
                    &mut edit_begun,
                    egui::DragValue::new(&mut layout_data.floor_width)
                        .speed(0.5)
                        .range(5.0..=200.0)
                        .suffix(" m"),
                );
                ui.label("x");
                tracked(
                    ui,
                    &mut edit_begun,
                    egui::DragValue::new(&mut layout_data.floor_depth)
                        .speed(0.5)
                        .range(5.0..=200.0)
                        .suffix(" m"),
                );
            });
            ui.label(
                egui::RichText::new(format!("Grid cell: {:.1} m", layout_data.grid_size))
                    .size(11.0)
                    .weak(),
            );
        });

    if edit_begun {
        params.p0().record();
    }
    Ok(())
}
