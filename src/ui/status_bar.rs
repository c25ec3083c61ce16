use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::editor::{CurrentMode, EditorMode};
use crate::simulation::SimulationState;
use crate::theme;
use crate::warehouse::{LayoutLoadError, PlacedObject, TravelPath};

use super::StatusMessage;

/// Bottom status bar: toast messages, object counts, mode, and the sim clock.
pub fn status_bar_ui(
    mut contexts: EguiContexts,
    status: Res<StatusMessage>,
    load_error: Res<LayoutLoadError>,
    current_mode: Res<CurrentMode>,
    sim: Res<SimulationState>,
    objects: Query<(), With<PlacedObject>>,
    paths: Query<(), With<TravelPath>>,
) -> Result {
    egui::TopBottomPanel::bottom("status_bar")
        .frame(
            egui::Frame::side_top_panel(&contexts.ctx_mut()?.style())
                .inner_margin(egui::Margin::symmetric(12, 4)),
        )
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                if let Some(message) = &load_error.message {
                    ui.colored_label(theme::ui::ERROR_TEXT, message);
                } else if let Some(text) = &status.text {
                    let color = if status.is_error {
                        theme::ui::ERROR_TEXT
                    } else {
                        theme::ui::LABEL_TEXT
                    };
                    ui.colored_label(color, text);
                } else {
                    ui.label(
                        egui::RichText::new("Ready").color(theme::ui::HINT_TEXT),
                    );
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if current_mode.mode == EditorMode::Simulate {
                        ui.monospace(sim.format_clock());
                        ui.label(format!("{}x", sim.speed));
                        ui.separator();
                    }
                    ui.label(match current_mode.mode {
                        EditorMode::Edit => "Edit",
                        EditorMode::Simulate => "Simulate",
                    });
                    ui.separator();
                    ui.label(format!(
                        "{} objects, {} paths",
                        objects.iter().count(),
                        paths.iter().count()
                    ));
                });
            });
        });
    Ok(())
}
