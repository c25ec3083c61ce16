use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::config::{AddRecentLayoutRequest, AppConfig, UpdateLastLayoutPathRequest};
use crate::constants::SIM_SPEED_STEPS;
use crate::editor::{
    CurrentMode, CurrentTool, EditorMode, EditorTool, GridSettings, PlacementPalette, RedoRequest,
    SnapshotHistory, UndoRequest,
};
use crate::simulation::{
    PauseSimulation, PlaySimulation, RewindSimulation, SetSimulationSpeed, SimulationState,
    StopSimulation,
};
use crate::theme;
use crate::warehouse::{LayoutData, LoadLayoutRequest, NewLayoutRequest, SaveLayoutRequest};

/// Message writers for everything the toolbar can trigger, bundled to keep
/// the system signature manageable.
#[derive(bevy::ecs::system::SystemParam)]
pub struct ToolbarMessages<'w> {
    pub save: MessageWriter<'w, SaveLayoutRequest>,
    pub load: MessageWriter<'w, LoadLayoutRequest>,
    pub new: MessageWriter<'w, NewLayoutRequest>,
    pub undo: MessageWriter<'w, UndoRequest>,
    pub redo: MessageWriter<'w, RedoRequest>,
    pub play: MessageWriter<'w, PlaySimulation>,
    pub pause: MessageWriter<'w, PauseSimulation>,
    pub stop: MessageWriter<'w, StopSimulation>,
    pub rewind: MessageWriter<'w, RewindSimulation>,
    pub set_speed: MessageWriter<'w, SetSimulationSpeed>,
    pub add_recent: MessageWriter<'w, AddRecentLayoutRequest>,
    pub update_last: MessageWriter<'w, UpdateLastLayoutPathRequest>,
}

/// Main toolbar: file actions, undo/redo, tools, and the mode switch.
#[allow(clippy::too_many_arguments)]
pub fn toolbar_ui(
    mut contexts: EguiContexts,
    mut current_tool: ResMut<CurrentTool>,
    mut current_mode: ResMut<CurrentMode>,
    mut layout_data: ResMut<LayoutData>,
    mut grid_settings: ResMut<GridSettings>,
    mut palette: ResMut<PlacementPalette>,
    history: Res<SnapshotHistory>,
    sim: Res<SimulationState>,
    config: Res<AppConfig>,
    mut messages: ToolbarMessages,
) -> Result {
    egui::TopBottomPanel::top("main_toolbar")
        .frame(
            egui::Frame::side_top_panel(&contexts.ctx_mut()?.style())
                .inner_margin(egui::Margin::symmetric(12, 8)),
        )
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 4.0;

                let editing = current_mode.mode == EditorMode::Edit;

                ui.add_enabled_ui(editing, |ui| {
                    file_buttons(ui, &config, &mut messages);

                    ui.add_space(8.0);
                    ui.separator();
                    ui.add_space(8.0);

                    // Undo/redo, enabled from history availability
                    if ui
                        .add_enabled(history.can_undo(), egui::Button::new("Undo"))
                        .on_hover_text("Ctrl+Z")
                        .clicked()
                    {
                        messages.undo.write(UndoRequest);
                    }
                    if ui
                        .add_enabled(history.can_redo(), egui::Button::new("Redo"))
                        .on_hover_text("Ctrl+Y")
                        .clicked()
                    {
                        messages.redo.write(RedoRequest);
                    }

                    ui.add_space(8.0);
                    ui.separator();
                    ui.add_space(8.0);

                    for tool in EditorTool::all() {
                        let selected = current_tool.tool == *tool;
                        let button = egui::Button::new(
                            egui::RichText::new(tool_button_label(tool)).size(14.0).strong(),
                        )
                        .min_size(egui::vec2(0.0, 28.0))
                        .selected(selected);

                        let response = ui.add(button);
                        if response.clicked() {
                            current_tool.tool = *tool;
                        }
                        response.on_hover_text(tool.display_name());
                    }

                    ui.add_space(8.0);
                    ui.separator();
                    ui.add_space(8.0);

                    ui.checkbox(&mut layout_data.grid_visible, "Grid");
                    ui.checkbox(&mut grid_settings.snap_enabled, "Snap");
                });

                // Right-aligned mode switch and transport controls
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    match current_mode.mode {
                        EditorMode::Edit => {
                            if ui
                                .add(egui::Button::new("Simulate").min_size(egui::vec2(0.0, 24.0)))
                                .clicked()
                            {
                                current_mode.mode = EditorMode::Simulate;
                                messages.set_speed.write(SetSimulationSpeed {
                                    multiplier: config.data.default_sim_speed,
                                });
                            }
                        }
                        EditorMode::Simulate => {
                            if ui
                                .add(egui::Button::new("Back to Edit").min_size(egui::vec2(0.0, 24.0)))
                                .clicked()
                            {
                                current_mode.mode = EditorMode::Edit;
                            }

                            ui.add_space(8.0);
                            transport_controls(ui, &sim, &mut messages);
                        }
                    }
                });
            });
        });

    // Secondary bar with settings for the active tool
    if current_mode.mode == EditorMode::Edit {
        tool_settings_bar(&mut contexts, &current_tool, &mut palette)?;
    }

    Ok(())
}

fn file_buttons(ui: &mut egui::Ui, config: &AppConfig, messages: &mut ToolbarMessages) {
    if ui.button("New").clicked() {
        messages.new.write(NewLayoutRequest);
    }

    if ui.button("Open").clicked()
        && let Some(path) = rfd::FileDialog::new()
            .add_filter("Layout", &["json"])
            .set_directory(crate::paths::layouts_dir())
            .pick_file()
    {
        messages.load.write(LoadLayoutRequest { path: path.clone() });
        messages.add_recent.write(AddRecentLayoutRequest { path: path.clone() });
        messages.update_last.write(UpdateLastLayoutPathRequest { path });
    }

    if ui.button("Save").clicked()
        && let Some(path) = rfd::FileDialog::new()
            .add_filter("Layout", &["json"])
            .set_directory(crate::paths::layouts_dir())
            .set_file_name("layout.json")
            .save_file()
    {
        messages.save.write(SaveLayoutRequest { path: path.clone() });
        messages.add_recent.write(AddRecentLayoutRequest { path: path.clone() });
        messages.update_last.write(UpdateLastLayoutPathRequest { path });
    }

    if !config.data.recent_layouts.is_empty() {
        ui.menu_button("Recent", |ui| {
            for path in config.data.recent_layouts.clone() {
                let label = path
                    .file_name()
                    .map(|name| name.to_string_lossy().to_string())
                    .unwrap_or_else(|| path.display().to_string());
                if ui.button(label).clicked() {
                    messages.load.write(LoadLayoutRequest { path: path.clone() });
                    messages.update_last.write(UpdateLastLayoutPathRequest { path });
                    ui.close();
                }
            }
        });
    }
}

fn transport_controls(ui: &mut egui::Ui, sim: &SimulationState, messages: &mut ToolbarMessages) {
    ui.monospace(sim.format_clock());

    // Speed selector
    egui::ComboBox::from_id_salt("sim_speed")
        .selected_text(format!("{}x", sim.speed))
        .width(64.0)
        .show_ui(ui, |ui| {
            for speed in SIM_SPEED_STEPS {
                if ui
                    .selectable_label(sim.speed == *speed, format!("{}x", speed))
                    .clicked()
                {
                    messages.set_speed.write(SetSimulationSpeed { multiplier: *speed });
                }
            }
        });

    if ui.button("Rewind").on_hover_text("Back 10 seconds").clicked() {
        messages.rewind.write(RewindSimulation);
    }
    if ui.button("Stop").clicked() {
        messages.stop.write(StopSimulation);
    }
    if sim.is_active() {
        if ui.button("Pause").clicked() {
            messages.pause.write(PauseSimulation);
        }
    } else if ui.button("Play").clicked() {
        messages.play.write(PlaySimulation);
    }

    if sim.is_active() {
        ui.colored_label(theme::ui::SIM_RUNNING, egui::RichText::new("RUNNING").strong());
    } else if sim.running {
        ui.colored_label(theme::ui::SIM_PAUSED, egui::RichText::new("PAUSED").strong());
    }
}

fn tool_settings_bar(
    contexts: &mut EguiContexts,
    current_tool: &CurrentTool,
    palette: &mut PlacementPalette,
) -> Result {
    let has_settings = matches!(current_tool.tool, EditorTool::Place | EditorTool::Path);
    if !has_settings {
        return Ok(());
    }

    egui::TopBottomPanel::top("tool_settings")
        .frame(
            egui::Frame::side_top_panel(&contexts.ctx_mut()?.style())
                .inner_margin(egui::Margin::symmetric(12, 6))
                .fill(theme::ui::PANEL_BACKGROUND),
        )
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 6.0;

                match current_tool.tool {
                    EditorTool::Place => {
                        ui.label(
                            egui::RichText::new("Place Settings:").color(theme::ui::LABEL_TEXT),
                        );
                        ui.add_space(8.0);

                        ui.label("Object:");
                        egui::ComboBox::from_id_salt("palette_item")
                            .selected_text(palette.selection.display_name())
                            .width(130.0)
                            .show_ui(ui, |ui| {
                                for item in crate::editor::tools::PaletteItem::all() {
                                    let selected = palette.selection == *item;
                                    if ui
                                        .selectable_label(selected, item.display_name())
                                        .clicked()
                                    {
                                        palette.selection = *item;
                                    }
                                }
                            });

                        ui.add_space(12.0);
                        ui.label(
                            egui::RichText::new("Shift: place without snapping")
                                .color(theme::ui::HINT_TEXT)
                                .size(11.0),
                        );
                    }
                    EditorTool::Path => {
                        ui.label(
                            egui::RichText::new("Path Settings:").color(theme::ui::LABEL_TEXT),
                        );
                        ui.add_space(8.0);
                        ui.label(
                            egui::RichText::new(
                                "Drag to draw a travel path; Esc cancels, release commits",
                            )
                            .color(theme::ui::HINT_TEXT)
                            .size(11.0),
                        );
                    }
                    _ => {}
                }
            });
        });
    Ok(())
}

fn tool_button_label(tool: &EditorTool) -> &'static str {
    match tool {
        EditorTool::Select => "Select",
        EditorTool::Place => "Place",
        EditorTool::Path => "Path",
    }
}
