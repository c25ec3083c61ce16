use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::editor::{CurrentMode, EditorMode, HistoryCheckpoint};
use crate::simulation::SimulationState;
use crate::theme;
use crate::warehouse::{
    AgvUnit, EquipmentShape, LayoutData, ObjectKind, PlacedObject, Selected, TravelPath,
};

use super::tracked;

/// Floating properties window for the selected object or path. In simulate
/// mode it becomes a read-only live view of the selected AGV.
#[allow(clippy::too_many_arguments)]
pub fn properties_panel_ui(
    mut contexts: EguiContexts,
    current_mode: Res<CurrentMode>,
    sim: Res<SimulationState>,
    layout_data: Res<LayoutData>,
    mut params: ParamSet<(
        HistoryCheckpoint,
        Query<
            (
                &mut PlacedObject,
                &mut Transform,
                &mut Sprite,
                Option<&mut AgvUnit>,
            ),
            With<Selected>,
        >,
    )>,
    selected_paths: Query<&TravelPath, With<Selected>>,
) -> Result {
    let mut edit_begun = false;

    egui::Window::new("Properties")
        .anchor(egui::Align2::RIGHT_BOTTOM, [-10.0, -10.0])
        .resizable(false)
        .show(contexts.ctx_mut()?, |ui| {
            let mut selected_objects = params.p1();
            if let Ok((mut object, mut transform, mut sprite, agv)) =
                selected_objects.single_mut()
            {
                match current_mode.mode {
                    EditorMode::Edit => {
                        edit_properties(
                            ui,
                            &layout_data,
                            &mut object,
                            &mut transform,
                            &mut edit_begun,
                        );
                        // Keep the sprite footprint in step with edited dimensions
                        sprite.custom_size = Some(object.kind.footprint(layout_data.grid_size));

                        // Rated AGV attributes live on both the placed object
                        // and the live unit; edits flow to the unit
                        if let (
                            ObjectKind::Agv {
                                capacity_kg,
                                max_speed,
                                battery,
                                ..
                            },
                            Some(mut agv),
                        ) = (&object.kind, agv)
                        {
                            agv.capacity_kg = *capacity_kg;
                            agv.max_speed = *max_speed;
                            agv.battery = *battery;
                        }
                    }
                    EditorMode::Simulate => {
                        if let Some(agv) = agv {
                            live_agv_view(ui, &sim, &agv, &transform);
                        } else {
                            ui.label(&object.name);
                            ui.label(
                                egui::RichText::new("Static object")
                                    .color(theme::ui::HINT_TEXT),
                            );
                        }
                    }
                }
                return;
            }

            if let Ok(path) = selected_paths.single() {
                ui.label("Travel path");
                ui.separator();
                ui.label(format!("Waypoints: {}", path.points.len()));
                if let (Some(first), Some(last)) = (path.points.first(), path.points.last()) {
                    ui.label(format!("From ({:.1}, {:.1})", first.x, first.y));
                    ui.label(format!("To ({:.1}, {:.1})", last.x, last.y));
                }
                return;
            }

            ui.label("Nothing selected");
        });

    if edit_begun {
        params.p0().record();
    }
    Ok(())
}

fn edit_properties(
    ui: &mut egui::Ui,
    layout_data: &LayoutData,
    object: &mut PlacedObject,
    transform: &mut Transform,
    begun: &mut bool,
) {
    ui.horizontal(|ui| {
        ui.label("Name:");
        let response = ui.text_edit_singleline(&mut object.name);
        *begun |= response.gained_focus();
    });
    ui.label(
        egui::RichText::new(object.layer.display_name()).color(theme::ui::HINT_TEXT),
    );

    ui.separator();

    ui.horizontal(|ui| {
        ui.label("X:");
        tracked(ui, begun, egui::DragValue::new(&mut transform.translation.x).speed(0.1).suffix(" m"));
        ui.label("Y:");
        tracked(ui, begun, egui::DragValue::new(&mut transform.translation.y).speed(0.1).suffix(" m"));
    });

    let (rotation, _, _) = transform.rotation.to_euler(EulerRot::ZYX);
    let mut rotation_deg = rotation.to_degrees();
    ui.horizontal(|ui| {
        ui.label("Rotation:");
        if tracked(ui, begun, egui::DragValue::new(&mut rotation_deg).speed(1.0).suffix("°"))
            .changed()
        {
            transform.rotation = Quat::from_rotation_z(rotation_deg.to_radians());
        }
    });

    ui.separator();

    match &mut object.kind {
        ObjectKind::Shelf {
            width_m,
            depth_m,
            levels,
        } => {
            ui.horizontal(|ui| {
                ui.label("Width:");
                tracked(ui, begun, egui::DragValue::new(width_m).speed(0.1).range(0.3..=12.0).suffix(" m"));
            });
            ui.horizontal(|ui| {
                ui.label("Depth:");
                tracked(ui, begun, egui::DragValue::new(depth_m).speed(0.1).range(0.3..=3.0).suffix(" m"));
            });
            ui.horizontal(|ui| {
                ui.label("Levels:");
                tracked(ui, begun, egui::DragValue::new(levels).range(1..=10));
            });
        }
        ObjectKind::Pallet => {
            ui.label(format!(
                "Pallet area ({:.1} m square)",
                layout_data.grid_size * 2.0
            ));
        }
        ObjectKind::Shipping {
            width_cells,
            depth_cells,
        }
        | ObjectKind::Restricted {
            width_cells,
            depth_cells,
        } => {
            ui.horizontal(|ui| {
                ui.label("Width:");
                tracked(ui, begun, egui::DragValue::new(width_cells).range(1..=40).suffix(" cells"));
            });
            ui.horizontal(|ui| {
                ui.label("Depth:");
                tracked(ui, begun, egui::DragValue::new(depth_cells).range(1..=40).suffix(" cells"));
            });
        }
        ObjectKind::Equipment { shape } => match shape {
            EquipmentShape::Box {
                length_m,
                width_m,
                height_m,
            } => {
                ui.horizontal(|ui| {
                    ui.label("Length:");
                    tracked(ui, begun, egui::DragValue::new(length_m).speed(0.1).range(0.1..=10.0).suffix(" m"));
                });
                ui.horizontal(|ui| {
                    ui.label("Width:");
                    tracked(ui, begun, egui::DragValue::new(width_m).speed(0.1).range(0.1..=10.0).suffix(" m"));
                });
                ui.horizontal(|ui| {
                    ui.label("Height:");
                    tracked(ui, begun, egui::DragValue::new(height_m).speed(0.1).range(0.1..=10.0).suffix(" m"));
                });
            }
            EquipmentShape::Cylinder {
                diameter_m,
                height_m,
            } => {
                ui.horizontal(|ui| {
                    ui.label("Diameter:");
                    tracked(
                        ui,
                        begun,
                        egui::DragValue::new(diameter_m).speed(0.1).range(0.1..=10.0).suffix(" m"),
                    );
                });
                ui.horizontal(|ui| {
                    ui.label("Height:");
                    tracked(ui, begun, egui::DragValue::new(height_m).speed(0.1).range(0.1..=10.0).suffix(" m"));
                });
            }
        },
        ObjectKind::AgvStation { station_id } => {
            ui.label(format!("Station ID: {}", station_id));
        }
        ObjectKind::Agv {
            agv_id,
            capacity_kg,
            max_speed,
            battery,
        } => {
            ui.label(format!("AGV ID: {}", agv_id));
            ui.horizontal(|ui| {
                ui.label("Capacity:");
                tracked(
                    ui,
                    begun,
                    egui::DragValue::new(capacity_kg).speed(10.0).range(50.0..=2000.0).suffix(" kg"),
                );
            });
            ui.horizontal(|ui| {
                ui.label("Max speed:");
                tracked(
                    ui,
                    begun,
                    egui::DragValue::new(max_speed).speed(0.1).range(0.1..=5.0).suffix(" m/s"),
                );
            });
            ui.horizontal(|ui| {
                ui.label("Battery:");
                tracked(ui, begun, egui::DragValue::new(battery).range(0.0..=100.0).suffix(" %"));
            });
        }
    }
}

fn live_agv_view(ui: &mut egui::Ui, sim: &SimulationState, agv: &AgvUnit, transform: &Transform) {
    ui.label(egui::RichText::new(&agv.agv_id).strong());
    ui.separator();

    ui.horizontal(|ui| {
        ui.label("Status:");
        ui.colored_label(
            theme::bevy_to_egui(theme::agv_status_color(agv.status)),
            agv.status.display_name(),
        );
    });
    ui.label(format!("Cargo: {}", if agv.has_cargo { "loaded" } else { "empty" }));
    if let Some(task) = &agv.current_task {
        ui.label(format!("Task: {}", task));
    }
    if let Some(target) = agv.target_position {
        ui.label(format!("Target: ({:.1}, {:.1})", target.x, target.y));
    }
    ui.label(format!(
        "Position: ({:.2}, {:.2})",
        transform.translation.x, transform.translation.y
    ));
    ui.label(format!("Battery: {:.0}%", agv.battery));

    ui.separator();
    ui.label(format!("Sim time: {}", sim.format_clock()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::warehouse::Layer;

    fn shelf() -> PlacedObject {
        PlacedObject {
            name: "Shelf 1".into(),
            layer: Layer::Shelf,
            kind: ObjectKind::Shelf {
                width_m: 2.0,
                depth_m: 0.6,
                levels: 4,
            },
        }
    }

    fn run_frame(
        ctx: &egui::Context,
        input: egui::RawInput,
        object: &mut PlacedObject,
        transform: &mut Transform,
        begun: &mut bool,
    ) {
        let layout = LayoutData::default();
        ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                edit_properties(ui, &layout, object, transform, begun);
            });
        });
    }

    #[test]
    fn test_rendering_fields_without_interaction_starts_no_edit() {
        // Merely showing the panel must not flag an edit, or every open
        // frame would push a snapshot into the history log.
        let ctx = egui::Context::default();
        let mut object = shelf();
        let mut transform = Transform::from_xyz(1.0, 2.0, 0.0);
        let mut begun = false;

        for _ in 0..3 {
            run_frame(&ctx, egui::RawInput::default(), &mut object, &mut transform, &mut begun);
        }

        assert!(!begun);
        assert_eq!(transform.translation.x, 1.0);
    }

    #[test]
    fn test_focusing_a_field_starts_an_edit() {
        // Tab focuses the first field (the name box). The flag must go up on
        // that frame, before any keystroke has altered the value.
        let ctx = egui::Context::default();
        let mut object = shelf();
        let mut transform = Transform::from_xyz(1.0, 2.0, 0.0);
        let mut begun = false;

        run_frame(&ctx, egui::RawInput::default(), &mut object, &mut transform, &mut begun);
        assert!(!begun);

        let tab = egui::RawInput {
            events: vec![egui::Event::Key {
                key: egui::Key::Tab,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers: egui::Modifiers::default(),
            }],
            ..Default::default()
        };
        run_frame(&ctx, tab, &mut object, &mut transform, &mut begun);

        assert!(begun);
        assert_eq!(object.name, "Shelf 1");
        assert_eq!(transform.translation.x, 1.0);
    }
}
