//! Click-to-place object creation with the Place tool.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::warehouse::{ObjectCounters, SavedObject, spawn};

use super::grid::{GridSettings, snap_to_grid};
use super::history::HistoryCheckpoint;
use super::params::{CameraParams, is_cursor_over_ui};
use super::tools::PlacementPalette;

/// Drop the selected palette item at the clicked cell. Holding Shift bypasses
/// grid snapping for free placement.
#[allow(clippy::too_many_arguments)]
pub fn place_object_on_click(
    mut commands: Commands,
    mouse: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    camera: CameraParams,
    palette: Res<PlacementPalette>,
    grid_settings: Res<GridSettings>,
    layout_data: Res<crate::warehouse::LayoutData>,
    mut counters: ResMut<ObjectCounters>,
    mut checkpoint: HistoryCheckpoint,
    mut contexts: EguiContexts,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    if is_cursor_over_ui(&mut contexts) {
        return;
    }
    let Some(cursor_pos) = camera.cursor_world_pos() else {
        return;
    };

    let shift = keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight);
    let snap = grid_settings.snap_enabled && !shift;
    let position = snap_to_grid(cursor_pos, layout_data.grid_size, snap);

    // Checkpoint the scene as it is, then mutate
    checkpoint.record();

    let kind = palette.selection.make_kind(&mut counters);
    let saved = SavedObject {
        name: kind.default_name(),
        layer: kind.layer(),
        position,
        rotation: 0.0,
        kind,
    };
    spawn::spawn_object(&mut commands, &saved, layout_data.grid_size);

    info!("Placed {} at ({:.2}, {:.2})", saved.name, position.x, position.y);
}
