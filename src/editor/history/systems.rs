//! Checkpoint capture and undo/redo restore systems.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::ui::StatusMessage;
use crate::warehouse::{
    LayoutData, LayoutLoadError, PlacedObject, TravelPath, array_to_color, collect_saved_layout,
    persistence::clear_scene, spawn,
};

use super::snapshot_log::{SceneSnapshot, SnapshotHistory};

/// Undo requested from the toolbar.
#[derive(Message)]
pub struct UndoRequest;

/// Redo requested from the toolbar.
#[derive(Message)]
pub struct RedoRequest;

/// Bundled access for recording a checkpoint of the current scene.
///
/// Every mutating editor operation calls [`HistoryCheckpoint::record`]
/// *before* applying its change, so the captured snapshot describes the
/// scene as it was.
#[derive(SystemParam)]
pub struct HistoryCheckpoint<'w, 's> {
    history: ResMut<'w, SnapshotHistory>,
    layout: Res<'w, LayoutData>,
    objects: Query<'w, 's, (&'static PlacedObject, &'static Transform)>,
    paths: Query<'w, 's, &'static TravelPath>,
}

impl HistoryCheckpoint<'_, '_> {
    pub fn record(&mut self) {
        let saved = collect_saved_layout(&self.layout, self.objects.iter(), self.paths.iter());
        match SceneSnapshot::capture(&saved) {
            Ok(snapshot) => self.history.record(snapshot),
            Err(e) => error!("Failed to capture scene snapshot: {}", e),
        }
    }
}

/// Handle Ctrl+Z / Ctrl+Y / Ctrl+Shift+Z plus toolbar undo/redo requests,
/// restoring the scene from the selected snapshot.
#[allow(clippy::too_many_arguments)]
pub fn handle_undo_redo(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut undo_events: MessageReader<UndoRequest>,
    mut redo_events: MessageReader<RedoRequest>,
    mut history: ResMut<SnapshotHistory>,
    mut layout_data: ResMut<LayoutData>,
    mut load_error: ResMut<LayoutLoadError>,
    mut status: ResMut<StatusMessage>,
    existing_objects: Query<Entity, With<PlacedObject>>,
    existing_paths: Query<Entity, With<TravelPath>>,
    mut contexts: EguiContexts,
) {
    let mut want_undo = undo_events.read().next().is_some();
    let mut want_redo = redo_events.read().next().is_some();

    let typing = contexts
        .ctx_mut()
        .map(|ctx| ctx.wants_keyboard_input())
        .unwrap_or(false);

    if !typing {
        let ctrl =
            keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
        let shift = keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight);

        if ctrl && !shift && keyboard.just_pressed(KeyCode::KeyZ) {
            want_undo = true;
        }
        if (ctrl && keyboard.just_pressed(KeyCode::KeyY))
            || (ctrl && shift && keyboard.just_pressed(KeyCode::KeyZ))
        {
            want_redo = true;
        }
    }

    let snapshot = if want_undo {
        history.undo().cloned()
    } else if want_redo {
        history.redo().cloned()
    } else {
        None
    };

    let Some(snapshot) = snapshot else {
        return;
    };

    // Parse before clearing anything: restore is all-or-nothing.
    let saved = match snapshot.restore() {
        Ok(saved) => saved,
        Err(e) => {
            load_error.message = Some(format!("History snapshot is corrupt: {}", e));
            error!("{}", load_error.message.as_ref().unwrap());
            return;
        }
    };

    clear_scene(&mut commands, &existing_objects, &existing_paths);
    *layout_data = saved.layout;

    for object in &saved.objects {
        spawn::spawn_object(&mut commands, object, layout_data.grid_size);
    }
    for path in &saved.paths {
        spawn::spawn_travel_path(
            &mut commands,
            path.points.clone(),
            array_to_color(path.color),
        );
    }

    status.info(if want_undo { "Undone" } else { "Redone" });
}
