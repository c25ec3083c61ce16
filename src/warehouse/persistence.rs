use bevy::prelude::*;
use std::path::PathBuf;

use super::{
    LayoutData, PlacedObject, SavedLayout, SavedObject, SavedTravelPath, TravelPath,
    array_to_color, spawn,
};
use crate::editor::SnapshotHistory;
use crate::ui::StatusMessage;

#[derive(Message)]
pub struct SaveLayoutRequest {
    pub path: PathBuf,
}

#[derive(Message)]
pub struct LoadLayoutRequest {
    pub path: PathBuf,
}

#[derive(Message)]
pub struct NewLayoutRequest;

#[derive(Resource, Default)]
pub struct LayoutLoadError {
    pub message: Option<String>,
}

/// Assemble the full serializable scene from the live world. Shared by the
/// save system and the undo/redo snapshot capture.
pub fn collect_saved_layout<'a>(
    layout: &LayoutData,
    objects: impl Iterator<Item = (&'a PlacedObject, &'a Transform)>,
    paths: impl Iterator<Item = &'a TravelPath>,
) -> SavedLayout {
    SavedLayout {
        layout: layout.clone(),
        objects: objects
            .map(|(object, transform)| SavedObject::from_entity(object, transform))
            .collect(),
        paths: paths.map(SavedTravelPath::from_path).collect(),
    }
}

pub fn save_layout_system(
    mut events: MessageReader<SaveLayoutRequest>,
    layout_data: Res<LayoutData>,
    objects: Query<(&PlacedObject, &Transform)>,
    paths: Query<&TravelPath>,
    mut status: ResMut<StatusMessage>,
) {
    for event in events.read() {
        let saved = collect_saved_layout(&layout_data, objects.iter(), paths.iter());

        match serde_json::to_string_pretty(&saved) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&event.path, json) {
                    error!("Failed to save layout: {}", e);
                    status.error(format!("Save failed: {e}"));
                } else {
                    info!("Layout saved to {:?}", event.path);
                    status.info(format!("Saved {}", event.path.display()));
                }
            }
            Err(e) => {
                error!("Failed to serialize layout: {}", e);
                status.error(format!("Save failed: {e}"));
            }
        }
    }
}

pub fn load_layout_system(
    mut commands: Commands,
    mut events: MessageReader<LoadLayoutRequest>,
    mut layout_data: ResMut<LayoutData>,
    mut load_error: ResMut<LayoutLoadError>,
    mut status: ResMut<StatusMessage>,
    mut history: ResMut<SnapshotHistory>,
    existing_objects: Query<Entity, With<PlacedObject>>,
    existing_paths: Query<Entity, With<TravelPath>>,
) {
    for event in events.read() {
        load_error.message = None;

        let json = match std::fs::read_to_string(&event.path) {
            Ok(content) => content,
            Err(e) => {
                load_error.message = Some(format!("Failed to read file: {}", e));
                error!("{}", load_error.message.as_ref().unwrap());
                continue;
            }
        };

        // Parse before touching the scene: a bad file must not leave a
        // half-cleared layout behind.
        let saved: SavedLayout = match serde_json::from_str(&json) {
            Ok(layout) => layout,
            Err(e) => {
                load_error.message = Some(format!("Failed to parse layout file: {}", e));
                error!("{}", load_error.message.as_ref().unwrap());
                continue;
            }
        };

        // Snapshots of the previous layout must not survive into this one;
        // undoing across an open would resurrect the old scene.
        history.clear();

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

        info!("Layout loaded from {:?}", event.path);
        status.info(format!("Opened {}", event.path.display()));
    }
}

pub fn new_layout_system(
    mut commands: Commands,
    mut events: MessageReader<NewLayoutRequest>,
    mut layout_data: ResMut<LayoutData>,
    mut history: ResMut<SnapshotHistory>,
    existing_objects: Query<Entity, With<PlacedObject>>,
    existing_paths: Query<Entity, With<TravelPath>>,
) {
    for _ in events.read() {
        history.clear();
        clear_scene(&mut commands, &existing_objects, &existing_paths);
        *layout_data = LayoutData::default();
        info!("Created new layout");
    }
}

pub fn clear_scene(
    commands: &mut Commands,
    objects: &Query<Entity, With<PlacedObject>>,
    paths: &Query<Entity, With<TravelPath>>,
) {
    for entity in objects.iter() {
        commands.entity(entity).despawn();
    }
    for entity in paths.iter() {
        commands.entity(entity).despawn();
    }
}

pub fn ensure_layouts_directory() {
    let layouts_dir = crate::paths::layouts_dir();
    if !layouts_dir.exists() {
        if let Err(e) = std::fs::create_dir_all(&layouts_dir) {
            warn!("Failed to create layouts directory: {}", e);
        }
    }
}
