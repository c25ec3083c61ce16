mod camera;
pub mod conditions;
mod grid;
pub mod history;
pub mod params;
mod path_tool;
mod placement;
mod selection;
pub mod tools;

pub use camera::EditorCamera;
pub use grid::{GridSettings, snap_to_grid};
pub use history::{HistoryCheckpoint, RedoRequest, SnapshotHistory, UndoRequest};
pub use tools::{CurrentMode, CurrentTool, EditorMode, EditorTool, PlacementPalette};

use bevy::prelude::*;

use crate::warehouse::{LayoutData, PlacedObject};
use conditions::{in_edit_mode, tool_is};

/// Update sprite visibility based on layer visibility settings
fn update_layer_visibility(
    layout_data: Res<LayoutData>,
    mut objects_query: Query<(&PlacedObject, &mut Visibility)>,
) {
    for (object, mut visibility) in objects_query.iter_mut() {
        let new_visibility = if layout_data.layer_visible(object.layer) {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };

        if *visibility != new_visibility {
            *visibility = new_visibility;
        }
    }
}

pub struct EditorPlugin;

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<tools::CurrentTool>()
            .init_resource::<tools::CurrentMode>()
            .init_resource::<tools::PlacementPalette>()
            .init_resource::<GridSettings>()
            .init_resource::<selection::DragState>()
            .init_resource::<path_tool::PathDrawState>()
            .init_resource::<history::SnapshotHistory>()
            .add_message::<history::UndoRequest>()
            .add_message::<history::RedoRequest>()
            .add_systems(Startup, camera::spawn_camera)
            .add_systems(
                Update,
                (
                    camera::camera_pan,
                    camera::camera_zoom,
                    camera::apply_camera_zoom,
                    grid::draw_grid,
                    tools::handle_tool_shortcuts.run_if(in_edit_mode),
                    tools::update_cursor_icon,
                    path_tool::render_travel_paths,
                    update_layer_visibility,
                ),
            )
            .add_systems(
                Update,
                (
                    placement::place_object_on_click
                        .run_if(in_edit_mode)
                        .run_if(tool_is(EditorTool::Place)),
                    path_tool::draw_path
                        .run_if(in_edit_mode)
                        .run_if(tool_is(EditorTool::Path)),
                    selection::select_and_drag
                        .run_if(in_edit_mode)
                        .run_if(tool_is(EditorTool::Select)),
                    selection::rotate_selected.run_if(in_edit_mode),
                    selection::delete_selected.run_if(in_edit_mode),
                    selection::draw_selection_indicators,
                    history::handle_undo_redo.run_if(in_edit_mode),
                ),
            );
    }
}
