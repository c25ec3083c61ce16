//! Object selection, drag-move, rotation, and deletion with the Select tool.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::theme;
use crate::warehouse::{LayoutData, PlacedObject, Selected, TravelPath};

use super::grid::{GridSettings, snap_to_grid};
use super::history::HistoryCheckpoint;
use super::params::{CameraParams, is_cursor_over_ui};

/// Hit-test slop around a path polyline, in meters.
const PATH_PICK_DISTANCE: f32 = 0.15;

#[derive(Resource, Default)]
pub struct DragState {
    pub is_dragging: bool,
    /// Cursor offset from the dragged entity's origin, so the object doesn't
    /// jump under the pointer on pickup.
    pub grab_offset: Vec2,
    /// A checkpoint is recorded on the first actual movement, not on click,
    /// so a plain click-to-select never pollutes the history.
    pub checkpointed: bool,
}

/// Rotate a point around a center by the given angle (in radians)
fn rotate_point(point: Vec2, center: Vec2, angle: f32) -> Vec2 {
    let cos_a = angle.cos();
    let sin_a = angle.sin();
    let translated = point - center;
    Vec2::new(
        translated.x * cos_a - translated.y * sin_a,
        translated.x * sin_a + translated.y * cos_a,
    ) + center
}

/// Test if a world position falls inside an object's (possibly rotated)
/// footprint rectangle.
fn point_in_footprint(point: Vec2, transform: &Transform, footprint: Vec2) -> bool {
    let center = transform.translation.truncate();
    let angle = transform.rotation.to_euler(EulerRot::ZYX).0;
    // Un-rotate the point into the object's local frame
    let local = rotate_point(point, center, -angle) - center;
    let half = footprint / 2.0;
    local.x.abs() <= half.x && local.y.abs() <= half.y
}

fn point_near_polyline(point: Vec2, points: &[Vec2], max_distance: f32) -> bool {
    points.windows(2).any(|pair| {
        let seg = pair[1] - pair[0];
        let len_sq = seg.length_squared();
        let t = if len_sq > f32::EPSILON {
            ((point - pair[0]).dot(seg) / len_sq).clamp(0.0, 1.0)
        } else {
            0.0
        };
        point.distance(pair[0] + seg * t) <= max_distance
    })
}

/// Left-click selection plus drag-to-move. The topmost object under the
/// cursor wins; clicking empty floor clears the selection. Travel paths are
/// selectable (for deletion) but not draggable.
///
/// The checkpoint param reads every object's transform while the drag writes
/// one, so the two live in a `ParamSet`.
#[allow(clippy::too_many_arguments)]
pub fn select_and_drag(
    mut commands: Commands,
    mouse: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    camera: CameraParams,
    layout_data: Res<LayoutData>,
    grid_settings: Res<GridSettings>,
    mut drag_state: ResMut<DragState>,
    mut params: ParamSet<(
        HistoryCheckpoint,
        Query<(Entity, &PlacedObject, &mut Transform, Has<Selected>)>,
    )>,
    paths: Query<(Entity, &TravelPath)>,
    selected_entities: Query<Entity, With<Selected>>,
    mut contexts: EguiContexts,
) {
    if mouse.just_released(MouseButton::Left) {
        drag_state.is_dragging = false;
        drag_state.checkpointed = false;
    }

    let Some(cursor_pos) = camera.cursor_world_pos() else {
        return;
    };

    if mouse.just_pressed(MouseButton::Left) && !is_cursor_over_ui(&mut contexts) {
        // Topmost hit wins
        let mut hit: Option<(Entity, f32, bool, Vec2)> = None;
        for (entity, object, transform, is_selected) in params.p1().iter() {
            if !layout_data.layer_visible(object.layer) {
                continue;
            }
            let footprint = object.kind.footprint(layout_data.grid_size);
            if point_in_footprint(cursor_pos, transform, footprint) {
                let z = transform.translation.z;
                if hit.is_none_or(|(_, best_z, _, _)| z > best_z) {
                    hit = Some((entity, z, is_selected, transform.translation.truncate()));
                }
            }
        }

        let path_hit = if hit.is_none() {
            paths
                .iter()
                .find(|(_, path)| point_near_polyline(cursor_pos, &path.points, PATH_PICK_DISTANCE))
                .map(|(entity, _)| entity)
        } else {
            None
        };

        match hit {
            Some((entity, _, is_selected, position)) => {
                if !is_selected {
                    for prev in selected_entities.iter() {
                        commands.entity(prev).remove::<Selected>();
                    }
                    commands.entity(entity).insert(Selected);
                }
                drag_state.is_dragging = true;
                drag_state.grab_offset = position - cursor_pos;
                drag_state.checkpointed = false;
            }
            None => {
                for prev in selected_entities.iter() {
                    commands.entity(prev).remove::<Selected>();
                }
                if let Some(entity) = path_hit {
                    commands.entity(entity).insert(Selected);
                }
            }
        }
    }

    if drag_state.is_dragging && mouse.pressed(MouseButton::Left) {
        let shift = keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight);
        let snap = grid_settings.snap_enabled && !shift;
        let target = snap_to_grid(
            cursor_pos + drag_state.grab_offset,
            layout_data.grid_size,
            snap,
        );

        let needs_move = params
            .p1()
            .iter()
            .find(|(entity, _, _, is_selected)| {
                *is_selected || selected_entities.contains(*entity)
            })
            .is_some_and(|(_, _, transform, _)| target != transform.translation.truncate());
        if !needs_move {
            return;
        }

        if !drag_state.checkpointed {
            params.p0().record();
            drag_state.checkpointed = true;
        }

        let mut objects = params.p1();
        let Some((_, _, mut transform, _)) = objects.iter_mut().find(|(entity, _, _, is_selected)| {
            *is_selected || selected_entities.contains(*entity)
        }) else {
            return;
        };
        transform.translation.x = target.x;
        transform.translation.y = target.y;
    }
}

/// R rotates the selected object by 90 degrees.
pub fn rotate_selected(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut params: ParamSet<(
        HistoryCheckpoint,
        Query<&mut Transform, (With<Selected>, With<PlacedObject>)>,
    )>,
    mut contexts: EguiContexts,
) {
    if !keyboard.just_pressed(KeyCode::KeyR) {
        return;
    }
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.wants_keyboard_input()
    {
        return;
    }
    if params.p1().single().is_err() {
        return;
    }

    params.p0().record();
    if let Ok(mut transform) = params.p1().single_mut() {
        transform.rotation *= Quat::from_rotation_z(std::f32::consts::FRAC_PI_2);
    }
}

/// Delete or Backspace removes the selected object or path.
pub fn delete_selected(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut checkpoint: HistoryCheckpoint,
    selected: Query<Entity, With<Selected>>,
    mut contexts: EguiContexts,
) {
    if !keyboard.just_pressed(KeyCode::Delete) && !keyboard.just_pressed(KeyCode::Backspace) {
        return;
    }
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.wants_keyboard_input()
    {
        return;
    }
    if selected.is_empty() {
        return;
    }

    checkpoint.record();
    for entity in selected.iter() {
        commands.entity(entity).despawn();
    }
}

/// Outline the selected object's footprint, or highlight a selected path.
pub fn draw_selection_indicators(
    mut gizmos: Gizmos,
    layout_data: Res<LayoutData>,
    selected_objects: Query<(&PlacedObject, &Transform), With<Selected>>,
    selected_paths: Query<&TravelPath, With<Selected>>,
) {
    for (object, transform) in selected_objects.iter() {
        let footprint = object.kind.footprint(layout_data.grid_size);
        let pos = transform.translation.truncate();
        let angle = transform.rotation.to_euler(EulerRot::ZYX).0;
        let margin = layout_data.grid_size * 0.1;
        gizmos.rect_2d(
            Isometry2d::new(pos, Rot2::radians(angle)),
            footprint + Vec2::splat(margin),
            theme::SELECTION_COLOR,
        );
    }

    for path in selected_paths.iter() {
        for pair in path.points.windows(2) {
            gizmos.line_2d(pair[0], pair[1], theme::SELECTION_COLOR);
        }
        for point in &path.points {
            gizmos.circle_2d(
                Isometry2d::from_translation(*point),
                0.06,
                theme::SELECTION_COLOR,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_in_axis_aligned_footprint() {
        let transform = Transform::from_xyz(1.0, 1.0, 0.0);
        let footprint = Vec2::new(2.0, 1.0);

        assert!(point_in_footprint(
            Vec2::new(1.0, 1.0),
            &transform,
            footprint
        ));
        assert!(point_in_footprint(
            Vec2::new(1.9, 1.4),
            &transform,
            footprint
        ));
        assert!(!point_in_footprint(
            Vec2::new(2.2, 1.0),
            &transform,
            footprint
        ));
        assert!(!point_in_footprint(
            Vec2::new(1.0, 1.6),
            &transform,
            footprint
        ));
    }

    #[test]
    fn test_point_in_rotated_footprint() {
        // A 2x1 box rotated 90 degrees occupies 1x2 in world space
        let transform = Transform::from_xyz(0.0, 0.0, 0.0)
            .with_rotation(Quat::from_rotation_z(std::f32::consts::FRAC_PI_2));
        let footprint = Vec2::new(2.0, 1.0);

        assert!(point_in_footprint(
            Vec2::new(0.0, 0.9),
            &transform,
            footprint
        ));
        assert!(!point_in_footprint(
            Vec2::new(0.9, 0.0),
            &transform,
            footprint
        ));
    }

    #[test]
    fn test_point_near_polyline() {
        let points = vec![Vec2::ZERO, Vec2::new(2.0, 0.0)];
        assert!(point_near_polyline(Vec2::new(1.0, 0.1), &points, 0.15));
        assert!(!point_near_polyline(Vec2::new(1.0, 0.5), &points, 0.15));
        assert!(point_near_polyline(Vec2::new(-0.1, 0.0), &points, 0.15));
    }
}
