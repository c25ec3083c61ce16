//! Drag-to-draw AGV travel paths with the Path tool.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::theme;
use crate::warehouse::{LayoutData, TravelPath, spawn};

use super::history::HistoryCheckpoint;
use super::params::{CameraParams, is_cursor_over_ui};

/// Points gathered during an in-progress drag, before the path is committed.
#[derive(Resource, Default)]
pub struct PathDrawState {
    pub points: Vec<Vec2>,
    pub drawing: bool,
}

impl PathDrawState {
    fn reset(&mut self) {
        self.points.clear();
        self.drawing = false;
    }
}

/// Collect waypoints while the left button is held, and commit the path on
/// release. Successive points closer than half a grid cell are thinned out so
/// a slow drag doesn't produce hundreds of near-duplicate waypoints.
#[allow(clippy::too_many_arguments)]
pub fn draw_path(
    mut commands: Commands,
    mouse: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    camera: CameraParams,
    layout_data: Res<LayoutData>,
    mut draw_state: ResMut<PathDrawState>,
    mut checkpoint: HistoryCheckpoint,
    mut contexts: EguiContexts,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        draw_state.reset();
        return;
    }

    if mouse.just_pressed(MouseButton::Left) {
        if is_cursor_over_ui(&mut contexts) {
            return;
        }
        draw_state.reset();
        draw_state.drawing = true;
    }

    if draw_state.drawing && mouse.pressed(MouseButton::Left) {
        if let Some(cursor_pos) = camera.cursor_world_pos() {
            let min_spacing = layout_data.grid_size / 2.0;
            let far_enough = draw_state
                .points
                .last()
                .is_none_or(|last| last.distance(cursor_pos) >= min_spacing);
            if far_enough {
                draw_state.points.push(cursor_pos);
            }
        }
    }

    if draw_state.drawing && mouse.just_released(MouseButton::Left) {
        if draw_state.points.len() >= 2 {
            checkpoint.record();
            let points = std::mem::take(&mut draw_state.points);
            let count = points.len();
            spawn::spawn_travel_path(&mut commands, points, theme::PATH_DEFAULT_COLOR);
            info!("Committed travel path with {} waypoints", count);
        }
        draw_state.reset();
    }
}

/// Render committed paths as polylines with direction ticks, plus the
/// in-progress drag as a preview.
pub fn render_travel_paths(
    mut gizmos: Gizmos,
    layout_data: Res<LayoutData>,
    paths: Query<&TravelPath>,
    draw_state: Res<PathDrawState>,
) {
    if layout_data.layer_visible(crate::warehouse::Layer::AgvPath) {
        for path in paths.iter() {
            draw_polyline(&mut gizmos, &path.points, path.color, true);
        }
    }

    if draw_state.drawing && draw_state.points.len() >= 2 {
        draw_polyline(&mut gizmos, &draw_state.points, theme::PATH_PREVIEW_COLOR, false);
    }
}

fn draw_polyline(gizmos: &mut Gizmos, points: &[Vec2], color: Color, direction_ticks: bool) {
    for pair in points.windows(2) {
        gizmos.line_2d(pair[0], pair[1], color);

        if direction_ticks {
            let delta = pair[1] - pair[0];
            if delta.length_squared() > f32::EPSILON {
                let mid = pair[0] + delta / 2.0;
                let dir = delta.normalize();
                let tick = 0.12;
                // Two short strokes forming an arrowhead pointing along the path
                let left = Vec2::new(-dir.y, dir.x);
                gizmos.line_2d(mid, mid - dir * tick + left * tick * 0.6, color);
                gizmos.line_2d(mid, mid - dir * tick - left * tick * 0.6, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_state_reset_clears_points() {
        let mut state = PathDrawState {
            points: vec![Vec2::ZERO, Vec2::ONE],
            drawing: true,
        };
        state.reset();
        assert!(state.points.is_empty());
        assert!(!state.drawing);
    }
}
