use bevy::prelude::*;

use crate::constants::{DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH};
use crate::theme;
use crate::warehouse::LayoutData;

use super::EditorCamera;
use super::camera::CameraZoom;

#[derive(Resource)]
pub struct GridSettings {
    pub snap_enabled: bool,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self { snap_enabled: true }
    }
}

/// Snap position to the center of a grid cell (not to grid intersections)
pub fn snap_to_grid(position: Vec2, grid_size: f32, snap_enabled: bool) -> Vec2 {
    if !snap_enabled {
        return position;
    }

    let half = grid_size / 2.0;
    Vec2::new(
        (position.x / grid_size).floor() * grid_size + half,
        (position.y / grid_size).floor() * grid_size + half,
    )
}

pub fn draw_grid(
    mut gizmos: Gizmos,
    layout_data: Res<LayoutData>,
    camera_query: Query<(&Transform, &CameraZoom), With<EditorCamera>>,
) {
    if !layout_data.grid_visible {
        return;
    }

    let Ok((camera_transform, zoom)) = camera_query.single() else {
        return;
    };

    let grid_size = layout_data.grid_size;
    let grid_color = theme::GRID_COLOR;

    let view_width = DEFAULT_WINDOW_WIDTH * zoom.scale;
    let view_height = DEFAULT_WINDOW_HEIGHT * zoom.scale;

    let camera_pos = camera_transform.translation.truncate();

    let start_x = ((camera_pos.x - view_width / 2.0) / grid_size).floor() as i32;
    let end_x = ((camera_pos.x + view_width / 2.0) / grid_size).ceil() as i32;
    let start_y = ((camera_pos.y - view_height / 2.0) / grid_size).floor() as i32;
    let end_y = ((camera_pos.y + view_height / 2.0) / grid_size).ceil() as i32;

    for x in start_x..=end_x {
        let x_pos = x as f32 * grid_size;
        gizmos.line_2d(
            Vec2::new(x_pos, start_y as f32 * grid_size),
            Vec2::new(x_pos, end_y as f32 * grid_size),
            grid_color,
        );
    }

    for y in start_y..=end_y {
        let y_pos = y as f32 * grid_size;
        gizmos.line_2d(
            Vec2::new(start_x as f32 * grid_size, y_pos),
            Vec2::new(end_x as f32 * grid_size, y_pos),
            grid_color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_settings_default() {
        let settings = GridSettings::default();
        assert!(settings.snap_enabled);
    }

    #[test]
    fn test_snap_disabled_returns_original() {
        let pos = Vec2::new(0.33, 0.47);
        let result = snap_to_grid(pos, 0.6, false);
        assert_eq!(result, pos);
    }

    #[test]
    fn test_snap_to_grid_center_of_cell() {
        // With grid_size 0.6, cell centers are at 0.3, 0.9, 1.5, etc.
        let pos = Vec2::new(0.1, 0.1);
        let result = snap_to_grid(pos, 0.6, true);
        assert_eq!(result, Vec2::new(0.3, 0.3));
    }

    #[test]
    fn test_snap_at_origin() {
        let result = snap_to_grid(Vec2::ZERO, 0.6, true);
        assert_eq!(result, Vec2::new(0.3, 0.3));
    }

    #[test]
    fn test_snap_edge_of_cell() {
        // Position on the boundary snaps into the next cell's center
        let pos = Vec2::new(0.6, 0.6);
        let result = snap_to_grid(pos, 0.6, true);
        assert_eq!(result, Vec2::new(0.9, 0.9));
    }

    #[test]
    fn test_snap_negative_coordinates() {
        let pos = Vec2::new(-0.1, -0.1);
        let result = snap_to_grid(pos, 0.6, true);
        assert_eq!(result, Vec2::new(-0.3, -0.3));
    }

    #[test]
    fn test_snap_different_grid_size() {
        // With grid_size 1.0, centers are at 0.5, 1.5, 2.5, etc.
        let pos = Vec2::new(0.75, 1.75);
        let result = snap_to_grid(pos, 1.0, true);
        assert_eq!(result, Vec2::new(0.5, 1.5));
    }

    #[test]
    fn test_snap_preserves_cell() {
        // Multiple positions within the same cell snap to the same center
        let grid_size = 0.6;
        let center = Vec2::new(0.3, 0.3);

        let positions = [
            Vec2::new(0.01, 0.01),
            Vec2::new(0.3, 0.3),
            Vec2::new(0.59, 0.59),
            Vec2::new(0.0, 0.59),
        ];

        for pos in positions {
            let result = snap_to_grid(pos, grid_size, true);
            assert_eq!(
                result, center,
                "Position {:?} should snap to {:?}",
                pos, center
            );
        }
    }
}
