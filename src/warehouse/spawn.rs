//! Shared entity construction for placed objects and travel paths.
//!
//! Placement, layout loading, and undo/redo restore all funnel through these
//! helpers so a respawned scene is indistinguishable from a freshly edited one.

use bevy::prelude::*;

use super::{AgvUnit, ObjectKind, PlacedObject, SavedObject, TravelPath};

/// Spawn one placed object from its saved form. AGVs get a fresh [`AgvUnit`]
/// built from their rated attributes; live simulation state never survives a
/// respawn.
pub fn spawn_object(commands: &mut Commands, saved: &SavedObject, grid_size: f32) -> Entity {
    let footprint = saved.kind.footprint(grid_size);
    let z = saved.layer.z_base();

    let mut entity = commands.spawn((
        Sprite::from_color(saved.kind.color(), footprint),
        Transform {
            translation: saved.position.extend(z),
            rotation: Quat::from_rotation_z(saved.rotation),
            ..Default::default()
        },
        PlacedObject {
            name: saved.name.clone(),
            layer: saved.layer,
            kind: saved.kind.clone(),
        },
    ));

    if let ObjectKind::Agv {
        agv_id,
        capacity_kg,
        max_speed,
        battery,
    } = &saved.kind
    {
        entity.insert(AgvUnit::new(
            agv_id.clone(),
            *capacity_kg,
            *max_speed,
            *battery,
        ));
    }

    entity.id()
}

/// Spawn a travel path entity. Paths with fewer than two points are not
/// renderable or assignable and are rejected here.
pub fn spawn_travel_path(
    commands: &mut Commands,
    points: Vec<Vec2>,
    color: Color,
) -> Option<Entity> {
    if points.len() < 2 {
        return None;
    }

    let z = super::Layer::AgvPath.z_base();
    Some(
        commands
            .spawn((
                Transform::from_translation(Vec3::new(0.0, 0.0, z)),
                TravelPath { points, color },
            ))
            .id(),
    )
}
