//! Scene capture at simulation start, and edit/simulate mode transitions.

use bevy::prelude::*;

use crate::editor::{CurrentMode, EditorMode};
use crate::ui::StatusMessage;
use crate::warehouse::{AgvUnit, ObjectKind, PlacedObject, TravelPath};

use super::rng::SimRng;
use super::state::SimulationState;
use super::tasks::{TaskGenerationTimer, apply_task, initial_task};

/// A named target position captured from a shelf or station.
#[derive(Debug, Clone)]
pub struct ScenePoint {
    pub name: String,
    pub position: Vec2,
}

/// Snapshot of the layout taken when simulation mode is entered. The live
/// ECS scene can keep changing underneath (paths deleted in a previous run,
/// objects edited), but a run always works against this capture.
#[derive(Resource, Default)]
pub struct SimScene {
    pub paths: Vec<Vec<Vec2>>,
    pub shelves: Vec<ScenePoint>,
    pub stations: Vec<ScenePoint>,
}

/// Where an AGV stood when simulation mode was entered; restored on exit.
#[derive(Component)]
pub struct SimHome {
    pub position: Vec2,
    pub rotation: Quat,
}

/// Watch for edit/simulate mode flips and run the matching setup/teardown.
#[allow(clippy::too_many_arguments)]
pub fn handle_mode_transitions(
    mut commands: Commands,
    mode: Res<CurrentMode>,
    mut previous: Local<EditorMode>,
    mut sim: ResMut<SimulationState>,
    mut scene: ResMut<SimScene>,
    mut timer: ResMut<TaskGenerationTimer>,
    mut rng: ResMut<SimRng>,
    mut status: ResMut<StatusMessage>,
    objects: Query<(&PlacedObject, &Transform), Without<AgvUnit>>,
    paths: Query<&TravelPath>,
    mut agvs: Query<(Entity, &mut AgvUnit, &mut Transform, Option<&SimHome>)>,
) {
    if !mode.is_changed() || mode.mode == *previous {
        return;
    }
    let entered = mode.mode;
    *previous = entered;

    match entered {
        EditorMode::Simulate => {
            *scene = capture_scene(&objects, &paths);
            sim.reset();
            timer.0.reset();

            for (index, (entity, mut agv, transform, _)) in agvs.iter_mut().enumerate() {
                agv.reset();
                commands.entity(entity).insert(SimHome {
                    position: transform.translation.truncate(),
                    rotation: transform.rotation,
                });

                let task = initial_task(index, &scene, &mut rng);
                apply_task(
                    &mut agv,
                    transform.translation.truncate(),
                    task,
                    &scene.paths,
                );
            }

            info!(
                "Entered simulation: {} paths, {} shelves, {} stations",
                scene.paths.len(),
                scene.shelves.len(),
                scene.stations.len()
            );
            status.info("Simulation mode");
        }
        EditorMode::Edit => {
            sim.reset();
            for (entity, mut agv, mut transform, home) in agvs.iter_mut() {
                agv.reset();
                if let Some(home) = home {
                    transform.translation.x = home.position.x;
                    transform.translation.y = home.position.y;
                    transform.rotation = home.rotation;
                }
                commands.entity(entity).remove::<SimHome>();
            }
            status.info("Edit mode");
        }
    }
}

fn capture_scene(
    objects: &Query<(&PlacedObject, &Transform), Without<AgvUnit>>,
    paths: &Query<&TravelPath>,
) -> SimScene {
    let mut scene = SimScene::default();

    for (object, transform) in objects.iter() {
        let point = ScenePoint {
            name: object.name.clone(),
            position: transform.translation.truncate(),
        };
        match &object.kind {
            ObjectKind::Shelf { .. } => scene.shelves.push(point),
            ObjectKind::AgvStation { .. } => scene.stations.push(point),
            _ => {}
        }
    }

    for path in paths.iter() {
        if path.points.len() >= 2 {
            scene.paths.push(path.points.clone());
        }
    }

    scene
}
