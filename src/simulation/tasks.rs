//! Task generation and assignment for idle AGVs.
//!
//! Targets are picked uniformly at random among known shelves (pickup) and
//! stations (delivery). There is no queue, no load balancing, and no
//! exclusivity: two AGVs may be sent to the same shelf, which is accepted
//! behavior.

use bevy::prelude::*;
use rand::Rng;

use crate::constants::TASK_GENERATION_INTERVAL;
use crate::warehouse::{AgvStatus, AgvUnit};

use super::rng::SimRng;
use super::scene::SimScene;
use super::state::SimulationState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    Pickup,
    Deliver,
    Charge,
    Standby,
}

impl TaskKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            TaskKind::Pickup => "Pickup",
            TaskKind::Deliver => "Delivery",
            TaskKind::Charge => "Charge",
            TaskKind::Standby => "Standby",
        }
    }
}

/// A transient assignment. Generated, handed to exactly one AGV, and
/// discarded on completion.
#[derive(Debug, Clone)]
pub struct Task {
    pub kind: TaskKind,
    pub description: String,
    pub target: Option<Vec2>,
}

/// Wall-clock timer driving periodic task generation. Deliberately not
/// scaled by the simulation speed multiplier.
#[derive(Resource)]
pub struct TaskGenerationTimer(pub Timer);

impl Default for TaskGenerationTimer {
    fn default() -> Self {
        Self(Timer::from_seconds(
            TASK_GENERATION_INTERVAL,
            TimerMode::Repeating,
        ))
    }
}

/// Pick the path whose first waypoint is closest to `position`. Ties go to
/// the first path scanned. This is a heuristic only; paths are
/// operator-authored and not guaranteed to lead toward the task target.
pub fn nearest_path_index(position: Vec2, paths: &[Vec<Vec2>]) -> Option<usize> {
    let mut nearest: Option<(usize, f32)> = None;
    for (index, points) in paths.iter().enumerate() {
        let Some(first) = points.first() else {
            continue;
        };
        let distance = position.distance(*first);
        if nearest.is_none_or(|(_, best)| distance < best) {
            nearest = Some((index, distance));
        }
    }
    nearest.map(|(index, _)| index)
}

/// Task for an AGV at simulation start. Kinds rotate by placement order so a
/// fresh run always shows a mix of activity.
pub fn initial_task(index: usize, scene: &SimScene, rng: &mut SimRng) -> Task {
    const ROTATION: [TaskKind; 4] = [
        TaskKind::Pickup,
        TaskKind::Deliver,
        TaskKind::Charge,
        TaskKind::Standby,
    ];
    let kind = ROTATION[index % ROTATION.len()];

    match kind {
        TaskKind::Pickup => pickup_task(scene, rng),
        TaskKind::Deliver => delivery_task(scene, rng),
        TaskKind::Charge => {
            // Charging always targets the first station
            match scene.stations.first() {
                Some(station) => Task {
                    kind,
                    description: "Proceed to charging station".to_string(),
                    target: Some(station.position),
                },
                None => standby_task(),
            }
        }
        TaskKind::Standby => standby_task(),
    }
}

/// Task for an AGV that went idle mid-run: a coin flip between pickup and
/// delivery.
pub fn random_task(scene: &SimScene, rng: &mut SimRng) -> Task {
    if rng.0.gen_range(0..2) == 0 {
        pickup_task(scene, rng)
    } else {
        delivery_task(scene, rng)
    }
}

fn pickup_task(scene: &SimScene, rng: &mut SimRng) -> Task {
    if scene.shelves.is_empty() {
        return standby_task();
    }
    let shelf = &scene.shelves[rng.0.gen_range(0..scene.shelves.len())];
    Task {
        kind: TaskKind::Pickup,
        description: format!("Pick up at shelf {}", shelf.name),
        target: Some(shelf.position),
    }
}

fn delivery_task(scene: &SimScene, rng: &mut SimRng) -> Task {
    if scene.stations.is_empty() {
        return standby_task();
    }
    let station = &scene.stations[rng.0.gen_range(0..scene.stations.len())];
    Task {
        kind: TaskKind::Deliver,
        description: format!("Deliver to station {}", station.name),
        target: Some(station.position),
    }
}

fn standby_task() -> Task {
    Task {
        kind: TaskKind::Standby,
        description: "Standing by".to_string(),
        target: None,
    }
}

/// Apply a task to an AGV. A task with no target leaves the unit idle; one
/// with a target selects the nearest path (when any exist) and starts the
/// unit moving.
pub fn apply_task(agv: &mut AgvUnit, position: Vec2, task: Task, paths: &[Vec<Vec2>]) {
    let Some(target) = task.target else {
        agv.current_task = Some(task.description);
        agv.target_position = None;
        return;
    };

    // Delivery runs carry cargo from the start
    if task.kind == TaskKind::Deliver {
        agv.has_cargo = true;
        agv.cargo_info = Some("Outbound goods".to_string());
    }

    agv.current_task = Some(task.description);
    agv.target_position = Some(target);
    agv.sim.path_index = nearest_path_index(position, paths);
    agv.sim.waypoint_index = 0;
    agv.sim.moving = true;
    agv.status = AgvStatus::Working;
}

/// Periodic scan assigning fresh tasks to idle AGVs. Runs on wall-clock
/// time; the simulation speed multiplier does not change task cadence.
pub fn generate_tasks(
    time: Res<Time>,
    sim: Res<SimulationState>,
    scene: Res<SimScene>,
    mut timer: ResMut<TaskGenerationTimer>,
    mut rng: ResMut<SimRng>,
    mut agvs: Query<(&mut AgvUnit, &Transform)>,
) {
    if !sim.is_active() {
        return;
    }

    if !timer.0.tick(time.delta()).just_finished() {
        return;
    }

    for (mut agv, transform) in agvs.iter_mut() {
        if agv.status == AgvStatus::Idle && !agv.sim.moving {
            let task = random_task(&scene, &mut rng);
            debug!("{}: assigned task '{}'", agv.agv_id, task.description);
            apply_task(
                &mut agv,
                transform.translation.truncate(),
                task,
                &scene.paths,
            );
        }
    }
}

/// Tick the per-AGV re-think delay started on task completion. The timer
/// keeps ticking while paused, but the playing-and-unpaused guard is checked
/// at fire time, so a task is only requested for a live simulation.
pub fn tick_rethink_timers(
    time: Res<Time>,
    sim: Res<SimulationState>,
    scene: Res<SimScene>,
    mut rng: ResMut<SimRng>,
    mut agvs: Query<(&mut AgvUnit, &Transform)>,
) {
    for (mut agv, transform) in agvs.iter_mut() {
        let Some(timer) = agv.sim.rethink.as_mut() else {
            continue;
        };
        if !timer.tick(time.delta()).is_finished() {
            continue;
        }
        agv.sim.rethink = None;

        if sim.is_active() {
            let task = random_task(&scene, &mut rng);
            apply_task(
                &mut agv,
                transform.translation.truncate(),
                task,
                &scene.paths,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::scene::ScenePoint;

    fn scene_with(shelves: usize, stations: usize, paths: Vec<Vec<Vec2>>) -> SimScene {
        SimScene {
            shelves: (0..shelves)
                .map(|i| ScenePoint {
                    name: format!("Shelf {}", i + 1),
                    position: Vec2::new(i as f32, 0.0),
                })
                .collect(),
            stations: (0..stations)
                .map(|i| ScenePoint {
                    name: format!("ST-{:03}", i + 1),
                    position: Vec2::new(0.0, i as f32),
                })
                .collect(),
            paths,
        }
    }

    #[test]
    fn test_nearest_path_by_first_waypoint() {
        // First waypoints at distances 5.0, 2.0, and 8.0 from the origin
        let paths = vec![
            vec![Vec2::new(5.0, 0.0), Vec2::new(6.0, 0.0)],
            vec![Vec2::new(0.0, 2.0), Vec2::new(0.0, 3.0)],
            vec![Vec2::new(8.0, 0.0), Vec2::new(9.0, 0.0)],
        ];
        assert_eq!(nearest_path_index(Vec2::ZERO, &paths), Some(1));
    }

    #[test]
    fn test_nearest_path_tie_goes_to_first() {
        let paths = vec![
            vec![Vec2::new(3.0, 0.0), Vec2::new(4.0, 0.0)],
            vec![Vec2::new(0.0, 3.0), Vec2::new(0.0, 4.0)],
        ];
        assert_eq!(nearest_path_index(Vec2::ZERO, &paths), Some(0));
    }

    #[test]
    fn test_nearest_path_with_no_paths() {
        assert_eq!(nearest_path_index(Vec2::ZERO, &[]), None);
    }

    #[test]
    fn test_nearest_path_skips_empty_point_lists() {
        let paths = vec![vec![], vec![Vec2::new(1.0, 0.0), Vec2::new(2.0, 0.0)]];
        assert_eq!(nearest_path_index(Vec2::ZERO, &paths), Some(1));
    }

    #[test]
    fn test_tasks_without_targets_when_scene_is_empty() {
        let scene = scene_with(0, 0, vec![]);
        let mut rng = SimRng::seeded(1);

        for index in 0..4 {
            let task = initial_task(index, &scene, &mut rng);
            assert!(task.target.is_none(), "kind {:?}", task.kind);
        }
        assert!(random_task(&scene, &mut rng).target.is_none());
    }

    #[test]
    fn test_initial_tasks_rotate_kinds() {
        let scene = scene_with(3, 2, vec![]);
        let mut rng = SimRng::seeded(2);

        assert_eq!(initial_task(0, &scene, &mut rng).kind, TaskKind::Pickup);
        assert_eq!(initial_task(1, &scene, &mut rng).kind, TaskKind::Deliver);
        assert_eq!(initial_task(2, &scene, &mut rng).kind, TaskKind::Charge);
        assert_eq!(initial_task(3, &scene, &mut rng).kind, TaskKind::Standby);
        assert_eq!(initial_task(4, &scene, &mut rng).kind, TaskKind::Pickup);
    }

    #[test]
    fn test_apply_task_with_target_starts_movement() {
        let mut agv = AgvUnit::new("AGV-001".to_string(), 500.0, 1.5, 100.0);
        let paths = vec![
            vec![Vec2::new(5.0, 0.0), Vec2::new(6.0, 0.0)],
            vec![Vec2::new(1.0, 0.0), Vec2::new(2.0, 0.0)],
        ];
        let task = Task {
            kind: TaskKind::Pickup,
            description: "Pick up at shelf A".to_string(),
            target: Some(Vec2::new(6.0, 0.0)),
        };

        apply_task(&mut agv, Vec2::ZERO, task, &paths);

        assert!(agv.sim.moving);
        assert_eq!(agv.sim.path_index, Some(1));
        assert_eq!(agv.sim.waypoint_index, 0);
        assert_eq!(agv.status, AgvStatus::Working);
        assert!(!agv.has_cargo);
    }

    #[test]
    fn test_apply_delivery_task_loads_cargo() {
        let mut agv = AgvUnit::new("AGV-001".to_string(), 500.0, 1.5, 100.0);
        let task = Task {
            kind: TaskKind::Deliver,
            description: "Deliver to station ST-001".to_string(),
            target: Some(Vec2::new(3.0, 3.0)),
        };

        apply_task(&mut agv, Vec2::ZERO, task, &[]);

        assert!(agv.has_cargo);
        assert!(agv.sim.moving);
        // No paths drawn: falls back to direct-line movement
        assert_eq!(agv.sim.path_index, None);
    }

    #[test]
    fn test_apply_targetless_task_stays_idle() {
        let mut agv = AgvUnit::new("AGV-001".to_string(), 500.0, 1.5, 100.0);
        apply_task(&mut agv, Vec2::ZERO, standby_task(), &[]);

        assert!(!agv.sim.moving);
        assert_eq!(agv.status, AgvStatus::Idle);
        assert_eq!(agv.current_task.as_deref(), Some("Standing by"));
    }
}
