//! Per-tick kinematic advancement of AGVs along their assigned paths.

use bevy::prelude::*;

use crate::constants::{ARRIVE_RADIUS, TASK_RETHINK_DELAY};
use crate::warehouse::{AgvStatus, AgvUnit};

use super::scene::SimScene;
use super::state::SimulationState;

/// A task was completed this tick; drives the status-bar toast.
#[derive(Message)]
pub struct TaskCompleted {
    pub agv_id: String,
    pub delivery: bool,
}

/// Outcome of one movement step toward a target point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    Advancing,
    Reached,
}

/// Move `position` toward `target` by at most `max_speed * dt`, clamped to
/// the remaining distance so the unit never overshoots. A position already
/// within the arrive radius snaps exactly onto the target.
pub fn step_towards(position: &mut Vec2, target: Vec2, max_speed: f32, dt: f32) -> StepResult {
    let delta = target - *position;
    let distance = delta.length();

    if distance < ARRIVE_RADIUS {
        *position = target;
        return StepResult::Reached;
    }

    let step = (max_speed * dt).min(distance);
    *position += delta / distance * step;
    StepResult::Advancing
}

/// What one tick did to a single AGV.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not moving, nothing to do
    Idle,
    Advancing,
    /// Route finished this tick
    Completed,
}

/// Advance one moving AGV by `dt` seconds, following its assigned path or
/// falling back to a direct line when the path reference is stale. Mutates
/// only kinematic fields; the caller handles completion side effects.
pub fn tick_agv(agv: &mut AgvUnit, position: &mut Vec2, paths: &[Vec<Vec2>], dt: f32) -> TickOutcome {
    if !agv.sim.moving {
        return TickOutcome::Idle;
    }

    let path = agv
        .sim
        .path_index
        .and_then(|index| paths.get(index))
        .filter(|points| points.len() >= 2);

    let Some(points) = path else {
        // Stale or absent path: head straight for the raw target
        let Some(target) = agv.target_position else {
            return TickOutcome::Idle;
        };
        return match step_towards(position, target, agv.max_speed, dt) {
            StepResult::Reached => TickOutcome::Completed,
            StepResult::Advancing => {
                agv.status = AgvStatus::Working;
                TickOutcome::Advancing
            }
        };
    };

    if agv.sim.waypoint_index >= points.len() {
        return TickOutcome::Completed;
    }

    let target = points[agv.sim.waypoint_index];
    match step_towards(position, target, agv.max_speed, dt) {
        StepResult::Reached => {
            agv.sim.waypoint_index += 1;
            if agv.sim.waypoint_index >= points.len() {
                TickOutcome::Completed
            } else {
                TickOutcome::Advancing
            }
        }
        StepResult::Advancing => {
            agv.status = AgvStatus::Working;
            TickOutcome::Advancing
        }
    }
}

/// Angle (radians, around the vertical axis of the floor plane) the AGV
/// should face to head for the next waypoint.
pub fn heading_towards(position: Vec2, target: Vec2) -> Option<f32> {
    let delta = target - position;
    if delta.length() > 0.01 {
        Some(delta.to_angle())
    } else {
        None
    }
}

/// Mark one task finished: drop state back to idle, toggle cargo, and start
/// the re-think delay.
pub fn complete_task(agv: &mut AgvUnit) -> TaskCompleted {
    let delivery = agv.has_cargo;
    agv.has_cargo = false;
    agv.cargo_info = None;
    agv.sim.moving = false;
    agv.sim.waypoint_index = 0;
    agv.sim.path_index = None;
    agv.status = AgvStatus::Idle;
    agv.current_task = Some("Standing by".to_string());
    agv.target_position = None;
    agv.sim.rethink = Some(Timer::from_seconds(TASK_RETHINK_DELAY, TimerMode::Once));

    TaskCompleted {
        agv_id: agv.agv_id.clone(),
        delivery,
    }
}

/// Advance the sim clock and every moving AGV. Delta time is scaled by the
/// user-selected speed multiplier, so movement is frame-rate independent.
pub fn update_agvs(
    time: Res<Time>,
    mut sim: ResMut<SimulationState>,
    scene: Res<SimScene>,
    mut agvs: Query<(&mut AgvUnit, &mut Transform)>,
    mut completions: MessageWriter<TaskCompleted>,
) {
    if !sim.is_active() {
        return;
    }

    let dt = time.delta_secs() * sim.speed;
    sim.elapsed += dt as f64;

    for (mut agv, mut transform) in agvs.iter_mut() {
        let mut position = transform.translation.truncate();
        let outcome = tick_agv(&mut agv, &mut position, &scene.paths, dt);

        transform.translation.x = position.x;
        transform.translation.y = position.y;

        match outcome {
            TickOutcome::Completed => {
                let completed = complete_task(&mut agv);
                info!(
                    "{}: {} complete",
                    completed.agv_id,
                    if completed.delivery { "delivery" } else { "pickup" }
                );
                completions.write(completed);
            }
            TickOutcome::Advancing => {
                let target = agv
                    .sim
                    .path_index
                    .and_then(|index| scene.paths.get(index))
                    .and_then(|points| points.get(agv.sim.waypoint_index).copied())
                    .or(agv.target_position);
                if let Some(target) = target
                    && let Some(angle) = heading_towards(position, target)
                {
                    transform.rotation = Quat::from_rotation_z(angle);
                }
            }
            TickOutcome::Idle => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_agv() -> AgvUnit {
        AgvUnit::new("AGV-001".to_string(), 500.0, 1.5, 100.0)
    }

    #[test]
    fn test_clamped_advancement_without_overshoot() {
        // maxSpeed 1.5, target 3.0 away, one-second ticks: two ticks to
        // arrive exactly, a third tick snaps (already within the radius)
        let mut position = Vec2::ZERO;
        let target = Vec2::new(3.0, 0.0);

        assert_eq!(
            step_towards(&mut position, target, 1.5, 1.0),
            StepResult::Advancing
        );
        assert_eq!(position, Vec2::new(1.5, 0.0));

        assert_eq!(
            step_towards(&mut position, target, 1.5, 1.0),
            StepResult::Advancing
        );
        assert_eq!(position, Vec2::new(3.0, 0.0));

        assert_eq!(
            step_towards(&mut position, target, 1.5, 1.0),
            StepResult::Reached
        );
        assert_eq!(position, target);
    }

    #[test]
    fn test_step_clamps_to_remaining_distance() {
        let mut position = Vec2::ZERO;
        let target = Vec2::new(0.5, 0.0);
        step_towards(&mut position, target, 10.0, 1.0);
        assert_eq!(position, target);
    }

    #[test]
    fn test_waypoints_advance_in_order_without_skipping() {
        let paths = vec![vec![
            Vec2::new(1.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(3.0, 0.0),
        ]];
        let mut agv = test_agv();
        agv.sim.path_index = Some(0);
        agv.sim.moving = true;
        agv.target_position = Some(Vec2::new(3.0, 0.0));

        let mut position = Vec2::ZERO;
        let mut visited = Vec::new();
        // Small steps so each waypoint must be reached individually
        for _ in 0..200 {
            let before = agv.sim.waypoint_index;
            let outcome = tick_agv(&mut agv, &mut position, &paths, 0.05);
            if agv.sim.waypoint_index != before {
                // Never advances more than one waypoint per tick
                assert_eq!(agv.sim.waypoint_index, before + 1);
                visited.push(agv.sim.waypoint_index);
            }
            if outcome == TickOutcome::Completed {
                break;
            }
        }

        assert_eq!(visited, vec![1, 2, 3]);
    }

    #[test]
    fn test_completion_toggles_cargo_as_delivery() {
        let mut agv = test_agv();
        agv.has_cargo = true;
        agv.status = AgvStatus::Working;

        let completed = complete_task(&mut agv);

        assert!(completed.delivery);
        assert!(!agv.has_cargo);
        assert_eq!(agv.status, AgvStatus::Idle);
        assert!(agv.sim.rethink.is_some());
    }

    #[test]
    fn test_completion_without_cargo_is_pickup() {
        let mut agv = test_agv();
        let completed = complete_task(&mut agv);
        assert!(!completed.delivery);
    }

    #[test]
    fn test_stale_path_falls_back_to_direct_line() {
        let mut agv = test_agv();
        agv.sim.path_index = Some(5); // deleted mid-run
        agv.sim.moving = true;
        agv.target_position = Some(Vec2::new(1.0, 0.0));

        let mut position = Vec2::ZERO;
        let outcome = tick_agv(&mut agv, &mut position, &[], 0.1);

        assert_eq!(outcome, TickOutcome::Advancing);
        assert!(position.x > 0.0);
    }

    #[test]
    fn test_idle_agv_does_not_move() {
        let mut agv = test_agv();
        let mut position = Vec2::new(2.0, 2.0);
        let outcome = tick_agv(&mut agv, &mut position, &[], 1.0);
        assert_eq!(outcome, TickOutcome::Idle);
        assert_eq!(position, Vec2::new(2.0, 2.0));
    }

    #[test]
    fn test_status_flips_to_working_on_first_movement() {
        let mut agv = test_agv();
        agv.sim.moving = true;
        agv.target_position = Some(Vec2::new(5.0, 0.0));
        assert_eq!(agv.status, AgvStatus::Idle);

        let mut position = Vec2::ZERO;
        tick_agv(&mut agv, &mut position, &[], 0.1);
        assert_eq!(agv.status, AgvStatus::Working);
    }

    #[test]
    fn test_heading_points_along_travel_direction() {
        let angle = heading_towards(Vec2::ZERO, Vec2::new(0.0, 5.0)).unwrap();
        assert!((angle - std::f32::consts::FRAC_PI_2).abs() < 1e-5);

        // Degenerate direction yields no heading change
        assert!(heading_towards(Vec2::ZERO, Vec2::new(0.005, 0.0)).is_none());
    }
}
