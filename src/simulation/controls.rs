//! Transport commands: play, pause, stop, rewind, and speed selection.

use bevy::prelude::*;

use crate::ui::StatusMessage;
use crate::warehouse::AgvUnit;

use super::movement::TaskCompleted;
use super::state::SimulationState;
use super::tasks::TaskGenerationTimer;

#[derive(Message)]
pub struct PlaySimulation;

#[derive(Message)]
pub struct PauseSimulation;

#[derive(Message)]
pub struct StopSimulation;

#[derive(Message)]
pub struct RewindSimulation;

#[derive(Message)]
pub struct SetSimulationSpeed {
    pub multiplier: f32,
}

pub fn handle_play(
    mut messages: MessageReader<PlaySimulation>,
    mut sim: ResMut<SimulationState>,
    mut status: ResMut<StatusMessage>,
) {
    for _ in messages.read() {
        // Idempotent while already playing
        if sim.running && !sim.paused {
            continue;
        }
        sim.running = true;
        sim.paused = false;
        status.info("Simulation started");
    }
}

pub fn handle_pause(
    mut messages: MessageReader<PauseSimulation>,
    mut sim: ResMut<SimulationState>,
    mut status: ResMut<StatusMessage>,
) {
    for _ in messages.read() {
        sim.paused = true;
        status.info("Simulation paused");
    }
}

/// Hard reset: clock to zero, every AGV back to idle with no cargo, task, or
/// path state. Idempotent.
pub fn handle_stop(
    mut messages: MessageReader<StopSimulation>,
    mut sim: ResMut<SimulationState>,
    mut timer: ResMut<TaskGenerationTimer>,
    mut agvs: Query<&mut AgvUnit>,
    mut status: ResMut<StatusMessage>,
) {
    for _ in messages.read() {
        sim.reset();
        timer.0.reset();
        for mut agv in agvs.iter_mut() {
            agv.reset();
        }
        status.info("Simulation stopped");
    }
}

pub fn handle_rewind(
    mut messages: MessageReader<RewindSimulation>,
    mut sim: ResMut<SimulationState>,
    mut status: ResMut<StatusMessage>,
) {
    for _ in messages.read() {
        sim.rewind();
        status.info("Rewound 10 seconds");
    }
}

pub fn handle_set_speed(
    mut messages: MessageReader<SetSimulationSpeed>,
    mut sim: ResMut<SimulationState>,
) {
    for message in messages.read() {
        sim.speed = message.multiplier;
        debug!("Simulation speed set to {}x", sim.speed);
    }
}

/// Surface completed tasks in the status bar.
pub fn announce_completions(
    mut completions: MessageReader<TaskCompleted>,
    mut status: ResMut<StatusMessage>,
) {
    for completed in completions.read() {
        if completed.delivery {
            status.info(format!("{} completed a delivery", completed.agv_id));
        } else {
            status.info(format!("{} completed a pickup", completed.agv_id));
        }
    }
}
