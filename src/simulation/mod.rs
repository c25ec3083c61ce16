//! AGV movement simulation: task assignment, path following, and transport
//! controls.

mod controls;
mod movement;
mod rng;
mod scene;
mod state;
mod tasks;
mod visuals;

pub use controls::{
    PauseSimulation, PlaySimulation, RewindSimulation, SetSimulationSpeed, StopSimulation,
};
pub use movement::TaskCompleted;
pub use rng::SimRng;
pub use scene::{ScenePoint, SimScene};
pub use state::SimulationState;
pub use tasks::TaskGenerationTimer;

use bevy::prelude::*;

use crate::editor::conditions::in_simulate_mode;

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationState>()
            .init_resource::<SimScene>()
            .init_resource::<SimRng>()
            .init_resource::<TaskGenerationTimer>()
            .add_message::<PlaySimulation>()
            .add_message::<PauseSimulation>()
            .add_message::<StopSimulation>()
            .add_message::<RewindSimulation>()
            .add_message::<SetSimulationSpeed>()
            .add_message::<TaskCompleted>()
            .add_systems(
                Update,
                (
                    scene::handle_mode_transitions,
                    // Tints and cargo indicators also settle after leaving
                    // simulate mode, so they are not gated on it
                    visuals::apply_status_tints,
                    visuals::sync_cargo_indicators,
                ),
            )
            .add_systems(
                Update,
                (
                    controls::handle_play.run_if(on_message::<PlaySimulation>),
                    controls::handle_pause.run_if(on_message::<PauseSimulation>),
                    controls::handle_stop.run_if(on_message::<StopSimulation>),
                    controls::handle_rewind.run_if(on_message::<RewindSimulation>),
                    controls::handle_set_speed.run_if(on_message::<SetSimulationSpeed>),
                )
                    .run_if(in_simulate_mode),
            )
            .add_systems(
                Update,
                (
                    tasks::generate_tasks,
                    tasks::tick_rethink_timers,
                    movement::update_agvs,
                    controls::announce_completions,
                )
                    .chain()
                    .run_if(in_simulate_mode),
            );
    }
}
