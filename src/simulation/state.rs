//! Simulation transport state: play/pause flags, speed, and the sim clock.

use bevy::prelude::*;

use crate::constants::REWIND_STEP;

#[derive(Resource, Debug)]
pub struct SimulationState {
    pub running: bool,
    pub paused: bool,
    /// User-selectable time multiplier applied to each tick's delta
    pub speed: f32,
    /// Simulated seconds elapsed since the last hard reset
    pub elapsed: f64,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self {
            running: false,
            paused: false,
            speed: 1.0,
            elapsed: 0.0,
        }
    }
}

impl SimulationState {
    /// Currently advancing: playing and not paused.
    pub fn is_active(&self) -> bool {
        self.running && !self.paused
    }

    /// Jump the displayed clock backward without touching AGV state.
    pub fn rewind(&mut self) {
        self.elapsed = (self.elapsed - REWIND_STEP).max(0.0);
    }

    /// Hard reset of the transport. AGV state is reset separately.
    pub fn reset(&mut self) {
        self.running = false;
        self.paused = false;
        self.elapsed = 0.0;
    }

    /// Elapsed time formatted as `HH:MM:SS` for the status bar.
    pub fn format_clock(&self) -> String {
        let total = self.elapsed as u64;
        let hours = total / 3600;
        let minutes = (total % 3600) / 60;
        let seconds = total % 60;
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_stopped_at_normal_speed() {
        let state = SimulationState::default();
        assert!(!state.is_active());
        assert_eq!(state.speed, 1.0);
        assert_eq!(state.elapsed, 0.0);
    }

    #[test]
    fn test_active_requires_running_and_unpaused() {
        let mut state = SimulationState::default();
        state.running = true;
        assert!(state.is_active());
        state.paused = true;
        assert!(!state.is_active());
    }

    #[test]
    fn test_clock_formatting() {
        let mut state = SimulationState::default();
        assert_eq!(state.format_clock(), "00:00:00");

        state.elapsed = 59.9;
        assert_eq!(state.format_clock(), "00:00:59");

        state.elapsed = 3600.0 + 2.0 * 60.0 + 5.0;
        assert_eq!(state.format_clock(), "01:02:05");

        state.elapsed = 100.0 * 3600.0;
        assert_eq!(state.format_clock(), "100:00:00");
    }

    #[test]
    fn test_rewind_clamps_at_zero() {
        let mut state = SimulationState::default();
        state.elapsed = 25.0;
        state.rewind();
        assert_eq!(state.elapsed, 15.0);

        state.elapsed = 3.0;
        state.rewind();
        assert_eq!(state.elapsed, 0.0);
    }

    #[test]
    fn test_reset_preserves_speed() {
        let mut state = SimulationState {
            running: true,
            paused: true,
            speed: 5.0,
            elapsed: 42.0,
        };
        state.reset();
        assert!(!state.running);
        assert!(!state.paused);
        assert_eq!(state.elapsed, 0.0);
        assert_eq!(state.speed, 5.0);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut state = SimulationState {
            running: true,
            paused: false,
            speed: 2.0,
            elapsed: 17.5,
        };
        state.reset();
        state.reset();
        assert!(!state.running);
        assert!(!state.paused);
        assert_eq!(state.elapsed, 0.0);
        assert_eq!(state.speed, 2.0);
    }
}
