//! Centralized constants used across the application.
//!
//! This module contains magic numbers and configuration values that are used
//! in multiple places or would benefit from being named constants.

/// Default window width in pixels (also used for grid viewport calculations)
pub const DEFAULT_WINDOW_WIDTH: f32 = 1600.0;

/// Default window height in pixels (also used for grid viewport calculations)
pub const DEFAULT_WINDOW_HEIGHT: f32 = 900.0;

/// Default grid cell size in meters (matches a standard 600mm floor marking)
pub const DEFAULT_GRID_SIZE: f32 = 0.6;

/// Maximum number of recently opened layouts to remember in config
pub const MAX_RECENT_LAYOUTS: usize = 5;

/// Maximum number of scene snapshots kept for undo/redo
pub const MAX_HISTORY_SNAPSHOTS: usize = 10;

/// Distance (meters) at which an AGV counts as having reached its target
pub const ARRIVE_RADIUS: f32 = 0.1;

/// Default AGV top speed in meters per second
pub const DEFAULT_AGV_SPEED: f32 = 1.5;

/// Default AGV payload capacity in kilograms
pub const DEFAULT_AGV_CAPACITY: f32 = 500.0;

/// Seconds between task-generation sweeps (wall clock, unscaled by sim speed)
pub const TASK_GENERATION_INTERVAL: f32 = 5.0;

/// Seconds an AGV idles after completing a task before requesting another
pub const TASK_RETHINK_DELAY: f32 = 2.0;

/// Seconds removed from the displayed clock by one rewind press
pub const REWIND_STEP: f64 = 10.0;

/// Selectable simulation speed multipliers
pub const SIM_SPEED_STEPS: &[f32] = &[0.5, 1.0, 2.0, 5.0];
