//! Run conditions for controlling when editor and simulation systems execute.

use bevy::prelude::*;

use super::tools::{CurrentMode, CurrentTool, EditorMode, EditorTool};

/// Run condition: returns true when the current tool matches the specified tool.
///
/// Usage: `.run_if(tool_is(EditorTool::Place))`
pub fn tool_is(tool: EditorTool) -> impl FnMut(Res<CurrentTool>) -> bool + Clone {
    move |current: Res<CurrentTool>| current.tool == tool
}

/// Run condition: the floor plan is being edited.
pub fn in_edit_mode(mode: Res<CurrentMode>) -> bool {
    mode.mode == EditorMode::Edit
}

/// Run condition: the simulation view is active (running or not).
pub fn in_simulate_mode(mode: Res<CurrentMode>) -> bool {
    mode.mode == EditorMode::Simulate
}
