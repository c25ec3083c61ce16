//! Bounded undo/redo built on whole-scene snapshots.
//!
//! Every mutating editor operation records a checkpoint of the scene before
//! it applies its change; undo and redo walk the resulting log and rebuild
//! the scene from the selected snapshot.

mod snapshot_log;
mod systems;

pub use snapshot_log::{SceneSnapshot, SnapshotHistory};
pub use systems::{HistoryCheckpoint, RedoRequest, UndoRequest, handle_undo_redo};

#[cfg(test)]
mod tests;
