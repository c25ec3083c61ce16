use bevy::prelude::*;

use crate::constants::MAX_HISTORY_SNAPSHOTS;
use crate::warehouse::SavedLayout;

/// One full serialized copy of the scene. Opaque to the history log: it only
/// ever stores, returns, and discards these.
#[derive(Clone, Debug)]
pub struct SceneSnapshot {
    json: String,
}

impl SceneSnapshot {
    pub fn capture(saved: &SavedLayout) -> Result<Self, serde_json::Error> {
        serde_json::to_string(saved).map(|json| Self { json })
    }

    pub fn from_json(json: impl Into<String>) -> Self {
        Self { json: json.into() }
    }

    /// Parse back into a layout. Failure is surfaced to the caller; the
    /// restore step must not have touched the scene yet when this runs.
    pub fn restore(&self) -> Result<SavedLayout, serde_json::Error> {
        serde_json::from_str(&self.json)
    }

    pub fn as_json(&self) -> &str {
        &self.json
    }
}

/// Bounded linear undo/redo log of whole-scene snapshots.
///
/// The cursor always points at the snapshot describing the current scene
/// (once anything has been recorded). Recording prunes any redo branch,
/// appends, and either advances the cursor or -- when the oldest entry is
/// evicted at capacity -- holds it in place, because the list shifted
/// underneath it. That asymmetry is load-bearing: advancing on eviction
/// would leave the cursor one past the true newest entry and silently
/// corrupt redo availability.
#[derive(Resource, Default)]
pub struct SnapshotHistory {
    entries: Vec<SceneSnapshot>,
    cursor: usize,
}

impl SnapshotHistory {
    /// Record a checkpoint. Call this with the scene state *before* a
    /// mutation is applied.
    pub fn record(&mut self, snapshot: SceneSnapshot) {
        // Prior undos orphan the entries after the cursor; a new checkpoint
        // makes that future unreachable.
        if !self.entries.is_empty() && self.cursor < self.entries.len() - 1 {
            self.entries.truncate(self.cursor + 1);
        }

        self.entries.push(snapshot);

        if self.entries.len() > MAX_HISTORY_SNAPSHOTS {
            self.entries.remove(0);
            // Cursor holds: the element it pointed at moved down one index.
        } else if self.entries.len() > 1 {
            self.cursor += 1;
        }
    }

    /// Step back one snapshot, returning the state to restore. No-op at the
    /// oldest entry.
    pub fn undo(&mut self) -> Option<&SceneSnapshot> {
        if self.cursor == 0 || self.entries.is_empty() {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor])
    }

    /// Step forward one snapshot, returning the state to restore. No-op at
    /// the newest entry.
    pub fn redo(&mut self) -> Option<&SceneSnapshot> {
        if self.entries.is_empty() || self.cursor >= self.entries.len() - 1 {
            return None;
        }
        self.cursor += 1;
        Some(&self.entries[self.cursor])
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        !self.entries.is_empty() && self.cursor < self.entries.len() - 1
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }
}
