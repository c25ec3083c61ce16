use super::*;
use crate::constants::MAX_HISTORY_SNAPSHOTS;

fn snapshot(tag: usize) -> SceneSnapshot {
    SceneSnapshot::from_json(format!("{{\"tag\":{tag}}}"))
}

#[test]
fn empty_log_has_nothing_to_do() {
    let mut history = SnapshotHistory::default();
    assert!(!history.can_undo());
    assert!(!history.can_redo());
    assert!(history.undo().is_none());
    assert!(history.redo().is_none());
}

#[test]
fn undo_available_from_second_checkpoint_onward() {
    let mut history = SnapshotHistory::default();

    history.record(snapshot(0));
    assert!(!history.can_undo());

    history.record(snapshot(1));
    assert!(history.can_undo());
}

#[test]
fn n_checkpoints_allow_exactly_n_minus_one_undos() {
    let n = 7;
    let mut history = SnapshotHistory::default();
    for i in 0..n {
        history.record(snapshot(i));
    }

    for _ in 0..n - 1 {
        assert!(history.undo().is_some());
    }
    assert!(!history.can_undo());
    assert!(history.undo().is_none());
}

#[test]
fn undo_returns_previous_snapshot() {
    let mut history = SnapshotHistory::default();
    history.record(snapshot(0));
    history.record(snapshot(1));
    history.record(snapshot(2));

    let restored = history.undo().unwrap();
    assert_eq!(restored.as_json(), snapshot(1).as_json());

    let restored = history.undo().unwrap();
    assert_eq!(restored.as_json(), snapshot(0).as_json());
}

#[test]
fn redo_walks_forward_after_undo() {
    let mut history = SnapshotHistory::default();
    history.record(snapshot(0));
    history.record(snapshot(1));
    history.record(snapshot(2));

    history.undo();
    history.undo();
    assert!(history.can_redo());

    assert_eq!(history.redo().unwrap().as_json(), snapshot(1).as_json());
    assert_eq!(history.redo().unwrap().as_json(), snapshot(2).as_json());
    assert!(!history.can_redo());
}

#[test]
fn recording_after_undo_prunes_redo_branch() {
    let mut history = SnapshotHistory::default();
    history.record(snapshot(0));
    history.record(snapshot(1));
    history.record(snapshot(2));

    history.undo();
    assert!(history.can_redo());

    history.record(snapshot(3));
    // The pruned future is unreachable
    assert!(!history.can_redo());
    assert!(history.redo().is_none());

    // And undo walks back through the new branch
    assert_eq!(history.undo().unwrap().as_json(), snapshot(1).as_json());
}

#[test]
fn log_length_never_exceeds_bound() {
    let mut history = SnapshotHistory::default();
    for i in 0..MAX_HISTORY_SNAPSHOTS + 5 {
        history.record(snapshot(i));
        assert!(history.len() <= MAX_HISTORY_SNAPSHOTS);
    }
    assert_eq!(history.len(), MAX_HISTORY_SNAPSHOTS);
}

#[test]
fn oldest_snapshots_become_unreachable_after_eviction() {
    let mut history = SnapshotHistory::default();
    for i in 0..MAX_HISTORY_SNAPSHOTS + 5 {
        history.record(snapshot(i));
    }

    // Walk all the way back; the oldest reachable snapshot is the one that
    // shifted into index 0 after five evictions.
    let mut oldest = None;
    while let Some(s) = history.undo() {
        oldest = Some(s.as_json().to_string());
    }
    assert_eq!(oldest.unwrap(), snapshot(5).as_json());
}

#[test]
fn cursor_holds_on_eviction_keeping_redo_unavailable() {
    let mut history = SnapshotHistory::default();
    // Fill to capacity, then keep recording. If the cursor advanced on the
    // eviction branch it would drift past the newest entry and redo would
    // wrongly report available (or undo counts would shrink).
    for i in 0..MAX_HISTORY_SNAPSHOTS * 2 {
        history.record(snapshot(i));
        assert!(!history.can_redo());
    }

    // Still exactly bound-1 undos available
    let mut undos = 0;
    while history.undo().is_some() {
        undos += 1;
    }
    assert_eq!(undos, MAX_HISTORY_SNAPSHOTS - 1);
}

#[test]
fn undo_then_record_at_capacity_truncates_then_appends() {
    let mut history = SnapshotHistory::default();
    for i in 0..MAX_HISTORY_SNAPSHOTS {
        history.record(snapshot(i));
    }

    history.undo();
    history.undo();
    history.record(snapshot(100));

    // Two entries pruned, one appended: below capacity again
    assert_eq!(history.len(), MAX_HISTORY_SNAPSHOTS - 1);
    assert!(!history.can_redo());
    assert_eq!(
        history.undo().unwrap().as_json(),
        snapshot(MAX_HISTORY_SNAPSHOTS - 3).as_json()
    );
}

#[test]
fn clear_resets_everything() {
    let mut history = SnapshotHistory::default();
    history.record(snapshot(0));
    history.record(snapshot(1));
    history.clear();

    assert!(history.is_empty());
    assert!(!history.can_undo());
    assert!(!history.can_redo());
}

#[test]
fn no_snapshot_from_before_a_clear_is_reachable() {
    // Opening or creating a layout clears the log. Nothing recorded before
    // that point may come back through undo under the new layout.
    let mut history = SnapshotHistory::default();
    history.record(snapshot(0));
    history.record(snapshot(1));

    history.clear();
    assert!(!history.can_undo());

    history.record(snapshot(100));
    history.record(snapshot(101));

    assert_eq!(history.undo().unwrap().as_json(), snapshot(100).as_json());
    assert!(history.undo().is_none());
}

#[test]
fn corrupt_snapshot_fails_restore_without_panic() {
    let snapshot = SceneSnapshot::from_json("{ not json");
    assert!(snapshot.restore().is_err());
}

#[test]
fn captured_snapshot_round_trips() {
    use crate::warehouse::{LayoutData, SavedLayout};

    let saved = SavedLayout {
        layout: LayoutData::default(),
        objects: vec![],
        paths: vec![],
    };
    let snapshot = SceneSnapshot::capture(&saved).unwrap();
    let restored = snapshot.restore().unwrap();
    assert_eq!(restored.layout.name, saved.layout.name);
}
