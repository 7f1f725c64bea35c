//! Linear undo/redo history over whole-scene snapshots.

use crate::scene::Scene;

/// Default maximum number of snapshots kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Smallest usable limit: the current scene plus one step to undo into.
pub const MIN_HISTORY_LIMIT: usize = 2;

/// Snapshot list plus a cursor pointing at the current scene.
///
/// The cursor always indexes a valid snapshot. Committing after an undo
/// discards every snapshot that was reachable through redo.
#[derive(Debug, Clone)]
pub struct HistoryManager {
    snapshots: Vec<Scene>,
    cursor: usize,
    /// Maximum number of snapshots (`None` = unbounded).
    limit: Option<usize>,
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new(Scene::new())
    }
}

impl HistoryManager {
    /// Create a history holding a single snapshot.
    pub fn new(initial: Scene) -> Self {
        Self {
            snapshots: vec![initial],
            cursor: 0,
            limit: None,
        }
    }

    /// Cap the number of snapshots kept; the oldest are dropped first.
    ///
    /// A limit below [`MIN_HISTORY_LIMIT`] is raised to it, so the last
    /// commit can always be undone.
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit.map(|l| l.max(MIN_HISTORY_LIMIT));
        self.enforce_limit();
        self
    }

    /// Record `scene` as the new current snapshot.
    pub fn commit(&mut self, scene: Scene) {
        let dropped = self.snapshots.len() - (self.cursor + 1);
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(scene);
        self.cursor = self.snapshots.len() - 1;
        self.enforce_limit();

        log::debug!(
            "history commit: cursor={} len={} (discarded {} redo snapshots)",
            self.cursor,
            self.snapshots.len(),
            dropped
        );
    }

    /// Step back one snapshot. Returns `None` at the oldest snapshot.
    pub fn undo(&mut self) -> Option<&Scene> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        log::debug!("history undo: cursor={}", self.cursor);
        self.snapshots.get(self.cursor)
    }

    /// Step forward one snapshot. Returns `None` at the newest snapshot.
    pub fn redo(&mut self) -> Option<&Scene> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        log::debug!("history redo: cursor={}", self.cursor);
        self.snapshots.get(self.cursor)
    }

    /// The snapshot at the cursor.
    pub fn current(&self) -> &Scene {
        &self.snapshots[self.cursor]
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of stored snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always false: a history holds at least one snapshot.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    fn enforce_limit(&mut self) {
        let Some(limit) = self.limit else {
            return;
        };
        if self.snapshots.len() > limit {
            let excess = self.snapshots.len() - limit;
            // Commits always leave the cursor at the tail, so it never points
            // into the drained range.
            let excess = excess.min(self.cursor);
            self.snapshots.drain(..excess);
            self.cursor -= excess;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Element, SerializableColor, Stroke};
    use kurbo::Point;

    fn scene_with(n: usize) -> Scene {
        (0..n).fold(Scene::new(), |scene, i| {
            scene.with_appended(Element::Stroke(Stroke::new(
                Point::new(i as f64, 0.0),
                SerializableColor::black(),
            )))
        })
    }

    #[test]
    fn test_starts_with_single_empty_snapshot() {
        let history = HistoryManager::default();
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 0);
        assert!(history.current().is_empty());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_redo_bounds_are_noops() {
        let mut history = HistoryManager::default();
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
        assert_eq!(history.cursor(), 0);
    }

    #[test]
    fn test_undo_then_redo_restores_scene() {
        let mut history = HistoryManager::default();
        let one = scene_with(1);
        let two = scene_with(2);
        history.commit(one.clone());
        history.commit(two.clone());

        assert_eq!(history.undo(), Some(&one));
        assert_eq!(history.redo(), Some(&two));
        assert_eq!(history.current(), &two);
    }

    #[test]
    fn test_commit_after_undo_truncates_redo_branch() {
        let mut history = HistoryManager::default();
        history.commit(scene_with(1));
        history.commit(scene_with(2));
        history.commit(scene_with(3));

        history.undo();
        history.undo();
        assert!(history.can_redo());

        let branch = scene_with(5);
        history.commit(branch.clone());

        assert!(!history.can_redo());
        assert_eq!(history.len(), 3);
        assert_eq!(history.current(), &branch);
        assert!(history.redo().is_none());
    }

    #[test]
    fn test_limit_drops_oldest_snapshots() {
        let mut history = HistoryManager::default().with_limit(Some(3));
        for n in 1..=5 {
            history.commit(scene_with(n));
        }

        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), 2);
        assert_eq!(history.current().len(), 5);

        history.undo();
        history.undo();
        assert!(!history.can_undo());
        assert_eq!(history.current().len(), 3);
    }

    #[test]
    fn test_small_limits_still_allow_one_undo() {
        for limit in [0, 1, MIN_HISTORY_LIMIT] {
            let mut history = HistoryManager::default().with_limit(Some(limit));
            assert_eq!(history.limit(), Some(MIN_HISTORY_LIMIT));
            let drawn = scene_with(1);
            history.commit(drawn.clone());
            history.commit(Scene::new());
            assert_eq!(history.len(), 2);
            assert_eq!(history.undo(), Some(&drawn));
        }
    }
}
