//! Bounded linear undo/redo history.
//!
//! Entries are stored oldest-first with an explicit cursor pointing at "now".
//! Pushing while the cursor is behind the newest entry discards the redo
//! branch; pushing into a full history evicts the oldest entry.

use log::debug;
use std::collections::VecDeque;

/// Reference capacity for drawing history.
pub const DEFAULT_HISTORY_LIMIT: usize = 30;

/// Largest limit accepted from configuration.
pub const MAX_HISTORY_LIMIT: usize = 1000;

/// Fixed-capacity undo/redo buffer with branch-on-write truncation.
///
/// `undo` and `redo` saturate at the oldest and newest entries and return the
/// entry at the cursor afterwards; they only return `None` for an empty
/// history.
#[derive(Debug, Clone)]
pub struct BoundedHistory<T> {
    entries: VecDeque<T>,
    limit: usize,
    current: Option<usize>,
}

impl<T> BoundedHistory<T> {
    /// Creates an empty history holding at most `limit` entries.
    ///
    /// Limits below 2 are accepted: such a history always holds exactly the
    /// most recent entry and undo never moves.
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(limit.clamp(1, DEFAULT_HISTORY_LIMIT)),
            limit,
            current: None,
        }
    }

    /// Creates a history seeded with one entry.
    pub fn with_initial(limit: usize, initial: T) -> Self {
        let mut history = Self::new(limit);
        history.push(initial);
        history
    }

    /// Records a new entry as "now".
    pub fn push(&mut self, entry: T) {
        if let Some(current) = self.current {
            let discarded = self.entries.len() - (current + 1);
            if discarded > 0 {
                debug!("History: discarding {discarded} redo entries");
            }
            self.entries.truncate(current + 1);
        }

        // Cursor arithmetic is signed: the pin below can go negative for limits < 2.
        let mut cursor = self.current.map_or(-1, |c| c as isize);
        if self.entries.len() >= self.limit && !self.entries.is_empty() {
            self.entries.pop_front();
            cursor = self.limit as isize - 2;
            debug!("History: limit {} reached, evicted oldest entry", self.limit);
        }

        self.entries.push_back(entry);
        cursor += 1;

        let last = self.entries.len() as isize - 1;
        self.current = Some(cursor.clamp(0, last) as usize);
    }

    /// Steps back one entry (if possible) and returns the entry at the cursor.
    pub fn undo(&mut self) -> Option<&T> {
        let current = self.current?;
        if current > 0 {
            self.current = Some(current - 1);
        }
        self.current()
    }

    /// Steps forward one entry (if possible) and returns the entry at the cursor.
    pub fn redo(&mut self) -> Option<&T> {
        let current = self.current?;
        if current + 1 < self.entries.len() {
            self.current = Some(current + 1);
        }
        self.current()
    }

    /// Entry at the cursor, without moving it.
    pub fn current(&self) -> Option<&T> {
        self.current.and_then(|index| self.entries.get(index))
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn can_undo(&self) -> bool {
        self.current.is_some_and(|c| c > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.current.is_some_and(|c| c + 1 < self.entries.len())
    }

    /// Iterates entries oldest-first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history_of(limit: usize, items: &[&'static str]) -> BoundedHistory<&'static str> {
        let mut history = BoundedHistory::new(limit);
        for item in items {
            history.push(*item);
        }
        history
    }

    #[test]
    fn empty_history_has_no_current() {
        let mut history: BoundedHistory<u32> = BoundedHistory::new(4);
        assert!(history.is_empty());
        assert_eq!(history.current_index(), None);
        assert_eq!(history.undo(), None);
        assert_eq!(history.redo(), None);
    }

    #[test]
    fn push_moves_cursor_to_newest() {
        let history = history_of(4, &["a", "b", "c"]);
        assert_eq!(history.len(), 3);
        assert_eq!(history.current_index(), Some(2));
        assert_eq!(history.current(), Some(&"c"));
    }

    #[test]
    fn overflow_evicts_oldest_and_keeps_newest_current() {
        let limit = 5;
        let mut history = BoundedHistory::new(limit);
        for i in 0..=limit {
            history.push(i);
            assert_eq!(history.current(), Some(&i));
        }
        assert_eq!(history.len(), limit);
        assert_eq!(history.iter().next(), Some(&1));
        assert_eq!(history.current_index(), Some(limit - 1));
    }

    #[test]
    fn huge_limit_does_not_preallocate() {
        let mut history: BoundedHistory<[u64; 2]> = BoundedHistory::new(1_000_000_000_000_000);
        history.push([1, 2]);
        history.push([3, 4]);
        assert_eq!(history.len(), 2);
        assert_eq!(history.undo(), Some(&[1, 2]));
    }

    #[test]
    fn long_push_sequence_stays_bounded() {
        let mut history = BoundedHistory::new(DEFAULT_HISTORY_LIMIT);
        for i in 0..100 {
            history.push(i);
        }
        assert_eq!(history.len(), DEFAULT_HISTORY_LIMIT);
        assert_eq!(history.current(), Some(&99));
        assert_eq!(history.iter().next(), Some(&70));
    }

    #[test]
    fn push_after_undo_truncates_redo_branch() {
        let mut history = history_of(10, &["a", "b", "c"]);
        assert_eq!(history.undo(), Some(&"b"));
        assert_eq!(history.undo(), Some(&"a"));

        history.push("d");
        assert_eq!(history.len(), 2);
        assert_eq!(history.current(), Some(&"d"));
        assert_eq!(history.redo(), Some(&"d"));
        assert_eq!(history.undo(), Some(&"a"));
        assert_eq!(history.redo(), Some(&"d"));

        history.undo();
        history.push("e");
        assert_eq!(history.iter().copied().collect::<Vec<_>>(), vec!["a", "e"]);
        assert!(!history.can_redo());
    }

    #[test]
    fn undo_and_redo_saturate_at_bounds() {
        let mut history = history_of(10, &["a", "b"]);
        assert_eq!(history.undo(), Some(&"a"));
        assert_eq!(history.undo(), Some(&"a"));
        assert_eq!(history.undo(), Some(&"a"));
        assert!(!history.can_undo());

        assert_eq!(history.redo(), Some(&"b"));
        assert_eq!(history.redo(), Some(&"b"));
        assert_eq!(history.current_index(), Some(1));
    }

    #[test]
    fn push_after_undo_in_full_history_does_not_evict() {
        let mut history = history_of(3, &["a", "b", "c"]);
        history.undo();
        history.push("d");
        // The redo branch ("c") was dropped, so there was room for "d".
        assert_eq!(history.iter().copied().collect::<Vec<_>>(), vec!["a", "b", "d"]);
        assert_eq!(history.current_index(), Some(2));

        history.push("e");
        assert_eq!(history.iter().copied().collect::<Vec<_>>(), vec!["b", "d", "e"]);
        assert_eq!(history.current(), Some(&"e"));
    }

    #[test]
    fn degenerate_limits_keep_only_latest() {
        for limit in [0, 1] {
            let mut history = history_of(limit, &["a", "b", "c"]);
            assert_eq!(history.len(), 1, "limit {limit}");
            assert_eq!(history.current(), Some(&"c"));
            assert_eq!(history.undo(), Some(&"c"));
            assert_eq!(history.redo(), Some(&"c"));
        }
    }

    #[test]
    fn with_initial_seeds_cursor() {
        let history = BoundedHistory::with_initial(2, "seed");
        assert_eq!(history.len(), 1);
        assert_eq!(history.current(), Some(&"seed"));
        assert_eq!(history.limit(), 2);
    }
}
