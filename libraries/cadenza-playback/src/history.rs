//! Listening history.
//!
//! An ordered list of played tracks plus a cursor (serial index). The
//! list is append-only until the cursor is moved back: selecting a new
//! track while back-tracked truncates the "future" before appending —
//! classic linear undo/redo. The history's own prev/next controls move
//! the cursor without mutating the list.

use crate::types::PlayerTrack;

/// Listening history with a prev/next cursor.
///
/// Invariants:
/// - `cursor <= entries.len()`
/// - after [`ListeningHistory::record`], `cursor == entries.len()`
#[derive(Debug, Clone, Default)]
pub struct ListeningHistory {
    entries: Vec<PlayerTrack>,
    /// Serial index: number of entries at or before the playing one.
    cursor: usize,
}

impl ListeningHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a newly selected track.
    ///
    /// Truncates any forward entries past the cursor, then appends —
    /// unless the track equals the entry at the cursor (re-selecting the
    /// current track does not grow the history).
    pub fn record(&mut self, track: PlayerTrack) {
        self.entries.truncate(self.cursor);

        if self.entries.last().map(|t| t.key.as_str()) != Some(track.key.as_str()) {
            self.entries.push(track);
        }
        self.cursor = self.entries.len();
    }

    /// Move the cursor one step back and return that entry.
    ///
    /// Returns `None` when there is no prior entry; the list itself is
    /// never mutated.
    pub fn step_back(&mut self) -> Option<&PlayerTrack> {
        if self.cursor > 1 {
            self.cursor -= 1;
            self.entries.get(self.cursor - 1)
        } else {
            None
        }
    }

    /// Move the cursor one step forward and return that entry.
    pub fn step_forward(&mut self) -> Option<&PlayerTrack> {
        if self.cursor < self.entries.len() {
            self.cursor += 1;
            self.entries.get(self.cursor - 1)
        } else {
            None
        }
    }

    /// Whether forward entries remain past the cursor.
    pub fn has_forward(&self) -> bool {
        self.cursor < self.entries.len()
    }

    /// The entry at the cursor (the playing track, when history is in use).
    pub fn current(&self) -> Option<&PlayerTrack> {
        self.cursor.checked_sub(1).and_then(|i| self.entries.get(i))
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[PlayerTrack] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current cursor value (serial index, 1-based for the last entry).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Clear all history.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(key: &str) -> PlayerTrack {
        PlayerTrack {
            key: key.to_string(),
            title: format!("Track {key}"),
            artist: "Artist".to_string(),
            album: None,
            stream_url: Some(format!("http://stream/{key}")),
            duration: None,
        }
    }

    #[test]
    fn sequential_records_keep_cursor_at_end() {
        let mut history = ListeningHistory::new();
        for i in 1..=5 {
            history.record(track(&i.to_string()));
        }

        assert_eq!(history.len(), 5);
        assert_eq!(history.cursor(), 5);
        assert_eq!(history.current().unwrap().key, "5");
    }

    #[test]
    fn consecutive_duplicate_is_not_appended() {
        let mut history = ListeningHistory::new();
        history.record(track("1"));
        history.record(track("1"));

        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 1);
    }

    #[test]
    fn step_back_moves_cursor_without_mutating() {
        let mut history = ListeningHistory::new();
        for key in ["1", "2", "3"] {
            history.record(track(key));
        }

        assert_eq!(history.step_back().unwrap().key, "2");
        assert_eq!(history.step_back().unwrap().key, "1");
        assert!(history.step_back().is_none());

        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), 1);
    }

    #[test]
    fn step_forward_replays_the_future() {
        let mut history = ListeningHistory::new();
        for key in ["1", "2", "3"] {
            history.record(track(key));
        }
        history.step_back();
        history.step_back();

        assert!(history.has_forward());
        assert_eq!(history.step_forward().unwrap().key, "2");
        assert_eq!(history.step_forward().unwrap().key, "3");
        assert!(history.step_forward().is_none());
        assert!(!history.has_forward());
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn branching_truncates_the_future() {
        let mut history = ListeningHistory::new();
        // Select k = 4 tracks, step back j = 2, then select a new one.
        for key in ["1", "2", "3", "4"] {
            history.record(track(key));
        }
        history.step_back();
        history.step_back();
        assert_eq!(history.cursor(), 2);

        history.record(track("9"));

        // Length is k - j + 1 and the discarded future is gone.
        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), 3);
        let keys: Vec<&str> = history.entries().iter().map(|t| t.key.as_str()).collect();
        assert_eq!(keys, vec!["1", "2", "9"]);
    }

    #[test]
    fn rerecording_current_entry_while_backtracked_only_truncates() {
        let mut history = ListeningHistory::new();
        for key in ["1", "2", "3"] {
            history.record(track(key));
        }
        history.step_back(); // cursor at "2"

        history.record(track("2"));

        let keys: Vec<&str> = history.entries().iter().map(|t| t.key.as_str()).collect();
        assert_eq!(keys, vec!["1", "2"]);
        assert_eq!(history.cursor(), 2);
    }
}
