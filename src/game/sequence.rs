//! Level Progression
//!
//! Tracks which level of an ordered list is active. Completing the last
//! level finishes the run.

use serde::{Serialize, Deserialize};
use tracing::info;

/// A change of active level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelTransition {
    pub from: usize,
    pub to: usize,
}

/// Position within an ordered list of levels.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSequence {
    current: usize,
    count: usize,
    finished: bool,
}

impl LevelSequence {
    /// Start at the first of `count` levels. An empty list is already finished.
    pub fn new(count: usize) -> Self {
        Self {
            current: 0,
            count,
            finished: count == 0,
        }
    }

    #[inline]
    pub fn current(&self) -> usize {
        self.current
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Move to the next level.
    ///
    /// Returns `None` and marks the run finished when the current level is
    /// the last one.
    pub fn advance(&mut self) -> Option<LevelTransition> {
        if self.finished {
            return None;
        }
        let from = self.current;
        if from + 1 < self.count {
            self.current = from + 1;
            info!(from, to = self.current, "advancing to next level");
            Some(LevelTransition { from, to: self.current })
        } else {
            self.finished = true;
            info!(level = from, "final level completed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_through_levels() {
        let mut sequence = LevelSequence::new(3);
        assert_eq!(sequence.advance(), Some(LevelTransition { from: 0, to: 1 }));
        assert_eq!(sequence.advance(), Some(LevelTransition { from: 1, to: 2 }));
        assert!(!sequence.is_finished());

        assert_eq!(sequence.advance(), None);
        assert!(sequence.is_finished());
        assert_eq!(sequence.current(), 2);

        // Stays finished
        assert_eq!(sequence.advance(), None);
    }

    #[test]
    fn test_empty_sequence_is_finished() {
        let mut sequence = LevelSequence::new(0);
        assert!(sequence.is_finished());
        assert_eq!(sequence.advance(), None);
    }
}
