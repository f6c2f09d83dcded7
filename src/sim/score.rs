//! Score, shot statistics and combo streak

use serde::{Deserialize, Serialize};

use crate::consts::BASE_POINTS;

/// Points granted for a single make
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MakeAward {
    pub points: u64,
    pub bonus: u64,
    /// Streak length including this make
    pub combo: u32,
}

/// Cumulative score and shooting stats
///
/// Invariant: `shots_scored <= shots_attempted`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreState {
    pub score: u64,
    pub shots_attempted: u32,
    pub shots_scored: u32,
    /// Consecutive makes
    pub combo: u32,
}

impl ScoreState {
    pub fn record_attempt(&mut self) {
        self.shots_attempted += 1;
    }

    /// Award a make: 2 points plus one bonus point per prior make in the streak
    pub fn record_make(&mut self) -> MakeAward {
        self.shots_scored += 1;
        debug_assert!(self.shots_scored <= self.shots_attempted);
        self.combo += 1;
        let bonus = u64::from(self.combo.saturating_sub(1));
        let points = BASE_POINTS + bonus;
        self.score += points;
        MakeAward {
            points,
            bonus,
            combo: self.combo,
        }
    }

    pub fn record_miss(&mut self) {
        self.combo = 0;
    }

    /// Fraction of attempts made, 0 with no attempts
    pub fn accuracy(&self) -> f32 {
        if self.shots_attempted == 0 {
            0.0
        } else {
            self.shots_scored as f32 / self.shots_attempted as f32
        }
    }

    pub fn accuracy_percent(&self) -> f32 {
        self.accuracy() * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make(state: &mut ScoreState) -> MakeAward {
        state.record_attempt();
        state.record_make()
    }

    #[test]
    fn test_combo_bonus() {
        let mut state = ScoreState::default();
        assert_eq!(make(&mut state).points, 2);
        assert_eq!(make(&mut state).points, 3);
        let third = make(&mut state);
        assert_eq!(third.points, 4);
        assert_eq!(third.bonus, 2);
        assert_eq!(third.combo, 3);
        assert_eq!(state.score, 9);
    }

    #[test]
    fn test_miss_resets_combo() {
        let mut state = ScoreState::default();
        make(&mut state);
        make(&mut state);
        state.record_attempt();
        state.record_miss();
        assert_eq!(state.combo, 0);

        let award = make(&mut state);
        assert_eq!(award.points, 2);
        assert_eq!(state.score, 2 + 3 + 2);
        assert_eq!(state.shots_attempted, 4);
        assert_eq!(state.shots_scored, 3);
    }

    #[test]
    fn test_accuracy() {
        let mut state = ScoreState::default();
        assert_eq!(state.accuracy(), 0.0);

        make(&mut state);
        state.record_attempt();
        state.record_miss();
        assert!((state.accuracy_percent() - 50.0).abs() < 1e-5);
        assert_eq!(state.accuracy(), state.accuracy());
    }
}
