/// Score, level and lives bookkeeping that outlives a single World.
///
/// The driver owns the session; the World borrows it for the duration of
/// one step so actors can award score and extra lives.

use crate::entities::TickOutcome;

pub const STARTING_LIVES: u32 = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub score: u32,
    pub level: u32,
    pub lives: u32,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(1, STARTING_LIVES)
    }
}

impl Session {
    pub fn new(level: u32, lives: u32) -> Self {
        Self {
            score: 0,
            level,
            lives,
        }
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Fixed-width status line shown above the board.
    pub fn status_line(&self, burps: u32) -> String {
        format!(
            "Score: {:07} Level: {:02} Lives: {:02} Burps: {:02}",
            self.score, self.level, self.lives, burps
        )
    }

    /// Fold a tick outcome into the session. Returns `true` once the last
    /// life is gone.
    pub fn apply(&mut self, outcome: TickOutcome) -> bool {
        match outcome {
            TickOutcome::Continue => false,
            TickOutcome::LifeLost => {
                self.lives = self.lives.saturating_sub(1);
                self.lives == 0
            }
            TickOutcome::LevelComplete => {
                self.level += 1;
                false
            }
        }
    }
}
