//! Scoring and level progression

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Lines needed per level step
const LINES_PER_LEVEL: u32 = 5;

/// Points for 1..=4 simultaneous lines under [`ScoringRule::Tiered`]
const TIERED_POINTS: [u64; 4] = [40, 100, 300, 1200];

/// Which points/level formula a session uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringRule {
    /// `lines * 100 * level`, level = 1 + total_lines / 5
    #[default]
    Linear,
    /// `[40, 100, 300, 1200][lines - 1] * level`, level steps once
    /// total_lines reaches `level * 5`
    Tiered,
}

/// Outcome of a single clear
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reward {
    /// Points to add to the score
    pub points: u64,
    /// Level after the clear
    pub level: u32,
}

impl ScoringRule {
    /// Score a clear of `lines` rows at `level`, where `total_lines` is the
    /// cumulative count *before* this clear.
    pub fn apply(&self, lines: u32, level: u32, total_lines: u32) -> Reward {
        if lines == 0 {
            return Reward { points: 0, level };
        }
        let total = total_lines + lines;
        match self {
            ScoringRule::Linear => Reward {
                points: lines as u64 * 100 * level as u64,
                level: level.max(1 + total / LINES_PER_LEVEL),
            },
            ScoringRule::Tiered => Reward {
                points: TIERED_POINTS[(lines.min(4) - 1) as usize] * level as u64,
                level: if total >= level * LINES_PER_LEVEL {
                    level + 1
                } else {
                    level
                },
            },
        }
    }
}

/// Running score state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Score {
    /// Current score
    pub points: u64,
    /// Current level
    pub level: u32,
    /// Total lines cleared
    pub lines: u32,
    rule: ScoringRule,
}

impl Default for Score {
    fn default() -> Self {
        Self::new(ScoringRule::default())
    }
}

impl Score {
    pub fn new(rule: ScoringRule) -> Self {
        Self {
            points: 0,
            level: 1,
            lines: 0,
            rule,
        }
    }

    pub fn rule(&self) -> ScoringRule {
        self.rule
    }

    /// Fold a clear of `lines` rows into the running totals.
    /// Returns true when the level went up.
    pub fn apply_clear(&mut self, lines: u32) -> bool {
        let reward = self.rule.apply(lines, self.level, self.lines);
        self.points += reward.points;
        self.lines += lines;
        let leveled = reward.level > self.level;
        self.level = reward.level;
        leveled
    }

    /// Gravity interval for the current level: `base / level`
    pub fn tick_interval(&self, base: Duration) -> Duration {
        base / self.level.max(1)
    }
}
