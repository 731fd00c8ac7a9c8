use crate::club::TeamSide;
use crate::r#match::stats::{MatchStats, Score, SideStats};
use serde::{Deserialize, Serialize};

/// Minutes folded into one emitted momentum data point.
pub const MOMENTUM_WINDOW: usize = 5;

const MOMENTUM_MIN: i32 = -100;
const MOMENTUM_MAX: i32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MomentumPoint {
    pub minute: u8,
    pub value: i32,
}

/// Rolling 5-minute aggregation of the per-minute momentum score. Positive
/// values favor the home side. Display-only: nothing in the simulation reads
/// it back.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MomentumTracker {
    window: Vec<i32>,
    series: Vec<MomentumPoint>,
}

impl MomentumTracker {
    pub fn new() -> Self {
        MomentumTracker {
            window: Vec::with_capacity(MOMENTUM_WINDOW),
            series: Vec::new(),
        }
    }

    /// Record one minute's raw score; emits a data point per full window.
    pub fn record(&mut self, minute: u8, raw: i32) {
        self.window.push(raw);

        if self.window.len() == MOMENTUM_WINDOW {
            let sum: i32 = self.window.iter().sum();
            let value = (sum / MOMENTUM_WINDOW as i32).clamp(MOMENTUM_MIN, MOMENTUM_MAX);

            self.series.push(MomentumPoint { minute, value });
            self.window.clear();
        }
    }

    pub fn series(&self) -> &[MomentumPoint] {
        &self.series
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XgPoint {
    pub minute: u8,
    pub home: f32,
    pub away: f32,
}

/// Expected-goals timeline, one entry per minute per side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct XgTimeline {
    points: Vec<XgPoint>,
}

impl XgTimeline {
    pub fn new() -> Self {
        XgTimeline { points: Vec::new() }
    }

    /// Shot-quality heuristic for one side.
    pub fn xg_value(stats: &SideStats, goals: u8) -> f32 {
        let volume = stats.shots as f32 * 0.06
            + stats.shots_on_target as f32 * 0.15
            + stats.penalties_awarded as f32 * 0.76
            + goals as f32 * 0.10;

        (goals as f32 * 0.7).max(volume)
    }

    /// Append the current xG pair; at most one entry per minute.
    pub fn record(&mut self, minute: u8, stats: &MatchStats, score: Score) {
        if self.points.last().is_some_and(|p| p.minute == minute) {
            return;
        }

        self.points.push(XgPoint {
            minute,
            home: Self::xg_value(stats.side(TeamSide::Home), score.home),
            away: Self::xg_value(stats.side(TeamSide::Away), score.away),
        });
    }

    pub fn points(&self) -> &[XgPoint] {
        &self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn momentum_emits_one_point_per_window() {
        let mut tracker = MomentumTracker::new();

        for minute in 1..=10 {
            tracker.record(minute, 40);
        }

        let series = tracker.series();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0], MomentumPoint { minute: 5, value: 40 });
        assert_eq!(series[1], MomentumPoint { minute: 10, value: 40 });
    }

    #[test]
    fn momentum_is_clamped() {
        let mut tracker = MomentumTracker::new();

        for minute in 1..=5 {
            tracker.record(minute, 500);
        }

        assert_eq!(tracker.series()[0].value, 100);
    }

    #[test]
    fn xg_prefers_goal_floor_over_thin_shot_volume() {
        let stats = SideStats {
            shots: 2,
            shots_on_target: 1,
            ..SideStats::default()
        };

        // 2 goals from 2 shots: 1.4 from goals beats 0.12+0.15+0.20.
        let value = XgTimeline::xg_value(&stats, 2);
        assert!((value - 1.4).abs() < 0.0001);
    }

    #[test]
    fn xg_counts_shot_volume_when_goals_are_scarce() {
        let stats = SideStats {
            shots: 10,
            shots_on_target: 6,
            penalties_awarded: 1,
            ..SideStats::default()
        };

        let value = XgTimeline::xg_value(&stats, 0);
        assert!((value - (0.6 + 0.9 + 0.76)).abs() < 0.0001);
    }

    #[test]
    fn xg_records_at_most_one_entry_per_minute() {
        let mut timeline = XgTimeline::new();
        let stats = MatchStats::default();

        timeline.record(10, &stats, Score::default());
        timeline.record(10, &stats, Score::default());
        timeline.record(11, &stats, Score::default());

        assert_eq!(timeline.points().len(), 2);
    }
}
