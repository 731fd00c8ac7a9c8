use crate::club::TeamSide;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const POSSESSION_MIN: u8 = 20;
pub const POSSESSION_MAX: u8 = 80;

const RATING_BASE: f32 = 6.0;
const RATING_MIN: f32 = 1.0;
const RATING_MAX: f32 = 10.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub home: u8,
    pub away: u8,
}

impl Score {
    pub fn increment(&mut self, side: TeamSide) {
        match side {
            TeamSide::Home => self.home += 1,
            TeamSide::Away => self.away += 1,
        }
    }

    pub fn decrement(&mut self, side: TeamSide) {
        match side {
            TeamSide::Home => self.home = self.home.saturating_sub(1),
            TeamSide::Away => self.away = self.away.saturating_sub(1),
        }
    }

    pub fn goals_for(&self, side: TeamSide) -> u8 {
        match side {
            TeamSide::Home => self.home,
            TeamSide::Away => self.away,
        }
    }

    pub fn is_level(&self) -> bool {
        self.home == self.away
    }

    /// The side currently behind, if any.
    pub fn trailing_side(&self) -> Option<TeamSide> {
        match self.home.cmp(&self.away) {
            std::cmp::Ordering::Less => Some(TeamSide::Home),
            std::cmp::Ordering::Greater => Some(TeamSide::Away),
            std::cmp::Ordering::Equal => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SideStats {
    pub shots: u16,
    pub shots_on_target: u16,
    pub corners: u16,
    pub fouls: u16,
    pub yellow_cards: u16,
    pub red_cards: u16,
    pub offsides: u16,
    pub penalties_awarded: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchStats {
    pub home: SideStats,
    pub away: SideStats,

    pub possession_home: u8,
    pub possession_away: u8,

    pub shootout_home: u8,
    pub shootout_away: u8,

    ratings: HashMap<u32, f32>,
}

impl Default for MatchStats {
    fn default() -> Self {
        MatchStats {
            home: SideStats::default(),
            away: SideStats::default(),
            possession_home: 50,
            possession_away: 50,
            shootout_home: 0,
            shootout_away: 0,
            ratings: HashMap::new(),
        }
    }
}

impl MatchStats {
    pub fn side(&self, side: TeamSide) -> &SideStats {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }

    pub fn side_mut(&mut self, side: TeamSide) -> &mut SideStats {
        match side {
            TeamSide::Home => &mut self.home,
            TeamSide::Away => &mut self.away,
        }
    }

    /// Shift home possession by `delta_home`, keeping both sides inside
    /// [20,80] and complementary to 100.
    pub fn drift_possession(&mut self, delta_home: i8) {
        let shifted = (self.possession_home as i16 + delta_home as i16)
            .clamp(POSSESSION_MIN as i16, POSSESSION_MAX as i16);

        self.possession_home = shifted as u8;
        self.possession_away = 100 - self.possession_home;
    }

    pub fn possession(&self, side: TeamSide) -> u8 {
        match side {
            TeamSide::Home => self.possession_home,
            TeamSide::Away => self.possession_away,
        }
    }

    pub fn shootout_score(&self, side: TeamSide) -> u8 {
        match side {
            TeamSide::Home => self.shootout_home,
            TeamSide::Away => self.shootout_away,
        }
    }

    pub fn record_shootout_goal(&mut self, side: TeamSide) {
        match side {
            TeamSide::Home => self.shootout_home += 1,
            TeamSide::Away => self.shootout_away += 1,
        }
    }

    /// Football-Manager-style match rating: base 6.0, clamped to 1.0-10.0.
    pub fn rating(&self, player_id: u32) -> f32 {
        self.ratings.get(&player_id).copied().unwrap_or(RATING_BASE)
    }

    pub fn adjust_rating(&mut self, player_id: u32, delta: f32) {
        let entry = self.ratings.entry(player_id).or_insert(RATING_BASE);
        *entry = (*entry + delta).clamp(RATING_MIN, RATING_MAX);
    }

    pub fn ratings(&self) -> &HashMap<u32, f32> {
        &self.ratings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn possession_is_complementary_and_clamped() {
        let mut stats = MatchStats::default();

        for _ in 0..100 {
            stats.drift_possession(3);
            assert_eq!(stats.possession_home + stats.possession_away, 100);
        }
        assert_eq!(stats.possession_home, POSSESSION_MAX);

        for _ in 0..100 {
            stats.drift_possession(-3);
            assert_eq!(stats.possession_home + stats.possession_away, 100);
        }
        assert_eq!(stats.possession_home, POSSESSION_MIN);
        assert_eq!(stats.possession_away, POSSESSION_MAX);
    }

    #[test]
    fn ratings_start_at_base_and_clamp() {
        let mut stats = MatchStats::default();

        assert_eq!(stats.rating(7), 6.0);

        stats.adjust_rating(7, 100.0);
        assert_eq!(stats.rating(7), 10.0);

        stats.adjust_rating(7, -100.0);
        assert_eq!(stats.rating(7), 1.0);
    }

    #[test]
    fn trailing_side_reflects_score() {
        let mut score = Score::default();
        assert_eq!(score.trailing_side(), None);

        score.increment(TeamSide::Away);
        assert_eq!(score.trailing_side(), Some(TeamSide::Home));

        score.increment(TeamSide::Home);
        assert!(score.is_level());
    }
}
