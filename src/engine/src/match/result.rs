use crate::club::{MatchInjury, TeamSheet};
use crate::r#match::events::MatchEvent;
use crate::r#match::stats::{MatchStats, Score};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Per-player state handed back to the persistent roster at full time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerHandBack {
    pub player_id: u32,
    pub team_id: u32,
    pub condition: f32,
    pub morale: f32,
    pub injury: Option<MatchInjury>,
    pub expected_return: Option<NaiveDate>,
    pub sent_off: bool,
    pub match_rating: f32,
}

/// Everything the surrounding career system receives when a match ends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSummary {
    pub date: NaiveDate,
    pub home_team_id: u32,
    pub away_team_id: u32,
    pub home_team_name: String,
    pub away_team_name: String,
    pub score: Score,
    pub shootout: Option<(u8, u8)>,
    pub stats: MatchStats,
    pub events: Vec<MatchEvent>,
    pub players: Vec<PlayerHandBack>,
}

impl MatchSummary {
    pub(crate) fn collect_players(
        date: NaiveDate,
        team: &TeamSheet,
        stats: &MatchStats,
        out: &mut Vec<PlayerHandBack>,
    ) {
        for player in &team.players {
            let expected_return = player
                .injury
                .map(|injury| date.checked_add_days(Days::new(injury.days_remaining as u64)))
                .unwrap_or(None);

            out.push(PlayerHandBack {
                player_id: player.id,
                team_id: team.id,
                condition: player.condition,
                morale: player.morale,
                injury: player.injury,
                expected_return,
                sent_off: player.sent_off,
                match_rating: stats.rating(player.id),
            });
        }
    }
}
