use crate::club::{TeamSheet, TeamSide};
use crate::r#match::events::MatchEventType;
use crate::r#match::stats::MatchStats;

const SCORER_MORALE: f32 = 6.0;
const ASSIST_MORALE: f32 = 4.0;
const TEAMMATE_MORALE: f32 = 3.0;
const CONCEDING_MORALE: f32 = -5.0;

/// Stat folds, morale cascades and rating nudges for finalized events.
/// Resolution (VAR, penalties, substitutions) happens before anything
/// reaches this layer.
pub struct EventPipeline;

impl EventPipeline {
    /// Increment the side counters owned by an event type.
    pub fn fold_stats(event_type: MatchEventType, side: TeamSide, stats: &mut MatchStats) {
        let counters = stats.side_mut(side);

        match event_type {
            MatchEventType::Goal => {
                counters.shots += 1;
                counters.shots_on_target += 1;
            }
            MatchEventType::Save => {
                counters.shots += 1;
                counters.shots_on_target += 1;
            }
            MatchEventType::Miss => counters.shots += 1,
            MatchEventType::Corner => counters.corners += 1,
            MatchEventType::Foul => counters.fouls += 1,
            MatchEventType::Offside => counters.offsides += 1,
            MatchEventType::CardYellow => counters.yellow_cards += 1,
            MatchEventType::CardRed => counters.red_cards += 1,
            MatchEventType::Penalty => counters.penalties_awarded += 1,
            _ => {}
        }
    }

    /// Goal morale swing: scorer +6, assister +4, teammates +3, opponents -5.
    pub fn goal_morale_cascade(
        scoring: &mut TeamSheet,
        conceding: &mut TeamSheet,
        scorer_id: u32,
        assist_id: Option<u32>,
    ) {
        for player in &mut scoring.players {
            let delta = if player.id == scorer_id {
                SCORER_MORALE
            } else if Some(player.id) == assist_id {
                ASSIST_MORALE
            } else {
                TEAMMATE_MORALE
            };
            player.adjust_morale(delta);
        }

        for player in &mut conceding.players {
            player.adjust_morale(CONCEDING_MORALE);
        }
    }

    pub fn goal_ratings(stats: &mut MatchStats, scorer_id: u32, assist_id: Option<u32>) {
        stats.adjust_rating(scorer_id, 1.0);
        if let Some(assist_id) = assist_id {
            stats.adjust_rating(assist_id, 0.5);
        }
    }
}
