use crate::club::TeamSheet;

const HIGH_LEADERSHIP: u8 = 15;
const LOW_LEADERSHIP: u8 = 8;
const CAPTAIN_INFLUENCE: f32 = 0.05;

/// Per-minute stamina decay for the on-pitch XI.
pub struct FatigueModel;

impl FatigueModel {
    /// Apply one minute of condition drain to every on-pitch player that is
    /// neither carrying an injury nor sent off. `losing` reflects the score
    /// differential from this team's point of view.
    pub fn apply_minute(team: &mut TeamSheet, losing: bool) {
        let drain = Self::team_drain(team, losing);

        let starters = crate::club::STARTING_XI.min(team.players.len());
        for player in &mut team.players[..starters] {
            if !player.is_active() || player.injury.is_some() {
                continue;
            }

            let personal = drain * player.skills.stamina_factor();
            player.drain_condition(personal);
        }
    }

    /// Tactic-driven base drain adjusted by on-pitch captain influence.
    pub fn team_drain(team: &TeamSheet, losing: bool) -> f32 {
        let mut drain = team.tactics.base_drain();

        if let Some(captain) = team.captain() {
            if captain.skills.leadership >= HIGH_LEADERSHIP {
                drain *= 1.0 - CAPTAIN_INFLUENCE;
            } else if captain.skills.leadership <= LOW_LEADERSHIP && losing {
                drain *= 1.0 + CAPTAIN_INFLUENCE;
            }
        }

        drain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::club::fixtures::team_sheet;
    use crate::club::{Mentality, PressIntensity, TeamTactics, TeamTempo};

    #[test]
    fn stamina_mitigates_drain_at_ratio_near_point_six() {
        let mut team = team_sheet(1, "Drain FC");
        team.tactics = TeamTactics::new(Mentality::Attacking, TeamTempo::BeastMode, PressIntensity::VeryHigh);
        team.captain_id = None;

        let strong_id = team.starters()[5].id;
        let weak_id = team.starters()[6].id;
        team.player_mut(strong_id).unwrap().skills.stamina = 20;
        team.player_mut(weak_id).unwrap().skills.stamina = 1;

        FatigueModel::apply_minute(&mut team, false);

        let strong_loss = 100.0 - team.player(strong_id).unwrap().condition;
        let weak_loss = 100.0 - team.player(weak_id).unwrap().condition;

        assert!(strong_loss < weak_loss);
        let ratio = strong_loss / weak_loss;
        assert!((ratio - 0.62).abs() < 0.001, "ratio was {ratio}");
    }

    #[test]
    fn high_leadership_captain_reduces_drain() {
        let mut team = team_sheet(1, "Led FC");
        let captain_id = team.captain_id.unwrap();
        team.player_mut(captain_id).unwrap().skills.leadership = 18;

        let with_captain = FatigueModel::team_drain(&team, false);

        team.captain_id = None;
        let without_captain = FatigueModel::team_drain(&team, false);

        assert!(with_captain < without_captain);
        assert!((with_captain / without_captain - 0.95).abs() < 0.0001);
    }

    #[test]
    fn weak_captain_only_hurts_when_losing() {
        let mut team = team_sheet(1, "Shaky FC");
        let captain_id = team.captain_id.unwrap();
        team.player_mut(captain_id).unwrap().skills.leadership = 5;

        let level = FatigueModel::team_drain(&team, false);
        let losing = FatigueModel::team_drain(&team, true);

        assert_eq!(level, team.tactics.base_drain());
        assert!(losing > level);
    }

    #[test]
    fn injured_and_sent_off_players_do_not_drain() {
        let mut team = team_sheet(1, "Short FC");
        let sent_off_id = team.starters()[2].id;
        team.player_mut(sent_off_id).unwrap().sent_off = true;

        let before = team.player(sent_off_id).unwrap().condition;
        FatigueModel::apply_minute(&mut team, false);

        assert_eq!(team.player(sent_off_id).unwrap().condition, before);
    }

    #[test]
    fn bench_players_do_not_drain() {
        let mut team = team_sheet(1, "Rested FC");
        let bench_id = team.bench()[0].id;

        FatigueModel::apply_minute(&mut team, false);

        assert_eq!(team.player(bench_id).unwrap().condition, 100.0);
    }

    #[test]
    fn condition_floors_at_zero() {
        let mut team = team_sheet(1, "Spent FC");
        let player_id = team.starters()[4].id;
        team.player_mut(player_id).unwrap().condition = 0.1;

        for _ in 0..5 {
            FatigueModel::apply_minute(&mut team, false);
        }

        assert_eq!(team.player(player_id).unwrap().condition, 0.0);
    }
}
