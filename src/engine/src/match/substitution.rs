use crate::club::{MatchPlayer, PlayerPosition, PositionFit, TeamSheet};
use crate::r#match::stats::MatchStats;
use itertools::Itertools;
use log::{debug, warn};
use rand::RngExt;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Minutes between automatic substitution passes per team.
pub const AI_SUB_COOLDOWN: u8 = 8;
/// Automatic fatigue/performance replacements only start after this minute.
pub const AI_FATIGUE_SUB_FROM_MINUTE: u8 = 55;

const AI_FATIGUE_SUB_CHANCE: f32 = 0.18;
const TIRED_CONDITION: f32 = 55.0;
const POOR_RATING: f32 = 5.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubstitutionError {
    LimitReached,
    PlayerExcluded,
    NotOnPitch,
    NotOnBench,
}

impl SubstitutionError {
    pub fn reason(&self) -> &'static str {
        match self {
            SubstitutionError::LimitReached => "substitution limit reached",
            SubstitutionError::PlayerExcluded => "player has already been substituted off",
            SubstitutionError::NotOnPitch => "outgoing player is not on the pitch",
            SubstitutionError::NotOnBench => "incoming player is not available on the bench",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstitutionMade {
    pub out_id: u32,
    pub in_id: u32,
}

/// Outcome of a forced (injury) substitution attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForcedSubOutcome {
    Replaced(SubstitutionMade),
    /// No substitutions left or no eligible bench player: play a man short.
    PlayShort,
}

/// Roster changes for both initiators: explicit user picks and the per-minute
/// automatic pass for AI-controlled teams.
pub struct SubstitutionService;

impl SubstitutionService {
    /// User-initiated: always legal while under the limit and the outgoing
    /// player has not already been withdrawn.
    pub fn user_substitute(
        team: &mut TeamSheet,
        out_id: u32,
        in_id: u32,
        minute: u8,
    ) -> Result<SubstitutionMade, SubstitutionError> {
        Self::validate(team, out_id, in_id)?;

        team.swap_players(out_id, in_id, minute);
        debug!("substitution for {}: {} off, {} on", team.name, out_id, in_id);

        Ok(SubstitutionMade { out_id, in_id })
    }

    fn validate(team: &TeamSheet, out_id: u32, in_id: u32) -> Result<(), SubstitutionError> {
        if !team.can_substitute() {
            return Err(SubstitutionError::LimitReached);
        }
        if team.subbed_off.contains(&out_id) {
            return Err(SubstitutionError::PlayerExcluded);
        }
        if !team.is_on_pitch(out_id) {
            return Err(SubstitutionError::NotOnPitch);
        }
        if !team.is_on_bench(in_id) || team.subbed_off.contains(&in_id) {
            return Err(SubstitutionError::NotOnBench);
        }

        Ok(())
    }

    /// Automatic pass, run once per minute for an AI-controlled team.
    ///
    /// Priority: emergency keeper replacement, then a probabilistic
    /// fatigue/performance change after minute 55. The whole pass sits
    /// behind an 8-minute per-team cooldown.
    pub fn ai_pass(
        team: &mut TeamSheet,
        stats: &MatchStats,
        minute: u8,
        losing: bool,
        rng: &mut StdRng,
    ) -> Option<SubstitutionMade> {
        if !team.can_substitute() {
            return None;
        }

        if let Some(last) = team.last_ai_sub_minute {
            if minute.saturating_sub(last) < AI_SUB_COOLDOWN {
                return None;
            }
        }

        if team.needs_keeper {
            if let Some(made) = Self::emergency_keeper_sub(team, minute) {
                team.last_ai_sub_minute = Some(minute);
                return Some(made);
            }
            // No bench keeper: clear the flag so the pass does not retry a
            // hopeless search every minute.
            warn!(
                "{} has no goalkeeper on the bench at minute {}, playing on without one",
                team.name, minute
            );
            team.needs_keeper = false;
            return None;
        }

        if minute <= AI_FATIGUE_SUB_FROM_MINUTE {
            return None;
        }

        // Urgency scales a little when chasing the game.
        let chance = if losing {
            AI_FATIGUE_SUB_CHANCE * 1.5
        } else {
            AI_FATIGUE_SUB_CHANCE
        };
        if rng.random::<f32>() >= chance {
            return None;
        }

        let out_id = Self::worst_performer(team, stats, minute)?;
        let position = team.player(out_id)?.position;
        let in_id = Self::best_bench_candidate(team, position, minute)?;

        team.swap_players(out_id, in_id, minute);
        team.last_ai_sub_minute = Some(minute);
        debug!("ai substitution for {}: {} off, {} on", team.name, out_id, in_id);

        Some(SubstitutionMade { out_id, in_id })
    }

    /// Injury-forced change for an AI team: bypasses the cooldown, fires
    /// immediately, prefers positional cover over raw skill.
    pub fn forced_injury_sub(
        team: &mut TeamSheet,
        injured_id: u32,
        minute: u8,
    ) -> ForcedSubOutcome {
        if !team.can_substitute() || !team.is_on_pitch(injured_id) {
            return ForcedSubOutcome::PlayShort;
        }

        let Some(position) = team.player(injured_id).map(|p| p.position) else {
            return ForcedSubOutcome::PlayShort;
        };

        match Self::best_bench_candidate(team, position, minute) {
            Some(in_id) => {
                team.swap_players(injured_id, in_id, minute);
                ForcedSubOutcome::Replaced(SubstitutionMade {
                    out_id: injured_id,
                    in_id,
                })
            }
            None => ForcedSubOutcome::PlayShort,
        }
    }

    /// The keeper was sent off: bring on the bench keeper and sacrifice the
    /// lowest-skill outfield player.
    fn emergency_keeper_sub(team: &mut TeamSheet, minute: u8) -> Option<SubstitutionMade> {
        let in_id = team
            .bench()
            .iter()
            .filter(|p| !p.withdrawn && !team.subbed_off.contains(&p.id))
            .find(|p| p.position == PlayerPosition::Goalkeeper)
            .map(|p| p.id)?;

        let out_id = team
            .on_pitch()
            .filter(|p| p.position != PlayerPosition::Goalkeeper)
            .filter(|p| p.entered_minute != Some(minute))
            .min_by_key(|p| p.skills.skill)
            .map(|p| p.id)?;

        team.swap_players(out_id, in_id, minute);
        team.needs_keeper = false;

        Some(SubstitutionMade { out_id, in_id })
    }

    /// Worst eligible starter by a blend of condition and match rating.
    /// Players brought on this same minute are protected from the pass.
    fn worst_performer(team: &TeamSheet, stats: &MatchStats, minute: u8) -> Option<u32> {
        team.on_pitch()
            .filter(|p| p.position != PlayerPosition::Goalkeeper)
            .filter(|p| p.injury.is_none())
            .filter(|p| p.entered_minute != Some(minute))
            .filter(|p| p.condition < TIRED_CONDITION || stats.rating(p.id) < POOR_RATING)
            .min_by(|a, b| {
                let score_a = Self::performance_score(a, stats);
                let score_b = Self::performance_score(b, stats);
                score_a.total_cmp(&score_b)
            })
            .map(|p| p.id)
    }

    fn performance_score(player: &MatchPlayer, stats: &MatchStats) -> f32 {
        player.condition + (stats.rating(player.id) - 6.0) * 10.0
    }

    /// Exact position match first, then secondary position, then the highest
    /// skill regardless of position.
    fn best_bench_candidate(
        team: &TeamSheet,
        position: PlayerPosition,
        minute: u8,
    ) -> Option<u32> {
        team.bench()
            .iter()
            .filter(|p| !p.withdrawn && !team.subbed_off.contains(&p.id))
            .filter(|p| p.injury.is_none())
            .filter(|p| p.entered_minute != Some(minute))
            .sorted_by_key(|p| (std::cmp::Reverse(p.position_fit(position)), std::cmp::Reverse(p.skills.skill)))
            .next()
            .map(|p| p.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::club::fixtures::team_sheet;
    use rand::SeedableRng;

    #[test]
    fn sixth_substitution_is_rejected_without_state_change() {
        let mut team = team_sheet(1, "Subs FC");

        for i in 0..5u32 {
            let out_id = team.starters()[(i + 1) as usize].id;
            let in_id = team.bench()[i as usize].id;
            SubstitutionService::user_substitute(&mut team, out_id, in_id, 40 + i as u8).unwrap();
        }

        let before = team.clone();
        let out_id = team.starters()[8].id;
        let in_id = team.bench()[6].id;

        let result = SubstitutionService::user_substitute(&mut team, out_id, in_id, 80);

        assert_eq!(result, Err(SubstitutionError::LimitReached));
        assert_eq!(team.subs_used, before.subs_used);
        assert_eq!(team.subbed_off, before.subbed_off);
    }

    #[test]
    fn subbed_off_player_can_never_return() {
        let mut team = team_sheet(1, "Subs FC");
        let out_id = team.starters()[4].id;
        let in_id = team.bench()[1].id;

        SubstitutionService::user_substitute(&mut team, out_id, in_id, 60).unwrap();

        // Attempt to bring the withdrawn player straight back on.
        let victim = team.starters()[5].id;
        let result = SubstitutionService::user_substitute(&mut team, victim, out_id, 70);

        assert_eq!(result, Err(SubstitutionError::NotOnBench));
        assert!(!team.is_on_pitch(out_id));
    }

    #[test]
    fn emergency_keeper_sub_sacrifices_weakest_outfielder() {
        let mut team = team_sheet(1, "Keeperless FC");
        let stats = MatchStats::default();
        let mut rng = StdRng::seed_from_u64(1);

        let keeper_id = team.active_keeper().unwrap().id;
        team.player_mut(keeper_id).unwrap().sent_off = true;
        team.needs_keeper = true;

        let weakest_id = team.starters()[3].id;
        team.player_mut(weakest_id).unwrap().skills.skill = 2;

        let made = SubstitutionService::ai_pass(&mut team, &stats, 30, false, &mut rng).unwrap();

        assert_eq!(made.out_id, weakest_id);
        assert!(team.active_keeper().is_some());
        assert!(!team.needs_keeper);
    }

    #[test]
    fn missing_bench_keeper_falls_back_to_playing_without_one() {
        let mut team = team_sheet(1, "Keeperless FC");
        let stats = MatchStats::default();
        let mut rng = StdRng::seed_from_u64(1);

        let keeper_id = team.active_keeper().unwrap().id;
        team.player_mut(keeper_id).unwrap().sent_off = true;
        team.needs_keeper = true;

        let backup_id = team.bench()[0].id;
        assert_eq!(team.player(backup_id).unwrap().position, PlayerPosition::Goalkeeper);
        team.player_mut(backup_id).unwrap().position = PlayerPosition::Defender;

        let made = SubstitutionService::ai_pass(&mut team, &stats, 30, false, &mut rng);

        assert_eq!(made, None);
        assert!(!team.needs_keeper);
        assert!(team.active_keeper().is_none());
        assert_eq!(team.subs_used, 0);
    }

    #[test]
    fn cooldown_gates_the_ai_pass() {
        let mut team = team_sheet(1, "Cautious FC");
        team.ai_controlled = true;
        let stats = MatchStats::default();
        let mut rng = StdRng::seed_from_u64(13);

        // Tire a starter enough that the pass would fire whenever rolled.
        let tired_id = team.starters()[6].id;
        team.player_mut(tired_id).unwrap().condition = 10.0;
        team.last_ai_sub_minute = Some(70);

        for minute in 71..(70 + AI_SUB_COOLDOWN) {
            assert_eq!(
                SubstitutionService::ai_pass(&mut team, &stats, minute, false, &mut rng),
                None
            );
        }
    }

    #[test]
    fn fatigue_sub_picks_exhausted_starter_and_positional_cover() {
        let mut team = team_sheet(1, "Tired FC");
        let stats = MatchStats::default();

        let tired_id = team.starters()[6].id;
        assert_eq!(team.player(tired_id).unwrap().position, PlayerPosition::Midfielder);
        team.player_mut(tired_id).unwrap().condition = 5.0;

        // Force a hit eventually: the pass is probabilistic per minute.
        let mut made = None;
        for seed in 0..100u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut candidate = team.clone();
            made = SubstitutionService::ai_pass(&mut candidate, &stats, 75, false, &mut rng);
            if made.is_some() {
                team = candidate;
                break;
            }
        }

        let made = made.expect("no ai substitution fired in 100 attempts");
        assert_eq!(made.out_id, tired_id);
        assert_eq!(
            team.player(made.in_id).unwrap().position,
            PlayerPosition::Midfielder
        );
    }

    #[test]
    fn forced_injury_sub_bypasses_cooldown() {
        let mut team = team_sheet(1, "Hurt FC");
        team.last_ai_sub_minute = Some(59);

        let injured_id = team.starters()[2].id;
        let outcome = SubstitutionService::forced_injury_sub(&mut team, injured_id, 60);

        let ForcedSubOutcome::Replaced(made) = outcome else {
            panic!("expected a replacement");
        };
        assert_eq!(made.out_id, injured_id);
        assert_eq!(
            team.player(made.in_id).unwrap().position,
            PlayerPosition::Defender
        );
    }

    #[test]
    fn forced_injury_sub_with_exhausted_subs_plays_short() {
        let mut team = team_sheet(1, "Hurt FC");
        team.subs_used = 5;

        let injured_id = team.starters()[2].id;
        let outcome = SubstitutionService::forced_injury_sub(&mut team, injured_id, 60);

        assert_eq!(outcome, ForcedSubOutcome::PlayShort);
        assert_eq!(team.subs_used, 5);
    }

    #[test]
    fn player_entering_this_minute_is_protected_from_the_same_pass() {
        let mut team = team_sheet(1, "Thrash FC");
        let stats = MatchStats::default();

        let out_id = team.starters()[6].id;
        let in_id = team.bench()[3].id;
        SubstitutionService::user_substitute(&mut team, out_id, in_id, 75).unwrap();
        team.player_mut(in_id).unwrap().condition = 5.0;

        for seed in 0..100u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut candidate = team.clone();
            if let Some(made) =
                SubstitutionService::ai_pass(&mut candidate, &stats, 75, false, &mut rng)
            {
                assert_ne!(made.out_id, in_id);
            }
        }
    }
}
