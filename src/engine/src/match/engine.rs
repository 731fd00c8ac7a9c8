use crate::club::{MatchInjury, Mentality, PlayerPosition, TeamSheet, TeamSide};
use crate::r#match::clock::{FixtureKind, MatchPhase, PhaseClock};
use crate::r#match::commands::{CommandOutcome, MatchCommand};
use crate::r#match::discipline::{DisciplineState, ManagerDiscipline, ObjectionOutcome};
use crate::r#match::events::{EventLog, MatchEvent, MatchEventType, VarVerdict};
use crate::r#match::fatigue::FatigueModel;
use crate::r#match::oracle::{EventOracle, OracleContext, OracleEvent};
use crate::r#match::penalty::{PenaltyOutcome, PenaltySequence, Shootout};
use crate::r#match::pipeline::EventPipeline;
use crate::r#match::result::MatchSummary;
use crate::r#match::stats::{MatchStats, Score};
use crate::r#match::substitution::{ForcedSubOutcome, SubstitutionService};
use crate::r#match::telemetry::{MomentumPoint, MomentumTracker, XgPoint, XgTimeline};
use crate::r#match::var::{
    GOAL_REVIEW_CHANCE, RED_CARD_REVIEW_CHANCE, VarResolution, VarReview, VarSubject,
};
use chrono::NaiveDate;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use serde::{Deserialize, Serialize};

const HALF_TIME_RECOVERY: f32 = 8.0;
const HALFTIME_TALK_MAX_DELTA: f32 = 10.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MatchSetup {
    pub fixture: FixtureKind,
    pub seed: u64,
    pub date: NaiveDate,
    pub user_side: TeamSide,
}

/// Mutual-exclusion gates: while any is active the clock drops ticks
/// instead of queueing them.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct GateState {
    pub paused: bool,
    pub tactics_open: bool,
    pub halftime_talk_open: bool,
    /// Injured player that must be replaced before play resumes.
    pub forced_sub: Option<u32>,
}

impl GateState {
    pub fn any_blocking(&self) -> bool {
        self.paused || self.tactics_open || self.halftime_talk_open || self.forced_sub.is_some()
    }
}

/// Immutable per-tick snapshot for the rendering layer.
#[derive(Debug, Clone, Serialize)]
pub struct MatchView {
    pub minute: u8,
    pub phase: MatchPhase,
    pub score: Score,
    pub events: Vec<MatchEvent>,
    pub stats: MatchStats,
    pub momentum: Vec<MomentumPoint>,
    pub xg: Vec<XgPoint>,
    pub discipline: DisciplineState,
    pub home_subs_used: u8,
    pub away_subs_used: u8,
    pub speed: u8,
}

/// The live match session. All state is owned here and mutated only by
/// `tick` and `apply_command`; subsystems never run concurrently with a
/// tick. The whole engine serializes, so a mid-match save resumes exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchEngine {
    pub setup: MatchSetup,
    pub home: TeamSheet,
    pub away: TeamSheet,

    pub clock: PhaseClock,
    pub score: Score,
    pub stats: MatchStats,
    pub events: EventLog,
    pub momentum: MomentumTracker,
    pub xg: XgTimeline,
    pub discipline: ManagerDiscipline,
    pub gates: GateState,

    speed: u8,
    tick_index: u64,
    pending_var: Option<VarReview>,
    pending_penalty: Option<PenaltySequence>,
    shootout: Option<Shootout>,
}

impl MatchEngine {
    pub fn new(setup: MatchSetup, mut home: TeamSheet, mut away: TeamSheet) -> Self {
        match setup.user_side {
            TeamSide::Home => {
                home.ai_controlled = false;
                away.ai_controlled = true;
            }
            TeamSide::Away => {
                home.ai_controlled = true;
                away.ai_controlled = false;
            }
        }

        MatchEngine {
            setup,
            home,
            away,
            clock: PhaseClock::new(),
            score: Score::default(),
            stats: MatchStats::default(),
            events: EventLog::new(),
            momentum: MomentumTracker::new(),
            xg: XgTimeline::new(),
            discipline: ManagerDiscipline::new(),
            gates: GateState::default(),
            speed: 1,
            tick_index: 0,
            pending_var: None,
            pending_penalty: None,
            shootout: None,
        }
    }

    pub fn team(&self, side: TeamSide) -> &TeamSheet {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }

    fn team_mut(&mut self, side: TeamSide) -> &mut TeamSheet {
        match side {
            TeamSide::Home => &mut self.home,
            TeamSide::Away => &mut self.away,
        }
    }

    pub fn speed(&self) -> u8 {
        self.speed
    }

    /// Real-time tick interval for the driving loop: 1000ms / speed.
    pub fn tick_interval_ms(&self) -> u64 {
        1000 / self.speed.max(1) as u64
    }

    pub fn is_finished(&self) -> bool {
        self.clock.is_finished()
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.gates.paused = paused;
    }

    /// Every random draw derives from the stored seed and the tick counter,
    /// so a restored snapshot replays identically.
    fn tick_rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.setup.seed ^ self.tick_index.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }

    /// One cooperative tick. Pending resolutions step first (the clock is
    /// suspended under them); gated ticks are dropped, never buffered.
    pub fn tick(&mut self, oracle: &mut dyn EventOracle) -> MatchView {
        if !self.clock.is_finished() {
            self.tick_index += 1;
            let mut rng = self.tick_rng();

            if self.shootout.is_some() {
                self.step_shootout(&mut rng);
            } else if self.pending_var.is_some() {
                self.step_var(&mut rng);
            } else if self.pending_penalty.is_some() {
                self.step_penalty(&mut rng);
            } else if self.clock.phase == MatchPhase::HalfTime && self.discipline.is_sent_off() {
                // The assistant's restart still respects an explicit pause.
                if !self.gates.paused {
                    self.auto_start_second_half();
                }
            } else if self.gates.any_blocking() {
                // dropped tick
            } else if self.clock.is_play_phase() {
                self.play_minute(oracle, &mut rng);
            }
        }

        self.view()
    }

    fn play_minute(&mut self, oracle: &mut dyn EventOracle, rng: &mut StdRng) {
        self.clock.advance_minute();
        let minute = self.clock.minute;

        let trailing = self.score.trailing_side();
        FatigueModel::apply_minute(&mut self.home, trailing == Some(TeamSide::Home));
        FatigueModel::apply_minute(&mut self.away, trailing == Some(TeamSide::Away));

        let candidate = {
            let ctx = OracleContext {
                minute,
                phase: self.clock.phase,
                score: self.score,
                home: &self.home,
                away: &self.away,
                stats: &self.stats,
                events: self.events.events(),
            };
            oracle.next_event(&ctx)
        };

        let event_side = candidate.map(|event| event.side());
        let mut momentum_raw = 0;
        if let Some(event) = candidate {
            momentum_raw = self.apply_oracle_event(event, minute, rng);
        }

        self.run_ai_passes(minute, rng);
        self.record_telemetry(minute, event_side, momentum_raw);

        if let Some(phase) = self.clock.check_transition(self.score, &self.setup.fixture) {
            self.enter_phase(phase);
        }
    }

    fn record_telemetry(&mut self, minute: u8, event_side: Option<TeamSide>, momentum_raw: i32) {
        let mentality_diff =
            (self.home.tactics.mentality.bias() - self.away.tactics.mentality.bias()) as i32;

        let event_drift = match event_side {
            Some(TeamSide::Home) => 1i8,
            Some(TeamSide::Away) => -1,
            None => 0,
        };
        self.stats
            .drift_possession(event_drift + mentality_diff.signum() as i8);

        let raw = momentum_raw
            + (self.stats.possession_home as i32 - 50)
            + mentality_diff * 3;
        self.momentum.record(minute, raw);

        self.xg.record(minute, &self.stats, self.score);
    }

    fn signed(side: TeamSide, weight: i32) -> i32 {
        match side {
            TeamSide::Home => weight,
            TeamSide::Away => -weight,
        }
    }

    /// Route the minute's primary event: direct fold for the common case,
    /// hand-off to a pending resolver for reds, penalties and reviewed
    /// goals. Returns the signed momentum contribution.
    fn apply_oracle_event(&mut self, event: OracleEvent, minute: u8, rng: &mut StdRng) -> i32 {
        match event {
            OracleEvent::Goal {
                side,
                scorer_id,
                assist_id,
            } => {
                let index = self.finalize_goal(side, scorer_id, assist_id, minute);
                if rng.random::<f32>() < GOAL_REVIEW_CHANCE {
                    self.pending_var =
                        Some(VarReview::new(VarSubject::ContestedGoal { event_index: index, side }));
                }
                Self::signed(side, MatchEventType::Goal.momentum_weight())
            }
            OracleEvent::YellowCard { side, player_id } => {
                self.push_event(
                    MatchEvent::new(minute, MatchEventType::CardYellow, side).with_player(player_id),
                );
                self.stats.adjust_rating(player_id, -0.3);
                Self::signed(side, MatchEventType::CardYellow.momentum_weight())
            }
            OracleEvent::RedCard { side, player_id } => {
                let index = self.push_event(
                    MatchEvent::new(minute, MatchEventType::CardRed, side).with_player(player_id),
                );
                self.stats.adjust_rating(player_id, -1.5);
                self.apply_send_off(side, player_id);

                if rng.random::<f32>() < RED_CARD_REVIEW_CHANCE {
                    self.pending_var = Some(VarReview::new(VarSubject::RedCard {
                        event_index: index,
                        side,
                        player_id,
                    }));
                }
                Self::signed(side, MatchEventType::CardRed.momentum_weight())
            }
            OracleEvent::Injury {
                side,
                player_id,
                injury_type,
            } => {
                self.apply_injury(side, player_id, injury_type, minute, rng);
                0
            }
            OracleEvent::PenaltyAwarded { side } => {
                self.push_event(MatchEvent::new(minute, MatchEventType::Penalty, side));
                match PenaltySequence::select_taker(self.team(side)) {
                    Some(taker_id) => {
                        self.pending_penalty = Some(PenaltySequence::new(side, taker_id));
                    }
                    None => {
                        warn!("{} has no eligible penalty taker", self.team(side).name);
                        self.push_event(MatchEvent::new(minute, MatchEventType::Info, side));
                    }
                }
                Self::signed(side, MatchEventType::Penalty.momentum_weight())
            }
            OracleEvent::ShotSaved { side, player_id } => {
                self.push_event(
                    MatchEvent::new(minute, MatchEventType::Save, side).with_player(player_id),
                );
                self.stats.adjust_rating(player_id, 0.1);
                if let Some(keeper_id) = self.team(side.opponent()).active_keeper().map(|k| k.id) {
                    self.stats.adjust_rating(keeper_id, 0.2);
                }
                Self::signed(side, MatchEventType::Save.momentum_weight())
            }
            OracleEvent::ShotWide { side, player_id } => {
                self.push_event(
                    MatchEvent::new(minute, MatchEventType::Miss, side).with_player(player_id),
                );
                self.stats.adjust_rating(player_id, -0.1);
                Self::signed(side, MatchEventType::Miss.momentum_weight())
            }
            OracleEvent::Foul { side, player_id } => {
                self.push_event(
                    MatchEvent::new(minute, MatchEventType::Foul, side).with_player(player_id),
                );
                self.stats.adjust_rating(player_id, -0.1);
                Self::signed(side, MatchEventType::Foul.momentum_weight())
            }
            OracleEvent::Offside { side } => {
                self.push_event(MatchEvent::new(minute, MatchEventType::Offside, side));
                Self::signed(side, MatchEventType::Offside.momentum_weight())
            }
            OracleEvent::Corner { side } => {
                self.push_event(MatchEvent::new(minute, MatchEventType::Corner, side));
                Self::signed(side, MatchEventType::Corner.momentum_weight())
            }
            OracleEvent::Fight { side } => {
                self.push_event(MatchEvent::new(minute, MatchEventType::Fight, side));
                0
            }
            OracleEvent::Argument { side } => {
                self.push_event(MatchEvent::new(minute, MatchEventType::Argument, side));
                0
            }
            OracleEvent::PitchInvasion { side } => {
                self.push_event(MatchEvent::new(minute, MatchEventType::PitchInvasion, side));
                0
            }
        }
    }

    /// Append, fold counters and credit stoppage in one place.
    fn push_event(&mut self, event: MatchEvent) -> usize {
        EventPipeline::fold_stats(event.event_type, event.side, &mut self.stats);
        self.clock.add_stoppage(event.event_type.stoppage_cost());
        self.events.push(event)
    }

    fn finalize_goal(
        &mut self,
        side: TeamSide,
        scorer_id: u32,
        assist_id: Option<u32>,
        minute: u8,
    ) -> usize {
        let (scoring, conceding) = match side {
            TeamSide::Home => (&mut self.home, &mut self.away),
            TeamSide::Away => (&mut self.away, &mut self.home),
        };

        let scorer_name = scoring
            .player(scorer_id)
            .map(|p| p.name.clone())
            .unwrap_or_default();
        let assist_name = assist_id.and_then(|id| scoring.player(id).map(|p| p.name.clone()));

        EventPipeline::goal_morale_cascade(scoring, conceding, scorer_id, assist_id);

        let mut event =
            MatchEvent::new(minute, MatchEventType::Goal, side).with_player(scorer_id);
        event.scorer = Some(scorer_name);
        event.assist = assist_name;
        let index = self.push_event(event);

        self.score.increment(side);
        EventPipeline::goal_ratings(&mut self.stats, scorer_id, assist_id);

        info!(
            "{}' goal for {} ({}-{})",
            minute,
            self.team(side).name,
            self.score.home,
            self.score.away
        );

        index
    }

    fn apply_send_off(&mut self, side: TeamSide, player_id: u32) {
        let team = self.team_mut(side);
        let mut was_keeper = false;

        if let Some(player) = team.player_mut(player_id) {
            player.sent_off = true;
            was_keeper = player.position == PlayerPosition::Goalkeeper;
        }
        if was_keeper {
            team.needs_keeper = true;
        }
    }

    fn apply_injury(
        &mut self,
        side: TeamSide,
        player_id: u32,
        injury_type: crate::club::InjuryType,
        minute: u8,
        rng: &mut StdRng,
    ) {
        let days_remaining = injury_type.random_duration(rng);

        let forces = {
            let team = self.team_mut(side);
            let Some(player) = team.player_mut(player_id) else {
                return;
            };

            let injury = MatchInjury {
                injury_type,
                days_remaining,
                minute_occurred: minute,
                aggravated: player.injury.is_some(),
            };
            player.injury = Some(injury);
            injury.forces_substitution()
        };

        self.push_event(MatchEvent::new(minute, MatchEventType::Injury, side).with_player(player_id));

        if !forces {
            return;
        }

        if side == self.setup.user_side {
            self.begin_forced_substitution(side, player_id, minute);
        } else {
            self.ai_forced_substitution(side, player_id, minute);
        }
    }

    /// User-side serious injury: lock the clock behind the substitution
    /// screen until the player is replaced, or play short when exhausted.
    fn begin_forced_substitution(&mut self, side: TeamSide, player_id: u32, minute: u8) {
        let team = self.team(side);
        let has_bench_option = team.can_substitute()
            && team
                .bench()
                .iter()
                .any(|p| !p.withdrawn && !team.subbed_off.contains(&p.id) && p.injury.is_none());

        if has_bench_option {
            self.gates.forced_sub = Some(player_id);
            self.gates.tactics_open = true;
            info!("forced substitution: player {player_id} cannot continue");
        } else {
            self.play_short(side, player_id, minute);
        }
    }

    fn ai_forced_substitution(&mut self, side: TeamSide, player_id: u32, minute: u8) {
        let outcome = SubstitutionService::forced_injury_sub(self.team_mut(side), player_id, minute);

        match outcome {
            ForcedSubOutcome::Replaced(made) => {
                self.push_event(
                    MatchEvent::new(minute, MatchEventType::Substitution, side)
                        .with_player(made.in_id),
                );
            }
            ForcedSubOutcome::PlayShort => self.play_short(side, player_id, minute),
        }
    }

    fn play_short(&mut self, side: TeamSide, player_id: u32, minute: u8) {
        if let Some(player) = self.team_mut(side).player_mut(player_id) {
            player.withdrawn = true;
        }

        warn!("{} plays a man short from minute {}", self.team(side).name, minute);
        self.push_event(MatchEvent::new(minute, MatchEventType::Info, side).with_player(player_id));
    }

    fn run_ai_passes(&mut self, minute: u8, rng: &mut StdRng) {
        let trailing = self.score.trailing_side();

        for side in [TeamSide::Home, TeamSide::Away] {
            if !self.team(side).ai_controlled {
                continue;
            }

            let losing = trailing == Some(side);
            let leading = trailing == Some(side.opponent());

            // Late-game reaction: chase or shut up shop.
            if minute >= 75 {
                let team = self.team_mut(side);
                if losing && team.tactics.mentality < Mentality::VeryAttacking {
                    team.tactics.mentality = Mentality::VeryAttacking;
                } else if leading && team.tactics.mentality > Mentality::Defensive {
                    team.tactics.mentality = Mentality::Defensive;
                }
            }

            let needed_keeper = self.team(side).needs_keeper;
            let made = {
                let (team, stats) = match side {
                    TeamSide::Home => (&mut self.home, &self.stats),
                    TeamSide::Away => (&mut self.away, &self.stats),
                };
                SubstitutionService::ai_pass(team, stats, minute, losing, rng)
            };

            if let Some(made) = made {
                self.push_event(
                    MatchEvent::new(minute, MatchEventType::Substitution, side)
                        .with_player(made.in_id),
                );
            } else if needed_keeper && !self.team(side).needs_keeper {
                // No bench keeper was available; record that the team plays
                // on without one.
                self.push_event(MatchEvent::new(minute, MatchEventType::Info, side));
            }
        }
    }

    fn step_var(&mut self, rng: &mut StdRng) {
        let Some(mut review) = self.pending_var else {
            return;
        };

        match review.step(rng) {
            None => self.pending_var = Some(review),
            Some(resolution) => {
                self.pending_var = None;
                self.resolve_var(review.subject, resolution);
            }
        }
    }

    /// Apply a verdict exactly once. The phase cannot have moved while the
    /// review was pending (reviews gate the clock), but the effects below
    /// only touch history, score and rosters, never the clock.
    fn resolve_var(&mut self, subject: VarSubject, resolution: VarResolution) {
        let minute = self.clock.minute;
        let overturned = resolution == VarResolution::Overturned;

        match subject {
            VarSubject::ContestedGoal { event_index, side } => {
                if overturned {
                    self.score.decrement(side);
                    self.events.rewrite_type(event_index, MatchEventType::Offside);
                    if let Some(scorer_id) = self.events.get(event_index).and_then(|e| e.player_id) {
                        self.stats.adjust_rating(scorer_id, -1.0);
                    }
                    info!("VAR: goal disallowed ({}-{})", self.score.home, self.score.away);
                }
                self.push_verdict(minute, side, overturned);
            }
            VarSubject::RedCard {
                event_index,
                side,
                player_id,
            } => {
                if overturned {
                    self.events.rewrite_type(event_index, MatchEventType::CardYellow);

                    let counters = self.stats.side_mut(side);
                    counters.red_cards = counters.red_cards.saturating_sub(1);
                    counters.yellow_cards += 1;
                    self.stats.adjust_rating(player_id, 1.2);

                    let team = self.team_mut(side);
                    let mut was_keeper = false;
                    if let Some(player) = team.player_mut(player_id) {
                        player.sent_off = false;
                        was_keeper = player.position == PlayerPosition::Goalkeeper;
                    }
                    if was_keeper {
                        team.needs_keeper = false;
                    }

                    info!("VAR: red card downgraded to yellow for player {player_id}");
                }
                self.push_verdict(minute, side, overturned);
            }
            VarSubject::Objection { side } => {
                if !overturned {
                    self.discipline.record_failed_objection();
                }
                self.push_verdict(minute, side, overturned);
            }
        }
    }

    fn push_verdict(&mut self, minute: u8, side: TeamSide, overturned: bool) {
        let verdict = if overturned {
            VarVerdict::Overturned
        } else {
            VarVerdict::Upheld
        };
        self.push_event(MatchEvent::new(minute, MatchEventType::Var, side).with_verdict(verdict));
    }

    fn step_penalty(&mut self, rng: &mut StdRng) {
        let Some(mut sequence) = self.pending_penalty else {
            return;
        };

        let side = sequence.side;
        let minute = self.clock.minute;
        let conversion = self
            .team(side)
            .player(sequence.taker_id)
            .map(|p| p.skills.penalty_conversion())
            .unwrap_or(0.7);
        let keeper_concentration = self
            .team(side.opponent())
            .active_keeper()
            .map(|k| k.skills.concentration);

        match sequence.step(rng, conversion, keeper_concentration) {
            PenaltyOutcome::Pending => self.pending_penalty = Some(sequence),
            PenaltyOutcome::Cancelled => {
                self.pending_penalty = None;
                let counters = self.stats.side_mut(side);
                counters.penalties_awarded = counters.penalties_awarded.saturating_sub(1);
                self.push_verdict(minute, side, true);
                info!("VAR: penalty award rescinded");
            }
            PenaltyOutcome::Scored {
                taker_id,
                review_goal,
            } => {
                self.pending_penalty = None;
                let index = self.finalize_goal(side, taker_id, None, minute);
                if review_goal {
                    self.pending_var = Some(VarReview::new(VarSubject::ContestedGoal {
                        event_index: index,
                        side,
                    }));
                }
            }
            PenaltyOutcome::Saved { taker_id, retake } => {
                self.push_event(
                    MatchEvent::new(minute, MatchEventType::Save, side).with_player(taker_id),
                );
                if let Some(keeper_id) = self.team(side.opponent()).active_keeper().map(|k| k.id) {
                    self.stats.adjust_rating(keeper_id, 0.3);
                }
                self.after_failed_kick(sequence, side, minute, retake);
            }
            PenaltyOutcome::Missed { taker_id, retake } => {
                self.push_event(
                    MatchEvent::new(minute, MatchEventType::Miss, side).with_player(taker_id),
                );
                self.stats.adjust_rating(taker_id, -0.2);
                self.after_failed_kick(sequence, side, minute, retake);
            }
        }
    }

    fn after_failed_kick(
        &mut self,
        sequence: PenaltySequence,
        side: TeamSide,
        minute: u8,
        retake: bool,
    ) {
        if retake {
            // Keeper encroachment: the kick is taken again.
            self.push_event(MatchEvent::new(minute, MatchEventType::Info, side));
            self.pending_penalty = Some(sequence);
        } else {
            self.pending_penalty = None;
        }
    }

    fn step_shootout(&mut self, rng: &mut StdRng) {
        let minute = self.clock.minute;

        let home = &self.home;
        let away = &self.away;
        let Some(shootout) = self.shootout.as_mut() else {
            return;
        };

        let kick = shootout.resolve_kick(rng, |id| {
            home.player(id)
                .or_else(|| away.player(id))
                .map(|p| p.skills.penalty_conversion())
                .unwrap_or(0.7)
        });
        let decided = shootout.decided();

        match kick {
            Some(kick) => {
                if kick.scored {
                    self.stats.record_shootout_goal(kick.side);
                    self.events.push(
                        MatchEvent::new(minute, MatchEventType::Penalty, kick.side)
                            .with_player(kick.taker_id),
                    );
                } else {
                    self.events.push(
                        MatchEvent::new(minute, MatchEventType::Miss, kick.side)
                            .with_player(kick.taker_id),
                    );
                }
            }
            None => {
                warn!("shootout ended without a decisive kick available");
            }
        }

        if decided.is_some() || kick.is_none() {
            self.clock.finish_shootout();
            let winner = decided.unwrap_or(self.setup.user_side);
            self.events
                .push(MatchEvent::new(minute, MatchEventType::Info, winner));
            info!(
                "shootout finished {}-{}",
                self.stats.shootout_home, self.stats.shootout_away
            );
        }
    }

    fn enter_phase(&mut self, phase: MatchPhase) {
        // The transition normalized the clock back to the 45'/90' boundary.
        let minute = self.clock.minute;

        match phase {
            MatchPhase::HalfTime => {
                for team in [&mut self.home, &mut self.away] {
                    for player in &mut team.players {
                        player.recover_condition(HALF_TIME_RECOVERY);
                    }
                }

                if !self.discipline.is_sent_off() {
                    self.gates.halftime_talk_open = true;
                }
                self.events
                    .push(MatchEvent::new(minute, MatchEventType::Info, self.setup.user_side));
                info!("half time ({}-{})", self.score.home, self.score.away);
            }
            MatchPhase::Penalties => {
                self.shootout = Some(Shootout::new(&self.home, &self.away));
                self.events
                    .push(MatchEvent::new(minute, MatchEventType::Info, self.setup.user_side));
                info!("full time level; penalty shootout");
            }
            MatchPhase::FullTime => {
                self.events
                    .push(MatchEvent::new(minute, MatchEventType::Info, self.setup.user_side));
                info!("full time ({}-{})", self.score.home, self.score.away);
            }
            MatchPhase::FirstHalf | MatchPhase::SecondHalf => {}
        }
    }

    /// A forced-substitution gate is stranded when the remaining budget or
    /// bench cover was spent on a different player. The injured player then
    /// comes off with no replacement instead of locking the clock forever.
    fn resolve_stranded_forced_sub(&mut self, side: TeamSide, minute: u8) {
        let Some(victim_id) = self.gates.forced_sub else {
            return;
        };

        let team = self.team(side);
        let has_cover = team.can_substitute()
            && team
                .bench()
                .iter()
                .any(|p| !p.withdrawn && !team.subbed_off.contains(&p.id) && p.injury.is_none());
        if has_cover {
            return;
        }

        self.gates.forced_sub = None;
        self.play_short(side, victim_id, minute);
    }

    /// A sent-off manager cannot issue the restart; the assistant does it.
    fn auto_start_second_half(&mut self) {
        self.gates.halftime_talk_open = false;
        self.clock.start_second_half();
        self.events.push(MatchEvent::new(
            self.clock.minute,
            MatchEventType::Info,
            self.setup.user_side,
        ));
        info!("assistant starts the second half; manager is sent off");
    }

    /// Validate and apply a user command. Invalid commands mutate nothing.
    pub fn apply_command(&mut self, command: MatchCommand) -> CommandOutcome {
        match command {
            MatchCommand::StartSecondHalf => {
                if self.clock.phase != MatchPhase::HalfTime {
                    return CommandOutcome::Rejected("it is not half time");
                }
                if self.discipline.is_sent_off() {
                    return CommandOutcome::Rejected("manager has been sent off");
                }

                self.gates.halftime_talk_open = false;
                self.clock.start_second_half();
                self.events.push(MatchEvent::new(
                    self.clock.minute,
                    MatchEventType::Info,
                    self.setup.user_side,
                ));
                CommandOutcome::Accepted
            }
            MatchCommand::FinishMatch => {
                if self.clock.is_finished() {
                    CommandOutcome::Accepted
                } else {
                    CommandOutcome::Rejected("match still in progress")
                }
            }
            MatchCommand::SetSpeed(speed) => {
                if matches!(speed, 1 | 2 | 4) {
                    self.speed = speed;
                    CommandOutcome::Accepted
                } else {
                    CommandOutcome::Rejected("speed must be 1, 2 or 4")
                }
            }
            MatchCommand::SetMentality { side, mentality } => {
                if self.discipline.is_sent_off() {
                    return CommandOutcome::Rejected("manager has been sent off");
                }
                if side != self.setup.user_side {
                    return CommandOutcome::Rejected("cannot instruct the opposition");
                }

                self.team_mut(side).tactics.mentality = mentality;
                CommandOutcome::Accepted
            }
            MatchCommand::RaiseObjection => {
                if !self.clock.is_play_phase() {
                    return CommandOutcome::Rejected("objections are only heard during play");
                }
                if self.discipline.is_sent_off() {
                    return CommandOutcome::Rejected("manager has been sent off");
                }
                if self.pending_var.is_some() || self.pending_penalty.is_some() {
                    return CommandOutcome::Rejected("a review is already in progress");
                }

                self.tick_index += 1;
                let mut rng = self.tick_rng();
                let minute = self.clock.minute;
                let side = self.setup.user_side;

                self.push_event(MatchEvent::new(minute, MatchEventType::Argument, side));

                match self.discipline.raise_objection(&mut rng) {
                    ObjectionOutcome::VarReview => {
                        self.pending_var = Some(VarReview::new(VarSubject::Objection { side }));
                    }
                    ObjectionOutcome::Escalated(state) => {
                        info!("manager discipline escalated to {state:?}");
                        if state == DisciplineState::Red {
                            self.gates.tactics_open = false;
                            self.events
                                .push(MatchEvent::new(minute, MatchEventType::Info, side));
                        }
                    }
                    ObjectionOutcome::Ignored => {}
                }
                CommandOutcome::Accepted
            }
            MatchCommand::OpenTactics => {
                if self.discipline.is_sent_off() {
                    return CommandOutcome::Rejected("tactics panel is sealed");
                }
                self.gates.tactics_open = true;
                CommandOutcome::Accepted
            }
            MatchCommand::CloseTactics => {
                if self.gates.forced_sub.is_some() {
                    return CommandOutcome::Rejected("an injured player must be replaced first");
                }
                self.gates.tactics_open = false;
                CommandOutcome::Accepted
            }
            MatchCommand::Substitute { out_id, in_id } => {
                if !self.clock.is_play_phase() && self.clock.phase != MatchPhase::HalfTime {
                    return CommandOutcome::Rejected("substitutions are not available now");
                }

                let side = self.setup.user_side;
                let minute = self.clock.minute;
                let result = SubstitutionService::user_substitute(
                    self.team_mut(side),
                    out_id,
                    in_id,
                    minute,
                );

                match result {
                    Ok(made) => {
                        if self.gates.forced_sub == Some(out_id) {
                            self.gates.forced_sub = None;
                        }
                        self.push_event(
                            MatchEvent::new(minute, MatchEventType::Substitution, side)
                                .with_player(made.in_id),
                        );
                        self.resolve_stranded_forced_sub(side, minute);
                        CommandOutcome::Accepted
                    }
                    Err(error) => CommandOutcome::Rejected(error.reason()),
                }
            }
            MatchCommand::ShoutAt { player_id, shout } => {
                if !self.clock.is_play_phase() {
                    return CommandOutcome::Rejected("shouts only carry during play");
                }
                if self.discipline.is_sent_off() {
                    return CommandOutcome::Rejected("manager has been sent off");
                }

                let side = self.setup.user_side;
                let team = self.team_mut(side);
                match team.player_mut(player_id) {
                    Some(player) if player.is_selectable() => {
                        player.adjust_morale(shout.morale_delta());
                        CommandOutcome::Accepted
                    }
                    _ => CommandOutcome::Rejected("player is unavailable for instructions"),
                }
            }
            MatchCommand::CompleteHalftimeTalk { morale_delta } => {
                if self.clock.phase != MatchPhase::HalfTime || !self.gates.halftime_talk_open {
                    return CommandOutcome::Rejected("no halftime talk in progress");
                }

                let delta = morale_delta.clamp(-HALFTIME_TALK_MAX_DELTA, HALFTIME_TALK_MAX_DELTA);
                let side = self.setup.user_side;
                for player in &mut self.team_mut(side).players {
                    player.adjust_morale(delta);
                }

                self.gates.halftime_talk_open = false;
                CommandOutcome::Accepted
            }
        }
    }

    pub fn view(&self) -> MatchView {
        MatchView {
            minute: self.clock.minute,
            phase: self.clock.phase,
            score: self.score,
            events: self.events.events().to_vec(),
            stats: self.stats.clone(),
            momentum: self.momentum.series().to_vec(),
            xg: self.xg.points().to_vec(),
            discipline: self.discipline.state(),
            home_subs_used: self.home.subs_used,
            away_subs_used: self.away.subs_used,
            speed: self.speed,
        }
    }

    /// Fold the finished session into the hand-back for the career layer.
    pub fn into_summary(self) -> MatchSummary {
        let shootout = if self.stats.shootout_home + self.stats.shootout_away > 0 {
            Some((self.stats.shootout_home, self.stats.shootout_away))
        } else {
            None
        };

        let mut players = Vec::new();
        MatchSummary::collect_players(self.setup.date, &self.home, &self.stats, &mut players);
        MatchSummary::collect_players(self.setup.date, &self.away, &self.stats, &mut players);

        MatchSummary {
            date: self.setup.date,
            home_team_id: self.home.id,
            away_team_id: self.away.id,
            home_team_name: self.home.name,
            away_team_name: self.away.name,
            score: self.score,
            shootout,
            stats: self.stats,
            events: self.events.events().to_vec(),
            players,
        }
    }
}
