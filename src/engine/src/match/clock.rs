use crate::r#match::stats::Score;
use log::error;
use serde::{Deserialize, Serialize};

pub const FIRST_HALF_MINUTES: u8 = 45;
pub const SECOND_HALF_MINUTES: u8 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    FirstHalf,
    HalfTime,
    SecondHalf,
    FullTime,
    Penalties,
}

/// First-leg score stored in leg-one orientation: the current away team was
/// at home in leg one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirstLegScore {
    pub home: u8,
    pub away: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FixtureKind {
    League,
    SingleLegKnockout,
    SecondLeg { first_leg: Option<FirstLegScore> },
}

impl FixtureKind {
    /// Whether a level result at 90+ sends the tie to penalties.
    ///
    /// For a second leg the aggregate is computed with teams swapped:
    /// `agg_home = leg2_home + leg1_away`, `agg_away = leg2_away + leg1_home`.
    /// A missing first-leg score is a data-integrity gap in the surrounding
    /// career system: it is logged and treated as a normal full-time end.
    pub fn penalties_required(&self, score: Score) -> bool {
        match self {
            FixtureKind::League => false,
            FixtureKind::SingleLegKnockout => score.is_level(),
            FixtureKind::SecondLeg { first_leg: Some(leg1) } => {
                let aggregate_home = score.home as u16 + leg1.away as u16;
                let aggregate_away = score.away as u16 + leg1.home as u16;
                aggregate_home == aggregate_away
            }
            FixtureKind::SecondLeg { first_leg: None } => {
                error!("second leg fixture without a first-leg score; treating as normal full time");
                false
            }
        }
    }
}

/// Minute counter, stoppage accumulator and the phase state machine.
///
/// Phases only ever move forward: FirstHalf -> HalfTime -> SecondHalf ->
/// FullTime or Penalties -> FullTime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseClock {
    pub phase: MatchPhase,
    pub minute: u8,

    stoppage_acc: f32,
    added_minutes: Option<u8>,
}

impl Default for PhaseClock {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseClock {
    pub fn new() -> Self {
        PhaseClock {
            phase: MatchPhase::FirstHalf,
            minute: 0,
            stoppage_acc: 0.0,
            added_minutes: None,
        }
    }

    pub fn is_play_phase(&self) -> bool {
        matches!(self.phase, MatchPhase::FirstHalf | MatchPhase::SecondHalf)
    }

    pub fn is_finished(&self) -> bool {
        self.phase == MatchPhase::FullTime
    }

    pub fn add_stoppage(&mut self, minutes: f32) {
        if self.is_play_phase() {
            self.stoppage_acc += minutes;
        }
    }

    pub fn stoppage_accumulator(&self) -> f32 {
        self.stoppage_acc
    }

    pub fn added_minutes(&self) -> Option<u8> {
        self.added_minutes
    }

    fn boundary(&self) -> u8 {
        match self.phase {
            MatchPhase::SecondHalf => SECOND_HALF_MINUTES,
            _ => FIRST_HALF_MINUTES,
        }
    }

    /// Advance one simulated minute. At the 45'/90' boundary the stoppage
    /// accumulator is converted to whole added minutes and reset.
    pub fn advance_minute(&mut self) {
        debug_assert!(self.is_play_phase(), "clock only advances during play");

        self.minute += 1;

        if self.minute == self.boundary() && self.added_minutes.is_none() {
            let added = std::cmp::max(
                u8::from(self.stoppage_acc > 0.0),
                self.stoppage_acc.ceil() as u8,
            );
            self.added_minutes = Some(added);
            self.stoppage_acc = 0.0;
        }
    }

    /// True once the current half has run through its added time.
    pub fn half_complete(&self) -> bool {
        match self.added_minutes {
            Some(added) => self.minute >= self.boundary() + added,
            None => false,
        }
    }

    /// Evaluate the end-of-half transition. Returns the phase entered, if any.
    pub fn check_transition(&mut self, score: Score, fixture: &FixtureKind) -> Option<MatchPhase> {
        if !self.half_complete() {
            return None;
        }

        match self.phase {
            MatchPhase::FirstHalf => {
                self.phase = MatchPhase::HalfTime;
                self.minute = FIRST_HALF_MINUTES;
                self.added_minutes = None;
                Some(MatchPhase::HalfTime)
            }
            MatchPhase::SecondHalf => {
                self.phase = if fixture.penalties_required(score) {
                    MatchPhase::Penalties
                } else {
                    MatchPhase::FullTime
                };
                self.minute = SECOND_HALF_MINUTES;
                self.added_minutes = None;
                Some(self.phase)
            }
            _ => None,
        }
    }

    /// Explicit "start second half" transition out of the interval.
    pub fn start_second_half(&mut self) {
        debug_assert_eq!(self.phase, MatchPhase::HalfTime);

        self.phase = MatchPhase::SecondHalf;
        self.minute = FIRST_HALF_MINUTES;
    }

    pub fn finish_shootout(&mut self) {
        debug_assert_eq!(self.phase, MatchPhase::Penalties);

        self.phase = MatchPhase::FullTime;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_half(clock: &mut PhaseClock, score: Score, fixture: &FixtureKind) -> MatchPhase {
        loop {
            clock.advance_minute();
            if let Some(phase) = clock.check_transition(score, fixture) {
                return phase;
            }
        }
    }

    #[test]
    fn no_stoppage_means_no_added_minutes() {
        let mut clock = PhaseClock::new();
        let phase = run_half(&mut clock, Score::default(), &FixtureKind::League);

        assert_eq!(phase, MatchPhase::HalfTime);
        assert_eq!(clock.minute, FIRST_HALF_MINUTES);
    }

    #[test]
    fn stoppage_rounds_up_and_resets() {
        let mut clock = PhaseClock::new();
        clock.add_stoppage(0.8);
        clock.add_stoppage(1.5);

        for _ in 0..FIRST_HALF_MINUTES {
            clock.advance_minute();
        }

        // 2.3 accumulated => 3 added minutes, accumulator reset at the boundary
        assert_eq!(clock.added_minutes(), Some(3));
        assert_eq!(clock.stoppage_accumulator(), 0.0);
        assert!(!clock.half_complete());

        clock.advance_minute();
        clock.advance_minute();
        clock.advance_minute();
        assert!(clock.half_complete());
    }

    #[test]
    fn tiny_stoppage_still_adds_one_minute() {
        let mut clock = PhaseClock::new();
        clock.add_stoppage(0.4);

        for _ in 0..FIRST_HALF_MINUTES {
            clock.advance_minute();
        }

        assert_eq!(clock.added_minutes(), Some(1));
    }

    #[test]
    fn league_match_never_goes_to_penalties() {
        let mut clock = PhaseClock::new();
        run_half(&mut clock, Score::default(), &FixtureKind::League);
        clock.start_second_half();

        let phase = run_half(&mut clock, Score::default(), &FixtureKind::League);
        assert_eq!(phase, MatchPhase::FullTime);
    }

    #[test]
    fn level_single_leg_knockout_goes_to_penalties() {
        let mut clock = PhaseClock::new();
        let fixture = FixtureKind::SingleLegKnockout;

        run_half(&mut clock, Score::default(), &fixture);
        clock.start_second_half();

        let phase = run_half(&mut clock, Score { home: 1, away: 1 }, &fixture);
        assert_eq!(phase, MatchPhase::Penalties);
    }

    #[test]
    fn second_leg_aggregate_decides_penalties() {
        // Leg one: current away side won 2-1 at home. Leg two ends 1-0 to the
        // current home side: aggregates are 1+1 = 2 and 0+2 = 2 -> penalties.
        let fixture = FixtureKind::SecondLeg {
            first_leg: Some(FirstLegScore { home: 2, away: 1 }),
        };

        assert!(fixture.penalties_required(Score { home: 1, away: 0 }));

        // 2-0 on the night means 3-2 on aggregate: decided, no penalties.
        assert!(!fixture.penalties_required(Score { home: 2, away: 0 }));
    }

    #[test]
    fn missing_first_leg_score_falls_back_to_full_time() {
        let fixture = FixtureKind::SecondLeg { first_leg: None };

        // Level on the night would normally at least reach aggregate checks;
        // with no first-leg data the engine must not guess.
        assert!(!fixture.penalties_required(Score { home: 1, away: 1 }));

        let mut clock = PhaseClock::new();
        run_half(&mut clock, Score::default(), &fixture);
        clock.start_second_half();

        let phase = run_half(&mut clock, Score { home: 1, away: 1 }, &fixture);
        assert_eq!(phase, MatchPhase::FullTime);
    }

    #[test]
    fn phases_never_regress() {
        let mut clock = PhaseClock::new();
        run_half(&mut clock, Score::default(), &FixtureKind::League);
        clock.start_second_half();
        run_half(&mut clock, Score::default(), &FixtureKind::League);

        assert!(clock.is_finished());
        assert_eq!(clock.check_transition(Score::default(), &FixtureKind::League), None);
    }

    #[test]
    fn second_half_stoppage_independent_of_first() {
        let mut clock = PhaseClock::new();
        clock.add_stoppage(3.7);
        run_half(&mut clock, Score::default(), &FixtureKind::League);

        clock.start_second_half();
        assert_eq!(clock.stoppage_accumulator(), 0.0);

        clock.add_stoppage(1.2);
        for _ in 0..(SECOND_HALF_MINUTES - FIRST_HALF_MINUTES) {
            clock.advance_minute();
        }

        assert_eq!(clock.added_minutes(), Some(2));
    }

    #[test]
    fn stoppage_ignored_outside_play() {
        let mut clock = PhaseClock::new();
        run_half(&mut clock, Score::default(), &FixtureKind::League);

        clock.add_stoppage(2.0);
        assert_eq!(clock.stoppage_accumulator(), 0.0);
    }
}
