use rand::RngExt;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

const OBJECTION_VAR_CHANCE: f32 = 0.20;
const OBJECTION_ESCALATION_CHANCE: f32 = 0.20;
const REPEAT_OFFENDER_CHANCE: f32 = 0.50;

/// Touchline sanctions for the user manager, strictly monotonic per match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DisciplineState {
    None,
    Warned,
    Yellow,
    Red,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectionOutcome {
    /// The fourth official sends the decision to review.
    VarReview,
    Escalated(DisciplineState),
    Ignored,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ManagerDiscipline {
    state: DisciplineState,
    failed_objection: bool,
}

impl Default for ManagerDiscipline {
    fn default() -> Self {
        Self::new()
    }
}

impl ManagerDiscipline {
    pub fn new() -> Self {
        ManagerDiscipline {
            state: DisciplineState::None,
            failed_objection: false,
        }
    }

    pub fn state(&self) -> DisciplineState {
        self.state
    }

    pub fn is_sent_off(&self) -> bool {
        self.state == DisciplineState::Red
    }

    /// A review that failed to overturn the decision: escalation becomes
    /// deterministic from here on.
    pub fn record_failed_objection(&mut self) {
        self.failed_objection = true;
    }

    pub fn escalate(&mut self) -> DisciplineState {
        self.state = match self.state {
            DisciplineState::None => DisciplineState::Warned,
            DisciplineState::Warned => DisciplineState::Yellow,
            DisciplineState::Yellow | DisciplineState::Red => DisciplineState::Red,
        };

        self.state
    }

    /// Resolve a "raise objection" action. VAR review resolution (and the
    /// failed-objection bookkeeping it may trigger) is handled by the caller.
    pub fn raise_objection(&mut self, rng: &mut StdRng) -> ObjectionOutcome {
        if self.is_sent_off() {
            return ObjectionOutcome::Ignored;
        }

        if self.failed_objection {
            return ObjectionOutcome::Escalated(self.escalate());
        }

        let roll: f32 = rng.random();

        if roll < OBJECTION_VAR_CHANCE {
            ObjectionOutcome::VarReview
        } else if roll < OBJECTION_VAR_CHANCE + OBJECTION_ESCALATION_CHANCE {
            ObjectionOutcome::Escalated(self.escalate())
        } else if self.state > DisciplineState::None
            && roll < OBJECTION_VAR_CHANCE + OBJECTION_ESCALATION_CHANCE + REPEAT_OFFENDER_CHANCE
        {
            ObjectionOutcome::Escalated(self.escalate())
        } else {
            ObjectionOutcome::Ignored
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn escalation_is_monotonic() {
        let mut discipline = ManagerDiscipline::new();

        assert_eq!(discipline.escalate(), DisciplineState::Warned);
        assert_eq!(discipline.escalate(), DisciplineState::Yellow);
        assert_eq!(discipline.escalate(), DisciplineState::Red);
        assert_eq!(discipline.escalate(), DisciplineState::Red);
    }

    #[test]
    fn state_never_regresses_under_any_objection_sequence() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut discipline = ManagerDiscipline::new();
        let mut previous = discipline.state();

        for _ in 0..200 {
            discipline.raise_objection(&mut rng);
            assert!(discipline.state() >= previous);
            previous = discipline.state();
        }
    }

    #[test]
    fn failed_objection_makes_escalation_deterministic() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut discipline = ManagerDiscipline::new();
        discipline.record_failed_objection();

        assert_eq!(
            discipline.raise_objection(&mut rng),
            ObjectionOutcome::Escalated(DisciplineState::Warned)
        );
        assert_eq!(
            discipline.raise_objection(&mut rng),
            ObjectionOutcome::Escalated(DisciplineState::Yellow)
        );
        assert_eq!(
            discipline.raise_objection(&mut rng),
            ObjectionOutcome::Escalated(DisciplineState::Red)
        );
    }

    #[test]
    fn sent_off_manager_objections_are_ignored() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut discipline = ManagerDiscipline::new();
        discipline.escalate();
        discipline.escalate();
        discipline.escalate();

        assert!(discipline.is_sent_off());
        assert_eq!(discipline.raise_objection(&mut rng), ObjectionOutcome::Ignored);
        assert_eq!(discipline.state(), DisciplineState::Red);
    }
}
