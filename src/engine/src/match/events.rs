use crate::club::TeamSide;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEventType {
    Goal,
    CardYellow,
    CardRed,
    Injury,
    Substitution,
    Var,
    Penalty,
    Miss,
    Save,
    Foul,
    Offside,
    Corner,
    Fight,
    Argument,
    PitchInvasion,
    Info,
}

impl MatchEventType {
    /// Minutes of stoppage credited to the running accumulator per event.
    pub fn stoppage_cost(&self) -> f32 {
        match self {
            MatchEventType::Goal => 0.8,
            MatchEventType::CardYellow => 0.5,
            MatchEventType::CardRed => 1.0,
            MatchEventType::Injury => 1.5,
            MatchEventType::Substitution => 0.5,
            MatchEventType::Var => 1.5,
            MatchEventType::Penalty => 1.0,
            MatchEventType::Fight => 2.0,
            MatchEventType::PitchInvasion => 4.0,
            _ => 0.0,
        }
    }

    /// Unsigned momentum weight; the pipeline signs it by owning side.
    pub fn momentum_weight(&self) -> i32 {
        match self {
            MatchEventType::Goal => 60,
            MatchEventType::CardRed => -40,
            MatchEventType::Miss | MatchEventType::Save | MatchEventType::Penalty => 30,
            MatchEventType::Corner => 10,
            MatchEventType::Offside | MatchEventType::Foul => -5,
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VarVerdict {
    Upheld,
    Overturned,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchEvent {
    pub minute: u8,
    pub event_type: MatchEventType,
    pub side: TeamSide,
    pub player_id: Option<u32>,
    pub scorer: Option<String>,
    pub assist: Option<String>,
    pub var_verdict: Option<VarVerdict>,
}

impl MatchEvent {
    pub fn new(minute: u8, event_type: MatchEventType, side: TeamSide) -> Self {
        MatchEvent {
            minute,
            event_type,
            side,
            player_id: None,
            scorer: None,
            assist: None,
            var_verdict: None,
        }
    }

    pub fn with_player(mut self, player_id: u32) -> Self {
        self.player_id = Some(player_id);
        self
    }

    pub fn with_scorer(mut self, scorer: &str, assist: Option<&str>) -> Self {
        self.scorer = Some(String::from(scorer));
        self.assist = assist.map(String::from);
        self
    }

    pub fn with_verdict(mut self, verdict: VarVerdict) -> Self {
        self.var_verdict = Some(verdict);
        self
    }
}

/// Append-only, minute-ordered match history.
///
/// The single permitted mutation is the VAR reversal rewriting a historical
/// event's type in place; everything else is an append.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<MatchEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        EventLog { events: Vec::new() }
    }

    /// Appends and returns the index of the stored event. Insertion order is
    /// the display order; minutes restart at 45 when added time rolls into
    /// the second half, so they are not globally monotonic.
    pub fn push(&mut self, event: MatchEvent) -> usize {
        self.events.push(event);
        self.events.len() - 1
    }

    /// VAR reversal path: rewrite the type of a past event in place.
    pub fn rewrite_type(&mut self, index: usize, new_type: MatchEventType) {
        if let Some(event) = self.events.get_mut(index) {
            event.event_type = new_type;
        }
    }

    pub fn get(&self, index: usize) -> Option<&MatchEvent> {
        self.events.get(index)
    }

    pub fn events(&self) -> &[MatchEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn count_of(&self, event_type: MatchEventType) -> usize {
        self.events.iter().filter(|e| e.event_type == event_type).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_preserves_insertion_order_within_minute() {
        let mut log = EventLog::new();

        log.push(MatchEvent::new(10, MatchEventType::Goal, TeamSide::Home));
        log.push(MatchEvent::new(10, MatchEventType::Var, TeamSide::Home));

        let events = log.events();
        assert_eq!(events[0].event_type, MatchEventType::Goal);
        assert_eq!(events[1].event_type, MatchEventType::Var);
    }

    #[test]
    fn rewrite_changes_type_but_keeps_position() {
        let mut log = EventLog::new();

        let idx = log.push(MatchEvent::new(22, MatchEventType::Goal, TeamSide::Away));
        log.push(MatchEvent::new(23, MatchEventType::Corner, TeamSide::Home));

        log.rewrite_type(idx, MatchEventType::Offside);

        assert_eq!(log.get(idx).unwrap().event_type, MatchEventType::Offside);
        assert_eq!(log.get(idx).unwrap().minute, 22);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn pitch_invasion_carries_largest_stoppage_cost() {
        assert_eq!(MatchEventType::PitchInvasion.stoppage_cost(), 4.0);
        assert!(MatchEventType::Goal.stoppage_cost() < MatchEventType::CardRed.stoppage_cost());
        assert_eq!(MatchEventType::Corner.stoppage_cost(), 0.0);
    }
}
