use crate::club::player::injury::MatchInjury;
use crate::club::player::skills::PlayerSkills;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result};

pub const CONDITION_MAX: f32 = 100.0;
pub const MORALE_MAX: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerPosition {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl PlayerPosition {
    pub fn short_name(&self) -> &'static str {
        match self {
            PlayerPosition::Goalkeeper => "GK",
            PlayerPosition::Defender => "DF",
            PlayerPosition::Midfielder => "MF",
            PlayerPosition::Forward => "FW",
        }
    }
}

/// How well a player covers a required position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PositionFit {
    None,
    Secondary,
    Exact,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchPlayer {
    pub id: u32,
    pub name: String,
    pub position: PlayerPosition,
    pub secondary_position: Option<PlayerPosition>,
    pub skills: PlayerSkills,

    pub condition: f32,
    pub morale: f32,

    pub injury: Option<MatchInjury>,
    pub sent_off: bool,
    pub withdrawn: bool,
    pub entered_minute: Option<u8>,
}

impl MatchPlayer {
    pub fn new(id: u32, name: &str, position: PlayerPosition, skills: PlayerSkills) -> Self {
        MatchPlayer {
            id,
            name: String::from(name),
            position,
            secondary_position: None,
            skills,
            condition: CONDITION_MAX,
            morale: 70.0,
            injury: None,
            sent_off: false,
            withdrawn: false,
            entered_minute: None,
        }
    }

    pub fn with_secondary_position(mut self, position: PlayerPosition) -> Self {
        self.secondary_position = Some(position);
        self
    }

    /// On the pitch and allowed to take part in play.
    pub fn is_active(&self) -> bool {
        !self.sent_off && !self.withdrawn
    }

    /// Eligible for shouts, instructions and penalty duties.
    pub fn is_selectable(&self) -> bool {
        self.is_active() && self.injury.is_none()
    }

    pub fn position_fit(&self, required: PlayerPosition) -> PositionFit {
        if self.position == required {
            PositionFit::Exact
        } else if self.secondary_position == Some(required) {
            PositionFit::Secondary
        } else {
            PositionFit::None
        }
    }

    pub fn drain_condition(&mut self, amount: f32) {
        self.condition = (self.condition - amount).clamp(0.0, CONDITION_MAX);
    }

    pub fn recover_condition(&mut self, amount: f32) {
        self.condition = (self.condition + amount).clamp(0.0, CONDITION_MAX);
    }

    pub fn adjust_morale(&mut self, delta: f32) {
        self.morale = (self.morale + delta).clamp(0.0, MORALE_MAX);
    }
}

impl PartialEq for MatchPlayer {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Display for MatchPlayer {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{} ({})", self.name, self.position.short_name())
    }
}
