use crate::club::{Mentality, TeamSide};
use serde::{Deserialize, Serialize};

/// Morale nudges the user manager can aim at a single player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShoutType {
    Encourage,
    Praise,
    Calm,
    Demand,
}

impl ShoutType {
    pub fn morale_delta(&self) -> f32 {
        match self {
            ShoutType::Encourage => 3.0,
            ShoutType::Praise => 2.0,
            ShoutType::Calm => 1.0,
            ShoutType::Demand => -1.0,
        }
    }
}

/// Discrete user commands, validated against phase and discipline state
/// before any mutation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MatchCommand {
    StartSecondHalf,
    FinishMatch,
    SetSpeed(u8),
    SetMentality { side: TeamSide, mentality: Mentality },
    RaiseObjection,
    OpenTactics,
    CloseTactics,
    Substitute { out_id: u32, in_id: u32 },
    ShoutAt { player_id: u32, shout: ShoutType },
    CompleteHalftimeTalk { morale_delta: f32 },
}

/// Invalid commands are no-ops that report why they were refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Accepted,
    Rejected(&'static str),
}

impl CommandOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, CommandOutcome::Accepted)
    }
}
