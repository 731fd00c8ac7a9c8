pub mod player;
pub mod team;

#[cfg(test)]
pub mod fixtures;

pub use player::{
    InjurySeverity, InjuryType, MatchInjury, MatchPlayer, PlayerPosition, PlayerSkills,
    PositionFit, CONDITION_MAX, MORALE_MAX,
};
pub use team::{
    Mentality, PressIntensity, TeamSheet, TeamSide, TeamTactics, TeamTempo, MAX_SUBSTITUTIONS,
    STARTING_XI,
};
