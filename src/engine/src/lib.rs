pub mod club;
pub mod r#match;

pub use club::{
    InjurySeverity, InjuryType, MatchInjury, MatchPlayer, Mentality, PlayerPosition, PlayerSkills,
    PressIntensity, TeamSheet, TeamSide, TeamTactics, TeamTempo,
};
pub use r#match::{
    CommandOutcome, EventOracle, FixtureKind, MatchCommand, MatchEngine, MatchEvent, MatchPhase,
    MatchSetup, MatchSummary, MatchView, ScriptedOracle, ShoutType, SimpleOracle,
};
