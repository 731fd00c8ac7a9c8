pub mod clock;
pub mod commands;
pub mod discipline;
pub mod engine;
pub mod events;
pub mod fatigue;
pub mod oracle;
pub mod penalty;
pub mod pipeline;
pub mod result;
pub mod stats;
pub mod substitution;
pub mod telemetry;
pub mod var;

pub use clock::{FirstLegScore, FixtureKind, MatchPhase, PhaseClock};
pub use commands::{CommandOutcome, MatchCommand, ShoutType};
pub use discipline::{DisciplineState, ManagerDiscipline, ObjectionOutcome};
pub use engine::{GateState, MatchEngine, MatchSetup, MatchView};
pub use events::{EventLog, MatchEvent, MatchEventType, VarVerdict};
pub use fatigue::FatigueModel;
pub use oracle::{EventOracle, OracleContext, OracleEvent, ScriptedOracle, SimpleOracle};
pub use penalty::{PenaltyOutcome, PenaltySequence, PenaltyStage, Shootout};
pub use result::{MatchSummary, PlayerHandBack};
pub use stats::{MatchStats, Score, SideStats};
pub use substitution::{
    ForcedSubOutcome, SubstitutionError, SubstitutionMade, SubstitutionService,
};
pub use telemetry::{MomentumPoint, MomentumTracker, XgPoint, XgTimeline};
pub use var::{VarResolution, VarReview, VarSubject};
