use crate::club::{InjuryType, TeamSheet, TeamSide};
use crate::r#match::clock::MatchPhase;
use crate::r#match::events::MatchEvent;
use crate::r#match::stats::{MatchStats, Score};
use rand::RngExt;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Read-only view handed to the event oracle each minute. The oracle never
/// mutates match state; the clock does.
pub struct OracleContext<'a> {
    pub minute: u8,
    pub phase: MatchPhase,
    pub score: Score,
    pub home: &'a TeamSheet,
    pub away: &'a TeamSheet,
    pub stats: &'a MatchStats,
    pub events: &'a [MatchEvent],
}

/// A candidate event for the current minute, before resolution. The engine
/// owns all follow-up: VAR flags, penalties, cascades, stat folds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OracleEvent {
    Goal {
        side: TeamSide,
        scorer_id: u32,
        assist_id: Option<u32>,
    },
    YellowCard { side: TeamSide, player_id: u32 },
    RedCard { side: TeamSide, player_id: u32 },
    Injury {
        side: TeamSide,
        player_id: u32,
        injury_type: InjuryType,
    },
    PenaltyAwarded { side: TeamSide },
    ShotSaved { side: TeamSide, player_id: u32 },
    ShotWide { side: TeamSide, player_id: u32 },
    Foul { side: TeamSide, player_id: u32 },
    Offside { side: TeamSide },
    Corner { side: TeamSide },
    Fight { side: TeamSide },
    Argument { side: TeamSide },
    PitchInvasion { side: TeamSide },
}

impl OracleEvent {
    pub fn side(&self) -> TeamSide {
        match *self {
            OracleEvent::Goal { side, .. }
            | OracleEvent::YellowCard { side, .. }
            | OracleEvent::RedCard { side, .. }
            | OracleEvent::Injury { side, .. }
            | OracleEvent::PenaltyAwarded { side }
            | OracleEvent::ShotSaved { side, .. }
            | OracleEvent::ShotWide { side, .. }
            | OracleEvent::Foul { side, .. }
            | OracleEvent::Offside { side }
            | OracleEvent::Corner { side }
            | OracleEvent::Fight { side }
            | OracleEvent::Argument { side }
            | OracleEvent::PitchInvasion { side } => side,
        }
    }
}

/// External generator of at most one primary event per minute.
pub trait EventOracle {
    fn next_event(&mut self, ctx: &OracleContext<'_>) -> Option<OracleEvent>;
}

/// Deterministic oracle for tests and replays: a minute-keyed script.
#[derive(Debug, Clone, Default)]
pub struct ScriptedOracle {
    script: Vec<(u8, OracleEvent)>,
}

impl ScriptedOracle {
    pub fn new(mut script: Vec<(u8, OracleEvent)>) -> Self {
        script.sort_by_key(|(minute, _)| *minute);
        ScriptedOracle { script }
    }

    pub fn quiet() -> Self {
        ScriptedOracle { script: Vec::new() }
    }
}

impl EventOracle for ScriptedOracle {
    fn next_event(&mut self, ctx: &OracleContext<'_>) -> Option<OracleEvent> {
        // Entries behind the clock (e.g. after a snapshot restore with a
        // fresh script) are skipped, never replayed.
        let position = self
            .script
            .iter()
            .position(|(minute, _)| *minute >= ctx.minute)?;

        if self.script[position].0 == ctx.minute {
            Some(self.script.remove(position).1)
        } else {
            None
        }
    }
}

/// Seeded demo oracle. Each minute derives its own RNG from the seed, so a
/// restored match replays the exact same sequence.
#[derive(Debug, Clone, Copy)]
pub struct SimpleOracle {
    seed: u64,
}

impl SimpleOracle {
    pub fn new(seed: u64) -> Self {
        SimpleOracle { seed }
    }

    fn minute_rng(&self, minute: u8) -> StdRng {
        StdRng::seed_from_u64(self.seed ^ (minute as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }

    fn pick_attacker(team: &TeamSheet, rng: &mut StdRng) -> Option<u32> {
        let candidates: Vec<u32> = team
            .on_pitch()
            .filter(|p| p.is_selectable())
            .map(|p| p.id)
            .collect();

        if candidates.is_empty() {
            None
        } else {
            Some(candidates[rng.random_range(0..candidates.len())])
        }
    }
}

impl EventOracle for SimpleOracle {
    fn next_event(&mut self, ctx: &OracleContext<'_>) -> Option<OracleEvent> {
        let mut rng = self.minute_rng(ctx.minute);

        // Side weighting follows live possession.
        let side = if rng.random_range(0..100) < ctx.stats.possession_home {
            TeamSide::Home
        } else {
            TeamSide::Away
        };
        let team = match side {
            TeamSide::Home => ctx.home,
            TeamSide::Away => ctx.away,
        };
        let player_id = Self::pick_attacker(team, &mut rng)?;

        let roll = rng.random_range(0..1000);
        let event = match roll {
            0..=549 => return None,
            550..=649 => OracleEvent::Corner { side },
            650..=749 => OracleEvent::Foul { side, player_id },
            750..=829 => OracleEvent::ShotWide { side, player_id },
            830..=899 => OracleEvent::ShotSaved { side, player_id },
            900..=939 => OracleEvent::Offside { side },
            940..=974 => {
                let assist_id = Self::pick_attacker(team, &mut rng).filter(|id| *id != player_id);
                OracleEvent::Goal {
                    side,
                    scorer_id: player_id,
                    assist_id,
                }
            }
            975..=989 => OracleEvent::YellowCard { side, player_id },
            990..=993 => OracleEvent::Injury {
                side,
                player_id,
                injury_type: if rng.random_range(0..10) < 7 {
                    InjuryType::MinorKnock
                } else {
                    InjuryType::HamstringStrain
                },
            },
            994..=996 => OracleEvent::PenaltyAwarded { side: side.opponent() },
            997..=998 => OracleEvent::RedCard { side, player_id },
            _ => OracleEvent::Argument { side },
        };

        Some(event)
    }
}
