use crate::club::{TeamSheet, TeamSide};
use itertools::Itertools;
use rand::RngExt;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

pub const PRE_KICK_VAR_CHANCE: f32 = 0.30;
pub const PRE_KICK_OVERTURN_CHANCE: f32 = 0.20;
pub const POST_GOAL_VAR_CHANCE: f32 = 0.15;

const AWARD_TICKS: u8 = 2;
const CHECK_TICKS: u8 = 3;
const PREPARE_TICKS: u8 = 2;

/// Weight added to the designated taker when ranking candidates.
const DESIGNATED_TAKER_BONUS: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PenaltyStage {
    Awarded { ticks_remaining: u8 },
    PreKickCheck { ticks_remaining: u8 },
    Preparing { ticks_remaining: u8 },
}

/// What the engine must apply once a stage of the sequence lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PenaltyOutcome {
    /// Still counting down.
    Pending,
    /// Pre-kick review cancelled the award.
    Cancelled,
    Scored { taker_id: u32, review_goal: bool },
    Saved { taker_id: u32, retake: bool },
    Missed { taker_id: u32, retake: bool },
}

/// An in-play penalty kick: award, optional pre-kick review, run-up, outcome,
/// possible encroachment retake, optional post-goal review. Stages resolve
/// serially on the tick loop; no two sequences overlap.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PenaltySequence {
    pub side: TeamSide,
    pub taker_id: u32,
    pub stage: PenaltyStage,
    pub retaken: bool,
}

impl PenaltySequence {
    pub fn new(side: TeamSide, taker_id: u32) -> Self {
        PenaltySequence {
            side,
            taker_id,
            stage: PenaltyStage::Awarded {
                ticks_remaining: AWARD_TICKS,
            },
            retaken: false,
        }
    }

    /// Pick the taker: highest penalty-taking stat among selectable on-pitch
    /// players, weighted toward the designated taker if one is set.
    pub fn select_taker(team: &TeamSheet) -> Option<u32> {
        team.on_pitch()
            .filter(|p| p.is_selectable())
            .sorted_by_key(|p| {
                let mut weight = p.skills.penalty_taking;
                if team.penalty_taker_id == Some(p.id) {
                    weight = weight.saturating_add(DESIGNATED_TAKER_BONUS);
                }
                std::cmp::Reverse(weight)
            })
            .next()
            .map(|p| p.id)
    }

    /// Encroachment retakes get likelier against a distracted keeper.
    pub fn retake_chance(keeper_concentration: Option<u8>) -> f32 {
        let concentration = keeper_concentration.unwrap_or(10).clamp(1, 20);
        0.04 + (20 - concentration) as f32 * 0.006
    }

    /// Advance one tick. The caller passes the taker's conversion chance and
    /// the defending keeper's concentration (None when the keeper is off).
    pub fn step(
        &mut self,
        rng: &mut StdRng,
        conversion_chance: f32,
        keeper_concentration: Option<u8>,
    ) -> PenaltyOutcome {
        match self.stage {
            PenaltyStage::Awarded { ticks_remaining } => {
                if ticks_remaining > 1 {
                    self.stage = PenaltyStage::Awarded {
                        ticks_remaining: ticks_remaining - 1,
                    };
                } else if rng.random::<f32>() < PRE_KICK_VAR_CHANCE {
                    self.stage = PenaltyStage::PreKickCheck {
                        ticks_remaining: CHECK_TICKS,
                    };
                } else {
                    self.stage = PenaltyStage::Preparing {
                        ticks_remaining: PREPARE_TICKS,
                    };
                }
                PenaltyOutcome::Pending
            }
            PenaltyStage::PreKickCheck { ticks_remaining } => {
                if ticks_remaining > 1 {
                    self.stage = PenaltyStage::PreKickCheck {
                        ticks_remaining: ticks_remaining - 1,
                    };
                    PenaltyOutcome::Pending
                } else if rng.random::<f32>() < PRE_KICK_OVERTURN_CHANCE {
                    PenaltyOutcome::Cancelled
                } else {
                    self.stage = PenaltyStage::Preparing {
                        ticks_remaining: PREPARE_TICKS,
                    };
                    PenaltyOutcome::Pending
                }
            }
            PenaltyStage::Preparing { ticks_remaining } => {
                if ticks_remaining > 1 {
                    self.stage = PenaltyStage::Preparing {
                        ticks_remaining: ticks_remaining - 1,
                    };
                    return PenaltyOutcome::Pending;
                }

                if rng.random::<f32>() < conversion_chance {
                    let review_goal = rng.random::<f32>() < POST_GOAL_VAR_CHANCE;
                    return PenaltyOutcome::Scored {
                        taker_id: self.taker_id,
                        review_goal,
                    };
                }

                // Failed kick: saved more often than wide.
                let saved = rng.random::<f32>() < 0.65;
                let retake =
                    !self.retaken && rng.random::<f32>() < Self::retake_chance(keeper_concentration);

                if retake {
                    self.retaken = true;
                    self.stage = PenaltyStage::Preparing {
                        ticks_remaining: PREPARE_TICKS,
                    };
                }

                if saved {
                    PenaltyOutcome::Saved {
                        taker_id: self.taker_id,
                        retake,
                    }
                } else {
                    PenaltyOutcome::Missed {
                        taker_id: self.taker_id,
                        retake,
                    }
                }
            }
        }
    }
}

/// One shootout kick result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShootoutKick {
    pub side: TeamSide,
    pub taker_id: u32,
    pub scored: bool,
}

/// Best-of-five shootout, then sudden death; one kick resolves per tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shootout {
    next: TeamSide,
    home_taken: u8,
    away_taken: u8,
    home_scored: u8,
    away_scored: u8,
    home_order: Vec<u32>,
    away_order: Vec<u32>,
}

impl Shootout {
    pub fn new(home: &TeamSheet, away: &TeamSheet) -> Self {
        Shootout {
            next: TeamSide::Home,
            home_taken: 0,
            away_taken: 0,
            home_scored: 0,
            away_scored: 0,
            home_order: Self::taker_order(home),
            away_order: Self::taker_order(away),
        }
    }

    /// Rotation: selectable on-pitch players by penalty-taking stat, the
    /// designated taker first.
    fn taker_order(team: &TeamSheet) -> Vec<u32> {
        team.on_pitch()
            .filter(|p| p.is_selectable())
            .sorted_by_key(|p| {
                let mut weight = p.skills.penalty_taking;
                if team.penalty_taker_id == Some(p.id) {
                    weight = weight.saturating_add(DESIGNATED_TAKER_BONUS);
                }
                std::cmp::Reverse(weight)
            })
            .map(|p| p.id)
            .collect()
    }

    pub fn score(&self) -> (u8, u8) {
        (self.home_scored, self.away_scored)
    }

    /// The winning side once the shootout is mathematically settled.
    pub fn decided(&self) -> Option<TeamSide> {
        // The unreachable-lead clinch only applies while best-of-five kicks
        // remain; in sudden death the trailing side always gets its reply.
        if self.home_taken < 5 || self.away_taken < 5 {
            let home_left = 5u8.saturating_sub(self.home_taken);
            let away_left = 5u8.saturating_sub(self.away_taken);

            if self.home_scored > self.away_scored + away_left {
                return Some(TeamSide::Home);
            }
            if self.away_scored > self.home_scored + home_left {
                return Some(TeamSide::Away);
            }
        }

        // Sudden death: decided whenever both sides have taken the same
        // number past five and the scores differ.
        if self.home_taken >= 5
            && self.away_taken >= 5
            && self.home_taken == self.away_taken
            && self.home_scored != self.away_scored
        {
            return Some(if self.home_scored > self.away_scored {
                TeamSide::Home
            } else {
                TeamSide::Away
            });
        }

        None
    }

    /// Resolve the next kick. Returns `None` once the shootout is decided or
    /// a side has run out of takers entirely.
    pub fn resolve_kick(
        &mut self,
        rng: &mut StdRng,
        conversion_for: impl Fn(u32) -> f32,
    ) -> Option<ShootoutKick> {
        if self.decided().is_some() {
            return None;
        }

        let side = self.next;
        let (order, taken) = match side {
            TeamSide::Home => (&self.home_order, self.home_taken),
            TeamSide::Away => (&self.away_order, self.away_taken),
        };

        let taker_id = *order.get(taken as usize % order.len().max(1))?;

        let scored = rng.random::<f32>() < conversion_for(taker_id);

        match side {
            TeamSide::Home => {
                self.home_taken += 1;
                if scored {
                    self.home_scored += 1;
                }
            }
            TeamSide::Away => {
                self.away_taken += 1;
                if scored {
                    self.away_scored += 1;
                }
            }
        }

        self.next = side.opponent();

        Some(ShootoutKick {
            side,
            taker_id,
            scored,
        })
    }
}
