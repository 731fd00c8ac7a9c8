use crate::club::TeamSide;
use rand::RngExt;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Ticks between the review being announced and the verdict.
pub const REVIEW_DELAY_TICKS: u8 = 3;

pub const GOAL_OVERTURN_CHANCE: f32 = 0.20;
pub const RED_CARD_DOWNGRADE_CHANCE: f32 = 0.80;
pub const OBJECTION_OVERTURN_CHANCE: f32 = 0.25;
pub const RED_CARD_REVIEW_CHANCE: f32 = 0.25;
pub const GOAL_REVIEW_CHANCE: f32 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VarSubject {
    /// A goal already on the board; overturning rewrites the event and pulls
    /// the provisional score back.
    ContestedGoal { event_index: usize, side: TeamSide },
    /// A straight red under review; downgrading reinstates the player.
    RedCard {
        event_index: usize,
        side: TeamSide,
        player_id: u32,
    },
    /// A manager objection referred to the screen.
    Objection { side: TeamSide },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarResolution {
    Upheld,
    Overturned,
}

/// A pending review: a countdown stepped by the tick loop, never a timer.
/// While one is active the clock is gated; reviews never overlap.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VarReview {
    pub subject: VarSubject,
    ticks_remaining: u8,
}

impl VarReview {
    pub fn new(subject: VarSubject) -> Self {
        VarReview {
            subject,
            ticks_remaining: REVIEW_DELAY_TICKS,
        }
    }

    /// Step the countdown; `Some` once the verdict is due.
    pub fn step(&mut self, rng: &mut StdRng) -> Option<VarResolution> {
        if self.ticks_remaining > 1 {
            self.ticks_remaining -= 1;
            return None;
        }

        self.ticks_remaining = 0;

        let overturn_chance = match self.subject {
            VarSubject::ContestedGoal { .. } => GOAL_OVERTURN_CHANCE,
            VarSubject::RedCard { .. } => RED_CARD_DOWNGRADE_CHANCE,
            VarSubject::Objection { .. } => OBJECTION_OVERTURN_CHANCE,
        };

        if rng.random::<f32>() < overturn_chance {
            Some(VarResolution::Overturned)
        } else {
            Some(VarResolution::Upheld)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn review_takes_the_full_delay() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut review = VarReview::new(VarSubject::Objection { side: TeamSide::Home });

        let mut steps = 0;
        while review.step(&mut rng).is_none() {
            steps += 1;
        }

        assert_eq!(steps, REVIEW_DELAY_TICKS - 1);
    }

    #[test]
    fn red_card_reviews_mostly_downgrade() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut overturned = 0;

        for _ in 0..1000 {
            let mut review = VarReview::new(VarSubject::RedCard {
                event_index: 0,
                side: TeamSide::Away,
                player_id: 1,
            });

            loop {
                if let Some(resolution) = review.step(&mut rng) {
                    if resolution == VarResolution::Overturned {
                        overturned += 1;
                    }
                    break;
                }
            }
        }

        assert!((700..900).contains(&overturned), "overturned {overturned} of 1000");
    }

    #[test]
    fn contested_goals_mostly_stand() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut overturned = 0;

        for _ in 0..1000 {
            let mut review = VarReview::new(VarSubject::ContestedGoal {
                event_index: 0,
                side: TeamSide::Home,
            });

            loop {
                if let Some(resolution) = review.step(&mut rng) {
                    if resolution == VarResolution::Overturned {
                        overturned += 1;
                    }
                    break;
                }
            }
        }

        assert!((120..280).contains(&overturned), "overturned {overturned} of 1000");
    }
}
