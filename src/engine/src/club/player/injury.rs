use rand::RngExt;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InjurySeverity {
    Minor,
    Moderate,
    Severe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InjuryType {
    // Minor (1-9 days): player can usually carry on
    Bruise,
    MinorKnock,
    Cramp,
    DeadLeg,
    // Moderate (10-42 days): forces a substitution
    HamstringStrain,
    CalfStrain,
    AnkleSprain,
    GroinStrain,
    // Severe (60-180 days)
    TornMeniscus,
    ShoulderDislocation,
    BrokenLeg,
}

impl InjuryType {
    /// Returns (min_days, max_days) for this injury type
    pub fn duration_range(&self) -> (u16, u16) {
        match self {
            InjuryType::Bruise => (1, 3),
            InjuryType::MinorKnock => (2, 5),
            InjuryType::Cramp => (1, 2),
            InjuryType::DeadLeg => (3, 9),
            InjuryType::HamstringStrain => (14, 28),
            InjuryType::CalfStrain => (10, 21),
            InjuryType::AnkleSprain => (14, 42),
            InjuryType::GroinStrain => (10, 28),
            InjuryType::TornMeniscus => (60, 120),
            InjuryType::ShoulderDislocation => (60, 90),
            InjuryType::BrokenLeg => (90, 180),
        }
    }

    pub fn severity(&self) -> InjurySeverity {
        match self {
            InjuryType::Bruise | InjuryType::MinorKnock | InjuryType::Cramp | InjuryType::DeadLeg => {
                InjurySeverity::Minor
            }
            InjuryType::HamstringStrain
            | InjuryType::CalfStrain
            | InjuryType::AnkleSprain
            | InjuryType::GroinStrain => InjurySeverity::Moderate,
            InjuryType::TornMeniscus | InjuryType::ShoulderDislocation | InjuryType::BrokenLeg => {
                InjurySeverity::Severe
            }
        }
    }

    pub fn random_duration(&self, rng: &mut StdRng) -> u16 {
        let (min_days, max_days) = self.duration_range();
        rng.random_range(min_days..=max_days)
    }

    pub fn name(&self) -> &'static str {
        match self {
            InjuryType::Bruise => "Bruise",
            InjuryType::MinorKnock => "Minor knock",
            InjuryType::Cramp => "Cramp",
            InjuryType::DeadLeg => "Dead leg",
            InjuryType::HamstringStrain => "Hamstring strain",
            InjuryType::CalfStrain => "Calf strain",
            InjuryType::AnkleSprain => "Ankle sprain",
            InjuryType::GroinStrain => "Groin strain",
            InjuryType::TornMeniscus => "Torn meniscus",
            InjuryType::ShoulderDislocation => "Shoulder dislocation",
            InjuryType::BrokenLeg => "Broken leg",
        }
    }
}

/// An injury picked up during the current match session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MatchInjury {
    pub injury_type: InjuryType,
    pub days_remaining: u16,
    pub minute_occurred: u8,
    pub aggravated: bool,
}

impl MatchInjury {
    /// Injuries of this length (or any aggravation) force the player off.
    pub const FORCED_SUB_DAYS: u16 = 10;

    pub fn forces_substitution(&self) -> bool {
        self.days_remaining >= Self::FORCED_SUB_DAYS || self.aggravated
    }
}
