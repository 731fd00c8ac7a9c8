use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Mentality {
    VeryDefensive,
    Defensive,
    Balanced,
    Attacking,
    VeryAttacking,
}

impl Mentality {
    /// Signed bias used by possession drift and momentum: -2..=2.
    pub fn bias(&self) -> i8 {
        match self {
            Mentality::VeryDefensive => -2,
            Mentality::Defensive => -1,
            Mentality::Balanced => 0,
            Mentality::Attacking => 1,
            Mentality::VeryAttacking => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeamTempo {
    VerySlow,
    Slow,
    Normal,
    Fast,
    BeastMode,
}

impl TeamTempo {
    pub fn factor(&self) -> f32 {
        match self {
            TeamTempo::VerySlow => 0.2,
            TeamTempo::Slow => 0.45,
            TeamTempo::Normal => 0.7,
            TeamTempo::Fast => 0.95,
            TeamTempo::BeastMode => 1.2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PressIntensity {
    VeryLow,
    Low,
    Normal,
    VeryHigh,
    Extreme,
}

impl PressIntensity {
    pub fn factor(&self) -> f32 {
        match self {
            PressIntensity::VeryLow => 0.1,
            PressIntensity::Low => 0.35,
            PressIntensity::Normal => 0.6,
            PressIntensity::VeryHigh => 0.85,
            PressIntensity::Extreme => 1.1,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TeamTactics {
    pub mentality: Mentality,
    pub tempo: TeamTempo,
    pub pressing: PressIntensity,
}

impl TeamTactics {
    pub fn new(mentality: Mentality, tempo: TeamTempo, pressing: PressIntensity) -> Self {
        TeamTactics {
            mentality,
            tempo,
            pressing,
        }
    }

    /// Shared per-minute condition drain before captain and stamina modifiers.
    pub fn base_drain(&self) -> f32 {
        (self.tempo.factor() + self.pressing.factor()) * 0.5
    }
}

impl Default for TeamTactics {
    fn default() -> Self {
        TeamTactics {
            mentality: Mentality::Balanced,
            tempo: TeamTempo::Normal,
            pressing: PressIntensity::Normal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_drain_bounds() {
        let calm = TeamTactics::new(Mentality::Balanced, TeamTempo::VerySlow, PressIntensity::VeryLow);
        let frantic = TeamTactics::new(Mentality::VeryAttacking, TeamTempo::BeastMode, PressIntensity::Extreme);

        assert!((calm.base_drain() - 0.15).abs() < 0.0001);
        assert!((frantic.base_drain() - 1.15).abs() < 0.0001);
    }

    #[test]
    fn mentality_bias_is_symmetric() {
        assert_eq!(Mentality::VeryDefensive.bias(), -Mentality::VeryAttacking.bias());
        assert_eq!(Mentality::Balanced.bias(), 0);
    }
}
