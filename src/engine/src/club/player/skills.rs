use serde::{Deserialize, Serialize};

/// Match-relevant skill block on the usual 1-20 scale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerSkills {
    pub skill: u8,
    pub stamina: u8,
    pub leadership: u8,
    pub penalty_taking: u8,
    pub concentration: u8,
}

impl PlayerSkills {
    /// Personal mitigation of per-minute condition drain.
    /// Stamina 20 nearly halves drain versus stamina 1.
    pub fn stamina_factor(&self) -> f32 {
        1.0 - (self.stamina.clamp(1, 20) as f32 - 1.0) * 0.02
    }

    /// Chance that a penalty kick by this player is converted.
    pub fn penalty_conversion(&self) -> f32 {
        0.60 + self.penalty_taking.clamp(1, 20) as f32 * 0.013
    }
}

impl Default for PlayerSkills {
    fn default() -> Self {
        PlayerSkills {
            skill: 10,
            stamina: 10,
            leadership: 10,
            penalty_taking: 10,
            concentration: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamina_factor_range() {
        let weak = PlayerSkills {
            stamina: 1,
            ..PlayerSkills::default()
        };
        let strong = PlayerSkills {
            stamina: 20,
            ..PlayerSkills::default()
        };

        assert_eq!(weak.stamina_factor(), 1.0);
        assert!((strong.stamina_factor() - 0.62).abs() < 0.0001);
    }

    #[test]
    fn penalty_conversion_grows_with_stat() {
        let poor = PlayerSkills {
            penalty_taking: 1,
            ..PlayerSkills::default()
        };
        let elite = PlayerSkills {
            penalty_taking: 20,
            ..PlayerSkills::default()
        };

        assert!(poor.penalty_conversion() < elite.penalty_conversion());
        assert!(elite.penalty_conversion() < 0.9);
    }
}
