use crate::club::player::{MatchPlayer, PlayerPosition};
use crate::club::team::tactics::TeamTactics;
use serde::{Deserialize, Serialize};

pub const STARTING_XI: usize = 11;
pub const MAX_SUBSTITUTIONS: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamSide {
    Home,
    Away,
}

impl TeamSide {
    pub fn opponent(&self) -> TeamSide {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }
}

/// One team's live roster for a single match session.
///
/// Roster slots 0..=10 are the starting XI, 11.. the bench. Sent-off or
/// withdrawn players keep their slot and are flagged instead of removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamSheet {
    pub id: u32,
    pub name: String,
    pub tactics: TeamTactics,
    pub players: Vec<MatchPlayer>,

    pub captain_id: Option<u32>,
    pub penalty_taker_id: Option<u32>,
    pub free_kick_taker_id: Option<u32>,

    pub subs_used: u8,
    pub subbed_off: Vec<u32>,
    pub last_ai_sub_minute: Option<u8>,
    pub needs_keeper: bool,
    pub ai_controlled: bool,
}

impl TeamSheet {
    pub fn new(id: u32, name: &str, tactics: TeamTactics, players: Vec<MatchPlayer>) -> Self {
        debug_assert!(players.len() >= STARTING_XI, "team sheet needs a full starting XI");

        TeamSheet {
            id,
            name: String::from(name),
            tactics,
            players,
            captain_id: None,
            penalty_taker_id: None,
            free_kick_taker_id: None,
            subs_used: 0,
            subbed_off: Vec::new(),
            last_ai_sub_minute: None,
            needs_keeper: false,
            ai_controlled: false,
        }
    }

    pub fn player(&self, player_id: u32) -> Option<&MatchPlayer> {
        self.players.iter().find(|p| p.id == player_id)
    }

    pub fn player_mut(&mut self, player_id: u32) -> Option<&mut MatchPlayer> {
        self.players.iter_mut().find(|p| p.id == player_id)
    }

    pub fn starters(&self) -> &[MatchPlayer] {
        &self.players[..STARTING_XI.min(self.players.len())]
    }

    pub fn bench(&self) -> &[MatchPlayer] {
        if self.players.len() > STARTING_XI {
            &self.players[STARTING_XI..]
        } else {
            &[]
        }
    }

    /// Players currently taking part in play.
    pub fn on_pitch(&self) -> impl Iterator<Item = &MatchPlayer> {
        self.starters().iter().filter(|p| p.is_active())
    }

    pub fn on_pitch_count(&self) -> usize {
        self.on_pitch().count()
    }

    pub fn captain(&self) -> Option<&MatchPlayer> {
        let captain_id = self.captain_id?;
        self.on_pitch().find(|p| p.id == captain_id)
    }

    pub fn is_on_pitch(&self, player_id: u32) -> bool {
        self.on_pitch().any(|p| p.id == player_id)
    }

    pub fn is_on_bench(&self, player_id: u32) -> bool {
        self.bench()
            .iter()
            .any(|p| p.id == player_id && !p.withdrawn && !self.subbed_off.contains(&p.id))
    }

    pub fn can_substitute(&self) -> bool {
        self.subs_used < MAX_SUBSTITUTIONS
    }

    /// The keeper slot, if its occupant is still playing.
    pub fn active_keeper(&self) -> Option<&MatchPlayer> {
        self.on_pitch().find(|p| p.position == PlayerPosition::Goalkeeper)
    }

    /// Swap a bench player into the starter slot of `out_id`. Both invariants
    /// (slot count and permanent exclusion) are maintained here; legality is
    /// checked by the substitution service before calling.
    pub(crate) fn swap_players(&mut self, out_id: u32, in_id: u32, minute: u8) {
        let out_idx = self.starters().iter().position(|p| p.id == out_id);
        let in_idx = self.players.iter().position(|p| p.id == in_id);

        let (Some(out_idx), Some(in_idx)) = (out_idx, in_idx) else {
            debug_assert!(false, "swap_players called with invalid pair");
            return;
        };

        self.players.swap(out_idx, in_idx);

        // After the swap the outgoing player sits in the bench slot.
        self.players[in_idx].withdrawn = true;
        self.players[out_idx].entered_minute = Some(minute);

        self.subbed_off.push(out_id);
        self.subs_used += 1;
    }
}
