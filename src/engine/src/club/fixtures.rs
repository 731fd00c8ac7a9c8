//! Test-only roster builders shared by the match subsystem tests.

use crate::club::player::{MatchPlayer, PlayerPosition, PlayerSkills};
use crate::club::team::{TeamSheet, TeamTactics};

pub fn skills(skill: u8) -> PlayerSkills {
    PlayerSkills {
        skill,
        stamina: 10,
        leadership: 10,
        penalty_taking: 10,
        concentration: 10,
    }
}

/// An 18-man squad: GK + 4 DF + 4 MF + 2 FW starters, 7 on the bench
/// (one backup keeper). Player ids are `base + 0..=17`.
pub fn squad(base: u32) -> Vec<MatchPlayer> {
    let mut players = Vec::with_capacity(18);

    players.push(MatchPlayer::new(base, "Keeper", PlayerPosition::Goalkeeper, skills(12)));
    for i in 1..=4 {
        players.push(MatchPlayer::new(base + i, "Defender", PlayerPosition::Defender, skills(11)));
    }
    for i in 5..=8 {
        players.push(MatchPlayer::new(base + i, "Midfielder", PlayerPosition::Midfielder, skills(12)));
    }
    for i in 9..=10 {
        players.push(MatchPlayer::new(base + i, "Forward", PlayerPosition::Forward, skills(13)));
    }

    players.push(MatchPlayer::new(base + 11, "Backup Keeper", PlayerPosition::Goalkeeper, skills(9)));
    players.push(MatchPlayer::new(base + 12, "Bench Defender", PlayerPosition::Defender, skills(9)));
    players.push(MatchPlayer::new(base + 13, "Bench Defender", PlayerPosition::Defender, skills(8)));
    players.push(MatchPlayer::new(base + 14, "Bench Midfielder", PlayerPosition::Midfielder, skills(10)));
    players.push(MatchPlayer::new(base + 15, "Bench Midfielder", PlayerPosition::Midfielder, skills(9)));
    players.push(MatchPlayer::new(base + 16, "Bench Forward", PlayerPosition::Forward, skills(10)));
    players.push(MatchPlayer::new(base + 17, "Bench Forward", PlayerPosition::Forward, skills(9)));

    players
}

pub fn team_sheet(id: u32, name: &str) -> TeamSheet {
    let base = id * 100;
    let mut team = TeamSheet::new(id, name, TeamTactics::default(), squad(base));

    team.captain_id = Some(base + 1);
    team.penalty_taker_id = Some(base + 9);
    team.free_kick_taker_id = Some(base + 5);

    team
}
