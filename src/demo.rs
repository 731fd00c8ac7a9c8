use engine::{
    MatchEngine, MatchPlayer, PlayerPosition, PlayerSkills, TeamSheet, TeamTactics,
};

fn skills(skill: u8, stamina: u8, penalty_taking: u8) -> PlayerSkills {
    PlayerSkills {
        skill,
        stamina,
        leadership: 10,
        penalty_taking,
        concentration: 12,
    }
}

fn squad(base_id: u32, names: [&str; 18]) -> Vec<MatchPlayer> {
    use PlayerPosition::*;

    let positions = [
        Goalkeeper, Defender, Defender, Defender, Defender, Midfielder, Midfielder, Midfielder,
        Midfielder, Forward, Forward,
        // bench
        Goalkeeper, Defender, Defender, Midfielder, Midfielder, Forward, Forward,
    ];

    names
        .iter()
        .zip(positions)
        .enumerate()
        .map(|(offset, (name, position))| {
            let offset = offset as u32;
            MatchPlayer::new(
                base_id + offset,
                name,
                position,
                skills(
                    10 + (offset % 5) as u8,
                    12 + (offset % 6) as u8,
                    8 + (offset % 9) as u8,
                ),
            )
        })
        .collect()
}

pub fn home_side() -> TeamSheet {
    let players = squad(
        1,
        [
            "Ramon Iriarte", "Joel Tanaka", "Bruno Carrera", "Oleg Danchenko", "Milos Petric",
            "Andre Faustino", "Kofi Mensah", "Luca Bendtner", "Marco Reyes", "Dario Kovac",
            "Emil Strand", "Pavel Novy", "Ilias Rahmani", "Tom Welling", "Jon Aurtenetxe",
            "Ciro Esposito", "Yan Bueno", "Noa Vidal",
        ],
    );

    let mut team = TeamSheet::new(1, "Atletico Verde", TeamTactics::default(), players);
    team.captain_id = Some(3);
    team.penalty_taker_id = Some(10);
    team.free_kick_taker_id = Some(8);
    team
}

pub fn away_side() -> TeamSheet {
    let players = squad(
        100,
        [
            "Sem de Wit", "Anders Lund", "Rui Tavares", "Viktor Hale", "Pietro Galli",
            "Jens Okafor", "Samir Haddad", "Leon Brandt", "Marek Sowa", "Didier Camara",
            "Iker Urruti", "Olle Sand", "Teo Martins", "Felix Arnau", "Dan Kelleher",
            "Arto Laine", "Nino Berisha", "Ruben Valls",
        ],
    );

    let mut team = TeamSheet::new(100, "Real Puerto", TeamTactics::default(), players);
    team.captain_id = Some(102);
    team.penalty_taker_id = Some(109);
    team.free_kick_taker_id = Some(107);
    team
}

/// Bench cover for a forced change in the demo loop: positional match first,
/// otherwise any eligible bench player.
pub fn replacement_for(engine: &MatchEngine, out_id: u32) -> Option<u32> {
    let team = engine.team(engine.setup.user_side);
    let position = team.player(out_id)?.position;

    let eligible = |p: &&MatchPlayer| {
        !p.withdrawn && p.injury.is_none() && !team.subbed_off.contains(&p.id)
    };

    team.bench()
        .iter()
        .filter(eligible)
        .find(|p| p.position == position)
        .or_else(|| team.bench().iter().find(eligible))
        .map(|p| p.id)
}
