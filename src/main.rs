use chrono::NaiveDate;
use engine::{
    FixtureKind, MatchCommand, MatchEngine, MatchPhase, MatchSetup, SimpleOracle, TeamSide,
};
use env_logger::Env;
use log::info;
use std::env;
use std::time::Duration;

mod demo;

#[tokio::main]
async fn main() {
    color_eyre::install().unwrap();

    env_logger::Builder::from_env(Env::default()
        .default_filter_or("info")
    ).init();

    let seed = env::var("SEED")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(2026);

    let fixture = match env::var("FIXTURE").as_deref() {
        Ok("KNOCKOUT") => FixtureKind::SingleLegKnockout,
        _ => FixtureKind::League,
    };

    let setup = MatchSetup {
        fixture,
        seed,
        date: NaiveDate::from_ymd_opt(2026, 8, 22).unwrap(),
        user_side: TeamSide::Home,
    };

    let mut engine = MatchEngine::new(setup, demo::home_side(), demo::away_side());
    let mut oracle = SimpleOracle::new(seed);

    engine.apply_command(MatchCommand::SetSpeed(4));

    info!("kick off: seed {seed}");

    let mut known_events = 0;
    while !engine.is_finished() {
        tokio::time::sleep(Duration::from_millis(engine.tick_interval_ms())).await;

        let view = engine.tick(&mut oracle);

        for event in &view.events[known_events..] {
            info!(
                "{}' {:?} [{:?}] ({}-{})",
                event.minute, event.event_type, event.side, view.score.home, view.score.away
            );
        }
        known_events = view.events.len();

        if view.phase == MatchPhase::HalfTime {
            engine.apply_command(MatchCommand::CompleteHalftimeTalk { morale_delta: 4.0 });
            engine.apply_command(MatchCommand::StartSecondHalf);
            info!("second half under way");
        }

        if let Some(out_id) = engine.gates.forced_sub {
            if let Some(in_id) = demo::replacement_for(&engine, out_id) {
                engine.apply_command(MatchCommand::Substitute { out_id, in_id });
            }
        }
    }

    let view = engine.view();
    info!(
        "full time {}-{} | possession {}% - {}%",
        view.score.home, view.score.away, view.stats.possession_home, view.stats.possession_away
    );

    let summary = engine.into_summary();
    info!(
        "{} vs {}: {} events, {} player reports",
        summary.home_team_name,
        summary.away_team_name,
        summary.events.len(),
        summary.players.len()
    );
}
