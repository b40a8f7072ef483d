use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, Interval, interval_at};

use common::game::{GameRng, GameState, Phase};
use common::log;
use common::validation::validate_player_name;

use crate::score_client::{HighScoreClient, submission_allowed};
use crate::state::{ClientCommand, SharedState};

/// Owns the game state and drives it with a fixed-interval clock. The
/// interval is dropped whenever the phase leaves Running, so a paused or
/// finished game produces no periodic work.
pub async fn run_game_loop(
    shared_state: SharedState,
    mut command_rx: mpsc::UnboundedReceiver<ClientCommand>,
    server_address: String,
    tick_interval: Duration,
) {
    let score_client = HighScoreClient::new(&server_address);
    let mut game = GameState::new();
    let mut rng = GameRng::from_random();
    log!("Game started with seed {}", rng.seed());
    shared_state.set_game(game.clone());

    refresh_leaderboard(&score_client, &shared_state);

    let mut ticker = Some(game_ticker(tick_interval));

    loop {
        tokio::select! {
            _ = next_tick(&mut ticker) => {
                game.tick(&mut rng);
                shared_state.set_game(game.clone());
                if game.phase() == Phase::Over {
                    ticker = None;
                    log!("Game over with score {}", game.score());
                }
            }
            command = command_rx.recv() => {
                let Some(command) = command else { break };
                match command {
                    ClientCommand::Turn { direction } => {
                        game.submit_direction(direction);
                    }
                    ClientCommand::TogglePause => {
                        match game.phase() {
                            Phase::Running => {
                                game.pause();
                                ticker = None;
                            }
                            Phase::Paused => {
                                game.resume();
                                ticker = Some(game_ticker(tick_interval));
                            }
                            Phase::Over => {}
                        }
                        shared_state.set_game(game.clone());
                    }
                    ClientCommand::NewGame => {
                        game.reset();
                        rng = GameRng::from_random();
                        ticker = Some(game_ticker(tick_interval));
                        shared_state.set_score_submitted(false);
                        shared_state.clear_status();
                        shared_state.clear_error();
                        shared_state.set_game(game.clone());
                        log!("New game started with seed {}", rng.seed());
                    }
                    ClientCommand::SubmitScore { player_name } => {
                        submit_score(&score_client, &shared_state, &game, player_name);
                    }
                    ClientCommand::FetchLeaderboard => {
                        refresh_leaderboard(&score_client, &shared_state);
                    }
                }
            }
        }
    }
}

// The snake must sit still for one full period after a start, resume or
// restart, so the first tick is scheduled a period away instead of firing
// immediately.
fn game_ticker(tick_interval: Duration) -> Interval {
    interval_at(Instant::now() + tick_interval, tick_interval)
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}

fn submit_score(
    score_client: &HighScoreClient,
    shared_state: &SharedState,
    game: &GameState,
    player_name: String,
) {
    if game.phase() != Phase::Over {
        return;
    }
    let score = game.score();
    if !submission_allowed(score, shared_state.submission_in_flight()) {
        return;
    }
    let player_name = match validate_player_name(&player_name) {
        Ok(name) => name.to_string(),
        Err(e) => {
            shared_state.set_error(e);
            return;
        }
    };

    // Runs as its own task: a slow or failed submission never delays the
    // tick loop or starting a new game.
    shared_state.set_submission_in_flight(true);
    let score_client = score_client.clone();
    let shared_state = shared_state.clone();
    tokio::spawn(async move {
        match score_client.submit_score(&player_name, score as i64).await {
            Ok(response) => {
                log!("Score {} submitted as id {}", score, response.id);
                shared_state.set_status(response.message);
                shared_state.set_score_submitted(true);
                match score_client.fetch_leaderboard().await {
                    Ok(records) => shared_state.set_leaderboard(records),
                    Err(e) => {
                        shared_state.set_error(format!("Failed to refresh leaderboard: {}", e));
                    }
                }
            }
            Err(e) => {
                log!("Score submission failed: {}", e);
                shared_state.set_error(format!("Failed to submit score: {}", e));
            }
        }
        shared_state.set_submission_in_flight(false);
    });
}

fn refresh_leaderboard(score_client: &HighScoreClient, shared_state: &SharedState) {
    let score_client = score_client.clone();
    let shared_state = shared_state.clone();
    tokio::spawn(async move {
        match score_client.fetch_leaderboard().await {
            Ok(records) => shared_state.set_leaderboard(records),
            Err(e) => {
                log!("Leaderboard fetch failed: {}", e);
                shared_state.set_error(format!("Failed to fetch leaderboard: {}", e));
            }
        }
    });
}
