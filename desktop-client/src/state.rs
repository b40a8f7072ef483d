use std::sync::{Arc, Mutex};

use common::api::ScoreRecord;
use common::game::{Direction, GameState};

#[derive(Debug, Clone)]
pub enum ClientCommand {
    Turn { direction: Direction },
    TogglePause,
    NewGame,
    SubmitScore { player_name: String },
    FetchLeaderboard,
}

/// State shared between the egui thread and the game task.
#[derive(Clone)]
pub struct SharedState {
    game: Arc<Mutex<GameState>>,
    leaderboard: Arc<Mutex<Vec<ScoreRecord>>>,
    status: Arc<Mutex<Option<String>>>,
    error: Arc<Mutex<Option<String>>>,
    submission_in_flight: Arc<Mutex<bool>>,
    score_submitted: Arc<Mutex<bool>>,
}

impl SharedState {
    pub fn new() -> Self {
        Self {
            game: Arc::new(Mutex::new(GameState::new())),
            leaderboard: Arc::new(Mutex::new(Vec::new())),
            status: Arc::new(Mutex::new(None)),
            error: Arc::new(Mutex::new(None)),
            submission_in_flight: Arc::new(Mutex::new(false)),
            score_submitted: Arc::new(Mutex::new(false)),
        }
    }

    pub fn game(&self) -> GameState {
        self.game.lock().unwrap().clone()
    }

    pub fn set_game(&self, game: GameState) {
        *self.game.lock().unwrap() = game;
    }

    pub fn leaderboard(&self) -> Vec<ScoreRecord> {
        self.leaderboard.lock().unwrap().clone()
    }

    pub fn set_leaderboard(&self, records: Vec<ScoreRecord>) {
        *self.leaderboard.lock().unwrap() = records;
    }

    pub fn status(&self) -> Option<String> {
        self.status.lock().unwrap().clone()
    }

    pub fn set_status(&self, status: String) {
        *self.status.lock().unwrap() = Some(status);
    }

    pub fn clear_status(&self) {
        *self.status.lock().unwrap() = None;
    }

    pub fn error(&self) -> Option<String> {
        self.error.lock().unwrap().clone()
    }

    pub fn set_error(&self, error: String) {
        *self.error.lock().unwrap() = Some(error);
    }

    pub fn clear_error(&self) {
        *self.error.lock().unwrap() = None;
    }

    pub fn submission_in_flight(&self) -> bool {
        *self.submission_in_flight.lock().unwrap()
    }

    pub fn set_submission_in_flight(&self, in_flight: bool) {
        *self.submission_in_flight.lock().unwrap() = in_flight;
    }

    pub fn score_submitted(&self) -> bool {
        *self.score_submitted.lock().unwrap()
    }

    pub fn set_score_submitted(&self, submitted: bool) {
        *self.score_submitted.lock().unwrap() = submitted;
    }
}
