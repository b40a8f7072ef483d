use serde::{Deserialize, Serialize};

/// A single leaderboard entry as served by `GET /high-scores`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub player_name: String,
    pub score: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SubmitScoreRequest {
    pub player_name: String,
    pub score: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SubmitScoreResponse {
    pub message: String,
    pub id: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
