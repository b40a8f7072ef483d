use common::api::{ErrorBody, ScoreRecord, SubmitScoreRequest, SubmitScoreResponse};

#[derive(Clone)]
pub struct HighScoreClient {
    base_url: String,
    http: reqwest::Client,
}

impl HighScoreClient {
    pub fn new(server_address: &str) -> Self {
        Self {
            base_url: server_address.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/high-scores", self.base_url)
    }

    pub async fn fetch_leaderboard(&self) -> Result<Vec<ScoreRecord>, String> {
        let response = self
            .http
            .get(self.endpoint())
            .send()
            .await
            .map_err(|e| format!("Request failed: {}", e))?;
        if !response.status().is_success() {
            return Err(format!("Server returned {}", response.status()));
        }
        response
            .json::<Vec<ScoreRecord>>()
            .await
            .map_err(|e| format!("Malformed response: {}", e))
    }

    pub async fn submit_score(
        &self,
        player_name: &str,
        score: i64,
    ) -> Result<SubmitScoreResponse, String> {
        let request = SubmitScoreRequest {
            player_name: player_name.to_string(),
            score,
        };
        let response = self
            .http
            .post(self.endpoint())
            .json(&request)
            .send()
            .await
            .map_err(|e| format!("Request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let error = response
                .json::<ErrorBody>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| format!("Server returned {}", status));
            return Err(error);
        }
        response
            .json::<SubmitScoreResponse>()
            .await
            .map_err(|e| format!("Malformed response: {}", e))
    }
}

/// Zero scores never become requests, and at most one submission may be in
/// flight per game session.
pub fn submission_allowed(score: u32, submission_in_flight: bool) -> bool {
    score > 0 && !submission_in_flight
}
