use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::cors::{Any, CorsLayer};

use common::api::{ErrorBody, SubmitScoreRequest, SubmitScoreResponse};
use common::log;
use common::validation::{validate_player_name, validate_score};

use crate::score_store::ScoreStore;
use crate::server_config::LEADERBOARD_LIMIT;

#[derive(Clone)]
pub struct WebServerState<S> {
    pub store: S,
}

pub fn build_router<S>(store: S) -> Router
where
    S: ScoreStore + Clone + Send + Sync + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/high-scores",
            get(get_high_scores::<S>).post(submit_high_score::<S>),
        )
        .layer(cors)
        .with_state(WebServerState { store })
}

pub async fn run_web_server<S>(store: S, addr: &str) -> Result<(), String>
where
    S: ScoreStore + Clone + Send + Sync + 'static,
{
    let app = build_router(store);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind {}: {}", addr, e))?;
    log!("Web server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| format!("Web server error: {}", e))
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for Ctrl+C");
    log!("Shutdown signal received");
}

async fn get_high_scores<S>(State(state): State<WebServerState<S>>) -> Response
where
    S: ScoreStore + Clone + Send + Sync + 'static,
{
    match state.store.top_scores(LEADERBOARD_LIMIT).await {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => {
            log!("GET /high-scores failed: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch high scores",
            )
        }
    }
}

async fn submit_high_score<S>(
    State(state): State<WebServerState<S>>,
    payload: Result<Json<SubmitScoreRequest>, JsonRejection>,
) -> Response
where
    S: ScoreStore + Clone + Send + Sync + 'static,
{
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            log!("POST /high-scores rejected: {}", rejection);
            return error_response(StatusCode::BAD_REQUEST, "Invalid request body");
        }
    };

    let player_name = match validate_player_name(&request.player_name) {
        Ok(name) => name,
        Err(e) => {
            log!("POST /high-scores rejected: {}", e);
            return error_response(StatusCode::BAD_REQUEST, "Invalid player name");
        }
    };
    if let Err(e) = validate_score(request.score) {
        log!("POST /high-scores rejected: {}", e);
        return error_response(StatusCode::BAD_REQUEST, "Invalid score");
    }

    match state.store.insert_score(player_name, request.score).await {
        Ok(id) => (
            StatusCode::CREATED,
            Json(SubmitScoreResponse {
                message: "Score saved".to_string(),
                id,
            }),
        )
            .into_response(),
        Err(e) => {
            log!("POST /high-scores failed: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to save score")
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::body::Body;
    use axum::http::{Request, header};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use common::api::ScoreRecord;

    use super::*;

    #[derive(Clone, Default)]
    struct MemoryScoreStore {
        scores: Arc<Mutex<Vec<ScoreRecord>>>,
    }

    impl ScoreStore for MemoryScoreStore {
        async fn top_scores(&self, limit: i64) -> Result<Vec<ScoreRecord>, String> {
            let mut scores = self.scores.lock().unwrap().clone();
            scores.sort_by(|a, b| b.score.cmp(&a.score));
            scores.truncate(limit as usize);
            Ok(scores)
        }

        async fn insert_score(&self, player_name: &str, score: i64) -> Result<i64, String> {
            let mut scores = self.scores.lock().unwrap();
            scores.push(ScoreRecord {
                player_name: player_name.to_string(),
                score,
            });
            Ok(scores.len() as i64)
        }
    }

    #[derive(Clone)]
    struct FailingScoreStore;

    impl ScoreStore for FailingScoreStore {
        async fn top_scores(&self, _limit: i64) -> Result<Vec<ScoreRecord>, String> {
            Err("connection refused".to_string())
        }

        async fn insert_score(&self, _player_name: &str, _score: i64) -> Result<i64, String> {
            Err("connection refused".to_string())
        }
    }

    async fn send_get(router: &Router) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("GET")
            .uri("/high-scores")
            .body(Body::empty())
            .unwrap();
        send(router, request).await
    }

    async fn send_post(router: &Router, body: String) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/high-scores")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();
        send(router, request).await
    }

    async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_get_empty_leaderboard() {
        let router = build_router(MemoryScoreStore::default());
        let (status, body) = send_get(&router).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_submit_then_fetch_is_ordered_by_score() {
        let router = build_router(MemoryScoreStore::default());

        for (name, score) in [("Alice", 5), ("Bob", 12), ("Carol", 7)] {
            let (status, body) = send_post(
                &router,
                json!({"player_name": name, "score": score}).to_string(),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
            assert_eq!(body["message"], "Score saved");
            assert!(body["id"].is_i64());
        }

        let (status, body) = send_get(&router).await;
        assert_eq!(status, StatusCode::OK);
        let records: Vec<ScoreRecord> = serde_json::from_value(body).unwrap();
        assert_eq!(
            records,
            vec![
                ScoreRecord {
                    player_name: "Bob".to_string(),
                    score: 12
                },
                ScoreRecord {
                    player_name: "Carol".to_string(),
                    score: 7
                },
                ScoreRecord {
                    player_name: "Alice".to_string(),
                    score: 5
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_leaderboard_is_capped_at_ten_entries() {
        let router = build_router(MemoryScoreStore::default());
        for score in 0..12 {
            let (status, _) = send_post(
                &router,
                json!({"player_name": "P", "score": score}).to_string(),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (_, body) = send_get(&router).await;
        let records: Vec<ScoreRecord> = serde_json::from_value(body).unwrap();
        assert_eq!(records.len(), 10);
        assert_eq!(records[0].score, 11);
        assert_eq!(records[9].score, 2);
    }

    #[tokio::test]
    async fn test_blank_player_name_is_rejected() {
        let store = MemoryScoreStore::default();
        let router = build_router(store.clone());

        let (status, body) =
            send_post(&router, json!({"player_name": "", "score": 5}).to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid player name");
        assert!(store.scores.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_overlong_player_name_is_rejected() {
        let router = build_router(MemoryScoreStore::default());
        let name = "x".repeat(51);
        let (status, body) =
            send_post(&router, json!({"player_name": name, "score": 5}).to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid player name");
    }

    #[tokio::test]
    async fn test_negative_score_is_rejected() {
        let router = build_router(MemoryScoreStore::default());
        let (status, body) =
            send_post(&router, json!({"player_name": "A", "score": -1}).to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid score");
    }

    #[tokio::test]
    async fn test_non_integer_score_is_rejected() {
        let router = build_router(MemoryScoreStore::default());
        let (status, _) =
            send_post(&router, json!({"player_name": "A", "score": 5.5}).to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_fields_are_rejected() {
        let router = build_router(MemoryScoreStore::default());
        let (status, _) = send_post(&router, json!({"score": 5}).to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = send_post(&router, json!({"player_name": "A"}).to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_invalid_json_body_is_rejected() {
        let router = build_router(MemoryScoreStore::default());
        let (status, body) = send_post(&router, "this is not json".to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid request body");
    }

    #[tokio::test]
    async fn test_zero_score_is_valid_server_side() {
        // The client drops zero scores before the request exists; the store
        // itself accepts them.
        let router = build_router(MemoryScoreStore::default());
        let (status, _) =
            send_post(&router, json!({"player_name": "A", "score": 0}).to_string()).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_player_name_is_trimmed_before_insert() {
        let store = MemoryScoreStore::default();
        let router = build_router(store.clone());
        let (status, _) = send_post(
            &router,
            json!({"player_name": "  Dave  ", "score": 3}).to_string(),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(store.scores.lock().unwrap()[0].player_name, "Dave");
    }

    #[tokio::test]
    async fn test_store_failure_maps_to_500_without_detail() {
        let router = build_router(FailingScoreStore);

        let (status, body) = send_get(&router).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to fetch high scores");

        let (status, body) =
            send_post(&router, json!({"player_name": "A", "score": 5}).to_string()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to save score");
    }
}
