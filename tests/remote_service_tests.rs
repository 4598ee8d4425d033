use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use dino_runner::remote::HttpScoreService;
use dino_runner::service::{RankedQuery, ScoreService, ServiceError};
use dino_runner::settings::LeaderboardSettings;

#[derive(Clone, Default)]
struct StubState {
    submitted: Arc<Mutex<Vec<(String, i64)>>>,
    queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

async fn ranked(
    Path(_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    State(state): State<StubState>,
) -> Json<Value> {
    let self_only = params.get("selfOnly").map(String::as_str) == Some("true");
    state.queries.lock().unwrap().push(params);

    let entries = if self_only {
        json!([{ "rank": 4, "displayName": "You", "score": 21 }])
    } else {
        json!([
            { "rank": 0, "displayName": "Ada", "score": 910 },
            { "rank": 1, "displayName": "Grace", "score": 480 },
            { "rank": 2, "displayName": "", "score": 77 },
        ])
    };
    Json(json!({ "entries": entries }))
}

async fn submit(
    Path(id): Path<String>,
    State(state): State<StubState>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let score = body["score"].as_i64().unwrap_or(0);
    state.submitted.lock().unwrap().push((id, score));
    Json(json!({ "ok": true }))
}

/// Serve the stub leaderboard API on a free loopback port.
fn start_stub() -> (SocketAddr, StubState) {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
    listener.set_nonblocking(true).expect("nonblocking listener");
    let addr = listener.local_addr().expect("stub local addr");

    let state = StubState::default();
    let routes_state = state.clone();
    thread::spawn(move || {
        let rt = tokio::runtime::Runtime::new().expect("stub tokio runtime");
        rt.block_on(async move {
            let listener =
                tokio::net::TcpListener::from_std(listener).expect("stub listener should convert");
            let app = Router::new()
                .route("/v1/leaderboards/:id", get(ranked))
                .route("/v1/leaderboards/:id/scores", post(submit))
                .with_state(routes_state);
            if let Err(err) = axum::serve(listener, app).await {
                eprintln!("stub leaderboard server error: {err}");
            }
        });
    });

    (addr, state)
}

fn world_query() -> RankedQuery {
    RankedQuery {
        leaderboard_id: "dino-game-vr".into(),
        ascending: true,
        self_only: false,
        limit: 10,
    }
}

#[test]
fn ranked_round_trip_parses_the_wire_format() {
    let (addr, _state) = start_stub();
    let mut svc = HttpScoreService::new(format!("http://{addr}"));

    let rx = svc.get_ranked(world_query());
    let entries = rx
        .blocking_recv()
        .expect("worker should answer")
        .expect("stub should succeed");

    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].rank, 0);
    assert_eq!(entries[0].display_name, "Ada");
    assert_eq!(entries[0].score, 910);
    assert_eq!(entries[2].display_name, "");
}

#[test]
fn ranked_query_parameters_travel_on_the_url() {
    let (addr, state) = start_stub();
    let mut svc = HttpScoreService::new(format!("http://{addr}"));

    let rx = svc.get_ranked(RankedQuery {
        leaderboard_id: "dino-game-vr".into(),
        ascending: true,
        self_only: true,
        limit: 10,
    });
    let entries = rx.blocking_recv().unwrap().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].display_name, "You");

    let queries = state.queries.lock().unwrap();
    let params = queries.last().expect("stub saw the query");
    assert_eq!(params.get("ascending").map(String::as_str), Some("true"));
    assert_eq!(params.get("selfOnly").map(String::as_str), Some("true"));
    assert_eq!(params.get("limit").map(String::as_str), Some("10"));
}

#[test]
fn submit_posts_the_score_to_the_right_leaderboard() {
    let (addr, state) = start_stub();
    let mut svc = HttpScoreService::new(format!("http://{addr}"));

    let rx = svc.submit("dino-game-vr", 137);
    rx.blocking_recv()
        .expect("worker should answer")
        .expect("stub should ack");

    let deadline = Instant::now() + Duration::from_secs(2);
    loop {
        {
            let submitted = state.submitted.lock().unwrap();
            if !submitted.is_empty() {
                assert_eq!(submitted[0], ("dino-game-vr".to_string(), 137));
                break;
            }
        }
        assert!(Instant::now() < deadline, "stub never saw the submission");
        thread::sleep(Duration::from_millis(10));
    }
}

#[test]
fn unreachable_service_resolves_to_unavailable_not_a_panic() {
    // Nothing listens on port 9; connections fail fast.
    let mut svc = HttpScoreService::new("http://127.0.0.1:9");

    let rx = svc.get_ranked(world_query());
    let result = rx.blocking_recv().expect("worker should answer");
    assert!(matches!(result, Err(ServiceError::Unavailable(_))));

    let rx = svc.submit("dino-game-vr", 1);
    let result = rx.blocking_recv().expect("worker should answer");
    assert!(matches!(result, Err(ServiceError::Unavailable(_))));
}

#[test]
fn from_settings_requires_a_service_url() {
    assert!(HttpScoreService::from_settings(&LeaderboardSettings::default()).is_none());

    let settings = LeaderboardSettings {
        service_url: Some("http://127.0.0.1:9".into()),
        ..LeaderboardSettings::default()
    };
    assert!(HttpScoreService::from_settings(&settings).is_some());
}
