use std::thread;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::header::CONTENT_TYPE;
use hyper::{Method, Request};
use hyper_util::client::legacy::{Client, connect::HttpConnector};
use hyper_util::rt::TokioExecutor;
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};

use crate::leaderboard::LeaderboardEntry;
use crate::service::{RankedQuery, ScoreService, ServiceError};
use crate::settings::LeaderboardSettings;

#[derive(Debug, Serialize)]
struct SubmitBody {
    score: i64,
}

#[derive(Debug, Deserialize)]
struct RankedResponse {
    entries: Vec<LeaderboardEntry>,
}

enum ServiceCmd {
    Submit {
        leaderboard_id: String,
        score: i64,
        respond: oneshot::Sender<Result<(), ServiceError>>,
    },
    GetRanked {
        query: RankedQuery,
        respond: oneshot::Sender<Result<Vec<LeaderboardEntry>, ServiceError>>,
    },
}

type HttpClient = Client<HttpConnector, Full<Bytes>>;

/// `ScoreService` backed by an HTTP ranking service.
///
/// The game loop stays single-threaded: requests cross an mpsc channel to a
/// dedicated worker thread running its own tokio runtime, and each round
/// trip answers back on the oneshot the caller already holds. Dropping the
/// service shuts the worker down once in-flight requests finish.
pub struct HttpScoreService {
    tx: mpsc::UnboundedSender<ServiceCmd>,
}

impl HttpScoreService {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_string();
        let (tx, mut rx) = mpsc::unbounded_channel::<ServiceCmd>();

        thread::spawn(move || {
            let rt = tokio::runtime::Runtime::new().expect("score service tokio runtime");
            rt.block_on(async move {
                let client: HttpClient = Client::builder(TokioExecutor::new()).build_http();
                while let Some(cmd) = rx.recv().await {
                    let client = client.clone();
                    let base_url = base_url.clone();
                    tokio::spawn(async move {
                        match cmd {
                            ServiceCmd::Submit {
                                leaderboard_id,
                                score,
                                respond,
                            } => {
                                let result =
                                    submit_score(&client, &base_url, &leaderboard_id, score).await;
                                let _ = respond.send(result);
                            }
                            ServiceCmd::GetRanked { query, respond } => {
                                let result = get_ranked(&client, &base_url, &query).await;
                                let _ = respond.send(result);
                            }
                        }
                    });
                }
            });
        });

        Self { tx }
    }

    /// Build a service from settings; `None` when no service URL is
    /// configured, in which case the game simply runs without a leaderboard.
    pub fn from_settings(settings: &LeaderboardSettings) -> Option<Self> {
        settings.service_url.as_deref().map(Self::new)
    }
}

impl ScoreService for HttpScoreService {
    fn submit(
        &mut self,
        leaderboard_id: &str,
        score: i64,
    ) -> oneshot::Receiver<Result<(), ServiceError>> {
        let (respond, rx) = oneshot::channel();
        let cmd = ServiceCmd::Submit {
            leaderboard_id: leaderboard_id.to_string(),
            score,
            respond,
        };
        if let Err(send_err) = self.tx.send(cmd) {
            if let ServiceCmd::Submit { respond, .. } = send_err.0 {
                let _ = respond.send(Err(ServiceError::Unavailable(
                    "score service worker stopped".into(),
                )));
            }
        }
        rx
    }

    fn get_ranked(
        &mut self,
        query: RankedQuery,
    ) -> oneshot::Receiver<Result<Vec<LeaderboardEntry>, ServiceError>> {
        let (respond, rx) = oneshot::channel();
        let cmd = ServiceCmd::GetRanked { query, respond };
        if let Err(send_err) = self.tx.send(cmd) {
            if let ServiceCmd::GetRanked { respond, .. } = send_err.0 {
                let _ = respond.send(Err(ServiceError::Unavailable(
                    "score service worker stopped".into(),
                )));
            }
        }
        rx
    }
}

async fn submit_score(
    client: &HttpClient,
    base_url: &str,
    leaderboard_id: &str,
    score: i64,
) -> Result<(), ServiceError> {
    let uri = format!("{base_url}/v1/leaderboards/{leaderboard_id}/scores");
    let body = serde_json::to_vec(&SubmitBody { score })
        .map_err(|e| ServiceError::BadResponse(e.to_string()))?;
    let req = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Full::new(Bytes::from(body)))
        .map_err(|e| ServiceError::Unavailable(e.to_string()))?;

    let res = client
        .request(req)
        .await
        .map_err(|e| ServiceError::Unavailable(e.to_string()))?;
    if !res.status().is_success() {
        return Err(ServiceError::Unavailable(format!(
            "submit answered {}",
            res.status()
        )));
    }
    Ok(())
}

async fn get_ranked(
    client: &HttpClient,
    base_url: &str,
    query: &RankedQuery,
) -> Result<Vec<LeaderboardEntry>, ServiceError> {
    let uri = format!(
        "{base_url}/v1/leaderboards/{}?ascending={}&selfOnly={}&limit={}",
        query.leaderboard_id, query.ascending, query.self_only, query.limit
    );
    let req = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Full::new(Bytes::new()))
        .map_err(|e| ServiceError::Unavailable(e.to_string()))?;

    let res = client
        .request(req)
        .await
        .map_err(|e| ServiceError::Unavailable(e.to_string()))?;
    if !res.status().is_success() {
        return Err(ServiceError::Unavailable(format!(
            "ranked query answered {}",
            res.status()
        )));
    }

    let bytes = res
        .into_body()
        .collect()
        .await
        .map_err(|e| ServiceError::Unavailable(e.to_string()))?
        .to_bytes();
    let parsed: RankedResponse = serde_json::from_slice(&bytes)
        .map_err(|e| ServiceError::BadResponse(e.to_string()))?;
    Ok(parsed.entries)
}
