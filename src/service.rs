use std::collections::VecDeque;
use std::fmt;

use tokio::sync::oneshot;

use crate::leaderboard::LeaderboardEntry;

/// Why a remote round trip produced no data. Never fatal: the worst outcome
/// of any of these is an empty leaderboard panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The service could not be reached or answered outside 2xx.
    Unavailable(String),
    /// The service answered but the payload did not parse.
    BadResponse(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Unavailable(msg) => write!(f, "score service unavailable: {msg}"),
            ServiceError::BadResponse(msg) => write!(f, "score service bad response: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {}

/// Parameters of a ranked-list request, mirroring the remote contract:
/// leaderboard id, sort direction, an optional self-only filter and a row
/// limit. The self-only ranking semantics are the service's business.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedQuery {
    pub leaderboard_id: String,
    pub ascending: bool,
    pub self_only: bool,
    pub limit: usize,
}

/// The opaque remote ranking service.
///
/// Both operations return immediately with a `oneshot::Receiver`; the round
/// trip completes out-of-band and the caller polls the receiver from the
/// game tick with `try_recv`. Dropping the receiver abandons the request
/// (there is no explicit cancellation).
pub trait ScoreService {
    fn submit(
        &mut self,
        leaderboard_id: &str,
        score: i64,
    ) -> oneshot::Receiver<Result<(), ServiceError>>;

    fn get_ranked(
        &mut self,
        query: RankedQuery,
    ) -> oneshot::Receiver<Result<Vec<LeaderboardEntry>, ServiceError>>;
}

enum DebugReply {
    Submit(oneshot::Sender<Result<(), ServiceError>>),
    Ranked {
        query: RankedQuery,
        respond: oneshot::Sender<Result<Vec<LeaderboardEntry>, ServiceError>>,
    },
}

/// In-process stand-in for the remote service.
///
/// Requests queue up unanswered until `complete_next`/`complete_all` is
/// called, so callers can decide exactly when and in which order responses
/// land. Submitted scores are recorded.
pub struct DebugScoreService {
    entries: Vec<LeaderboardEntry>,
    pending: VecDeque<DebugReply>,
    submitted: Vec<i64>,
    fail_requests: bool,
}

impl DebugScoreService {
    pub fn new(entries: Vec<LeaderboardEntry>) -> Self {
        Self {
            entries,
            pending: VecDeque::new(),
            submitted: Vec::new(),
            fail_requests: false,
        }
    }

    pub fn with_canned_entries() -> Self {
        let names = [
            ("User", 100_000),
            ("Player", 78),
            ("Bot", 34),
            ("Debugger", 12),
            ("Test", 2),
        ];
        let entries = names
            .iter()
            .enumerate()
            .map(|(rank, (name, score))| LeaderboardEntry {
                rank: rank as u32,
                display_name: (*name).to_string(),
                score: *score,
            })
            .collect();
        Self::new(entries)
    }

    /// Make every queued and future request resolve as unreachable.
    pub fn set_fail_requests(&mut self, fail: bool) {
        self.fail_requests = fail;
    }

    pub fn submitted(&self) -> &[i64] {
        &self.submitted
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Resolve the oldest outstanding request. Returns false when nothing
    /// was pending.
    pub fn complete_next(&mut self) -> bool {
        let Some(reply) = self.pending.pop_front() else {
            return false;
        };
        match reply {
            DebugReply::Submit(respond) => {
                let result = if self.fail_requests {
                    Err(ServiceError::Unavailable("debug service offline".into()))
                } else {
                    Ok(())
                };
                let _ = respond.send(result);
            }
            DebugReply::Ranked { query, respond } => {
                let result = if self.fail_requests {
                    Err(ServiceError::Unavailable("debug service offline".into()))
                } else {
                    let mut entries: Vec<LeaderboardEntry> = if query.self_only {
                        self.entries
                            .iter()
                            .filter(|e| e.display_name == "User")
                            .cloned()
                            .collect()
                    } else {
                        self.entries.clone()
                    };
                    entries.truncate(query.limit);
                    Ok(entries)
                };
                let _ = respond.send(result);
            }
        }
        true
    }

    pub fn complete_all(&mut self) {
        while self.complete_next() {}
    }
}

impl ScoreService for DebugScoreService {
    fn submit(
        &mut self,
        _leaderboard_id: &str,
        score: i64,
    ) -> oneshot::Receiver<Result<(), ServiceError>> {
        self.submitted.push(score);
        let (tx, rx) = oneshot::channel();
        self.pending.push_back(DebugReply::Submit(tx));
        rx
    }

    fn get_ranked(
        &mut self,
        query: RankedQuery,
    ) -> oneshot::Receiver<Result<Vec<LeaderboardEntry>, ServiceError>> {
        let (tx, rx) = oneshot::channel();
        self.pending.push_back(DebugReply::Ranked { query, respond: tx });
        rx
    }
}
