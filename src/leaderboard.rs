use serde::{Deserialize, Serialize};
use tokio::sync::oneshot::{self, error::TryRecvError};

use crate::presenter::Presenter;
use crate::service::{RankedQuery, ScoreService, ServiceError};
use crate::settings::LeaderboardSettings;
use crate::sfx::Cue;

/// Which of the two leaderboard views is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mode {
    World,
    Player,
}

impl Mode {
    pub fn toggled(self) -> Mode {
        match self {
            Mode::World => Mode::Player,
            Mode::Player => Mode::World,
        }
    }
}

/// One row of a ranked listing, exactly as the remote service returned it.
/// Ranks are 0-based on the wire; display adds 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub display_name: String,
    pub score: i64,
}

struct PendingFetch {
    mode: Mode,
    rx: oneshot::Receiver<Result<Vec<LeaderboardEntry>, ServiceError>>,
}

/// Cached, race-guarded view over the remote ranking service.
///
/// Snapshots for the two modes are cached independently; a non-absent
/// snapshot is always verbatim from the last successful fetch of that mode.
/// Completed fetches always update the cache, but only drive the display
/// when their mode is still the active one, so a slow response for a view
/// the user toggled away from can never overwrite the visible listing.
pub struct LeaderboardCache<S: ScoreService> {
    service: S,
    settings: LeaderboardSettings,
    mode: Mode,
    world: Option<Vec<LeaderboardEntry>>,
    player: Option<Vec<LeaderboardEntry>>,
    pending_fetches: Vec<PendingFetch>,
    pending_submit: Option<oneshot::Receiver<Result<(), ServiceError>>>,
    refresh_in: Option<f32>,
}

impl<S: ScoreService> LeaderboardCache<S> {
    pub fn new(service: S, settings: LeaderboardSettings) -> Self {
        Self {
            service,
            settings,
            mode: Mode::World,
            world: None,
            player: None,
            pending_fetches: Vec::new(),
            pending_submit: None,
            refresh_in: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn cached(&self, mode: Mode) -> Option<&[LeaderboardEntry]> {
        match mode {
            Mode::World => self.world.as_deref(),
            Mode::Player => self.player.as_deref(),
        }
    }

    pub fn pending_fetches(&self) -> usize {
        self.pending_fetches.len()
    }

    pub fn refresh_scheduled(&self) -> bool {
        self.refresh_in.is_some()
    }

    pub fn service_mut(&mut self) -> &mut S {
        &mut self.service
    }

    /// Resolve a listing for `mode`: from cache when allowed, otherwise via
    /// a remote round trip whose completion lands in a later `poll`.
    pub fn fetch(&mut self, mode: Mode, force_refresh: bool, presenter: &mut dyn Presenter) {
        if !force_refresh {
            if let Some(entries) = self.cached(mode) {
                let entries = entries.to_vec();
                self.render(&entries, presenter);
                return;
            }
        }

        if mode == self.mode {
            presenter.show_leaderboard_loading(mode);
        }
        let rx = self.service.get_ranked(RankedQuery {
            leaderboard_id: self.settings.leaderboard_id.clone(),
            ascending: true,
            self_only: mode == Mode::Player,
            limit: self.settings.display_count,
        });
        self.pending_fetches.push(PendingFetch { mode, rx });
    }

    /// Send a finished run's score to the service.
    ///
    /// Both cached snapshots are dropped before the request leaves, so any
    /// fetch issued from here on goes remote and cannot observe the
    /// pre-submission listing. The forced refresh is deferred by the settle
    /// delay to give the remote ranking time to include the new score.
    pub fn submit(&mut self, score: i64, presenter: &mut dyn Presenter) {
        self.world = None;
        self.player = None;
        presenter.set_last_score_text(score);
        self.pending_submit = Some(self.service.submit(&self.settings.leaderboard_id, score));
    }

    /// Flip the active view and resolve a listing for it.
    pub fn toggle_mode(&mut self, presenter: &mut dyn Presenter) {
        self.mode = self.mode.toggled();
        presenter.set_mode_indicator(self.mode);
        presenter.play_cue(Cue::Select);
        self.fetch(self.mode, false, presenter);
    }

    /// Drain completed round trips and the post-submission settle timer.
    /// Called once per game tick with elapsed seconds.
    pub fn poll(&mut self, dt: f32, presenter: &mut dyn Presenter) {
        self.poll_submit_ack();
        self.poll_refresh_timer(dt, presenter);
        self.poll_fetches(presenter);
    }

    fn poll_submit_ack(&mut self) {
        let Some(rx) = self.pending_submit.as_mut() else {
            return;
        };
        match rx.try_recv() {
            Ok(Ok(())) => {
                self.pending_submit = None;
                self.refresh_in = Some(self.settings.settle_delay_ms as f32 / 1000.0);
            }
            Ok(Err(err)) => {
                self.pending_submit = None;
                eprintln!("leaderboard submit failed: {err}");
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Closed) => {
                self.pending_submit = None;
                eprintln!("leaderboard submit dropped without a reply");
            }
        }
    }

    fn poll_refresh_timer(&mut self, dt: f32, presenter: &mut dyn Presenter) {
        let Some(remaining) = self.refresh_in else {
            return;
        };
        let remaining = remaining - dt;
        if remaining > 0.0 {
            self.refresh_in = Some(remaining);
            return;
        }
        self.refresh_in = None;
        let mode = self.mode;
        self.fetch(mode, true, presenter);
    }

    fn poll_fetches(&mut self, presenter: &mut dyn Presenter) {
        let mut completed = Vec::new();
        self.pending_fetches.retain_mut(|pending| {
            match pending.rx.try_recv() {
                Ok(result) => {
                    completed.push((pending.mode, result));
                    false
                }
                Err(TryRecvError::Empty) => true,
                Err(TryRecvError::Closed) => {
                    completed.push((
                        pending.mode,
                        Err(ServiceError::Unavailable("service went away".into())),
                    ));
                    false
                }
            }
        });

        for (mode, result) in completed {
            self.finish_fetch(mode, result, presenter);
        }
    }

    fn finish_fetch(
        &mut self,
        mode: Mode,
        result: Result<Vec<LeaderboardEntry>, ServiceError>,
        presenter: &mut dyn Presenter,
    ) {
        match result {
            Ok(mut entries) => {
                entries.truncate(self.settings.display_count);
                let snapshot = entries.clone();
                match mode {
                    Mode::World => self.world = Some(entries),
                    Mode::Player => self.player = Some(entries),
                }
                // Stale-response gate: the cache write above always happens,
                // the display only follows for the still-active mode.
                if mode == self.mode {
                    self.render(&snapshot, presenter);
                }
            }
            Err(err) => {
                eprintln!("leaderboard fetch ({mode:?}) failed: {err}");
                if mode == self.mode {
                    presenter.clear_leaderboard();
                }
            }
        }
    }

    fn render(&self, entries: &[LeaderboardEntry], presenter: &mut dyn Presenter) {
        let ranks: Vec<u32> = entries.iter().map(|e| e.rank + 1).collect();
        let names: Vec<String> = entries
            .iter()
            .map(|e| {
                if e.display_name.is_empty() {
                    "unknown".to_string()
                } else {
                    e.display_name.clone()
                }
            })
            .collect();
        let scores: Vec<i64> = entries.iter().map(|e| e.score).collect();
        presenter.render_leaderboard_columns(&ranks, &names, &scores);
    }
}
