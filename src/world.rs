use crate::leaderboard::LeaderboardCache;
use crate::obstacle::ObstacleScroller;
use crate::player::PlayerControl;
use crate::presenter::Presenter;
use crate::service::ScoreService;
use crate::session::{EventQueue, GameEvent, Session};
use crate::settings::RunnerSettings;

/// The gameplay core: player, obstacles, leaderboard and the shared session
/// context, advanced by a fixed per-frame tick.
///
/// External collaborators (input, physics, UI buttons) push `GameEvent`s at
/// any time; they take effect at the top of the next tick, in arrival order.
pub struct GameWorld<S: ScoreService> {
    session: Session,
    player: PlayerControl,
    obstacles: Vec<ObstacleScroller>,
    leaderboard: Option<LeaderboardCache<S>>,
    events: EventQueue,
}

impl<S: ScoreService> GameWorld<S> {
    pub fn new(service: Option<S>, settings: &RunnerSettings, obstacle_starts: &[f32]) -> Self {
        let track = settings.track;
        let obstacles = obstacle_starts
            .iter()
            .map(|&start| {
                ObstacleScroller::new(start).with_track(
                    track.scroll_speed,
                    track.wrap_threshold,
                    track.reset_distance,
                )
            })
            .collect();

        Self {
            session: Session::new(),
            player: PlayerControl::new(),
            obstacles,
            leaderboard: service
                .map(|svc| LeaderboardCache::new(svc, settings.leaderboard.clone())),
            events: EventQueue::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn player(&self) -> &PlayerControl {
        &self.player
    }

    pub fn obstacles(&self) -> &[ObstacleScroller] {
        &self.obstacles
    }

    pub fn leaderboard(&self) -> Option<&LeaderboardCache<S>> {
        self.leaderboard.as_ref()
    }

    pub fn leaderboard_mut(&mut self) -> Option<&mut LeaderboardCache<S>> {
        self.leaderboard.as_mut()
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// One frame: drain queued events, then advance the player, every
    /// obstacle (while a run is live) and the leaderboard's async plumbing.
    pub fn tick(&mut self, dt: f32, presenter: &mut dyn Presenter) {
        while let Some(event) = self.events.pop() {
            self.apply_event(event, presenter);
        }

        self.player.tick(dt, presenter);

        if !self.session.is_game_over() {
            for obstacle in &mut self.obstacles {
                obstacle.tick(dt);
            }
        }

        if let Some(leaderboard) = self.leaderboard.as_mut() {
            leaderboard.poll(dt, presenter);
        }
    }

    fn apply_event(&mut self, event: GameEvent, presenter: &mut dyn Presenter) {
        match event {
            GameEvent::JumpPressed => {
                if !self.session.is_game_over() {
                    self.player.press_jump();
                }
            }
            GameEvent::Collision(phase) => {
                let report = self.player.on_collision(phase, &mut self.session, presenter);
                if let Some(report) = report {
                    // No leaderboard wired up means the submission side
                    // effect is simply skipped.
                    if report.new_highest {
                        if let Some(leaderboard) = self.leaderboard.as_mut() {
                            leaderboard.submit(report.final_score, presenter);
                        }
                    }
                }
            }
            GameEvent::ResetRequested => {
                self.session.clear_game_over();
                self.player.reset(presenter);
                for obstacle in &mut self.obstacles {
                    obstacle.reset();
                }
            }
            GameEvent::ToggleLeaderboardMode => {
                if let Some(leaderboard) = self.leaderboard.as_mut() {
                    leaderboard.toggle_mode(presenter);
                }
            }
        }
    }
}
