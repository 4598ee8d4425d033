use serde::{Deserialize, Serialize};

use crate::presenter::Presenter;
use crate::session::{ContactPhase, Session};

/// Points accrued per second while a run is live.
pub const SCORE_RATE: f32 = 13.0;
/// Upward speed while ascending (units/s).
pub const JUMP_SPEED: f32 = 5.5;
/// Downward speed while descending (units/s).
pub const FALL_SPEED: f32 = 4.5;
/// Height above ground at which the ascent tips over into a fall.
pub const APEX_HEIGHT: f32 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    Grounded,
    Jumping,
    Falling,
    GameOver,
}

/// What a run ended with; handed to the caller so it can decide whether the
/// leaderboard needs to hear about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub final_score: i64,
    pub new_highest: bool,
}

/// The player capsule's jump/score state machine.
///
/// One vertical degree of freedom: `height` rises at `JUMP_SPEED` until the
/// apex, falls at `FALL_SPEED` until ground contact. Sessions start in
/// `GameOver` and only a reset signal gets a run going.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerControl {
    state: PlayerState,
    height: f32,
    can_jump: bool,
    score: f32,
    highest_score: i64,
}

impl PlayerControl {
    pub fn new() -> Self {
        Self {
            state: PlayerState::GameOver,
            height: 0.0,
            can_jump: true,
            score: 0.0,
            highest_score: 0,
        }
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn can_jump(&self) -> bool {
        self.can_jump
    }

    pub fn score(&self) -> f32 {
        self.score
    }

    pub fn highest_score(&self) -> i64 {
        self.highest_score
    }

    /// Jump input from keyboard or XR select. Silently dropped unless the
    /// capsule is grounded and eligible; there is no error to report.
    pub fn press_jump(&mut self) {
        if self.state == PlayerState::Grounded && self.can_jump {
            self.state = PlayerState::Jumping;
        }
    }

    /// Advance score accrual and jump physics by `dt` seconds.
    pub fn tick(&mut self, dt: f32, presenter: &mut dyn Presenter) {
        if self.state == PlayerState::GameOver {
            return;
        }

        self.score += SCORE_RATE * dt;
        presenter.set_score_text(self.score.round() as i64);

        match self.state {
            PlayerState::Jumping => {
                self.height += JUMP_SPEED * dt;
                if self.height > APEX_HEIGHT {
                    self.state = PlayerState::Falling;
                    self.can_jump = false;
                }
            }
            PlayerState::Falling | PlayerState::Grounded => {
                if self.height > 0.0 {
                    self.state = PlayerState::Falling;
                    self.height -= FALL_SPEED * dt;
                } else {
                    self.height = 0.0;
                    self.state = PlayerState::Grounded;
                    self.can_jump = true;
                }
            }
            PlayerState::GameOver => {}
        }
    }

    /// Collision notification from the physics collaborator.
    ///
    /// Only the first touch of a contact counts; `Persist` events and
    /// collisions arriving after game over change nothing. Returns the run
    /// report when this call actually ended a run.
    pub fn on_collision(
        &mut self,
        phase: ContactPhase,
        session: &mut Session,
        presenter: &mut dyn Presenter,
    ) -> Option<RunReport> {
        if phase != ContactPhase::Begin || self.state == PlayerState::GameOver {
            return None;
        }

        self.state = PlayerState::GameOver;
        session.set_game_over();
        presenter.show_reset_prompt(true);

        let rounded = self.score.round() as i64;
        self.score = rounded as f32;

        let new_highest = rounded > self.highest_score;
        if new_highest {
            self.highest_score = rounded;
            presenter.set_highest_score_text(rounded);
        }

        Some(RunReport {
            final_score: rounded,
            new_highest,
        })
    }

    /// Reset signal: back to the ground with a zeroed run score. The highest
    /// score survives for the rest of the session.
    pub fn reset(&mut self, presenter: &mut dyn Presenter) {
        self.state = PlayerState::Grounded;
        self.height = 0.0;
        self.can_jump = true;
        self.score = 0.0;
        presenter.show_reset_prompt(false);
    }
}

impl Default for PlayerControl {
    fn default() -> Self {
        Self::new()
    }
}
