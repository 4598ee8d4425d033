use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Which phase of a physics contact an event describes.
///
/// Only `Begin` is acted on; `Persist` events from an ongoing contact are
/// dropped so a single obstacle hit cannot trigger game over twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactPhase {
    Begin,
    Persist,
}

/// Events fed into the world from input, physics and UI collaborators.
///
/// Callbacks are not executed re-entrantly; everything is queued here and
/// drained once at the top of each tick, which keeps ordering deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    JumpPressed,
    Collision(ContactPhase),
    ResetRequested,
    ToggleLeaderboardMode,
}

#[derive(Debug, Default)]
pub struct EventQueue {
    queue: VecDeque<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.queue.push_back(event);
    }

    pub fn pop(&mut self) -> Option<GameEvent> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Shared per-session context, passed by reference to every component that
/// needs it instead of living in ambient global state.
///
/// The game-over flag has a single writer by convention: the player state
/// machine sets it on collision, the reset path clears it. Everything else
/// only reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    game_over: bool,
}

impl Session {
    /// Sessions begin idle: nothing moves until the first reset signal.
    pub fn new() -> Self {
        Self { game_over: true }
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn set_game_over(&mut self) {
        self.game_over = true;
    }

    pub fn clear_game_over(&mut self) {
        self.game_over = false;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
