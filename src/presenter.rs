use crate::leaderboard::Mode;
use crate::sfx::Cue;

/// Presentation collaborators consumed by the core.
///
/// The core calls these and never looks back: text panels, the reset prompt,
/// haptics and audio are all external. Implementations must not call back
/// into the world from inside a hook.
pub trait Presenter {
    fn show_reset_prompt(&mut self, visible: bool);
    fn set_score_text(&mut self, value: i64);
    fn set_highest_score_text(&mut self, value: i64);
    fn set_last_score_text(&mut self, value: i64);
    fn set_mode_indicator(&mut self, mode: Mode);
    fn show_leaderboard_loading(&mut self, mode: Mode);
    fn render_leaderboard_columns(&mut self, ranks: &[u32], names: &[String], scores: &[i64]);
    fn clear_leaderboard(&mut self);

    // Fire-and-forget; default to nothing for headless presenters.
    fn haptic_pulse(&mut self, _strength: f32, _duration_ms: u32) {}
    fn play_cue(&mut self, _cue: Cue) {}
}

/// Presenter that swallows everything, for headless runs and benchmarks.
#[derive(Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn show_reset_prompt(&mut self, _visible: bool) {}
    fn set_score_text(&mut self, _value: i64) {}
    fn set_highest_score_text(&mut self, _value: i64) {}
    fn set_last_score_text(&mut self, _value: i64) {}
    fn set_mode_indicator(&mut self, _mode: Mode) {}
    fn show_leaderboard_loading(&mut self, _mode: Mode) {}
    fn render_leaderboard_columns(&mut self, _ranks: &[u32], _names: &[String], _scores: &[i64]) {}
    fn clear_leaderboard(&mut self) {}
}
