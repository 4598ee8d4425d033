use dino_runner::leaderboard::Mode;
use dino_runner::presenter::Presenter;
use dino_runner::sfx::Cue;

/// Presenter that records every hook invocation for assertions.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub reset_prompt: Vec<bool>,
    pub score_texts: Vec<i64>,
    pub highest_texts: Vec<i64>,
    pub last_score_texts: Vec<i64>,
    pub mode_indicators: Vec<Mode>,
    pub loading_shown: Vec<Mode>,
    pub rendered: Vec<(Vec<u32>, Vec<String>, Vec<i64>)>,
    pub cleared: usize,
    pub cues: Vec<Cue>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_rendered(&self) -> Option<&(Vec<u32>, Vec<String>, Vec<i64>)> {
        self.rendered.last()
    }
}

impl Presenter for RecordingPresenter {
    fn show_reset_prompt(&mut self, visible: bool) {
        self.reset_prompt.push(visible);
    }

    fn set_score_text(&mut self, value: i64) {
        self.score_texts.push(value);
    }

    fn set_highest_score_text(&mut self, value: i64) {
        self.highest_texts.push(value);
    }

    fn set_last_score_text(&mut self, value: i64) {
        self.last_score_texts.push(value);
    }

    fn set_mode_indicator(&mut self, mode: Mode) {
        self.mode_indicators.push(mode);
    }

    fn show_leaderboard_loading(&mut self, mode: Mode) {
        self.loading_shown.push(mode);
    }

    fn render_leaderboard_columns(&mut self, ranks: &[u32], names: &[String], scores: &[i64]) {
        self.rendered
            .push((ranks.to_vec(), names.to_vec(), scores.to_vec()));
    }

    fn clear_leaderboard(&mut self) {
        self.cleared += 1;
    }

    fn play_cue(&mut self, cue: Cue) {
        self.cues.push(cue);
    }
}
