/// Haptic pulse tuning shared by the button collaborators (strength 0.0..=1.0,
/// duration in milliseconds).
pub const HOVER_PULSE_STRENGTH: f32 = 0.5;
pub const HOVER_PULSE_MS: u32 = 50;
pub const PRESS_PULSE_STRENGTH: f32 = 1.0;
pub const PRESS_PULSE_MS: u32 = 20;
pub const RELEASE_PULSE_STRENGTH: f32 = 0.7;
pub const RELEASE_PULSE_MS: u32 = 20;
pub const UNHOVER_PULSE_STRENGTH: f32 = 0.3;
pub const UNHOVER_PULSE_MS: u32 = 50;

/// Audio cues the core fires at the presentation layer. Playback itself is
/// the presenter's problem; the core never waits on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Select,
}
