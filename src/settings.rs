use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::obstacle::{DEFAULT_RESET_DISTANCE, DEFAULT_SCROLL_SPEED, DEFAULT_WRAP_THRESHOLD};

pub const DEFAULT_LEADERBOARD_ID: &str = "dino-game-vr";
pub const DEFAULT_DISPLAY_COUNT: usize = 10;
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 400;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeaderboardSettings {
    pub leaderboard_id: String,
    pub display_count: usize,
    /// Wait between a confirmed submission and the forced refresh, so the
    /// remote ranking has a chance to include the new score.
    pub settle_delay_ms: u64,
    /// Base URL of the score service; `None` leaves the game without a
    /// leaderboard, which is a supported configuration.
    pub service_url: Option<String>,
}

impl Default for LeaderboardSettings {
    fn default() -> Self {
        Self {
            leaderboard_id: DEFAULT_LEADERBOARD_ID.to_string(),
            display_count: DEFAULT_DISPLAY_COUNT,
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            service_url: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TrackSettings {
    pub scroll_speed: f32,
    pub wrap_threshold: f32,
    pub reset_distance: f32,
}

impl Default for TrackSettings {
    fn default() -> Self {
        Self {
            scroll_speed: DEFAULT_SCROLL_SPEED,
            wrap_threshold: DEFAULT_WRAP_THRESHOLD,
            reset_distance: DEFAULT_RESET_DISTANCE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunnerSettings {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub leaderboard: LeaderboardSettings,
    #[serde(default)]
    pub track: TrackSettings,
}

impl Default for RunnerSettings {
    fn default() -> Self {
        Self {
            version: default_version(),
            leaderboard: LeaderboardSettings::default(),
            track: TrackSettings::default(),
        }
    }
}

impl RunnerSettings {
    pub fn sanitized(mut self) -> Self {
        self.version = default_version();
        if self.leaderboard.leaderboard_id.trim().is_empty() {
            self.leaderboard.leaderboard_id = DEFAULT_LEADERBOARD_ID.to_string();
        }
        self.leaderboard.display_count = self.leaderboard.display_count.clamp(1, 100);
        if !(self.track.scroll_speed > 0.0) {
            self.track.scroll_speed = DEFAULT_SCROLL_SPEED;
        }
        if !(self.track.reset_distance > 0.0) {
            self.track.reset_distance = DEFAULT_RESET_DISTANCE;
        }
        self
    }
}

fn default_version() -> u32 {
    1
}

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn from_env() -> Self {
        if let Some(explicit) = std::env::var_os("DINO_RUNNER_SETTINGS_PATH") {
            return Self {
                path: PathBuf::from(explicit),
            };
        }

        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var_os("HOME").map(|home| {
                    let mut p = PathBuf::from(home);
                    p.push(".config");
                    p
                })
            })
            .unwrap_or_else(|| PathBuf::from("."));

        let mut path = base;
        path.push("dino-runner");
        path.push("settings.json");
        Self { path }
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn load(&self) -> RunnerSettings {
        let Ok(bytes) = fs::read(&self.path) else {
            return RunnerSettings::default();
        };
        serde_json::from_slice::<RunnerSettings>(&bytes)
            .map(RunnerSettings::sanitized)
            .unwrap_or_else(|_| RunnerSettings::default())
    }

    pub fn save(&self, settings: &RunnerSettings) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(settings)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, text)
    }
}
