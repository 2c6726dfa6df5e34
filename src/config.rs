// ABOUTME: Configuration module for the slide-deck library
// ABOUTME: Provides configuration settings and environment variable handling

use crate::input::InputConfig;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_DECK_PATH: &str = "deck.json";
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;
pub const DEFAULT_SWIPE_THRESHOLD: f32 = 50.0;
pub const DEFAULT_DECK_NAME: &str = "Presentation";

/// Global configuration for the application
#[derive(Debug, Clone)]
pub struct Config {
    pub deck_path: PathBuf,
    pub debounce_ms: u64,
    pub swipe_threshold: f32,
    pub deck_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            deck_path: PathBuf::from(DEFAULT_DECK_PATH),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
            deck_name: DEFAULT_DECK_NAME.to_string(),
        }
    }
}

impl Config {
    /// Create a new configuration instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let deck_path = env::var("DECK_PATH")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DECK_PATH));
        let debounce_ms = env::var("DECK_DEBOUNCE_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_DEBOUNCE_MS);
        let swipe_threshold = env::var("DECK_SWIPE_THRESHOLD")
            .ok()
            .and_then(|s| s.parse::<f32>().ok())
            .filter(|t| t.is_finite() && *t >= 0.0)
            .unwrap_or(DEFAULT_SWIPE_THRESHOLD);
        let deck_name =
            env::var("DECK_NAME").unwrap_or_else(|_| DEFAULT_DECK_NAME.to_string());

        Self {
            deck_path,
            debounce_ms,
            swipe_threshold,
            deck_name,
        }
    }

    /// Quiet period for debounced slide edits
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Get an input configuration for the presenter
    pub fn input_config(&self) -> InputConfig {
        InputConfig {
            swipe_threshold: self.swipe_threshold,
        }
    }
}
