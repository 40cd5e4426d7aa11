//! Headless run configuration.
use std::env;
use std::path::PathBuf;

/// Settings for one scripted skirmish.
#[derive(Clone, Debug)]
pub struct HeadlessConfig {
    /// Directory holding `config.toml`, `skills.ron` and friends.
    /// `None` uses the content bundled with `arena-content`.
    pub content_dir: Option<PathBuf>,
    pub ticks: u32,
    pub tick_ms: u32,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            content_dir: None,
            ticks: 600,
            tick_ms: 50,
        }
    }
}

impl HeadlessConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `ARENA_CONTENT_DIR` - content data directory (default: bundled)
    /// - `ARENA_TICKS` - number of steps to run (default: 600)
    /// - `ARENA_TICK_MS` - step length in milliseconds (default: 50)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("ARENA_CONTENT_DIR") {
            config.content_dir = Some(PathBuf::from(dir));
        }
        if let Some(ticks) = read_env::<u32>("ARENA_TICKS") {
            config.ticks = ticks;
        }
        if let Some(tick_ms) = read_env::<u32>("ARENA_TICK_MS") {
            config.tick_ms = tick_ms.max(1);
        }

        config
    }

    pub fn tick_seconds(&self) -> f32 {
        self.tick_ms as f32 / 1000.0
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
