//! Dashboard configuration.
//!
//! Values are layered lowest to highest: built-in screens and defaults,
//! then the TOML file, then `FLEETDASH_*` environment variables, then CLI
//! flags (applied by [`crate::cli::Args::apply`]).

mod file;
mod screens;

pub use file::{load_file, FileConfig, FileScreen, FileScreenKind};
pub use screens::{
    builtin_screens, dumpsters_screen, map_screen, trucks_screen, AlertRule, ScreenConfig,
    ScreenKind, DUMPSTER_OVERFLOW_LEVEL,
};

use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::poll::{PollConfig, PollConfigError};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/";
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(1000);

pub const ENV_BASE_URL: &str = "FLEETDASH_BASE_URL";
pub const ENV_POLL_MS: &str = "FLEETDASH_POLL_MS";
pub const ENV_TIMEOUT_MS: &str = "FLEETDASH_TIMEOUT_MS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("{0} must be greater than zero")]
    ZeroInterval(String),

    #[error("screen '{0}' is new and needs a url")]
    MissingScreenUrl(String),

    #[error("screen '{0}' is declared more than once")]
    DuplicateScreen(String),

    #[error("screen '{0}' must set both alert_key and alert_above")]
    IncompleteAlert(String),

    #[error("unknown screen '{id}' (available: {available})")]
    UnknownScreen { id: String, available: String },

    #[error("no screens configured")]
    NoScreens,

    #[error("screen '{screen}': {source}")]
    Poll {
        screen: String,
        #[source]
        source: PollConfigError,
    },
}

/// Everything the dashboard needs to mount its screens.
#[derive(Debug, Clone, PartialEq)]
pub struct DashConfig {
    /// Prefix for screen URLs that are not absolute.
    pub base_url: String,
    /// Poll interval for screens without their own.
    pub interval: Duration,
    /// Per-request timeout. `None` leaves requests unbounded.
    pub http_timeout: Option<Duration>,
    pub screens: Vec<ScreenConfig>,
    pub log_file: Option<PathBuf>,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            interval: DEFAULT_INTERVAL,
            http_timeout: None,
            screens: builtin_screens(),
            log_file: None,
        }
    }
}

impl DashConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = Some(timeout);
        self
    }

    pub fn with_screens(mut self, screens: Vec<ScreenConfig>) -> Self {
        self.screens = screens;
        self
    }

    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    /// Built-ins, then `path` if given, otherwise the user config file if
    /// one exists, then the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        match path {
            Some(path) => config = config.merge_file(load_file(path)?)?,
            None => {
                if let Some(path) = default_config_path().filter(|p| p.exists()) {
                    tracing::debug!(path = %path.display(), "Loading user config");
                    config = config.merge_file(load_file(&path)?)?;
                }
            }
        }
        config.apply_env()
    }

    /// Apply `FLEETDASH_*` overrides from the process environment.
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup. Unparseable numbers are
    /// logged and ignored.
    pub fn apply_env_from<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            self.base_url = base_url;
        }
        if let Some(ms) = env_millis(&lookup, ENV_POLL_MS) {
            self.interval = file::interval_from_ms(ENV_POLL_MS, ms)?;
        }
        if let Some(ms) = env_millis(&lookup, ENV_TIMEOUT_MS) {
            self.http_timeout = Some(file::interval_from_ms(ENV_TIMEOUT_MS, ms)?);
        }
        Ok(self)
    }

    pub fn screen(&self, id: &str) -> Option<&ScreenConfig> {
        self.screens.iter().find(|s| s.id == id)
    }

    /// Keep only `ids`, in the order given. An empty list keeps everything.
    pub fn select_screens(mut self, ids: &[String]) -> Result<Self, ConfigError> {
        if ids.is_empty() {
            return Ok(self);
        }
        let mut selected = Vec::with_capacity(ids.len());
        for id in ids {
            let Some(screen) = self.screen(id) else {
                return Err(ConfigError::UnknownScreen {
                    id: id.clone(),
                    available: self.screen_ids().join(", "),
                });
            };
            if !selected.iter().any(|s: &ScreenConfig| &s.id == id) {
                selected.push(screen.clone());
            }
        }
        self.screens = selected;
        Ok(self)
    }

    pub fn screen_ids(&self) -> Vec<&str> {
        self.screens.iter().map(|s| s.id.as_str()).collect()
    }

    /// Absolute URLs pass through; anything else is joined onto `base_url`.
    pub fn resolve_url(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            return url.to_string();
        }
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            url.trim_start_matches('/')
        )
    }

    /// The immutable polling parameters for one screen.
    pub fn poll_config(&self, screen: &ScreenConfig) -> Result<PollConfig, ConfigError> {
        let interval = screen.interval.unwrap_or(self.interval);
        PollConfig::new(
            self.resolve_url(&screen.url),
            interval,
            screen.kind.payload_kind(),
        )
        .map(|config| config.with_label(screen.id.clone()))
        .map_err(|source| ConfigError::Poll {
            screen: screen.id.clone(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.screens.is_empty() {
            return Err(ConfigError::NoScreens);
        }
        if self.interval.is_zero() {
            return Err(ConfigError::ZeroInterval("interval".to_string()));
        }
        for screen in &self.screens {
            self.poll_config(screen)?;
        }
        Ok(())
    }
}

fn env_millis<F>(lookup: &F, key: &str) -> Option<u64>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<u64>() {
        Ok(ms) => Some(ms),
        Err(e) => {
            tracing::warn!(key, value = %raw, error = %e, "Ignoring invalid environment value");
            None
        }
    }
}

/// `~/.config/fleetdash/config.toml` or the platform equivalent.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("fleetdash").join("config.toml"))
}
