use crate::error::{PollinationsError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.pollinations.ai";
pub const DEFAULT_TEXT_BASE_URL: &str = "https://text.pollinations.ai";
pub const DEFAULT_DIMENSION: u32 = 1024;

/// Which response is kept when two submissions for the same form overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RacePolicy {
    /// Whichever response settles last overwrites the result.
    #[default]
    LastResolvedWins,
    /// Responses belonging to a superseded submission are dropped.
    LastSubmittedWins,
}

impl FromStr for RacePolicy {
    type Err = PollinationsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "last-resolved-wins" | "last-resolved" => Ok(RacePolicy::LastResolvedWins),
            "last-submitted-wins" | "last-submitted" => Ok(RacePolicy::LastSubmittedWins),
            other => Err(PollinationsError::ConfigError(format!(
                "Unknown race policy: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub image_base_url: String,
    pub text_base_url: String,
    pub timeout: Option<Duration>,
    pub race_policy: RacePolicy,
    pub default_width: u32,
    pub default_height: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            text_base_url: DEFAULT_TEXT_BASE_URL.to_string(),
            timeout: None,
            race_policy: RacePolicy::default(),
            default_width: DEFAULT_DIMENSION,
            default_height: DEFAULT_DIMENSION,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `POLLINATIONS_*` variables; anything unset keeps its default.
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();

        if let Ok(url) = env::var("POLLINATIONS_IMAGE_URL") {
            config.image_base_url = url;
        }
        if let Ok(url) = env::var("POLLINATIONS_TEXT_URL") {
            config.text_base_url = url;
        }
        if let Ok(secs) = env::var("POLLINATIONS_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                PollinationsError::ConfigError(format!(
                    "POLLINATIONS_TIMEOUT_SECS must be a whole number of seconds, got {:?}",
                    secs
                ))
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }
        if let Ok(policy) = env::var("POLLINATIONS_RACE_POLICY") {
            config.race_policy = policy.parse()?;
        }

        Ok(config)
    }

    pub fn with_image_base_url(mut self, url: impl Into<String>) -> Self {
        self.image_base_url = url.into();
        self
    }

    pub fn with_text_base_url(mut self, url: impl Into<String>) -> Self {
        self.text_base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_race_policy(mut self, policy: RacePolicy) -> Self {
        self.race_policy = policy;
        self
    }

    pub fn with_default_dimensions(mut self, width: u32, height: u32) -> Self {
        self.default_width = width;
        self.default_height = height;
        self
    }
}
