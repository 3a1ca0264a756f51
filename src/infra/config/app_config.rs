use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_POSTS: u64 = 100;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AppConfig {
    pub logging: LogConfig,
    pub remote: RemoteConfig,
    pub posts: PostsConfig,
    pub display: DisplayConfig,
}

impl AppConfig {
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(endpoint) = &overrides.endpoint {
            self.remote.endpoint = endpoint.clone();
        }

        if let Some(max_posts) = overrides.max_posts.filter(|value| *value > 0) {
            self.posts.max_posts = max_posts;
        }

        if overrides.debug {
            self.logging.level = "debug".to_owned();
        }
    }
}

/// Values supplied on the command line; they win over the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub endpoint: Option<String>,
    pub max_posts: Option<u64>,
    pub debug: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_owned(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RemoteConfig {
    pub endpoint: String,
    pub timeout_ms: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:3000".to_owned(),
            timeout_ms: 10_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostsConfig {
    pub max_posts: u64,
}

impl Default for PostsConfig {
    fn default() -> Self {
        Self {
            max_posts: DEFAULT_MAX_POSTS,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DisplayZone {
    #[default]
    Utc,
    Local,
}

impl DisplayZone {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "utc" => Some(Self::Utc),
            "local" => Some(Self::Local),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct DisplayConfig {
    pub timezone: DisplayZone,
    pub clear_screen: bool,
}
