use std::path::PathBuf;

use serde::Deserialize;

use crate::infra::config::{
    AppConfig, DisplayConfig, DisplayZone, LogConfig, PostsConfig, RemoteConfig,
};

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    pub logging: Option<FileLogConfig>,
    pub remote: Option<FileRemoteConfig>,
    pub posts: Option<FilePostsConfig>,
    pub display: Option<FileDisplayConfig>,
}

impl FileConfig {
    /// Copies every valid file value into `config`. Invalid values keep the
    /// default and add a line to `warnings`.
    pub fn merge_into(self, config: &mut AppConfig, warnings: &mut Vec<String>) {
        if let Some(logging) = self.logging {
            logging.merge_into(&mut config.logging);
        }

        if let Some(remote) = self.remote {
            remote.merge_into(&mut config.remote, warnings);
        }

        if let Some(posts) = self.posts {
            posts.merge_into(&mut config.posts, warnings);
        }

        if let Some(display) = self.display {
            display.merge_into(&mut config.display, warnings);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileLogConfig {
    pub level: Option<String>,
    pub file: Option<PathBuf>,
}

impl FileLogConfig {
    fn merge_into(self, config: &mut LogConfig) {
        if let Some(level) = self.level {
            config.level = level;
        }

        if let Some(file) = self.file {
            config.file = Some(file);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileRemoteConfig {
    pub endpoint: Option<String>,
    pub timeout_ms: Option<toml::Value>,
}

impl FileRemoteConfig {
    fn merge_into(self, config: &mut RemoteConfig, warnings: &mut Vec<String>) {
        if let Some(endpoint) = self.endpoint {
            config.endpoint = endpoint;
        }

        if let Some(raw) = self.timeout_ms {
            match positive_integer(&raw) {
                Some(timeout_ms) => config.timeout_ms = timeout_ms,
                None => warnings.push(format!(
                    "remote.timeout_ms must be a positive integer, got {raw}; using {}",
                    config.timeout_ms
                )),
            }
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FilePostsConfig {
    pub max_posts: Option<toml::Value>,
}

impl FilePostsConfig {
    fn merge_into(self, config: &mut PostsConfig, warnings: &mut Vec<String>) {
        if let Some(raw) = self.max_posts {
            match positive_integer(&raw) {
                Some(max_posts) => config.max_posts = max_posts,
                None => warnings.push(format!(
                    "posts.max_posts must be a positive integer, got {raw}; using {}",
                    config.max_posts
                )),
            }
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileDisplayConfig {
    pub timezone: Option<String>,
    pub clear_screen: Option<bool>,
}

impl FileDisplayConfig {
    fn merge_into(self, config: &mut DisplayConfig, warnings: &mut Vec<String>) {
        if let Some(raw) = self.timezone {
            match DisplayZone::parse(&raw) {
                Some(zone) => config.timezone = zone,
                None => warnings.push(format!(
                    "display.timezone must be \"utc\" or \"local\", got {raw:?}; using utc"
                )),
            }
        }

        if let Some(clear_screen) = self.clear_screen {
            config.clear_screen = clear_screen;
        }
    }
}

/// Accepts integers and numeric strings, so `max_posts = "50"` still works.
fn positive_integer(value: &toml::Value) -> Option<u64> {
    match value {
        toml::Value::Integer(number) => u64::try_from(*number).ok(),
        toml::Value::String(text) => text.trim().parse::<u64>().ok(),
        _ => None,
    }
    .filter(|number| *number > 0)
}
