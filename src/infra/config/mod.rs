mod adapter;
mod app_config;
mod file_config;
mod loader;

pub use adapter::FileConfigAdapter;
pub use app_config::{
    AppConfig, ConfigOverrides, DisplayConfig, DisplayZone, LogConfig, PostsConfig, RemoteConfig,
};
pub use loader::{load, LoadedConfig};
