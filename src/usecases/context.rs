use std::path::PathBuf;

use crate::infra::config::AppConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppContext {
    pub config: AppConfig,
    pub config_source: Option<PathBuf>,
    pub config_warnings: Vec<String>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        config_source: Option<PathBuf>,
        config_warnings: Vec<String>,
    ) -> Self {
        Self {
            config,
            config_source,
            config_warnings,
        }
    }
}
