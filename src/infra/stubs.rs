use anyhow::Result;

use crate::infra::{config::LoadedConfig, contracts::ConfigAdapter};

/// Config source that always yields the given configuration.
#[derive(Debug, Clone, Default)]
pub struct StubConfigAdapter {
    pub loaded: LoadedConfig,
}

impl ConfigAdapter for StubConfigAdapter {
    fn load(&self) -> Result<LoadedConfig> {
        Ok(self.loaded.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::config::AppConfig;

    #[test]
    fn stub_config_returns_defaults() {
        let adapter = StubConfigAdapter::default();
        let loaded = adapter.load().expect("stub config must load");

        assert_eq!(loaded.config, AppConfig::default());
        assert!(loaded.warnings.is_empty());
    }
}
