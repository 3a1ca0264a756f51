use anyhow::Result;

use crate::infra::config::LoadedConfig;

pub trait ConfigAdapter {
    fn load(&self) -> Result<LoadedConfig>;
}
