use std::path::Path;

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;

use crate::{
    infra::{
        self,
        config::{ConfigOverrides, FileConfigAdapter},
        contracts::ConfigAdapter,
    },
    remote::HttpChannel,
    usecases::{context::AppContext, coordinator::Coordinator},
};

const CONFIG_FALLBACK: &str = "CONFIG_FALLBACK";

/// Loads configuration and installs logging. The guard must outlive every
/// log call when logging goes to a file.
pub fn bootstrap(
    config_path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<(AppContext, Option<WorkerGuard>)> {
    let context = build_context(&FileConfigAdapter::new(config_path), overrides)?;
    let guard = infra::logging::init(&context.config.logging)?;

    tracing::debug!(source = ?context.config_source, "configuration loaded");
    for warning in &context.config_warnings {
        tracing::warn!(code = CONFIG_FALLBACK, "{warning}");
    }

    Ok((context, guard))
}

pub fn build_context(
    config_adapter: &dyn ConfigAdapter,
    overrides: &ConfigOverrides,
) -> Result<AppContext> {
    let loaded = config_adapter.load()?;

    let mut config = loaded.config;
    config.apply_overrides(overrides);

    Ok(AppContext::new(config, loaded.source, loaded.warnings))
}

/// Builds the coordinator over the HTTP channel configured in `context`.
pub fn compose_coordinator(context: &AppContext) -> Result<Coordinator<HttpChannel>> {
    let channel = HttpChannel::new(&context.config.remote)?;
    tracing::info!(endpoint = %channel.endpoint(), "remote channel ready");

    Ok(Coordinator::new(channel, context.config.posts.max_posts))
}
