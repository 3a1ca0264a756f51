use anyhow::Result;

use crate::{
    cli::{Cli, Command},
    domain, infra,
    infra::config::DisplayZone,
    remote::{self, RemoteChannel},
    ui::{self, message_rendering::render_posts, terminal::StdTerminal},
    usecases::{self, bootstrap, coordinator::Coordinator},
};

pub fn run(cli: Cli) -> Result<()> {
    let (context, _log_guard) = bootstrap::bootstrap(cli.config.as_deref(), &cli.overrides())?;

    tracing::debug!(
        ui = ui::module_name(),
        domain = domain::module_name(),
        remote = remote::module_name(),
        usecases = usecases::module_name(),
        infra = infra::module_name(),
        "module boundaries loaded"
    );

    let mut coordinator = bootstrap::compose_coordinator(&context)?;

    match cli.command_or_default() {
        Command::Run => {
            let mut terminal = StdTerminal;
            ui::shell::start(&mut terminal, &mut coordinator, &context.config.display)?;
        }
        Command::Posts { count } => {
            let rendered = fetch_posts(&mut coordinator, count, context.config.display.timezone)?;
            println!("{rendered}");
        }
    }

    Ok(())
}

/// One-shot listing. A failure is returned so the process exits non-zero.
fn fetch_posts<C: RemoteChannel>(
    coordinator: &mut Coordinator<C>,
    count: Option<u64>,
    zone: DisplayZone,
) -> Result<String> {
    match coordinator.list_posts(count.unwrap_or(0)) {
        Ok(posts) => Ok(render_posts(&posts, zone)),
        Err(failure) => {
            tracing::error!(
                code = failure.kind().as_label(),
                error = %failure,
                "listing posts failed"
            );
            Err(failure.into())
        }
    }
}
