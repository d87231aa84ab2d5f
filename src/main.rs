use anyhow::Context;
use probe_table::{command, ProbeTable};
use std::io;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "warn";

fn init_logging() -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(DEFAULT_LOG_FILTER)?,
    };
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_level(true)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let mut table = ProbeTable::new();
    let summary = command::run(io::stdin().lock(), io::stdout().lock(), &mut table)
        .context("command stream aborted")?;

    debug!(
        executed = summary.executed,
        skipped = summary.skipped,
        live = table.len(),
        capacity = table.capacity(),
        "input exhausted"
    );
    Ok(())
}
