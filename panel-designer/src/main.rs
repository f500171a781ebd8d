//! # Panel Designer
//!
//! Command-line entry point for the headless panel layout designer.

use anyhow::Context;
use clap::Parser;
use panel_designer::{run, CliArgs, DesignerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing subscriber.
///
/// Set `RUST_LOG_FORMAT=json` for JSON output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,panel_core=debug,panel_designer=debug"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = CliArgs::parse();
    let config = DesignerConfig::from(args);
    tracing::debug!("Designer config: {config:?}");

    let summary = run(&config).with_context(|| {
        format!(
            "Failed to produce layout document {}",
            config.output.display()
        )
    })?;

    tracing::info!(
        "Done: {} actions applied, {} ignored, {} undo steps",
        summary.applied,
        summary.ignored,
        summary.undo_depth
    );
    Ok(())
}
