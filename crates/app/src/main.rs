//! pause-dialog - hand a decision to a human and report it back
//!
//! Usage:
//!   pause-dialog '{"decision_context": "...", "options": ["A", "B"], "default_action": "A"}'
//!   pause-dialog '<json>' --frontend web     Answer in the default browser
//!   pause-dialog '<json>' --format json      Print the answer as JSON
//!
//! Prints `CANCELLED` or `<response>|||<mode>` on standard output.

use anyhow::{Context, Result};
use clap::Parser;
use services::DataPaths;
use shared::settings::{DialogSettings, FrontendKind};
use shared::DecisionRequest;
use web::WebDialog;

mod cli;
mod modals;
mod window;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Standard output carries the answer, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let Some(payload) = cli.request.as_deref() else {
        println!("ERROR: No input provided");
        std::process::exit(1);
    };
    let request =
        DecisionRequest::from_json(payload).context("Could not read the decision request")?;

    let settings = DialogSettings::load();
    let paths = DataPaths::resolve(cli.data_dir.clone(), &settings);
    let session = services::open_session(request, &paths, &settings);

    let frontend = cli.frontend.map(FrontendKind::from).unwrap_or(settings.frontend);
    tracing::info!(?frontend, data_dir = ?paths.dir(), "Showing decision prompt");

    let outcome = match frontend {
        FrontendKind::Window => window::run_window(session, settings.recent_limit)?,
        FrontendKind::Web => WebDialog::bind(session, settings.recent_limit)?.run(!cli.no_browser)?,
    };

    println!("{}", outcome.encode_as(cli.format.into()));
    Ok(())
}
