use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use services::{AppServices, Clock};
use storage::CatalogSeed;
use tracing_subscriber::EnvFilter;

mod config;
mod console;
mod menu;

use config::{Cli, Command};
use console::StdioConsole;

fn init_tracing(directive: &str) {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("warn"));
    // Logs go to stderr so they never interleave with prompts on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let db_url = cli.database_url();
    config::ensure_parent_dir(&db_url)
        .with_context(|| format!("failed to prepare database directory for {db_url}"))?;

    match cli.command() {
        Command::Play => {
            let (services, report) =
                AppServices::new_sqlite(&db_url, Clock::System, &CatalogSeed::builtin())
                    .await
                    .with_context(|| format!("failed to open quiz store at {db_url}"))?;
            tracing::debug!(
                quizzes = report.quizzes_inserted,
                questions = report.questions_inserted,
                "store ready"
            );
            let mut console = StdioConsole::stdio();
            menu::run_menu(&services, &mut console).await
        }
        Command::Seed { catalog } => {
            let seed = match &catalog {
                Some(path) => CatalogSeed::from_path(path)
                    .with_context(|| format!("failed to load catalog {}", path.display()))?,
                None => CatalogSeed::builtin(),
            };
            let (_services, report) = AppServices::new_sqlite(&db_url, Clock::System, &seed)
                .await
                .with_context(|| format!("failed to seed quiz store at {db_url}"))?;
            println!(
                "Seeded {} quizzes and {} questions into {db_url}.",
                report.quizzes_inserted, report.questions_inserted
            );
            Ok(())
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}
