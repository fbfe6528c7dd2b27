//! Clue Quest terminal entry point.

use std::error::Error;

use cluequest_cli::config::Config;
use cluequest_cli::presenter::TerminalPresenter;
use cluequest_cli::terminal;
use cluequest_core::clock::SystemClock;
use cluequest_quiz::domain::aggregates::QuizEngine;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Logs go to stderr so they never interleave with the quiz on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .json()
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    let questions = config.load_questions()?;

    tracing::info!(
        title = questions.title(),
        questions = questions.len(),
        fingerprint = questions.fingerprint(),
        tick_ms = u64::try_from(config.tick.as_millis()).unwrap_or(u64::MAX),
        "Starting Clue Quest"
    );

    let presenter = TerminalPresenter::new(std::io::stdout(), questions.title());
    let mut engine = QuizEngine::new(Uuid::new_v4(), questions);
    let input = BufReader::new(tokio::io::stdin());

    terminal::run(input, &presenter, &mut engine, &SystemClock, config.tick).await?;

    Ok(())
}
