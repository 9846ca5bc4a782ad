// Entrypoint for the CLI application.
// - Fails fast on a missing API key or an empty question file (exit 1).
// - Individual question failures are reported and skipped (exit 0).

use anyhow::bail;
use sonar_tokens::api::SonarClient;
use sonar_tokens::config::{api_key_from_env, Cli, Config};
use sonar_tokens::{questions, runner};
use std::io::Write;

fn init_logging() {
    // Diagnostics go to stderr; RUST_LOG overrides the default level.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_secs()
        .init();
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse_args();

    // The key is checked before the question file is touched.
    let api_key = api_key_from_env()?;
    let config = Config::from_cli(cli, api_key);

    let questions = questions::load_questions(&config.question_file)?;
    if questions.is_empty() {
        bail!("no questions found in {}", config.question_file.display());
    }

    let client = SonarClient::new(config.client)?;
    log::info!(
        "asking {} questions via {}",
        questions.len(),
        client.endpoint()
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let summary = runner::run_batch(&client, &questions, &mut out)?;
    summary.write_summary(&mut out)?;
    out.flush()?;

    log::info!(
        "done: {} of {} answered",
        summary.answered(),
        summary.attempted()
    );
    Ok(())
}
