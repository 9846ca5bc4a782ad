// Batch runner: sends the questions one after another and keeps the token
// counts of the ones that were answered. A failed question is printed and
// skipped; it never stops the batch.

use crate::api::{Answer, ApiError, ChatResponse};
use crate::report::RunSummary;
use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::time::Duration;

/// Ask every question in order and echo each outcome to `out` as soon as
/// it is known. Returns the accumulated counts of the successful answers.
pub fn run_batch<A: Answer, W: Write>(
    answerer: &A,
    questions: &[String],
    out: &mut W,
) -> Result<RunSummary> {
    let style = ProgressStyle::with_template("{spinner} {msg} [{elapsed}]")?;
    let mut summary = RunSummary::new(questions.len());
    for (i, question) in questions.iter().enumerate() {
        writeln!(out, "Question: {}", question)?;
        out.flush()?;

        let spinner = ProgressBar::new_spinner().with_style(style.clone());
        spinner.set_message(format!("Waiting for answer {}/{}...", i + 1, questions.len()));
        match ask_with_spinner(answerer, question, &spinner) {
            Ok(resp) => {
                let tokens = resp.usage.completion_tokens;
                log::debug!("question {} answered by {} ({})", i + 1, resp.model, resp.id);
                writeln!(out, "Completion tokens: {}\n", tokens)?;
                summary.record(tokens);
            }
            Err(e) => {
                log::warn!("question {} failed: {}", i + 1, e);
                writeln!(out, "Error: {}", e)?;
            }
        }
    }
    Ok(summary)
}

/// One blocking attempt, ticking `spinner` on stderr while the request is
/// in flight.
fn ask_with_spinner<A: Answer>(
    answerer: &A,
    question: &str,
    spinner: &ProgressBar,
) -> std::result::Result<ChatResponse, ApiError> {
    spinner.enable_steady_tick(Duration::from_millis(120));
    let result = answerer.ask(question);
    spinner.finish_and_clear();
    result
}
