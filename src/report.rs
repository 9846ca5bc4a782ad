// Reporter: accumulates completion-token counts during a run and renders
// the final summary block.

use std::io::{self, Write};

/// Completion-token counts of the answered questions, in input order.
/// Failed questions are never recorded, so `answered() <= attempted()`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    attempted: usize,
    completion_tokens: Vec<u32>,
    total: u64,
}

impl RunSummary {
    pub fn new(attempted: usize) -> Self {
        RunSummary {
            attempted,
            completion_tokens: Vec::with_capacity(attempted),
            total: 0,
        }
    }

    pub fn record(&mut self, tokens: u32) {
        self.completion_tokens.push(tokens);
        self.total += u64::from(tokens);
    }

    pub fn completion_tokens(&self) -> &[u32] {
        &self.completion_tokens
    }

    pub fn attempted(&self) -> usize {
        self.attempted
    }

    pub fn answered(&self) -> usize {
        self.completion_tokens.len()
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Mean over answered questions only; 0.0 when nothing was answered.
    pub fn average(&self) -> f64 {
        if self.completion_tokens.is_empty() {
            return 0.0;
        }
        self.total as f64 / self.completion_tokens.len() as f64
    }

    /// Print the results table. Entries are numbered among answered
    /// questions, not by their position in the input file.
    pub fn write_summary<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "==== Results ====")?;
        for (i, tokens) in self.completion_tokens.iter().enumerate() {
            writeln!(out, "Question {}: {} tokens", i + 1, tokens)?;
        }
        writeln!(out)?;
        writeln!(
            out,
            "Answered {} of {} questions",
            self.answered(),
            self.attempted
        )?;
        writeln!(out, "Average completion tokens: {:.2}", self.average())
    }
}
