// Library root
// -----------
// The binary (`main.rs`) wires these modules into a single sequential run.
//
// Module responsibilities:
// - `config`: command-line flags and the API key from the environment.
// - `questions`: loads the `---` separated question file.
// - `api`: blocking HTTP client for the chat-completions endpoint.
// - `runner`: asks each question once, skipping failures.
// - `report`: token accumulator and the final summary.
pub mod api;
pub mod config;
pub mod questions;
pub mod report;
pub mod runner;
