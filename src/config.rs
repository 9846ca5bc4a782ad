// Startup configuration: command-line flags plus the API key from the
// environment, resolved once and handed to the client explicitly.

use crate::api::{ClientConfig, DEFAULT_ENDPOINT};
use anyhow::{bail, Result};
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable holding the bearer token.
pub const API_KEY_ENV: &str = "SONARAPI_KEY";

#[derive(Parser, Debug)]
#[command(name = "sonar-tokens")]
#[command(version, about = "Ask a list of questions and report completion-token usage", long_about = None)]
pub struct Cli {
    /// Question file; questions are separated by `---`
    #[arg(short, long, default_value = "questions.txt")]
    pub file: PathBuf,

    /// Give up on a request after this many seconds (default: wait forever)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Chat-completions endpoint
    #[arg(long, env = "SONARAPI_URL", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse_from(normalize_args(std::env::args_os()))
    }
}

/// Accept the single-dash long form `-file <path>` / `-file=<path>` by
/// rewriting it to `--file` before clap sees it. Clap would otherwise read
/// it as `-f ile`. Nothing after a `--` separator is touched.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut seen_separator = false;
    args.into_iter()
        .map(|arg| {
            let arg: OsString = arg.into();
            if seen_separator {
                return arg;
            }
            match arg.to_str() {
                Some("--") => {
                    seen_separator = true;
                    arg
                }
                Some("-file") => OsString::from("--file"),
                Some(s) if s.starts_with("-file=") => OsString::from(format!("-{}", s)),
                _ => arg,
            }
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct Config {
    pub question_file: PathBuf,
    pub client: ClientConfig,
}

impl Config {
    pub fn from_cli(cli: Cli, api_key: String) -> Self {
        Config {
            question_file: cli.file,
            client: ClientConfig {
                endpoint: cli.endpoint,
                api_key,
                timeout: cli.timeout.map(Duration::from_secs),
            },
        }
    }
}

/// Read the API key from `SONARAPI_KEY`.
pub fn api_key_from_env() -> Result<String> {
    check_api_key(std::env::var(API_KEY_ENV).ok())
}

/// Unset and empty are treated the same.
fn check_api_key(value: Option<String>) -> Result<String> {
    match value {
        Some(key) if !key.is_empty() => Ok(key),
        _ => bail!("environment variable {} is not set", API_KEY_ENV),
    }
}
