// Question loader: turns a plain text file into the ordered list of
// questions the runner sends, one per `---` separated block.

use anyhow::{Context, Result};
use std::path::Path;

/// Separator between two questions in the input file.
pub const DELIMITER: &str = "---";

/// Split raw file content into questions. Each block is trimmed and empty
/// blocks are dropped; the relative order of the remaining ones is kept.
pub fn parse_questions(text: &str) -> Vec<String> {
    text.split(DELIMITER)
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read `path` and parse its content with [`parse_questions`].
pub fn load_questions(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read question file {}", path.display()))?;
    let questions = parse_questions(&text);
    log::debug!("loaded {} questions from {}", questions.len(), path.display());
    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn splits_on_delimiter() {
        let qs = parse_questions("What is 2+2?---What is the capital of France?");
        assert_eq!(qs, vec!["What is 2+2?", "What is the capital of France?"]);
    }

    #[test]
    fn trims_and_drops_empty_blocks() {
        let text = "\n  first question \n---\n\n---   \t\n---\nsecond\nspans lines\n---";
        let qs = parse_questions(text);
        assert_eq!(qs, vec!["first question", "second\nspans lines"]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(parse_questions("").is_empty());
        assert!(parse_questions("------\n---  ").is_empty());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Why is the sky blue?\n---\nHow far is the moon?\n").unwrap();

        let qs = load_questions(file.path()).unwrap();
        assert_eq!(qs, vec!["Why is the sky blue?", "How far is the moon?"]);
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.txt");

        let err = load_questions(&path).unwrap_err();
        assert!(err.to_string().contains("nope.txt"));
    }
}
