//! Line command parsing for the terminal host.
//!
//! Rows are addressed by their 1-based position in the printed list.

use clap::{Parser, Subcommand};

const ESCAPE_CHAR: char = '\u{1b}';
const ESCAPE_WORD: &str = ":esc";

/// One stdin line, parsed without a binary name.
#[derive(Debug, Parser)]
#[command(name = "tickstack", no_binary_name = true)]
#[command(override_usage = "<COMMAND> [ARGS]")]
struct CommandLine {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Add a task
    #[command(visible_alias = "a")]
    Add {
        /// Task description
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        #[arg(allow_hyphen_values = true)]
        words: Vec<String>,
    },
    /// Show tasks
    #[command(visible_alias = "ls")]
    List,
    /// Mark a task complete / incomplete
    #[command(visible_aliases = ["t", "done"])]
    Toggle {
        #[arg(value_parser = parse_row)]
        row: usize,
    },
    /// Edit a task; the next line is the new text (empty line or :esc cancels)
    #[command(visible_alias = "e")]
    Edit {
        #[arg(value_parser = parse_row)]
        row: usize,
    },
    /// Delete a task
    #[command(name = "rm", visible_aliases = ["delete", "del"])]
    Remove {
        #[arg(value_parser = parse_row)]
        row: usize,
    },
    /// Leave
    #[command(visible_aliases = ["exit", "q"])]
    Quit,
}

/// Input typed while a row is in edit mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditInput {
    /// Enter pressed with this text.
    Confirm(String),
    /// Escape (or an empty line).
    Cancel,
}

/// Parses one command line. Blank lines yield `Ok(None)`.
///
/// `help` and `--help` come back as a `DisplayHelp` error carrying the
/// rendered help text.
pub fn parse_command(line: &str) -> Result<Option<Command>, clap::Error> {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() {
        return Ok(None);
    }
    CommandLine::try_parse_from(words).map(|parsed| Some(parsed.command))
}

pub fn parse_edit_line(line: &str) -> EditInput {
    let text = line.trim_end_matches(['\r', '\n']);
    if text.trim().is_empty() || text.contains(ESCAPE_CHAR) || text.trim() == ESCAPE_WORD {
        return EditInput::Cancel;
    }
    EditInput::Confirm(text.to_string())
}

fn parse_row(value: &str) -> Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(row) if row > 0 => Ok(row),
        _ => Err(format!("`{value}` is not a row number (rows start at 1)")),
    }
}
