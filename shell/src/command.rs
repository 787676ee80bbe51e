//! Line command parsing
//!
//! Input lines are split into words with shell quoting rules and then
//! parsed with clap. Titles starting with `-` go after `--`.

use clap::{Parser, Subcommand};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unterminated quote")]
    UnterminatedQuote,

    #[error("{0}")]
    Usage(String),
}

#[derive(Debug, Parser)]
#[command(
    name = "taskpad",
    no_binary_name = true,
    disable_version_flag = true,
    about = "Track short-lived tasks for this session"
)]
struct CommandLine {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Create a task: add Buy milk -p high --due 2026-10-20 (use -- before a title starting with -)
    Add {
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
        #[arg(short, long = "desc")]
        description: Option<String>,
        #[arg(short, long)]
        priority: Option<String>,
        #[arg(long)]
        due: Option<String>,
    },
    /// List tasks (all, pending or completed)
    #[command(alias = "ls")]
    List {
        #[arg(default_value = "all")]
        filter: String,
    },
    /// Show a single task
    Show { id: String },
    /// Change fields of a task; --due none clears the due date
    Edit {
        id: String,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long = "desc")]
        description: Option<String>,
        #[arg(short, long)]
        priority: Option<String>,
        #[arg(long)]
        due: Option<String>,
    },
    /// Flip a task between pending and completed
    Toggle { id: String },
    /// Delete a task
    #[command(name = "rm", alias = "delete")]
    Remove { id: String },
    /// Delete every task
    Clear,
    /// Show task counts
    Stats,
    /// Print all tasks as JSON
    Json,
    /// End the session
    #[command(alias = "exit")]
    Quit,
}

impl Command {
    /// Parse one input line
    pub fn parse_line(line: &str) -> Result<Self, CommandError> {
        let words = split_words(line)?;
        CommandLine::try_parse_from(words)
            .map(|cli| cli.command)
            .map_err(|e| CommandError::Usage(e.render().to_string()))
    }
}

/// Split a line into words with POSIX shell quoting rules
pub fn split_words(line: &str) -> Result<Vec<String>, CommandError> {
    shlex::split(line).ok_or(CommandError::UnterminatedQuote)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_words() {
        assert_eq!(
            split_words(r#"add "Buy milk" -d "two  liters""#).unwrap(),
            vec!["add", "Buy milk", "-d", "two  liters"]
        );
        assert_eq!(split_words("  list   pending ").unwrap(), vec!["list", "pending"]);
        assert_eq!(split_words(r#"edit 1 -d """#).unwrap(), vec!["edit", "1", "-d", ""]);
        assert!(split_words("").unwrap().is_empty());
        assert_eq!(
            split_words(r#"add "say \"hi\"" -d 'it''s fine'"#).unwrap(),
            vec!["add", "say \"hi\"", "-d", "its fine"]
        );
        assert_eq!(
            split_words(r#"add "oops"#).unwrap_err(),
            CommandError::UnterminatedQuote
        );
    }

    #[test]
    fn test_parse_add() {
        let command = Command::parse_line("add Ship the release -p high --due 2026-10-20").unwrap();
        assert_eq!(
            command,
            Command::Add {
                title: vec!["Ship".into(), "the".into(), "release".into()],
                description: None,
                priority: Some("high".into()),
                due: Some("2026-10-20".into()),
            }
        );
    }

    #[test]
    fn test_parse_title_starting_with_hyphen() {
        let command = Command::parse_line(r#"add -p low -- "-5 kg before summer""#).unwrap();
        assert_eq!(
            command,
            Command::Add {
                title: vec!["-5 kg before summer".into()],
                description: None,
                priority: Some("low".into()),
                due: None,
            }
        );
    }

    #[test]
    fn test_parse_edit() {
        let command = Command::parse_line(r#"edit 2 -t "Ship release v2" --due none"#).unwrap();
        assert_eq!(
            command,
            Command::Edit {
                id: "2".into(),
                title: Some("Ship release v2".into()),
                description: None,
                priority: None,
                due: Some("none".into()),
            }
        );
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(
            Command::parse_line("list").unwrap(),
            Command::List {
                filter: "all".into()
            }
        );
        assert_eq!(
            Command::parse_line("ls completed").unwrap(),
            Command::List {
                filter: "completed".into()
            }
        );
        assert_eq!(
            Command::parse_line("rm 3").unwrap(),
            Command::Remove { id: "3".into() }
        );
        assert_eq!(
            Command::parse_line("delete 3").unwrap(),
            Command::Remove { id: "3".into() }
        );
        assert_eq!(Command::parse_line("exit").unwrap(), Command::Quit);
        assert_eq!(Command::parse_line("stats").unwrap(), Command::Stats);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Command::parse_line("add"),
            Err(CommandError::Usage(_))
        ));
        assert!(matches!(
            Command::parse_line("frobnicate"),
            Err(CommandError::Usage(_))
        ));
        assert!(matches!(
            Command::parse_line("toggle"),
            Err(CommandError::Usage(_))
        ));
    }
}
