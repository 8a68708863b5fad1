//! Typed-line input grammar.
//!
//! Rows are 1-based positions in the list currently on screen. Text
//! arguments are everything after the keyword, kept as typed.

use std::fmt;

pub const HELP: &str = "\
commands:
  input <text>    type into the new-todo field
  add [text]      press Add (optionally typing <text> first)
  toggle <n>      tick or untick row n
  edit <n>        edit row n
  text <text>     type into the edit field
  save            leave the edit field (saves non-empty text)
  delete <n>      delete row n
  reload          fetch the list again
  help            show this help
  quit            exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    Input(String),
    Add(Option<String>),
    Toggle(usize),
    Edit(usize),
    EditText(String),
    Save,
    Delete(usize),
    Reload,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Empty,
    Unknown(String),
    MissingRow(&'static str),
    BadRow(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "type a command, or `help`"),
            ParseError::Unknown(word) => write!(f, "unknown command `{word}`, try `help`"),
            ParseError::MissingRow(cmd) => write!(f, "`{cmd}` needs a row number"),
            ParseError::BadRow(raw) => write!(f, "`{raw}` is not a row number"),
        }
    }
}

impl std::error::Error for ParseError {}

pub fn parse(line: &str) -> Result<UiCommand, ParseError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.trim().is_empty() {
        return Err(ParseError::Empty);
    }
    let (keyword, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest),
        None => (trimmed, ""),
    };

    match keyword {
        "input" => Ok(UiCommand::Input(rest.to_string())),
        "add" => Ok(UiCommand::Add((!rest.is_empty()).then(|| rest.to_string()))),
        "toggle" => row("toggle", rest).map(UiCommand::Toggle),
        "edit" => row("edit", rest).map(UiCommand::Edit),
        "text" => Ok(UiCommand::EditText(rest.to_string())),
        "save" | "blur" => Ok(UiCommand::Save),
        "delete" | "rm" => row("delete", rest).map(UiCommand::Delete),
        "reload" | "refresh" => Ok(UiCommand::Reload),
        "help" | "?" => Ok(UiCommand::Help),
        "quit" | "exit" | "q" => Ok(UiCommand::Quit),
        other => Err(ParseError::Unknown(other.to_string())),
    }
}

fn row(cmd: &'static str, rest: &str) -> Result<usize, ParseError> {
    let raw = rest.trim();
    if raw.is_empty() {
        return Err(ParseError::MissingRow(cmd));
    }
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ParseError::BadRow(raw.to_string())),
    }
}
