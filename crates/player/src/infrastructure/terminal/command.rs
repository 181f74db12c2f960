//! Terminal command grammar

use thiserror::Error;

pub const HELP_TEXT: &str = "\
Commands:
  set <field> <value>     answer a field (omit the value to clear it)
  toggle <field> <option> check or uncheck a checkbox option
  next                    validate this section and continue
  prev                    go back one section
  submit                  validate and submit the form
  show                    redraw the current section
  help                    show this help
  quit                    leave without submitting
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set { field_id: String, value: String },
    Toggle { field_id: String, option: String },
    Next,
    Prev,
    Submit,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Type a command, or 'help' for a list")]
    Empty,
    #[error("Unknown command '{0}'; type 'help' for a list")]
    Unknown(String),
    #[error("'{command}' needs a {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
}

/// Parse one input line. Commands are case-insensitive; arguments are not.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(CommandError::Empty);
    }
    let (word, rest) = split_word(line);

    match word.to_ascii_lowercase().as_str() {
        "set" => {
            let (field_id, value) = split_word(rest);
            if field_id.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "set",
                    argument: "field id",
                });
            }
            Ok(Command::Set {
                field_id: field_id.to_string(),
                value: value.to_string(),
            })
        }
        "toggle" => {
            let (field_id, option) = split_word(rest);
            if field_id.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "toggle",
                    argument: "field id",
                });
            }
            if option.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "toggle",
                    argument: "option value",
                });
            }
            Ok(Command::Toggle {
                field_id: field_id.to_string(),
                option: option.to_string(),
            })
        }
        "next" | "n" => Ok(Command::Next),
        "prev" | "p" | "back" => Ok(Command::Prev),
        "submit" => Ok(Command::Submit),
        "show" => Ok(Command::Show),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

/// First whitespace-delimited word and the trimmed remainder.
fn split_word(s: &str) -> (&str, &str) {
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (s, ""),
    }
}
