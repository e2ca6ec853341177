//! Line-oriented front end for the console.
//!
//! Reads one command per line from stdin and redraws the active panel on
//! stdout after every change. Logs go to stderr.

use std::io;
use std::sync::Arc;

use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::api::UserApi;
use crate::console::view;
use crate::console::{Console, Event, Field};

pub const HELP: &str = "\
commands:
  go <path>              open a panel: /, /get-user, /update-user, /delete-user
  set <field> [value]    type into username, password or new-password
  submit                 send the current form
  dismiss                close the notification
  help                   show this text
  quit                   leave";

#[derive(Debug)]
pub enum Command {
    Event(Event),
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command `{0}`, try `help`")]
    Unknown(String),
    #[error("no field named `{0}`")]
    UnknownField(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
}

/// Parses one input line. Everything after the field name of `set` is taken
/// verbatim as the value, spaces included.
pub fn parse(line: &str) -> Result<Command, CommandError> {
    let line = line.trim_start();
    let (word, rest) = line.split_once(' ').unwrap_or((line, ""));

    match word.trim_end() {
        "go" => {
            let path = rest.trim();
            if path.is_empty() {
                return Err(CommandError::MissingArgument("go"));
            }
            Ok(Command::Event(Event::NavigatePath(path.to_string())))
        }
        "set" => {
            let (key, value) = rest.split_once(' ').unwrap_or((rest, ""));
            let key = key.trim();
            if key.is_empty() {
                return Err(CommandError::MissingArgument("set"));
            }
            let field = Field::from_key(key).ok_or_else(|| CommandError::UnknownField(key.to_string()))?;
            Ok(Command::Event(Event::Input(field, value.trim_end_matches(['\r', '\n']).to_string())))
        }
        "submit" => Ok(Command::Event(Event::Submit)),
        "dismiss" => Ok(Command::Event(Event::Dismiss)),
        "help" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

pub async fn run(api: Arc<dyn UserApi>) -> io::Result<()> {
    let (console, events) = Console::new(api);
    let driver = tokio::spawn(console.run(|shell| println!("{}", view::render(shell))));
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match parse(&line) {
            Ok(Command::Event(event)) => {
                if events.send(event).await.is_err() {
                    break;
                }
            }
            Ok(Command::Help) => println!("{HELP}"),
            Ok(Command::Quit) => {
                info!("quit requested");
                driver.abort();
                return Ok(());
            }
            Err(err) => println!("{err}"),
        }
    }

    // End of input: let pending requests and timers settle before exiting.
    drop(events);
    driver.await.map_err(io::Error::other)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_navigation() {
        match parse("go  /get-user ").unwrap() {
            Command::Event(Event::NavigatePath(path)) => assert_eq!(path, "/get-user"),
            other => panic!("unexpected {other:?}"),
        }
        match parse("go /").unwrap() {
            Command::Event(Event::NavigatePath(path)) => assert_eq!(path, "/"),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(parse("go").unwrap_err(), CommandError::MissingArgument("go"));
    }

    #[test]
    fn test_parse_set_keeps_value_verbatim() {
        match parse("set password correct horse  battery").unwrap() {
            Command::Event(Event::Input(field, value)) => {
                assert_eq!(field, Field::Password);
                assert_eq!(value, "correct horse  battery");
            }
            other => panic!("unexpected {other:?}"),
        }

        match parse("set username").unwrap() {
            Command::Event(Event::Input(field, value)) => {
                assert_eq!(field, Field::Username);
                assert_eq!(value, "");
            }
            other => panic!("unexpected {other:?}"),
        }

        assert_eq!(
            parse("set email a@b.c").unwrap_err(),
            CommandError::UnknownField("email".to_string())
        );
    }

    #[test]
    fn test_parse_simple_commands() {
        assert!(matches!(parse("submit"), Ok(Command::Event(Event::Submit))));
        assert!(matches!(parse("dismiss"), Ok(Command::Event(Event::Dismiss))));
        assert!(matches!(parse("help"), Ok(Command::Help)));
        assert!(matches!(parse("quit"), Ok(Command::Quit)));
        assert_eq!(
            parse("delete alice").unwrap_err(),
            CommandError::Unknown("delete".to_string())
        );
    }
}
