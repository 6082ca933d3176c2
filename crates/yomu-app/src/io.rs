use std::io::BufRead;
use std::path::PathBuf;

use kanal::Sender;
use tokio_util::sync::CancellationToken;
use yomu_types::ReaderCommand;

use crate::ui;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command `{0}`, type `help` for the list")]
    Unknown(String),

    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),

    #[error("`{0}` is not a word id")]
    InvalidId(String),
}

/// Parse one line of user input. Blank lines yield `None`
pub fn parse_command(line: &str) -> Result<Option<ReaderCommand>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, arg) = match line.split_once(char::is_whitespace) {
        Some((verb, arg)) => (verb, arg.trim()),
        None => (line, ""),
    };

    let command = match verb {
        "open" | "o" => {
            if arg.is_empty() {
                return Err(CommandError::MissingArgument("open"));
            }
            ReaderCommand::OpenFile(PathBuf::from(arg))
        }
        "preset" | "book" => {
            if arg.is_empty() {
                ReaderCommand::ListPresets
            } else {
                ReaderCommand::Preset(arg.to_string())
            }
        }
        "presets" | "books" => ReaderCommand::ListPresets,
        "next" | "n" => ReaderCommand::NextPage,
        "prev" | "p" => ReaderCommand::PrevPage,
        "toggle" | "t" => {
            if arg.is_empty() {
                return Err(CommandError::MissingArgument("toggle"));
            }
            let id = arg
                .parse()
                .map_err(|_| CommandError::InvalidId(arg.to_string()))?;
            ReaderCommand::Toggle(id)
        }
        "cancel" | "c" => ReaderCommand::Cancel,
        "reset" => ReaderCommand::Reset,
        "page" | "show" => ReaderCommand::ShowPage,
        "help" | "h" | "?" => ReaderCommand::Help,
        "quit" | "q" | "exit" => ReaderCommand::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(Some(command))
}

/// Read commands from stdin and forward them to the event loop.
///
/// Runs on its own thread: a blocking stdin read would otherwise hold up
/// runtime shutdown.
pub fn input_loop(cancel: CancellationToken, command_tx: Sender<ReaderCommand>) {
    for line in std::io::stdin().lock().lines() {
        if cancel.is_cancelled() {
            break;
        }

        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::error!("Failed to read stdin: {e}");
                break;
            }
        };

        match parse_command(&line) {
            Ok(Some(command)) => {
                if command_tx.send(command).is_err() {
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => ui::notice(&e.to_string()),
        }
    }

    if !cancel.is_cancelled() {
        tracing::debug!("stdin closed");
        let _ = command_tx.send(ReaderCommand::Quit);
    }
    tracing::debug!("Input loop stopping");
}
