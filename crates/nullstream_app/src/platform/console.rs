//! Line-oriented console used as the shell's playlist and transport controls.

use std::io::{self, BufRead};
use std::thread;

use nullstream_core::{AppViewModel, Msg};
use nullstream_logging::shell_debug;
use tao::event_loop::EventLoopProxy;
use thiserror::Error;

use super::app::ShellEvent;
use super::render;

pub(crate) const HELP: &[&str] = &[
    "add <url>            add a video and play it",
    "remove <n|url>       remove a video",
    "load <n|url>         play a video",
    "play | pause | toggle",
    "seek <s|m:ss>        jump to a position",
    "list | status | help | quit",
];

/// Playlist entry by 1-based position or by url.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Target {
    Index(usize),
    Url(String),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ConsoleCommand {
    Add(String),
    Remove(Target),
    Load(Target),
    Play,
    Pause,
    Toggle,
    Seek(f64),
    List,
    Status,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum ConsoleError {
    #[error("unknown command '{0}', try 'help'")]
    Unknown(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    #[error("'{0}' is not a time; use seconds or m:ss")]
    InvalidTime(String),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ConsoleAction {
    Send(Msg),
    Print(Vec<String>),
    Quit,
}

/// `Ok(None)` for a blank line.
pub(crate) fn parse_command(line: &str) -> Result<Option<ConsoleCommand>, ConsoleError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "add" => ConsoleCommand::Add(require(rest, "add")?.to_string()),
        "remove" | "rm" => ConsoleCommand::Remove(parse_target(require(rest, "remove")?)),
        "load" => ConsoleCommand::Load(parse_target(require(rest, "load")?)),
        "play" => ConsoleCommand::Play,
        "pause" => ConsoleCommand::Pause,
        "toggle" | "space" => ConsoleCommand::Toggle,
        "seek" => ConsoleCommand::Seek(parse_time(require(rest, "seek")?)?),
        "list" | "ls" => ConsoleCommand::List,
        "status" => ConsoleCommand::Status,
        "help" | "?" => ConsoleCommand::Help,
        "quit" | "exit" => ConsoleCommand::Quit,
        other => return Err(ConsoleError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

/// Turns a command into a message, resolving positions against the current view.
pub(crate) fn resolve(command: ConsoleCommand, view: &AppViewModel) -> ConsoleAction {
    match command {
        ConsoleCommand::Add(url) => ConsoleAction::Send(Msg::AddUrlSubmitted(url)),
        ConsoleCommand::Remove(Target::Url(url)) => ConsoleAction::Send(Msg::RemoveVideo(url)),
        ConsoleCommand::Remove(Target::Index(n)) => match row_offset(view, n) {
            Some(offset) => ConsoleAction::Send(Msg::RemoveAt(vec![offset])),
            None => no_such_video(n),
        },
        ConsoleCommand::Load(Target::Url(url)) => ConsoleAction::Send(Msg::LoadVideo(url)),
        ConsoleCommand::Load(Target::Index(n)) => match row_offset(view, n) {
            Some(offset) => ConsoleAction::Send(Msg::LoadVideo(view.videos[offset].url.clone())),
            None => no_such_video(n),
        },
        ConsoleCommand::Play => ConsoleAction::Send(Msg::PlayClicked),
        ConsoleCommand::Pause => ConsoleAction::Send(Msg::PauseClicked),
        ConsoleCommand::Toggle => ConsoleAction::Send(Msg::TogglePlayPause),
        ConsoleCommand::Seek(seconds) => ConsoleAction::Send(Msg::SeekRequested(seconds)),
        ConsoleCommand::List => ConsoleAction::Print(render::playlist_lines(view)),
        ConsoleCommand::Status => ConsoleAction::Print(vec![render::status_line(view)]),
        ConsoleCommand::Help => ConsoleAction::Print(HELP.iter().map(|l| l.to_string()).collect()),
        ConsoleCommand::Quit => ConsoleAction::Quit,
    }
}

/// Reads stdin on a background thread until EOF or `quit`.
pub(crate) fn spawn(proxy: EventLoopProxy<ShellEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match parse_command(&line) {
                Ok(Some(command)) => {
                    let quit = command == ConsoleCommand::Quit;
                    if proxy.send_event(ShellEvent::Console(command)).is_err() || quit {
                        return;
                    }
                }
                Ok(None) => {}
                Err(err) => println!("{err}"),
            }
        }
        shell_debug!("Console input closed");
    });
}

fn require<'a>(rest: &'a str, command: &'static str) -> Result<&'a str, ConsoleError> {
    if rest.is_empty() {
        Err(ConsoleError::MissingArgument(command))
    } else {
        Ok(rest)
    }
}

fn parse_target(arg: &str) -> Target {
    match arg.parse::<usize>() {
        Ok(n) => Target::Index(n),
        Err(_) => Target::Url(arg.to_string()),
    }
}

/// Accepts `90`, `1:30` or `1:01:30`.
fn parse_time(arg: &str) -> Result<f64, ConsoleError> {
    let invalid = || ConsoleError::InvalidTime(arg.to_string());
    let mut seconds = 0.0;
    let parts: Vec<&str> = arg.split(':').collect();
    if parts.len() > 3 {
        return Err(invalid());
    }
    for part in parts {
        let value: f64 = part.trim().parse().map_err(|_| invalid())?;
        if !value.is_finite() || value < 0.0 {
            return Err(invalid());
        }
        seconds = seconds * 60.0 + value;
    }
    Ok(seconds)
}

fn row_offset(view: &AppViewModel, n: usize) -> Option<usize> {
    (1..=view.videos.len()).contains(&n).then(|| n - 1)
}

fn no_such_video(n: usize) -> ConsoleAction {
    ConsoleAction::Print(vec![format!("No video #{n}")])
}

#[cfg(test)]
mod tests {
    use nullstream_core::{update, AppState};
    use pretty_assertions::assert_eq;

    use super::*;

    fn view_with(urls: &[&str]) -> AppViewModel {
        let mut state = AppState::new();
        for url in urls {
            let (next, _) = update(state, Msg::AddUrlSubmitted(url.to_string()));
            state = next;
        }
        state.view()
    }

    #[test]
    fn commands_parse_with_arguments() {
        assert_eq!(
            parse_command("  add  https://youtu.be/abc "),
            Ok(Some(ConsoleCommand::Add("https://youtu.be/abc".to_string())))
        );
        assert_eq!(
            parse_command("load 2"),
            Ok(Some(ConsoleCommand::Load(Target::Index(2))))
        );
        assert_eq!(
            parse_command("RM https://youtu.be/abc"),
            Ok(Some(ConsoleCommand::Remove(Target::Url(
                "https://youtu.be/abc".to_string()
            ))))
        );
        assert_eq!(parse_command("seek 1:30"), Ok(Some(ConsoleCommand::Seek(90.0))));
        assert_eq!(parse_command("seek 1:01:30"), Ok(Some(ConsoleCommand::Seek(3690.0))));
        assert_eq!(parse_command("seek 12.5"), Ok(Some(ConsoleCommand::Seek(12.5))));
        assert_eq!(parse_command("   "), Ok(None));
    }

    #[test]
    fn bad_input_is_reported() {
        assert_eq!(
            parse_command("rewind"),
            Err(ConsoleError::Unknown("rewind".to_string()))
        );
        assert_eq!(parse_command("add"), Err(ConsoleError::MissingArgument("add")));
        assert_eq!(
            parse_command("seek soon"),
            Err(ConsoleError::InvalidTime("soon".to_string()))
        );
        assert_eq!(
            parse_command("seek -4"),
            Err(ConsoleError::InvalidTime("-4".to_string()))
        );
    }

    #[test]
    fn positions_resolve_against_the_playlist() {
        let view = view_with(&["https://youtu.be/a", "https://youtu.be/b"]);

        assert_eq!(
            resolve(ConsoleCommand::Load(Target::Index(2)), &view),
            ConsoleAction::Send(Msg::LoadVideo("https://youtu.be/b".to_string()))
        );
        assert_eq!(
            resolve(ConsoleCommand::Remove(Target::Index(1)), &view),
            ConsoleAction::Send(Msg::RemoveAt(vec![0]))
        );
        assert_eq!(
            resolve(ConsoleCommand::Load(Target::Index(3)), &view),
            ConsoleAction::Print(vec!["No video #3".to_string()])
        );
        assert_eq!(
            resolve(ConsoleCommand::Remove(Target::Index(0)), &view),
            ConsoleAction::Print(vec!["No video #0".to_string()])
        );
    }

    #[test]
    fn transport_commands_map_directly() {
        let view = AppViewModel::default();
        assert_eq!(
            resolve(ConsoleCommand::Toggle, &view),
            ConsoleAction::Send(Msg::TogglePlayPause)
        );
        assert_eq!(
            resolve(ConsoleCommand::Seek(5.0), &view),
            ConsoleAction::Send(Msg::SeekRequested(5.0))
        );
        assert_eq!(resolve(ConsoleCommand::Quit, &view), ConsoleAction::Quit);
    }
}
