//! Interactive login prompt and form command loop

use std::io::{self, BufRead, Write};

use crate::application::{FormSession, LoginService, NextOutcome, SubmitOutcome};
use crate::ports::outbound::{FormSinkPort, RenderSurfacePort};
use crate::session_types::SessionKey;

use super::command::{parse_command, Command, HELP_TEXT};
use super::surface::TerminalSurface;

/// Why the command loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionExit {
    Quit,
    EndOfInput,
}

/// Ask for roll number and name until the login succeeds.
///
/// When both `preset_roll` and `preset_name` are given they are tried first,
/// without prompting. Returns `None` if input ends before a successful login.
pub async fn prompt_login<R: BufRead, W: Write + Send>(
    input: &mut R,
    surface: &TerminalSurface<W>,
    login: &LoginService,
    preset_roll: Option<&str>,
    preset_name: Option<&str>,
) -> io::Result<Option<SessionKey>> {
    if let (Some(roll), Some(name)) = (preset_roll, preset_name) {
        match login.login(roll, name).await {
            Ok(key) => return Ok(Some(key)),
            Err(e) => surface.message(&e.to_string()),
        }
    }

    loop {
        surface.prompt("Roll number: ");
        let Some(roll) = read_line(input)? else {
            return Ok(None);
        };
        surface.prompt("Name: ");
        let Some(name) = read_line(input)? else {
            return Ok(None);
        };

        match login.login(&roll, &name).await {
            Ok(key) => return Ok(Some(key)),
            Err(e) => surface.message(&e.to_string()),
        }
    }
}

/// Read commands from `input` and apply them to `session` until quit or EOF.
pub async fn run_session<R: BufRead, W: Write + Send>(
    session: &mut FormSession,
    input: &mut R,
    surface: &TerminalSurface<W>,
    sink: &dyn FormSinkPort,
) -> io::Result<SessionExit> {
    surface.message("Type 'help' for commands.");
    loop {
        surface.prompt("> ");
        let Some(line) = read_line(input)? else {
            return Ok(SessionExit::EndOfInput);
        };

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                surface.message(&e.to_string());
                continue;
            }
        };

        match command {
            Command::Set { field_id, value } => {
                if let Err(e) = session.on_change(&field_id, value) {
                    surface.message(&e.to_string());
                }
            }
            Command::Toggle { field_id, option } => {
                let checked = !session
                    .value(&field_id)
                    .is_some_and(|v| v.contains_selection(&option));
                if let Err(e) = session.on_toggle(&field_id, &option, checked) {
                    surface.message(&e.to_string());
                }
            }
            Command::Next => match session.on_next() {
                Ok(NextOutcome::Advanced { .. }) => {}
                Ok(NextOutcome::Blocked { error_count }) => {
                    surface.message(&fix_errors_message(error_count));
                }
                Err(e) => surface.message(&e.to_string()),
            },
            Command::Prev => {
                if let Err(e) = session.on_prev() {
                    surface.message(&e.to_string());
                }
            }
            Command::Submit => match session.on_submit(sink).await {
                Ok(SubmitOutcome::Blocked { error_count }) => {
                    surface.message(&fix_errors_message(error_count));
                }
                Ok(SubmitOutcome::Submitted | SubmitOutcome::Rejected(_)) => {}
                Err(e) => surface.message(&e.to_string()),
            },
            Command::Show => surface.present(&session.render()),
            Command::Help => surface.message(HELP_TEXT.trim_end()),
            Command::Quit => return Ok(SessionExit::Quit),
        }
    }
}

fn fix_errors_message(error_count: usize) -> String {
    if error_count == 1 {
        "1 field needs attention.".to_string()
    } else {
        format!("{} fields need attention.", error_count)
    }
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
