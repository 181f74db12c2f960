//! Line-oriented terminal front-end
//!
//! `render` turns a `SessionView` into text, `command` parses what the user
//! types, `surface` is the `RenderSurfacePort` over any writer and `console`
//! runs the login prompt and the command loop.

pub mod command;
pub mod console;
pub mod render;
pub mod surface;

pub use command::{parse_command, Command, CommandError, HELP_TEXT};
pub use console::{prompt_login, run_session, SessionExit};
pub use render::render_view;
pub use surface::TerminalSurface;
