//! formwalk player - runs schema-driven forms in a terminal.
//!
//! The application layer (`FormSession`, `LoginService`) depends only on the
//! outbound ports; `infrastructure` provides the HTTP client, the sinks and
//! the terminal surface, and `runner` wires them together.

pub mod application;
pub mod config;
pub mod infrastructure;
pub mod ports;
pub mod runner;
pub mod session_types;

pub use application::{FormSession, LoginService, SessionError, SessionView};
pub use config::{ConfigError, PlayerConfig};
pub use runner::{run, RunOutcome, RunnerDeps};
