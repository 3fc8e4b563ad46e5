//! Interactive terminal weather dashboard.
//!
//! State changes go through [`state::update`]; effects it returns run on
//! [`services::Services`] and report back as actions on the event loop in
//! [`runtime::Dashboard`].

pub mod command;
pub mod render;
pub mod runtime;
pub mod services;
pub mod state;
pub mod view;

pub use command::{parse as parse_command, Command, HELP};
pub use render::TerminalRenderer;
pub use runtime::Dashboard;
pub use services::Services;
pub use state::{update, Action, AppState, Effect, Notice};
pub use view::View;
