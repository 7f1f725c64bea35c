//! Scribboard Application
//!
//! Headless shell that stands in for the host UI: it replays a recorded
//! event script against a whiteboard and writes PNG and scene exports.

mod app;
mod script;

pub use app::{run_files, App, AppError, AppResult, ExportPaths};
pub use script::{Script, ScriptEvent};
