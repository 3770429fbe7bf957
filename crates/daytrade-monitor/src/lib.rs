//! Logging and console output.

mod console;
mod logging;

pub use console::{render_alerts, render_timing};
pub use logging::setup_logging;
