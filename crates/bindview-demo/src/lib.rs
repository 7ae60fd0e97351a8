#![forbid(unsafe_code)]

//! Terminal demo: applies command-line values to a fresh display state and
//! prints the rendered view together with every change notification.

pub mod cli;
pub mod error;
pub mod logging;
pub mod render;

pub use cli::{Cli, run, run_from_env};
pub use error::{DemoError, Result};
