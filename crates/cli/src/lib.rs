//! Command-line front end for the rocket bootstrap.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod prompt;
pub mod settings;
pub mod styles;
