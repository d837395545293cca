//! Command-line host for the measurement view engine.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod records;
pub mod sink;
pub mod summary;
