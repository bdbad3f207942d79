//! Library side of the `boat-inventory` command line tool.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod settings;
pub mod summary;
