//! Library side of the `cwr` command line tool: the commands themselves and
//! logging setup, kept out of `main` so they can be tested.

pub mod commands;
pub mod logging;
pub mod types;
