//! Command-line layer: argument parsing, binary-name alias detection, usage
//! text, and the display macros shared with the `io` module.

pub mod arg_utils;
pub mod args;
pub mod constants;
pub mod help;
pub mod init;
