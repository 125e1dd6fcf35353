//! Binary-name alias detection.
//!
//! The single binary serves both directions: invoked (or symlinked) as
//! `dzx0` it starts in decompress mode, the way `gunzip` does for `gzip`.

use crate::cli::arg_utils::{exe_name_match, last_name_from_path};
use crate::cli::constants::DZX0;

/// Operation selected before and during argument parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpMode {
    Compress,
    Decompress,
}

/// Initial CLI state derived from the binary name.
#[derive(Debug, Clone)]
pub struct CliInit {
    /// Initial operation mode; the `-d` flag can still override it.
    pub op_mode: OpMode,
    /// Basename of argv\[0\], used in usage text.
    pub exe_name: String,
}

/// Detects the operation mode from the argv\[0\] binary name.
pub fn detect_alias(argv0: &str) -> CliInit {
    let exe_name = last_name_from_path(argv0);

    let op_mode = if exe_name_match(exe_name, DZX0) {
        OpMode::Decompress
    } else {
        OpMode::Compress
    };

    CliInit {
        op_mode,
        exe_name: exe_name.to_owned(),
    }
}
