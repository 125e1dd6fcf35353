//! CLI constants, the global verbosity level, and display macros.
//!
//! Centralises the identity strings and the shared mutable state needed
//! across the CLI and file-I/O layers:
//!
//! - Identity strings (`COMPRESSOR_NAME`, `ZX0_EXTENSION`, …)
//! - The verbosity level used by [`displaylevel!`](crate::displaylevel)

use std::sync::atomic::{AtomicU32, Ordering};

// ── Identity strings ────────────────────────────────────────────────────────
/// Primary compressor name, used in the banner and as the default binary name.
pub const COMPRESSOR_NAME: &str = "zx0";
/// Format author credit shown in the version banner.
pub const AUTHOR: &str = "Einar Saukas";
/// Default file extension appended to compressed output files.
pub const ZX0_EXTENSION: &str = ".zx0";
/// Name of the decompression-only binary alias.
pub const DZX0: &str = "dzx0";

// ── Verbosity level ──────────────────────────────────────────────────────────
//
// Semantics:
//   0 — completely silent
//   1 — errors only
//   2 — normal informational output (default): progress bar + summary line
//   3+ — verbose / diagnostic
//
// Stored as a process-wide atomic so it is accessible from any module
// without threading a context struct through the call graph.
pub static DISPLAY_LEVEL: AtomicU32 = AtomicU32::new(2);

/// Returns the current verbosity level.
#[inline]
pub fn display_level() -> u32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

/// Sets the verbosity level.
#[inline]
pub fn set_display_level(level: u32) {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
}

/// Write a formatted message to stderr when the verbosity level permits.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::cli::constants::display_level() >= $level {
            eprint!($($arg)*);
        }
    };
}
