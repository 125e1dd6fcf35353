//! Usage and version text for the `zx0` CLI.

use crate::cli::constants::{display_level, AUTHOR, COMPRESSOR_NAME, ZX0_EXTENSION};

/// Print `msg` to stderr and exit with code 1.
///
/// The message is suppressed when the display level is below 1.
pub fn error_out(msg: &str) -> ! {
    if display_level() >= 1 {
        eprintln!("{}", msg);
    }
    std::process::exit(1);
}

/// Print the version banner to stderr.
pub fn print_version() {
    eprintln!(
        "{} v{}: Optimal data compressor by {}",
        COMPRESSOR_NAME,
        crate::ZX0_VERSION_STRING,
        AUTHOR
    );
}

/// Print a brief usage summary to stderr.
pub fn print_usage(program: &str) {
    eprintln!("Usage: {} [-d] [-f] [-c] [-b] [-q] [-t#] [+N] input [output]", program);
    eprintln!();
    eprintln!(" +N     : skip first N bytes of input file");
    eprintln!(" -f     : force overwrite of output file");
    eprintln!(" -c     : classic file format (v1.*)");
    eprintln!(" -b     : compress backwards");
    eprintln!(" -q     : quick non-optimal compression");
    eprintln!(" -d     : decompress (default when invoked as dzx0)");
    eprintln!(" -t#    : use # worker threads (default: all cores)");
    eprintln!(" -h     : display this help and exit");
    eprintln!(" -V     : display version and exit");
    eprintln!();
    eprintln!(
        "With no output filename, compression appends \"{}\" and decompression strips it.",
        ZX0_EXTENSION
    );
}
