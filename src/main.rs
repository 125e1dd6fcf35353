//! Binary entry point for the `zx0` command-line tool.
//!
//! Control flow:
//!
//! 1. [`detect_alias`] inspects argv\[0\] (invoking the binary as `dzx0`
//!    implies decompression).
//! 2. [`parse_args`] processes the flags and builds a [`ParsedArgs`] value.
//! 3. [`run`] derives the output filename, configures the compressor or
//!    decompressor, dispatches the file operation, and returns an exit code.

use zx0::cli::args::{parse_args, ParsedArgs};
use zx0::cli::constants::ZX0_EXTENSION;
use zx0::cli::help::{error_out, print_usage};
use zx0::cli::init::{detect_alias, OpMode};
use zx0::{Compressor, Decompressor};

/// Execute the operation selected by argument parsing.
///
/// Returns the process exit code (0 = success, non-zero = error).
fn run(args: ParsedArgs) -> i32 {
    let input_filename = match args.input_filename {
        Some(name) => name,
        None => {
            print_usage(&args.exe_name);
            return 1;
        }
    };

    // ── Auto output filename (append or strip the .zx0 extension) ──────────
    let output_filename = match args.output_filename {
        Some(name) => name,
        None => match args.op_mode {
            OpMode::Compress => format!("{}{}", input_filename, ZX0_EXTENSION),
            OpMode::Decompress => match input_filename.strip_suffix(ZX0_EXTENSION) {
                Some(base) if !base.is_empty() => base.to_owned(),
                _ => {
                    eprintln!("Error: Cannot infer an output filename from {}", input_filename);
                    return 1;
                }
            },
        },
    };

    // ── Worker count: -t# or every available core ──────────────────────────
    let threads = if args.threads >= 1 {
        args.threads
    } else {
        std::thread::available_parallelism().map_or(1, |n| n.get())
    };

    let operation_result = match args.op_mode {
        OpMode::Compress => {
            let compressor = Compressor::new()
                .skip(args.skip)
                .quick_mode(args.quick_mode)
                .classic_mode(args.classic_mode)
                .backwards_mode(args.backwards_mode)
                .threads(threads)
                .verbose(zx0::cli::constants::display_level() >= 2);
            zx0::io::compress_filename(
                &input_filename,
                &output_filename,
                &compressor,
                args.backwards_mode,
                args.force_overwrite,
            )
        }
        OpMode::Decompress => {
            let decompressor = Decompressor::new()
                .classic_mode(args.classic_mode)
                .backwards_mode(args.backwards_mode);
            zx0::io::decompress_filename(
                &input_filename,
                &output_filename,
                &decompressor,
                args.backwards_mode,
                args.force_overwrite,
            )
        }
    };

    match operation_result {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

fn main() {
    let argv0 = std::env::args().next().unwrap_or_else(|| "zx0".to_owned());
    let init = detect_alias(&argv0);

    let args = match parse_args(init) {
        Ok(args) => args,
        Err(e) => error_out(&format!("zx0: {}", e)),
    };

    if args.exit_early {
        std::process::exit(0);
    }

    std::process::exit(run(args));
}
