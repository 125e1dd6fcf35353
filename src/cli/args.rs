//! Command-line argument parsing for the `zx0` / `dzx0` pair.
//!
//! The entry points are [`parse_args`] (reads `std::env::args()`) and
//! [`parse_args_from`] (takes an explicit slice, suitable for unit tests).
//! Both return a [`ParsedArgs`] value capturing every option and filename
//! discovered during the parse.
//!
//! The front-end accepts one flag per argument (`-fb` is not a valid
//! aggregation), a `+N` skip-prefix argument, and at most two positional
//! filenames.  Bad or unrecognised options return an `Err` whose message
//! begins with `"bad usage: "`.

use anyhow::anyhow;

use crate::cli::arg_utils::read_usize_from_str;
use crate::cli::init::{CliInit, OpMode};

/// Complete set of options and filenames produced by the parsing loop.
///
/// Consumed by the dispatch phase in `main`, which derives missing output
/// names and routes to the file-level compress / decompress operations.
#[derive(Debug, Clone)]
pub struct ParsedArgs {
    /// Resolved operation mode (alias default, possibly overridden by `-d`).
    pub op_mode: OpMode,
    /// Overwrite an existing destination file without failing (`-f`).
    pub force_overwrite: bool,
    /// Emit / expect the classic v1 bitstream (`-c`).
    pub classic_mode: bool,
    /// Compress / decompress backwards (`-b`).
    pub backwards_mode: bool,
    /// Use the reduced ZX7 window (`-q`).
    pub quick_mode: bool,
    /// Number of input bytes to leave uncompressed (`+N`).
    pub skip: usize,
    /// Worker threads for the optimizer; 0 means auto-detect (`-t#`).
    pub threads: usize,
    /// Input filename (first positional argument).
    pub input_filename: Option<String>,
    /// Output filename (second positional argument).
    pub output_filename: Option<String>,
    /// When `true`, `-h`/`-V` was processed; the caller should exit 0.
    pub exit_early: bool,
    /// Program name (argv[0] basename), used by help output.
    pub exe_name: String,
}

/// Parse `std::env::args()` (skipping argv[0]) using `init` as the starting
/// state.
pub fn parse_args(init: CliInit) -> anyhow::Result<ParsedArgs> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    parse_args_from(init, &argv)
}

/// Parse an explicit argument list using `init` as the starting state.
///
/// Callable from tests without touching `std::env`.
pub fn parse_args_from(init: CliInit, argv: &[String]) -> anyhow::Result<ParsedArgs> {
    let mut args = ParsedArgs {
        op_mode: init.op_mode,
        force_overwrite: false,
        classic_mode: false,
        backwards_mode: false,
        quick_mode: false,
        skip: 0,
        threads: 0,
        input_filename: None,
        output_filename: None,
        exit_early: false,
        exe_name: init.exe_name,
    };

    for argument in argv {
        match argument.as_str() {
            "-f" => args.force_overwrite = true,
            "-c" => args.classic_mode = true,
            "-b" => args.backwards_mode = true,
            "-q" => args.quick_mode = true,
            "-d" => args.op_mode = OpMode::Decompress,
            "-h" | "--help" => {
                crate::cli::help::print_version();
                crate::cli::help::print_usage(&args.exe_name);
                args.exit_early = true;
            }
            "-V" | "--version" => {
                crate::cli::help::print_version();
                args.exit_early = true;
            }
            other => {
                if let Some(rest) = other.strip_prefix("-t") {
                    match read_usize_from_str(rest) {
                        Some((threads, "")) if threads >= 1 => args.threads = threads,
                        _ => {
                            return Err(anyhow!(
                                "bad usage: -t expects a thread count of at least 1"
                            ))
                        }
                    }
                } else if let Some(rest) = other.strip_prefix('+') {
                    match read_usize_from_str(rest) {
                        Some((skip, "")) => args.skip = skip,
                        _ => return Err(anyhow!("bad usage: +N expects a byte count")),
                    }
                } else if other.starts_with('-') && other.len() > 1 {
                    return Err(anyhow!("bad usage: unknown option: {}", other));
                } else if args.input_filename.is_none() {
                    args.input_filename = Some(other.to_owned());
                } else if args.output_filename.is_none() {
                    args.output_filename = Some(other.to_owned());
                } else {
                    return Err(anyhow!("bad usage: too many filenames: {}", other));
                }
            }
        }
    }

    if args.op_mode == OpMode::Decompress && args.skip != 0 {
        return Err(anyhow!("bad usage: +N cannot be combined with decompression"));
    }

    Ok(args)
}
