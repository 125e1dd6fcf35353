//! `zx0` — a pure-Rust implementation of Einar Saukas' ZX0 compression
//! format: an optimal LZ77/LZSS-family compressor aimed at tight
//! decompressors on 8-bit CPUs, plus the matching decoder and a
//! command-line front-end.
//!
//! # Crate layout
//!
//! | Module       | Contents |
//! |--------------|----------|
//! | `block`      | Parse-graph node: a cut point in the parse with its cumulative bit cost. |
//! | `optimize`   | Exhaustive bitstream-size optimizer (dynamic programming over all offsets). |
//! | `compress`   | Bitstream serializer: interlaced Elias-gamma packing of a chosen parse. |
//! | `decompress` | Bitstream decoder (pure inverse of the serializer). |
//! | `compressor` | `Compressor` / `Decompressor` builders and one-shot results. |
//! | `io`         | File-level compress / decompress operations for the CLI. |
//! | `cli`        | Command-line argument parsing, alias detection, and display macros. |
//!
//! # Using the library
//!
//! Most callers want the [`Compressor`] builder:
//!
//! ```no_run
//! let packed = zx0::Compressor::new()
//!     .quick_mode(false)
//!     .threads(4)
//!     .compress(b"some data")
//!     .unwrap();
//! let restored = zx0::decompress(&packed.output).unwrap();
//! ```
//!
//! or the top-level [`compress`](compress()) / [`decompress`](decompress())
//! shortcuts, which apply the default settings.
//!
//! The optimizer guarantees the smallest possible output *in bits* for the
//! ZX0 format: it searches every legal split of the input into literal runs
//! and back-references, including the repeat-offset encoding, and is
//! deterministic for any worker-thread count.

pub mod block;
pub mod cli;
pub mod compress;
pub mod compressor;
pub mod decompress;
pub mod io;
pub mod optimize;

// ── Version constants ─────────────────────────────────────────────────────────
pub const ZX0_VERSION_MAJOR: u32 = 2;
pub const ZX0_VERSION_MINOR: u32 = 2;
pub const ZX0_VERSION_STRING: &str = "2.2";

/// Returns the runtime version string.
pub fn version_string() -> &'static str {
    ZX0_VERSION_STRING
}

// ── Format constants ──────────────────────────────────────────────────────────

/// Offset the repeat-offset encoding starts from; the parse behaves as if a
/// match at this offset had just ended before the first byte.
pub const INITIAL_OFFSET: usize = 1;

/// Maximum back-reference distance of the ZX0 format (255 * 128).
pub const MAX_OFFSET_ZX0: usize = 32640;

/// Reduced maximum back-reference distance used by quick mode
/// (the ZX7 window: 17 * 128).
pub const MAX_OFFSET_ZX7: usize = 2176;

/// Largest input the optimizer accepts.  Bit costs are tracked in `i32`;
/// a worst-case all-literal parse needs just over 9 bits per input byte,
/// so 128 MiB keeps every cumulative count comfortably in range.
pub const MAX_INPUT_SIZE: usize = 128 << 20;

// ── Top-level re-exports ──────────────────────────────────────────────────────

pub use block::Block;
pub use compressor::{CompressionResult, Compressor, Decompressor};
pub use decompress::DecompressError;
pub use optimize::{elias_gamma_bits, offset_ceiling, optimize, Zx0Error};

/// Compress `input` with the default settings.
///
/// This is a shortcut for:
///
/// ```rust
/// # let input = b"x";
/// let packed = zx0::Compressor::new().compress(input).map(|r| r.output);
/// # packed.unwrap();
/// ```
///
/// For prefix skipping, quick/classic/backwards modes, worker threads, or
/// the in-place decompression `delta`, use the [`Compressor`] builder.
pub fn compress(input: &[u8]) -> Result<Vec<u8>, Zx0Error> {
    Compressor::new().compress(input).map(|result| result.output)
}

/// Decompress `input` with the default settings (forward, v2 bitstream).
pub fn decompress(input: &[u8]) -> Result<Vec<u8>, DecompressError> {
    Decompressor::new().decompress(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortcut_round_trip() {
        let input = b"the quick brown fox jumps over the lazy dog, the lazy dog";
        let packed = compress(input).unwrap();
        assert_eq!(decompress(&packed).unwrap(), input);
    }

    #[test]
    fn shortcut_rejects_empty_input() {
        assert!(compress(&[]).is_err());
    }
}
