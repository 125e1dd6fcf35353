//! High-level one-shot interfaces: the [`Compressor`] and [`Decompressor`]
//! builders.
//!
//! A `Compressor` bundles every knob the format offers — prefix skipping,
//! the quick (reduced-window) search, the classic v1 bitstream, backwards
//! compression, worker threads, progress output — and runs the optimizer
//! and serializer in one call.  `Decompressor` mirrors the mode knobs on
//! the decoding side.

use crate::compress::encode;
use crate::decompress::{decode, DecompressError};
use crate::optimize::{optimize, Zx0Error};
use crate::{MAX_OFFSET_ZX0, MAX_OFFSET_ZX7};

/// Output of one compression run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionResult {
    /// The compressed bytes.
    pub output: Vec<u8>,
    /// Minimum gap, in bytes, between the end of the compressed data and
    /// the end of the destination buffer for safe in-place decompression.
    pub delta: usize,
}

// ─────────────────────────────────────────────────────────────────────────────
// Compressor
// ─────────────────────────────────────────────────────────────────────────────

/// Configurable ZX0 compressor.
///
/// ```no_run
/// let result = zx0::Compressor::new()
///     .quick_mode(true)
///     .threads(8)
///     .compress(b"data to pack")
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct Compressor {
    skip: usize,
    quick_mode: bool,
    classic_mode: bool,
    backwards_mode: bool,
    threads: usize,
    verbose: bool,
}

impl Default for Compressor {
    fn default() -> Self {
        Compressor {
            skip: 0,
            quick_mode: false,
            classic_mode: false,
            backwards_mode: false,
            threads: 1,
            verbose: false,
        }
    }
}

impl Compressor {
    /// Creates a compressor with the default settings: no skip, full-window
    /// search, v2 bitstream, forward direction, one worker, no progress.
    pub fn new() -> Self {
        Self::default()
    }

    /// Leaves the first `skip` input bytes uncompressed; they still seed the
    /// match window.  In backwards mode the skip applies to the input's end.
    pub fn skip(mut self, skip: usize) -> Self {
        self.skip = skip;
        self
    }

    /// Restricts the match window to the ZX7 limit (2176) for a faster,
    /// slightly less effective search.
    pub fn quick_mode(mut self, quick_mode: bool) -> Self {
        self.quick_mode = quick_mode;
        self
    }

    /// Emits the classic v1 bitstream (no inverted offset-MSB bits).
    pub fn classic_mode(mut self, classic_mode: bool) -> Self {
        self.classic_mode = classic_mode;
        self
    }

    /// Compresses back-to-front, for decompressors that unpack downwards
    /// through memory.
    pub fn backwards_mode(mut self, backwards_mode: bool) -> Self {
        self.backwards_mode = backwards_mode;
        self
    }

    /// Number of worker threads for the optimizer.  The output is identical
    /// for any count.
    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Prints the optimizer's progress bar to stdout.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Compresses `input` and returns the bytes plus the in-place `delta`.
    pub fn compress(&self, input: &[u8]) -> Result<CompressionResult, Zx0Error> {
        let offset_limit = if self.quick_mode {
            MAX_OFFSET_ZX7
        } else {
            MAX_OFFSET_ZX0
        };
        let invert_mode = !self.classic_mode && !self.backwards_mode;

        if self.backwards_mode {
            let mut data = input.to_vec();
            data.reverse();
            let terminal = optimize(&data, self.skip, offset_limit, self.threads, self.verbose)?;
            let (mut output, delta) = encode(&terminal, &data, self.skip, true, invert_mode);
            output.reverse();
            Ok(CompressionResult { output, delta })
        } else {
            let terminal = optimize(input, self.skip, offset_limit, self.threads, self.verbose)?;
            let (output, delta) = encode(&terminal, input, self.skip, false, invert_mode);
            Ok(CompressionResult { output, delta })
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Decompressor
// ─────────────────────────────────────────────────────────────────────────────

/// Configurable ZX0 decompressor.
///
/// The mode knobs must match the ones used for compression; a stream
/// carries no header to discover them from.
#[derive(Debug, Clone, Default)]
pub struct Decompressor {
    classic_mode: bool,
    backwards_mode: bool,
    prefix: Vec<u8>,
}

impl Decompressor {
    /// Creates a decompressor for forward v2 streams.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes the classic v1 bitstream.
    pub fn classic_mode(mut self, classic_mode: bool) -> Self {
        self.classic_mode = classic_mode;
        self
    }

    /// Decodes a backwards-compressed stream.
    pub fn backwards_mode(mut self, backwards_mode: bool) -> Self {
        self.backwards_mode = backwards_mode;
        self
    }

    /// Pre-seeds the match window for streams compressed with a skip
    /// offset.  The prefix bytes are not part of the returned output.
    pub fn prefix(mut self, prefix: &[u8]) -> Self {
        self.prefix = prefix.to_vec();
        self
    }

    /// Decompresses `input`.
    pub fn decompress(&self, input: &[u8]) -> Result<Vec<u8>, DecompressError> {
        let invert_mode = !self.classic_mode && !self.backwards_mode;

        if self.backwards_mode {
            let mut data = input.to_vec();
            data.reverse();
            let mut output = decode(&data, &self.prefix, true, invert_mode)?;
            output.reverse();
            Ok(output)
        } else {
            decode(input, &self.prefix, false, invert_mode)
        }
    }
}
