//! Bitstream-size optimizer: a dynamic-programming search over every legal
//! parse of the input into literal runs and back-references, minimizing the
//! total encoded bit length under the ZX0 cost model.
//!
//! The search scans the input once.  For every byte index it maintains, per
//! candidate offset, the most recent block ending in a literal run and the
//! most recent block ending in a match at that offset, plus the length of
//! the contiguous match currently running there.  Three transitions feed the
//! per-index minimum:
//!
//! - **repeat-offset match** — a match that reuses the offset of the match
//!   preceding the last literal run, paying only a flag bit and a length;
//! - **fresh match** — a match at an explicitly encoded offset, where a
//!   shared best-length table picks the cheapest usable length at or below
//!   the current run length;
//! - **literal run** — closing the bytes since the last match at this
//!   offset as literals.
//!
//! Offsets are independent within one index step, so the scan fans out over
//! a worker pool: the offset range is split into contiguous shards, each
//! worker owns its shard's state slice exclusively, and the shard optima are
//! merged in ascending shard order.  The result is bit-identical for any
//! worker count.

use std::fmt;
use std::io::Write;
use std::sync::Arc;

use rayon::prelude::*;

use crate::block::Block;
use crate::{INITIAL_OFFSET, MAX_INPUT_SIZE};

/// Progress resolution: one dot per 1/50th of the input, two withheld at
/// each end of the bar.
const MAX_SCALE: usize = 50;

// ─────────────────────────────────────────────────────────────────────────────
// Error type
// ─────────────────────────────────────────────────────────────────────────────

/// Errors returned for ill-formed optimizer arguments.
///
/// The search itself cannot fail: once the preconditions hold it always
/// terminates with a block.  Worker panics (allocation failure, broken
/// invariants) are not translated and abort the optimization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zx0Error {
    /// `skip` does not leave at least one byte to parse (this also covers
    /// an empty input).
    SkipOutOfRange { skip: usize, input_size: usize },
    /// The input exceeds [`MAX_INPUT_SIZE`].
    InputTooLarge { input_size: usize },
    /// The maximum offset must be at least 1.
    InvalidOffsetLimit,
    /// The worker count must be at least 1.
    InvalidThreadCount,
    /// The worker thread pool could not be built.
    ThreadPool,
}

impl fmt::Display for Zx0Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Zx0Error::SkipOutOfRange { skip, input_size } => write!(
                f,
                "skip offset {} is out of range for a {}-byte input",
                skip, input_size
            ),
            Zx0Error::InputTooLarge { input_size } => write!(
                f,
                "input of {} bytes exceeds the supported maximum of {} bytes",
                input_size, MAX_INPUT_SIZE
            ),
            Zx0Error::InvalidOffsetLimit => f.write_str("offset limit must be at least 1"),
            Zx0Error::InvalidThreadCount => f.write_str("worker thread count must be at least 1"),
            Zx0Error::ThreadPool => f.write_str("failed to build the worker thread pool"),
        }
    }
}

impl std::error::Error for Zx0Error {}

// ─────────────────────────────────────────────────────────────────────────────
// Cost primitives
// ─────────────────────────────────────────────────────────────────────────────

/// Encoded size in bits of `value` under interlaced Elias-gamma coding:
/// one stop bit, plus a continuation/data bit pair per bit below the MSB.
#[inline]
pub fn elias_gamma_bits(value: u32) -> i32 {
    debug_assert!(value >= 1);
    (1 + 2 * value.ilog2()) as i32
}

/// Largest offset usable at byte `index`: no further back than the data
/// already seen, and never beyond the format's `offset_limit`.
#[inline]
pub fn offset_ceiling(index: usize, offset_limit: usize) -> usize {
    index.max(1).min(offset_limit)
}

// ─────────────────────────────────────────────────────────────────────────────
// Per-offset lane state
// ─────────────────────────────────────────────────────────────────────────────

/// Scan state for one candidate offset.
///
/// Each lane is owned by exactly one worker within an index step; the lane
/// array is partitioned into contiguous shards, so workers never touch each
/// other's lanes.
#[derive(Clone, Default)]
struct OffsetLane {
    /// Most recent block ending in a literal run, seen while this offset's
    /// match run was alive.
    last_literal: Option<Arc<Block>>,
    /// Most recent block ending in a match at this offset.
    last_match: Option<Arc<Block>>,
    /// Length of the contiguous match currently running at this offset;
    /// reset on the first mismatching byte.
    match_length: u32,
}

/// Reads the cumulative bits of the settled optimum at `at`.
///
/// Every index in `[skip, current)` holds a block once its step completes;
/// the scan only looks this far back.
#[inline]
fn settled_bits(optimal: &[Option<Arc<Block>>], at: usize) -> i32 {
    optimal[at]
        .as_ref()
        .expect("settled parse index must hold a block")
        .bits()
}

/// Scans one contiguous range of offsets at the current `index` and returns
/// the cheapest block the range produced, if any.
///
/// `first_offset` is the offset of `lanes[0]`.  `optimal` covers indices
/// `[0, index)` and is read-only here.  `best_length` is this worker's
/// best-length table; slot 2 is primed with 2 and the table is extended on
/// demand up to the largest match run in the range, with the local size
/// restarting at 2 every step.
fn scan_lanes(
    input: &[u8],
    index: usize,
    skip: usize,
    first_offset: usize,
    lanes: &mut [OffsetLane],
    optimal: &[Option<Arc<Block>>],
    best_length: &mut [u32],
) -> Option<Arc<Block>> {
    let mut best: Option<Arc<Block>> = None;
    let mut best_length_size: usize = 2;

    for (slot, lane) in lanes.iter_mut().enumerate() {
        let offset = first_offset + slot;

        if index != skip && offset <= index && input[index] == input[index - offset] {
            // The match run at this offset continues through `index`.

            // Repeat-offset: close the literal run and reuse this offset.
            // Costs a flag bit and the length only.
            if let Some(literal) = lane.last_literal.clone() {
                let length = (index as i32 - literal.index()) as usize;
                let bits = literal.bits() + 1 + elias_gamma_bits(length as u32);
                let block = Arc::new(Block::new(bits, index as i32, offset as u32, Some(literal)));
                if best.as_ref().map_or(true, |b| b.bits() > bits) {
                    best = Some(block.clone());
                }
                lane.last_match = Some(block);
            }

            // Fresh match: pick the cheapest length not exceeding the run.
            lane.match_length += 1;
            if lane.match_length > 1 {
                let run = lane.match_length as usize;
                if best_length_size < run {
                    // Extend the table.  Ties prefer the longer length.
                    let mut bits = settled_bits(optimal, index - best_length[best_length_size] as usize)
                        + elias_gamma_bits(best_length[best_length_size] - 1);
                    loop {
                        best_length_size += 1;
                        let bits2 = settled_bits(optimal, index - best_length_size)
                            + elias_gamma_bits(best_length_size as u32 - 1);
                        if bits2 <= bits {
                            best_length[best_length_size] = best_length_size as u32;
                            bits = bits2;
                        } else {
                            best_length[best_length_size] = best_length[best_length_size - 1];
                        }
                        if best_length_size >= run {
                            break;
                        }
                    }
                }

                let length = best_length[run] as usize;
                let bits = settled_bits(optimal, index - length)
                    + 8
                    + elias_gamma_bits(((offset - 1) / 128 + 1) as u32)
                    + elias_gamma_bits(length as u32 - 1);

                // A repeat-offset block already planted at this index is kept
                // unless the fresh match is strictly cheaper.
                let replace = match &lane.last_match {
                    Some(held) => held.index() != index as i32 || held.bits() > bits,
                    None => true,
                };
                if replace {
                    let chain = optimal[index - length].clone();
                    let block =
                        Arc::new(Block::new(bits, index as i32, offset as u32, chain));
                    if best.as_ref().map_or(true, |b| b.bits() > bits) {
                        best = Some(block.clone());
                    }
                    lane.last_match = Some(block);
                }
            }
        } else {
            // Mismatch: the run dies, and the bytes since the last match at
            // this offset become a literal-run candidate.
            lane.match_length = 0;
            if let Some(matched) = lane.last_match.clone() {
                let length = (index as i32 - matched.index()) as usize;
                let bits =
                    matched.bits() + 1 + elias_gamma_bits(length as u32) + 8 * length as i32;
                let block = Arc::new(Block::new(bits, index as i32, 0, Some(matched)));
                if best.as_ref().map_or(true, |b| b.bits() > bits) {
                    best = Some(block.clone());
                }
                lane.last_literal = Some(block);
            }
        }
    }

    best
}

// ─────────────────────────────────────────────────────────────────────────────
// Entry point
// ─────────────────────────────────────────────────────────────────────────────

/// Searches all legal parses of `input[skip..]` and returns the terminal
/// block of a minimum-bit parse.
///
/// `offset_limit` caps back-reference distances
/// ([`MAX_OFFSET_ZX0`](crate::MAX_OFFSET_ZX0) for the full format,
/// [`MAX_OFFSET_ZX7`](crate::MAX_OFFSET_ZX7) in quick mode).  `threads`
/// workers share each index step; the chosen parse does not depend on the
/// worker count.  When `verbose` is set a 48-dot progress bar is written to
/// stdout.
///
/// Walking the returned block's [`chain`](Block::chain) back to the origin
/// yields the parse in reverse; the serializer in
/// [`compress`](crate::compress) consumes it directly.
pub fn optimize(
    input: &[u8],
    skip: usize,
    offset_limit: usize,
    threads: usize,
    verbose: bool,
) -> Result<Arc<Block>, Zx0Error> {
    let input_size = input.len();
    if skip >= input_size {
        return Err(Zx0Error::SkipOutOfRange { skip, input_size });
    }
    if input_size > MAX_INPUT_SIZE {
        return Err(Zx0Error::InputTooLarge { input_size });
    }
    if offset_limit == 0 {
        return Err(Zx0Error::InvalidOffsetLimit);
    }
    if threads == 0 {
        return Err(Zx0Error::InvalidThreadCount);
    }

    let ceiling = offset_ceiling(input_size - 1, offset_limit);
    let mut lanes: Vec<OffsetLane> = vec![OffsetLane::default(); ceiling + 1];
    let mut optimal: Vec<Option<Arc<Block>>> = vec![None; input_size];

    // One best-length table per worker, reused across index steps.  Only
    // slot 2 needs priming: higher slots are always rewritten before use.
    let mut scratch: Vec<Vec<u32>> = (0..threads)
        .map(|_| {
            let mut table = vec![0u32; input_size.max(3)];
            table[2] = 2;
            table
        })
        .collect();

    // The parse starts as if a match at the initial offset had just ended,
    // which is what lets a literal run open at `skip`.
    lanes[INITIAL_OFFSET].last_match = Some(Arc::new(Block::origin(skip)));

    let pool = if threads > 1 {
        Some(
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|_| Zx0Error::ThreadPool)?,
        )
    } else {
        None
    };

    let mut dots = 2;
    if verbose {
        print!("[");
        let _ = std::io::stdout().flush();
    }

    for index in skip..input_size {
        let max_offset = offset_ceiling(index, offset_limit);
        let (settled, current) = optimal.split_at_mut(index);
        let settled: &[Option<Arc<Block>>] = settled;
        let lane_range = &mut lanes[1..=max_offset];

        let best = match &pool {
            Some(pool) => {
                let shard = max_offset / threads + 1;
                let shard_best: Vec<Option<Arc<Block>>> = pool.install(|| {
                    lane_range
                        .par_chunks_mut(shard)
                        .zip(scratch.par_iter_mut())
                        .enumerate()
                        .map(|(nth, (shard_lanes, best_length))| {
                            scan_lanes(
                                input,
                                index,
                                skip,
                                1 + nth * shard,
                                shard_lanes,
                                settled,
                                best_length,
                            )
                        })
                        .collect()
                });
                // Ascending shard order; the first-encountered minimum wins
                // ties, matching the single-worker scan exactly.
                let mut best: Option<Arc<Block>> = None;
                for candidate in shard_best.into_iter().flatten() {
                    if best.as_ref().map_or(true, |b| b.bits() > candidate.bits()) {
                        best = Some(candidate);
                    }
                }
                best
            }
            None => scan_lanes(input, index, skip, 1, lane_range, settled, &mut scratch[0]),
        };
        current[0] = best;

        if verbose && index * MAX_SCALE / input_size > dots {
            print!(".");
            let _ = std::io::stdout().flush();
            dots += 1;
        }
    }

    if verbose {
        println!("]");
    }

    Ok(optimal[input_size - 1]
        .take()
        .expect("a block always ends at the final index"))
}
