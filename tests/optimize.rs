// Integration tests for the bitstream-size optimizer.
//
// Coverage:
//   - chain shape: strictly decreasing indices, non-decreasing bit counts
//   - coverage: the chain partitions [skip-1, N-1] into contiguous segments
//   - determinism: identical parses for 1, 2, 4, and 8 workers
//   - window dominance: the full window never loses to the quick window
//   - the documented small-input scenarios (all-zero, alternating, ABABA,
//     single byte, skip prefix)

mod common;

use common::{random_bytes, repetitive_text, tokens};
use zx0::{optimize, MAX_OFFSET_ZX0, MAX_OFFSET_ZX7};

// ─────────────────────────────────────────────────────────────────────────────
// Chain invariants
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn chain_indices_decrease_and_bits_never_increase() {
    for (seed, len) in [(1u32, 64usize), (2, 300), (3, 1000)] {
        let input = random_bytes(seed, len, 16);
        let terminal = optimize(&input, 0, MAX_OFFSET_ZX0, 1, false).unwrap();

        let mut walk = Some(&terminal);
        while let Some(block) = walk {
            if let Some(previous) = block.chain() {
                assert!(previous.index() < block.index());
                assert!(previous.bits() <= block.bits());
            }
            walk = block.chain();
        }
    }
}

#[test]
fn chain_partitions_the_parsed_range() {
    for skip in [0usize, 7] {
        let input = repetitive_text(256);
        let terminal = optimize(&input, skip, MAX_OFFSET_ZX0, 1, false).unwrap();

        // Walk root-first: each token starts one past its predecessor's end.
        assert_eq!(terminal.index() as usize, input.len() - 1);
        let parse = tokens(&terminal);
        let mut position = skip as i64 - 1;
        for (length, _) in &parse {
            assert!(*length >= 1);
            position += *length as i64;
        }
        assert_eq!(position, input.len() as i64 - 1);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Determinism across worker counts
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn parse_is_identical_for_any_worker_count() {
    let corpora = [
        random_bytes(11, 400, 8),
        random_bytes(12, 400, 250),
        repetitive_text(700),
    ];
    for input in &corpora {
        let reference = optimize(input, 0, MAX_OFFSET_ZX0, 1, false).unwrap();
        for threads in [2usize, 4, 8] {
            let parallel = optimize(input, 0, MAX_OFFSET_ZX0, threads, false).unwrap();
            assert_eq!(parallel.bits(), reference.bits(), "threads={threads}");
            assert_eq!(tokens(&parallel), tokens(&reference), "threads={threads}");
        }
    }
}

#[test]
fn worker_count_beyond_offset_range_is_harmless() {
    // More workers than candidate offsets: surplus shards stay empty.
    let input = random_bytes(21, 40, 4);
    let narrow = optimize(&input, 0, MAX_OFFSET_ZX0, 64, false).unwrap();
    let single = optimize(&input, 0, MAX_OFFSET_ZX0, 1, false).unwrap();
    assert_eq!(narrow.bits(), single.bits());
    assert_eq!(tokens(&narrow), tokens(&single));
}

// ─────────────────────────────────────────────────────────────────────────────
// Window dominance
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn full_window_never_loses_to_quick_window() {
    for seed in 31..36 {
        let input = random_bytes(seed, 3000, 32);
        let full = optimize(&input, 0, MAX_OFFSET_ZX0, 2, false).unwrap();
        let quick = optimize(&input, 0, MAX_OFFSET_ZX7, 2, false).unwrap();
        assert!(full.bits() <= quick.bits());
    }
}

#[test]
fn quick_window_parse_respects_its_offset_limit() {
    let input = repetitive_text(6000);
    let terminal = optimize(&input, 0, MAX_OFFSET_ZX7, 4, false).unwrap();
    for (_, offset) in tokens(&terminal) {
        assert!(offset as usize <= MAX_OFFSET_ZX7);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Documented small-input scenarios
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn all_zero_input_is_one_literal_and_one_repeat_match() {
    let input = [0u8; 16];
    let terminal = optimize(&input, 0, MAX_OFFSET_ZX0, 1, false).unwrap();
    assert_eq!(tokens(&terminal), vec![(1, 0), (15, 1)]);
    // origin(-1) + literal(1 + gamma(1) + 8) + repeat match(1 + gamma(15))
    assert_eq!(terminal.bits(), 17);
}

#[test]
fn alternating_bytes_use_an_offset_two_match() {
    let input = [0x00, 0xFF, 0x00, 0xFF, 0x00, 0xFF, 0x00, 0xFF];
    let terminal = optimize(&input, 0, MAX_OFFSET_ZX0, 1, false).unwrap();
    assert_eq!(tokens(&terminal), vec![(2, 0), (6, 2)]);
    // origin(-1) + literal(1 + gamma(2) + 16) + fresh match(8 + gamma(1) +
    // gamma(5)); the fresh match's indicator bit is absorbed by the length
    // bit folded into the offset low byte.
    assert_eq!(terminal.bits(), 33);
}

#[test]
fn ababa_parses_as_two_literals_and_an_overlapped_match() {
    let input = [b'A', b'B', b'A', b'B', b'A'];
    let terminal = optimize(&input, 0, MAX_OFFSET_ZX0, 1, false).unwrap();
    assert_eq!(tokens(&terminal), vec![(2, 0), (3, 2)]);
    assert_eq!(terminal.bits(), 31);
}

#[test]
fn single_random_byte_is_a_lone_literal() {
    let input = random_bytes(99, 1, 255);
    let terminal = optimize(&input, 0, MAX_OFFSET_ZX0, 1, false).unwrap();
    assert_eq!(terminal.index(), 0);
    assert_eq!(terminal.offset(), 0);
    let origin = terminal.chain().unwrap();
    assert_eq!(origin.bits(), -1);
    assert!(origin.chain().is_none());
}

#[test]
fn skip_prefix_parse_starts_after_the_prefix() {
    let input = random_bytes(123, 32, 8);
    let skip = 10;
    let terminal = optimize(&input, skip, MAX_OFFSET_ZX0, 1, false).unwrap();
    assert_eq!(terminal.index(), 31);

    // The chain bottoms out at the origin just before the parsed range.
    let mut walk = Some(&terminal);
    let mut origin_index = None;
    while let Some(block) = walk {
        if block.chain().is_none() {
            origin_index = Some(block.index());
        }
        walk = block.chain();
    }
    assert_eq!(origin_index, Some(skip as i32 - 1));
}

#[test]
fn skip_parse_may_reference_the_prefix() {
    // Bytes before the skip point seed the window, so matches can reach
    // back into them.
    let mut input = repetitive_text(64);
    let tail = input[..32].to_vec();
    input.extend_from_slice(&tail);
    let skip = 64;
    let terminal = optimize(&input, skip, MAX_OFFSET_ZX0, 1, false).unwrap();
    assert!(tokens(&terminal).iter().any(|&(_, offset)| offset != 0));
    // The parse with the prefix available is never worse than without it.
    let standalone = optimize(&input[skip..], 0, MAX_OFFSET_ZX0, 1, false).unwrap();
    assert!(terminal.bits() <= standalone.bits());
}
