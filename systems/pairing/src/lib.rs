#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Stateless opposed pairing of two sparse waves.
//!
//! This is the incremental consolidation rule used every time a card is
//! placed onto or withdrawn from a composer's accumulating hand. It is
//! deliberately distinct from the dense, sign-based clash rule applied
//! at turn end; the two algorithms must never be unified.

use std::collections::BTreeSet;

use crestfall_core::{Condition, DirectionSplit, EngineOperation, Peak, Wave};

/// Combines two sparse waves position by position.
///
/// For every position present in either input:
/// - present in both: the raw difference `a - b` survives with `a`'s
///   direction when positive, with `b`'s flipped direction when
///   negative, and cancels exactly when zero;
/// - present only in `wave_a`: the peak survives unchanged;
/// - present only in `wave_b`: the peak is re-expressed in `wave_a`'s
///   frame of reference, value negated and direction flipped.
///
/// Surviving non-zero peaks are partitioned by their own (possibly
/// flipped) direction; zero-valued peaks are dropped entirely. The
/// function is total: any pair of inputs, including two empty waves,
/// yields exactly two (possibly empty) buckets. Empty operands are
/// recorded as [`Condition::EmptyOperand`] for observability only.
pub fn pair(wave_a: &Wave, wave_b: &Wave, conditions: &mut Vec<Condition>) -> DirectionSplit {
    if wave_a.is_empty() || wave_b.is_empty() {
        conditions.push(Condition::EmptyOperand {
            operation: EngineOperation::Pairing,
        });
    }

    let positions: BTreeSet<i32> = wave_a
        .iter()
        .map(|(position, _)| position)
        .chain(wave_b.iter().map(|(position, _)| position))
        .collect();

    let mut split = DirectionSplit::new();
    for position in positions {
        if let Some(peak) = combine(wave_a.peak(position), wave_b.peak(position)) {
            if peak.value() != 0 {
                split.insert(position, peak);
            }
        }
    }
    split
}

fn combine(a: Option<Peak>, b: Option<Peak>) -> Option<Peak> {
    match (a, b) {
        (Some(a), Some(b)) => {
            // Widen before subtracting: extreme-magnitude operands must
            // saturate, matching the clash rule's overflow policy.
            let raw = i64::from(a.value()) - i64::from(b.value());
            if raw > 0 {
                Some(Peak::new(clamped(raw), a.direction()))
            } else if raw < 0 {
                Some(Peak::new(clamped(raw), b.direction().flipped()))
            } else {
                None
            }
        }
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(Peak::new(
            b.value().saturating_neg(),
            b.direction().flipped(),
        )),
        (None, None) => None,
    }
}

const fn clamped(raw: i64) -> i32 {
    if raw > i32::MAX as i64 {
        i32::MAX
    } else if raw < i32::MIN as i64 {
        i32::MIN
    } else {
        raw as i32
    }
}
