#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Dense turn-end clash of an emitted attack against a standing wave.
//!
//! Applied once per turn, after composition has finished. Unlike the
//! subtractive pairing rule used while cards accumulate, the clash
//! classifies peaks by their raw numeric sign: same-sign peaks compete
//! and the margin survives, opposite-sign peaks reinforce each other and
//! both sides take the combined magnitude. The two rules are distinct
//! algorithms and must never be unified.

use crestfall_core::{Condition, Direction, DirectionSplit, EngineOperation, Peak, Wave};

/// Combines two full-domain waves across the inclusive position range.
///
/// Both returned buckets are dense: every position in
/// `[min_position, max_position]` carries a peak, zero-valued where
/// nothing survived. Per position, using raw numeric signs rather than
/// direction tags:
/// - both inputs populated with the same sign: the larger magnitude
///   wins and its margin lands in the bucket of the winner's direction;
///   equal magnitudes leave both slots at zero;
/// - both inputs populated with opposite signs: reinforcement — each
///   side's bucket slot receives the combined magnitude;
/// - one input populated: its magnitude lands in the bucket of its own
///   direction.
///
/// Input peaks outside the domain are ignored. An inverted domain
/// (`min_position > max_position`) yields two empty buckets. Empty
/// operands are recorded as [`Condition::EmptyOperand`] and still
/// produce the zero-filled result.
pub fn resolve(
    wave_a: &Wave,
    wave_b: &Wave,
    min_position: i32,
    max_position: i32,
    conditions: &mut Vec<Condition>,
) -> DirectionSplit {
    if wave_a.is_empty() || wave_b.is_empty() {
        conditions.push(Condition::EmptyOperand {
            operation: EngineOperation::Clash,
        });
    }

    let mut split = DirectionSplit::new();
    if min_position > max_position {
        return split;
    }

    for position in min_position..=max_position {
        split.insert(position, Peak::new(0, Direction::Outgoing));
        split.insert(position, Peak::new(0, Direction::Incoming));

        match (wave_a.peak(position), wave_b.peak(position)) {
            (Some(a), Some(b)) => {
                let same_sign = (a.value() >= 0) == (b.value() >= 0);
                if same_sign {
                    if a.magnitude() > b.magnitude() {
                        let margin = a.magnitude() - b.magnitude();
                        split.insert(position, Peak::new(clamped(margin), a.direction()));
                    } else if b.magnitude() > a.magnitude() {
                        let margin = b.magnitude() - a.magnitude();
                        split.insert(position, Peak::new(clamped(margin), b.direction()));
                    }
                } else {
                    let combined = a.magnitude().saturating_add(b.magnitude());
                    split.insert(position, Peak::new(clamped(combined), a.direction()));
                    split.insert(position, Peak::new(clamped(combined), b.direction()));
                }
            }
            (Some(peak), None) | (None, Some(peak)) => {
                if peak.value() != 0 {
                    split.insert(position, Peak::new(clamped(peak.magnitude()), peak.direction()));
                }
            }
            (None, None) => {}
        }
    }
    split
}

const fn clamped(magnitude: u32) -> i32 {
    if magnitude > i32::MAX as u32 {
        i32::MAX
    } else {
        magnitude as i32
    }
}
