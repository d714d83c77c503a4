#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Flattens resolved waves into an ordered sequence of hit instructions.
//!
//! The generator is the last engine stage before the external damage
//! pipeline: it never touches entity state and resolves targets only
//! through the injected resolver function.

use crestfall_core::{Condition, Direction, Hit, Wave};

/// Flattens the provided waves into hits ordered by position.
///
/// Every non-zero peak resolves its target through `resolve_target`; a
/// direction with no resolvable target skips that peak alone, recorded
/// as [`Condition::UnresolvableTarget`], while the rest of the sequence
/// still generates. Damage is the peak's magnitude and the order index
/// its position. The combined list is stably sorted ascending by order
/// index, so hits sharing a position retain the order their waves were
/// passed in. Zero-valued peaks, such as the dense clash output's empty
/// slots, emit nothing.
pub fn generate<Target, Resolver>(
    waves: &[Wave],
    resolve_target: Resolver,
    conditions: &mut Vec<Condition>,
) -> Vec<Hit<Target>>
where
    Resolver: Fn(Direction) -> Option<Target>,
{
    let mut hits = Vec::new();
    for wave in waves {
        for (position, peak) in wave.iter() {
            if peak.value() == 0 {
                continue;
            }
            match resolve_target(peak.direction()) {
                Some(target) => hits.push(Hit {
                    target,
                    damage: peak.magnitude(),
                    order_index: position,
                }),
                None => conditions.push(Condition::UnresolvableTarget {
                    position,
                    direction: peak.direction(),
                }),
            }
        }
    }
    // Vec::sort_by_key is stable, preserving input wave order on ties.
    hits.sort_by_key(|hit| hit.order_index);
    hits
}
