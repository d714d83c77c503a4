#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Stateful accumulator for a side's in-progress combined wave.
//!
//! One composer exists per active side and owns the only mutable state
//! in the engine: the hand wave. Cards are placed onto and withdrawn
//! from the hand through the opposed pairing rule; the hand is confined
//! to non-negative positions and, whenever non-empty, forced to the
//! side's configured attacking direction. Every transition is total —
//! no operation can leave the composer in an invalid state.

use crestfall_core::{Card, Condition, Direction, DirectionSplit, EngineOperation, Peak, Wave};
use crestfall_system_pairing::pair;

/// Accumulates a side's hand wave from placed and withdrawn cards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HandComposer {
    hand: Wave,
    direction: Direction,
}

impl HandComposer {
    /// Creates an empty composer attacking toward the given direction.
    #[must_use]
    pub fn new(direction: Direction) -> Self {
        Self {
            hand: Wave::new(),
            direction,
        }
    }

    /// The side's accumulated hand wave.
    #[must_use]
    pub const fn hand(&self) -> &Wave {
        &self.hand
    }

    /// Direction the hand is forced to whenever it is non-empty.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Reports whether the hand holds no peaks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hand.is_empty()
    }

    /// Places a card onto the hand.
    ///
    /// The card's wave is shifted so its local maximum lands on the
    /// anchor; shifted peaks falling below position zero are dropped and
    /// recorded as [`Condition::DomainUnderflow`]. The shifted wave is
    /// then paired against the hand and the hand rebuilt from the union
    /// of the two result buckets, re-clamped to the non-negative domain
    /// and forced to the composer's direction. The intermediate result
    /// buckets are returned for UI and telemetry use; the core contract
    /// allows ignoring them.
    pub fn place_card(&mut self, card: &Card, conditions: &mut Vec<Condition>) -> DirectionSplit {
        let offset_wave = offset_card_wave(card, conditions);
        let split = pair(&self.hand, &offset_wave, conditions);
        self.rebuild_hand(&split);
        split
    }

    /// Withdraws a previously placed card from the hand.
    ///
    /// Identical to placement except the hand is paired against the
    /// negated offset wave. This inverts a placement exactly as long as
    /// the placement lost nothing to domain clamping; peaks dropped at
    /// the domain floor are not recoverable. That lossy boundary is an
    /// accepted property, never silently repaired.
    pub fn withdraw_card(
        &mut self,
        card: &Card,
        conditions: &mut Vec<Condition>,
    ) -> DirectionSplit {
        let offset_wave = offset_card_wave(card, conditions).negated();
        let split = pair(&self.hand, &offset_wave, conditions);
        self.rebuild_hand(&split);
        split
    }

    /// Projects the hand into an attack wave whose minimum position is 0.
    ///
    /// Pure: the hand itself is never mutated, and calling twice in a
    /// row returns value-equal waves. An empty hand yields an empty wave
    /// plus an [`Condition::EmptyOperand`] record.
    pub fn emit(&self, conditions: &mut Vec<Condition>) -> Wave {
        if self.hand.is_empty() {
            conditions.push(Condition::EmptyOperand {
                operation: EngineOperation::Emit,
            });
            return Wave::new();
        }

        let shift = self.hand.min_position();
        let mut emitted = Wave::new();
        for (position, peak) in self.hand.iter() {
            force_add(&mut emitted, position - shift, peak);
        }
        emitted
    }

    /// Clears the hand back to the empty state.
    pub fn reset(&mut self) {
        self.hand = Wave::new();
    }

    /// Replaces the hand with the union of the two result buckets.
    ///
    /// Positions cannot collide across buckets by construction of the
    /// pairing rule. Negative positions are re-clamped defensively, and
    /// merging re-tags every peak with the composer's direction, which
    /// is exactly the forced direction the hand must end up with.
    fn rebuild_hand(&mut self, split: &DirectionSplit) {
        let mut merged = Wave::new();
        for bucket in [split.outgoing(), split.incoming()] {
            for (position, peak) in bucket.iter() {
                if position < 0 {
                    continue;
                }
                force_add(&mut merged, position, Peak::new(peak.value(), self.direction));
            }
        }
        self.hand = merged;
    }
}

fn offset_card_wave(card: &Card, conditions: &mut Vec<Condition>) -> Wave {
    let offset = card.placement_offset();
    let mut shifted = Wave::new();
    for (position, peak) in card.wave().iter() {
        let target = position.saturating_add(offset);
        if target < 0 {
            conditions.push(Condition::DomainUnderflow {
                position: target,
                value: peak.value(),
            });
            continue;
        }
        force_add(&mut shifted, target, peak);
    }
    shifted
}

fn force_add(wave: &mut Wave, position: i32, peak: Peak) {
    let added = wave.add_peak(position, peak);
    debug_assert!(added.is_ok(), "homogeneous source wave cannot conflict");
}
