#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Crestfall wave-combat engine.
//!
//! This crate defines the value vocabulary that connects the pure
//! resolution systems: signed [`Peak`]s collected into
//! direction-homogeneous [`Wave`]s, [`Card`]s that anchor a local wave
//! onto the shared position axis, the [`DirectionSplit`] pair produced
//! by both combination algorithms, and the [`Condition`] records through
//! which every non-fatal anomaly is reported. Systems never panic and
//! never abort a multi-peak operation because of one problematic peak;
//! they append conditions to a caller-owned buffer and keep going, so
//! the aggregate result always reflects all the valid peaks.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque two-valued tag naming the side a peak's damage is aimed at.
///
/// The engine never interprets the variants; their meaning is assigned
/// by the caller. A composer is configured with the variant that counts
/// as its own attacking side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Damage travelling away from the side that produced the wave.
    Outgoing,
    /// Damage travelling toward the side that produced the wave.
    Incoming,
}

impl Direction {
    /// Returns the opposite direction tag.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Outgoing => Self::Incoming,
            Self::Incoming => Self::Outgoing,
        }
    }
}

/// A single signed magnitude tagged with a direction.
///
/// The sign participates in combination arithmetic; only the magnitude
/// ever becomes damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Peak {
    value: i32,
    direction: Direction,
}

impl Peak {
    /// Creates a new peak from a signed value and a direction tag.
    #[must_use]
    pub const fn new(value: i32, direction: Direction) -> Self {
        Self { value, direction }
    }

    /// Signed value carried by the peak.
    #[must_use]
    pub const fn value(&self) -> i32 {
        self.value
    }

    /// Direction tag carried by the peak.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Absolute value of the peak, the quantity that becomes damage.
    #[must_use]
    pub const fn magnitude(&self) -> u32 {
        self.value.unsigned_abs()
    }

    /// Returns a copy with the numeric sign flipped.
    ///
    /// The direction tag is deliberately unchanged: direction flips are
    /// always performed explicitly by the caller, never implied by
    /// negation. Saturates at the value extremes instead of
    /// overflowing.
    #[must_use]
    pub const fn negated(&self) -> Self {
        Self {
            value: self.value.saturating_neg(),
            direction: self.direction,
        }
    }
}

/// A sparse, position-indexed collection of peaks sharing one direction.
///
/// A freshly constructed wave has no direction and adopts the direction
/// of the first inserted peak. Once a direction is fixed, inserting a
/// conflicting peak is refused without mutation and reported as a
/// [`Condition::DirectionMismatch`]. Iteration is position-ascending.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Wave {
    peaks: BTreeMap<i32, Peak>,
    direction: Option<Direction>,
}

impl Wave {
    /// Creates an empty wave with no direction.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Direction shared by every contained peak, `None` while unset.
    #[must_use]
    pub const fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Reports whether the wave contains no peaks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty()
    }

    /// Number of populated positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.peaks.len()
    }

    /// Inserts a peak at the provided position.
    ///
    /// An empty, direction-less wave adopts the peak's direction. A peak
    /// whose direction conflicts with the wave's fixed direction is
    /// refused: the wave is left untouched and the refusal is returned
    /// as a [`Condition`] for the caller to record. Inserting at an
    /// occupied position overwrites the existing peak. Zero-valued peaks
    /// are storable; filtering them is the combination algorithms' job,
    /// not the container's.
    pub fn add_peak(&mut self, position: i32, peak: Peak) -> Result<(), Condition> {
        match self.direction {
            Some(direction) if direction != peak.direction() => {
                Err(Condition::DirectionMismatch {
                    position,
                    wave_direction: direction,
                    peak_direction: peak.direction(),
                })
            }
            _ => {
                self.direction = Some(peak.direction());
                let _ = self.peaks.insert(position, peak);
                Ok(())
            }
        }
    }

    /// Removes the peak at the provided position, reporting success.
    ///
    /// Removing the last peak returns the wave to the direction-less
    /// empty state, so a later insertion adopts its peak's direction
    /// afresh.
    pub fn remove_peak(&mut self, position: i32) -> bool {
        let removed = self.peaks.remove(&position).is_some();
        if self.peaks.is_empty() {
            self.direction = None;
        }
        removed
    }

    /// Returns the peak stored at the provided position, if any.
    #[must_use]
    pub fn peak(&self, position: i32) -> Option<Peak> {
        self.peaks.get(&position).copied()
    }

    /// Reports whether a peak occupies the provided position.
    #[must_use]
    pub fn has_peak_at(&self, position: i32) -> bool {
        self.peaks.contains_key(&position)
    }

    /// Smallest populated position, or `0` for the empty wave.
    ///
    /// The zero fallback is a documented degenerate case, not an error.
    #[must_use]
    pub fn min_position(&self) -> i32 {
        self.peaks.keys().next().copied().unwrap_or(0)
    }

    /// Largest populated position, or `0` for the empty wave.
    #[must_use]
    pub fn max_position(&self) -> i32 {
        self.peaks.keys().next_back().copied().unwrap_or(0)
    }

    /// Iterates over `(position, peak)` pairs in ascending position order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, Peak)> + '_ {
        self.peaks.iter().map(|(position, peak)| (*position, *peak))
    }

    /// Returns a new wave with every peak's value sign-flipped.
    ///
    /// Direction is preserved, matching [`Peak::negated`]. Used to undo
    /// a previously applied card.
    #[must_use]
    pub fn negated(&self) -> Self {
        Self {
            peaks: self
                .peaks
                .iter()
                .map(|(position, peak)| (*position, peak.negated()))
                .collect(),
            direction: self.direction,
        }
    }

    /// Forces the wave's direction, rewriting every contained peak.
    ///
    /// Total: succeeds on any wave, including the empty one.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = Some(direction);
        for peak in self.peaks.values_mut() {
            *peak = Peak::new(peak.value(), direction);
        }
    }
}

/// A wave plus the absolute position its local maximum must align to.
///
/// The card's wave is authored in local coordinates; placing the card
/// shifts every peak by [`Card::placement_offset`] so that the wave's
/// largest populated position lands on the anchor. Immutable once
/// constructed. The direction-homogeneity invariant is expected to hold
/// already on the authored wave; validating authored content is the
/// card supplier's responsibility.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    wave: Wave,
    anchor_position: i32,
}

impl Card {
    /// Creates a card from an authored wave and an anchor position.
    #[must_use]
    pub const fn new(wave: Wave, anchor_position: i32) -> Self {
        Self {
            wave,
            anchor_position,
        }
    }

    /// The card's authored wave in local coordinates.
    #[must_use]
    pub const fn wave(&self) -> &Wave {
        &self.wave
    }

    /// Absolute position the card's local maximum aligns to when placed.
    #[must_use]
    pub const fn anchor_position(&self) -> i32 {
        self.anchor_position
    }

    /// Shift that maps the wave's local coordinates onto the shared axis.
    ///
    /// Saturates at the position extremes instead of overflowing.
    #[must_use]
    pub fn placement_offset(&self) -> i32 {
        self.anchor_position.saturating_sub(self.wave.max_position())
    }
}

/// A flattened hit instruction consumable by an external damage pipeline.
///
/// `Target` is the damage pipeline's opaque handle; the engine never
/// inspects it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hit<Target> {
    /// Resolved target the damage is applied to.
    pub target: Target,
    /// Non-negative damage magnitude.
    pub damage: u32,
    /// Position the hit originated from; hits are ordered by this index.
    pub order_index: i32,
}

/// The pair of direction-partitioned waves produced by a combination.
///
/// Both algorithms bucket every surviving peak into the wave matching
/// the peak's own direction, so each bucket is homogeneous by
/// construction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectionSplit {
    outgoing: Wave,
    incoming: Wave,
}

impl DirectionSplit {
    /// Creates a split with two empty buckets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bucket holding peaks tagged with the provided direction.
    #[must_use]
    pub const fn wave(&self, direction: Direction) -> &Wave {
        match direction {
            Direction::Outgoing => &self.outgoing,
            Direction::Incoming => &self.incoming,
        }
    }

    /// Bucket holding outgoing-direction peaks.
    #[must_use]
    pub const fn outgoing(&self) -> &Wave {
        &self.outgoing
    }

    /// Bucket holding incoming-direction peaks.
    #[must_use]
    pub const fn incoming(&self) -> &Wave {
        &self.incoming
    }

    /// Routes a peak into the bucket matching its own direction.
    ///
    /// An occupied position in the target bucket is overwritten.
    pub fn insert(&mut self, position: i32, peak: Peak) {
        let bucket = match peak.direction() {
            Direction::Outgoing => &mut self.outgoing,
            Direction::Incoming => &mut self.incoming,
        };
        let added = bucket.add_peak(position, peak);
        debug_assert!(added.is_ok(), "bucket direction always matches routed peak");
    }

    /// Consumes the split, yielding `(outgoing, incoming)` buckets.
    #[must_use]
    pub fn into_parts(self) -> (Wave, Wave) {
        (self.outgoing, self.incoming)
    }
}

/// Engine operations referenced by [`Condition::EmptyOperand`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EngineOperation {
    /// Incremental opposed pairing of two sparse waves.
    Pairing,
    /// Dense turn-end clash of an attack against a standing wave.
    Clash,
    /// Projection of a composer's hand into an emitted attack wave.
    Emit,
}

/// Non-fatal conditions reported by engine operations.
///
/// No condition aborts the operation that produced it; each peak is
/// evaluated independently and the primary result reflects all the
/// valid peaks. Callers that require strict validation must pre-validate
/// their cards and waves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum Condition {
    /// A peak's direction conflicted with a wave's fixed direction; the
    /// insertion was refused and the wave left unchanged.
    #[error(
        "peak direction {peak_direction:?} conflicts with wave direction \
         {wave_direction:?} at position {position}"
    )]
    DirectionMismatch {
        /// Position the refused insertion targeted.
        position: i32,
        /// Direction already fixed on the wave.
        wave_direction: Direction,
        /// Direction carried by the refused peak.
        peak_direction: Direction,
    },
    /// An offset card peak landed below position zero and was dropped.
    #[error("peak of value {value} dropped at negative position {position}")]
    DomainUnderflow {
        /// Negative position the peak would have occupied.
        position: i32,
        /// Signed value of the dropped peak.
        value: i32,
    },
    /// An operation received an empty operand; the result is still the
    /// well-defined empty or zero-filled wave.
    #[error("{operation:?} invoked with an empty operand")]
    EmptyOperand {
        /// Operation that observed the empty operand.
        operation: EngineOperation,
    },
    /// No target was resolvable for a peak's direction; the peak's hit
    /// was skipped while the rest of the sequence still generated.
    #[error("no target resolvable for direction {direction:?} at position {position}")]
    UnresolvableTarget {
        /// Position of the skipped peak.
        position: i32,
        /// Direction that failed to resolve.
        direction: Direction,
    },
}
