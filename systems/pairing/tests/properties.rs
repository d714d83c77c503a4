//! Property-based suite for the opposed pairing rule.

use crestfall_core::{Direction, Peak, Wave};
use crestfall_system_pairing::pair;
use proptest::prelude::*;

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Outgoing), Just(Direction::Incoming)]
}

fn wave_strategy() -> impl Strategy<Value = Wave> {
    (
        direction_strategy(),
        prop::collection::btree_map(-16i32..16, -50i32..50, 0..8),
    )
        .prop_map(|(direction, entries)| {
            let mut wave = Wave::new();
            for (position, value) in entries {
                wave.add_peak(position, Peak::new(value, direction))
                    .expect("uniform direction cannot conflict");
            }
            wave
        })
}

proptest! {
    #[test]
    fn buckets_are_direction_homogeneous(a in wave_strategy(), b in wave_strategy()) {
        let mut conditions = Vec::new();
        let split = pair(&a, &b, &mut conditions);

        for (_, peak) in split.outgoing().iter() {
            prop_assert_eq!(peak.direction(), Direction::Outgoing);
        }
        for (_, peak) in split.incoming().iter() {
            prop_assert_eq!(peak.direction(), Direction::Incoming);
        }
    }

    #[test]
    fn no_zero_valued_peaks_survive(a in wave_strategy(), b in wave_strategy()) {
        let mut conditions = Vec::new();
        let split = pair(&a, &b, &mut conditions);

        for (_, peak) in split.outgoing().iter().chain(split.incoming().iter()) {
            prop_assert_ne!(peak.value(), 0);
        }
    }

    #[test]
    fn buckets_never_collide_and_cover_the_union(a in wave_strategy(), b in wave_strategy()) {
        let mut conditions = Vec::new();
        let split = pair(&a, &b, &mut conditions);

        for position in -16i32..16 {
            let in_outgoing = split.outgoing().has_peak_at(position);
            let in_incoming = split.incoming().has_peak_at(position);
            prop_assert!(
                !(in_outgoing && in_incoming),
                "position {} present in both buckets", position,
            );
            if in_outgoing || in_incoming {
                prop_assert!(
                    a.has_peak_at(position) || b.has_peak_at(position),
                    "position {} appeared from nowhere", position,
                );
            }
        }
    }

    #[test]
    fn surviving_value_is_the_raw_difference(a in wave_strategy(), b in wave_strategy()) {
        let mut conditions = Vec::new();
        let split = pair(&a, &b, &mut conditions);

        for position in -16i32..16 {
            let expected = match (a.peak(position), b.peak(position)) {
                (Some(pa), Some(pb)) => pa.value() - pb.value(),
                (Some(pa), None) => pa.value(),
                (None, Some(pb)) => -pb.value(),
                (None, None) => continue,
            };
            let survivor = split
                .outgoing()
                .peak(position)
                .or_else(|| split.incoming().peak(position));
            let actual = survivor.map_or(0, |peak| peak.value());
            prop_assert_eq!(actual, expected);
        }
    }

    #[test]
    fn pairing_is_deterministic(a in wave_strategy(), b in wave_strategy()) {
        let mut first_conditions = Vec::new();
        let mut second_conditions = Vec::new();
        let first = pair(&a, &b, &mut first_conditions);
        let second = pair(&a, &b, &mut second_conditions);
        prop_assert_eq!(first, second);
        prop_assert_eq!(first_conditions, second_conditions);
    }
}
