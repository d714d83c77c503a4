//! Behavioural tests for the hand composer's place/withdraw/emit cycle.

use crestfall_core::{Card, Condition, Direction, EngineOperation, Peak, Wave};
use crestfall_system_composer::HandComposer;

fn card(direction: Direction, peaks: &[(i32, i32)], anchor: i32) -> Card {
    let mut wave = Wave::new();
    for (position, value) in peaks {
        wave.add_peak(*position, Peak::new(*value, direction))
            .expect("homogeneous card wave");
    }
    Card::new(wave, anchor)
}

#[test]
fn placement_anchors_the_card_onto_the_shared_axis() {
    let mut composer = HandComposer::new(Direction::Outgoing);
    let mut conditions = Vec::new();

    // Card max position 1, anchor 5: every peak shifts by 4.
    let _ = composer.place_card(
        &card(Direction::Outgoing, &[(0, 3), (1, -2)], 5),
        &mut conditions,
    );

    let hand = composer.hand();
    assert_eq!(hand.direction(), Some(Direction::Outgoing));
    assert_eq!(hand.len(), 2);
    assert!(hand.has_peak_at(4) && hand.has_peak_at(5));
    assert_eq!(hand.peak(4).map(|p| p.magnitude()), Some(3));
    assert_eq!(hand.peak(5).map(|p| p.magnitude()), Some(2));
}

#[test]
fn emit_shifts_the_minimum_position_to_zero() {
    let mut composer = HandComposer::new(Direction::Outgoing);
    let mut conditions = Vec::new();
    let _ = composer.place_card(
        &card(Direction::Outgoing, &[(0, 3), (1, -2)], 5),
        &mut conditions,
    );

    let emitted = composer.emit(&mut conditions);

    assert_eq!(emitted.min_position(), 0);
    assert_eq!(emitted.max_position(), 1);
    assert_eq!(emitted.peak(0).map(|p| p.magnitude()), Some(3));
    assert_eq!(emitted.peak(1).map(|p| p.magnitude()), Some(2));
    assert_eq!(emitted.direction(), Some(Direction::Outgoing));
}

#[test]
fn emit_is_a_pure_projection() {
    let mut composer = HandComposer::new(Direction::Outgoing);
    let mut conditions = Vec::new();
    let _ = composer.place_card(&card(Direction::Outgoing, &[(0, 4)], 2), &mut conditions);
    let hand_before = composer.hand().clone();

    let first = composer.emit(&mut conditions);
    let second = composer.emit(&mut conditions);

    assert_eq!(first, second);
    assert_eq!(composer.hand(), &hand_before);
    assert!(conditions.is_empty());
}

#[test]
fn emitting_an_empty_hand_is_reported_not_fatal() {
    let composer = HandComposer::new(Direction::Outgoing);
    let mut conditions = Vec::new();

    let emitted = composer.emit(&mut conditions);

    assert!(emitted.is_empty());
    assert_eq!(
        conditions,
        vec![Condition::EmptyOperand {
            operation: EngineOperation::Emit,
        }],
    );
}

#[test]
fn domain_safe_withdrawal_restores_the_previous_hand() {
    let mut composer = HandComposer::new(Direction::Outgoing);
    let mut conditions = Vec::new();
    let _ = composer.place_card(&card(Direction::Outgoing, &[(0, 4)], 2), &mut conditions);
    let hand_before = composer.hand().clone();

    let second = card(Direction::Outgoing, &[(0, 3), (1, 5)], 4);
    let _ = composer.place_card(&second, &mut conditions);
    assert_ne!(composer.hand(), &hand_before);

    let _ = composer.withdraw_card(&second, &mut conditions);

    assert_eq!(composer.hand(), &hand_before);
}

#[test]
fn withdrawal_empties_a_single_card_hand() {
    let mut composer = HandComposer::new(Direction::Outgoing);
    let mut conditions = Vec::new();
    let played = card(Direction::Outgoing, &[(0, 3), (1, -2)], 5);

    let _ = composer.place_card(&played, &mut conditions);
    let _ = composer.withdraw_card(&played, &mut conditions);

    assert!(composer.is_empty());
}

#[test]
fn fully_clamped_placement_leaves_the_hand_untouched() {
    let mut composer = HandComposer::new(Direction::Outgoing);
    let mut conditions = Vec::new();
    let _ = composer.place_card(&card(Direction::Outgoing, &[(0, 4)], 2), &mut conditions);
    let hand_before = composer.hand().clone();
    conditions.clear();

    // Anchor below zero shifts the lone peak to a negative position.
    let _ = composer.place_card(&card(Direction::Outgoing, &[(0, 1)], -2), &mut conditions);

    assert_eq!(composer.hand(), &hand_before);
    assert!(conditions
        .iter()
        .any(|c| matches!(c, Condition::DomainUnderflow { .. })));
}

#[test]
fn partially_clamped_placement_keeps_the_surviving_peaks() {
    let mut composer = HandComposer::new(Direction::Outgoing);
    let mut conditions = Vec::new();

    // Offset is -1: the peak at local position 0 lands at -1 and drops,
    // the peak at local position 2 lands at 1 and survives.
    let _ = composer.place_card(
        &card(Direction::Outgoing, &[(0, 2), (2, 6)], 1),
        &mut conditions,
    );

    assert_eq!(composer.hand().len(), 1);
    assert_eq!(composer.hand().peak(1).map(|p| p.magnitude()), Some(6));
    assert!(conditions.contains(&Condition::DomainUnderflow {
        position: -1,
        value: 2,
    }));
}

#[test]
fn hand_never_holds_negative_positions() {
    let mut composer = HandComposer::new(Direction::Outgoing);
    let mut conditions = Vec::new();

    let _ = composer.place_card(
        &card(Direction::Outgoing, &[(0, 2), (3, 9), (5, -1)], 2),
        &mut conditions,
    );
    let _ = composer.withdraw_card(
        &card(Direction::Outgoing, &[(0, 7)], -4),
        &mut conditions,
    );

    for (position, _) in composer.hand().iter() {
        assert!(position >= 0);
    }
}

#[test]
fn intermediate_result_buckets_are_returned_for_telemetry() {
    let mut composer = HandComposer::new(Direction::Outgoing);
    let mut conditions = Vec::new();

    let split = composer.place_card(
        &card(Direction::Outgoing, &[(0, 3)], 2),
        &mut conditions,
    );

    let (outgoing, incoming) = split.into_parts();
    assert_eq!(outgoing.len() + incoming.len(), 1);
}
