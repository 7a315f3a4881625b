use super::*;

/// Tests splitting an identifier with a session suffix.
///
/// Expected: prefix, verb and serial separated
#[test]
fn splits_verb_and_session() {
    let command = RouteTable::default().parse("bs_fire_1_2:17").unwrap();

    assert_eq!(command.family, GameFamily::Battleship);
    assert_eq!(command.prefix, "bs_");
    assert_eq!(command.verb, "fire_1_2");
    assert_eq!(command.session_id, Some(17));
    assert_eq!(command.payload, Payload::Empty);
}

/// Tests an identifier without a session suffix.
///
/// Expected: no serial
#[test]
fn session_suffix_is_optional() {
    let command = RouteTable::default().parse("blackjack_hit_42").unwrap();

    assert_eq!(command.verb, "hit_42");
    assert_eq!(command.session_id, None);
}

/// Tests identifiers that match a prefix but are malformed.
///
/// Expected: Err(Unrecognized) for an empty verb or a non-numeric serial
#[test]
fn rejects_malformed_identifiers() {
    let table = RouteTable::default();

    assert!(matches!(table.parse("col_"), Err(EngineError::Unrecognized(_))));
    assert!(matches!(table.parse("col_:3"), Err(EngineError::Unrecognized(_))));
    assert!(matches!(table.parse("col_3:abc"), Err(EngineError::Unrecognized(_))));
}

/// Tests that built identifiers parse back to the same parts.
///
/// Expected: verb and serial preserved
#[test]
fn control_ids_parse_back() {
    let id = control_id("ttt_", "4", 9);

    let command = RouteTable::default().parse(&id).unwrap();

    assert_eq!(id, "ttt_4:9");
    assert_eq!(command.verb, "4");
    assert_eq!(command.session_id, Some(9));
}
