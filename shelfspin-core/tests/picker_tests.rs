//! Integration tests for the public picker API.

use shelfspin_core::{pick, CollectionItem, FetchSession, GameDetail, PickOutcome};
use std::collections::HashMap;

#[test]
fn test_pick_from_single_candidate() {
    let mut details = HashMap::new();
    details.insert("266192".to_string(), GameDetail::new(1, 5));
    let session = FetchSession::new(
        "alice",
        vec![CollectionItem::new("266192", "Wingspan", None)],
        Vec::new(),
        details,
    );

    let PickOutcome::Picked(pick) = pick(&session, 4).unwrap() else {
        panic!("expected a pick");
    };
    assert_eq!(pick.winner.id, "266192");
    assert_eq!(pick.candidates, 1);
    assert_eq!(pick.reel.winner_index, 2);
}

#[test]
fn test_pick_rejects_zero_players() {
    let session = FetchSession::new("alice", Vec::new(), Vec::new(), HashMap::new());
    assert!(pick(&session, 0).is_err());
}
