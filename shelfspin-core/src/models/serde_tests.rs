//! Serde serialization tests for core types.
//!
//! The CLI's JSON output relies on these field names.

use crate::{CollectionItem, FetchSession, GameDetail};
use std::collections::HashMap;

#[test]
fn test_collection_item_uses_camel_case() {
    let item = CollectionItem::new("13", "Catan", Some("https://cf.geekdo-images.com/t.jpg".into()));
    let json = serde_json::to_value(&item).unwrap();

    assert_eq!(json["id"], "13");
    assert_eq!(json["name"], "Catan");
    assert_eq!(json["thumbnailUrl"], "https://cf.geekdo-images.com/t.jpg");
}

#[test]
fn test_game_detail_roundtrip() {
    let detail = GameDetail::new(1, 5);
    let json = serde_json::to_string(&detail).unwrap();
    assert_eq!(json, r#"{"minPlayers":1,"maxPlayers":5}"#);

    let parsed: GameDetail = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, detail);
}

#[test]
fn test_session_serializes_details_by_id() {
    let mut details = HashMap::new();
    details.insert("13".to_string(), GameDetail::new(3, 4));
    let session = FetchSession::new(
        "alice",
        vec![CollectionItem::new("13", "Catan", None)],
        Vec::new(),
        details,
    );

    let json = serde_json::to_value(&session).unwrap();
    assert_eq!(json["username"], "alice");
    assert_eq!(json["unplayedGames"][0]["id"], "13");
    assert_eq!(json["detailsById"]["13"]["maxPlayers"], 4);
    assert!(json["fetchedAt"].is_string());
}
