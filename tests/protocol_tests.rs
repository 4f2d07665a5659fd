//! Message contract and room registry.

mod common;

use common::{init_logging, pid};
use prsi_engine::{
    ClientMessage, Envelope, ErrorKind, Recipient, RoomConfig, RoomId, RoomRegistry,
    RulesEngine, ServerMessage,
};

fn registry() -> RoomRegistry {
    RoomRegistry::new(RoomConfig::default().with_seed(21)).unwrap()
}

fn decode(json: &str) -> ClientMessage {
    serde_json::from_str(json).unwrap()
}

fn errors_for<'a>(out: &'a [Envelope], player: &str) -> Vec<&'a ServerMessage> {
    out.iter()
        .filter(|e| e.to == Recipient::Player(pid(player)))
        .map(|e| &e.message)
        .filter(|m| matches!(m, ServerMessage::Error { .. }))
        .collect()
}

/// Join, start, then a wrong-turn draw is reported only to its sender.
#[test]
fn test_join_start_and_reject() {
    init_logging();
    let rooms = registry();
    let id = RoomId::new("table");

    let out = rooms.handle(&id, &pid("a"), decode(r#"{"type":"join_room","name":"Ann"}"#));
    assert_eq!(out[0].to, Recipient::Room);
    rooms.handle(&id, &pid("b"), decode(r#"{"type":"join_room","name":"Bob"}"#));

    let out = rooms.handle(&id, &pid("a"), decode(r#"{"type":"start_game"}"#));
    let ServerMessage::GameState(snapshot) = &out[0].message else {
        panic!("first envelope should be the snapshot");
    };
    assert!(snapshot.started);
    assert_eq!(snapshot.current_player, 0);
    assert_eq!(snapshot.players.len(), 2);

    let private: Vec<_> = out
        .iter()
        .filter(|e| matches!(e.to, Recipient::Player(_)))
        .collect();
    // Hand and points for each of the two players.
    assert_eq!(private.len(), 4);

    let out = rooms.handle(&id, &pid("b"), decode(r#"{"type":"draw_card"}"#));
    assert_eq!(out.len(), 1);
    let errors = errors_for(&out, "b");
    assert_eq!(errors.len(), 1);
    let ServerMessage::Error { kind, message } = errors[0] else {
        unreachable!();
    };
    assert_eq!(*kind, ErrorKind::IllegalAction);
    assert_eq!(message, "it is not b's turn");
}

/// The snapshot JSON carries the public fields and no hands.
#[test]
fn test_snapshot_json_shape() {
    let rooms = registry();
    let id = RoomId::new("t");
    rooms.join(&id, pid("a"), "Ann").unwrap();
    rooms.join(&id, pid("b"), "Bob").unwrap();

    let out = rooms.handle(&id, &pid("a"), ClientMessage::StartGame);
    let json = serde_json::to_value(&out[0]).unwrap();

    assert_eq!(json["to"], "room");
    assert_eq!(json["message"]["type"], "game_state");
    let data = &json["message"]["data"];
    for key in [
        "roomId",
        "players",
        "started",
        "currentPlayer",
        "topCard",
        "currentSuit",
        "currentValue",
        "direction",
        "deckSize",
        "discardSize",
        "drawStack",
        "lastPlayWasSpecial",
        "winner",
    ] {
        assert!(data.get(key).is_some(), "missing {key}");
    }
    assert_eq!(data["players"][0]["handSize"], 4);
    assert!(data["players"][0].get("hand").is_none());
}

/// A bad chosen value is an invalid-argument error.
#[test]
fn test_bad_chosen_value() {
    let rooms = registry();
    let id = RoomId::new("t");
    rooms.join(&id, pid("a"), "Ann").unwrap();
    rooms.join(&id, pid("b"), "Bob").unwrap();
    rooms.handle(&id, &pid("a"), ClientMessage::StartGame);

    let out = rooms.handle(
        &id,
        &pid("a"),
        decode(r#"{"type":"play_card","card_id":0,"chosen_value":"Z"}"#),
    );
    let json = serde_json::to_value(&out[0].message).unwrap();
    assert_eq!(json["data"]["kind"], "invalid_argument");
}

/// The private view tracks the player's own hand.
#[test]
fn test_player_view_after_draw() {
    let rooms = registry();
    let id = RoomId::new("t");
    rooms.join(&id, pid("a"), "Ann").unwrap();
    rooms.join(&id, pid("b"), "Bob").unwrap();
    rooms.handle(&id, &pid("a"), ClientMessage::StartGame);

    let out = rooms.handle(&id, &pid("a"), ClientMessage::DrawCard);
    let hand = out
        .iter()
        .find_map(|e| match (&e.to, &e.message) {
            (Recipient::Player(p), ServerMessage::PlayerHand { hand, .. }) if *p == pid("a") => {
                Some(hand.clone())
            }
            _ => None,
        })
        .unwrap();
    assert_eq!(hand.len(), 5);

    let view = rooms
        .with_room(&id, |room| room.player_view(&pid("a")))
        .flatten()
        .unwrap();
    assert_eq!(view.hand, hand);
    assert_eq!(view.total_points, 0);
    // Not a's turn any more.
    assert!(view.playable.is_empty());

    // b is on turn now and is told what they can play.
    let hint = out
        .iter()
        .find_map(|e| match (&e.to, &e.message) {
            (Recipient::Player(p), ServerMessage::PlayerHand { playable, .. }) if *p == pid("b") => {
                Some(playable.clone())
            }
            _ => None,
        })
        .unwrap();
    let expected = rooms
        .with_room(&id, |room| room.rules().legal_plays(room.state(), &pid("b")))
        .unwrap();
    assert_eq!(hint, expected);
}

/// The last player out removes the room.
#[test]
fn test_room_torn_down_when_empty() {
    let rooms = registry();
    let id = RoomId::new("t");
    rooms.join(&id, pid("a"), "Ann").unwrap();

    let out = rooms.handle(&id, &pid("a"), ClientMessage::LeaveRoom);
    assert_eq!(out.len(), 1);
    assert!(rooms.is_empty());
    assert!(rooms.get(&id).is_none());
}
