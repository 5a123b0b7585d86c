use dungeondoor::game::{Action, GameError, GameState};

mod common;

// Play a few turns, save, and resume from disk as a new process would.
#[test]
fn resume_continues_where_play_stopped() {
    let (_td, store) = common::temp_store();
    let d = common::dungeon();

    let (mut s, is_new) = store.load_or_new("alice", &d).unwrap();
    assert!(is_new);
    for _ in 0..5 {
        match common::aggressive(&s) {
            Some(act) => d.handle_action(&mut s, act).unwrap(),
            None => break,
        }
    }
    store.save("alice", &s).unwrap();

    let (resumed, is_new) = store.load_or_new("alice", &d).unwrap();
    assert!(!is_new);
    assert_eq!(resumed, s);

    // Other players are unaffected
    let (_, bob_new) = store.load_or_new("bob", &d).unwrap();
    assert!(bob_new);
}

#[test]
fn save_file_is_readable_json_with_timestamp() {
    let (_td, store) = common::temp_store();
    let d = common::dungeon();
    let mut s = d.new_session_with_seed(5);
    d.handle_action(&mut s, Action::GotoShop).unwrap();
    store.save("carol", &s).unwrap();

    let path = store.path_for("carol").unwrap();
    let content = std::fs::read_to_string(&path).expect("save exists");
    let v: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    assert!(v.get("saved_at").is_some());
    assert_eq!(v["session"]["state"], "Shop");
    assert_eq!(v["session"]["seed"], 5);

    let save = store.load_save("carol").unwrap().expect("present");
    assert_eq!(save.session.state, GameState::Shop);
}

#[test]
fn resume_clamps_hand_edited_hp() {
    let (_td, store) = common::temp_store();
    let d = common::dungeon();
    let mut s = d.new_session_with_seed(5);
    s.player.hp = 500;
    store.save("dave", &s).unwrap();
    let (resumed, _) = store.load_or_new("dave", &d).unwrap();
    assert_eq!(resumed.player.hp, resumed.player.max_hp);
}

#[test]
fn invalid_player_names_are_refused() {
    let (_td, store) = common::temp_store();
    let d = common::dungeon();
    let s = d.new_session_with_seed(1);
    assert!(matches!(
        store.save("../../etc/passwd", &s),
        Err(GameError::InvalidPlayerName(_))
    ));
    assert!(matches!(
        store.load_or_new("", &d),
        Err(GameError::InvalidPlayerName(_))
    ));
}
