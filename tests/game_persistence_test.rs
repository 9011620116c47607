//! End-to-end test: a game admitted by the lobby, played mid-way with hints,
//! survives a store/reload cycle against a real RocksDB directory with its
//! answer layouts and hint state intact.

use std::sync::Arc;

use triviaq::errors::{LobbyError, TriviaqError};
use triviaq::game_store::{load_active_game_id, load_game, load_recent_game_ids, store_game};
use triviaq::games::prize_table::LEVEL_COUNT;
use triviaq::{
    GameLobby, GameStatus, GameStorage, HintKind, InMemoryQuestionBank, Question,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Three questions per level, enough for several games
fn seeded_bank() -> InMemoryQuestionBank {
    let mut bank = InMemoryQuestionBank::new();
    let mut id = 0;
    for level in 0..LEVEL_COUNT {
        for variant in 0..3 {
            bank.insert(Question {
                id,
                level,
                text: format!("Level {} question {}?", level, variant),
                answers: [
                    format!("answer {}-0", id),
                    format!("answer {}-1", id),
                    format!("answer {}-2", id),
                    format!("answer {}-3", id),
                ],
                correct_index: (id % 4) as usize,
            })
            .expect("valid question");
            id += 1;
        }
    }
    bank
}

fn answer_correctly(game: &mut triviaq::Game) {
    let key = game
        .current_game_question()
        .expect("game in progress")
        .correct_answer_key()
        .to_string();
    game.answer(&key).expect("in progress");
}

#[test]
fn test_mid_game_round_trip_preserves_session_state() {
    init_tracing();
    let dir = tempfile::tempdir().expect("temp dir");
    let storage = GameStorage::open(dir.path()).expect("open DB");
    let lobby = GameLobby::new(Arc::new(seeded_bank()));

    // Play into the session: two correct answers, two hints
    let mut game = lobby.create_game("player-1").expect("admitted");
    answer_correctly(&mut game);
    answer_correctly(&mut game);
    game.use_help(HintKind::FiftyFifty).expect("first use");
    game.use_help(HintKind::AudienceHelp).expect("first use");

    store_game(&storage, &game).expect("store");

    // Reload and compare the whole session
    let loaded = load_game(&storage, game.id())
        .expect("load")
        .expect("game row present");

    assert_eq!(loaded, game);
    assert_eq!(loaded.status(), GameStatus::InProgress);
    assert_eq!(loaded.current_level(), 2);
    assert_eq!(loaded.prize(), 200);

    // The active question keeps its exact answer layout and hint payloads
    let original_question = game.current_game_question().expect("in progress");
    let loaded_question = loaded.current_game_question().expect("in progress");
    assert_eq!(loaded_question.variants(), original_question.variants());
    assert_eq!(
        loaded_question.correct_answer_key(),
        original_question.correct_answer_key()
    );
    assert_eq!(loaded_question.help_hash(), original_question.help_hash());
    assert!(loaded.hint_used(HintKind::FiftyFifty));
    assert!(loaded.hint_used(HintKind::AudienceHelp));
    assert!(!loaded.hint_used(HintKind::FriendCall));

    // The reloaded session keeps enforcing once-per-game hints
    let mut loaded = loaded;
    assert!(matches!(
        loaded.use_help(HintKind::FiftyFifty),
        Err(TriviaqError::Hint(_))
    ));
}

#[test]
fn test_active_marker_and_recent_index_lifecycle() {
    init_tracing();
    let dir = tempfile::tempdir().expect("temp dir");
    let storage = GameStorage::open(dir.path()).expect("open DB");
    let lobby = GameLobby::new(Arc::new(seeded_bank()));

    let mut game = lobby.create_game("player-1").expect("admitted");
    store_game(&storage, &game).expect("store");

    // While in progress the storage-level marker points at the game
    assert_eq!(
        load_active_game_id(&storage, "player-1").expect("marker"),
        Some(game.id())
    );

    // A second admission attempt is refused with the existing game id
    match lobby.create_game("player-1") {
        Err(TriviaqError::Lobby(LobbyError::UserAlreadyPlaying { game_id, .. })) => {
            assert_eq!(game_id, game.id());
        }
        other => panic!("Expected UserAlreadyPlaying, got {:?}", other.map(|g| g.id())),
    }

    // Cash out, persist, release: marker cleared, slot free, index keeps the game
    answer_correctly(&mut game);
    let outcome = game.take_money().expect("in progress");
    assert_eq!(outcome.status, GameStatus::Money);
    assert_eq!(outcome.prize, 100);

    store_game(&storage, &game).expect("store");
    lobby.release("player-1", game.id());

    assert_eq!(load_active_game_id(&storage, "player-1").expect("marker"), None);
    let (recent, _) = load_recent_game_ids(&storage, None, 10).expect("scan");
    assert!(recent.contains(&game.id()));

    let finished = load_game(&storage, game.id()).expect("load").expect("present");
    assert_eq!(finished.status(), GameStatus::Money);
    assert_eq!(finished.prize(), 100);
    assert!(finished.finished_at().is_some());
    assert!(finished.current_game_question().is_none());

    lobby.create_game("player-1").expect("slot is free again");
}
