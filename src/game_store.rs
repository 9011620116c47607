//! Persistent game rows stored in RocksDB.
//!
//! Layout: one row per game keyed by id, one row per game question keyed by
//! `(game_id, question_id)`, a newest-first index over created_at, and an
//! active-game marker per user that doubles as the storage-level uniqueness
//! constraint for "one in-progress game per user".

use crate::errors::{StorageError, TriviaqResult};
use crate::games::{Game, GameQuestion, GameStatus};
use crate::storage::GameStorage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const GAME_ROW_PREFIX: &str = "game:row:";
const GAME_QUESTION_PREFIX: &str = "game:question:";
const RECENT_GAMES_PREFIX: &[u8] = b"game:index:recent:";
const ACTIVE_GAME_PREFIX: &str = "game:active:";

/// Flat game row matching the persisted-state shape of the session
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameRow {
    pub id: Uuid,
    pub user_id: String,
    pub current_level: usize,
    pub prize: u64,
    pub status: GameStatus,
    pub created_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

fn game_row_key(game_id: Uuid) -> Vec<u8> {
    format!("{}{}", GAME_ROW_PREFIX, game_id).into_bytes()
}

fn game_question_key(game_id: Uuid, question_id: u64) -> Vec<u8> {
    format!("{}{}:{}", GAME_QUESTION_PREFIX, game_id, question_id).into_bytes()
}

fn game_question_prefix(game_id: Uuid) -> Vec<u8> {
    format!("{}{}:", GAME_QUESTION_PREFIX, game_id).into_bytes()
}

fn recent_game_index_key(created_at: DateTime<Utc>, game_id: Uuid) -> Vec<u8> {
    // Sort newest-first by using an inverted timestamp as the primary sort key.
    // Key layout: prefix | inv_millis(be) | game_id(16 bytes)
    let inv_millis = u64::MAX - created_at.timestamp_millis() as u64;
    let mut key = Vec::with_capacity(RECENT_GAMES_PREFIX.len() + 24);
    key.extend_from_slice(RECENT_GAMES_PREFIX);
    key.extend_from_slice(&inv_millis.to_be_bytes());
    key.extend_from_slice(game_id.as_bytes());
    key
}

fn active_game_key(user_id: &str) -> Vec<u8> {
    format!("{}{}", ACTIVE_GAME_PREFIX, user_id).into_bytes()
}

/// Write the game row, its question rows, and the index entries in one batch
pub fn store_game(storage: &GameStorage, game: &Game) -> TriviaqResult<()> {
    let row = GameRow {
        id: game.id(),
        user_id: game.user_id().to_string(),
        current_level: game.current_level(),
        prize: game.prize(),
        status: game.status(),
        created_at: game.created_at(),
        finished_at: game.finished_at(),
    };
    let row_bytes = serde_json::to_vec(&row).map_err(|e| {
        StorageError::WriteFailed(format!("Failed to encode game row {}: {}", row.id, e))
    })?;

    let mut items: Vec<(Vec<u8>, Vec<u8>)> = vec![
        (game_row_key(row.id), row_bytes),
        (recent_game_index_key(row.created_at, row.id), Vec::new()),
    ];

    for question in game.questions() {
        let question_bytes = serde_json::to_vec(question).map_err(|e| {
            StorageError::WriteFailed(format!(
                "Failed to encode question {} of game {}: {}",
                question.question_id(),
                row.id,
                e
            ))
        })?;
        items.push((game_question_key(row.id, question.question_id()), question_bytes));
    }

    let active_key = active_game_key(game.user_id());
    if game.status() == GameStatus::InProgress {
        items.push((active_key, row.id.to_string().into_bytes()));
    } else {
        // The marker is the uniqueness constraint; clear it on any terminal status
        storage.delete(&active_key).ok();
        tracing::debug!(game_id = %row.id, status = %row.status, "clearing active-game marker");
    }

    storage
        .batch_write(&items)
        .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
    Ok(())
}

/// Load and rehydrate a full game session
pub fn load_game(storage: &GameStorage, game_id: Uuid) -> TriviaqResult<Option<Game>> {
    let Some(bytes) = storage.get(&game_row_key(game_id)) else {
        return Ok(None);
    };

    let row: GameRow = serde_json::from_slice(&bytes).map_err(|e| {
        StorageError::CorruptedData(format!("Failed to decode game row {}: {}", game_id, e))
    })?;

    let mut questions: Vec<GameQuestion> = Vec::new();
    for (key, value) in storage.scan_prefix(&game_question_prefix(game_id), None, usize::MAX) {
        let question: GameQuestion = serde_json::from_slice(&value).map_err(|e| {
            StorageError::CorruptedData(format!(
                "Failed to decode question row {}: {}",
                String::from_utf8_lossy(&key),
                e
            ))
        })?;
        questions.push(question);
    }
    questions.sort_by_key(|question| question.level());

    Ok(Some(Game::restore(
        row.id,
        row.user_id,
        questions,
        row.current_level,
        row.status,
        row.prize,
        row.created_at,
        row.finished_at,
    )))
}

/// Id of the user's in-progress game, if the marker is set
pub fn load_active_game_id(storage: &GameStorage, user_id: &str) -> TriviaqResult<Option<Uuid>> {
    let Some(bytes) = storage.get(&active_game_key(user_id)) else {
        return Ok(None);
    };

    let raw = String::from_utf8(bytes).map_err(|e| {
        StorageError::CorruptedData(format!("Invalid active-game marker for {}: {}", user_id, e))
    })?;
    let game_id = raw.parse::<Uuid>().map_err(|e| {
        StorageError::CorruptedData(format!("Invalid active-game marker for {}: {}", user_id, e))
    })?;
    Ok(Some(game_id))
}

/// Newest-first page of game ids with an opaque hex cursor
pub fn load_recent_game_ids(
    storage: &GameStorage,
    cursor_hex: Option<&str>,
    limit: usize,
) -> TriviaqResult<(Vec<Uuid>, Option<String>)> {
    let cursor_bytes = match cursor_hex {
        Some(c) => Some(hex::decode(c).map_err(|e| {
            StorageError::CorruptedData(format!("Invalid cursor hex: {}", e))
        })?),
        None => None,
    };

    let rows = storage.scan_prefix(RECENT_GAMES_PREFIX, cursor_bytes.as_deref(), limit.max(1));

    let mut game_ids = Vec::with_capacity(rows.len());
    let mut next_cursor: Option<String> = None;

    for (key, _value) in rows {
        if key.len() < RECENT_GAMES_PREFIX.len() + 24 {
            tracing::warn!("Skipping malformed recent-index key of {} bytes", key.len());
            continue;
        }

        let id_off = key.len() - 16;
        let id_bytes: [u8; 16] = key[id_off..].try_into().expect("16 byte suffix");
        game_ids.push(Uuid::from_bytes(id_bytes));
        next_cursor = Some(hex::encode(key));
    }

    Ok((game_ids, next_cursor))
}
