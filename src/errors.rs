//! Error taxonomy for the triviaq engine.
//!
//! Every expected, recoverable condition is an explicit variant returned to
//! the caller. Ordinary gameplay (a wrong answer, a cash-out) is a status
//! transition, never an error.

use crate::games::types::HintKind;
use thiserror::Error;
use uuid::Uuid;

/// Root error type for all triviaq operations
#[derive(Debug, Error)]
pub enum TriviaqError {
    #[error("game error: {0}")]
    Game(#[from] GameplayError),

    #[error("hint error: {0}")]
    Hint(#[from] HintError),

    #[error("lobby error: {0}")]
    Lobby(#[from] LobbyError),

    #[error("question error: {0}")]
    Question(#[from] QuestionError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Violations of the game session state machine
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameplayError {
    /// Any mutating call against a game in a terminal status
    #[error("game is already finished")]
    AlreadyFinished,
}

/// Hint request failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HintError {
    /// The kind was consumed earlier in this game
    #[error("hint {0} has already been used")]
    AlreadyUsed(HintKind),

    /// Caller passed a kind outside the recognized set
    #[error("unknown hint kind: {0}")]
    UnknownKind(String),
}

/// Game admission failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LobbyError {
    #[error("user {user_id} already has game {game_id} in progress")]
    UserAlreadyPlaying { user_id: String, game_id: Uuid },
}

/// Question bank failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuestionError {
    /// The bank cannot supply a full leveled set
    #[error("question bank cannot supply a full set: no questions at level {level}")]
    InsufficientQuestions { level: usize },

    /// A game was handed a question set that does not cover every level
    #[error("question set must contain {expected} leveled questions, got {got}")]
    IncompleteSet { expected: usize, got: usize },

    /// Collaborator handed over a structurally broken question
    #[error("malformed question {id}: {reason}")]
    Malformed { id: u64, reason: String },
}

/// Storage system errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database open failed: {0}")]
    OpenFailed(String),

    #[error("read failed: {0}")]
    ReadFailed(String),

    #[error("write failed: {0}")]
    WriteFailed(String),

    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

/// Configuration and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {field}: '{value}' ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("failed to save configuration: {0}")]
    SaveFailed(String),
}

impl From<rocksdb::Error> for TriviaqError {
    fn from(e: rocksdb::Error) -> Self {
        TriviaqError::Storage(StorageError::WriteFailed(e.to_string()))
    }
}

/// Convenience type alias for Results
pub type TriviaqResult<T> = Result<T, TriviaqError>;
