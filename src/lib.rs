//! Triviaq - Ladder Trivia Game Engine
//!
//! Core of a fifteen-question prize-ladder trivia game: the session state
//! machine, the prize table with fireproof floors, one-time hints, and the
//! RocksDB-backed persistence collaborator. HTTP surfaces, rendering and
//! authentication live outside this crate.

pub mod config;
pub mod errors;
pub mod game_store;
pub mod games;
pub mod lobby;
pub mod storage;

pub use config::TriviaqConfig;
pub use errors::{TriviaqError, TriviaqResult};
pub use games::{
    AnswerOutcome, FinishOutcome, Game, GameQuestion, GameStatus, HelpHash, HintEngine, HintKind,
    HintPayload, InMemoryQuestionBank, Letter, Question, QuestionBank,
};
pub use lobby::GameLobby;
pub use storage::GameStorage;
