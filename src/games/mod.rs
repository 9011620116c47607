pub mod game_question;
pub mod hint_engine;
pub mod prize_table;
pub mod question_bank;
pub mod session;
pub mod types;

pub use game_question::GameQuestion;
pub use hint_engine::HintEngine;
pub use question_bank::{InMemoryQuestionBank, QuestionBank};
pub use session::Game;
pub use types::*;
