//! Game session state machine.
//!
//! A `Game` owns its fifteen shuffled questions and is mutated only through
//! `answer`, `use_help`, `take_money` and `timeout`. Reaching any terminal
//! status freezes the session: level and prize stop changing and every
//! mutating call afterwards fails with `AlreadyFinished`.

use crate::errors::{GameplayError, HintError, QuestionError, TriviaqResult};
use crate::games::game_question::GameQuestion;
use crate::games::hint_engine::HintEngine;
use crate::games::prize_table::{self, LEVEL_COUNT};
use crate::games::question_bank::QuestionBank;
use crate::games::types::{AnswerOutcome, FinishOutcome, GameStatus, HintKind, HintPayload};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One player's run up the prize ladder
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Game {
    id: Uuid,
    /// Identity of the owning player; the session holds no user state
    user_id: String,
    /// One shuffled question per level, fixed at creation
    questions: Vec<GameQuestion>,
    current_level: usize,
    status: GameStatus,
    prize: u64,
    created_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
}

impl Game {
    /// Start a session from an already-drawn ordered question set
    pub fn new(user_id: impl Into<String>, questions: Vec<GameQuestion>) -> TriviaqResult<Self> {
        if questions.len() != LEVEL_COUNT {
            return Err(QuestionError::IncompleteSet {
                expected: LEVEL_COUNT,
                got: questions.len(),
            }
            .into());
        }
        for (level, question) in questions.iter().enumerate() {
            if question.level() != level {
                return Err(QuestionError::Malformed {
                    id: question.question_id(),
                    reason: format!("expected level {}, got {}", level, question.level()),
                }
                .into());
            }
        }

        let game = Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            questions,
            current_level: 0,
            status: GameStatus::InProgress,
            prize: 0,
            created_at: Utc::now(),
            finished_at: None,
        };
        tracing::debug!(game_id = %game.id, user_id = %game.user_id, "game created");
        Ok(game)
    }

    /// Draw a fresh leveled set from the bank and shuffle each question
    pub fn from_bank(user_id: impl Into<String>, bank: &dyn QuestionBank) -> TriviaqResult<Self> {
        let questions = bank
            .draw_ordered_set()?
            .into_iter()
            .map(GameQuestion::new)
            .collect();
        Self::new(user_id, questions)
    }

    /// Rehydrate a session from persisted rows
    pub(crate) fn restore(
        id: Uuid,
        user_id: String,
        questions: Vec<GameQuestion>,
        current_level: usize,
        status: GameStatus,
        prize: u64,
        created_at: DateTime<Utc>,
        finished_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            user_id,
            questions,
            current_level,
            status,
            prize,
            created_at,
            finished_at,
        }
    }

    /// Evaluate the player's option for the active question.
    ///
    /// Unrecognized options count as incorrect. The prize tracks completed
    /// levels only; a fail pays the fireproof floor.
    pub fn answer(&mut self, letter: &str) -> TriviaqResult<AnswerOutcome> {
        self.ensure_in_progress()?;

        let correct = self.questions[self.current_level].is_correct(letter);
        if !correct {
            self.close(
                GameStatus::Fail,
                prize_table::fireproof_prize_below(self.current_level),
            );
        } else if prize_table::is_last_level(self.current_level) {
            self.close(GameStatus::Won, prize_table::prize_for(self.current_level));
        } else {
            self.current_level += 1;
            self.prize = prize_table::prize_for(self.current_level - 1);
            tracing::debug!(game_id = %self.id, level = self.current_level, "advanced");
        }

        Ok(AnswerOutcome {
            status: self.status,
            current_level: self.current_level,
            prize: self.prize,
        })
    }

    /// Request a hint for the active question with the default distributions
    pub fn use_help(&mut self, kind: HintKind) -> TriviaqResult<HintPayload> {
        self.use_help_with(&HintEngine::default(), kind)
    }

    /// Request a hint computed by the given engine.
    ///
    /// Each kind is usable once per game: a kind consumed at an earlier
    /// level stays spent for every later question.
    pub fn use_help_with(
        &mut self,
        engine: &HintEngine,
        kind: HintKind,
    ) -> TriviaqResult<HintPayload> {
        self.ensure_in_progress()?;

        if self.hint_used(kind) {
            return Err(HintError::AlreadyUsed(kind).into());
        }
        engine.apply(&mut self.questions[self.current_level], kind)
    }

    /// Cash out the running total and end the game
    pub fn take_money(&mut self) -> TriviaqResult<FinishOutcome> {
        self.ensure_in_progress()?;

        let prize = if self.current_level > 0 {
            prize_table::prize_for(self.current_level - 1)
        } else {
            0
        };
        self.close(GameStatus::Money, prize);
        Ok(FinishOutcome {
            status: self.status,
            prize: self.prize,
        })
    }

    /// Externally driven expiry; pays like a fail but keeps its own status
    pub fn timeout(&mut self) -> TriviaqResult<FinishOutcome> {
        self.ensure_in_progress()?;

        self.close(
            GameStatus::Timeout,
            prize_table::fireproof_prize_below(self.current_level),
        );
        Ok(FinishOutcome {
            status: self.status,
            prize: self.prize,
        })
    }

    /// Whether the session has outlived the configured wall-clock limit
    pub fn out_of_time(&self, limit: chrono::Duration) -> bool {
        self.status == GameStatus::InProgress && Utc::now() - self.created_at > limit
    }

    /// A hint kind is spent once any question's help hash records it
    pub fn hint_used(&self, kind: HintKind) -> bool {
        self.questions
            .iter()
            .any(|question| question.help_hash().contains(kind))
    }

    pub fn finished(&self) -> bool {
        self.status.is_terminal()
    }

    /// The active question; absent once the game is terminal
    pub fn current_game_question(&self) -> Option<&GameQuestion> {
        if self.status == GameStatus::InProgress {
            self.questions.get(self.current_level)
        } else {
            None
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn current_level(&self) -> usize {
        self.current_level
    }

    pub fn prize(&self) -> u64 {
        self.prize
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    pub(crate) fn questions(&self) -> &[GameQuestion] {
        &self.questions
    }

    fn ensure_in_progress(&self) -> Result<(), GameplayError> {
        if self.status.is_terminal() {
            return Err(GameplayError::AlreadyFinished);
        }
        Ok(())
    }

    fn close(&mut self, status: GameStatus, prize: u64) {
        self.status = status;
        self.prize = prize;
        self.finished_at = Some(Utc::now());
        tracing::info!(
            game_id = %self.id,
            user_id = %self.user_id,
            status = %status,
            level = self.current_level,
            prize,
            "game finished"
        );
    }
}
