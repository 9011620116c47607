//! Question pool that supplies the leveled set for a new game.
//!
//! The engine consumes the pool through the `QuestionBank` trait; storage of
//! the pool itself belongs to the caller. The in-memory implementation is
//! what the lobby and the tests use.

use crate::errors::{QuestionError, TriviaqResult};
use crate::games::prize_table::LEVEL_COUNT;
use crate::games::types::Question;
use rand::seq::SliceRandom;

/// Source of leveled questions for game creation
pub trait QuestionBank: Send + Sync {
    /// One question per level 0..14, ordered by level.
    /// Fails with `InsufficientQuestions` when any level has no questions.
    fn draw_ordered_set(&self) -> TriviaqResult<Vec<Question>>;
}

/// Bank holding validated questions bucketed by level
pub struct InMemoryQuestionBank {
    by_level: Vec<Vec<Question>>,
}

impl InMemoryQuestionBank {
    pub fn new() -> Self {
        Self {
            by_level: vec![Vec::new(); LEVEL_COUNT],
        }
    }

    /// Validate and add a question to its level bucket
    pub fn insert(&mut self, question: Question) -> TriviaqResult<()> {
        question.validate()?;
        self.by_level[question.level].push(question);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.by_level.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryQuestionBank {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestionBank for InMemoryQuestionBank {
    fn draw_ordered_set(&self) -> TriviaqResult<Vec<Question>> {
        let mut rng = rand::thread_rng();
        let mut set = Vec::with_capacity(LEVEL_COUNT);

        for level in 0..LEVEL_COUNT {
            let question = self.by_level[level]
                .choose(&mut rng)
                .ok_or(QuestionError::InsufficientQuestions { level })?;
            set.push(question.clone());
        }

        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TriviaqError;

    fn question(id: u64, level: usize) -> Question {
        Question {
            id,
            level,
            text: format!("Question {}?", id),
            answers: [
                "first".to_string(),
                "second".to_string(),
                "third".to_string(),
                "fourth".to_string(),
            ],
            correct_index: (id % 4) as usize,
        }
    }

    fn full_bank() -> InMemoryQuestionBank {
        let mut bank = InMemoryQuestionBank::new();
        let mut id = 0;
        for level in 0..LEVEL_COUNT {
            for _ in 0..3 {
                bank.insert(question(id, level)).expect("valid question");
                id += 1;
            }
        }
        bank
    }

    #[test]
    fn test_draw_covers_every_level_in_order() {
        let bank = full_bank();
        let set = bank.draw_ordered_set().expect("full bank");

        assert_eq!(set.len(), LEVEL_COUNT);
        for (level, question) in set.iter().enumerate() {
            assert_eq!(question.level, level);
        }
    }

    #[test]
    fn test_draw_fails_on_missing_level() {
        let mut bank = InMemoryQuestionBank::new();
        // Leave level 8 empty
        for level in (0..LEVEL_COUNT).filter(|&l| l != 8) {
            bank.insert(question(level as u64, level)).unwrap();
        }

        match bank.draw_ordered_set() {
            Err(TriviaqError::Question(QuestionError::InsufficientQuestions { level })) => {
                assert_eq!(level, 8)
            }
            other => panic!("Expected InsufficientQuestions, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_insert_rejects_malformed_question() {
        let mut bank = InMemoryQuestionBank::new();
        let mut bad = question(1, 2);
        bad.correct_index = 9;

        assert!(bank.insert(bad).is_err());
        assert!(bank.is_empty());
    }
}
