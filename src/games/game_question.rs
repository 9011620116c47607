//! A question as it appears inside one game: a fixed answer shuffle plus
//! the hint state accumulated while the question is active.

use crate::games::types::{HelpHash, HintPayload, Letter, Question};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One question instance owned by a game session.
///
/// `letter_map` is built once at creation and never reshuffled: the letter
/// hiding the correct answer must stay stable for the whole life of the
/// question, no matter how often the variants are read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameQuestion {
    question: Question,
    /// letter_map[i] = index into `question.answers` shown under letter i
    letter_map: [usize; 4],
    help_hash: HelpHash,
}

impl GameQuestion {
    /// Wrap a question with a fresh random answer layout
    pub fn new(question: Question) -> Self {
        let mut letter_map = [0, 1, 2, 3];
        letter_map.shuffle(&mut rand::thread_rng());
        Self::with_layout(question, letter_map)
    }

    /// Wrap a question with an explicit layout (deterministic callers, tests)
    pub fn with_layout(question: Question, letter_map: [usize; 4]) -> Self {
        let mut seen = [false; 4];
        for &answer_index in &letter_map {
            assert!(answer_index < 4 && !seen[answer_index], "layout must be a permutation");
            seen[answer_index] = true;
        }
        Self {
            question,
            letter_map,
            help_hash: HelpHash::default(),
        }
    }

    /// Letter-to-answer-text mapping in display order
    pub fn variants(&self) -> BTreeMap<Letter, &str> {
        Letter::ALL
            .iter()
            .map(|&letter| {
                (
                    letter,
                    self.question.answers[self.letter_map[letter.index()]].as_str(),
                )
            })
            .collect()
    }

    /// Check a caller-supplied option; fails closed on anything outside a-d
    pub fn is_correct(&self, letter: &str) -> bool {
        Letter::parse(letter).map_or(false, |l| l == self.correct_answer_key())
    }

    /// The letter currently hiding the correct answer; stable after creation
    pub fn correct_answer_key(&self) -> Letter {
        let position = self
            .letter_map
            .iter()
            .position(|&answer_index| answer_index == self.question.correct_index)
            .expect("letter_map is a permutation");
        Letter::from_index(position).expect("position is 0..4")
    }

    pub fn help_hash(&self) -> &HelpHash {
        &self.help_hash
    }

    pub(crate) fn record_hint(&mut self, payload: HintPayload) {
        self.help_hash.insert(payload);
    }

    pub fn question_id(&self) -> u64 {
        self.question.id
    }

    pub fn text(&self) -> &str {
        &self.question.text
    }

    pub fn level(&self) -> usize {
        self.question.level
    }
}
