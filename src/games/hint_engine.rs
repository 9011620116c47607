//! One-time hints computed against the active game question.
//!
//! Each generator returns the payload that gets written into the question's
//! help hash. A kind already present in the hash is rejected before any
//! randomness is drawn, so a repeated request leaves the recorded payload
//! untouched.

use crate::config::HintConfig;
use crate::errors::{HintError, TriviaqResult};
use crate::games::game_question::GameQuestion;
use crate::games::types::{HintPayload, HintKind, Letter};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;

/// Total simulated audience votes
const AUDIENCE_SIZE: u32 = 100;

/// Name pool for the friend-call sentence
const FRIEND_NAMES: [&str; 6] = ["Max", "Olga", "Pavel", "Rita", "Victor", "Nina"];

/// Hint generator parameterized by the distribution config
pub struct HintEngine {
    config: HintConfig,
}

impl HintEngine {
    pub fn new(config: HintConfig) -> Self {
        Self { config }
    }

    /// Compute and record a hint on the question. Fails with `AlreadyUsed`
    /// when the kind was consumed before.
    pub fn apply(
        &self,
        question: &mut GameQuestion,
        kind: HintKind,
    ) -> TriviaqResult<HintPayload> {
        if question.help_hash().contains(kind) {
            return Err(HintError::AlreadyUsed(kind).into());
        }

        let payload = match kind {
            HintKind::FiftyFifty => self.fifty_fifty(question),
            HintKind::AudienceHelp => self.audience_help(question),
            HintKind::FriendCall => self.friend_call(question),
        };
        question.record_hint(payload.clone());
        Ok(payload)
    }

    /// Keep the correct letter plus one wrong letter chosen at random
    fn fifty_fifty(&self, question: &GameQuestion) -> HintPayload {
        let mut rng = rand::thread_rng();
        let correct = question.correct_answer_key();
        let survivor = *wrong_letters(correct)
            .choose(&mut rng)
            .expect("three wrong letters");

        // Display order must not reveal which of the pair is correct
        let mut remaining = [correct, survivor];
        remaining.sort();
        HintPayload::FiftyFifty { remaining }
    }

    /// Vote distribution over all four letters; the correct letter gets a
    /// bounded share and the remainder is split by two uniform cut points
    fn audience_help(&self, question: &GameQuestion) -> HintPayload {
        let mut rng = rand::thread_rng();
        let correct = question.correct_answer_key();

        let correct_votes = rng.gen_range(
            self.config.audience_correct_share_min..=self.config.audience_correct_share_max,
        );
        let rest = AUDIENCE_SIZE - correct_votes;
        let mut cuts = [rng.gen_range(0..=rest), rng.gen_range(0..=rest)];
        cuts.sort_unstable();
        let wrong_shares = [cuts[0], cuts[1] - cuts[0], rest - cuts[1]];

        let mut votes: BTreeMap<Letter, u32> = BTreeMap::new();
        votes.insert(correct, correct_votes);
        for (letter, share) in wrong_letters(correct).into_iter().zip(wrong_shares) {
            votes.insert(letter, share);
        }
        HintPayload::AudienceHelp { votes }
    }

    /// A named friend claims a letter; right with configured probability
    fn friend_call(&self, question: &GameQuestion) -> HintPayload {
        let mut rng = rand::thread_rng();
        let correct = question.correct_answer_key();

        let claimed = if rng.gen_bool(self.config.friend_call_accuracy) {
            correct
        } else {
            *wrong_letters(correct)
                .choose(&mut rng)
                .expect("three wrong letters")
        };
        let name = FRIEND_NAMES.choose(&mut rng).expect("non-empty name pool");

        HintPayload::FriendCall {
            message: format!("{} thinks the right answer is {}", name, claimed.upper()),
        }
    }
}

impl Default for HintEngine {
    fn default() -> Self {
        Self::new(HintConfig::default())
    }
}

fn wrong_letters(correct: Letter) -> Vec<Letter> {
    Letter::ALL
        .iter()
        .copied()
        .filter(|&letter| letter != correct)
        .collect()
}
