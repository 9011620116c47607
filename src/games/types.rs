use crate::errors::{HintError, QuestionError};
use crate::games::prize_table::LEVEL_COUNT;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Answer slot shown to the player
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Letter {
    A,
    B,
    C,
    D,
}

impl Letter {
    pub const ALL: [Letter; 4] = [Letter::A, Letter::B, Letter::C, Letter::D];

    /// Position of the letter in the displayed answer list
    pub fn index(self) -> usize {
        match self {
            Letter::A => 0,
            Letter::B => 1,
            Letter::C => 2,
            Letter::D => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parse a caller-supplied option; anything outside a-d yields None
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "a" | "A" => Some(Letter::A),
            "b" | "B" => Some(Letter::B),
            "c" | "C" => Some(Letter::C),
            "d" | "D" => Some(Letter::D),
            _ => None,
        }
    }

    /// Uppercase form used in player-facing hint text
    pub fn upper(self) -> char {
        match self {
            Letter::A => 'A',
            Letter::B => 'B',
            Letter::C => 'C',
            Letter::D => 'D',
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Letter::A => write!(f, "a"),
            Letter::B => write!(f, "b"),
            Letter::C => write!(f, "c"),
            Letter::D => write!(f, "d"),
        }
    }
}

/// Supported hint kinds, each usable once per game
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum HintKind {
    FiftyFifty,
    AudienceHelp,
    FriendCall,
}

impl HintKind {
    pub const ALL: [HintKind; 3] = [
        HintKind::FiftyFifty,
        HintKind::AudienceHelp,
        HintKind::FriendCall,
    ];
}

impl fmt::Display for HintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HintKind::FiftyFifty => write!(f, "fifty_fifty"),
            HintKind::AudienceHelp => write!(f, "audience_help"),
            HintKind::FriendCall => write!(f, "friend_call"),
        }
    }
}

impl FromStr for HintKind {
    type Err = HintError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "fifty_fifty" => Ok(HintKind::FiftyFifty),
            "audience_help" => Ok(HintKind::AudienceHelp),
            "friend_call" => Ok(HintKind::FriendCall),
            other => Err(HintError::UnknownKind(other.to_string())),
        }
    }
}

/// Lifecycle of a game session; every status except `InProgress` is terminal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    InProgress,
    Won,
    Fail,
    Money,
    Timeout,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        self != GameStatus::InProgress
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "in_progress"),
            GameStatus::Won => write!(f, "won"),
            GameStatus::Fail => write!(f, "fail"),
            GameStatus::Money => write!(f, "money"),
            GameStatus::Timeout => write!(f, "timeout"),
        }
    }
}

/// A leveled question as supplied by the question bank.
/// Immutable once drawn into a game.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Question {
    pub id: u64,
    /// Difficulty tier, 0..14
    pub level: usize,
    pub text: String,
    /// Answer texts in bank order; `correct_index` points into this array
    pub answers: [String; 4],
    pub correct_index: usize,
}

impl Question {
    pub fn correct_answer(&self) -> &str {
        &self.answers[self.correct_index]
    }

    /// Shape check applied at bank insertion. A question that fails here is
    /// collaborator misuse, not a runtime game condition.
    pub fn validate(&self) -> Result<(), QuestionError> {
        if self.correct_index > 3 {
            return Err(QuestionError::Malformed {
                id: self.id,
                reason: format!("correct_index {} out of range", self.correct_index),
            });
        }
        if self.level >= LEVEL_COUNT {
            return Err(QuestionError::Malformed {
                id: self.id,
                reason: format!("level {} out of range", self.level),
            });
        }
        if self.text.is_empty() || self.answers.iter().any(|a| a.is_empty()) {
            return Err(QuestionError::Malformed {
                id: self.id,
                reason: "empty text or answer".to_string(),
            });
        }
        Ok(())
    }
}

/// Result payload of a consumed hint (discriminated union)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HintPayload {
    FiftyFifty {
        /// Exactly two letters, the correct one among them
        remaining: [Letter; 2],
    },
    AudienceHelp {
        /// Vote counts for every letter, summing to the audience size
        votes: BTreeMap<Letter, u32>,
    },
    FriendCall {
        /// Sentence ending in the claimed uppercase letter
        message: String,
    },
}

impl HintPayload {
    pub fn kind(&self) -> HintKind {
        match self {
            HintPayload::FiftyFifty { .. } => HintKind::FiftyFifty,
            HintPayload::AudienceHelp { .. } => HintKind::AudienceHelp,
            HintPayload::FriendCall { .. } => HintKind::FriendCall,
        }
    }
}

/// Per-question record of consumed hints. Entries are written exactly once
/// per kind and never removed or overwritten.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HelpHash {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fifty_fifty: Option<[Letter; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience_help: Option<BTreeMap<Letter, u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friend_call: Option<String>,
}

impl HelpHash {
    pub fn is_empty(&self) -> bool {
        self.fifty_fifty.is_none() && self.audience_help.is_none() && self.friend_call.is_none()
    }

    pub fn contains(&self, kind: HintKind) -> bool {
        match kind {
            HintKind::FiftyFifty => self.fifty_fifty.is_some(),
            HintKind::AudienceHelp => self.audience_help.is_some(),
            HintKind::FriendCall => self.friend_call.is_some(),
        }
    }

    pub fn get(&self, kind: HintKind) -> Option<HintPayload> {
        match kind {
            HintKind::FiftyFifty => self
                .fifty_fifty
                .map(|remaining| HintPayload::FiftyFifty { remaining }),
            HintKind::AudienceHelp => self
                .audience_help
                .clone()
                .map(|votes| HintPayload::AudienceHelp { votes }),
            HintKind::FriendCall => self
                .friend_call
                .clone()
                .map(|message| HintPayload::FriendCall { message }),
        }
    }

    /// Record a payload; the caller must have checked `contains` first.
    pub(crate) fn insert(&mut self, payload: HintPayload) {
        match payload {
            HintPayload::FiftyFifty { remaining } => self.fifty_fifty = Some(remaining),
            HintPayload::AudienceHelp { votes } => self.audience_help = Some(votes),
            HintPayload::FriendCall { message } => self.friend_call = Some(message),
        }
    }
}

/// Snapshot returned from `Game::answer`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub status: GameStatus,
    pub current_level: usize,
    pub prize: u64,
}

/// Snapshot returned from the cash-out and timeout transitions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FinishOutcome {
    pub status: GameStatus,
    pub prize: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_parse() {
        assert_eq!(Letter::parse("a"), Some(Letter::A));
        assert_eq!(Letter::parse("D"), Some(Letter::D));
        assert_eq!(Letter::parse("e"), None);
        assert_eq!(Letter::parse(""), None);
        assert_eq!(Letter::parse("ab"), None);
    }

    #[test]
    fn test_hint_kind_round_trip() {
        for kind in HintKind::ALL {
            let parsed: HintKind = kind.to_string().parse().expect("known kind");
            assert_eq!(parsed, kind);
        }
        assert!("bribe_the_host".parse::<HintKind>().is_err());
    }

    #[test]
    fn test_status_terminal() {
        assert!(!GameStatus::InProgress.is_terminal());
        for status in [
            GameStatus::Won,
            GameStatus::Fail,
            GameStatus::Money,
            GameStatus::Timeout,
        ] {
            assert!(status.is_terminal());
        }
    }

    #[test]
    fn test_question_validation() {
        let mut question = Question {
            id: 7,
            level: 3,
            text: "Which planet is closest to the sun?".to_string(),
            answers: [
                "Mercury".to_string(),
                "Venus".to_string(),
                "Mars".to_string(),
                "Pluto".to_string(),
            ],
            correct_index: 0,
        };
        assert!(question.validate().is_ok());
        assert_eq!(question.correct_answer(), "Mercury");

        question.correct_index = 4;
        assert!(question.validate().is_err());
    }

    #[test]
    fn test_help_hash_insert_and_lookup() {
        let mut help = HelpHash::default();
        assert!(help.is_empty());
        assert!(!help.contains(HintKind::FiftyFifty));

        help.insert(HintPayload::FiftyFifty {
            remaining: [Letter::A, Letter::C],
        });
        assert!(help.contains(HintKind::FiftyFifty));
        assert_eq!(
            help.get(HintKind::FiftyFifty),
            Some(HintPayload::FiftyFifty {
                remaining: [Letter::A, Letter::C]
            })
        );
        assert_eq!(help.get(HintKind::FriendCall), None);
    }

    #[test]
    fn test_help_hash_serialization_skips_unused_kinds() {
        let mut help = HelpHash::default();
        help.insert(HintPayload::FriendCall {
            message: "Max thinks the right answer is B".to_string(),
        });

        let json = serde_json::to_value(&help).expect("serialize");
        assert!(json.get("friend_call").is_some());
        assert!(json.get("fifty_fifty").is_none());
        assert!(json.get("audience_help").is_none());
    }
}
