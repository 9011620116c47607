//! Game admission: at most one in-progress game per user.
//!
//! The lobby is the collaborator that owns the uniqueness rule the session
//! core deliberately does not enforce. The check-then-create is atomic per
//! user because the map entry holds its shard lock across both steps.

use crate::errors::{LobbyError, TriviaqResult};
use crate::games::question_bank::QuestionBank;
use crate::games::Game;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

pub struct GameLobby {
    bank: Arc<dyn QuestionBank>,
    /// user_id -> id of that user's in-progress game
    active: DashMap<String, Uuid>,
}

impl GameLobby {
    pub fn new(bank: Arc<dyn QuestionBank>) -> Self {
        Self {
            bank,
            active: DashMap::new(),
        }
    }

    /// Draw a fresh question set and admit the user into a new game.
    /// Fails with `UserAlreadyPlaying` while an earlier game is unreleased.
    pub fn create_game(&self, user_id: &str) -> TriviaqResult<Game> {
        match self.active.entry(user_id.to_string()) {
            Entry::Occupied(entry) => {
                let game_id = *entry.get();
                tracing::info!(user_id, %game_id, "admission refused, game in progress");
                Err(LobbyError::UserAlreadyPlaying {
                    user_id: user_id.to_string(),
                    game_id,
                }
                .into())
            }
            Entry::Vacant(slot) => {
                let game = Game::from_bank(user_id, self.bank.as_ref())?;
                slot.insert(game.id());
                tracing::info!(user_id, game_id = %game.id(), "game admitted");
                Ok(game)
            }
        }
    }

    pub fn active_game_id(&self, user_id: &str) -> Option<Uuid> {
        self.active.get(user_id).map(|entry| *entry.value())
    }

    /// Free the user's slot once their game reached a terminal status.
    /// A stale id (from an older, already-replaced game) is ignored.
    pub fn release(&self, user_id: &str, game_id: Uuid) -> bool {
        self.active
            .remove_if(user_id, |_, &active_id| active_id == game_id)
            .is_some()
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}
