//! Word chain played by replying in chat.
//!
//! Every word must start with the last letter of the previous one, be between three
//! and thirty-two letters long, and not have been played before. The first player to get ten words
//! accepted wins.

use std::collections::HashSet;

use crate::{
    event::{Command, PlayerId},
    render::BoardView,
};

use super::{
    ready::{parse_accept, Readiness},
    Effect, Finish, GameError, GameType, Resolution, Rules, PLAYERS_PER_GAME,
};

pub const MIN_WORD_LEN: usize = 3;
/// Longest accepted word. Keeps the rendered chain within an embed field.
pub const MAX_WORD_LEN: usize = 32;
pub const WORDS_TO_WIN: usize = 10;

#[derive(Debug, Clone)]
pub struct WordChain {
    ready: Readiness,
    chain: Vec<String>,
    used: HashSet<String>,
    scores: [usize; PLAYERS_PER_GAME],
}

impl WordChain {
    pub fn new() -> Self {
        Self {
            ready: Readiness::new(),
            chain: Vec::new(),
            used: HashSet::new(),
            scores: [0; PLAYERS_PER_GAME],
        }
    }

    /// Letter the next word has to start with; `None` before the first word.
    pub fn next_letter(&self) -> Option<char> {
        self.chain.last().and_then(|word| word.chars().last())
    }

    pub fn score(&self, seat: usize) -> usize {
        self.scores[seat]
    }
}

impl Default for WordChain {
    fn default() -> Self {
        Self::new()
    }
}

impl Rules for WordChain {
    type Setup = ();
    type Action = String;

    fn game_type(&self) -> GameType {
        GameType::WordChain
    }

    fn parse_setup(&self, command: &Command) -> Result<(), GameError> {
        parse_accept(command)
    }

    fn parse_action(&self, command: &Command) -> Result<String, GameError> {
        let text = match (command.head(), command.text()) {
            ("reply", Some(text)) => text.trim(),
            _ => {
                return Err(GameError::Invalid(
                    "Reply in the channel with your word.".to_string(),
                ))
            }
        };

        if text.split_whitespace().count() != 1 {
            return Err(GameError::Invalid("Reply with a single word.".to_string()));
        }

        Ok(text.to_lowercase())
    }

    fn setup(&mut self, seat: usize, _: ()) -> Result<(), GameError> {
        self.ready.accept(seat)
    }

    fn is_set_up(&self, seat: usize) -> bool {
        self.ready.is_ready(seat)
    }

    fn act(&mut self, seat: usize, word: String) -> Result<Resolution, GameError> {
        if word.chars().count() > MAX_WORD_LEN {
            return Err(GameError::InvalidTarget(format!(
                "Words can be at most {} letters.",
                MAX_WORD_LEN
            )));
        }
        if !word.chars().all(|c| c.is_alphabetic()) {
            return Err(GameError::InvalidTarget(format!(
                "'{}' must contain only letters.",
                word
            )));
        }
        if word.chars().count() < MIN_WORD_LEN {
            return Err(GameError::InvalidTarget(format!(
                "Words need at least {} letters.",
                MIN_WORD_LEN
            )));
        }
        if let Some(letter) = self.next_letter() {
            if !word.starts_with(letter) {
                return Err(GameError::InvalidTarget(format!(
                    "'{}' does not start with '{}'.",
                    word, letter
                )));
            }
        }
        if self.used.contains(&word) {
            return Err(GameError::InvalidTarget(format!(
                "'{}' was already played.",
                word
            )));
        }

        self.used.insert(word.clone());
        self.chain.push(word.clone());
        self.scores[seat] += 1;

        let effect = Effect::Played { word };
        if self.scores[seat] >= WORDS_TO_WIN {
            Ok(Resolution::finished(effect, Finish::Winner(seat)))
        } else {
            Ok(Resolution::ongoing(effect))
        }
    }

    fn views(&self, participants: &[PlayerId]) -> Vec<BoardView> {
        vec![BoardView::Words {
            chain: self.chain.clone(),
            next_letter: self.next_letter(),
            scores: participants
                .iter()
                .copied()
                .zip(self.scores.iter().copied())
                .collect(),
            target: WORDS_TO_WIN,
        }]
    }
}
