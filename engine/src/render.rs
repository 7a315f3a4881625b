//! Rendering-free descriptions of game state handed to the presentation layer.

use chrono::{DateTime, Utc};

use crate::{
    event::PlayerId,
    game::{blackjack::Card, Effect, GameType, Outcome, Phase},
    session::SessionKey,
};

/// One cell of a grid as a viewer may see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellView {
    Empty,
    /// A ship the viewer is allowed to see (own fleet only).
    Ship,
    Hit,
    Miss,
    /// Piece owned by the participant in this seat.
    Piece(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FighterView {
    pub player: PlayerId,
    pub hp: i32,
    pub max_hp: i32,
    pub heals_left: u8,
    pub defending: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandView {
    pub player: PlayerId,
    pub cards: Vec<Card>,
    pub total: u8,
    pub stood: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardView {
    /// A grid board. `owner` is set when the grid belongs to one player (battleship
    /// waters); shared boards have no owner.
    Grid {
        owner: Option<PlayerId>,
        rows: Vec<Vec<CellView>>,
    },
    Fighters(Vec<FighterView>),
    Hands(Vec<HandView>),
    Words {
        chain: Vec<String>,
        next_letter: Option<char>,
        scores: Vec<(PlayerId, usize)>,
        target: usize,
    },
}

/// What the presentation layer should ask of the players.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    /// Waiting for these participants to finish setup.
    AwaitingSetup { pending: Vec<PlayerId> },
    /// Waiting for `player` to act, until `deadline` when a timer is armed.
    Turn {
        player: PlayerId,
        deadline: Option<DateTime<Utc>>,
    },
    Finished(Outcome),
    /// The player whose turn it was let the deadline pass.
    Abandoned { by: PlayerId },
    Forfeited { by: PlayerId },
    /// Closed after sitting idle for too long.
    Expired,
}

/// Everything the presentation layer needs to draw a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub session_key: SessionKey,
    pub session_id: u64,
    pub channel_id: u64,
    pub game_type: GameType,
    pub phase: Phase,
    pub participants: Vec<PlayerId>,
    pub board_views: Vec<BoardView>,
    pub prompt: Prompt,
    pub last_effect: Option<Effect>,
    /// View only the given player may see, delivered privately.
    pub private_view: Option<(PlayerId, BoardView)>,
}

impl RenderRequest {
    /// Whether the session behind this render has ended.
    pub fn is_final(&self) -> bool {
        self.phase == Phase::Ended
    }
}
