//! Game state machines.
//!
//! Every game is a `Rules` implementation wrapped in the generic `Machine`, which owns
//! the parts all games share: the ordered participants, the one-directional phase
//! (setup → active → ended), whose turn it is, and how the game ended. The `Game`
//! trait is the object-safe face of a machine that sessions hold.
//!
//! - `battleship` - 5×5 fleet battle with a placement phase
//! - `connect_four` - 7×6 drop game (board games family)
//! - `tic_tac_toe` - 3×3 (board games family)
//! - `duel` - attack/defend/heal duel with a random first turn
//! - `blackjack` - two players hitting from a shared deck
//! - `word_chain` - words starting with the previous word's last letter

pub mod battleship;
pub mod blackjack;
pub mod connect_four;
pub mod duel;
pub mod grid;
pub mod machine;
pub mod ready;
pub mod tic_tac_toe;
pub mod word_chain;

use rand::{rngs::StdRng, SeedableRng};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::{
    error::EngineError,
    event::{Command, Coord, PlayerId},
    render::BoardView,
};

pub use machine::Machine;

use battleship::Battleship;
use blackjack::{Blackjack, Card};
use connect_four::ConnectFour;
use duel::Duel;
use tic_tac_toe::TicTacToe;
use word_chain::WordChain;

/// Number of players every hosted game seats.
pub const PLAYERS_PER_GAME: usize = 2;

/// Progress of a game. Transitions only go forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Setup,
    Active,
    Ended,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Setup => "setup",
            Self::Active => "active",
            Self::Ended => "ended",
        };
        f.write_str(name)
    }
}

/// Namespace of control identifiers shared by one or more game types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameFamily {
    Battleship,
    BoardGames,
    TurnDuel,
    Blackjack,
    WordGame,
}

impl GameFamily {
    /// Prefix for family-wide controls (accept, decline, forfeit).
    pub fn control_prefix(self) -> &'static str {
        match self {
            Self::Battleship => "bs_",
            Self::BoardGames => "board_",
            Self::TurnDuel => "duel_",
            Self::Blackjack => "blackjack_",
            Self::WordGame => "word_",
        }
    }

    /// Prefix text replies are routed under, for families that read chat messages.
    pub fn reply_prefix(self) -> Option<&'static str> {
        match self {
            Self::Battleship | Self::WordGame => Some(self.control_prefix()),
            Self::BoardGames | Self::TurnDuel | Self::Blackjack => None,
        }
    }

    /// Whether text replies are meaningful before the game starts.
    pub fn accepts_setup_replies(self) -> bool {
        matches!(self, Self::Battleship)
    }
}

/// Every game the bot can host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameType {
    Battleship,
    ConnectFour,
    TicTacToe,
    Duel,
    Blackjack,
    WordChain,
}

impl GameType {
    pub const ALL: [GameType; 6] = [
        Self::Battleship,
        Self::ConnectFour,
        Self::TicTacToe,
        Self::Duel,
        Self::Blackjack,
        Self::WordChain,
    ];

    pub fn family(self) -> GameFamily {
        match self {
            Self::Battleship => GameFamily::Battleship,
            Self::ConnectFour | Self::TicTacToe => GameFamily::BoardGames,
            Self::Duel => GameFamily::TurnDuel,
            Self::Blackjack => GameFamily::Blackjack,
            Self::WordChain => GameFamily::WordGame,
        }
    }

    /// Slash command that starts this game.
    pub fn command_name(self) -> &'static str {
        match self {
            Self::Battleship => "battleship",
            Self::ConnectFour => "connect4",
            Self::TicTacToe => "tictactoe",
            Self::Duel => "duel",
            Self::Blackjack => "blackjack",
            Self::WordChain => "wordchain",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Battleship => "Battleship",
            Self::ConnectFour => "Connect Four",
            Self::TicTacToe => "Tic-Tac-Toe",
            Self::Duel => "Duel",
            Self::Blackjack => "Blackjack",
            Self::WordChain => "Word Chain",
        }
    }
}

impl FromStr for GameType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|game| game.command_name() == s)
            .ok_or_else(|| EngineError::Invalid(format!("Unknown game '{}'", s)))
    }
}

/// How a game that ran to completion ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Winner(PlayerId),
    Draw,
}

/// Why a game was forced to end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// The player whose turn it was let the deadline pass.
    Timeout(PlayerId),
    /// The player gave up or declined the challenge.
    Forfeit(PlayerId),
    /// Nobody touched the session for longer than the idle limit.
    Idle,
}

/// Final state of an ended game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    Finished(Outcome),
    Cancelled(CancelReason),
}

/// What an accepted action did, for the presentation layer to describe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Miss { target: Coord },
    Hit { target: Coord },
    Sunk { target: Coord, size: usize },
    Dropped { column: usize, row: usize },
    Marked { cell: usize },
    Attacked { damage: i32, blocked: bool },
    Defended,
    Healed { amount: i32 },
    Drew { card: Card, total: u8 },
    Busted { card: Card, total: u8 },
    Stood { total: u8 },
    Played { word: String },
}

/// Result of `Game::setup`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupProgress {
    /// Other participants still have to finish setup.
    Waiting,
    /// Setup is complete and the game is active.
    Started { first: PlayerId },
}

/// Result of `Game::act`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult {
    RejectedWrongPhase(Phase),
    RejectedNotYourTurn,
    RejectedInvalidTarget(String),
    Accepted(Effect),
    AcceptedTerminal(Effect, Outcome),
}

/// Rules-level failures. State is never modified when one is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("{0}")]
    Invalid(String),
    #[error("{0}")]
    InvalidTarget(String),
    #[error("That is not possible while the game is in the {0} phase")]
    WrongPhase(Phase),
    #[error("Player is not part of this game")]
    NotParticipant,
}

/// How a resolved action finished the game, in seat terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finish {
    Winner(usize),
    Draw,
}

/// Effect of an accepted action plus, when it ended the game, how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub effect: Effect,
    pub finish: Option<Finish>,
}

impl Resolution {
    pub fn ongoing(effect: Effect) -> Self {
        Self {
            effect,
            finish: None,
        }
    }

    pub fn finished(effect: Effect, finish: Finish) -> Self {
        Self {
            effect,
            finish: Some(finish),
        }
    }
}

/// Game-specific behaviour plugged into `Machine`.
///
/// Rules work in seat indices; `Machine` maps seats to players and enforces phase and
/// turn order before any of these methods are called. `setup` and `act` must leave the
/// rules untouched when they return an error.
pub trait Rules: Send + Sync + 'static {
    type Setup;
    type Action;

    fn game_type(&self) -> GameType;

    fn parse_setup(&self, command: &Command) -> Result<Self::Setup, GameError>;

    fn parse_action(&self, command: &Command) -> Result<Self::Action, GameError>;

    fn setup(&mut self, seat: usize, choice: Self::Setup) -> Result<(), GameError>;

    fn is_set_up(&self, seat: usize) -> bool;

    /// Called once when every seat is set up; returns the seat that moves first.
    fn start(&mut self, seats: usize) -> usize {
        let _ = seats;
        0
    }

    fn act(&mut self, seat: usize, action: Self::Action) -> Result<Resolution, GameError>;

    /// Seat holding the turn after `current` made an accepted, non-terminal action.
    fn next_turn(&self, current: usize, seats: usize) -> usize {
        (current + 1) % seats
    }

    /// Views safe to show every participant.
    fn views(&self, participants: &[PlayerId]) -> Vec<BoardView>;

    /// View only the given seat may see.
    fn private_view(&self, seat: usize, participants: &[PlayerId]) -> Option<BoardView> {
        let _ = (seat, participants);
        None
    }
}

/// Object-safe state machine contract a session holds.
pub trait Game: Send + Sync {
    fn game_type(&self) -> GameType;

    fn family(&self) -> GameFamily {
        self.game_type().family()
    }

    fn phase(&self) -> Phase;

    fn participants(&self) -> &[PlayerId];

    /// Player holding the turn; `None` outside the active phase.
    fn current_turn(&self) -> Option<PlayerId>;

    /// Participants who still have to finish setup; empty outside the setup phase.
    fn pending_setup(&self) -> Vec<PlayerId>;

    fn ending(&self) -> Option<Ending>;

    fn setup(&mut self, player: PlayerId, command: &Command) -> Result<SetupProgress, GameError>;

    fn act(&mut self, player: PlayerId, command: &Command) -> ActionResult;

    /// Forces the game to end. Returns `false` when it had already ended.
    fn cancel(&mut self, reason: CancelReason) -> bool;

    fn views(&self) -> Vec<BoardView>;

    fn private_view(&self, player: PlayerId) -> Option<BoardView>;
}

/// Creates a game seeded from the operating system's entropy source.
///
/// # Arguments
/// - `game_type` - Which game to create
/// - `participants` - Ordered players; the first one is the initiator
///
/// # Returns
/// - `Ok(Box<dyn Game>)` - Game in the setup phase
/// - `Err(EngineError::Invalid)` - Wrong number of players or the same player twice
pub fn new_game(
    game_type: GameType,
    participants: Vec<PlayerId>,
) -> Result<Box<dyn Game>, EngineError> {
    new_seeded_game(game_type, participants, StdRng::from_os_rng())
}

/// Creates a game using the given random number generator.
///
/// Deterministic games ignore the generator; tests pass a seeded one to make random
/// first turns, fleets and card draws reproducible.
pub fn new_seeded_game(
    game_type: GameType,
    participants: Vec<PlayerId>,
    rng: StdRng,
) -> Result<Box<dyn Game>, EngineError> {
    if participants.len() != PLAYERS_PER_GAME {
        return Err(EngineError::Invalid(format!(
            "{} needs exactly {} players",
            game_type.display_name(),
            PLAYERS_PER_GAME
        )));
    }
    if participants[0] == participants[1] {
        return Err(EngineError::Invalid(
            "You cannot challenge yourself".to_string(),
        ));
    }

    let game: Box<dyn Game> = match game_type {
        GameType::Battleship => Box::new(Machine::new(participants, Battleship::new(rng))),
        GameType::ConnectFour => Box::new(Machine::new(participants, ConnectFour::new())),
        GameType::TicTacToe => Box::new(Machine::new(participants, TicTacToe::new())),
        GameType::Duel => Box::new(Machine::new(participants, Duel::new(rng))),
        GameType::Blackjack => Box::new(Machine::new(participants, Blackjack::new(rng))),
        GameType::WordChain => Box::new(Machine::new(participants, WordChain::new())),
    };

    Ok(game)
}
