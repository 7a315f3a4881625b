//! Inbound event types shared by the router, coordinator and games.

use std::fmt;
use std::str::FromStr;

use crate::game::{GameError, GameFamily};

/// Identity of a player (the Discord user snowflake).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub u64);

impl PlayerId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for PlayerId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Zero-based grid coordinate.
///
/// Players write coordinates as a row letter followed by a one-based column
/// number, e.g. `B3` is row 1, column 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match u8::try_from(self.row).ok().filter(|row| *row < 26) {
            Some(row) => write!(f, "{}{}", (b'A' + row) as char, self.col + 1),
            None => write!(f, "({}, {})", self.row, self.col),
        }
    }
}

impl FromStr for Coord {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GameError::Invalid(format!("'{}' is not a coordinate like B3", s.trim()));

        let s = s.trim();
        let mut chars = s.chars();
        let letter = chars.next().ok_or_else(invalid)?.to_ascii_uppercase();
        if !letter.is_ascii_uppercase() {
            return Err(invalid());
        }

        let column: usize = chars.as_str().parse().map_err(|_| invalid())?;
        if column == 0 {
            return Err(invalid());
        }

        Ok(Self::new((letter as u8 - b'A') as usize, column - 1))
    }
}

/// Data attached to an inbound event besides its identifier.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Payload {
    #[default]
    Empty,
    /// Free text from a message reply.
    Text(String),
    /// Coordinates picked by a presentation layer that resolves them itself.
    Coordinates(Coord),
}

/// A UI event as delivered by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    /// Identifier attached to the control that was triggered.
    pub opaque_id: String,
    /// Player who triggered it.
    pub actor: PlayerId,
    pub payload: Payload,
}

impl InboundEvent {
    /// Event for a button press.
    pub fn click(opaque_id: impl Into<String>, actor: PlayerId) -> Self {
        Self {
            opaque_id: opaque_id.into(),
            actor,
            payload: Payload::Empty,
        }
    }

    /// Event for a text reply routed under the given identifier.
    pub fn reply(opaque_id: impl Into<String>, actor: PlayerId, text: impl Into<String>) -> Self {
        Self {
            opaque_id: opaque_id.into(),
            actor,
            payload: Payload::Text(text.into()),
        }
    }
}

/// A classified event, ready to be handed to a session.
///
/// Produced by the router from an identifier of the form
/// `<prefix><verb>[:<session id>]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Family the identifier was classified into.
    pub family: GameFamily,
    /// The table prefix that matched, e.g. `col_`.
    pub prefix: &'static str,
    /// Everything between the prefix and the optional session suffix, e.g. `fire_1_2`.
    pub verb: String,
    /// Session serial the control was rendered for, if any.
    pub session_id: Option<u64>,
    pub payload: Payload,
}

impl Command {
    pub fn new(family: GameFamily, prefix: &'static str, verb: impl Into<String>) -> Self {
        Self {
            family,
            prefix,
            verb: verb.into(),
            session_id: None,
            payload: Payload::Empty,
        }
    }

    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = payload;
        self
    }

    pub fn with_session(mut self, session_id: u64) -> Self {
        self.session_id = Some(session_id);
        self
    }

    /// Underscore-separated segments of the verb.
    pub fn args(&self) -> impl Iterator<Item = &str> {
        self.verb.split('_')
    }

    /// First verb segment, e.g. `hit` for `hit_42`.
    pub fn head(&self) -> &str {
        self.args().next().unwrap_or_default()
    }

    /// Text payload, if the event came from a message reply.
    pub fn text(&self) -> Option<&str> {
        match &self.payload {
            Payload::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Whether this command gives up the game (forfeit or declining a challenge).
    pub fn is_forfeit(&self) -> bool {
        matches!(self.head(), "forfeit" | "decline")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_coordinates_case_insensitively() {
        assert_eq!("B3".parse::<Coord>(), Ok(Coord::new(1, 2)));
        assert_eq!(" a1 ".parse::<Coord>(), Ok(Coord::new(0, 0)));
        assert_eq!("e10".parse::<Coord>(), Ok(Coord::new(4, 9)));
    }

    #[test]
    fn rejects_malformed_coordinates() {
        for input in ["", "3B", "B0", "B", "BB", "#1"] {
            assert!(input.parse::<Coord>().is_err(), "{input} should not parse");
        }
    }

    #[test]
    fn displays_coordinates_as_typed() {
        assert_eq!(Coord::new(1, 2).to_string(), "B3");
    }

    #[test]
    fn command_head_ignores_trailing_segments() {
        let command = Command::new(GameFamily::Blackjack, "blackjack_", "hit_42");
        assert_eq!(command.head(), "hit");
        assert_eq!(command.args().collect::<Vec<_>>(), vec!["hit", "42"]);
    }

    #[test]
    fn decline_counts_as_forfeit() {
        assert!(Command::new(GameFamily::TurnDuel, "duel_", "decline").is_forfeit());
        assert!(Command::new(GameFamily::TurnDuel, "duel_", "forfeit").is_forfeit());
        assert!(!Command::new(GameFamily::TurnDuel, "duel_", "attack").is_forfeit());
    }
}
