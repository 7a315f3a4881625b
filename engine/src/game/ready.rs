//! Accept-style setup shared by games that need no placement.

use crate::event::Command;

use super::{GameError, PLAYERS_PER_GAME};

/// Tracks which seats agreed to play. The initiator issued the challenge, so seat 0
/// starts ready and only the opponent has to accept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readiness {
    ready: [bool; PLAYERS_PER_GAME],
}

impl Readiness {
    pub fn new() -> Self {
        let mut ready = [false; PLAYERS_PER_GAME];
        ready[0] = true;
        Self { ready }
    }

    pub fn is_ready(&self, seat: usize) -> bool {
        self.ready.get(seat).copied().unwrap_or(false)
    }

    pub fn accept(&mut self, seat: usize) -> Result<(), GameError> {
        let slot = self.ready.get_mut(seat).ok_or(GameError::NotParticipant)?;
        *slot = true;
        Ok(())
    }
}

impl Default for Readiness {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses the only setup command ready-style games understand.
pub fn parse_accept(command: &Command) -> Result<(), GameError> {
    match command.head() {
        "accept" => Ok(()),
        _ => Err(GameError::Invalid(
            "Accept the challenge before making a move.".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameFamily;

    #[test]
    fn opponent_starts_unready() {
        let mut readiness = Readiness::new();
        assert!(readiness.is_ready(0));
        assert!(!readiness.is_ready(1));

        readiness.accept(1).unwrap();
        assert!(readiness.is_ready(1));
    }

    #[test]
    fn only_accept_is_a_setup_command() {
        let accept = Command::new(GameFamily::TurnDuel, "duel_", "accept");
        let attack = Command::new(GameFamily::TurnDuel, "duel_", "attack");

        assert_eq!(parse_accept(&accept), Ok(()));
        assert!(parse_accept(&attack).is_err());
    }
}
