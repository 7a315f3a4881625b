use crate::{
    event::{Command, PlayerId},
    render::BoardView,
};

use super::{
    ActionResult, CancelReason, Ending, Finish, Game, GameError, GameType, Outcome, Phase,
    Rules, SetupProgress,
};

/// Generic game state machine.
///
/// Owns the participants, phase, turn and ending for every game; the game-specific
/// behaviour lives in `rules`. Seat 0 is the player who issued the challenge.
#[derive(Debug)]
pub struct Machine<R: Rules> {
    participants: Vec<PlayerId>,
    phase: Phase,
    current_turn: usize,
    ending: Option<Ending>,
    rules: R,
}

impl<R: Rules> Machine<R> {
    pub fn new(participants: Vec<PlayerId>, rules: R) -> Self {
        Self {
            participants,
            phase: Phase::Setup,
            current_turn: 0,
            ending: None,
            rules,
        }
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    #[cfg(test)]
    pub(crate) fn rules_mut(&mut self) -> &mut R {
        &mut self.rules
    }

    fn seat_of(&self, player: PlayerId) -> Option<usize> {
        self.participants.iter().position(|p| *p == player)
    }

    fn seat_outcome(&self, finish: Finish) -> Outcome {
        match finish {
            Finish::Winner(seat) => Outcome::Winner(self.participants[seat]),
            Finish::Draw => Outcome::Draw,
        }
    }
}

impl<R: Rules> Game for Machine<R> {
    fn game_type(&self) -> GameType {
        self.rules.game_type()
    }

    fn phase(&self) -> Phase {
        self.phase
    }

    fn participants(&self) -> &[PlayerId] {
        &self.participants
    }

    fn current_turn(&self) -> Option<PlayerId> {
        match self.phase {
            Phase::Active => Some(self.participants[self.current_turn]),
            Phase::Setup | Phase::Ended => None,
        }
    }

    fn pending_setup(&self) -> Vec<PlayerId> {
        if self.phase != Phase::Setup {
            return Vec::new();
        }

        self.participants
            .iter()
            .enumerate()
            .filter(|(seat, _)| !self.rules.is_set_up(*seat))
            .map(|(_, player)| *player)
            .collect()
    }

    fn ending(&self) -> Option<Ending> {
        self.ending
    }

    /// Applies one participant's setup choice.
    ///
    /// # Arguments
    /// - `player` - Participant making the choice
    /// - `command` - Setup command (accept, placement...)
    ///
    /// # Returns
    /// - `Ok(SetupProgress::Waiting)` - Choice applied, other seats still pending
    /// - `Ok(SetupProgress::Started)` - Every seat is set up; the game is now active
    /// - `Err(GameError)` - Wrong phase, not a participant, or a malformed choice
    fn setup(&mut self, player: PlayerId, command: &Command) -> Result<SetupProgress, GameError> {
        if self.phase != Phase::Setup {
            return Err(GameError::WrongPhase(self.phase));
        }
        let seat = self.seat_of(player).ok_or(GameError::NotParticipant)?;
        if self.rules.is_set_up(seat) {
            return Err(GameError::Invalid(
                "You are ready. Waiting for your opponent.".to_string(),
            ));
        }

        let choice = self.rules.parse_setup(command)?;
        self.rules.setup(seat, choice)?;

        let seats = self.participants.len();
        if !(0..seats).all(|seat| self.rules.is_set_up(seat)) {
            return Ok(SetupProgress::Waiting);
        }

        self.current_turn = self.rules.start(seats) % seats;
        self.phase = Phase::Active;

        Ok(SetupProgress::Started {
            first: self.participants[self.current_turn],
        })
    }

    /// Applies a turn action. Phase and turn are checked before the command is parsed,
    /// and rejected actions leave the machine untouched.
    fn act(&mut self, player: PlayerId, command: &Command) -> ActionResult {
        if self.phase != Phase::Active {
            return ActionResult::RejectedWrongPhase(self.phase);
        }
        if self.participants[self.current_turn] != player {
            return ActionResult::RejectedNotYourTurn;
        }

        let seat = self.current_turn;
        let resolution = match self
            .rules
            .parse_action(command)
            .and_then(|action| self.rules.act(seat, action))
        {
            Ok(resolution) => resolution,
            Err(err) => return ActionResult::RejectedInvalidTarget(err.to_string()),
        };

        match resolution.finish {
            Some(finish) => {
                let outcome = self.seat_outcome(finish);
                self.phase = Phase::Ended;
                self.ending = Some(Ending::Finished(outcome));
                ActionResult::AcceptedTerminal(resolution.effect, outcome)
            }
            None => {
                self.current_turn = self.rules.next_turn(seat, self.participants.len());
                ActionResult::Accepted(resolution.effect)
            }
        }
    }

    fn cancel(&mut self, reason: CancelReason) -> bool {
        if self.phase == Phase::Ended {
            return false;
        }

        self.phase = Phase::Ended;
        self.ending = Some(Ending::Cancelled(reason));
        true
    }

    fn views(&self) -> Vec<BoardView> {
        self.rules.views(&self.participants)
    }

    fn private_view(&self, player: PlayerId) -> Option<BoardView> {
        let seat = self.seat_of(player)?;
        self.rules.private_view(seat, &self.participants)
    }
}
