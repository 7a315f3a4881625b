//! Turn-based duel.
//!
//! Fighters start at 100 HP and take turns to attack (10 to 25 damage, halved
//! against a defending target), defend until their next turn, or heal (10 to 20,
//! twice per duel). Who moves first is random. The duel ends when a fighter drops
//! to 0 HP.

use rand::{rngs::StdRng, Rng};

use crate::{
    event::{Command, PlayerId},
    render::{BoardView, FighterView},
};

use super::{
    ready::{parse_accept, Readiness},
    Effect, Finish, GameError, GameType, Resolution, Rules, PLAYERS_PER_GAME,
};

pub const MAX_HP: i32 = 100;
pub const HEALS_PER_DUEL: u8 = 2;
const ATTACK_DAMAGE: std::ops::RangeInclusive<i32> = 10..=25;
const HEAL_AMOUNT: std::ops::RangeInclusive<i32> = 10..=20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Attack,
    Defend,
    Heal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fighter {
    pub hp: i32,
    pub heals_left: u8,
    pub defending: bool,
}

impl Fighter {
    fn new() -> Self {
        Self {
            hp: MAX_HP,
            heals_left: HEALS_PER_DUEL,
            defending: false,
        }
    }
}

#[derive(Debug)]
pub struct Duel {
    ready: Readiness,
    fighters: [Fighter; PLAYERS_PER_GAME],
    rng: StdRng,
}

impl Duel {
    pub fn new(rng: StdRng) -> Self {
        Self {
            ready: Readiness::new(),
            fighters: [Fighter::new(); PLAYERS_PER_GAME],
            rng,
        }
    }

    pub fn fighter(&self, seat: usize) -> &Fighter {
        &self.fighters[seat]
    }
}

impl Rules for Duel {
    type Setup = ();
    type Action = Move;

    fn game_type(&self) -> GameType {
        GameType::Duel
    }

    fn parse_setup(&self, command: &Command) -> Result<(), GameError> {
        parse_accept(command)
    }

    fn parse_action(&self, command: &Command) -> Result<Move, GameError> {
        match command.head() {
            "attack" => Ok(Move::Attack),
            "defend" => Ok(Move::Defend),
            "heal" => Ok(Move::Heal),
            other => Err(GameError::Invalid(format!("'{}' is not a duel move.", other))),
        }
    }

    fn setup(&mut self, seat: usize, _: ()) -> Result<(), GameError> {
        self.ready.accept(seat)
    }

    fn is_set_up(&self, seat: usize) -> bool {
        self.ready.is_ready(seat)
    }

    fn start(&mut self, seats: usize) -> usize {
        self.rng.random_range(0..seats)
    }

    fn act(&mut self, seat: usize, action: Move) -> Result<Resolution, GameError> {
        let target = (seat + 1) % PLAYERS_PER_GAME;

        if action == Move::Heal {
            let fighter = &self.fighters[seat];
            if fighter.heals_left == 0 {
                return Err(GameError::InvalidTarget("You have no heals left.".to_string()));
            }
            if fighter.hp >= MAX_HP {
                return Err(GameError::InvalidTarget("You are already at full health.".to_string()));
            }
        }

        // A defensive stance only lasts until the defender's next turn.
        self.fighters[seat].defending = false;

        let effect = match action {
            Move::Attack => {
                let rolled = self.rng.random_range(ATTACK_DAMAGE);
                let blocked = self.fighters[target].defending;
                let damage = if blocked { rolled / 2 } else { rolled };
                let defender = &mut self.fighters[target];
                defender.hp = (defender.hp - damage).max(0);
                Effect::Attacked { damage, blocked }
            }
            Move::Defend => {
                self.fighters[seat].defending = true;
                Effect::Defended
            }
            Move::Heal => {
                let rolled = self.rng.random_range(HEAL_AMOUNT);
                let fighter = &mut self.fighters[seat];
                let healed = (fighter.hp + rolled).min(MAX_HP);
                let amount = healed - fighter.hp;
                fighter.hp = healed;
                fighter.heals_left -= 1;
                Effect::Healed { amount }
            }
        };

        if self.fighters[target].hp == 0 {
            Ok(Resolution::finished(effect, Finish::Winner(seat)))
        } else {
            Ok(Resolution::ongoing(effect))
        }
    }

    fn views(&self, participants: &[PlayerId]) -> Vec<BoardView> {
        let fighters = self
            .fighters
            .iter()
            .zip(participants)
            .map(|(fighter, player)| FighterView {
                player: *player,
                hp: fighter.hp,
                max_hp: MAX_HP,
                heals_left: fighter.heals_left,
                defending: fighter.defending,
            })
            .collect();

        vec![BoardView::Fighters(fighters)]
    }
}
