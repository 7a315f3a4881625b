//! Two-player blackjack from a shared deck.
//!
//! Each player is dealt two cards when the game starts and then hits or stands in
//! turn. Busting hands the game to the opponent; once both players stand the higher
//! total wins and equal totals draw. A player who stood is skipped in the turn order.

use rand::{rngs::StdRng, seq::SliceRandom};

use crate::{
    event::{Command, PlayerId},
    render::{BoardView, HandView},
};

use super::{
    ready::{parse_accept, Readiness},
    Effect, Finish, GameError, GameType, Resolution, Rules, PLAYERS_PER_GAME,
};

pub const BLACKJACK: u8 = 21;
const OPENING_CARDS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Self::Clubs, Self::Diamonds, Self::Hearts, Self::Spades];
}

/// A playing card. `rank` runs from 1 (ace) to 13 (king).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: u8,
    pub suit: Suit,
}

impl Card {
    /// Value with aces counted as 11; `hand_total` demotes them when needed.
    fn value(self) -> u8 {
        match self.rank {
            1 => 11,
            11..=13 => 10,
            rank => rank,
        }
    }
}

/// Best total for a hand, counting aces as 1 while the hand would bust otherwise.
pub fn hand_total(cards: &[Card]) -> u8 {
    let mut total: u8 = cards.iter().map(|card| card.value()).sum();
    let mut soft_aces = cards.iter().filter(|card| card.rank == 1).count();

    while total > BLACKJACK && soft_aces > 0 {
        total -= 10;
        soft_aces -= 1;
    }

    total
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Hit,
    Stand,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Hand {
    cards: Vec<Card>,
    stood: bool,
}

#[derive(Debug)]
pub struct Blackjack {
    ready: Readiness,
    deck: Vec<Card>,
    hands: [Hand; PLAYERS_PER_GAME],
    rng: StdRng,
}

impl Blackjack {
    pub fn new(rng: StdRng) -> Self {
        Self {
            ready: Readiness::new(),
            deck: Vec::new(),
            hands: Default::default(),
            rng,
        }
    }

    pub fn cards(&self, seat: usize) -> &[Card] {
        &self.hands[seat].cards
    }

    fn shuffled_deck(rng: &mut StdRng) -> Vec<Card> {
        let mut deck: Vec<Card> = Suit::ALL
            .into_iter()
            .flat_map(|suit| (1..=13).map(move |rank| Card { rank, suit }))
            .collect();
        deck.shuffle(rng);
        deck
    }
}

impl Rules for Blackjack {
    type Setup = ();
    type Action = Move;

    fn game_type(&self) -> GameType {
        GameType::Blackjack
    }

    fn parse_setup(&self, command: &Command) -> Result<(), GameError> {
        parse_accept(command)
    }

    fn parse_action(&self, command: &Command) -> Result<Move, GameError> {
        match command.head() {
            "hit" => Ok(Move::Hit),
            "stand" => Ok(Move::Stand),
            other => Err(GameError::Invalid(format!("'{}' is not hit or stand.", other))),
        }
    }

    fn setup(&mut self, seat: usize, _: ()) -> Result<(), GameError> {
        self.ready.accept(seat)
    }

    fn is_set_up(&self, seat: usize) -> bool {
        self.ready.is_ready(seat)
    }

    fn start(&mut self, _: usize) -> usize {
        self.deck = Self::shuffled_deck(&mut self.rng);
        for _ in 0..OPENING_CARDS {
            for hand in self.hands.iter_mut() {
                if let Some(card) = self.deck.pop() {
                    hand.cards.push(card);
                }
            }
        }
        0
    }

    fn act(&mut self, seat: usize, action: Move) -> Result<Resolution, GameError> {
        let opponent = (seat + 1) % PLAYERS_PER_GAME;

        match action {
            Move::Hit => {
                let card = self
                    .deck
                    .pop()
                    .ok_or_else(|| GameError::InvalidTarget("The deck is empty.".to_string()))?;
                let hand = &mut self.hands[seat];
                hand.cards.push(card);
                let total = hand_total(&hand.cards);

                if total > BLACKJACK {
                    Ok(Resolution::finished(
                        Effect::Busted { card, total },
                        Finish::Winner(opponent),
                    ))
                } else {
                    Ok(Resolution::ongoing(Effect::Drew { card, total }))
                }
            }
            Move::Stand => {
                self.hands[seat].stood = true;
                let total = hand_total(&self.hands[seat].cards);
                let effect = Effect::Stood { total };

                if !self.hands.iter().all(|hand| hand.stood) {
                    return Ok(Resolution::ongoing(effect));
                }

                let opponent_total = hand_total(&self.hands[opponent].cards);
                let finish = match total.cmp(&opponent_total) {
                    std::cmp::Ordering::Greater => Finish::Winner(seat),
                    std::cmp::Ordering::Less => Finish::Winner(opponent),
                    std::cmp::Ordering::Equal => Finish::Draw,
                };
                Ok(Resolution::finished(effect, finish))
            }
        }
    }

    fn next_turn(&self, current: usize, seats: usize) -> usize {
        (1..=seats)
            .map(|offset| (current + offset) % seats)
            .find(|seat| !self.hands[*seat].stood)
            .unwrap_or(current)
    }

    fn views(&self, participants: &[PlayerId]) -> Vec<BoardView> {
        let hands = self
            .hands
            .iter()
            .zip(participants)
            .map(|(hand, player)| HandView {
                player: *player,
                cards: hand.cards.clone(),
                total: hand_total(&hand.cards),
                stood: hand.stood,
            })
            .collect();

        vec![BoardView::Hands(hands)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{ActionResult, Game, GameFamily, Machine, Outcome};
    use rand::SeedableRng;

    const ALICE: PlayerId = PlayerId(1);
    const BOB: PlayerId = PlayerId(2);

    fn card(rank: u8) -> Card {
        Card {
            rank,
            suit: Suit::Spades,
        }
    }

    fn command(verb: &str) -> Command {
        Command::new(GameFamily::Blackjack, "blackjack_", verb)
    }

    fn active_game() -> Machine<Blackjack> {
        let mut game = Machine::new(vec![ALICE, BOB], Blackjack::new(StdRng::seed_from_u64(5)));
        game.setup(BOB, &command("accept")).unwrap();
        game
    }

    /// Replaces both hands and stacks the deck so the next draw is `next`.
    fn rig(rules: &mut Blackjack, alice: &[u8], bob: &[u8], next: &[u8]) {
        rules.hands[0].cards = alice.iter().map(|rank| card(*rank)).collect();
        rules.hands[1].cards = bob.iter().map(|rank| card(*rank)).collect();
        rules.deck = next.iter().rev().map(|rank| card(*rank)).collect();
    }

    #[test]
    fn aces_soften_when_needed() {
        assert_eq!(hand_total(&[card(1), card(13)]), 21);
        assert_eq!(hand_total(&[card(1), card(1), card(9)]), 21);
        assert_eq!(hand_total(&[card(1), card(5), card(9)]), 15);
        assert_eq!(hand_total(&[card(10), card(12), card(2)]), 22);
    }

    #[test]
    fn activation_deals_two_cards_each() {
        let game = active_game();
        assert_eq!(game.rules().cards(0).len(), 2);
        assert_eq!(game.rules().cards(1).len(), 2);
        assert_eq!(game.rules().deck.len(), 48);
    }

    #[test]
    fn busting_hands_the_win_to_the_opponent() {
        let mut rules = Blackjack::new(StdRng::seed_from_u64(1));
        rig(&mut rules, &[10, 9], &[2, 3], &[5]);

        let resolution = rules.act(0, Move::Hit).unwrap();

        assert_eq!(
            resolution.effect,
            Effect::Busted {
                card: card(5),
                total: 24
            }
        );
        assert_eq!(resolution.finish, Some(Finish::Winner(1)));
    }

    #[test]
    fn higher_total_wins_once_both_stand() {
        let mut game = active_game();
        rig(game.rules_mut(), &[10, 8], &[10, 7], &[]);

        assert_eq!(
            game.act(ALICE, &command("stand")),
            ActionResult::Accepted(Effect::Stood { total: 18 })
        );
        assert_eq!(
            game.act(BOB, &command("stand")),
            ActionResult::AcceptedTerminal(Effect::Stood { total: 17 }, Outcome::Winner(ALICE))
        );
    }

    #[test]
    fn equal_totals_draw() {
        let mut rules = Blackjack::new(StdRng::seed_from_u64(1));
        rig(&mut rules, &[10, 8], &[9, 9], &[]);
        rules.act(0, Move::Stand).unwrap();

        let resolution = rules.act(1, Move::Stand).unwrap();

        assert_eq!(resolution.finish, Some(Finish::Draw));
    }

    #[test]
    fn player_who_stood_is_skipped() {
        let mut game = active_game();
        rig(game.rules_mut(), &[2, 3], &[2, 2], &[2, 3, 4]);

        game.act(ALICE, &command("stand"));
        assert_eq!(game.current_turn(), Some(BOB));

        game.act(BOB, &command("hit"));
        assert_eq!(game.current_turn(), Some(BOB));
        game.act(BOB, &command("hit"));
        assert_eq!(game.current_turn(), Some(BOB));
    }
}
