//! Connect Four on a 7×6 board. Pieces drop to the lowest free row of a column.

use crate::{
    event::{Command, Coord, PlayerId},
    render::{BoardView, CellView},
};

use super::{
    grid::Grid,
    ready::{parse_accept, Readiness},
    Effect, Finish, GameError, GameType, Resolution, Rules,
};

pub const COLUMNS: usize = 7;
pub const ROWS: usize = 6;
pub const LINE_TO_WIN: usize = 4;

/// Identifier prefix of the column buttons.
pub const COLUMN_PREFIX: &str = "col_";

#[derive(Debug, Clone)]
pub struct ConnectFour {
    ready: Readiness,
    board: Grid<Option<usize>>,
}

impl ConnectFour {
    pub fn new() -> Self {
        Self {
            ready: Readiness::new(),
            board: Grid::filled(ROWS, COLUMNS, None),
        }
    }

    /// Lowest free row of `column`, if the column exists and is not full.
    fn landing_row(&self, column: usize) -> Option<usize> {
        (0..ROWS)
            .rev()
            .find(|row| self.board.get(Coord::new(*row, column)) == Some(None))
    }
}

impl Default for ConnectFour {
    fn default() -> Self {
        Self::new()
    }
}

impl Rules for ConnectFour {
    type Setup = ();
    type Action = usize;

    fn game_type(&self) -> GameType {
        GameType::ConnectFour
    }

    fn parse_setup(&self, command: &Command) -> Result<(), GameError> {
        parse_accept(command)
    }

    fn parse_action(&self, command: &Command) -> Result<usize, GameError> {
        if command.prefix != COLUMN_PREFIX {
            return Err(GameError::Invalid("Pick a column to drop into.".to_string()));
        }
        command
            .head()
            .parse()
            .map_err(|_| GameError::Invalid(format!("'{}' is not a column.", command.verb)))
    }

    fn setup(&mut self, seat: usize, _: ()) -> Result<(), GameError> {
        self.ready.accept(seat)
    }

    fn is_set_up(&self, seat: usize) -> bool {
        self.ready.is_ready(seat)
    }

    fn act(&mut self, seat: usize, column: usize) -> Result<Resolution, GameError> {
        if column >= COLUMNS {
            return Err(GameError::InvalidTarget(format!(
                "Column {} does not exist.",
                column + 1
            )));
        }
        let row = self.landing_row(column).ok_or_else(|| {
            GameError::InvalidTarget(format!("Column {} is full.", column + 1))
        })?;

        let landed = Coord::new(row, column);
        self.board.set(landed, Some(seat));
        let effect = Effect::Dropped { column, row };

        if self.board.longest_line(landed) >= LINE_TO_WIN {
            Ok(Resolution::finished(effect, Finish::Winner(seat)))
        } else if self.board.is_full(None) {
            Ok(Resolution::finished(effect, Finish::Draw))
        } else {
            Ok(Resolution::ongoing(effect))
        }
    }

    fn views(&self, _: &[PlayerId]) -> Vec<BoardView> {
        vec![BoardView::Grid {
            owner: None,
            rows: self.board.map_rows(|cell| match cell {
                Some(seat) => CellView::Piece(seat),
                None => CellView::Empty,
            }),
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{ActionResult, Game, GameFamily, Machine, Outcome, Phase};

    const ALICE: PlayerId = PlayerId(1);
    const BOB: PlayerId = PlayerId(2);

    fn drop_into(column: usize) -> Command {
        Command::new(GameFamily::BoardGames, COLUMN_PREFIX, column.to_string())
    }

    fn active_game() -> Machine<ConnectFour> {
        let mut game = Machine::new(vec![ALICE, BOB], ConnectFour::new());
        game.setup(BOB, &Command::new(GameFamily::BoardGames, "board_", "accept"))
            .unwrap();
        game
    }

    #[test]
    fn pieces_stack_from_the_bottom() {
        let mut game = active_game();

        assert_eq!(
            game.act(ALICE, &drop_into(3)),
            ActionResult::Accepted(Effect::Dropped { column: 3, row: 5 })
        );
        assert_eq!(
            game.act(BOB, &drop_into(3)),
            ActionResult::Accepted(Effect::Dropped { column: 3, row: 4 })
        );
    }

    #[test]
    fn full_column_is_an_invalid_target() {
        let mut game = active_game();
        for turn in 0..ROWS {
            let player = if turn % 2 == 0 { ALICE } else { BOB };
            game.act(player, &drop_into(0));
        }

        let result = game.act(ALICE, &drop_into(0));

        assert!(matches!(result, ActionResult::RejectedInvalidTarget(_)));
        assert_eq!(game.current_turn(), Some(ALICE));
    }

    #[test]
    fn out_of_range_column_is_an_invalid_target() {
        let mut game = active_game();
        let result = game.act(ALICE, &drop_into(COLUMNS));
        assert!(matches!(result, ActionResult::RejectedInvalidTarget(_)));
    }

    #[test]
    fn other_board_controls_are_rejected() {
        let mut game = active_game();
        let result = game.act(ALICE, &Command::new(GameFamily::BoardGames, "ttt_", "3"));
        assert!(matches!(result, ActionResult::RejectedInvalidTarget(_)));
    }

    #[test]
    fn four_in_a_row_wins() {
        let mut game = active_game();
        for column in 0..3 {
            game.act(ALICE, &drop_into(column));
            game.act(BOB, &drop_into(column));
        }

        let result = game.act(ALICE, &drop_into(3));

        assert_eq!(
            result,
            ActionResult::AcceptedTerminal(Effect::Dropped { column: 3, row: 5 }, Outcome::Winner(ALICE))
        );
        assert_eq!(game.phase(), Phase::Ended);
    }

    #[test]
    fn full_board_without_a_line_is_a_draw() {
        let mut rules = ConnectFour::new();
        // Columns alternate owners in pairs of rows so no line of four ever forms.
        for column in 0..COLUMNS {
            for row in 1..ROWS {
                let seat = ((row / 2) + column) % 2;
                rules.board.set(Coord::new(row, column), Some(seat));
            }
        }
        for column in 0..COLUMNS - 1 {
            rules.board.set(Coord::new(0, column), Some((column + 1) % 2));
        }

        let last = COLUMNS - 1;
        let result = rules.act(0, last).unwrap();

        assert_eq!(result.finish, Some(Finish::Draw));
    }
}
