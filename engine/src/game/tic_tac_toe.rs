use crate::{
    event::{Command, Coord, PlayerId},
    render::{BoardView, CellView},
};

use super::{
    grid::Grid,
    ready::{parse_accept, Readiness},
    Effect, Finish, GameError, GameType, Resolution, Rules,
};

pub const SIZE: usize = 3;

/// Identifier prefix of the cell buttons. The verb is the cell index, 0 to 8.
pub const CELL_PREFIX: &str = "ttt_";

#[derive(Debug, Clone)]
pub struct TicTacToe {
    ready: Readiness,
    board: Grid<Option<usize>>,
}

impl TicTacToe {
    pub fn new() -> Self {
        Self {
            ready: Readiness::new(),
            board: Grid::filled(SIZE, SIZE, None),
        }
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl Rules for TicTacToe {
    type Setup = ();
    type Action = usize;

    fn game_type(&self) -> GameType {
        GameType::TicTacToe
    }

    fn parse_setup(&self, command: &Command) -> Result<(), GameError> {
        parse_accept(command)
    }

    fn parse_action(&self, command: &Command) -> Result<usize, GameError> {
        if command.prefix != CELL_PREFIX {
            return Err(GameError::Invalid("Pick a cell to mark.".to_string()));
        }
        command
            .head()
            .parse()
            .map_err(|_| GameError::Invalid(format!("'{}' is not a cell.", command.verb)))
    }

    fn setup(&mut self, seat: usize, _: ()) -> Result<(), GameError> {
        self.ready.accept(seat)
    }

    fn is_set_up(&self, seat: usize) -> bool {
        self.ready.is_ready(seat)
    }

    fn act(&mut self, seat: usize, cell: usize) -> Result<Resolution, GameError> {
        let coord = Coord::new(cell / SIZE, cell % SIZE);
        match self.board.get(coord) {
            Some(None) => {}
            Some(Some(_)) => {
                return Err(GameError::InvalidTarget("That cell is taken.".to_string()))
            }
            None => {
                return Err(GameError::InvalidTarget(format!(
                    "Cell {} does not exist.",
                    cell
                )))
            }
        }

        self.board.set(coord, Some(seat));
        let effect = Effect::Marked { cell };

        if self.board.longest_line(coord) >= SIZE {
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
