//! Battleship on a 5×5 grid.
//!
//! Each player places a fleet of three ships (sizes 3, 2 and 2) during setup, either
//! one at a time or all at random, then players alternate firing at the opponent's
//! waters. Sinking the last opposing ship wins.

use rand::{rngs::StdRng, seq::IndexedRandom};

use crate::{
    event::{Command, Coord, Payload, PlayerId},
    render::{BoardView, CellView},
};

use super::{grid::Grid, Effect, Finish, GameError, GameType, Resolution, Rules, PLAYERS_PER_GAME};

pub const BOARD_SIZE: usize = 5;

/// Ship sizes, in placement order.
pub const FLEET: [usize; 3] = [3, 2, 2];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Occupied,
    Hit,
    Miss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    fn parse(input: &str) -> Option<Self> {
        match input.to_ascii_lowercase().as_str() {
            "h" | "horizontal" => Some(Self::Horizontal),
            "v" | "vertical" => Some(Self::Vertical),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ship {
    pub cells: Vec<Coord>,
    pub destroyed: bool,
}

/// A setup choice for the player's next ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Place {
        origin: Coord,
        orientation: Orientation,
    },
    /// Place every remaining ship at random.
    Random,
}

/// One player's waters.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Fleet {
    grid: Grid<Cell>,
    ships: Vec<Ship>,
}

impl Fleet {
    fn new() -> Self {
        Self {
            grid: Grid::filled(BOARD_SIZE, BOARD_SIZE, Cell::Empty),
            ships: Vec::with_capacity(FLEET.len()),
        }
    }

    fn is_placed(&self) -> bool {
        self.ships.len() == FLEET.len()
    }

    fn next_size(&self) -> Option<usize> {
        FLEET.get(self.ships.len()).copied()
    }

    /// Cells a ship would cover, or `None` if it leaves the grid or overlaps another.
    fn footprint(&self, origin: Coord, orientation: Orientation, size: usize) -> Option<Vec<Coord>> {
        let cells: Vec<Coord> = (0..size)
            .map(|offset| match orientation {
                Orientation::Horizontal => Coord::new(origin.row, origin.col.saturating_add(offset)),
                Orientation::Vertical => Coord::new(origin.row.saturating_add(offset), origin.col),
            })
            .collect();

        cells
            .iter()
            .all(|cell| self.grid.get(*cell) == Some(Cell::Empty))
            .then_some(cells)
    }

    fn place(&mut self, origin: Coord, orientation: Orientation) -> Result<(), GameError> {
        let size = self
            .next_size()
            .ok_or_else(|| GameError::Invalid("Your fleet is already placed.".to_string()))?;
        let cells = self.footprint(origin, orientation, size).ok_or_else(|| {
            GameError::Invalid(format!(
                "A ship of size {} does not fit at {} there.",
                size, origin
            ))
        })?;

        for cell in &cells {
            self.grid.set(*cell, Cell::Occupied);
        }
        self.ships.push(Ship {
            cells,
            destroyed: false,
        });

        Ok(())
    }

    fn place_remaining(&mut self, rng: &mut StdRng) -> Result<(), GameError> {
        while let Some(size) = self.next_size() {
            let candidates: Vec<(Coord, Orientation)> = (0..BOARD_SIZE)
                .flat_map(|row| (0..BOARD_SIZE).map(move |col| Coord::new(row, col)))
                .flat_map(|origin| {
                    [Orientation::Horizontal, Orientation::Vertical]
                        .into_iter()
                        .map(move |orientation| (origin, orientation))
                })
                .filter(|(origin, orientation)| {
                    self.footprint(*origin, *orientation, size).is_some()
                })
                .collect();

            let (origin, orientation) = candidates.choose(rng).copied().ok_or_else(|| {
                GameError::Invalid("There is no room left for your remaining ships.".to_string())
            })?;
            self.place(origin, orientation)?;
        }

        Ok(())
    }

    fn receive(&mut self, target: Coord) -> Result<Effect, GameError> {
        let cell = self
            .grid
            .get(target)
            .ok_or_else(|| GameError::InvalidTarget(format!("{} is off the board.", target)))?;

        match cell {
            Cell::Hit | Cell::Miss => Err(GameError::InvalidTarget(format!(
                "You already fired at {}.",
                target
            ))),
            Cell::Empty => {
                self.grid.set(target, Cell::Miss);
                Ok(Effect::Miss { target })
            }
            Cell::Occupied => {
                self.grid.set(target, Cell::Hit);

                let grid = &self.grid;
                let Some(ship) = self.ships.iter_mut().find(|ship| ship.cells.contains(&target))
                else {
                    return Ok(Effect::Hit { target });
                };
                if ship.cells.iter().all(|cell| grid.get(*cell) == Some(Cell::Hit)) {
                    ship.destroyed = true;
                    Ok(Effect::Sunk {
                        target,
                        size: ship.cells.len(),
                    })
                } else {
                    Ok(Effect::Hit { target })
                }
            }
        }
    }

    fn is_destroyed(&self) -> bool {
        self.ships.iter().all(|ship| ship.destroyed)
    }

    fn view(&self, owner: PlayerId, reveal: bool) -> BoardView {
        BoardView::Grid {
            owner: Some(owner),
            rows: self.grid.map_rows(|cell| match cell {
                Cell::Empty => CellView::Empty,
                Cell::Occupied if reveal => CellView::Ship,
                Cell::Occupied => CellView::Empty,
                Cell::Hit => CellView::Hit,
                Cell::Miss => CellView::Miss,
            }),
        }
    }
}

#[derive(Debug)]
pub struct Battleship {
    fleets: [Fleet; PLAYERS_PER_GAME],
    rng: StdRng,
}

impl Battleship {
    pub fn new(rng: StdRng) -> Self {
        Self {
            fleets: [Fleet::new(), Fleet::new()],
            rng,
        }
    }

    pub fn ships(&self, seat: usize) -> &[Ship] {
        &self.fleets[seat].ships
    }

    pub fn cell(&self, seat: usize, coord: Coord) -> Option<Cell> {
        self.fleets[seat].grid.get(coord)
    }
}

/// Reads a `<row>_<col>` verb tail.
fn parse_indices<'a>(mut args: impl Iterator<Item = &'a str>) -> Option<Coord> {
    let row = args.next()?.parse().ok()?;
    let col = args.next()?.parse().ok()?;
    Some(Coord::new(row, col))
}

/// Reads a typed placement such as `A1 h`, `b2 vertical` or `random`.
fn parse_placement_text(text: &str) -> Result<Placement, GameError> {
    let mut words = text.split_whitespace();
    let first = words.next().unwrap_or_default();
    if first.eq_ignore_ascii_case("random") {
        return Ok(Placement::Random);
    }

    let origin: Coord = first.parse()?;
    let orientation = match words.next() {
        Some(word) => Orientation::parse(word).ok_or_else(|| {
            GameError::Invalid(format!("'{}' is not h or v.", word))
        })?,
        None => Orientation::Horizontal,
    };

    Ok(Placement::Place { origin, orientation })
}

impl Rules for Battleship {
    type Setup = Placement;
    type Action = Coord;

    fn game_type(&self) -> GameType {
        GameType::Battleship
    }

    fn parse_setup(&self, command: &Command) -> Result<Placement, GameError> {
        let mut args = command.args();
        match args.next() {
            Some("random") => Ok(Placement::Random),
            Some("place") => {
                if let Payload::Coordinates(origin) = command.payload {
                    return Ok(Placement::Place {
                        origin,
                        orientation: Orientation::Horizontal,
                    });
                }
                let origin = parse_indices(&mut args);
                let orientation = args.next().and_then(Orientation::parse);
                match (origin, orientation) {
                    (Some(origin), Some(orientation)) => {
                        Ok(Placement::Place { origin, orientation })
                    }
                    _ => Err(GameError::Invalid(format!(
                        "Malformed placement '{}'.",
                        command.verb
                    ))),
                }
            }
            Some("reply") => parse_placement_text(command.text().unwrap_or_default()),
            _ => Err(GameError::Invalid(
                "Place your ships first, e.g. reply `A1 h`, or press Random.".to_string(),
            )),
        }
    }

    fn parse_action(&self, command: &Command) -> Result<Coord, GameError> {
        let mut args = command.args();
        match args.next() {
            Some("fire") => {
                if let Payload::Coordinates(target) = command.payload {
                    return Ok(target);
                }
                parse_indices(args).ok_or_else(|| {
                    GameError::Invalid(format!("Malformed target '{}'.", command.verb))
                })
            }
            Some("reply") => command.text().unwrap_or_default().parse(),
            _ => Err(GameError::Invalid(
                "Pick a cell to fire at, e.g. reply `B3`.".to_string(),
            )),
        }
    }

    fn setup(&mut self, seat: usize, choice: Placement) -> Result<(), GameError> {
        let fleet = &mut self.fleets[seat];
        if fleet.is_placed() {
            return Err(GameError::Invalid("Your fleet is already placed.".to_string()));
        }

        match choice {
            Placement::Place { origin, orientation } => fleet.place(origin, orientation),
            Placement::Random => {
                let mut placed = fleet.clone();
                placed.place_remaining(&mut self.rng)?;
                *fleet = placed;
                Ok(())
            }
        }
    }

    fn is_set_up(&self, seat: usize) -> bool {
        self.fleets[seat].is_placed()
    }

    fn act(&mut self, seat: usize, target: Coord) -> Result<Resolution, GameError> {
        let opponent = (seat + 1) % PLAYERS_PER_GAME;
        let fleet = &mut self.fleets[opponent];
        let effect = fleet.receive(target)?;

        if fleet.is_destroyed() {
            Ok(Resolution::finished(effect, Finish::Winner(seat)))
        } else {
            Ok(Resolution::ongoing(effect))
        }
    }

    fn views(&self, participants: &[PlayerId]) -> Vec<BoardView> {
        self.fleets
            .iter()
            .zip(participants)
            .map(|(fleet, owner)| fleet.view(*owner, false))
            .collect()
    }

    fn private_view(&self, seat: usize, participants: &[PlayerId]) -> Option<BoardView> {
        let fleet = self.fleets.get(seat)?;
        Some(fleet.view(*participants.get(seat)?, true))
    }
}
