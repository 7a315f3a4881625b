//! Buttons attached to a game message.
//!
//! Every button id is `<prefix><verb>:<session id>` so a click on a message left over
//! from an earlier session is recognised as stale by the engine.

use engine::{
    game::{connect_four, tic_tac_toe},
    render::{BoardView, CellView, Prompt},
    router::control_id,
    GameFamily, GameType, Phase, RenderRequest,
};
use serenity::all::{ButtonStyle, CreateActionRow, CreateButton};

use super::board::piece;

/// Discord allows at most five buttons per row.
const BUTTONS_PER_ROW: usize = 5;

/// Builds the button rows for a render.
///
/// Ended games get no rows, which clears the buttons of the message being updated.
///
/// # Arguments
/// - `render` - Render to build controls for
///
/// # Returns
/// - `Vec<CreateActionRow>` - Rows in display order, empty once the game is over
pub fn action_rows(render: &RenderRequest) -> Vec<CreateActionRow> {
    let id = render.session_id;
    let prefix = render.game_type.family().control_prefix();

    match render.phase {
        Phase::Ended => Vec::new(),
        Phase::Setup if render.game_type == GameType::Battleship => vec![CreateActionRow::Buttons(vec![
            button(prefix, "random", id, "Random fleet", ButtonStyle::Primary),
            forfeit(prefix, id),
        ])],
        Phase::Setup => vec![CreateActionRow::Buttons(vec![
            button(prefix, "accept", id, "Accept", ButtonStyle::Success),
            button(prefix, "decline", id, "Decline", ButtonStyle::Danger),
        ])],
        Phase::Active => active_rows(render, prefix),
    }
}

fn active_rows(render: &RenderRequest, prefix: &'static str) -> Vec<CreateActionRow> {
    let id = render.session_id;

    match render.game_type {
        GameType::ConnectFour => {
            let mut buttons: Vec<CreateButton> = (0..connect_four::COLUMNS)
                .map(|column| {
                    button(
                        connect_four::COLUMN_PREFIX,
                        &column.to_string(),
                        id,
                        &(column + 1).to_string(),
                        ButtonStyle::Secondary,
                    )
                    .disabled(column_full(render, column))
                })
                .collect();
            buttons.push(forfeit(prefix, id));
            chunk(buttons)
        }
        GameType::TicTacToe => {
            let cells = grid_cells(render);
            let mut rows: Vec<CreateActionRow> = (0..tic_tac_toe::SIZE)
                .map(|row| {
                    CreateActionRow::Buttons(
                        (0..tic_tac_toe::SIZE)
                            .map(|col| {
                                let cell = row * tic_tac_toe::SIZE + col;
                                let view = cells
                                    .and_then(|rows| rows.get(row))
                                    .and_then(|cols| cols.get(col))
                                    .copied()
                                    .unwrap_or(CellView::Empty);
                                tic_tac_toe_cell(render, cell, view)
                            })
                            .collect(),
                    )
                })
                .collect();
            rows.push(CreateActionRow::Buttons(vec![forfeit(prefix, id)]));
            rows
        }
        GameType::Duel => vec![CreateActionRow::Buttons(vec![
            button(prefix, "attack", id, "Attack", ButtonStyle::Danger),
            button(prefix, "defend", id, "Defend", ButtonStyle::Primary),
            button(prefix, "heal", id, "Heal", ButtonStyle::Success),
            forfeit(prefix, id),
        ])],
        GameType::Blackjack => vec![CreateActionRow::Buttons(vec![
            button(prefix, "hit", id, "Hit", ButtonStyle::Primary),
            button(prefix, "stand", id, "Stand", ButtonStyle::Secondary),
            forfeit(prefix, id),
        ])],
        // Targets and words are typed, so only the way out needs a button.
        GameType::Battleship | GameType::WordChain => {
            vec![CreateActionRow::Buttons(vec![forfeit(prefix, id)])]
        }
    }
}

fn button(prefix: &str, verb: &str, session_id: u64, label: &str, style: ButtonStyle) -> CreateButton {
    CreateButton::new(control_id(prefix, verb, session_id))
        .label(label)
        .style(style)
}

fn forfeit(prefix: &str, session_id: u64) -> CreateButton {
    button(prefix, "forfeit", session_id, "Forfeit", ButtonStyle::Danger)
}

fn tic_tac_toe_cell(render: &RenderRequest, cell: usize, view: CellView) -> CreateButton {
    let base = CreateButton::new(control_id(
        tic_tac_toe::CELL_PREFIX,
        &cell.to_string(),
        render.session_id,
    ))
    .style(ButtonStyle::Secondary);

    match view {
        CellView::Piece(seat) => base.label(piece(render.game_type, seat)).disabled(true),
        // Buttons need a visible label; a middle dot keeps empty cells square.
        _ => base.label("·"),
    }
}

/// Rows of the shared grid, when the render has one.
fn grid_cells(render: &RenderRequest) -> Option<&Vec<Vec<CellView>>> {
    render.board_views.iter().find_map(|view| match view {
        BoardView::Grid { owner: None, rows } => Some(rows),
        _ => None,
    })
}

fn column_full(render: &RenderRequest, column: usize) -> bool {
    grid_cells(render)
        .and_then(|rows| rows.first())
        .and_then(|top| top.get(column))
        .is_some_and(|cell| *cell != CellView::Empty)
}

fn chunk(buttons: Vec<CreateButton>) -> Vec<CreateActionRow> {
    buttons
        .chunks(BUTTONS_PER_ROW)
        .map(|row| CreateActionRow::Buttons(row.to_vec()))
        .collect()
}

/// Short instruction shown under the prompt for games that are played by typing.
///
/// # Returns
/// - `Some(&str)` - How to make the next move by message
/// - `None` - The game is played with its buttons alone
pub fn typing_hint(render: &RenderRequest) -> Option<&'static str> {
    if render.game_type.family().reply_prefix().is_none() {
        return None;
    }

    match (render.game_type.family(), &render.prompt) {
        (GameFamily::Battleship, Prompt::AwaitingSetup { .. }) => Some(
            "Place your ships by typing a start cell and direction, e.g. `A1 h` or `B2 v`, \
             or type `random`.",
        ),
        (GameFamily::Battleship, Prompt::Turn { .. }) => {
            Some("Fire by typing a target cell, e.g. `B3`.")
        }
        (GameFamily::WordGame, Prompt::Turn { .. }) => {
            Some("Play by typing a single word in this channel.")
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::{PlayerId, SessionKey};

    fn render(game_type: GameType, phase: Phase, board_views: Vec<BoardView>) -> RenderRequest {
        let participants = vec![PlayerId(1), PlayerId(2)];
        RenderRequest {
            session_key: SessionKey::from_participants(&participants).unwrap(),
            session_id: 9,
            channel_id: 555,
            game_type,
            phase,
            participants,
            board_views,
            prompt: Prompt::Turn {
                player: PlayerId(1),
                deadline: None,
            },
            last_effect: None,
            private_view: None,
        }
    }

    fn json(rows: &[CreateActionRow]) -> String {
        serde_json::to_string(rows).unwrap()
    }

    #[test]
    fn ended_game_clears_buttons() {
        let rows = action_rows(&render(GameType::Duel, Phase::Ended, Vec::new()));

        assert!(rows.is_empty());
    }

    #[test]
    fn challenge_offers_accept_and_decline() {
        let text = json(&action_rows(&render(GameType::ConnectFour, Phase::Setup, Vec::new())));

        assert!(text.contains("board_accept:9"));
        assert!(text.contains("board_decline:9"));
    }

    #[test]
    fn connect_four_disables_full_columns() {
        let mut rows = vec![vec![CellView::Empty; 7]; 6];
        for row in rows.iter_mut() {
            row[2] = CellView::Piece(0);
        }
        let controls = action_rows(&render(
            GameType::ConnectFour,
            Phase::Active,
            vec![BoardView::Grid { owner: None, rows }],
        ));

        assert_eq!(controls.len(), 2);
        let text = json(&controls);
        assert!(text.contains("col_0:9"));
        assert!(text.contains("col_6:9"));
        assert!(text.contains("board_forfeit:9"));
        assert_eq!(text.matches("\"disabled\":true").count(), 1);
    }

    #[test]
    fn tic_tac_toe_lays_out_cells() {
        let mut rows = vec![vec![CellView::Empty; 3]; 3];
        rows[1][1] = CellView::Piece(1);
        let controls = action_rows(&render(
            GameType::TicTacToe,
            Phase::Active,
            vec![BoardView::Grid { owner: None, rows }],
        ));

        assert_eq!(controls.len(), 4);
        let text = json(&controls);
        assert!(text.contains("ttt_0:9"));
        assert!(text.contains("ttt_8:9"));
        assert!(text.contains("⭕"));
    }

    #[test]
    fn typed_games_explain_how_to_move() {
        let battleship = render(GameType::Battleship, Phase::Active, Vec::new());
        let duel = render(GameType::Duel, Phase::Active, Vec::new());

        assert_eq!(typing_hint(&battleship), Some("Fire by typing a target cell, e.g. `B3`."));
        assert_eq!(typing_hint(&duel), None);
    }
}
