//! Text rendering of board views and action effects.

use engine::{
    game::{
        blackjack::{Card, Suit},
        Effect,
    },
    render::{BoardView, CellView, FighterView, HandView},
    GameType, PlayerId,
};

/// Width of the HP bar in blocks.
const HP_BAR_WIDTH: i32 = 10;

/// Words of the chain shown before older ones are elided.
const SHOWN_WORDS: usize = 8;

/// Longest value Discord accepts for an embed field.
const FIELD_LIMIT: usize = 1024;

/// One embed field: name and value.
pub type Field = (String, String);

/// Mentions a player.
pub fn mention(player: PlayerId) -> String {
    format!("<@{}>", player)
}

/// Glyph of the piece owned by `seat`.
pub fn piece(game_type: GameType, seat: usize) -> &'static str {
    match (game_type, seat) {
        (GameType::TicTacToe, 0) => "❌",
        (GameType::TicTacToe, _) => "⭕",
        (_, 0) => "🔴",
        _ => "🟡",
    }
}

fn cell(game_type: GameType, cell: CellView) -> &'static str {
    match cell {
        CellView::Empty if game_type == GameType::Battleship => "🟦",
        CellView::Empty => "⚫",
        CellView::Ship => "🚢",
        CellView::Hit => "💥",
        CellView::Miss => "⚪",
        CellView::Piece(seat) => piece(game_type, seat),
    }
}

/// Draws a grid with one emoji per cell.
///
/// Battleship waters get row letters and column numbers so players can type targets;
/// Connect Four gets its column numbers underneath.
fn grid(game_type: GameType, rows: &[Vec<CellView>]) -> String {
    let cols = rows.first().map_or(0, Vec::len);
    let mut lines = Vec::with_capacity(rows.len() + 1);

    if game_type == GameType::Battleship {
        let header: String = (1..=cols).map(keycap).collect();
        lines.push(format!("⬛{}", header));
    }

    for (index, row) in rows.iter().enumerate() {
        let cells: String = row.iter().map(|view| cell(game_type, *view)).collect();
        if game_type == GameType::Battleship {
            lines.push(format!("{}{}", row_letter(index), cells));
        } else {
            lines.push(cells);
        }
    }

    if game_type == GameType::ConnectFour {
        lines.push((1..=cols).map(keycap).collect());
    }

    lines.join("\n")
}

fn keycap(number: usize) -> String {
    match number {
        0..=9 => format!("{}\u{fe0f}\u{20e3}", number),
        _ => "🔟".to_string(),
    }
}

fn row_letter(index: usize) -> String {
    // Regional indicator letters render as boxed A, B, C... next to emoji cells.
    char::from_u32(0x1F1E6 + index as u32)
        .map(|letter| format!("{}\u{200b}", letter))
        .unwrap_or_default()
}

fn hp_bar(fighter: &FighterView) -> String {
    let filled = if fighter.max_hp > 0 {
        (fighter.hp.max(0) * HP_BAR_WIDTH + fighter.max_hp - 1) / fighter.max_hp
    } else {
        0
    };
    let filled = filled.clamp(0, HP_BAR_WIDTH) as usize;
    format!(
        "{}{}",
        "🟩".repeat(filled),
        "⬛".repeat(HP_BAR_WIDTH as usize - filled)
    )
}

fn fighter(fighter: &FighterView) -> String {
    let mut line = format!(
        "{} ❤️ {}/{}\n{}\nHeals left: {}",
        mention(fighter.player),
        fighter.hp.max(0),
        fighter.max_hp,
        hp_bar(fighter),
        fighter.heals_left
    );
    if fighter.defending {
        line.push_str(" 🛡️");
    }
    line
}

/// Card as rank and suit symbol, e.g. `A♠` or `10♥`.
pub fn card(card: Card) -> String {
    let rank = match card.rank {
        1 => "A".to_string(),
        11 => "J".to_string(),
        12 => "Q".to_string(),
        13 => "K".to_string(),
        rank => rank.to_string(),
    };
    let suit = match card.suit {
        Suit::Clubs => '♣',
        Suit::Diamonds => '♦',
        Suit::Hearts => '♥',
        Suit::Spades => '♠',
    };
    format!("{}{}", rank, suit)
}

fn hand(hand: &HandView) -> String {
    let cards: Vec<String> = hand.cards.iter().map(|c| card(*c)).collect();
    let mut line = format!("{}: {} (**{}**)", mention(hand.player), cards.join(" "), hand.total);
    if hand.stood {
        line.push_str(" stood");
    }
    line
}

/// Renders one board view as embed fields.
///
/// # Arguments
/// - `game_type` - Game the view belongs to; picks glyphs and grid labels
/// - `view` - View to render
///
/// # Returns
/// - `Vec<Field>` - Named field values in display order, each within Discord's field limit
pub fn fields(game_type: GameType, view: &BoardView) -> Vec<Field> {
    let fields = match view {
        BoardView::Grid { owner, rows } => {
            let name = match owner {
                Some(owner) => format!("Waters of {}", owner_label(*owner)),
                None => "Board".to_string(),
            };
            vec![(name, grid(game_type, rows))]
        }
        BoardView::Fighters(fighters) => vec![(
            "Fighters".to_string(),
            fighters.iter().map(fighter).collect::<Vec<_>>().join("\n\n"),
        )],
        BoardView::Hands(hands) => vec![(
            "Hands".to_string(),
            hands.iter().map(hand).collect::<Vec<_>>().join("\n"),
        )],
        BoardView::Words {
            chain,
            next_letter,
            scores,
            target,
        } => {
            let shown = chain.len().saturating_sub(SHOWN_WORDS);
            let mut words = chain[shown..].join(" → ");
            if shown > 0 {
                words = format!("… → {}", words);
            }
            if words.is_empty() {
                words = "No words yet. Any word starts the chain.".to_string();
            }

            let mut score_lines: Vec<String> = scores
                .iter()
                .map(|(player, score)| format!("{}: {}/{}", mention(*player), score, target))
                .collect();
            if let Some(letter) = next_letter {
                score_lines.push(format!("Next word starts with **{}**", letter.to_ascii_uppercase()));
            }

            vec![
                ("Chain".to_string(), words),
                ("Score".to_string(), score_lines.join("\n")),
            ]
        }
    };

    fields
        .into_iter()
        .map(|(name, value)| (name, clamp_field(value)))
        .collect()
}

/// Cuts a field value down to `FIELD_LIMIT` characters, keeping its end.
///
/// Chains grow at the end, so the newest text is what stays visible.
fn clamp_field(value: String) -> String {
    let len = value.chars().count();
    if len <= FIELD_LIMIT {
        return value;
    }
    let tail: String = value.chars().skip(len - (FIELD_LIMIT - 1)).collect();
    format!("…{}", tail)
}

// Field names cannot mention users, so owners are shown by id.
fn owner_label(owner: PlayerId) -> String {
    format!("player {}", owner)
}

/// Describes what the last accepted action did.
pub fn effect(effect: &Effect) -> String {
    match effect {
        Effect::Miss { target } => format!("Shot at {} missed.", target),
        Effect::Hit { target } => format!("Shot at {} hit a ship!", target),
        Effect::Sunk { target, size } => {
            format!("Shot at {} sank a ship of length {}!", target, size)
        }
        Effect::Dropped { column, .. } => format!("Dropped a piece into column {}.", column + 1),
        Effect::Marked { cell } => format!("Marked cell {}.", cell + 1),
        Effect::Attacked { damage, blocked } if *blocked => {
            format!("Attacked for {} damage, partly blocked.", damage)
        }
        Effect::Attacked { damage, .. } => format!("Attacked for {} damage.", damage),
        Effect::Defended => "Raised a guard for the next attack.".to_string(),
        Effect::Healed { amount } => format!("Healed {} HP.", amount),
        Effect::Drew { card: drawn, total } => format!("Drew {} for {}.", card(*drawn), total),
        Effect::Busted { card: drawn, total } => {
            format!("Drew {} and busted with {}.", card(*drawn), total)
        }
        Effect::Stood { total } => format!("Stood on {}.", total),
        Effect::Played { word } => format!("Played **{}**.", word),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::Coord;

    #[test]
    fn draws_connect_four_with_column_numbers() {
        let mut rows = vec![vec![CellView::Empty; 7]; 6];
        rows[5][3] = CellView::Piece(0);
        rows[4][3] = CellView::Piece(1);

        let fields = fields(GameType::ConnectFour, &BoardView::Grid { owner: None, rows });

        let lines: Vec<&str> = fields[0].1.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[5], "⚫⚫⚫🔴⚫⚫⚫");
        assert_eq!(lines[4], "⚫⚫⚫🟡⚫⚫⚫");
        assert!(lines[6].starts_with("1\u{fe0f}\u{20e3}"));
    }

    #[test]
    fn draws_tic_tac_toe_marks() {
        let rows = vec![
            vec![CellView::Piece(0), CellView::Empty, CellView::Empty],
            vec![CellView::Empty, CellView::Piece(1), CellView::Empty],
            vec![CellView::Empty; 3],
        ];

        let fields = fields(GameType::TicTacToe, &BoardView::Grid { owner: None, rows });

        assert_eq!(fields[0].1, "❌⚫⚫\n⚫⭕⚫\n⚫⚫⚫");
    }

    #[test]
    fn labels_battleship_waters() {
        let mut rows = vec![vec![CellView::Empty; 5]; 5];
        rows[1][2] = CellView::Hit;
        rows[0][0] = CellView::Miss;

        let fields = fields(
            GameType::Battleship,
            &BoardView::Grid {
                owner: Some(PlayerId(7)),
                rows,
            },
        );

        assert_eq!(fields[0].0, "Waters of player 7");
        let lines: Vec<&str> = fields[0].1.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[1].ends_with("⚪🟦🟦🟦🟦"));
        assert!(lines[2].ends_with("🟦🟦💥🟦🟦"));
    }

    #[test]
    fn fills_hp_bar_by_share_of_max() {
        let view = FighterView {
            player: PlayerId(1),
            hp: 45,
            max_hp: 100,
            heals_left: 1,
            defending: true,
        };

        let text = fighter(&view);

        assert!(text.contains("45/100"));
        assert!(text.contains(&"🟩".repeat(5)));
        assert!(!text.contains(&"🟩".repeat(6)));
        assert!(text.ends_with("🛡️"));
    }

    #[test]
    fn elides_long_word_chains() {
        let chain: Vec<String> = (0..10).map(|i| format!("word{}", i)).collect();
        let view = BoardView::Words {
            chain,
            next_letter: Some('t'),
            scores: vec![(PlayerId(1), 5), (PlayerId(2), 5)],
            target: 10,
        };

        let fields = fields(GameType::WordChain, &view);

        assert!(fields[0].1.starts_with("… → word2"));
        assert!(fields[1].1.contains("<@1>: 5/10"));
        assert!(fields[1].1.contains("starts with **T**"));
    }

    #[test]
    fn keeps_word_fields_within_the_limit() {
        let chain: Vec<String> = (0..SHOWN_WORDS).map(|i| format!("{}{}", "a".repeat(500), i)).collect();
        let view = BoardView::Words {
            chain,
            next_letter: Some('a'),
            scores: vec![(PlayerId(1), 4), (PlayerId(2), 4)],
            target: 10,
        };

        let fields = fields(GameType::WordChain, &view);

        assert_eq!(fields[0].1.chars().count(), FIELD_LIMIT);
        assert!(fields[0].1.starts_with('…'));
        assert!(fields[0].1.ends_with(&format!("a{}", SHOWN_WORDS - 1)));
        assert!(fields[1].1.contains("<@2>: 4/10"));
    }

    #[test]
    fn describes_effects() {
        let ace = Card {
            rank: 1,
            suit: Suit::Spades,
        };

        assert_eq!(
            effect(&Effect::Sunk {
                target: Coord::new(1, 2),
                size: 2
            }),
            "Shot at B3 sank a ship of length 2!"
        );
        assert_eq!(effect(&Effect::Drew { card: ace, total: 21 }), "Drew A♠ for 21.");
        assert_eq!(
            effect(&Effect::Dropped { column: 0, row: 5 }),
            "Dropped a piece into column 1."
        );
    }
}
