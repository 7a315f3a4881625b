//! Battleship games with both fleets already placed.

use engine::{GameType, PlayerId, RenderRequest, RouteOutcome};

use crate::{context::TestContext, factory::game::start_game};

/// Placement verbs of the fixed fleet: ships along rows A, C and E, starting in
/// column 1.
pub const FIXED_FLEET: [&str; 3] = ["place_0_0_h", "place_2_0_h", "place_4_0_h"];

/// Cells of the fixed fleet in firing order; hitting all of them sinks every ship.
pub const FIXED_FLEET_CELLS: [&str; 7] = ["A1", "A2", "A3", "C1", "C2", "E1", "E2"];

/// Starts a battleship game and places the fixed fleet for both players.
///
/// # Arguments
/// - `test` - Context to start the game on
/// - `initiator` - First player; moves first once both fleets are placed
/// - `opponent` - Second player
///
/// # Returns
/// - `RenderRequest` - Render after the last placement, with the game active
///
/// # Panics
/// - If a placement is not accepted
pub async fn start_placed_game(
    test: &TestContext,
    initiator: PlayerId,
    opponent: PlayerId,
) -> RenderRequest {
    let mut last = start_game(test, GameType::Battleship, initiator, opponent).await;

    for player in [initiator, opponent] {
        for verb in FIXED_FLEET {
            last = match test.click(player, "bs_", verb).await {
                RouteOutcome::Render(render) => render,
                other => panic!("placement {} was not accepted: {:?}", verb, other),
            };
        }
    }

    last
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;
    use engine::{render::Prompt, Phase};

    #[tokio::test]
    async fn both_fleets_placed_starts_game() {
        let test = TestBuilder::new().build();
        let (alice, bob) = crate::factory::create_pair();

        let render = start_placed_game(&test, alice, bob).await;

        assert_eq!(render.phase, Phase::Active);
        assert!(matches!(
            render.prompt,
            Prompt::Turn { player, deadline: Some(_) } if player == alice
        ));
    }
}
