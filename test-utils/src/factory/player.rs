//! Player factory.

use engine::PlayerId;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for generating unique player ids in tests.
///
/// Starts high so generated ids read like Discord snowflakes and never collide with
/// small ids tests pick by hand.
static COUNTER: AtomicU64 = AtomicU64::new(100_000_000_000_000_000);

/// Creates a player id no other test has used.
///
/// # Returns
/// - `PlayerId` - Fresh, unique player id
pub fn create_player() -> PlayerId {
    PlayerId(COUNTER.fetch_add(1, Ordering::SeqCst))
}

/// Creates two distinct players, initiator first.
pub fn create_pair() -> (PlayerId, PlayerId) {
    (create_player(), create_player())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_unique_players() {
        let (alice, bob) = create_pair();
        let carol = create_player();

        assert_ne!(alice, bob);
        assert_ne!(bob, carol);
        assert!(bob > alice);
    }
}
