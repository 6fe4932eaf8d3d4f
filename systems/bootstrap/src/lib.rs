#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares the Light 'Em All experience.

use light_em_all_core::BoardView;
use light_em_all_world::{query, World};

/// Produces data required to greet the player.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner<'world>(&self, world: &'world World) -> &'world str {
        query::welcome_banner(world)
    }

    /// Captures the board snapshot required for the first frame.
    #[must_use]
    pub fn board_view(&self, world: &World) -> BoardView {
        query::board_view(world)
    }
}
