use quickcheck::{Arbitrary, Gen};

use crate::{Game, NUM_CELLS};

/// A game reached by playing random legal moves from the opening.
#[derive(Clone, Debug)]
pub struct RandomGame {
    pub game: Game,
}

impl Arbitrary for RandomGame {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut game = Game::new();
        // At most 60 moves fit on the board after the opening
        let num_moves = usize::arbitrary(g) % (NUM_CELLS - 3);
        for _ in 0..num_moves {
            let legal = game.legal_moves(game.current_player());
            // Both players are stuck
            let Some(&(i, j)) = g.choose(&legal) else {
                break;
            };
            game.play(i, j);
        }
        RandomGame { game }
    }
}
