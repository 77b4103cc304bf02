use anyhow::bail;
use log::debug;

use crate::game::Game;

pub(crate) const WIN_SCORE: i32 = 10;
pub(crate) const LOSS_SCORE: i32 = -10;
pub(crate) const DRAW_SCORE: i32 = 0;

/// Exhaustive minimax search without pruning or depth limit.
///
/// Every child position is a fresh copy of its parent, so the position handed
/// to `search` or `find_best_move` is never modified.
pub(crate) struct Minimax<G: Game> {
    maximizer: G::Player,
    minimizer: G::Player,
}

impl<G: Game> Minimax<G> {
    pub(crate) fn new(maximizer: G::Player, minimizer: G::Player) -> Self {
        Self { maximizer, minimizer }
    }

    /// Scores `game` from the maximizer's point of view, assuming both sides
    /// play optimally from here. `maximizing` says whose turn it is.
    pub(crate) fn search(&self, game: &G, maximizing: bool) -> anyhow::Result<i32> {
        match game.check_winner() {
            Some(winner) if winner == self.maximizer => return Ok(WIN_SCORE),
            Some(_) => return Ok(LOSS_SCORE),
            None => {}
        }
        let moves = game.get_available_moves();
        if moves.is_empty() {
            return Ok(DRAW_SCORE);
        }

        let mover = if maximizing { self.maximizer } else { self.minimizer };
        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for action in moves {
            let child = game.with_move(action, mover)?;
            let score = self.search(&child, !maximizing)?;
            best = if maximizing { best.max(score) } else { best.min(score) };
        }
        Ok(best)
    }

    /// Picks the maximizer's move with the highest score. Ties go to the move
    /// listed first by `get_available_moves`.
    ///
    /// Must not be called on a finished game: this asserts in debug builds
    /// and returns an error otherwise.
    pub(crate) fn find_best_move(&self, game: &G) -> anyhow::Result<G::Action> {
        debug_assert!(!game.done(), "find_best_move called on a terminal board:\n{}", game);
        if game.done() {
            bail!("No move to make on a terminal board");
        }

        let mut best: Option<(G::Action, i32)> = None;
        for action in game.get_available_moves() {
            let child = game.with_move(action, self.maximizer)?;
            let score = self.search(&child, false)?;
            debug!("candidate {:?} scores {}", action, score);
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((action, score));
            }
        }

        match best {
            Some((action, score)) => {
                debug!("best move {:?} with score {}", action, score);
                Ok(action)
            }
            None => bail!("No empty cell to move into"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tic_tac_toe::tests::{board, E, O, X};
    use crate::tic_tac_toe::{Spot, TicTacToe, COMPUTER, HUMAN};
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};

    fn computer() -> Minimax<TicTacToe> {
        Minimax::new(COMPUTER, HUMAN)
    }

    #[test]
    fn test_search_terminal_scores() {
        let minimax = computer();
        let player_won = board([X, X, X, O, O, E, E, E, E]);
        assert_eq!(minimax.search(&player_won, true).unwrap(), -10);

        let computer_won = board([O, O, O, X, X, E, X, E, E]);
        assert_eq!(minimax.search(&computer_won, false).unwrap(), 10);

        let draw = board([X, O, X, X, O, O, O, X, X]);
        assert_eq!(minimax.search(&draw, true).unwrap(), 0);
        assert_eq!(minimax.search(&draw, false).unwrap(), 0);
    }

    #[test]
    fn test_search_one_move_left() {
        let minimax = computer();
        // Player takes the last cell and completes the middle column.
        let game = board([O, X, O, O, X, X, X, E, O]);
        assert_eq!(minimax.search(&game, false).unwrap(), -10);
        // Computer takes it instead: no line, full board.
        assert_eq!(minimax.search(&game, true).unwrap(), 0);
    }

    #[test]
    fn test_empty_board_is_a_draw_and_picks_first_cell() {
        let minimax = computer();
        let game = TicTacToe::new();
        assert_eq!(minimax.search(&game, true).unwrap(), 0);
        assert_eq!(minimax.find_best_move(&game).unwrap(), 0);
        assert_eq!(game, TicTacToe::new());
    }

    #[test]
    fn test_blocks_immediate_threat() {
        let game = board([X, X, E, O, E, E, E, E, E]);
        assert_eq!(computer().find_best_move(&game).unwrap(), 2);
    }

    #[test]
    fn test_blocking_fork_ties_with_immediate_win() {
        // Taking 2 blocks X and forks 5 and 6, so it scores the same as
        // winning at 5 outright. The lower index wins the tie.
        let game = board([X, X, E, O, O, E, E, E, E]);
        let minimax = computer();
        let best = minimax.find_best_move(&game).unwrap();
        assert_eq!(best, 2);
        assert_eq!(minimax.search(&game.with_move(2, COMPUTER).unwrap(), false).unwrap(), 10);
        assert_eq!(minimax.search(&game.with_move(5, COMPUTER).unwrap(), false).unwrap(), 10);
    }

    #[test]
    fn test_completes_own_win_before_blocking() {
        let game = board([O, O, E, X, X, E, E, E, E]);
        let minimax = computer();
        assert_eq!(minimax.find_best_move(&game).unwrap(), 2);
        assert_eq!(minimax.search(&game.with_move(2, COMPUTER).unwrap(), false).unwrap(), 10);
    }

    #[test]
    fn test_find_best_move_does_not_mutate() {
        let game = board([X, E, E, E, O, E, E, E, X]);
        let before = game;
        let best = computer().find_best_move(&game).unwrap();
        assert_eq!(game, before);
        assert!(game.is_empty_at(best));
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "terminal board"))]
    fn test_find_best_move_on_full_board() {
        let game = board([X, O, X, X, O, O, O, X, X]);
        assert!(computer().find_best_move(&game).is_err());
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "terminal board"))]
    fn test_find_best_move_on_won_board() {
        let game = board([X, X, X, O, O, E, E, E, E]);
        assert!(computer().find_best_move(&game).is_err());
    }

    // Plays random legal plies (X first) and stops at a random point where
    // the computer is to move and the game is still open.
    fn random_computer_turn(rng: &mut StdRng) -> Option<TicTacToe> {
        let mut game = TicTacToe::new();
        let stop_after = 2 * rng.gen_range(0..4) + 1;
        let mut player = HUMAN;
        for _ in 0..stop_after {
            let moves = game.get_available_moves();
            let &cell = moves.choose(rng)?;
            game.place(cell, player).ok()?;
            if game.is_terminal() {
                return None;
            }
            player = if player == HUMAN { COMPUTER } else { HUMAN };
        }
        Some(game)
    }

    #[test]
    fn test_best_move_is_legal_and_optimal_on_random_boards() {
        let mut rng = StdRng::seed_from_u64(0x7ac7ac);
        let minimax = computer();
        let mut checked = 0;
        while checked < 60 {
            let Some(game) = random_computer_turn(&mut rng) else {
                continue;
            };
            let before = game;
            let best = minimax.find_best_move(&game).unwrap();
            assert_eq!(game, before);
            assert_eq!(game.spot(best), Some(Spot::Empty), "{}", game);

            let value = minimax.search(&game, true).unwrap();
            let chosen = minimax.search(&game.with_move(best, COMPUTER).unwrap(), false).unwrap();
            assert_eq!(chosen, value, "suboptimal move {} on\n{}", best, game);
            if value >= 0 {
                assert_ne!(chosen, -10);
            }

            // No earlier cell scores as well as the chosen one.
            for cell in game.get_available_moves().into_iter().filter(|&c| c < best) {
                let score = minimax.search(&game.with_move(cell, COMPUTER).unwrap(), false).unwrap();
                assert!(score < chosen, "cell {} ties {} on\n{}", cell, best, game);
            }
            checked += 1;
        }
    }
}
