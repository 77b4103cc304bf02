use std::fmt;

use log::{debug, info};

use crate::minimax::Minimax;
use crate::tic_tac_toe::{Outcome, TicTacToe, COMPUTER, HUMAN};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    PlayerTurn,
    ComputerTurn,
    GameOver(Outcome),
}

/// One game against the computer. Transitions return a new session and never
/// fail on bad input: illegal clicks leave the session as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Session {
    game: TicTacToe,
    phase: Phase,
}

impl Session {
    pub fn new() -> Self {
        Self {
            game: TicTacToe::new(),
            phase: Phase::PlayerTurn,
        }
    }

    pub fn game(&self) -> &TicTacToe {
        &self.game
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn reset(&self) -> Self {
        info!("Restarting game");
        Self::new()
    }

    pub fn apply_player_move(&self, cell: usize) -> Self {
        if self.phase != Phase::PlayerTurn {
            debug!("Ignoring cell {} during {:?}", cell, self.phase);
            return *self;
        }
        if !self.game.is_empty_at(cell) {
            debug!("Ignoring cell {}: not an empty cell", cell);
            return *self;
        }

        let mut game = self.game;
        if game.place(cell, HUMAN).is_err() {
            return *self;
        }
        info!("Player {} takes cell {}", HUMAN, cell);
        Self {
            game,
            phase: Self::phase_after(&game, Phase::ComputerTurn),
        }
    }

    pub fn apply_computer_move(&self, minimax: &Minimax<TicTacToe>) -> anyhow::Result<Self> {
        if self.phase != Phase::ComputerTurn {
            debug!("Not the computer's turn during {:?}", self.phase);
            return Ok(*self);
        }

        let cell = minimax.find_best_move(&self.game)?;
        let mut game = self.game;
        game.place(cell, COMPUTER)?;
        info!("Computer {} takes cell {}", COMPUTER, cell);
        Ok(Self {
            game,
            phase: Self::phase_after(&game, Phase::PlayerTurn),
        })
    }

    fn phase_after(game: &TicTacToe, next: Phase) -> Phase {
        match game.outcome() {
            Outcome::Ongoing => next,
            outcome => {
                info!("Game over: {:?}", outcome);
                Phase::GameOver(outcome)
            }
        }
    }

    pub fn status(&self) -> String {
        self.to_string()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.phase {
            Phase::PlayerTurn => write!(f, "Player's Turn ({})", HUMAN),
            Phase::ComputerTurn => write!(f, "Computer's Turn ({})", COMPUTER),
            Phase::GameOver(Outcome::PlayerWins) => write!(f, "Winner: {}", HUMAN),
            Phase::GameOver(Outcome::ComputerWins) => write!(f, "Winner: {}", COMPUTER),
            Phase::GameOver(_) => write!(f, "Draw!"),
        }
    }
}
