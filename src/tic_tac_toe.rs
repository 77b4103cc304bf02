use std::fmt;
use anyhow::{Result, bail};

use crate::game::Game;

pub(crate) const CELLS: usize = 9;

/// The 8 winning lines: rows, then columns, then diagonals.
pub(crate) const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Player {
    X,
    O,
}

/// The human always plays X and moves first.
pub(crate) const HUMAN: Player = Player::X;
pub(crate) const COMPUTER: Player = Player::O;

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Spot {
    Empty,
    Filled(Player),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    PlayerWins,
    ComputerWins,
    Draw,
    Ongoing,
}

/// A 3x3 board, cells indexed 0-8 row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TicTacToe {
    spots: [Spot; CELLS],
}

impl TicTacToe {
    pub fn new() -> Self {
        Self {
            spots: [Spot::Empty; CELLS],
        }
    }

    pub fn spot(&self, index: usize) -> Option<Spot> {
        self.spots.get(index).copied()
    }

    pub fn is_empty_at(&self, index: usize) -> bool {
        self.spot(index) == Some(Spot::Empty)
    }

    pub fn place(&mut self, index: usize, player: Player) -> Result<()> {
        match self.spots.get(index) {
            None => bail!("Cell {} is out of range 0..{}", index, CELLS),
            Some(Spot::Filled(_)) => bail!("Cell {} is already filled", index),
            Some(Spot::Empty) => {
                self.spots[index] = Spot::Filled(player);
                Ok(())
            }
        }
    }

    // First completed line in LINES order wins ties.
    pub fn check_winner(&self) -> Option<Player> {
        LINES.iter().find_map(|&[a, b, c]| match self.spots[a] {
            Spot::Filled(player)
                if self.spots[b] == Spot::Filled(player) && self.spots[c] == Spot::Filled(player) =>
            {
                Some(player)
            }
            _ => None,
        })
    }

    pub fn is_full(&self) -> bool {
        !self.spots.contains(&Spot::Empty)
    }

    pub fn is_terminal(&self) -> bool {
        self.check_winner().is_some() || self.is_full()
    }

    pub fn outcome(&self) -> Outcome {
        match self.check_winner() {
            Some(winner) if winner == HUMAN => Outcome::PlayerWins,
            Some(_) => Outcome::ComputerWins,
            None if self.is_full() => Outcome::Draw,
            None => Outcome::Ongoing,
        }
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for TicTacToe {
    type Action = usize;
    type Player = Player;

    fn with_move(&self, action: usize, player: Player) -> Result<Self> {
        let mut next = *self;
        next.place(action, player)?;
        Ok(next)
    }

    fn get_available_moves(&self) -> Vec<usize> {
        (0..CELLS).filter(|&i| self.spots[i] == Spot::Empty).collect()
    }

    fn done(&self) -> bool {
        self.is_terminal()
    }

    fn check_winner(&self) -> Option<Player> {
        TicTacToe::check_winner(self)
    }
}

impl fmt::Display for TicTacToe {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.spots.chunks(3) {
            for spot in row {
                let symbol = match spot {
                    Spot::Empty => ".",
                    Spot::Filled(Player::X) => "X",
                    Spot::Filled(Player::O) => "O",
                };
                write!(f, "{} ", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
