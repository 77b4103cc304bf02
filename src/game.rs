use std::hash::Hash;

pub(crate) trait Game: Clone + std::fmt::Display {
    type Action: std::fmt::Debug + Hash + PartialEq + Eq + Copy;
    type Player: PartialEq + std::fmt::Debug + Copy;

    /// Returns a copy of the game with `player`'s mark placed at `action`.
    /// The receiver is left untouched.
    fn with_move(&self, action: Self::Action, player: Self::Player) -> anyhow::Result<Self>;

    fn get_available_moves(&self) -> Vec<Self::Action>;

    fn done(&self) -> bool;

    fn check_winner(&self) -> Option<Self::Player>;
}
