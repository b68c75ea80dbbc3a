//! Core game rules: board geometry, player identities, and the game state
//! machine with in-place move application. No I/O happens here.

mod board;
mod player;
mod state;

pub use board::{Board, BoardSize, Piece, MAX_SIDE, WIN_LENGTH};
pub use player::{Player, PlayerId};
pub use state::{GameState, MoveError, Placement};
