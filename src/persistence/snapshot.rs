use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;
use crate::game::{BoardSize, GameState, Piece, Player, PlayerId};

/// Stored form of a whole game, written as a single JSON document.
///
/// ```json
/// {
///   "board_size": [5, 5],
///   "players": [{"name": "Player 1", "color": "black"}, {"name": "Player 2", "color": "yellow"}],
///   "pieces": [{"x": 0, "y": 0, "player_id": 0}],
///   "scores": [1, 0],
///   "turn": 1,
///   "winner": null
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Snapshot {
    pub board_size: (usize, usize),
    pub players: [Player; 2],
    pub pieces: Vec<Piece>,
    pub scores: [u32; 2],
    pub turn: PlayerId,
    pub winner: Option<PlayerId>,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a document. Only checks shape and types; use
    /// `GameState::try_from` to check game invariants.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<&GameState> for Snapshot {
    fn from(state: &GameState) -> Self {
        let size = state.size();
        Snapshot {
            board_size: (size.width, size.height),
            players: state.players().clone(),
            pieces: state.pieces().to_vec(),
            scores: state.scores(),
            turn: state.current_player(),
            winner: state.winner(),
        }
    }
}

impl TryFrom<Snapshot> for GameState {
    type Error = SnapshotError;

    fn try_from(snapshot: Snapshot) -> Result<Self, Self::Error> {
        let (width, height) = snapshot.board_size;
        GameState::from_parts(
            BoardSize::new(width, height),
            snapshot.players,
            snapshot.pieces,
            snapshot.scores,
            snapshot.turn,
            snapshot.winner,
        )
    }
}
