use super::{Board, BoardSize, Piece, Player, PlayerId, MAX_SIDE};
use crate::error::SnapshotError;

/// Why a move was turned down. A rejected move leaves the state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("the game is already won")]
    GameOver,

    #[error("({x}, {y}) is off the board")]
    OutOfBounds { x: i64, y: i64 },

    #[error("({x}, {y}) is already taken")]
    Occupied { x: i64, y: i64 },
}

/// Result of an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub piece: Piece,
    pub winner: Option<PlayerId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    players: [Player; 2],
    pieces: Vec<Piece>,
    scores: [u32; 2],
    turn: PlayerId,
    winner: Option<PlayerId>,
}

impl GameState {
    /// Create the canonical starting state: empty board, zero scores, first
    /// player to move, no winner.
    pub fn initial(size: BoardSize, players: [Player; 2]) -> Self {
        GameState {
            board: Board::new(size),
            players,
            pieces: Vec::new(),
            scores: [0, 0],
            turn: PlayerId::First,
            winner: None,
        }
    }

    /// Rebuild a state from stored parts, checking every invariant the move
    /// path maintains.
    pub fn from_parts(
        size: BoardSize,
        players: [Player; 2],
        pieces: Vec<Piece>,
        scores: [u32; 2],
        turn: PlayerId,
        winner: Option<PlayerId>,
    ) -> Result<Self, SnapshotError> {
        if size.width == 0 || size.height == 0 {
            return Err(SnapshotError::EmptyBoard {
                width: size.width,
                height: size.height,
            });
        }
        if !size.is_playable() {
            return Err(SnapshotError::BoardTooLarge {
                width: size.width,
                height: size.height,
                max: MAX_SIDE,
            });
        }

        let mut board = Board::new(size);
        for piece in &pieces {
            board.place(*piece).map_err(|e| match e {
                MoveError::Occupied { .. } => SnapshotError::DuplicateCell {
                    x: piece.x,
                    y: piece.y,
                },
                _ => SnapshotError::PieceOutOfBounds {
                    x: piece.x,
                    y: piece.y,
                    width: size.width,
                    height: size.height,
                },
            })?;
        }

        for player in PlayerId::all() {
            let placed = pieces.iter().filter(|p| p.player_id == player).count();
            let score = scores[player.index()];
            if score as usize != placed {
                return Err(SnapshotError::ScoreMismatch {
                    player: player.index(),
                    score,
                    placed,
                });
            }
        }

        let found = board.winner();
        if winner != found {
            return Err(SnapshotError::InconsistentWinner {
                stored: winner.map(PlayerId::index),
                found: found.map(PlayerId::index),
            });
        }

        // Without a winner, turns strictly alternate from the first player
        if winner.is_none() {
            let expected = match (scores[0], scores[1]) {
                (a, b) if a == b => Some(PlayerId::First),
                (a, b) if a == b + 1 => Some(PlayerId::Second),
                _ => None,
            };
            if expected != Some(turn) {
                return Err(SnapshotError::InconsistentTurn {
                    turn: turn.index(),
                    scores,
                });
            }
        }

        Ok(GameState {
            board,
            players,
            pieces,
            scores,
            turn,
            winner,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> BoardSize {
        self.board.size()
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    /// Pieces in the order they were placed
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn scores(&self) -> [u32; 2] {
        self.scores
    }

    pub fn score(&self, id: PlayerId) -> u32 {
        self.scores[id.index()]
    }

    /// Player permitted to move next
    pub fn current_player(&self) -> PlayerId {
        self.turn
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    /// Check if the game has been won
    pub fn is_terminal(&self) -> bool {
        self.winner.is_some()
    }

    pub fn is_occupied(&self, x: i64, y: i64) -> bool {
        self.board.is_occupied(x, y)
    }

    /// Re-scan the board for a run of four. See [`Board::winner`] for the
    /// tie-break order.
    pub fn compute_winner(&self) -> Option<PlayerId> {
        self.board.winner()
    }

    /// Place a piece for the current player at (x, y).
    ///
    /// On success the piece is appended, the mover's score goes up by one and
    /// either the winner is set or the turn passes to the other player. On
    /// error nothing changes.
    pub fn apply_move(&mut self, x: i64, y: i64) -> Result<Placement, MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }

        let (cx, cy) = self
            .board
            .size()
            .cell(x, y)
            .ok_or(MoveError::OutOfBounds { x, y })?;

        let player = self.turn;
        let piece = Piece {
            x: cx,
            y: cy,
            player_id: player,
        };
        self.board.place(piece)?;
        self.pieces.push(piece);
        self.scores[player.index()] += 1;

        // Check for win
        self.winner = self.compute_winner();
        if self.winner.is_none() {
            self.turn = player.other();
        }

        Ok(Placement {
            piece,
            winner: self.winner,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn players() -> [Player; 2] {
        [Player::new("Player 1", "black"), Player::new("Player 2", "yellow")]
    }

    fn new_game() -> GameState {
        GameState::initial(BoardSize::new(5, 5), players())
    }

    #[test]
    fn test_initial_state() {
        let state = new_game();
        assert_eq!(state.current_player(), PlayerId::First);
        assert_eq!(state.scores(), [0, 0]);
        assert_eq!(state.winner(), None);
        assert!(state.pieces().is_empty());
        for y in 0..5 {
            for x in 0..5 {
                assert!(!state.is_occupied(x, y));
            }
        }
    }

    #[test]
    fn test_apply_move() {
        let mut state = new_game();
        let placement = state.apply_move(2, 3).unwrap();

        assert_eq!(
            placement.piece,
            Piece { x: 2, y: 3, player_id: PlayerId::First }
        );
        assert_eq!(placement.winner, None);
        assert_eq!(state.current_player(), PlayerId::Second);
        assert_eq!(state.scores(), [1, 0]);
        assert!(state.is_occupied(2, 3));
    }

    #[test]
    fn test_rejected_moves_leave_state_unchanged() {
        let mut state = new_game();
        state.apply_move(0, 0).unwrap();
        let before = state.clone();

        assert_eq!(state.apply_move(0, 0), Err(MoveError::Occupied { x: 0, y: 0 }));
        assert_eq!(state.apply_move(5, 0), Err(MoveError::OutOfBounds { x: 5, y: 0 }));
        assert_eq!(state.apply_move(-1, 2), Err(MoveError::OutOfBounds { x: -1, y: 2 }));
        assert_eq!(state, before);
    }

    #[test]
    fn test_win_detection() {
        let mut state = new_game();
        let moves = [(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1), (3, 0)];
        for &(x, y) in &moves {
            state.apply_move(x, y).unwrap();
        }

        assert!(state.is_terminal());
        assert_eq!(state.winner(), Some(PlayerId::First));
        assert_eq!(state.scores(), [4, 3]);
        assert_eq!(state.current_player(), PlayerId::First);
    }

    #[test]
    fn test_no_moves_after_win() {
        let mut state = new_game();
        for &(x, y) in &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1), (3, 0)] {
            state.apply_move(x, y).unwrap();
        }
        let before = state.clone();
        assert_eq!(state.apply_move(4, 4), Err(MoveError::GameOver));
        assert_eq!(state, before);
    }

    #[test]
    fn test_turn_alternates_until_win() {
        let mut state = new_game();
        let mut expected = PlayerId::First;
        for x in 0..5 {
            assert_eq!(state.current_player(), expected);
            let placement = state.apply_move(x, (x % 2) * 2).unwrap();
            assert_eq!(placement.piece.player_id, expected);
            expected = expected.other();
        }
        let total: u32 = state.scores().iter().sum();
        assert_eq!(total as usize, state.pieces().len());
    }

    #[test]
    fn test_from_parts_accepts_played_game() {
        let mut state = new_game();
        for &(x, y) in &[(0, 0), (4, 4), (2, 2)] {
            state.apply_move(x, y).unwrap();
        }
        let restored = GameState::from_parts(
            state.size(),
            state.players().clone(),
            state.pieces().to_vec(),
            state.scores(),
            state.current_player(),
            state.winner(),
        )
        .unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn test_from_parts_rejects_broken_invariants() {
        let size = BoardSize::new(3, 3);
        let piece = Piece { x: 1, y: 1, player_id: PlayerId::First };

        let err = GameState::from_parts(
            size,
            players(),
            vec![piece, Piece { player_id: PlayerId::Second, ..piece }],
            [1, 1],
            PlayerId::First,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, SnapshotError::DuplicateCell { x: 1, y: 1 }));

        let err = GameState::from_parts(
            size,
            players(),
            vec![Piece { x: 3, ..piece }],
            [1, 0],
            PlayerId::Second,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, SnapshotError::PieceOutOfBounds { x: 3, .. }));

        let err = GameState::from_parts(size, players(), vec![piece], [0, 1], PlayerId::Second, None)
            .unwrap_err();
        assert!(matches!(err, SnapshotError::ScoreMismatch { player: 0, .. }));

        let err = GameState::from_parts(
            BoardSize::new(0, 3),
            players(),
            Vec::new(),
            [0, 0],
            PlayerId::First,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, SnapshotError::EmptyBoard { .. }));
    }

    #[test]
    fn test_from_parts_rejects_oversized_board() {
        for size in [
            BoardSize::new(MAX_SIDE + 1, 5),
            BoardSize::new(100_000, 100_000),
            BoardSize::new(usize::MAX, usize::MAX),
        ] {
            let err = GameState::from_parts(size, players(), Vec::new(), [0, 0], PlayerId::First, None)
                .unwrap_err();
            assert!(
                matches!(err, SnapshotError::BoardTooLarge { max: MAX_SIDE, .. }),
                "expected BoardTooLarge for {size:?}, got: {err}"
            );
        }
    }

    #[test]
    fn test_from_parts_rejects_winner_that_contradicts_board() {
        let row: Vec<_> = (0..4)
            .map(|x| Piece { x, y: 0, player_id: PlayerId::First })
            .chain((0..3).map(|x| Piece { x, y: 1, player_id: PlayerId::Second }))
            .collect();

        // Four in a row stored as undecided
        let err = GameState::from_parts(
            BoardSize::new(5, 5),
            players(),
            row.clone(),
            [4, 3],
            PlayerId::Second,
            None,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::InconsistentWinner { stored: None, found: Some(0) }
        ));

        // Wrong player credited
        let err = GameState::from_parts(
            BoardSize::new(5, 5),
            players(),
            row.clone(),
            [4, 3],
            PlayerId::First,
            Some(PlayerId::Second),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::InconsistentWinner { stored: Some(1), found: Some(0) }
        ));

        // Winner claimed with no run on the board
        let err = GameState::from_parts(
            BoardSize::new(5, 5),
            players(),
            row[4..].to_vec(),
            [0, 3],
            PlayerId::Second,
            Some(PlayerId::Second),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::InconsistentWinner { stored: Some(1), found: None }
        ));

        let won = GameState::from_parts(
            BoardSize::new(5, 5),
            players(),
            row,
            [4, 3],
            PlayerId::First,
            Some(PlayerId::First),
        )
        .unwrap();
        assert_eq!(won.winner(), Some(PlayerId::First));
    }

    #[test]
    fn test_from_parts_rejects_out_of_turn_state() {
        let size = BoardSize::new(5, 5);
        let first = Piece { x: 0, y: 0, player_id: PlayerId::First };
        let second = Piece { x: 1, y: 1, player_id: PlayerId::Second };

        // Counts equal: first player must be on move
        let err = GameState::from_parts(size, players(), Vec::new(), [0, 0], PlayerId::Second, None)
            .unwrap_err();
        assert!(matches!(err, SnapshotError::InconsistentTurn { turn: 1, .. }));

        // First player one ahead: second player must be on move
        let err = GameState::from_parts(size, players(), vec![first], [1, 0], PlayerId::First, None)
            .unwrap_err();
        assert!(matches!(err, SnapshotError::InconsistentTurn { turn: 0, .. }));

        // Second player ahead can never happen
        let err = GameState::from_parts(size, players(), vec![second], [0, 1], PlayerId::First, None)
            .unwrap_err();
        assert!(matches!(err, SnapshotError::InconsistentTurn { .. }));

        let ok = GameState::from_parts(size, players(), vec![first, second], [1, 1], PlayerId::First, None)
            .unwrap();
        assert_eq!(ok.current_player(), PlayerId::First);
    }
}
