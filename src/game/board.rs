use serde::{Deserialize, Serialize};

use super::{MoveError, PlayerId};

/// Number of same-owner pieces in a line needed to win.
pub const WIN_LENGTH: usize = 4;

/// Largest allowed width or height.
pub const MAX_SIDE: usize = 1024;

/// Line directions checked from every occupied cell, in tie-break order:
/// east, south, southeast, then the anti-diagonal.
const DIRECTIONS: [(i64, i64); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSize {
    pub width: usize,
    pub height: usize,
}

impl BoardSize {
    pub fn new(width: usize, height: usize) -> Self {
        BoardSize { width, height }
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Both sides are between 1 and `MAX_SIDE`.
    pub fn is_playable(&self) -> bool {
        (1..=MAX_SIDE).contains(&self.width) && (1..=MAX_SIDE).contains(&self.height)
    }

    /// Convert signed coordinates into an in-bounds cell, if they are one
    pub fn cell(&self, x: i64, y: i64) -> Option<(usize, usize)> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < self.width && y < self.height).then_some((x, y))
    }
}

/// A placed marker. Pieces are never moved or removed once placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Piece {
    pub x: usize,
    pub y: usize,
    pub player_id: PlayerId,
}

/// Occupancy grid for a fixed-size board, indexed row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: BoardSize,
    cells: Vec<Option<PlayerId>>,
}

impl Board {
    /// Create a new empty board
    pub fn new(size: BoardSize) -> Self {
        Board {
            size,
            cells: vec![None; size.cell_count()],
        }
    }

    pub fn size(&self) -> BoardSize {
        self.size
    }

    /// Owner of the cell at (x, y); `None` when empty or out of bounds.
    /// Row 0 is the top row.
    pub fn get(&self, x: usize, y: usize) -> Option<PlayerId> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        self.cells[y * self.size.width + x]
    }

    fn owner_at(&self, x: i64, y: i64) -> Option<PlayerId> {
        let (x, y) = self.size.cell(x, y)?;
        self.get(x, y)
    }

    /// Check whether any piece sits at (x, y)
    pub fn is_occupied(&self, x: i64, y: i64) -> bool {
        self.owner_at(x, y).is_some()
    }

    /// Check if every cell holds a piece
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Mark a cell as owned. Fails without touching the grid if the cell is
    /// off the board or already taken.
    pub fn place(&mut self, piece: Piece) -> Result<(), MoveError> {
        let (x, y) = (piece.x as i64, piece.y as i64);
        if self.size.cell(x, y).is_none() {
            return Err(MoveError::OutOfBounds { x, y });
        }
        let slot = &mut self.cells[piece.y * self.size.width + piece.x];
        if slot.is_some() {
            return Err(MoveError::Occupied { x, y });
        }
        *slot = Some(piece.player_id);
        Ok(())
    }

    /// Row-major view of the board, one `Vec` per row from the top.
    pub fn rows(&self) -> Vec<Vec<Option<PlayerId>>> {
        self.cells
            .chunks(self.size.width.max(1))
            .map(<[Option<PlayerId>]>::to_vec)
            .collect()
    }

    /// Scan cells row by row (top to bottom, left to right) and return the
    /// owner of the first run of `WIN_LENGTH` found. Directions are tried in
    /// `DIRECTIONS` order for each cell, so when several runs exist the first
    /// one discovered decides.
    pub fn winner(&self) -> Option<PlayerId> {
        for y in 0..self.size.height {
            for x in 0..self.size.width {
                let Some(owner) = self.get(x, y) else {
                    continue;
                };
                for (dx, dy) in DIRECTIONS {
                    if self.run_length(x, y, dx, dy, owner) >= WIN_LENGTH {
                        return Some(owner);
                    }
                }
            }
        }
        None
    }

    /// Length of the same-owner run starting at (x, y) and extending along
    /// (dx, dy), capped at `WIN_LENGTH`.
    fn run_length(&self, x: usize, y: usize, dx: i64, dy: i64, owner: PlayerId) -> usize {
        let mut count = 1;
        let mut nx = x as i64 + dx;
        let mut ny = y as i64 + dy;
        while count < WIN_LENGTH && self.owner_at(nx, ny) == Some(owner) {
            count += 1;
            nx += dx;
            ny += dy;
        }
        count
    }
}
