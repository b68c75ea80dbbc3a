use std::path::PathBuf;

/// Reasons a stored snapshot cannot be adopted as game state.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("malformed snapshot document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("board size {width}x{height} has no cells")]
    EmptyBoard { width: usize, height: usize },

    #[error("board size {width}x{height} exceeds the {max}x{max} limit")]
    BoardTooLarge {
        width: usize,
        height: usize,
        max: usize,
    },

    #[error("piece at ({x}, {y}) lies outside the {width}x{height} board")]
    PieceOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("more than one piece at ({x}, {y})")]
    DuplicateCell { x: usize, y: usize },

    #[error("score {score} for player {player} does not match {placed} placed pieces")]
    ScoreMismatch {
        player: usize,
        score: u32,
        placed: usize,
    },

    #[error("stored winner {stored:?} does not match the board's winner {found:?}")]
    InconsistentWinner {
        stored: Option<usize>,
        found: Option<usize>,
    },

    #[error("player {turn} cannot be on move with scores {scores:?}")]
    InconsistentTurn { turn: usize, scores: [u32; 2] },
}

/// Errors that can occur while saving or loading a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read snapshot from {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write snapshot to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to encode snapshot: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("corrupt snapshot in {location}: {source}")]
    Corrupt {
        location: String,
        source: SnapshotError,
    },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
