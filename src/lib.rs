//! # Grid Connect
//!
//! A two-player game on a rectangular grid: players take turns placing
//! pieces anywhere on the board, and the first to line up four of their own
//! horizontally, vertically, or diagonally wins. Every accepted move is saved
//! as a JSON snapshot that can be loaded back later.
//!
//! ## Modules
//!
//! - [`game`]: Core rules: board, players, move validation, win detection
//! - [`engine`]: Owned engine wiring the game to a snapshot store
//! - [`persistence`]: Snapshot schema, validation, file and memory stores
//! - [`ui`]: Terminal UI front end
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod config;
pub mod engine;
pub mod error;
pub mod game;
pub mod persistence;
pub mod ui;
