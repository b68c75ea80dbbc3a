//! Terminal UI: a thin front end that drives the engine through its public
//! operations and renders the current game.

mod app;
mod game_view;

pub use app::App;
