//! Terminal UI: board view, turn indicator, and win counters for two players
//! sharing one keyboard.

mod app;
mod game_view;

pub use app::App;
