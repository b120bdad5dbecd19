//! # Connect Four
//!
//! Rules engine and turn management for two-player Connect Four on a 7x6
//! grid, with a terminal front end built on Ratatui.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, player, win/tie detection, sessions
//! - [`score`] — Win counters across sessions and their JSON file
//! - [`ui`] — Terminal UI: board view, turn indicator, scores
//! - [`config`] — TOML configuration loading and validation
//! - [`logging`] — Log subscriber setup
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod score;
pub mod ui;
