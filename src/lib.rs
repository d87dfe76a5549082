//! Triki: tic-tac-toe against a move predictor trained on logged play
//!
//! This crate provides:
//! - Board rules, outcome evaluation and the numeric boundary encoding
//! - A durable, append-only move log shared by every game session
//! - Move predictors (trained network or lowest-index fallback) behind a
//!   legality guard
//! - An offline trainer that refits the predictor on the whole log
//! - A console front-end with play, train and stats commands

pub mod adapters;
pub mod analysis;
pub mod app;
pub mod cli;
pub mod corpus;
pub mod error;
pub mod model;
pub mod ports;
pub mod predictor;
pub mod session;
pub mod tictactoe;
pub mod trainer;

pub use corpus::MoveRecord;
pub use error::{Error, Result};
pub use session::{GameSession, SessionState, TurnReport};
pub use tictactoe::{Board, Cell, Mark, Outcome};
