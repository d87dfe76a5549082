//! CLI infrastructure for the triki console game
//!
//! This module provides the command-line interface for playing against the
//! predictor, retraining it from the move log and inspecting the corpus.

pub mod commands;
pub mod config;
pub mod console;
pub mod output;
