//! Logged play: the records every session appends and the trainer consumes

pub mod record;

pub use record::{MoveRecord, ROW_WIDTH};
