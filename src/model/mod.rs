//! Numeric move scorer: a small dense network trained with Adam
//!
//! The engine only sees this through [`crate::ports::CellScorer`]; any other
//! scorer (linear model, lookup table) can take its place.

pub mod network;
pub mod optimizer;

pub use network::{Dense, LayerGradient, PolicyNetwork};
pub use optimizer::Adam;
