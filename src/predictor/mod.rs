//! Move predictor variants and the legality guard around them

pub mod fallback;
pub mod guard;
pub mod trained;

pub use fallback::FallbackPredictor;
pub use guard::{CheckedSelection, select_checked};
pub use trained::TrainedPredictor;
