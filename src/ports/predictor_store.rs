//! Predictor store port for trained-state persistence.

use crate::{Result, trainer::SavedPredictor};

/// Port for saving and loading the trained predictor state.
///
/// The store holds at most one state, keyed by a fixed identifier. Whether
/// that state exists decides which predictor variant a session plays with.
///
/// # Examples
///
/// ```no_run
/// use triki::ports::PredictorStore;
/// use triki::trainer::SavedPredictor;
///
/// fn replace<S: PredictorStore>(store: &S, saved: &SavedPredictor) -> triki::Result<()> {
///     store.save(saved)
/// }
/// ```
pub trait PredictorStore: Send + Sync {
    /// Replace the stored state wholesale.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be serialized or written.
    fn save(&self, saved: &SavedPredictor) -> Result<()>;

    /// Load the stored state.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoSavedModel`] if nothing was saved yet, or an
    /// error if the stored blob cannot be read or decoded.
    fn load(&self) -> Result<SavedPredictor>;

    /// Whether a saved state is present
    fn exists(&self) -> bool;

    /// Human-readable location, for messages
    fn location(&self) -> String;
}
