//! In-memory implementation of the predictor store.
//!
//! Keeps the encoded blob in memory so tests exercise the same MessagePack
//! encoding as the file adapter without touching disk.

use std::sync::{Arc, Mutex, PoisonError};

use crate::{Result, error::Error, ports::PredictorStore, trainer::SavedPredictor};

const LOCATION: &str = "memory";

/// In-memory predictor store.
///
/// Clones share the same slot.
///
/// # Examples
///
/// ```
/// use triki::adapters::InMemoryPredictorStore;
/// use triki::ports::PredictorStore;
///
/// let store = InMemoryPredictorStore::new();
/// assert!(!store.exists());
/// assert!(store.load().is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryPredictorStore {
    blob: Arc<Mutex<Option<Vec<u8>>>>,
}

impl InMemoryPredictorStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PredictorStore for InMemoryPredictorStore {
    fn save(&self, saved: &SavedPredictor) -> Result<()> {
        let bytes = rmp_serde::to_vec(saved).map_err(|e| Error::SerializationContext {
            operation: "serialize predictor to MessagePack".to_string(),
            message: e.to_string(),
        })?;
        *self.blob.lock().unwrap_or_else(PoisonError::into_inner) = Some(bytes);
        Ok(())
    }

    fn load(&self) -> Result<SavedPredictor> {
        let guard = self.blob.lock().unwrap_or_else(PoisonError::into_inner);
        let bytes = guard.as_deref().ok_or_else(|| Error::NoSavedModel {
            path: LOCATION.into(),
        })?;

        let saved: SavedPredictor =
            rmp_serde::from_slice(bytes).map_err(|e| Error::SerializationContext {
                operation: "deserialize predictor from MessagePack".to_string(),
                message: e.to_string(),
            })?;
        saved.check_version()?;
        Ok(saved)
    }

    fn exists(&self) -> bool {
        self.blob
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn location(&self) -> String {
        LOCATION.to_string()
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::{model::PolicyNetwork, trainer::TrainingMetadata};

    #[test]
    fn test_in_memory_roundtrip() {
        let store = InMemoryPredictorStore::new();
        let mut rng = StdRng::seed_from_u64(2);
        let saved = SavedPredictor::new(
            PolicyNetwork::new(&[5], &mut rng),
            TrainingMetadata::default(),
        );

        store.save(&saved).unwrap();
        assert!(store.exists());
        assert_eq!(store.load().unwrap(), saved);

        // Clones share the slot
        let other = store.clone();
        assert!(other.exists());
        assert_eq!(other.load().unwrap(), saved);
    }

    #[test]
    fn test_in_memory_load_before_save() {
        let store = InMemoryPredictorStore::new();
        assert!(!store.exists());
        assert!(matches!(store.load(), Err(Error::NoSavedModel { .. })));
    }
}
