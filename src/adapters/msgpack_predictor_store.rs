//! MessagePack implementation of the predictor store.
//!
//! This adapter implements the PredictorStore port using rmp_serde for
//! compact binary serialization of a single file.

use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
    process,
    sync::atomic::{AtomicU64, Ordering},
};

use tracing::debug;

use crate::{Result, error::Error, ports::PredictorStore, trainer::SavedPredictor};

/// Default file name for the trained predictor state
pub const DEFAULT_MODEL_FILE: &str = "triki_model.msgpack";

static SAVE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// MessagePack-based predictor store.
///
/// Saves go to a sibling temporary file that is then renamed over the target,
/// so a reader never sees a half-written state. The temporary name carries the
/// process id and a per-process counter, so concurrent saves never share one.
///
/// # Examples
///
/// ```no_run
/// use triki::adapters::MsgPackPredictorStore;
/// use triki::ports::PredictorStore;
///
/// let store = MsgPackPredictorStore::new("triki_model.msgpack");
/// if store.exists() {
///     let saved = store.load()?;
///     println!("trained on {} moves", saved.metadata.examples);
/// }
/// # Ok::<(), triki::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct MsgPackPredictorStore {
    path: PathBuf,
}

impl MsgPackPredictorStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| DEFAULT_MODEL_FILE.into());
        let seq = SAVE_COUNTER.fetch_add(1, Ordering::Relaxed);
        name.push(format!(".{}.{seq}.tmp", process::id()));
        self.path.with_file_name(name)
    }
}

impl Default for MsgPackPredictorStore {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL_FILE)
    }
}

impl PredictorStore for MsgPackPredictorStore {
    fn save(&self, saved: &SavedPredictor) -> Result<()> {
        let temp = self.temp_path();
        let file = File::create(&temp).map_err(|source| Error::Io {
            operation: format!("create file {temp:?}"),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write(&mut writer, saved).map_err(|e| Error::SerializationContext {
            operation: "serialize predictor to MessagePack".to_string(),
            message: e.to_string(),
        })?;
        writer.flush().map_err(|source| Error::Io {
            operation: format!("write file {temp:?}"),
            source,
        })?;
        drop(writer);

        fs::rename(&temp, &self.path).map_err(|source| Error::Io {
            operation: format!("replace {:?}", self.path),
            source,
        })?;

        debug!(path = ?self.path, "predictor state written");
        Ok(())
    }

    fn load(&self) -> Result<SavedPredictor> {
        if !self.path.exists() {
            return Err(Error::NoSavedModel {
                path: self.path.clone(),
            });
        }

        let file = File::open(&self.path).map_err(|source| Error::Io {
            operation: format!("open file {:?}", self.path),
            source,
        })?;

        let saved: SavedPredictor = rmp_serde::decode::from_read(BufReader::new(file)).map_err(
            |e| Error::SerializationContext {
                operation: "deserialize predictor from MessagePack".to_string(),
                message: e.to_string(),
            },
        )?;
        saved.check_version()?;

        Ok(saved)
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
