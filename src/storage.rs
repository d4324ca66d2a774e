//! Chord-text storage.
//!
//! A store maps opaque references to raw marker-formatted documents. The
//! real app keeps these in Drive or a GitHub repo; the core only needs the
//! read/write contract, with failures as typed errors.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::error::CifraError;

pub trait ChordStore {
    fn read(&self, reference: &str) -> Result<String, CifraError>;
    fn write(&mut self, reference: &str, text: &str) -> Result<(), CifraError>;
}

/// In-memory store, for tests and single-session use.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    texts: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }
}

impl ChordStore for MemoryStore {
    fn read(&self, reference: &str) -> Result<String, CifraError> {
        self.texts
            .get(reference)
            .cloned()
            .ok_or_else(|| CifraError::Storage {
                reference: reference.to_string(),
                message: "no such chord text".to_string(),
            })
    }

    fn write(&mut self, reference: &str, text: &str) -> Result<(), CifraError> {
        self.texts.insert(reference.to_string(), text.to_string());
        Ok(())
    }
}

/// One file per reference under a root directory.
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    pub fn new(root: impl Into<PathBuf>) -> DirStore {
        DirStore { root: root.into() }
    }
}

impl ChordStore for DirStore {
    fn read(&self, reference: &str) -> Result<String, CifraError> {
        let path = self.root.join(reference);
        debug!(reference, path = %path.display(), "reading chord text");
        fs::read_to_string(&path).map_err(|e| CifraError::Storage {
            reference: reference.to_string(),
            message: e.to_string(),
        })
    }

    fn write(&mut self, reference: &str, text: &str) -> Result<(), CifraError> {
        let path = self.root.join(reference);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| CifraError::Storage {
                reference: reference.to_string(),
                message: e.to_string(),
            })?;
        }
        debug!(reference, path = %path.display(), "writing chord text");
        fs::write(&path, text).map_err(|e| CifraError::Storage {
            reference: reference.to_string(),
            message: e.to_string(),
        })
    }
}
