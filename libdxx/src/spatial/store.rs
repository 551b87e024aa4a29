use std::cell::RefCell;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::core::{DxxError, DxxResult, SampleBuffer};
use crate::reader::read_file;

use super::movement::Ear;

/// Source of transfer functions keyed by angle and ear
pub trait TransferFunctionStore {
    /// Load the transfer function for `angle` (centidegrees) and `ear`
    fn load(&self, angle: u32, ear: Ear) -> DxxResult<SampleBuffer>;
}

impl<S: TransferFunctionStore + ?Sized> TransferFunctionStore for &S {
    fn load(&self, angle: u32, ear: Ear) -> DxxResult<SampleBuffer> {
        (**self).load(angle, ear)
    }
}

/// Transfer functions of one subject on disk
///
/// Files live at `{subject}/SLTF/SLTF_{angle}_{ear}.DDB`.
#[derive(Debug, Clone)]
pub struct SubjectDirectory {
    root: PathBuf,
}

impl SubjectDirectory {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        SubjectDirectory { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of one transfer function file
    pub fn path_for(&self, angle: u32, ear: Ear) -> PathBuf {
        self.root
            .join("SLTF")
            .join(format!("SLTF_{}_{}.DDB", angle, ear.label()))
    }
}

impl TransferFunctionStore for SubjectDirectory {
    fn load(&self, angle: u32, ear: Ear) -> DxxResult<SampleBuffer> {
        let path = self.path_for(angle, ear);
        match read_file(&path) {
            Err(DxxError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                Err(DxxError::MissingTransferFunction { angle, ear, path })
            }
            other => other,
        }
    }
}

/// Memoizing wrapper, each `(angle, ear)` is loaded at most once
///
/// Transfer functions do not change during a run, so caching is invisible in
/// the output.
pub struct CachedStore<S> {
    inner: S,
    cache: RefCell<HashMap<(u32, Ear), SampleBuffer>>,
}

impl<S: TransferFunctionStore> CachedStore<S> {
    pub fn new(inner: S) -> Self {
        CachedStore {
            inner,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Number of cached transfer functions
    pub fn cached(&self) -> usize {
        self.cache.borrow().len()
    }
}

impl<S: TransferFunctionStore> TransferFunctionStore for CachedStore<S> {
    fn load(&self, angle: u32, ear: Ear) -> DxxResult<SampleBuffer> {
        if let Some(tf) = self.cache.borrow().get(&(angle, ear)) {
            return Ok(tf.clone());
        }
        let tf = self.inner.load(angle, ear)?;
        self.cache.borrow_mut().insert((angle, ear), tf.clone());
        Ok(tf)
    }
}

/// In-memory store, mostly for tests and synthetic renders
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<(u32, Ear), SampleBuffer>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, angle: u32, ear: Ear, tf: SampleBuffer) {
        self.entries.insert((angle, ear), tf);
    }

    /// Builder form of [`MemoryStore::insert`]
    pub fn with(mut self, angle: u32, ear: Ear, tf: SampleBuffer) -> Self {
        self.insert(angle, ear, tf);
        self
    }
}

impl TransferFunctionStore for MemoryStore {
    fn load(&self, angle: u32, ear: Ear) -> DxxResult<SampleBuffer> {
        self.entries
            .get(&(angle, ear))
            .cloned()
            .ok_or_else(|| DxxError::MissingTransferFunction {
                angle,
                ear,
                path: PathBuf::from(format!("memory:SLTF_{}_{}", angle, ear.label())),
            })
    }
}
