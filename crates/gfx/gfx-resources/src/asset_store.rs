//! Read-only asset stores
//!
//! Bundled assets (reference images) are addressed by file name. The packaging
//! step that produces them is outside this crate; a store only has to answer
//! "does this asset exist" and "give me its bytes".
//!
//! - [`MemoryAssets`]: a table filled in code, used by unit tests and by
//!   binaries that `include_bytes!` their fixtures
//! - [`DirAssets`]: files directly under a resource directory

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::ResourceError;

/// Read-only access to bundled assets by name.
pub trait AssetStore {
    /// Return the complete contents of `name`.
    fn read(&self, name: &str) -> Result<Cow<'_, [u8]>, ResourceError>;

    /// Return `true` if `name` is present in the store.
    fn contains(&self, name: &str) -> bool;
}

/// In-memory asset table.
#[derive(Debug, Default, Clone)]
pub struct MemoryAssets {
    assets: HashMap<String, Vec<u8>>,
}

impl MemoryAssets {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) an asset, builder style.
    pub fn with_asset(mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(name, bytes);
        self
    }

    /// Add (or replace) an asset.
    pub fn insert(&mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.assets.insert(name.into(), bytes.into());
    }

    /// Number of assets in the table.
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// `true` if the table holds no assets.
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl AssetStore for MemoryAssets {
    fn read(&self, name: &str) -> Result<Cow<'_, [u8]>, ResourceError> {
        self.assets
            .get(name)
            .map(|bytes| Cow::Borrowed(bytes.as_slice()))
            .ok_or_else(|| ResourceError::UnknownAsset(name.to_owned()))
    }

    fn contains(&self, name: &str) -> bool {
        self.assets.contains_key(name)
    }
}

/// Assets stored as files directly under one directory.
#[derive(Debug, Clone)]
pub struct DirAssets {
    root: PathBuf,
}

impl DirAssets {
    /// Serve the files under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_of(&self, name: &str) -> Result<PathBuf, ResourceError> {
        let plain = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\']);
        if plain {
            Ok(self.root.join(name))
        } else {
            Err(ResourceError::InvalidName(name.to_owned()))
        }
    }
}

impl AssetStore for DirAssets {
    fn read(&self, name: &str) -> Result<Cow<'_, [u8]>, ResourceError> {
        let path = self.path_of(name)?;
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Cow::Owned(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ResourceError::UnknownAsset(name.to_owned()))
            }
            Err(source) => Err(ResourceError::Io {
                name: name.to_owned(),
                source,
            }),
        }
    }

    fn contains(&self, name: &str) -> bool {
        self.path_of(name).map(|p| p.is_file()).unwrap_or(false)
    }
}
