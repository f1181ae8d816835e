//! Name → id resource table
//!
//! Tests refer to reference images by a numeric id chosen by the test author.
//! [`ResourceMap::map_resource`] binds an asset name to such an id:
//!
//! - mapping a name again moves it to the new id (last write wins); the old id
//!   stops resolving to that name
//! - mapping another name to an id that is already taken makes the id resolve
//!   to the newest name, while the older name keeps pointing at the id
//! - when the newest name of an id moves away, the id resolves to the most
//!   recently mapped name still bound to it
//!
//! The table is owned by whoever runs the tests and lent to each test in turn,
//! so mappings made by one test stay visible to the tests that run after it.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

use crate::asset_store::AssetStore;
use crate::error::ResourceError;

/// Resource table backed by an [`AssetStore`].
pub struct ResourceMap {
    store: Box<dyn AssetStore>,
    ids: BTreeMap<String, u32>,
    // Names bound to each id, oldest first.
    aliases: HashMap<u32, Vec<String>>,
}

impl ResourceMap {
    /// Create an empty table over `store`.
    pub fn new(store: impl AssetStore + 'static) -> Self {
        Self {
            store: Box::new(store),
            ids: BTreeMap::new(),
            aliases: HashMap::new(),
        }
    }

    /// Bind `name` to `id`.
    ///
    /// Returns `false`, leaving the table untouched, if the store has no
    /// asset called `name`.
    pub fn map_resource(&mut self, name: &str, id: u32) -> bool {
        if !self.store.contains(name) {
            tracing::warn!(name, id, "resource not found in asset store");
            return false;
        }

        if let Some(old) = self.ids.insert(name.to_owned(), id) {
            if let Some(names) = self.aliases.get_mut(&old) {
                names.retain(|n| n != name);
                if names.is_empty() {
                    self.aliases.remove(&old);
                }
            }
        }
        self.aliases.entry(id).or_default().push(name.to_owned());

        tracing::debug!(name, id, "mapped resource");
        true
    }

    /// Asset name currently addressed by `id`.
    pub fn resolve(&self, id: u32) -> Option<&str> {
        self.aliases.get(&id).and_then(|names| names.last()).map(String::as_str)
    }

    /// Id that `name` is mapped to.
    pub fn id_of(&self, name: &str) -> Option<u32> {
        self.ids.get(name).copied()
    }

    /// Raw bytes of the asset addressed by `id`.
    pub fn read(&self, id: u32) -> Result<Cow<'_, [u8]>, ResourceError> {
        let name = self.resolve(id).ok_or(ResourceError::Unmapped(id))?;
        self.store.read(name)
    }

    /// All `(name, id)` mappings, ordered by name.
    pub fn mappings(&self) -> impl Iterator<Item = (&str, u32)> {
        self.ids.iter().map(|(name, id)| (name.as_str(), *id))
    }

    /// Number of mapped names.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// `true` if nothing has been mapped yet.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Drop every mapping.
    pub fn clear(&mut self) {
        self.ids.clear();
        self.aliases.clear();
    }
}

impl core::fmt::Debug for ResourceMap {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ResourceMap")
            .field("ids", &self.ids)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::asset_store::MemoryAssets;

    fn map() -> ResourceMap {
        ResourceMap::new(
            MemoryAssets::new()
                .with_asset("img", b"one".to_vec())
                .with_asset("other", b"two".to_vec()),
        )
    }

    #[test]
    fn map_and_resolve() {
        let mut m = map();
        assert!(m.map_resource("img", 7));
        assert_eq!(m.resolve(7), Some("img"));
        assert_eq!(m.id_of("img"), Some(7));
        assert_eq!(m.read(7).unwrap().as_ref(), b"one");
    }

    #[test]
    fn missing_asset_is_rejected() {
        let mut m = map();
        assert!(!m.map_resource("nope", 1));
        assert!(m.is_empty());
        assert_eq!(m.resolve(1), None);
    }

    #[test]
    fn remapping_a_name_is_last_write_wins() {
        let mut m = map();
        assert!(m.map_resource("img", 7));
        assert!(m.map_resource("img", 9));
        assert_eq!(m.id_of("img"), Some(9));
        assert_eq!(m.resolve(9), Some("img"));
        assert_eq!(m.resolve(7), None);
        assert!(matches!(m.read(7), Err(ResourceError::Unmapped(7))));
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn remapping_same_pair_is_a_no_op() {
        let mut m = map();
        assert!(m.map_resource("img", 7));
        assert!(m.map_resource("img", 7));
        assert_eq!(m.resolve(7), Some("img"));
    }

    #[test]
    fn several_names_may_share_an_id() {
        let mut m = map();
        assert!(m.map_resource("img", 5));
        assert!(m.map_resource("other", 5));
        assert_eq!(m.id_of("img"), Some(5));
        assert_eq!(m.id_of("other"), Some(5));
        assert_eq!(m.resolve(5), Some("other"));
        assert_eq!(m.read(5).unwrap().as_ref(), b"two");
    }

    #[test]
    fn moving_the_newest_alias_falls_back_to_the_older_one() {
        let mut m = map();
        assert!(m.map_resource("img", 5));
        assert!(m.map_resource("other", 5));
        assert!(m.map_resource("other", 6));
        assert_eq!(m.resolve(5), Some("img"));
        assert_eq!(m.resolve(6), Some("other"));
    }

    #[test]
    fn fallback_follows_mapping_order_not_name_order() {
        let mut m = ResourceMap::new(
            MemoryAssets::new()
                .with_asset("alpha", b"a".to_vec())
                .with_asset("zeta", b"z".to_vec())
                .with_asset("mid", b"m".to_vec()),
        );
        assert!(m.map_resource("alpha", 5));
        assert!(m.map_resource("zeta", 5));
        assert!(m.map_resource("mid", 5));
        assert!(m.map_resource("mid", 6));
        assert_eq!(m.resolve(5), Some("zeta"));
        assert!(m.map_resource("zeta", 6));
        assert_eq!(m.resolve(5), Some("alpha"));
        assert!(m.map_resource("alpha", 6));
        assert_eq!(m.resolve(5), None);
        assert_eq!(m.resolve(6), Some("alpha"));
    }

    #[test]
    fn remapping_an_older_alias_makes_it_newest() {
        let mut m = map();
        assert!(m.map_resource("img", 5));
        assert!(m.map_resource("other", 5));
        assert!(m.map_resource("img", 5));
        assert_eq!(m.resolve(5), Some("img"));
    }

    #[test]
    fn mappings_are_listed_by_name() {
        let mut m = map();
        m.map_resource("other", 2);
        m.map_resource("img", 1);
        let all: Vec<_> = m.mappings().collect();
        assert_eq!(all, vec![("img", 1), ("other", 2)]);
    }
}
