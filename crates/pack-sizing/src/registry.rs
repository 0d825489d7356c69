use std::{
    collections::BTreeSet,
    sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use crate::{Error, PackSize};

/// Pack sizes a fresh registry starts with.
pub const DEFAULT_PACK_SIZES: [u64; 5] = [250, 500, 1000, 2000, 5000];

/// The authoritative set of pack sizes, shared between request handlers.
///
/// Any number of readers may take a snapshot at the same time. Mutations take
/// the write lock for their whole duration, so a snapshot never observes an
/// update halfway through.
#[derive(Debug)]
pub struct PackSizeRegistry {
    sizes: RwLock<BTreeSet<PackSize>>,
}

impl Default for PackSizeRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_PACK_SIZES.into_iter().filter_map(PackSize::new))
    }
}

impl PackSizeRegistry {
    /// Creates a registry holding the given sizes. Duplicates collapse.
    pub fn new(sizes: impl IntoIterator<Item = PackSize>) -> Self {
        Self {
            sizes: RwLock::new(sizes.into_iter().collect()),
        }
    }

    /// A copy of the current sizes, ascending and without duplicates.
    pub fn sizes(&self) -> Vec<PackSize> {
        self.read().iter().copied().collect()
    }

    /// Adds a pack size. Returns false if it was already present, which is not an error.
    pub fn add_size(&self, size: PackSize) -> bool {
        let inserted = self.write().insert(size);

        if inserted {
            tracing::debug!(%size, "pack size added");
        }

        inserted
    }

    /// Removes a pack size. Returns false if it was not present, which is not an error.
    pub fn remove_size(&self, size: PackSize) -> bool {
        let removed = self.write().remove(&size);

        if removed {
            tracing::debug!(%size, "pack size removed");
        }

        removed
    }

    /// Replaces `old` with `new`.
    ///
    /// Both checks run against the full current set, so replacing a size with
    /// itself is a conflict.
    pub fn update_size(&self, old: PackSize, new: PackSize) -> crate::Result<()> {
        let mut sizes = self.write();

        if !sizes.contains(&old) {
            return Err(Error::NotFound(old));
        }

        if sizes.contains(&new) {
            return Err(Error::Conflict(new));
        }

        sizes.remove(&old);
        sizes.insert(new);

        tracing::debug!(%old, %new, "pack size updated");

        Ok(())
    }

    // Every mutation leaves the set consistent before it can panic, so a
    // poisoned lock still guards valid data.
    fn read(&self) -> RwLockReadGuard<'_, BTreeSet<PackSize>> {
        self.sizes.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeSet<PackSize>> {
        self.sizes.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(items: u64) -> PackSize {
        PackSize::new(items).unwrap()
    }

    fn items(registry: &PackSizeRegistry) -> Vec<u64> {
        registry.sizes().into_iter().map(PackSize::get).collect()
    }

    #[test]
    fn starts_with_defaults() {
        let registry = PackSizeRegistry::default();

        assert_eq!(vec![250, 500, 1000, 2000, 5000], items(&registry));
    }

    #[test]
    fn new_sorts_and_deduplicates() {
        let registry = PackSizeRegistry::new([size(53), size(23), size(31), size(23)]);

        assert_eq!(vec![23, 31, 53], items(&registry));
    }

    #[test]
    fn add_inserts_in_order() {
        let registry = PackSizeRegistry::default();

        assert!(registry.add_size(size(300)));
        assert_eq!(vec![250, 300, 500, 1000, 2000, 5000], items(&registry));
    }

    #[test]
    fn add_duplicate_is_a_no_op() {
        let registry = PackSizeRegistry::default();

        assert!(!registry.add_size(size(500)));
        assert_eq!(vec![250, 500, 1000, 2000, 5000], items(&registry));
    }

    #[test]
    fn remove_existing_and_missing() {
        let registry = PackSizeRegistry::default();

        assert!(registry.remove_size(size(250)));
        assert!(!registry.remove_size(size(999)));
        assert_eq!(vec![500, 1000, 2000, 5000], items(&registry));
    }

    #[test]
    fn remove_everything() {
        let registry = PackSizeRegistry::new([size(1)]);

        registry.remove_size(size(1));

        assert!(registry.sizes().is_empty());
    }

    #[test]
    fn update_replaces_and_resorts() {
        let registry = PackSizeRegistry::default();

        registry.update_size(size(250), size(3000)).unwrap();

        assert_eq!(vec![500, 1000, 2000, 3000, 5000], items(&registry));
    }

    #[test]
    fn update_missing_old_size() {
        let registry = PackSizeRegistry::default();

        assert_eq!(Err(Error::NotFound(size(999))), registry.update_size(size(999), size(300)));
        assert_eq!(vec![250, 500, 1000, 2000, 5000], items(&registry));
    }

    #[test]
    fn update_to_existing_size() {
        let registry = PackSizeRegistry::default();

        assert_eq!(Err(Error::Conflict(size(500))), registry.update_size(size(250), size(500)));
        assert_eq!(vec![250, 500, 1000, 2000, 5000], items(&registry));
    }

    #[test]
    fn update_to_itself_conflicts() {
        let registry = PackSizeRegistry::default();

        assert_eq!(Err(Error::Conflict(size(250))), registry.update_size(size(250), size(250)));
        assert_eq!(vec![250, 500, 1000, 2000, 5000], items(&registry));
    }

    #[test]
    fn missing_old_size_wins_over_conflict() {
        let registry = PackSizeRegistry::default();

        assert_eq!(Err(Error::NotFound(size(1))), registry.update_size(size(1), size(500)));
    }
}
