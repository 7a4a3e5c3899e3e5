//! String interning seam.
//!
//! Every path or name the walker hands back is produced through a
//! [`StringTable`], so equal strings share one allocation and compare
//! cheaply. The walker only depends on the trait.

use std::sync::{Arc, OnceLock};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

/// A canonical, shared string handle.
pub type InternedStr = Arc<str>;

/// Deduplicating string store.
pub trait StringTable: std::fmt::Debug + Send + Sync {
    /// Return the canonical handle for `value`, inserting it if new.
    fn intern(&self, value: &str) -> InternedStr;
}

/// Concurrent string table backed by a [`DashMap`].
#[derive(Debug, Default)]
pub struct SharedStringTable {
    entries: DashMap<InternedStr, ()>,
}

impl SharedStringTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// The process-wide table, created on first use.
    pub fn global() -> Arc<SharedStringTable> {
        static GLOBAL: OnceLock<Arc<SharedStringTable>> = OnceLock::new();
        GLOBAL.get_or_init(|| Arc::new(SharedStringTable::new())).clone()
    }

    /// Number of distinct strings held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no strings have been interned.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl StringTable for SharedStringTable {
    fn intern(&self, value: &str) -> InternedStr {
        if let Some(existing) = self.entries.get(value) {
            return existing.key().clone();
        }
        match self.entries.entry(Arc::from(value)) {
            Entry::Occupied(entry) => entry.key().clone(),
            Entry::Vacant(entry) => {
                let key = entry.key().clone();
                entry.insert(());
                key
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_deduplicates() {
        let table = SharedStringTable::new();
        let a = table.intern("root/x");
        let b = table.intern(&String::from("root/x"));

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_distinct_strings() {
        let table = SharedStringTable::new();
        let a = table.intern("x");
        let b = table.intern("y");

        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(&*a, "x");
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_global_is_shared() {
        let a = SharedStringTable::global().intern("platio-global-test");
        let b = SharedStringTable::global().intern("platio-global-test");
        assert!(Arc::ptr_eq(&a, &b));
    }
}
