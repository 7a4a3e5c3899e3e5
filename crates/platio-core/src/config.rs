//! Traversal configuration types.

use compact_str::CompactString;
use derive_builder::Builder;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Directory names excluded when an exclusion set is seeded.
pub const DEFAULT_EXCLUSIONS: &[&str] = &[".svn", "CVS", ".git", ".hg"];

/// Directory base names pruned from traversal, with all their descendants.
///
/// Matching is exact and case-sensitive on the base name only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    names: IndexSet<CompactString>,
    seeded: bool,
}

impl ExclusionSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set holding the given names.
    pub fn with_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for name in names {
            set.add(name.as_ref());
        }
        set
    }

    /// Exclude a directory name. Returns `false` if it was already excluded.
    pub fn add(&mut self, name: &str) -> bool {
        self.names.insert(CompactString::new(name))
    }

    /// Check if a directory base name is excluded.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Seed the default version-control names. Only the first call has any
    /// effect.
    pub fn init_defaults(&mut self) {
        if self.seeded {
            return;
        }
        self.seeded = true;
        for name in DEFAULT_EXCLUSIONS {
            self.add(name);
        }
    }

    /// Iterate the excluded names in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(CompactString::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Remaining number of directory levels a traversal may list below its root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Depth {
    /// No bound.
    #[default]
    Unlimited,
    /// List directories at most this many levels below the root.
    Limited(u32),
}

impl Depth {
    /// Convert a signed budget; any negative value means unlimited.
    pub fn from_budget(budget: i64) -> Self {
        if budget < 0 {
            Depth::Unlimited
        } else {
            Depth::Limited(u32::try_from(budget).unwrap_or(u32::MAX))
        }
    }

    /// Check if a directory `level` steps below the root may be listed.
    pub fn allows(self, level: u32) -> bool {
        match self {
            Depth::Unlimited => true,
            Depth::Limited(max) => level <= max,
        }
    }
}

impl From<Option<u32>> for Depth {
    fn from(value: Option<u32>) -> Self {
        value.map_or(Depth::Unlimited, Depth::Limited)
    }
}

/// Configuration for tree walking.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct WalkConfig {
    /// Directory names to exclude in addition to the defaults.
    #[builder(default)]
    #[serde(default)]
    pub exclusions: Vec<String>,

    /// Seed the default version-control exclusions before the first walk.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub seed_default_exclusions: bool,

    /// Depth used by callers that do not pass one explicitly.
    #[builder(default)]
    #[serde(default)]
    pub default_depth: Depth,
}

fn default_true() -> bool {
    true
}

impl WalkConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref exclusions) = self.exclusions {
            for name in exclusions {
                if name.is_empty() {
                    return Err("Excluded directory name cannot be empty".to_string());
                }
                if name.contains('/') {
                    return Err(format!(
                        "Excluded directory name must be a base name, got {name:?}"
                    ));
                }
            }
        }
        Ok(())
    }
}

impl WalkConfig {
    /// Create a new walk config builder.
    pub fn builder() -> WalkConfigBuilder {
        WalkConfigBuilder::default()
    }

    /// Create a config with default exclusions and no depth bound.
    pub fn new() -> Self {
        Self {
            exclusions: Vec::new(),
            seed_default_exclusions: true,
            default_depth: Depth::Unlimited,
        }
    }

    /// Build the exclusion set this config describes.
    pub fn exclusion_set(&self) -> ExclusionSet {
        let mut set = ExclusionSet::with_names(&self.exclusions);
        if self.seed_default_exclusions {
            set.init_defaults();
        }
        set
    }
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self::new()
    }
}
