//! Metadata vocabulary loading and caching.
//!
//! Vocabularies are read-only lookup aids for building filters: the known
//! reforge option names per category, the enchant catalog with effect
//! templates, and the set-effect names per category. They are loaded as
//! JSON from the application data directory (`~/.local/share/mabi` on
//! Unix) and never participate in evaluation itself, so a missing file
//! degrades to an empty vocabulary instead of blocking the filter engine.
//!
//! [`MetadataCache`] keeps loaded vocabularies for the session. Access
//! goes through `&mut self`, so a vocabulary is loaded at most once until
//! invalidated.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application qualifier (for XDG paths).
const QUALIFIER: &str = "";

/// Application organization (for XDG paths).
const ORGANIZATION: &str = "";

/// Application name (for XDG paths).
const APPLICATION: &str = "mabi";

/// Maximum Levenshtein distance for "did you mean" suggestions.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Errors that can occur while loading metadata vocabularies.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// Failed to determine the XDG data directory.
    #[error("failed to determine data directory: no valid home directory found")]
    NoDataDir,

    /// I/O error during file read.
    #[error("failed to read metadata file '{path}': {source}")]
    ReadError {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A metadata file exists but contains invalid JSON.
    #[error("failed to parse metadata file '{path}': {source}")]
    ParseError {
        /// The path that failed to parse.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for metadata operations.
pub type Result<T> = std::result::Result<T, MetadataError>;

/// Known reforge option names, keyed by item category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReforgeVocabulary {
    #[serde(default)]
    pub reforges: BTreeMap<String, Vec<String>>,
}

impl ReforgeVocabulary {
    /// The known reforge option names for one category.
    pub fn names_for(&self, category: &str) -> &[String] {
        self.reforges.get(category).map_or(&[], Vec::as_slice)
    }
}

/// One effect line an enchant can roll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnchantEffect {
    /// Effect text with the numeric payload elided, e.g. "최대 대미지 {} 증가".
    pub template: String,
    pub min: f64,
    pub max: f64,
}

/// One enchant in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnchantEntry {
    pub rank: u32,
    #[serde(default)]
    pub effects: Vec<EnchantEffect>,
}

/// The enchant catalog, split by position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnchantVocabulary {
    #[serde(default)]
    pub prefixes: BTreeMap<String, EnchantEntry>,
    #[serde(default)]
    pub suffixes: BTreeMap<String, EnchantEntry>,
}

/// Known set-effect names for one item category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SetEffectVocabulary {
    #[serde(default)]
    pub set_effects: Vec<String>,
}

static EMPTY_SET_EFFECTS: SetEffectVocabulary = SetEffectVocabulary {
    set_effects: Vec::new(),
};

/// Loads metadata vocabularies from the application data directory.
///
/// File layout under the data dir:
///
/// - `reforges.json`: [`ReforgeVocabulary`]
/// - `enchants.json`: [`EnchantVocabulary`]
/// - `set_effects/<category>.json`: [`SetEffectVocabulary`]
#[derive(Debug, Clone)]
pub struct MetadataStore {
    data_dir: PathBuf,
}

impl MetadataStore {
    /// Creates a store over the default XDG data directory.
    ///
    /// # Errors
    ///
    /// Returns `MetadataError::NoDataDir` if the home directory cannot be
    /// determined.
    pub fn new() -> Result<Self> {
        let project_dirs =
            ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION).ok_or(MetadataError::NoDataDir)?;
        Ok(Self {
            data_dir: project_dirs.data_dir().to_path_buf(),
        })
    }

    /// Creates a store over a custom directory.
    ///
    /// This is primarily useful for testing.
    pub fn with_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Returns the data directory this store reads from.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Loads the reforge vocabulary; a missing file yields an empty one.
    pub async fn load_reforges(&self) -> Result<ReforgeVocabulary> {
        self.load_json(self.data_dir.join("reforges.json")).await
    }

    /// Loads the enchant catalog; a missing file yields an empty one.
    pub async fn load_enchants(&self) -> Result<EnchantVocabulary> {
        self.load_json(self.data_dir.join("enchants.json")).await
    }

    /// Loads the set-effect names for a category; a missing file yields an
    /// empty vocabulary.
    pub async fn load_set_effects(&self, category: &str) -> Result<SetEffectVocabulary> {
        let path = self.data_dir.join("set_effects").join(format!("{category}.json"));
        self.load_json(path).await
    }

    async fn load_json<T>(&self, path: PathBuf) -> Result<T>
    where
        T: serde::de::DeserializeOwned + Default,
    {
        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(T::default()),
            Err(e) => return Err(MetadataError::ReadError { path, source: e }),
        };
        serde_json::from_str(&contents).map_err(|e| MetadataError::ParseError { path, source: e })
    }
}

/// Session-scoped cache over a [`MetadataStore`].
#[derive(Debug)]
pub struct MetadataCache {
    store: MetadataStore,
    reforges: Option<ReforgeVocabulary>,
    enchants: Option<EnchantVocabulary>,
    set_effects: BTreeMap<String, SetEffectVocabulary>,
}

impl MetadataCache {
    pub fn new(store: MetadataStore) -> Self {
        Self {
            store,
            reforges: None,
            enchants: None,
            set_effects: BTreeMap::new(),
        }
    }

    /// The known reforge option names for a category, loading the
    /// vocabulary on first access.
    pub async fn reforge_options(&mut self, category: &str) -> Result<&[String]> {
        if self.reforges.is_none() {
            self.reforges = Some(self.store.load_reforges().await?);
        }
        Ok(self
            .reforges
            .as_ref()
            .map_or(&[], |v| v.names_for(category)))
    }

    /// The enchant catalog, loading it on first access.
    pub async fn enchants(&mut self) -> Result<&EnchantVocabulary> {
        if self.enchants.is_none() {
            self.enchants = Some(self.store.load_enchants().await?);
        }
        Ok(self.enchants.get_or_insert_with(EnchantVocabulary::default))
    }

    /// The set-effect vocabulary for a category, loading it on first
    /// access.
    pub async fn set_effects(&mut self, category: &str) -> Result<&SetEffectVocabulary> {
        if !self.set_effects.contains_key(category) {
            let vocab = self.store.load_set_effects(category).await?;
            self.set_effects.insert(category.to_string(), vocab);
        }
        Ok(self.set_effects.get(category).unwrap_or(&EMPTY_SET_EFFECTS))
    }

    /// Drops the cached entries scoped to one category.
    ///
    /// The global vocabularies (reforges, enchants) are not category-scoped
    /// and stay cached.
    pub fn invalidate_category(&mut self, category: &str) {
        self.set_effects.remove(category);
    }

    /// Drops everything cached in this session.
    pub fn invalidate_all(&mut self) {
        self.reforges = None;
        self.enchants = None;
        self.set_effects.clear();
    }

    /// Suggests a known reforge option name close to a query that matched
    /// nothing, for "did you mean" hints.
    ///
    /// Returns `None` when the query is already an exact vocabulary entry
    /// or nothing is within edit distance 3.
    pub async fn suggest_reforge_option(
        &mut self,
        category: &str,
        query: &str,
    ) -> Result<Option<String>> {
        let query = query.trim();
        let names = self.reforge_options(category).await?;

        if names.iter().any(|n| n == query) {
            return Ok(None);
        }

        Ok(names
            .iter()
            .map(|n| (strsim::levenshtein(n, query), n))
            .min_by_key(|(distance, _)| *distance)
            .filter(|(distance, _)| *distance <= MAX_SUGGESTION_DISTANCE)
            .map(|(_, n)| n.clone()))
    }
}
