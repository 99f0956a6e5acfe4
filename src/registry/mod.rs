//! Identity registry - reusable composer and instrument entries.
//!
//! Entries live on disk as pretty-printed JSON, one file per entry, named by
//! canonical key, under one subdirectory per kind:
//!
//! ```text
//! .partita/registry/
//!   composers/johann_sebastian_bach.json
//!   instruments/violin.json
//! ```
//!
//! Loading yields a fresh, independently-owned entity copy; in-session edits
//! never write back unless the user explicitly saves. The store is
//! single-session, single-writer: writes are immediate and not transactional.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{RegistryError, RegistryResult};
use crate::models::{Composer, Instrument};

/// Default registry location (relative to the working directory).
pub const DEFAULT_REGISTRY_DIR: &str = ".partita/registry";

/// Bundled starter entries, embedded at compile time.
const SEED_SNAPSHOT: &str = include_str!("../../seeds/registry.json");

/// Entity kinds the registry stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Composer,
    Instrument,
}

impl Kind {
    fn dir_name(self) -> &'static str {
        match self {
            Kind::Composer => "composers",
            Kind::Instrument => "instruments",
        }
    }
}

/// On-disk wrapper around an entity, stamped with the save time.
#[derive(Debug, Serialize, Deserialize)]
struct Record<T> {
    saved_at: String,
    #[serde(flatten)]
    entity: T,
}

#[derive(Debug, Deserialize)]
struct SeedSnapshot {
    composers: Vec<Composer>,
    instruments: Vec<Instrument>,
}

/// The registry, loaded fully into memory on open.
///
/// `BTreeMap` keeps keys in sorted order, which makes match enumeration
/// stable across runs.
#[derive(Debug)]
pub struct Registry {
    root: PathBuf,
    composers: BTreeMap<String, Composer>,
    instruments: BTreeMap<String, Instrument>,
}

impl Registry {
    /// Open a registry rooted at `root`, loading any existing entries. A
    /// missing directory is an empty registry, not an error.
    pub fn open(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        let mut registry = Self {
            root,
            composers: BTreeMap::new(),
            instruments: BTreeMap::new(),
        };
        registry.load_all();
        registry
    }

    fn load_all(&mut self) {
        self.composers = load_kind(&self.root.join(Kind::Composer.dir_name()));
        self.instruments = load_kind(&self.root.join(Kind::Instrument.dir_name()));
    }

    /// Canonical keys of one kind, in stable sorted order.
    pub fn list_keys(&self, kind: Kind) -> Vec<String> {
        match kind {
            Kind::Composer => self.composers.keys().cloned().collect(),
            Kind::Instrument => self.instruments.keys().cloned().collect(),
        }
    }

    /// Load a composer entry as an independently-owned copy.
    pub fn composer(&self, key: &str) -> Option<Composer> {
        self.composers.get(key).cloned()
    }

    /// Load an instrument entry as an independently-owned copy.
    pub fn instrument(&self, key: &str) -> Option<Instrument> {
        self.instruments.get(key).cloned()
    }

    /// Persist a composer, keyed by its canonical name. Returns the key.
    pub fn save_composer(&mut self, composer: &Composer) -> RegistryResult<String> {
        let key = composer.canonical_key();
        self.write_entry(Kind::Composer, &key, composer)?;
        self.composers.insert(key.clone(), composer.clone());
        Ok(key)
    }

    /// Persist an instrument, keyed by canonical name only: the numeric
    /// disambiguator is excluded so `Violin 1` and `Violin 2` share the
    /// entry `violin`.
    pub fn save_instrument(&mut self, instrument: &Instrument) -> RegistryResult<String> {
        let entry = instrument.registry_form();
        let key = entry.name.clone();
        self.write_entry(Kind::Instrument, &key, &entry)?;
        self.instruments.insert(key.clone(), entry);
        Ok(key)
    }

    /// Remove an entry of the given kind.
    pub fn delete(&mut self, kind: Kind, key: &str) -> RegistryResult<()> {
        let removed = match kind {
            Kind::Composer => self.composers.remove(key).is_some(),
            Kind::Instrument => self.instruments.remove(key).is_some(),
        };
        if !removed {
            return Err(RegistryError::NotFound(key.to_string()));
        }
        fs::remove_file(self.entry_path(kind, key))?;
        Ok(())
    }

    /// True when no table of either kind has any entries yet, i.e. the
    /// bundled snapshot should be offered.
    pub fn needs_bootstrap(&self) -> bool {
        self.composers.is_empty() && self.instruments.is_empty()
    }

    /// Seed the registry from the bundled default snapshot.
    pub fn bootstrap(&mut self) -> RegistryResult<()> {
        let snapshot: SeedSnapshot = serde_json::from_str(SEED_SNAPSHOT)
            .map_err(|e| RegistryError::InvalidSnapshot(e.to_string()))?;
        for composer in &snapshot.composers {
            self.save_composer(composer)?;
        }
        for instrument in &snapshot.instruments {
            self.save_instrument(instrument)?;
        }
        Ok(())
    }

    fn entry_path(&self, kind: Kind, key: &str) -> PathBuf {
        self.root.join(kind.dir_name()).join(format!("{key}.json"))
    }

    fn write_entry<T: Serialize>(&self, kind: Kind, key: &str, entity: &T) -> RegistryResult<()> {
        let dir = self.root.join(kind.dir_name());
        fs::create_dir_all(&dir)?;
        let record = Record {
            saved_at: chrono::Utc::now().to_rfc3339(),
            entity,
        };
        let content = serde_json::to_string_pretty(&record)?;
        fs::write(self.entry_path(kind, key), content)?;
        Ok(())
    }
}

/// Load every readable entry in a kind directory; unreadable or malformed
/// files are skipped.
fn load_kind<T: DeserializeOwned>(dir: &Path) -> BTreeMap<String, T> {
    let mut entries = BTreeMap::new();
    let Ok(dir_entries) = fs::read_dir(dir) else {
        return entries;
    };
    for entry in dir_entries.flatten() {
        let path = entry.path();
        if path.extension().is_some_and(|e| e == "json") {
            let Some(key) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if let Ok(content) = fs::read_to_string(&path) {
                if let Ok(record) = serde_json::from_str::<Record<T>>(&content) {
                    entries.insert(key.to_string(), record.entity);
                }
            }
        }
    }
    entries
}
