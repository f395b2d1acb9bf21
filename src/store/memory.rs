// In-memory store backed by a TOML data file
//
// File layout:
//
//   [[synsets]]
//   id = 5
//   pos = "n"
//   words = ["dog", "domestic dog"]
//   created_at = "2012-03-14T09:26:53Z"
//   updated_at = "2012-03-14T09:26:53Z"
//
//   [[definitions]]
//   id = 9
//   synset_id = 5
//   gloss = "a member of the genus Canis"
//   created_at = "2012-03-14T09:26:53Z"
//   updated_at = "2012-03-14T09:26:53Z"

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::{Store, StoreError};
use crate::logger;
use crate::model::{Definition, DefinitionId, Synset, SynsetId};

/// Errors raised while loading the data file
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Failed to read data file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse data file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Duplicate synset id {0}")]
    DuplicateSynset(SynsetId),

    #[error("Duplicate definition id {0}")]
    DuplicateDefinition(DefinitionId),

    #[error("Definition {id} references missing synset {synset_id}")]
    OrphanDefinition {
        id: DefinitionId,
        synset_id: SynsetId,
    },

    #[error("{record} has a character not allowed in XML in its {field}")]
    InvalidText { record: String, field: &'static str },
}

/// Characters XML 1.0 can carry in element content
const fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r') || (c >= ' ' && !matches!(c, '\u{FFFE}' | '\u{FFFF}'))
}

fn check_text(
    text: &str,
    record: impl FnOnce() -> String,
    field: &'static str,
) -> Result<(), DataError> {
    if text.chars().all(is_xml_char) {
        Ok(())
    } else {
        Err(DataError::InvalidText {
            record: record(),
            field,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
struct DataFile {
    #[serde(default)]
    synsets: Vec<Synset>,
    #[serde(default)]
    definitions: Vec<Definition>,
}

/// Immutable store holding every record in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    synsets: HashMap<SynsetId, Synset>,
    definitions: HashMap<DefinitionId, Definition>,
}

impl MemoryStore {
    /// Build a store, rejecting duplicate ids, definitions without a synset
    /// and text that cannot be represented in XML
    pub fn from_records(
        synsets: Vec<Synset>,
        definitions: Vec<Definition>,
    ) -> Result<Self, DataError> {
        let mut store = Self::default();

        for synset in synsets {
            let id = synset.id;
            check_text(&synset.pos, || format!("Synset {id}"), "pos")?;
            for word in &synset.words {
                check_text(word, || format!("Synset {id}"), "words")?;
            }
            if store.synsets.insert(id, synset).is_some() {
                return Err(DataError::DuplicateSynset(id));
            }
        }

        for definition in definitions {
            let id = definition.id;
            check_text(&definition.gloss, || format!("Definition {id}"), "gloss")?;
            if !store.synsets.contains_key(&definition.synset_id) {
                return Err(DataError::OrphanDefinition {
                    id,
                    synset_id: definition.synset_id,
                });
            }
            if store.definitions.insert(id, definition).is_some() {
                return Err(DataError::DuplicateDefinition(id));
            }
        }

        Ok(store)
    }

    /// Parse TOML data file contents
    pub fn from_toml(content: &str, path: &Path) -> Result<Self, DataError> {
        let data: DataFile = toml::from_str(content).map_err(|source| DataError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_records(data.synsets, data.definitions)
    }

    /// Load the data file; a missing file yields an empty store
    pub fn load(path: &Path) -> Result<Self, DataError> {
        if !path.exists() {
            logger::log_warning(&format!(
                "Data file {} not found, serving an empty lexicon",
                path.display()
            ));
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| DataError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::from_toml(&content, path)?;

        logger::write_info(&format!(
            "Loaded {} synsets and {} definitions from {}",
            store.synsets.len(),
            store.definitions.len(),
            path.display()
        ));
        Ok(store)
    }

    pub fn synset_count(&self) -> usize {
        self.synsets.len()
    }

    pub fn definition_count(&self) -> usize {
        self.definitions.len()
    }
}

impl Store for MemoryStore {
    fn find_synset(&self, id: SynsetId) -> Result<Synset, StoreError> {
        self.synsets
            .get(&id)
            .cloned()
            .ok_or(StoreError::SynsetNotFound(id))
    }

    fn find_definition(
        &self,
        synset_id: SynsetId,
        id: DefinitionId,
    ) -> Result<Definition, StoreError> {
        self.definitions
            .get(&id)
            .filter(|d| d.synset_id == synset_id)
            .cloned()
            .ok_or(StoreError::DefinitionNotFound { synset_id, id })
    }
}
