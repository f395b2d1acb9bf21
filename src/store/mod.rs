//! Record lookup module
//!
//! The request path only ever reads; stores are loaded once at startup and shared.

mod memory;

pub use memory::MemoryStore;

use crate::model::{Definition, DefinitionId, Synset, SynsetId};
use std::sync::Arc;
use thiserror::Error;

/// Lookup failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Couldn't find Synset with id={0}")]
    SynsetNotFound(SynsetId),

    /// Also returned when the definition exists but belongs to another synset
    #[error("Couldn't find Definition with id={id} in Synset {synset_id}")]
    DefinitionNotFound {
        synset_id: SynsetId,
        id: DefinitionId,
    },
}

/// Read access to synsets and their definitions
pub trait Store: Send + Sync {
    fn find_synset(&self, id: SynsetId) -> Result<Synset, StoreError>;

    /// Find a definition scoped to its owning synset
    fn find_definition(
        &self,
        synset_id: SynsetId,
        id: DefinitionId,
    ) -> Result<Definition, StoreError>;
}

pub type SharedStore = Arc<dyn Store>;
