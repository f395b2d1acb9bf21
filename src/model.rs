//! Lexicon records served by the definition endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a synset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SynsetId(pub u64);

/// Identifier of a definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DefinitionId(pub u64);

impl SynsetId {
    /// Parse a path token. Anything that is not an unsigned integer names no record.
    pub fn parse(token: &str) -> Option<Self> {
        parse_id(token).map(Self)
    }
}

impl DefinitionId {
    pub fn parse(token: &str) -> Option<Self> {
        parse_id(token).map(Self)
    }
}

fn parse_id(token: &str) -> Option<u64> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

impl fmt::Display for SynsetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for DefinitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A group of synonymous words owning one or more definitions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Synset {
    pub id: SynsetId,
    /// Part of speech (`n`, `v`, `a`, `r`, ...)
    #[serde(default)]
    pub pos: String,
    #[serde(default)]
    pub words: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Synset {
    /// Label shown in the navigation bar
    pub fn label(&self) -> String {
        if self.words.is_empty() {
            format!("Synset #{}", self.id)
        } else {
            self.words.join(", ")
        }
    }
}

/// A gloss attached to exactly one synset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub id: DefinitionId,
    pub synset_id: SynsetId,
    pub gloss: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
pub mod fixtures {
    use super::*;
    use chrono::TimeZone;

    pub fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2012, 3, 14, 9, 26, 53).unwrap()
    }

    pub fn synset(id: u64, words: &[&str]) -> Synset {
        Synset {
            id: SynsetId(id),
            pos: "n".to_string(),
            words: words.iter().map(ToString::to_string).collect(),
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }

    pub fn definition(id: u64, synset_id: u64, gloss: &str) -> Definition {
        Definition {
            id: DefinitionId(id),
            synset_id: SynsetId(synset_id),
            gloss: gloss.to_string(),
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(SynsetId::parse("5"), Some(SynsetId(5)));
        assert_eq!(DefinitionId::parse("0009"), Some(DefinitionId(9)));
        assert_eq!(SynsetId::parse(""), None);
        assert_eq!(SynsetId::parse("abc"), None);
        assert_eq!(SynsetId::parse("-1"), None);
        assert_eq!(SynsetId::parse("+1"), None);
        assert_eq!(SynsetId::parse("99999999999999999999999"), None);
    }

    #[test]
    fn test_synset_label() {
        assert_eq!(fixtures::synset(5, &["dog", "domestic dog"]).label(), "dog, domestic dog");
        assert_eq!(fixtures::synset(5, &[]).label(), "Synset #5");
    }
}
