//! Original-to-new identifier table for one copy operation.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;

use crate::domain::DomainError;

/// Kinds whose duplicates are referenced by later rows of a copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Book,
    Chapter,
    Unit,
    Voca,
    Meaning,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Book => "book",
            EntityKind::Chapter => "chapter",
            EntityKind::Unit => "unit",
            EntityKind::Voca => "voca",
            EntityKind::Meaning => "meaning",
        };
        f.write_str(name)
    }
}

/// Per-kind map from an original `idx` to the `idx` of its duplicate.
///
/// Lives for a single copy operation and is never shared.
#[derive(Debug, Default)]
pub struct IdRemapper {
    maps: HashMap<EntityKind, HashMap<i32, i32>>,
}

impl IdRemapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `original` of `kind` was duplicated as `new`.
    ///
    /// Recording the same original twice means the source graph was read
    /// inconsistently, so it is an integrity error.
    pub fn record(&mut self, kind: EntityKind, original: i32, new: i32) -> Result<(), DomainError> {
        match self.maps.entry(kind).or_default().entry(original) {
            Entry::Occupied(existing) => Err(DomainError::Integrity(format!(
                "{} {} already remapped to {}",
                kind,
                original,
                existing.get()
            ))),
            Entry::Vacant(slot) => {
                slot.insert(new);
                Ok(())
            }
        }
    }

    /// New `idx` for `original`, or `None` when it was never copied.
    pub fn resolve(&self, kind: EntityKind, original: i32) -> Option<i32> {
        self.maps.get(&kind)?.get(&original).copied()
    }

    /// Original ids of `kind`, ascending
    pub fn originals(&self, kind: EntityKind) -> Vec<i32> {
        let mut ids: Vec<i32> = self
            .maps
            .get(&kind)
            .map(|m| m.keys().copied().collect())
            .unwrap_or_default();
        ids.sort_unstable();
        ids
    }
}
