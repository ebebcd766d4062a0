//! Identity registry: stable identifiers for recurring named entities
//!
//! One registry per conversion run. A natural key maps to exactly one
//! identifier within its namespace; namespaces never share identities.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

/// Opaque identifier of a graph entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(Uuid);

impl EntityId {
    /// Create a new random EntityId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an EntityId from an existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Source of fresh identifiers
pub trait IdMinter {
    fn mint(&mut self) -> EntityId;
}

/// Random 128-bit identifiers (UUID v4)
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomMinter;

impl IdMinter for RandomMinter {
    fn mint(&mut self) -> EntityId {
        EntityId::new()
    }
}

/// Counts upwards from a seed. Two runs with the same seed over the same
/// input mint the same identifiers, which makes whole graphs comparable.
#[derive(Debug, Clone, Default)]
pub struct SequentialMinter {
    next: u128,
}

impl SequentialMinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(seed: u128) -> Self {
        Self { next: seed }
    }
}

impl IdMinter for SequentialMinter {
    fn mint(&mut self) -> EntityId {
        self.next += 1;
        EntityId::from_uuid(Uuid::from_u128(self.next))
    }
}

/// Namespaces natural keys are resolved in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Project,
    Experimenter,
    Subject,
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Project => "project",
            Self::Experimenter => "experimenter",
            Self::Subject => "subject",
        };
        write!(f, "{}", name)
    }
}

/// Result of resolving a natural key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// First sight of the key; a new identifier was recorded
    Minted(EntityId),
    /// The key was seen before
    Existing(EntityId),
}

impl Resolution {
    pub fn id(&self) -> EntityId {
        match self {
            Self::Minted(id) | Self::Existing(id) => *id,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, Self::Minted(_))
    }
}

/// Per-run table from (namespace, natural key) to identifier.
///
/// Also hands out unkeyed identifiers for entities that are never
/// deduplicated, so every identifier of a run comes from one minter.
pub struct IdentityRegistry {
    entries: HashMap<(Namespace, String), EntityId>,
    minter: Box<dyn IdMinter>,
}

impl IdentityRegistry {
    /// Registry minting random identifiers
    pub fn new() -> Self {
        Self::with_minter(RandomMinter)
    }

    pub fn with_minter(minter: impl IdMinter + 'static) -> Self {
        Self {
            entries: HashMap::new(),
            minter: Box::new(minter),
        }
    }

    /// Look up the identifier for `key`, minting and recording one on first sight
    pub fn resolve(&mut self, namespace: Namespace, key: &str) -> Resolution {
        if let Some(id) = self.entries.get(&(namespace, key.to_string())) {
            return Resolution::Existing(*id);
        }
        let id = self.minter.mint();
        debug!(%namespace, key, %id, "minted identity");
        self.entries.insert((namespace, key.to_string()), id);
        Resolution::Minted(id)
    }

    /// Look up without minting
    pub fn get(&self, namespace: Namespace, key: &str) -> Option<EntityId> {
        self.entries.get(&(namespace, key.to_string())).copied()
    }

    /// Fresh identifier that is not bound to any key
    pub fn mint(&mut self) -> EntityId {
        self.minter.mint()
    }

    /// Number of keys recorded in a namespace
    pub fn len(&self, namespace: Namespace) -> usize {
        self.entries.keys().filter(|(ns, _)| *ns == namespace).count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for IdentityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for IdentityRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityRegistry")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}
