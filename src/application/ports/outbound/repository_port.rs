//! Repository ports - Interfaces for character, object, group and event persistence
//!
//! These traits define the contracts that infrastructure repositories must implement.
//! Application services depend on these traits, not concrete implementations.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{CharacterSheet, SocialGroups, WorldObject};
use crate::domain::value_objects::{AbilityKey, CharacterId, EventId, ObjectKey, UniverseKey};

/// Held for the duration of one read-modify-write on a single row.
/// Dropping it releases the row.
pub type RowLease = tokio::sync::OwnedMutexGuard<()>;

// =============================================================================
// Character Repository Port
// =============================================================================

/// Repository port for character sheet rows
#[async_trait]
pub trait CharacterRepositoryPort: Send + Sync {
    /// Get a character by ID
    async fn get(&self, id: CharacterId) -> Result<Option<CharacterSheet>>;

    /// Write back effects, live stats and health
    async fn save(&self, sheet: &CharacterSheet) -> Result<()>;

    /// Serialise read-modify-write access to one character
    async fn lock(&self, id: CharacterId) -> Result<RowLease>;
}

// =============================================================================
// World Object Repository Port
// =============================================================================

/// Repository port for world objects, keyed by (object, universe)
#[async_trait]
pub trait WorldObjectRepositoryPort: Send + Sync {
    async fn get(&self, key: &ObjectKey, universe: &UniverseKey) -> Result<Option<WorldObject>>;

    async fn save(&self, object: &WorldObject) -> Result<()>;

    async fn lock(&self, key: &ObjectKey, universe: &UniverseKey) -> Result<RowLease>;
}

// =============================================================================
// Social Group Port
// =============================================================================

/// Read-only lookup of a character's social groups
#[async_trait]
pub trait SocialGroupPort: Send + Sync {
    /// Groups owned by `character`; no groups is an empty mapping
    async fn groups_for(&self, character: CharacterId) -> Result<SocialGroups>;
}

// =============================================================================
// Event Log Port
// =============================================================================

/// What an audited action was
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionEventKind {
    Ability {
        ability: AbilityKey,
    },
    ObjectAction {
        object: ObjectKey,
        universe: UniverseKey,
        action: String,
    },
}

/// One resolved action, success or soft failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionEvent {
    pub id: EventId,
    pub actor: CharacterId,
    pub kind: ActionEventKind,
    pub success: bool,
    pub roll_info: Option<String>,
    pub message: String,
    pub occurred_at: DateTime<Utc>,
}

/// Audit log of resolved actions, also the source of ability cooldowns
#[async_trait]
pub trait EventLogPort: Send + Sync {
    async fn append(&self, event: ActionEvent) -> Result<()>;

    /// Most recent successful use of `ability` by `actor`
    async fn last_success(
        &self,
        actor: CharacterId,
        ability: &AbilityKey,
    ) -> Result<Option<DateTime<Utc>>>;
}
