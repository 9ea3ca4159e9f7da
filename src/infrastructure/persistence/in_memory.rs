//! In-memory persistence adapter
//!
//! Rows live in `RwLock`ed maps. Each row also has its own async mutex; the
//! owned guard handed out by `lock` is the row lease services hold across a
//! read-modify-write.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::application::ports::outbound::{
    ActionEvent, ActionEventKind, CharacterRepositoryPort, EventLogPort, RowLease,
    SocialGroupPort, WorldObjectRepositoryPort,
};
use crate::domain::entities::{CharacterSheet, SocialGroups, WorldObject};
use crate::domain::services::refresh_live_stats;
use crate::domain::value_objects::{AbilityKey, CharacterId, ObjectKey, UniverseKey};

type ObjectRowKey = (ObjectKey, UniverseKey);

/// Group memberships for one character, as stored in the seed file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupMembership {
    pub character: CharacterId,
    pub groups: SocialGroups,
}

/// Initial world state loaded at startup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub characters: Vec<CharacterSheet>,
    #[serde(default)]
    pub objects: Vec<WorldObject>,
    #[serde(default)]
    pub groups: Vec<GroupMembership>,
}

impl SeedData {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Seed data is not valid JSON")
    }

    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read seed file {}", path.display()))?;
        Self::from_json(&json)
    }
}

/// Lease table: one async mutex per row key, created on first use and
/// dropped once nobody holds or waits on it
struct Leases<K> {
    rows: Mutex<HashMap<K, Arc<Mutex<()>>>>,
}

impl<K: std::hash::Hash + Eq + Clone> Leases<K> {
    fn new() -> Self {
        Self {
            rows: Mutex::new(HashMap::new()),
        }
    }

    async fn acquire(&self, key: &K) -> RowLease {
        let row = {
            let mut rows = self.rows.lock().await;
            // Clones only happen under this lock, so a count of one is idle
            rows.retain(|_, row| Arc::strong_count(row) > 1);
            rows.entry(key.clone())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        row.lock_owned().await
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.rows.lock().await.len()
    }
}

pub struct InMemoryStore {
    characters: RwLock<HashMap<CharacterId, CharacterSheet>>,
    objects: RwLock<HashMap<ObjectRowKey, WorldObject>>,
    groups: RwLock<HashMap<CharacterId, SocialGroups>>,
    events: RwLock<Vec<ActionEvent>>,
    character_leases: Leases<CharacterId>,
    object_leases: Leases<ObjectRowKey>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            characters: RwLock::new(HashMap::new()),
            objects: RwLock::new(HashMap::new()),
            groups: RwLock::new(HashMap::new()),
            events: RwLock::new(Vec::new()),
            character_leases: Leases::new(),
            object_leases: Leases::new(),
        }
    }

    /// Build a store from seed data. Cached live stats are recomputed, so a
    /// stale or missing projection in the file is harmless.
    pub async fn from_seed(seed: SeedData) -> Self {
        let store = Self::new();
        let (characters, objects, groups) =
            (seed.characters.len(), seed.objects.len(), seed.groups.len());

        for sheet in seed.characters {
            store.insert_character(sheet).await;
        }
        for object in seed.objects {
            store.insert_object(object).await;
        }
        for membership in seed.groups {
            store.set_groups(membership.character, membership.groups).await;
        }

        info!(characters, objects, groups, "Seeded in-memory store");
        store
    }

    pub async fn insert_character(&self, mut sheet: CharacterSheet) {
        // Rows from seed files bypass the constructors
        sheet.set_health(sheet.current_health);
        refresh_live_stats(&mut sheet);
        self.characters.write().await.insert(sheet.id, sheet);
    }

    pub async fn insert_object(&self, object: WorldObject) {
        let key = (object.key.clone(), object.universe.clone());
        self.objects.write().await.insert(key, object);
    }

    pub async fn set_groups(&self, character: CharacterId, groups: SocialGroups) {
        self.groups.write().await.insert(character, groups);
    }

    pub async fn object(&self, key: &ObjectKey, universe: &UniverseKey) -> Option<WorldObject> {
        self.objects
            .read()
            .await
            .get(&(key.clone(), universe.clone()))
            .cloned()
    }

    /// Snapshot of the audit log, oldest first
    pub async fn events(&self) -> Vec<ActionEvent> {
        self.events.read().await.clone()
    }
}

#[async_trait]
impl CharacterRepositoryPort for InMemoryStore {
    async fn get(&self, id: CharacterId) -> Result<Option<CharacterSheet>> {
        Ok(self.characters.read().await.get(&id).cloned())
    }

    async fn save(&self, sheet: &CharacterSheet) -> Result<()> {
        self.characters.write().await.insert(sheet.id, sheet.clone());
        debug!(character_id = %sheet.id, "Saved character");
        Ok(())
    }

    async fn lock(&self, id: CharacterId) -> Result<RowLease> {
        Ok(self.character_leases.acquire(&id).await)
    }
}

#[async_trait]
impl WorldObjectRepositoryPort for InMemoryStore {
    async fn get(&self, key: &ObjectKey, universe: &UniverseKey) -> Result<Option<WorldObject>> {
        Ok(self.object(key, universe).await)
    }

    async fn save(&self, object: &WorldObject) -> Result<()> {
        self.insert_object(object.clone()).await;
        debug!(object = %object.key, universe = %object.universe, "Saved object");
        Ok(())
    }

    async fn lock(&self, key: &ObjectKey, universe: &UniverseKey) -> Result<RowLease> {
        Ok(self
            .object_leases
            .acquire(&(key.clone(), universe.clone()))
            .await)
    }
}

#[async_trait]
impl SocialGroupPort for InMemoryStore {
    async fn groups_for(&self, character: CharacterId) -> Result<SocialGroups> {
        Ok(self
            .groups
            .read()
            .await
            .get(&character)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl EventLogPort for InMemoryStore {
    async fn append(&self, event: ActionEvent) -> Result<()> {
        self.events.write().await.push(event);
        Ok(())
    }

    async fn last_success(
        &self,
        actor: CharacterId,
        ability: &AbilityKey,
    ) -> Result<Option<DateTime<Utc>>> {
        let events = self.events.read().await;
        Ok(events
            .iter()
            .filter(|e| e.actor == actor && e.success)
            .filter(|e| matches!(&e.kind, ActionEventKind::Ability { ability: a } if a == ability))
            .map(|e| e.occurred_at)
            .max())
    }
}
