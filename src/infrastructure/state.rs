//! Shared application state

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::application::ports::outbound::{CatalogPort, ClockPort};
use crate::application::services::{AbilityService, EffectService, ObjectActionService};
use crate::domain::services::{CheckResolver, DiceRoller};
use crate::infrastructure::catalog::JsonCatalog;
use crate::infrastructure::clock::SystemClock;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::dice::RandomDice;
use crate::infrastructure::persistence::{InMemoryStore, SeedData};

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<InMemoryStore>,
    // Application services
    pub effect_service: EffectService,
    pub ability_service: AbilityService,
    pub object_action_service: ObjectActionService,
}

impl AppState {
    /// Load the catalog and seed data named in `config` and wire the services
    pub async fn new(config: AppConfig) -> Result<Self> {
        let catalog = JsonCatalog::from_path(&config.catalog_path).await?;
        let seed = SeedData::from_file(&config.seed_path).await?;
        catalog
            .validate_objects(&seed.objects)
            .with_context(|| format!("Seed {} does not match the catalog", config.seed_path))?;
        let store = Arc::new(InMemoryStore::from_seed(seed).await);

        Ok(Self::with_adapters(
            config,
            store,
            Arc::new(catalog),
            Arc::new(RandomDice),
            Arc::new(SystemClock),
        ))
    }

    pub fn with_adapters(
        config: AppConfig,
        store: Arc<InMemoryStore>,
        catalog: Arc<dyn CatalogPort>,
        dice: Arc<dyn DiceRoller>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        let checks = CheckResolver::new(dice);
        let effect_service = EffectService::new(store.clone());
        let ability_service = AbilityService::new(
            effect_service.clone(),
            catalog.clone(),
            store.clone(),
            store.clone(),
            clock.clone(),
            checks.clone(),
        );
        let object_action_service = ObjectActionService::new(
            effect_service.clone(),
            store.clone(),
            catalog,
            store.clone(),
            clock,
            checks,
        );

        Self {
            config,
            store,
            effect_service,
            ability_service,
            object_action_service,
        }
    }
}
