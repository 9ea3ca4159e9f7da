//! Effect Service - guarded read-modify-write of a character's active effects
//!
//! Every mutation here runs while holding the character's row lease, and no
//! method ever holds more than one lease at a time.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::application::dto::{AffectedCharacter, EffectStateDto};
use crate::application::ports::outbound::CharacterRepositoryPort;
use crate::application::services::ActionError;
use crate::domain::entities::{CharacterSheet, EffectDefinition, EffectSource, LiveStats};
use crate::domain::services::{
    apply_effect, calculate_live_stats, clear_scene, process_turn, remove_effect, TurnReport,
};
use crate::domain::value_objects::{CharacterId, EffectKey};

#[derive(Clone)]
pub struct EffectService {
    characters: Arc<dyn CharacterRepositoryPort>,
}

impl EffectService {
    pub fn new(characters: Arc<dyn CharacterRepositoryPort>) -> Self {
        Self { characters }
    }

    pub(crate) async fn load(&self, id: CharacterId) -> Result<CharacterSheet, ActionError> {
        self.characters
            .get(id)
            .await?
            .ok_or_else(|| ActionError::NotFound(format!("Character {}", id)))
    }

    /// Current live stats, derived fresh from the stored effects
    #[instrument(skip(self))]
    pub async fn live_stats(&self, id: CharacterId) -> Result<LiveStats, ActionError> {
        let sheet = self.load(id).await?;
        Ok(calculate_live_stats(&sheet.base_stats, &sheet.active_effects))
    }

    /// Apply every definition to `target`.
    ///
    /// A target that no longer exists is skipped and yields `None`; the
    /// caller's nearby list may be stale.
    #[instrument(skip(self, definitions, source), fields(effects = definitions.len()))]
    pub async fn apply_all(
        &self,
        target: CharacterId,
        definitions: &[EffectDefinition],
        source: &EffectSource,
    ) -> Result<Option<AffectedCharacter>, ActionError> {
        let _lease = self.characters.lock(target).await?;
        let Some(mut sheet) = self.characters.get(target).await? else {
            warn!(character_id = %target, "Skipping target with no character record");
            return Ok(None);
        };

        let mut applied = Vec::with_capacity(definitions.len());
        for definition in definitions {
            let effect = definition.instantiate(source.clone())?;
            applied.push(effect.summary());
            apply_effect(&mut sheet, effect);
        }
        self.characters.save(&sheet).await?;

        debug!(character_id = %target, applied = applied.len(), "Applied effects");
        Ok(Some(AffectedCharacter {
            character_id: target,
            name: sheet.name,
            applied_effects: applied,
        }))
    }

    /// Advance one turn for `id` under its row lease
    #[instrument(skip(self))]
    pub async fn take_turn(&self, id: CharacterId) -> Result<(CharacterSheet, TurnReport), ActionError> {
        let _lease = self.characters.lock(id).await?;
        let mut sheet = self.load(id).await?;
        let report = process_turn(&mut sheet);
        self.characters.save(&sheet).await?;

        if !report.expired.is_empty() || report.health_delta != 0 {
            debug!(
                character_id = %id,
                expired = report.expired.len(),
                health_delta = report.health_delta,
                "Processed turn"
            );
        }
        Ok((sheet, report))
    }

    /// Standalone turn, e.g. when a character passes
    pub async fn process_turn(&self, id: CharacterId) -> Result<EffectStateDto, ActionError> {
        let (sheet, report) = self.take_turn(id).await?;
        Ok(EffectStateDto::new(
            sheet.id,
            sheet.current_health,
            &sheet.active_effects,
            sheet.live_stats.clone(),
            &report.expired,
        ))
    }

    /// End the scene for every listed character.
    ///
    /// Unknown characters are skipped; the scene still ends for the rest.
    #[instrument(skip(self, characters), fields(count = characters.len()))]
    pub async fn clear_scene(
        &self,
        characters: &[CharacterId],
    ) -> Result<Vec<EffectStateDto>, ActionError> {
        let mut cleared = Vec::with_capacity(characters.len());
        for &id in characters {
            let _lease = self.characters.lock(id).await?;
            let Some(mut sheet) = self.characters.get(id).await? else {
                warn!(character_id = %id, "Skipping scene clear for unknown character");
                continue;
            };
            let removed = clear_scene(&mut sheet);
            self.characters.save(&sheet).await?;
            cleared.push(EffectStateDto::new(
                id,
                sheet.current_health,
                &sheet.active_effects,
                sheet.live_stats.clone(),
                &removed,
            ));
        }

        info!(characters = cleared.len(), "Scene ended");
        Ok(cleared)
    }

    /// Explicitly remove an effect from a character
    #[instrument(skip(self))]
    pub async fn remove_effect(
        &self,
        id: CharacterId,
        effect: &EffectKey,
    ) -> Result<EffectStateDto, ActionError> {
        let _lease = self.characters.lock(id).await?;
        let mut sheet = self.load(id).await?;
        let removed = remove_effect(&mut sheet, effect);
        if !removed.is_empty() {
            self.characters.save(&sheet).await?;
            info!(character_id = %id, effect = %effect, "Removed effect");
        }
        Ok(EffectStateDto::new(
            id,
            sheet.current_health,
            &sheet.active_effects,
            sheet.live_stats.clone(),
            &removed,
        ))
    }
}
