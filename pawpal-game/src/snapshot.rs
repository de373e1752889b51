//! Flat persisted representation of a pet.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::achievements::AchievementId;
use crate::pet::{Pet, RestoredPet, Stats};
use crate::species::Species;

/// Snapshot written under the single save key.
///
/// Field names follow the camelCase record format; saves written by the
/// earlier JavaScript build (`type`, `age`, `birthDate`, `achievements`) are
/// accepted through aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetSnapshot {
    #[serde(alias = "type")]
    pub species: Species,
    pub name: String,
    pub hunger: f64,
    pub happiness: f64,
    pub energy: f64,
    #[serde(default, alias = "age")]
    pub age_in_days: u32,
    #[serde(alias = "birthDate")]
    pub birth_timestamp: i64,
    #[serde(default, alias = "achievements")]
    pub unlocked_achievements: Vec<AchievementId>,
    #[serde(default)]
    pub is_sleeping: bool,
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot JSON invalid: {0}")]
    Json(#[from] serde_json::Error),
    #[error("snapshot attribute {field} is not a finite number")]
    NonFinite { field: &'static str },
    #[error("snapshot name is empty")]
    EmptyName,
}

impl PetSnapshot {
    #[must_use]
    pub fn capture(pet: &Pet) -> Self {
        let stats = pet.stats();
        Self {
            species: pet.species(),
            name: pet.name().to_string(),
            hunger: stats.hunger,
            happiness: stats.happiness,
            energy: stats.energy,
            age_in_days: pet.age_days(),
            birth_timestamp: pet.birth_ms(),
            unlocked_achievements: pet.achievements().to_vec(),
            is_sleeping: pet.is_sleeping(),
        }
    }

    /// Reject values a well-formed save can never contain.
    ///
    /// # Errors
    ///
    /// Returns an error for non-finite attributes or an empty name.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        for (field, value) in [
            ("hunger", self.hunger),
            ("happiness", self.happiness),
            ("energy", self.energy),
        ] {
            if !value.is_finite() {
                return Err(SnapshotError::NonFinite { field });
            }
        }
        if self.name.trim().is_empty() {
            return Err(SnapshotError::EmptyName);
        }
        Ok(())
    }

    /// Rebuild the pet; decay restarts from `now_ms` so offline time is not
    /// replayed.
    #[must_use]
    pub fn into_pet(self, now_ms: i64) -> Pet {
        Pet::restore(
            RestoredPet {
                species: self.species,
                name: self.name,
                stats: Stats {
                    hunger: self.hunger,
                    happiness: self.happiness,
                    energy: self.energy,
                },
                age_days: self.age_in_days,
                birth_ms: self.birth_timestamp,
                sleeping: self.is_sleeping,
                achievements: self.unlocked_achievements,
            },
            now_ms,
        )
    }

    /// Serialize to the JSON record stored by hosts.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse and validate a stored JSON record.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or fails validation.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }
}
