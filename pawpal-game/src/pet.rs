//! The pet model: bounded attributes, time decay, and interactions.
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::achievements::{self, AchievementId, Unlocks};
use crate::constants::STARTING_STAT;
use crate::mood::PetState;
use crate::numbers::{clamp_stat, elapsed_seconds, sanitize_elapsed, whole_days_between};
use crate::species::Species;
use crate::tuning::{Effect, PetTuning};

/// The three bounded attributes, each kept in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub hunger: f64,
    pub happiness: f64,
    pub energy: f64,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            hunger: STARTING_STAT,
            happiness: STARTING_STAT,
            energy: STARTING_STAT,
        }
    }
}

impl Stats {
    pub fn clamp(&mut self) {
        self.hunger = clamp_stat(self.hunger);
        self.happiness = clamp_stat(self.happiness);
        self.energy = clamp_stat(self.energy);
    }

    /// Apply a signed delta to each attribute and clamp.
    pub fn apply(&mut self, effect: Effect) {
        self.hunger += effect.hunger;
        self.happiness += effect.happiness;
        self.energy += effect.energy;
        self.clamp();
    }
}

/// Why an interaction was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refusal {
    Sleeping,
    TooTired,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pet {
    species: Species,
    name: String,
    stats: Stats,
    age_days: u32,
    birth_ms: i64,
    last_update_ms: i64,
    sleeping: bool,
    achievements: Vec<AchievementId>,
}

impl Pet {
    /// Create a newborn pet. A missing or blank name is drawn from the
    /// species pool.
    pub fn new<R: Rng + ?Sized>(
        species: Species,
        name: Option<&str>,
        now_ms: i64,
        rng: &mut R,
    ) -> Self {
        let name = match name.map(str::trim) {
            Some(explicit) if !explicit.is_empty() => explicit.to_string(),
            _ => species.random_name(rng).to_string(),
        };
        Self {
            species,
            name,
            stats: Stats::default(),
            age_days: 0,
            birth_ms: now_ms,
            last_update_ms: now_ms,
            sleeping: false,
            achievements: Vec::new(),
        }
    }

    /// Rebuild a pet from persisted values. Attributes are clamped and
    /// duplicate achievement ids dropped; decay resumes from `now_ms`.
    #[must_use]
    pub fn restore(parts: RestoredPet, now_ms: i64) -> Self {
        let mut stats = parts.stats;
        stats.clamp();
        let mut achievements = Vec::with_capacity(parts.achievements.len());
        for id in parts.achievements {
            if !achievements.contains(&id) {
                achievements.push(id);
            }
        }
        Self {
            species: parts.species,
            name: parts.name,
            stats,
            age_days: parts.age_days,
            birth_ms: parts.birth_ms,
            last_update_ms: now_ms,
            sleeping: parts.sleeping,
            achievements,
        }
    }

    /// Advance to `now_ms`, decaying by the wall-clock time since the last
    /// update.
    pub fn tick(&mut self, now_ms: i64, tuning: &PetTuning) -> Unlocks {
        let elapsed = elapsed_seconds(self.last_update_ms, now_ms);
        self.last_update_ms = now_ms;
        self.advance(elapsed, now_ms, tuning)
    }

    /// Apply `elapsed_secs` of decay or regeneration, recompute age against
    /// `now_ms`, and grant any newly met achievements.
    pub fn advance(&mut self, elapsed_secs: f64, now_ms: i64, tuning: &PetTuning) -> Unlocks {
        let elapsed = sanitize_elapsed(elapsed_secs);
        let rates = tuning.rates(self.sleeping);
        self.stats.apply(Effect::new(
            rates.hunger * elapsed,
            rates.happiness * elapsed,
            rates.energy * elapsed,
        ));
        self.age_days = whole_days_between(self.birth_ms, now_ms);
        let unlocks = achievements::evaluate(self.age_days, &self.stats, &mut self.achievements);
        log::trace!(
            "{} advanced {elapsed:.2}s -> hunger {:.1}, happiness {:.1}, energy {:.1} ({})",
            self.name,
            self.stats.hunger,
            self.stats.happiness,
            self.stats.energy,
            self.state()
        );
        unlocks
    }

    /// Feed the pet.
    ///
    /// # Errors
    ///
    /// Refuses while the pet is asleep.
    pub fn feed(&mut self, tuning: &PetTuning) -> Result<(), Refusal> {
        if self.sleeping {
            return Err(Refusal::Sleeping);
        }
        self.stats.apply(tuning.feed);
        Ok(())
    }

    /// Play with the pet.
    ///
    /// # Errors
    ///
    /// Refuses while asleep or when energy is below the play minimum.
    pub fn play(&mut self, tuning: &PetTuning) -> Result<(), Refusal> {
        if self.stats.energy < tuning.play_min_energy {
            return Err(Refusal::TooTired);
        }
        if self.sleeping {
            return Err(Refusal::Sleeping);
        }
        self.stats.apply(tuning.play);
        Ok(())
    }

    /// Flip the sleep flag. Attributes are untouched until the next advance.
    pub fn toggle_sleep(&mut self) -> bool {
        self.sleeping = !self.sleeping;
        self.sleeping
    }

    /// Click affection.
    ///
    /// # Errors
    ///
    /// Refuses while the pet is asleep.
    pub fn pet(&mut self, tuning: &PetTuning) -> Result<(), Refusal> {
        if self.sleeping {
            return Err(Refusal::Sleeping);
        }
        self.stats.apply(Effect::new(0.0, tuning.pet_happiness, 0.0));
        Ok(())
    }

    /// Hidden happiness boost; allowed asleep or awake.
    pub fn boost_happiness(&mut self, tuning: &PetTuning) {
        self.stats.apply(Effect::new(0.0, tuning.secret_boost, 0.0));
    }

    /// Hidden energy boost; allowed asleep or awake.
    pub fn boost_energy(&mut self, tuning: &PetTuning) {
        self.stats.apply(Effect::new(0.0, 0.0, tuning.secret_boost));
    }

    #[must_use]
    pub fn state(&self) -> PetState {
        PetState::derive(&self.stats, self.sleeping)
    }

    #[must_use]
    pub fn mood(&self) -> &'static str {
        self.state().mood_label()
    }

    #[must_use]
    pub fn face(&self) -> &'static str {
        self.state().face(self.species)
    }

    #[must_use]
    pub fn can_play(&self, tuning: &PetTuning) -> bool {
        self.stats.energy >= tuning.play_min_energy
    }

    #[must_use]
    pub const fn species(&self) -> Species {
        self.species
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn stats(&self) -> Stats {
        self.stats
    }

    #[must_use]
    pub const fn age_days(&self) -> u32 {
        self.age_days
    }

    #[must_use]
    pub const fn birth_ms(&self) -> i64 {
        self.birth_ms
    }

    #[must_use]
    pub const fn last_update_ms(&self) -> i64 {
        self.last_update_ms
    }

    #[must_use]
    pub const fn is_sleeping(&self) -> bool {
        self.sleeping
    }

    #[must_use]
    pub fn achievements(&self) -> &[AchievementId] {
        &self.achievements
    }

    #[cfg(test)]
    pub(crate) fn set_stats(&mut self, stats: Stats) {
        self.stats = stats;
        self.stats.clamp();
    }
}

/// Persisted values a pet is rebuilt from.
#[derive(Debug, Clone, PartialEq)]
pub struct RestoredPet {
    pub species: Species,
    pub name: String,
    pub stats: Stats,
    pub age_days: u32,
    pub birth_ms: i64,
    pub sleeping: bool,
    pub achievements: Vec<AchievementId>,
}
