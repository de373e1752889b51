//! Balance configuration for decay rates, interaction effects, and timers.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    ASLEEP_ENERGY_PER_SEC, ASLEEP_HAPPINESS_PER_SEC, ASLEEP_HUNGER_PER_SEC, AUTOSAVE_PERIOD_MS,
    AWAKE_ENERGY_PER_SEC, AWAKE_HAPPINESS_PER_SEC, AWAKE_HUNGER_PER_SEC, FEED_ENERGY,
    FEED_HAPPINESS, FEED_HUNGER, PET_HAPPINESS, PLAY_ENERGY, PLAY_HAPPINESS, PLAY_HUNGER,
    PLAY_MIN_ENERGY, SECRET_BOOST, STAT_MAX, TICK_PERIOD_MS,
};

const DEFAULT_TUNING_DATA: &str = include_str!("../../pawpal-web/static/assets/data/tuning.json");

/// Per-second attribute drift for one activity level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecayRates {
    pub hunger: f64,
    pub happiness: f64,
    pub energy: f64,
}

impl DecayRates {
    const fn awake() -> Self {
        Self {
            hunger: AWAKE_HUNGER_PER_SEC,
            happiness: AWAKE_HAPPINESS_PER_SEC,
            energy: AWAKE_ENERGY_PER_SEC,
        }
    }

    const fn asleep() -> Self {
        Self {
            hunger: ASLEEP_HUNGER_PER_SEC,
            happiness: ASLEEP_HAPPINESS_PER_SEC,
            energy: ASLEEP_ENERGY_PER_SEC,
        }
    }
}

/// Signed attribute deltas applied by a single interaction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Effect {
    #[serde(default)]
    pub hunger: f64,
    #[serde(default)]
    pub happiness: f64,
    #[serde(default)]
    pub energy: f64,
}

impl Effect {
    #[must_use]
    pub const fn new(hunger: f64, happiness: f64, energy: f64) -> Self {
        Self {
            hunger,
            happiness,
            energy,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetTuning {
    #[serde(default = "DecayRates::awake")]
    pub awake: DecayRates,
    #[serde(default = "DecayRates::asleep")]
    pub asleep: DecayRates,
    #[serde(default = "PetTuning::default_feed")]
    pub feed: Effect,
    #[serde(default = "PetTuning::default_play")]
    pub play: Effect,
    #[serde(default = "PetTuning::default_play_min_energy")]
    pub play_min_energy: f64,
    #[serde(default = "PetTuning::default_pet_happiness")]
    pub pet_happiness: f64,
    #[serde(default = "PetTuning::default_secret_boost")]
    pub secret_boost: f64,
    #[serde(default = "PetTuning::default_tick_period_ms")]
    pub tick_period_ms: u32,
    #[serde(default = "PetTuning::default_autosave_period_ms")]
    pub autosave_period_ms: u32,
}

/// Errors raised when tuning invariants are violated.
#[derive(Debug, Error, PartialEq)]
pub enum TuningError {
    #[error("{field} must be finite (got {value})")]
    NonFinite { field: &'static str, value: f64 },
    #[error("{field} must be between {min:.2} and {max:.2} (got {value:.2})")]
    RangeViolation {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
    #[error("tick period must be positive")]
    ZeroTickPeriod,
    #[error("autosave period {autosave_ms}ms is shorter than tick period {tick_ms}ms")]
    AutosaveTooFrequent { autosave_ms: u32, tick_ms: u32 },
    #[error("tuning JSON invalid: {0}")]
    Parse(String),
}

impl Default for PetTuning {
    fn default() -> Self {
        Self {
            awake: DecayRates::awake(),
            asleep: DecayRates::asleep(),
            feed: Self::default_feed(),
            play: Self::default_play(),
            play_min_energy: Self::default_play_min_energy(),
            pet_happiness: Self::default_pet_happiness(),
            secret_boost: Self::default_secret_boost(),
            tick_period_ms: Self::default_tick_period_ms(),
            autosave_period_ms: Self::default_autosave_period_ms(),
        }
    }
}

impl PetTuning {
    const fn default_feed() -> Effect {
        Effect::new(FEED_HUNGER, FEED_HAPPINESS, FEED_ENERGY)
    }

    const fn default_play() -> Effect {
        Effect::new(PLAY_HUNGER, PLAY_HAPPINESS, PLAY_ENERGY)
    }

    const fn default_play_min_energy() -> f64 {
        PLAY_MIN_ENERGY
    }

    const fn default_pet_happiness() -> f64 {
        PET_HAPPINESS
    }

    const fn default_secret_boost() -> f64 {
        SECRET_BOOST
    }

    const fn default_tick_period_ms() -> u32 {
        TICK_PERIOD_MS
    }

    const fn default_autosave_period_ms() -> u32 {
        AUTOSAVE_PERIOD_MS
    }

    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(DEFAULT_TUNING_DATA).unwrap_or_default()
    }

    #[must_use]
    pub fn default_config() -> Self {
        Self::load_from_static()
    }

    /// Parse tuning from JSON and validate it.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or any value is out of range.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self =
            serde_json::from_str(json).map_err(|err| TuningError::Parse(err.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check every value is finite and within sane bounds.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), TuningError> {
        let rates = [
            ("awake.hunger", self.awake.hunger),
            ("awake.happiness", self.awake.happiness),
            ("awake.energy", self.awake.energy),
            ("asleep.hunger", self.asleep.hunger),
            ("asleep.happiness", self.asleep.happiness),
            ("asleep.energy", self.asleep.energy),
            ("feed.hunger", self.feed.hunger),
            ("feed.happiness", self.feed.happiness),
            ("feed.energy", self.feed.energy),
            ("play.hunger", self.play.hunger),
            ("play.happiness", self.play.happiness),
            ("play.energy", self.play.energy),
        ];
        for (field, value) in rates {
            ensure_finite(field, value)?;
            ensure_range(field, value, -STAT_MAX, STAT_MAX)?;
        }
        for (field, value) in [
            ("play_min_energy", self.play_min_energy),
            ("pet_happiness", self.pet_happiness),
            ("secret_boost", self.secret_boost),
        ] {
            ensure_finite(field, value)?;
            ensure_range(field, value, 0.0, STAT_MAX)?;
        }
        if self.tick_period_ms == 0 {
            return Err(TuningError::ZeroTickPeriod);
        }
        if self.autosave_period_ms < self.tick_period_ms {
            return Err(TuningError::AutosaveTooFrequent {
                autosave_ms: self.autosave_period_ms,
                tick_ms: self.tick_period_ms,
            });
        }
        Ok(())
    }

    /// Rates in effect for the given sleep flag.
    #[must_use]
    pub const fn rates(&self, sleeping: bool) -> DecayRates {
        if sleeping { self.asleep } else { self.awake }
    }
}

fn ensure_finite(field: &'static str, value: f64) -> Result<(), TuningError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(TuningError::NonFinite { field, value })
    }
}

fn ensure_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), TuningError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(TuningError::RangeViolation {
            field,
            min,
            max,
            value,
        })
    }
}
