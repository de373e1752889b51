//! Derived state, mood labels, and face selection.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{
    HAPPY_ABOVE, HUNGRY_ABOVE, SLEEPY_BELOW, VERY_HAPPY_ABOVE, VERY_HUNGRY_ABOVE,
    VERY_SLEEPY_BELOW,
};
use crate::pet::Stats;
use crate::species::{FaceCategory, Species};

/// Mutually exclusive condition derived from the pet's attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum PetState {
    Sleeping,
    VeryHungry,
    Hungry,
    VerySleepy,
    Sleepy,
    VeryHappy,
    Happy,
    #[default]
    Normal,
}

impl PetState {
    /// Evaluate the state with the fixed precedence: sleep, then hunger,
    /// then energy, then happiness.
    #[must_use]
    pub fn derive(stats: &Stats, sleeping: bool) -> Self {
        if sleeping {
            Self::Sleeping
        } else if stats.hunger > VERY_HUNGRY_ABOVE {
            Self::VeryHungry
        } else if stats.hunger > HUNGRY_ABOVE {
            Self::Hungry
        } else if stats.energy < VERY_SLEEPY_BELOW {
            Self::VerySleepy
        } else if stats.energy < SLEEPY_BELOW {
            Self::Sleepy
        } else if stats.happiness > VERY_HAPPY_ABOVE {
            Self::VeryHappy
        } else if stats.happiness > HAPPY_ABOVE {
            Self::Happy
        } else {
            Self::Normal
        }
    }

    /// Identifier used by the presentation layer for style classes.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sleeping => "sleeping",
            Self::VeryHungry => "veryHungry",
            Self::Hungry => "hungry",
            Self::VerySleepy => "verySleepy",
            Self::Sleepy => "sleepy",
            Self::VeryHappy => "veryHappy",
            Self::Happy => "happy",
            Self::Normal => "normal",
        }
    }

    #[must_use]
    pub const fn mood_label(self) -> &'static str {
        match self {
            Self::VeryHungry => "Starving",
            Self::Hungry => "Hungry",
            Self::VerySleepy => "Exhausted",
            Self::Sleepy => "Sleepy",
            Self::VeryHappy => "Ecstatic",
            Self::Happy => "Happy",
            Self::Sleeping => "Sleeping",
            Self::Normal => "Content",
        }
    }

    /// Collapse into the face categories a species table provides.
    #[must_use]
    pub const fn face_category(self) -> FaceCategory {
        match self {
            Self::Sleeping => FaceCategory::Sleeping,
            Self::VeryHungry => FaceCategory::VeryHungry,
            Self::Hungry => FaceCategory::Hungry,
            Self::VerySleepy | Self::Sleepy => FaceCategory::Sleepy,
            Self::VeryHappy => FaceCategory::VeryHappy,
            Self::Happy => FaceCategory::Happy,
            Self::Normal => FaceCategory::Normal,
        }
    }

    #[must_use]
    pub fn face(self, species: Species) -> &'static str {
        species.face(self.face_category())
    }
}

impl fmt::Display for PetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PetState {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sleeping" => Ok(Self::Sleeping),
            "veryHungry" => Ok(Self::VeryHungry),
            "hungry" => Ok(Self::Hungry),
            "verySleepy" => Ok(Self::VerySleepy),
            "sleepy" => Ok(Self::Sleepy),
            "veryHappy" => Ok(Self::VeryHappy),
            "happy" => Ok(Self::Happy),
            "normal" => Ok(Self::Normal),
            _ => Err(()),
        }
    }
}
