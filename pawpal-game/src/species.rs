//! Species catalog: name pools and face glyph tables.
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Cat,
    Dog,
    Rabbit,
    Hamster,
}

impl Species {
    /// All species in selection-screen order.
    pub const ALL: [Self; 4] = [Self::Cat, Self::Dog, Self::Rabbit, Self::Hamster];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cat => "cat",
            Self::Dog => "dog",
            Self::Rabbit => "rabbit",
            Self::Hamster => "hamster",
        }
    }

    #[must_use]
    pub fn profile(self) -> &'static SpeciesProfile {
        match self {
            Self::Cat => &CAT,
            Self::Dog => &DOG,
            Self::Rabbit => &RABBIT,
            Self::Hamster => &HAMSTER,
        }
    }

    /// Glyph shown on the species-selection card.
    #[must_use]
    pub fn badge(self) -> &'static str {
        self.profile().badge
    }

    #[must_use]
    pub fn face(self, category: FaceCategory) -> &'static str {
        self.profile().face(category)
    }

    /// Pick a default name from this species' pool.
    pub fn random_name<R: Rng + ?Sized>(self, rng: &mut R) -> &'static str {
        self.profile()
            .names
            .choose(rng)
            .copied()
            .unwrap_or(self.profile().badge)
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Species {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cat" => Ok(Self::Cat),
            "dog" => Ok(Self::Dog),
            "rabbit" => Ok(Self::Rabbit),
            "hamster" => Ok(Self::Hamster),
            _ => Err(()),
        }
    }
}

impl From<Species> for String {
    fn from(value: Species) -> Self {
        value.as_str().to_string()
    }
}

/// Reduced set of expressions a species can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FaceCategory {
    Happy,
    Hungry,
    Sleepy,
    Normal,
    VeryHungry,
    VeryHappy,
    Sleeping,
}

/// Static per-species data: a default name pool and a face table.
#[derive(Debug)]
pub struct SpeciesProfile {
    pub badge: &'static str,
    pub names: &'static [&'static str],
    pub faces: &'static [(FaceCategory, &'static str)],
}

impl SpeciesProfile {
    /// Glyph for `category`, falling back to the normal face, then the badge.
    #[must_use]
    pub fn face(&self, category: FaceCategory) -> &'static str {
        self.lookup(category)
            .or_else(|| self.lookup(FaceCategory::Normal))
            .unwrap_or(self.badge)
    }

    fn lookup(&self, category: FaceCategory) -> Option<&'static str> {
        self.faces
            .iter()
            .find(|(cat, _)| *cat == category)
            .map(|(_, glyph)| *glyph)
    }
}

static CAT: SpeciesProfile = SpeciesProfile {
    badge: "🐱",
    names: &["Whiskers", "Shadow", "Luna", "Oliver", "Bella"],
    faces: &[
        (FaceCategory::Happy, "😸"),
        (FaceCategory::Hungry, "😿"),
        (FaceCategory::Sleepy, "😴"),
        (FaceCategory::Normal, "🐱"),
        (FaceCategory::VeryHungry, "😾"),
        (FaceCategory::VeryHappy, "😺"),
        (FaceCategory::Sleeping, "😴"),
    ],
};

static DOG: SpeciesProfile = SpeciesProfile {
    badge: "🐕",
    names: &["Buddy", "Max", "Daisy", "Rocky", "Lucy"],
    faces: &[
        (FaceCategory::Happy, "🐶"),
        (FaceCategory::Hungry, "🥺"),
        (FaceCategory::Sleepy, "😴"),
        (FaceCategory::Normal, "🐕"),
        (FaceCategory::VeryHungry, "😢"),
        (FaceCategory::VeryHappy, "😄"),
        (FaceCategory::Sleeping, "😴"),
    ],
};

static RABBIT: SpeciesProfile = SpeciesProfile {
    badge: "🐰",
    names: &["Bunny", "Hoppy", "Cotton", "Thumper", "Snowball"],
    faces: &[
        (FaceCategory::Happy, "🐰"),
        (FaceCategory::Hungry, "😔"),
        (FaceCategory::Sleepy, "😴"),
        (FaceCategory::Normal, "🐰"),
        (FaceCategory::VeryHungry, "😞"),
        (FaceCategory::VeryHappy, "😊"),
        (FaceCategory::Sleeping, "😴"),
    ],
};

static HAMSTER: SpeciesProfile = SpeciesProfile {
    badge: "🐹",
    names: &["Nibbles", "Peanut", "Chewy", "Pip", "Tiny"],
    faces: &[
        (FaceCategory::Happy, "🐹"),
        (FaceCategory::Hungry, "😟"),
        (FaceCategory::Sleepy, "😴"),
        (FaceCategory::Normal, "🐹"),
        (FaceCategory::VeryHungry, "😰"),
        (FaceCategory::VeryHappy, "😃"),
        (FaceCategory::Sleeping, "😴"),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn species_round_trip_through_str() {
        for species in Species::ALL {
            assert_eq!(species.as_str().parse::<Species>(), Ok(species));
            assert_eq!(String::from(species), species.to_string());
        }
        assert!("dragon".parse::<Species>().is_err());
    }

    #[test]
    fn random_name_comes_from_pool() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        for species in Species::ALL {
            for _ in 0..20 {
                let name = species.random_name(&mut rng);
                assert!(species.profile().names.contains(&name));
            }
        }
    }

    #[test]
    fn every_species_covers_every_face() {
        let categories = [
            FaceCategory::Happy,
            FaceCategory::Hungry,
            FaceCategory::Sleepy,
            FaceCategory::Normal,
            FaceCategory::VeryHungry,
            FaceCategory::VeryHappy,
            FaceCategory::Sleeping,
        ];
        for species in Species::ALL {
            for category in categories {
                assert!(species.profile().lookup(category).is_some());
            }
        }
        assert_eq!(Species::Cat.face(FaceCategory::VeryHungry), "😾");
        assert_eq!(Species::Dog.face(FaceCategory::Normal), "🐕");
    }

    #[test]
    fn missing_face_falls_back_to_normal() {
        let sparse = SpeciesProfile {
            badge: "?",
            names: &[],
            faces: &[(FaceCategory::Normal, "N")],
        };
        assert_eq!(sparse.face(FaceCategory::Hungry), "N");
        let empty = SpeciesProfile {
            badge: "?",
            names: &[],
            faces: &[],
        };
        assert_eq!(empty.face(FaceCategory::Happy), "?");
    }
}
