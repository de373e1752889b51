//! Render-ready projection of the pet for the presentation layer.
use serde::Serialize;

use crate::mood::PetState;
use crate::numbers::round_stat_pct;
use crate::pet::Pet;
use crate::species::Species;
use crate::tuning::PetTuning;

const SLEEP_LABEL: &str = "Sleep";
const WAKE_LABEL: &str = "Wake Up";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderView {
    pub species: Species,
    pub name: String,
    /// Raw attribute values, suitable for bar widths.
    pub hunger: f64,
    pub happiness: f64,
    pub energy: f64,
    /// Rounded percentages for labels.
    pub hunger_pct: u8,
    pub happiness_pct: u8,
    pub energy_pct: u8,
    pub age_days: u32,
    pub state: PetState,
    pub mood: &'static str,
    pub face: &'static str,
    pub face_changed: bool,
    pub sleeping: bool,
    pub sleep_label: &'static str,
    pub can_play: bool,
}

impl RenderView {
    /// Project `pet`; `previous_face` is the glyph from the last render.
    #[must_use]
    pub fn project(pet: &Pet, tuning: &PetTuning, previous_face: Option<&str>) -> Self {
        let stats = pet.stats();
        let state = pet.state();
        let face = state.face(pet.species());
        let sleeping = pet.is_sleeping();
        Self {
            species: pet.species(),
            name: pet.name().to_string(),
            hunger: stats.hunger,
            happiness: stats.happiness,
            energy: stats.energy,
            hunger_pct: round_stat_pct(stats.hunger),
            happiness_pct: round_stat_pct(stats.happiness),
            energy_pct: round_stat_pct(stats.energy),
            age_days: pet.age_days(),
            state,
            mood: state.mood_label(),
            face,
            face_changed: previous_face != Some(face),
            sleeping,
            sleep_label: if sleeping { WAKE_LABEL } else { SLEEP_LABEL },
            can_play: pet.can_play(tuning),
        }
    }
}
