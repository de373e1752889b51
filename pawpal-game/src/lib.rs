//! Pawpal Pet Engine
//!
//! Platform-agnostic core for the Pawpal virtual pet.
//! This crate provides the pet model and session controller without UI or
//! platform-specific dependencies; hosts plug in storage, time, timers, and
//! rendering through the traits below.

pub mod achievements;
pub mod constants;
pub mod host;
pub mod intent;
pub mod mood;
pub mod numbers;
pub mod pet;
pub mod session;
pub mod snapshot;
pub mod species;
pub mod tuning;
pub mod view;

// Re-export commonly used types
pub use achievements::{Achievement, AchievementId, Unlocks};
pub use intent::{Intent, IntentOutcome, Notice, NoticeKind};
pub use mood::PetState;
pub use pet::{Pet, Refusal, Stats};
pub use session::SessionController;
pub use snapshot::{PetSnapshot, SnapshotError};
pub use species::{FaceCategory, Species, SpeciesProfile};
pub use tuning::{DecayRates, Effect, PetTuning, TuningError};
pub use view::RenderView;

/// Source of wall-clock time in epoch milliseconds.
pub trait Clock {
    fn now_ms(&self) -> i64;
}

/// Trait for abstracting save/load of the pet snapshot.
/// Platform-specific implementations should provide this
pub trait PetStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Save the snapshot under `key`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    fn save_pet(&self, key: &str, snapshot: &PetSnapshot) -> Result<(), Self::Error>;

    /// Load the snapshot stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored record cannot be read or parsed.
    fn load_pet(&self, key: &str) -> Result<Option<PetSnapshot>, Self::Error>;

    /// Delete the snapshot stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be removed.
    fn delete_pet(&self, key: &str) -> Result<(), Self::Error>;
}

/// Recurring schedules owned by the session controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerKind {
    /// Decay, render, and persist.
    Tick,
    /// Persistence-only safety net.
    Autosave,
}

/// Host timer facility. Implementations call back into
/// [`SessionController::on_timer`] each time a running schedule fires.
pub trait Ticker {
    /// Start (or restart) the schedule for `kind` with the given period.
    fn start(&mut self, kind: TimerKind, period_ms: u32);
    fn stop(&mut self, kind: TimerKind);
    fn is_running(&self, kind: TimerKind) -> bool;
}

/// Presentation collaborator that displays the pet.
pub trait PetView {
    fn render(&mut self, view: &RenderView);
    fn notify(&mut self, notice: &Notice);
    /// No pet exists; show the species picker.
    fn show_species_selection(&mut self);
}
