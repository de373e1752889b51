//! Session controller: timers, persistence, and intent dispatch.
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::constants::{
    MSG_FED, MSG_FELL_ASLEEP, MSG_NO_PET, MSG_PETTED, MSG_PLAYED, MSG_RESET_CANCELLED,
    MSG_RESET_DONE, MSG_SECRET_ENERGY, MSG_SECRET_HAPPINESS, MSG_SLEEPING, MSG_TOO_TIRED,
    MSG_WOKE_UP, SAVE_KEY, TITLE_BLOCKED, TITLE_PET_LOVE, TITLE_RESET, TITLE_SECRET,
    TITLE_SUCCESS, TITLE_WELCOME,
};
use crate::intent::{Intent, IntentOutcome, Notice, NoticeKind};
use crate::pet::{Pet, Refusal};
use crate::snapshot::PetSnapshot;
use crate::species::Species;
use crate::tuning::PetTuning;
use crate::view::RenderView;
use crate::{Clock, PetStorage, PetView, Ticker, TimerKind};

/// Owns the single pet and everything that drives it.
///
/// The pet exists between species selection (or a successful restore) and a
/// confirmed reset. While it exists the tick schedule runs; the autosave
/// schedule runs for the whole session and is a no-op without a pet.
pub struct SessionController<S, C, T, V>
where
    S: PetStorage,
    C: Clock,
    T: Ticker,
    V: PetView,
{
    storage: S,
    clock: C,
    ticker: T,
    view: V,
    tuning: PetTuning,
    rng: ChaCha20Rng,
    pet: Option<Pet>,
    last_face: Option<&'static str>,
}

impl<S, C, T, V> SessionController<S, C, T, V>
where
    S: PetStorage,
    C: Clock,
    T: Ticker,
    V: PetView,
{
    /// Create a controller with no pet. `seed` drives default-name picks.
    pub fn new(storage: S, clock: C, ticker: T, view: V, tuning: PetTuning, seed: u64) -> Self {
        Self {
            storage,
            clock,
            ticker,
            view,
            tuning,
            rng: ChaCha20Rng::seed_from_u64(seed),
            pet: None,
            last_face: None,
        }
    }

    /// Start the session: schedule autosave and resume a saved pet if one
    /// exists. Returns whether a pet was restored.
    pub fn boot(&mut self) -> bool {
        self.ticker.start(TimerKind::Autosave, self.tuning.autosave_period_ms);
        let now = self.clock.now_ms();
        match self.storage.load_pet(SAVE_KEY) {
            Ok(Some(snapshot)) => {
                let pet = snapshot.into_pet(now);
                log::info!(
                    "restored {} the {} (age {} days)",
                    pet.name(),
                    pet.species(),
                    pet.age_days()
                );
                self.adopt(pet);
                true
            }
            Ok(None) => {
                log::info!("no saved pet; awaiting species selection");
                self.view.show_species_selection();
                false
            }
            Err(err) => {
                log::warn!("saved pet unreadable, starting fresh: {err}");
                self.view.show_species_selection();
                false
            }
        }
    }

    /// Route a timer firing to its handler.
    pub fn on_timer(&mut self, kind: TimerKind) {
        match kind {
            TimerKind::Tick => self.on_tick(),
            TimerKind::Autosave => self.on_autosave(),
        }
    }

    /// Advance the pet by the wall-clock time since its last update, then
    /// announce unlocks, render, and persist.
    pub fn on_tick(&mut self) {
        let now = self.clock.now_ms();
        let Some(pet) = self.pet.as_mut() else {
            return;
        };
        let unlocks = pet.tick(now, &self.tuning);
        for achievement in unlocks {
            log::info!("{} unlocked {}", pet.name(), achievement.id);
            self.view.notify(&Notice::from(achievement));
        }
        self.render();
        self.persist();
    }

    /// Persistence-only snapshot.
    pub fn on_autosave(&mut self) {
        self.persist();
    }

    /// Dispatch an intent synchronously into the pet model.
    pub fn dispatch(&mut self, intent: Intent) -> IntentOutcome {
        log::debug!("intent {}", intent.label());
        match intent {
            Intent::SelectSpecies { species, name } => self.select_species(species, name.as_deref()),
            Intent::Feed => self.interact(Action::Feed),
            Intent::Play => self.interact(Action::Play),
            Intent::ToggleSleep => self.interact(Action::ToggleSleep),
            Intent::PetClicked => self.interact(Action::Pet),
            Intent::SecretHappiness => self.interact(Action::SecretHappiness),
            Intent::SecretEnergy => self.interact(Action::SecretEnergy),
            Intent::Reset { confirmed } => self.reset(confirmed),
        }
    }

    /// Create a new pet of `species`, replacing any current one, and start
    /// ticking.
    pub fn select_species(&mut self, species: Species, name: Option<&str>) -> IntentOutcome {
        let now = self.clock.now_ms();
        let pet = Pet::new(species, name, now, &mut self.rng);
        log::info!("adopted {} the {species}", pet.name());
        let outcome = IntentOutcome::success(TITLE_WELCOME, format!("Say hello to {}!", pet.name()));
        self.view.notify(&outcome.notice);
        self.adopt(pet);
        self.persist();
        outcome
    }

    pub fn feed(&mut self) -> IntentOutcome {
        self.interact(Action::Feed)
    }

    pub fn play(&mut self) -> IntentOutcome {
        self.interact(Action::Play)
    }

    pub fn toggle_sleep(&mut self) -> IntentOutcome {
        self.interact(Action::ToggleSleep)
    }

    pub fn pet_clicked(&mut self) -> IntentOutcome {
        self.interact(Action::Pet)
    }

    /// Discard the pet and its save. Does nothing unless `confirmed`.
    pub fn reset(&mut self, confirmed: bool) -> IntentOutcome {
        if !confirmed {
            return IntentOutcome::failure(TITLE_RESET, MSG_RESET_CANCELLED);
        }
        self.ticker.stop(TimerKind::Tick);
        if let Some(pet) = self.pet.take() {
            log::info!("reset: released {}", pet.name());
        }
        self.last_face = None;
        if let Err(err) = self.storage.delete_pet(SAVE_KEY) {
            log::warn!("failed to clear saved pet: {err}");
        }
        self.view.show_species_selection();
        IntentOutcome::success(TITLE_RESET, MSG_RESET_DONE)
    }

    fn interact(&mut self, action: Action) -> IntentOutcome {
        let tuning = &self.tuning;
        let Some(pet) = self.pet.as_mut() else {
            return IntentOutcome::failure(TITLE_BLOCKED, MSG_NO_PET);
        };
        let (outcome, persist) = match action {
            Action::Feed => (
                refusal_or(pet.feed(tuning), IntentOutcome::success(TITLE_SUCCESS, MSG_FED)),
                true,
            ),
            Action::Play => (
                refusal_or(pet.play(tuning), IntentOutcome::success(TITLE_SUCCESS, MSG_PLAYED)),
                true,
            ),
            Action::ToggleSleep => {
                let message = if pet.toggle_sleep() {
                    MSG_FELL_ASLEEP
                } else {
                    MSG_WOKE_UP
                };
                (IntentOutcome::success(TITLE_SUCCESS, message), true)
            }
            Action::Pet => (
                refusal_or(pet.pet(tuning), IntentOutcome::success(TITLE_PET_LOVE, MSG_PETTED)),
                true,
            ),
            Action::SecretHappiness => {
                pet.boost_happiness(tuning);
                (secret(MSG_SECRET_HAPPINESS), false)
            }
            Action::SecretEnergy => {
                pet.boost_energy(tuning);
                (secret(MSG_SECRET_ENERGY), false)
            }
        };
        self.view.notify(&outcome.notice);
        if outcome.success {
            self.render();
            if persist {
                self.persist();
            }
        }
        outcome
    }

    fn adopt(&mut self, pet: Pet) {
        self.pet = Some(pet);
        self.last_face = None;
        self.ticker.start(TimerKind::Tick, self.tuning.tick_period_ms);
        self.render();
    }

    fn render(&mut self) {
        if let Some(view) = self.render_view() {
            self.last_face = Some(view.face);
            self.view.render(&view);
        }
    }

    fn persist(&self) {
        let Some(snapshot) = self.snapshot() else {
            return;
        };
        if let Err(err) = self.storage.save_pet(SAVE_KEY, &snapshot) {
            log::warn!("failed to save pet: {err}");
        }
    }

    /// Render-ready projection of the current pet.
    #[must_use]
    pub fn render_view(&self) -> Option<RenderView> {
        self.pet
            .as_ref()
            .map(|pet| RenderView::project(pet, &self.tuning, self.last_face))
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<PetSnapshot> {
        self.pet.as_ref().map(PetSnapshot::capture)
    }

    #[must_use]
    pub const fn pet(&self) -> Option<&Pet> {
        self.pet.as_ref()
    }

    #[must_use]
    pub const fn has_pet(&self) -> bool {
        self.pet.is_some()
    }

    #[must_use]
    pub const fn tuning(&self) -> &PetTuning {
        &self.tuning
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    #[must_use]
    pub const fn ticker(&self) -> &T {
        &self.ticker
    }

    #[must_use]
    pub const fn view(&self) -> &V {
        &self.view
    }

    pub const fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }
}

/// Pet-model interactions reachable through [`SessionController::dispatch`].
#[derive(Debug, Clone, Copy)]
enum Action {
    Feed,
    Play,
    ToggleSleep,
    Pet,
    SecretHappiness,
    SecretEnergy,
}

fn refusal_or(result: Result<(), Refusal>, success: IntentOutcome) -> IntentOutcome {
    match result {
        Ok(()) => success,
        Err(Refusal::Sleeping) => IntentOutcome::failure(TITLE_BLOCKED, MSG_SLEEPING),
        Err(Refusal::TooTired) => IntentOutcome::failure(TITLE_BLOCKED, MSG_TOO_TIRED),
    }
}

fn secret(message: &str) -> IntentOutcome {
    IntentOutcome::success(TITLE_SECRET, message).with_kind(NoticeKind::Achievement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{ManualClock, ManualTicker, MemoryStorage, RecordingView};

    const T0: i64 = 1_700_000_000_000;

    type TestSession = SessionController<MemoryStorage, ManualClock, ManualTicker, RecordingView>;

    fn session() -> (TestSession, ManualClock, MemoryStorage) {
        let clock = ManualClock::new(T0);
        let storage = MemoryStorage::default();
        let controller = SessionController::new(
            storage.clone(),
            clock.clone(),
            ManualTicker::default(),
            RecordingView::default(),
            PetTuning::default(),
            42,
        );
        (controller, clock, storage)
    }

    #[test]
    fn boot_without_save_shows_selection() {
        let (mut s, _, _) = session();
        assert!(!s.boot());
        assert!(!s.has_pet());
        assert_eq!(s.view().selection_shown, 1);
        assert!(s.ticker().is_running(TimerKind::Autosave));
        assert!(!s.ticker().is_running(TimerKind::Tick));
    }

    #[test]
    fn selecting_species_starts_ticking_and_persists() {
        let (mut s, _, storage) = session();
        s.boot();
        let outcome = s.select_species(Species::Cat, Some("Mochi"));
        assert!(outcome.success);
        assert_eq!(outcome.message(), "Say hello to Mochi!");
        assert!(s.ticker().is_running(TimerKind::Tick));
        assert_eq!(s.ticker().period(TimerKind::Tick), Some(1_000));
        assert_eq!(s.view().renders.len(), 1);
        let saved = storage.load_pet(SAVE_KEY).unwrap().unwrap();
        assert_eq!(saved.name, "Mochi");
    }

    #[test]
    fn tick_advances_by_elapsed_wall_time() {
        let (mut s, clock, storage) = session();
        s.select_species(Species::Cat, Some("Mochi"));
        clock.advance_ms(2_000);
        s.on_timer(TimerKind::Tick);
        let pet = s.pet().unwrap();
        assert!((pet.stats().hunger - 51.0).abs() < 1e-9);
        assert!((pet.stats().energy - 49.4).abs() < 1e-9);
        let saved = storage.load_pet(SAVE_KEY).unwrap().unwrap();
        assert!((saved.hunger - 51.0).abs() < 1e-9);
        assert_eq!(s.view().renders.len(), 2);
    }

    #[test]
    fn tick_without_pet_is_inert() {
        let (mut s, clock, storage) = session();
        clock.advance_ms(1_000);
        s.on_tick();
        s.on_autosave();
        assert!(s.view().renders.is_empty());
        assert!(storage.load_pet(SAVE_KEY).unwrap().is_none());
    }

    #[test]
    fn failed_intent_neither_renders_nor_saves() {
        let (mut s, _, storage) = session();
        s.select_species(Species::Dog, Some("Rex"));
        s.toggle_sleep();
        let renders = s.view().renders.len();
        storage.clear_writes();

        let outcome = s.feed();
        assert!(!outcome.success);
        assert_eq!(outcome.message(), "Your pet is sleeping!");
        assert_eq!(outcome.notice.kind, NoticeKind::Warning);
        assert_eq!(s.view().renders.len(), renders);
        assert_eq!(storage.writes(), 0);
    }

    #[test]
    fn play_prefers_tired_message() {
        let (mut s, clock, _) = session();
        s.select_species(Species::Cat, None);
        clock.advance_ms(120_000);
        s.on_tick();
        s.toggle_sleep();
        let outcome = s.play();
        assert!(!outcome.success);
        assert_eq!(outcome.message(), "Your pet is too tired to play!");
    }

    #[test]
    fn intents_without_pet_fail() {
        let (mut s, _, _) = session();
        for intent in [Intent::Feed, Intent::Play, Intent::ToggleSleep, Intent::PetClicked] {
            let outcome = s.dispatch(intent);
            assert!(!outcome.success);
            assert_eq!(outcome.message(), "Choose a pet first!");
        }
    }

    #[test]
    fn secret_boost_renders_without_saving() {
        let (mut s, _, storage) = session();
        s.select_species(Species::Hamster, None);
        storage.clear_writes();
        let outcome = s.dispatch(Intent::SecretEnergy);
        assert!(outcome.success);
        assert_eq!(outcome.notice.kind, NoticeKind::Achievement);
        assert!((s.pet().unwrap().stats().energy - 55.0).abs() < 1e-9);
        assert_eq!(storage.writes(), 0);
    }

    #[test]
    fn reset_requires_confirmation() {
        let (mut s, _, storage) = session();
        s.boot();
        s.select_species(Species::Rabbit, None);

        let outcome = s.reset(false);
        assert!(!outcome.success);
        assert!(s.has_pet());
        assert!(storage.load_pet(SAVE_KEY).unwrap().is_some());

        let outcome = s.dispatch(Intent::Reset { confirmed: true });
        assert!(outcome.success);
        assert!(!s.has_pet());
        assert!(!s.ticker().is_running(TimerKind::Tick));
        assert!(s.ticker().is_running(TimerKind::Autosave));
        assert!(storage.load_pet(SAVE_KEY).unwrap().is_none());
        assert_eq!(s.view().selection_shown, 2);
    }

    #[test]
    fn malformed_save_falls_back_to_selection() {
        let (mut s, _, storage) = session();
        storage.put_raw(SAVE_KEY, "{\"species\":\"cat\"");
        assert!(!s.boot());
        assert!(!s.has_pet());
        assert_eq!(s.view().selection_shown, 1);
    }

    #[test]
    fn achievements_are_announced_once() {
        let (mut s, clock, _) = session();
        s.select_species(Species::Cat, None);
        s.toggle_sleep();
        clock.advance_ms(60_000);
        s.on_tick();
        clock.advance_ms(1_000);
        s.on_tick();
        let achievement_notices: Vec<_> = s
            .view()
            .notices
            .iter()
            .filter(|n| n.kind == NoticeKind::Achievement)
            .collect();
        assert_eq!(achievement_notices.len(), 1);
        assert_eq!(achievement_notices[0].title, "Full Energy!");
    }
}
