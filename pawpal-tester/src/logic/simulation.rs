use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Result;
use pawpal_game::host::{ManualClock, ManualTicker, MemoryStorage, RecordingView};
use pawpal_game::{
    AchievementId, Intent, IntentOutcome, NoticeKind, PetSnapshot, PetTuning, RenderView,
    SessionController, Species, TimerKind,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

/// Simulated wall-clock start for every run.
pub const SIM_EPOCH_MS: i64 = 1_700_000_000_000;
pub const DEFAULT_TICK_MS: i64 = 1_000;

type SimSession = SessionController<MemoryStorage, ManualClock, ManualTicker, RecordingView>;

/// Scripted owner behaviour applied after every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CarePolicy {
    /// Never interacts.
    Neglect,
    /// Feeds, rests, and plays to keep every attribute comfortable.
    Caretaker,
    /// Never lets the pet sleep and plays whenever asked.
    Insomniac,
}

impl CarePolicy {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Neglect => "neglect",
            Self::Caretaker => "caretaker",
            Self::Insomniac => "insomniac",
        }
    }

    pub fn decide<R: Rng + ?Sized>(self, view: &RenderView, rng: &mut R) -> Option<Intent> {
        match self {
            Self::Neglect => None,
            Self::Caretaker => {
                if view.sleeping {
                    return (view.energy >= 100.0).then_some(Intent::ToggleSleep);
                }
                if view.hunger > 60.0 {
                    Some(Intent::Feed)
                } else if view.energy < 25.0 {
                    Some(Intent::ToggleSleep)
                } else if view.happiness < 60.0 && view.energy >= 40.0 {
                    Some(Intent::Play)
                } else if rng.gen_bool(0.05) {
                    Some(Intent::PetClicked)
                } else {
                    None
                }
            }
            Self::Insomniac => {
                if view.sleeping {
                    Some(Intent::ToggleSleep)
                } else if view.hunger > 50.0 {
                    Some(Intent::Feed)
                } else {
                    Some(Intent::Play)
                }
            }
        }
    }
}

/// Close the session, stay away, then come back and keep playing.
#[derive(Debug, Clone, Copy)]
pub struct ResumePlan {
    pub offline_ms: i64,
    pub ticks: u32,
}

/// Assertion hook run after a simulation completes.
type SimulationExpectationFn = Arc<dyn Fn(&SimulationSummary) -> Result<()> + Send + Sync>;

#[derive(Clone)]
pub struct SimulationExpectation(SimulationExpectationFn);

impl std::fmt::Debug for SimulationExpectation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulationExpectation").finish()
    }
}

impl SimulationExpectation {
    pub fn evaluate(&self, summary: &SimulationSummary) -> Result<()> {
        (self.0)(summary)
    }
}

impl<F> From<F> for SimulationExpectation
where
    F: Fn(&SimulationSummary) -> Result<()> + Send + Sync + 'static,
{
    fn from(f: F) -> Self {
        Self(Arc::new(f))
    }
}

#[derive(Debug, Clone)]
pub struct SimulationPlan {
    /// `None` picks a species from the run seed.
    pub species: Option<Species>,
    pub name: Option<String>,
    pub policy: CarePolicy,
    pub ticks: u32,
    pub tick_ms: i64,
    pub resume: Option<ResumePlan>,
    pub expectations: Vec<SimulationExpectation>,
}

impl SimulationPlan {
    #[must_use]
    pub const fn new(policy: CarePolicy, ticks: u32) -> Self {
        Self {
            species: None,
            name: None,
            policy,
            ticks,
            tick_ms: DEFAULT_TICK_MS,
            resume: None,
            expectations: Vec::new(),
        }
    }

    #[must_use]
    pub const fn with_species(mut self, species: Species) -> Self {
        self.species = Some(species);
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub const fn with_tick_ms(mut self, tick_ms: i64) -> Self {
        self.tick_ms = tick_ms;
        self
    }

    #[must_use]
    pub const fn with_resume(mut self, offline_ms: i64, ticks: u32) -> Self {
        self.resume = Some(ResumePlan { offline_ms, ticks });
        self
    }

    #[must_use]
    pub fn with_expectation(mut self, expectation: impl Into<SimulationExpectation>) -> Self {
        self.expectations.push(expectation.into());
        self
    }
}

/// What happened across a close and reopen of the session.
#[derive(Debug, Clone)]
pub struct ResumeReport {
    pub restored: bool,
    pub offline_ms: i64,
    pub before_close: Option<PetSnapshot>,
    pub after_boot: Option<PetSnapshot>,
}

/// Complete record of a simulation run.
#[derive(Debug, Clone)]
pub struct SimulationSummary {
    pub seed: u64,
    pub species: Species,
    pub policy: CarePolicy,
    pub ticks_run: u32,
    pub final_view: Option<RenderView>,
    pub final_snapshot: Option<PetSnapshot>,
    pub achievements: Vec<AchievementId>,
    /// Titles of achievement notices, in announcement order.
    pub achievement_notices: Vec<String>,
    pub states_seen: BTreeMap<String, u32>,
    pub intents_ok: u32,
    /// Refusal messages and how often each was shown.
    pub refusals: BTreeMap<String, u32>,
    pub renders: usize,
    pub saves: usize,
    pub bounds_violations: u32,
    pub resume: Option<ResumeReport>,
}

impl SimulationSummary {
    #[must_use]
    pub fn saw_state(&self, state: &str) -> bool {
        self.states_seen.contains_key(state)
    }

    #[must_use]
    pub fn refusal_count(&self, message: &str) -> u32 {
        self.refusals.get(message).copied().unwrap_or(0)
    }
}

#[derive(Debug, Default)]
struct RunLog {
    ticks_run: u32,
    states_seen: BTreeMap<String, u32>,
    intents_ok: u32,
    refusals: BTreeMap<String, u32>,
    achievement_notices: Vec<String>,
    renders: usize,
    bounds_violations: u32,
}

impl RunLog {
    fn observe(&mut self, view: &RenderView) {
        *self.states_seen.entry(view.state.as_str().to_string()).or_insert(0) += 1;
        let in_range = [view.hunger, view.happiness, view.energy]
            .iter()
            .all(|v| (0.0..=100.0).contains(v));
        if !in_range {
            self.bounds_violations += 1;
        }
    }

    fn record(&mut self, outcome: &IntentOutcome) {
        if outcome.success {
            self.intents_ok += 1;
        } else {
            *self.refusals.entry(outcome.message().to_string()).or_insert(0) += 1;
        }
    }

    fn absorb(&mut self, view: &mut RecordingView) {
        self.renders += std::mem::take(&mut view.renders).len();
        self.achievement_notices.extend(
            std::mem::take(&mut view.notices)
                .into_iter()
                .filter(|n| n.kind == NoticeKind::Achievement)
                .map(|n| n.title),
        );
    }
}

/// Headless deterministic runner for the pet session.
#[derive(Debug, Clone)]
pub struct PetSimulator {
    tuning: PetTuning,
    verbose: bool,
}

impl PetSimulator {
    #[must_use]
    pub const fn new(tuning: PetTuning, verbose: bool) -> Self {
        Self { tuning, verbose }
    }

    #[must_use]
    pub fn run_plan(&self, plan: &SimulationPlan, seed: u64) -> SimulationSummary {
        let storage = MemoryStorage::default();
        let clock = ManualClock::new(SIM_EPOCH_MS);
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let species = plan
            .species
            .unwrap_or_else(|| Species::ALL[rng.gen_range(0..Species::ALL.len())]);

        let mut session = self.open_session(&storage, &clock, seed);
        session.boot();
        session.dispatch(Intent::SelectSpecies {
            species,
            name: plan.name.clone(),
        });

        let mut log = RunLog::default();
        self.drive(&mut session, &clock, plan, plan.ticks, &mut rng, &mut log);

        let resume = plan.resume.map(|resume| {
            let before_close = session.snapshot();
            clock.advance_ms(resume.offline_ms);
            session = self.open_session(&storage, &clock, seed.wrapping_add(1));
            let restored = session.boot();
            let after_boot = session.snapshot();
            if self.verbose {
                log::info!(
                    "seed {seed}: reopened after {}ms, restored={restored}",
                    resume.offline_ms
                );
            }
            self.drive(&mut session, &clock, plan, resume.ticks, &mut rng, &mut log);
            ResumeReport {
                restored,
                offline_ms: resume.offline_ms,
                before_close,
                after_boot,
            }
        });

        SimulationSummary {
            seed,
            species,
            policy: plan.policy,
            ticks_run: log.ticks_run,
            final_view: session.render_view(),
            final_snapshot: session.snapshot(),
            achievements: session
                .pet()
                .map(|pet| pet.achievements().to_vec())
                .unwrap_or_default(),
            achievement_notices: log.achievement_notices,
            states_seen: log.states_seen,
            intents_ok: log.intents_ok,
            refusals: log.refusals,
            renders: log.renders,
            saves: storage.writes(),
            bounds_violations: log.bounds_violations,
            resume,
        }
    }

    fn open_session(&self, storage: &MemoryStorage, clock: &ManualClock, seed: u64) -> SimSession {
        SessionController::new(
            storage.clone(),
            clock.clone(),
            ManualTicker::default(),
            RecordingView::default(),
            self.tuning.clone(),
            seed,
        )
    }

    fn drive(
        &self,
        session: &mut SimSession,
        clock: &ManualClock,
        plan: &SimulationPlan,
        ticks: u32,
        rng: &mut ChaCha20Rng,
        log: &mut RunLog,
    ) {
        let autosave_ms = i64::from(self.tuning.autosave_period_ms);
        let mut since_autosave = 0_i64;
        for _ in 0..ticks {
            clock.advance_ms(plan.tick_ms);
            session.on_timer(TimerKind::Tick);
            since_autosave += plan.tick_ms;
            if since_autosave >= autosave_ms {
                since_autosave = 0;
                session.on_timer(TimerKind::Autosave);
            }
            log.ticks_run += 1;

            let Some(view) = session.render_view() else {
                break;
            };
            log.observe(&view);
            if let Some(intent) = plan.policy.decide(&view, rng) {
                let label = intent.label();
                let outcome = session.dispatch(intent);
                log::trace!("{label}: {}", outcome.message());
                log.record(&outcome);
            }
        }
        log.absorb(session.view_mut());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simulator() -> PetSimulator {
        PetSimulator::new(PetTuning::default_config(), false)
    }

    #[test]
    fn neglected_pet_ends_starving() {
        let plan = SimulationPlan::new(CarePolicy::Neglect, 300).with_species(Species::Cat);
        let summary = simulator().run_plan(&plan, 7);
        let view = summary.final_view.expect("pet alive");
        assert_eq!(view.mood, "Starving");
        assert_eq!(summary.intents_ok, 0);
        assert_eq!(summary.bounds_violations, 0);
        assert_eq!(summary.ticks_run, 300);
    }

    #[test]
    fn runs_are_deterministic_per_seed() {
        let plan = SimulationPlan::new(CarePolicy::Caretaker, 400);
        let a = simulator().run_plan(&plan, 99);
        let b = simulator().run_plan(&plan, 99);
        assert_eq!(a.species, b.species);
        assert_eq!(a.final_snapshot, b.final_snapshot);
        assert_eq!(a.intents_ok, b.intents_ok);
    }

    #[test]
    fn resume_restores_saved_pet() {
        let plan = SimulationPlan::new(CarePolicy::Caretaker, 30)
            .with_species(Species::Rabbit)
            .with_name("Clover")
            .with_resume(86_400_000, 5);
        let summary = simulator().run_plan(&plan, 3);
        let resume = summary.resume.expect("resumed");
        assert!(resume.restored);
        assert_eq!(resume.after_boot.expect("pet").name, "Clover");
        assert_eq!(summary.ticks_run, 35);
    }

    #[test]
    fn insomniac_never_sleeps() {
        let view = RenderView {
            species: Species::Dog,
            name: "Rex".into(),
            hunger: 10.0,
            happiness: 50.0,
            energy: 5.0,
            hunger_pct: 10,
            happiness_pct: 50,
            energy_pct: 5,
            age_days: 0,
            state: pawpal_game::PetState::VerySleepy,
            mood: "Exhausted",
            face: "😴",
            face_changed: false,
            sleeping: false,
            sleep_label: "Sleep",
            can_play: false,
        };
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        assert_eq!(
            CarePolicy::Insomniac.decide(&view, &mut rng),
            Some(Intent::Play)
        );
        assert_eq!(
            CarePolicy::Caretaker.decide(&view, &mut rng),
            Some(Intent::ToggleSleep)
        );
    }
}
