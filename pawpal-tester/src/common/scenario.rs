use anyhow::{Result, ensure};
use pawpal_game::{AchievementId, Species};

use crate::logic::{CarePolicy, SimulationPlan, SimulationSummary};

const HOUR_MS: i64 = 3_600_000;
const DAY_MS: i64 = 24 * HOUR_MS;
const TOO_TIRED: &str = "Your pet is too tired to play!";
const EPSILON: f64 = 1e-9;

/// Scenario keys accepted on the command line, in `all` order.
pub const SCENARIO_KEYS: [&str; 6] = [
    "smoke",
    "neglect",
    "caretaker",
    "insomniac",
    "restore",
    "milestones",
];

#[derive(Debug, Clone)]
pub struct TestScenario {
    pub key: String,
    pub name: String,
    pub plan: SimulationPlan,
}

impl TestScenario {
    #[must_use]
    pub fn new(key: impl Into<String>, name: impl Into<String>, plan: SimulationPlan) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            plan,
        }
    }
}

pub fn get_scenario(key: &str) -> Option<TestScenario> {
    let scenario = match key.to_lowercase().as_str() {
        "smoke" => TestScenario::new(
            "smoke",
            "Smoke Test",
            SimulationPlan::new(CarePolicy::Caretaker, 120).with_expectation(smoke_expectation),
        ),
        "neglect" => TestScenario::new(
            "neglect",
            "Neglected Pet",
            SimulationPlan::new(CarePolicy::Neglect, 300)
                .with_species(Species::Cat)
                .with_expectation(bounded_expectation)
                .with_expectation(neglect_expectation),
        ),
        "caretaker" => TestScenario::new(
            "caretaker",
            "Attentive Caretaker",
            SimulationPlan::new(CarePolicy::Caretaker, 1_800)
                .with_species(Species::Dog)
                .with_expectation(bounded_expectation)
                .with_expectation(caretaker_expectation),
        ),
        "insomniac" => TestScenario::new(
            "insomniac",
            "Sleepless Play",
            SimulationPlan::new(CarePolicy::Insomniac, 600)
                .with_species(Species::Hamster)
                .with_expectation(bounded_expectation)
                .with_expectation(insomniac_expectation),
        ),
        "restore" => TestScenario::new(
            "restore",
            "Close and Reopen",
            SimulationPlan::new(CarePolicy::Caretaker, 90)
                .with_species(Species::Rabbit)
                .with_name("Clover")
                .with_resume(2 * DAY_MS, 30)
                .with_expectation(bounded_expectation)
                .with_expectation(restore_expectation),
        ),
        "milestones" => TestScenario::new(
            "milestones",
            "Month of Milestones",
            SimulationPlan::new(CarePolicy::Caretaker, 24 * 31)
                .with_species(Species::Cat)
                .with_tick_ms(HOUR_MS)
                .with_expectation(bounded_expectation)
                .with_expectation(milestone_expectation),
        ),
        _ => return None,
    };
    Some(scenario)
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    vec![
        ("smoke", "Smoke Test - two minutes of attentive care"),
        ("neglect", "Neglected Pet - five minutes without interaction"),
        ("caretaker", "Attentive Caretaker - half an hour of balanced care"),
        ("insomniac", "Sleepless Play - constant play, no rest"),
        ("restore", "Close and Reopen - save, two days away, resume"),
        ("milestones", "Month of Milestones - hourly ticks for 31 days"),
    ]
}

fn bounded_expectation(summary: &SimulationSummary) -> Result<()> {
    ensure!(
        summary.bounds_violations == 0,
        "attributes left 0..=100 on {} ticks",
        summary.bounds_violations
    );
    ensure!(summary.final_view.is_some(), "pet should still exist");
    Ok(())
}

fn smoke_expectation(summary: &SimulationSummary) -> Result<()> {
    bounded_expectation(summary)?;
    ensure!(summary.ticks_run == 120, "expected 120 ticks, ran {}", summary.ticks_run);
    ensure!(
        summary.saves > 120,
        "every tick should persist (saw {} saves)",
        summary.saves
    );
    ensure!(
        summary.renders > 120,
        "every tick should render (saw {} renders)",
        summary.renders
    );
    Ok(())
}

fn neglect_expectation(summary: &SimulationSummary) -> Result<()> {
    let Some(view) = summary.final_view.as_ref() else {
        anyhow::bail!("pet missing");
    };
    ensure!(view.mood == "Starving", "expected Starving, got {}", view.mood);
    ensure!((view.hunger - 100.0).abs() < EPSILON, "hunger {}", view.hunger);
    ensure!(view.happiness.abs() < EPSILON, "happiness {}", view.happiness);
    ensure!(view.energy.abs() < EPSILON, "energy {}", view.energy);
    ensure!(!view.can_play, "exhausted pet should not be able to play");
    ensure!(summary.intents_ok == 0, "neglect should not interact");
    ensure!(summary.achievements.is_empty(), "nothing should unlock");
    Ok(())
}

fn caretaker_expectation(summary: &SimulationSummary) -> Result<()> {
    ensure!(
        !summary.saw_state("veryHungry"),
        "caretaker let the pet starve"
    );
    ensure!(
        summary.refusals.is_empty(),
        "caretaker should never be refused: {:?}",
        summary.refusals
    );
    ensure!(
        summary.achievements.contains(&AchievementId::FullEnergy),
        "a full night's sleep should unlock Full Energy"
    );
    let announced = summary
        .achievement_notices
        .iter()
        .filter(|title| title.as_str() == "Full Energy!")
        .count();
    ensure!(announced == 1, "Full Energy announced {announced} times");
    Ok(())
}

fn insomniac_expectation(summary: &SimulationSummary) -> Result<()> {
    ensure!(
        summary.refusal_count(TOO_TIRED) > 0,
        "an exhausted pet should refuse to play"
    );
    ensure!(!summary.saw_state("sleeping"), "insomniac pet fell asleep");
    ensure!(
        summary.saw_state("sleepy") || summary.saw_state("verySleepy"),
        "pet should get sleepy without rest: {:?}",
        summary.states_seen
    );
    Ok(())
}

fn restore_expectation(summary: &SimulationSummary) -> Result<()> {
    let Some(resume) = summary.resume.as_ref() else {
        anyhow::bail!("session was not reopened");
    };
    ensure!(resume.restored, "saved pet was not restored");
    let (Some(before), Some(after)) = (&resume.before_close, &resume.after_boot) else {
        anyhow::bail!("missing snapshot around reopen");
    };
    ensure!(after.name == "Clover", "name changed to {}", after.name);
    ensure!(after.species == before.species, "species changed");
    ensure!(
        after.birth_timestamp == before.birth_timestamp,
        "birth timestamp changed"
    );
    for (field, was, now) in [
        ("hunger", before.hunger, after.hunger),
        ("happiness", before.happiness, after.happiness),
        ("energy", before.energy, after.energy),
    ] {
        ensure!(
            (was - now).abs() < EPSILON,
            "{field} replayed offline time: {was} -> {now}"
        );
    }
    let age = summary.final_view.as_ref().map_or(0, |v| v.age_days);
    ensure!(
        age >= 2,
        "age should follow the wall clock after {}ms away, got {age}",
        resume.offline_ms
    );
    ensure!(
        summary.achievements.contains(&AchievementId::FirstDay),
        "First Day should unlock after reopening"
    );
    Ok(())
}

fn milestone_expectation(summary: &SimulationSummary) -> Result<()> {
    for (id, title) in [
        (AchievementId::FirstDay, "First Day!"),
        (AchievementId::WeekOld, "Week Old!"),
        (AchievementId::MonthOld, "Month Old!"),
    ] {
        ensure!(summary.achievements.contains(&id), "{id} not unlocked");
        let announced = summary
            .achievement_notices
            .iter()
            .filter(|t| t.as_str() == title)
            .count();
        ensure!(announced == 1, "{title} announced {announced} times");
    }
    let age = summary.final_view.as_ref().map_or(0, |v| v.age_days);
    ensure!(age == 31, "expected age 31, got {age}");
    Ok(())
}
