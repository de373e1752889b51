//! Achievement catalog and unlock evaluation.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use crate::constants::{FIRST_DAY_AGE, MONTH_OLD_AGE, STAT_MAX, WEEK_OLD_AGE};
use crate::pet::Stats;

/// Achievements newly granted by one evaluation, in check order.
pub type Unlocks = SmallVec<[Achievement; 2]>;

/// Stable achievement identifier; the serialized form is the persisted id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementId {
    #[serde(rename = "First Day")]
    FirstDay,
    #[serde(rename = "Week Old")]
    WeekOld,
    #[serde(rename = "Month Old")]
    MonthOld,
    #[serde(rename = "Perfect Happiness")]
    PerfectHappiness,
    #[serde(rename = "Full Energy")]
    FullEnergy,
}

impl AchievementId {
    /// Every achievement in evaluation order.
    pub const ALL: [Self; 5] = [
        Self::FirstDay,
        Self::WeekOld,
        Self::MonthOld,
        Self::PerfectHappiness,
        Self::FullEnergy,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstDay => "First Day",
            Self::WeekOld => "Week Old",
            Self::MonthOld => "Month Old",
            Self::PerfectHappiness => "Perfect Happiness",
            Self::FullEnergy => "Full Energy",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::FirstDay => "First Day!",
            Self::WeekOld => "Week Old!",
            Self::MonthOld => "Month Old!",
            Self::PerfectHappiness => "Perfect Happiness!",
            Self::FullEnergy => "Full Energy!",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::FirstDay => "Your pet survived its first day!",
            Self::WeekOld => "Your pet is a week old!",
            Self::MonthOld => "Your pet is a month old!",
            Self::PerfectHappiness => "Your pet is perfectly happy!",
            Self::FullEnergy => "Your pet is full of energy!",
        }
    }

    fn is_met(self, age_days: u32, stats: &Stats) -> bool {
        match self {
            Self::FirstDay => age_days >= FIRST_DAY_AGE,
            Self::WeekOld => age_days >= WEEK_OLD_AGE,
            Self::MonthOld => age_days >= MONTH_OLD_AGE,
            Self::PerfectHappiness => stats.happiness >= STAT_MAX,
            Self::FullEnergy => stats.energy >= STAT_MAX,
        }
    }
}

impl fmt::Display for AchievementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Notification payload for a freshly unlocked achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Achievement {
    pub id: AchievementId,
    pub title: &'static str,
    pub description: &'static str,
}

impl From<AchievementId> for Achievement {
    fn from(id: AchievementId) -> Self {
        Self {
            id,
            title: id.title(),
            description: id.description(),
        }
    }
}

/// Grant every achievement whose condition holds and that `unlocked` does not
/// already contain. `unlocked` only ever grows.
pub fn evaluate(age_days: u32, stats: &Stats, unlocked: &mut Vec<AchievementId>) -> Unlocks {
    let mut granted = Unlocks::new();
    for id in AchievementId::ALL {
        if !unlocked.contains(&id) && id.is_met(age_days, stats) {
            unlocked.push(id);
            granted.push(Achievement::from(id));
        }
    }
    granted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(happiness: f64, energy: f64) -> Stats {
        Stats {
            hunger: 50.0,
            happiness,
            energy,
        }
    }

    #[test]
    fn nothing_unlocks_for_newborn() {
        let mut unlocked = Vec::new();
        assert!(evaluate(0, &stats(50.0, 50.0), &mut unlocked).is_empty());
        assert!(unlocked.is_empty());
    }

    #[test]
    fn unlocks_report_in_check_order() {
        let mut unlocked = Vec::new();
        let granted = evaluate(31, &stats(100.0, 100.0), &mut unlocked);
        let ids: Vec<_> = granted.iter().map(|a| a.id).collect();
        assert_eq!(ids, AchievementId::ALL.to_vec());
        assert_eq!(unlocked, AchievementId::ALL.to_vec());
        assert_eq!(granted[0].title, "First Day!");
        assert_eq!(granted[4].description, "Your pet is full of energy!");
    }

    #[test]
    fn each_id_granted_once() {
        let mut unlocked = Vec::new();
        let first = evaluate(8, &stats(100.0, 40.0), &mut unlocked);
        assert_eq!(first.len(), 3);
        let second = evaluate(8, &stats(100.0, 40.0), &mut unlocked);
        assert!(second.is_empty());
        let third = evaluate(8, &stats(20.0, 100.0), &mut unlocked);
        assert_eq!(third.len(), 1);
        assert_eq!(third[0].id, AchievementId::FullEnergy);
        assert_eq!(unlocked.len(), 4);
    }

    #[test]
    fn ids_serialize_to_legacy_strings() {
        let json = serde_json::to_string(&AchievementId::PerfectHappiness).unwrap();
        assert_eq!(json, "\"Perfect Happiness\"");
        let parsed: AchievementId = serde_json::from_str("\"Week Old\"").unwrap();
        assert_eq!(parsed, AchievementId::WeekOld);
        assert_eq!(AchievementId::MonthOld.to_string(), "Month Old");
    }
}
