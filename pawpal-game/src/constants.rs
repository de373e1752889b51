//! Centralized balance and tuning constants for Pawpal pet logic.
//!
//! These values are the built-in defaults behind [`crate::tuning::PetTuning`].
//! Keeping them together ensures the canonical JSON tuning asset and the
//! compiled fallback cannot silently drift apart.

// Storage ------------------------------------------------------------------
/// Key the browser build has always saved under; existing saves keep loading.
pub const SAVE_KEY: &str = "virtualPet";

// Attribute bounds ---------------------------------------------------------
pub const STAT_MIN: f64 = 0.0;
pub const STAT_MAX: f64 = 100.0;
pub const STARTING_STAT: f64 = 50.0;
pub const MS_PER_SECOND: f64 = 1_000.0;
pub const MS_PER_DAY: i64 = 86_400_000;

// Time decay (per second) --------------------------------------------------
pub(crate) const AWAKE_HUNGER_PER_SEC: f64 = 0.5;
pub(crate) const AWAKE_HAPPINESS_PER_SEC: f64 = -0.2;
pub(crate) const AWAKE_ENERGY_PER_SEC: f64 = -0.3;
pub(crate) const ASLEEP_HUNGER_PER_SEC: f64 = 0.1;
pub(crate) const ASLEEP_HAPPINESS_PER_SEC: f64 = 0.0;
pub(crate) const ASLEEP_ENERGY_PER_SEC: f64 = 1.5;

// Interactions -------------------------------------------------------------
pub(crate) const FEED_HUNGER: f64 = -30.0;
pub(crate) const FEED_HAPPINESS: f64 = 10.0;
pub(crate) const FEED_ENERGY: f64 = 5.0;
pub(crate) const PLAY_HUNGER: f64 = 10.0;
pub(crate) const PLAY_HAPPINESS: f64 = 25.0;
pub(crate) const PLAY_ENERGY: f64 = -20.0;
pub(crate) const PLAY_MIN_ENERGY: f64 = 20.0;
pub(crate) const PET_HAPPINESS: f64 = 2.0;
pub(crate) const SECRET_BOOST: f64 = 5.0;

// Derived state thresholds -------------------------------------------------
pub(crate) const VERY_HUNGRY_ABOVE: f64 = 90.0;
pub(crate) const HUNGRY_ABOVE: f64 = 80.0;
pub(crate) const VERY_SLEEPY_BELOW: f64 = 10.0;
pub(crate) const SLEEPY_BELOW: f64 = 20.0;
pub(crate) const VERY_HAPPY_ABOVE: f64 = 90.0;
pub(crate) const HAPPY_ABOVE: f64 = 70.0;

// Achievement thresholds ---------------------------------------------------
pub(crate) const FIRST_DAY_AGE: u32 = 1;
pub(crate) const WEEK_OLD_AGE: u32 = 7;
pub(crate) const MONTH_OLD_AGE: u32 = 30;

// Scheduling ---------------------------------------------------------------
pub(crate) const TICK_PERIOD_MS: u32 = 1_000;
pub(crate) const AUTOSAVE_PERIOD_MS: u32 = 30_000;

// Messages -----------------------------------------------------------------
pub(crate) const TITLE_SUCCESS: &str = "Success!";
pub(crate) const TITLE_BLOCKED: &str = "Cannot do that!";
pub(crate) const TITLE_PET_LOVE: &str = "Pet Love!";
pub(crate) const TITLE_SECRET: &str = "Secret!";
pub(crate) const TITLE_WELCOME: &str = "Welcome!";
pub(crate) const TITLE_RESET: &str = "Reset";
pub(crate) const MSG_FED: &str = "Yum! Your pet enjoyed the food!";
pub(crate) const MSG_SLEEPING: &str = "Your pet is sleeping!";
pub(crate) const MSG_PLAYED: &str = "Your pet had fun playing!";
pub(crate) const MSG_TOO_TIRED: &str = "Your pet is too tired to play!";
pub(crate) const MSG_FELL_ASLEEP: &str = "Your pet is now sleeping...";
pub(crate) const MSG_WOKE_UP: &str = "Your pet woke up!";
pub(crate) const MSG_PETTED: &str = "Your pet loves the attention!";
pub(crate) const MSG_SECRET_HAPPINESS: &str = "You found a hidden happiness boost!";
pub(crate) const MSG_SECRET_ENERGY: &str = "You found a hidden energy boost!";
pub(crate) const MSG_NO_PET: &str = "Choose a pet first!";
pub(crate) const MSG_RESET_CANCELLED: &str = "Your pet is still here.";
pub(crate) const MSG_RESET_DONE: &str = "Choose a new friend to adopt.";
