//! User intents and the notices they produce.
use serde::{Deserialize, Serialize};

use crate::achievements::Achievement;
use crate::species::Species;

/// A discrete user-triggered action forwarded by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Intent {
    SelectSpecies {
        species: Species,
        #[serde(default)]
        name: Option<String>,
    },
    Feed,
    Play,
    ToggleSleep,
    PetClicked,
    SecretHappiness,
    SecretEnergy,
    /// Discard the pet. Only acts when the user confirmed.
    Reset { confirmed: bool },
}

impl Intent {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::SelectSpecies { .. } => "select-species",
            Self::Feed => "feed",
            Self::Play => "play",
            Self::ToggleSleep => "toggle-sleep",
            Self::PetClicked => "pet",
            Self::SecretHappiness => "secret-happiness",
            Self::SecretEnergy => "secret-energy",
            Self::Reset { .. } => "reset",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Warning,
    Achievement,
}

/// Banner text for the presentation layer to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn new(kind: NoticeKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
        }
    }
}

impl From<Achievement> for Notice {
    fn from(achievement: Achievement) -> Self {
        Self::new(
            NoticeKind::Achievement,
            achievement.title,
            achievement.description,
        )
    }
}

/// Result of dispatching an intent: a success flag and the message to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentOutcome {
    pub success: bool,
    pub notice: Notice,
}

impl IntentOutcome {
    #[must_use]
    pub fn success(title: &str, message: impl Into<String>) -> Self {
        Self {
            success: true,
            notice: Notice::new(NoticeKind::Success, title, message),
        }
    }

    #[must_use]
    pub fn failure(title: &str, message: impl Into<String>) -> Self {
        Self {
            success: false,
            notice: Notice::new(NoticeKind::Warning, title, message),
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: NoticeKind) -> Self {
        self.notice.kind = kind;
        self
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.notice.message
    }
}
