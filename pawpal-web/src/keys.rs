//! Keyboard shortcuts for the hidden boosts.
use pawpal_game::Intent;

/// Map a `KeyboardEvent.key` value to its hidden intent, case-insensitively.
#[must_use]
pub fn intent_for_key(key: &str) -> Option<Intent> {
    let mut chars = key.chars();
    let (Some(first), None) = (chars.next(), chars.next()) else {
        return None;
    };
    match first.to_ascii_lowercase() {
        'h' => Some(Intent::SecretHappiness),
        'e' => Some(Intent::SecretEnergy),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_keys_map_case_insensitively() {
        assert_eq!(intent_for_key("h"), Some(Intent::SecretHappiness));
        assert_eq!(intent_for_key("H"), Some(Intent::SecretHappiness));
        assert_eq!(intent_for_key("E"), Some(Intent::SecretEnergy));
        assert_eq!(intent_for_key("x"), None);
        assert_eq!(intent_for_key("Enter"), None);
        assert_eq!(intent_for_key(""), None);
    }
}
