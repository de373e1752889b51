use pawpal_game::{Intent, PetSnapshot, SnapshotError, Species};
use pawpal_web::app::{RESET_PROMPT, species_options};
use pawpal_web::keys::intent_for_key;
use pawpal_web::logger::format_record;
use pawpal_web::storage::WebStorageError;

#[test]
fn selection_screen_lists_species_in_order() {
    let ids: Vec<_> = species_options().iter().map(|o| o.id).collect();
    assert_eq!(ids, vec!["cat", "dog", "rabbit", "hamster"]);
    let json = serde_json::to_value(species_options()).unwrap();
    assert_eq!(json[1]["badge"], Species::Dog.badge());
}

#[test]
fn hidden_shortcuts_only_cover_boosts() {
    assert_eq!(intent_for_key("h"), Some(Intent::SecretHappiness));
    assert_eq!(intent_for_key("e"), Some(Intent::SecretEnergy));
    for key in ["f", "p", " ", "Escape"] {
        assert_eq!(intent_for_key(key), None, "{key}");
    }
}

#[test]
fn storage_errors_describe_cause() {
    let err = WebStorageError::Storage("QuotaExceededError".into());
    assert_eq!(err.to_string(), "Storage error: QuotaExceededError");

    let blank = r#"{"species":"cat","name":"","hunger":1,"happiness":1,"energy":1,"birthTimestamp":0}"#;
    let bad = PetSnapshot::from_json(blank).expect_err("blank name rejected");
    assert!(matches!(bad, SnapshotError::EmptyName));
    let err = WebStorageError::from(bad);
    assert_eq!(err.to_string(), "Invalid snapshot: snapshot name is empty");
}

#[test]
fn reset_prompt_warns_about_deletion() {
    assert!(RESET_PROMPT.contains("delete your current pet"));
}

#[test]
fn log_lines_are_prefixed() {
    let line = format_record(log::Level::Info, "pawpal_game::session", "adopted Mochi the cat");
    assert!(line.starts_with("[INFO]"));
}
