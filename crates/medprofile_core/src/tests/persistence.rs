use std::sync::Arc;

use crate::controller::{Mode, ProfileController};
use crate::notification::NoticeKind;
use crate::record::{ProfileField, ProfileRecord};
use crate::storage::{KeyValueStore, MemoryStore, profile_key};

#[test]
fn test_load_without_data_yields_defaults() {
    let store = MemoryStore::new();
    let mut screen = ProfileController::for_user("default");

    assert_eq!(screen.load_from(&store), None);

    let record = screen.record();
    assert_eq!(record.allergies, "None");
    assert_eq!(record.current_medications, "None");
    assert_eq!(record.full_name, "");
    assert_eq!(record.emergency_phone, "");
}

#[test]
fn test_partial_data_merges_over_defaults() {
    let store = MemoryStore::new().with_entry(&profile_key("default"), r#"{"fullName":"Jane Doe"}"#);
    let mut screen = ProfileController::for_user("default");

    assert_eq!(screen.load_from(&store), None);
    assert_eq!(
        screen.record(),
        &ProfileRecord {
            full_name: "Jane Doe".to_string(),
            ..ProfileRecord::default()
        }
    );
}

#[test]
fn test_non_text_value_fails_load() {
    let store = MemoryStore::new().with_entry(
        &profile_key("default"),
        r#"{"fullName":"A","bloodType":7}"#,
    );
    let mut screen = ProfileController::for_user("default");

    let notice = screen.load_from(&store).unwrap();
    assert_eq!(notice.kind, NoticeKind::LoadFailure);
    assert_eq!(screen.mode(), Mode::Viewing);
    assert_eq!(screen.record(), &ProfileRecord::default());
}

#[test]
fn test_saved_profile_reloads_in_fresh_controller() {
    let store = Arc::new(MemoryStore::new());

    let mut first = ProfileController::for_user("default");
    first.load_from(&store);
    first.begin_edit().unwrap();
    first
        .update_field(ProfileField::FullName, "John Smith")
        .unwrap();
    first
        .update_field(ProfileField::CurrentMedications, "Metformin 500mg, \"twice\" daily")
        .unwrap();
    first.save_to(&store).unwrap();

    let mut second = ProfileController::for_user("default");
    assert_eq!(second.load_from(&store), None);
    assert_eq!(second.mode(), Mode::Viewing);
    assert_eq!(second.record().full_name, "John Smith");
    assert_eq!(
        second.record().current_medications,
        "Metformin 500mg, \"twice\" daily"
    );
    assert_eq!(second.record(), first.record());
}

#[test]
fn test_users_do_not_share_profiles() {
    let store = MemoryStore::new();

    let mut alice = ProfileController::for_user("alice");
    alice.load_from(&store);
    alice.begin_edit().unwrap();
    alice.update_field(ProfileField::FullName, "Alice").unwrap();
    alice.save_to(&store).unwrap();

    let mut bob = ProfileController::for_user("bob");
    bob.load_from(&store);
    assert_eq!(bob.record(), &ProfileRecord::default());
    assert!(store.get(&profile_key("bob")).unwrap().is_none());
}

#[test]
fn test_concurrent_editors_last_write_wins() {
    let store = MemoryStore::new();

    let mut first = ProfileController::for_user("default");
    let mut second = ProfileController::for_user("default");
    first.load_from(&store);
    second.load_from(&store);
    first.begin_edit().unwrap();
    second.begin_edit().unwrap();

    first.update_field(ProfileField::FullName, "First").unwrap();
    second.update_field(ProfileField::FullName, "Second").unwrap();
    first.save_to(&store).unwrap();
    second.save_to(&store).unwrap();

    let mut reader = ProfileController::for_user("default");
    reader.load_from(&store);
    assert_eq!(reader.record().full_name, "Second");
}
