//! Load, seed, mutate and save the entry list through real storage backends.

use super::common::fixtures::{dhaka, london, temp_store, tokyo};
use worldtimez::data::{
    MemoryStorage, PreferenceStore, StorageBackend, StoreError, ThemeMode, TimezoneStore,
    TIMEZONES_KEY,
};
use worldtimez::entries::{storable_zone_name, AmbientZone};
use worldtimez::EntryList;

/// Empty storage, seed, add London, move it to the front, persist, reload.
#[test]
fn test_first_run_scenario() {
    let storage = MemoryStorage::new();
    let store = TimezoneStore::new(&storage);

    let loaded = store.load();
    assert!(loaded.is_empty());

    let ambient = AmbientZone {
        name: "Asia/Dhaka".to_string(),
        offset_minutes: 360,
    };
    let list = EntryList::seed_default_from(&ambient);
    assert_eq!(list.len(), 1);
    assert_eq!(list.as_slice()[0].zone_id, "Asia/Dhaka");
    assert_eq!(list.as_slice()[0].city, "Dhaka");
    assert_eq!(list.as_slice()[0].country, "Asia");

    let list = list.add(london());
    assert_eq!(list.len(), 2);
    assert_eq!(list.as_slice()[1], london());

    let first_key = list.as_slice()[0].identity_key();
    let list = list.reorder(&london().identity_key(), &first_key);
    let order: Vec<&str> = list.iter().map(|e| e.zone_id.as_str()).collect();
    assert_eq!(order, vec!["Europe/London", "Asia/Dhaka"]);

    store.save(&list);
    assert_eq!(store.load(), list);
}

#[test]
fn test_sqlite_round_trip_keeps_order_and_fields() {
    let (backend, _dir) = temp_store();
    let store = TimezoneStore::new(&backend);

    let list = EntryList::new().add(tokyo()).add(london()).add(dhaka());
    store.save(&list);

    let reloaded = store.load();
    assert_eq!(reloaded, list);
    assert_eq!(reloaded.as_slice()[1].population, 8_900_000);
    assert_eq!(reloaded.as_slice()[2].utc_offset_minutes, 360);
}

#[test]
fn test_one_invalid_entry_wipes_everything() {
    let (backend, _dir) = temp_store();
    backend
        .set(
            TIMEZONES_KEY,
            r#"[
                {"id":"Europe/London","name":"London","city":"London","country":"United Kingdom","population":8900000,"offset":0},
                {"id":"invalid id","name":"x","city":"x","country":"x","population":0,"offset":0}
            ]"#,
        )
        .unwrap();
    let store = TimezoneStore::new(&backend);

    assert!(matches!(store.load_checked(), Err(StoreError::Corrupt { .. })));
    assert!(store.load().is_empty());
    // The bad document is gone, not just skipped
    assert_eq!(backend.get(TIMEZONES_KEY).unwrap(), None);
}

#[test]
fn test_deep_zone_names_are_not_stored() {
    let (backend, _dir) = temp_store();
    backend
        .set(
            TIMEZONES_KEY,
            r#"[{"id":"America/Argentina/Buenos_Aires","city":"Buenos Aires","country":"America"}]"#,
        )
        .unwrap();
    assert!(TimezoneStore::new(&backend).load().is_empty());

    // Seeding maps such a zone onto a storable identifier instead
    assert_eq!(
        storable_zone_name("America/Argentina/Buenos_Aires").as_deref(),
        Some("America/Buenos_Aires")
    );
}

#[test]
fn test_failed_save_keeps_previous_state() {
    let storage = MemoryStorage::with_quota(200);
    let store = TimezoneStore::new(&storage);

    let small = EntryList::new().add(london());
    store.save(&small);

    let big = small.clone().add(dhaka()).add(tokyo());
    store.save(&big);

    assert_eq!(store.load(), small);
}

#[test]
fn test_load_or_seed_keeps_existing_list() {
    let storage = MemoryStorage::new();
    let store = TimezoneStore::new(&storage);
    let list = EntryList::new().add(tokyo()).add(london());
    store.save(&list);

    assert_eq!(store.load_or_seed(), list);
}

#[test]
fn test_theme_and_list_share_storage() {
    let (backend, _dir) = temp_store();
    let prefs = PreferenceStore::new(&backend);
    let store = TimezoneStore::new(&backend);

    assert_eq!(prefs.theme(ThemeMode::Dark), ThemeMode::Dark);
    prefs.set_theme(ThemeMode::Light);
    store.save(&EntryList::new().add(london()));
    store.wipe();

    assert_eq!(prefs.theme(ThemeMode::Dark), ThemeMode::Light);
    assert!(store.load().is_empty());
}
