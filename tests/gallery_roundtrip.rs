//! Gallery persistence round-trips across engine restarts

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use nekosheet::{App, Artwork, Config, FileStorage, FixedClock, MemoryStorage, Storage, UiEvent};

fn temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time should be monotonic")
        .as_nanos();
    std::env::temp_dir().join(format!(
        "nekosheet_gallery_{prefix}_{}_{}",
        std::process::id(),
        nanos
    ))
}

fn file_app(dir: &PathBuf, ms: u64) -> App {
    App::with_backends(
        Config::default(),
        Box::new(FileStorage::new(dir).expect("storage dir")),
        Box::new(FixedClock::new(ms, "2023/11/15 07:13")),
    )
    .expect("default config is valid")
}

#[test]
fn saved_gallery_survives_a_restart() {
    let dir = temp_dir("restart");

    {
        let mut app = file_app(&dir, 1_700_000_000_000);
        app.init().unwrap();
        app.dispatch(UiEvent::Input {
            field: "worksheetName".into(),
            value: "たま".into(),
        })
        .unwrap();
        app.dispatch(UiEvent::SaveToGallery).unwrap();
        app.dispatch(UiEvent::ModalOk).unwrap();
        app.dispatch(UiEvent::SaveToGallery).unwrap();
        app.dispatch(UiEvent::ModalOk).unwrap();
        assert_eq!(app.gallery().len(), 2);
    }

    // Fresh process: load yields a deep-equal list
    let mut restarted = file_app(&dir, 1_700_000_100_000);
    restarted.init().unwrap();
    assert_eq!(restarted.gallery().len(), 2);
    let items = restarted.gallery().items();
    assert_eq!(items[0].name, "たま");
    assert!(items[0].id < items[1].id);
    assert!(items[1].image.starts_with("data:image/png;base64,"));

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn deletion_is_persisted() {
    let dir = temp_dir("deletion");

    {
        let mut app = file_app(&dir, 1_700_000_000_000);
        app.init().unwrap();
        for name in ["a", "b"] {
            app.dispatch(UiEvent::Input {
                field: "worksheetName".into(),
                value: name.into(),
            })
            .unwrap();
            app.dispatch(UiEvent::SaveToGallery).unwrap();
            app.dispatch(UiEvent::ModalOk).unwrap();
        }
        let first = app.gallery().items()[0].id;
        app.dispatch(UiEvent::DeleteArtwork { id: first }).unwrap();
    }

    let mut restarted = file_app(&dir, 1_700_000_100_000);
    restarted.init().unwrap();
    assert_eq!(restarted.gallery().len(), 1);
    assert_eq!(restarted.gallery().items()[0].name, "b");

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn persisted_shape_matches_the_original_contract() {
    // The stored value is a JSON array of {id, name, image, date} under
    // the catWorksheetGallery key.
    let dir = temp_dir("contract");

    {
        let mut app = file_app(&dir, 1_700_000_000_000);
        app.init().unwrap();
        app.dispatch(UiEvent::SaveToGallery).unwrap();
    }

    let storage = FileStorage::new(&dir).expect("storage dir");
    let raw = storage
        .get("catWorksheetGallery")
        .expect("readable")
        .expect("present");
    let parsed: Vec<serde_json::Value> = serde_json::from_str(&raw).expect("json array");
    assert_eq!(parsed.len(), 1);
    let entry = &parsed[0];
    assert!(entry["id"].is_u64());
    assert_eq!(entry["name"], "さくひん 1");
    assert!(entry["image"].as_str().unwrap().starts_with("data:image/png"));
    assert_eq!(entry["date"], "2023/11/15 07:13");

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn a_stored_gallery_written_by_hand_loads_as_is() {
    // Simulates data persisted by the original page
    let dir = temp_dir("legacy");
    {
        let mut storage = FileStorage::new(&dir).expect("storage dir");
        let legacy = serde_json::to_string(&vec![Artwork {
            id: 1_690_000_000_000,
            name: "むかしのさくひん".to_string(),
            image: "data:image/png;base64,AA==".to_string(),
            date: "2023/07/22 12:00".to_string(),
        }])
        .unwrap();
        storage.set("catWorksheetGallery", &legacy).unwrap();
    }

    let mut app = file_app(&dir, 1_700_000_000_000);
    app.init().unwrap();
    assert_eq!(app.gallery().len(), 1);
    assert_eq!(app.gallery().items()[0].name, "むかしのさくひん");

    // New saves append after the legacy entry with a later id
    app.dispatch(UiEvent::SaveToGallery).unwrap();
    assert_eq!(app.gallery().len(), 2);
    assert!(app.gallery().items()[1].id > app.gallery().items()[0].id);

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn memory_storage_round_trips_within_a_session() {
    let mut app = App::with_backends(
        Config::default(),
        Box::new(MemoryStorage::new()),
        Box::new(FixedClock::new(1_700_000_000_000, "2023/11/15 07:13")),
    )
    .expect("default config is valid");
    app.init().unwrap();
    app.dispatch(UiEvent::SaveToGallery).unwrap();
    app.dispatch(UiEvent::ModalOk).unwrap();
    assert_eq!(app.gallery().len(), 1);
    assert!(!app.gallery().is_degraded());
}
