//! The generated markup parses and reflects gallery state

use scraper::{Html, Selector};

use nekosheet::{App, Config, FixedClock, MemoryStorage, UiEvent};

fn test_app() -> App {
    let mut app = App::with_backends(
        Config::default(),
        Box::new(MemoryStorage::new()),
        Box::new(FixedClock::new(1_700_000_000_000, "2023/11/15 07:13")),
    )
    .expect("default config is valid");
    app.init().unwrap();
    app
}

fn save(app: &mut App, name: &str) {
    app.dispatch(UiEvent::Input {
        field: "worksheetName".into(),
        value: name.into(),
    })
    .unwrap();
    app.dispatch(UiEvent::SaveToGallery).unwrap();
    app.dispatch(UiEvent::ModalOk).unwrap();
}

#[test]
fn empty_gallery_shows_the_placeholder() {
    let app = test_app();
    let doc = Html::parse_fragment(&app.gallery_grid_html());
    let empty = Selector::parse(".empty-gallery").unwrap();
    let cards = Selector::parse(".gallery-item").unwrap();
    assert_eq!(doc.select(&empty).count(), 1);
    assert_eq!(doc.select(&cards).count(), 0);
    assert_eq!(app.gallery_count_html(), "0");
}

#[test]
fn grid_shows_one_card_per_saved_artwork() {
    let mut app = test_app();
    save(&mut app, "みけ");
    save(&mut app, "");

    let doc = Html::parse_fragment(&app.gallery_grid_html());
    let names: Vec<String> = doc
        .select(&Selector::parse(".gallery-name").unwrap())
        .map(|n| n.text().collect())
        .collect();
    assert_eq!(names, vec!["みけ", "さくひん 2"]);

    let dates: Vec<String> = doc
        .select(&Selector::parse(".gallery-date").unwrap())
        .map(|n| n.text().collect())
        .collect();
    assert_eq!(dates, vec!["2023/11/15 07:13", "2023/11/15 07:13"]);

    let thumbs: Vec<&str> = doc
        .select(&Selector::parse(".gallery-image").unwrap())
        .filter_map(|n| n.value().attr("src"))
        .collect();
    assert_eq!(thumbs.len(), 2);
    assert!(thumbs.iter().all(|s| s.starts_with("data:image/png;base64,")));

    assert_eq!(app.gallery_count_html(), "2");
}

#[test]
fn delete_buttons_carry_the_artwork_ids() {
    let mut app = test_app();
    save(&mut app, "a");
    save(&mut app, "b");

    let expected: Vec<String> = app
        .gallery()
        .items()
        .iter()
        .map(|a| a.id.to_string())
        .collect();

    let doc = Html::parse_fragment(&app.gallery_grid_html());
    let ids: Vec<&str> = doc
        .select(&Selector::parse(".delete-btn").unwrap())
        .filter_map(|n| n.value().attr("data-id"))
        .collect();
    assert_eq!(ids, expected);

    // Deleting through a rendered id updates the grid
    let id: u64 = ids[0].parse().unwrap();
    app.dispatch(UiEvent::DeleteArtwork { id }).unwrap();
    let doc = Html::parse_fragment(&app.gallery_grid_html());
    assert_eq!(
        doc.select(&Selector::parse(".gallery-item").unwrap()).count(),
        1
    );
    assert_eq!(app.gallery_count_html(), "1");
}

#[test]
fn palette_markup_tracks_the_selection() {
    let mut app = test_app();
    let active = Selector::parse(".color-btn.active").unwrap();

    let doc = Html::parse_fragment(&app.palette_html());
    let initial: Vec<_> = doc.select(&active).collect();
    assert_eq!(initial.len(), 1);
    assert!(initial[0].value().attr("style").unwrap().contains("#8b4513"));

    app.dispatch(UiEvent::SelectColor { index: 2 }).unwrap();
    let doc = Html::parse_fragment(&app.palette_html());
    let selected: Vec<_> = doc.select(&active).collect();
    assert_eq!(selected.len(), 1);
    assert!(selected[0].value().attr("style").unwrap().contains("#4169e1"));
}
