use std::fs;
use std::path::PathBuf;

use sha2::{Digest, Sha256};

use nekosheet::answers::{AnswerKey, AnswerStore};
use nekosheet::canvas::DrawingSurface;
use nekosheet::rendering::render_worksheet;
use nekosheet::{CanvasSize, PALETTE};

fn golden_path(name: &str) -> PathBuf {
    let mut p = PathBuf::from("tests/goldens/expected");
    p.push(name);
    p
}

// A fixed worksheet state: a few answers plus two deterministic strokes.
fn fixture() -> (AnswerStore, DrawingSurface) {
    let mut answers = AnswerStore::new();
    answers.set(AnswerKey::WorksheetName, "たま");
    answers.set(AnswerKey::Closest, "ソファ");
    answers.set(AnswerKey::Wish, "ひなたぼっこ");

    let mut surface = DrawingSurface::new(CanvasSize::default());
    surface.begin_stroke(100.0, 100.0);
    surface.extend_stroke(300.0, 120.0, PALETTE[0].value, 6.0);
    surface.end_stroke();
    surface.begin_stroke(350.0, 400.0);
    surface.extend_stroke(500.0, 250.0, PALETTE[2].value, 6.0);
    surface.end_stroke();

    (answers, surface)
}

#[test]
fn golden_worksheet_matches_fixture() {
    let (answers, surface) = fixture();
    let image = render_worksheet(&answers, &surface, 1200).expect("render");
    let digest = hex::encode(Sha256::digest(&image.png_data));

    let expected_path = golden_path("worksheet.sha256");
    if std::env::var("UPDATE_GOLDENS").is_ok() {
        fs::create_dir_all("tests/goldens/expected").ok();
        fs::write(&expected_path, &digest).expect("write golden");
        println!("Updated golden: {:?}", expected_path);
        return;
    }

    if !expected_path.exists() {
        println!(
            "No golden at {:?}; run with UPDATE_GOLDENS=1 to create it. Skipping.",
            expected_path
        );
        return;
    }

    let exp = fs::read_to_string(&expected_path).expect("unable to read golden");
    assert_eq!(digest, exp.trim());
}

#[test]
fn fixture_rendering_is_stable_across_runs() {
    let (answers, surface) = fixture();
    let a = render_worksheet(&answers, &surface, 1200).expect("render");
    let b = render_worksheet(&answers, &surface, 1200).expect("render");
    assert_eq!(
        hex::encode(Sha256::digest(&a.png_data)),
        hex::encode(Sha256::digest(&b.png_data))
    );
}
