//! Worksheet rendering: composes the Answer Store and a Drawing Surface
//! snapshot into a single fixed-layout PNG.
//!
//! Rendering is a pure function of its inputs and has no persisted side
//! effects; callers decide whether the output becomes a download or a
//! gallery artwork.

pub mod layout;
pub mod paint;
pub mod raster;

use base64::Engine as Base64Engine;

use crate::answers::{AnswerKey, AnswerStore};
use crate::canvas::DrawingSurface;
use crate::error::Result;

/// A rendered worksheet page.
#[derive(Debug, Clone)]
pub struct WorksheetImage {
    pub width: u32,
    pub height: u32,
    pub png_data: Vec<u8>,
}

impl WorksheetImage {
    /// Encode as a `data:image/png;base64,` URI, the format stored in the
    /// gallery and displayed as thumbnails.
    pub fn to_data_uri(&self) -> String {
        let b64 = base64::engine::general_purpose::STANDARD.encode(&self.png_data);
        format!("data:image/png;base64,{}", b64)
    }
}

/// Render the composite worksheet at the given page width.
pub fn render_worksheet(
    answers: &AnswerStore,
    surface: &DrawingSurface,
    width: u32,
) -> Result<WorksheetImage> {
    let plan = layout::plan_worksheet(answers, width);
    raster::rasterize(&plan, surface)
}

/// File name for a downloaded worksheet: `<stem>-<name or "my-room">.png`.
/// The name is taken verbatim; sanitization is not guaranteed.
pub fn download_file_name(stem: &str, answers: &AnswerStore) -> String {
    let name = answers.get(AnswerKey::WorksheetName);
    let name = if name.is_empty() { "my-room" } else { name };
    format!("{}-{}.png", stem, name)
}
