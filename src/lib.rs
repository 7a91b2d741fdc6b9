//! Nekosheet Worksheet Engine
//!
//! A headless engine for the cat's-eye-view worksheet activity: free-text
//! answers, a free-hand drawing canvas, a composite worksheet renderer that
//! produces PNG output, and a persistent gallery of saved worksheets.
//!
//! The engine owns all mutable state in a single [`App`] value and consumes
//! discrete UI events one at a time, which preserves the original's
//! single-threaded dispatch guarantee: no two handlers ever run concurrently.
//!
//! # Example
//!
//! ```
//! use nekosheet::{Config, UiEvent};
//!
//! # fn main() -> nekosheet::Result<()> {
//! let mut app = nekosheet::new_app(Config::default())?;
//! app.init()?;
//!
//! app.dispatch(UiEvent::Input {
//!     field: "closest".to_string(),
//!     value: "ソファ".to_string(),
//! })?;
//! app.dispatch(UiEvent::SaveToGallery)?;
//! assert_eq!(app.gallery().len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub use error::{Error, Result};

pub mod answers;
pub mod canvas;
pub mod gallery;
pub mod modal;
pub mod palette;
pub mod rendering;
pub mod storage;
pub mod views;

pub mod app;

// Re-export the main types at the crate root for ergonomic use
pub use answers::{AnswerKey, AnswerStore};
pub use app::{ActiveTab, App, DownloadFile, UiEvent};
pub use canvas::DrawingSurface;
pub use gallery::{Artwork, GalleryStore, PersistOutcome};
pub use modal::{ConfirmAction, ModalController};
pub use palette::{Color, PaletteColor, PALETTE};
pub use rendering::WorksheetImage;
pub use storage::{FileStorage, MemoryStorage, Storage};

/// Configuration for the worksheet engine
///
/// The defaults reproduce the original activity: a 700x500 drawing canvas
/// with 6px round strokes, a 1200-wide composite worksheet, and the
/// `catWorksheetGallery` storage key.
///
/// # Examples
///
/// ```
/// let cfg = nekosheet::Config::default();
/// assert_eq!(cfg.canvas.width, 700);
/// assert_eq!(cfg.storage_key, "catWorksheetGallery");
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Logical drawing canvas resolution
    pub canvas: CanvasSize,
    /// Stroke width in canvas pixels
    pub stroke_width: f32,
    /// Width of the composite worksheet image
    pub worksheet_width: u32,
    /// Storage key the gallery is persisted under
    pub storage_key: String,
    /// File-name stem for downloaded worksheets
    pub download_stem: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            canvas: CanvasSize::default(),
            stroke_width: 6.0,
            worksheet_width: 1200,
            storage_key: "catWorksheetGallery".to_string(),
            download_stem: "neko-worksheet".to_string(),
        }
    }
}

impl Config {
    /// Reject configurations the renderer cannot satisfy.
    pub fn validate(&self) -> Result<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(Error::ConfigError(
                "canvas dimensions must be non-zero".into(),
            ));
        }
        if self.worksheet_width < 2 * rendering::layout::PAGE_MARGIN {
            return Err(Error::ConfigError(format!(
                "worksheet width {} is narrower than its margins",
                self.worksheet_width
            )));
        }
        if !(self.stroke_width > 0.0) {
            return Err(Error::ConfigError("stroke width must be positive".into()));
        }
        Ok(())
    }
}

/// Logical canvas dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: 700,
            height: 500,
        }
    }
}

/// On-screen position and rendered size of the canvas element.
///
/// Screen coordinates are mapped into canvas space by subtracting the rect
/// origin and scaling by (logical resolution / rendered size), so drawing
/// stays correct when the host scales the canvas with CSS.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewRect {
    /// Identity mapping for the given logical size.
    pub fn identity(size: CanvasSize) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width: size.width as f32,
            height: size.height as f32,
        }
    }
}

/// Time source used for gallery ids and date stamps.
///
/// Backends that don't need wall-clock behavior (tests, replays) can supply
/// a fixed implementation.
pub trait Clock {
    /// Milliseconds since the Unix epoch
    fn now_ms(&self) -> u64;
    /// Local timestamp formatted as `YYYY/MM/DD HH:MM`
    fn stamp(&self) -> String;
}

/// Wall-clock implementation backed by the system time zone.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        chrono::Local::now().timestamp_millis().max(0) as u64
    }

    fn stamp(&self) -> String {
        chrono::Local::now().format("%Y/%m/%d %H:%M").to_string()
    }
}

/// Fixed clock for deterministic tests and replays.
#[derive(Debug, Clone)]
pub struct FixedClock {
    pub ms: u64,
    pub text: String,
}

impl FixedClock {
    pub fn new(ms: u64, text: &str) -> Self {
        Self {
            ms,
            text: text.to_string(),
        }
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> u64 {
        self.ms
    }

    fn stamp(&self) -> String {
        self.text.clone()
    }
}

/// Create an engine with the default backends: in-memory storage and the
/// system clock. Use [`App::with_backends`] to supply persistent storage.
pub fn new_app(config: Config) -> Result<App> {
    App::with_backends(
        config,
        Box::new(MemoryStorage::new()),
        Box::new(SystemClock),
    )
}
