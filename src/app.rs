//! Application core: owns all mutable state and consumes discrete UI
//! events one at a time.
//!
//! The dispatcher takes `&mut self`, so the type system enforces the
//! original's cooperative guarantee that no two handlers run concurrently.
//! While a modal is active, worksheet-mutating events are ignored, which
//! makes the original's click-swallowing overlay explicit.

use serde::{Deserialize, Serialize};

use crate::answers::{AnswerKey, AnswerStore};
use crate::canvas::DrawingSurface;
use crate::error::{Error, Result};
use crate::gallery::GalleryStore;
use crate::modal::{ConfirmAction, ModalController};
use crate::palette::{self, Color, PALETTE};
use crate::rendering;
use crate::storage::Storage;
use crate::views;
use crate::{Clock, Config, ViewRect};

/// The two main views of the activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveTab {
    Worksheet,
    Gallery,
}

/// One discrete UI event, the engine's entire input surface.
///
/// The serialized form is the CLI wire format; `Input.field` carries the
/// original field ids (`closest`, `redBall`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum UiEvent {
    PointerDown { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    PointerUp,
    PointerLeave,
    TouchStart { x: f32, y: f32 },
    TouchMove { x: f32, y: f32 },
    TouchEnd,
    Input { field: String, value: String },
    SelectColor { index: usize },
    SwitchTab { tab: ActiveTab },
    SaveToGallery,
    DownloadWorksheet,
    RequestResetCanvas,
    RequestResetAll,
    DeleteArtwork { id: u64 },
    ModalOk,
    ConfirmOk,
    ConfirmCancel,
    ConfirmClose,
    BackgroundClick,
    Escape,
    SetViewRect { left: f32, top: f32, width: f32, height: f32 },
}

impl UiEvent {
    /// Events that remain live while a modal is active.
    fn is_modal_control(&self) -> bool {
        matches!(
            self,
            UiEvent::ModalOk
                | UiEvent::ConfirmOk
                | UiEvent::ConfirmCancel
                | UiEvent::ConfirmClose
                | UiEvent::BackgroundClick
                | UiEvent::Escape
                | UiEvent::SetViewRect { .. }
        )
    }
}

/// A worksheet PNG handed to the host for a browser-native save-as.
#[derive(Debug, Clone)]
pub struct DownloadFile {
    pub name: String,
    pub png_data: Vec<u8>,
}

type OnDownloadHandler = Box<dyn Fn(&DownloadFile)>;

/// The worksheet application: Answer Store, Drawing Surface, Gallery,
/// Modal Controller, and the current palette selection.
pub struct App {
    config: Config,
    answers: AnswerStore,
    surface: DrawingSurface,
    current_color: Color,
    active_tab: ActiveTab,
    gallery: GalleryStore,
    modal: ModalController,
    storage: Box<dyn Storage>,
    clock: Box<dyn Clock>,
    view_rect: ViewRect,
    on_download: Option<OnDownloadHandler>,
}

impl App {
    /// Build an app over explicit storage and clock backends.
    pub fn with_backends(
        config: Config,
        storage: Box<dyn Storage>,
        clock: Box<dyn Clock>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            answers: AnswerStore::new(),
            surface: DrawingSurface::new(config.canvas),
            current_color: palette::default_color(),
            active_tab: ActiveTab::Worksheet,
            gallery: GalleryStore::new(&config.storage_key),
            modal: ModalController::new(),
            storage,
            clock,
            view_rect: ViewRect::identity(config.canvas),
            on_download: None,
        })
    }

    /// Restore the gallery from storage. Missing or unreadable data leaves
    /// the gallery empty; this never fails.
    pub fn init(&mut self) -> Result<()> {
        self.gallery.load(&*self.storage);
        Ok(())
    }

    /// Register a callback receiving downloaded worksheets. Without one,
    /// download events render and then drop the bytes with a log line.
    pub fn on_download<F>(&mut self, cb: F)
    where
        F: Fn(&DownloadFile) + 'static,
    {
        self.on_download = Some(Box::new(cb));
    }

    /// Remove a previously registered download callback if any.
    pub fn clear_on_download(&mut self) {
        self.on_download = None;
    }

    pub fn answers(&self) -> &AnswerStore {
        &self.answers
    }

    pub fn surface(&self) -> &DrawingSurface {
        &self.surface
    }

    pub fn gallery(&self) -> &GalleryStore {
        &self.gallery
    }

    pub fn modal(&self) -> &ModalController {
        &self.modal
    }

    pub fn current_color(&self) -> Color {
        self.current_color
    }

    pub fn active_tab(&self) -> ActiveTab {
        self.active_tab
    }

    pub fn scroll_locked(&self) -> bool {
        self.modal.scroll_locked()
    }

    /// Gallery grid markup for the host to mount.
    pub fn gallery_grid_html(&self) -> String {
        views::gallery_grid(self.gallery.items())
    }

    /// Displayed gallery count.
    pub fn gallery_count_html(&self) -> String {
        views::gallery_count(self.gallery.len())
    }

    /// Palette button markup with the current color marked active.
    pub fn palette_html(&self) -> String {
        views::palette_buttons(self.current_color)
    }

    /// Render the composite worksheet without saving or downloading.
    pub fn render_worksheet(&self) -> Result<rendering::WorksheetImage> {
        rendering::render_worksheet(&self.answers, &self.surface, self.config.worksheet_width)
    }

    /// Consume one UI event. Handlers run to completion before the next
    /// event is dispatched; an error aborts only the current handler.
    pub fn dispatch(&mut self, event: UiEvent) -> Result<()> {
        if self.modal.any_active() && !event.is_modal_control() {
            log::debug!("event ignored while modal active: {:?}", event);
            return Ok(());
        }

        match event {
            UiEvent::PointerDown { x, y } => self.begin_stroke(x, y),
            UiEvent::TouchStart { x, y } => {
                // Touch default (scroll/gesture) is suppressed by contract
                log::trace!("touch start: default suppressed");
                self.begin_stroke(x, y);
            }
            UiEvent::PointerMove { x, y } => self.extend_stroke(x, y),
            UiEvent::TouchMove { x, y } => {
                log::trace!("touch move: default suppressed");
                self.extend_stroke(x, y);
            }
            UiEvent::PointerUp | UiEvent::PointerLeave | UiEvent::TouchEnd => {
                self.surface.end_stroke();
            }
            UiEvent::Input { field, value } => {
                let key = AnswerKey::from_field_id(&field)
                    .ok_or_else(|| Error::EventError(format!("unknown input field: {}", field)))?;
                self.answers.set(key, &value);
            }
            UiEvent::SelectColor { index } => {
                let entry = PALETTE.get(index).ok_or_else(|| {
                    Error::EventError(format!("palette index out of range: {}", index))
                })?;
                self.current_color = entry.value;
            }
            UiEvent::SwitchTab { tab } => self.active_tab = tab,
            UiEvent::SaveToGallery => self.save_to_gallery()?,
            UiEvent::DownloadWorksheet => self.download_worksheet()?,
            UiEvent::RequestResetCanvas => self.modal.show_confirm(
                "⚠️ キャンバスをリセットしますか?",
                "キャンバスに描いた絵がすべて消えてしまいます。この操作はもとには戻せません。本当によろしいですか?",
                ConfirmAction::ResetCanvas,
            ),
            UiEvent::RequestResetAll => self.modal.show_confirm(
                "⚠️ ワークシートをぜんぶリセットしますか?",
                "名前、すべての質問への回答、およびキャンバスの絵が消えます。この操作はもとには戻せません。",
                ConfirmAction::ResetAll,
            ),
            UiEvent::DeleteArtwork { id } => {
                // No confirmation at this level; the original didn't gate it
                self.gallery.remove(id);
                self.gallery.persist(&mut *self.storage);
                self.modal
                    .show_info("さくひんを削除", "ギャラリーから削除しました。");
            }
            UiEvent::ModalOk => self.modal.close_info(),
            UiEvent::ConfirmOk => {
                if let Some(action) = self.modal.take_confirmed() {
                    self.run_confirm(action);
                }
            }
            UiEvent::ConfirmCancel | UiEvent::ConfirmClose => self.modal.cancel_confirm(),
            UiEvent::BackgroundClick | UiEvent::Escape => {
                if self.modal.confirm().is_some() {
                    self.modal.cancel_confirm();
                } else {
                    self.modal.close_info();
                }
            }
            UiEvent::SetViewRect {
                left,
                top,
                width,
                height,
            } => {
                self.view_rect = ViewRect {
                    left,
                    top,
                    width,
                    height,
                };
            }
        }
        Ok(())
    }

    fn begin_stroke(&mut self, client_x: f32, client_y: f32) {
        let (x, y) = self.surface.map_coords(self.view_rect, client_x, client_y);
        self.surface.begin_stroke(x, y);
    }

    fn extend_stroke(&mut self, client_x: f32, client_y: f32) {
        if !self.surface.is_drawing() {
            return;
        }
        let (x, y) = self.surface.map_coords(self.view_rect, client_x, client_y);
        self.surface
            .extend_stroke(x, y, self.current_color, self.config.stroke_width);
    }

    fn save_to_gallery(&mut self) -> Result<()> {
        let image = self.render_worksheet()?;
        let data_uri = image.to_data_uri();
        self.gallery.append(
            self.answers.get(AnswerKey::WorksheetName),
            data_uri,
            &*self.clock,
        );
        self.gallery.persist(&mut *self.storage);
        self.modal.show_info(
            "ほぞんしました!",
            "ギャラリーに新しいさくひんが追加されました。",
        );
        Ok(())
    }

    fn download_worksheet(&mut self) -> Result<()> {
        let image = self.render_worksheet()?;
        let file = DownloadFile {
            name: rendering::download_file_name(&self.config.download_stem, &self.answers),
            png_data: image.png_data,
        };
        match &self.on_download {
            Some(cb) => cb(&file),
            None => log::warn!(
                "download {} dropped: no handler registered ({} bytes)",
                file.name,
                file.png_data.len()
            ),
        }
        self.modal
            .show_info("ダウンロード完了", "ワークシートPNGをダウンロードしました。");
        Ok(())
    }

    fn run_confirm(&mut self, action: ConfirmAction) {
        match action {
            ConfirmAction::ResetCanvas => {
                self.surface.reset();
                self.modal
                    .show_info("キャンバスをリセット", "お絵かきをすべて消しました!");
            }
            ConfirmAction::ResetAll => {
                self.answers.reset();
                self.surface.reset();
                self.modal.show_info(
                    "リセット完了",
                    "ワークシートの回答とお絵かきをすべて消去し、初期状態に戻しました。",
                );
            }
        }
    }
}
