//! Modal Controller: the info and confirm dialog primitives.
//!
//! Two independent dialog kinds share one concept: set title/message text
//! and mark active. The confirm dialog additionally holds a single pending
//! action; opening it again overwrites any previously pending action, so
//! at most one exists at a time. Page scrolling is suspended while any
//! modal is active.

/// Destructive operation awaiting user confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    ResetCanvas,
    ResetAll,
}

/// Title and message of an open dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalContent {
    pub title: String,
    pub message: String,
}

/// Process-wide modal state: one optional info dialog, one optional
/// confirm dialog with its pending action.
#[derive(Debug, Default)]
pub struct ModalController {
    info: Option<ModalContent>,
    confirm: Option<ModalContent>,
    pending: Option<ConfirmAction>,
}

impl ModalController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the info modal. Dismissed only by an explicit close.
    pub fn show_info(&mut self, title: &str, message: &str) {
        self.info = Some(ModalContent {
            title: title.to_string(),
            message: message.to_string(),
        });
    }

    pub fn close_info(&mut self) {
        self.info = None;
    }

    pub fn info(&self) -> Option<&ModalContent> {
        self.info.as_ref()
    }

    /// Open the confirm modal and register the pending action, overwriting
    /// any action registered earlier.
    pub fn show_confirm(&mut self, title: &str, message: &str, action: ConfirmAction) {
        self.confirm = Some(ModalContent {
            title: title.to_string(),
            message: message.to_string(),
        });
        self.pending = Some(action);
    }

    pub fn confirm(&self) -> Option<&ModalContent> {
        self.confirm.as_ref()
    }

    pub fn pending(&self) -> Option<ConfirmAction> {
        self.pending
    }

    /// Resolve the confirm dialog affirmatively: closes it and hands the
    /// pending action to the caller exactly once.
    pub fn take_confirmed(&mut self) -> Option<ConfirmAction> {
        self.confirm = None;
        self.pending.take()
    }

    /// Resolve the confirm dialog negatively: closes it and drops the
    /// pending action without executing it.
    pub fn cancel_confirm(&mut self) {
        self.confirm = None;
        self.pending = None;
    }

    /// Whether any dialog is currently active.
    pub fn any_active(&self) -> bool {
        self.info.is_some() || self.confirm.is_some()
    }

    /// Page scrolling is suspended exactly while a dialog is active.
    pub fn scroll_locked(&self) -> bool {
        self.any_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_modal_opens_and_closes() {
        let mut modal = ModalController::new();
        assert!(!modal.any_active());
        modal.show_info("ほぞんしました!", "ギャラリーに新しいさくひんが追加されました。");
        assert!(modal.any_active());
        assert!(modal.scroll_locked());
        assert_eq!(modal.info().unwrap().title, "ほぞんしました!");
        modal.close_info();
        assert!(!modal.any_active());
        assert!(!modal.scroll_locked());
    }

    #[test]
    fn confirm_holds_one_pending_action() {
        let mut modal = ModalController::new();
        modal.show_confirm("t1", "m1", ConfirmAction::ResetCanvas);
        // A second open overwrites the pending action
        modal.show_confirm("t2", "m2", ConfirmAction::ResetAll);
        assert_eq!(modal.pending(), Some(ConfirmAction::ResetAll));
        assert_eq!(modal.confirm().unwrap().title, "t2");

        assert_eq!(modal.take_confirmed(), Some(ConfirmAction::ResetAll));
        // Executed exactly once: the action is gone afterwards
        assert_eq!(modal.take_confirmed(), None);
        assert!(!modal.any_active());
    }

    #[test]
    fn cancel_never_yields_the_action() {
        let mut modal = ModalController::new();
        modal.show_confirm("t", "m", ConfirmAction::ResetCanvas);
        modal.cancel_confirm();
        assert_eq!(modal.pending(), None);
        assert_eq!(modal.take_confirmed(), None);
        assert!(!modal.any_active());
    }

    #[test]
    fn scroll_stays_locked_while_either_dialog_is_open() {
        let mut modal = ModalController::new();
        modal.show_confirm("t", "m", ConfirmAction::ResetAll);
        modal.show_info("t2", "m2");
        modal.cancel_confirm();
        assert!(modal.scroll_locked());
        modal.close_info();
        assert!(!modal.scroll_locked());
    }
}
