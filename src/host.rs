//! Traits for the host collaborators: the editor surface and the notice UI.

/// Host editor surface the conversion command runs against.
pub trait Editor {
    /// Currently selected text, if any.
    fn selection(&self) -> Option<String>;
    /// Replaces the current selection with `text`.
    fn replace_selection(&mut self, text: &str);
}

/// Transient user-facing messages shown by the host.
pub trait Notices {
    /// Shows a message that disappears on its own.
    fn notify(&self, message: &str);
    /// Shows a long-lived message for failures.
    fn alert(&self, message: &str);
    /// Shows the persistent in-progress message.
    fn show_progress(&self, message: &str);
    /// Dismisses the in-progress message.
    fn clear_progress(&self);
}

/// Guard that clears the in-progress notice when dropped.
///
/// The notice must be dismissed on every exit path of the conversion command,
/// including early returns and errors; tying dismissal to `Drop` makes that
/// unconditional.
pub struct ProgressGuard<'a, N: Notices + ?Sized> {
    notices: &'a N,
}

impl<'a, N: Notices + ?Sized> ProgressGuard<'a, N> {
    /// Shows `message` and returns the guard that will dismiss it.
    pub fn new(notices: &'a N, message: &str) -> Self {
        notices.show_progress(message);
        Self { notices }
    }
}

impl<N: Notices + ?Sized> Drop for ProgressGuard<'_, N> {
    fn drop(&mut self) {
        self.notices.clear_progress();
    }
}
