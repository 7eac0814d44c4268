use tracing::error;

use crate::error::ConvertError;
use crate::host::{Editor, Notices, ProgressGuard};
use crate::llm::LatexBackend;
use crate::settings::Settings;

/// Runs one end-to-end conversion against the host editor.
///
/// Reads the selection, asks the backend for the equation and writes it back
/// wrapped in `$...$`. An empty or whitespace-only selection is reported as
/// [`ConvertError::NoSelection`] without issuing a request. Every outcome is
/// reported through `notices`; the in-progress notice is dismissed on all
/// paths. Failures are also returned so callers can set an exit status.
///
/// No retries, no handler-level timeout, no guard against overlapping
/// invocations; a second call while one is outstanding is the caller's
/// problem.
pub async fn convert_selection<E, N, B>(
    editor: &mut E,
    notices: &N,
    backend: &B,
    settings: &Settings,
) -> Result<(), ConvertError>
where
    E: Editor + ?Sized,
    N: Notices + ?Sized,
    B: LatexBackend + ?Sized,
{
    let selection = match editor.selection() {
        Some(s) if !s.trim().is_empty() => s,
        _ => {
            let err = ConvertError::NoSelection;
            notices.alert(&err.user_message(settings.provider));
            return Err(err);
        }
    };

    let _progress = ProgressGuard::new(notices, "Converting to LaTeX...");
    match backend.convert(settings, &selection).await {
        Ok(equation) => {
            editor.replace_selection(&format!("${equation}$"));
            notices.notify("Successfully converted to LaTeX!");
            Ok(())
        }
        Err(err) => {
            error!(target: "convert", error = %err, "conversion failed");
            notices.alert(&err.user_message(settings.provider));
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ScriptedBackend;
    use std::sync::Mutex;

    struct FakeEditor {
        selection: Option<String>,
        replaced: Option<String>,
    }

    impl FakeEditor {
        fn selecting(text: &str) -> Self {
            Self {
                selection: Some(text.into()),
                replaced: None,
            }
        }

        fn empty() -> Self {
            Self {
                selection: None,
                replaced: None,
            }
        }
    }

    impl Editor for FakeEditor {
        fn selection(&self) -> Option<String> {
            self.selection.clone()
        }
        fn replace_selection(&mut self, text: &str) {
            self.replaced = Some(text.to_string());
        }
    }

    #[derive(Default)]
    struct RecordingNotices {
        log: Mutex<Vec<String>>,
    }

    impl RecordingNotices {
        fn log(&self) -> Vec<String> {
            self.log.lock().unwrap().clone()
        }
    }

    impl Notices for RecordingNotices {
        fn notify(&self, message: &str) {
            self.log.lock().unwrap().push(format!("notify:{message}"));
        }
        fn alert(&self, message: &str) {
            self.log.lock().unwrap().push(format!("alert:{message}"));
        }
        fn show_progress(&self, _message: &str) {
            self.log.lock().unwrap().push("progress".into());
        }
        fn clear_progress(&self) {
            self.log.lock().unwrap().push("cleared".into());
        }
    }

    #[tokio::test]
    async fn success_replaces_selection_with_delimited_equation() {
        let mut editor = FakeEditor::selecting("x squared");
        let notices = RecordingNotices::default();
        let backend = ScriptedBackend::replying("x^2");
        convert_selection(&mut editor, &notices, &backend, &Settings::default())
            .await
            .unwrap();
        assert_eq!(editor.replaced.as_deref(), Some("$x^2$"));
        assert_eq!(backend.calls(), ["x squared"]);
        let log = notices.log();
        assert_eq!(log[0], "progress");
        assert!(log.contains(&"notify:Successfully converted to LaTeX!".to_string()));
        assert_eq!(log.last().unwrap(), "cleared");
    }

    #[tokio::test]
    async fn empty_selection_never_calls_the_backend() {
        let mut editor = FakeEditor::empty();
        let notices = RecordingNotices::default();
        let backend = ScriptedBackend::replying("x^2");
        let err = convert_selection(&mut editor, &notices, &backend, &Settings::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ConvertError::NoSelection));
        assert!(backend.calls().is_empty());
        assert!(editor.replaced.is_none());
        // the progress notice never appeared
        assert!(!notices.log().contains(&"progress".to_string()));
    }

    #[tokio::test]
    async fn whitespace_only_selection_counts_as_empty() {
        let mut editor = FakeEditor::selecting("   \n");
        let notices = RecordingNotices::default();
        let backend = ScriptedBackend::replying("x^2");
        let err = convert_selection(&mut editor, &notices, &backend, &Settings::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ConvertError::NoSelection));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn failure_reports_and_leaves_selection_untouched() {
        let mut editor = FakeEditor::selecting("x squared");
        let notices = RecordingNotices::default();
        let backend = ScriptedBackend::failing(401);
        let err = convert_selection(&mut editor, &notices, &backend, &Settings::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ConvertError::Transport { status: 401 }));
        assert!(editor.replaced.is_none());
        let log = notices.log();
        assert!(log.iter().any(|l| l.starts_with("alert:")));
        // the in-progress notice is dismissed on the failure path too
        assert_eq!(log.last().unwrap(), "cleared");
    }

    #[tokio::test]
    async fn empty_result_still_writes_delimiters() {
        // documented behavior: an empty decoded result renders as `$$`
        let mut editor = FakeEditor::selecting("nothing useful");
        let notices = RecordingNotices::default();
        let backend = ScriptedBackend::replying("");
        convert_selection(&mut editor, &notices, &backend, &Settings::default())
            .await
            .unwrap();
        assert_eq!(editor.replaced.as_deref(), Some("$$"));
    }
}
