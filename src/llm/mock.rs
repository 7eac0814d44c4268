use std::sync::Mutex;

use async_trait::async_trait;
use tracing::trace;

use super::LatexBackend;
use crate::error::ConvertError;
use crate::settings::Settings;

/// Scripted backend returning a fixed outcome and recording its inputs.
///
/// Useful for exercising the conversion handler without a network.
///
/// # Example
/// ```
/// use latexed::llm::ScriptedBackend;
/// let backend = ScriptedBackend::replying("x^2");
/// assert!(backend.calls().is_empty());
/// ```
pub struct ScriptedBackend {
    reply: Result<String, u16>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    /// Backend that always succeeds with `reply`.
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Ok(reply.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Backend that always fails with a transport error of `status`.
    pub fn failing(status: u16) -> Self {
        Self {
            reply: Err(status),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Inputs the backend has been called with, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LatexBackend for ScriptedBackend {
    async fn convert(&self, _settings: &Settings, input: &str) -> Result<String, ConvertError> {
        trace!(target: "llm", %input, "scripted conversion");
        self.calls.lock().unwrap().push(input.to_string());
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(status) => Err(ConvertError::Transport { status: *status }),
        }
    }
}
