use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, trace};

use super::{decode_stream, instruction, LatexBackend};
use crate::error::ConvertError;
use crate::settings::{Provider, Settings};

/// Fixed loopback endpoint for the local generation protocol.
pub const LOCAL_GENERATE_URL: &str = "http://localhost:11434/api/generate";

/// Backend that POSTs to the configured provider and streams the reply.
///
/// # Example
/// ```
/// use latexed::llm::HttpBackend;
/// let backend = HttpBackend::new();
/// # let _ = backend;
/// ```
#[derive(Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    local_url: String,
}

impl Default for HttpBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpBackend {
    pub fn new() -> Self {
        Self::with_local_url(LOCAL_GENERATE_URL)
    }

    /// Points [`Provider::LocalGenerate`] at a different URL. Used by tests;
    /// the OpenAI-compatible endpoint always comes from settings.
    pub fn with_local_url(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            local_url: url.into(),
        }
    }

    /// Provider-specific endpoint for `settings`.
    fn endpoint(&self, settings: &Settings) -> String {
        match settings.provider {
            Provider::LocalGenerate => self.local_url.clone(),
            Provider::OpenAiCompatible => settings.api_endpoint.clone(),
        }
    }

    /// Provider-specific request body wrapping `input`.
    fn body(settings: &Settings, input: &str) -> serde_json::Value {
        match settings.provider {
            Provider::LocalGenerate => json!({
                "model": settings.model,
                "prompt": instruction(input),
                "stream": true,
            }),
            Provider::OpenAiCompatible => json!({
                "model": settings.model,
                "messages": [{"role": "user", "content": instruction(input)}],
            }),
        }
    }
}

#[async_trait]
impl LatexBackend for HttpBackend {
    async fn convert(&self, settings: &Settings, input: &str) -> Result<String, ConvertError> {
        let url = self.endpoint(settings);
        let body = Self::body(settings, input);
        trace!(target: "llm", %url, body = %body, "conversion prompt");

        let mut request = self.client.post(&url).json(&body);
        if let Provider::OpenAiCompatible = settings.provider {
            request = request.bearer_auth(&settings.api_key);
        }
        let response = request.send().await.map_err(ConvertError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConvertError::Transport {
                status: status.as_u16(),
            });
        }

        let equation = decode_stream(settings.provider, response.bytes_stream()).await?;
        debug!(target: "llm", %equation, "conversion full response");
        Ok(equation)
    }
}
