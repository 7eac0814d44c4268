use thiserror::Error;

use crate::settings::Provider;

/// Failures that can occur during one conversion attempt.
///
/// Every variant surfaces to the user through a long-lived notice; nothing is
/// retried and nothing aborts the host.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The command fired with nothing selected. No request is issued.
    #[error("no text selected")]
    NoSelection,

    /// The endpoint answered with a non-success HTTP status.
    #[error("HTTP error! status: {status}")]
    Transport { status: u16 },

    /// The response body stream failed partway through.
    #[error("unable to read response from the model endpoint: {0}")]
    UnreadableResponse(#[source] reqwest::Error),

    /// A response line was not parseable JSON.
    #[error("failed to parse response from model: {0}")]
    MalformedResponse(#[source] serde_json::Error),

    /// The request never went out (refused connection, bad URL, DNS).
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),
}

impl ConvertError {
    /// User-facing message, worded for the configured provider so the user
    /// knows whether to check the local endpoint or their key/endpoint pair.
    pub fn user_message(&self, provider: Provider) -> String {
        match (self, provider) {
            (Self::NoSelection, _) => {
                "No text selected. Please select the text you want to convert to LaTeX.".into()
            }
            (Self::Transport { .. }, Provider::LocalGenerate) => format!(
                "Failed to connect to Ollama. Please ensure Ollama is running and accessible at http://localhost:11434. Error: {self}"
            ),
            (Self::Transport { .. }, Provider::OpenAiCompatible) => format!(
                "Failed to connect to your model. Please ensure the API key and endpoint are correct. Error: {self}"
            ),
            (Self::UnreadableResponse(_), Provider::LocalGenerate) => format!(
                "Failed to read the response from Ollama. The connection might have been interrupted. Error: {self}"
            ),
            (Self::UnreadableResponse(_), Provider::OpenAiCompatible) => format!(
                "Failed to read the response from your model. The connection might have been interrupted. Error: {self}"
            ),
            (Self::MalformedResponse(_), Provider::LocalGenerate) => format!(
                "Received an invalid response from Ollama. The model might be having issues. Error: {self}"
            ),
            (Self::MalformedResponse(_), Provider::OpenAiCompatible) => format!(
                "Received an invalid response from your model. The model might be having issues. Error: {self}"
            ),
            (Self::Request(_), _) => format!("Error converting to LaTeX: {self}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_message_differs_by_provider() {
        let err = ConvertError::Transport { status: 401 };
        let local = err.user_message(Provider::LocalGenerate);
        let remote = err.user_message(Provider::OpenAiCompatible);
        assert!(local.contains("http://localhost:11434"));
        assert!(remote.contains("API key and endpoint"));
        assert!(local.contains("401"));
        assert!(remote.contains("401"));
    }

    #[test]
    fn no_selection_message_names_the_fix() {
        let msg = ConvertError::NoSelection.user_message(Provider::LocalGenerate);
        assert!(msg.contains("select the text"));
    }
}
