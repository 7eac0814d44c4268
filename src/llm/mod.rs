//! Backend seam and wire plumbing for the two supported LLM protocols.

mod decode;
mod http;
mod mock;
mod prompt;

pub use decode::decode_stream;
pub use http::{HttpBackend, LOCAL_GENERATE_URL};
pub use mock::ScriptedBackend;
pub use prompt::instruction;

use async_trait::async_trait;

use crate::error::ConvertError;
use crate::settings::Settings;

/// Backend capable of turning natural language into a LaTeX equation.
///
/// Implementations perform at most one request per call and return the
/// equation text without the surrounding `$` delimiters.
#[async_trait]
pub trait LatexBackend: Send + Sync {
    async fn convert(&self, settings: &Settings, input: &str) -> Result<String, ConvertError>;
}
