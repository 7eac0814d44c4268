//! Replace natural-language text with an equivalent LaTeX equation.
//!
//! The crate sends the text to a locally hosted generation endpoint or any
//! OpenAI-compatible chat completion endpoint, decodes the newline-delimited
//! JSON reply as it streams in and hands the assembled equation back to the
//! host editor wrapped in `$...$`. The host's selection, persistence and
//! notification surfaces are traits in [`host`] and [`settings`]; a small CLI
//! front end ships as the `latexed` binary.

pub mod convert;
pub mod error;
pub mod host;
pub mod llm;
pub mod settings;

pub use convert::convert_selection;
pub use error::ConvertError;
pub use host::{Editor, Notices, ProgressGuard};
pub use llm::{HttpBackend, LatexBackend, ScriptedBackend};
pub use settings::{FileStore, Provider, Settings, SettingsStore};
