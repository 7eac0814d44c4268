use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::str::FromStr;

/// Backend wire protocol selected in settings.
///
/// Request building and response-fragment extraction are exhaustive matches
/// over this tag, so a third provider becomes a compile-checked extension
/// point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provider {
    /// Local streaming generation endpoint (Ollama `/api/generate`).
    #[serde(rename = "ollama")]
    LocalGenerate,
    /// OpenAI-compatible chat completion endpoint.
    #[serde(rename = "openai")]
    OpenAiCompatible,
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ollama" => Ok(Self::LocalGenerate),
            "openai" => Ok(Self::OpenAiCompatible),
            other => Err(format!("unknown provider '{other}' (expected 'ollama' or 'openai')")),
        }
    }
}

/// User configuration for the conversion backend.
///
/// Field names mirror the persisted JSON shape. `api_key` and `api_endpoint`
/// only matter for [`Provider::OpenAiCompatible`] and are checked at request
/// time, not load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub provider: Provider,
    pub model: String,
    pub api_key: String,
    pub api_endpoint: String,
    /// Keys written by newer versions survive a load/save round trip.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            provider: Provider::LocalGenerate,
            model: "llama2".into(),
            api_key: String::new(),
            api_endpoint: String::new(),
            extra: Map::new(),
        }
    }
}

impl Settings {
    /// Shallow-merges a persisted object over the defaults.
    ///
    /// Missing fields keep their default, unrecognized fields land in
    /// [`Settings::extra`]. A value that does not deserialize at all falls
    /// back to the defaults wholesale.
    ///
    /// # Examples
    /// ```
    /// use latexed::Settings;
    /// use serde_json::json;
    ///
    /// let s = Settings::from_persisted(json!({"model": "mistral", "theme": "dark"}));
    /// assert_eq!(s.model, "mistral");
    /// assert_eq!(s.extra["theme"], json!("dark"));
    /// ```
    pub fn from_persisted(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }
}

/// Host-owned persistence for [`Settings`].
///
/// The host decides format and location; the crate only sees a JSON object.
pub trait SettingsStore {
    /// Returns the persisted object, or `None` if nothing was saved yet.
    fn load(&self) -> anyhow::Result<Option<Value>>;
    /// Persists the full object.
    fn save(&self, value: &Value) -> anyhow::Result<()>;
}

/// Loads settings through `store`, merging persisted values over defaults.
pub fn load(store: &dyn SettingsStore) -> anyhow::Result<Settings> {
    Ok(match store.load()? {
        Some(value) => Settings::from_persisted(value),
        None => Settings::default(),
    })
}

/// Persists `settings` through `store`.
pub fn save(store: &dyn SettingsStore, settings: &Settings) -> anyhow::Result<()> {
    store.save(&serde_json::to_value(settings)?)
}

/// File-backed [`SettingsStore`] used by the CLI front end.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SettingsStore for FileStore {
    fn load(&self) -> anyhow::Result<Option<Value>> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(serde_json::from_str(&text)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, value: &Value) -> anyhow::Result<()> {
        std::fs::write(&self.path, serde_json::to_string_pretty(value)?)?;
        Ok(())
    }
}
