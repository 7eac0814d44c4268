use std::io::Read;
use std::path::PathBuf;

use clap::Parser;

use latexed::{
    convert_selection, settings, Editor, FileStore, HttpBackend, Notices, Provider,
};

#[derive(Parser, Debug)]
#[command(name = "latexed", about = "Convert natural language to a LaTeX equation")]
struct Cli {
    /// Text to convert; read from stdin when omitted
    text: Option<String>,

    /// Path to the settings file
    #[arg(long, default_value = "latexed.json")]
    settings: PathBuf,

    /// Override the configured provider (ollama | openai)
    #[arg(long)]
    provider: Option<Provider>,

    /// Override the configured model name
    #[arg(long)]
    model: Option<String>,

    /// API key for OpenAI-compatible endpoints
    #[arg(long)]
    api_key: Option<String>,

    /// Chat completion endpoint for OpenAI-compatible providers
    #[arg(long)]
    api_endpoint: Option<String>,

    /// Persist the effective settings back to the settings file
    #[arg(long)]
    save: bool,

    /// Logging verbosity level
    #[arg(long, default_value = "info")]
    log_level: tracing::Level,
}

/// Treats the CLI input text as the host editor's selection.
struct TerminalEditor {
    selection: String,
    replacement: Option<String>,
}

impl TerminalEditor {
    fn new(selection: String) -> Self {
        Self {
            selection,
            replacement: None,
        }
    }
}

impl Editor for TerminalEditor {
    fn selection(&self) -> Option<String> {
        if self.selection.is_empty() {
            None
        } else {
            Some(self.selection.clone())
        }
    }

    fn replace_selection(&mut self, text: &str) {
        self.replacement = Some(text.to_string());
    }
}

/// Prints notices to stderr, leaving stdout for the equation.
struct TerminalNotices;

impl Notices for TerminalNotices {
    fn notify(&self, message: &str) {
        eprintln!("{message}");
    }

    fn alert(&self, message: &str) {
        eprintln!("{message}");
    }

    fn show_progress(&self, message: &str) {
        eprintln!("{message}");
    }

    fn clear_progress(&self) {}
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .init();

    let store = FileStore::new(&cli.settings);
    let mut current = settings::load(&store)?;
    if let Some(provider) = cli.provider {
        current.provider = provider;
    }
    if let Some(model) = cli.model {
        current.model = model;
    }
    if let Some(api_key) = cli.api_key {
        current.api_key = api_key;
    }
    if let Some(api_endpoint) = cli.api_endpoint {
        current.api_endpoint = api_endpoint;
    }
    if cli.save {
        settings::save(&store, &current)?;
    }

    let text = match cli.text {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf.trim_end().to_string()
        }
    };

    let mut editor = TerminalEditor::new(text);
    let notices = TerminalNotices;
    let backend = HttpBackend::new();
    match convert_selection(&mut editor, &notices, &backend, &current).await {
        Ok(()) => {
            println!("{}", editor.replacement.unwrap_or_default());
            Ok(())
        }
        // the failure was already reported through the notices
        Err(_) => std::process::exit(1),
    }
}
