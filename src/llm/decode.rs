use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use serde_json::Value;
use tracing::{debug, trace};

use crate::error::ConvertError;
use crate::settings::Provider;

/// Accumulates the text fragments of a newline-delimited JSON response.
///
/// Network chunks are not assumed to align to line boundaries: bytes are
/// buffered until a newline arrives and the trailing partial line is carried
/// across reads, then flushed at end of stream. Blank lines are skipped. A
/// line that is not valid JSON fails the whole decode — skipping it would
/// silently truncate the equation. A line without the provider's text field
/// is metadata, not an error.
///
/// Returns the accumulated text trimmed of surrounding whitespace; an empty
/// stream decodes to an empty string.
pub async fn decode_stream<S>(provider: Provider, mut stream: S) -> Result<String, ConvertError>
where
    S: Stream<Item = Result<Bytes, reqwest::Error>> + Unpin,
{
    let mut pending: Vec<u8> = Vec::new();
    let mut equation = String::new();
    while let Some(chunk) = stream.next().await {
        let bytes = chunk.map_err(ConvertError::UnreadableResponse)?;
        pending.extend_from_slice(&bytes);
        while let Some(pos) = pending.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = pending.drain(..=pos).collect();
            append_fragment(provider, &String::from_utf8_lossy(&line), &mut equation)?;
        }
    }
    append_fragment(provider, &String::from_utf8_lossy(&pending), &mut equation)?;
    debug!(target: "llm", %equation, "decoded response");
    Ok(equation.trim().to_string())
}

fn append_fragment(
    provider: Provider,
    line: &str,
    equation: &mut String,
) -> Result<(), ConvertError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(());
    }
    if let Some(text) = fragment(provider, line)? {
        trace!(target: "llm", token = %text, "stream fragment");
        equation.push_str(&text);
    }
    Ok(())
}

/// Extracts the text fragment carried by one response line, if any.
fn fragment(provider: Provider, line: &str) -> Result<Option<String>, ConvertError> {
    let value: Value = serde_json::from_str(line).map_err(ConvertError::MalformedResponse)?;
    let text = match provider {
        Provider::LocalGenerate => value.get("response").and_then(Value::as_str),
        Provider::OpenAiCompatible => value
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(Value::as_str),
    };
    Ok(text.map(str::to_owned))
}
