/// Builds the fixed instruction wrapping the user's selection.
///
/// The selection is interpolated unescaped. The channel is trusted (a local
/// model or the user's own endpoint); callers exposing this to untrusted
/// input must sanitize it themselves.
///
/// # Examples
/// ```
/// use latexed::llm::instruction;
/// let p = instruction("x squared");
/// assert!(p.contains("\"x squared\""));
/// ```
pub fn instruction(input: &str) -> String {
    format!(
        "Convert the following natural language to a LaTeX equation, output ONLY THE EQUATION AND NOTHING ELSE: \"{input}\". Output should be in this format: $<output>$"
    )
}
