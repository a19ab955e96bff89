#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Print the prompt (no newline) and read one line.
    ShowPrompt,
    /// Fetch `url` and report its `k` most frequent words.
    RunQuery { url: String, k: usize },
    /// Print one line of output.
    Print(String),
    /// Stop the loop.
    Exit,
}
