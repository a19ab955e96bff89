#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The driver is ready; ask for the first line.
    Started,
    /// User entered a line (line terminator already removed).
    LineEntered(String),
    /// Standard input reached end of file.
    InputClosed,
    /// The pipeline finished for `url`; `Err` carries a human-readable reason.
    QueryFinished {
        url: String,
        result: Result<Vec<crate::RankedEntry>, String>,
    },
}
