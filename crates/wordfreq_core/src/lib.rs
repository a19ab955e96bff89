//! Word counter core: text pipeline and the pure interactive-loop state machine.
mod effect;
mod frequency;
mod msg;
mod rank;
mod state;
mod text;
mod update;
mod view;

pub use effect::Effect;
pub use frequency::{count, total_tokens, FrequencyTable};
pub use msg::Msg;
pub use rank::{top_k, RankedEntry};
pub use state::{AppState, Phase, DEFAULT_TOP_K};
pub use text::tokenize;
pub use update::{is_exit_command, update};
pub use view::{entry_line, failure_line, header_line, render_report, FAREWELL, PROMPT};

/// Runs tokenize → count → rank over an already extracted text blob.
pub fn top_k_words(text: &str, k: usize) -> Vec<RankedEntry> {
    top_k(&count(&tokenize(text)), k)
}
