/// Number of entries reported per query unless configured otherwise.
pub const DEFAULT_TOP_K: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    /// Waiting for the user to enter a line.
    #[default]
    Prompting,
    /// A query for `url` is running.
    Processing { url: String },
    /// The user quit or input ended; nothing more happens.
    Exited,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    phase: Phase,
    top_k: usize,
    queries_run: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_top_k(DEFAULT_TOP_K)
    }

    pub fn with_top_k(top_k: usize) -> Self {
        Self {
            phase: Phase::Prompting,
            top_k,
            queries_run: 0,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Number of queries started so far; also the sequence number of the latest one.
    pub fn queries_run(&self) -> u64 {
        self.queries_run
    }

    pub fn is_exited(&self) -> bool {
        self.phase == Phase::Exited
    }

    pub(crate) fn is_prompting(&self) -> bool {
        self.phase == Phase::Prompting
    }

    pub(crate) fn is_processing(&self, url: &str) -> bool {
        matches!(&self.phase, Phase::Processing { url: pending } if pending == url)
    }

    pub(crate) fn begin_query(&mut self, url: String) {
        self.queries_run += 1;
        self.phase = Phase::Processing { url };
    }

    pub(crate) fn finish_query(&mut self) {
        self.phase = Phase::Prompting;
    }

    pub(crate) fn exit(&mut self) {
        self.phase = Phase::Exited;
    }
}
