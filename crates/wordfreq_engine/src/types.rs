use std::fmt;

use wordfreq_core::RankedEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Downloading,
    Decoding,
    Extracting,
    Sanitizing,
    Counting,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryProgress {
    pub stage: Stage,
    pub bytes: Option<u64>,
    pub tokens: Option<u64>,
}

impl QueryProgress {
    pub fn stage(stage: Stage) -> Self {
        Self {
            stage,
            bytes: None,
            tokens: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub original_url: String,
    pub final_url: String,
    pub redirect_count: usize,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

/// Plain text of a fetched page's body, markup removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    pub text: String,
    pub encoding_label: String,
    pub metadata: FetchMetadata,
}

/// Outcome of one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordCountReport {
    pub url: String,
    pub final_url: String,
    pub total_tokens: u64,
    pub distinct_tokens: usize,
    pub entries: Vec<RankedEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => match actual {
                Some(actual) => write!(f, "response too large ({actual} > {max_bytes} bytes)"),
                None => write!(f, "response too large (max {max_bytes} bytes)"),
            },
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::Decode => write!(f, "could not decode body"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
