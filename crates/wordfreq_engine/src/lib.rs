//! Word counter engine: fetch, decode, extract and count, one query at a time.
mod decode;
mod engine;
mod extract;
mod fetch;
mod sanitize;
mod types;

pub use decode::{decode_html, DecodeError, DecodedHtml};
pub use engine::{EngineError, WordCountEngine, WordCounter};
pub use extract::{BodyTextExtractor, TextExtractor};
pub use fetch::{FetchSettings, Fetcher, LogProgressSink, ProgressSink, ReqwestFetcher};
pub use sanitize::strip_residual_markup;
pub use types::{
    FailureKind, FetchError, FetchMetadata, FetchOutput, QueryProgress, RawDocument, Stage,
    WordCountReport,
};
