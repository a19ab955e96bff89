use std::sync::Arc;

use engine_logging::{engine_debug, engine_info};
use wordfreq_core::{count, tokenize, top_k, total_tokens};

use crate::decode::decode_html;
use crate::extract::{BodyTextExtractor, TextExtractor};
use crate::fetch::{FetchSettings, Fetcher, LogProgressSink, ProgressSink, ReqwestFetcher};
use crate::sanitize::strip_residual_markup;
use crate::{FetchError, QueryProgress, RawDocument, Stage, WordCountReport};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build http client: {0}")]
    Client(#[from] FetchError),
}

/// Anything that can answer "which k words occur most often at this URL".
pub trait WordCounter {
    fn top_k_words(&self, url: &str, k: usize) -> Result<WordCountReport, FetchError>;
}

/// Runs one query at a time, blocking the caller until it completes.
///
/// The async HTTP client is driven by a private current-thread runtime, so no
/// work ever runs in parallel with the caller.
pub struct WordCountEngine {
    runtime: tokio::runtime::Runtime,
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn TextExtractor>,
    sink: Arc<dyn ProgressSink>,
}

impl WordCountEngine {
    pub fn new(settings: FetchSettings) -> Result<Self, EngineError> {
        let fetcher = ReqwestFetcher::new(settings)?;
        Self::with_fetcher(Arc::new(fetcher))
    }

    pub fn with_fetcher(fetcher: Arc<dyn Fetcher>) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(Self {
            runtime,
            fetcher,
            extractor: Arc::new(BodyTextExtractor),
            sink: Arc::new(LogProgressSink),
        })
    }

    pub fn with_progress_sink(mut self, sink: Arc<dyn ProgressSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Fetches `url` and returns the sanitized text of its body.
    pub fn load_document(&self, url: &str) -> Result<RawDocument, FetchError> {
        let output = self
            .runtime
            .block_on(self.fetcher.fetch(url, self.sink.as_ref()))?;
        engine_info!(
            "fetched {} bytes from {} ({} redirects)",
            output.metadata.byte_len,
            output.metadata.final_url,
            output.metadata.redirect_count
        );

        self.sink.emit(QueryProgress::stage(Stage::Decoding));
        let decoded = decode_html(&output.bytes, output.metadata.content_type.as_deref())?;
        engine_debug!("decoded body as {}", decoded.encoding_label);

        self.sink.emit(QueryProgress::stage(Stage::Extracting));
        let extracted = self.extractor.extract_text(&decoded.html);

        self.sink.emit(QueryProgress::stage(Stage::Sanitizing));
        let text = strip_residual_markup(&extracted);

        Ok(RawDocument {
            text,
            encoding_label: decoded.encoding_label,
            metadata: output.metadata,
        })
    }
}

impl WordCounter for WordCountEngine {
    fn top_k_words(&self, url: &str, k: usize) -> Result<WordCountReport, FetchError> {
        let document = self.load_document(url)?;

        let tokens = tokenize(&document.text);
        let table = count(&tokens);
        let total = total_tokens(&table);
        self.sink.emit(QueryProgress {
            stage: Stage::Counting,
            bytes: None,
            tokens: Some(total),
        });

        let entries = top_k(&table, k);
        engine_info!(
            "counted {} tokens ({} distinct), reporting {}",
            total,
            table.len(),
            entries.len()
        );
        self.sink.emit(QueryProgress::stage(Stage::Done));

        Ok(WordCountReport {
            url: url.to_string(),
            final_url: document.metadata.final_url,
            total_tokens: total,
            distinct_tokens: table.len(),
            entries,
        })
    }
}
