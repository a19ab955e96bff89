use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wordfreq_core::RankedEntry;
use wordfreq_engine::{
    FailureKind, FetchError, FetchMetadata, FetchOutput, FetchSettings, Fetcher, ProgressSink,
    QueryProgress, Stage, WordCountEngine, WordCounter,
};

/// Serves a fixed body for every URL.
struct StaticFetcher {
    body: Vec<u8>,
    content_type: Option<String>,
}

impl StaticFetcher {
    fn html(body: &str) -> Arc<Self> {
        Arc::new(Self {
            body: body.as_bytes().to_vec(),
            content_type: Some("text/html; charset=utf-8".to_string()),
        })
    }
}

#[async_trait::async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, url: &str, _sink: &dyn ProgressSink) -> Result<FetchOutput, FetchError> {
        Ok(FetchOutput {
            bytes: self.body.clone(),
            metadata: FetchMetadata {
                original_url: url.to_string(),
                final_url: url.to_string(),
                redirect_count: 0,
                content_type: self.content_type.clone(),
                byte_len: self.body.len() as u64,
            },
        })
    }
}

#[derive(Default)]
struct RecordingSink {
    stages: Mutex<Vec<Stage>>,
}

impl ProgressSink for RecordingSink {
    fn emit(&self, progress: QueryProgress) {
        self.stages.lock().unwrap().push(progress.stage);
    }
}

fn engine_for(body: &str) -> WordCountEngine {
    engine_logging::initialize_for_tests();
    WordCountEngine::with_fetcher(StaticFetcher::html(body)).expect("engine starts")
}

#[test]
fn body_text_is_counted_and_ranked() {
    let engine = engine_for(
        "<html><head><title>ignored title</title></head>\
         <body><p>the cat sat on the mat</p><p>the cat ran</p></body></html>",
    );

    let report = engine.top_k_words("https://example.com", 2).unwrap();

    assert_eq!(
        report.entries,
        vec![RankedEntry::new("the", 3), RankedEntry::new("cat", 2)]
    );
    assert_eq!(report.total_tokens, 9);
    assert_eq!(report.distinct_tokens, 6);
    assert_eq!(report.url, "https://example.com");
}

#[test]
fn scripts_and_styles_do_not_contribute_words() {
    let engine = engine_for(
        "<body><script>var word = 1;</script><style>p { color: red }</style>\
         <p>word word</p></body>",
    );

    let report = engine.top_k_words("https://example.com", 10).unwrap();

    assert_eq!(report.entries, vec![RankedEntry::new("word", 2)]);
}

#[test]
fn escaped_markup_is_sanitized_away() {
    let engine = engine_for("<body><p>&lt;b&gt;bold&lt;/b&gt; text</p></body>");

    let document = engine.load_document("https://example.com").unwrap();

    assert_eq!(document.text, "bold text");
}

#[test]
fn double_escaped_entity_reads_the_same_with_or_without_other_markup() {
    let plain = engine_for("<body><p>AT&amp;amp;T rocks</p></body>")
        .load_document("https://example.com")
        .unwrap();
    let with_angle = engine_for("<body><p>AT&amp;amp;T 1 &lt; 2</p></body>")
        .load_document("https://example.com")
        .unwrap();

    assert_eq!(plain.text, "AT&T rocks");
    assert_eq!(with_angle.text, "AT&T 1 < 2");
}

#[test]
fn escaped_script_contents_are_not_counted() {
    let engine = engine_for("<body><p>&lt;script&gt;alert(1)&lt;/script&gt; ok</p></body>");

    let report = engine.top_k_words("https://example.com", 10).unwrap();

    assert_eq!(report.entries, vec![RankedEntry::new("ok", 1)]);
}

#[test]
fn empty_body_counts_single_empty_token() {
    let engine = engine_for("<html><body></body></html>");

    let report = engine.top_k_words("https://example.com", 10).unwrap();

    assert_eq!(report.entries, vec![RankedEntry::new("", 1)]);
}

#[test]
fn progress_walks_through_every_stage() {
    engine_logging::initialize_for_tests();
    let sink = Arc::new(RecordingSink::default());
    let engine = WordCountEngine::with_fetcher(StaticFetcher::html("<p>a</p>"))
        .unwrap()
        .with_progress_sink(sink.clone());

    engine.top_k_words("https://example.com", 1).unwrap();

    assert_eq!(
        *sink.stages.lock().unwrap(),
        vec![
            Stage::Decoding,
            Stage::Extracting,
            Stage::Sanitizing,
            Stage::Counting,
            Stage::Done
        ]
    );
}

#[test]
fn undecodable_body_is_a_decode_failure() {
    engine_logging::initialize_for_tests();
    let fetcher = Arc::new(StaticFetcher {
        body: b"<p>\xff\xfe\xfd</p>".to_vec(),
        content_type: Some("text/html; charset=utf-8".to_string()),
    });
    let engine = WordCountEngine::with_fetcher(fetcher).unwrap();

    let err = engine.top_k_words("https://example.com", 3).unwrap_err();

    assert_eq!(err.kind, FailureKind::Decode);
}

#[test]
fn engine_fetches_over_http_end_to_end() {
    engine_logging::initialize_for_tests();
    // The mock server lives on its own runtime; the engine blocks on its own.
    let server_rt = tokio::runtime::Runtime::new().unwrap();
    let server = server_rt.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                "<html><body><h1>Hello</h1><p>hello Hello world</p></body></html>",
                "text/html; charset=utf-8",
            ))
            .mount(&server)
            .await;
        server
    });

    let engine = WordCountEngine::new(FetchSettings::default()).unwrap();
    let report = engine
        .top_k_words(&format!("{}/page", server.uri()), 10)
        .unwrap();

    assert_eq!(
        report.entries,
        vec![
            RankedEntry::new("Hello", 2),
            RankedEntry::new("hello", 1),
            RankedEntry::new("world", 1),
        ]
    );
}

#[test]
fn unresolvable_host_is_an_error_not_a_panic() {
    engine_logging::initialize_for_tests();
    let engine = WordCountEngine::new(FetchSettings::default()).unwrap();

    let err = engine
        .top_k_words("http://does-not-exist.invalid/", 10)
        .unwrap_err();

    assert!(matches!(
        err.kind,
        FailureKind::Network | FailureKind::Timeout
    ));
}
