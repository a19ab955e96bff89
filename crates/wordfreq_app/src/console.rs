use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use engine_logging::{engine_info, engine_warn, set_query_seq};
use wordfreq_core::{update, AppState, Effect, Msg, RankedEntry, PROMPT};
use wordfreq_engine::WordCounter;

/// Drives the interactive loop until the state machine asks to exit.
///
/// Every effect is executed in order; effects that produce a message feed it
/// back into [`update`]. Fetch failures are turned into messages and never
/// escape, so only IO errors on `input` or `output` end the loop early.
pub fn run<R, W>(
    state: AppState,
    mut input: R,
    mut output: W,
    counter: &dyn WordCounter,
) -> io::Result<AppState>
where
    R: BufRead,
    W: Write,
{
    let (mut state, effects) = update(state, Msg::Started);
    let mut pending: VecDeque<Effect> = effects.into();

    while let Some(effect) = pending.pop_front() {
        let msg = match effect {
            Effect::ShowPrompt => {
                write!(output, "{PROMPT}")?;
                output.flush()?;
                read_line(&mut input)?
            }
            Effect::RunQuery { url, k } => {
                set_query_seq(state.queries_run());
                let result = run_query(counter, &url, k);
                set_query_seq(0);
                Msg::QueryFinished { url, result }
            }
            Effect::Print(line) => {
                writeln!(output, "{line}")?;
                continue;
            }
            Effect::Exit => break,
        };

        let (next, effects) = update(state, msg);
        state = next;
        pending.extend(effects);
    }

    output.flush()?;
    Ok(state)
}

/// Reads one line; bytes that are not valid UTF-8 become U+FFFD instead of
/// failing the read.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Msg> {
    let mut buf = Vec::new();
    if input.read_until(b'\n', &mut buf)? == 0 {
        return Ok(Msg::InputClosed);
    }
    if buf.ends_with(b"\n") {
        buf.pop();
        if buf.ends_with(b"\r") {
            buf.pop();
        }
    }
    Ok(Msg::LineEntered(String::from_utf8_lossy(&buf).into_owned()))
}

fn run_query(counter: &dyn WordCounter, url: &str, k: usize) -> Result<Vec<RankedEntry>, String> {
    engine_info!("query url={} k={}", url, k);
    match counter.top_k_words(url, k) {
        Ok(report) => Ok(report.entries),
        Err(err) => {
            engine_warn!("query for {} failed: {}", url, err);
            Err(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::io::Cursor;

    use pretty_assertions::assert_eq;
    use wordfreq_core::{top_k_words, AppState, RankedEntry};
    use wordfreq_engine::{FailureKind, FetchError, WordCountReport, WordCounter};

    use super::run;

    /// Counts words of canned page texts; unknown URLs fail like a DNS error.
    struct FakeCounter {
        pages: Vec<(&'static str, &'static str)>,
        calls: RefCell<Vec<(String, usize)>>,
    }

    impl FakeCounter {
        fn new(pages: Vec<(&'static str, &'static str)>) -> Self {
            Self {
                pages,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl WordCounter for FakeCounter {
        fn top_k_words(&self, url: &str, k: usize) -> Result<WordCountReport, FetchError> {
            self.calls.borrow_mut().push((url.to_string(), k));
            let (_, text) = self
                .pages
                .iter()
                .find(|(page, _)| *page == url)
                .ok_or_else(|| FetchError {
                    kind: FailureKind::Network,
                    message: "dns error".to_string(),
                })?;
            Ok(WordCountReport {
                url: url.to_string(),
                final_url: url.to_string(),
                total_tokens: 0,
                distinct_tokens: 0,
                entries: top_k_words(text, k),
            })
        }
    }

    fn drive(
        input: impl AsRef<[u8]>,
        counter: &FakeCounter,
        state: AppState,
    ) -> (AppState, String) {
        engine_logging::initialize_for_tests();
        let mut out = Vec::new();
        let state = run(state, Cursor::new(input.as_ref()), &mut out, counter).unwrap();
        (state, String::from_utf8(out).unwrap())
    }

    const PROMPT: &str = "Enter a URL to a valid website: ";

    #[test]
    fn quit_in_any_case_says_good_bye_and_stops() {
        let counter = FakeCounter::new(Vec::new());
        let (state, out) = drive("QUIT\nhttps://never.example\n", &counter, AppState::new());

        assert!(state.is_exited());
        assert_eq!(out, format!("{PROMPT}Good bye!\n"));
        assert!(counter.calls.borrow().is_empty());
    }

    #[test]
    fn query_prints_header_and_entries_then_prompts_again() {
        let counter = FakeCounter::new(vec![(
            "https://cats.example",
            "the cat sat on the mat the cat ran",
        )]);
        let (_, out) = drive(
            "https://cats.example\nexit\n",
            &counter,
            AppState::with_top_k(2),
        );

        assert_eq!(
            out,
            format!(
                "{PROMPT}Here are your top 2 entries forhttps://cats.example:\n\
                 the: 3\n\
                 cat: 2\n\
                 {PROMPT}Good bye!\n"
            )
        );
        assert_eq!(
            *counter.calls.borrow(),
            vec![("https://cats.example".to_string(), 2)]
        );
    }

    #[test]
    fn fetch_failure_reports_and_keeps_prompting() {
        let counter = FakeCounter::new(Vec::new());
        let (state, out) = drive("http://nowhere.invalid\nexit\n", &counter, AppState::new());

        assert!(state.is_exited());
        assert_eq!(
            out,
            format!(
                "{PROMPT}Could not load http://nowhere.invalid: network error: dns error\n\
                 Here are your top 0 entries forhttp://nowhere.invalid:\n\
                 {PROMPT}Good bye!\n"
            )
        );
    }

    #[test]
    fn end_of_input_exits_quietly() {
        let counter = FakeCounter::new(Vec::new());
        let (state, out) = drive("", &counter, AppState::new());

        assert!(state.is_exited());
        assert_eq!(out, PROMPT);
    }

    #[test]
    fn crlf_line_endings_are_stripped() {
        let counter = FakeCounter::new(vec![("https://a.example", "x")]);
        let (state, out) = drive("https://a.example\r\nQuit\r\n", &counter, AppState::new());

        assert_eq!(state.queries_run(), 1);
        assert!(out.contains("forhttps://a.example:\nx: 1\n"));
        assert!(out.ends_with("Good bye!\n"));
    }

    #[test]
    fn empty_line_is_treated_as_a_url() {
        let counter = FakeCounter::new(Vec::new());
        let (state, out) = drive("\nexit\n", &counter, AppState::new());

        assert_eq!(state.queries_run(), 1);
        assert!(out.contains("Here are your top 0 entries for:\n"));
    }

    #[test]
    fn non_utf8_line_is_a_failed_query_not_a_fatal_error() {
        let counter = FakeCounter::new(Vec::new());
        let input: &[u8] = b"http://caf\xe9.example\nexit\n";
        let (state, out) = drive(input, &counter, AppState::new());

        assert!(state.is_exited());
        assert_eq!(
            out,
            format!(
                "{PROMPT}Could not load http://caf\u{FFFD}.example: network error: dns error\n\
                 Here are your top 0 entries forhttp://caf\u{FFFD}.example:\n\
                 {PROMPT}Good bye!\n"
            )
        );
        assert_eq!(
            *counter.calls.borrow(),
            vec![("http://caf\u{FFFD}.example".to_string(), 10)]
        );
    }
}
