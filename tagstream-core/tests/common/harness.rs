//! Shared test harness: event formatting, fixture runners, chunked replay.

use tagstream_core::{Event, Options, Tokenizer};

use super::generators::Gen;
use super::loader::TestCase;

/// Render an event as the compact one-line form used in fixture files.
///
/// - `Open name key="value" other="v2"`
/// - `Close name`
/// - `Text "content"` (content is Rust-escaped)
pub fn format_event(event: &Event) -> String {
    match event {
        Event::Open { name, attrs } => {
            let mut out = format!("Open {}", name);
            for (k, v) in attrs.iter() {
                out.push_str(&format!(" {}={:?}", k, v));
            }
            out
        }
        Event::Close { name } => format!("Close {}", name),
        Event::Text { content } => format!("Text {:?}", content),
    }
}

/// Tokenize the whole input in a single feed.
pub fn collect(input: &str, preserve_whitespace: bool) -> Vec<Event> {
    let mut tok = Tokenizer::with_options(Options { preserve_whitespace });
    let mut events = Vec::new();
    let mut sink = |e: Event| events.push(e);
    tok.feed(input, &mut sink);
    tok.finish(&mut sink);
    events
}

/// Tokenize the input split into the given chunks, fed one at a time.
pub fn collect_chunked(chunks: &[&str], preserve_whitespace: bool) -> Vec<Event> {
    let mut tok = Tokenizer::with_options(Options { preserve_whitespace });
    let mut events = Vec::new();
    let mut sink = |e: Event| events.push(e);
    for chunk in chunks {
        tok.feed(chunk, &mut sink);
    }
    tok.finish(&mut sink);
    events
}

/// Outcome of running one fixture case.
pub struct TestResult {
    pub passed: bool,
    pub expected: Vec<String>,
    pub actual: Vec<String>,
    /// Seed of the generator, when the case was replayed chunked.
    pub seed: Option<u64>,
}

impl TestResult {
    pub fn print_failure(&self, case: &TestCase) {
        eprintln!("case `{}` failed: {}", case.id, case.desc);
        if let Some(seed) = self.seed {
            eprintln!("  replay with TAGSTREAM_TEST_SEED={}", seed);
        }
        eprintln!("  input:    {:?}", case.html);
        eprintln!("  expected: {:?}", self.expected);
        eprintln!("  actual:   {:?}", self.actual);
    }
}

/// Run a fixture case against the whole input at once.
pub fn run_case(case: &TestCase) -> TestResult {
    let actual: Vec<String> = collect(&case.html, case.preserve_whitespace)
        .iter()
        .map(format_event)
        .collect();
    TestResult {
        passed: actual == case.events,
        expected: case.events.clone(),
        actual,
        seed: None,
    }
}

/// Run a fixture case with the input split at random points.
pub fn run_chunked(case: &TestCase, gen: &mut Gen) -> TestResult {
    let cuts = gen.poisson(2.0) + 1;
    let chunks = gen.partition(&case.html, cuts);
    let actual: Vec<String> = collect_chunked(&chunks, case.preserve_whitespace)
        .iter()
        .map(format_event)
        .collect();
    TestResult {
        passed: actual == case.events,
        expected: case.events.clone(),
        actual,
        seed: Some(gen.seed),
    }
}
