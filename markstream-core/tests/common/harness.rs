//! Test harness for running fixture cases with stochastic variations

use crate::common::{Gen, TestCase};
use markstream_core::{StrChars, Tokenizer, TokenizerConfig};

/// Result of running a test
#[derive(Debug)]
pub struct TestResult {
    pub passed: bool,
    pub input: String,
    pub expected: Vec<String>,
    pub actual: Vec<String>,
    pub seed: u64,
    pub errors: Vec<String>,
}

/// Pull every line out of `input`.
///
/// With `error_on_eof` the final pull is expected to fail; its error is
/// returned alongside the lines read before it.
pub fn collect_lines(input: &str, normalize: bool, error_on_eof: bool) -> (Vec<String>, usize, Option<String>) {
    let config = TokenizerConfig::new().with_normalize_line_endings(normalize);
    let mut tokenizer = Tokenizer::with_config(StrChars::new(input), config);
    let mut lines = Vec::new();
    loop {
        match tokenizer.next_line(error_on_eof) {
            Ok(Some(line)) => lines.push(line),
            Ok(None) => return (lines, tokenizer.line_count(), None),
            Err(e) => return (lines, tokenizer.line_count(), Some(e.to_string())),
        }
    }
}

fn check(input: &str, case: &TestCase, normalize: bool, seed: u64) -> TestResult {
    let (actual, line_count, error) = collect_lines(input, normalize, case.eof_error);
    let mut errors = Vec::new();

    if actual != case.entries {
        errors.push("Entry mismatch".to_string());
    }
    if line_count != case.lines {
        errors.push(format!("Line count: expected {}, got {}", case.lines, line_count));
    }
    match (&error, case.eof_error) {
        (None, true) => errors.push("Expected premature end-of-stream error".to_string()),
        (Some(e), false) => errors.push(format!("Unexpected error: {}", e)),
        (Some(e), true) if !e.starts_with("end of file reached") => {
            errors.push(format!("Wrong error: {}", e))
        }
        _ => {}
    }

    TestResult {
        passed: errors.is_empty(),
        input: input.to_string(),
        expected: case.entries.clone(),
        actual,
        seed,
        errors,
    }
}

/// Run a single test case (canonical, no variations)
pub fn run_test(case: &TestCase) -> TestResult {
    check(&case.input, case, case.normalize, 0)
}

/// Run test with every line break swapped for a random equivalent sequence.
///
/// Only meaningful with normalization on and no EOF error; other cases
/// fall back to the canonical run.
pub fn run_with_variations(case: &TestCase, gen: &mut Gen) -> TestResult {
    if !case.normalize || case.eof_error {
        return run_test(case);
    }
    let trailing = case
        .input
        .chars()
        .last()
        .is_some_and(markstream_core::source::is_line_terminator);
    let input = gen.join_lines(&case.entries, trailing);
    check(&input, case, true, gen.seed)
}

impl TestResult {
    /// Print detailed failure info
    pub fn print_failure(&self, case_id: &str) {
        eprintln!("\n=== FAILED: {} ===", case_id);
        eprintln!(
            "Seed: {} (set MARKSTREAM_TEST_SEED={} to reproduce)",
            self.seed, self.seed
        );
        eprintln!("\nInput: {:?}", self.input);
        eprintln!("\nExpected entries:");
        for (i, e) in self.expected.iter().enumerate() {
            eprintln!("  {}: {:?}", i, e);
        }
        eprintln!("\nActual entries:");
        for (i, e) in self.actual.iter().enumerate() {
            eprintln!("  {}: {:?}", i, e);
        }
        eprintln!("\nErrors:");
        for e in &self.errors {
            eprintln!("  - {}", e);
        }
    }
}
