//! Fixture loading from YAML files

use serde::Deserialize;
use std::path::Path;

/// A single line-extraction case from a fixture file
#[derive(Debug, Clone, Deserialize)]
pub struct TestCase {
    pub id: String,
    pub desc: String,
    pub input: String,
    /// Line-ending normalization (defaults to on)
    #[serde(default = "enabled")]
    pub normalize: bool,
    /// Extract with `error_on_eof` set; the case must end in an error
    #[serde(default)]
    pub eof_error: bool,
    /// Expected `next_line` results, in order
    pub entries: Vec<String>,
    /// Expected line counter once the input is exhausted
    pub lines: usize,
}

fn enabled() -> bool {
    true
}

/// Load all test cases from a YAML fixture file
pub fn load_fixtures(path: &Path) -> Vec<TestCase> {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read fixture file {:?}: {}", path, e));
    serde_yaml::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture file {:?}: {}", path, e))
}

/// Load fixtures from the standard fixtures directory
pub fn load_fixtures_by_name(name: &str) -> Vec<TestCase> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(format!("{}.yaml", name));
    load_fixtures(&path)
}
