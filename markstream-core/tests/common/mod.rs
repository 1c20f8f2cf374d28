//! Test infrastructure for the markstream tokenizer
//!
//! Provides fixture loading, stochastic input generation, and a harness
//! that runs fixture cases canonically and with varied line terminators.

#![allow(dead_code)]

mod generators;
mod harness;
mod loader;

pub use generators::{Gen, TERMINATORS};
pub use harness::{collect_lines, run_test, run_with_variations};
pub use loader::{load_fixtures_by_name, TestCase};
