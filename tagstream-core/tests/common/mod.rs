//! Test infrastructure for the tagstream tokenizer
//!
//! Provides fixture loading, seeded chunk-partition generation, and the
//! whole-vs-chunked assertion harness.

mod generators;
mod harness;

pub use generators::Gen;
pub use harness::{run_case, run_chunked, TestResult};
pub use loader::{load_fixtures_by_name, TestCase};
