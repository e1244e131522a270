//! `drcov-tools` drives DynamoRio's `drcov` client to measure which code a target program
//! executes when fed a corpus of sample files, and turns the recorded traces into an HTML
//! coverage report.
//!
//! The crate ships two binaries sharing one working-directory layout:
//!
//! * `drcov-collect` runs the target once per sample under `drrun -t drcov`, writing one raw
//!   trace file per run into `<output>/traces/`.
//! * `drcov-report` merges the traces with `drcov2lcov` into `<output>/coverage.info`, fixes
//!   up source paths recorded at build time, and renders the report with `genhtml` into
//!   `<output>/report/`.
//!
//! All the heavy lifting (instrumentation, trace aggregation, report rendering) is delegated
//! to the DynamoRio toolset; this crate only orchestrates the invocations.

#![recursion_limit = "128"] // needed for error_chain.

#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
extern crate env_logger;
extern crate natord;
extern crate open;
extern crate regex;
extern crate termcolor;

#[cfg(test)]
extern crate tempfile;

#[macro_use]
pub mod ui;
mod utils;
pub mod collect;
pub mod dynamorio;
pub mod error;
pub mod pathmap;
pub mod report;
pub mod tool;
pub mod workdir;

pub use collect::{Collector, TESTCASE_TOKEN};
pub use dynamorio::DynamoRio;
pub use error::{Error, ErrorKind, Result};
pub use report::{ReportOptions, Reporter};
pub use workdir::WorkDir;
