//! Coverage report generation.
//!
//! A reporting run is four strictly sequential steps over an already-collected working
//! directory:
//!
//! 1. aggregate every raw trace in `traces/` into `coverage.info` with `drcov2lcov`;
//! 2. rewrite configured path prefixes inside `coverage.info` (build-time source locations
//!    rarely match the reporting machine);
//! 3. render the HTML tree into `report/` with `genhtml`;
//! 4. digest genhtml's warnings about unreadable sources into remapping suggestions.
//!
//! The one failure treated specially is genhtml rejecting an info file with no valid
//! records: that usually means the source filter excluded everything, so it is reported as
//! a plain warning instead of an error chain, though the run still fails.

use dynamorio::DynamoRio;
use error::{ErrorKind, Result, ResultExt};
use pathmap::{MissingSources, apply_path_maps};
use tool::{self, ToolOutput};
use ui;
use workdir::WorkDir;

use std::fs::{File, read_to_string};
use std::io::Write;
use std::process::Command;

/// Knobs of a reporting run, straight from the command line.
#[derive(Debug, Default)]
pub struct ReportOptions {
    /// Pattern forwarded to `drcov2lcov -src_filter`; only matching source paths are
    /// aggregated.
    pub src_filter: Option<String>,
    /// Ordered `(old, new)` literal replacements applied to the coverage info file.
    pub path_maps: Vec<(String, String)>,
    /// Warning/verbosity level forwarded to the DynamoRio tools.
    pub debug_level: u32,
    /// Open the rendered report in the system browser afterwards.
    pub open: bool,
}

/// Turns a directory of raw traces into an HTML coverage report.
#[derive(Debug)]
pub struct Reporter<'a> {
    dynamorio: &'a DynamoRio,
    workdir: &'a WorkDir,
    options: ReportOptions,
}

impl<'a> Reporter<'a> {
    pub fn new(dynamorio: &'a DynamoRio, workdir: &'a WorkDir, options: ReportOptions) -> Reporter<'a> {
        Reporter {
            dynamorio,
            workdir,
            options,
        }
    }

    /// Runs the whole pipeline: aggregate, remap, render, summarize.
    pub fn run(&self) -> Result<()> {
        self.process_traces()?;
        let output = self.generate_report()?;
        self.summarize_missing_sources(&output);
        if self.options.open {
            self.open_report();
        }
        Ok(())
    }

    /// Merges all raw traces into the coverage info file, then applies the path maps.
    fn process_traces(&self) -> Result<()> {
        let level = self.options.debug_level.to_string();
        let mut cmd = Command::new(self.dynamorio.drcov2lcov());
        cmd.arg("-warning")
            .arg(&level)
            .arg("-verbose")
            .arg(&level)
            .arg("-dir")
            .arg(self.workdir.traces_dir())
            .arg("-output")
            .arg(self.workdir.info_file());
        if let Some(ref filter) = self.options.src_filter {
            cmd.arg("-src_filter").arg(filter);
        }

        progress!("Aggregating", "{}", self.workdir.traces_dir().display());
        let output = tool::run("drcov2lcov", &mut cmd)?.ensure_success("drcov2lcov")?;
        debug!("{}", output.text());

        self.remap_paths()
    }

    /// Rewrites the coverage info file with every configured path prefix replacement.
    fn remap_paths(&self) -> Result<()> {
        if self.options.path_maps.is_empty() {
            return Ok(());
        }

        let info_file = self.workdir.info_file();
        let contents = read_to_string(info_file).chain_err(|| format!("cannot read `{}`", info_file.display()))?;
        let contents = apply_path_maps(contents, &self.options.path_maps);
        let mut file = File::create(info_file).chain_err(|| format!("cannot rewrite `{}`", info_file.display()))?;
        file.write_all(contents.as_bytes())?;
        Ok(())
    }

    /// Renders the HTML tree from the corrected info file, returning genhtml's captured
    /// output for the missing-source scan.
    fn generate_report(&self) -> Result<ToolOutput> {
        let mut cmd = Command::new(self.dynamorio.genhtml());
        cmd.arg("-ignore-errors=source")
            .arg("--output-directory")
            .arg(self.workdir.report_dir())
            .args(&["--quiet", "--demangle-cpp", "--legend", "--highlight", "--show-details"])
            .arg(self.workdir.info_file());

        progress!("Rendering", "{}", self.workdir.report_dir().display());
        let output = tool::run("genhtml", &mut cmd)?;
        if output.success() {
            debug!("{}", output.text());
            Ok(output)
        } else if output.contains("no valid records") {
            warning!("the coverage info file has no valid records, so there is nothing to render; maybe the source filter excluded everything?");
            Err(ErrorKind::NoValidRecords.into())
        } else {
            error!("`genhtml` failed, captured output follows:\n{}", output.text());
            Err(ErrorKind::ToolFailed("genhtml", output.status).into())
        }
    }

    /// Suggests `-m` remappings for source directories genhtml could not read.
    fn summarize_missing_sources(&self, output: &ToolOutput) {
        let missing = MissingSources::scan(&output.text());
        if missing.is_empty() {
            return;
        }
        ui::print_missing_sources(&missing.ambiguous_roots()).expect("print missing-source summary");
    }

    /// Opens the rendered report in the browser. Best-effort: a failure here degrades to a
    /// warning because the report itself was already written.
    fn open_report(&self) {
        let index = self.workdir.report_dir().join("index.html");
        progress!("Opening", "{}", index.display());
        match ::open::that(&index) {
            Ok(ref status) if status.success() => {}
            Ok(status) => warning!("failed to open report, result: {}", status),
            Err(e) => warning!("failed to open report: {}", e),
        }
    }
}
