//! The on-disk working directory shared by the collector and the reporter.
//!
//! The layout is fixed: raw traces land in `<output>/traces/`, the aggregated coverage data
//! in `<output>/coverage.info`, and the rendered report in `<output>/report/`. The collector
//! creates the layout; the reporter only consumes it and refuses to run against anything
//! else.

use error::{ErrorKind, Result, ResultExt};

use std::fs::{canonicalize, create_dir_all};
use std::path::{Path, PathBuf};

const TRACES_DIR: &str = "traces";
const REPORT_DIR: &str = "report";
const COVERAGE_INFO_FILE: &str = "coverage.info";

/// Canonical paths of one working directory.
#[derive(Debug)]
pub struct WorkDir {
    output_dir: PathBuf,
    traces_dir: PathBuf,
    report_dir: PathBuf,
    info_file: PathBuf,
}

impl WorkDir {
    /// Creates the layout for a collection run, building the output root and `traces/`
    /// when they do not exist yet.
    pub fn create(output: &Path) -> Result<WorkDir> {
        create_dir_all(output).chain_err(|| format!("cannot create output directory `{}`", output.display()))?;
        let workdir = WorkDir::layout(canonicalize(output)?);
        create_dir_all(&workdir.traces_dir).chain_err(|| "cannot create traces directory")?;

        info!("working directory `{}`", workdir.output_dir.display());
        info!("traces directory `{}`", workdir.traces_dir.display());
        Ok(workdir)
    }

    /// Opens an existing layout for a reporting run, creating `report/` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidWorkDir`] when the output root does not exist or holds no `traces/`
    /// directory. This is a precondition violation, checked before any external tool is
    /// launched.
    ///
    /// [`InvalidWorkDir`]: ../error/enum.ErrorKind.html#variant.InvalidWorkDir
    pub fn open(output: &Path) -> Result<WorkDir> {
        let output_dir = canonicalize(output).chain_err(|| ErrorKind::InvalidWorkDir(output.to_owned()))?;
        let workdir = WorkDir::layout(output_dir);
        ensure!(workdir.traces_dir.is_dir(), ErrorKind::InvalidWorkDir(workdir.output_dir));
        create_dir_all(&workdir.report_dir).chain_err(|| "cannot create report directory")?;

        info!("working directory `{}`", workdir.output_dir.display());
        info!("traces directory `{}`", workdir.traces_dir.display());
        info!("report directory `{}`", workdir.report_dir.display());
        Ok(workdir)
    }

    fn layout(output_dir: PathBuf) -> WorkDir {
        let traces_dir = output_dir.join(TRACES_DIR);
        let report_dir = output_dir.join(REPORT_DIR);
        let info_file = output_dir.join(COVERAGE_INFO_FILE);
        WorkDir {
            output_dir,
            traces_dir,
            report_dir,
            info_file,
        }
    }

    /// The canonical output root.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Where the raw per-sample trace files live.
    pub fn traces_dir(&self) -> &Path {
        &self.traces_dir
    }

    /// Where the rendered HTML report tree lands.
    pub fn report_dir(&self) -> &Path {
        &self.report_dir
    }

    /// The aggregated, remapped coverage info file.
    pub fn info_file(&self) -> &Path {
        &self.info_file
    }
}

#[cfg(test)]
mod tests {
    use super::WorkDir;
    use error::ErrorKind;

    use tempfile::TempDir;

    #[test]
    fn create_builds_the_traces_directory() {
        let dir = TempDir::new().expect("temp dir");
        let output = dir.path().join("out");
        let workdir = WorkDir::create(&output).expect("create layout");
        assert!(workdir.traces_dir().is_dir());
        assert_eq!(workdir.info_file().file_name().and_then(|n| n.to_str()), Some("coverage.info"));
    }

    #[test]
    fn open_requires_an_existing_root() {
        let dir = TempDir::new().expect("temp dir");
        match WorkDir::open(&dir.path().join("nope")) {
            Err(ref e) => match *e.kind() {
                ErrorKind::InvalidWorkDir(_) => {}
                ref kind => panic!("unexpected error kind {:?}", kind),
            },
            Ok(_) => panic!("a missing root should be rejected"),
        }
    }

    #[test]
    fn open_requires_the_traces_directory() {
        let dir = TempDir::new().expect("temp dir");
        match WorkDir::open(dir.path()) {
            Err(ref e) => match *e.kind() {
                ErrorKind::InvalidWorkDir(_) => {}
                ref kind => panic!("unexpected error kind {:?}", kind),
            },
            Ok(_) => panic!("a root without traces/ should be rejected"),
        }
        assert!(!dir.path().join("report").exists(), "report/ must not be created on failure");
    }

    #[test]
    fn open_after_create_builds_the_report_directory() {
        let dir = TempDir::new().expect("temp dir");
        let output = dir.path().join("out");
        WorkDir::create(&output).expect("create layout");
        let workdir = WorkDir::open(&output).expect("open layout");
        assert!(workdir.report_dir().is_dir());
    }
}
