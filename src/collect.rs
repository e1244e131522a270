//! Trace collection: one instrumented run of the target per sample file.

use dynamorio::DynamoRio;
use error::{ErrorKind, Result, ResultExt};
use tool;
use utils::compare_naturally;
use workdir::WorkDir;

use std::ffi::{OsStr, OsString};
use std::fs::{canonicalize, read_dir};
use std::path::{Path, PathBuf};
use std::process::Command;

/// The placeholder token in the target command line that stands for "path of the current
/// sample". Only arguments equal to the whole token are substituted; a token embedded in a
/// longer argument is left untouched.
pub const TESTCASE_TOKEN: &str = "%TESTCASE%";

/// Runs the target command under `drrun -t drcov` once per sample.
#[derive(Debug)]
pub struct Collector<'a> {
    dynamorio: &'a DynamoRio,
    workdir: &'a WorkDir,
}

impl<'a> Collector<'a> {
    pub fn new(dynamorio: &'a DynamoRio, workdir: &'a WorkDir) -> Collector<'a> {
        Collector {
            dynamorio,
            workdir,
        }
    }

    /// Traces every sample in `samples`, strictly in sequence.
    ///
    /// The run is fail-fast: the first sample whose traced execution cannot be launched or
    /// exits non-zero aborts the rest. Traces already written stay on disk.
    ///
    /// # Errors
    ///
    /// * [`NotADirectory`] when `samples` is not a directory.
    /// * [`EmptySampleSet`] when it holds no regular files; no child process is spawned.
    /// * [`ToolFailed`] when a traced execution exits non-zero.
    ///
    /// [`NotADirectory`]: ../error/enum.ErrorKind.html#variant.NotADirectory
    /// [`EmptySampleSet`]: ../error/enum.ErrorKind.html#variant.EmptySampleSet
    /// [`ToolFailed`]: ../error/enum.ErrorKind.html#variant.ToolFailed
    pub fn run(&self, command: &[OsString], samples: &Path) -> Result<()> {
        let samples = canonicalize(samples).chain_err(|| ErrorKind::NotADirectory(samples.to_owned()))?;
        ensure!(samples.is_dir(), ErrorKind::NotADirectory(samples));

        info!("running test cases from `{}`", samples.display());
        for sample in &list_samples(&samples)? {
            let name = sample.file_name().unwrap_or_else(|| sample.as_os_str());
            progress!("Tracing", "{}", Path::new(name).display());
            self.trace_sample(command, sample).chain_err(|| format!("could not execute test case `{}`", sample.display()))?;
        }
        Ok(())
    }

    /// Spawns one traced execution and blocks until it exits.
    fn trace_sample(&self, command: &[OsString], sample: &Path) -> Result<()> {
        let mut cmd = Command::new(self.dynamorio.drrun());
        cmd.args(&["-t", "drcov", "-logdir"])
            .arg(self.workdir.traces_dir())
            .arg("--")
            .args(substitute_testcase(command, sample));
        let output = tool::run("drrun", &mut cmd)?.ensure_success("drrun")?;
        debug!("{}", output.text());
        Ok(())
    }
}

/// Replaces every argument equal to [`TESTCASE_TOKEN`] with the sample path.
///
/// [`TESTCASE_TOKEN`]: ./constant.TESTCASE_TOKEN.html
pub fn substitute_testcase(command: &[OsString], sample: &Path) -> Vec<OsString> {
    command
        .iter()
        .map(|arg| {
            if arg.as_os_str() == OsStr::new(TESTCASE_TOKEN) {
                sample.as_os_str().to_owned()
            } else {
                arg.clone()
            }
        })
        .collect()
}

/// Lists the regular files directly inside `samples`, naturally sorted by path.
///
/// Directories (and anything else that is not a regular file) are skipped. Natural sorting
/// keeps runs reproducible regardless of what order the filesystem returns entries in.
fn list_samples(samples: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in read_dir(samples)? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    ensure!(!files.is_empty(), ErrorKind::EmptySampleSet(samples.to_owned()));
    files.sort_by(|a, b| compare_naturally(a, b));
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dynamorio::DynamoRio;
    use error::ErrorKind;
    use workdir::WorkDir;

    use tempfile::TempDir;

    use std::ffi::OsString;
    use std::fs::{File, create_dir};

    fn command(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[test]
    fn token_is_substituted_only_on_exact_match() {
        let args = command(&["./target", "%TESTCASE%", "--input=%TESTCASE%", "%TESTCASE%"]);
        let substituted = substitute_testcase(&args, Path::new("/corpus/sample1"));
        assert_eq!(
            substituted,
            command(&["./target", "/corpus/sample1", "--input=%TESTCASE%", "/corpus/sample1"])
        );
    }

    #[test]
    fn samples_are_naturally_sorted() {
        let dir = TempDir::new().expect("temp dir");
        for name in &["sample10", "sample2", "sample1"] {
            File::create(dir.path().join(name)).expect("create sample");
        }
        let files = list_samples(dir.path()).expect("list samples");
        let names: Vec<_> = files.iter().filter_map(|p| p.file_name().and_then(|n| n.to_str())).collect();
        assert_eq!(names, ["sample1", "sample2", "sample10"]);
    }

    #[test]
    fn an_empty_sample_directory_is_an_error() {
        let dir = TempDir::new().expect("temp dir");
        match list_samples(dir.path()) {
            Err(ref e) => match *e.kind() {
                ErrorKind::EmptySampleSet(_) => {}
                ref kind => panic!("unexpected error kind {:?}", kind),
            },
            Ok(_) => panic!("an empty directory should be an error"),
        }
    }

    #[test]
    fn subdirectories_do_not_count_as_samples() {
        let dir = TempDir::new().expect("temp dir");
        create_dir(dir.path().join("nested")).expect("create subdirectory");
        assert!(list_samples(dir.path()).is_err());
    }

    #[test]
    fn collector_fails_before_spawning_anything_on_an_empty_corpus() {
        let dr_root = TempDir::new().expect("temp dir");
        let out_root = TempDir::new().expect("temp dir");
        let samples = TempDir::new().expect("temp dir");

        let dynamorio = DynamoRio::new(dr_root.path()).expect("dynamorio root");
        let workdir = WorkDir::create(out_root.path()).expect("workdir");
        let collector = Collector::new(&dynamorio, &workdir);

        // The fake installation has no drrun binary, so any attempt to spawn a child would
        // surface as a launch error instead of EmptySampleSet.
        match collector.run(&command(&["./target", "%TESTCASE%"]), samples.path()) {
            Err(ref e) => match *e.kind() {
                ErrorKind::EmptySampleSet(_) => {}
                ref kind => panic!("unexpected error kind {:?}", kind),
            },
            Ok(_) => panic!("an empty corpus should fail the run"),
        }
    }

    #[test]
    fn a_missing_samples_path_is_rejected() {
        let dr_root = TempDir::new().expect("temp dir");
        let out_root = TempDir::new().expect("temp dir");

        let dynamorio = DynamoRio::new(dr_root.path()).expect("dynamorio root");
        let workdir = WorkDir::create(out_root.path()).expect("workdir");
        let collector = Collector::new(&dynamorio, &workdir);

        assert!(collector.run(&command(&["./target"]), &out_root.path().join("nope")).is_err());
    }
}
