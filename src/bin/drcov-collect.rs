//! Collects DynamoRio `drcov` traces by running a target command once per sample file.

#[macro_use]
extern crate clap;
extern crate drcov_tools;

use clap::ArgMatches;
use drcov_tools::error::{Result, ResultExt};
use drcov_tools::{Collector, DynamoRio, WorkDir, ui};

use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::process::exit;

/// Program entry. Calls [`run()`] and prints any error returned to `stderr`.
///
/// [`run()`]: ./fn.run.html
fn main() {
    if let Err(error) = run() {
        ui::print_error(&error).expect("error while printing error");
        exit(-1);
    }
}

/// Runs the `drcov-collect` program.
fn run() -> Result<()> {
    let matches = parse_args();
    let debug_level = parse_debug_level(&matches)?;
    ui::init_logger(debug_level);

    let dynamorio = DynamoRio::new(Path::new(matches.value_of_os("dynamorio").expect("-p")))?;
    let workdir = WorkDir::create(Path::new(matches.value_of_os("output").expect("-o")))?;
    let command: Vec<OsString> = matches.values_of_os("command").expect("command").map(OsStr::to_os_string).collect();

    let collector = Collector::new(&dynamorio, &workdir);
    collector.run(&command, Path::new(matches.value_of_os("samples").expect("-s")))
}

/// Parses the command line arguments using `clap`.
fn parse_args() -> ArgMatches<'static> {
    clap_app!(drcov_collect =>
        (bin_name: "drcov-collect")
        (about: "Collects DynamoRio drcov traces by running a command once per sample file")
        (version: crate_version!())
        (@setting DeriveDisplayOrder)
        (@setting TrailingVarArg)
        (@arg dynamorio: -p <DR_PATH> "Path to the DynamoRio installation")
        (@arg output: -o <OUTPUT> "Output directory that will contain the trace files")
        (@arg debug: -d [LEVEL] "Debug/warning level of the DynamoRio tools")
        (@arg samples: -s <SAMPLES> "Directory containing the sample files")
        (@arg command: <COMMAND>... "Command to trace; the argument %TESTCASE% stands for the current sample path")
    ).get_matches()
}

/// Reads the `-d` flag, defaulting to 0.
fn parse_debug_level(matches: &ArgMatches) -> Result<u32> {
    match matches.value_of("debug") {
        Some(level) => level.parse().chain_err(|| format!("invalid debug level `{}`", level)),
        None => Ok(0),
    }
}
