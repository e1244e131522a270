//! Renders an HTML coverage report from the traces of a previous `drcov-collect` run.

#[macro_use]
extern crate clap;
extern crate drcov_tools;

use clap::ArgMatches;
use drcov_tools::error::{Result, ResultExt};
use drcov_tools::{DynamoRio, ErrorKind, ReportOptions, Reporter, WorkDir, ui};

use std::path::Path;
use std::process::exit;

/// Program entry. Calls [`run()`] and prints any error returned to `stderr`.
///
/// The one exception is [`NoValidRecords`]: the reporter already printed it as a warning,
/// so only the failing exit code remains.
///
/// [`run()`]: ./fn.run.html
/// [`NoValidRecords`]: ../drcov_tools/error/enum.ErrorKind.html#variant.NoValidRecords
fn main() {
    if let Err(error) = run() {
        match *error.kind() {
            ErrorKind::NoValidRecords => {}
            _ => ui::print_error(&error).expect("error while printing error"),
        }
        exit(-1);
    }
    exit(0);
}

/// Runs the `drcov-report` program.
fn run() -> Result<()> {
    let matches = parse_args();
    let debug_level = parse_debug_level(&matches)?;
    ui::init_logger(debug_level);

    let dynamorio = DynamoRio::new(Path::new(matches.value_of_os("dynamorio").expect("-p")))?;
    let workdir = WorkDir::open(Path::new(matches.value_of_os("output").expect("-o")))?;
    let options = ReportOptions {
        src_filter: matches.value_of("filter").map(str::to_owned),
        path_maps: parse_path_maps(&matches),
        debug_level,
        open: matches.is_present("open"),
    };

    Reporter::new(&dynamorio, &workdir, options).run()
}

/// Parses the command line arguments using `clap`.
fn parse_args() -> ArgMatches<'static> {
    clap_app!(drcov_report =>
        (bin_name: "drcov-report")
        (about: "Renders an HTML coverage report from collected drcov traces")
        (version: crate_version!())
        (@setting DeriveDisplayOrder)
        (@arg dynamorio: -p <DR_PATH> "Path to the DynamoRio installation")
        (@arg output: -o <OUTPUT> "Output directory holding the collected traces")
        (@arg debug: -d [LEVEL] "Debug/warning level of the DynamoRio tools")
        (@arg filter: -f [PATTERN] "Only include source files matching this pattern")
        (@arg map: -m [OLD] [NEW] ... number_of_values(2) "Replace the path prefix OLD with NEW inside the coverage data")
        (@arg open: --open "Open the report in the browser after it is generated")
    ).get_matches()
}

/// Reads the `-d` flag, defaulting to 0.
fn parse_debug_level(matches: &ArgMatches) -> Result<u32> {
    match matches.value_of("debug") {
        Some(level) => level.parse().chain_err(|| format!("invalid debug level `{}`", level)),
        None => Ok(0),
    }
}

/// Collects the repeated `-m OLD NEW` pairs in the order given.
fn parse_path_maps(matches: &ArgMatches) -> Vec<(String, String)> {
    match matches.values_of("map") {
        Some(values) => {
            let values: Vec<&str> = values.collect();
            values.chunks(2).filter(|pair| pair.len() == 2).map(|pair| (pair[0].to_owned(), pair[1].to_owned())).collect()
        }
        None => Vec::new(),
    }
}
