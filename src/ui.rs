//! Print colored text.
//!
//! Provides functions and macros that simulate the `cargo` output style, plus the logger
//! setup shared by the two binaries.

use error::Error;

use env_logger::Builder;
use log::LevelFilter;
use termcolor::*;

use std::env;
use std::io::{Result, Write};

/// Prints a progress (green text), similar to the cargo output.
macro_rules! progress {
    ($tag:expr, $fmt:expr $(, $args:expr)*) => {{
        (|| -> ::std::io::Result<()> {
            use ::termcolor::*;
            use ::std::io::Write;
            let stream = StandardStream::stderr(ColorChoice::Auto);
            let mut lock = stream.lock();
            lock.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
            write!(lock, "{:>12} ", $tag)?;
            lock.reset()?;
            writeln!(lock, $fmt $(, $args)*)?;
            Ok(())
        })().expect("print progress")
    }}
}

/// Prints a warning (yellow text), similar to cargo output.
macro_rules! warning {
    ($fmt:expr $(, $args:expr)*) => {{
        (|| -> ::std::io::Result<()> {
            use ::termcolor::*;
            use ::std::io::Write;
            let stream = StandardStream::stderr(ColorChoice::Auto);
            let mut lock = stream.lock();
            lock.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true))?;
            write!(lock, "warning: ")?;
            lock.reset()?;
            writeln!(lock, $fmt $(, $args)*)?;
            Ok(())
        })().expect("print warning")
    }}
}

/// Installs the global logger of a command line program.
///
/// A positive `debug_level` raises the default filter from `Info` to `Debug`, which makes
/// the captured output of every child process visible. The `RUST_LOG` environment variable
/// still takes precedence over the flag.
pub fn init_logger(debug_level: u32) {
    let mut builder = Builder::new();
    builder.filter(None, if debug_level > 0 { LevelFilter::Debug } else { LevelFilter::Info });
    if let Ok(filters) = env::var("RUST_LOG") {
        builder.parse(&filters);
    }
    builder.init();
}

/// Prints an error and the causes.
pub fn print_error(error: &Error) -> Result<()> {
    let stream = StandardStream::stderr(ColorChoice::Auto);
    let mut lock = stream.lock();

    for (i, e) in error.iter().enumerate() {
        if i == 0 {
            lock.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_intense(true).set_bold(true))?;
            write!(lock, "error: ")?;
        } else {
            lock.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
            write!(lock, "caused by: ")?;
        }
        lock.reset()?;
        writeln!(lock, "{}", e)?;
    }
    if let Some(backtrace) = error.backtrace() {
        writeln!(lock, "\n{:?}", backtrace)?;
    }
    Ok(())
}

/// Prints the summary block listing source directories genhtml could not read.
///
/// `roots` should be the directory prefixes shared by more than one missing file, already
/// sorted the way they are to be displayed. The block is advisory; missing sources degrade
/// the report but never fail the run.
pub fn print_missing_sources(roots: &[String]) -> Result<()> {
    let stream = StandardStream::stderr(ColorChoice::Auto);
    let mut lock = stream.lock();

    lock.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true))?;
    writeln!(lock, "warning: some source directories could not be read")?;
    lock.reset()?;
    writeln!(lock, "{:-<80}", "")?;
    writeln!(lock, " This is not a fatal error. Use the `-m` option to map each missing path")?;
    writeln!(lock, " shown below to its actual location; repeat the option for as many mappings")?;
    writeln!(lock, " as you need. Unmapped sources will be absent from the report.")?;
    writeln!(lock)?;
    writeln!(lock, " Example:")?;
    writeln!(lock, "    -m \"build/glibc-OTsEL5/glibc-2.27\" \"/home/user/glibc-2.27\"")?;
    writeln!(lock, "{:-<80}", "")?;
    for root in roots {
        write!(lock, " Missing directory ")?;
        lock.set_color(ColorSpec::new().set_bold(true))?;
        writeln!(lock, "`{}`", root)?;
        lock.reset()?;
    }
    Ok(())
}
