//! Text-level fixes over the aggregated coverage data.
//!
//! `drcov2lcov` records source paths as they were at build time, which rarely match where
//! the sources sit on the reporting machine (DynamoRio's own remapping support exists but
//! does not reliably work). Two cheap text passes compensate:
//!
//! * [`apply_path_maps()`] rewrites user-supplied path prefixes inside the coverage info
//!   file before `genhtml` reads it.
//! * [`MissingSources`] digests genhtml's "cannot read" warnings into a ranked list of
//!   directory prefixes worth remapping on the next run.
//!
//! [`apply_path_maps()`]: ./fn.apply_path_maps.html
//! [`MissingSources`]: ./struct.MissingSources.html

use regex::Regex;

use std::collections::BTreeMap;
use std::path::{MAIN_SEPARATOR, Path};

lazy_static! {
    /// Diagnostic emitted by genhtml for every source file it cannot open.
    static ref MISSING_SOURCE: Regex = Regex::new(r"^genhtml: WARNING: cannot read (.+)!").expect("missing-source pattern");
}

/// Applies each `(old, new)` pair as a literal substring replacement over the coverage info
/// text, in the order supplied on the command line.
///
/// Every replacement re-scans the content produced by the previous one, so the pairs
/// `[("A", "B"), ("B", "C")]` turn `"A"` into `"C"`. A replacee that never occurs is a
/// silent no-op; nothing validates that a mapping was actually used.
pub fn apply_path_maps(mut contents: String, maps: &[(String, String)]) -> String {
    for &(ref old, ref new) in maps {
        progress!("Replacing", "`{}` -> `{}`", old, new);
        contents = contents.replace(old, new);
    }
    contents
}

/// The source files genhtml could not read, one entry per warning line.
#[derive(Debug, Default)]
pub struct MissingSources {
    dirs: Vec<String>,
}

impl MissingSources {
    /// Scans captured genhtml output for unreadable-source warnings and records the
    /// containing directory of every missing file.
    pub fn scan(output: &str) -> MissingSources {
        let mut dirs = Vec::new();
        for line in output.lines() {
            let file = match MISSING_SOURCE.captures(line) {
                Some(captures) => captures.get(1).expect("capture group").as_str(),
                None => continue,
            };
            debug!("missing source file `{}`", file);
            let dir = Path::new(file).parent().map_or_else(String::new, |p| p.to_string_lossy().into_owned());
            dirs.push(dir);
        }
        MissingSources { dirs }
    }

    /// True when genhtml read every source file it wanted.
    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    /// Tallies every directory prefix over all missing files.
    ///
    /// A missing file in `a/b/c` counts towards `a`, `a/b` and `a/b/c`; a leading path
    /// separator is stripped first. Files missing from the same directory each contribute,
    /// so the tally ranks prefixes by how much of the report they would recover.
    pub fn prefix_tally(&self) -> BTreeMap<String, usize> {
        let mut tally = BTreeMap::new();
        for dir in &self.dirs {
            let mut prefix = String::new();
            for component in dir.split(MAIN_SEPARATOR).filter(|c| !c.is_empty()) {
                if !prefix.is_empty() {
                    prefix.push(MAIN_SEPARATOR);
                }
                prefix.push_str(component);
                *tally.entry(prefix.clone()).or_insert(0) += 1;
            }
        }
        tally
    }

    /// Directory prefixes shared by more than one missing file, in reverse-lexicographic
    /// order. These are the roots worth suggesting for the `-m` remap option.
    pub fn ambiguous_roots(&self) -> Vec<String> {
        self.prefix_tally()
            .into_iter()
            .rev()
            .filter(|&(_, count)| count > 1)
            .map(|(prefix, _)| prefix)
            .collect()
    }
}
