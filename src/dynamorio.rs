//! Locations of the DynamoRio tool binaries.
//!
//! Everything this crate runs lives inside one DynamoRio installation: the `drrun` launcher
//! under `bin64/`, and the `drcov2lcov` / `genhtml` post-processing pair under
//! `tools/bin64/`. Only the installation root is user-supplied; the tools are never searched
//! for anywhere else.

use error::{ErrorKind, Result};
use utils::{join_2, join_3};

use std::path::{Path, PathBuf};

/// A validated DynamoRio installation root.
#[derive(Debug)]
pub struct DynamoRio {
    drrun: PathBuf,
    drcov2lcov: PathBuf,
    genhtml: PathBuf,
}

impl DynamoRio {
    /// Derives the tool paths from the installation root.
    ///
    /// # Errors
    ///
    /// Returns [`NotADirectory`] if `root` does not name a directory. The individual tool
    /// binaries are not probed here; a missing tool surfaces as a launch failure when it is
    /// first invoked.
    ///
    /// [`NotADirectory`]: ../error/enum.ErrorKind.html#variant.NotADirectory
    pub fn new(root: &Path) -> Result<DynamoRio> {
        ensure!(root.is_dir(), ErrorKind::NotADirectory(root.to_owned()));
        Ok(DynamoRio {
            drrun: join_2(root, "bin64", "drrun"),
            drcov2lcov: join_3(root, "tools", "bin64", "drcov2lcov"),
            genhtml: join_3(root, "tools", "bin64", "genhtml"),
        })
    }

    /// Path to the `drrun` launcher.
    pub fn drrun(&self) -> &Path {
        &self.drrun
    }

    /// Path to the `drcov2lcov` trace aggregator.
    pub fn drcov2lcov(&self) -> &Path {
        &self.drcov2lcov
    }

    /// Path to the `genhtml` report generator.
    pub fn genhtml(&self) -> &Path {
        &self.genhtml
    }
}

#[cfg(test)]
mod tests {
    use super::DynamoRio;
    use error::ErrorKind;

    use tempfile::TempDir;

    #[test]
    fn tool_paths_hang_off_the_root() {
        let root = TempDir::new().expect("temp dir");
        let dynamorio = DynamoRio::new(root.path()).expect("valid root");
        assert_eq!(dynamorio.drrun(), root.path().join("bin64").join("drrun"));
        assert_eq!(dynamorio.drcov2lcov(), root.path().join("tools").join("bin64").join("drcov2lcov"));
        assert_eq!(dynamorio.genhtml(), root.path().join("tools").join("bin64").join("genhtml"));
    }

    #[test]
    fn root_must_be_a_directory() {
        let root = TempDir::new().expect("temp dir");
        let missing = root.path().join("nope");
        match DynamoRio::new(&missing) {
            Err(ref e) => match *e.kind() {
                ErrorKind::NotADirectory(ref path) => assert_eq!(*path, missing),
                ref kind => panic!("unexpected error kind {:?}", kind),
            },
            Ok(_) => panic!("a missing root should be rejected"),
        }
    }
}
