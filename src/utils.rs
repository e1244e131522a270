//! Additional methods for libstd and external crates.

use natord::compare_iter;

use std::cmp::Ordering;
#[cfg(any(target_os = "redox", unix))]
use std::os::unix::ffi::OsStrExt;
#[cfg(windows)]
use std::os::windows::ffi::OsStrExt;
use std::path::{Path, PathBuf};

macro_rules! do_compare {
    ($lhs:expr, $rhs:expr) => {
        compare_iter($lhs, $rhs, |_| false, |a, b| a.cmp(&b), |c| {
            match **c {
                b @ 0x30..=0x39 => Some((b - 0x30) as isize),
                _ => None,
            }
        })
    }
}

/// Compares two paths using natural sorting.
#[cfg(any(target_os = "redox", unix))]
pub fn compare_naturally(lhs: &Path, rhs: &Path) -> Ordering {
    let lhs = lhs.as_os_str().as_bytes().iter();
    let rhs = rhs.as_os_str().as_bytes().iter();
    do_compare!(lhs, rhs)
}

/// Compares two paths using natural sorting.
#[cfg(windows)]
pub fn compare_naturally(lhs: &Path, rhs: &Path) -> Ordering {
    let lhs: Vec<u16> = lhs.as_os_str().encode_wide().collect();
    let rhs: Vec<u16> = rhs.as_os_str().encode_wide().collect();
    do_compare!(lhs.iter(), rhs.iter())
}

/// Short circuit of `path.join(a).join(b)` without creating intermediate `PathBuf`s.
pub fn join_2<P1: AsRef<Path>, P2: AsRef<Path>>(path: &Path, a: P1, b: P2) -> PathBuf {
    let mut path = path.join(a);
    path.push(b);
    path
}

/// Short circuit of `path.join(a).join(b).join(c)` without creating intermediate `PathBuf`s.
pub fn join_3<P1: AsRef<Path>, P2: AsRef<Path>, P3: AsRef<Path>>(path: &Path, a: P1, b: P2, c: P3) -> PathBuf {
    let mut path = path.join(a);
    path.push(b);
    path.push(c);
    path
}
