//! `architecture-lint [CRATE_DIR]`
//!
//! Lints `CRATE_DIR`, or the workspace's client crate when no directory is
//! given, and exits non-zero on any violation.

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use architecture_lint::{ArchitectureLintError, lint_crate, locate_crate};

fn main() -> ExitCode {
    match target().and_then(|crate_dir| lint_crate(&crate_dir)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = writeln!(io::stderr().lock(), "{err}");
            ExitCode::FAILURE
        }
    }
}

fn target() -> Result<PathBuf, ArchitectureLintError> {
    match env::args_os().nth(1) {
        Some(crate_dir) => Ok(PathBuf::from(crate_dir)),
        None => locate_crate(&env::current_dir()?),
    }
}
