//! Layer boundary lint for the `echelon` client crate.
//!
//! The client is split into `domain` (state machines, presenters and the
//! port traits they drive), `inbound` (the terminal shell) and `outbound`
//! (storage and remote adapters). This lint parses every source file under
//! those directories and reports:
//!
//! - `domain` code reaching into either adapter layer, or into crates that
//!   only the binary or the adapters should touch
//! - `inbound` code reaching into `outbound` or the filesystem crates
//! - `outbound` code reaching into `inbound` or the CLI/config crates
//!
//! Run it with `cargo run -p architecture-lint` from anywhere in the
//! workspace, or pass a crate directory to lint a different checkout.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use syn::visit::Visit;

/// Library name of the linted crate, as seen from its own tests and binary.
pub const CRATE_NAME: &str = "echelon";

/// Where the linted crate lives, relative to the workspace root.
pub const CRATE_DIR: &str = "client";

const LAYERS: [Layer; 3] = [Layer::Domain, Layer::Inbound, Layer::Outbound];

/// One forbidden dependency found in one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// File path relative to the crate's `src/` directory.
    pub file: PathBuf,
    /// Which boundary was crossed.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file.display(), self.message)
    }
}

/// Failure modes returned by the lint.
#[derive(Debug)]
pub enum ArchitectureLintError {
    /// Walking or reading the source tree failed.
    Io(io::Error),
    /// A file could not be parsed or placed in a layer.
    Parse {
        /// Offending file.
        file: PathBuf,
        /// Parser or placement diagnostic.
        message: String,
    },
    /// At least one boundary was crossed.
    Violations(Vec<Violation>),
    /// No enclosing workspace was found to locate the crate in.
    NoWorkspace {
        /// Directory the search started from.
        start: PathBuf,
    },
}

impl fmt::Display for ArchitectureLintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "I/O error while linting layers: {err}"),
            Self::Parse { file, message } => {
                write!(f, "cannot lint {}: {message}", file.display())
            }
            Self::Violations(violations) => {
                writeln!(f, "layer boundary violations:")?;
                for violation in violations {
                    writeln!(f, "- {violation}")?;
                }
                Ok(())
            }
            Self::NoWorkspace { start } => write!(
                f,
                "no Cargo.toml declaring [workspace] at or above {}",
                start.display()
            ),
        }
    }
}

impl std::error::Error for ArchitectureLintError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ArchitectureLintError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// Directory of the linted crate inside the workspace enclosing `start`.
///
/// The nearest ancestor whose `Cargo.toml` has a `[workspace]` table is
/// taken as the root; member manifests are skipped.
///
/// # Errors
/// [`ArchitectureLintError::NoWorkspace`] when no ancestor qualifies.
pub fn locate_crate(start: &Path) -> Result<PathBuf, ArchitectureLintError> {
    start
        .ancestors()
        .find(|dir| declares_workspace(&dir.join("Cargo.toml")))
        .map(|root| root.join(CRATE_DIR))
        .ok_or_else(|| ArchitectureLintError::NoWorkspace {
            start: start.to_path_buf(),
        })
}

fn declares_workspace(manifest: &Path) -> bool {
    fs::read_to_string(manifest)
        .is_ok_and(|contents| contents.lines().any(|line| line.trim() == "[workspace]"))
}

/// Lint the crate rooted at `crate_dir` (the directory holding its
/// `Cargo.toml`).
///
/// # Errors
/// Returns every violation found, or the first I/O or parse failure.
pub fn lint_crate(crate_dir: &Path) -> Result<(), ArchitectureLintError> {
    let sources = collect_sources(&crate_dir.join("src"))?;
    lint_sources(&sources)
}

/// Lint in-memory sources. Paths must be relative to `src/`.
///
/// # Errors
/// Returns every violation found, or a parse failure for the first file
/// that cannot be parsed or does not sit under a layer directory.
pub fn lint_sources(sources: &[LintSource]) -> Result<(), ArchitectureLintError> {
    let mut violations = Vec::new();
    for source in sources {
        let layer = Layer::of(&source.file).ok_or_else(|| ArchitectureLintError::Parse {
            file: source.file.clone(),
            message: "file is not under domain/, inbound/ or outbound/".to_owned(),
        })?;
        let parsed =
            syn::parse_file(&source.contents).map_err(|err| ArchitectureLintError::Parse {
                file: source.file.clone(),
                message: err.to_string(),
            })?;
        violations.extend(check_file(&source.file, layer, &parsed));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ArchitectureLintError::Violations(violations))
    }
}

/// A Rust source file to be linted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintSource {
    /// Path relative to the crate's `src/` directory.
    pub file: PathBuf,
    /// Source text.
    pub contents: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layer {
    Domain,
    Inbound,
    Outbound,
}

impl Layer {
    fn of(relative_path: &Path) -> Option<Self> {
        let first = relative_path.components().next()?.as_os_str().to_str()?;
        LAYERS.into_iter().find(|layer| layer.dir() == first)
    }

    const fn dir(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Inbound => "inbound",
            Self::Outbound => "outbound",
        }
    }

    const fn forbidden_modules(self) -> &'static [&'static str] {
        match self {
            Self::Domain => &["inbound", "outbound"],
            Self::Inbound => &["outbound"],
            Self::Outbound => &["inbound"],
        }
    }

    const fn forbidden_crates(self) -> &'static [&'static str] {
        match self {
            Self::Domain => &[
                "camino",
                "cap_std",
                "clap",
                "color_eyre",
                "ortho_config",
                "tracing_subscriber",
            ],
            Self::Inbound => &["camino", "cap_std", "ortho_config", "tracing_subscriber"],
            Self::Outbound => &["clap", "color_eyre", "ortho_config", "tracing_subscriber"],
        }
    }
}

fn check_file(file: &Path, layer: Layer, parsed: &syn::File) -> Vec<Violation> {
    let mut collector = PathCollector::default();
    collector.visit_file(parsed);

    let mut messages = BTreeSet::new();
    for segments in &collector.paths {
        if let Some(module) = internal_root(segments)
            .filter(|root| layer.forbidden_modules().contains(root))
        {
            messages.insert(format!(
                "{} code must not depend on crate::{module}",
                layer.dir()
            ));
        }
        if let Some(krate) = external_root(segments)
            .filter(|root| layer.forbidden_crates().contains(root))
        {
            messages.insert(format!(
                "{} code must not depend on external crate `{krate}`",
                layer.dir()
            ));
        }
    }

    messages
        .into_iter()
        .map(|message| Violation {
            file: file.to_path_buf(),
            message,
        })
        .collect()
}

fn is_relative(segment: &str) -> bool {
    matches!(segment, "crate" | "self" | "super")
}

/// First module named after the crate root, if the path is internal.
fn internal_root(segments: &[String]) -> Option<&str> {
    let first = segments.first()?.as_str();
    if LAYERS.iter().any(|layer| layer.dir() == first) {
        return Some(first);
    }
    let index = if is_relative(first) {
        segments.iter().position(|segment| !is_relative(segment))?
    } else if first == CRATE_NAME {
        1
    } else {
        return None;
    };
    segments.get(index).map(String::as_str)
}

fn external_root(segments: &[String]) -> Option<&str> {
    let root = segments.first()?.as_str();
    if is_relative(root) || root == CRATE_NAME {
        return None;
    }
    Some(root)
}

#[derive(Default)]
struct PathCollector {
    paths: BTreeSet<Vec<String>>,
}

impl PathCollector {
    fn record_use_tree(&mut self, tree: &syn::UseTree, prefix: Vec<String>) {
        let mut segments = prefix;
        match tree {
            syn::UseTree::Path(path) => {
                segments.push(path.ident.to_string());
                self.record_use_tree(&path.tree, segments);
            }
            syn::UseTree::Name(name) => {
                segments.push(name.ident.to_string());
                self.paths.insert(segments);
            }
            syn::UseTree::Rename(rename) => {
                segments.push(rename.ident.to_string());
                self.paths.insert(segments);
            }
            syn::UseTree::Glob(_) => {
                segments.push("*".to_owned());
                self.paths.insert(segments);
            }
            syn::UseTree::Group(group) => {
                for item in &group.items {
                    self.record_use_tree(item, segments.clone());
                }
            }
        }
    }
}

impl<'ast> Visit<'ast> for PathCollector {
    fn visit_path(&mut self, node: &'ast syn::Path) {
        let segments: Vec<String> = node
            .segments
            .iter()
            .map(|segment| segment.ident.to_string())
            .collect();
        if !segments.is_empty() {
            self.paths.insert(segments);
        }
        syn::visit::visit_path(self, node);
    }

    fn visit_item_use(&mut self, node: &'ast syn::ItemUse) {
        self.record_use_tree(&node.tree, Vec::new());
    }
}

fn collect_sources(src_dir: &Path) -> Result<Vec<LintSource>, ArchitectureLintError> {
    let mut sources = Vec::new();
    for layer in LAYERS {
        let dir = src_dir.join(layer.dir());
        if dir.is_dir() {
            walk(src_dir, &dir, &mut sources)?;
        }
    }
    Ok(sources)
}

fn walk(
    src_dir: &Path,
    current: &Path,
    sources: &mut Vec<LintSource>,
) -> Result<(), ArchitectureLintError> {
    for entry in fs::read_dir(current)? {
        let path = entry?.path();
        if path.is_dir() {
            walk(src_dir, &path, sources)?;
            continue;
        }
        if path.extension().and_then(|ext| ext.to_str()) != Some("rs") {
            continue;
        }
        let file = path
            .strip_prefix(src_dir)
            .map_err(|err| ArchitectureLintError::Parse {
                file: path.clone(),
                message: err.to_string(),
            })?
            .to_path_buf();
        let contents = fs::read_to_string(&path)?;
        sources.push(LintSource { file, contents });
    }
    Ok(())
}
