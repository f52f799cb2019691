//! Repo-local lint enforcing the hexagonal layering of the `roster` crate.
//!
//! `roster` keeps its records, ports, and orchestration in `domain`, terminal
//! commands in `inbound`, and the HTTP directory and cache slot adapters in
//! `outbound`. The lint parses every source file under those three module
//! trees and reports:
//!
//! - `domain` code reaching into `inbound`, `outbound`, or `settings`, or into
//!   transport, filesystem, configuration, or terminal crates
//! - `inbound` code reaching into `outbound` or into transport and storage
//!   crates
//! - `outbound` code reaching into `inbound` or into terminal crates
//!
//! Run it with `cargo run -p architecture-lint`.

use std::collections::BTreeSet;
use std::fmt;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use syn::visit::Visit;

/// Module trees the lint understands, in traversal order.
const LAYER_DIRS: [&str; 3] = ["domain", "inbound", "outbound"];

/// A single boundary violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// File path relative to the crate's `src` directory.
    pub file: Utf8PathBuf,
    /// Which rule was broken.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file, self.message)
    }
}

/// Failure modes returned by the lint.
#[derive(Debug)]
pub enum ArchitectureLintError {
    /// Opening, walking, or reading the source tree failed.
    Io {
        /// Path being accessed.
        path: Utf8PathBuf,
        /// Underlying error.
        source: io::Error,
    },
    /// A file could not be parsed or placed in a layer.
    Parse {
        /// File path relative to `src`.
        file: Utf8PathBuf,
        /// Parser or placement message.
        message: String,
    },
    /// One or more boundary violations were found.
    Violations(Vec<Violation>),
}

impl fmt::Display for ArchitectureLintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read sources under {path}: {source}")
            }
            Self::Parse { file, message } => {
                write!(f, "failed to parse {file}: {message}")
            }
            Self::Violations(violations) => {
                writeln!(f, "Architecture boundary violations:")?;
                for violation in violations {
                    writeln!(f, "- {violation}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ArchitectureLintError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// A Rust source file to lint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintSource {
    /// Path relative to the crate's `src` directory.
    pub file: Utf8PathBuf,
    /// File contents.
    pub contents: String,
}

impl LintSource {
    /// Build a source from a relative path and its contents.
    pub fn new(file: impl Into<Utf8PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            contents: contents.into(),
        }
    }
}

/// Lint the sources of the crate rooted at `crate_dir`.
///
/// `crate_name` is the crate's Rust identifier, so absolute paths such as
/// `roster::outbound::cache` are recognised as internal.
///
/// # Errors
///
/// Returns [`ArchitectureLintError`] when the tree cannot be read or parsed,
/// or when any boundary is crossed.
pub fn lint_crate_sources(
    crate_dir: &Utf8Path,
    crate_name: &str,
) -> Result<(), ArchitectureLintError> {
    let sources = collect_lint_sources(&crate_dir.join("src"))?;
    lint_sources(crate_name, &sources)
}

/// Lint in-memory sources.
///
/// # Errors
///
/// As for [`lint_crate_sources`], minus I/O.
pub fn lint_sources(crate_name: &str, sources: &[LintSource]) -> Result<(), ArchitectureLintError> {
    let mut violations = Vec::new();

    for source in sources {
        let layer =
            Layer::from_relative_path(&source.file).ok_or_else(|| ArchitectureLintError::Parse {
                file: source.file.clone(),
                message: "file is outside the domain, inbound, and outbound trees".to_owned(),
            })?;
        let parsed =
            syn::parse_file(&source.contents).map_err(|err| ArchitectureLintError::Parse {
                file: source.file.clone(),
                message: err.to_string(),
            })?;
        violations.extend(check_file(crate_name, &source.file, layer, &parsed));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ArchitectureLintError::Violations(violations))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layer {
    Domain,
    Inbound,
    Outbound,
}

impl Layer {
    fn from_relative_path(path: &Utf8Path) -> Option<Self> {
        match path.components().next()?.as_str() {
            "domain" => Some(Self::Domain),
            "inbound" => Some(Self::Inbound),
            "outbound" => Some(Self::Outbound),
            _ => None,
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Inbound => "inbound",
            Self::Outbound => "outbound",
        }
    }

    const fn forbidden_modules(self) -> &'static [&'static str] {
        match self {
            Self::Domain => &["inbound", "outbound", "settings"],
            Self::Inbound => &["outbound"],
            Self::Outbound => &["inbound"],
        }
    }

    const fn forbidden_crates(self) -> &'static [&'static str] {
        match self {
            Self::Domain => &[
                "actix_web",
                "camino",
                "cap_std",
                "clap",
                "color_eyre",
                "ortho_config",
                "reqwest",
                "slot_store",
                "tracing_subscriber",
            ],
            Self::Inbound => &["cap_std", "reqwest", "slot_store"],
            Self::Outbound => &["clap", "color_eyre"],
        }
    }
}

fn check_file(
    crate_name: &str,
    file: &Utf8Path,
    layer: Layer,
    parsed: &syn::File,
) -> Vec<Violation> {
    let mut collector = PathCollector::default();
    collector.visit_file(parsed);

    let mut messages = BTreeSet::new();
    for segments in &collector.paths {
        match classify(crate_name, segments) {
            Some(PathRoot::Module(root)) if layer.forbidden_modules().contains(&root) => {
                messages.insert(format!(
                    "{} module must not depend on crate::{root}",
                    layer.name()
                ));
            }
            Some(PathRoot::Crate(root)) if layer.forbidden_crates().contains(&root) => {
                messages.insert(format!(
                    "{} module must not depend on external crate `{root}`",
                    layer.name()
                ));
            }
            _ => {}
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

enum PathRoot<'a> {
    Module(&'a str),
    Crate(&'a str),
}

fn classify<'a>(crate_name: &str, segments: &'a [String]) -> Option<PathRoot<'a>> {
    let first = segments.first()?.as_str();
    if matches!(first, "crate" | "self" | "super") {
        let root = segments
            .iter()
            .map(String::as_str)
            .find(|segment| !matches!(*segment, "crate" | "self" | "super"))?;
        return Some(PathRoot::Module(root));
    }
    if first == crate_name {
        return segments.get(1).map(|root| PathRoot::Module(root.as_str()));
    }
    if LAYER_DIRS.contains(&first) {
        return Some(PathRoot::Module(first));
    }
    Some(PathRoot::Crate(first))
}

#[derive(Default)]
struct PathCollector {
    paths: BTreeSet<Vec<String>>,
}

impl PathCollector {
    fn record_use_tree(&mut self, tree: &syn::UseTree, prefix: &[String]) {
        let extend = |ident: &syn::Ident| {
            let mut segments = prefix.to_vec();
            segments.push(ident.to_string());
            segments
        };
        match tree {
            syn::UseTree::Path(path) => self.record_use_tree(&path.tree, &extend(&path.ident)),
            syn::UseTree::Name(name) => {
                self.paths.insert(extend(&name.ident));
            }
            syn::UseTree::Rename(rename) => {
                self.paths.insert(extend(&rename.ident));
            }
            syn::UseTree::Glob(_) => {
                let mut segments = prefix.to_vec();
                segments.push("*".to_owned());
                self.paths.insert(segments);
            }
            syn::UseTree::Group(group) => {
                for item in &group.items {
                    self.record_use_tree(item, prefix);
                }
            }
        }
    }
}

impl<'ast> Visit<'ast> for PathCollector {
    fn visit_path(&mut self, node: &'ast syn::Path) {
        let segments = node
            .segments
            .iter()
            .map(|segment| segment.ident.to_string())
            .collect::<Vec<_>>();
        if !segments.is_empty() {
            self.paths.insert(segments);
        }
        syn::visit::visit_path(self, node);
    }

    fn visit_item_use(&mut self, node: &'ast syn::ItemUse) {
        self.record_use_tree(&node.tree, &[]);
    }
}

fn collect_lint_sources(src_dir: &Utf8Path) -> Result<Vec<LintSource>, ArchitectureLintError> {
    let io_error = |path: &Utf8Path| {
        let path = path.to_path_buf();
        move |source: io::Error| ArchitectureLintError::Io { path, source }
    };
    let src = Dir::open_ambient_dir(src_dir, ambient_authority()).map_err(io_error(src_dir))?;

    let mut sources = Vec::new();
    for layer in LAYER_DIRS {
        let relative = Utf8Path::new(layer);
        match src.open_dir(relative) {
            Ok(dir) => collect_under(&dir, relative, &src_dir.join(relative), &mut sources)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(io_error(&src_dir.join(relative))(err)),
        }
    }
    sources.sort_by(|left, right| left.file.cmp(&right.file));
    Ok(sources)
}

fn collect_under(
    dir: &Dir,
    relative: &Utf8Path,
    absolute: &Utf8Path,
    sources: &mut Vec<LintSource>,
) -> Result<(), ArchitectureLintError> {
    let io_error = |source: io::Error| ArchitectureLintError::Io {
        path: absolute.to_path_buf(),
        source,
    };
    for entry in dir.entries().map_err(io_error)? {
        let entry = entry.map_err(io_error)?;
        let name = entry.file_name().into_string().map_err(|raw| {
            ArchitectureLintError::Parse {
                file: relative.to_path_buf(),
                message: format!("non UTF-8 file name {raw:?}"),
            }
        })?;
        let child_relative = relative.join(&name);
        if entry.file_type().map_err(io_error)?.is_dir() {
            let child = entry.open_dir().map_err(io_error)?;
            collect_under(&child, &child_relative, &absolute.join(&name), sources)?;
        } else if child_relative.extension() == Some("rs") {
            let contents = dir.read_to_string(&name).map_err(io_error)?;
            sources.push(LintSource::new(child_relative, contents));
        }
    }
    Ok(())
}
