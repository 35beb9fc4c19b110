//! Task configuration: JSON file model, CLI merging, and defaults.
//!
//! The file model is strict (unknown fields are rejected) while the values
//! themselves stay permissive: an unrecognized index mode behaves like
//! `before` and a marker that fails to compile disables marker-based
//! indexing rather than failing the run.
use crate::cli::RootArgs;
use crate::consolidate::{IndexSpec, MarkerSpec, Options, PrefixSpec};
use crate::helpers::DEFAULT_HELPERS;
use anyhow::{ensure, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Marker used when none is configured: the AMD/CommonJS shim preamble
/// emitted at the top of bundled output.
pub const DEFAULT_MARKER: &str = r"var\s+define,\s*module,\s*exports;?";

/// Prefix the transpiler prepends to injected helper names.
pub const DEFAULT_PREFIX: &str = "_";

/// One sources -> destination unit of work.
#[derive(Debug, Clone)]
pub struct SourceGroup {
    pub src: Vec<String>,
    pub dest: Option<PathBuf>,
}

/// Fully merged per-run configuration.
#[derive(Debug)]
pub struct RunConfig {
    pub options: Options,
    pub groups: Vec<SourceGroup>,
}

/// On-disk task file; every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TaskFile {
    #[serde(default)]
    helpers: Option<Vec<String>>,
    #[serde(default)]
    marker: Option<MarkerField>,
    #[serde(default)]
    index: Option<IndexField>,
    #[serde(default)]
    prefix: Option<String>,
    #[serde(default)]
    files: Vec<FileEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileEntry {
    src: Vec<String>,
    #[serde(default)]
    dest: Option<PathBuf>,
}

/// `index` accepts a JSON number or a mode string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum IndexField {
    Offset(i64),
    Mode(String),
}

/// `marker` accepts a pattern string or a number; a number is coerced to
/// its decimal text and compiled like any other pattern.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum MarkerField {
    Pattern(String),
    Number(i64),
}

/// Merge the CLI arguments over the optional task file and the built-in
/// defaults. CLI positional sources define a single group and take
/// precedence over the file's `files` list.
pub fn load(args: &RootArgs) -> Result<RunConfig> {
    let file = match &args.config {
        Some(path) => read_task_file(path)?,
        None => TaskFile::default(),
    };

    let helpers = if args.helpers.is_empty() {
        file.helpers.unwrap_or_else(default_helpers)
    } else {
        args.helpers.clone()
    };
    let marker = args
        .marker
        .clone()
        .or_else(|| file.marker.map(marker_from_field))
        .unwrap_or_else(|| DEFAULT_MARKER.to_string());
    let index = match args.index.as_deref() {
        Some(raw) => parse_index(raw),
        None => file.index.map_or(IndexSpec::Before, index_from_field),
    };
    let prefix = args
        .prefix
        .clone()
        .or(file.prefix)
        .unwrap_or_else(|| DEFAULT_PREFIX.to_string());

    let groups = resolve_groups(args, file.files)?;

    Ok(RunConfig {
        options: Options {
            helpers,
            marker: MarkerSpec::Pattern(marker),
            index,
            prefix: PrefixSpec::Literal(prefix),
        },
        groups,
    })
}

fn read_task_file(path: &Path) -> Result<TaskFile> {
    let content =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parse config {}", path.display()))
}

fn default_helpers() -> Vec<String> {
    DEFAULT_HELPERS.iter().map(|name| name.to_string()).collect()
}

fn parse_index(raw: &str) -> IndexSpec {
    match raw.parse::<i64>() {
        Ok(offset) => IndexSpec::At(offset),
        Err(_) => mode_from_str(raw),
    }
}

fn index_from_field(field: IndexField) -> IndexSpec {
    match field {
        IndexField::Offset(offset) => IndexSpec::At(offset),
        IndexField::Mode(mode) => mode_from_str(&mode),
    }
}

fn marker_from_field(field: MarkerField) -> String {
    match field {
        MarkerField::Pattern(pattern) => pattern,
        MarkerField::Number(number) => number.to_string(),
    }
}

fn mode_from_str(mode: &str) -> IndexSpec {
    // Any unrecognized mode string falls back to the marker start offset.
    match mode {
        "after" => IndexSpec::After,
        "replace" => IndexSpec::Replace,
        _ => IndexSpec::Before,
    }
}

fn resolve_groups(args: &RootArgs, file_groups: Vec<FileEntry>) -> Result<Vec<SourceGroup>> {
    if !args.sources.is_empty() {
        return Ok(vec![SourceGroup {
            src: args.sources.clone(),
            dest: args.out.clone(),
        }]);
    }
    let groups: Vec<SourceGroup> = file_groups
        .into_iter()
        .map(|entry| SourceGroup {
            src: entry.src,
            dest: entry.dest,
        })
        .collect();
    ensure!(
        !groups.is_empty(),
        "no source files given (pass SOURCE arguments or a --config with a files list)"
    );
    Ok(groups)
}
