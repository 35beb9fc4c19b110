//! Helper definition extraction and re-injection.
//!
//! The consolidator operates on text alone: it matches `var`/`function`
//! declaration lines whose identifier is on the helper allow-list, strips
//! every occurrence from the working buffer, and re-emits one canonical copy
//! of each distinct helper at a single injection offset. It never parses the
//! surrounding language; the transform is regex-driven and best-effort.
use anyhow::{anyhow, ensure, Result};
use regex::{Captures, Regex};

/// Resolver over the concatenated source text, producing a marker pattern.
pub type MarkerResolver = Box<dyn Fn(&str) -> Option<String>>;
/// Resolver over the concatenated source text, producing an injection mode.
pub type IndexResolver = Box<dyn Fn(&str) -> IndexValue>;
/// Resolver over the concatenated source text, producing a helper-name prefix.
pub type PrefixResolver = Box<dyn Fn(&str) -> Option<String>>;

/// Marker option: a fixed pattern source or a value computed from the input.
///
/// The pattern locates the injection marker. A pattern that fails to compile
/// (or a resolver that returns none) disables marker-based indexing entirely
/// and the injection index falls back to 0.
pub enum MarkerSpec {
    Pattern(String),
    Resolve(MarkerResolver),
}

/// Injection mode: where the consolidated block lands relative to the marker.
///
/// All marker-relative modes require a usable marker; without one the index
/// is 0, numeric offsets included.
pub enum IndexSpec {
    /// Verbatim character offset into the pre-extraction buffer.
    At(i64),
    /// Start offset of the first marker match.
    Before,
    /// End offset of the first marker match.
    After,
    /// Computes a replacement of the marker and discards it, then lands at
    /// the same offset as `Before`. Known inconsistency, kept intentionally
    /// and pinned by tests.
    Replace,
    /// Mode computed from the input at run time.
    Resolve(IndexResolver),
}

/// A resolved injection mode, as produced by an [`IndexSpec::Resolve`] hook.
pub enum IndexValue {
    At(i64),
    Before,
    After,
    Replace,
}

/// Prefix option: fixed text or computed from the input. An empty prefix
/// disables prefix matching and stripping.
pub enum PrefixSpec {
    Literal(String),
    Resolve(PrefixResolver),
}

impl std::fmt::Debug for MarkerSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarkerSpec::Pattern(p) => f.debug_tuple("Pattern").field(p).finish(),
            MarkerSpec::Resolve(_) => f.debug_tuple("Resolve").field(&"<resolver>").finish(),
        }
    }
}

impl std::fmt::Debug for IndexSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexSpec::At(n) => f.debug_tuple("At").field(n).finish(),
            IndexSpec::Before => f.write_str("Before"),
            IndexSpec::After => f.write_str("After"),
            IndexSpec::Replace => f.write_str("Replace"),
            IndexSpec::Resolve(_) => f.debug_tuple("Resolve").field(&"<resolver>").finish(),
        }
    }
}

impl std::fmt::Debug for PrefixSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrefixSpec::Literal(s) => f.debug_tuple("Literal").field(s).finish(),
            PrefixSpec::Resolve(_) => f.debug_tuple("Resolve").field(&"<resolver>").finish(),
        }
    }
}

/// Per-run consolidation options.
#[derive(Debug)]
pub struct Options {
    pub helpers: Vec<String>,
    pub marker: MarkerSpec,
    pub index: IndexSpec,
    pub prefix: PrefixSpec,
}

/// Occurrence count for one canonical helper.
#[derive(Debug)]
pub struct HelperCount {
    pub name: String,
    pub count: usize,
}

/// Result of a consolidation pass that found at least one helper.
#[derive(Debug)]
pub struct Consolidation {
    pub output: String,
    /// One entry per canonical name, in first-seen order.
    pub helpers: Vec<HelperCount>,
    /// Total occurrences across all helpers.
    pub total: usize,
    pub original_bytes: usize,
    pub output_bytes: usize,
}

struct Extracted {
    name: String,
    text: String,
    count: usize,
}

/// Consolidate duplicated helper definitions in `source`.
///
/// Returns `Ok(None)` when no allow-listed helper is found; the caller must
/// leave the destination untouched. Fails only when the allow-list is empty.
pub fn consolidate(source: &str, options: &Options) -> Result<Option<Consolidation>> {
    ensure!(
        !options.helpers.is_empty(),
        "at least one helper function name must be configured"
    );

    // Marker, index, and prefix are resolved against the original buffer,
    // once, before extraction shifts any offsets.
    let marker = resolve_marker(&options.marker, source);
    let index = resolve_index(&options.index, marker.as_ref(), source);
    let prefix = resolve_prefix(&options.prefix, source);

    let pattern = definition_pattern(&options.helpers, prefix.as_deref())?;
    let mut found: Vec<Extracted> = Vec::new();
    let stripped = pattern.replace_all(source, |caps: &Captures<'_>| {
        record(&mut found, caps, prefix.as_deref());
        ""
    });

    if found.is_empty() {
        return Ok(None);
    }

    let output = inject(&stripped, index, &found);
    let total: usize = found.iter().map(|helper| helper.count).sum();
    let helpers = found
        .into_iter()
        .map(|helper| HelperCount {
            name: helper.name,
            count: helper.count,
        })
        .collect();

    Ok(Some(Consolidation {
        original_bytes: source.len(),
        output_bytes: output.len(),
        helpers,
        total,
        output,
    }))
}

/// Resolve the marker option to a compiled pattern. Fixed strings are
/// compiled verbatim; anything that does not compile leaves the marker
/// absent.
fn resolve_marker(spec: &MarkerSpec, source: &str) -> Option<Regex> {
    let pattern = match spec {
        MarkerSpec::Pattern(pattern) => Some(pattern.clone()),
        MarkerSpec::Resolve(resolve) => resolve(source),
    };
    pattern.and_then(|pattern| Regex::new(&pattern).ok())
}

/// Resolve the injection index against the pre-extraction buffer.
fn resolve_index(spec: &IndexSpec, marker: Option<&Regex>, source: &str) -> usize {
    let Some(marker) = marker else {
        return 0;
    };
    let value = match spec {
        IndexSpec::At(offset) => IndexValue::At(*offset),
        IndexSpec::Before => IndexValue::Before,
        IndexSpec::After => IndexValue::After,
        IndexSpec::Replace => IndexValue::Replace,
        IndexSpec::Resolve(resolve) => resolve(source),
    };
    let offset = match value {
        IndexValue::At(offset) => offset,
        IndexValue::Before => match marker.find(source) {
            Some(found) => found.start() as i64,
            None => -1,
        },
        IndexValue::After => match marker.find(source) {
            Some(found) => found.end() as i64,
            None => -1,
        },
        IndexValue::Replace => match marker.find(source) {
            // The replacement is computed and dropped, so replace lands at
            // the same offset as before. See IndexSpec::Replace.
            Some(found) => {
                let _ = marker.replace(source, "");
                found.start() as i64
            }
            None => -1,
        },
    };
    // Unresolved modes report -1; negative offsets clamp to the buffer start.
    offset.max(0) as usize
}

/// Resolve the helper-name prefix; empty means no prefix.
fn resolve_prefix(spec: &PrefixSpec, source: &str) -> Option<String> {
    let prefix = match spec {
        PrefixSpec::Literal(prefix) => Some(prefix.clone()),
        PrefixSpec::Resolve(resolve) => resolve(source),
    };
    prefix.filter(|prefix| !prefix.is_empty())
}

/// Build the single scan pattern: a `var` or `function` statement at the
/// start of a line whose identifier is one of the allow-listed names,
/// optionally carrying the prefix, through the end of the line including the
/// trailing line terminator when present.
fn definition_pattern(helpers: &[String], prefix: Option<&str>) -> Result<Regex> {
    let prefixed = prefix.map(|prefix| format!("(?:{})?", regex::escape(prefix)));
    let optional_prefix = prefixed.as_deref().unwrap_or("");
    let names = helpers
        .iter()
        .map(|name| format!("{optional_prefix}{}", regex::escape(name)))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = format!(r"(?m)^(?:var|function)\s({names})[^\n]*(?:\n|$)");
    Regex::new(&pattern).map_err(|err| anyhow!("invalid scan pattern {pattern}: {err}"))
}

fn record(found: &mut Vec<Extracted>, caps: &Captures<'_>, prefix: Option<&str>) {
    let raw = &caps[0];
    let matched = &caps[1];
    let name = match prefix {
        Some(prefix) => matched.strip_prefix(prefix).unwrap_or(matched),
        None => matched,
    };
    if let Some(helper) = found.iter_mut().find(|helper| helper.name == name) {
        helper.count += 1;
        return;
    }
    // First sight wins: later duplicates only bump the count.
    let mut text = raw.to_string();
    if !text.ends_with('\n') {
        text.push('\n');
    }
    found.push(Extracted {
        name: name.to_string(),
        text,
        count: 1,
    });
}

/// Re-emit the canonical definitions at the injection offset.
///
/// The offset was resolved against the pre-extraction buffer and is applied
/// to the stripped buffer unchanged: text removed before the offset shifts
/// the effective cut point. The cut clamps to the stripped length and to a
/// character boundary.
fn inject(stripped: &str, index: usize, found: &[Extracted]) -> String {
    let mut cut = index.min(stripped.len());
    while !stripped.is_char_boundary(cut) {
        cut -= 1;
    }
    let block: usize = found.iter().map(|helper| helper.text.len()).sum();
    let mut output = String::with_capacity(stripped.len() + block + 2);
    if cut > 0 {
        output.push_str(&stripped[..cut]);
        output.push('\n');
    }
    for helper in found {
        output.push_str(&helper.text);
    }
    output.push('\n');
    output.push_str(&stripped[cut..]);
    output
}
