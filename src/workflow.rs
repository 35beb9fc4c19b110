//! The per-group consolidation loop.
//!
//! Each (sources -> destination) group is processed to completion before the
//! next begins: expand the source patterns, concatenate the files in declared
//! order, run the consolidator, and write the destination. Groups with no
//! matching helpers leave their destination untouched.
use crate::cli::RootArgs;
use crate::config::{self, SourceGroup};
use crate::consolidate::{consolidate, Options};
use crate::util::{display_paths, format_bytes};
use anyhow::{bail, ensure, Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, warn};

pub fn run(args: RootArgs) -> Result<()> {
    let run_config = config::load(&args)?;
    // Checked here as well as in the core so the run aborts before any
    // source file is read.
    ensure!(
        !run_config.options.helpers.is_empty(),
        "at least one helper function name must be configured"
    );

    let mut written = 0usize;
    for group in &run_config.groups {
        if process_group(group, &run_config.options)? {
            written += 1;
        }
    }
    println!("{written} file(s) written");
    Ok(())
}

fn process_group(group: &SourceGroup, options: &Options) -> Result<bool> {
    let sources = resolve_sources(&group.src)?;
    let destination = match (&group.dest, sources.as_slice()) {
        (Some(dest), _) => dest.clone(),
        // In-place rewrite is only unambiguous for a single source.
        (None, [single]) => single.clone(),
        (None, _) => bail!("a destination is required unless exactly one source file is given"),
    };

    let mut source = String::new();
    for path in &sources {
        let text =
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        source.push_str(&text);
    }

    let Some(result) = consolidate(&source, options)? else {
        debug!(
            "no helper functions found in {}, skipping",
            display_paths(&sources)
        );
        return Ok(false);
    };

    for helper in &result.helpers {
        debug!(
            "found {} {} helper definition(s)",
            helper.count, helper.name
        );
    }

    fs::write(&destination, &result.output)
        .with_context(|| format!("write {}", destination.display()))?;
    info!(
        "consolidated {} -> {} helper definition(s) in {} ({} -> {})",
        result.total,
        result.helpers.len(),
        destination.display(),
        format_bytes(result.original_bytes),
        format_bytes(result.output_bytes),
    );
    Ok(true)
}

/// Expand source entries in declared order. Entries that match no existing
/// file are warned about and skipped; the run continues.
fn resolve_sources(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut sources = Vec::new();
    for pattern in patterns {
        let mut matched = false;
        let entries =
            glob::glob(pattern).with_context(|| format!("invalid source pattern {pattern}"))?;
        for entry in entries {
            let path = entry.with_context(|| format!("expand source pattern {pattern}"))?;
            if path.is_file() {
                sources.push(path);
                matched = true;
            }
        }
        if !matched {
            warn!("source file {pattern} not found");
        }
    }
    Ok(sources)
}
