//! Build command handler
//!
//! Fetches every selected source in parallel, runs its transform once, writes
//! `<key>.json`, then copies the manual JSON files and regenerates the index.

use anyhow::{bail, Context, Result};
use dotaconstants::{find_source, Source, SOURCES};
use rayon::prelude::*;
use std::fs;
use std::time::Instant;

use crate::bundle::{write_index, write_record};
use crate::config::{BuildPaths, Config};
use crate::fetch::Fetch;
use crate::file_utils::copy_json_files;

/// What a finished build produced
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    /// `(key, entries)` per written source, in registry order
    pub written: Vec<(&'static str, usize)>,
    pub copied: usize,
    pub indexed: usize,
}

/// Resolve `--only` keys, or every source when none are given
pub fn select(only: &[String]) -> Result<Vec<&'static Source>> {
    if only.is_empty() {
        return Ok(SOURCES.iter().collect());
    }

    let mut selected = Vec::new();
    for key in only {
        match find_source(key) {
            Some(source) => selected.push(source),
            None => bail!(
                "Unknown source '{}'. Run 'dotaconstants sources' to list them.",
                key
            ),
        }
    }
    // Registry order, each source once
    selected.sort_by_key(|source| SOURCES.iter().position(|s| s.key == source.key));
    selected.dedup_by_key(|source| source.key);
    Ok(selected)
}

/// Run one source end to end: fetch its documents, transform, write
fn build_source(
    source: &Source,
    config: &Config,
    fetcher: &impl Fetch,
    paths: &BuildPaths,
) -> Result<usize> {
    let documents = source
        .locations
        .iter()
        .map(|location| {
            fetcher
                .fetch(location, config.url(location))
                .with_context(|| format!("Failed to fetch {} for {}", location.name, source.key))
        })
        .collect::<Result<Vec<_>>>()?;

    let record = source
        .run(documents)
        .with_context(|| format!("Transform {} failed", source.key))?;
    let path = write_record(&paths.output, source.key, &record)?;

    tracing::info!(source = source.key, entries = record.len(), "wrote {}", path.display());
    Ok(record.len())
}

/// Build the selected sources into `paths.output`
pub fn run(
    sources: &[&'static Source],
    config: &Config,
    fetcher: &impl Fetch,
    paths: &BuildPaths,
) -> Result<Summary> {
    fs::create_dir_all(&paths.output).with_context(|| {
        format!("Failed to create output directory {}", paths.output.display())
    })?;

    let written = sources
        .par_iter()
        .map(|source| -> Result<(&'static str, usize)> {
            Ok((source.key, build_source(source, config, fetcher, paths)?))
        })
        .collect::<Result<Vec<_>>>()?;

    let copied = copy_json_files(&paths.json_dir, &paths.output)?;
    let indexed = write_index(&paths.output, &paths.index)?;

    Ok(Summary {
        written,
        copied,
        indexed,
    })
}

/// Handle the build command
pub fn handle(
    sources: &[&'static Source],
    config: &Config,
    fetcher: &impl Fetch,
    paths: &BuildPaths,
) -> Result<()> {
    let started = Instant::now();
    tracing::info!(
        sources = sources.len(),
        output = %paths.output.display(),
        "building constants"
    );

    let summary = run(sources, config, fetcher, paths)?;

    println!(
        "Built {} sources, copied {} manual files, indexed {} files in {:.1}s",
        summary.written.len(),
        summary.copied,
        summary.indexed,
        started.elapsed().as_secs_f64()
    );
    println!("Index written to {}", paths.index.display());

    Ok(())
}
