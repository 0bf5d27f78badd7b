//! Lookup flow - Exact id and id range queries against the catalog

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::core::config::KbConfig;
use crate::core::model::{ResultItem, ResultSet};
use crate::core::render::{RenderConfig, Renderer};
use crate::records::lookup::BinaryLookup;
use crate::records::record::RecordId;
use crate::records::store::{RecordSource, RecordStore};

fn open_lookup(config: &KbConfig) -> Result<BinaryLookup<Box<dyn RecordSource>>> {
    let store = RecordStore::open(config)
        .with_context(|| format!("Failed to open catalog {:?}", config.records_path))?;
    Ok(BinaryLookup::new(store))
}

/// Look up a single id; an absent id yields an empty set
pub fn lookup_exact(config: &KbConfig, id: &RecordId) -> Result<ResultSet> {
    let lookup = open_lookup(config)?;
    let mut result_set = ResultSet::with_query(format!("id: {}", id.as_str()));

    let found = lookup
        .find_exact(id.as_str())
        .with_context(|| format!("Lookup of {} failed", id))?;
    info!(id = id.as_str(), found = found.is_some(), "exact lookup");

    result_set.extend(found.map(ResultItem::record));
    Ok(result_set)
}

/// Look up every record with `start <= id <= end`
pub fn lookup_range(config: &KbConfig, start: &RecordId, end: &RecordId) -> Result<ResultSet> {
    if start > end {
        warn!(start = start.as_str(), end = end.as_str(), "range start is after range end");
    }

    let lookup = open_lookup(config)?;
    let mut result_set =
        ResultSet::with_query(format!("ids: {}-{}", start.as_str(), end.as_str()));

    let records = lookup
        .find_range(start.as_str(), end.as_str())
        .with_context(|| format!("Range lookup {}..{} failed", start, end))?;
    info!(count = records.len(), "range lookup");

    result_set.extend(records.into_iter().map(ResultItem::record));
    Ok(result_set)
}

/// Run the id command
pub fn run_id(config: &KbConfig, id: &str, render_config: RenderConfig) -> Result<()> {
    let id: RecordId = id.parse()?;
    let result_set = lookup_exact(config, &id)?;

    Renderer::with_config(render_config).render_to(&result_set, std::io::stdout().lock())?;
    Ok(())
}

/// Run the range command
pub fn run_range(config: &KbConfig, start: &str, end: &str, render_config: RenderConfig) -> Result<()> {
    let start: RecordId = start.parse()?;
    let end: RecordId = end.parse()?;
    let result_set = lookup_range(config, &start, &end)?;

    Renderer::with_config(render_config).render_to(&result_set, std::io::stdout().lock())?;
    Ok(())
}
