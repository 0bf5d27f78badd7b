//! Statistics flow - Catalog and collection summary
//!
//! Reports record count, catalog size and the worst-case number of probes a
//! lookup needs, plus how many documents a phrase search would scan.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::config::KbConfig;
use crate::core::model::{ResultItem, ResultSet};
use crate::core::render::{RenderConfig, Renderer};
use crate::phrase::document::DocumentCollection;
use crate::records::store::RecordStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KbStats {
    pub records_file: String,
    pub total_records: u64,
    pub file_size_bytes: u64,
    pub line_size: usize,
    /// Upper bound on binary search probes for one lookup
    pub estimated_max_comparisons: u32,
    pub documents_available: usize,
    pub documents_dir: String,
}

/// Probes needed to narrow `total` slots down to one
pub fn max_comparisons(total: u64) -> u32 {
    u64::BITS - total.leading_zeros()
}

/// Gather statistics; a missing document directory counts as zero documents
pub fn collect_stats(config: &KbConfig) -> Result<KbStats> {
    let store = RecordStore::open(config)
        .with_context(|| format!("Failed to open catalog {:?}", config.records_path))?;
    let total_records = store.total_records()?;
    let file_size_bytes = store.size_bytes()?;

    let collection = DocumentCollection::from_config(config);
    let documents_available = match collection.entries() {
        Ok(entries) => entries.len(),
        Err(err) => {
            debug!(error = %err, "document collection unavailable");
            0
        }
    };

    Ok(KbStats {
        records_file: config.records_path.display().to_string(),
        total_records,
        file_size_bytes,
        line_size: store.line_size(),
        estimated_max_comparisons: max_comparisons(total_records),
        documents_available,
        documents_dir: config.documents_dir.display().to_string(),
    })
}

/// Run the stats command
pub fn run_stats(config: &KbConfig, render_config: RenderConfig) -> Result<()> {
    let stats = collect_stats(config)?;

    let mut result_set = ResultSet::with_query("stats");
    result_set.push(ResultItem::stats(serde_json::to_value(&stats)?));

    Renderer::with_config(render_config).render_to(&result_set, std::io::stdout().lock())?;
    Ok(())
}
