//! Search flow - Phrase search and document listing over the collection

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::core::config::KbConfig;
use crate::core::error::KbError;
use crate::core::model::{Issue, LineRange, Meta, ResultItem, ResultSet};
use crate::core::render::{RenderConfig, Renderer};
use crate::phrase::document::DocumentCollection;
use crate::phrase::scanner::DocumentScanner;

/// Search every document for `phrase`; unreadable documents become error items
pub fn search_phrase(config: &KbConfig, phrase: &str) -> Result<ResultSet> {
    let scanner = DocumentScanner::new(config);
    let search = scanner
        .search(phrase)
        .with_context(|| format!("Cannot search {:?}", scanner.collection().dir()))?;
    debug!(words = ?search.pattern().words(), "searching documents");

    let mut result_set = ResultSet::with_query(format!("phrase: \"{}\"", phrase));
    let mut skipped = 0usize;

    for outcome in search {
        match outcome {
            Ok(hit) => result_set.push(ResultItem::match_result(
                hit.filename,
                LineRange::new(hit.start_line, hit.end_line),
                hit.excerpt,
            )),
            Err(err) => {
                skipped += 1;
                result_set.push(error_item(&err));
            }
        }
    }

    info!(hits = result_set.len() - skipped, skipped, "phrase search");
    Ok(result_set)
}

/// List the documents that a phrase search would scan
pub fn list_documents(config: &KbConfig) -> Result<ResultSet> {
    let collection = DocumentCollection::from_config(config);
    let entries = collection
        .entries()
        .with_context(|| format!("Cannot list {:?}", collection.dir()))?;

    Ok(entries
        .into_iter()
        .map(|entry| {
            ResultItem::document(entry.name).with_meta(Meta {
                size: Some(entry.size),
            })
        })
        .collect())
}

fn error_item(err: &KbError) -> ResultItem {
    let item = ResultItem::error(Issue::from(err));
    match err {
        KbError::ResourceUnavailable { path, .. } => match path.file_name() {
            Some(name) => item.with_path(name.to_string_lossy()),
            None => item,
        },
        _ => item,
    }
}

/// Run the phrase command
pub fn run_phrase(config: &KbConfig, phrase: &str, render_config: RenderConfig) -> Result<()> {
    let result_set = search_phrase(config, phrase)?;
    Renderer::with_config(render_config).render_to(&result_set, std::io::stdout().lock())?;
    Ok(())
}

/// Run the books command
pub fn run_books(config: &KbConfig, render_config: RenderConfig) -> Result<()> {
    let result_set = list_documents(config)?;
    Renderer::with_config(render_config).render_to(&result_set, std::io::stdout().lock())?;
    Ok(())
}
