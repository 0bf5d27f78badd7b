//! Flows module - Commands built on top of the engines
//!
//! Provides:
//! - lookup: Exact id and id range queries against the catalog
//! - search: Phrase search and document listing
//! - stats: Catalog and collection summary

pub mod lookup;
pub mod search;
pub mod stats;
