//! Records module - Fixed-width catalog access
//!
//! Provides:
//! - record: Record model, line parsing and id canonicalization
//! - store: Fixed-width random access over file or in-memory bytes
//! - lookup: Binary search for exact ids and id ranges

pub mod lookup;
pub mod record;
pub mod store;
