//! Phrase module - Wildcard phrase matching over text documents

pub mod document;
pub mod matcher;
pub mod scanner;
