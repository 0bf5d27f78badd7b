//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - Configuration (KbConfig)
//! - Error kinds shared by both engines
//! - Unified result model (ResultItem)
//! - Rendering functions for different output formats
//! - Text normalization
//! - Document reading strategies

pub mod config;
pub mod error;
pub mod file_reader;
pub mod model;
pub mod normalize;
pub mod render;
