//! Utilities Module
//!
//! Ambient concerns shared across the crate.

pub mod config;
pub mod logging;
