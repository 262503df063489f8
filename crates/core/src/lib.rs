//! Core types and configuration for the market-sentiment system.
//!
//! This crate provides shared types used across all other crates:
//! - Price bars and the per-bar score record
//! - Sub-indicator identifiers and weight tables
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, IndicatorConfig, WeightTable};
pub use error::{Error, Result};
pub use types::*;
