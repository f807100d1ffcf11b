//! Configuration module for DocSearch-RS
//!
//! Handles loading and validating settings from YAML files and environment
//! variables. Settings are constructed once at startup and injected into the
//! application state; there is no global settings instance.

mod settings;

pub use settings::*;
