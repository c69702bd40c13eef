//! Policy configuration.
//!
//! # Data Flow
//! ```text
//! TOML file → loader.rs (parse)
//!          → validation.rs (semantic checks, all errors collected)
//!          → schema.rs types consumed by defaults::pipeline_from_config
//! ```
//!
//! # Design Decisions
//! - Configuration is captured once at construction and never mutated
//! - Optional features are `Option<T>`, never empty-string sentinels
//! - Validation returns all violations, not just the first

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::load_config;
pub use schema::{
    CoopConfig, CoopPolicy, CspConfig, FramingConfig, HstsConfig, PipelineConfig, XsrfConfig,
};
