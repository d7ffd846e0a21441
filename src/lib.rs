//! **recite** - Assemble passage sets for timed recitation practice
//!
//! Filters a category pool by word limit, then rejection-samples fixed-size
//! sets until one lands inside the target speaking-rate band.

/// Command-line interface with clap integration
pub mod cli;

/// Shell completion generation
pub mod completion;

/// Core pipeline - pool loading, filtering, sampling and output
pub mod core {
    /// Passage records and the `Weighted` seam the selector works against
    pub mod passage;
    pub use passage::{Passage, Weighted};

    /// Word-limit filter applied before sampling
    pub mod filter;
    pub use filter::filter_pool;

    /// Rate-constrained rejection sampler
    pub mod sampler;
    pub use sampler::{RateBand, Selection, SelectionError, SelectionRequest, choose, select_subset};

    /// On-disk pool files with per-category caching
    pub mod pool;
    pub use pool::{DirPoolSource, PoolKey, PoolSource};

    /// Card, summary and JSON rendering
    pub mod render;

    /// `generate` command
    pub mod generate;
    pub use generate::run as generate_run;

    /// `stats` command
    pub mod stats;
    pub use stats::run as stats_run;
}

/// Infrastructure - configuration and logging
pub mod infra {
    /// Layered configuration with TOML/YAML/JSON files and env overrides
    pub mod config;
    pub use self::config::{Config, init as config_init, load_config};

    /// tracing-subscriber setup
    pub mod logging;
}

// Strategic re-exports for clean CLI interface
pub use crate::cli::{AppContext, Cli, Commands};
pub use crate::core::{generate_run, stats_run};
pub use crate::infra::{Config, load_config};

// Core types for external consumers
pub use crate::core::{Passage, RateBand, Selection, SelectionError, SelectionRequest, Weighted};
pub use crate::core::{choose, filter_pool, select_subset};
