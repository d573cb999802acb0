//! Configuration loading and management for the Tip Pool Engine.
//!
//! This module loads the tip pool configuration (pool name, tip sources and
//! pay period lengths) from a YAML file.
//!
//! # Example
//!
//! ```no_run
//! use tip_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded pool: {}", config.name());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{DEFAULT_MAX_PERIOD_DAYS, DEFAULT_PAY_PERIOD_DAYS, PoolConfig, TipSourceConfig};
