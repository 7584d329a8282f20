//! Configuration loading for the payroll service.
//!
//! This module loads the server settings and the plumber seed list from YAML
//! files in a configuration directory.
//!
//! # Example
//!
//! ```no_run
//! use plumber_payroll::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Seeding {} plumbers", config.seed_plumbers().len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, SeedConfig, ServerConfig};
