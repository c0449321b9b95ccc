//! Configuration system for the finder pane session layer.
//!
//! Configuration comes from two layers:
//!
//! - an optional YAML file (`~/.config/finder/config.yaml`)
//! - host editor variables (`finder_buffer_name`, `finder_file_type`,
//!   `finder_width`), which take precedence when set

pub mod config;
pub mod defaults;
mod error;

pub use config::{Config, VAR_BUFFER_NAME, VAR_FILE_TYPE, VAR_WIDTH};
pub use error::ConfigError;
