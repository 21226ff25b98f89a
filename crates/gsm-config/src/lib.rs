//! BTS configuration management
//!
//! This crate provides configuration loading and parsing for the GSM BTS stack:
//! - TOML configuration file parsing
//! - Stack configuration structures
//! - System information buffers

pub mod stack_config;
pub mod stack_config_sysinfo;
pub mod toml_config;

pub use stack_config::*;
pub use stack_config_sysinfo::CfgSysinfo;
pub use toml_config::*;
