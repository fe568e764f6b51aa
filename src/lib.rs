//! ssh-shortcuts - SSH server profiles and command shortcuts from JSON files
//!
//! This crate provides:
//! - Server and command models deserialized from one JSON file per server
//! - A loader that scans the configuration directory and indexes commands by id
//! - Storage probes and directory scanning behind small traits

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod storage;

pub use config::{Command, ConfigLoader, LoadStatus, Server};
pub use error::{ConfigError, Result};
