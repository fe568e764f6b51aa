//! Server configuration for ssh-shortcuts
//!
//! Handles:
//! - Server profiles and their command shortcuts
//! - Reading and validating server files
//! - Scanning the configuration directory

mod loader;
mod mapper;
mod secret;
mod server;

pub use loader::{ConfigLoader, LoadStatus, CONFIG_DIR, CONFIG_EXTENSIONS};
pub use mapper::ServerMapper;
pub use secret::Password;
pub use server::{Command, Server, DEFAULT_PORT};
