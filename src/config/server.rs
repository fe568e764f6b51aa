//! Server profile and command shortcut structures

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::Password;

/// Default SSH port
pub const DEFAULT_PORT: u16 = 22;

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_sudo_path() -> String {
    "sudo".to_string()
}

fn default_nohup_path() -> String {
    "nohup".to_string()
}

/// A reusable remote action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Command {
    /// Configuration-wide identifier used for direct lookup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    /// Label shown to the user
    pub name: String,
    /// Shell command executed on the server
    pub cmd: String,
    /// Run through the server's sudo binary
    #[serde(default)]
    pub sudo: bool,
    /// Ask before running
    #[serde(default)]
    pub confirm: bool,
    /// Detach through nohup and return immediately
    #[serde(default)]
    pub background: bool,
}

impl Command {
    pub fn new(name: impl Into<String>, cmd: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            cmd: cmd.into(),
            sudo: false,
            confirm: false,
            background: false,
        }
    }

    pub fn with_id(mut self, id: u32) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_sudo(mut self) -> Self {
        self.sudo = true;
        self
    }

    pub fn in_background(mut self) -> Self {
        self.background = true;
        self
    }
}

/// A single server profile, loaded from one JSON file
///
/// Servers are identified and ordered by `(name, host, port, user)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    /// Display name (e.g., "main", "backup")
    pub name: String,
    /// Hostname or IP address
    pub host: String,
    /// SSH port (default: 22)
    #[serde(default = "default_port")]
    pub port: u16,
    /// Username for SSH connection
    pub user: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<Password>,
    #[serde(default = "default_sudo_path")]
    pub sudo_path: String,
    #[serde(default = "default_nohup_path")]
    pub nohup_path: String,
    #[serde(default)]
    pub commands: Vec<Command>,
}

impl Server {
    /// Create a new server profile without commands
    pub fn new(name: impl Into<String>, host: impl Into<String>, port: u16, user: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            host: host.into(),
            port,
            user: user.into(),
            password: None,
            sudo_path: default_sudo_path(),
            nohup_path: default_nohup_path(),
            commands: Vec::new(),
        }
    }

    pub fn with_password(mut self, password: impl Into<Password>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    /// Get the SSH connection string (user@host:port)
    pub fn connection_string(&self) -> String {
        if self.port == DEFAULT_PORT {
            format!("{}@{}", self.user, self.host)
        } else {
            format!("{}@{}:{}", self.user, self.host, self.port)
        }
    }

    /// Remote command line for `command` with the sudo / nohup prefixes applied
    pub fn shell_line(&self, command: &Command) -> String {
        let mut line = command.cmd.clone();
        if command.sudo {
            line = format!("{} {}", self.sudo_path, line);
        }
        if command.background {
            line = format!("{} {} > /dev/null 2>&1 &", self.nohup_path, line);
        }
        line
    }

    fn sort_key(&self) -> (&str, &str, u16, &str) {
        (&self.name, &self.host, self.port, &self.user)
    }
}

impl PartialEq for Server {
    fn eq(&self, other: &Self) -> bool {
        self.sort_key() == other.sort_key()
    }
}

impl Eq for Server {}

impl PartialOrd for Server {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Server {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}
