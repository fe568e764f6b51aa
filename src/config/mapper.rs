//! Server file reader: JSON deserialization followed by semantic validation

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

use super::Server;

/// Maps one configuration file to a validated [`Server`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerMapper;

impl ServerMapper {
    pub fn new() -> Self {
        Self
    }

    /// Read, deserialize and validate a server file.
    ///
    /// The file handle is released before this returns.
    pub fn read_file(&self, path: &Path) -> Result<Server> {
        let file = File::open(path)?;
        let server: Server = serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            if source.is_io() {
                ConfigError::Io(source.into())
            } else {
                ConfigError::Parse {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        validate(&server).map_err(|message| ConfigError::Validation {
            path: path.to_path_buf(),
            message,
        })?;

        Ok(server)
    }

    /// Same as [`read_file`](Self::read_file) for in-memory JSON
    pub fn read_str(&self, json: &str) -> Result<Server> {
        let origin = PathBuf::from("<memory>");
        let server: Server = serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            path: origin.clone(),
            source,
        })?;

        validate(&server).map_err(|message| ConfigError::Validation {
            path: origin,
            message,
        })?;

        Ok(server)
    }
}

fn validate(server: &Server) -> std::result::Result<(), String> {
    require(&server.name, "name")?;
    require(&server.host, "host")?;
    require(&server.user, "user")?;
    require(&server.sudo_path, "sudoPath")?;
    require(&server.nohup_path, "nohupPath")?;

    if server.port == 0 {
        return Err("port должен быть в диапазоне 1-65535".into());
    }

    for (index, command) in server.commands.iter().enumerate() {
        require(&command.name, &format!("commands[{}].name", index))?;
        require(&command.cmd, &format!("commands[{}].cmd", index))?;
    }

    Ok(())
}

fn require(value: &str, field: &str) -> std::result::Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} не может быть пустым", field))
    } else {
        Ok(())
    }
}
