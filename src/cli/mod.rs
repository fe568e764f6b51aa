//! Реализация CLI команд

pub mod command;
pub mod dir;
pub mod load;

use std::path::PathBuf;

use colored::Colorize;

use crate::config::{ConfigLoader, LoadStatus};
use crate::error::{ConfigError, Result};

/// Корень хранилища: `--root`, иначе домашняя директория, иначе директория исполняемого файла
pub fn resolve_storage_root(root: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(root) = root {
        return Ok(root);
    }

    if let Some(home) = dirs::home_dir() {
        return Ok(home);
    }

    let exe_path = std::env::current_exe()?;
    exe_path
        .parent()
        .map(|p| p.to_path_buf())
        .ok_or(ConfigError::NoStorageRoot)
}

/// Создать загрузчик для указанного корня хранилища
pub fn open_loader(root: Option<PathBuf>) -> Result<ConfigLoader> {
    Ok(ConfigLoader::new(resolve_storage_root(root)?))
}

/// Напечатать итог загрузки
pub fn print_status(status: LoadStatus) {
    match status {
        LoadStatus::Success => println!("{} {}", "Готово:".green().bold(), status),
        LoadStatus::AmbiguousId | LoadStatus::Error => {
            println!("{} {}", "Внимание:".yellow().bold(), status)
        }
        _ => println!("{} {}", "Ошибка:".red().bold(), status),
    }
}
