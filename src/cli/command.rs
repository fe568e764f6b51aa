//! Поиск команды по id

use std::path::PathBuf;

use colored::Colorize;

use crate::error::{ConfigError, Result};

use super::{open_loader, print_status};

pub fn run(root: Option<PathBuf>, id: u32) -> Result<()> {
    let mut loader = open_loader(root)?;

    let status = loader.load_config_files();
    if !status.is_success() {
        print_status(status);
    }

    let command = loader
        .command_by_id(id)
        .ok_or(ConfigError::CommandNotFound(id))?;

    println!("{} {}", "Команда:".cyan(), command.name.bold());

    // Владелец есть всегда, пока индекс и список серверов из одной загрузки
    if let Some(server) = loader.server_for_command(id) {
        println!("{} {} ({})", "Сервер:".cyan(), server.name, server.connection_string());
        println!("{} {}", "Строка:".cyan(), server.shell_line(command));
    } else {
        println!("{} {}", "Строка:".cyan(), command.cmd);
    }

    if command.confirm {
        println!("{}", "Перед запуском требуется подтверждение".dimmed());
    }

    Ok(())
}
