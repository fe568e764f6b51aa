//! Загрузка конфигурации и список серверов

use std::path::PathBuf;

use colored::Colorize;

use crate::config::{ConfigLoader, LoadStatus};
use crate::error::Result;

use super::{open_loader, print_status};

pub fn run(root: Option<PathBuf>) -> Result<LoadStatus> {
    let mut loader = open_loader(root)?;

    println!("{}", "=== Загрузка конфигурации ===".cyan().bold());
    println!("{} {}", "Директория:".cyan(), loader.config_dir().display());
    println!();

    let status = loader.load_config_files();
    print_status(status);
    println!();

    print_servers(&loader);
    Ok(status)
}

fn print_servers(loader: &ConfigLoader) {
    if loader.servers().is_empty() {
        println!("Серверы не настроены.");
        println!();
        println!(
            "Положите файлы {} в {}",
            "*.json".cyan(),
            loader.config_dir().display().to_string().cyan()
        );
        return;
    }

    println!(
        "{:<20} {:<30} {:<10}",
        "ИМЯ".bold(),
        "ПОДКЛЮЧЕНИЕ".bold(),
        "КОМАНДЫ".bold()
    );
    println!("{}", "─".repeat(60).dimmed());

    for server in loader.servers() {
        println!(
            "{:<20} {:<30} {:<10}",
            server.name,
            server.connection_string(),
            server.commands.len()
        );

        for command in &server.commands {
            let id = command
                .id
                .map(|id| format!("[{}]", id))
                .unwrap_or_default();
            println!("    {:<6} {}", id.cyan(), command.name);
        }
    }

    println!();
}
