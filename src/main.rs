use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;

use ssh_shortcuts::error::Result;
use ssh_shortcuts::{cli, logging};

#[derive(Parser)]
#[command(name = "ssh-shortcuts")]
#[command(author = "Oleg")]
#[command(version = "0.1.0")]
#[command(about = "Профили SSH-серверов и быстрые команды из JSON-файлов", long_about = None)]
struct Cli {
    /// Корень хранилища (по умолчанию домашняя директория)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Подробный журнал
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Загрузить конфигурацию и показать серверы
    Load,

    /// Показать путь к директории конфигурации
    Dir,

    /// Показать команду по id
    Command {
        /// Идентификатор команды
        id: u32,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{} {}", "Ошибка:".red().bold(), e);
    }

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", "Ошибка:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Load => {
            let status = cli::load::run(cli.root)?;
            Ok(if status.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Dir => cli::dir::run(cli.root).map(|()| ExitCode::SUCCESS),
        Commands::Command { id } => cli::command::run(cli.root, id).map(|()| ExitCode::SUCCESS),
    }
}
