use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{}: некорректный файл сервера: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{}: неверное описание сервера: {message}", .path.display())]
    Validation { path: PathBuf, message: String },

    #[error("Не удалось определить корневую директорию хранилища")]
    NoStorageRoot,

    #[error("Команда с id {0} не найдена")]
    CommandNotFound(u32),

    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl ConfigError {
    /// Single-line rendering for log records: embedded line breaks become spaces.
    pub fn log_line(&self) -> String {
        flatten_lines(&self.to_string())
    }
}

pub(crate) fn flatten_lines(message: &str) -> String {
    message.replace("\r\n", " ").replace(['\n', '\r'], " ")
}
