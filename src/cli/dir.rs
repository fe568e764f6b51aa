//! Путь к директории конфигурации

use std::path::PathBuf;

use crate::error::Result;

use super::open_loader;

pub fn run(root: Option<PathBuf>) -> Result<()> {
    let loader = open_loader(root)?;
    println!("{}", loader.config_dir().display());
    Ok(())
}
