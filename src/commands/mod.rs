pub mod check;
pub mod init;
pub mod parse;
pub mod render;
pub mod show;

use crate::config::Config;
use crate::prompt::PromptTemplate;
use eyre::{Context, Result};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Path that stands for stdin in file arguments
const STDIN_PATH: &str = "-";

/// Pick the template: explicit override, then configured file, then built-in
pub fn load_template(config: &Config, work_dir: &Path, template: Option<&PathBuf>) -> Result<PromptTemplate> {
    let path = match template {
        Some(path) => Some(path.clone()),
        None => config.template_path(work_dir),
    };

    match path {
        Some(path) => PromptTemplate::from_file(&path).context(format!("Failed to load template {}", path.display())),
        None => {
            log::debug!("Using built-in template");
            Ok(PromptTemplate::rewrite_question())
        }
    }
}

pub fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == STDIN_PATH
}

/// Read a file argument, or stdin for "-"
pub fn read_input(path: &Path) -> Result<String> {
    if is_stdin(path) {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        Ok(buf)
    } else {
        fs::read_to_string(path).context(format!("Failed to read {}", path.display()))
    }
}
