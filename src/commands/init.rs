use crate::cli::Cli;
use crate::config::Config;
use crate::templates::REWRITE_QUESTION_TEMPLATE;
use colored::*;
use eyre::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const TEMPLATE_FILE: &str = "TEMPLATE.md";

pub fn run(cli: &Cli) -> Result<()> {
    let work_dir = Path::new(".");

    init(work_dir, cli.config.as_ref())
}

pub fn init(work_dir: &Path, config_path: Option<&PathBuf>) -> Result<()> {
    let qrw_dir = Config::local_config_dir(work_dir);

    // Check if already initialized
    if qrw_dir.exists() {
        println!(
            "{} .qrw/ already exists. Use {} to reinitialize.",
            "⚠".yellow(),
            "rm -rf .qrw".cyan()
        );
        return Ok(());
    }

    // 1. Create .qrw/ directory
    fs::create_dir_all(&qrw_dir).context("Failed to create .qrw directory")?;
    println!("{} Created {}", "✓".green(), ".qrw/".cyan());

    // 2. Write the editable template
    let template_path = qrw_dir.join(TEMPLATE_FILE);
    fs::write(&template_path, REWRITE_QUESTION_TEMPLATE).context("Failed to write TEMPLATE.md")?;
    println!("{} Created {}", "✓".green(), ".qrw/TEMPLATE.md".cyan());

    // 3. Copy config from explicit path or global, pointing at the local template
    let mut config = if let Some(path) = config_path {
        Config::load(work_dir, Some(path))?
    } else {
        Config::load_global()?
    };
    config.prompt.template_path = Some(PathBuf::from(".qrw").join(TEMPLATE_FILE));
    config.save_local(work_dir)?;
    println!("{} Created {}", "✓".green(), ".qrw/qrw.yml".cyan());

    println!();
    println!("{}", "qrw initialized successfully!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to customize the prompt", ".qrw/TEMPLATE.md".cyan());
    println!("  2. Run {} to verify your edits", "qrw check".cyan());
    println!("  3. Run {} to render it", "qrw render -q <question> -c <context>".cyan());

    Ok(())
}
