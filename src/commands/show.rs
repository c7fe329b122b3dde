use super::load_template;
use crate::cli::{Cli, TemplateArgs};
use crate::config::Config;
use crate::prompt::PromptRole;
use colored::*;
use eyre::Result;
use std::path::Path;

pub fn run(cli: &Cli, args: &TemplateArgs) -> Result<()> {
    let work_dir = Path::new(".");
    let config = Config::load(work_dir, cli.config.as_ref())?;
    let template = load_template(&config, work_dir, args.template.as_ref())?;

    let source = match args.template.clone().or_else(|| config.template_path(work_dir)) {
        Some(path) => path.display().to_string(),
        None => "built-in".to_string(),
    };
    let role = match template.role {
        PromptRole::System => "system",
        PromptRole::User => "user",
    };

    println!();
    println!("{}", "Template:".bold());
    println!("  Name: {}", template.name.cyan());
    println!("  Source: {}", source);
    println!("  Role: {}", role);
    println!();

    println!("{}", "Variables:".bold());
    for var in &template.variables {
        println!("  {} {}", var.name.cyan(), var.description.dimmed());
    }
    println!();

    println!("{}", "System prompt:".bold());
    println!("  {}", config.prompt.system_prompt);
    println!();

    println!("{}", "Template text:".bold());
    println!("{}", template.template);

    Ok(())
}
