use super::read_input;
use crate::cli::{Cli, ParseArgs};
use crate::config::Config;
use crate::response::{RewriteResponse, parse_response};
use eyre::{Context, Result};
use std::path::{Path, PathBuf};

pub fn run(cli: &Cli, args: &ParseArgs) -> Result<()> {
    let work_dir = Path::new(".");
    let config = Config::load(work_dir, cli.config.as_ref())?;

    let path = args.input.clone().unwrap_or_else(|| PathBuf::from("-"));
    let raw = read_input(&path)?;

    let strip_fences = config.response.strip_code_fences && !args.keep_fences;
    let response = parse(&raw, strip_fences)?;

    if args.json {
        println!("{}", response.to_json()?);
    } else {
        println!("{}", response.rewritten_question);
    }

    Ok(())
}

pub fn parse(raw: &str, strip_fences: bool) -> Result<RewriteResponse> {
    let response = parse_response(raw, strip_fences).context("Model reply does not match the rewrite contract")?;
    log::info!(
        "Parsed rewritten question ({} chars)",
        response.rewritten_question.chars().count()
    );
    Ok(response)
}
