use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "qrw",
    about = "Render and validate the question-rewrite prompt",
    version = env!("GIT_DESCRIBE"),
    after_help = "Logs are written to: ~/.local/share/qrw/logs/qrw.log"
)]
pub struct Cli {
    /// Path to config file (overrides default locations)
    #[arg(short = 'C', long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize .qrw/ in current directory
    Init,

    /// Show the active template and its variables
    Show(TemplateArgs),

    /// Check a template against the placeholder contract
    Check(TemplateArgs),

    /// Render the template with a question and context
    Render(RenderArgs),

    /// Parse a model reply and print the rewritten question
    Parse(ParseArgs),
}

#[derive(Parser)]
pub struct TemplateArgs {
    /// Template file to use instead of the configured one
    #[arg(short, long)]
    pub template: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RenderFormat {
    /// Rendered user prompt only
    Text,
    /// JSON array of system and user chat messages
    Messages,
}

#[derive(Parser)]
pub struct RenderArgs {
    /// Question text
    #[arg(short, long, conflicts_with = "question_file")]
    pub question: Option<String>,

    /// Read the question from a file ("-" for stdin)
    #[arg(long, required_unless_present = "question")]
    pub question_file: Option<PathBuf>,

    /// Context text
    #[arg(short, long, conflicts_with = "context_file")]
    pub context: Option<String>,

    /// Read the context from a file ("-" for stdin)
    #[arg(long)]
    pub context_file: Option<PathBuf>,

    #[command(flatten)]
    pub template: TemplateArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = RenderFormat::Text)]
    pub format: RenderFormat,
}

#[derive(Parser)]
pub struct ParseArgs {
    /// File holding the model reply ("-" or omitted for stdin)
    pub input: Option<PathBuf>,

    /// Print the validated reply as JSON instead of the bare question
    #[arg(long)]
    pub json: bool,

    /// Do not strip Markdown code fences before parsing
    #[arg(long)]
    pub keep_fences: bool,
}
