use super::{is_stdin, load_template, read_input};
use crate::cli::{Cli, RenderArgs, RenderFormat};
use crate::config::Config;
use crate::prompt::{RenderInput, render_messages};
use eyre::{Context, Result};
use std::path::{Path, PathBuf};

pub fn run(cli: &Cli, args: &RenderArgs) -> Result<()> {
    let work_dir = Path::new(".");
    let config = Config::load(work_dir, cli.config.as_ref())?;

    let input = read_render_input(args)?;
    let output = render(&config, work_dir, args.template.template.as_ref(), input, args.format)?;
    print!("{}", output);

    Ok(())
}

/// Collect question and context from arguments, files or stdin
fn read_render_input(args: &RenderArgs) -> Result<RenderInput> {
    if let (Some(q), Some(c)) = (&args.question_file, &args.context_file)
        && is_stdin(q)
        && is_stdin(c)
    {
        return Err(eyre::eyre!("Only one of --question-file and --context-file can read stdin"));
    }

    let question = match (&args.question, &args.question_file) {
        (Some(question), _) => question.clone(),
        (None, Some(path)) => read_input(path)?,
        (None, None) => return Err(eyre::eyre!("A question is required (--question or --question-file)")),
    };

    let context = match (&args.context, &args.context_file) {
        (Some(context), _) => context.clone(),
        (None, Some(path)) => read_input(path)?,
        (None, None) => String::new(),
    };

    Ok(RenderInput::new(question, context))
}

/// Render the prompt in the requested format
pub fn render(
    config: &Config,
    work_dir: &Path,
    template: Option<&PathBuf>,
    input: RenderInput,
    format: RenderFormat,
) -> Result<String> {
    let template = load_template(config, work_dir, template)?;
    let input = input.prepare(&config.input).context("Invalid render input")?;

    let user_prompt = template
        .render_input(&input)
        .context(format!("Failed to render template '{}'", template.name))?;
    log::info!(
        "Rendered '{}' for a {} char question and {} char context",
        template.name,
        input.question.chars().count(),
        input.context.chars().count()
    );

    match format {
        RenderFormat::Text => Ok(user_prompt),
        RenderFormat::Messages => {
            let messages = render_messages(&config.prompt.system_prompt, &user_prompt);
            let json = serde_json::to_string_pretty(&messages).context("Failed to serialize messages")?;
            Ok(format!("{}\n", json))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::TemplateArgs;
    use crate::prompt::find_markers;
    use std::fs;
    use tempfile::tempdir;

    fn render_args() -> RenderArgs {
        RenderArgs {
            question: None,
            question_file: None,
            context: None,
            context_file: None,
            template: TemplateArgs { template: None },
            format: RenderFormat::Text,
        }
    }

    #[test]
    fn test_read_input_rejects_two_stdin_readers() {
        let args = RenderArgs {
            question_file: Some(PathBuf::from("-")),
            context_file: Some(PathBuf::from("-")),
            ..render_args()
        };
        let err = read_render_input(&args).unwrap_err();
        assert!(err.to_string().contains("stdin"));
    }

    #[test]
    fn test_read_input_question_text_wins_over_file() {
        let dir = tempdir().unwrap();
        let args = RenderArgs {
            question: Some("from arg".to_string()),
            question_file: Some(dir.path().join("missing.txt")),
            context: Some("ctx arg".to_string()),
            context_file: Some(dir.path().join("also-missing.txt")),
            ..render_args()
        };
        let input = read_render_input(&args).unwrap();
        assert_eq!(input, RenderInput::new("from arg", "ctx arg"));
    }

    #[test]
    fn test_read_input_files_and_missing_context() {
        let dir = tempdir().unwrap();
        let question_path = dir.path().join("q.txt");
        fs::write(&question_path, "why?\n").unwrap();

        let args = RenderArgs {
            question_file: Some(question_path),
            ..render_args()
        };
        let input = read_render_input(&args).unwrap();
        assert_eq!(input.question, "why?\n");
        assert_eq!(input.context, "");
    }

    #[test]
    fn test_render_text() {
        let dir = tempdir().unwrap();
        let input = RenderInput::new("how do I reuse connections?", "Django 4.2 with PostgreSQL");
        let output = render(&Config::default(), dir.path(), None, input, RenderFormat::Text).unwrap();

        assert!(output.contains("Question: how do I reuse connections?"));
        assert!(output.contains("Django 4.2 with PostgreSQL"));
        assert!(find_markers(&output).is_empty());
    }

    #[test]
    fn test_render_messages() {
        let dir = tempdir().unwrap();
        let input = RenderInput::new("why?", "");
        let output = render(&Config::default(), dir.path(), None, input, RenderFormat::Messages).unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        let messages = value.as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[0]["content"], Config::default().prompt.system_prompt.as_str());
        assert_eq!(messages[1]["role"], "user");
        assert!(messages[1]["content"].as_str().unwrap().contains("Question: why?"));
    }

    #[test]
    fn test_render_rejects_broken_template() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.md");
        fs::write(&path, "{{ question }} only").unwrap();

        let input = RenderInput::new("why?", "ctx");
        assert!(render(&Config::default(), dir.path(), Some(&path), input, RenderFormat::Text).is_err());
    }

    #[test]
    fn test_render_applies_input_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plain.md");
        fs::write(&path, "{{ question }}|{{ context }}").unwrap();

        let mut config = Config::default();
        config.input.max_context_chars = Some(4);

        let input = RenderInput::new("  why?  ", "abcdefgh");
        let output = render(&config, dir.path(), Some(&path), input, RenderFormat::Text).unwrap();
        assert_eq!(output, "why?|abcd");
    }

    #[test]
    fn test_render_rejects_blank_question() {
        let dir = tempdir().unwrap();
        let input = RenderInput::new(" ", "ctx");
        assert!(render(&Config::default(), dir.path(), None, input, RenderFormat::Text).is_err());
    }
}
