use super::load_template;
use crate::cli::{Cli, TemplateArgs};
use crate::config::Config;
use crate::error::RewriteError;
use crate::prompt::PromptTemplate;
use crate::response::parse_response;
use crate::templates::EXPECTED_OUTPUT_EXAMPLE;
use colored::*;
use eyre::Result;
use std::path::Path;

/// Outcome of checking a template
#[derive(Debug)]
pub struct CheckReport {
    pub template_name: String,
    pub problems: Vec<String>,
}

impl CheckReport {
    pub fn passed(&self) -> bool {
        self.problems.is_empty()
    }
}

pub fn run(cli: &Cli, args: &TemplateArgs) -> Result<()> {
    let work_dir = Path::new(".");
    let config = Config::load(work_dir, cli.config.as_ref())?;
    let template = load_template(&config, work_dir, args.template.as_ref())?;

    let report = check(&template);
    print_report(&report);

    if report.passed() {
        Ok(())
    } else {
        Err(eyre::eyre!(
            "Template '{}' failed {} check(s)",
            report.template_name,
            report.problems.len()
        ))
    }
}

/// Run the placeholder checks plus the output-example check
pub fn check(template: &PromptTemplate) -> CheckReport {
    let mut problems = match template.check() {
        Ok(()) => Vec::new(),
        Err(RewriteError::TemplateCheck(problems)) => problems,
        Err(e) => vec![e.to_string()],
    };

    if let Err(e) = parse_response(EXPECTED_OUTPUT_EXAMPLE, false) {
        problems.push(format!("expected output example is invalid: {}", e));
    }

    CheckReport {
        template_name: template.name.clone(),
        problems,
    }
}

fn print_report(report: &CheckReport) {
    println!();
    println!("{} {}", "Template:".bold(), report.template_name.cyan());
    if report.passed() {
        println!("  {} placeholders and output example OK", "✓".green());
    } else {
        for problem in &report.problems {
            println!("  {} {}", "✗".red(), problem);
        }
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_template_passes() {
        let report = check(&PromptTemplate::rewrite_question());
        assert!(report.passed(), "problems: {:?}", report.problems);
        assert_eq!(report.template_name, "rewrite_question");
    }

    #[test]
    fn test_broken_template_reports_problems() {
        let template = PromptTemplate {
            template: "{{ question }} {{ topic }}".to_string(),
            ..PromptTemplate::rewrite_question()
        };
        let report = check(&template);
        assert!(!report.passed());
        assert_eq!(report.problems.len(), 2);
    }

    #[test]
    fn test_empty_template_reported() {
        let template = PromptTemplate {
            template: String::new(),
            ..PromptTemplate::rewrite_question()
        };
        let report = check(&template);
        assert_eq!(report.problems, vec!["Template is empty".to_string()]);
    }
}
