use crate::config::InputConfig;
use crate::error::{Result, RewriteError};
use crate::templates::REWRITE_QUESTION_TEMPLATE;
use handlebars::Handlebars;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

static MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)(?P<esc3>\\?)\{\{\{(?P<raw>.*?)\}\}\}|(?P<esc2>\\?)\{\{(?P<inner>.*?)\}\}").expect("marker regex")
});
static IDENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("ident regex"));

const TEMPLATE_NAME: &str = "prompt";

/// Which chat message the rendered template becomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptRole {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateVariable {
    pub name: String,
    pub description: String,
}

/// A `{{ ... }}` occurrence in template text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    /// Trimmed text between the braces
    pub name: String,
    /// Byte offset of the opening braces
    pub offset: usize,
}

impl Marker {
    fn is_variable(&self) -> bool {
        IDENT_RE.is_match(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: PromptRole,
    pub content: String,
}

/// Caller-supplied values for the rewrite template
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderInput {
    pub question: String,
    pub context: String,
}

impl RenderInput {
    pub fn new(question: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            context: context.into(),
        }
    }

    /// Apply the input settings: trimming, emptiness rules and the context cap
    pub fn prepare(self, config: &InputConfig) -> Result<Self> {
        let (mut question, mut context) = (self.question, self.context);
        if config.trim {
            question = question.trim().to_string();
            context = context.trim().to_string();
        }

        if question.trim().is_empty() {
            return Err(RewriteError::EmptyQuestion);
        }
        if context.trim().is_empty() && !config.allow_empty_context {
            return Err(RewriteError::EmptyContext);
        }

        if let Some(limit) = config.max_context_chars {
            let total = context.chars().count();
            if total > limit {
                log::warn!("Context has {} chars, truncating to {}", total, limit);
                context = truncate_chars(&context, limit).to_string();
            }
        }

        Ok(Self { question, context })
    }

    fn to_vars(&self) -> HashMap<String, String> {
        let mut vars = HashMap::new();
        vars.insert("question".to_string(), self.question.clone());
        vars.insert("context".to_string(), self.context.clone());
        vars
    }
}

/// Longest prefix of `s` holding at most `max_chars` characters
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    pub name: String,
    pub role: PromptRole,
    pub template: String,
    pub variables: Vec<TemplateVariable>,
}

impl PromptTemplate {
    /// The built-in question-rewrite template
    pub fn rewrite_question() -> Self {
        Self {
            name: "rewrite_question".to_string(),
            role: PromptRole::User,
            template: REWRITE_QUESTION_TEMPLATE.to_string(),
            variables: rewrite_variables(),
        }
    }

    /// Load a custom template body; it must declare the same variables as the built-in one
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let template = fs::read_to_string(path)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "custom".to_string());
        log::info!("Loaded template '{}' from: {}", name, path.display());

        Ok(Self {
            name,
            template,
            ..Self::rewrite_question()
        })
    }

    /// Every `{{ ... }}` marker in the template, in order
    pub fn markers(&self) -> Vec<Marker> {
        find_markers(&self.template)
    }

    /// Verify the placeholder contract, collecting every problem found
    pub fn check(&self) -> Result<()> {
        if self.template.trim().is_empty() {
            return Err(RewriteError::EmptyTemplate);
        }

        let markers = self.markers();
        let mut problems = Vec::new();

        for var in &self.variables {
            let count = markers.iter().filter(|m| m.name == var.name).count();
            if count != 1 {
                problems.push(format!(
                    "`{{{{ {} }}}}` appears {} times (expected exactly once)",
                    var.name, count
                ));
            }
        }

        for marker in &markers {
            if !marker.is_variable() {
                problems.push(format!(
                    "unsupported marker `{{{{{}}}}}` at offset {}",
                    marker.name, marker.offset
                ));
            } else if !self.variables.iter().any(|v| v.name == marker.name) {
                problems.push(format!(
                    "undeclared variable `{}` at offset {}",
                    marker.name, marker.offset
                ));
            }
        }

        if problems.is_empty()
            && let Err(e) = self.registry()
        {
            problems.push(e.to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(RewriteError::TemplateCheck(problems))
        }
    }

    /// Render with the given values, substituted verbatim
    pub fn render(&self, vars: &HashMap<String, String>) -> Result<String> {
        self.check()?;

        if let Some(missing) = self.variables.iter().find(|v| !vars.contains_key(&v.name)) {
            return Err(RewriteError::MissingVariable(missing.name.clone()));
        }

        let handlebars = self.registry()?;
        let rendered = handlebars.render(TEMPLATE_NAME, vars)?;
        log::debug!("Rendered template '{}' ({} bytes)", self.name, rendered.len());
        Ok(rendered)
    }

    pub fn render_input(&self, input: &RenderInput) -> Result<String> {
        self.render(&input.to_vars())
    }

    fn registry(&self) -> Result<Handlebars<'static>> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.register_template_string(TEMPLATE_NAME, &self.template)?;
        Ok(handlebars)
    }
}

fn rewrite_variables() -> Vec<TemplateVariable> {
    vec![
        TemplateVariable {
            name: "question".to_string(),
            description: "The question to rewrite.".to_string(),
        },
        TemplateVariable {
            name: "context".to_string(),
            description: "Background used to clarify the question.".to_string(),
        },
    ]
}

/// Scan text for `{{ ... }}` markers; `\{{` escapes are literal text
pub fn find_markers(text: &str) -> Vec<Marker> {
    MARKER_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let escaped = caps.name("esc3").or_else(|| caps.name("esc2"))?;
            if !escaped.as_str().is_empty() {
                return None;
            }
            let name = match caps.name("raw") {
                Some(raw) => format!("{{{}}}", raw.as_str().trim()),
                None => caps.name("inner")?.as_str().trim().to_string(),
            };
            Some(Marker {
                name,
                offset: whole.start(),
            })
        })
        .collect()
}

/// System + user messages for an OpenAI-compatible chat request
pub fn render_messages(system_prompt: &str, user_prompt: &str) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(2);
    if !system_prompt.trim().is_empty() {
        messages.push(ChatMessage {
            role: PromptRole::System,
            content: system_prompt.to_string(),
        });
    }
    messages.push(ChatMessage {
        role: PromptRole::User,
        content: user_prompt.to_string(),
    });
    messages
}
