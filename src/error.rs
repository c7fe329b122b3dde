use thiserror::Error;

#[derive(Error, Debug)]
pub enum RewriteError {
    #[error("Template is empty")]
    EmptyTemplate,

    #[error("Template check failed: {}", .0.join("; "))]
    TemplateCheck(Vec<String>),

    #[error("Missing value for template variable: {0}")]
    MissingVariable(String),

    #[error("Question is empty")]
    EmptyQuestion,

    #[error("Context is empty and empty context is not allowed")]
    EmptyContext,

    #[error("Template error: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),

    #[error("Render error: {0}")]
    Render(#[from] Box<handlebars::RenderError>),

    #[error("Response is empty")]
    EmptyResponse,

    #[error("Response is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Response is not a JSON object")]
    NotAnObject,

    #[error("Response has no \"rewritten_question\" key")]
    MissingField,

    #[error("Response has unexpected keys: {}", .0.join(", "))]
    UnexpectedFields(Vec<String>),

    #[error("\"rewritten_question\" is not a string")]
    FieldNotString,

    #[error("\"rewritten_question\" is blank")]
    BlankRewrite,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<handlebars::TemplateError> for RewriteError {
    fn from(e: handlebars::TemplateError) -> Self {
        Self::Template(Box::new(e))
    }
}

impl From<handlebars::RenderError> for RewriteError {
    fn from(e: handlebars::RenderError) -> Self {
        Self::Render(Box::new(e))
    }
}

pub type Result<T> = std::result::Result<T, RewriteError>;
