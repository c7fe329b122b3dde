mod rewrite;

pub use rewrite::{EXPECTED_OUTPUT_EXAMPLE, REWRITE_QUESTION_TEMPLATE, REWRITE_SYSTEM_PROMPT};
