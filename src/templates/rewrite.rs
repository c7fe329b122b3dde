/// Default system prompt sent alongside the rewrite template
pub const REWRITE_SYSTEM_PROMPT: &str =
    "You are an expert at rewriting questions into clear, self-contained instructions.";

macro_rules! expected_output_example {
    () => {
        r#"{"rewritten_question": "Explain how to configure connection pooling for PostgreSQL in a Django 4.2 application, including recommended settings for CONN_MAX_AGE and when to use pgbouncer instead."}"#
    };
}

/// Output example documented inside the template; the reply must match this shape
pub const EXPECTED_OUTPUT_EXAMPLE: &str = expected_output_example!();

/// Question-rewrite template. Placeholders: `{{ question }}`, `{{ context }}`
pub const REWRITE_QUESTION_TEMPLATE: &str = concat!(
    r#"Your task is to rewrite the user's question so that it can be answered without
any further clarification. Use the context to resolve pronouns, abbreviations and
vague references, to add the missing details the question implies, and to turn the
question into a clear set of instructions for the person or system answering it.

Rules:
- Keep the original intent of the question. Do not answer it.
- Only use facts that appear in the question or in the context. Do not invent
  versions, names or numbers.
- If the context is empty or unrelated, return the question with only its wording
  clarified.
- Write the rewritten question in the same language as the original question.

Example 1
Question: how do I make it reuse connections?
Context: The user is building a Django 4.2 web application backed by PostgreSQL and
is seeing too many open database connections under load.
Output:
"#,
    expected_output_example!(),
    r#"

Example 2
Question: what changed in the new one?
Context: The conversation is about the Rust programming language. The user recently
upgraded from the 2021 edition to the 2024 edition.
Output:
{"rewritten_question": "List the main language and tooling changes introduced in the Rust 2024 edition compared to the 2021 edition, and describe what code typically needs to change when migrating."}

Example 3
Question: Is it safe?
Context:
Output:
{"rewritten_question": "Is it safe? Describe the safety considerations that apply and what additional information would be needed to give a definite answer."}

Now rewrite the following question.

Question: {{ question }}

Context:
{{ context }}

Return only a JSON object with a single key "rewritten_question" whose value is the
rewritten question as a string. Do not wrap the JSON in a code block and do not add
any other keys or text, for example:
"#,
    expected_output_example!(),
    r#"
"#,
);
