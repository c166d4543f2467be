//! The instruction wrapped around the user's one-line task.

const TEMPLATE_HEADER: &str = "You are a browser automation agent.";

const TEMPLATE_BODY: &str = r#"Your job is to understand the task without needing detailed explanation. Break it into steps and use the browser tools accordingly.

Always:
- Use `browser_navigate` to go to websites.
- Type in inputs using `browser_element_type` with the correct name or CSS.
- Click buttons using `browser_element_click`.
- Use `browser_extract` to get meaningful info (like href or text).
- If something fails, try a second time differently.

Do not ask the user for clarification. Behave like a real assistant that completes tasks based on best judgment.

Return the final answer in a clean format, with no tool logs and no screenshots."#;

/// A user instruction embedded in the fixed browser-automation template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPrompt {
    instruction: String,
    text: String,
}

impl TaskPrompt {
    /// A blank instruction is kept as an empty string and still produces a
    /// full prompt.
    pub fn new(user_input: &str) -> Self {
        let instruction = user_input.trim();
        let text = format!(
            "{TEMPLATE_HEADER}\n\nUser instruction: \"{instruction}\"\n\n{TEMPLATE_BODY}"
        );
        Self {
            instruction: instruction.to_string(),
            text,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.instruction.is_empty()
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}
