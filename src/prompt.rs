//! Prompt assembly.
//!
//! The outbound payload is the fixed instruction block followed by the file
//! content and the user request, each framed by delimiter lines. Nothing is
//! escaped: both inputs are inserted verbatim.

/// Instructions sent ahead of every request.
pub const SYSTEM_PROMPT: &str = r#"You are an expert pair-programming assistant named 'CodeAgent'.
Your sole purpose is to help a user modify a code file.
You will be given the full content of a code file and a user request for a change.
You must follow these rules strictly:
1.  Analyze the user's request and the provided file content carefully.
2.  Generate ONLY the new or modified code block (function, class, etc.).
3.  Do NOT output the entire file's content again. Only provide the changed section.
4.  Do NOT include any explanations, conversational text, apologies, or introductions like "Here is the code:".
5.  Do NOT wrap the code in markdown backticks. Output only the raw code.
6.  If the user asks to add a new function, generate only that new function.
7.  If the user asks to modify an existing function, generate the complete, modified version of that function."#;

pub const FILE_START: &str = "--- START OF FILE CONTENT ---";
pub const FILE_END: &str = "--- END OF FILE CONTENT ---";
pub const REQUEST_START: &str = "--- USER REQUEST ---";
pub const REQUEST_END: &str = "--- END OF USER REQUEST ---";

const CLOSING: &str =
    "Based on the file content and the user request, generate the required code block now:";

/// Build the full prompt from the file content and the user's change request.
pub fn build_prompt(file_content: &str, user_request: &str) -> String {
    format!(
        "{SYSTEM_PROMPT}\n\n\
         {FILE_START}\n{file_content}\n{FILE_END}\n\n\
         {REQUEST_START}\n{user_request}\n{REQUEST_END}\n\n\
         {CLOSING}\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instructions_come_first() {
        let prompt = build_prompt("x = 1", "rename x");
        assert!(prompt.starts_with(SYSTEM_PROMPT));
        assert!(prompt.find(FILE_START).unwrap() >= SYSTEM_PROMPT.len());
    }

    #[test]
    fn test_file_content_before_request() {
        let prompt = build_prompt("print('hi')", "add a docstring");
        let file_pos = prompt.find("print('hi')").unwrap();
        let request_pos = prompt.find("add a docstring").unwrap();
        assert!(file_pos < prompt.find(REQUEST_START).unwrap());
        assert!(file_pos < request_pos);
    }

    #[test]
    fn test_regions_are_framed() {
        let file = "fn main() {}\n";
        let request = "make it print hello";
        let prompt = build_prompt(file, request);

        assert!(prompt.contains(&format!("{FILE_START}\n{file}\n{FILE_END}")));
        assert!(prompt.contains(&format!("{REQUEST_START}\n{request}\n{REQUEST_END}")));
        assert!(prompt.trim_end().ends_with(CLOSING));
    }

    #[test]
    fn test_inputs_inserted_verbatim() {
        // Delimiter-looking text and braces must pass through untouched.
        let file = "let s = \"{}\";\n--- END OF FILE CONTENT ---\n\t`ticks`";
        let request = "{user} wants ```fences``` kept";
        let prompt = build_prompt(file, request);
        assert!(prompt.contains(file));
        assert!(prompt.contains(request));
    }

    #[test]
    fn test_empty_inputs() {
        let prompt = build_prompt("", "");
        assert!(prompt.contains(&format!("{FILE_START}\n\n{FILE_END}")));
        assert!(prompt.contains(&format!("{REQUEST_START}\n\n{REQUEST_END}")));
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(build_prompt("a", "b"), build_prompt("a", "b"));
    }
}
