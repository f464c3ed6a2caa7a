//! Model invocation.
//!
//! A [`VertexSession`] is opened explicitly for one project and region, used
//! for a single `generate` call, then closed. Results are typed: an empty
//! completion is distinct from a failed call.

pub mod credentials;
mod error;
pub mod vertex;

pub use error::InvokeError;
pub use vertex::VertexSession;

/// Text returned by a successful model call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// The model produced text.
    Text(String),
    /// The call succeeded but carried no text.
    Empty { finish_reason: Option<String> },
}

impl Completion {
    /// The generated text, or `""` for an empty completion.
    pub fn text(&self) -> &str {
        match self {
            Completion::Text(text) => text,
            Completion::Empty { .. } => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_text() {
        assert_eq!(Completion::Text("x = 1".to_string()).text(), "x = 1");
        let empty = Completion::Empty {
            finish_reason: Some("STOP".to_string()),
        };
        assert_eq!(empty.text(), "");
    }
}
