//! The agent workflow: read the file, build the prompt, ask the model, print
//! the suggestion.

use crate::config::ModelConfig;
use crate::llm::{Completion, InvokeError, VertexSession};
use crate::prompt::build_prompt;
use crate::source::read_source;
use anyhow::Result;
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, warn};

/// One invocation, built from the command line.
#[derive(Debug, Clone)]
pub struct Request {
    /// File the user wants changed.
    pub file: PathBuf,
    /// Free-text change request.
    pub instruction: String,
    pub project_id: String,
    pub location: String,
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The model's suggestion was printed.
    Suggested,
    /// The call succeeded but the model returned no text.
    EmptySuggestion,
    /// Dry run: the prompt was printed and no call was made.
    PromptPrinted,
    /// The file was missing or unreadable; the model was not called.
    SourceUnavailable,
    /// The session could not be opened or the call failed.
    ModelFailed,
}

impl Outcome {
    /// Process exit status for this outcome.
    pub fn exit_status(&self) -> u8 {
        match self {
            Outcome::Suggested | Outcome::EmptySuggestion | Outcome::PromptPrinted => 0,
            Outcome::SourceUnavailable | Outcome::ModelFailed => 1,
        }
    }
}

/// Run the agent once, writing human-readable output to `out`.
///
/// Errors from the file read and the model call are reported on stderr and
/// folded into the returned [`Outcome`]; only failures to write `out` are
/// returned as `Err`.
pub async fn run<W: Write>(
    request: &Request,
    model: &ModelConfig,
    print_prompt: bool,
    out: &mut W,
) -> Result<Outcome> {
    writeln!(out, "▶️  Agent starting...")?;
    writeln!(out, "▶️  Reading file: {}", request.file.display())?;

    let file_content = match read_source(&request.file) {
        Ok(content) => content,
        Err(e) => {
            warn!(file = %request.file.display(), error = %e, "Source file unavailable");
            eprintln!("Error: {}", e);
            return Ok(Outcome::SourceUnavailable);
        }
    };
    info!(bytes = file_content.len(), "Read source file");

    writeln!(out, "▶️  User request: '{}'", request.instruction)?;

    let prompt = build_prompt(&file_content, &request.instruction);

    if print_prompt {
        writeln!(out, "\n{}", prompt)?;
        return Ok(Outcome::PromptPrinted);
    }

    writeln!(out, "\n[INFO] Sending request to Gemini. Please wait...")?;
    out.flush()?;

    let session = match VertexSession::open(&request.project_id, &request.location, model) {
        Ok(session) => session,
        Err(e) => {
            warn!(error = %e, "Could not open Vertex AI session");
            eprintln!("Error: {}", e);
            print_hint(&e);
            return Ok(Outcome::ModelFailed);
        }
    };

    info!(model = %session.model(), "Sending prompt");
    let result = session.generate(&prompt).await;
    session.close();

    let completion = match result {
        Ok(completion) => completion,
        Err(e) => {
            eprintln!("Failed to get a response from {}: {}", model.name, e);
            print_hint(&e);
            return Ok(Outcome::ModelFailed);
        }
    };

    writeln!(out, "\n✅ --- Gemini's Suggested Code ---")?;
    writeln!(out, "{}", completion.text())?;
    writeln!(out, "---------------------------------\n")?;
    writeln!(
        out,
        "Agent finished. You can now copy the code above and place it in your file."
    )?;

    match completion {
        Completion::Text(_) => Ok(Outcome::Suggested),
        Completion::Empty { finish_reason } => {
            let reason = finish_reason.as_deref().unwrap_or("none given");
            eprintln!("Note: the model returned no text (finish reason: {}).", reason);
            Ok(Outcome::EmptySuggestion)
        }
    }
}

fn print_hint(error: &InvokeError) {
    if let Some(hint) = error.hint() {
        eprintln!("{}", hint);
    }
}
