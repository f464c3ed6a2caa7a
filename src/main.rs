//! codeagent - ask Gemini for a change to a single code file.
//!
//! Reads a file, wraps it with fixed instructions and the user's request,
//! sends it to Vertex AI, and prints the suggested code block.

mod agent;
mod config;
mod llm;
mod prompt;
mod source;

use anyhow::Result;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "codeagent")]
#[command(author, version, about = "A simple AI coding agent powered by Gemini")]
#[command(long_about = "Sends a code file and a change request to Gemini on Vertex AI and prints \
the suggested code block.\n\nCredentials come from GOOGLE_OAUTH_ACCESS_TOKEN or `gcloud auth print-access-token`.")]
struct Cli {
    /// The path to the code file you want to modify
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Your instructions for the agent (e.g. 'add a docstring to the greet function')
    #[arg(value_name = "PROMPT")]
    prompt: String,

    /// Your Google Cloud project ID
    #[arg(long, value_name = "PROJECT")]
    project_id: String,

    /// The Google Cloud location for Vertex AI
    #[arg(long, value_name = "REGION", default_value = config::DEFAULT_LOCATION)]
    location: String,

    /// Override the configured model
    #[arg(short = 'm', long, value_name = "MODEL")]
    model: Option<String>,

    /// Read configuration from this file instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the assembled prompt and exit without calling the model
    #[arg(long)]
    print_prompt: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(outcome) => ExitCode::from(outcome.exit_status()),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<agent::Outcome> {
    let mut config = config::Config::load(cli.config.as_deref())?;
    if let Some(model) = cli.model {
        config.model.name = model;
    }

    let request = agent::Request {
        file: cli.file,
        instruction: cli.prompt,
        project_id: cli.project_id,
        location: cli.location,
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    agent::run(&request, &config.model, cli.print_prompt, &mut out).await
}

/// Initialize logging to stderr so stdout only carries the agent's output.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("codeagent={},reqwest=warn", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
