//! Access token resolution for Vertex AI.
//!
//! Tokens come from, in order: the config file, the
//! `GOOGLE_OAUTH_ACCESS_TOKEN` environment variable, then
//! `gcloud auth print-access-token`.

use super::InvokeError;
use std::process::Command;
use tracing::debug;

/// Environment variable checked for a ready-made OAuth access token.
pub const TOKEN_ENV: &str = "GOOGLE_OAUTH_ACCESS_TOKEN";

/// Resolve an access token for the Vertex AI API.
pub fn resolve_access_token(configured: Option<&str>) -> Result<String, InvokeError> {
    let preset = first_token([
        configured.map(str::to_string),
        std::env::var(TOKEN_ENV).ok(),
    ]);
    if let Some(token) = preset {
        debug!("Using preset access token");
        return Ok(token);
    }

    debug!("Asking gcloud for an access token");
    gcloud_access_token()
}

/// Pick the first non-blank candidate, trimmed.
fn first_token<I>(candidates: I) -> Option<String>
where
    I: IntoIterator<Item = Option<String>>,
{
    candidates
        .into_iter()
        .flatten()
        .map(|t| t.trim().to_string())
        .find(|t| !t.is_empty())
}

fn gcloud_access_token() -> Result<String, InvokeError> {
    let output = Command::new("gcloud")
        .args(["auth", "print-access-token"])
        .output()
        .map_err(|e| {
            InvokeError::Credentials(format!(
                "failed to run gcloud ({}). Install the Google Cloud CLI or set {}",
                e, TOKEN_ENV
            ))
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(InvokeError::Credentials(format!(
            "gcloud auth print-access-token failed: {}",
            stderr.trim()
        )));
    }

    first_token([Some(String::from_utf8_lossy(&output.stdout).into_owned())])
        .ok_or_else(|| InvokeError::Credentials("gcloud returned an empty access token".to_string()))
}
