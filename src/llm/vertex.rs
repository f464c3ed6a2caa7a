//! Vertex AI Gemini backend implementation.
//!
//! Talks to the `generateContent` REST endpoint of a publisher model.

use super::{credentials, Completion, InvokeError};
use crate::config::ModelConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

/// Finish reasons that mean the service withheld the answer.
const BLOCKED_FINISH_REASONS: &[&str] = &[
    "SAFETY",
    "RECITATION",
    "BLOCKLIST",
    "PROHIBITED_CONTENT",
    "SPII",
];

/// An open session against one project, region and model.
///
/// Construct with [`VertexSession::open`]; dispose with
/// [`VertexSession::close`] or by dropping it.
pub struct VertexSession {
    model: String,
    url: String,
    access_token: String,
    generation_config: Option<GenerationConfig>,
    client: Client,
}

impl VertexSession {
    /// Resolve credentials and build the HTTP client.
    pub fn open(
        project_id: &str,
        location: &str,
        config: &ModelConfig,
    ) -> Result<Self, InvokeError> {
        let access_token = credentials::resolve_access_token(config.access_token.as_deref())?;

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        let url = endpoint_url(config.endpoint.as_deref(), project_id, location, &config.name);
        let generation_config = GenerationConfig {
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        };

        info!(project = %project_id, location = %location, model = %config.name, "Opened Vertex AI session");

        Ok(Self {
            model: config.name.clone(),
            url,
            access_token,
            generation_config: (!generation_config.is_unset()).then_some(generation_config),
            client,
        })
    }

    /// Get the model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send the prompt and return the generated text.
    ///
    /// Failures are logged here and returned to the caller; nothing is
    /// retried.
    pub async fn generate(&self, prompt: &str) -> Result<Completion, InvokeError> {
        debug!(model = %self.model, prompt_len = prompt.len(), "generate: called");
        let result = self.send(prompt).await;
        match &result {
            Ok(completion) => debug!(
                text_len = completion.text().len(),
                "generate: completed"
            ),
            Err(e) => error!(model = %self.model, error = %e, "An error occurred while calling the API"),
        }
        result
    }

    async fn send(&self, prompt: &str) -> Result<Completion, InvokeError> {
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: self.generation_config.clone(),
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.access_token)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| {
                    if body.trim().is_empty() {
                        "Unknown error".to_string()
                    } else {
                        body.trim().to_string()
                    }
                });
            return Err(InvokeError::Api { status, message });
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| InvokeError::InvalidResponse(e.to_string()))?;

        completion_from_response(body)
    }

    /// Dispose of the session.
    pub fn close(self) {
        debug!(model = %self.model, "Closing Vertex AI session");
    }
}

/// Build the `generateContent` URL for a publisher model.
fn endpoint_url(base: Option<&str>, project_id: &str, location: &str, model: &str) -> String {
    let base = match base {
        Some(base) => base.trim_end_matches('/').to_string(),
        None if location == "global" => "https://aiplatform.googleapis.com".to_string(),
        None => format!("https://{}-aiplatform.googleapis.com", location),
    };
    format!(
        "{}/v1/projects/{}/locations/{}/publishers/google/models/{}:generateContent",
        base, project_id, location, model
    )
}

/// Turn a decoded response into a completion, distinguishing empty output
/// from a withheld one.
fn completion_from_response(body: GenerateContentResponse) -> Result<Completion, InvokeError> {
    let Some(candidate) = body.candidates.into_iter().next() else {
        if let Some(reason) = body.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(InvokeError::Blocked(reason));
        }
        return Ok(Completion::Empty {
            finish_reason: None,
        });
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if !text.is_empty() {
        return Ok(Completion::Text(text));
    }

    match candidate.finish_reason {
        Some(reason) if BLOCKED_FINISH_REASONS.contains(&reason.as_str()) => {
            Err(InvokeError::Blocked(reason))
        }
        finish_reason => Ok(Completion::Empty { finish_reason }),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

impl GenerationConfig {
    fn is_unset(&self) -> bool {
        self.temperature.is_none() && self.max_output_tokens.is_none()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}
