//! Gemini implementation of the [`ProjectGenerator`] port.
//!
//! One non-streaming `generateContent` call per invocation, constrained by
//! a response schema so the service answers with the four project fields as
//! a single JSON object. Low temperature favors well-formed output over
//! variation.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::project::GeneratedProject;
use crate::prompt;

use super::{GenerationError, ProjectGenerator};

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-pro";

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Sampling temperature for every request.
const TEMPERATURE: f64 = 0.2;

/// Construction options for [`GeminiClient`].
///
/// The API key is injected here rather than read from ambient process
/// state, so a missing key surfaces as a normal [`GenerationError`] instead
/// of a startup crash.
#[derive(Debug, Clone)]
pub struct GeminiOptions {
    pub api_key: Option<String>,
    pub model: String,
    pub timeout: Duration,
}

impl Default for GeminiOptions {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(120),
        }
    }
}

/// Client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    api_key: Option<String>,
    model: String,
    http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(options: GeminiOptions) -> Result<Self, GenerationError> {
        let http = reqwest::Client::builder()
            .timeout(options.timeout)
            .build()?;
        Ok(Self {
            api_key: options.api_key,
            model: options.model,
            http,
        })
    }
}

#[async_trait]
impl ProjectGenerator for GeminiClient {
    async fn generate(&self, brief: &str) -> Result<GeneratedProject, GenerationError> {
        // Fail fast, before any network attempt.
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(GenerationError::MissingApiKey)?;

        let body = json!({
            "contents": [{
                "parts": [{ "text": prompt::compose_request(brief) }]
            }],
            "generationConfig": {
                "temperature": TEMPERATURE,
                "responseMimeType": "application/json",
                "responseSchema": response_schema(),
            }
        });

        let url = format!("{API_BASE}/{}:generateContent", self.model);
        debug!(model = %self.model, "sending generation request");

        let resp = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(GenerationError::Api { status, body: text });
        }

        let envelope: GenerateContentResponse =
            serde_json::from_str(&text).map_err(GenerationError::MalformedResponse)?;

        let payload = envelope
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().map(|p| p.text).collect::<String>())
            .filter(|t| !t.trim().is_empty())
            .ok_or(GenerationError::EmptyResponse)?;

        debug!(bytes = payload.len(), "received candidate payload");
        parse_payload(&payload)
    }
}

/// The response schema sent with every request: an object with the four
/// required string fields. The descriptions guide generation quality on the
/// service side; local code never interprets them.
fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "projectReport": {
                "type": "STRING",
                "description": "A comprehensive project report including an overview, \
                                assumptions, and explanations of PDDL encodings. \
                                Format as Markdown."
            },
            "domainPddl": {
                "type": "STRING",
                "description": "The complete, valid PDDL code for the domain file \
                                (domain.pddl)."
            },
            "problemPddl": {
                "type": "STRING",
                "description": "The complete, valid PDDL code for the problem file \
                                (problem.pddl)."
            },
            "plannerOutput": {
                "type": "STRING",
                "description": "Sample planner output and an explanation of how to run \
                                the planner and interpret its output. Include the \
                                Fast Downward command."
            }
        },
        "required": ["projectReport", "domainPddl", "problemPddl", "plannerOutput"]
    })
}

/// Parse the candidate text into a project.
///
/// Only the outer envelope is trimmed; field values pass through verbatim.
/// Serde rejects any payload missing one of the four fields or carrying a
/// non-string value, so no partial project can come out of here.
fn parse_payload(text: &str) -> Result<GeneratedProject, GenerationError> {
    serde_json::from_str(text.trim()).map_err(GenerationError::InvalidPayload)
}

// Minimal structs for the service response envelope. Fields we never read
// are simply not declared.
#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_payload_accepts_a_complete_project_verbatim() {
        let payload = r##"
            {
                "projectReport": "# Overview\nlines",
                "domainPddl": "(define (domain campus))",
                "problemPddl": "(define (problem delivery))",
                "plannerOutput": "$ ./fast-downward.py ...\nplan cost: 9"
            }
        "##;

        let project = parse_payload(payload).unwrap();
        assert_eq!(project.project_report, "# Overview\nlines");
        assert_eq!(project.domain_pddl, "(define (domain campus))");
        assert_eq!(project.problem_pddl, "(define (problem delivery))");
        assert_eq!(project.planner_output, "$ ./fast-downward.py ...\nplan cost: 9");
    }

    #[test]
    fn parse_payload_rejects_a_missing_field() {
        let payload = r#"{
            "projectReport": "r",
            "domainPddl": "d",
            "problemPddl": "p"
        }"#;

        let err = parse_payload(payload).unwrap_err();
        assert!(matches!(err, GenerationError::InvalidPayload(_)));
    }

    #[test]
    fn parse_payload_rejects_a_non_string_field() {
        let payload = r#"{
            "projectReport": "r",
            "domainPddl": 42,
            "problemPddl": "p",
            "plannerOutput": "o"
        }"#;

        let err = parse_payload(payload).unwrap_err();
        assert!(matches!(err, GenerationError::InvalidPayload(_)));
    }

    #[test]
    fn parse_payload_rejects_non_json_text() {
        let err = parse_payload("here is your project:").unwrap_err();
        assert!(matches!(err, GenerationError::InvalidPayload(_)));
    }

    #[test]
    fn parse_payload_trims_only_the_envelope() {
        let payload = "\n  {\"projectReport\":\"  padded  \",\"domainPddl\":\"d\",\
                       \"problemPddl\":\"p\",\"plannerOutput\":\"o\"}  \n";
        let project = parse_payload(payload).unwrap();
        // Inner whitespace is content and survives untouched.
        assert_eq!(project.project_report, "  padded  ");
    }

    #[test]
    fn response_schema_requires_all_four_fields() {
        let schema = response_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(
            required,
            ["projectReport", "domainPddl", "problemPddl", "plannerOutput"]
        );
        for field in required {
            assert_eq!(schema["properties"][field]["type"], "STRING");
        }
    }

    #[tokio::test]
    async fn generate_without_a_key_fails_before_any_network_attempt() {
        let client = GeminiClient::new(GeminiOptions::default()).unwrap();
        let err = client.generate("brief").await.unwrap_err();
        assert!(matches!(err, GenerationError::MissingApiKey));
    }
}
