use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};

use crate::{AdvisorError, Assistant, prompt::full_prompt};

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ReplyPart>,
}

#[derive(Debug, Deserialize)]
struct ReplyPart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

impl GenerateResponse {
    /// Text of the first part of the first candidate.
    fn into_text(self) -> Result<String, AdvisorError> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(AdvisorError::EmptyReply)
    }
}

fn api_error(status: StatusCode, body: &str) -> AdvisorError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|err| err.error.message)
        .unwrap_or_else(|_| "generative API error".to_string());
    AdvisorError::Api { status, message }
}

/// Client for the `generateContent` endpoint of the Gemini API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    endpoint: Url,
    api_key: String,
    model: String,
    http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(endpoint: &str, api_key: &str, model: &str) -> Result<Self, AdvisorError> {
        if api_key.trim().is_empty() {
            return Err(AdvisorError::NotConfigured);
        }
        let endpoint = Url::parse(endpoint).map_err(|err| AdvisorError::Api {
            status: StatusCode::BAD_REQUEST,
            message: format!("invalid endpoint: {err}"),
        })?;
        Ok(Self {
            endpoint,
            api_key: api_key.to_string(),
            model: model.to_string(),
            http: reqwest::Client::new(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> Result<Url, AdvisorError> {
        self.endpoint
            .join(&format!("v1beta/models/{}:generateContent", self.model))
            .map_err(|err| AdvisorError::Api {
                status: StatusCode::BAD_REQUEST,
                message: format!("invalid model path: {err}"),
            })
    }
}

#[async_trait]
impl Assistant for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, AdvisorError> {
        let text = full_prompt(prompt);
        let body = GenerateRequest {
            contents: [Content {
                parts: [Part { text: &text }],
            }],
        };

        let res = self
            .http
            .post(self.url()?)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;
        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(api_error(status, &body));
        }
        res.json::<GenerateResponse>().await?.into_text()
    }
}
