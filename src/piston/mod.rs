//! Reqwest-based client for a Piston-compatible execution service.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::Config;

#[derive(Debug, Serialize)]
struct ExecuteRequest<'a> {
    language: &'a str,
    version: &'a str,
    files: Vec<FilePayload<'a>>,
}

#[derive(Debug, Serialize)]
struct FilePayload<'a> {
    content: &'a str,
}

/// Outcome of one run as reported by the provider. Fields beyond `stdout`
/// are tolerated but not required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunResult {
    #[serde(default)]
    pub stdout: String,
    #[serde(default)]
    pub stderr: String,
    #[serde(default)]
    pub code: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct ExecuteResponse {
    run: RunResult,
}

#[derive(Debug, Clone)]
pub struct PistonClient {
    http: reqwest::Client,
    base_url: String,
}

impl PistonClient {
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let timeout = cfg
            .get("REQUEST_TIMEOUT")
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(60);
        let base_url = cfg
            .get("PISTON_API_URL")
            .unwrap_or_else(|| "https://emkc.org/api/v2/piston".to_string());

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Submit one snippet for execution. Exactly one POST, no retries.
    pub async fn execute(&self, language: &str, version: &str, source: &str) -> Result<RunResult> {
        let url = format!("{}/execute", self.base_url);
        let body = ExecuteRequest {
            language,
            version,
            files: vec![FilePayload { content: source }],
        };

        let resp = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .context("failed to reach execution service")?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(extract_error_message(status, &text)));
        }

        let parsed: ExecuteResponse = resp
            .json()
            .await
            .context("malformed response from execution service")?;
        Ok(parsed.run)
    }
}

/// Pull a human-readable message out of an error body, falling back to the
/// HTTP status line.
fn extract_error_message(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("execution service returned {}", status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_wire_shape() {
        let body = ExecuteRequest {
            language: "python",
            version: "3.10.0",
            files: vec![FilePayload {
                content: "print(42)",
            }],
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "language": "python",
                "version": "3.10.0",
                "files": [{ "content": "print(42)" }]
            })
        );
    }

    #[test]
    fn parses_run_result() {
        let raw = r#"{"language":"python","version":"3.10.0","run":{"stdout":"42\n","stderr":"","code":0,"output":"42\n"}}"#;
        let resp: ExecuteResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.run.stdout, "42\n");
        assert_eq!(resp.run.code, Some(0));
    }

    #[test]
    fn missing_run_fields_default() {
        let resp: ExecuteResponse = serde_json::from_str(r#"{"run":{}}"#).unwrap();
        assert_eq!(resp.run.stdout, "");
        assert_eq!(resp.run.stderr, "");
        assert_eq!(resp.run.code, None);
    }

    #[test]
    fn error_message_from_body() {
        let status = reqwest::StatusCode::BAD_REQUEST;
        assert_eq!(
            extract_error_message(status, r#"{"message":"language_version is required"}"#),
            "language_version is required"
        );
    }

    #[test]
    fn error_message_falls_back_to_status() {
        let status = reqwest::StatusCode::INTERNAL_SERVER_ERROR;
        assert_eq!(
            extract_error_message(status, "not json"),
            "execution service returned 500 Internal Server Error"
        );
        assert_eq!(
            extract_error_message(status, r#"{"message":""}"#),
            "execution service returned 500 Internal Server Error"
        );
    }

    #[test]
    fn base_url_trailing_slash_trimmed() {
        let client = PistonClient::with_base_url("https://emkc.org/api/v2/piston/").unwrap();
        assert_eq!(client.base_url, "https://emkc.org/api/v2/piston");
    }
}
