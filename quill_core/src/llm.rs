use crate::category::Category;
use crate::config::{CredentialSource, ProviderConfig};
use crate::error::GenerationError;
use crate::redaction::redact_sensitive_text;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Produces text for a category. The orchestrator only sees this trait.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate_content(&self, category: Category) -> Result<String, GenerationError>;
}

/// One prompt in, one text out. Errors carry raw transport/service detail
/// and are never shown to the user.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, api_key: &str, model: &str, prompt: &str) -> Result<String>;
}

#[derive(Clone)]
pub struct GenerationClient {
    backend: Arc<dyn CompletionBackend>,
    credential: CredentialSource,
    model: String,
}

impl GenerationClient {
    pub fn new(provider: &ProviderConfig) -> Self {
        let provider = provider.clone().normalized();
        Self::with_backend(
            Arc::new(HttpBackend::new(provider.base_url.clone())),
            provider.credential_source(),
            provider.model,
        )
    }

    pub fn with_backend(
        backend: Arc<dyn CompletionBackend>,
        credential: CredentialSource,
        model: String,
    ) -> Self {
        Self {
            backend,
            credential,
            model: model.trim().to_string(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ContentGenerator for GenerationClient {
    async fn generate_content(&self, category: Category) -> Result<String, GenerationError> {
        let api_key = self
            .credential
            .resolve()
            .ok_or_else(|| GenerationError::MissingCredential {
                var: self.credential.name().to_string(),
            })?;

        let prompt = category.prompt();
        tracing::debug!(%category, model = %self.model, "Requesting content");

        match self.backend.complete(&api_key, &self.model, prompt).await {
            Ok(text) => Ok(text.trim().to_string()),
            Err(e) => {
                tracing::error!(
                    %category,
                    model = %self.model,
                    error = %redact_sensitive_text(&format!("{:#}", e)),
                    "Error generating content"
                );
                Err(GenerationError::GenerationFailed)
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChatMessage>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

/// OpenAI-compatible chat completions over HTTP. Gemini serves this
/// protocol under its `/v1beta/openai` prefix.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http_client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: String) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl CompletionBackend for HttpBackend {
    async fn complete(&self, api_key: &str, model: &str, prompt: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let request_body = ChatRequest {
            model: model.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: Some(prompt.to_string()),
            }],
        };

        let response = self
            .http_client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let lower = text.to_lowercase();
            let hint = if status.as_u16() == 429
                || lower.contains("rate limit")
                || lower.contains("quota")
            {
                " (quota/rate-limit)"
            } else if lower.contains("content_filter")
                || lower.contains("safety")
                || lower.contains("blocked")
            {
                " (content policy block)"
            } else {
                ""
            };
            return Err(anyhow!(
                "LLM API Error (Status {}): {}{}",
                status,
                truncate_error(&text),
                hint
            ));
        }

        parse_chat_response(&text)
    }
}

fn parse_chat_response(text: &str) -> Result<String> {
    let chat_response: ChatResponse = serde_json::from_str(text).map_err(|e| {
        anyhow!(
            "Failed to parse LLM response: {} | Raw response: {}",
            e,
            truncate_error(text)
        )
    })?;

    let first_choice = chat_response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("No choices returned from LLM"))?;

    match first_choice.message.and_then(|m| m.content) {
        Some(content) if !content.trim().is_empty() => Ok(content),
        _ => match first_choice.finish_reason {
            Some(reason) => Err(anyhow!("LLM stopped execution. Reason: {}", reason)),
            None => Err(anyhow!("LLM returned empty content")),
        },
    }
}

fn truncate_error(text: &str) -> String {
    const MAX: usize = 320;
    if text.len() > MAX {
        let mut end = MAX;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &text[..end])
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct ScriptedBackend {
        reply: Result<String, String>,
        calls: AtomicUsize,
        seen: Mutex<Vec<(String, String, String)>>,
    }

    impl ScriptedBackend {
        fn ok(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(text.to_string()),
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(message.to_string()),
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl CompletionBackend for ScriptedBackend {
        async fn complete(&self, api_key: &str, model: &str, prompt: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push((
                api_key.to_string(),
                model.to_string(),
                prompt.to_string(),
            ));
            self.reply.clone().map_err(|e| anyhow!(e))
        }
    }

    fn client(backend: Arc<ScriptedBackend>, key: Option<&str>) -> GenerationClient {
        GenerationClient::with_backend(
            backend,
            CredentialSource::Fixed(key.map(str::to_string)),
            "gemini-2.5-flash".to_string(),
        )
    }

    #[tokio::test]
    async fn missing_credential_fails_before_any_request() {
        let backend = ScriptedBackend::ok("unused");
        let client = client(backend.clone(), None);

        for category in Category::ALL {
            let err = client.generate_content(category).await.unwrap_err();
            assert_eq!(
                err,
                GenerationError::MissingCredential {
                    var: "API_KEY".to_string()
                }
            );
        }
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn success_trims_surrounding_whitespace() {
        let backend = ScriptedBackend::ok(
            " Why did the chicken cross the road? To get to the other side. ",
        );
        let client = client(backend.clone(), Some("key-123"));

        let text = client.generate_content(Category::Joke).await.unwrap();
        assert_eq!(
            text,
            "Why did the chicken cross the road? To get to the other side."
        );

        let seen = backend.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, "key-123");
        assert_eq!(seen[0].1, "gemini-2.5-flash");
        assert_eq!(seen[0].2, Category::Joke.prompt());
    }

    #[tokio::test]
    async fn transport_failure_is_replaced_by_generic_error() {
        let backend =
            ScriptedBackend::failing("error sending request: connection refused (os error 111)");
        let client = client(backend.clone(), Some("key-123"));

        let err = client.generate_content(Category::Story).await.unwrap_err();
        assert_eq!(err, GenerationError::GenerationFailed);
        assert!(!err.to_string().contains("connection refused"));
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn parse_extracts_first_choice_text() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"  Hello  "},"finish_reason":"stop"}]}"#;
        assert_eq!(parse_chat_response(body).unwrap(), "  Hello  ");
    }

    #[test]
    fn parse_rejects_empty_or_missing_content() {
        let no_choices = r#"{"choices":[]}"#;
        assert!(parse_chat_response(no_choices)
            .unwrap_err()
            .to_string()
            .contains("No choices"));

        let filtered = r#"{"choices":[{"message":null,"finish_reason":"content_filter"}]}"#;
        assert!(parse_chat_response(filtered)
            .unwrap_err()
            .to_string()
            .contains("content_filter"));

        let blank = r#"{"choices":[{"message":{"role":"assistant","content":"   "}}]}"#;
        assert!(parse_chat_response(blank).is_err());
    }

    #[test]
    fn parse_reports_malformed_json() {
        let err = parse_chat_response("<html>bad gateway</html>").unwrap_err();
        assert!(err.to_string().contains("Failed to parse LLM response"));
    }

    #[test]
    fn truncate_error_respects_char_boundaries() {
        let long = "é".repeat(400);
        let out = truncate_error(&long);
        assert!(out.ends_with("..."));
        assert!(out.len() <= 323);
    }

    #[test]
    fn http_backend_strips_trailing_slash() {
        let backend = HttpBackend::new("https://example.test/v1/ ".to_string());
        assert_eq!(backend.base_url(), "https://example.test/v1");
    }

    #[test]
    fn client_from_provider_uses_configured_model() {
        let provider = ProviderConfig {
            model: " custom-model ".to_string(),
            ..ProviderConfig::default()
        };
        assert_eq!(GenerationClient::new(&provider).model(), "custom-model");
    }
}
