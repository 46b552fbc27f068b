use crate::config::{ModelConfig, API_KEY_VAR};
use crate::domain::ports::{ChatModel, ModelPrompt};
use crate::utils::error::{Result, SageError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Chat-completions client for any OpenAI-compatible endpoint. Each flow
/// passes its own JSON schema; the endpoint is asked to conform via
/// `response_format` and the reply is parsed back into a JSON value.
pub struct ChatApi {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
    temperature: f32,
    max_tokens: u32,
}

impl ChatApi {
    pub fn new(config: &ModelConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| SageError::MissingConfigError {
                field: API_KEY_VAR.to_string(),
            })?;

        Ok(Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    fn build_request(&self, prompt: &ModelPrompt) -> ChatCompletionRequest {
        // 有圖片時改用 multipart content，讓視覺模型讀取 data URI
        let user_content = match &prompt.image_data_uri {
            Some(data_uri) => MessageContent::Parts(vec![
                ContentPart::Text {
                    text: prompt.user.clone(),
                },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: data_uri.clone(),
                    },
                },
            ]),
            None => MessageContent::Text(prompt.user.clone()),
        };

        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: MessageContent::Text(prompt.system.clone()),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user_content,
                },
            ],
            response_format: ResponseFormat {
                format_type: "json_schema".to_string(),
                json_schema: JsonSchemaFormat {
                    name: prompt.schema_name.to_string(),
                    strict: true,
                    schema: prompt.schema.clone(),
                },
            },
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

#[async_trait]
impl ChatModel for ChatApi {
    async fn complete(&self, prompt: ModelPrompt) -> Result<Value> {
        let request = self.build_request(&prompt);
        let url = format!("{}/chat/completions", self.base_url);

        tracing::debug!("Model request '{}' to {}", prompt.schema_name, url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            return Err(SageError::HttpStatusError { status, body });
        }

        let completion: ChatCompletionResponse = response.json().await?;
        let choice =
            completion
                .choices
                .into_iter()
                .next()
                .ok_or_else(|| SageError::ModelOutputError {
                    message: "No response choices received".to_string(),
                })?;

        let content = strip_code_fences(choice.message.content.trim());
        if content.is_empty() {
            return Err(SageError::ModelOutputError {
                message: "Response content is empty".to_string(),
            });
        }

        Ok(serde_json::from_str(content)?)
    }
}

/// Some models wrap their JSON in markdown fences despite the response
/// format instruction.
fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    if let Some(inner) = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
    {
        if let Some(inner) = inner.strip_suffix("```") {
            return inner.trim();
        }
    }
    trimmed
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: MessageContent,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
    json_schema: JsonSchemaFormat,
}

#[derive(Debug, Serialize)]
struct JsonSchemaFormat {
    name: String,
    strict: bool,
    schema: Value,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatCompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChoice {
    message: ChatCompletionMessage,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn test_config(base_url: String) -> ModelConfig {
        ModelConfig {
            base_url,
            api_key: Some("test-key".to_string()),
            ..ModelConfig::default()
        }
    }

    fn test_prompt() -> ModelPrompt {
        ModelPrompt {
            system: "You are a test assistant.".to_string(),
            user: "Say hello.".to_string(),
            image_data_uri: None,
            schema_name: "test_schema",
            schema: json!({"type": "object"}),
        }
    }

    #[test]
    fn test_missing_api_key_rejected() {
        let config = ModelConfig::default();
        assert!(matches!(
            ChatApi::new(&config),
            Err(SageError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("{\"a\": 1}"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("```\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("  {\"a\": 1}  "), "{\"a\": 1}");
    }

    #[tokio::test]
    async fn test_complete_parses_json_content() {
        let server = MockServer::start();
        let model_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .header("authorization", "Bearer test-key")
                .json_body_partial(r#"{"response_format": {"type": "json_schema"}}"#);
            then.status(200).json_body(json!({
                "choices": [
                    {"message": {"role": "assistant", "content": "{\"greeting\": \"hello\"}"}}
                ]
            }));
        });

        let api = ChatApi::new(&test_config(server.base_url())).unwrap();
        let value = api.complete(test_prompt()).await.unwrap();

        model_mock.assert();
        assert_eq!(value["greeting"], "hello");
    }

    #[tokio::test]
    async fn test_complete_strips_markdown_fences() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(json!({
                "choices": [
                    {"message": {"role": "assistant", "content": "```json\n{\"greeting\": \"hi\"}\n```"}}
                ]
            }));
        });

        let api = ChatApi::new(&test_config(server.base_url())).unwrap();
        let value = api.complete(test_prompt()).await.unwrap();

        assert_eq!(value["greeting"], "hi");
    }

    #[tokio::test]
    async fn test_complete_attaches_image_part() {
        let server = MockServer::start();
        let model_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .body_contains("image_url")
                .body_contains("data:image/png;base64,iVBORw0KGgo=");
            then.status(200).json_body(json!({
                "choices": [
                    {"message": {"role": "assistant", "content": "{}"}}
                ]
            }));
        });

        let api = ChatApi::new(&test_config(server.base_url())).unwrap();
        let mut prompt = test_prompt();
        prompt.image_data_uri = Some("data:image/png;base64,iVBORw0KGgo=".to_string());
        api.complete(prompt).await.unwrap();

        model_mock.assert();
    }

    #[tokio::test]
    async fn test_complete_non_success_status_is_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(429).body("rate limited");
        });

        let api = ChatApi::new(&test_config(server.base_url())).unwrap();
        let result = api.complete(test_prompt()).await;

        assert!(matches!(
            result,
            Err(SageError::HttpStatusError { status, .. }) if status.as_u16() == 429
        ));
    }

    #[tokio::test]
    async fn test_complete_empty_choices_is_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(json!({"choices": []}));
        });

        let api = ChatApi::new(&test_config(server.base_url())).unwrap();
        let result = api.complete(test_prompt()).await;

        assert!(matches!(result, Err(SageError::ModelOutputError { .. })));
    }

    #[tokio::test]
    async fn test_complete_unparseable_content_is_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(json!({
                "choices": [
                    {"message": {"role": "assistant", "content": "not json at all"}}
                ]
            }));
        });

        let api = ChatApi::new(&test_config(server.base_url())).unwrap();
        let result = api.complete(test_prompt()).await;

        assert!(matches!(result, Err(SageError::SerializationError(_))));
    }
}
