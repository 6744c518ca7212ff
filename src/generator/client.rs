use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::GenerationConfig;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Thin client for the hosted text-generation endpoint. The endpoint accepts
/// a message list plus inference parameters and returns the model's text.
pub struct GenerationClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    model_id: String,
}

#[derive(Debug, Serialize)]
struct InvokeRequest {
    messages: Vec<Message>,
    #[serde(rename = "inferenceConfig")]
    inference_config: InferenceConfig,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: Vec<ContentBlock>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ContentBlock {
    text: String,
}

#[derive(Debug, Serialize)]
struct InferenceConfig {
    #[serde(rename = "maxTokens")]
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct InvokeResponse {
    output: InvokeOutput,
}

#[derive(Debug, Deserialize)]
struct InvokeOutput {
    message: OutputMessage,
}

#[derive(Debug, Deserialize)]
struct OutputMessage {
    content: Vec<ContentBlock>,
}

impl GenerationClient {
    pub fn new(config: &GenerationConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model_id: config.model_id.clone(),
        }
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    pub async fn complete(&self, prompt: &str, max_tokens: u32, temperature: f32) -> Result<String> {
        let url = format!("{}/model/{}/invoke", self.api_url, self.model_id);

        let request = InvokeRequest {
            messages: vec![Message {
                role: "user".to_string(),
                content: vec![ContentBlock {
                    text: prompt.to_string(),
                }],
            }],
            inference_config: InferenceConfig {
                max_tokens,
                temperature,
            },
        };

        debug!(model = %self.model_id, max_tokens, "generation request");

        let response = self
            .http
            .post(&url)
            .headers(self.headers()?)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(format!("Generation API error ({}): {}", status, error_text).into());
        }

        let body: InvokeResponse = response.json().await?;
        body.output
            .message
            .content
            .first()
            .map(|block| block.text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| "Empty completion from generation API".into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_with_camel_case_inference_keys() {
        let request = InvokeRequest {
            messages: vec![Message {
                role: "user".to_string(),
                content: vec![ContentBlock {
                    text: "hello".to_string(),
                }],
            }],
            inference_config: InferenceConfig {
                max_tokens: 400,
                temperature: 0.7,
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["inferenceConfig"]["maxTokens"], 400);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"][0]["text"], "hello");
    }

    #[test]
    fn response_text_is_taken_from_first_content_block() {
        let raw = r#"{"output":{"message":{"content":[{"text":"  Subject: hi  "}]}}}"#;
        let parsed: InvokeResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(
            parsed.output.message.content.first().unwrap().text.trim(),
            "Subject: hi"
        );
    }
}
