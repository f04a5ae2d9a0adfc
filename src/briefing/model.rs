use serde::{Deserialize, Serialize};

use super::config::LlmConfig;

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    content: String,
}

/// Client for an OpenAI-compatible chat-completions endpoint. One request
/// per briefing, no retries; the response text is consumed verbatim.
pub struct ModelClient {
    config: LlmConfig,
    base_url: String,
}

impl ModelClient {
    #[must_use]
    pub fn new(config: &LlmConfig) -> ModelClient {
        Self {
            config: config.clone(),
            base_url: config.base_url.clone(),
        }
    }

    #[allow(dead_code)]
    pub fn with_base_url(&mut self, base_url: String) -> &mut Self {
        self.base_url = base_url;
        self
    }

    pub async fn complete(&self, prompt: &str) -> Result<String, Box<dyn std::error::Error>> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: String::from("user"),
                content: prompt.to_string(),
            }],
        };

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(self.config.timeout_secs))
            .build()?;
        let response = client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<ChatResponse>()
            .await?;

        match response.choices.into_iter().next() {
            Some(choice) => Ok(choice.message.content),
            None => Err("model response contained no choices".into()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::ModelClient;
    use crate::briefing::config::LlmConfig;
    use tokio::test;

    fn test_config() -> LlmConfig {
        LlmConfig {
            base_url: String::from("https://api.openai.com/v1"),
            api_key: String::from("sk-test"),
            model: String::from("gpt-4o-mini"),
            timeout_secs: 5,
        }
    }

    #[test]
    async fn test_complete_returns_first_choice() {
        use httpmock::prelude::*;

        let server = MockServer::start();
        let completions_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .header("authorization", "Bearer sk-test")
                .json_body_partial(r#"{"model": "gpt-4o-mini"}"#);
            then.status(200)
                .header("content-type", "application/json")
                .body(
                    r#"{
                        "choices": [
                            {"message": {"role": "assistant", "content": "Briefing text."}}
                        ]
                    }"#,
                );
        });

        let mut client = ModelClient::new(&test_config());
        let client = client.with_base_url(format!("http://127.0.0.1:{}", server.port()));
        let body = client.complete("prompt").await.unwrap();

        completions_mock.assert();
        assert_eq!(body, "Briefing text.");
    }

    #[test]
    async fn test_complete_fails_on_empty_choices() {
        use httpmock::prelude::*;

        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"choices": []}"#);
        });

        let mut client = ModelClient::new(&test_config());
        let client = client.with_base_url(format!("http://127.0.0.1:{}", server.port()));
        assert!(client.complete("prompt").await.is_err());
    }

    #[test]
    async fn test_complete_surfaces_http_errors() {
        use httpmock::prelude::*;

        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(500);
        });

        let mut client = ModelClient::new(&test_config());
        let client = client.with_base_url(format!("http://127.0.0.1:{}", server.port()));
        assert!(client.complete("prompt").await.is_err());
    }
}
