//! Translator backed by an OpenAI-compatible `/chat/completions` endpoint.

use super::{extract_statement, QueryTranslator};
use crate::{config::TranslatorConfig, error::AppError};
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

/// Describes the schema to the model and asks for a bare PostgreSQL statement.
pub const SYSTEM_PROMPT: &str = r#"You translate requests into a single PostgreSQL statement.
The database has these tables:

users(user_id SERIAL PRIMARY KEY, username VARCHAR(50), email VARCHAR(255) UNIQUE, password TEXT)
tasks(task_id SERIAL PRIMARY KEY, todo TEXT, status task_status, "createdAt" TIMESTAMPTZ,
      "isExist" BOOLEAN, user_id INTEGER REFERENCES users(user_id))

task_status is an enum with the values 'Pending' and 'Completed'.
"createdAt" and "isExist" are case-sensitive and must be double-quoted.
Reply with the SQL statement only, without explanation."#;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// Calls a chat-completions service to turn prompts into SQL.
pub struct ChatTranslator {
    config: TranslatorConfig,
    client: reqwest::Client,
}

impl ChatTranslator {
    pub fn new(config: TranslatorConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    async fn request_statement(&self, prompt: &str) -> Result<String, AppError> {
        let body = ChatRequest {
            model: &self.config.model,
            temperature: 0.0,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let mut request = self.client.post(self.endpoint()).json(&body);
        if let Some(api_key) = &self.config.api_key {
            request = request.bearer_auth(api_key);
        }

        log::debug!("Requesting SQL translation from model {}", self.config.model);

        let response = request.send().await.map_err(|e| {
            log::error!("Translator request failed: {}", e);
            AppError::Translation(format!("translator request failed: {}", e))
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            log::error!("Translator returned {}: {}", status, text);
            return Err(AppError::Translation(format!(
                "translator returned {}",
                status
            )));
        }

        let reply: ChatResponse = response.json().await.map_err(|e| {
            AppError::Translation(format!("invalid translator response: {}", e))
        })?;

        let content = reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AppError::Translation("translator returned no choices".into()))?;

        let statement = extract_statement(&content);
        if statement.is_empty() {
            return Err(AppError::Translation(
                "translator returned an empty statement".into(),
            ));
        }
        Ok(statement)
    }
}

impl QueryTranslator for ChatTranslator {
    fn translate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, AppError>> {
        Box::pin(self.request_statement(prompt))
    }
}
