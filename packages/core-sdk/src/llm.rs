use anyhow::{anyhow, Result};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::config::Config;
use crate::models::Message;

/** \brief Response length cap sent with every completion request. */
pub const MAX_REPLY_TOKENS: u32 = 250;

/**
 * \brief Non-streaming OpenAI-compatible chat completion. Returns the raw reply; empty when the model sent no content.
 */
pub async fn chat_once(
    client: &reqwest::Client,
    config: &Config,
    messages: &[Message],
) -> Result<String> {
    let url = completions_url(&config.base_url);
    let body = completion_body(&config.model, messages);
    debug!(model = %config.model, messages = messages.len(), "sending chat completion");

    let resp = client
        .post(url)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {}", config.api_key))
        .json(&body)
        .send()
        .await?;

    if !resp.status().is_success() {
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        warn!(%status, "chat completion rejected upstream");
        return Err(anyhow!("request failed: {} -> {}", status, text));
    }
    let v: Value = resp.json().await?;
    Ok(extract_openai_content(&v))
}

fn completions_url(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

fn completion_body(model: &str, messages: &[Message]) -> Value {
    json!({
        "model": model,
        "messages": messages,
        "max_tokens": MAX_REPLY_TOKENS,
    })
}

fn extract_openai_content(v: &Value) -> String {
    v.get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .unwrap_or("")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    #[test]
    fn url_joins_without_double_slash() {
        assert_eq!(
            completions_url("https://api.apifree.ai/v1/"),
            "https://api.apifree.ai/v1/chat/completions"
        );
        assert_eq!(
            completions_url("http://127.0.0.1:9000"),
            "http://127.0.0.1:9000/chat/completions"
        );
    }

    #[test]
    fn body_carries_model_messages_and_cap() {
        let msgs = vec![
            Message::new(Role::System, "be kind"),
            Message::new(Role::User, "hi"),
        ];
        let body = completion_body("openai/gpt-5.2", &msgs);
        assert_eq!(body["model"], "openai/gpt-5.2");
        assert_eq!(body["max_tokens"], 250);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "hi");
        assert!(body.get("stream").is_none());
    }

    #[test]
    fn content_extraction() {
        let v = json!({"choices": [{"message": {"role": "assistant", "content": " hey "}}]});
        assert_eq!(extract_openai_content(&v), " hey ");

        let v = json!({"choices": [{"message": {"role": "assistant", "content": null}}]});
        assert_eq!(extract_openai_content(&v), "");

        assert_eq!(extract_openai_content(&json!({"choices": []})), "");
    }
}
