use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use super::base::Usage;
use crate::errors::GatewayError;
use crate::models::message::Message;
use crate::models::role::Role;

/// Convert internal Message format to OpenAI's API message specification
pub fn messages_to_openai_spec(messages: &[Message]) -> Vec<Value> {
    messages
        .iter()
        .map(|message| {
            json!({
                "role": message.role,
                "content": message.content,
            })
        })
        .collect()
}

/// Build a chat completions request body
pub fn chat_payload(
    model: &str,
    messages: &[Message],
    temperature: f32,
    max_tokens: Option<i32>,
) -> Value {
    let mut payload = json!({
        "model": model,
        "messages": messages_to_openai_spec(messages),
        "temperature": temperature,
    });
    if let (Some(tokens), Some(object)) = (max_tokens, payload.as_object_mut()) {
        object.insert("max_tokens".to_string(), json!(tokens));
    }
    payload
}

/// POST a payload to an OpenAI compatible endpoint and map failures onto [`GatewayError`]
pub async fn post_json(
    client: &Client,
    url: &str,
    bearer: Option<&str>,
    payload: &Value,
) -> Result<Value, GatewayError> {
    let mut request = client.post(url).json(payload);
    if let Some(token) = bearer {
        request = request.header("Authorization", format!("Bearer {}", token));
    }

    let response = request.send().await?;
    let status = response.status();
    match status {
        status if status.is_success() => Ok(response.json().await?),
        StatusCode::TOO_MANY_REQUESTS => {
            let body = response.text().await.unwrap_or_default();
            Err(GatewayError::RateLimited(body))
        }
        status if status.is_server_error() => Err(GatewayError::Server {
            status: status.as_u16(),
        }),
        status => {
            let body = response.text().await.unwrap_or_default();
            Err(GatewayError::Request {
                status: status.as_u16(),
                body,
            })
        }
    }
}

/// Run one chat completion against `{host}/v1/chat/completions`
pub async fn complete_chat(
    client: &Client,
    host: &str,
    bearer: Option<&str>,
    model: &str,
    messages: &[Message],
    temperature: f32,
    max_tokens: Option<i32>,
) -> Result<(Message, Usage), GatewayError> {
    let url = format!("{}/v1/chat/completions", host.trim_end_matches('/'));
    let payload = chat_payload(model, messages, temperature, max_tokens);
    tracing::debug!(model, messages = messages.len(), "sending chat completion");

    let response = post_json(client, &url, bearer, &payload).await?;

    let message = openai_response_to_message(&response)?;
    let usage = get_usage(&response);
    tracing::debug!(?usage, "chat completion finished");

    Ok((message, usage))
}

/// Convert OpenAI's API response to internal Message format.
///
/// Only plain text replies are meaningful here; anything else is malformed.
pub fn openai_response_to_message(response: &Value) -> Result<Message, GatewayError> {
    if let Some(error) = response.get("error") {
        return Err(check_openai_context_length_error(error).unwrap_or_else(|| {
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .map(String::from)
                .unwrap_or_else(|| error.to_string());
            GatewayError::Api(message)
        }));
    }

    let original = response
        .get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .ok_or_else(|| GatewayError::MalformedResponse("no choices in response".to_string()))?;

    if let Some(role) = original.get("role").and_then(Value::as_str) {
        if role != Role::Assistant.as_str() {
            return Err(GatewayError::MalformedResponse(format!(
                "expected an assistant message, got role '{}'",
                role
            )));
        }
    }

    let text = original
        .get("content")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            GatewayError::MalformedResponse("assistant message has no text content".to_string())
        })?;

    Ok(Message::assistant(text))
}

pub fn get_usage(data: &Value) -> Usage {
    let Some(usage) = data.get("usage") else {
        return Usage::default();
    };

    let input_tokens = usage
        .get("prompt_tokens")
        .and_then(|v| v.as_i64())
        .map(|v| v as i32);

    let output_tokens = usage
        .get("completion_tokens")
        .and_then(|v| v.as_i64())
        .map(|v| v as i32);

    let total_tokens = usage
        .get("total_tokens")
        .and_then(|v| v.as_i64())
        .map(|v| v as i32)
        .or_else(|| match (input_tokens, output_tokens) {
            (Some(input), Some(output)) => Some(input + output),
            _ => None,
        });

    Usage::new(input_tokens, output_tokens, total_tokens)
}

pub fn check_openai_context_length_error(error: &Value) -> Option<GatewayError> {
    let code = error.get("code")?.as_str()?;
    if code == "context_length_exceeded" || code == "string_above_max_length" {
        let message = error
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("Unknown error")
            .to_string();
        Some(GatewayError::ContextLengthExceeded(message))
    } else {
        None
    }
}
