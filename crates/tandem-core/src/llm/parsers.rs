//! Response parsing for the supported providers

use crate::error::{TandemError, TandemResult};
use crate::llm::messages::{ChatResponse, Usage};
use serde_json::Value;

/// Response parser for the supported wire formats
pub struct ResponseParser;

impl ResponseParser {
    /// Parse an OpenAI chat-completions response.
    ///
    /// The completion text is the message content of the first choice; a
    /// response without one is malformed.
    pub fn parse_openai(response: Value) -> TandemResult<ChatResponse> {
        let choice = response["choices"]
            .as_array()
            .and_then(|choices| choices.first())
            .ok_or_else(|| TandemError::llm_with_provider("response has no choices", "openai"))?;

        let content = choice["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                TandemError::llm_with_provider("first choice has no message content", "openai")
            })?
            .to_string();

        let usage = response["usage"].as_object().map(|usage_data| Usage {
            prompt_tokens: usage_data
                .get("prompt_tokens")
                .and_then(|v| v.as_u64())
                .unwrap_or(0) as u32,
            completion_tokens: usage_data
                .get("completion_tokens")
                .and_then(|v| v.as_u64())
                .unwrap_or(0) as u32,
            total_tokens: usage_data
                .get("total_tokens")
                .and_then(|v| v.as_u64())
                .unwrap_or(0) as u32,
        });

        Ok(ChatResponse {
            content,
            model: response["model"].as_str().map(|s| s.to_string()),
            finish_reason: choice["finish_reason"].as_str().map(|s| s.to_string()),
            usage,
        })
    }

    /// Parse an Anthropic messages response.
    ///
    /// Anthropic returns a content array of typed blocks; the completion
    /// text is the concatenation of the `text` blocks.
    pub fn parse_anthropic(response: Value) -> TandemResult<ChatResponse> {
        let blocks = response["content"].as_array().ok_or_else(|| {
            TandemError::llm_with_provider("response has no content array", "anthropic")
        })?;

        let mut content = String::new();
        for block in blocks {
            if block["type"].as_str() == Some("text") {
                if let Some(text) = block["text"].as_str() {
                    if !content.is_empty() {
                        content.push('\n');
                    }
                    content.push_str(text);
                }
            }
        }

        if content.is_empty() {
            return Err(TandemError::llm_with_provider(
                "response has no text content",
                "anthropic",
            ));
        }

        let usage = response["usage"].as_object().map(|usage_data| {
            let prompt = usage_data
                .get("input_tokens")
                .and_then(|v| v.as_u64())
                .unwrap_or(0) as u32;
            let completion = usage_data
                .get("output_tokens")
                .and_then(|v| v.as_u64())
                .unwrap_or(0) as u32;
            Usage {
                prompt_tokens: prompt,
                completion_tokens: completion,
                total_tokens: prompt + completion,
            }
        });

        Ok(ChatResponse {
            content,
            model: response["model"].as_str().map(|s| s.to_string()),
            finish_reason: response["stop_reason"].as_str().map(|s| s.to_string()),
            usage,
        })
    }
}
