use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use agentswarm::config::Config;

/// Address nothing listens on; calls to it fail fast
#[allow(dead_code)]
pub const UNREACHABLE: &str = "http://127.0.0.1:1";

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}

/// Config whose providers and GitHub point at the given bases, no credentials
#[allow(dead_code)]
pub fn offline_config(gemini_base: &str, openai_base: &str, github_base: &str) -> Config {
    let mut config = Config::default();
    config.providers.timeout_seconds = 5;
    config.providers.gemini.api_base = gemini_base.to_string();
    config.providers.openai.api_base = openai_base.to_string();
    config.github.api_base = github_base.to_string();
    config
}

/// A successful Gemini `generateContent` body
#[allow(dead_code)]
pub fn gemini_reply(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    })
}

/// A successful OpenAI chat completions body
#[allow(dead_code)]
pub fn openai_reply(text: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": text},
            "finish_reason": "stop"
        }]
    })
}
