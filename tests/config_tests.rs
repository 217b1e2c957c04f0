//! Configuration module unit tests

use askgate::config::settings::{Settings, API_KEY_VAR, DEFAULT_BASE_URL, DEFAULT_MODEL};
use std::collections::HashMap;
use std::time::Duration;

const TEST_KEY: &str = "sk-or-test-key-12345678901234567890";

/// Build settings from the given variables, without touching the process environment
fn settings_from(pairs: &[(&str, &str)]) -> anyhow::Result<Settings> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    Settings::from_lookup(move |key| vars.get(key).cloned())
}

fn expect_error(pairs: &[(&str, &str)], fragment: &str) {
    let err = settings_from(pairs).expect_err("settings should be rejected");
    let message = format!("{:#}", err);
    assert!(
        message.contains(fragment),
        "error `{}` does not mention `{}`",
        message,
        fragment
    );
}

#[test]
fn test_settings_creation_with_full_env() {
    let settings = settings_from(&[
        (API_KEY_VAR, TEST_KEY),
        ("SERVER_HOST", "0.0.0.0"),
        ("SERVER_PORT", "9000"),
        ("OPENROUTER_BASE_URL", "http://localhost:4000/v1"),
        ("LLM_MODEL", "meta-llama/llama-3-8b-instruct"),
        ("LLM_MAX_RETRIES", "4"),
        ("LLM_TIMEOUT_SECONDS", "10"),
        ("LLM_RETRY_DELAY_SECONDS", "1"),
        ("MAX_REQUEST_SIZE", "2048"),
        ("RUST_LOG", "debug"),
        ("LOG_FORMAT", "json"),
        ("ALLOWED_ORIGINS", "https://a.example.com, https://b.example.com"),
        ("CORS_ENABLED", "false"),
    ])
    .unwrap();

    assert_eq!(settings.server.host, "0.0.0.0");
    assert_eq!(settings.server.port, 9000);
    assert_eq!(settings.bind_address(), "0.0.0.0:9000");
    assert_eq!(settings.upstream.api_key, TEST_KEY);
    assert_eq!(settings.upstream.base_url, "http://localhost:4000/v1");
    assert_eq!(settings.upstream.model, "meta-llama/llama-3-8b-instruct");
    assert_eq!(settings.retry.max_retries, 4);
    assert_eq!(settings.retry.timeout_seconds, 10);
    assert_eq!(settings.retry.retry_delay_seconds, 1);
    assert_eq!(settings.request.max_request_size, 2048);
    assert_eq!(settings.logging.level, "debug");
    assert_eq!(settings.logging.format, "json");
    assert_eq!(
        settings.security.allowed_origins,
        vec!["https://a.example.com", "https://b.example.com"]
    );
    assert!(!settings.security.cors_enabled);
}

#[test]
fn test_settings_defaults() {
    let settings = settings_from(&[(API_KEY_VAR, TEST_KEY)]).unwrap();

    assert_eq!(settings.server.host, "127.0.0.1");
    assert_eq!(settings.server.port, 8000);
    assert_eq!(settings.upstream.base_url, DEFAULT_BASE_URL);
    assert_eq!(settings.upstream.model, DEFAULT_MODEL);
    assert_eq!(settings.request.max_request_size, 1024 * 1024);
    assert_eq!(settings.security.allowed_origins, vec!["*"]);
    assert!(settings.security.cors_enabled);
    assert_eq!(settings.logging.level, "info");
    assert_eq!(settings.logging.format, "text");

    let policy = settings.retry_policy();
    assert_eq!(policy.max_attempts, 3);
    assert_eq!(policy.attempt_timeout, Duration::from_secs(20));
    assert_eq!(policy.retry_delay, Duration::from_secs(2));
}

#[test]
fn test_settings_creation_missing_api_key() {
    expect_error(&[], API_KEY_VAR);
}

#[test]
fn test_empty_api_key_is_rejected() {
    expect_error(&[(API_KEY_VAR, "   ")], "cannot be empty");
}

#[test]
fn test_api_key_with_whitespace_is_rejected() {
    expect_error(&[(API_KEY_VAR, "sk-or test")], "whitespace");
}

#[test]
fn test_invalid_port() {
    expect_error(&[(API_KEY_VAR, TEST_KEY), ("SERVER_PORT", "0")], "Port number cannot be 0");
    expect_error(&[(API_KEY_VAR, TEST_KEY), ("SERVER_PORT", "eighty")], "SERVER_PORT");
    expect_error(&[(API_KEY_VAR, TEST_KEY), ("SERVER_PORT", "70000")], "SERVER_PORT");
}

#[test]
fn test_invalid_base_url() {
    expect_error(
        &[(API_KEY_VAR, TEST_KEY), ("OPENROUTER_BASE_URL", "openrouter.ai/api/v1")],
        "should start with 'http'",
    );
}

#[test]
fn test_empty_model_is_rejected() {
    expect_error(&[(API_KEY_VAR, TEST_KEY), ("LLM_MODEL", " ")], "LLM_MODEL");
}

#[test]
fn test_retry_settings_validation() {
    expect_error(&[(API_KEY_VAR, TEST_KEY), ("LLM_MAX_RETRIES", "0")], "LLM_MAX_RETRIES");
    expect_error(&[(API_KEY_VAR, TEST_KEY), ("LLM_MAX_RETRIES", "-1")], "LLM_MAX_RETRIES");
    expect_error(&[(API_KEY_VAR, TEST_KEY), ("LLM_TIMEOUT_SECONDS", "0")], "LLM_TIMEOUT_SECONDS");
    expect_error(
        &[(API_KEY_VAR, TEST_KEY), ("LLM_RETRY_DELAY_SECONDS", "soon")],
        "LLM_RETRY_DELAY_SECONDS",
    );
}

#[test]
fn test_zero_retry_delay_is_allowed() {
    let settings = settings_from(&[(API_KEY_VAR, TEST_KEY), ("LLM_RETRY_DELAY_SECONDS", "0")]).unwrap();

    assert_eq!(settings.retry_policy().retry_delay, Duration::ZERO);
}

#[test]
fn test_zero_request_size_is_rejected() {
    expect_error(&[(API_KEY_VAR, TEST_KEY), ("MAX_REQUEST_SIZE", "0")], "Maximum request size");
}

#[test]
fn test_invalid_logging_settings() {
    expect_error(&[(API_KEY_VAR, TEST_KEY), ("RUST_LOG", "verbose")], "Invalid log level");
    expect_error(&[(API_KEY_VAR, TEST_KEY), ("LOG_FORMAT", "xml")], "Invalid log format");
}

#[test]
fn test_invalid_cors_flag() {
    expect_error(&[(API_KEY_VAR, TEST_KEY), ("CORS_ENABLED", "maybe")], "CORS_ENABLED");
}

#[test]
fn test_allowed_origins_skip_blank_entries() {
    let settings = settings_from(&[
        (API_KEY_VAR, TEST_KEY),
        ("ALLOWED_ORIGINS", "https://a.example.com,, ,https://b.example.com"),
    ])
    .unwrap();

    assert_eq!(
        settings.security.allowed_origins,
        vec!["https://a.example.com", "https://b.example.com"]
    );
}

#[test]
fn test_debug_output_never_contains_api_key() {
    let settings = settings_from(&[(API_KEY_VAR, TEST_KEY)]).unwrap();

    assert!(!format!("{:?}", settings).contains(TEST_KEY));
    assert!(!format!("{:?}", settings.upstream).contains(TEST_KEY));
}
