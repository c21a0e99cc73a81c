//! Integration tests for talktemplate-core infrastructure

use talktemplate_core::{
    config_error, validation_error, ClientConfig, ErrorContext, TalkError, API_BASE_URL_ENV,
    DEFAULT_API_BASE_URL,
};

#[test]
fn test_error_handling() {
    // Error creation with context
    let error = config_error!("Test config error", "test_component");

    match &error {
        TalkError::Config {
            message, context, ..
        } => {
            assert_eq!(message, "Test config error");
            assert_eq!(context.component, "test_component");
            assert!(!context.error_id.is_empty());
        }
        _ => panic!("Expected Config error"),
    }

    // Error logging (should not panic)
    error.log();

    // Recoverability
    let network_error = TalkError::Network {
        message: "Connection failed".to_string(),
        source: None,
        context: ErrorContext::new("test"),
    };
    assert!(network_error.is_recoverable());
    assert!(!error.is_recoverable());
}

#[test]
fn test_service_error_message_extraction() {
    let rejected = TalkError::Service {
        status: 401,
        message: Some("잘못된 비밀번호입니다.".to_string()),
        context: ErrorContext::new("auth_api_client").with_operation("login"),
    };
    assert_eq!(rejected.service_message(), Some("잘못된 비밀번호입니다."));
    assert!(!rejected.is_recoverable());

    let bare = TalkError::Service {
        status: 503,
        message: None,
        context: ErrorContext::new("auth_api_client"),
    };
    assert_eq!(bare.service_message(), None);
    assert!(bare.is_recoverable());
}

#[test]
fn test_error_macros() {
    let validation_err = validation_error!("Invalid field value", "email", "validator");
    match validation_err {
        TalkError::Validation {
            message,
            field,
            context,
            ..
        } => {
            assert_eq!(message, "Invalid field value");
            assert_eq!(field, Some("email".to_string()));
            assert_eq!(context.component, "validator");
            assert!(!context.recovery_suggestions.is_empty());
        }
        _ => panic!("Expected Validation error"),
    }
}

#[test]
fn test_config_defaults_and_validation() {
    let mut config = ClientConfig::default();
    assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
    assert!(config.validate().is_ok());

    config.api.timeout_seconds = 0;
    let result = config.validate();
    assert!(result.is_err());
    match result.unwrap_err() {
        TalkError::Config { message, .. } => {
            assert!(message.contains("timeout_seconds"));
        }
        _ => panic!("Expected Config error"),
    }
}

#[test]
fn test_config_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = ClientConfig::default();
    config.api.base_url = "https://api.talktemplate.example".to_string();
    config.save_to_file(&path).unwrap();

    let loaded = ClientConfig::from_file(&path).unwrap();
    assert_eq!(loaded.api.base_url, "https://api.talktemplate.example");
    assert_eq!(loaded.api.timeout_seconds, config.api.timeout_seconds);
}

#[test]
fn test_config_rejects_invalid_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "api = 'not a table'").unwrap();

    assert!(ClientConfig::from_file(&path).is_err());
}

#[test]
fn test_resolved_base_url_env_override() {
    let mut config = ClientConfig::default();
    config.api.base_url = "http://configured:9999/".to_string();

    std::env::remove_var(API_BASE_URL_ENV);
    assert_eq!(config.resolved_base_url(), "http://configured:9999");

    std::env::set_var(API_BASE_URL_ENV, "https://override.example/");
    assert_eq!(config.resolved_base_url(), "https://override.example");
    std::env::remove_var(API_BASE_URL_ENV);
}
