use super::*;

#[test]
fn test_app_error_error_codes() {
    assert_eq!(
        AppError::Validation("test".into()).error_code(),
        "VALIDATION_ERROR"
    );
    assert_eq!(AppError::NotFound("test".into()).error_code(), "NOT_FOUND");
    assert_eq!(
        AppError::Configuration("test".into()).error_code(),
        "CONFIGURATION_ERROR"
    );
    assert_eq!(
        AppError::Internal("test".into()).error_code(),
        "INTERNAL_ERROR"
    );
}

#[test]
fn test_app_error_client_errors() {
    assert!(AppError::Validation(String::new()).is_client_error());
    assert!(AppError::NotFound(String::new()).is_client_error());
    assert!(!AppError::Configuration(String::new()).is_client_error());
    assert!(!AppError::Internal(String::new()).is_client_error());
}

#[test]
fn test_app_error_display() {
    assert_eq!(
        AppError::Validation("msg".into()).to_string(),
        "Validation error: msg"
    );
    assert_eq!(
        AppError::NotFound("msg".into()).to_string(),
        "Not found: msg"
    );
    assert_eq!(
        AppError::Configuration("msg".into()).to_string(),
        "Configuration error: msg"
    );
    assert_eq!(
        AppError::Internal("msg".into()).to_string(),
        "Internal error: msg"
    );
}

#[test]
fn test_config_error_converts() {
    let err: AppError = config::ConfigError::NotFound("ledger.accounts".into()).into();
    assert!(matches!(err, AppError::Configuration(_)));
    assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
}
