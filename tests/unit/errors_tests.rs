/*!
 * Tests for error types and conversions
 */

use scenesage::errors::{AppError, ProviderError, SceneError, SubtitleError};

#[test]
fn test_providerError_requestFailed_shouldDisplayCorrectly() {
    let error = ProviderError::RequestFailed("Connection timeout".to_string());
    let display = format!("{}", error);
    assert!(display.contains("API request failed"));
    assert!(display.contains("Connection timeout"));
}

#[test]
fn test_providerError_apiError_shouldDisplayStatusAndMessage() {
    let error = ProviderError::ApiError {
        status_code: 502,
        message: "Bad gateway".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("502"));
    assert!(display.contains("Bad gateway"));
}

#[test]
fn test_providerError_fromStatus_shouldPickVariant() {
    assert!(matches!(ProviderError::from_status(401, "no".into()), ProviderError::AuthenticationError(_)));
    assert!(matches!(ProviderError::from_status(403, "no".into()), ProviderError::AuthenticationError(_)));
    assert!(matches!(ProviderError::from_status(429, "slow down".into()), ProviderError::RateLimitExceeded(_)));
    assert!(matches!(
        ProviderError::from_status(500, "oops".into()),
        ProviderError::ApiError { status_code: 500, .. }
    ));
}

#[test]
fn test_appError_missingCredential_shouldNameVariable() {
    let error = AppError::MissingCredential("OPENROUTER_API_KEY".to_string());
    assert_eq!(error.to_string(), "OPENROUTER_API_KEY environment variable not set");
}

#[test]
fn test_appError_fromComponentErrors_shouldWrap() {
    let error: AppError = ProviderError::EmptyResponse.into();
    assert!(matches!(error, AppError::Provider(ProviderError::EmptyResponse)));

    let error: AppError = SubtitleError::InvalidTimestamp("99:99".to_string()).into();
    assert!(error.to_string().starts_with("Subtitle error"));
    assert!(error.to_string().contains("99:99"));

    let error: AppError = SceneError::InvalidThreshold(0.0).into();
    assert!(error.to_string().contains("Invalid pause threshold"));

    let error: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
    assert!(matches!(error, AppError::File(_)));

    let error: AppError = anyhow::anyhow!("something odd").into();
    assert!(matches!(error, AppError::Unknown(ref msg) if msg == "something odd"));
}
