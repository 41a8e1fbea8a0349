use axum::http::StatusCode;

/// Failure while validating input or calling the model.
#[derive(Debug, thiserror::Error)]
pub enum TranslationError {
    #[error("please enter some text to translate")]
    EmptyText,
    #[error("unsupported target language '{0}'")]
    UnsupportedLanguage(String),
    #[error("model request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("model returned HTTP {status}: {message}")]
    Upstream { status: u16, message: String },
    #[error("model declined to answer ({0})")]
    Blocked(String),
    #[error("model returned no text")]
    EmptyResponse,
}

impl TranslationError {
    /// True when the caller supplied bad input and no request was sent.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            TranslationError::EmptyText | TranslationError::UnsupportedLanguage(_)
        )
    }

    pub fn status_code(&self) -> StatusCode {
        if self.is_input_error() {
            StatusCode::UNPROCESSABLE_ENTITY
        } else {
            StatusCode::BAD_GATEWAY
        }
    }
}
