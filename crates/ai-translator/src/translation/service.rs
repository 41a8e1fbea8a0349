use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::error::TranslationError;
use super::gemini::LanguageModel;
use super::languages::TargetLanguage;
use super::prompt::TranslationPrompt;

/// Raw input as submitted by the form or the JSON API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub text: String,
    pub language: String,
}

/// Model output for a request, returned as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Translation {
    pub language: TargetLanguage,
    #[serde(rename = "translation")]
    pub text: String,
}

/// Validates a request, renders the prompt, and makes one model call.
pub struct TranslationService<M> {
    model: Arc<M>,
}

impl<M> TranslationService<M>
where
    M: LanguageModel + 'static,
{
    pub fn new(model: Arc<M>) -> Self {
        Self { model }
    }

    pub async fn translate(
        &self,
        request: TranslationRequest,
    ) -> Result<Translation, TranslationError> {
        let language = TargetLanguage::parse(&request.language)?;
        let prompt = TranslationPrompt::new(&request.text, language)?;

        info!(
            %language,
            chars = request.text.chars().count(),
            model = self.model.name(),
            "translating text"
        );

        match self.model.generate(&prompt.render()).await {
            Ok(text) => Ok(Translation { language, text }),
            Err(err) => {
                warn!(%language, error = %err, "translation failed");
                Err(err)
            }
        }
    }
}
