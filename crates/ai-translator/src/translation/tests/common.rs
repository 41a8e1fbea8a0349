use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::translation::{
    translation_router, LanguageModel, TranslationError, TranslationService,
};

/// Model double that records prompts and replies with a fixed outcome.
pub(super) struct ScriptedModel {
    reply: Result<String, fn() -> TranslationError>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub(super) fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn failing(error: fn() -> TranslationError) -> Self {
        Self {
            reply: Err(error),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompt mutex poisoned").clone()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn generate(&self, prompt: &str) -> Result<String, TranslationError> {
        self.prompts
            .lock()
            .expect("prompt mutex poisoned")
            .push(prompt.to_string());
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(make_error) => Err(make_error()),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

pub(super) fn upstream_failure() -> TranslationError {
    TranslationError::Upstream {
        status: 503,
        message: "The model is overloaded. Please try again later.".to_string(),
    }
}

pub(super) fn service_with(model: Arc<ScriptedModel>) -> TranslationService<ScriptedModel> {
    TranslationService::new(model)
}

pub(super) fn router_with(model: Arc<ScriptedModel>) -> axum::Router {
    translation_router(Arc::new(service_with(model)))
}

pub(super) async fn read_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf-8 body")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
