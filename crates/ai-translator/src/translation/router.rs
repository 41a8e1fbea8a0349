use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::gemini::LanguageModel;
use super::languages::{TargetLanguage, TARGET_LANGUAGES};
use super::page::{render_page, PageView};
use super::service::{Translation, TranslationRequest, TranslationService};
use crate::error::AppError;

/// Fields posted by the HTML form.
#[derive(Debug, Deserialize)]
pub(crate) struct TranslateForm {
    #[serde(default)]
    pub(crate) text: String,
    #[serde(default)]
    pub(crate) language: String,
}

/// Router serving the form at `/` and the JSON API under `/api/v1`.
pub fn translation_router<M>(service: Arc<TranslationService<M>>) -> Router
where
    M: LanguageModel + 'static,
{
    Router::new()
        .route("/", get(form_handler).post(submit_form_handler::<M>))
        .route("/api/v1/translate", post(translate_handler::<M>))
        .route("/api/v1/languages", get(languages_handler))
        .with_state(service)
}

pub(crate) async fn form_handler() -> Html<String> {
    Html(render_page(&PageView::default()))
}

pub(crate) async fn submit_form_handler<M>(
    State(service): State<Arc<TranslationService<M>>>,
    Form(form): Form<TranslateForm>,
) -> Response
where
    M: LanguageModel + 'static,
{
    let TranslateForm { text, language } = form;
    let selected = TargetLanguage::parse(&language).unwrap_or_default();
    let view = PageView::new(text.clone(), selected);

    // Submitting without text leaves the form as it was.
    if text.trim().is_empty() {
        return Html(render_page(&view)).into_response();
    }

    match service.translate(TranslationRequest { text, language }).await {
        Ok(translation) => Html(render_page(&view.with_outcome(Ok(translation)))).into_response(),
        Err(err) => {
            let status = err.status_code();
            let page = render_page(&view.with_outcome(Err(err.to_string())));
            (status, Html(page)).into_response()
        }
    }
}

pub(crate) async fn translate_handler<M>(
    State(service): State<Arc<TranslationService<M>>>,
    payload: Result<Json<TranslationRequest>, JsonRejection>,
) -> Result<Json<Translation>, AppError>
where
    M: LanguageModel + 'static,
{
    let Json(request) = payload?;
    let translation = service.translate(request).await?;
    Ok(Json(translation))
}

pub(crate) async fn languages_handler() -> Json<serde_json::Value> {
    Json(json!({ "languages": TARGET_LANGUAGES }))
}
