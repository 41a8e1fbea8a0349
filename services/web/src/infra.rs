use ai_translator::config::AppConfig;
use ai_translator::error::AppError;
use ai_translator::translation::{GeminiClient, TranslationService};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn build_translation_service(
    config: &AppConfig,
) -> Result<Arc<TranslationService<GeminiClient>>, AppError> {
    let client = GeminiClient::new(&config.gemini)?;
    info!(
        model = %config.gemini.model,
        key_source = %config.gemini.key_source,
        "gemini client configured"
    );
    Ok(Arc::new(TranslationService::new(Arc::new(client))))
}
