//! Prompting a hosted model to translate English text, and the web form and
//! JSON endpoints that front it.

pub mod error;
pub mod gemini;
pub mod languages;
pub mod page;
pub mod prompt;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use error::TranslationError;
pub use gemini::{GeminiClient, LanguageModel};
pub use languages::{TargetLanguage, TARGET_LANGUAGES};
pub use page::{render_page, PageView};
pub use prompt::TranslationPrompt;
pub use router::translation_router;
pub use service::{Translation, TranslationRequest, TranslationService};
