use crate::infra::build_translation_service;
use ai_translator::config::AppConfig;
use ai_translator::error::AppError;
use ai_translator::translation::{TargetLanguage, TranslationRequest};
use clap::Args;

#[derive(Args, Debug)]
pub(crate) struct TranslateArgs {
    /// Target language, e.g. "French" (case-insensitive)
    #[arg(long = "to", short = 't')]
    pub(crate) language: String,
    /// English text to translate; multiple words are joined with spaces
    #[arg(required = true, num_args = 1..)]
    pub(crate) words: Vec<String>,
}

impl TranslateArgs {
    pub(crate) fn text(&self) -> String {
        self.words.join(" ")
    }
}

pub(crate) async fn run_translate(args: TranslateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = build_translation_service(&config)?;

    let request = TranslationRequest {
        text: args.text(),
        language: args.language,
    };
    let translation = service.translate(request).await?;

    println!("Translated to {}:", translation.language);
    println!("{}", translation.text);
    Ok(())
}

pub(crate) fn run_languages() {
    for language in TargetLanguage::all() {
        println!("{language}");
    }
}
