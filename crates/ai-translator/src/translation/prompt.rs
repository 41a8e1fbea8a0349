use super::error::TranslationError;
use super::languages::TargetLanguage;

/// Prompt asking the model to translate `text` into `language`.
///
/// The text is forwarded exactly as entered.
#[derive(Debug, Clone, Copy)]
pub struct TranslationPrompt<'a> {
    text: &'a str,
    language: TargetLanguage,
}

impl<'a> TranslationPrompt<'a> {
    pub fn new(text: &'a str, language: TargetLanguage) -> Result<Self, TranslationError> {
        if text.trim().is_empty() {
            return Err(TranslationError::EmptyText);
        }
        Ok(Self { text, language })
    }

    pub fn render(&self) -> String {
        format!(
            "Translate the following text to {}:\n\n{}",
            self.language, self.text
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spanish() -> TargetLanguage {
        TargetLanguage::parse("Spanish").expect("spanish is offered")
    }

    #[test]
    fn renders_fixed_template() {
        let prompt = TranslationPrompt::new("Hello, how are you?", spanish()).expect("valid");
        assert_eq!(
            prompt.render(),
            "Translate the following text to Spanish:\n\nHello, how are you?"
        );
    }

    #[test]
    fn keeps_text_verbatim() {
        let text = "  line one\n\tline two  ";
        let prompt = TranslationPrompt::new(text, spanish()).expect("valid");
        assert!(prompt.render().ends_with(text));
    }

    #[test]
    fn rejects_blank_text() {
        let err = TranslationPrompt::new(" \n\t", spanish()).expect_err("blank text");
        assert!(matches!(err, TranslationError::EmptyText));
    }
}
