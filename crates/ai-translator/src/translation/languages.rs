use std::fmt;

use serde::{Serialize, Serializer};

use super::error::TranslationError;

/// Output languages offered by the form, sorted by name.
pub static TARGET_LANGUAGES: [&str; 25] = [
    "Arabic",
    "Bengali",
    "Chinese",
    "Czech",
    "Dutch",
    "Finnish",
    "French",
    "German",
    "Greek",
    "Hebrew",
    "Hindi",
    "Italian",
    "Japanese",
    "Korean",
    "Malay",
    "Polish",
    "Portuguese",
    "Romanian",
    "Russian",
    "Spanish",
    "Swedish",
    "Thai",
    "Turkish",
    "Urdu",
    "Vietnamese",
];

/// One entry of [`TARGET_LANGUAGES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetLanguage(&'static str);

impl TargetLanguage {
    /// Case-insensitive lookup; surrounding whitespace is ignored.
    pub fn parse(raw: &str) -> Result<Self, TranslationError> {
        let wanted = raw.trim();
        TARGET_LANGUAGES
            .iter()
            .copied()
            .find(|name| name.eq_ignore_ascii_case(wanted))
            .map(TargetLanguage)
            .ok_or_else(|| TranslationError::UnsupportedLanguage(wanted.to_string()))
    }

    pub fn all() -> impl Iterator<Item = TargetLanguage> {
        TARGET_LANGUAGES.iter().copied().map(TargetLanguage)
    }

    pub fn name(self) -> &'static str {
        self.0
    }
}

impl Default for TargetLanguage {
    fn default() -> Self {
        TargetLanguage(TARGET_LANGUAGES[0])
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl Serialize for TargetLanguage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0)
    }
}
