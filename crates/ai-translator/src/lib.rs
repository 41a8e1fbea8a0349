//! Translate English text into a fixed set of languages with a hosted
//! Gemini model, served as a single-page web form and a small JSON API.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod translation;
