//! Generative model access.
//!
//! Every model call goes through [`Generator`]: a prompt plus a declared
//! output [`Schema`] in, the raw completion text out. [`GeminiClient`] talks
//! to the real service; [`OfflineGenerator`] stands in when the model is
//! disabled so callers fall back without touching the network.

pub mod gemini;
pub mod schema;

pub use gemini::GeminiClient;
pub use schema::Schema;

use crate::config::ModelConfig;
use crate::error::{Error, Result};
use serde::de::DeserializeOwned;

/// A single structured-completion request
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    pub schema: Schema,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, schema: Schema) -> Self {
        Self {
            prompt: prompt.into(),
            schema,
        }
    }
}

/// Produces completion text for a request
pub trait Generator {
    fn generate(&self, request: &GenerationRequest) -> Result<String>;

    /// Short name used in logs
    fn name(&self) -> &str;
}

impl<G: Generator + ?Sized> Generator for Box<G> {
    fn generate(&self, request: &GenerationRequest) -> Result<String> {
        (**self).generate(request)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Generator used when the model is disabled; every call fails
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineGenerator;

impl Generator for OfflineGenerator {
    fn generate(&self, _request: &GenerationRequest) -> Result<String> {
        Err(Error::llm("model disabled"))
    }

    fn name(&self) -> &str {
        "offline"
    }
}

/// Pick the generator the configuration asks for
pub fn build_generator(config: &ModelConfig) -> Result<Box<dyn Generator>> {
    if config.enabled {
        Ok(Box::new(GeminiClient::new(config.clone())?))
    } else {
        Ok(Box::new(OfflineGenerator))
    }
}

/// Parse completion text as JSON.
///
/// Blank text parses as `empty` (the empty document for the requested
/// shape). A surrounding Markdown code fence is ignored.
pub fn parse_completion<T: DeserializeOwned>(text: &str, empty: &str) -> Result<T> {
    let body = strip_code_fence(text.trim());
    let body = if body.is_empty() { empty } else { body };
    Ok(serde_json::from_str(body)?)
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the info string (e.g. "json") on the opening fence line. A
    // single-line fence has no line break, so only a leading word is dropped.
    let rest = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
    };
    let rest = rest.trim();
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
