//! Decoding of the GitHub contents API envelope
//!
//! The contents endpoint wraps the file body in a JSON object whose `content`
//! field holds base64 text, wrapped at 60 columns.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;
use serde_json::Value;

use super::RetrievalError;

/// Response body of the GitHub contents endpoint
#[derive(Debug, Deserialize)]
pub struct ContentEnvelope {
    /// Base64 encoded file body
    content: Option<String>,
    /// Encoding declared by the API, normally `base64`
    #[serde(default)]
    encoding: Option<String>,
}

impl ContentEnvelope {
    /// Decodes the embedded file and parses it as JSON
    pub fn decode(&self) -> Result<Value, RetrievalError> {
        let content = self.content.as_deref().ok_or(RetrievalError::MissingContent)?;
        if let Some(encoding) = self.encoding.as_deref() {
            if encoding != "base64" {
                return Err(RetrievalError::UnsupportedEncoding(encoding.to_string()));
            }
        }

        let compact: String = content.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        let bytes = STANDARD.decode(compact)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
