//! OCR.space response models

use serde::Deserialize;

/// Top-level OCR.space parse response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OcrResponse {
    #[serde(default, rename = "ParsedResults")]
    pub parsed_results: Vec<OcrParsedResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OcrParsedResult {
    #[serde(default, rename = "ParsedText")]
    pub parsed_text: Option<String>,
}

impl OcrResponse {
    /// Text of the first parsed result, if the service returned one.
    pub fn first_text(&self) -> Option<String> {
        self.parsed_results
            .first()
            .and_then(|result| result.parsed_text.clone())
    }
}
