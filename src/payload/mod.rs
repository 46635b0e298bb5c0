//! Typed hand-off of a prediction from the server-rendered page to the
//! client-side result logic.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classifier::{self, ClassifyError, Verdict};

/// Element id of the JSON data block embedded in result pages.
pub const DATA_BLOCK_ID: &str = "prediction-data";

static DATA_BLOCK_RE: OnceLock<Regex> = OnceLock::new();

fn data_block_re() -> &'static Regex {
    DATA_BLOCK_RE.get_or_init(|| {
        Regex::new(r#"(?s)<script[^>]*\bid="prediction-data"[^>]*>(.*?)</script>"#)
            .unwrap_or_else(|e| panic!("invalid data block pattern: {e}"))
    })
}

/// Score the server emits when no prediction was made.
pub const NO_RESULT_SENTINEL: f64 = -1.0;

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("failed to parse prediction payload: {source}")]
    Json {
        #[source]
        source: serde_json::Error,
    },

    #[error("no <script id=\"{id}\"> data block found in page")]
    MissingDataBlock { id: &'static str },

    #[error("failed to read payload file: {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultPayload {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub prediction: String,
    #[serde(default)]
    pub legitimate_suggestion: Option<String>,
}

impl ResultPayload {
    pub fn new(url: impl Into<String>, score: f64) -> Self {
        Self {
            url: url.into(),
            score: Some(score),
            ..Self::default()
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, PayloadError> {
        serde_json::from_str(raw).map_err(|source| PayloadError::Json { source })
    }

    pub fn from_file(path: &Path) -> Result<Self, PayloadError> {
        let raw = std::fs::read_to_string(path).map_err(|source| PayloadError::FileRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Read the payload back out of a page produced by
    /// [`crate::output::report::render_html`].
    pub fn from_html(html: &str) -> Result<Self, PayloadError> {
        let body = data_block_re()
            .captures(html)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
            .ok_or(PayloadError::MissingDataBlock { id: DATA_BLOCK_ID })?;
        // `<\/` is a valid JSON escape, so the embedded text parses as-is.
        Self::from_json(body.trim())
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// The score, unless absent or the no-result sentinel.
    pub fn effective_score(&self) -> Option<f64> {
        match self.score {
            Some(s) if s == NO_RESULT_SENTINEL => None,
            other => other,
        }
    }

    /// `None` means there is nothing to display.
    pub fn verdict(&self) -> Option<Result<Verdict, ClassifyError>> {
        self.effective_score().map(classifier::classify)
    }
}
