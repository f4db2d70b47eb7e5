//! Terminal result of one dialog and its wire encodings.

use crate::mode::{ThinkingMode, UnknownMode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Line printed when the operator cancels.
pub const CANCELLED_TOKEN: &str = "CANCELLED";

/// Joins the response and the mode in the plain encoding.
pub const SEPARATOR: &str = "|||";

/// What the operator decided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DialogOutcome {
    Submitted {
        response: String,
        #[serde(rename = "thinking_mode")]
        mode: ThinkingMode,
    },
    Cancelled,
}

/// How the outcome is written to standard output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `CANCELLED` or `<response>|||<mode>`.
    #[default]
    Plain,
    /// A single JSON object.
    Json,
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("missing '|||' separator")]
    MissingSeparator,
    #[error(transparent)]
    UnknownMode(#[from] UnknownMode),
}

impl DialogOutcome {
    /// Plain one-line encoding. The response is written verbatim, so a
    /// response containing the separator is only recoverable through
    /// [`DialogOutcome::decode`], which splits on the last separator.
    pub fn encode(&self) -> String {
        match self {
            DialogOutcome::Submitted { response, mode } => {
                format!("{}{}{}", response, SEPARATOR, mode)
            }
            DialogOutcome::Cancelled => CANCELLED_TOKEN.to_string(),
        }
    }

    pub fn encode_as(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Plain => self.encode(),
            OutputFormat::Json => match serde_json::to_string(self) {
                Ok(json) => json,
                Err(e) => {
                    tracing::warn!("Failed to serialize outcome as JSON: {}", e);
                    self.encode()
                }
            },
        }
    }

    /// Inverse of [`DialogOutcome::encode`].
    pub fn decode(line: &str) -> Result<Self, DecodeError> {
        if line == CANCELLED_TOKEN {
            return Ok(DialogOutcome::Cancelled);
        }
        let (response, mode) = line
            .rsplit_once(SEPARATOR)
            .ok_or(DecodeError::MissingSeparator)?;
        Ok(DialogOutcome::Submitted {
            response: response.to_string(),
            mode: mode.parse()?,
        })
    }
}

impl fmt::Display for DialogOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}
