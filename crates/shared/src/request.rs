//! The question handed to the operator by the calling agent.

use serde::{Deserialize, Deserializer, Serialize};

/// Errors raised while reading the request payload.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("Invalid decision request: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A decision the operator has to make.
///
/// Every field is optional in the JSON payload. A missing field or an
/// explicit `null` falls back to the empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub decision_context: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub options: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub default_action: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl DecisionRequest {
    /// Parse the JSON payload passed on the command line.
    pub fn from_json(json: &str) -> Result<Self, RequestError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }

    /// Look up an option by its displayed (1-based) number.
    pub fn option(&self, number: usize) -> Option<&str> {
        number
            .checked_sub(1)
            .and_then(|i| self.options.get(i))
            .map(String::as_str)
    }

    /// Options paired with their displayed numbers.
    pub fn numbered_options(&self) -> impl Iterator<Item = (usize, &str)> {
        self.options
            .iter()
            .enumerate()
            .map(|(i, opt)| (i + 1, opt.as_str()))
    }
}
