//! URL redirects.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An active redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redirect {
    pub from: String,
    pub to: String,
    pub code: u16,
}

impl Redirect {
    pub const DEFAULT_CODE: u16 = 301;
}

/// A redirect row as stored. Either endpoint may be missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRedirect {
    #[serde(default)]
    pub url_from: Option<String>,
    #[serde(default)]
    pub url_to: Option<String>,
    /// Stored as a string (`"301"`), occasionally as a number
    #[serde(default)]
    pub response_code: Option<Value>,
}

impl RawRedirect {
    /// The active redirect, if both endpoints are present.
    pub fn into_redirect(self) -> Option<Redirect> {
        let from = self.url_from.filter(|u| !u.trim().is_empty())?;
        let to = self.url_to.filter(|u| !u.trim().is_empty())?;
        let code = match &self.response_code {
            Some(Value::String(code)) => code.trim().parse().ok(),
            Some(Value::Number(code)) => code.as_u64().and_then(|c| u16::try_from(c).ok()),
            _ => None,
        }
        .unwrap_or(Redirect::DEFAULT_CODE);
        Some(Redirect { from, to, code })
    }
}
