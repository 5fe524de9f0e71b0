//! Backend credential.

use mosaic_error::ConfigError;
use serde::{Deserialize, Serialize};

/// Shortest credential accepted, prefix included.
pub const MIN_API_KEY_LENGTH: usize = 20;

const ACCEPTED_PREFIXES: [&str; 2] = ["sk-", "xai-"];

/// A validated backend credential.
///
/// Accepted keys start with `sk-` or `xai-` (ASCII case-insensitive) and are
/// at least [`MIN_API_KEY_LENGTH`] characters after trimming. `Debug` and
/// `Display` never print the key.
///
/// # Examples
///
/// ```
/// use mosaic_core::ApiKey;
///
/// assert!(ApiKey::parse("xai-abcdefghijklmnopqrstuvwxyz").is_ok());
/// assert!(ApiKey::parse("xaiabcdefghijklmnopqrstuvwxyz").is_err());
/// assert!(ApiKey::parse("sk-short").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApiKey(String);

impl ApiKey {
    /// Validate and wrap a raw key.
    #[track_caller]
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, ConfigError> {
        let key = raw.as_ref().trim();
        let has_prefix = ACCEPTED_PREFIXES.iter().any(|prefix| {
            key.get(..prefix.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
        });
        if !has_prefix {
            return Err(ConfigError::new(
                "Invalid API key: must start with sk- or xai-",
            ));
        }
        if key.chars().count() < MIN_API_KEY_LENGTH {
            return Err(ConfigError::new(format!(
                "Invalid API key: must be at least {} characters",
                MIN_API_KEY_LENGTH
            )));
        }
        Ok(Self(key.to_string()))
    }

    /// True if `raw` would be accepted by [`ApiKey::parse`].
    pub fn is_valid(raw: impl AsRef<str>) -> bool {
        Self::parse(raw).is_ok()
    }

    /// The key itself, for the transport's authorization header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ApiKey {
    type Error = ConfigError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(raw)
    }
}

impl From<ApiKey> for String {
    fn from(key: ApiKey) -> Self {
        key.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ApiKey({})", self)
    }
}

impl std::fmt::Display for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix: String = self.0.chars().take_while(|c| *c != '-').collect();
        write!(f, "{}-****", prefix)
    }
}
