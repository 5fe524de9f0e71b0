//! Base64 codec for inline payloads.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use mosaic_error::{DecodeError, StorageError};
use std::path::Path;

/// Pure encode/decode helpers for inline media.
///
/// Decoding uses the standard padded alphabet. Line wrapping (any ASCII
/// whitespace) and a `data:<mime>;base64,` prefix are stripped first.
///
/// # Examples
///
/// ```
/// use mosaic_media::MediaCodec;
///
/// assert_eq!(MediaCodec::decode("AQID").unwrap(), vec![1, 2, 3]);
/// assert_eq!(MediaCodec::decode("data:image/png;base64,AQ\nID").unwrap(), vec![1, 2, 3]);
/// assert!(MediaCodec::decode("not base64!").is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MediaCodec;

impl MediaCodec {
    /// Encode bytes as standard padded base64.
    pub fn encode(bytes: &[u8]) -> String {
        BASE64.encode(bytes)
    }

    /// Decode an inline payload.
    pub fn decode(payload: &str) -> Result<Vec<u8>, DecodeError> {
        let body = match Self::split_data_url(payload) {
            Some((_, body)) => body,
            None if payload.trim_start().starts_with("data:") => {
                return Err(DecodeError::new("data URL is not base64 encoded"));
            }
            None => payload,
        };
        let compact: String = body.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        BASE64
            .decode(compact.as_bytes())
            .map_err(|e| DecodeError::new(e.to_string()))
    }

    /// Split `data:<mime>;base64,<payload>` into its MIME type and payload.
    ///
    /// Returns `None` for anything that is not a base64 data URL. The MIME type
    /// is `None` when the URL omits it.
    ///
    /// # Examples
    ///
    /// ```
    /// use mosaic_media::MediaCodec;
    ///
    /// assert_eq!(
    ///     MediaCodec::split_data_url("data:video/mp4;base64,AAAA"),
    ///     Some((Some("video/mp4"), "AAAA"))
    /// );
    /// assert_eq!(MediaCodec::split_data_url("AAAA"), None);
    /// ```
    pub fn split_data_url(value: &str) -> Option<(Option<&str>, &str)> {
        let rest = value.trim_start().strip_prefix("data:")?;
        let (meta, payload) = rest.split_once(',')?;
        let mut params = meta.split(';');
        let mime = params.next().map(str::trim).filter(|m| !m.is_empty());
        if !params.any(|p| p.trim().eq_ignore_ascii_case("base64")) {
            return None;
        }
        Some((mime, payload))
    }

    /// Read a materialized file back.
    pub fn read_file(path: impl AsRef<Path>) -> Result<Vec<u8>, StorageError> {
        let path = path.as_ref();
        std::fs::read(path).map_err(|e| StorageError::io(path.display(), e))
    }
}
