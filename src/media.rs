//! Self-describing encoded media: `data:<mime-type>;base64,<payload>`.
//!
//! Used to pass binary content (textbook page uploads, generated visual
//! aids) through text-only channels. Encoding is lossless: decoding an
//! encoded URI yields the original bytes exactly.

use crate::error::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::path::Path;

/// Default ceiling for uploads converted in memory, in bytes (10 MiB).
///
/// The conversion buffers the whole file, so unbounded input is rejected
/// up front. Overridable via `[media] max_upload_bytes` in the config.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// A decoded media payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedMedia {
    /// MIME type from the URI header (e.g. `image/png`).
    pub mime_type: String,

    /// The raw decoded bytes.
    pub bytes: Vec<u8>,
}

/// Encode bytes as a data URI with the given MIME type.
///
/// # Errors
///
/// Returns `Error::Media` if the MIME type is malformed or the payload
/// exceeds `max_bytes`.
pub fn encode_data_uri(mime_type: &str, bytes: &[u8], max_bytes: usize) -> Result<String> {
    if mime_type.is_empty() || !mime_type.contains('/') {
        return Err(Error::Media(format!("invalid MIME type: {mime_type:?}")));
    }
    if bytes.len() > max_bytes {
        return Err(Error::Media(format!(
            "payload is {} bytes, exceeds the {max_bytes} byte limit",
            bytes.len()
        )));
    }
    Ok(format!("data:{mime_type};base64,{}", STANDARD.encode(bytes)))
}

/// Decode a data URI back into its MIME type and original bytes.
///
/// # Errors
///
/// Returns `Error::Media` if the string is not a well-formed
/// `data:<mime>;base64,<payload>` URI or the payload is not valid Base64.
pub fn decode_data_uri(uri: &str) -> Result<DecodedMedia> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| Error::Media("missing data: prefix".to_string()))?;
    let (mime_type, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| Error::Media("missing ;base64, separator".to_string()))?;
    if mime_type.is_empty() || !mime_type.contains('/') {
        return Err(Error::Media(format!("invalid MIME type: {mime_type:?}")));
    }
    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| Error::Media(format!("invalid Base64 payload: {e}")))?;
    Ok(DecodedMedia {
        mime_type: mime_type.to_string(),
        bytes,
    })
}

/// Cheap shape check used by input validation, without decoding the payload.
#[must_use]
pub fn is_data_uri(s: &str) -> bool {
    s.strip_prefix("data:")
        .and_then(|rest| rest.split_once(";base64,"))
        .is_some_and(|(mime, _)| !mime.is_empty() && mime.contains('/'))
}

/// Guess a MIME type from a file extension, for CLI uploads.
///
/// Unknown extensions fall back to `application/octet-stream`.
#[must_use]
pub fn mime_for_path(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::path::PathBuf;

    #[test]
    fn encode_produces_expected_shape() {
        let uri = encode_data_uri("image/png", b"abc", DEFAULT_MAX_UPLOAD_BYTES).unwrap();
        assert_eq!(uri, "data:image/png;base64,YWJj");
    }

    #[test]
    fn decode_round_trip() {
        let bytes = vec![0u8, 1, 2, 255, 254];
        let uri = encode_data_uri("image/jpeg", &bytes, DEFAULT_MAX_UPLOAD_BYTES).unwrap();
        let decoded = decode_data_uri(&uri).unwrap();
        assert_eq!(decoded.mime_type, "image/jpeg");
        assert_eq!(decoded.bytes, bytes);
    }

    #[test]
    fn encode_rejects_oversize_payload() {
        let err = encode_data_uri("image/png", &[0u8; 11], 10).unwrap_err();
        assert!(matches!(err, crate::Error::Media(_)));
    }

    #[test]
    fn encode_rejects_bad_mime() {
        assert!(encode_data_uri("", b"x", 100).is_err());
        assert!(encode_data_uri("notamime", b"x", 100).is_err());
    }

    #[test]
    fn decode_rejects_missing_prefix() {
        assert!(decode_data_uri("image/png;base64,YWJj").is_err());
    }

    #[test]
    fn decode_rejects_missing_separator() {
        assert!(decode_data_uri("data:image/png,YWJj").is_err());
    }

    #[test]
    fn decode_rejects_bad_base64() {
        assert!(decode_data_uri("data:image/png;base64,!!!").is_err());
    }

    #[test]
    fn is_data_uri_checks_shape() {
        assert!(is_data_uri("data:image/png;base64,YWJj"));
        assert!(is_data_uri("data:application/pdf;base64,"));
        assert!(!is_data_uri("data:;base64,YWJj"));
        assert!(!is_data_uri("https://example.com/a.png"));
        assert!(!is_data_uri("data:image/png,YWJj"));
    }

    #[test]
    fn mime_guess_by_extension() {
        assert_eq!(mime_for_path(&PathBuf::from("page.PNG")), "image/png");
        assert_eq!(mime_for_path(&PathBuf::from("page.jpeg")), "image/jpeg");
        assert_eq!(
            mime_for_path(&PathBuf::from("page.xyz")),
            "application/octet-stream"
        );
        assert_eq!(
            mime_for_path(&PathBuf::from("noext")),
            "application/octet-stream"
        );
    }

    proptest! {
        #[test]
        fn round_trip_is_lossless(bytes in proptest::collection::vec(any::<u8>(), 0..2048)) {
            let uri = encode_data_uri("image/png", &bytes, DEFAULT_MAX_UPLOAD_BYTES).unwrap();
            let decoded = decode_data_uri(&uri).unwrap();
            prop_assert_eq!(decoded.bytes, bytes);
        }
    }
}
