use http::header::AUTHORIZATION;
use http::HeaderMap;

use super::errors::BearerError;

/// Authentication scheme name, matched case-insensitively.
pub const BEARER_SCHEME: &str = "Bearer";

/// Extract the credential from an `Authorization` header value.
///
/// The value is split on runs of whitespace. The first field must be the
/// `Bearer` scheme (any case) and the second field is returned. Fields after
/// the credential are ignored.
///
/// # Errors
/// * `MissingHeader` - Value is empty
/// * `MalformedScheme` - First field is missing or is not `Bearer`
/// * `EmptyToken` - Scheme is present but no credential follows it
pub fn extract_bearer_token(header: &str) -> Result<&str, BearerError> {
    if header.is_empty() {
        return Err(BearerError::MissingHeader);
    }

    let mut fields = header.split_whitespace();

    let scheme = fields.next().ok_or(BearerError::MalformedScheme)?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return Err(BearerError::MalformedScheme);
    }

    fields.next().ok_or(BearerError::EmptyToken)
}

/// Extract the bearer credential from the first `Authorization` header.
///
/// The value is treated as opaque text: any UTF-8, including non-ASCII
/// bytes, is passed through to the parser.
///
/// # Errors
/// * `MissingHeader` - No `Authorization` header, or an empty one
/// * `MalformedScheme` - Header value is not valid UTF-8
/// * `EmptyToken` - Scheme is present but no credential follows it
pub fn bearer_token_from_headers(headers: &HeaderMap) -> Result<&str, BearerError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(BearerError::MissingHeader)?;

    let text = std::str::from_utf8(value.as_bytes()).map_err(|_| BearerError::MalformedScheme)?;

    extract_bearer_token(text)
}
