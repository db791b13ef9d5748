use base64::DecodeError;
use josekit::JoseError;
use reqwest::header::ToStrError;
use reqwest::Error as ReqwestError;
use reqwest::StatusCode;
use serde_json::Error as SerdeError;
use thiserror::Error;

/// Represents all possible errors that can occur while talking to an ACME directory.
///
/// # Variants
///
/// - `RequestFailed`: Errors that occur during HTTP requests. Wrapped errors from the `reqwest` library.
/// - `MissingNonce`: The `replay-nonce` header was not present on a `newNonce` response.
/// - `HeaderToStrError`: An HTTP header value could not be read as a string.
/// - `JoseError`: Signing the request or reading the account key failed.
/// - `MissingLocationHeader`: The directory answered an account request without a `location` header.
/// - `DecodeError`: A base64url value (usually the nonce) could not be decoded.
/// - `SerdeError`: A JSON body could not be serialized or deserialized.
/// - `ConversionError`: Key material could not be converted to PEM text.
/// - `ParseError`: A URL returned by the directory is malformed.
/// - `Problem`: The directory rejected the request with a problem document (RFC 7807).
#[derive(Debug, Error)]
pub enum AcmeErrors {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] ReqwestError),

    #[error("Replay nonce expected but not found in the response")]
    MissingNonce,

    #[error("Failed to convert HTTP header value to string: {0}")]
    HeaderToStrError(#[from] ToStrError),

    #[error("JOSE processing error: {0}")]
    JoseError(#[from] JoseError),

    #[error("Expected 'location' header is missing in the HTTP response")]
    MissingLocationHeader,

    #[error("Data decoding error: {0}")]
    DecodeError(#[from] DecodeError),

    #[error("Serialization or deserialization error using Serde: {0}")]
    SerdeError(#[from] SerdeError),

    #[error("General error related to type conversion")]
    ConversionError,

    #[error("Error in parsing url")]
    ParseError(#[from] url::ParseError),

    #[error("ACME server returned {status}{}", describe_problem(.kind, .detail))]
    Problem {
        status: StatusCode,
        kind: String,
        detail: String,
    },
}

fn describe_problem(kind: &str, detail: &str) -> String {
    [kind, detail]
        .iter()
        .filter(|part| !part.is_empty())
        .map(|part| format!(": {part}"))
        .collect()
}
