use std::fmt::Display;

use crate::cert::types::base64;
use base64::prelude::BASE64_URL_SAFE_NO_PAD;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use josekit::{
    jwk::alg::ec::EcKeyPair,
    jws::{JwsHeader, JwsSigner, ES256},
    jwt::JwtPayload,
};
use serde::Serialize;
use url::Url;

use super::errors::AcmeErrors;

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub(crate) enum SigningAlgorithm {
    /// ECDSA using P-256 and SHA-256
    Es256,
}
impl Display for SigningAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SigningAlgorithm::Es256 => write!(f, "ES256"),
        }
    }
}

#[derive(Serialize)]
struct JwtComponents {
    protected: String,
    payload: String,
    signature: String,
}

impl JwtComponents {
    fn new(protected: String, payload: String, signature: Vec<u8>) -> Self {
        Self {
            protected,
            payload,
            signature: BASE64_URL_SAFE_NO_PAD.encode(signature),
        }
    }
}

/// Builds a flattened JWS body for a `newAccount` request to `url`.
///
/// The public key travels in the `jwk` header, since the directory may not
/// know the account yet.
pub(crate) fn create_jws(
    nonce: &str,
    payload: &JwtPayload,
    url: &Url,
    ec_key_pair: &EcKeyPair,
) -> Result<String, AcmeErrors> {
    let mut header = JwsHeader::new();
    header.set_jwk(ec_key_pair.to_jwk_public_key());
    header.set_algorithm(SigningAlgorithm::Es256.to_string());

    // josekit encodes the nonce again when serializing the header
    let nonce = URL_SAFE_NO_PAD.decode(nonce.as_bytes())?;
    header.set_nonce(nonce);
    header.set_url(url.as_str());

    let encoded_header = base64(header.as_ref())?;
    let encoded_payload = base64(payload.as_ref())?;
    let signer = ES256.signer_from_pem(ec_key_pair.to_pem_private_key())?;
    let signature = signer.sign(format!("{encoded_header}.{encoded_payload}").as_bytes())?;
    let jwt_components = JwtComponents::new(encoded_header, encoded_payload, signature);
    Ok(serde_json::to_string(&jwt_components)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use josekit::jwk::alg::ec::EcCurve;
    use josekit::jws::JwsVerifier;
    use serde_json::Value;

    const NONCE: &str = "oFvnlFP1wIhRlYS2jTaXbA";

    fn decode(part: &Value) -> Result<Value, Box<dyn std::error::Error>> {
        let text = part.as_str().ok_or("not a string")?;
        Ok(serde_json::from_slice(&URL_SAFE_NO_PAD.decode(text)?)?)
    }

    #[test]
    fn test_create_jws_with_jwk() -> Result<(), Box<dyn std::error::Error>> {
        let ec_key_pair = EcKeyPair::generate(EcCurve::P256)?;
        let url = Url::parse("https://example.com/acme/new-acct")?;
        let mut payload = JwtPayload::new();
        payload.set_claim("termsOfServiceAgreed", Some(Value::Bool(true)))?;

        let body: Value = serde_json::from_str(&create_jws(NONCE, &payload, &url, &ec_key_pair)?)?;

        let protected = decode(&body["protected"])?;
        assert_eq!(protected["alg"], "ES256");
        assert_eq!(protected["nonce"], NONCE);
        assert_eq!(protected["url"], "https://example.com/acme/new-acct");
        assert_eq!(protected["jwk"]["crv"], "P-256");
        assert!(protected.get("kid").is_none());

        let claims = decode(&body["payload"])?;
        assert_eq!(claims["termsOfServiceAgreed"], true);
        Ok(())
    }

    #[test]
    fn test_create_jws_signature_verifies() -> Result<(), Box<dyn std::error::Error>> {
        let ec_key_pair = EcKeyPair::generate(EcCurve::P256)?;
        let url = Url::parse("https://example.com/acme/new-acct")?;
        let mut payload = JwtPayload::new();
        payload.set_claim("onlyReturnExisting", Some(Value::Bool(true)))?;

        let body: Value = serde_json::from_str(&create_jws(NONCE, &payload, &url, &ec_key_pair)?)?;

        let message = format!(
            "{}.{}",
            body["protected"].as_str().ok_or("protected")?,
            body["payload"].as_str().ok_or("payload")?
        );
        let signature = URL_SAFE_NO_PAD.decode(body["signature"].as_str().ok_or("signature")?)?;
        let verifier = ES256.verifier_from_jwk(&ec_key_pair.to_jwk_public_key())?;
        verifier.verify(message.as_bytes(), &signature)?;
        Ok(())
    }

    #[test]
    fn test_create_jws_rejects_bad_nonce() -> Result<(), Box<dyn std::error::Error>> {
        let ec_key_pair = EcKeyPair::generate(EcCurve::P256)?;
        let url = Url::parse("https://example.com/acme/new-acct")?;
        let result = create_jws("not base64!", &JwtPayload::new(), &url, &ec_key_pair);
        assert!(matches!(result, Err(AcmeErrors::DecodeError(_))));
        Ok(())
    }
}
