use super::errors::AcmeErrors;
use base64::prelude::{Engine, BASE64_URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Deserialize;
use serde::Serialize;
use serde_with::{serde_as, DisplayFromStr};
use std::fmt::Display;
use url::Url;

const LETS_ENCRYPT_PRODUCTION: &str = "https://acme-v02.api.letsencrypt.org/directory";
const LETS_ENCRYPT_STAGING: &str = "https://acme-staging-v02.api.letsencrypt.org/directory";

#[serde_as]
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryUrls {
    #[serde_as(as = "DisplayFromStr")]
    pub new_nonce: Url,
    #[serde_as(as = "DisplayFromStr")]
    pub new_account: Url,
    #[serde_as(as = "DisplayFromStr")]
    pub new_order: Url,
    // Optional fields use the same approach but wrapped in Option
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub new_authz: Option<Url>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub revoke_cert: Option<Url>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub key_change: Option<Url>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub renewal_info: Option<Url>,
    #[serde(default)]
    pub meta: Option<DirectoryMeta>,
}

/// Optional metadata a directory publishes about itself.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms_of_service: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub caa_identities: Vec<String>,
    #[serde(default)]
    pub external_account_required: bool,
}

pub(crate) fn base64(data: &impl Serialize) -> Result<String, AcmeErrors> {
    Ok(BASE64_URL_SAFE_NO_PAD.encode(serde_json::to_vec(data)?))
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ValueEnum)]
pub enum Environment {
    Staging,
    Production,
}
impl Environment {
    /// Directory URL of the Let's Encrypt v2 endpoint for this environment.
    pub fn directory_url(&self) -> Result<Url, AcmeErrors> {
        let url = match self {
            Environment::Staging => LETS_ENCRYPT_STAGING,
            Environment::Production => LETS_ENCRYPT_PRODUCTION,
        };
        Ok(Url::parse(url)?)
    }
}
impl Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Valid,
    Deactivated,
    Revoked,
}

/// Account object as the directory returns it in a response body.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountObject {
    pub status: AccountStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contact: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms_of_service_agreed: Option<bool>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orders: Option<Url>,
}

/// An account registered with a directory, together with its location.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AccountResource {
    #[serde_as(as = "DisplayFromStr")]
    pub location: Url,
    #[serde(flatten)]
    pub account: AccountObject,
}

/// Problem document (RFC 7807) sent by the directory on failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct Problem {
    #[serde(rename = "type", default)]
    pub(crate) kind: String,
    #[serde(default)]
    pub(crate) detail: String,
}

/// Renewal information for a certificate (ARI).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RenewalInfo {
    #[serde(rename = "suggestedWindow")]
    pub suggested_window: SuggestedWindow,
    #[serde(
        rename = "explanationURL",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub explanation_url: Option<String>,
}

/// Recommended renewal window for a certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct SuggestedWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}
