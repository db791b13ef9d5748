use async_trait::async_trait;
use josekit::jwk::alg::ec::{EcCurve, EcKeyPair};
use josekit::jwt::JwtPayload;
use reqwest::header::LOCATION;
use reqwest::{Client, Response};
use serde_json::Value;
use url::Url;
extern crate tracing;
use super::errors::AcmeErrors;
use super::http_request::post;
use super::types::AccountObject;
use super::{create_jws::create_jws, types::DirectoryUrls};
use crate::account::{AccountContext, DirectorySession, KeyMaterial, SessionFactory};

const REPLAY_NONCE: &str = "replay-nonce";

pub async fn new_directory(client: &Client, dir_url: &Url) -> Result<DirectoryUrls, AcmeErrors> {
    tracing::trace!("Fetching directory {}", dir_url);
    let response = client.get(dir_url.clone()).send().await?.error_for_status()?;
    Ok(response.json().await?)
}

pub async fn new_nonce(client: &Client, url: &Url) -> Result<String, AcmeErrors> {
    let response = client.head(url.clone()).send().await?;
    let nonce = response
        .headers()
        .get(REPLAY_NONCE)
        .ok_or(AcmeErrors::MissingNonce)?
        .to_str()?
        .to_owned();
    Ok(nonce)
}

/// Registers an account for `ec_key_pair`.
pub async fn new_account(
    client: &Client,
    urls: &DirectoryUrls,
    contact_mail: &str,
    agree_tos: bool,
    ec_key_pair: &EcKeyPair,
) -> Result<AccountContext, AcmeErrors> {
    let mut payload = JwtPayload::new();
    payload.set_claim("termsOfServiceAgreed", Some(Value::Bool(agree_tos)))?;
    let contact = if contact_mail.starts_with("mailto:") {
        contact_mail.to_string()
    } else {
        format!("mailto:{contact_mail}")
    };
    payload.set_claim("contact", Some(Value::Array(vec![Value::String(contact)])))?;
    post_new_account(client, urls, &payload, ec_key_pair).await
}

/// Finds the account already registered for `ec_key_pair`.
pub async fn existing_account(
    client: &Client,
    urls: &DirectoryUrls,
    ec_key_pair: &EcKeyPair,
) -> Result<AccountContext, AcmeErrors> {
    let mut payload = JwtPayload::new();
    payload.set_claim("onlyReturnExisting", Some(Value::Bool(true)))?;
    post_new_account(client, urls, &payload, ec_key_pair).await
}

async fn post_new_account(
    client: &Client,
    urls: &DirectoryUrls,
    payload: &JwtPayload,
    ec_key_pair: &EcKeyPair,
) -> Result<AccountContext, AcmeErrors> {
    let nonce = new_nonce(client, &urls.new_nonce).await?;
    let body = create_jws(&nonce, payload, &urls.new_account, ec_key_pair)?;
    let response = post(client, &urls.new_account, body).await?;
    account_context(response).await
}

async fn account_context(response: Response) -> Result<AccountContext, AcmeErrors> {
    let location = response
        .headers()
        .get(LOCATION)
        .ok_or(AcmeErrors::MissingLocationHeader)?
        .to_str()?;
    let location = Url::parse(location)?;
    let account: AccountObject = response.json().await?;
    Ok(AccountContext::new(location, account))
}

/// Session against one ACME directory.
#[derive(Debug, Clone)]
pub struct AcmeSession {
    client: Client,
    urls: DirectoryUrls,
    ec_key_pair: EcKeyPair,
}

#[async_trait]
impl DirectorySession for AcmeSession {
    fn account_key(&self) -> Result<KeyMaterial, AcmeErrors> {
        let pem = String::from_utf8(self.ec_key_pair.to_pem_private_key())
            .map_err(|_| AcmeErrors::ConversionError)?;
        Ok(KeyMaterial::from_pem(pem))
    }

    async fn create_account(
        &self,
        email: &str,
        agree_tos: bool,
    ) -> Result<AccountContext, AcmeErrors> {
        new_account(&self.client, &self.urls, email, agree_tos, &self.ec_key_pair).await
    }

    async fn resolve_account(&self) -> Result<AccountContext, AcmeErrors> {
        existing_account(&self.client, &self.urls, &self.ec_key_pair).await
    }
}

/// Opens [`AcmeSession`]s over HTTPS. Account keys are ECDSA P-256.
#[derive(Debug, Clone, Default)]
pub struct AcmeSessionFactory {
    client: Client,
}

impl AcmeSessionFactory {
    pub fn new(client: Client) -> Self {
        AcmeSessionFactory { client }
    }
}

#[async_trait]
impl SessionFactory for AcmeSessionFactory {
    type Session = AcmeSession;

    async fn open(
        &self,
        server: &Url,
        key: Option<&KeyMaterial>,
    ) -> Result<AcmeSession, AcmeErrors> {
        let ec_key_pair = match key {
            Some(key) => EcKeyPair::from_pem(key.as_pem(), Some(EcCurve::P256))?,
            None => EcKeyPair::generate(EcCurve::P256)?,
        };
        let urls = new_directory(&self.client, server).await?;
        Ok(AcmeSession {
            client: self.client.clone(),
            urls,
            ec_key_pair,
        })
    }
}
