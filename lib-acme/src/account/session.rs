use async_trait::async_trait;
use url::Url;

use super::key_store::KeyMaterial;
use crate::cert::errors::AcmeErrors;
use crate::cert::types::{AccountObject, AccountResource};

/// An account registered with a directory, as seen by one session.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountContext {
    location: Url,
    account: AccountObject,
}

impl AccountContext {
    pub fn new(location: Url, account: AccountObject) -> Self {
        AccountContext { location, account }
    }

    pub fn location(&self) -> &Url {
        &self.location
    }

    pub fn resource(&self) -> AccountResource {
        AccountResource {
            location: self.location.clone(),
            account: self.account.clone(),
        }
    }
}

/// A connection to one ACME directory, signing with one account key.
#[async_trait]
pub trait DirectorySession: Send + Sync {
    /// Key the session signs with, either the one it was opened with or a
    /// freshly generated one.
    fn account_key(&self) -> Result<KeyMaterial, AcmeErrors>;

    /// Registers a new account for the session key.
    async fn create_account(
        &self,
        email: &str,
        agree_tos: bool,
    ) -> Result<AccountContext, AcmeErrors>;

    /// Looks up the account already registered for the session key.
    async fn resolve_account(&self) -> Result<AccountContext, AcmeErrors>;
}

/// Opens [`DirectorySession`]s.
#[async_trait]
pub trait SessionFactory: Send + Sync {
    type Session: DirectorySession;

    /// Binds a session to `server`. Without `key`, the session generates one.
    async fn open(
        &self,
        server: &Url,
        key: Option<&KeyMaterial>,
    ) -> Result<Self::Session, AcmeErrors>;
}
