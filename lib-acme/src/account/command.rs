use std::path::{Path, PathBuf};

use super::errors::AccountError;
use super::key_store::{KeyMaterial, KeyStore};
use super::options::AccountAction;
use super::session::{DirectorySession, SessionFactory};
use super::validation::ValidatedOptions;
use crate::cert::types::AccountResource;
extern crate tracing;

/// Runs account actions against a directory, keeping the account key in a [`KeyStore`].
#[derive(Debug, Clone)]
pub struct AccountCommand<F, K> {
    factory: F,
    store: K,
}

impl<F, K> AccountCommand<F, K>
where
    F: SessionFactory,
    K: KeyStore,
{
    pub fn new(factory: F, store: K) -> Self {
        AccountCommand { factory, store }
    }

    /// Dispatches on `options.action`.
    ///
    /// `update` and `set` pass validation but have no handler and fail with
    /// [`AccountError::UnsupportedAction`] before touching the key or the network.
    pub async fn process(
        &self,
        options: &ValidatedOptions,
    ) -> Result<AccountResource, AccountError> {
        match options.action {
            AccountAction::Info => self.load_account_info(options).await,
            AccountAction::New => self.new_account(options).await,
            AccountAction::Update | AccountAction::Set => {
                Err(AccountError::UnsupportedAction(options.action))
            }
        }
    }

    /// Registers a new account and stores its key.
    ///
    /// An existing key is only replaced with `force`, and only after the
    /// directory has accepted the new account.
    async fn new_account(
        &self,
        options: &ValidatedOptions,
    ) -> Result<AccountResource, AccountError> {
        let path = options.key_path();
        if self.load_key(&path).await?.is_some() && !options.force {
            return Err(AccountError::KeyConflict(path));
        }

        let email = options.email().unwrap_or_default();
        tracing::debug!("Using ACME server {}.", options.server);
        let session = self.factory.open(&options.server, None).await?;

        tracing::debug!(
            "Creating new account, email='{}', agree='{}'",
            email,
            options.agree_tos
        );
        let account = session.create_account(email, options.agree_tos).await?;
        tracing::debug!("Created new account at {}", account.location());

        let key = session.account_key()?;
        self.save_key(path, &key).await?;
        Ok(account.resource())
    }

    async fn load_account_info(
        &self,
        options: &ValidatedOptions,
    ) -> Result<AccountResource, AccountError> {
        let path = options.key_path();
        let key = match self.load_key(&path).await? {
            Some(key) => key,
            None => return Err(AccountError::MissingKey(path)),
        };

        tracing::debug!("Using ACME server {}.", options.server);
        let session = self.factory.open(&options.server, Some(&key)).await?;
        let account = session.resolve_account().await?;
        tracing::debug!("Retrieve account at {}", account.location());
        Ok(account.resource())
    }

    async fn load_key(&self, path: &Path) -> Result<Option<KeyMaterial>, AccountError> {
        self.store
            .load(path)
            .await
            .map_err(|source| AccountError::KeyStore {
                path: path.to_path_buf(),
                source,
            })
    }

    async fn save_key(&self, path: PathBuf, key: &KeyMaterial) -> Result<(), AccountError> {
        self.store
            .save(&path, key)
            .await
            .map_err(|source| AccountError::KeyStore { path, source })
    }
}
