//! Account lifecycle commands.
//!
//! Options are checked against a [`ValidationRules`] table exactly once,
//! which yields [`ValidatedOptions`]; only those reach the
//! [`AccountCommand`] dispatcher, which loads the account key, opens a
//! directory session and runs the requested action.

pub mod command;
pub mod errors;
pub mod key_store;
pub mod options;
pub mod session;
pub mod validation;

pub use command::AccountCommand;
pub use errors::AccountError;
pub use key_store::{default_key_path, FileKeyStore, KeyMaterial, KeyStore};
pub use options::{AccountAction, AccountOptions};
pub use session::{AccountContext, DirectorySession, SessionFactory};
pub use validation::{ValidatedOptions, ValidationRule, ValidationRules};

use crate::cert::types::AccountResource;

/// Validates `options` and runs the requested account action.
pub async fn process<F, K>(
    options: AccountOptions,
    rules: &ValidationRules,
    factory: F,
    store: K,
) -> Result<AccountResource, AccountError>
where
    F: SessionFactory,
    K: KeyStore,
{
    let options = rules.validate(options)?;
    AccountCommand::new(factory, store).process(&options).await
}
