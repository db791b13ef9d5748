use std::path::PathBuf;

use thiserror::Error;

use super::options::AccountAction;
use crate::cert::errors::AcmeErrors;

/// Errors raised while running an account command.
///
/// # Variants
///
/// - `Configuration`: A validation rule rejected the options; carries the rule's message.
/// - `KeyConflict`: `new` found an account key and `--force` was not given. Nothing was changed.
/// - `MissingKey`: `info` found no account key. No request was sent.
/// - `UnsupportedAction`: The action parses and validates but has no handler yet.
/// - `KeyStore`: Reading or writing the account key file failed.
/// - `Session`: Errors from the directory session, passed through as they are.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("{0}")]
    Configuration(String),

    #[error(
        "An account key already exists at {}, use '--force' option to overwrite the existing key.",
        .0.display()
    )]
    KeyConflict(PathBuf),

    #[error("No account key is available at {}.", .0.display())]
    MissingKey(PathBuf),

    #[error("Account action '{0}' is not supported")]
    UnsupportedAction(AccountAction),

    #[error("Error in opening/reading account key {}: {source}", .path.display())]
    KeyStore {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Session(#[from] AcmeErrors),
}
