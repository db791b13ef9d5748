use std::fmt;
use std::ops::Deref;

use super::errors::AccountError;
use super::options::{AccountAction, AccountOptions};

/// A precondition an action must satisfy before it is dispatched.
#[derive(Clone, Copy)]
pub struct ValidationRule {
    pub action: AccountAction,
    pub is_valid: fn(&AccountOptions) -> bool,
    pub message: &'static str,
}

impl fmt::Debug for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationRule")
            .field("action", &self.action)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

const ACCOUNT_RULES: &[ValidationRule] = &[
    ValidationRule {
        action: AccountAction::New,
        is_valid: |o| o.email().is_some(),
        message: "Please enter the admin email.",
    },
    ValidationRule {
        action: AccountAction::Update,
        is_valid: |o| o.email().is_some() || o.agree_tos,
        message: "Please enter the data to update.",
    },
    ValidationRule {
        action: AccountAction::Set,
        is_valid: |o| o.path().is_some(),
        message: "Please enter the key file path.",
    },
];

/// Read-only table of [`ValidationRule`]s.
///
/// Actions without a rule pass unchecked.
#[derive(Debug, Clone, Copy)]
pub struct ValidationRules {
    rules: &'static [ValidationRule],
}

impl Default for ValidationRules {
    fn default() -> Self {
        ValidationRules::new(ACCOUNT_RULES)
    }
}

impl ValidationRules {
    pub const fn new(rules: &'static [ValidationRule]) -> Self {
        ValidationRules { rules }
    }

    /// Message of the first rule registered for `options.action` that fails.
    pub fn check(&self, options: &AccountOptions) -> Option<&'static str> {
        self.rules
            .iter()
            .filter(|rule| rule.action == options.action)
            .find(|rule| !(rule.is_valid)(options))
            .map(|rule| rule.message)
    }

    pub fn validate(&self, options: AccountOptions) -> Result<ValidatedOptions, AccountError> {
        match self.check(&options) {
            Some(message) => Err(AccountError::Configuration(message.to_string())),
            None => Ok(ValidatedOptions(options)),
        }
    }
}

/// [`AccountOptions`] that passed [`ValidationRules::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedOptions(AccountOptions);

impl Deref for ValidatedOptions {
    type Target = AccountOptions;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
