use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use url::Url;

use super::key_store::default_key_path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountAction {
    Info,
    New,
    Update,
    Set,
}

impl FromStr for AccountAction {
    type Err = String;

    /// Case-insensitive; hyphens are ignored, so `New`, `new` and `n-e-w` all match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.replace('-', "").to_ascii_lowercase().as_str() {
            "info" => Ok(AccountAction::Info),
            "new" => Ok(AccountAction::New),
            "update" => Ok(AccountAction::Update),
            "set" => Ok(AccountAction::Set),
            _ => Err(format!(
                "invalid account action '{s}' (expected one of: info, new, update, set)"
            )),
        }
    }
}

impl Display for AccountAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountAction::Info => write!(f, "info"),
            AccountAction::New => write!(f, "new"),
            AccountAction::Update => write!(f, "update"),
            AccountAction::Set => write!(f, "set"),
        }
    }
}

/// Everything one `account` invocation needs.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountOptions {
    pub action: AccountAction,
    /// Contact address used for registration and recovery.
    pub email: Option<String>,
    pub agree_tos: bool,
    /// ACME directory resource URI.
    pub server: Url,
    /// Account key file; [`default_key_path`] when absent.
    pub path: Option<PathBuf>,
    /// Allows `new` to replace an existing account key.
    pub force: bool,
    pub verbose: bool,
}

impl AccountOptions {
    pub fn new(action: AccountAction, server: Url) -> Self {
        AccountOptions {
            action,
            email: None,
            agree_tos: false,
            server,
            path: None,
            force: false,
            verbose: false,
        }
    }

    /// Email with surrounding whitespace removed, `None` when blank.
    pub fn email(&self) -> Option<&str> {
        self.email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
    }

    /// Key path given on the command line, `None` when empty or only whitespace.
    pub fn path(&self) -> Option<&PathBuf> {
        self.path
            .as_ref()
            .filter(|path| !path.to_string_lossy().trim().is_empty())
    }

    pub fn key_path(&self) -> PathBuf {
        self.path().cloned().unwrap_or_else(default_key_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_action() {
        assert_eq!("info".parse(), Ok(AccountAction::Info));
        assert_eq!("NEW".parse(), Ok(AccountAction::New));
        assert_eq!("Up-date".parse(), Ok(AccountAction::Update));
        assert_eq!("-set-".parse(), Ok(AccountAction::Set));
        assert!("delete".parse::<AccountAction>().is_err());
        assert!("".parse::<AccountAction>().is_err());
    }

    #[test]
    fn test_action_display_parses_back() {
        for action in [
            AccountAction::Info,
            AccountAction::New,
            AccountAction::Update,
            AccountAction::Set,
        ] {
            assert_eq!(action.to_string().parse(), Ok(action));
        }
    }

    #[test]
    fn test_blank_email_and_path_are_absent() -> Result<(), url::ParseError> {
        let mut options =
            AccountOptions::new(AccountAction::New, Url::parse("https://example.com/dir")?);
        options.email = Some("   ".to_string());
        options.path = Some(PathBuf::new());
        assert_eq!(options.email(), None);
        assert_eq!(options.path(), None);
        assert_eq!(options.key_path(), default_key_path());

        options.email = Some(" a@b.com ".to_string());
        options.path = Some(PathBuf::from("/tmp/account.pem"));
        assert_eq!(options.email(), Some("a@b.com"));
        assert_eq!(options.key_path(), PathBuf::from("/tmp/account.pem"));
        Ok(())
    }

    #[test]
    fn test_whitespace_path_is_absent() -> Result<(), url::ParseError> {
        let mut options =
            AccountOptions::new(AccountAction::Set, Url::parse("https://example.com/dir")?);
        options.path = Some(PathBuf::from("   "));
        assert_eq!(options.path(), None);
        assert_eq!(options.key_path(), default_key_path());

        options.path = Some(PathBuf::from(" account.pem"));
        assert_eq!(options.path(), Some(&PathBuf::from(" account.pem")));
        Ok(())
    }
}
