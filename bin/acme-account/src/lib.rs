use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use lib_acme::account::{AccountAction, AccountOptions};
use lib_acme::cert::errors::AcmeErrors;
use lib_acme::cert::types::Environment;
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct CliInput {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage ACME account.
    Account(AccountArgs),
}

#[derive(Args, Debug)]
pub struct AccountArgs {
    /// Account action: info, new, update or set.
    #[arg(value_parser = parse_action)]
    pub action: AccountAction,
    /// Email used for registration and recovery contact.
    #[arg(short = 'm', long)]
    pub email: Option<String>,
    /// Agree to the ACME Subscriber Agreement.
    #[arg(long)]
    pub agree_tos: bool,
    /// ACME Directory Resource URI.
    #[arg(short = 's', long, env = "ACME_SERVER")]
    pub server: Option<Url>,
    /// Let's Encrypt environment used when no server is given.
    #[arg(short = 'e', long, env, value_enum, default_value_t = Environment::Production)]
    pub environment: Environment,
    /// File path to the account key to use.
    #[arg(short = 'k', long = "key", env = "ACME_ACCOUNT_KEY")]
    pub path: Option<PathBuf>,
    /// Print process log.
    #[arg(short = 'v', long)]
    pub verbose: bool,
    /// Overwrite an existing account key.
    #[arg(short = 'f', long)]
    pub force: bool,
}

fn parse_action(action: &str) -> Result<AccountAction, String> {
    action.parse()
}

impl AccountArgs {
    pub fn into_options(self) -> Result<AccountOptions, AcmeErrors> {
        let server = match self.server {
            Some(server) => server,
            None => self.environment.directory_url()?,
        };
        Ok(AccountOptions {
            action: self.action,
            email: self.email,
            agree_tos: self.agree_tos,
            server,
            path: self.path,
            force: self.force,
            verbose: self.verbose,
        })
    }
}

/// Logs to stderr. `RUST_LOG` takes precedence over `verbose`.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
