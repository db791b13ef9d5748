use std::fmt::Display;
use std::process::ExitCode;

use acme_account::{init_logging, CliInput, Command};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use lib_acme::account::{AccountCommand, AccountError, FileKeyStore, ValidationRules};
use lib_acme::cert::acme::AcmeSessionFactory;
use lib_acme::cert::errors::AcmeErrors;

/// Reports `message` the way clap reports bad arguments, with the usage of
/// the `account` subcommand, and exits with code 2.
fn usage_error(message: impl Display) -> ! {
    let mut cli = CliInput::command();
    cli.build();
    match cli.find_subcommand_mut("account") {
        Some(account) => account.error(ErrorKind::ValueValidation, message).exit(),
        None => cli.error(ErrorKind::ValueValidation, message).exit(),
    }
}

async fn run(args: CliInput) -> Result<(), AccountError> {
    let Command::Account(args) = args.command;

    let rules = ValidationRules::default();
    let options = match rules.validate(args.into_options()?) {
        Ok(options) => options,
        Err(e) => usage_error(e),
    };
    init_logging(options.verbose);

    let command = AccountCommand::new(AcmeSessionFactory::default(), FileKeyStore);
    let resource = command.process(&options).await?;
    let output = serde_json::to_string_pretty(&resource).map_err(AcmeErrors::from)?;
    println!("{output}");

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(CliInput::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
