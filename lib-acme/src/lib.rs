//! ACME account management.
//!
//! [`cert`] talks to an ACME directory: it fetches the directory resource,
//! signs requests and registers or looks up accounts. [`account`] sits on
//! top of it and runs one account command per invocation, guarding the
//! account key stored on disk.

pub mod account;
pub mod cert;
