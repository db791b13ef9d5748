pub mod acme;
pub(crate) mod create_jws;
pub mod errors;
pub(crate) mod http_request;
pub mod types;
