//! cachelink - serverless-style cache handlers
//!
//! Each entry point resolves configuration from its environment, retrieves a
//! credential from the secret store when one is configured, opens a fresh
//! connection to the cache service, performs SET/GET operations against a
//! well-known key, and logs each operation's outcome. Invocations are
//! independent: nothing is pooled or carried across them.

mod error;
pub mod handlers;

pub use error::HandlerError;
pub use handlers::{
    connect_with_credentials, handle_consume, handle_produce, handle_roundtrip, OpOutcome,
    OpReport, KEY_NAME, KEY_TIME, TIME_FORMAT,
};
