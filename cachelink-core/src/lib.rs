//! Core types for cachelink
//!
//! This crate provides the configuration and invocation types shared by all
//! cachelink handler entry points.

pub mod config;
pub mod invocation;

pub use config::{ConfigError, HandlerConfig};
pub use invocation::{InvocationContext, InvocationEvent};
