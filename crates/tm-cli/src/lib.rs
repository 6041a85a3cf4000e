//! tm-cli library
//!
//! This module exports the HTTP client for use in tests.

pub(crate) mod cli;
pub(crate) mod client;
pub(crate) mod commands;
pub(crate) mod credentials;
pub(crate) mod task_commands;

pub use client::{CliClientResult, Client, ClientError};
pub use credentials::{Credentials, CredentialsStore};
