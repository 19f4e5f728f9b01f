//! Command implementations

pub(crate) mod auth;
pub(crate) mod common;
pub(crate) mod drizzle;
pub(crate) mod init;
pub(crate) mod reset;
