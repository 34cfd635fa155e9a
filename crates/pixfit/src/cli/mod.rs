//! Command implementations for the pixfit CLI.

pub mod config;
pub mod convert;
