//! Qlay command-line interface.
//!
//! The `qlay` binary is a thin wrapper over [`cli::Cli`] and the
//! [`commands`] modules, kept in a library so they can be tested.

pub mod cli;
pub mod commands;
