// Copyright (C) 2021-2025 The Symbol Toolkit Authors.
//
// lib.rs file belongs to the symbol-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Symbol toolkit command-line front end.
//!
//! The binary is a thin shell over [`symbol_rpc_client`]: every subcommand
//! resolves the toolkit configuration, talks to the configured node and
//! prints JSON on stdout. Logs go to stderr.

pub mod args;
pub mod commands;
pub mod config;

pub use args::{CliArgs, Command};

/// Version of the CLI
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
