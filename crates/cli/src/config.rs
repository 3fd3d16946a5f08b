// Copyright (C) 2021-2025 The Symbol Toolkit Authors.
//
// config.rs file belongs to the symbol-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Toolkit configuration as seen by the CLI: file or network defaults, plus overrides.

use crate::args::CliArgs;
use anyhow::{Context, Result};
use symbol_config::{LogFormat, ToolkitConfig};
use tracing_subscriber::{fmt, EnvFilter};

/// Default filter when neither `RUST_LOG` nor the configuration sets one
pub const DEFAULT_LOG_FILTER: &str = "info,symbol=info";

/// Loads the configuration file, or the defaults of `--network`, and applies overrides
pub fn resolve_config(args: &CliArgs) -> Result<ToolkitConfig> {
    let mut config = match &args.config {
        Some(path) => ToolkitConfig::load(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => ToolkitConfig::for_network(args.network.into())
            .context("failed to build default configuration")?,
    };

    if let Some(node) = &args.node {
        config.network.node_url = node.clone();
    }
    if let Some(format) = args.log_format {
        config.logging.format = format.into();
    }
    Ok(config)
}

/// Filter directive: `RUST_LOG`, else the configured level, else [`DEFAULT_LOG_FILTER`]
pub fn log_filter(config: &ToolkitConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Installs the global subscriber writing to stderr; repeated calls are ignored
pub fn init_tracing(config: &ToolkitConfig) {
    let filter = log_filter(config);
    let builder = fmt().with_env_filter(filter).with_writer(std::io::stderr);
    let _ = match config.logging.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };
}
