// Copyright (C) 2021-2025 The Symbol Toolkit Authors.
//
// main.rs file belongs to the symbol-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use anyhow::Result;
use clap::Parser;
use symbol_cli::config::{init_tracing, resolve_config};
use symbol_cli::{commands, CliArgs, VERSION};
use tracing::{debug, info};

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    let config = resolve_config(&args)?;
    init_tracing(&config);

    info!(version = VERSION, node = %config.network.node_url, network = %config.network.network_type, "symbol-cli starting");
    debug!(command = ?args.command, "dispatching");

    let output = commands::execute(args.command, &config).await?;
    println!("{output}");
    Ok(())
}
