use clap::Parser;
use symbol_cli::args::{AnnounceGroupArg, GroupArg, LogFormatArg, NetworkArg};
use symbol_cli::{CliArgs, Command};

#[test]
fn transactions_defaults() {
    let args = CliArgs::try_parse_from(["symbol-cli", "transactions", "TAX"]).expect("parse");
    assert_eq!(args.network, NetworkArg::Mainnet);
    assert!(args.config.is_none());
    assert_eq!(
        args.command,
        Command::Transactions {
            address: "TAX".to_string(),
            group: GroupArg::Confirmed,
            page: 1,
            page_size: 10,
        }
    );
}

#[test]
fn global_options_follow_the_subcommand() {
    let args = CliArgs::try_parse_from([
        "symbol-cli",
        "account",
        "TAX",
        "--network",
        "testnet",
        "--node",
        "http://localhost:3000",
        "--log-format",
        "json",
    ])
    .expect("parse");
    assert_eq!(args.network, NetworkArg::Testnet);
    assert_eq!(args.node.unwrap().as_str(), "http://localhost:3000/");
    assert_eq!(args.log_format, Some(LogFormatArg::Json));
}

#[test]
fn failed_group_is_not_offered() {
    let result = CliArgs::try_parse_from(["symbol-cli", "transactions", "TAX", "--group", "failed"]);
    assert!(result.is_err());
}

#[test]
fn announce_to_partial() {
    let args = CliArgs::try_parse_from(["symbol-cli", "announce", "AABB", "CCDD", "--group", "partial"])
        .expect("parse");
    match args.command {
        Command::Announce { payload, hash, group } => {
            assert_eq!(payload, "AABB");
            assert_eq!(hash, "CCDD");
            assert_eq!(group, AnnounceGroupArg::Partial);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn subcommand_is_required() {
    assert!(CliArgs::try_parse_from(["symbol-cli"]).is_err());
}
