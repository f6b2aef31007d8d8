//! Tests for the info and open subcommands.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;

#[test]
fn cli_parse_info() {
    match parse(&["crec", "info", "https://x.com/u/status/1"]) {
        CliCommand::Info { url } => assert_eq!(url, "https://x.com/u/status/1"),
        _ => panic!("expected Info"),
    }
}

#[test]
fn cli_parse_open() {
    match parse(&["crec", "open"]) {
        CliCommand::Open => {}
        _ => panic!("expected Open"),
    }
}

#[test]
fn cli_rejects_unknown_subcommand() {
    assert!(Cli::try_parse_from(["crec", "frobnicate"]).is_err());
}

#[test]
fn cli_requires_url_for_get() {
    assert!(Cli::try_parse_from(["crec", "get"]).is_err());
}
