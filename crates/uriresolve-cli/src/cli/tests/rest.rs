//! Tests for share, classify and completions.

use super::parse;
use clap::Parser;
use crate::cli::CliCommand;
use clap_complete::Shell;
use std::path::Path;

#[test]
fn cli_parse_share() {
    match parse(&["uriresolve", "share", "/pictures/a.jpg"]) {
        CliCommand::Share { path } => assert_eq!(path, Path::new("/pictures/a.jpg")),
        _ => panic!("expected Share"),
    }
}

#[test]
fn cli_parse_classify() {
    match parse(&["uriresolve", "classify", "content://downloads/public_downloads/1"]) {
        CliCommand::Classify { uri } => {
            assert_eq!(uri, "content://downloads/public_downloads/1")
        }
        _ => panic!("expected Classify"),
    }
}

#[test]
fn cli_parse_completions() {
    match parse(&["uriresolve", "completions", "bash"]) {
        CliCommand::Completions { shell } => assert_eq!(shell, Shell::Bash),
        _ => panic!("expected Completions"),
    }
}

#[test]
fn cli_rejects_unknown_subcommand() {
    assert!(crate::cli::Cli::try_parse_from(["uriresolve", "add", "x"]).is_err());
}

#[test]
fn cli_definition_is_consistent() {
    use clap::CommandFactory;
    crate::cli::Cli::command().debug_assert();
}
