//! Tests for the resolve subcommand.

use super::parse;
use clap::Parser;
use crate::cli::CliCommand;
use std::path::Path;

#[test]
fn cli_parse_resolve() {
    match parse(&["uriresolve", "resolve", "content://media/external/images/media/7"]) {
        CliCommand::Resolve {
            uri,
            content_root,
            files_dir,
            data_column,
            json,
            sha256,
        } => {
            assert_eq!(uri, "content://media/external/images/media/7");
            assert!(content_root.is_none());
            assert!(files_dir.is_none());
            assert!(!data_column);
            assert!(!json);
            assert!(!sha256);
        }
        _ => panic!("expected Resolve"),
    }
}

#[test]
fn cli_parse_resolve_all_flags() {
    match parse(&[
        "uriresolve",
        "resolve",
        "file:///a/b.jpg",
        "--content-root",
        "/srv/content",
        "--files-dir",
        "/tmp/files",
        "--data-column",
        "--json",
        "--sha256",
    ]) {
        CliCommand::Resolve {
            uri,
            content_root,
            files_dir,
            data_column,
            json,
            sha256,
        } => {
            assert_eq!(uri, "file:///a/b.jpg");
            assert_eq!(content_root.as_deref(), Some(Path::new("/srv/content")));
            assert_eq!(files_dir.as_deref(), Some(Path::new("/tmp/files")));
            assert!(data_column);
            assert!(json);
            assert!(sha256);
        }
        _ => panic!("expected Resolve with flags"),
    }
}

#[test]
fn cli_parse_resolve_requires_uri() {
    assert!(crate::cli::Cli::try_parse_from(["uriresolve", "resolve"]).is_err());
}
