//! `uriresolve resolve <URI>` – resolve to a local path.

use anyhow::{Context, Result};
use std::path::PathBuf;
use uriresolve_core::checksum;
use uriresolve_core::config::ResolverConfig;
use uriresolve_core::{FsContentResolver, UriResolver};

#[derive(Debug)]
pub struct ResolveArgs {
    pub uri: String,
    pub content_root: Option<PathBuf>,
    pub files_dir: Option<PathBuf>,
    pub data_column: bool,
    pub json: bool,
    pub sha256: bool,
}

pub fn run_resolve(cfg: &ResolverConfig, args: &ResolveArgs) -> Result<()> {
    let mut cfg = cfg.clone();
    if let Some(dir) = &args.files_dir {
        cfg.files_dir = Some(dir.clone());
    }
    if args.data_column {
        cfg.data_column_lookup = true;
    }

    let content_root = match &args.content_root {
        Some(root) => root.clone(),
        None => cfg.content_root()?,
    };
    let content = FsContentResolver::new(content_root).with_data_column(cfg.data_column_lookup);
    let resolver = UriResolver::from_config(content, &cfg)?;

    let resolved = resolver
        .resolve_str(&args.uri)
        .with_context(|| format!("resolve {}", args.uri))?;

    let digest = match (args.sha256, resolved.local_path()) {
        (true, Some(path)) => Some(checksum::sha256_path(path)?),
        _ => None,
    };

    if args.json {
        let out = serde_json::json!({
            "uri": args.uri,
            "resolved": resolved,
            "sha256": digest,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{resolved}");
        if let Some(digest) = digest {
            println!("sha256 {digest}");
        }
    }
    Ok(())
}
