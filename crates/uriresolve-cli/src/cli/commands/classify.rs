//! `uriresolve classify <URI>` – print the provider kind.

use anyhow::Result;
use uriresolve_core::config::ResolverConfig;
use uriresolve_core::{ContentUri, ProviderKind};

pub fn run_classify(cfg: &ResolverConfig, uri: &str) -> Result<()> {
    let uri = ContentUri::parse(uri)?;
    let kind = ProviderKind::classify(&uri, &cfg.sharing_authority(), cfg.document_uris);
    println!("{kind}");
    Ok(())
}
