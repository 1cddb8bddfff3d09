pub mod acquire;
pub mod banner;
pub mod best_class;
pub mod cache;
pub mod config;
pub mod error;
pub mod fonts;
pub mod http_client;
pub mod platform;
pub mod stats;

use std::path::{Path, PathBuf};

use log::info;

use crate::acquire::{FetchResult, Freshness};
use crate::banner::AssetKind;
use crate::config::Config;
use crate::error::Error;
use crate::platform::Platform;

#[derive(Debug)]
pub struct GeneratedBanner {
    pub path: PathBuf,
    pub freshness: Freshness,
    pub degraded: Vec<AssetKind>,
}

/// The whole pipeline behind one invocation: validate the platform,
/// acquire stats (live or cached), composite the banner, write the PNG.
/// This is the single entry point for both the CLI and any bot
/// dispatcher wrapping it.
pub fn generate(
    config: &Config,
    player: &str,
    platform: &str,
    out: Option<&Path>,
) -> Result<GeneratedBanner, Error> {
    let platform: Platform = platform.parse()?;
    let FetchResult { record, freshness } = acquire::acquire(config, player, platform)?;
    let outcome = banner::render_banner(config, &record, &freshness, player)?;

    let path = match out {
        Some(path) => path.to_path_buf(),
        None => config
            .out_dir
            .join(format!("bf6_banner_{}.png", cache::cache_key(player))),
    };
    banner::save_banner(&outcome.image, &path)?;
    info!("banner for {player} written to {}", path.display());

    Ok(GeneratedBanner {
        path,
        freshness,
        degraded: outcome.degraded,
    })
}
