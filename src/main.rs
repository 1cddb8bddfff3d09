use std::error::Error as _;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use bf6_banner::acquire::Freshness;
use bf6_banner::banner::AssetKind;
use bf6_banner::config::Config;
use bf6_banner::error::Error;

/// Render a Battlefield 6 stats banner for a player, falling back to
/// the last cached stats when the API is unavailable.
#[derive(Debug, Parser)]
#[command(name = "bf6_banner", version)]
struct Cli {
    /// Player name as known to the stats API.
    player: String,

    /// Platform: pc, xboxone, ps4, xboxseries, ps5, xbox, psn.
    #[arg(default_value = "pc")]
    platform: String,

    /// Output path; defaults to bf6_banner_<key>.png in the out dir.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> ExitCode {
    sensible_env_logger::init!();
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = Config::from_env();

    println!("Looking up stats for {} on {}...", cli.player, cli.platform);

    match bf6_banner::generate(&config, &cli.player, &cli.platform, cli.out.as_deref()) {
        Ok(generated) => {
            if let Freshness::Cached(stamp) = &generated.freshness {
                println!(
                    "API unavailable, rendered from cache (last update {})",
                    stamp.format("%Y-%m-%d %H:%M:%S")
                );
            }
            for asset in &generated.degraded {
                let what = match asset {
                    AssetKind::Logo => "logo missing",
                    AssetKind::ClassIcon => "class icon unavailable",
                    AssetKind::ThemedFont => "themed font missing, using system font",
                    AssetKind::UiFont => "name font missing, using system font",
                };
                println!("note: {what}");
            }
            println!("{}", generated.path.display());
            ExitCode::SUCCESS
        }
        Err(err @ (Error::InvalidPlatform { .. } | Error::NoDataAvailable { .. })) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("error: {err}");
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}
