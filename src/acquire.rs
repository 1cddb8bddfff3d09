use anyhow::Context;
use chrono::{DateTime, Local};
use log::{info, warn};

use crate::cache;
use crate::config::Config;
use crate::error::Error;
use crate::http_client::http_client;
use crate::platform::Platform;
use crate::stats::StatsRecord;

/// Whether the record came straight from the API or from the snapshot
/// cache. A cached record always carries the snapshot's mtime, so a
/// "live with timestamp" state cannot be represented.
#[derive(Debug, Clone, PartialEq)]
pub enum Freshness {
    Live,
    Cached(DateTime<Local>),
}

impl Freshness {
    pub fn is_live(&self) -> bool {
        matches!(self, Freshness::Live)
    }
}

#[derive(Debug, Clone)]
pub struct FetchResult {
    pub record: StatsRecord,
    pub freshness: Freshness,
}

/// Outcome of one API response, before the cache-fallback decision.
#[derive(Debug)]
pub enum ApiOutcome {
    /// 200 with `hasResults` true: the parsed record.
    Live(Box<StatsRecord>),
    /// 200 but the payload reports no results for this player.
    NoResults,
    /// 200 with a body that is not the expected JSON shape.
    Malformed,
    /// Anything other than 200.
    HttpError(u16),
}

/// Classify a response without touching the network or the filesystem.
pub fn classify_response(status: u16, body: &str) -> ApiOutcome {
    if status != 200 {
        return ApiOutcome::HttpError(status);
    }
    match StatsRecord::parse(body) {
        Ok(record) if record.has_results => ApiOutcome::Live(Box::new(record)),
        Ok(_) => ApiOutcome::NoResults,
        Err(_) => ApiOutcome::Malformed,
    }
}

/// Fetch the player's stats, preferring a live API response and falling
/// back to the last persisted snapshot. Exactly one attempt is made;
/// every API-side failure mode degrades to the cache rather than
/// surfacing.
pub fn acquire(config: &Config, player: &str, platform: Platform) -> Result<FetchResult, Error> {
    match fetch_live(config, player, platform) {
        Ok(ApiOutcome::Live(record)) => {
            return Ok(FetchResult {
                record: *record,
                freshness: Freshness::Live,
            });
        }
        Ok(ApiOutcome::NoResults) => warn!("no results for {player} on {platform}"),
        Ok(ApiOutcome::Malformed) => warn!("unexpected stats payload for {player}"),
        Ok(ApiOutcome::HttpError(status)) => warn!("stats API returned {status} for {player}"),
        Err(err) => warn!("stats API request failed for {player}: {err:#}"),
    }

    fall_back_to_cache(config, player, platform)
}

fn fetch_live(
    config: &Config,
    player: &str,
    platform: Platform,
) -> anyhow::Result<ApiOutcome> {
    let client = http_client()?;
    let resp = client
        .get(&config.api_url)
        .query(&[
            ("name", player),
            ("platform", platform.as_str()),
            ("categories", "multiplayer"),
        ])
        .send()
        .context("stats request failed")?;
    let status = resp.status().as_u16();
    let body = resp.text().context("failed reading stats body")?;

    let outcome = classify_response(status, &body);
    if let ApiOutcome::Live(_) = &outcome {
        // Persist the raw payload verbatim so fallback reads are
        // byte-identical to what the API sent. A failed write is not
        // worth failing the request over; the live data is in hand.
        if let Err(err) = cache::store_snapshot(&config.cache_dir, player, &body) {
            warn!("failed to persist snapshot for {player}: {err:#}");
        }
    }
    Ok(outcome)
}

fn fall_back_to_cache(
    config: &Config,
    player: &str,
    platform: Platform,
) -> Result<FetchResult, Error> {
    let Some(snapshot) = cache::load_snapshot(&config.cache_dir, player) else {
        return Err(Error::NoDataAvailable {
            player: player.to_string(),
            platform: platform.to_string(),
        });
    };
    let Ok(record) = StatsRecord::parse(&snapshot.body) else {
        warn!("cached snapshot for {player} is unreadable, discarding it as a fallback");
        return Err(Error::NoDataAvailable {
            player: player.to_string(),
            platform: platform.to_string(),
        });
    };
    info!(
        "serving cached stats for {player} (last update {})",
        snapshot.modified.format("%Y-%m-%d %H:%M:%S")
    );
    Ok(FetchResult {
        record,
        freshness: Freshness::Cached(snapshot.modified),
    })
}
