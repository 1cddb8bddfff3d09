use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use sha2::{Digest, Sha256};

const SLUG_MAX_LEN: usize = 40;

/// A previously persisted raw API payload plus its filesystem mtime,
/// which doubles as the freshness timestamp on fallback.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub body: String,
    pub modified: DateTime<Local>,
}

/// Derive a filesystem-safe cache key from an arbitrary player name.
///
/// The slug keeps the name recognizable; the sha256 suffix keeps two
/// names that sanitize identically from sharing a snapshot file.
pub fn cache_key(player: &str) -> String {
    let mut slug: String = player
        .chars()
        .filter_map(|ch| {
            if ch.is_ascii_alphanumeric() {
                Some(ch.to_ascii_lowercase())
            } else if ch == '_' || ch == '-' {
                Some(ch)
            } else {
                None
            }
        })
        .take(SLUG_MAX_LEN)
        .collect();
    if slug.is_empty() {
        slug.push_str("player");
    }

    let digest = Sha256::digest(player.as_bytes());
    let mut hash8 = String::with_capacity(8);
    for byte in &digest[..4] {
        hash8.push_str(&format!("{byte:02x}"));
    }

    format!("{slug}-{hash8}")
}

pub fn snapshot_path(cache_dir: &Path, player: &str) -> PathBuf {
    cache_dir.join(format!("last_stats_{}.json", cache_key(player)))
}

/// Persist the raw API body verbatim, overwriting any prior snapshot.
/// The tmp-then-rename dance keeps a concurrent reader (or a racing
/// writer for the same player) from ever observing a torn file.
pub fn store_snapshot(cache_dir: &Path, player: &str, body: &str) -> Result<()> {
    fs::create_dir_all(cache_dir)
        .with_context(|| format!("create cache dir {}", cache_dir.display()))?;
    let path = snapshot_path(cache_dir, player);
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, body).with_context(|| format!("write snapshot {}", tmp.display()))?;
    fs::rename(&tmp, &path).with_context(|| format!("swap snapshot {}", path.display()))?;
    Ok(())
}

/// Load the most recent snapshot for this player, if one was ever
/// written. Snapshots are never expired; any age is a valid fallback.
pub fn load_snapshot(cache_dir: &Path, player: &str) -> Option<Snapshot> {
    let path = snapshot_path(cache_dir, player);
    let body = fs::read_to_string(&path).ok()?;
    let modified = fs::metadata(&path).ok()?.modified().ok()?;
    Some(Snapshot {
        body,
        modified: DateTime::<Local>::from(modified),
    })
}
