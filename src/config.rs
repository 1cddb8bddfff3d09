use std::env;
use std::path::PathBuf;

const DEFAULT_API_URL: &str = "https://api.gametools.network/bf6/stats/";
const DEFAULT_ASSET_DIR: &str = "assets";
const CACHE_DIR_NAME: &str = "bf6_banner";

/// Fallback font locations probed after the themed fonts shipped with the
/// asset directory. Covers the common Debian/Fedora truetype layouts.
const SYSTEM_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
];

const THEMED_FONT_NAMES: &[&str] = &["squada-One.ttf", "impact.ttf", "Russo_One.ttf"];
const UI_FONT_NAMES: &[&str] = &["arial.ttf"];

/// Everything tunable about one banner request, passed explicitly so the
/// pipeline holds no module-level state.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub background_path: PathBuf,
    pub logo_path: PathBuf,
    /// Themed stats-panel fonts, probed in order.
    pub stats_font_paths: Vec<PathBuf>,
    /// Player-name and caption fonts, probed in order.
    pub ui_font_paths: Vec<PathBuf>,
    /// System fonts probed when a preference list comes up empty.
    pub fallback_font_paths: Vec<PathBuf>,
    pub cache_dir: PathBuf,
    pub out_dir: PathBuf,
}

impl Config {
    /// Build a config from `BF6_*` environment overrides with defaults
    /// matching the shipped asset layout.
    pub fn from_env() -> Self {
        let asset_dir = PathBuf::from(env_or("BF6_ASSET_DIR", DEFAULT_ASSET_DIR));
        let background_path = env::var("BF6_BANNER_BG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| asset_dir.join("bannerBackgroundImage.png"));
        let logo_path = env::var("BF6_BANNER_LOGO")
            .map(PathBuf::from)
            .unwrap_or_else(|_| asset_dir.join("logo_bf6.png"));

        let stats_font_paths = THEMED_FONT_NAMES
            .iter()
            .map(|name| asset_dir.join(name))
            .collect();
        let ui_font_paths = UI_FONT_NAMES
            .iter()
            .map(|name| asset_dir.join(name))
            .collect();
        let fallback_font_paths = SYSTEM_FONT_PATHS.iter().map(PathBuf::from).collect();

        let cache_dir = env::var("BF6_CACHE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_cache_dir());
        let out_dir = env::var("BF6_OUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        Self {
            api_url: env_or("BF6_API_URL", DEFAULT_API_URL),
            background_path,
            logo_path,
            stats_font_paths,
            ui_font_paths,
            fallback_font_paths,
            cache_dir,
            out_dir,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(val) if !val.trim().is_empty() => val,
        _ => default.to_string(),
    }
}

fn default_cache_dir() -> PathBuf {
    // Prefer XDG cache, then ~/.cache, then a local directory.
    if let Ok(base) = env::var("XDG_CACHE_HOME") {
        if !base.trim().is_empty() {
            return PathBuf::from(base).join(CACHE_DIR_NAME);
        }
    }
    if let Ok(home) = env::var("HOME") {
        if !home.trim().is_empty() {
            return PathBuf::from(home).join(".cache").join(CACHE_DIR_NAME);
        }
    }
    PathBuf::from(".bf6_cache")
}
