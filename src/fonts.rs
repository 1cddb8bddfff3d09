use std::fs;
use std::path::{Path, PathBuf};

use ab_glyph::FontArc;
use log::debug;

use crate::config::Config;
use crate::error::Error;

/// Font handles for one render. The flags are false when the matching
/// preference list missed and a system fallback stood in.
pub struct BannerFonts {
    pub stats: FontArc,
    pub ui: FontArc,
    pub themed: bool,
    pub ui_preferred: bool,
}

/// Load the stats-panel and UI fonts from their preference lists.
///
/// A missed preference list degrades to the system fallbacks; no
/// loadable font anywhere is fatal, since every banner element past
/// the background is text.
pub fn load_banner_fonts(config: &Config) -> Result<BannerFonts, Error> {
    let preferred_stats = load_first(&config.stats_font_paths);
    let themed = preferred_stats.is_some();
    let stats = preferred_stats
        .or_else(|| load_first(&config.fallback_font_paths))
        .ok_or(Error::FontUnavailable)?;

    let preferred_ui = load_first(&config.ui_font_paths);
    let ui_preferred = preferred_ui.is_some();
    let ui = preferred_ui
        .or_else(|| load_first(&config.fallback_font_paths))
        .ok_or(Error::FontUnavailable)?;

    Ok(BannerFonts {
        stats,
        ui,
        themed,
        ui_preferred,
    })
}

fn load_first(paths: &[PathBuf]) -> Option<FontArc> {
    for path in paths {
        match try_load(path) {
            Some(font) => return Some(font),
            None => debug!("font not usable: {}", path.display()),
        }
    }
    None
}

fn try_load(path: &Path) -> Option<FontArc> {
    let bytes = fs::read(path).ok()?;
    FontArc::try_from_vec(bytes).ok()
}
