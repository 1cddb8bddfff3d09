use std::path::Path;

use ab_glyph::{FontArc, PxScale};
use anyhow::Context;
use image::imageops::{self, FilterType};
use image::{Pixel, Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use log::{debug, warn};

use crate::acquire::Freshness;
use crate::best_class::resolve_stats;
use crate::config::Config;
use crate::error::Error;
use crate::fonts::load_banner_fonts;
use crate::http_client::http_client;
use crate::stats::StatsRecord;

pub const BANNER_WIDTH: u32 = 800;
pub const BANNER_HEIGHT: u32 = 200;

const MARGIN: u32 = 20;
const OVERLAY_ALPHA: u8 = 120;
const LOGO_WIDTH: u32 = 150;
const PANEL_TOP: u32 = 20;
const PANEL_HEIGHT: u32 = 120;
const PANEL_OPACITY: u8 = 90;
const BLUR_SIGMA: f32 = 6.0;
const STATS_PX: f32 = 24.0;
const NAME_PX: f32 = 28.0;
const CAPTION_PX: f32 = 18.0;
const LINE_SPACING: i32 = 5;
const SHADOW_OFFSET: i32 = 2;
const ICON_SIZE: u32 = 40;

const TEXT_COLOR: Rgba<u8> = Rgba([240, 240, 240, 255]);
const SHADOW_COLOR: Rgba<u8> = Rgba([0, 0, 0, 200]);
const NAME_LIVE_COLOR: Rgba<u8> = Rgba([200, 220, 255, 255]);
const NAME_OFFLINE_COLOR: Rgba<u8> = Rgba([255, 120, 120, 255]);
const CAPTION_COLOR: Rgba<u8> = Rgba([200, 200, 200, 255]);

/// Optional assets whose absence degrades the banner instead of
/// aborting the render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Logo,
    ClassIcon,
    ThemedFont,
    UiFont,
}

#[derive(Debug)]
pub struct RenderOutcome {
    pub image: RgbaImage,
    /// Which optional assets were missing for this render.
    pub degraded: Vec<AssetKind>,
}

/// Composite the stats banner. Only two conditions abort: an unreadable
/// background template and a complete absence of usable fonts. Every
/// other asset miss is recorded in `degraded` and rendered around.
pub fn render_banner(
    config: &Config,
    record: &StatsRecord,
    freshness: &Freshness,
    player: &str,
) -> Result<RenderOutcome, Error> {
    let mut degraded = Vec::new();

    let background =
        image::open(&config.background_path).map_err(|source| Error::TemplateMissing {
            path: config.background_path.clone(),
            source,
        })?;
    let mut banner = background
        .resize_exact(BANNER_WIDTH, BANNER_HEIGHT, FilterType::Lanczos3)
        .to_rgba8();

    // Uniform dark overlay for text legibility.
    blend_fill(&mut banner, Rgba([0, 0, 0, OVERLAY_ALPHA]));

    let fonts = load_banner_fonts(config)?;
    if !fonts.themed {
        degraded.push(AssetKind::ThemedFont);
    }
    if !fonts.ui_preferred {
        degraded.push(AssetKind::UiFont);
    }

    // Logo at a fixed width, aspect preserved. Missing logo collapses
    // the reserved width so the stats panel slides left.
    let logo_width = match image::open(&config.logo_path) {
        Ok(logo) => {
            let scaled_height = (logo.height() * LOGO_WIDTH / logo.width().max(1)).max(1);
            let logo = logo
                .resize_exact(LOGO_WIDTH, scaled_height, FilterType::Lanczos3)
                .to_rgba8();
            imageops::overlay(&mut banner, &logo, MARGIN as i64, MARGIN as i64);
            LOGO_WIDTH
        }
        Err(err) => {
            warn!("banner logo unavailable ({}): {err}", config.logo_path.display());
            degraded.push(AssetKind::Logo);
            0
        }
    };

    // Panel geometry hangs off the logo width, so the previous step is
    // load-bearing for everything below.
    let panel_x = MARGIN + logo_width + MARGIN;
    let panel_y = PANEL_TOP;
    let panel_width = BANNER_WIDTH.saturating_sub(panel_x + MARGIN);

    // Frosted glass: blur the banner as composited so far (not the raw
    // background), then paste the panel-sized crop back at partial
    // opacity.
    let blurred = imageops::blur(&banner, BLUR_SIGMA);
    let frosted = imageops::crop_imm(&blurred, panel_x, panel_y, panel_width, PANEL_HEIGHT)
        .to_image();
    blend_paste(&mut banner, &frosted, panel_x, panel_y, PANEL_OPACITY);

    let resolved = resolve_stats(record);

    // Nine stat lines, three columns, round-robin by index.
    let col_width = panel_width / 3;
    for (i, (label, value)) in resolved.lines.iter().enumerate() {
        let (x, y) = stat_line_origin(i, panel_x, panel_y, col_width);
        draw_text_with_shadow(
            &mut banner,
            x,
            y,
            &format!("{label}: {value}"),
            &fonts.stats,
            STATS_PX,
            TEXT_COLOR,
        );
    }

    // Time played, measured and anchored bottom-right.
    let time_text = format!("Time Played: {}", resolved.time_played);
    let (time_w, time_h) = text_size(PxScale::from(STATS_PX), &fonts.stats, &time_text);
    let time_x = BANNER_WIDTH as i32 - time_w as i32 - MARGIN as i32;
    let time_y = BANNER_HEIGHT as i32 - time_h as i32 - 10;
    draw_text_with_shadow(
        &mut banner,
        time_x,
        time_y,
        &time_text,
        &fonts.stats,
        STATS_PX,
        TEXT_COLOR,
    );

    // Player name bottom-left, marked and recolored when offline.
    let name_text = if freshness.is_live() {
        player.to_string()
    } else {
        format!("{player} [OFFLINE]")
    };
    let name_color = if freshness.is_live() {
        NAME_LIVE_COLOR
    } else {
        NAME_OFFLINE_COLOR
    };
    let (name_w, name_h) = text_size(PxScale::from(NAME_PX), &fonts.ui, &name_text);
    let name_x = MARGIN as i32;
    let name_y = time_y;
    draw_text_with_shadow(
        &mut banner,
        name_x,
        name_y,
        &name_text,
        &fonts.ui,
        NAME_PX,
        name_color,
    );

    // Best-class icon right of the name, strictly best-effort.
    if let Some(url) = &resolved.icon_url {
        match fetch_icon(url) {
            Ok(icon) => {
                let icon_x = (name_x + name_w as i32 + 10) as i64;
                let icon_y = (name_y - 5) as i64;
                imageops::overlay(&mut banner, &icon, icon_x, icon_y);
            }
            Err(err) => {
                debug!("class icon fetch failed ({url}): {err:#}");
                degraded.push(AssetKind::ClassIcon);
            }
        }
    }

    if let Freshness::Cached(stamp) = freshness {
        let caption = format!("Last update: {}", stamp.format("%Y-%m-%d %H:%M:%S"));
        draw_text_with_shadow(
            &mut banner,
            name_x,
            name_y + name_h as i32 + 5,
            &caption,
            &fonts.ui,
            CAPTION_PX,
            CAPTION_COLOR,
        );
    }

    Ok(RenderOutcome {
        image: banner,
        degraded,
    })
}

/// Save a rendered banner as PNG.
pub fn save_banner(image: &RgbaImage, path: &Path) -> Result<(), Error> {
    image.save(path).map_err(|source| Error::WriteBanner {
        path: path.to_path_buf(),
        source,
    })
}

/// Top-left origin of stat line `index`: column `index % 3`, rows
/// stacking downward within each column.
fn stat_line_origin(index: usize, panel_x: u32, panel_y: u32, col_width: u32) -> (i32, i32) {
    let col = (index % 3) as u32;
    let row = (index / 3) as i32;
    let x = (panel_x + col * col_width) as i32;
    let y = panel_y as i32 + 10 + row * (STATS_PX as i32 + LINE_SPACING);
    (x, y)
}

/// Shadow first, fill second, offset by two pixels.
fn draw_text_with_shadow(
    canvas: &mut RgbaImage,
    x: i32,
    y: i32,
    text: &str,
    font: &FontArc,
    size: f32,
    fill: Rgba<u8>,
) {
    let scale = PxScale::from(size);
    draw_text_mut(
        canvas,
        SHADOW_COLOR,
        x + SHADOW_OFFSET,
        y + SHADOW_OFFSET,
        scale,
        font,
        text,
    );
    draw_text_mut(canvas, fill, x, y, scale, font, text);
}

/// Alpha-blend a uniform color over every pixel.
fn blend_fill(canvas: &mut RgbaImage, color: Rgba<u8>) {
    for px in canvas.pixels_mut() {
        px.blend(&color);
    }
}

/// Paste `src` over the canvas at a constant opacity, ignoring the
/// source's own alpha channel.
fn blend_paste(canvas: &mut RgbaImage, src: &RgbaImage, left: u32, top: u32, opacity: u8) {
    for (x, y, px) in src.enumerate_pixels() {
        let Some(dst) = canvas.get_pixel_mut_checked(left + x, top + y) else {
            continue;
        };
        dst.blend(&Rgba([px.0[0], px.0[1], px.0[2], opacity]));
    }
}

fn fetch_icon(url: &str) -> anyhow::Result<RgbaImage> {
    let client = http_client()?;
    let resp = client
        .get(url)
        .send()
        .context("icon request failed")?
        .error_for_status()
        .context("icon request rejected")?;
    let bytes = resp.bytes().context("failed reading icon body")?;
    let icon = image::load_from_memory(&bytes).context("failed decoding icon")?;
    Ok(icon
        .resize_exact(ICON_SIZE, ICON_SIZE, FilterType::Lanczos3)
        .to_rgba8())
}
