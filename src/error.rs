use std::path::PathBuf;

use thiserror::Error;

/// Failures that reach the caller. API-level trouble (timeouts, bad
/// statuses, empty results) is logged and converted into a cache
/// fallback instead of surfacing here.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown platform `{given}`, expected one of: {expected}")]
    InvalidPlatform { given: String, expected: String },

    #[error("no stats for `{player}` on `{platform}`: API unreachable and no cached snapshot")]
    NoDataAvailable { player: String, platform: String },

    #[error("banner background template missing or unreadable: {path}")]
    TemplateMissing {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("no usable banner font found (checked themed and system font paths)")]
    FontUnavailable,

    #[error("failed to write banner to {path}")]
    WriteBanner {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
