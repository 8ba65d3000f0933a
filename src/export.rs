//! Output naming and saving.
//!
//! A rendered itinerary is saved as `{destination}_Itinerary.{ext}`. The
//! destination is free text typed into a form, so by default it is cleaned
//! up before it goes anywhere near a filesystem path.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

/// How the destination is turned into a filename stem.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilenamePolicy {
    /// Replace path separators, reserved and control characters with `_`,
    /// trim surrounding whitespace and dots, fall back to `Trip` if nothing
    /// is left.
    #[default]
    Sanitize,
    /// Use the destination exactly as entered.
    Verbatim,
}

const RESERVED: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];
const FALLBACK_STEM: &str = "Trip";

/// Filename for an itinerary about `destination`.
pub fn export_filename(destination: &str, extension: &str, policy: FilenamePolicy) -> String {
    let stem = match policy {
        FilenamePolicy::Verbatim => destination.to_string(),
        FilenamePolicy::Sanitize => sanitize(destination),
    };
    format!("{stem}_Itinerary.{extension}")
}

fn sanitize(destination: &str) -> String {
    let replaced: String = destination
        .chars()
        .map(|ch| {
            if ch.is_control() || RESERVED.contains(&ch) {
                '_'
            } else {
                ch
            }
        })
        .collect();
    let trimmed = replaced.trim_matches(|c: char| c.is_whitespace() || c == '.');
    if trimmed.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Write `bytes` into `dir` under the name derived from `destination`.
/// Returns the path written.
pub fn save(
    dir: &Path,
    destination: &str,
    bytes: &[u8],
    policy: FilenamePolicy,
) -> std::io::Result<PathBuf> {
    let path = dir.join(export_filename(destination, "pdf", policy));
    fs::write(&path, bytes)?;
    info!(path = path.display().to_string(), bytes = bytes.len(); "Itinerary saved");
    Ok(path)
}
