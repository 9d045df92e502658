//! CLI presentation: text and json formatters for command results.

use crate::error::ApiError;
use crate::types::HashResult;
use owo_colors::OwoColorize;
use serde::Serialize;

/// Whether a hashed path was a file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PathKind {
    File,
    Directory,
}

impl PathKind {
    pub fn short(self) -> &'static str {
        match self {
            PathKind::File => "f",
            PathKind::Directory => "d",
        }
    }
}

#[derive(Debug, Serialize)]
struct HashOutput<'a> {
    path: &'a str,
    kind: PathKind,
    digest: String,
    size: u64,
}

const UNITS: [&str; 7] = ["B", "KB", "MB", "GB", "TB", "PB", "EB"];

/// Human-readable size in binary units.
///
/// Bytes are printed as an integer, whole kilobytes without a decimal,
/// everything else with one decimal place.
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut size = bytes as f64;
    let mut exp = 0;
    while size >= 1024.0 && exp < UNITS.len() - 1 {
        size /= 1024.0;
        exp += 1;
    }

    if exp == 1 && size.fract() == 0.0 {
        format!("{:.0} {}", size, UNITS[exp])
    } else {
        format!("{:.1} {}", size, UNITS[exp])
    }
}

/// `<path> (f|d): <hex> (size: <human>)`
pub fn format_hash_text(path: &str, kind: PathKind, result: &HashResult, color: bool) -> String {
    let digest = result.digest_hex();
    let digest = if color {
        digest.green().to_string()
    } else {
        digest
    };
    format!(
        "{} ({}): {} (size: {})",
        path,
        kind.short(),
        digest,
        format_size(result.total_size)
    )
}

pub fn format_hash_json(path: &str, kind: PathKind, result: &HashResult) -> Result<String, ApiError> {
    let output = HashOutput {
        path,
        kind,
        digest: result.digest_hex(),
        size: result.total_size,
    };
    serde_json::to_string_pretty(&output).map_err(|e| ApiError::OutputError(e.to_string()))
}

pub fn format_differences(differences: &[String], color: bool) -> String {
    differences
        .iter()
        .map(|line| {
            if color && line.starts_with("Root mismatch") {
                line.yellow().to_string()
            } else {
                line.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_verified(digest_hex: &str, color: bool) -> String {
    if color {
        format!("Hash matches: {}", digest_hex.green())
    } else {
        format!("Hash matches: {}", digest_hex)
    }
}
