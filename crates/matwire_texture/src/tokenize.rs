// SPDX-License-Identifier: MIT OR Apache-2.0
//! Filename normalization into word tokens.

use std::path::Path;

/// Separators folded into `_` before splitting. Doubled forms come first so
/// they collapse to a single underscore.
const SEPARATORS: [&str; 6] = ["__", "--", " ", ".", "-", "#"];

/// Split a texture filename into lowercase word tokens.
///
/// Only the base name counts: any directory part and the extension are
/// dropped, then every digit is removed, in any script (`albedo2K`,
/// `albedo٢K` and `albedoK` agree),
/// separators become `_` and the result is split. CamelCase is not split.
///
/// ```
/// use matwire_texture::tokenize;
///
/// assert_eq!(tokenize("Rock_Albedo_2K.png"), ["rock", "albedo", "k"]);
/// ```
pub fn tokenize(filename: &str) -> Vec<String> {
    let stem = file_stem(filename);

    let mut normalized: String = stem.chars().filter(|c| !c.is_numeric()).collect();
    for sep in SEPARATORS {
        normalized = normalized.replace(sep, "_");
    }

    normalized
        .split('_')
        .filter(|piece| !piece.trim().is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Base name without extension. A leading dot does not start an extension.
fn file_stem(filename: &str) -> &str {
    let name = Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(filename);

    match name.rfind('.') {
        Some(dot) if dot > 0 => &name[..dot],
        _ => name,
    }
}
