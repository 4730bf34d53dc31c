// SPDX-License-Identifier: MIT OR Apache-2.0
//! Filename → channel classification.

use crate::channel::Channel;
use crate::keywords::KeywordTable;
use crate::tokenize::tokenize;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A texture file together with the channel its name resolved to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedTexture {
    /// Path as supplied by the caller
    pub path: PathBuf,
    /// Resolved channel, `None` when no keyword matched
    pub channel: Option<Channel>,
}

/// Maps filenames to channels using a keyword table
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    table: KeywordTable,
}

impl Classifier {
    /// Create a classifier over a custom table
    pub fn new(table: KeywordTable) -> Self {
        Self { table }
    }

    /// Resolve the channel for a filename.
    ///
    /// Tokens are scanned from the right, since channel hints are usually a
    /// suffix (`rock_albedo_2k`). For each token the channels are tried in
    /// table order. The first hit wins, so a later token always beats an
    /// earlier one and channel order only breaks ties within a token.
    pub fn classify(&self, filename: &str) -> Option<Channel> {
        tokenize(filename)
            .iter()
            .rev()
            .find_map(|token| self.table.lookup(token))
    }

    /// Classify a path and keep it alongside the result
    pub fn classify_path(&self, path: impl AsRef<Path>) -> ClassifiedTexture {
        let path = path.as_ref();
        let channel = self.classify(&path.to_string_lossy());
        tracing::debug!(path = %path.display(), channel = ?channel, "classified texture");
        ClassifiedTexture {
            path: path.to_path_buf(),
            channel,
        }
    }
}

/// Classify with the default keyword table
pub fn classify(filename: &str) -> Option<Channel> {
    Classifier::default().classify(filename)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::ChannelKeywords;
    use proptest::prelude::*;

    #[test]
    fn test_scenarios() {
        assert_eq!(classify("Rock_Albedo_2K.png"), Some(Channel::BaseColor));
        assert_eq!(classify("metal_roughness_01.jpg"), Some(Channel::ReflRoughness));
        assert_eq!(classify("surface-normal-map.tif"), Some(Channel::Normal));
        assert_eq!(classify("noise_texture.png"), None);
        assert_eq!(classify("Height.exr"), Some(Channel::Displacement));
    }

    #[test]
    fn test_every_channel_reachable() {
        let cases = [
            ("wood_diffuse.png", Channel::BaseColor),
            ("wood_nrm.png", Channel::Normal),
            ("wood_bump.png", Channel::Bump),
            ("wood_occlusion.png", Channel::Ao),
            ("wood_metallic.png", Channel::Metalness),
            ("wood_rgh.png", Channel::ReflRoughness),
            ("wood_spec.png", Channel::ReflWeight),
            ("wood_gloss.png", Channel::Glossiness),
            ("leaf_alpha.png", Channel::OpacityColor),
            ("leaf_sss.png", Channel::Translucency),
            ("wood_disp.exr", Channel::Displacement),
            ("lamp_emissive.png", Channel::EmissionColor),
        ];
        for (name, channel) in cases {
            assert_eq!(classify(name), Some(channel), "{name}");
        }
    }

    #[test]
    fn test_suffix_beats_earlier_token() {
        // "metal" matches metalness, but "normal" comes later
        assert_eq!(classify("metal_plate_normal.png"), Some(Channel::Normal));
        // "ao" is rightmost even though "albedo" precedes it
        assert_eq!(classify("albedo_ao.png"), Some(Channel::Ao));
    }

    #[test]
    fn test_single_letter_and_digit_markers() {
        assert_eq!(classify("brick_D.png"), Some(Channel::BaseColor));
        assert_eq!(classify("brick_N_4096.png"), Some(Channel::Normal));
        assert_eq!(classify("brick-R2.png"), Some(Channel::ReflRoughness));
        assert_eq!(classify("rock_ao\u{0662}.png"), Some(Channel::Ao));
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify("ROCK_ALBEDO.PNG"), Some(Channel::BaseColor));
    }

    #[test]
    fn test_channel_priority_breaks_ties() {
        let classifier = Classifier::new(
            KeywordTable::new(vec![
                ChannelKeywords::new(Channel::Glossiness, &["gloss", "shine"]),
                ChannelKeywords::new(Channel::ReflWeight, &["shine"]),
            ])
            .unwrap(),
        );
        for _ in 0..3 {
            assert_eq!(classifier.classify("metal_shine.png"), Some(Channel::Glossiness));
        }
    }

    #[test]
    fn test_earlier_unambiguous_token_does_not_override_later_ambiguous() {
        let classifier = Classifier::new(
            KeywordTable::new(vec![
                ChannelKeywords::new(Channel::Bump, &["mask"]),
                ChannelKeywords::new(Channel::OpacityColor, &["mask", "alpha"]),
            ])
            .unwrap(),
        );
        assert_eq!(classifier.classify("alpha_mask.png"), Some(Channel::Bump));
    }

    #[test]
    fn test_classify_path_keeps_path() {
        let texture = Classifier::default().classify_path("maps/Rock_Albedo_2K.png");
        assert_eq!(texture.path, PathBuf::from("maps/Rock_Albedo_2K.png"));
        assert_eq!(texture.channel, Some(Channel::BaseColor));
    }

    /// Words that match no default keyword
    fn neutral_word() -> impl Strategy<Value = String> {
        "[a-z]{4,8}".prop_filter("must not be a keyword", |w| {
            KeywordTable::default().lookup(w).is_none()
        })
    }

    fn keyword() -> impl Strategy<Value = (String, Channel)> {
        let pairs: Vec<(String, Channel)> = KeywordTable::default()
            .entries()
            .iter()
            .flat_map(|e| e.keywords.iter().map(move |k| (k.clone(), e.channel)))
            .collect();
        prop::sample::select(pairs)
    }

    proptest! {
        #[test]
        fn prop_single_keyword_found_anywhere(
            words in prop::collection::vec(neutral_word(), 1..5),
            (kw, channel) in keyword(),
            position in 0usize..5,
        ) {
            let mut tokens = words.clone();
            let at = position.min(tokens.len());
            tokens.insert(at, kw);
            let name = format!("{}.png", tokens.join("_"));
            prop_assert_eq!(classify(&name), Some(channel));
        }

        #[test]
        fn prop_last_keyword_wins(
            prefix in neutral_word(),
            (first, _) in keyword(),
            (last, last_channel) in keyword(),
        ) {
            let name = format!("{prefix}_{first}_{last}.png");
            prop_assert_eq!(classify(&name), Some(last_channel));
        }
    }
}
