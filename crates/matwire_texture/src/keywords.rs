// SPDX-License-Identifier: MIT OR Apache-2.0
//! Channel keyword table.
//!
//! The table is an ordered list: entry order is the channel priority used
//! to break ties when one token appears under several channels.

use crate::channel::Channel;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Synonyms recognized for one channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelKeywords {
    /// Channel the keywords map to
    pub channel: Channel,
    /// Lowercase tokens
    pub keywords: Vec<String>,
}

impl ChannelKeywords {
    /// Create an entry from string literals
    pub fn new(channel: Channel, keywords: &[&str]) -> Self {
        Self {
            channel,
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
        }
    }

    /// Check whether a token is one of this channel's keywords
    pub fn matches(&self, token: &str) -> bool {
        self.keywords.iter().any(|k| k == token)
    }
}

/// Ordered channel → keyword mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ChannelKeywords>", into = "Vec<ChannelKeywords>")]
pub struct KeywordTable {
    entries: Vec<ChannelKeywords>,
}

impl KeywordTable {
    /// Build a table, validating it
    pub fn new(entries: Vec<ChannelKeywords>) -> Result<Self, KeywordTableError> {
        let mut table = Self { entries };
        table.normalize();
        table.validate()?;
        Ok(table)
    }

    /// Entries in priority order
    pub fn entries(&self) -> &[ChannelKeywords] {
        &self.entries
    }

    /// Channels in priority order
    pub fn priority(&self) -> impl Iterator<Item = Channel> + '_ {
        self.entries.iter().map(|e| e.channel)
    }

    /// Keywords for one channel
    pub fn keywords(&self, channel: Channel) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|e| e.channel == channel)
            .map(|e| e.keywords.as_slice())
    }

    /// First channel, in priority order, that lists this token
    pub fn lookup(&self, token: &str) -> Option<Channel> {
        self.entries
            .iter()
            .find(|e| e.matches(token))
            .map(|e| e.channel)
    }

    /// Tokens listed under more than one channel, with the channels involved
    pub fn overlaps(&self) -> Vec<(String, Vec<Channel>)> {
        let mut seen = HashSet::new();
        let mut overlaps = Vec::new();
        for entry in &self.entries {
            for keyword in &entry.keywords {
                if !seen.insert(keyword.as_str()) {
                    continue;
                }
                let owners: Vec<Channel> = self
                    .entries
                    .iter()
                    .filter(|e| e.matches(keyword))
                    .map(|e| e.channel)
                    .collect();
                if owners.len() > 1 {
                    overlaps.push((keyword.clone(), owners));
                }
            }
        }
        overlaps
    }

    fn normalize(&mut self) {
        for entry in &mut self.entries {
            for keyword in &mut entry.keywords {
                *keyword = keyword.trim().to_lowercase();
            }
        }
    }

    fn validate(&self) -> Result<(), KeywordTableError> {
        let mut channels = HashSet::new();
        for entry in &self.entries {
            if !channels.insert(entry.channel) {
                return Err(KeywordTableError::DuplicateChannel(entry.channel));
            }
            for keyword in &entry.keywords {
                // Tokens never contain separators, digits or uppercase, so
                // such a keyword could never match.
                if keyword.is_empty()
                    || keyword.contains(|c: char| c.is_numeric() || matches!(c, '_' | ' ' | '.' | '-' | '#'))
                {
                    return Err(KeywordTableError::UnmatchableKeyword {
                        channel: entry.channel,
                        keyword: keyword.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self {
            entries: vec![
                ChannelKeywords::new(
                    Channel::BaseColor,
                    &["basecolor", "base", "color", "albedo", "diffuse", "diff", "col", "bc", "alb", "rgb", "d", "dif"],
                ),
                ChannelKeywords::new(Channel::Normal, &["normal", "norm", "nrm", "nml", "nrml", "n"]),
                ChannelKeywords::new(Channel::Bump, &["bump", "b"]),
                ChannelKeywords::new(Channel::Ao, &["ao", "ambient", "occlusion", "occ", "amb"]),
                ChannelKeywords::new(Channel::Metalness, &["metallic", "metalness", "metal", "mtl", "met", "m"]),
                ChannelKeywords::new(Channel::ReflRoughness, &["roughness", "rough", "rgh", "r"]),
                ChannelKeywords::new(Channel::ReflWeight, &["specular", "spec", "s", "refl", "reflection"]),
                ChannelKeywords::new(Channel::Glossiness, &["glossiness", "gloss", "g"]),
                ChannelKeywords::new(Channel::OpacityColor, &["opacity", "opac", "alpha", "o", "a", "cutout"]),
                ChannelKeywords::new(
                    Channel::Translucency,
                    &["translucency", "transmission", "trans", "sss", "subsurface", "scatter", "scattering"],
                ),
                ChannelKeywords::new(Channel::Displacement, &["displacement", "disp", "dsp", "height", "h"]),
                ChannelKeywords::new(
                    Channel::EmissionColor,
                    &["emissive", "emission", "emit", "illu", "illumination", "selfillum", "e"],
                ),
            ],
        }
    }
}

impl TryFrom<Vec<ChannelKeywords>> for KeywordTable {
    type Error = KeywordTableError;

    fn try_from(entries: Vec<ChannelKeywords>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<KeywordTable> for Vec<ChannelKeywords> {
    fn from(table: KeywordTable) -> Self {
        table.entries
    }
}

/// Error for a keyword table that cannot classify reliably
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeywordTableError {
    /// A channel appears in more than one entry
    #[error("channel '{0}' is listed more than once")]
    DuplicateChannel(Channel),

    /// A keyword no token can ever equal
    #[error("keyword '{keyword}' for channel '{channel}' can never match a filename token")]
    UnmatchableKeyword {
        /// Owning channel
        channel: Channel,
        /// Offending keyword
        keyword: String,
    },
}
