// SPDX-License-Identifier: MIT OR Apache-2.0
//! Run configuration: keyword table, projection and UV transform.
//!
//! Stored as RON. Every field is optional:
//!
//! ```ron
//! (
//!     keywords: [(channel: base_color, keywords: ["albedo", "diffuse"])],
//!     projection: Some(Triplanar),
//!     transform: (scale: (2.0, 2.0), offset: (0.0, 0.0), rotate: 0.0),
//! )
//! ```

use crate::classify::Classifier;
use crate::keywords::KeywordTable;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How UVs are produced for every sampler of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Projection {
    /// UV context projection passing mesh UVs through
    UvPassthrough,
    /// UV context projection reading an explicit UV channel
    UvChannel,
    /// Triplanar node between the sampler and its consumer
    Triplanar,
}

impl Projection {
    /// `proj_type` of the UV context projection node for the UV modes.
    /// Triplanar has no UV context node; it interposes its own node instead.
    pub fn uv_proj_type(self) -> Option<i32> {
        match self {
            Self::UvPassthrough => Some(0),
            Self::UvChannel => Some(1),
            Self::Triplanar => None,
        }
    }
}

/// Sampler UV transform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureTransform {
    /// UV scale
    pub scale: [f32; 2],
    /// UV offset
    pub offset: [f32; 2],
    /// Rotation in degrees
    pub rotate: f32,
}

impl TextureTransform {
    /// Whether the transform leaves UVs untouched
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    /// Scale for a triplanar node; the third axis keeps unit scale
    pub fn scale3(&self) -> [f32; 3] {
        [self.scale[0], self.scale[1], 1.0]
    }

    /// Offset for a triplanar node; the third axis is not shifted
    pub fn offset3(&self) -> [f32; 3] {
        [self.offset[0], self.offset[1], 0.0]
    }

    /// Rotation for a triplanar node, applied about the Z axis
    pub fn rotation3(&self) -> [f32; 3] {
        [0.0, 0.0, self.rotate]
    }
}

impl Default for TextureTransform {
    fn default() -> Self {
        Self {
            scale: [1.0, 1.0],
            offset: [0.0, 0.0],
            rotate: 0.0,
        }
    }
}

/// Per-run synthesis choices that are never inferred from filenames
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SynthesisOptions {
    /// Optional projection stage
    pub projection: Option<Projection>,
    /// UV transform written to each sampler
    pub transform: TextureTransform,
}

/// Contents of a `matwire` RON configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatwireConfig {
    /// Channel keyword table, in priority order
    pub keywords: KeywordTable,
    /// Projection stage
    pub projection: Option<Projection>,
    /// UV transform
    pub transform: TextureTransform,
}

impl MatwireConfig {
    /// Load from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_ron_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parse from RON text
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(text)?;
        for (keyword, channels) in config.keywords.overlaps() {
            tracing::warn!(
                keyword = %keyword,
                winner = %channels[0],
                "keyword listed under several channels; the first one wins"
            );
        }
        Ok(config)
    }

    /// Serialize to pretty RON
    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    /// Synthesis options described by this configuration
    pub fn options(&self) -> SynthesisOptions {
        SynthesisOptions {
            projection: self.projection,
            transform: self.transform,
        }
    }

    /// Classifier over this configuration's keyword table
    pub fn classifier(&self) -> Classifier {
        Classifier::new(self.keywords.clone())
    }
}

/// Error loading or saving configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// File is not valid configuration RON
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Configuration could not be written
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] ron::Error),
}
