// SPDX-License-Identifier: MIT OR Apache-2.0
//! Semantic shading channels a texture can fill.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A shading role. Exactly one per classified texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// Albedo / diffuse color
    BaseColor,
    /// Tangent-space normal map
    Normal,
    /// Height-based bump map
    Bump,
    /// Ambient occlusion
    Ao,
    /// Metalness mask
    Metalness,
    /// Reflection roughness
    ReflRoughness,
    /// Specular weight
    ReflWeight,
    /// Glossiness (inverse roughness)
    Glossiness,
    /// Opacity / alpha mask
    OpacityColor,
    /// Translucency / subsurface
    Translucency,
    /// Height used for displacement
    Displacement,
    /// Emissive color
    EmissionColor,
}

impl Channel {
    /// All channels, in default priority order
    pub const ALL: [Channel; 12] = [
        Channel::BaseColor,
        Channel::Normal,
        Channel::Bump,
        Channel::Ao,
        Channel::Metalness,
        Channel::ReflRoughness,
        Channel::ReflWeight,
        Channel::Glossiness,
        Channel::OpacityColor,
        Channel::Translucency,
        Channel::Displacement,
        Channel::EmissionColor,
    ];

    /// Snake-case name, as used in configuration files
    pub fn name(&self) -> &'static str {
        match self {
            Self::BaseColor => "base_color",
            Self::Normal => "normal",
            Self::Bump => "bump",
            Self::Ao => "ao",
            Self::Metalness => "metalness",
            Self::ReflRoughness => "refl_roughness",
            Self::ReflWeight => "refl_weight",
            Self::Glossiness => "glossiness",
            Self::OpacityColor => "opacity_color",
            Self::Translucency => "translucency",
            Self::Displacement => "displacement",
            Self::EmissionColor => "emission_color",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for an unrecognized channel name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown channel: {0}")]
pub struct UnknownChannel(pub String);

impl FromStr for Channel {
    type Err = UnknownChannel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Channel::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| UnknownChannel(s.to_string()))
    }
}
