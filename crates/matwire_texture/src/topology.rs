// SPDX-License-Identifier: MIT OR Apache-2.0
//! Per-channel wiring plan.
//!
//! Each channel maps to one [`Topology`] row: the route its sampler takes to
//! the material (or output node) and the color space the sampler reads in.

use crate::channel::Channel;
use matwire_graph::graphs::redshift::{math_vector_multiply, output, standard_material};
use serde::{Deserialize, Serialize};

/// Whether the sampled value goes through color management
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorSpace {
    /// Perceptual color, left to the host's color management
    Managed,
    /// Data map, read as-is
    Raw,
}

/// Bump node input interpretation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BumpInput {
    /// Grayscale height field
    Height,
    /// Tangent-space normal map
    TangentNormal,
}

impl BumpInput {
    /// Value of the bump node `inputtype` port
    pub fn host_value(self) -> i32 {
        match self {
            Self::Height => 0,
            Self::TangentNormal => 1,
        }
    }
}

/// How a sampler reaches its consumer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Sampler color straight into a material input
    Direct {
        /// Material port identifier
        port: &'static str,
    },
    /// Through a bump node into the material bump input
    Bump(BumpInput),
    /// Through a `1 - x` node into a material input
    Invert {
        /// Material port identifier
        port: &'static str,
    },
    /// Multiplied with whatever currently feeds base color
    MultiplyBaseColor,
    /// Through a displacement node into the output node
    Displacement,
}

impl Route {
    /// Identifier of the input port this route ends at.
    ///
    /// Two textures whose routes share a target compete for the same input.
    /// Ambient occlusion ends at the multiply factor, so it only competes
    /// with other ambient occlusion maps.
    pub fn target(self) -> &'static str {
        match self {
            Self::Direct { port } | Self::Invert { port } => port,
            Self::Bump(_) => standard_material::BUMP_INPUT,
            Self::MultiplyBaseColor => math_vector_multiply::INPUT2,
            Self::Displacement => output::DISPLACEMENT,
        }
    }
}

/// One row of the channel table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topology {
    /// Channel the row describes
    pub channel: Channel,
    /// Wiring route
    pub route: Route,
    /// Sampler color space
    pub color_space: ColorSpace,
}

const fn row(channel: Channel, route: Route, color_space: ColorSpace) -> Topology {
    Topology {
        channel,
        route,
        color_space,
    }
}

/// The channel table, one row per channel in priority order
pub const TOPOLOGY: [Topology; 12] = [
    row(Channel::BaseColor, Route::Direct { port: standard_material::BASE_COLOR }, ColorSpace::Managed),
    row(Channel::Normal, Route::Bump(BumpInput::TangentNormal), ColorSpace::Raw),
    row(Channel::Bump, Route::Bump(BumpInput::Height), ColorSpace::Raw),
    row(Channel::Ao, Route::MultiplyBaseColor, ColorSpace::Raw),
    row(Channel::Metalness, Route::Direct { port: standard_material::METALNESS }, ColorSpace::Raw),
    row(Channel::ReflRoughness, Route::Direct { port: standard_material::ROUGHNESS }, ColorSpace::Raw),
    row(Channel::ReflWeight, Route::Direct { port: standard_material::SPECULAR }, ColorSpace::Raw),
    row(Channel::Glossiness, Route::Invert { port: standard_material::ROUGHNESS }, ColorSpace::Raw),
    row(Channel::OpacityColor, Route::Direct { port: standard_material::OPACITY }, ColorSpace::Raw),
    row(Channel::Translucency, Route::Direct { port: standard_material::TRANSLUCENCY }, ColorSpace::Raw),
    row(Channel::Displacement, Route::Displacement, ColorSpace::Raw),
    row(Channel::EmissionColor, Route::Direct { port: standard_material::EMISSION }, ColorSpace::Managed),
];

impl Channel {
    /// Wiring plan for this channel
    pub fn topology(self) -> &'static Topology {
        // Rows are declared in `Channel::ALL` order
        &TOPOLOGY[self as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_line_up_with_channels() {
        for channel in Channel::ALL {
            assert_eq!(channel.topology().channel, channel);
        }
    }

    #[test]
    fn test_only_appearance_maps_are_managed() {
        let managed: Vec<Channel> = TOPOLOGY
            .iter()
            .filter(|t| t.color_space == ColorSpace::Managed)
            .map(|t| t.channel)
            .collect();
        assert_eq!(managed, [Channel::BaseColor, Channel::EmissionColor]);
    }

    #[test]
    fn test_special_routes() {
        assert_eq!(Channel::Normal.topology().route, Route::Bump(BumpInput::TangentNormal));
        assert_eq!(Channel::Bump.topology().route, Route::Bump(BumpInput::Height));
        assert_eq!(
            Channel::Glossiness.topology().route,
            Route::Invert { port: standard_material::ROUGHNESS }
        );
        assert_eq!(Channel::Ao.topology().route, Route::MultiplyBaseColor);
        assert_eq!(Channel::Displacement.topology().route, Route::Displacement);
        assert_eq!(BumpInput::TangentNormal.host_value(), 1);
    }

    #[test]
    fn test_shared_targets() {
        let target = |c: Channel| c.topology().route.target();
        assert_eq!(target(Channel::Normal), target(Channel::Bump));
        assert_eq!(target(Channel::Glossiness), target(Channel::ReflRoughness));
        assert_ne!(target(Channel::Ao), target(Channel::BaseColor));
        assert_eq!(target(Channel::Displacement), output::DISPLACEMENT);

        let mut targets: Vec<&str> = TOPOLOGY.iter().map(|t| t.route.target()).collect();
        targets.sort_unstable();
        targets.dedup();
        assert_eq!(targets.len(), TOPOLOGY.len() - 2);
    }
}
