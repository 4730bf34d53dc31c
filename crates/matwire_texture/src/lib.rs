// SPDX-License-Identifier: MIT OR Apache-2.0
//! Texture channel classification and shading graph wiring.
//!
//! Given the texture files for one material, this crate
//! - infers each file's shading channel from its name ([`classify`])
//! - wires a sampler chain per texture into a host graph ([`Synthesizer`])
//!
//! ## Pipeline
//!
//! filename → [`tokenize`] → [`Classifier`] → [`Channel`] →
//! [`Topology`] row → [`Synthesizer`] → mutated [`ShadingHost`]
//!
//! Classification is pure. Synthesis only touches the graph through the
//! [`ShadingHost`] trait; [`GraphHost`] adapts the in-memory
//! [`matwire_graph::Graph`].

pub mod channel;
pub mod tokenize;
pub mod keywords;
pub mod classify;
pub mod topology;
pub mod host;
pub mod config;
pub mod synth;

pub use channel::Channel;
pub use tokenize::tokenize;
pub use keywords::{ChannelKeywords, KeywordTable, KeywordTableError};
pub use classify::{classify, ClassifiedTexture, Classifier};
pub use topology::{BumpInput, ColorSpace, Route, Topology, TOPOLOGY};
pub use host::{GraphHost, HostError, ShadingHost};
pub use config::{ConfigError, MatwireConfig, Projection, SynthesisOptions, TextureTransform};
pub use synth::{SynthesisReport, Synthesizer, TextureReport, WiringWarning};
