// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph synthesis: turn classified textures into wired sampler chains.
//!
//! Every connection is made by first removing all existing connections into
//! the target input, then adding the new one.
//! Running the same texture set twice therefore converges on one edge per
//! wired input.
//!
//! Failures are local. A missing node, port or host refusal is recorded as a
//! [`WiringWarning`], logged, and the remaining steps and textures proceed.
//! Nothing is rolled back.

use crate::channel::Channel;
use crate::classify::{ClassifiedTexture, Classifier};
use crate::config::{MatwireConfig, Projection, SynthesisOptions, TextureTransform};
use crate::host::ShadingHost;
use crate::topology::{ColorSpace, Route};
use matwire_graph::graphs::redshift::{
    bump_map, displacement, math_invert, math_vector_multiply, output, standard_material, texture_sampler,
    triplanar, uv_context_projection, COLORSPACE_RAW,
};
use matwire_graph::PortValue;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A recoverable problem met while wiring one texture
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WiringWarning {
    /// No standard material in the graph
    #[error("no standard material found in the graph")]
    MissingMaterial,

    /// No output node in the graph
    #[error("no output node found in the graph")]
    MissingOutputNode,

    /// A node lacks an expected port
    #[error("port '{port}' not found on {node}")]
    MissingPort {
        /// Node type
        node: String,
        /// Identifier path, `/`-joined
        port: String,
    },

    /// The host refused to create a node
    #[error("could not create {node_type}: {reason}")]
    NodeCreation {
        /// Requested node type
        node_type: String,
        /// Host message
        reason: String,
    },

    /// The host refused a value or connection change
    #[error("host rejected {action}: {reason}")]
    HostRejected {
        /// What was attempted
        action: String,
        /// Host message
        reason: String,
    },

    /// Ambient occlusion found nothing feeding base color to multiply with
    #[error("no base color chain to combine ambient occlusion with")]
    NoBaseColorChain,

    /// An earlier texture in the batch already feeds the same input
    #[error("{} ({previous_channel}) feeds the same input; this texture replaces it", .previous.display())]
    DuplicateTarget {
        /// Texture that loses
        previous: PathBuf,
        /// Its channel
        previous_channel: Channel,
    },
}

/// Outcome of wiring one texture
#[derive(Debug, Clone, PartialEq)]
pub struct TextureReport {
    /// Texture path
    pub path: PathBuf,
    /// Classified channel
    pub channel: Option<Channel>,
    /// Whether a sampler node was created
    pub sampler_created: bool,
    /// Steps that were skipped
    pub warnings: Vec<WiringWarning>,
}

impl TextureReport {
    /// Classified and wired without any skipped step
    pub fn is_wired(&self) -> bool {
        self.sampler_created && self.channel.is_some() && self.warnings.is_empty()
    }
}

/// Outcome of a batch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SynthesisReport {
    /// Per-texture reports, in processing order
    pub textures: Vec<TextureReport>,
}

impl SynthesisReport {
    /// Number of textures wired without warnings
    pub fn wired_count(&self) -> usize {
        self.textures.iter().filter(|t| t.is_wired()).count()
    }

    /// Textures that matched no channel
    pub fn unclassified(&self) -> impl Iterator<Item = &TextureReport> {
        self.textures.iter().filter(|t| t.channel.is_none())
    }

    /// All warnings with the texture they belong to
    pub fn warnings(&self) -> impl Iterator<Item = (&Path, &WiringWarning)> {
        self.textures
            .iter()
            .flat_map(|t| t.warnings.iter().map(move |w| (t.path.as_path(), w)))
    }

    /// Report for one texture
    pub fn texture(&self, path: impl AsRef<Path>) -> Option<&TextureReport> {
        let path = path.as_ref();
        self.textures.iter().find(|t| t.path == path)
    }
}

/// Classifies texture files and wires them into a host graph
#[derive(Debug, Clone, Default)]
pub struct Synthesizer {
    classifier: Classifier,
    options: SynthesisOptions,
}

impl Synthesizer {
    /// Create a synthesizer
    pub fn new(classifier: Classifier, options: SynthesisOptions) -> Self {
        Self { classifier, options }
    }

    /// Create a synthesizer from a configuration file's contents
    pub fn from_config(config: &MatwireConfig) -> Self {
        Self::new(config.classifier(), config.options())
    }

    /// The classifier in use
    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Classify and wire a batch of texture files for one material.
    ///
    /// Ambient occlusion textures are wired after everything else so they
    /// can multiply against the base color chain of the same batch. When two
    /// files end at the same input (same channel, or normal and bump, or
    /// roughness and glossiness) the later one wins.
    pub fn run<H, I, P>(&self, host: &mut H, paths: I) -> SynthesisReport
    where
        H: ShadingHost,
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let classified: Vec<ClassifiedTexture> = paths
            .into_iter()
            .map(|p| self.classifier.classify_path(p))
            .collect();

        let mut claimed: HashMap<&'static str, (PathBuf, Channel)> = HashMap::new();
        let mut duplicates: Vec<Option<WiringWarning>> = Vec::with_capacity(classified.len());
        for texture in &classified {
            let duplicate = texture.channel.and_then(|channel| {
                claimed
                    .insert(channel.topology().route.target(), (texture.path.clone(), channel))
                    .map(|(previous, previous_channel)| WiringWarning::DuplicateTarget {
                        previous,
                        previous_channel,
                    })
            });
            duplicates.push(duplicate);
        }

        let (ao, rest): (Vec<_>, Vec<_>) = classified
            .into_iter()
            .zip(duplicates)
            .partition(|(t, _)| t.channel == Some(Channel::Ao));

        let mut report = SynthesisReport::default();
        for (texture, duplicate) in rest.into_iter().chain(ao) {
            let mut texture_report = self.synthesize(host, &texture);
            if let Some(warning) = duplicate {
                tracing::warn!(path = %texture.path.display(), "{warning}");
                texture_report.warnings.insert(0, warning);
            }
            report.textures.push(texture_report);
        }

        tracing::info!(
            textures = report.textures.len(),
            wired = report.wired_count(),
            unclassified = report.unclassified().count(),
            "synthesis finished"
        );
        report
    }

    /// Wire one classified texture.
    ///
    /// A sampler is always created and pointed at the file. Unclassified
    /// textures stop there.
    pub fn synthesize<H: ShadingHost>(&self, host: &mut H, texture: &ClassifiedTexture) -> TextureReport {
        let mut session = Session {
            host,
            warnings: Vec::new(),
            path: &texture.path,
        };
        let sampler = session.wire(texture.channel, &self.options);

        TextureReport {
            path: texture.path.clone(),
            channel: texture.channel,
            sampler_created: sampler,
            warnings: session.warnings,
        }
    }
}

/// Per-texture wiring state
struct Session<'s, H: ShadingHost> {
    host: &'s mut H,
    warnings: Vec<WiringWarning>,
    path: &'s Path,
}

impl<H: ShadingHost> Session<'_, H> {
    /// Run the pipeline; returns whether the sampler exists
    fn wire(&mut self, channel: Option<Channel>, options: &SynthesisOptions) -> bool {
        let Some(sampler) = self.node(texture_sampler::ID) else {
            return false;
        };
        let path = self.path.to_string_lossy().into_owned();
        self.set(
            sampler,
            texture_sampler::ID,
            &[texture_sampler::TEX0, texture_sampler::PATH],
            PortValue::String(path),
        );

        let Some(channel) = channel else {
            tracing::debug!(path = %self.path.display(), "no channel found; sampler left unwired");
            return true;
        };
        let topology = channel.topology();

        if topology.color_space == ColorSpace::Raw {
            self.set(
                sampler,
                texture_sampler::ID,
                &[texture_sampler::TEX0, texture_sampler::COLORSPACE],
                PortValue::String(COLORSPACE_RAW.to_string()),
            );
        }

        let color = self.project(sampler, options);
        let Some(color) = color else {
            return true;
        };

        match topology.route {
            Route::Direct { port } => {
                if let Some(target) = self.material_input(port) {
                    self.rewire(color, target);
                }
            }
            Route::Bump(kind) => {
                let Some(bump) = self.node(bump_map::ID) else {
                    return true;
                };
                self.set(bump, bump_map::ID, &[bump_map::INPUT_TYPE], PortValue::Int(kind.host_value()));
                if let Some(input) = self.input(bump, bump_map::ID, &[bump_map::INPUT]) {
                    self.rewire(color, input);
                }
                let out = self.output(bump, bump_map::ID, &[bump_map::OUT]);
                if let (Some(out), Some(target)) = (out, self.material_input(standard_material::BUMP_INPUT)) {
                    self.rewire(out, target);
                }
            }
            Route::Invert { port } => {
                let Some(invert) = self.node(math_invert::ID) else {
                    return true;
                };
                if let Some(input) = self.input(invert, math_invert::ID, &[math_invert::INPUT]) {
                    self.rewire(color, input);
                }
                let out = self.output(invert, math_invert::ID, &[math_invert::OUT]);
                if let (Some(out), Some(target)) = (out, self.material_input(port)) {
                    self.rewire(out, target);
                }
            }
            Route::MultiplyBaseColor => self.multiply_base_color(color),
            Route::Displacement => {
                let Some(node) = self.node(displacement::ID) else {
                    return true;
                };
                if let Some(input) = self.input(node, displacement::ID, &[displacement::TEXMAP]) {
                    self.rewire(color, input);
                }
                let out = self.output(node, displacement::ID, &[displacement::OUT]);
                if let (Some(out), Some(target)) = (out, self.output_node_input(output::DISPLACEMENT)) {
                    self.rewire(out, target);
                }
            }
        }

        true
    }

    /// Apply the projection stage and UV transform; returns the color output
    /// consumers should read from.
    ///
    /// The transform goes to whichever node does the projecting: the
    /// triplanar node when one is interposed, the sampler otherwise.
    fn project(&mut self, sampler: H::Node, options: &SynthesisOptions) -> Option<H::Port> {
        let sampler_out = self.output(sampler, texture_sampler::ID, &[texture_sampler::OUTCOLOR])?;
        let transform = &options.transform;

        match options.projection {
            None => {
                self.transform_sampler(sampler, transform);
                Some(sampler_out)
            }
            Some(Projection::Triplanar) => {
                let Some(node) = self.node(triplanar::ID) else {
                    return Some(sampler_out);
                };
                if !transform.is_identity() {
                    let values = [
                        (triplanar::SCALE, PortValue::Vector3(transform.scale3())),
                        (triplanar::OFFSET, PortValue::Vector3(transform.offset3())),
                        (triplanar::ROTATE, PortValue::Vector3(transform.rotation3())),
                    ];
                    for (port, value) in values {
                        self.set(node, triplanar::ID, &[port], value);
                    }
                }
                if let Some(image) = self.input(node, triplanar::ID, &[triplanar::IMAGE_X]) {
                    self.rewire(sampler_out, image);
                }
                self.output(node, triplanar::ID, &[triplanar::OUTCOLOR])
            }
            Some(projection) => {
                self.transform_sampler(sampler, transform);
                let Some(proj_type) = projection.uv_proj_type() else {
                    return Some(sampler_out);
                };
                let Some(node) = self.node(uv_context_projection::ID) else {
                    return Some(sampler_out);
                };
                self.set(
                    node,
                    uv_context_projection::ID,
                    &[uv_context_projection::PROJECTION],
                    PortValue::Int(proj_type),
                );
                let context = self.output(node, uv_context_projection::ID, &[uv_context_projection::OUTCONTEXT]);
                let uv_input = self.input(sampler, texture_sampler::ID, &[texture_sampler::UV_CONTEXT]);
                if let (Some(context), Some(uv_input)) = (context, uv_input) {
                    self.rewire(context, uv_input);
                }
                Some(sampler_out)
            }
        }
    }

    fn transform_sampler(&mut self, sampler: H::Node, transform: &TextureTransform) {
        if transform.is_identity() {
            return;
        }
        let values = [
            (texture_sampler::SCALE, PortValue::Vector2(transform.scale)),
            (texture_sampler::OFFSET, PortValue::Vector2(transform.offset)),
            (texture_sampler::ROTATE, PortValue::Float(transform.rotate)),
        ];
        for (port, value) in values {
            self.set(sampler, texture_sampler::ID, &[port], value);
        }
    }

    /// Multiply ambient occlusion into whatever feeds base color.
    ///
    /// If base color is already fed by a multiply node (an earlier ao pass),
    /// that node is reused and only its occlusion factor is replaced.
    fn multiply_base_color(&mut self, ao: H::Port) {
        let Some(base_color) = self.material_input(standard_material::BASE_COLOR) else {
            return;
        };
        let Some(source) = self.host.incoming(base_color).first().copied() else {
            self.warn(WiringWarning::NoBaseColorChain);
            return;
        };

        let existing = self
            .host
            .port_node(source)
            .filter(|node| self.host.node_type(*node).as_deref() == Some(math_vector_multiply::ID));
        if let Some(multiply) = existing {
            tracing::debug!(path = %self.path.display(), "reusing ambient occlusion multiply");
            if let Some(factor) = self.input(multiply, math_vector_multiply::ID, &[math_vector_multiply::INPUT2]) {
                self.rewire(ao, factor);
            }
            return;
        }

        let Some(multiply) = self.node(math_vector_multiply::ID) else {
            return;
        };
        if let Some(input1) = self.input(multiply, math_vector_multiply::ID, &[math_vector_multiply::INPUT1]) {
            self.rewire(source, input1);
        }
        if let Some(input2) = self.input(multiply, math_vector_multiply::ID, &[math_vector_multiply::INPUT2]) {
            self.rewire(ao, input2);
        }
        if let Some(out) = self.output(multiply, math_vector_multiply::ID, &[math_vector_multiply::OUT]) {
            self.rewire(out, base_color);
        }
    }

    /// Replace every connection into `target` with one from `source`
    fn rewire(&mut self, source: H::Port, target: H::Port) {
        for existing in self.host.incoming(target) {
            if let Err(err) = self.host.disconnect(existing, target) {
                self.warn(WiringWarning::HostRejected {
                    action: format!("removing connection {existing:?} -> {target:?}"),
                    reason: err.to_string(),
                });
            }
        }
        match self.host.connect(source, target) {
            Ok(()) => tracing::debug!(?source, ?target, "connected"),
            Err(err) => self.warn(WiringWarning::HostRejected {
                action: format!("connecting {source:?} -> {target:?}"),
                reason: err.to_string(),
            }),
        }
    }

    fn node(&mut self, node_type: &str) -> Option<H::Node> {
        match self.host.add_node(node_type) {
            Ok(node) => Some(node),
            Err(err) => {
                self.warn(WiringWarning::NodeCreation {
                    node_type: node_type.to_string(),
                    reason: err.to_string(),
                });
                None
            }
        }
    }

    fn input(&mut self, node: H::Node, node_type: &str, path: &[&str]) -> Option<H::Port> {
        let port = self.host.find_input(node, path);
        if port.is_none() {
            self.missing_port(node_type, path);
        }
        port
    }

    fn output(&mut self, node: H::Node, node_type: &str, path: &[&str]) -> Option<H::Port> {
        let port = self.host.find_output(node, path);
        if port.is_none() {
            self.missing_port(node_type, path);
        }
        port
    }

    fn set(&mut self, node: H::Node, node_type: &str, path: &[&str], value: PortValue) {
        let Some(port) = self.input(node, node_type, path) else {
            return;
        };
        if let Err(err) = self.host.set_value(port, value) {
            self.warn(WiringWarning::HostRejected {
                action: format!("setting {}", path.join("/")),
                reason: err.to_string(),
            });
        }
    }

    fn material_input(&mut self, port: &str) -> Option<H::Port> {
        let materials = self.host.nodes_of_type(standard_material::ID);
        let Some(material) = materials.first().copied() else {
            self.warn(WiringWarning::MissingMaterial);
            return None;
        };
        if materials.len() > 1 {
            tracing::debug!(count = materials.len(), "several standard materials; using the first");
        }
        self.input(material, standard_material::ID, &[port])
    }

    fn output_node_input(&mut self, port: &str) -> Option<H::Port> {
        let Some(node) = self.host.nodes_of_type(output::ID).first().copied() else {
            self.warn(WiringWarning::MissingOutputNode);
            return None;
        };
        self.input(node, output::ID, &[port])
    }

    fn missing_port(&mut self, node_type: &str, path: &[&str]) {
        self.warn(WiringWarning::MissingPort {
            node: node_type.to_string(),
            port: path.join("/"),
        });
    }

    fn warn(&mut self, warning: WiringWarning) {
        tracing::warn!(path = %self.path.display(), "{warning}");
        self.warnings.push(warning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::GraphHost;
    use matwire_graph::graphs::redshift::{self, create_redshift_registry};
    use matwire_graph::{NodeCategory, NodeId, NodeRegistry, NodeType, Port, PortType};

    fn run(registry: &NodeRegistry, paths: &[&str]) -> (matwire_graph::Graph, SynthesisReport) {
        let (mut graph, _, _) = redshift::standard_material_graph(registry, "Test").unwrap();
        let report = {
            let mut host = GraphHost::new(&mut graph, registry);
            Synthesizer::default().run(&mut host, paths.iter().copied())
        };
        (graph, report)
    }

    #[test]
    fn test_missing_node_type_skips_only_that_texture() {
        let full = create_redshift_registry();
        let mut registry = NodeRegistry::new();
        for node_type in full.types().filter(|t| t.id != bump_map::ID) {
            registry.register(node_type.clone());
        }

        let (graph, report) = run(&registry, &["rock_normal.png", "rock_albedo.png"]);

        let normal = report.texture("rock_normal.png").unwrap();
        assert!(normal.sampler_created);
        assert!(matches!(
            normal.warnings.as_slice(),
            [WiringWarning::NodeCreation { node_type, .. }] if node_type == bump_map::ID
        ));
        assert!(report.texture("rock_albedo.png").unwrap().is_wired());
        assert_eq!(graph.nodes_of_type(texture_sampler::ID).count(), 2);
    }

    #[test]
    fn test_sampler_without_colorspace_port_still_wires() {
        let mut registry = create_redshift_registry();
        registry.register(NodeType {
            id: texture_sampler::ID.to_string(),
            name: "Texture Sampler".to_string(),
            category: NodeCategory::Texture,
            description: String::new(),
            inputs: vec![Port::group(
                texture_sampler::TEX0,
                vec![Port::input(texture_sampler::PATH, PortType::String)],
            )],
            outputs: vec![Port::output(texture_sampler::OUTCOLOR, PortType::Color)],
        });

        let (graph, report) = run(&registry, &["rock_roughness.png"]);

        let texture = &report.textures[0];
        assert_eq!(
            texture.warnings,
            vec![WiringWarning::MissingPort {
                node: texture_sampler::ID.to_string(),
                port: format!("{}/{}", texture_sampler::TEX0, texture_sampler::COLORSPACE),
            }]
        );
        assert!(!texture.is_wired());
        assert_eq!(graph.connection_count(), 2);
    }

    #[test]
    fn test_unknown_sampler_type_creates_nothing() {
        let registry = NodeRegistry::new();
        let mut graph = matwire_graph::Graph::default();
        let report = {
            let mut host = GraphHost::new(&mut graph, &registry);
            Synthesizer::default().run(&mut host, ["rock_albedo.png"])
        };

        assert!(!report.textures[0].sampler_created);
        assert_eq!(report.wired_count(), 0);
        assert_eq!(graph.node_count(), 0);
    }

    #[test]
    fn test_first_material_is_used() {
        let registry = create_redshift_registry();
        let (mut graph, first, _) = redshift::standard_material_graph(&registry, "Test").unwrap();
        let second = graph.add_node(registry.create_node(standard_material::ID).unwrap());
        {
            let mut host = GraphHost::new(&mut graph, &registry);
            Synthesizer::default().run(&mut host, ["rock_metallic.png"]);
        }

        let metalness = |node: NodeId| {
            graph
                .node(node)
                .and_then(|n| n.find_input(&[standard_material::METALNESS]))
                .map(|p| p.id)
                .unwrap()
        };
        assert_eq!(graph.connections_to(metalness(first)).count(), 1);
        assert_eq!(graph.connections_to(metalness(second)).count(), 0);
    }

    #[test]
    fn test_report_queries() {
        let registry = create_redshift_registry();
        let (_, report) = run(&registry, &["rock_albedo.png", "blob.png", "rock_ao.png"]);

        assert_eq!(report.textures.len(), 3);
        assert_eq!(report.wired_count(), 2);
        let unclassified: Vec<_> = report.unclassified().map(|t| t.path.clone()).collect();
        assert_eq!(unclassified, [PathBuf::from("blob.png")]);
        assert_eq!(report.warnings().count(), 0);
        // ao is always last
        assert_eq!(report.textures[2].channel, Some(Channel::Ao));
    }

    #[test]
    fn test_warning_messages() {
        let warning = WiringWarning::DuplicateTarget {
            previous: PathBuf::from("a_normal.png"),
            previous_channel: Channel::Normal,
        };
        assert_eq!(
            warning.to_string(),
            "a_normal.png (normal) feeds the same input; this texture replaces it"
        );
        assert_eq!(
            WiringWarning::MissingPort {
                node: "n".into(),
                port: "p/q".into()
            }
            .to_string(),
            "port 'p/q' not found on n"
        );
    }
}
