// SPDX-License-Identifier: MIT OR Apache-2.0
//! Redshift node space: asset and port identifiers plus the node registry.
//!
//! The identifiers are the ones the Redshift node space uses, so a graph
//! built here maps one-to-one onto a host document.

use crate::graph::{Graph, GraphError};
use crate::node::{NodeCategory, NodeId, NodeRegistry, NodeType};
use crate::port::{Port, PortType, PortValue};

/// Color space name that bypasses color management
pub const COLORSPACE_RAW: &str = "RS_INPUT_COLORSPACE_RAW";

/// Standard material node
pub mod standard_material {
    /// Asset ID
    pub const ID: &str = "com.redshift3d.redshift4c4d.nodes.core.standardmaterial";
    /// Base color input
    pub const BASE_COLOR: &str = "com.redshift3d.redshift4c4d.nodes.core.standardmaterial.base_color";
    /// Metalness input
    pub const METALNESS: &str = "com.redshift3d.redshift4c4d.nodes.core.standardmaterial.metalness";
    /// Reflection roughness input
    pub const ROUGHNESS: &str = "com.redshift3d.redshift4c4d.nodes.core.standardmaterial.refl_roughness";
    /// Reflection (specular) weight input
    pub const SPECULAR: &str = "com.redshift3d.redshift4c4d.nodes.core.standardmaterial.refl_weight";
    /// Opacity input
    pub const OPACITY: &str = "com.redshift3d.redshift4c4d.nodes.core.standardmaterial.opacity_color";
    /// Emission input
    pub const EMISSION: &str = "com.redshift3d.redshift4c4d.nodes.core.standardmaterial.emission_color";
    /// Translucency color input
    pub const TRANSLUCENCY: &str = "com.redshift3d.redshift4c4d.nodes.core.standardmaterial.transl_color";
    /// Bump input
    pub const BUMP_INPUT: &str = "com.redshift3d.redshift4c4d.nodes.core.standardmaterial.bump_input";
    /// Shader output
    pub const OUTCOLOR: &str = "com.redshift3d.redshift4c4d.nodes.core.standardmaterial.outcolor";
}

/// Material output node
pub mod output {
    /// Asset ID
    pub const ID: &str = "com.redshift3d.redshift4c4d.node.output";
    /// Surface shader input
    pub const SURFACE: &str = "com.redshift3d.redshift4c4d.node.output.surface";
    /// Displacement input
    pub const DISPLACEMENT: &str = "com.redshift3d.redshift4c4d.node.output.displacement";
}

/// Texture sampler node
pub mod texture_sampler {
    /// Asset ID
    pub const ID: &str = "com.redshift3d.redshift4c4d.nodes.core.texturesampler";
    /// Texture group; holds [`PATH`] and [`COLORSPACE`]
    pub const TEX0: &str = "com.redshift3d.redshift4c4d.nodes.core.texturesampler.tex0";
    /// File path child of [`TEX0`]
    pub const PATH: &str = "path";
    /// Color space child of [`TEX0`]
    pub const COLORSPACE: &str = "colorspace";
    /// UV scale
    pub const SCALE: &str = "com.redshift3d.redshift4c4d.nodes.core.texturesampler.scale";
    /// UV offset
    pub const OFFSET: &str = "com.redshift3d.redshift4c4d.nodes.core.texturesampler.offset";
    /// UV rotation
    pub const ROTATE: &str = "com.redshift3d.redshift4c4d.nodes.core.texturesampler.rotate";
    /// UV context input
    pub const UV_CONTEXT: &str = "com.redshift3d.redshift4c4d.nodes.core.texturesampler.uv_context";
    /// Color output
    pub const OUTCOLOR: &str = "com.redshift3d.redshift4c4d.nodes.core.texturesampler.outcolor";
}

/// Triplanar projection node
pub mod triplanar {
    /// Asset ID
    pub const ID: &str = "com.redshift3d.redshift4c4d.nodes.core.triplanar";
    /// Image input used for all three axes
    pub const IMAGE_X: &str = "com.redshift3d.redshift4c4d.nodes.core.triplanar.imagex";
    /// Projection scale
    pub const SCALE: &str = "com.redshift3d.redshift4c4d.nodes.core.triplanar.scale";
    /// Projection offset
    pub const OFFSET: &str = "com.redshift3d.redshift4c4d.nodes.core.triplanar.offset";
    /// Projection rotation
    pub const ROTATE: &str = "com.redshift3d.redshift4c4d.nodes.core.triplanar.rotation";
    /// Color output
    pub const OUTCOLOR: &str = "com.redshift3d.redshift4c4d.nodes.core.triplanar.outcolor";
}

/// UV context projection node
pub mod uv_context_projection {
    /// Asset ID
    pub const ID: &str = "com.redshift3d.redshift4c4d.nodes.core.uvcontextprojection";
    /// Projection type selector: 0 pass-through, 1 UV channel, 2 triplanar
    pub const PROJECTION: &str = "com.redshift3d.redshift4c4d.nodes.core.uvcontextprojection.proj_type";
    /// Context output
    pub const OUTCONTEXT: &str = "com.redshift3d.redshift4c4d.nodes.core.uvcontextprojection.outcontext";
}

/// Bump map node
pub mod bump_map {
    /// Asset ID
    pub const ID: &str = "com.redshift3d.redshift4c4d.nodes.core.bumpmap";
    /// Height or normal input
    pub const INPUT: &str = "com.redshift3d.redshift4c4d.nodes.core.bumpmap.input";
    /// Input type: 0 height field, 1 tangent-space normal, 2 object-space normal
    pub const INPUT_TYPE: &str = "com.redshift3d.redshift4c4d.nodes.core.bumpmap.inputtype";
    /// Bump output
    pub const OUT: &str = "com.redshift3d.redshift4c4d.nodes.core.bumpmap.out";
}

/// Displacement node
pub mod displacement {
    /// Asset ID
    pub const ID: &str = "com.redshift3d.redshift4c4d.nodes.core.displacement";
    /// Height texture input
    pub const TEXMAP: &str = "com.redshift3d.redshift4c4d.nodes.core.displacement.texmap";
    /// Displacement output
    pub const OUT: &str = "com.redshift3d.redshift4c4d.nodes.core.displacement.out";
}

/// Vector multiply node
pub mod math_vector_multiply {
    /// Asset ID
    pub const ID: &str = "com.redshift3d.redshift4c4d.nodes.core.rsmathmulvector";
    /// First factor
    pub const INPUT1: &str = "com.redshift3d.redshift4c4d.nodes.core.rsmathmulvector.input1";
    /// Second factor
    pub const INPUT2: &str = "com.redshift3d.redshift4c4d.nodes.core.rsmathmulvector.input2";
    /// Product
    pub const OUT: &str = "com.redshift3d.redshift4c4d.nodes.core.rsmathmulvector.out";
}

/// Scalar invert node (`1 - x`)
pub mod math_invert {
    /// Asset ID
    pub const ID: &str = "com.redshift3d.redshift4c4d.nodes.core.rsmathinv";
    /// Input
    pub const INPUT: &str = "com.redshift3d.redshift4c4d.nodes.core.rsmathinv.input";
    /// Output
    pub const OUT: &str = "com.redshift3d.redshift4c4d.nodes.core.rsmathinv.out";
}

/// Scalar absolute value node
pub mod math_abs {
    /// Asset ID
    pub const ID: &str = "com.redshift3d.redshift4c4d.nodes.core.rsmathabs";
    /// Input
    pub const INPUT: &str = "com.redshift3d.redshift4c4d.nodes.core.rsmathabs.input";
    /// Output
    pub const OUT: &str = "com.redshift3d.redshift4c4d.nodes.core.rsmathabs.out";
}

/// Vector absolute value node
pub mod math_abs_vector {
    /// Asset ID
    pub const ID: &str = "com.redshift3d.redshift4c4d.nodes.core.rsmathabsvector";
    /// Input
    pub const INPUT: &str = "com.redshift3d.redshift4c4d.nodes.core.rsmathabsvector.input";
    /// Output
    pub const OUT: &str = "com.redshift3d.redshift4c4d.nodes.core.rsmathabsvector.out";
}

/// Create the Redshift node registry
pub fn create_redshift_registry() -> NodeRegistry {
    let mut registry = NodeRegistry::new();

    // ========================================================================
    // Material & Output
    // ========================================================================

    registry.register(NodeType {
        id: standard_material::ID.to_string(),
        name: "Standard Material".to_string(),
        category: NodeCategory::Material,
        description: "Physically based surface shader".to_string(),
        inputs: vec![
            Port::input(standard_material::BASE_COLOR, PortType::Color)
                .with_default(PortValue::Color([0.5, 0.5, 0.5, 1.0])),
            Port::input(standard_material::METALNESS, PortType::Float).with_default(PortValue::Float(0.0)),
            Port::input(standard_material::ROUGHNESS, PortType::Float).with_default(PortValue::Float(0.3)),
            Port::input(standard_material::SPECULAR, PortType::Float).with_default(PortValue::Float(1.0)),
            Port::input(standard_material::OPACITY, PortType::Color)
                .with_default(PortValue::Color([1.0, 1.0, 1.0, 1.0])),
            Port::input(standard_material::EMISSION, PortType::Color)
                .with_default(PortValue::Color([0.0, 0.0, 0.0, 1.0])),
            Port::input(standard_material::TRANSLUCENCY, PortType::Color)
                .with_default(PortValue::Color([1.0, 1.0, 1.0, 1.0])),
            Port::input(standard_material::BUMP_INPUT, PortType::Vector3),
        ],
        outputs: vec![Port::output(standard_material::OUTCOLOR, PortType::Any)],
    });

    registry.register(NodeType {
        id: output::ID.to_string(),
        name: "Output".to_string(),
        category: NodeCategory::Output,
        description: "Material output".to_string(),
        inputs: vec![
            Port::input(output::SURFACE, PortType::Any),
            Port::input(output::DISPLACEMENT, PortType::Any),
        ],
        outputs: vec![],
    });

    // ========================================================================
    // Texture Nodes
    // ========================================================================

    registry.register(NodeType {
        id: texture_sampler::ID.to_string(),
        name: "Texture Sampler".to_string(),
        category: NodeCategory::Texture,
        description: "Sample an image file".to_string(),
        inputs: vec![
            Port::group(
                texture_sampler::TEX0,
                vec![
                    Port::input(texture_sampler::PATH, PortType::String)
                        .with_default(PortValue::String(String::new())),
                    Port::input(texture_sampler::COLORSPACE, PortType::String)
                        .with_default(PortValue::String(String::new())),
                ],
            ),
            Port::input(texture_sampler::SCALE, PortType::Vector2).with_default(PortValue::Vector2([1.0, 1.0])),
            Port::input(texture_sampler::OFFSET, PortType::Vector2).with_default(PortValue::Vector2([0.0, 0.0])),
            Port::input(texture_sampler::ROTATE, PortType::Float).with_default(PortValue::Float(0.0)),
            Port::input(texture_sampler::UV_CONTEXT, PortType::UvContext),
        ],
        outputs: vec![Port::output(texture_sampler::OUTCOLOR, PortType::Color)],
    });

    registry.register(NodeType {
        id: triplanar::ID.to_string(),
        name: "TriPlanar".to_string(),
        category: NodeCategory::Texture,
        description: "Project an image along three axes".to_string(),
        inputs: vec![
            Port::input(triplanar::IMAGE_X, PortType::Color),
            Port::input(triplanar::SCALE, PortType::Vector3).with_default(PortValue::Vector3([1.0, 1.0, 1.0])),
            Port::input(triplanar::OFFSET, PortType::Vector3).with_default(PortValue::Vector3([0.0, 0.0, 0.0])),
            Port::input(triplanar::ROTATE, PortType::Vector3).with_default(PortValue::Vector3([0.0, 0.0, 0.0])),
        ],
        outputs: vec![Port::output(triplanar::OUTCOLOR, PortType::Color)],
    });

    registry.register(NodeType {
        id: uv_context_projection::ID.to_string(),
        name: "UV Context Projection".to_string(),
        category: NodeCategory::Texture,
        description: "Select how UVs are generated for a sampler".to_string(),
        inputs: vec![Port::input(uv_context_projection::PROJECTION, PortType::Int).with_default(PortValue::Int(0))],
        outputs: vec![Port::output(uv_context_projection::OUTCONTEXT, PortType::UvContext)],
    });

    // ========================================================================
    // Utility Nodes
    // ========================================================================

    registry.register(NodeType {
        id: bump_map::ID.to_string(),
        name: "Bump Map".to_string(),
        category: NodeCategory::Utility,
        description: "Perturb shading normals from a height or normal map".to_string(),
        inputs: vec![
            Port::input(bump_map::INPUT, PortType::Any),
            Port::input(bump_map::INPUT_TYPE, PortType::Int).with_default(PortValue::Int(0)),
        ],
        outputs: vec![Port::output(bump_map::OUT, PortType::Vector3)],
    });

    registry.register(NodeType {
        id: displacement::ID.to_string(),
        name: "Displacement".to_string(),
        category: NodeCategory::Utility,
        description: "Displace geometry from a height map".to_string(),
        inputs: vec![Port::input(displacement::TEXMAP, PortType::Color)],
        outputs: vec![Port::output(displacement::OUT, PortType::Any)],
    });

    // ========================================================================
    // Math Nodes
    // ========================================================================

    registry.register(NodeType {
        id: math_vector_multiply::ID.to_string(),
        name: "Vector Multiply".to_string(),
        category: NodeCategory::Math,
        description: "Component-wise product of two vectors".to_string(),
        inputs: vec![
            Port::input(math_vector_multiply::INPUT1, PortType::Vector3),
            Port::input(math_vector_multiply::INPUT2, PortType::Vector3),
        ],
        outputs: vec![Port::output(math_vector_multiply::OUT, PortType::Vector3)],
    });

    registry.register(NodeType {
        id: math_invert::ID.to_string(),
        name: "Invert".to_string(),
        category: NodeCategory::Math,
        description: "One minus value (1 - x)".to_string(),
        inputs: vec![Port::input(math_invert::INPUT, PortType::Any)],
        outputs: vec![Port::output(math_invert::OUT, PortType::Any)],
    });

    registry.register(NodeType {
        id: math_abs::ID.to_string(),
        name: "Absolute".to_string(),
        category: NodeCategory::Math,
        description: "Absolute value".to_string(),
        inputs: vec![Port::input(math_abs::INPUT, PortType::Float)],
        outputs: vec![Port::output(math_abs::OUT, PortType::Float)],
    });

    registry.register(NodeType {
        id: math_abs_vector::ID.to_string(),
        name: "Vector Absolute".to_string(),
        category: NodeCategory::Math,
        description: "Component-wise absolute value".to_string(),
        inputs: vec![Port::input(math_abs_vector::INPUT, PortType::Vector3)],
        outputs: vec![Port::output(math_abs_vector::OUT, PortType::Vector3)],
    });

    registry
}

/// Build a graph holding one standard material wired into an output node
pub fn standard_material_graph(
    registry: &NodeRegistry,
    name: impl Into<String>,
) -> Result<(Graph, NodeId, NodeId), GraphError> {
    let mut graph = Graph::new(name);

    let material = registry
        .create_node(standard_material::ID)
        .ok_or_else(|| GraphError::UnknownNodeType(standard_material::ID.to_string()))?;
    let output_node = registry
        .create_node(output::ID)
        .ok_or_else(|| GraphError::UnknownNodeType(output::ID.to_string()))?;

    let shader_out = material
        .find_output(&[standard_material::OUTCOLOR])
        .map(|p| p.id)
        .ok_or_else(|| GraphError::MissingPort(standard_material::OUTCOLOR.to_string()))?;
    let surface_in = output_node
        .find_input(&[output::SURFACE])
        .map(|p| p.id)
        .ok_or_else(|| GraphError::MissingPort(output::SURFACE.to_string()))?;

    let material_id = graph.add_node(material);
    let output_id = graph.add_node(output_node);
    graph.connect(material_id, shader_out, output_id, surface_in)?;

    Ok((graph, material_id, output_id))
}
