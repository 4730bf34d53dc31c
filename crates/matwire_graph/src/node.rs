// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions for the shading graph.

use crate::port::{Port, PortId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Create a new random node ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// Node type category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeCategory {
    /// Surface shaders
    Material,
    /// Render outputs
    Output,
    /// Math operations
    Math,
    /// Texture sampling and projection
    Texture,
    /// Bump, displacement and other utilities
    Utility,
}

/// Node type definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeType {
    /// Host asset identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Category
    pub category: NodeCategory,
    /// Description
    pub description: String,
    /// Default input ports
    pub inputs: Vec<Port>,
    /// Default output ports
    pub outputs: Vec<Port>,
}

/// A node instance in the graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique instance ID
    pub id: NodeId,
    /// Node type (asset) ID
    pub node_type: String,
    /// Display name
    pub name: String,
    /// Input ports
    pub inputs: Vec<Port>,
    /// Output ports
    pub outputs: Vec<Port>,
}

impl Node {
    /// Create a new node from a type definition.
    ///
    /// Every port gets a fresh ID so two nodes of one type never share ports.
    pub fn new(node_type: &NodeType) -> Self {
        Self {
            id: NodeId::new(),
            node_type: node_type.id.clone(),
            name: node_type.name.clone(),
            inputs: node_type.inputs.iter().map(Port::instantiate).collect(),
            outputs: node_type.outputs.iter().map(Port::instantiate).collect(),
        }
    }

    /// Find an input by identifier path (`["tex0", "path"]`)
    pub fn find_input(&self, path: &[&str]) -> Option<&Port> {
        find_path(&self.inputs, path)
    }

    /// Find an output by identifier path
    pub fn find_output(&self, path: &[&str]) -> Option<&Port> {
        find_path(&self.outputs, path)
    }

    /// Get a port (at any depth) by ID
    pub fn port(&self, port_id: &PortId) -> Option<&Port> {
        self.ports().find_map(|p| p.find(*port_id))
    }

    /// Get a mutable port (at any depth) by ID
    pub fn port_mut(&mut self, port_id: &PortId) -> Option<&mut Port> {
        self.inputs
            .iter_mut()
            .chain(self.outputs.iter_mut())
            .find_map(|p| p.find_mut(*port_id))
    }

    /// Get all top-level ports
    pub fn ports(&self) -> impl Iterator<Item = &Port> {
        self.inputs.iter().chain(self.outputs.iter())
    }
}

fn find_path<'a>(ports: &'a [Port], path: &[&str]) -> Option<&'a Port> {
    let (first, rest) = path.split_first()?;
    let mut port = ports.iter().find(|p| p.identifier == *first)?;
    for segment in rest {
        port = port.child(segment)?;
    }
    Some(port)
}

/// Registry of available node types
pub struct NodeRegistry {
    /// Registered node types by ID
    types: indexmap::IndexMap<String, NodeType>,
}

impl NodeRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            types: indexmap::IndexMap::new(),
        }
    }

    /// Register a node type
    pub fn register(&mut self, node_type: NodeType) {
        self.types.insert(node_type.id.clone(), node_type);
    }

    /// Get a node type by ID
    pub fn get(&self, id: &str) -> Option<&NodeType> {
        self.types.get(id)
    }

    /// Get all registered types
    pub fn types(&self) -> impl Iterator<Item = &NodeType> {
        self.types.values()
    }

    /// Get types by category
    pub fn types_in_category(&self, category: NodeCategory) -> impl Iterator<Item = &NodeType> {
        self.types.values().filter(move |t| t.category == category)
    }

    /// Create a node from a type ID
    pub fn create_node(&self, type_id: &str) -> Option<Node> {
        self.get(type_id).map(Node::new)
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
