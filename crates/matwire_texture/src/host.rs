// SPDX-License-Identifier: MIT OR Apache-2.0
//! Boundary to the shading graph host.
//!
//! The synthesizer only talks to a [`ShadingHost`]. Handles are opaque,
//! non-owning and valid only while the host session lives. [`GraphHost`]
//! adapts the in-memory [`Graph`] to this interface.

use matwire_graph::{Graph, GraphError, NodeId, NodeRegistry, PortId, PortValue};
use std::fmt;

/// Error reported by a host operation
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// Host does not know this node type
    #[error("unknown node type: {0}")]
    UnknownNodeType(String),

    /// A port handle no longer refers to a live port
    #[error("invalid port handle: {0}")]
    InvalidPort(String),

    /// The host refused the mutation
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Operations the synthesizer needs from a shading graph
pub trait ShadingHost {
    /// Node handle
    type Node: Copy + Eq + fmt::Debug;
    /// Port handle
    type Port: Copy + Eq + fmt::Debug;

    /// Create a node of the given type
    fn add_node(&mut self, type_id: &str) -> Result<Self::Node, HostError>;

    /// Locate an input port by identifier path
    fn find_input(&self, node: Self::Node, path: &[&str]) -> Option<Self::Port>;

    /// Locate an output port by identifier path
    fn find_output(&self, node: Self::Node, path: &[&str]) -> Option<Self::Port>;

    /// Write a port value
    fn set_value(&mut self, port: Self::Port, value: PortValue) -> Result<(), HostError>;

    /// Read a port value
    fn value(&self, port: Self::Port) -> Option<PortValue>;

    /// Source ports of every connection ending at `port`
    fn incoming(&self, port: Self::Port) -> Vec<Self::Port>;

    /// Remove the connection `source → target`
    fn disconnect(&mut self, source: Self::Port, target: Self::Port) -> Result<(), HostError>;

    /// Add a connection `source → target`
    fn connect(&mut self, source: Self::Port, target: Self::Port) -> Result<(), HostError>;

    /// All nodes of one type
    fn nodes_of_type(&self, type_id: &str) -> Vec<Self::Node>;

    /// Node owning a port
    fn port_node(&self, port: Self::Port) -> Option<Self::Node>;

    /// Type of a node
    fn node_type(&self, node: Self::Node) -> Option<String>;
}

/// [`ShadingHost`] over an in-memory graph
pub struct GraphHost<'a> {
    graph: &'a mut Graph,
    registry: &'a NodeRegistry,
}

impl<'a> GraphHost<'a> {
    /// Wrap a graph; new nodes are created from `registry`
    pub fn new(graph: &'a mut Graph, registry: &'a NodeRegistry) -> Self {
        Self { graph, registry }
    }

    /// The wrapped graph
    pub fn graph(&self) -> &Graph {
        &*self.graph
    }
}

impl ShadingHost for GraphHost<'_> {
    type Node = NodeId;
    type Port = PortId;

    fn add_node(&mut self, type_id: &str) -> Result<NodeId, HostError> {
        let node = self
            .registry
            .create_node(type_id)
            .ok_or_else(|| HostError::UnknownNodeType(type_id.to_string()))?;
        Ok(self.graph.add_node(node))
    }

    fn find_input(&self, node: NodeId, path: &[&str]) -> Option<PortId> {
        self.graph.node(node)?.find_input(path).map(|p| p.id)
    }

    fn find_output(&self, node: NodeId, path: &[&str]) -> Option<PortId> {
        self.graph.node(node)?.find_output(path).map(|p| p.id)
    }

    fn set_value(&mut self, port: PortId, value: PortValue) -> Result<(), HostError> {
        Ok(self.graph.set_port_value(port, value)?)
    }

    fn value(&self, port: PortId) -> Option<PortValue> {
        self.graph.port_value(port).cloned()
    }

    fn incoming(&self, port: PortId) -> Vec<PortId> {
        self.graph.connections_to(port).map(|c| c.from_port).collect()
    }

    fn disconnect(&mut self, source: PortId, target: PortId) -> Result<(), HostError> {
        self.graph
            .disconnect_ports(source, target)
            .map(|_| ())
            .ok_or_else(|| HostError::InvalidPort(format!("{source:?} -> {target:?}")))
    }

    fn connect(&mut self, source: PortId, target: PortId) -> Result<(), HostError> {
        self.graph.connect_ports(source, target)?;
        Ok(())
    }

    fn nodes_of_type(&self, type_id: &str) -> Vec<NodeId> {
        self.graph.nodes_of_type(type_id).map(|n| n.id).collect()
    }

    fn port_node(&self, port: PortId) -> Option<NodeId> {
        self.graph.port_owner(port)
    }

    fn node_type(&self, node: NodeId) -> Option<String> {
        self.graph.node(node).map(|n| n.node_type.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matwire_graph::graphs::redshift::{self, texture_sampler};

    #[test]
    fn test_graph_host_round_trip() {
        let registry = redshift::create_redshift_registry();
        let mut graph = Graph::default();
        let mut host = GraphHost::new(&mut graph, &registry);

        let sampler = host.add_node(texture_sampler::ID).unwrap();
        let path = host
            .find_input(sampler, &[texture_sampler::TEX0, texture_sampler::PATH])
            .unwrap();
        host.set_value(path, PortValue::String("rock.png".into())).unwrap();

        assert_eq!(host.value(path), Some(PortValue::String("rock.png".into())));
        assert_eq!(host.port_node(path), Some(sampler));
        assert_eq!(host.node_type(sampler).as_deref(), Some(texture_sampler::ID));
        assert_eq!(host.nodes_of_type(texture_sampler::ID), vec![sampler]);
    }

    #[test]
    fn test_unknown_type_and_stale_handles() {
        let registry = redshift::create_redshift_registry();
        let mut graph = Graph::default();
        let mut host = GraphHost::new(&mut graph, &registry);

        assert!(matches!(host.add_node("nope"), Err(HostError::UnknownNodeType(_))));
        assert!(host.find_input(NodeId::new(), &["x"]).is_none());
        assert!(host.disconnect(PortId::new(), PortId::new()).is_err());
        assert!(host.connect(PortId::new(), PortId::new()).is_err());
    }
}
