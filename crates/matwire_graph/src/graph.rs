// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph data structure containing nodes and connections.

use crate::connection::{Connection, ConnectionId};
use crate::node::{Node, NodeId};
use crate::port::{PortDirection, PortId, PortValue};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A shading node graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Graph {
    /// Graph name
    pub name: String,
    /// Nodes in the graph
    nodes: IndexMap<NodeId, Node>,
    /// Connections between nodes
    connections: IndexMap<ConnectionId, Connection>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: IndexMap::new(),
            connections: IndexMap::new(),
        }
    }

    /// Add a node to the graph
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = node.id;
        self.nodes.insert(id, node);
        id
    }

    /// Remove a node and its connections
    pub fn remove_node(&mut self, node_id: NodeId) -> Option<Node> {
        self.connections.retain(|_, c| !c.involves_node(node_id));
        self.nodes.shift_remove(&node_id)
    }

    /// Get a node by ID
    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(&node_id)
    }

    /// Get all nodes
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get nodes of one type, in insertion order
    pub fn nodes_of_type<'a>(&'a self, type_id: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.nodes.values().filter(move |n| n.node_type == type_id)
    }

    /// Find the node owning a port
    pub fn port_owner(&self, port_id: PortId) -> Option<NodeId> {
        self.nodes
            .values()
            .find(|n| n.port(&port_id).is_some())
            .map(|n| n.id)
    }

    /// Assign a value to an input port
    pub fn set_port_value(&mut self, port_id: PortId, value: PortValue) -> Result<(), GraphError> {
        let port = self
            .nodes
            .values_mut()
            .find_map(|n| n.port_mut(&port_id))
            .ok_or(GraphError::PortNotFound(port_id))?;

        if port.direction != PortDirection::Input || !value.port_type().can_connect_to(&port.port_type) {
            return Err(GraphError::ValueMismatch(port_id));
        }

        port.value = Some(value);
        Ok(())
    }

    /// Read the value held by a port
    pub fn port_value(&self, port_id: PortId) -> Option<&PortValue> {
        self.nodes
            .values()
            .find_map(|n| n.port(&port_id))
            .and_then(|p| p.value.as_ref())
    }

    /// Add a connection between ports
    pub fn connect(
        &mut self,
        from_node: NodeId,
        from_port: PortId,
        to_node: NodeId,
        to_port: PortId,
    ) -> Result<ConnectionId, GraphError> {
        let source_node = self.nodes.get(&from_node)
            .ok_or(GraphError::NodeNotFound(from_node))?;
        let target_node = self.nodes.get(&to_node)
            .ok_or(GraphError::NodeNotFound(to_node))?;

        let source_port = source_node.port(&from_port)
            .ok_or(GraphError::PortNotFound(from_port))?;
        let target_port = target_node.port(&to_port)
            .ok_or(GraphError::PortNotFound(to_port))?;

        if source_port.direction != PortDirection::Output || !source_port.can_connect(target_port) {
            return Err(GraphError::IncompatiblePorts);
        }

        if !target_port.multi_connect && self.connections_to(to_port).next().is_some() {
            return Err(GraphError::PortAlreadyConnected(to_port));
        }

        if from_node == to_node {
            return Err(GraphError::SelfLoop);
        }

        let connection = Connection::new(from_node, from_port, to_node, to_port);
        let id = connection.id;
        self.connections.insert(id, connection);
        Ok(id)
    }

    /// Connect two ports, resolving their owning nodes
    pub fn connect_ports(&mut self, from_port: PortId, to_port: PortId) -> Result<ConnectionId, GraphError> {
        let from_node = self.port_owner(from_port).ok_or(GraphError::PortNotFound(from_port))?;
        let to_node = self.port_owner(to_port).ok_or(GraphError::PortNotFound(to_port))?;
        self.connect(from_node, from_port, to_node, to_port)
    }

    /// Remove a connection
    pub fn disconnect(&mut self, connection_id: ConnectionId) -> Option<Connection> {
        self.connections.shift_remove(&connection_id)
    }

    /// Remove the connection running between two ports
    pub fn disconnect_ports(&mut self, from_port: PortId, to_port: PortId) -> Option<Connection> {
        let id = self
            .connections
            .values()
            .find(|c| c.links(from_port, to_port))
            .map(|c| c.id)?;
        self.disconnect(id)
    }

    /// Get all connections
    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values()
    }

    /// Get connections to a specific port
    pub fn connections_to(&self, port_id: PortId) -> impl Iterator<Item = &Connection> {
        self.connections.values().filter(move |c| c.to_port == port_id)
    }

    /// Get the number of connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

/// Error when mutating the graph
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// Node not found
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// Port not found
    #[error("Port not found: {0:?}")]
    PortNotFound(PortId),

    /// Incompatible port types or directions
    #[error("Incompatible port types")]
    IncompatiblePorts,

    /// Port is already connected
    #[error("Port already connected: {0:?}")]
    PortAlreadyConnected(PortId),

    /// Self-loop not allowed
    #[error("Self-loop not allowed")]
    SelfLoop,

    /// Value does not fit the port
    #[error("Value does not fit port: {0:?}")]
    ValueMismatch(PortId),

    /// Node type is not registered
    #[error("Unknown node type: {0}")]
    UnknownNodeType(String),

    /// Node type lacks a port with this identifier
    #[error("Missing port: {0}")]
    MissingPort(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{NodeCategory, NodeType};
    use crate::port::{Port, PortType};

    fn ty(id: &str, inputs: Vec<Port>, outputs: Vec<Port>) -> NodeType {
        NodeType {
            id: id.to_string(),
            name: id.to_string(),
            category: NodeCategory::Utility,
            description: String::new(),
            inputs,
            outputs,
        }
    }

    fn pair() -> (Graph, PortId, PortId) {
        let mut graph = Graph::default();
        let src = Node::new(&ty("src", vec![], vec![Port::output("out", PortType::Color)]));
        let dst = Node::new(&ty("dst", vec![Port::input("in", PortType::Color)], vec![]));
        let out = src.outputs[0].id;
        let input = dst.inputs[0].id;
        graph.add_node(src);
        graph.add_node(dst);
        (graph, out, input)
    }

    #[test]
    fn test_connect_and_disconnect_ports() {
        let (mut graph, out, input) = pair();
        graph.connect_ports(out, input).unwrap();
        assert_eq!(graph.connections_to(input).count(), 1);

        assert!(matches!(
            graph.connect_ports(out, input),
            Err(GraphError::PortAlreadyConnected(_))
        ));

        assert!(graph.disconnect_ports(out, input).is_some());
        assert_eq!(graph.connection_count(), 0);
        assert!(graph.disconnect_ports(out, input).is_none());
    }

    #[test]
    fn test_connect_rejects_reversed_direction() {
        let (mut graph, out, input) = pair();
        assert!(matches!(
            graph.connect_ports(input, out),
            Err(GraphError::IncompatiblePorts)
        ));
    }

    #[test]
    fn test_remove_node_drops_connections() {
        let (mut graph, out, input) = pair();
        graph.connect_ports(out, input).unwrap();
        let owner = graph.port_owner(out).unwrap();
        graph.remove_node(owner);
        assert_eq!(graph.connection_count(), 0);
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_set_port_value() {
        let (mut graph, out, input) = pair();
        graph.set_port_value(input, PortValue::Color([1.0, 0.0, 0.0, 1.0])).unwrap();
        assert_eq!(graph.port_value(input), Some(&PortValue::Color([1.0, 0.0, 0.0, 1.0])));

        assert!(graph.set_port_value(out, PortValue::Float(1.0)).is_err());
        assert!(graph.set_port_value(input, PortValue::String("x".into())).is_err());
        assert!(graph.set_port_value(PortId::new(), PortValue::Float(1.0)).is_err());
    }

    #[test]
    fn test_ron_round_trip_keeps_wiring() {
        let (mut graph, out, input) = pair();
        graph.connect_ports(out, input).unwrap();

        let text = ron::ser::to_string_pretty(&graph, ron::ser::PrettyConfig::default()).unwrap();
        let loaded: Graph = ron::from_str(&text).unwrap();
        assert_eq!(loaded.connections_to(input).count(), 1);
        assert_eq!(loaded.nodes_of_type("src").count(), 1);
    }
}
