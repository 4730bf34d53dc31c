// SPDX-License-Identifier: MIT OR Apache-2.0
//! Wires between node ports.
//!
//! A connection records both endpoints by node and by port, so the graph can
//! answer "what feeds this material input" without walking node ports.

use crate::node::NodeId;
use crate::port::PortId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable handle of one wire, kept across RON save and load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(pub Uuid);

impl ConnectionId {
    /// Fresh random handle
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

/// One wire from an output port (sampler color, bump out, ...) into an
/// input port (material channel, output displacement, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    /// Handle
    pub id: ConnectionId,
    /// Node owning the output side
    pub from_node: NodeId,
    /// Output port
    pub from_port: PortId,
    /// Node owning the input side
    pub to_node: NodeId,
    /// Input port
    pub to_port: PortId,
}

impl Connection {
    /// Wire `from_port` on `from_node` into `to_port` on `to_node`
    pub fn new(from_node: NodeId, from_port: PortId, to_node: NodeId, to_port: PortId) -> Self {
        Self {
            id: ConnectionId::new(),
            from_node,
            from_port,
            to_node,
            to_port,
        }
    }

    /// Whether either end sits on `node_id`
    pub fn involves_node(&self, node_id: NodeId) -> bool {
        self.from_node == node_id || self.to_node == node_id
    }

    /// Whether this is exactly the wire `from_port → to_port`
    pub fn links(&self, from_port: PortId, to_port: PortId) -> bool {
        self.from_port == from_port && self.to_port == to_port
    }
}
