// SPDX-License-Identifier: MIT OR Apache-2.0
//! In-memory shading node graph for `matwire`.
//!
//! This crate models the host side of texture wiring:
//! - Nodes instantiated from a registry of node types
//! - Hierarchical ports addressed by identifier path
//! - Connections from output ports to input ports
//! - Serialization support (RON)
//!
//! The Redshift node space lives in [`graphs::redshift`].

pub mod node;
pub mod port;
pub mod connection;
pub mod graph;
pub mod graphs;

pub use node::{Node, NodeCategory, NodeId, NodeRegistry, NodeType};
pub use port::{Port, PortDirection, PortId, PortType, PortValue};
pub use connection::{Connection, ConnectionId};
pub use graph::{Graph, GraphError};
