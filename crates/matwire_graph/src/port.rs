// SPDX-License-Identifier: MIT OR Apache-2.0
//! Port definitions for node inputs/outputs.
//!
//! Ports are addressed two ways: by a globally unique [`PortId`] (what
//! connections store) and by a host identifier string such as
//! `com.redshift3d.redshift4c4d.nodes.core.texturesampler.outcolor`.
//! A port may own child ports, so a value slot like the sampler path is
//! reached through an identifier path (`tex0` then `path`).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortId(pub Uuid);

impl PortId {
    /// Create a new random port ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PortId {
    fn default() -> Self {
        Self::new()
    }
}

/// Port direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortDirection {
    /// Input port
    Input,
    /// Output port
    Output,
}

/// Data type that can flow through ports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PortType {
    /// Boolean value
    Bool,
    /// Integer value (enum selectors such as projection or bump type)
    Int,
    /// Floating point value
    Float,
    /// 2D vector
    Vector2,
    /// 3D vector
    Vector3,
    /// Color (RGBA)
    Color,
    /// String value (file paths, color space names)
    String,
    /// Texture coordinate context
    UvContext,
    /// Container for child ports, carries no value itself
    Group,
    /// Any type (for generic math nodes)
    Any,
}

impl PortType {
    /// Check if this type can connect to another type
    pub fn can_connect_to(&self, other: &PortType) -> bool {
        if matches!(self, Self::Group) || matches!(other, Self::Group) {
            return false;
        }

        // Any type can connect to anything
        if matches!(self, Self::Any) || matches!(other, Self::Any) {
            return true;
        }

        if self == other {
            return true;
        }

        // Implicit conversions
        match (self, other) {
            (Self::Int, Self::Float) | (Self::Float, Self::Int) => true,
            (Self::Float, Self::Vector2 | Self::Vector3 | Self::Color) => true,
            (Self::Vector2, Self::Vector3) => true,
            (Self::Color, Self::Vector3 | Self::Float) | (Self::Vector3, Self::Color) => true,
            _ => false,
        }
    }
}

/// A port on a node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Port {
    /// Unique port ID
    pub id: PortId,
    /// Host identifier, unique among siblings
    pub identifier: String,
    /// Port direction
    pub direction: PortDirection,
    /// Data type
    pub port_type: PortType,
    /// Current value (for inputs)
    pub value: Option<PortValue>,
    /// Whether multiple connections are allowed
    pub multi_connect: bool,
    /// Nested ports
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Port>,
}

impl Port {
    /// Create a new input port
    pub fn input(identifier: impl Into<String>, port_type: PortType) -> Self {
        Self {
            id: PortId::new(),
            identifier: identifier.into(),
            direction: PortDirection::Input,
            port_type,
            value: None,
            multi_connect: false,
            children: Vec::new(),
        }
    }

    /// Create a new output port
    pub fn output(identifier: impl Into<String>, port_type: PortType) -> Self {
        Self {
            id: PortId::new(),
            identifier: identifier.into(),
            direction: PortDirection::Output,
            port_type,
            value: None,
            multi_connect: true, // Outputs can fan out by default
            children: Vec::new(),
        }
    }

    /// Create an input group holding child ports
    pub fn group(identifier: impl Into<String>, children: Vec<Port>) -> Self {
        Self {
            children,
            ..Self::input(identifier, PortType::Group)
        }
    }

    /// Set the initial value
    pub fn with_default(mut self, value: PortValue) -> Self {
        self.value = Some(value);
        self
    }

    /// Deep copy with fresh IDs, used when a node is instantiated from its type
    pub fn instantiate(&self) -> Self {
        Self {
            id: PortId::new(),
            identifier: self.identifier.clone(),
            direction: self.direction,
            port_type: self.port_type.clone(),
            value: self.value.clone(),
            multi_connect: self.multi_connect,
            children: self.children.iter().map(Port::instantiate).collect(),
        }
    }

    /// Find a direct child by identifier
    pub fn child(&self, identifier: &str) -> Option<&Port> {
        self.children.iter().find(|p| p.identifier == identifier)
    }

    /// Find this port or a descendant by ID
    pub fn find(&self, port_id: PortId) -> Option<&Port> {
        if self.id == port_id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(port_id))
    }

    /// Mutable variant of [`Port::find`]
    pub fn find_mut(&mut self, port_id: PortId) -> Option<&mut Port> {
        if self.id == port_id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(port_id))
    }

    /// Check if a connection to another port is valid
    pub fn can_connect(&self, other: &Port) -> bool {
        // Must be opposite directions
        if self.direction == other.direction {
            return false;
        }

        self.port_type.can_connect_to(&other.port_type)
    }
}

/// Value that can be stored in a port
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PortValue {
    /// Boolean
    Bool(bool),
    /// Integer
    Int(i32),
    /// Float
    Float(f32),
    /// 2D vector
    Vector2([f32; 2]),
    /// 3D vector
    Vector3([f32; 3]),
    /// Color
    Color([f32; 4]),
    /// String
    String(String),
}

impl PortValue {
    /// Get the port type for this value
    pub fn port_type(&self) -> PortType {
        match self {
            Self::Bool(_) => PortType::Bool,
            Self::Int(_) => PortType::Int,
            Self::Float(_) => PortType::Float,
            Self::Vector2(_) => PortType::Vector2,
            Self::Vector3(_) => PortType::Vector3,
            Self::Color(_) => PortType::Color,
            Self::String(_) => PortType::String,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instantiate_refreshes_ids() {
        let group = Port::group(
            "tex0",
            vec![Port::input("path", PortType::String).with_default(PortValue::String(String::new()))],
        );
        let copy = group.instantiate();

        assert_ne!(copy.id, group.id);
        assert_ne!(copy.children[0].id, group.children[0].id);
        assert_eq!(copy.children[0].identifier, "path");
        assert_eq!(copy.children[0].value, Some(PortValue::String(String::new())));
    }

    #[test]
    fn test_find_nested() {
        let group = Port::group("tex0", vec![Port::input("colorspace", PortType::String)]);
        let child_id = group.children[0].id;

        assert_eq!(group.find(child_id).map(|p| p.identifier.as_str()), Some("colorspace"));
        assert!(group.child("path").is_none());
    }

    #[test]
    fn test_groups_never_connect() {
        let out = Port::output("out", PortType::Color);
        let group = Port::group("tex0", Vec::new());
        assert!(!out.can_connect(&group));
        assert!(out.can_connect(&Port::input("base_color", PortType::Color)));
        assert!(!out.can_connect(&Port::output("other", PortType::Color)));
    }
}
