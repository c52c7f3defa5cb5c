//! Data model for parameter descriptors.
//!
//! A parameter document maps parameter names to nodes. An authoring-time node
//! ([`RawNode`]) is either a plain descriptor or a merge directive: a `base`
//! reference naming another node plus local field overrides. Resolution (see
//! [`crate::table`]) turns every node into a fully populated
//! [`ParameterDescriptor`].

use serde::{Deserialize, Serialize};

/// Semantic type of a parameter value
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Integer,
    Float,
    Object,
    Array,
}

impl ParamType {
    /// Wire name of the type, as written in parameter documents
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Object => "object",
            Self::Array => "array",
        }
    }
}

/// Where a parameter appears in a request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    Path,
    Query,
    Body,
}

impl ParamLocation {
    /// Wire name of the location, as written in parameter documents
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Query => "query",
            Self::Body => "body",
        }
    }
}

/// A fully resolved parameter descriptor.
///
/// Every field is populated; partial records never escape resolution.
/// Descriptors are defined once at load time and immutable thereafter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    /// The name of the parameter, unique key in the table
    pub name: String,
    /// Semantic type of the parameter value
    #[serde(rename = "type")]
    pub param_type: ParamType,
    /// The location of the parameter: "path", "query", or "body"
    #[serde(rename = "in")]
    pub location: ParamLocation,
    /// Whether the parameter must be supplied
    pub required: bool,
    /// Human-readable description; may embed a literal example block
    pub description: String,
}

/// An authoring-time node of the parameter document.
///
/// A node carrying `base` is a merge directive: resolution starts from the
/// referenced node's resolved fields and applies the local overrides on top
/// (shallow, last-write-wins per field). A node without `base` must carry all
/// four descriptor fields itself.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawNode {
    /// Name of the descriptor to inherit from, if this is a merge directive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    /// Semantic type of the parameter value
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub param_type: Option<ParamType>,
    /// The location of the parameter
    #[serde(rename = "in", default, skip_serializing_if = "Option::is_none")]
    pub location: Option<ParamLocation>,
    /// Whether the parameter must be supplied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RawNode {
    /// Whether this node is a merge directive rather than a plain descriptor
    pub fn is_merge(&self) -> bool {
        self.base.is_some()
    }
}
