//! Package schema documents.
//!
//! A package schema catalogs the resources a provider package offers and
//! the named object types their properties refer to. Documents are plain
//! serde data; [`PackageSchema::from_json`] parses the JSON form.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// A package schema: the full catalog, or a pruned snapshot of one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageSchema {
    /// Package name (e.g. `aws`)
    pub name: String,
    /// Package version, if published versioned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Resources by token, token-sorted
    #[serde(default)]
    pub resources: BTreeMap<String, ResourceSchema>,
    /// Named object types by token, token-sorted
    #[serde(default)]
    pub types: BTreeMap<String, TypeSchema>,
}

impl PackageSchema {
    /// Create an empty schema for a package.
    pub fn new(name: impl Into<String>, version: Option<String>) -> Self {
        Self {
            name: name.into(),
            version,
            resources: BTreeMap::new(),
            types: BTreeMap::new(),
        }
    }

    /// Parse a schema document from JSON bytes.
    pub fn from_json(bytes: &[u8]) -> Result<Self, SchemaError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Add a resource (builder style, for loaders and fixtures).
    pub fn with_resource(mut self, resource: ResourceSchema) -> Self {
        self.resources.insert(resource.token.clone(), resource);
        self
    }

    /// Add a named type (builder style, for loaders and fixtures).
    pub fn with_type(mut self, ty: TypeSchema) -> Self {
        self.types.insert(ty.token.clone(), ty);
        self
    }
}

/// Schema of a single resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceSchema {
    /// Resource token, `<package>:<module>:<Member>`
    pub token: String,
    /// Input properties
    #[serde(default)]
    pub inputs: Vec<Property>,
    /// Output properties
    #[serde(default)]
    pub outputs: Vec<Property>,
}

/// Schema of a named object type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSchema {
    /// Type token, `<package>:<module>:<Member>`
    pub token: String,
    /// Object properties
    #[serde(default)]
    pub properties: Vec<Property>,
}

/// A named, typed property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: SchemaType,
}

impl Property {
    pub fn new(name: impl Into<String>, ty: SchemaType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Property types appearing in schema documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SchemaType {
    Bool,
    Int,
    Number,
    String,
    List(Box<SchemaType>),
    Map(Box<SchemaType>),
    /// Reference to a named type in the same package, by token
    Ref(String),
}

impl SchemaType {
    /// Append the tokens of named types this type refers to.
    pub fn type_refs<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            SchemaType::List(elem) | SchemaType::Map(elem) => elem.type_refs(out),
            SchemaType::Ref(token) => out.push(token),
            _ => {}
        }
    }
}
