//! Resolved semantic types.
//!
//! A node's type stays unknown (`None` on the node) until the binding pass
//! resolves it. Deep expression typing is an external concern; this model
//! only covers what bound declarations expose to consumers.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The resolved type of a bound declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Type {
    Bool,
    Number,
    String,
    /// Homogeneous list
    List(Box<Type>),
    /// String-keyed map with homogeneous values
    Map(Box<Type>),
    /// Object with a fixed field set
    Object(BTreeMap<String, Type>),
    /// A provisioned resource, carrying its schema token
    Resource(String),
    /// An instantiated component, carrying its source directory
    Component(String),
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Bool => write!(f, "bool"),
            Type::Number => write!(f, "number"),
            Type::String => write!(f, "string"),
            Type::List(elem) => write!(f, "list({elem})"),
            Type::Map(value) => write!(f, "map({value})"),
            Type::Object(fields) => {
                write!(f, "object(")?;
                for (i, (name, ty)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{name}: {ty}")?;
                }
                write!(f, ")")
            }
            Type::Resource(token) => write!(f, "resource({token})"),
            Type::Component(source) => write!(f, "component({source})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Type::Number.to_string(), "number");
        assert_eq!(
            Type::List(Box::new(Type::String)).to_string(),
            "list(string)"
        );
        assert_eq!(
            Type::Resource("aws:s3:Bucket".to_string()).to_string(),
            "resource(aws:s3:Bucket)"
        );
    }
}
