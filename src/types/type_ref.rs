//! Type references used in parameter lists, hierarchy links and conversions

use super::TypeParameterSlot;
use serde::{Deserialize, Serialize};

/// A (possibly generic, array, pointer or nested) reference to a type
///
/// At the outermost level a reference is a named type, an array/pointer
/// wrapper around one, or a generic parameter. Reflection-style names such as
/// `T[]` on a generic parameter are accepted; the suffix after the first `[`
/// or `*` is kept verbatim when encoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeRef {
    #[serde(default)]
    pub namespace: String,

    #[serde(default)]
    pub short_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enclosing_type: Option<Box<TypeRef>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_arguments: Vec<TypeRef>,

    #[serde(default)]
    pub array_rank: u32,

    #[serde(default)]
    pub pointer_depth: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generic_parameter_slot: Option<TypeParameterSlot>,
}

impl TypeRef {
    pub fn named(namespace: impl Into<String>, short_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            short_name: short_name.into(),
            enclosing_type: None,
            type_arguments: Vec::new(),
            array_rank: 0,
            pointer_depth: 0,
            generic_parameter_slot: None,
        }
    }

    pub fn generic_parameter(slot: TypeParameterSlot) -> Self {
        Self {
            short_name: slot.name.clone(),
            generic_parameter_slot: Some(slot),
            ..Self::named("", "")
        }
    }

    /// A type nested inside `enclosing`
    pub fn nested(enclosing: TypeRef, short_name: impl Into<String>) -> Self {
        Self {
            enclosing_type: Some(Box::new(enclosing)),
            ..Self::named("", short_name)
        }
    }

    pub fn with_arguments(mut self, arguments: Vec<TypeRef>) -> Self {
        self.type_arguments = arguments;
        self
    }

    pub fn array(mut self, rank: u32) -> Self {
        self.array_rank = rank;
        self
    }

    pub fn pointer(mut self) -> Self {
        self.pointer_depth += 1;
        self
    }
}
