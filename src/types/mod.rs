//! Structural descriptor model for declared types and members
//!
//! These are plain, serializable facts about a type or member: names, generic
//! slots, parameters and modifiers. They carry no behavior beyond small
//! builders; the identifier encoder in [`crate::identity`] turns them into
//! canonical ids.

mod type_ref;

pub use type_ref::TypeRef;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of a declared type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeCategory {
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,
}

/// Rough grouping of user-defined operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorCategory {
    Arithmetic,
    Comparison,
    Equality,
    Logical,
    Bitwise,
    Conversion,
    Other,
}

/// What kind of element a descriptor describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ElementKind {
    Type {
        category: TypeCategory,
    },
    Field,
    Property,
    Method,
    Constructor,
    Indexer,
    Operator {
        category: OperatorCategory,
        is_conversion: bool,
    },
    Event,
    EnumMember,
}

impl ElementKind {
    pub fn is_type(&self) -> bool {
        matches!(self, ElementKind::Type { .. })
    }

    pub fn is_conversion(&self) -> bool {
        matches!(
            self,
            ElementKind::Operator {
                is_conversion: true,
                ..
            }
        )
    }

    /// The doc-file prefix used for elements of this kind
    pub fn id_prefix(&self) -> IdPrefix {
        match self {
            ElementKind::Type { .. } => IdPrefix::Type,
            ElementKind::Field | ElementKind::EnumMember => IdPrefix::Field,
            ElementKind::Property | ElementKind::Indexer => IdPrefix::Property,
            ElementKind::Method | ElementKind::Constructor | ElementKind::Operator { .. } => {
                IdPrefix::Method
            }
            ElementKind::Event => IdPrefix::Event,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ElementKind::Type { category } => match category {
                TypeCategory::Class => "class",
                TypeCategory::Struct => "struct",
                TypeCategory::Interface => "interface",
                TypeCategory::Enum => "enum",
                TypeCategory::Delegate => "delegate",
            },
            ElementKind::Field => "field",
            ElementKind::Property => "property",
            ElementKind::Method => "method",
            ElementKind::Constructor => "constructor",
            ElementKind::Indexer => "indexer",
            ElementKind::Operator { .. } => "operator",
            ElementKind::Event => "event",
            ElementKind::EnumMember => "enum member",
        }
    }
}

/// Single-letter prefix of a documentation id (`T:`, `F:`, `P:`, `M:`, `E:`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdPrefix {
    Type,
    Field,
    Property,
    Method,
    Event,
}

impl IdPrefix {
    pub fn as_char(&self) -> char {
        match self {
            IdPrefix::Type => 'T',
            IdPrefix::Field => 'F',
            IdPrefix::Property => 'P',
            IdPrefix::Method => 'M',
            IdPrefix::Event => 'E',
        }
    }
}

impl fmt::Display for IdPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for IdPrefix {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "T" => Ok(IdPrefix::Type),
            "F" => Ok(IdPrefix::Field),
            "P" => Ok(IdPrefix::Property),
            "M" => Ok(IdPrefix::Method),
            "E" => Ok(IdPrefix::Event),
            _ => Err("Unknown id prefix"),
        }
    }
}

/// Where a generic parameter was declared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeParameterScope {
    /// Declared on the type; encoded with a single back-tick
    DeclaredOnType,
    /// Declared on a generic method; encoded with a double back-tick
    DeclaredOnMember,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeParameterSlot {
    pub name: String,
    pub index: u32,
    pub scope: TypeParameterScope,
}

impl TypeParameterSlot {
    pub fn on_type(name: impl Into<String>, index: u32) -> Self {
        Self {
            name: name.into(),
            index,
            scope: TypeParameterScope::DeclaredOnType,
        }
    }

    pub fn on_member(name: impl Into<String>, index: u32) -> Self {
        Self {
            name: name.into(),
            index,
            scope: TypeParameterScope::DeclaredOnMember,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    #[serde(default)]
    pub is_by_ref: bool,
    pub position: u32,
}

/// Structural description of a declared type or member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementDescriptor {
    #[serde(flatten)]
    pub kind: ElementKind,

    pub name: String,

    /// Namespace of a type; unused for members
    #[serde(default)]
    pub namespace: String,

    /// Declaring type (for members and nested types)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enclosing_type: Option<Box<ElementDescriptor>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<TypeParameterSlot>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterDescriptor>,

    /// Interface implemented explicitly by this member
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explicit_interface: Option<TypeRef>,

    /// Target type of a conversion operator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<TypeRef>,

    /// Static constructors encode as `#cctor`
    #[serde(default)]
    pub is_static: bool,
}

impl ElementDescriptor {
    pub fn new(kind: ElementKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            namespace: String::new(),
            enclosing_type: None,
            type_parameters: Vec::new(),
            parameters: Vec::new(),
            explicit_interface: None,
            return_type: None,
            is_static: false,
        }
    }

    /// A top-level type in `namespace`
    pub fn type_decl(
        category: TypeCategory,
        namespace: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        let mut descriptor = Self::new(ElementKind::Type { category }, name);
        descriptor.namespace = namespace.into();
        descriptor
    }

    pub fn class(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::type_decl(TypeCategory::Class, namespace, name)
    }

    pub fn interface(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::type_decl(TypeCategory::Interface, namespace, name)
    }

    pub fn method(name: impl Into<String>) -> Self {
        Self::new(ElementKind::Method, name)
    }

    pub fn field(name: impl Into<String>) -> Self {
        Self::new(ElementKind::Field, name)
    }

    pub fn property(name: impl Into<String>) -> Self {
        Self::new(ElementKind::Property, name)
    }

    pub fn constructor() -> Self {
        Self::new(ElementKind::Constructor, ".ctor")
    }

    /// A conversion operator (`op_Implicit` / `op_Explicit`) returning `target`
    pub fn conversion(name: impl Into<String>, target: TypeRef) -> Self {
        let mut descriptor = Self::new(
            ElementKind::Operator {
                category: OperatorCategory::Conversion,
                is_conversion: true,
            },
            name,
        );
        descriptor.return_type = Some(target);
        descriptor
    }

    pub fn in_type(mut self, enclosing: ElementDescriptor) -> Self {
        self.enclosing_type = Some(Box::new(enclosing));
        self
    }

    /// Declare the next generic parameter; the scope follows the element kind
    pub fn with_type_parameter(mut self, name: impl Into<String>) -> Self {
        let scope = if self.kind.is_type() {
            TypeParameterScope::DeclaredOnType
        } else {
            TypeParameterScope::DeclaredOnMember
        };
        let index = self.type_parameter_count(scope) as u32;
        self.type_parameters.push(TypeParameterSlot {
            name: name.into(),
            index,
            scope,
        });
        self
    }

    pub fn with_parameter(mut self, type_ref: TypeRef) -> Self {
        let position = self.parameters.len() as u32;
        self.parameters.push(ParameterDescriptor {
            type_ref,
            is_by_ref: false,
            position,
        });
        self
    }

    pub fn with_by_ref_parameter(mut self, type_ref: TypeRef) -> Self {
        let position = self.parameters.len() as u32;
        self.parameters.push(ParameterDescriptor {
            type_ref,
            is_by_ref: true,
            position,
        });
        self
    }

    pub fn implementing(mut self, interface: TypeRef) -> Self {
        self.explicit_interface = Some(interface);
        self
    }

    pub fn static_member(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn type_parameter_count(&self, scope: TypeParameterScope) -> usize {
        self.type_parameters
            .iter()
            .filter(|slot| slot.scope == scope)
            .count()
    }
}

/// A type together with its hierarchy links and every member visible on it
///
/// Members whose `enclosing_type` is another type are inherited members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    pub descriptor: ElementDescriptor,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_type: Option<TypeRef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<TypeRef>,

    #[serde(default)]
    pub members: Vec<ElementDescriptor>,
}

impl TypeDeclaration {
    pub fn new(descriptor: ElementDescriptor) -> Self {
        Self {
            descriptor,
            base_type: None,
            interfaces: Vec::new(),
            members: Vec::new(),
        }
    }

    pub fn extends(mut self, base: TypeRef) -> Self {
        self.base_type = Some(base);
        self
    }

    pub fn implements(mut self, interface: TypeRef) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// Add a member declared on this type
    pub fn with_member(mut self, member: ElementDescriptor) -> Self {
        let member = member.in_type(self.descriptor.clone());
        self.members.push(member);
        self
    }

    /// Add a member inherited from `declaring_type` without redeclaration
    pub fn with_inherited_member(
        mut self,
        member: ElementDescriptor,
        declaring_type: ElementDescriptor,
    ) -> Self {
        self.members.push(member.in_type(declaring_type));
        self
    }
}
