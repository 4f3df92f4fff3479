//! Canonical identifier encoding for declared types and members
//!
//! Ids follow the XML documentation comment grammar:
//!
//! - types: `Namespace.Outer.Inner`2`
//! - members: `Name`, `Name``1(System.String,`0[],System.Int32@)`
//! - explicit implementations: `MyApp#IFoo#Execute(...)`
//! - conversion operators: `op_Explicit(System.Reflection.MemberInfo)~MyApp.MyClass`
//!
//! Member ids are local to their owning type; [`qualified_id`] prepends the
//! owner to get the key used by the registry and the documentation file.

use crate::error::{EncodeError, EncodeResult};
use crate::types::{ElementDescriptor, ElementKind, TypeParameterScope, TypeRef};

/// Encode a descriptor into its canonical id
///
/// Types encode to their full dotted declaration id; members encode to the
/// member part only (name, generic arity, parameters, conversion suffix).
pub fn encode(descriptor: &ElementDescriptor) -> EncodeResult<String> {
    if descriptor.kind.is_type() {
        encode_type_declaration(descriptor)
    } else {
        encode_member(descriptor)
    }
}

/// Owner id + `.` + member id for members; the type id for types
pub fn qualified_id(descriptor: &ElementDescriptor) -> EncodeResult<String> {
    if descriptor.kind.is_type() {
        return encode_type_declaration(descriptor);
    }

    let owner = descriptor
        .enclosing_type
        .as_deref()
        .ok_or_else(|| EncodeError::MissingEnclosingType {
            name: descriptor.name.clone(),
        })?;
    Ok(format!(
        "{}.{}",
        encode_type_declaration(owner)?,
        encode_member(descriptor)?
    ))
}

/// The documentation-file form, e.g. `M:MyApp.Worker.Execute(System.String)`
pub fn prefixed_id(descriptor: &ElementDescriptor) -> EncodeResult<String> {
    Ok(format!(
        "{}:{}",
        descriptor.kind.id_prefix(),
        qualified_id(descriptor)?
    ))
}

fn encode_type_declaration(descriptor: &ElementDescriptor) -> EncodeResult<String> {
    if descriptor.name.is_empty() {
        return Err(EncodeError::EmptyName {
            kind: descriptor.kind.display_name(),
        });
    }

    let owner = match &descriptor.enclosing_type {
        Some(enclosing) => encode_type_declaration(enclosing)?,
        None => descriptor.namespace.clone(),
    };

    let mut id = join_dotted(&owner, &descriptor.name);

    // Reflection names already carry the arity (`List`1`)
    let arity = descriptor.type_parameter_count(TypeParameterScope::DeclaredOnType);
    if arity > 0 && !descriptor.name.contains('`') {
        id.push('`');
        id.push_str(&arity.to_string());
    }

    Ok(id)
}

fn encode_member(descriptor: &ElementDescriptor) -> EncodeResult<String> {
    let name = match descriptor.kind {
        ElementKind::Constructor if descriptor.is_static => "#cctor",
        ElementKind::Constructor => "#ctor",
        _ => descriptor.name.as_str(),
    };
    if name.is_empty() {
        return Err(EncodeError::EmptyName {
            kind: descriptor.kind.display_name(),
        });
    }

    let mut id = match &descriptor.explicit_interface {
        Some(interface) => format!("{}.{}", declaration_id(interface)?, name).replace('.', "#"),
        None => name.to_string(),
    };

    let arity = descriptor.type_parameter_count(TypeParameterScope::DeclaredOnMember);
    if arity > 0 {
        id.push_str("``");
        id.push_str(&arity.to_string());
    }

    if !descriptor.parameters.is_empty() {
        let mut parameters: Vec<_> = descriptor.parameters.iter().collect();
        parameters.sort_by_key(|parameter| parameter.position);

        let encoded = parameters
            .into_iter()
            .map(|parameter| {
                let mut encoded = encode_type_ref(&parameter.type_ref)?;
                if parameter.is_by_ref {
                    encoded.push('@');
                }
                Ok(encoded)
            })
            .collect::<EncodeResult<Vec<_>>>()?;

        id.push('(');
        id.push_str(&encoded.join(","));
        id.push(')');
    }

    if descriptor.kind.is_conversion() {
        let target =
            descriptor
                .return_type
                .as_ref()
                .ok_or_else(|| EncodeError::MissingReturnType {
                    name: descriptor.name.clone(),
                })?;
        id.push('~');
        id.push_str(&encode_type_ref(target)?);
    }

    Ok(id)
}

/// Encode a type reference as it appears in a parameter list
///
/// Generic arguments render as `{..}` in place of the arity marker, generic
/// parameters as back-tick placeholders, arrays as `[]`/`[,]`, pointers as `*`.
pub fn encode_type_ref(type_ref: &TypeRef) -> EncodeResult<String> {
    check_consistency(type_ref)?;

    let (base_name, verbatim_suffix) = split_shape_suffix(&type_ref.short_name);

    if let Some(slot) = &type_ref.generic_parameter_slot {
        let ticks = match slot.scope {
            TypeParameterScope::DeclaredOnType => "`",
            TypeParameterScope::DeclaredOnMember => "``",
        };
        let suffix = if verbatim_suffix.is_empty() {
            shape_suffix(type_ref)
        } else {
            verbatim_suffix.to_string()
        };
        return Ok(format!("{ticks}{}{suffix}", slot.index));
    }

    let owner = match &type_ref.enclosing_type {
        Some(enclosing) => encode_type_ref(enclosing)?,
        None => type_ref.namespace.clone(),
    };

    let mut id = if type_ref.type_arguments.is_empty() {
        join_dotted(&owner, base_name)
    } else {
        join_dotted(&owner, strip_arity(base_name))
    };

    if !type_ref.type_arguments.is_empty() {
        let arguments = type_ref
            .type_arguments
            .iter()
            .map(encode_type_ref)
            .collect::<EncodeResult<Vec<_>>>()?;
        id.push('{');
        id.push_str(&arguments.join(","));
        id.push('}');
    }

    if verbatim_suffix.is_empty() {
        id.push_str(&shape_suffix(type_ref));
    } else {
        id.push_str(verbatim_suffix);
    }

    Ok(id)
}

/// Encode a type reference in declaration form (`MyApp.Repository`1`)
///
/// Used for base types, implemented interfaces and explicit interface
/// prefixes, which must match the id of the declared type.
pub fn declaration_id(type_ref: &TypeRef) -> EncodeResult<String> {
    check_consistency(type_ref)?;
    if type_ref.generic_parameter_slot.is_some() {
        return Err(EncodeError::InconsistentTypeRef {
            name: type_ref.short_name.clone(),
            reason: "generic parameter used where a declared type is required",
        });
    }

    let owner = match &type_ref.enclosing_type {
        Some(enclosing) => declaration_id(enclosing)?,
        None => type_ref.namespace.clone(),
    };

    let (base_name, _) = split_shape_suffix(&type_ref.short_name);
    if type_ref.type_arguments.is_empty() {
        return Ok(join_dotted(&owner, base_name));
    }

    Ok(format!(
        "{}`{}",
        join_dotted(&owner, strip_arity(base_name)),
        type_ref.type_arguments.len()
    ))
}

fn check_consistency(type_ref: &TypeRef) -> EncodeResult<()> {
    match &type_ref.generic_parameter_slot {
        Some(_) if !type_ref.type_arguments.is_empty() => Err(EncodeError::InconsistentTypeRef {
            name: type_ref.short_name.clone(),
            reason: "generic parameter with type arguments",
        }),
        Some(_) if type_ref.enclosing_type.is_some() => Err(EncodeError::InconsistentTypeRef {
            name: type_ref.short_name.clone(),
            reason: "generic parameter with an enclosing type",
        }),
        None if type_ref.short_name.is_empty() => Err(EncodeError::InconsistentTypeRef {
            name: type_ref.namespace.clone(),
            reason: "neither a named type nor a generic parameter",
        }),
        _ => Ok(()),
    }
}

/// Split `T[]` / `Int32*` style names at the first `[` or `*`
fn split_shape_suffix(name: &str) -> (&str, &str) {
    match name.find(['[', '*']) {
        Some(index) => name.split_at(index),
        None => (name, ""),
    }
}

fn shape_suffix(type_ref: &TypeRef) -> String {
    let mut suffix = "*".repeat(type_ref.pointer_depth as usize);
    if type_ref.array_rank > 0 {
        suffix.push('[');
        suffix.push_str(&",".repeat(type_ref.array_rank as usize - 1));
        suffix.push(']');
    }
    suffix
}

fn strip_arity(name: &str) -> &str {
    match name.find('`') {
        Some(index) => &name[..index],
        None => name,
    }
}

fn join_dotted(owner: &str, name: &str) -> String {
    if owner.is_empty() {
        name.to_string()
    } else {
        format!("{owner}.{name}")
    }
}
